use super::*;

fn lesson(config: FractionsConfig) -> TiceResult<FractionsLesson> {
    FractionsLesson::new(config, FractionsStyle::default())
}

#[test]
fn defaults_are_valid() {
    lesson(FractionsConfig::default()).unwrap();
}

#[test]
fn improper_fraction_is_rejected() {
    assert!(Fraction::new(5, 4).validate().is_err());
    assert!(Fraction::new(1, 0).validate().is_err());
    assert!(Fraction::new(1, MAX_DENOMINATOR + 1).validate().is_err());
    Fraction::new(0, 3).validate().unwrap();
}

#[test]
fn equivalence_cross_multiplies() {
    assert!(Fraction::new(1, 2).is_equivalent(Fraction::new(2, 4)));
    assert!(!Fraction::new(2, 3).is_equivalent(Fraction::new(3, 4)));
    assert_eq!(Fraction::new(2, 3).scaled(3), Some(Fraction::new(6, 9)));
    assert_eq!(Fraction::new(3, 4).to_string(), "3/4");
}

#[test]
fn options_need_exactly_one_match() {
    let mut config = FractionsConfig::default();
    config.options = vec![Fraction::new(1, 4), Fraction::new(3, 4)];
    assert!(lesson(config.clone()).is_err());

    config.options = vec![Fraction::new(2, 4), Fraction::new(2, 4)];
    assert!(lesson(config).is_err());
}

#[test]
fn too_many_examples_are_rejected() {
    let mut config = FractionsConfig::default();
    let extra = config.examples[0].clone();
    config.examples.push(extra);
    assert!(config.validate().is_err());
}

#[test]
fn models_shade_the_numerator() {
    let l = lesson(FractionsConfig::default()).unwrap();
    for ex in &l.config.examples {
        let m = l.model(ex, Point::ZERO).unwrap();
        assert_eq!(m.shading.len(), ex.fraction.numerator as usize);
        assert!(m.cuts.is_some());
    }
}

#[test]
fn rect_model_follows_orientation() {
    let l = lesson(FractionsConfig::default()).unwrap();
    let mut ex = FractionExample::new(
        Bilingual::en_only("strips"),
        Fraction::new(1, 2),
        ModelShape::Rect,
    );
    ex.orientation = Orientation::Horizontal;
    let m = l.model(&ex, Point::ZERO).unwrap();
    let shaded = m.shading[0].bounds();
    let whole = m.outline.bounds();
    assert!((shaded.width() - whole.width()).abs() < 1e-9);
    assert!((shaded.height() - whole.height() / 2.0).abs() < 1e-9);
}

#[test]
fn mini_assessment_follows_its_toggle() {
    let style = FractionsStyle {
        show_mini_assessment: false,
        ..FractionsStyle::default()
    };
    let l = FractionsLesson::new(FractionsConfig::default(), style).unwrap();
    let names: Vec<&str> = l.build_steps().iter().map(|s| s.name).collect();
    assert!(!names.contains(&"mini_assessment_match"));
    assert_eq!(names.last(), Some(&"outro"));
}
