use super::*;

#[test]
fn refinement_multiplies_both_terms() {
    let ex = EquivalentExample::new(2, 3, 2);
    assert_eq!(ex.refined().unwrap(), Fraction::new(4, 6));
    assert!(ex.fraction.is_equivalent(ex.refined().unwrap()));
}

#[test]
fn factor_below_two_is_rejected() {
    assert!(EquivalentExample::new(1, 2, 1).validate().is_err());
}

#[test]
fn refinement_must_stay_drawable() {
    assert!(EquivalentExample::new(1, 12, 3).validate().is_err());
    EquivalentExample::new(1, 12, 2).validate().unwrap();
}

#[test]
fn target_needs_exactly_one_equivalent_option() {
    let mut config = EquivalentConfig::default();
    config.validate().unwrap();

    config.options.push(Fraction::new(9, 12));
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("found 2"), "{err}");
}

#[test]
fn bar_model_shades_the_numerator() {
    let l = EquivalentLesson::new(EquivalentConfig::default(), EquivalentStyle::default()).unwrap();
    let bar = l.bar(0.0);
    let parts = l.bar_model(bar, Fraction::new(2, 3)).unwrap();
    // outline, dividers, two shaded parts
    assert_eq!(parts.len(), 4);
    let shaded = parts[2].bounds().union(parts[3].bounds());
    assert!((shaded.width() - bar.width() * 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn bar_gap_must_clear_the_bar() {
    let style = EquivalentStyle {
        bar_gap: 1.0,
        ..EquivalentStyle::default()
    };
    assert!(style.validate().is_err());
}
