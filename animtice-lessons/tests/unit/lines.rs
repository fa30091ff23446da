use animtice::{LessonInputs, Quality, build_timeline};

use super::*;

fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Line {
    Line::new((x0, y0), (x1, y1))
}

#[test]
fn classify_distinguishes_the_three_relations() {
    let h = seg(-1.0, 0.0, 1.0, 0.0);
    assert_eq!(
        Relation::classify(h, seg(-1.0, 1.0, 1.0, 1.0)),
        Some(Relation::Parallel)
    );
    assert_eq!(
        Relation::classify(h, seg(0.0, -1.0, 0.0, 1.0)),
        Some(Relation::Perpendicular)
    );
    assert_eq!(
        Relation::classify(h, seg(-1.0, -1.0, 1.0, 1.0)),
        Some(Relation::Intersecting)
    );
}

#[test]
fn zero_length_line_has_no_relation() {
    let point = seg(1.0, 1.0, 1.0, 1.0);
    assert_eq!(Relation::classify(point, seg(0.0, 0.0, 1.0, 0.0)), None);
}

#[test]
fn default_classifier_pairs_are_consistent() {
    LinesConfig::default().validate().unwrap();
}

#[test]
fn mislabelled_pair_is_rejected() {
    let mut config = LinesConfig::default();
    config.classifier[0].expected = Relation::Perpendicular;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("classifier pair 0"), "{err}");
}

#[test]
fn angle_out_of_range_is_rejected() {
    let config = LinesConfig {
        intersect_half_angle_deg: 90.0,
        ..LinesConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn classifier_step_follows_its_toggle() {
    let with = LinesLesson::new(LinesConfig::default(), LinesStyle::default()).unwrap();
    let names: Vec<&str> = with.build_steps().iter().map(|s| s.name).collect();
    assert_eq!(names.last(), Some(&"classifier_check"));

    let style = LinesStyle {
        show_classifier: false,
        ..LinesStyle::default()
    };
    let without = LinesLesson::new(LinesConfig::default(), style).unwrap();
    assert!(without.build_steps().iter().all(|s| s.name != "classifier_check"));
}

#[test]
fn lesson_records_demo_steps_in_order() {
    let inputs = LessonInputs {
        settings: Quality::Low.settings(),
        ..LessonInputs::default()
    };
    let t = build_timeline::<LinesLesson>(&inputs).unwrap();
    let names: Vec<&str> = t.markers.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "intro",
            "parallel_demo",
            "intersect_demo",
            "perpendicular_demo",
            "institutionalization",
            "classifier_check"
        ]
    );
}
