use animtice::{LessonInputs, Quality, build_timeline};

use super::*;

#[test]
fn sums_keep_the_denominator() {
    let s = FractionSum::new(1, 2, 4);
    assert_eq!(s.sum(), Fraction::new(3, 4));
    assert_eq!(s.expression(), "1/4 + 2/4 = 3/4");
    assert_eq!(s.mixed_text(), None);
    assert_eq!(s.wholes_needed(), 1);
}

#[test]
fn sums_past_one_whole_use_a_second_bar() {
    let exact = FractionSum::new(3, 2, 5);
    assert_eq!(exact.mixed_text().as_deref(), Some("1"));
    assert_eq!(exact.wholes_needed(), 1);

    let over = FractionSum::new(3, 4, 6);
    assert_eq!(over.mixed_text().as_deref(), Some("1 1/6"));
    assert_eq!(over.wholes_needed(), 2);
}

#[test]
fn addends_must_be_proper_and_non_zero() {
    assert!(FractionSum::new(0, 2, 4).validate().is_err());
    assert!(FractionSum::new(5, 1, 4).validate().is_err());
    assert!(FractionSum::new(1, 1, 0).validate().is_err());
    assert!(FractionSum::new(1, 1, 25).validate().is_err());
    FractionSum::new(4, 4, 4).validate().unwrap();
}

#[test]
fn stated_answer_must_be_the_sum() {
    let mut config = AddingConfig::default();
    config.validate().unwrap();
    config.assessment_answer = Fraction::new(5, 14);
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("2/7 + 3/7 = 5/7"), "{err}");
}

#[test]
fn bars_are_cut_into_equal_parts() {
    let l = AddingLesson::new(AddingConfig::default(), AddingStyle::default()).unwrap();
    let bar = l.bar(0.0, 6).unwrap();
    assert_eq!(bar.parts.len(), 6);
    for part in &bar.parts {
        assert!((part.width() - 1.0).abs() < 1e-9);
    }
    assert!(l.bar(0.0, 1).unwrap().cuts.is_none());
}

#[test]
fn over_one_example_builds() {
    let inputs = LessonInputs {
        settings: Quality::Low.settings(),
        config: Some(serde_json::json!({ "examples": [{ "a": 5, "b": 4, "denominator": 6 }] })),
        style: Some(serde_json::json!({ "show_why_same_denominator": false })),
        ..LessonInputs::default()
    };
    let t = build_timeline::<AddingLesson>(&inputs).unwrap();
    assert!(t.step("exploration_examples").is_some());
}
