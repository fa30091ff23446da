use super::*;

#[test]
fn each_kind_solves_its_unknown() {
    assert_eq!(ModelKind::Total { a: 6, b: 8 }.solve(), Some(14));
    assert_eq!(ModelKind::MissingPart { total: 18, given: 7 }.solve(), Some(11));
    assert_eq!(ModelKind::Difference { larger: 14, smaller: 9 }.solve(), Some(5));
    assert_eq!(ModelKind::CompareAdd { base: 9, more: 5 }.solve(), Some(14));
}

#[test]
fn impossible_models_have_no_answer() {
    assert_eq!(ModelKind::MissingPart { total: 5, given: 7 }.solve(), None);
    assert_eq!(ModelKind::Difference { larger: 4, smaller: 4 }.solve(), None);
    assert_eq!(ModelKind::Total { a: 0, b: 3 }.solve(), None);
    assert_eq!(ModelKind::CompareAdd { base: 5, more: 0 }.solve(), None);
}

#[test]
fn operation_and_check_read_both_ways() {
    let m = ModelKind::MissingPart { total: 18, given: 7 };
    assert_eq!(m.operation(11), "18 − 7 = 11");
    assert_eq!(m.verification(11), "11 + 7 = 18");
}

#[test]
fn wrong_stated_answer_is_rejected() {
    let mut config = ModelingConfig::default();
    config.problems[1].answer = 6;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("problem 2"), "{err}");
}

#[test]
fn quantities_past_the_cap_are_rejected() {
    let problem = ModelProblem {
        text: Bilingual::en_only("huge"),
        model: ModelKind::Total { a: 1000, b: 2000 },
        answer: 3000,
    };
    let err = problem.validate().unwrap_err();
    assert!(err.to_string().contains(&MAX_QUANTITY.to_string()), "{err}");
    let saturating = ModelKind::CompareAdd { base: u32::MAX, more: 1 };
    assert!(
        ModelProblem { text: Bilingual::en_only("max"), model: saturating, answer: 0 }
            .validate()
            .is_err()
    );
}

#[test]
fn bars_must_fit_on_screen() {
    let mut config = ModelingConfig::default();
    config.problems[0] = ModelProblem {
        text: Bilingual::en_only("big"),
        model: ModelKind::Total { a: 20, b: 20 },
        answer: 40,
    };
    assert!(ModelingLesson::new(config, ModelingStyle::default()).is_err());
}

#[test]
fn difference_model_marks_the_gap() {
    let l = ModelingLesson::new(ModelingConfig::default(), ModelingStyle::default()).unwrap();
    let drawn = l.draw(ModelKind::Difference { larger: 14, smaller: 9 }).unwrap();
    assert_eq!(drawn.bars.len(), 4);
    let gap = drawn.unknown[0].bounds();
    assert!((gap.width() - 5.0 * 0.55).abs() < 1e-9);
    assert!((gap.x0 - (-5.2 + 9.0 * 0.55)).abs() < 1e-9);
}

#[test]
fn problem_kind_is_tagged_in_json() {
    let p: ModelProblem = serde_json::from_value(serde_json::json!({
        "text": { "en": "x" },
        "model": { "kind": "compare_add", "base": 3, "more": 2 },
        "answer": 5
    }))
    .unwrap();
    assert_eq!(p.model, ModelKind::CompareAdd { base: 3, more: 2 });
    p.validate().unwrap();
}
