use animtice::{LessonInputs, Quality, build_timeline};

use super::*;

#[test]
fn default_problems_share_evenly() {
    let config = PartValueConfig::default();
    config.validate().unwrap();
    let answers: Vec<u32> = config.problems.iter().map(|p| p.answer).collect();
    assert_eq!(answers, vec![4, 4]);
    assert_eq!(division(12, 3, 4), "12 ÷ 3 = 4");
}

#[test]
fn uneven_shares_are_rejected() {
    let mut problem = PartValueConfig::default().assessment;
    problem.total = 19;
    let err = problem.validate().unwrap_err();
    assert!(err.to_string().contains("cannot be shared equally"), "{err}");
}

#[test]
fn stated_quotient_is_checked() {
    let mut config = PartValueConfig::default();
    config.assessment.answer = 6;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("18 ÷ 6 = 3"), "{err}");
}

#[test]
fn part_counts_are_bounded() {
    let mut problem = PartValueConfig::default().problems[0].clone();
    problem.n_parts = 1;
    problem.answer = 12;
    assert!(problem.validate().is_err());
    problem.n_parts = MAX_PARTS + 1;
    assert!(problem.validate().is_err());
}

#[test]
fn context_answer_names_one_receiver() {
    let problem = &PartValueConfig::default().problems[0];
    assert_eq!(problem.context_answer().en, "One kid = 4 apples");
    let plain = PartValueProblem {
        item: Bilingual::en_only("cards"),
        ..problem.clone()
    };
    assert!(plain.context_answer().ar.is_none());
}

#[test]
fn whole_bar_is_anchored_and_never_too_thin() {
    let style = PartValueStyle::default();
    let bar = style.whole_bar(12);
    assert!((bar.x0 + 5.2).abs() < 1e-9);
    assert!((bar.width() - 6.0).abs() < 1e-9);
    assert!((style.whole_bar(1).width() - 1.0).abs() < 1e-9);
}

#[test]
fn long_bars_are_rejected() {
    let style = PartValueStyle {
        unit_width: 0.7,
        ..PartValueStyle::default()
    };
    assert!(PartValueLesson::new(PartValueConfig::default(), style).is_err());
}

#[test]
fn builds_with_every_toggle_off() {
    let inputs = LessonInputs {
        settings: Quality::Low.settings(),
        style: Some(serde_json::json!({
            "show_problem_text": false,
            "show_zoom_focus": false,
            "show_symbolic_link": false,
            "show_context_answer": false,
            "show_verify": false
        })),
        ..LessonInputs::default()
    };
    let t = build_timeline::<PartValueLesson>(&inputs).unwrap();
    assert!(t.step("exploration").is_some());
}
