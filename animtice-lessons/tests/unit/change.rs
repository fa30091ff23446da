use animtice::{LessonInputs, Quality, build_timeline};

use super::*;

fn states(before: u32, change: u32, after: u32) -> States {
    States {
        before,
        change,
        after,
    }
}

#[test]
fn each_unknown_is_solved_for_both_kinds() {
    use ChangeKind::*;
    let after = Situation::After { before: 8, change: 5 };
    assert_eq!(after.solve(Increase), Some(states(8, 5, 13)));
    assert_eq!(after.solve(Decrease), Some(states(8, 5, 3)));
    let before = Situation::Before { change: 4, after: 9 };
    assert_eq!(before.solve(Increase), Some(states(5, 4, 9)));
    assert_eq!(before.solve(Decrease), Some(states(13, 4, 9)));
    let change = Situation::Change { before: 6, after: 10 };
    assert_eq!(change.solve(Increase), Some(states(6, 4, 10)));
    assert_eq!(change.solve(Decrease), None);
}

#[test]
fn empty_states_do_not_make_a_problem() {
    let lose_all = Situation::After { before: 5, change: 5 };
    assert_eq!(lose_all.solve(ChangeKind::Decrease), None);
    let no_change = Situation::Change { before: 7, after: 7 };
    assert_eq!(no_change.solve(ChangeKind::Increase), None);
    let overflow = Situation::Before { change: u32::MAX, after: 1 };
    assert_eq!(overflow.solve(ChangeKind::Decrease), None);
}

#[test]
fn operations_never_go_negative() {
    let s = states(14, 6, 8);
    let change = Situation::Change { before: 14, after: 8 };
    assert_eq!(change.operation(ChangeKind::Decrease, s), "14 − 8 = 6");
    let before = Situation::Before { change: 6, after: 8 };
    assert_eq!(before.operation(ChangeKind::Decrease, s), "8 + 6 = 14");
    let after = Situation::After { before: 8, change: 5 };
    assert_eq!(after.operation(ChangeKind::Increase, states(8, 5, 13)), "8 + 5 = 13");
}

#[test]
fn stated_answer_must_match_the_unknown() {
    let mut config = ChangeConfig::default();
    config.validate().unwrap();
    config.problems[2].answer = 22;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("problem 3"), "{err}");
    assert!(err.to_string().contains("15 − 7 = 8"), "{err}");
}

#[test]
fn context_answer_names_the_unknown_state() {
    let config = ChangeConfig::default();
    assert_eq!(config.problems[0].context_answer().en, "Answer: Now: 13 marbles");
    assert_eq!(config.assessment.context_answer().en, "Answer: Before: 13 pencils");
}

#[test]
fn situation_is_tagged_by_its_unknown() {
    let problem: ChangeProblem = serde_json::from_value(serde_json::json!({
        "question": { "en": "Aya has 10 books. She buys some and now has 13." },
        "kind": "increase",
        "unknown": "change",
        "before": 10,
        "after": 13,
        "item": { "en": "books" },
        "answer": 3
    }))
    .unwrap();
    assert_eq!(problem.situation, Situation::Change { before: 10, after: 13 });
    problem.validate().unwrap();
}

#[test]
fn wide_bars_are_rejected() {
    let style = ChangeStyle {
        unit_width: 1.0,
        ..ChangeStyle::default()
    };
    let err = ChangeLesson::new(ChangeConfig::default(), style).unwrap_err();
    assert!(err.to_string().contains("does not fit"), "{err}");
}

#[test]
fn change_unknown_builds_without_extras() {
    let inputs = LessonInputs {
        settings: Quality::Low.settings(),
        style: Some(serde_json::json!({
            "show_problem_text": false,
            "show_timeline": false,
            "show_model_to_operation": false
        })),
        config: Some(serde_json::json!({
            "problems": [{
                "question": { "en": "Lina had 14 stickers. Now she has 8. How many did she give away?" },
                "kind": "decrease",
                "unknown": "change",
                "before": 14,
                "after": 8,
                "item": { "en": "stickers" },
                "answer": 6
            }]
        })),
        ..LessonInputs::default()
    };
    let t = build_timeline::<ChangeLesson>(&inputs).unwrap();
    assert!(t.step("mini_assessment").is_some());
}
