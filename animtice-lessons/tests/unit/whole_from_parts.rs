use animtice::{LessonInputs, Quality, build_timeline};

use super::*;

#[test]
fn calculations_read_as_repeated_addition_then_product() {
    assert_eq!(repeated_addition(4, 5, 20), "4 + 4 + 4 + 4 + 4 = 20");
    assert_eq!(multiplication(4, 5, 20), "5 × 4 = 20");
}

#[test]
fn parts_sit_end_to_end_with_a_gap() {
    let spans = part_spans(-5.2, 1.5, 0.14, 3);
    assert_eq!(spans.len(), 3);
    assert!((spans[0].start + 5.2).abs() < 1e-9);
    for pair in spans.windows(2) {
        assert!((pair[1].start - pair[0].end() - 0.14).abs() < 1e-9);
    }
    assert!(part_spans(0.0, 1.0, 0.1, 0).is_empty());
}

#[test]
fn tiny_parts_keep_a_readable_width() {
    let style = WholeStyle::default();
    assert!((style.part_width(1) - 0.8).abs() < 1e-9);
    assert!((style.part_width(5) - 5.0 * 0.38).abs() < 1e-9);
}

#[test]
fn stated_whole_must_be_the_product() {
    let mut config = WholeConfig::default();
    config.problems[0].answer = 9;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("5 × 4 = 20"), "{err}");
}

#[test]
fn part_counts_and_wholes_are_bounded() {
    let mut problem = WholeConfig::default().assessment;
    problem.n_parts = 1;
    problem.answer = 7;
    assert!(problem.validate().is_err());
    problem.n_parts = 4;
    problem.part_value = 30;
    problem.answer = 120;
    let err = problem.validate().unwrap_err();
    assert!(err.to_string().contains("exceeds"), "{err}");
    problem.part_value = u32::MAX;
    assert!(problem.validate().is_err());
}

#[test]
fn wide_rows_are_rejected() {
    let style = WholeStyle {
        unit_width: 0.6,
        ..WholeStyle::default()
    };
    let err = WholeLesson::new(WholeConfig::default(), style).unwrap_err();
    assert!(err.to_string().contains("do not fit"), "{err}");
}

#[test]
fn builds_with_multiplication_only() {
    let inputs = LessonInputs {
        settings: Quality::Low.settings(),
        style: Some(serde_json::json!({
            "show_repeated_addition": false,
            "show_grouping_braces": false,
            "show_verify_step": false
        })),
        ..LessonInputs::default()
    };
    let t = build_timeline::<WholeLesson>(&inputs).unwrap();
    assert!(t.step("mini_assessment").is_some());
}
