use animtice::{LessonInputs, Quality, build_timeline};

use super::*;

#[test]
fn every_default_problem_has_one_faithful_option() {
    let config = SegmentationConfig::default();
    config.validate().unwrap();
    for p in config.problems.iter().chain([&config.assessment]) {
        assert!(p.correct().unwrap().operation_hint.is_some());
    }
    assert_eq!(config.problems[0].correct().unwrap().highlight, Some(1));
}

#[test]
fn two_correct_options_are_rejected() {
    let mut problem = SegmentationConfig::default().assessment;
    problem.options[1].correct = true;
    let err = problem.validate().unwrap_err();
    assert!(err.to_string().contains("found 2"), "{err}");
    problem.options.iter_mut().for_each(|o| o.correct = false);
    assert!(problem.validate().is_err());
}

#[test]
fn ratios_must_cover_the_whole() {
    let short = SegmentationOption::new(&[0.5, 0.3], &[("a", "أ"), ("b", "ب")]);
    let err = short.validate().unwrap_err();
    assert!(err.to_string().contains("not 1"), "{err}");
    let negative = SegmentationOption::new(&[1.5, -0.5], &[("a", "أ"), ("b", "ب")]);
    assert!(negative.validate().is_err());
    let close = SegmentationOption::new(&[0.33, 0.33, 0.33], &[("a", "أ"); 3]);
    close.validate().unwrap();
}

#[test]
fn labels_and_highlight_match_the_segments() {
    let missing = SegmentationOption::new(&[0.5, 0.5], &[("only one", "واحد")]);
    assert!(missing.validate().is_err());
    let mut out_of_range = SegmentationOption::new(&[0.5, 0.5], &[("a", "أ"), ("b", "ب")]);
    out_of_range.highlight = Some(2);
    assert!(out_of_range.validate().is_err());
}

#[test]
fn faithful_segments_tile_the_bar() {
    let option = &SegmentationConfig::default().problems[1].options[0];
    let spans = option
        .spans(Span {
            start: -5.2,
            width: 10.4,
        })
        .unwrap();
    assert_eq!(spans.len(), 4);
    for sp in &spans {
        assert!((sp.width - 2.6).abs() < 1e-9);
    }
    assert!((spans[3].end() - 5.2).abs() < 1e-9);
}

#[test]
fn option_row_must_fit() {
    let style = SegmentationStyle::default();
    assert!(style.options_row_width(3) < 13.6);
    let wide = SegmentationStyle {
        option_scale: 0.45,
        ..SegmentationStyle::default()
    };
    let err = SegmentationLesson::new(SegmentationConfig::default(), wide).unwrap_err();
    assert!(err.to_string().contains("do not fit"), "{err}");
    assert_eq!(option_letter(0), 'A');
    assert_eq!(option_letter(2), 'C');
}

#[test]
fn builds_without_options_or_hints() {
    let inputs = LessonInputs {
        settings: Quality::Low.settings(),
        style: Some(serde_json::json!({
            "show_options": false,
            "show_operation_link": false,
            "show_problem_text": false
        })),
        ..LessonInputs::default()
    };
    let t = build_timeline::<SegmentationLesson>(&inputs).unwrap();
    assert!(t.step("institutionalization").is_some());
}
