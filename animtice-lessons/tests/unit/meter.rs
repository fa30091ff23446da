use animtice::{LessonInputs, Quality, build_timeline};

use super::*;

#[test]
fn pieces_tile_the_object_from_start_to_end() {
    let board = MeasuredObject::new(Bilingual::en_only("board"), 3, 0.0, 0.0);
    let span = board.span(0.0, 2.6);
    assert!((span.start + 3.9).abs() < 1e-9);
    let pieces = meter_pieces(span, board.length_m).unwrap();
    assert_eq!(pieces.len(), 3);
    assert!((pieces[0].start - span.start).abs() < 1e-9);
    assert!((pieces[2].end() - span.end()).abs() < 1e-9);
    for pair in pieces.windows(2) {
        assert!((pair[0].end() - pair[1].start).abs() < 1e-9);
        assert!((pair[0].width - 2.6).abs() < 1e-9);
    }
    assert_eq!(board.measurement(), "3 m");
}

#[test]
fn lengths_outside_the_range_are_rejected() {
    let zero = MeasuredObject::new(Bilingual::en_only("dot"), 0, 0.0, 0.0);
    assert!(zero.validate().is_err());
    let long = MeasuredObject::new(Bilingual::en_only("road"), MAX_METERS + 1, 0.0, 0.0);
    assert!(long.validate().is_err());
}

#[test]
fn objects_must_fit_on_screen() {
    let mut config = MeterConfig::default();
    config.objects[0].offset_x = -5.0;
    let err = MeterLesson::new(config, MeterStyle::default()).unwrap_err();
    assert!(err.to_string().contains("does not fit"));

    let style = MeterStyle {
        meter_length: 3.0,
        ..MeterStyle::default()
    };
    let mut config = MeterConfig::default();
    config.assessment.length_m = 5;
    config.assessment_options = vec![4, 5, 6];
    assert!(MeterLesson::new(config, style).is_err());
}

#[test]
fn assessment_needs_exactly_one_matching_option() {
    let mut config = MeterConfig::default();
    config.assessment_options = vec![1, 2, 4];
    assert!(config.validate().is_err());
    config.assessment_options = vec![3, 3];
    assert!(config.validate().is_err());
}

#[test]
fn builds_without_the_optional_pieces() {
    let inputs = LessonInputs {
        settings: Quality::Low.settings(),
        style: Some(serde_json::json!({
            "show_nonstandard_units_demo": false,
            "show_snap_guides": false,
            "show_iteration_counter": false
        })),
        ..LessonInputs::default()
    };
    let t = build_timeline::<MeterLesson>(&inputs).unwrap();
    assert!(t.step("institutionalization_meter_iteration").is_some());
}

#[test]
fn a_single_object_builds() {
    let inputs = LessonInputs {
        settings: Quality::Low.settings(),
        config: Some(serde_json::json!({
            "objects": [{ "name": { "en": "pencil case" }, "length_m": 1 }]
        })),
        ..LessonInputs::default()
    };
    build_timeline::<MeterLesson>(&inputs).unwrap();
}
