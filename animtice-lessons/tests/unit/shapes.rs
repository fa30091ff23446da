use animtice::{LessonInputs, Quality, build_timeline};

use super::*;

fn lesson() -> ShapesLesson {
    ShapesLesson::new(ShapesConfig::default(), ShapesStyle::default()).unwrap()
}

#[test]
fn default_shapes_have_the_expected_counts() {
    let config = ShapesConfig::default();
    let counts: Vec<usize> = config.shapes.iter().map(Figure::sides).collect();
    assert_eq!(counts, vec![3, 4, 4, 5]);
    assert_eq!(config.assessment.sides(), 6);
    config.validate().unwrap();
}

#[test]
fn clockwise_input_is_placed_counter_clockwise() {
    let square = &ShapesConfig::default().shapes[1];
    let pts = square.placed(Point::new(1.0, 2.0), 0.5);
    let area2: f64 = polygon_edges(&pts)
        .iter()
        .map(|e| e.p0.x * e.p1.y - e.p1.x * e.p0.y)
        .sum();
    assert!(area2 > 0.0);
    let c = centroid(&pts).unwrap();
    assert!((c - Point::new(1.0, 2.0)).hypot() < 1e-9);
    assert!((edge_length(polygon_edges(&pts)[0]) - 1.2).abs() < 1e-9);
}

#[test]
fn right_angles_only_on_rectangles() {
    let config = ShapesConfig::default();
    assert_eq!(config.shapes[0].right_angles(), vec![false; 3]);
    assert_eq!(config.shapes[1].right_angles(), vec![true; 4]);
    assert_eq!(config.shapes[2].right_angles(), vec![true; 4]);
    assert!(config.shapes[3].right_angles().iter().all(|r| !r));
}

#[test]
fn families_group_by_side_count() {
    let groups = families(&ShapesConfig::default().shapes);
    assert_eq!(groups, vec![(3, vec![0]), (4, vec![1, 2]), (5, vec![3])]);
    assert_eq!(family_name(4).en, "quadrilaterals");
    assert_eq!(family_name(8).en, "8-sided shapes");
}

#[test]
fn degenerate_shapes_are_rejected() {
    let line = Figure::new(
        Bilingual::en_only("flat"),
        vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)],
    );
    assert!(line.validate().is_err());
    let two = Figure::new(
        Bilingual::en_only("two"),
        vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
    );
    assert!(two.validate().is_err());
    let repeated = Figure::new(
        Bilingual::en_only("dup"),
        vec![Point::new(0.0, 0.0), Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
    );
    assert!(repeated.validate().is_err());
}

#[test]
fn assessment_needs_exactly_one_matching_option() {
    let mut config = ShapesConfig::default();
    config.assessment_options = vec![4, 5, 7];
    assert!(config.validate().is_err());
    config.assessment_options = vec![6, 6, 7];
    assert!(config.validate().is_err());
}

#[test]
fn right_angle_gets_a_glyph_and_others_a_wedge() {
    let l = lesson();
    let square = l.config.shapes[1].placed(Point::ZERO, 1.0);
    let glyph = l.angle_mark(&square, 0, true);
    let b = glyph.bounds();
    assert!((b.width() - 0.35 * 0.7).abs() < 1e-9);
    assert!(glyph.fill.is_none());

    let triangle = l.config.shapes[0].placed(Point::ZERO, 1.0);
    let wedge = l.angle_mark(&triangle, 0, false);
    assert!(wedge.fill.is_some());
    // The wedge stays inside the angle's radius around its vertex.
    let wb = wedge.bounds();
    assert!(wb.width() <= 2.0 * 0.35 + 1e-9);
    assert!(wb.inflate(1e-9, 1e-9).contains(triangle[0]));
}

#[test]
fn side_ticks_cross_every_side_at_its_middle() {
    let square = ShapesConfig::default().shapes[1].placed(Point::ZERO, 1.0);
    let ticks = ShapesLesson::side_ticks(&square);
    assert_eq!(ticks.len(), 4);
    for (tick, edge) in ticks.iter().zip(polygon_edges(&square)) {
        let mid = edge.p0.midpoint(edge.p1);
        assert!((tick.p0.midpoint(tick.p1) - mid).hypot() < 1e-9);
        assert!((edge_length(*tick) - 2.0 * TICK_HALF).abs() < 1e-9);
    }
}

#[test]
fn toggles_drop_the_optional_steps() {
    let style = ShapesStyle {
        show_comparison_panel: false,
        show_classification_step: false,
        ..ShapesStyle::default()
    };
    let l = ShapesLesson::new(ShapesConfig::default(), style).unwrap();
    let names: Vec<&str> = l.build_steps().iter().map(|s| s.name).collect();
    assert_eq!(
        names,
        vec!["intro", "exploration_properties", "mini_assessment", "outro"]
    );
}

#[test]
fn builds_without_markers() {
    let inputs = LessonInputs {
        settings: Quality::Low.settings(),
        style: Some(serde_json::json!({
            "show_angle_markers": false,
            "show_side_markers": false,
            "show_vertex_markers": false
        })),
        ..LessonInputs::default()
    };
    let t = build_timeline::<ShapesLesson>(&inputs).unwrap();
    assert!(t.step("exploration_properties").is_some());
}
