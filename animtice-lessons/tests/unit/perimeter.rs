use animtice::{LessonInputs, Quality, build_timeline, edge_length, polygon_edges};

use super::*;

fn lesson() -> PerimeterLesson {
    PerimeterLesson::new(PerimeterConfig::default(), PerimeterStyle::default()).unwrap()
}

#[test]
fn rectangle_sides_go_around_the_shape() {
    let r = ShapeSpec::Rectangle {
        width: 6.0,
        height: 3.0,
    };
    assert_eq!(r.sides(), vec![6.0, 3.0, 6.0, 3.0]);
    assert_eq!(r.perimeter(), 18.0);
    assert_eq!(ShapeSpec::Square { side: 4.0 }.perimeter(), 16.0);
}

#[test]
fn drawn_edges_match_the_stated_sides() {
    let shapes = [
        ShapeSpec::Square { side: 4.0 },
        ShapeSpec::Rectangle {
            width: 6.0,
            height: 3.0,
        },
        ShapeSpec::Triangle {
            a: 3.0,
            b: 4.0,
            c: 5.0,
        },
    ];
    for spec in shapes {
        let verts = spec.vertices(0.5, Point::new(1.0, -1.0)).unwrap();
        let lengths: Vec<f64> = polygon_edges(&verts).into_iter().map(edge_length).collect();
        assert_eq!(lengths.len(), spec.sides().len());
        for (got, want) in lengths.iter().zip(spec.sides()) {
            assert!((got - want * 0.5).abs() < 1e-9, "{spec:?}: {got} vs {want}");
        }
    }
}

#[test]
fn triangle_is_counter_clockwise() {
    let spec = ShapeSpec::Triangle {
        a: 3.0,
        b: 4.0,
        c: 5.0,
    };
    let v = spec.vertices(1.0, Point::ZERO).unwrap();
    let cross = (v[1] - v[0]).cross(v[2] - v[0]);
    assert!(cross > 0.0);
}

#[test]
fn impossible_triangle_is_rejected() {
    let flat = ShapeSpec::Triangle {
        a: 1.0,
        b: 2.0,
        c: 3.0,
    };
    assert!(flat.validate().is_err());
    assert!(flat.vertices(1.0, Point::ZERO).is_err());
}

#[test]
fn wrong_assessment_answer_is_rejected() {
    let config = PerimeterConfig {
        assessment_answer: 13.0,
        ..PerimeterConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("does not match"), "{err}");
}

#[test]
fn sums_carry_the_unit() {
    let l = lesson();
    assert_eq!(l.with_unit(12.0), "12 cm");
    assert_eq!(l.sum_chain(&[4.0, 4.0, 2.5]), "4 + 4 + 2.5 = 10.5 cm");

    let bare = PerimeterLesson::new(
        PerimeterConfig::default(),
        PerimeterStyle {
            units: String::new(),
            ..PerimeterStyle::default()
        },
    )
    .unwrap();
    assert_eq!(bare.with_unit(12.0), "12");
}

#[test]
fn shapes_can_be_replaced_from_json() {
    let inputs = LessonInputs {
        settings: Quality::Low.settings(),
        style: Some(serde_json::json!({ "show_string_metaphor": false, "units": "m" })),
        config: Some(serde_json::json!({
            "shapes": [{ "kind": "triangle", "a": 5.0, "b": 5.0, "c": 6.0 }]
        })),
        ..LessonInputs::default()
    };
    let t = build_timeline::<PerimeterLesson>(&inputs).unwrap();
    assert!(t.step("exploration_trace").is_some());
    assert!(t.duration.0 > 0);
}
