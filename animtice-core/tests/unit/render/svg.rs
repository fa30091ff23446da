use super::*;
use crate::{
    foundation::core::FrameIndex,
    scene::visual::{ObjectId, Visual},
};
use kurbo::{Point, Rect, Shape as _};

fn node(visual: Visual) -> EvaluatedNode {
    EvaluatedNode {
        id: ObjectId(0),
        visual,
        opacity: 1.0,
        draw: 1.0,
        reveal: 1.0,
    }
}

fn canvas() -> Canvas {
    Canvas {
        width: 160,
        height: 80,
    }
}

fn render(nodes: Vec<EvaluatedNode>) -> String {
    let frame = EvaluatedFrame {
        frame: FrameIndex(0),
        nodes,
    };
    frame_to_svg(&frame, canvas(), Rgba8::BLACK)
}

#[test]
fn document_has_size_and_background() {
    let svg = render(Vec::new());
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="160""#));
    assert!(svg.contains(r##"fill="#000000""##));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn paths_are_mapped_to_pixels() {
    // 80px tall / 8 units: the unit square at the origin covers (80,40)..(90,30) in pixels.
    let svg = render(vec![node(Visual::rect(Rect::new(0.0, 0.0, 1.0, 1.0)))]);
    assert!(svg.contains("M80,40"), "{svg}");
    assert!(svg.contains("90,30"), "{svg}");
    assert!(svg.contains(r#"stroke-width="0.4""#), "{svg}");
}

#[test]
fn text_is_escaped() {
    let svg = render(vec![node(Visual::text("a < b & c", Point::ZERO, 32.0))]);
    assert!(svg.contains("a &lt; b &amp; c"));
    assert!(!svg.contains("a < b"));
}

#[test]
fn arabic_text_is_right_to_left() {
    let svg = render(vec![node(Visual::text("المحيط", Point::ZERO, 32.0))]);
    assert!(svg.contains(r#"direction="rtl""#));
}

#[test]
fn reveal_keeps_leading_characters() {
    assert_eq!(revealed("abcd", 0.5), "ab");
    assert_eq!(revealed("abcd", 0.0), "");
    assert_eq!(revealed("abcd", 1.0), "abcd");
    assert_eq!(revealed("ثلاثة", 0.4), "ثل");
}

#[test]
fn invisible_pieces_are_skipped() {
    let mut t = node(Visual::text("hello", Point::ZERO, 32.0));
    t.reveal = 0.0;
    let mut p = node(Visual::line(Point::ZERO, Point::new(1.0, 0.0)));
    p.draw = 0.0;
    let svg = render(vec![t, p]);
    assert!(!svg.contains("<text"));
    assert!(!svg.contains("<path"));
}

#[test]
fn partial_path_covers_the_requested_length() {
    let square = Rect::new(0.0, 0.0, 2.0, 2.0).to_path(1e-3);
    let half = partial_path(&square, 0.5);
    let len: f64 = half.segments().map(|s| s.arclen(1e-6)).sum();
    assert!((len - 4.0).abs() < 1e-6, "{len}");
}

#[test]
fn partial_path_draws_every_subpath() {
    let v = Visual::segments(&[
        kurbo::Line::new(Point::new(0.0, 0.0), Point::new(2.0, 0.0)),
        kurbo::Line::new(Point::new(0.0, 1.0), Point::new(4.0, 1.0)),
    ]);
    let Shape::Path(path) = &v.shape else {
        unreachable!()
    };
    let p = partial_path(path, 0.25);
    let lens: Vec<f64> = p.segments().map(|s| s.arclen(1e-6)).collect();
    assert_eq!(lens.len(), 2);
    assert!((lens[0] - 0.5).abs() < 1e-9);
    assert!((lens[1] - 1.0).abs() < 1e-9);
}

#[test]
fn half_transparent_nodes_carry_opacity() {
    let mut n = node(Visual::rect(Rect::new(0.0, 0.0, 1.0, 1.0)));
    n.opacity = 0.5;
    assert!(render(vec![n]).contains(r#"opacity="0.5""#));
}
