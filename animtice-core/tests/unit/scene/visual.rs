use super::*;

fn rect_visual(x0: f64, y0: f64, x1: f64, y1: f64) -> Visual {
    Visual::rect(Rect::new(x0, y0, x1, y1))
}

#[test]
fn rect_bounds_match_the_rect() {
    let v = rect_visual(-1.0, -0.5, 2.0, 1.5);
    assert_eq!(v.bounds(), Rect::new(-1.0, -0.5, 2.0, 1.5));
    assert_eq!(v.center(), Point::new(0.5, 0.5));
}

#[test]
fn segments_are_one_subpath_per_line() {
    let v = Visual::segments(&[
        Line::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0)),
        Line::new(Point::new(0.0, 1.0), Point::new(1.0, 1.0)),
    ]);
    let Shape::Path(p) = &v.shape else {
        panic!("expected a path");
    };
    let moves = p
        .elements()
        .iter()
        .filter(|e| matches!(e, PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 2);
}

#[test]
fn translation_moves_paths_and_text() {
    let v = rect_visual(0.0, 0.0, 1.0, 1.0).translated(Vec2::new(2.0, -1.0));
    assert_eq!(v.bounds(), Rect::new(2.0, -1.0, 3.0, 0.0));

    let t = Visual::text("abc", Point::new(0.0, 0.0), 32.0).translated(Vec2::new(1.0, 1.0));
    let Shape::Text(run) = &t.shape else {
        panic!("expected text");
    };
    assert_eq!(run.at, Point::new(1.0, 1.0));
    assert_eq!(run.size, 32.0);
}

#[test]
fn moved_to_recenters() {
    let v = rect_visual(0.0, 0.0, 2.0, 2.0).moved_to(Point::new(-3.0, 4.0));
    assert_eq!(v.center(), Point::new(-3.0, 4.0));
}

#[test]
fn scaled_keeps_center() {
    let v = rect_visual(0.0, 0.0, 2.0, 2.0).scaled(2.0);
    assert_eq!(v.bounds(), Rect::new(-1.0, -1.0, 3.0, 3.0));
}

#[test]
fn start_anchored_text_begins_at_anchor() {
    let t = Visual::text("1234", Point::new(1.0, 0.0), 64.0).anchored(TextAnchor::Start);
    let b = t.bounds();
    assert_eq!(b.x0, 1.0);
    assert!(b.width() > 0.0);
    assert!((b.height() - 1.0).abs() < 1e-12);
}

#[test]
fn matching_paths_interpolate_pointwise() {
    let a = rect_visual(0.0, 0.0, 2.0, 2.0);
    let b = rect_visual(2.0, 2.0, 4.0, 4.0).with_color(Rgba8::BLACK);
    let mid = a.interpolate(&b, 0.5).unwrap();
    assert_eq!(mid.bounds(), Rect::new(1.0, 1.0, 3.0, 3.0));
    let stroke = mid.stroke.unwrap();
    assert_eq!(stroke.color, Rgba8::rgb(0x80, 0x80, 0x80));
}

#[test]
fn text_and_mismatched_paths_do_not_interpolate() {
    let a = rect_visual(0.0, 0.0, 1.0, 1.0);
    let t = Visual::text("x", Point::ZERO, 32.0);
    assert!(a.interpolate(&t, 0.5).is_none());

    let tri = Visual::polygon(&[
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
    ]);
    assert!(a.interpolate(&tri, 0.5).is_none());
}

#[test]
fn with_color_recolors_stroke_of_paths_and_fill_of_text() {
    let p = rect_visual(0.0, 0.0, 1.0, 1.0)
        .with_fill(Rgba8::BLUE, 0.5)
        .with_color(Rgba8::RED);
    assert_eq!(p.stroke.unwrap().color, Rgba8::RED);
    assert_eq!(p.fill.unwrap().color, Rgba8::BLUE);

    let t = Visual::text("x", Point::ZERO, 32.0).with_color(Rgba8::YELLOW);
    assert_eq!(t.fill.unwrap().color, Rgba8::YELLOW);
}
