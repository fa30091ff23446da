use super::*;
use kurbo::Vec2;

fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Line {
    Line::new(Point::new(x0, y0), Point::new(x1, y1))
}

fn on_line(l: Line, p: Point) -> bool {
    // p - p0 must be parallel to the direction.
    let d = l.p1 - l.p0;
    let v = p - l.p0;
    (d.x * v.y - d.y * v.x).abs() < 1e-9 * (1.0 + d.hypot() * v.hypot())
}

#[test]
fn diagonals_cross_at_two_two() {
    let p = line_intersection(seg(0.0, 0.0, 4.0, 4.0), seg(0.0, 4.0, 4.0, 0.0)).unwrap();
    assert!((p.x - 2.0).abs() < 1e-12);
    assert!((p.y - 2.0).abs() < 1e-12);
}

#[test]
fn intersection_satisfies_both_line_equations() {
    let cases = [
        (seg(0.0, 0.0, 1.0, 0.2), seg(3.0, -1.0, 2.5, 4.0)),
        (seg(-2.0, 1.0, 5.0, 3.0), seg(0.0, 7.0, 1.0, -6.0)),
        (seg(1.0, 1.0, 1.5, 1.1), seg(-3.0, 2.0, -3.1, 5.0)),
        (seg(0.0, 0.0, 0.0, 1.0), seg(-1.0, 0.5, 1.0, 0.5)),
    ];
    for (a, b) in cases {
        let p = line_intersection(a, b).unwrap();
        assert!(on_line(a, p), "{p:?} not on {a:?}");
        assert!(on_line(b, p), "{p:?} not on {b:?}");
    }
}

#[test]
fn parallel_lines_have_no_intersection() {
    assert!(line_intersection(seg(0.0, 0.0, 2.0, 1.0), seg(0.0, 3.0, 2.0, 4.0)).is_none());
    assert!(line_intersection(seg(0.0, 0.0, 1.0, 1.0), seg(5.0, 5.0, 6.0, 6.0)).is_none());
    // Zero-length segments have no direction.
    assert!(line_intersection(seg(1.0, 1.0, 1.0, 1.0), seg(0.0, 0.0, 1.0, 2.0)).is_none());
}

#[test]
fn segment_intersection_requires_overlap() {
    assert!(segment_intersection(seg(0.0, 0.0, 1.0, 1.0), seg(0.0, 4.0, 4.0, 0.0)).is_none());
    let p = segment_intersection(seg(0.0, 0.0, 4.0, 4.0), seg(0.0, 4.0, 4.0, 0.0)).unwrap();
    assert_eq!(p, Point::new(2.0, 2.0));
}

#[test]
fn parallel_and_perpendicular_predicates() {
    let h = seg(0.0, 0.0, 3.0, 0.0);
    assert!(are_parallel(h, seg(-1.0, 2.0, 5.0, 2.0)));
    assert!(!are_parallel(h, seg(0.0, 0.0, 1.0, 1.0)));
    assert!(are_perpendicular(h, seg(1.0, -1.0, 1.0, 4.0), 1e-9));
    assert!(!are_perpendicular(h, seg(0.0, 0.0, 1.0, 1.0), 1e-3));
}

#[test]
fn extension_keeps_center_and_scales_length() {
    let l = seg(-1.0, 0.0, 1.0, 0.0);
    let e = extend_line(l, 1.75);
    assert_eq!(e.p0.midpoint(e.p1), Point::ORIGIN);
    assert!(((e.p1 - e.p0).hypot() - 3.5).abs() < 1e-12);

    let long = long_line_through(Point::new(0.0, 0.0), Point::new(0.0, 2.0), 10.0);
    assert!(((long.p1 - long.p0).hypot() - 10.0).abs() < 1e-12);
    assert_eq!(long.p0.midpoint(long.p1), Point::new(0.0, 1.0));
}

#[test]
fn right_angle_marker_builds_a_corner() {
    let [a, b, c] =
        right_angle_marker(Point::ORIGIN, Vec2::new(2.0, 0.0), Vec2::new(0.0, 5.0), 0.35).unwrap();
    assert_eq!(a.p0, Point::ORIGIN);
    assert!((a.p1.x - 0.35).abs() < 1e-12 && a.p1.y.abs() < 1e-12);
    assert!((b.p1.x - 0.35).abs() < 1e-12 && (b.p1.y - 0.35).abs() < 1e-12);
    assert!(c.p1.x.abs() < 1e-12 && (c.p1.y - 0.35).abs() < 1e-12);
}

#[test]
fn right_angle_marker_rejects_zero_directions() {
    assert!(right_angle_marker(Point::ORIGIN, Vec2::ZERO, Vec2::new(0.0, 1.0), 0.3).is_none());
}
