use kurbo::{Line, Point};

use crate::foundation::math::{PARALLEL_EPS, cross, unit};

/// Intersection of the infinite lines through `a` and `b`.
///
/// Solves `a.p0 + t * r = b.p0 + u * s` for `t`. Returns `None` when the direction vectors are
/// parallel (|r x s| below [`PARALLEL_EPS`]), which includes zero-length segments.
pub fn line_intersection(a: Line, b: Line) -> Option<Point> {
    let (t, _) = intersection_params(a, b)?;
    Some(a.p0 + (a.p1 - a.p0) * t)
}

/// Intersection of the two segments themselves (both parameters within `[0, 1]`).
pub fn segment_intersection(a: Line, b: Line) -> Option<Point> {
    let (t, u) = intersection_params(a, b)?;
    let inside = |v: f64| (-1e-9..=1.0 + 1e-9).contains(&v);
    if inside(t) && inside(u) {
        Some(a.p0 + (a.p1 - a.p0) * t)
    } else {
        None
    }
}

fn intersection_params(a: Line, b: Line) -> Option<(f64, f64)> {
    let r = a.p1 - a.p0;
    let s = b.p1 - b.p0;
    let rxs = cross(r, s);
    if rxs.abs() < PARALLEL_EPS {
        return None;
    }
    let qp = b.p0 - a.p0;
    Some((cross(qp, s) / rxs, cross(qp, r) / rxs))
}

pub fn are_parallel(a: Line, b: Line) -> bool {
    match (unit(a.p1 - a.p0), unit(b.p1 - b.p0)) {
        (Some(r), Some(s)) => cross(r, s).abs() < 1e-6,
        _ => false,
    }
}

/// True when the directions meet at a right angle within `tol` (cosine of the angle).
pub fn are_perpendicular(a: Line, b: Line, tol: f64) -> bool {
    match (unit(a.p1 - a.p0), unit(b.p1 - b.p0)) {
        (Some(r), Some(s)) => r.dot(s).abs() <= tol,
        _ => false,
    }
}

/// `line` scaled by `factor` about its midpoint.
pub fn extend_line(line: Line, factor: f64) -> Line {
    let mid = line.p0.midpoint(line.p1);
    Line::new(
        mid + (line.p0 - mid) * factor,
        mid + (line.p1 - mid) * factor,
    )
}

/// A segment of `length` centered between `p1` and `p2`, following their direction.
///
/// Coincident points give a degenerate segment at their midpoint.
pub fn long_line_through(p1: Point, p2: Point, length: f64) -> Line {
    let mid = p1.midpoint(p2);
    match unit(p2 - p1) {
        Some(dir) => Line::new(mid - dir * (length / 2.0), mid + dir * (length / 2.0)),
        None => Line::new(mid, mid),
    }
}

/// The three strokes of a right-angle corner glyph at `vertex`.
///
/// Walks `size` along `dir1`, then `size` along `dir2`, then back to the `dir2` ray. Returns
/// `None` if either direction is zero-length.
pub fn right_angle_marker(
    vertex: Point,
    dir1: kurbo::Vec2,
    dir2: kurbo::Vec2,
    size: f64,
) -> Option<[Line; 3]> {
    let d1 = unit(dir1)?;
    let d2 = unit(dir2)?;
    let a = vertex + d1 * size;
    let b = a + d2 * size;
    let c = vertex + d2 * size;
    Some([Line::new(vertex, a), Line::new(a, b), Line::new(b, c)])
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/lines.rs"]
mod tests;
