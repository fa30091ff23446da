use kurbo::{Line, Point, Vec2};

use crate::foundation::math::{perp, unit};

/// Consecutive edges of a closed polygon: `vertices[i] -> vertices[(i + 1) % n]`.
///
/// Fewer than two vertices yield no edges.
pub fn polygon_edges(vertices: &[Point]) -> Vec<Line> {
    let n = vertices.len();
    if n < 2 {
        return Vec::new();
    }
    (0..n)
        .map(|i| Line::new(vertices[i], vertices[(i + 1) % n]))
        .collect()
}

pub fn edge_length(edge: Line) -> f64 {
    (edge.p1 - edge.p0).hypot()
}

/// Sum of edge lengths of the closed polygon through `vertices`.
pub fn polygon_perimeter(vertices: &[Point]) -> f64 {
    polygon_edges(vertices).into_iter().map(edge_length).sum()
}

/// Where to put a side-length label: the edge midpoint pushed `offset` along the edge normal.
///
/// For counter-clockwise polygons a negative offset points outward. Zero-length edges return
/// the midpoint.
pub fn edge_label_anchor(edge: Line, offset: f64) -> Point {
    let mid = edge.p0.midpoint(edge.p1);
    match unit(edge.p1 - edge.p0) {
        Some(dir) => mid + perp(dir) * offset,
        None => mid,
    }
}

/// Vertices of a regular `n`-gon inscribed in a circle, counter-clockwise from `start_angle`.
pub fn regular_polygon(n: usize, center: Point, radius: f64, start_angle: f64) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let a = start_angle + std::f64::consts::TAU * (i as f64) / (n as f64);
            center + Vec2::new(a.cos(), a.sin()) * radius
        })
        .collect()
}

/// Axis-aligned rectangle vertices, counter-clockwise from the bottom-left corner.
pub fn rect_vertices(center: Point, width: f64, height: f64) -> Vec<Point> {
    let (hw, hh) = (width / 2.0, height / 2.0);
    vec![
        center + Vec2::new(-hw, -hh),
        center + Vec2::new(hw, -hh),
        center + Vec2::new(hw, hh),
        center + Vec2::new(-hw, hh),
    ]
}

/// Arithmetic mean of the vertices.
pub fn centroid(vertices: &[Point]) -> Option<Point> {
    if vertices.is_empty() {
        return None;
    }
    let sum = vertices
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    Some((sum / vertices.len() as f64).to_point())
}

/// Vertices moved so their centroid lands on `to`.
pub fn recentered(vertices: &[Point], to: Point) -> Vec<Point> {
    match centroid(vertices) {
        Some(c) => {
            let d = to - c;
            vertices.iter().map(|p| *p + d).collect()
        }
        None => Vec::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/polygon.rs"]
mod tests;
