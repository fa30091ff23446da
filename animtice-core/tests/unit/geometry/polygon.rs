use super::*;

fn right_triangle() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(4.0, 3.0),
    ]
}

#[test]
fn right_triangle_has_three_edges_and_perimeter_twelve() {
    let verts = right_triangle();
    let edges = polygon_edges(&verts);
    assert_eq!(edges.len(), 3);
    assert_eq!(edges[0], Line::new(verts[0], verts[1]));
    assert_eq!(edges[1], Line::new(verts[1], verts[2]));
    assert_eq!(edges[2], Line::new(verts[2], verts[0]));

    let lengths: Vec<f64> = edges.iter().map(|e| edge_length(*e)).collect();
    assert_eq!(lengths, vec![4.0, 3.0, 5.0]);
    assert!((polygon_perimeter(&verts) - 12.0).abs() < 1e-12);
}

#[test]
fn edges_wrap_for_every_polygon_size() {
    for n in 3..10 {
        let verts = regular_polygon(n, Point::new(1.0, -2.0), 2.0, 0.3);
        let edges = polygon_edges(&verts);
        assert_eq!(edges.len(), n);
        for (i, e) in edges.iter().enumerate() {
            assert_eq!(e.p0, verts[i]);
            assert_eq!(e.p1, verts[(i + 1) % n]);
        }
        assert_eq!(edges[n - 1].p1, verts[0]);
    }
}

#[test]
fn degenerate_vertex_lists_have_no_edges() {
    assert!(polygon_edges(&[]).is_empty());
    assert!(polygon_edges(&[Point::ORIGIN]).is_empty());
    assert_eq!(polygon_perimeter(&[Point::ORIGIN]), 0.0);
}

#[test]
fn label_anchor_sits_on_the_edge_normal() {
    let edge = Line::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
    let outward = edge_label_anchor(edge, -0.5);
    assert!((outward.x - 2.0).abs() < 1e-12);
    assert!((outward.y + 0.5).abs() < 1e-12);

    let zero = Line::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0));
    assert_eq!(edge_label_anchor(zero, 0.3), Point::new(1.0, 1.0));
}

#[test]
fn rect_vertices_are_counter_clockwise_around_center() {
    let verts = rect_vertices(Point::new(1.0, 1.0), 4.0, 2.0);
    assert_eq!(verts[0], Point::new(-1.0, 0.0));
    assert_eq!(verts[2], Point::new(3.0, 2.0));
    assert_eq!(centroid(&verts), Some(Point::new(1.0, 1.0)));
    assert!((polygon_perimeter(&verts) - 12.0).abs() < 1e-12);
}

#[test]
fn recentering_moves_the_centroid() {
    let moved = recentered(&right_triangle(), Point::ORIGIN);
    let c = centroid(&moved).unwrap();
    assert!(c.x.abs() < 1e-12 && c.y.abs() < 1e-12);
}
