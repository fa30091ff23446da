use super::*;

fn unit_box() -> Visual {
    Visual::rect(Rect::new(0.0, 0.0, 1.0, 1.0))
}

#[test]
fn row_is_centered_with_gaps() {
    let placed = arrange_row(vec![unit_box(), unit_box(), unit_box()], Point::ZERO, 0.5);
    let xs: Vec<f64> = placed.iter().map(|v| v.center().x).collect();
    assert_eq!(xs, vec![-1.5, 0.0, 1.5]);
    assert!(placed.iter().all(|v| v.center().y == 0.0));
}

#[test]
fn column_runs_top_to_bottom() {
    let placed = arrange_column(vec![unit_box(), unit_box()], Point::new(2.0, 0.0), 1.0);
    assert_eq!(placed[0].center(), Point::new(2.0, 1.0));
    assert_eq!(placed[1].center(), Point::new(2.0, -1.0));
}

#[test]
fn next_to_right_keeps_buffer() {
    let anchor = Rect::new(-1.0, -1.0, 1.0, 1.0);
    let v = next_to(unit_box(), anchor, Direction::Right, 0.25);
    assert_eq!(v.bounds(), Rect::new(1.25, -0.5, 2.25, 0.5));
}

#[test]
fn grid_is_row_major_from_top_left() {
    let pts = grid_points(2, 3, Point::ZERO, 1.0, 1.0);
    assert_eq!(pts.len(), 6);
    assert_eq!(pts[0], Point::new(-1.0, 0.5));
    assert_eq!(pts[2], Point::new(1.0, 0.5));
    assert_eq!(pts[5], Point::new(1.0, -0.5));
}

#[test]
fn union_of_nothing_is_none() {
    assert!(union_bounds(&[]).is_none());
    let u = union_bounds(&[unit_box(), unit_box().translated(Vec2::new(2.0, 0.0))]).unwrap();
    assert_eq!(u, Rect::new(0.0, 0.0, 3.0, 1.0));
}
