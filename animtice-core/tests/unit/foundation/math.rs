use super::*;

#[test]
fn unit_rejects_zero_vectors() {
    assert!(unit(Vec2::ZERO).is_none());
    assert!(unit(Vec2::new(1e-12, 0.0)).is_none());
    let u = unit(Vec2::new(3.0, 4.0)).unwrap();
    assert!((u.x - 0.6).abs() < 1e-12);
    assert!((u.y - 0.8).abs() < 1e-12);
}

#[test]
fn perp_is_orthogonal() {
    let v = Vec2::new(2.0, -1.0);
    assert_eq!(v.dot(perp(v)), 0.0);
    assert_eq!(cross(v, perp(v)), v.hypot2());
}

#[test]
fn quantities_format_without_trailing_zeros() {
    assert_eq!(format_quantity(4.0), "4");
    assert_eq!(format_quantity(2.5), "2.5");
    assert_eq!(format_quantity(-3.0), "-3");
}
