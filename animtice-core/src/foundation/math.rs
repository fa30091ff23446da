use kurbo::Vec2;

/// Below this, a 2D cross product of direction vectors counts as zero (parallel lines).
pub const PARALLEL_EPS: f64 = 1e-8;

/// Below this, a vector counts as zero-length.
pub const LENGTH_EPS: f64 = 1e-9;

pub fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Unit vector along `v`, or `None` when `v` is (numerically) zero-length.
pub fn unit(v: Vec2) -> Option<Vec2> {
    let len = v.hypot();
    if !len.is_finite() || len < LENGTH_EPS {
        return None;
    }
    Some(v / len)
}

/// `v` rotated a quarter turn counter-clockwise.
pub fn perp(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Integer text for whole values, otherwise the shortest float text ("4", "2.5").
pub fn format_quantity(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
