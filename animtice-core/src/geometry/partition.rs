use kurbo::{BezPath, Line, Point, Rect, Vec2};

use crate::foundation::error::{TiceError, TiceResult};

/// Direction in which a bar is cut into parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Parts side by side, separated by vertical dividers.
    #[default]
    Vertical,
    /// Parts stacked, separated by horizontal dividers.
    Horizontal,
}

fn check_parts(n: u32) -> TiceResult<()> {
    if n == 0 {
        return Err(TiceError::validation("partition count must be > 0"));
    }
    Ok(())
}

/// The `n - 1` interior dividers that cut `bar` into `n` equal parts.
pub fn bar_dividers(bar: Rect, n: u32, orientation: Orientation) -> TiceResult<Vec<Line>> {
    check_parts(n)?;
    Ok((1..n).map(|i| divider_at(bar, i, n, orientation)).collect())
}

fn divider_at(bar: Rect, i: u32, n: u32, orientation: Orientation) -> Line {
    let f = f64::from(i) / f64::from(n);
    match orientation {
        Orientation::Vertical => {
            let x = bar.x0 + f * bar.width();
            Line::new(Point::new(x, bar.y0), Point::new(x, bar.y1))
        }
        Orientation::Horizontal => {
            let y = bar.y0 + f * bar.height();
            Line::new(Point::new(bar.x0, y), Point::new(bar.x1, y))
        }
    }
}

/// The `n` equal part rectangles of `bar`, left to right (or bottom to top).
pub fn part_boxes(bar: Rect, n: u32, orientation: Orientation) -> TiceResult<Vec<Rect>> {
    check_parts(n)?;
    let nf = f64::from(n);
    Ok((0..n)
        .map(|i| {
            let (a, b) = (f64::from(i) / nf, f64::from(i + 1) / nf);
            match orientation {
                Orientation::Vertical => Rect::new(
                    bar.x0 + a * bar.width(),
                    bar.y0,
                    bar.x0 + b * bar.width(),
                    bar.y1,
                ),
                Orientation::Horizontal => Rect::new(
                    bar.x0,
                    bar.y0 + a * bar.height(),
                    bar.x1,
                    bar.y0 + b * bar.height(),
                ),
            }
        })
        .collect())
}

/// Extra dividers turning `denominator` parts into `denominator * factor` parts.
///
/// Boundaries that already exist (multiples of `factor`) are skipped so no line is drawn twice.
pub fn refinement_dividers(
    bar: Rect,
    denominator: u32,
    factor: u32,
    orientation: Orientation,
) -> TiceResult<Vec<Line>> {
    check_parts(denominator)?;
    check_parts(factor)?;
    let fine = denominator
        .checked_mul(factor)
        .ok_or_else(|| TiceError::validation("refined partition count overflows"))?;
    Ok((1..fine)
        .filter(|i| i % factor != 0)
        .map(|i| divider_at(bar, i, fine, orientation))
        .collect())
}

/// `n` radii from `center`, the first pointing at angle 0, counter-clockwise.
pub fn circle_spokes(center: Point, radius: f64, n: u32) -> TiceResult<Vec<Line>> {
    check_parts(n)?;
    Ok((0..n)
        .map(|i| {
            let a = sector_angle(i, n);
            Line::new(center, center + Vec2::new(a.cos(), a.sin()) * radius)
        })
        .collect())
}

/// `n` closed pie-slice outlines; sector `i` spans the angles of spokes `i` and `i + 1`.
pub fn circle_sectors(center: Point, radius: f64, n: u32) -> TiceResult<Vec<BezPath>> {
    check_parts(n)?;
    Ok((0..n)
        .map(|i| {
            let (a0, a1) = (sector_angle(i, n), sector_angle(i + 1, n));
            sector_path(center, radius, a0, a1)
        })
        .collect())
}

fn sector_angle(i: u32, n: u32) -> f64 {
    std::f64::consts::TAU * f64::from(i) / f64::from(n)
}

/// Pie slice from `a0` to `a1` with the arc flattened into short chords.
pub fn sector_path(center: Point, radius: f64, a0: f64, a1: f64) -> BezPath {
    const CHORDS_PER_TURN: f64 = 96.0;
    let sweep = a1 - a0;
    let steps = ((sweep.abs() / std::f64::consts::TAU) * CHORDS_PER_TURN)
        .ceil()
        .max(1.0) as usize;

    let mut path = BezPath::new();
    path.move_to(center);
    for k in 0..=steps {
        let a = a0 + sweep * (k as f64) / (steps as f64);
        path.line_to(center + Vec2::new(a.cos(), a.sin()) * radius);
    }
    path.close_path();
    path
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/partition.rs"]
mod tests;
