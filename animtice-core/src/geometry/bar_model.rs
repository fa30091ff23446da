use kurbo::{Point, Rect};

use crate::foundation::error::{TiceError, TiceResult};

/// A horizontal span along a bar: `[start, start + width)` in scene units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Span {
    pub start: f64,
    pub width: f64,
}

impl Span {
    pub fn end(self) -> f64 {
        self.start + self.width
    }

    pub fn center(self) -> f64 {
        self.start + self.width / 2.0
    }

    /// The span as a rectangle of `height` centered on `y`.
    pub fn to_rect(self, y: f64, height: f64) -> Rect {
        Rect::new(self.start, y - height / 2.0, self.end(), y + height / 2.0)
    }
}

/// Cuts a bar starting at `left` of `total_width` into consecutive spans proportional to
/// `ratios`.
pub fn segment_layout(left: f64, total_width: f64, ratios: &[f64]) -> TiceResult<Vec<Span>> {
    if ratios.is_empty() {
        return Err(TiceError::validation("bar segmentation needs at least one ratio"));
    }
    if ratios.iter().any(|r| !r.is_finite() || *r <= 0.0) {
        return Err(TiceError::validation("bar segmentation ratios must be > 0"));
    }
    if !(total_width.is_finite() && total_width > 0.0) {
        return Err(TiceError::validation("bar width must be > 0"));
    }

    let sum: f64 = ratios.iter().sum();
    let mut x = left;
    Ok(ratios
        .iter()
        .map(|r| {
            let span = Span {
                start: x,
                width: total_width * r / sum,
            };
            x = span.end();
            span
        })
        .collect())
}

/// Bars for quantities drawn at `unit_width` per unit, all starting at `left`.
///
/// Used for comparison models, where equal starts make the difference visible at the right end.
pub fn quantity_bars(left: f64, unit_width: f64, quantities: &[u32]) -> TiceResult<Vec<Span>> {
    if !(unit_width.is_finite() && unit_width > 0.0) {
        return Err(TiceError::validation("unit width must be > 0"));
    }
    Ok(quantities
        .iter()
        .map(|q| Span {
            start: left,
            width: f64::from(*q) * unit_width,
        })
        .collect())
}

/// The part of the longer span that sticks out past the shorter one, if any.
pub fn difference_span(a: Span, b: Span) -> Option<Span> {
    let (short, long) = if a.end() <= b.end() { (a, b) } else { (b, a) };
    let width = long.end() - short.end();
    if width <= 1e-9 {
        return None;
    }
    Some(Span {
        start: short.end(),
        width,
    })
}

/// A curly-brace-like bracket under a span, as three strokes (left tick, bar, right tick).
pub fn bracket_under(span: Span, y: f64, depth: f64) -> [kurbo::Line; 3] {
    let (l, r) = (span.start, span.end());
    [
        kurbo::Line::new(Point::new(l, y), Point::new(l, y - depth)),
        kurbo::Line::new(Point::new(l, y - depth), Point::new(r, y - depth)),
        kurbo::Line::new(Point::new(r, y - depth), Point::new(r, y)),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/bar_model.rs"]
mod tests;
