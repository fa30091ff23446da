use kurbo::{Affine, BezPath, Circle, Line, PathEl, Point, Rect, RoundedRect, Shape as _, Vec2};

use crate::{animation::keyframes::Lerp, foundation::core::Rgba8};

/// Handle to an object registered on a [`Stage`](crate::Stage). Dense index, stage-local.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ObjectId(pub u32);

/// Text sizes are given in points; this many points make one scene unit.
pub const POINTS_PER_UNIT: f64 = 64.0;

/// Stroke widths are given in points; this many points make one scene unit.
pub const STROKE_POINTS_PER_UNIT: f64 = 100.0;

/// Rough advance of one glyph as a fraction of the font size, used for layout estimates.
const GLYPH_ADVANCE_EM: f64 = 0.55;

const CURVE_TOLERANCE: f64 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    pub color: Rgba8,
    pub width: f64, // points
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Fill {
    pub color: Rgba8,
    pub opacity: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

/// A single line of text. `at` is the anchor point on the vertical middle of the line.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextRun {
    pub content: String,
    pub at: Point,
    pub size: f64, // points
    pub anchor: TextAnchor,
    pub bold: bool,
}

impl TextRun {
    pub fn size_units(&self) -> f64 {
        self.size / POINTS_PER_UNIT
    }

    pub fn estimated_width(&self) -> f64 {
        self.content.chars().count() as f64 * self.size_units() * GLYPH_ADVANCE_EM
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Shape {
    Path(BezPath),
    Text(TextRun),
}

/// A displayable object in scene units (frame 8 units tall, origin at the center, y up).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Visual {
    pub shape: Shape,
    pub stroke: Option<Stroke>,
    pub fill: Option<Fill>,
    pub z: i32,
}

impl Visual {
    pub fn path(path: BezPath) -> Self {
        Self {
            shape: Shape::Path(path),
            stroke: Some(Stroke {
                color: Rgba8::WHITE,
                width: 4.0,
            }),
            fill: None,
            z: 0,
        }
    }

    pub fn line(a: Point, b: Point) -> Self {
        Self::segments(&[Line::new(a, b)])
    }

    /// Several disconnected strokes as one object (partition dividers, markers, ticks).
    pub fn segments(lines: &[Line]) -> Self {
        let mut path = BezPath::new();
        for l in lines {
            path.move_to(l.p0);
            path.line_to(l.p1);
        }
        Self::path(path)
    }

    pub fn polyline(points: &[Point]) -> Self {
        Self::path(points_path(points, false))
    }

    pub fn polygon(points: &[Point]) -> Self {
        Self::path(points_path(points, true))
    }

    pub fn rect(rect: Rect) -> Self {
        Self::path(rect.to_path(CURVE_TOLERANCE))
    }

    pub fn rounded_rect(rect: Rect, radius: f64) -> Self {
        let radius = radius.min(rect.width().min(rect.height()) / 2.0).max(0.0);
        Self::path(RoundedRect::from_rect(rect, radius).to_path(CURVE_TOLERANCE))
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        Self::path(Circle::new(center, radius).to_path(CURVE_TOLERANCE))
    }

    pub fn dot(center: Point, radius: f64) -> Self {
        Self::circle(center, radius)
            .without_stroke()
            .with_fill(Rgba8::WHITE, 1.0)
    }

    pub fn text(content: impl Into<String>, at: Point, size: f64) -> Self {
        Self {
            shape: Shape::Text(TextRun {
                content: content.into(),
                at,
                size,
                anchor: TextAnchor::Middle,
                bold: false,
            }),
            stroke: None,
            fill: Some(Fill {
                color: Rgba8::WHITE,
                opacity: 1.0,
            }),
            z: 10,
        }
    }

    pub fn with_stroke(mut self, color: Rgba8, width: f64) -> Self {
        self.stroke = Some(Stroke { color, width });
        self
    }

    pub fn without_stroke(mut self) -> Self {
        self.stroke = None;
        self
    }

    pub fn with_fill(mut self, color: Rgba8, opacity: f64) -> Self {
        self.fill = Some(Fill {
            color,
            opacity: opacity.clamp(0.0, 1.0),
        });
        self
    }

    /// Recolor whatever is painted: the stroke of a path, the fill of a text.
    pub fn with_color(mut self, color: Rgba8) -> Self {
        if let Some(s) = self.stroke.as_mut() {
            s.color = color;
        }
        if self.is_text() || self.stroke.is_none() {
            if let Some(f) = self.fill.as_mut() {
                f.color = color;
            }
        }
        self
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn anchored(mut self, anchor: TextAnchor) -> Self {
        if let Shape::Text(t) = &mut self.shape {
            t.anchor = anchor;
        }
        self
    }

    pub fn bold(mut self) -> Self {
        if let Shape::Text(t) = &mut self.shape {
            t.bold = true;
        }
        self
    }

    pub fn is_text(&self) -> bool {
        matches!(self.shape, Shape::Text(_))
    }

    pub fn transformed(mut self, affine: Affine) -> Self {
        match &mut self.shape {
            Shape::Path(p) => p.apply_affine(affine),
            Shape::Text(t) => {
                let (sx, sy) = scale_factors(affine);
                t.at = affine * t.at;
                t.size *= (sx * sy).abs().sqrt();
            }
        }
        self
    }

    pub fn translated(self, by: Vec2) -> Self {
        if by == Vec2::ZERO {
            return self;
        }
        self.transformed(Affine::translate(by))
    }

    /// Scaled by `factor` about its own center.
    pub fn scaled(self, factor: f64) -> Self {
        let c = self.center();
        self.transformed(scale_about(factor, c))
    }

    pub fn moved_to(self, to: Point) -> Self {
        let by = to - self.center();
        self.translated(by)
    }

    pub fn bounds(&self) -> Rect {
        match &self.shape {
            Shape::Path(p) => p.bounding_box(),
            Shape::Text(t) => {
                let w = t.estimated_width();
                let h = t.size_units();
                let x0 = match t.anchor {
                    TextAnchor::Start => t.at.x,
                    TextAnchor::Middle => t.at.x - w / 2.0,
                    TextAnchor::End => t.at.x - w,
                };
                Rect::new(x0, t.at.y - h / 2.0, x0 + w, t.at.y + h / 2.0)
            }
        }
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Point-wise interpolation towards `other`, when both are paths with the same element
    /// structure. Anything else has to cross-fade.
    pub fn interpolate(&self, other: &Visual, t: f64) -> Option<Visual> {
        let (Shape::Path(a), Shape::Path(b)) = (&self.shape, &other.shape) else {
            return None;
        };
        let els = lerp_path_elements(a.elements(), b.elements(), t)?;
        Some(Visual {
            shape: Shape::Path(BezPath::from_vec(els)),
            stroke: lerp_option(self.stroke, other.stroke, t, |a, b, t| Stroke {
                color: Rgba8::lerp(&a.color, &b.color, t),
                width: f64::lerp(&a.width, &b.width, t),
            }),
            fill: lerp_option(self.fill, other.fill, t, |a, b, t| Fill {
                color: Rgba8::lerp(&a.color, &b.color, t),
                opacity: f64::lerp(&a.opacity, &b.opacity, t),
            }),
            z: if t < 1.0 { self.z } else { other.z },
        })
    }
}

pub(crate) fn scale_about(factor: f64, center: Point) -> Affine {
    Affine::translate(center.to_vec2())
        * Affine::scale(factor)
        * Affine::translate(-center.to_vec2())
}

fn scale_factors(affine: Affine) -> (f64, f64) {
    let [a, b, c, d, _, _] = affine.as_coeffs();
    (Vec2::new(a, b).hypot(), Vec2::new(c, d).hypot())
}

fn points_path(points: &[Point], closed: bool) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter();
    if let Some(first) = it.next() {
        path.move_to(*first);
        for p in it {
            path.line_to(*p);
        }
        if closed {
            path.close_path();
        }
    }
    path
}

fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    a.lerp(b, t)
}

fn lerp_path_elements(a: &[PathEl], b: &[PathEl], t: f64) -> Option<Vec<PathEl>> {
    if a.len() != b.len() {
        return None;
    }
    a.iter()
        .zip(b)
        .map(|(ea, eb)| match (ea, eb) {
            (PathEl::MoveTo(p), PathEl::MoveTo(q)) => Some(PathEl::MoveTo(lerp_point(*p, *q, t))),
            (PathEl::LineTo(p), PathEl::LineTo(q)) => Some(PathEl::LineTo(lerp_point(*p, *q, t))),
            (PathEl::QuadTo(p1, p2), PathEl::QuadTo(q1, q2)) => Some(PathEl::QuadTo(
                lerp_point(*p1, *q1, t),
                lerp_point(*p2, *q2, t),
            )),
            (PathEl::CurveTo(p1, p2, p3), PathEl::CurveTo(q1, q2, q3)) => Some(PathEl::CurveTo(
                lerp_point(*p1, *q1, t),
                lerp_point(*p2, *q2, t),
                lerp_point(*p3, *q3, t),
            )),
            (PathEl::ClosePath, PathEl::ClosePath) => Some(PathEl::ClosePath),
            _ => None,
        })
        .collect()
}

fn lerp_option<T: Copy>(a: Option<T>, b: Option<T>, t: f64, f: impl Fn(T, T, f64) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b, t)),
        (Some(a), None) => (t < 1.0).then_some(a),
        (None, Some(b)) => (t > 0.0).then_some(b),
        (None, None) => None,
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/visual.rs"]
mod tests;
