use crate::{
    animation::{ease::Ease, keyframes::Keyframes},
    foundation::{
        core::{Canvas, Fps, FrameIndex, FrameRange, Rgba8, Vec2},
        error::{TiceError, TiceResult},
    },
    scene::visual::{ObjectId, Visual},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Recorded result of running a lesson on a [`Stage`](crate::Stage).
///
/// A timeline is plain data: it can be serialized to JSON, inspected, and sampled frame by frame
/// with [`Evaluator::eval_frame`](crate::Evaluator::eval_frame).
pub struct Timeline {
    /// Timeline frame rate.
    pub fps: Fps,
    /// Output canvas dimensions.
    pub canvas: Canvas,
    /// Color painted behind every frame.
    pub background: Rgba8,
    /// Total duration in frames.
    pub duration: FrameIndex,
    /// One track per registered object, in registration order.
    pub objects: Vec<ObjectTrack>,
    /// Lesson steps in the order they ran.
    pub markers: Vec<StepMarker>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Everything recorded about one object.
pub struct ObjectTrack {
    pub id: ObjectId,
    /// Visual as registered, before any `Transform`.
    pub visual: Visual,
    /// Frames during which the object exists.
    pub alive: FrameRange,
    /// Opacity multiplier in `[0, 1]`.
    pub opacity: Keyframes<f64>,
    /// Fraction of the outline drawn.
    pub draw: Keyframes<f64>,
    /// Fraction of text characters shown.
    pub reveal: Keyframes<f64>,
    /// Translation in scene units.
    pub offset: Keyframes<Vec2>,
    /// Uniform scale about the object's center.
    pub scale: Keyframes<f64>,
    /// Shape changes in play order.
    pub shape_keys: Vec<ShapeKey>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A `Transform` from one visual to another over `[start, end)`.
pub struct ShapeKey {
    pub start: FrameIndex,
    pub end: FrameIndex,
    pub from: Visual,
    pub to: Visual,
    pub ease: Ease,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Frames covered by one named lesson step (pause included).
pub struct StepMarker {
    pub name: String,
    pub range: FrameRange,
}

impl ObjectTrack {
    pub(crate) fn new(id: ObjectId, visual: Visual, start: FrameIndex) -> Self {
        Self {
            id,
            visual,
            alive: FrameRange { start, end: start },
            opacity: Keyframes::constant(1.0),
            draw: Keyframes::constant(1.0),
            reveal: Keyframes::constant(1.0),
            offset: Keyframes::constant(Vec2::ZERO),
            scale: Keyframes::constant(1.0),
            shape_keys: Vec::new(),
        }
    }

    fn validate(&self, duration: FrameIndex) -> TiceResult<()> {
        if self.alive.start.0 > self.alive.end.0 || self.alive.end.0 > duration.0 {
            return Err(TiceError::timeline(format!(
                "object {} alive range {}..{} outside duration {}",
                self.id.0, self.alive.start.0, self.alive.end.0, duration.0
            )));
        }
        self.opacity.validate()?;
        self.draw.validate()?;
        self.reveal.validate()?;
        self.offset.validate()?;
        self.scale.validate()?;
        for key in &self.shape_keys {
            if key.start.0 > key.end.0 {
                return Err(TiceError::timeline(format!(
                    "object {} has a shape key ending before it starts",
                    self.id.0
                )));
            }
        }
        if !self
            .shape_keys
            .windows(2)
            .all(|w| w[0].end.0 <= w[1].start.0)
        {
            return Err(TiceError::timeline(format!(
                "object {} has overlapping shape keys",
                self.id.0
            )));
        }
        Ok(())
    }
}

impl Timeline {
    pub fn validate(&self) -> TiceResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(TiceError::validation("fps must have num>0 and den>0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(TiceError::validation("canvas width/height must be > 0"));
        }
        if self.duration.0 == 0 {
            return Err(TiceError::validation("duration must be > 0 frames"));
        }
        for (i, track) in self.objects.iter().enumerate() {
            if track.id.0 as usize != i {
                return Err(TiceError::timeline(format!(
                    "object id {} stored at index {i}",
                    track.id.0
                )));
            }
            track.validate(self.duration)?;
        }
        for m in &self.markers {
            if m.range.end.0 > self.duration.0 {
                return Err(TiceError::timeline(format!(
                    "step '{}' ends after the timeline",
                    m.name
                )));
            }
        }
        Ok(())
    }

    pub fn duration_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.duration.0)
    }

    pub fn step(&self, name: &str) -> Option<&StepMarker> {
        self.markers.iter().find(|m| m.name == name)
    }

    /// Frame shown at `secs`, clamped to the last frame.
    pub fn frame_at_secs(&self, secs: f64) -> FrameIndex {
        let f = if secs.is_finite() && secs > 0.0 {
            (secs * self.fps.as_f64()).floor() as u64
        } else {
            0
        };
        FrameIndex(f.min(self.duration.0.saturating_sub(1)))
    }

    /// A frame at which `step` has finished animating: the last frame of its range.
    pub fn step_frame(&self, name: &str) -> Option<FrameIndex> {
        self.step(name).map(|m| {
            let last = m.range.end.0.saturating_sub(1).max(m.range.start.0);
            FrameIndex(last.min(self.duration.0.saturating_sub(1)))
        })
    }

    pub fn to_json_pretty(&self) -> TiceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> TiceResult<Self> {
        let timeline: Self = serde_json::from_str(s)?;
        timeline.validate()?;
        Ok(timeline)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/timeline.rs"]
mod tests;
