use crate::{
    animation::ease::Ease,
    foundation::{
        core::{FrameIndex, Vec2},
        error::{TiceError, TiceResult},
    },
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    pub frame: FrameIndex,
    pub value: T,
    pub ease: Ease, // ease applied toward next key
}

/// A channel value over absolute timeline frames.
///
/// Keys are sorted by frame. Before the first key the first value holds, after the last key the
/// last value holds. When several keys share a frame, the one pushed last wins.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    pub keys: Vec<Keyframe<T>>,
    pub default: T, // value when no keys exist
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    pub fn constant(value: T) -> Self {
        Self {
            keys: Vec::new(),
            default: value,
        }
    }

    pub fn validate(&self) -> TiceResult<()> {
        if !self.keys.windows(2).all(|w| w[0].frame.0 <= w[1].frame.0) {
            return Err(TiceError::timeline("Keyframes keys must be sorted by frame"));
        }
        Ok(())
    }

    pub fn push(&mut self, frame: FrameIndex, value: T, ease: Ease) -> TiceResult<()> {
        if let Some(last) = self.keys.last()
            && last.frame.0 > frame.0
        {
            return Err(TiceError::timeline(format!(
                "keyframe at frame {} precedes the last key at frame {}",
                frame.0, last.frame.0
            )));
        }
        self.keys.push(Keyframe { frame, value, ease });
        Ok(())
    }

    /// Animate from `from` at `start` to `to` at `end` with `ease`.
    pub fn segment(
        &mut self,
        start: FrameIndex,
        end: FrameIndex,
        from: T,
        to: T,
        ease: Ease,
    ) -> TiceResult<()> {
        self.push(start, from, ease)?;
        self.push(end, to, Ease::Linear)
    }

    pub fn sample(&self, frame: FrameIndex) -> T {
        if self.keys.is_empty() {
            return self.default.clone();
        }

        let f = frame.0;
        let idx = self.keys.partition_point(|k| k.frame.0 <= f);

        if idx == 0 {
            return self.keys[0].value.clone();
        }
        if idx >= self.keys.len() {
            return self.keys[self.keys.len() - 1].value.clone();
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.frame.0.saturating_sub(a.frame.0);
        if denom == 0 {
            return a.value.clone();
        }

        let t = ((f - a.frame.0) as f64) / (denom as f64);
        T::lerp(&a.value, &b.value, a.ease.apply(t))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
