use kurbo::{Point, Vec2};

use crate::{
    animation::{
        action::{Animation, AnimationKind, Targets},
        ease::Ease,
    },
    foundation::{
        core::{FrameIndex, FrameRange, Fps},
        error::{TiceError, TiceResult},
    },
    lesson::locale::{Bilingual, Locale},
    scene::visual::{ObjectId, Visual},
    stage::{
        settings::StageSettings,
        timeline::{ObjectTrack, ShapeKey, StepMarker, Timeline},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Presence {
    /// Registered, waiting for an entrance animation.
    Staged,
    Visible,
    Gone,
}

#[derive(Clone, Debug)]
struct Entry {
    track: ObjectTrack,
    current: Visual,
    presence: Presence,
}

/// The mutable context lesson steps write to.
///
/// A stage owns the object registry and a playhead. Every [`play`](Stage::play) and
/// [`wait`](Stage::wait) advances the playhead; everything done to an object is recorded as
/// keyframes on its track. [`finish`](Stage::finish) turns the recording into a [`Timeline`].
#[derive(Debug)]
pub struct Stage {
    settings: StageSettings,
    locale: Locale,
    cursor: u64,
    entries: Vec<Entry>,
    markers: Vec<StepMarker>,
    open_step: Option<(String, FrameIndex)>,
    title: Option<ObjectId>,
}

impl Stage {
    pub fn new(settings: StageSettings, locale: Locale) -> TiceResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            locale,
            cursor: 0,
            entries: Vec::new(),
            markers: Vec::new(),
            open_step: None,
            title: None,
        })
    }

    pub fn settings(&self) -> &StageSettings {
        &self.settings
    }

    pub fn fps(&self) -> Fps {
        self.settings.fps
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// The stage's language variant of `text`.
    pub fn text<'a>(&self, text: &'a Bilingual) -> &'a str {
        text.pick(self.locale)
    }

    pub fn now(&self) -> FrameIndex {
        FrameIndex(self.cursor)
    }

    pub fn title(&self) -> Option<ObjectId> {
        self.title
    }

    pub fn set_title(&mut self, id: Option<ObjectId>) {
        self.title = id;
    }

    /// Register `visual`, visible from the playhead on.
    pub fn add(&mut self, visual: Visual) -> ObjectId {
        self.register(visual, Presence::Visible)
    }

    pub fn add_all(&mut self, visuals: impl IntoIterator<Item = Visual>) -> Vec<ObjectId> {
        visuals.into_iter().map(|v| self.add(v)).collect()
    }

    /// Register `visual` without showing it; it appears with its first animation.
    pub fn stage(&mut self, visual: Visual) -> ObjectId {
        self.register(visual, Presence::Staged)
    }

    pub fn stage_all(&mut self, visuals: impl IntoIterator<Item = Visual>) -> Vec<ObjectId> {
        visuals.into_iter().map(|v| self.stage(v)).collect()
    }

    fn register(&mut self, visual: Visual, presence: Presence) -> ObjectId {
        let id = ObjectId(self.entries.len() as u32);
        self.entries.push(Entry {
            track: ObjectTrack::new(id, visual.clone(), self.now()),
            current: visual,
            presence,
        });
        id
    }

    /// Current visual of `id`, without its recorded offset.
    pub fn visual(&self, id: ObjectId) -> TiceResult<&Visual> {
        Ok(&self.entry(id)?.current)
    }

    /// Center of `id` at the playhead, offset included.
    pub fn position(&self, id: ObjectId) -> TiceResult<Point> {
        let e = self.entry(id)?;
        Ok(e.current.center() + e.track.offset.sample(self.now()))
    }

    pub fn is_visible(&self, id: ObjectId) -> bool {
        self.entries
            .get(id.0 as usize)
            .is_some_and(|e| e.presence == Presence::Visible)
    }

    /// Objects on screen at the playhead, in registration order.
    pub fn visible_ids(&self) -> Vec<ObjectId> {
        self.entries
            .iter()
            .filter(|e| e.presence == Presence::Visible)
            .map(|e| e.track.id)
            .collect()
    }

    fn entry(&self, id: ObjectId) -> TiceResult<&Entry> {
        self.entries
            .get(id.0 as usize)
            .ok_or_else(|| TiceError::timeline(format!("unknown object id {}", id.0)))
    }

    fn frames_for(&self, secs: f64, what: &str) -> TiceResult<u64> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(TiceError::timeline(format!(
                "{what} must be finite and >= 0, got {secs}"
            )));
        }
        if secs * self.settings.fps.as_f64() >= u64::MAX as f64 {
            return Err(TiceError::timeline(format!("{what} of {secs}s is too long")));
        }
        Ok(self.settings.fps.secs_to_frames_round(secs))
    }

    fn advanced_by(&self, frames: u64) -> TiceResult<u64> {
        self.cursor
            .checked_add(frames)
            .ok_or_else(|| TiceError::timeline("playhead overflows the frame range"))
    }

    /// Run `animations` together, all starting at the playhead and lasting `run_time` seconds
    /// (at least one frame). The playhead ends up after them.
    ///
    /// A failing play leaves the stage as it was.
    #[tracing::instrument(skip(self, animations), fields(at = self.cursor))]
    pub fn play(
        &mut self,
        animations: impl IntoIterator<Item = Animation>,
        run_time: f64,
    ) -> TiceResult<()> {
        let animations: Vec<Animation> = animations.into_iter().collect();
        let frames = self.frames_for(run_time, "run time")?.max(1);
        for anim in &animations {
            self.check(anim)?;
        }

        let start = self.now();
        let end = FrameIndex(self.advanced_by(frames)?);
        let mut touched: Vec<usize> = animations
            .iter()
            .flat_map(|a| a.targets.0.iter().map(|id| id.0 as usize))
            .collect();
        touched.sort_unstable();
        touched.dedup();
        let saved: Vec<(usize, Entry)> = touched
            .into_iter()
            .map(|i| (i, self.entries[i].clone()))
            .collect();

        let applied = animations.iter().try_for_each(|anim| {
            anim.targets
                .0
                .iter()
                .try_for_each(|&id| self.apply(id, anim, start, end))
        });
        if let Err(err) = applied {
            for (i, entry) in saved {
                self.entries[i] = entry;
            }
            return Err(err);
        }
        tracing::debug!(count = animations.len(), frames, "play");
        self.cursor = end.0;
        Ok(())
    }

    fn check(&self, anim: &Animation) -> TiceResult<()> {
        if anim.targets.0.is_empty() {
            return Err(TiceError::timeline("animation has no targets"));
        }
        if matches!(anim.kind, AnimationKind::Transform { .. }) && anim.targets.0.len() != 1 {
            return Err(TiceError::timeline("transform applies to exactly one object"));
        }
        if let AnimationKind::Indicate { scale } = anim.kind
            && !(scale.is_finite() && scale > 0.0)
        {
            return Err(TiceError::timeline("indicate scale must be finite and > 0"));
        }
        for &id in &anim.targets.0 {
            if self.entry(id)?.presence == Presence::Gone {
                return Err(TiceError::timeline(format!(
                    "object {} was already removed",
                    id.0
                )));
            }
        }
        Ok(())
    }

    fn apply(
        &mut self,
        id: ObjectId,
        anim: &Animation,
        start: FrameIndex,
        end: FrameIndex,
    ) -> TiceResult<()> {
        let ease = anim.ease_or_default();
        let entry = &mut self.entries[id.0 as usize];
        if entry.presence == Presence::Staged {
            entry.presence = Presence::Visible;
            entry.track.alive = FrameRange { start, end: start };
        }
        let track = &mut entry.track;

        match &anim.kind {
            AnimationKind::Create | AnimationKind::Write => {
                if entry.current.is_text() {
                    track.reveal.segment(start, end, 0.0, 1.0, ease)?;
                } else {
                    track.draw.segment(start, end, 0.0, 1.0, ease)?;
                }
            }
            AnimationKind::FadeIn { shift } => {
                track.opacity.segment(start, end, 0.0, 1.0, ease)?;
                if *shift != Vec2::ZERO {
                    offset_by(track, start, end, -*shift, Vec2::ZERO, ease)?;
                }
            }
            AnimationKind::FadeOut { shift } => {
                let from = track.opacity.sample(start);
                track.opacity.segment(start, end, from, 0.0, ease)?;
                if *shift != Vec2::ZERO {
                    offset_by(track, start, end, Vec2::ZERO, *shift, ease)?;
                }
                track.alive.end = end;
                entry.presence = Presence::Gone;
            }
            AnimationKind::Transform { target } => {
                let target = target.as_ref().clone();
                track.shape_keys.push(ShapeKey {
                    start,
                    end,
                    from: entry.current.clone(),
                    to: target.clone(),
                    ease,
                });
                // The target is absolute: fold any accumulated offset back to zero.
                let o = track.offset.sample(start);
                if o != Vec2::ZERO {
                    track.offset.segment(start, end, o, Vec2::ZERO, ease)?;
                }
                entry.current = target;
            }
            AnimationKind::MoveAlong { points } => {
                let o = track.offset.sample(start);
                let base = entry.current.center();
                move_along(track, base + o, points, start, end, ease)?;
            }
            AnimationKind::Shift { by } => {
                offset_by(track, start, end, Vec2::ZERO, *by, ease)?;
            }
            AnimationKind::Indicate { scale } => {
                let mid = FrameIndex(start.0 + (end.0 - start.0) / 2);
                track.scale.push(start, 1.0, ease)?;
                track.scale.push(mid, *scale, ease)?;
                track.scale.push(end, 1.0, Ease::Linear)?;
            }
        }
        Ok(())
    }

    /// Advance the playhead by `secs`.
    pub fn wait(&mut self, secs: f64) -> TiceResult<()> {
        let frames = self.frames_for(secs, "wait")?;
        self.cursor = self.advanced_by(frames)?;
        Ok(())
    }

    /// End the objects' lives at the playhead, without animation.
    pub fn remove(&mut self, targets: impl Into<Targets>) -> TiceResult<()> {
        let now = self.now();
        for id in targets.into().0 {
            self.entry(id)?;
            let e = &mut self.entries[id.0 as usize];
            match e.presence {
                Presence::Gone => {
                    return Err(TiceError::timeline(format!(
                        "object {} was already removed",
                        id.0
                    )));
                }
                Presence::Staged => e.track.alive = FrameRange { start: now, end: now },
                Presence::Visible => e.track.alive.end = now,
            }
            e.presence = Presence::Gone;
        }
        Ok(())
    }

    /// Open a named step at the playhead.
    pub fn begin_step(&mut self, name: impl Into<String>) -> TiceResult<()> {
        let name = name.into();
        if let Some((open, _)) = &self.open_step {
            return Err(TiceError::lesson(format!(
                "step '{name}' started while '{open}' is still running"
            )));
        }
        self.open_step = Some((name, self.now()));
        Ok(())
    }

    pub fn end_step(&mut self) -> TiceResult<()> {
        let (name, start) = self
            .open_step
            .take()
            .ok_or_else(|| TiceError::lesson("no step is running"))?;
        self.markers.push(StepMarker {
            name,
            range: FrameRange {
                start,
                end: self.now(),
            },
        });
        Ok(())
    }

    pub fn markers(&self) -> &[StepMarker] {
        &self.markers
    }

    /// Close the recording. Objects still on screen live until the last frame.
    pub fn finish(mut self) -> TiceResult<Timeline> {
        if self.open_step.is_some() {
            self.end_step()?;
        }
        let duration = FrameIndex(self.cursor.max(1));
        let objects = self
            .entries
            .into_iter()
            .map(|mut e| {
                if e.presence == Presence::Visible {
                    e.track.alive.end = duration;
                }
                e.track
            })
            .collect();
        let timeline = Timeline {
            fps: self.settings.fps,
            canvas: self.settings.canvas,
            background: self.settings.background,
            duration,
            objects,
            markers: self.markers,
        };
        timeline.validate()?;
        Ok(timeline)
    }
}

/// Moves the offset from `o + from` to `o + to` over `[start, end)`, where `o` is the offset at
/// `start`. A segment already keyed over exactly that span in the same play absorbs the deltas.
fn offset_by(
    track: &mut ObjectTrack,
    start: FrameIndex,
    end: FrameIndex,
    from: Vec2,
    to: Vec2,
    ease: Ease,
) -> TiceResult<()> {
    if let [.., a, b] = track.offset.keys.as_mut_slice()
        && a.frame == start
        && b.frame == end
    {
        a.value += from;
        b.value += to;
        return Ok(());
    }
    let o = track.offset.sample(start);
    track.offset.segment(start, end, o + from, o + to, ease)
}

/// Keys an offset path through `points`, timed by distance travelled.
fn move_along(
    track: &mut ObjectTrack,
    from: Point,
    points: &[Point],
    start: FrameIndex,
    end: FrameIndex,
    ease: Ease,
) -> TiceResult<()> {
    let mut path = Vec::with_capacity(points.len() + 1);
    path.push(from);
    path.extend_from_slice(points);
    let total: f64 = path.windows(2).map(|w| w[0].distance(w[1])).sum();
    if total <= 0.0 {
        return Ok(());
    }

    let base = from - track.offset.sample(start);
    let span = (end.0 - start.0) as f64;
    let mut travelled = 0.0;
    track.offset.push(start, from - base, ease)?;
    for w in path.windows(2) {
        travelled += w[0].distance(w[1]);
        let f = start.0 + (span * travelled / total).round() as u64;
        track.offset.push(FrameIndex(f.min(end.0)), w[1] - base, ease)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/stage/builder.rs"]
mod tests;
