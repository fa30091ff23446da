use crate::{
    foundation::{
        core::FrameIndex,
        error::{TiceError, TiceResult},
    },
    scene::visual::{ObjectId, Visual},
    stage::timeline::{ObjectTrack, Timeline},
};

#[derive(Clone, Debug, serde::Serialize)]
/// Everything visible at one frame, in paint order.
pub struct EvaluatedFrame {
    pub frame: FrameIndex,
    pub nodes: Vec<EvaluatedNode>,
}

#[derive(Clone, Debug, serde::Serialize)]
/// One object resolved at a frame. A cross-fading `Transform` yields two nodes with the same id.
pub struct EvaluatedNode {
    pub id: ObjectId,
    /// Geometry with transform, offset and scale applied.
    pub visual: Visual,
    /// Final opacity in `[0, 1]`.
    pub opacity: f64,
    /// Fraction of the outline drawn, in `[0, 1]`.
    pub draw: f64,
    /// Fraction of text characters shown, in `[0, 1]`.
    pub reveal: f64,
}

/// Stateless sampler from a [`Timeline`] to frames.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(timeline))]
    pub fn eval_frame(timeline: &Timeline, frame: FrameIndex) -> TiceResult<EvaluatedFrame> {
        if frame.0 >= timeline.duration.0 {
            return Err(TiceError::evaluation(format!(
                "frame {} is out of bounds (duration {})",
                frame.0, timeline.duration.0
            )));
        }

        let mut keyed: Vec<((i32, ObjectId, usize), EvaluatedNode)> = Vec::new();
        for track in &timeline.objects {
            if !track.alive.contains(frame) {
                continue;
            }
            for (layer, node) in eval_track(track, frame).into_iter().enumerate() {
                if node.opacity <= 0.0 {
                    continue;
                }
                keyed.push(((node.visual.z, node.id, layer), node));
            }
        }

        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        let nodes = keyed.into_iter().map(|(_, n)| n).collect();
        Ok(EvaluatedFrame { frame, nodes })
    }
}

fn eval_track(track: &ObjectTrack, frame: FrameIndex) -> Vec<EvaluatedNode> {
    let opacity = track.opacity.sample(frame).clamp(0.0, 1.0);
    let draw = track.draw.sample(frame).clamp(0.0, 1.0);
    let reveal = track.reveal.sample(frame).clamp(0.0, 1.0);
    let offset = track.offset.sample(frame);
    let scale = track.scale.sample(frame);

    resolve_shape(track, frame)
        .into_iter()
        .map(|(visual, weight)| {
            let visual = if (scale - 1.0).abs() > f64::EPSILON {
                visual.scaled(scale)
            } else {
                visual
            };
            EvaluatedNode {
                id: track.id,
                visual: visual.translated(offset),
                opacity: opacity * weight,
                draw,
                reveal,
            }
        })
        .collect()
}

/// The object's shape at `frame` as weighted layers: one layer, or two while cross-fading.
fn resolve_shape(track: &ObjectTrack, frame: FrameIndex) -> Vec<(Visual, f64)> {
    let mut current = &track.visual;
    for key in &track.shape_keys {
        if frame.0 >= key.end.0 {
            current = &key.to;
            continue;
        }
        if frame.0 < key.start.0 {
            break;
        }
        let span = (key.end.0 - key.start.0) as f64;
        let t = key.ease.apply((frame.0 - key.start.0) as f64 / span);
        return match key.from.interpolate(&key.to, t) {
            Some(v) => vec![(v, 1.0)],
            None => vec![(key.from.clone(), 1.0 - t), (key.to.clone(), t)],
        };
    }
    vec![(current.clone(), 1.0)]
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
