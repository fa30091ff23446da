use super::*;
use crate::{
    Animation, Locale, Stage, StageSettings,
    foundation::core::{Canvas, Fps, Rgba8},
};
use kurbo::{Point, Rect, Vec2};

fn stage() -> Stage {
    let settings = StageSettings {
        fps: Fps { num: 10, den: 1 },
        canvas: Canvas {
            width: 160,
            height: 90,
        },
        background: Rgba8::BLACK,
    };
    Stage::new(settings, Locale::En).unwrap()
}

fn square(x: f64) -> Visual {
    Visual::rect(Rect::new(x, 0.0, x + 1.0, 1.0))
}

#[test]
fn out_of_range_frames_are_errors() {
    let mut s = stage();
    s.add(square(0.0));
    s.wait(1.0).unwrap();
    let t = s.finish().unwrap();
    assert!(Evaluator::eval_frame(&t, FrameIndex(9)).is_ok());
    assert!(Evaluator::eval_frame(&t, FrameIndex(10)).is_err());
}

#[test]
fn nodes_are_ordered_by_z_then_id() {
    let mut s = stage();
    let a = s.add(square(0.0).with_z(5));
    let b = s.add(square(1.0));
    let c = s.add(square(2.0));
    s.wait(1.0).unwrap();
    let t = s.finish().unwrap();
    let f = Evaluator::eval_frame(&t, FrameIndex(0)).unwrap();
    let ids: Vec<ObjectId> = f.nodes.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![b, c, a]);

    let again = Evaluator::eval_frame(&t, FrameIndex(0)).unwrap();
    assert_eq!(
        again.nodes.iter().map(|n| n.id).collect::<Vec<_>>(),
        ids,
        "evaluation is deterministic"
    );
}

#[test]
fn create_draws_progressively() {
    let mut s = stage();
    let id = s.stage(square(0.0));
    s.play([Animation::create(id).eased(crate::Ease::Linear)], 1.0)
        .unwrap();
    s.wait(1.0).unwrap();
    let t = s.finish().unwrap();

    let half = Evaluator::eval_frame(&t, FrameIndex(5)).unwrap();
    assert!((half.nodes[0].draw - 0.5).abs() < 1e-12);
    let done = Evaluator::eval_frame(&t, FrameIndex(15)).unwrap();
    assert_eq!(done.nodes[0].draw, 1.0);
}

#[test]
fn objects_outside_their_alive_range_are_absent() {
    let mut s = stage();
    let id = s.add(square(0.0));
    s.play([Animation::fade_out(id)], 1.0).unwrap();
    s.wait(1.0).unwrap();
    let t = s.finish().unwrap();
    assert!(Evaluator::eval_frame(&t, FrameIndex(12)).unwrap().nodes.is_empty());
}

#[test]
fn offset_and_scale_are_applied() {
    let mut s = stage();
    let id = s.add(square(0.0));
    s.play([Animation::shift(id, Vec2::new(2.0, 0.0))], 1.0)
        .unwrap();
    s.play([Animation::indicate(id).eased(crate::Ease::Linear)], 1.0)
        .unwrap();
    let t = s.finish().unwrap();

    let peak = Evaluator::eval_frame(&t, FrameIndex(15)).unwrap();
    let b = peak.nodes[0].visual.bounds();
    assert!((b.width() - 1.2).abs() < 1e-9);
    assert!((b.center().x - 2.5).abs() < 1e-9);
}

#[test]
fn mismatched_transform_cross_fades() {
    let mut s = stage();
    let id = s.add(square(0.0));
    let text = Visual::text("3/4", Point::new(0.0, 0.0), 48.0);
    s.play([Animation::transform(id, text).eased(crate::Ease::Linear)], 1.0)
        .unwrap();
    s.wait(0.5).unwrap();
    let t = s.finish().unwrap();

    let mid = Evaluator::eval_frame(&t, FrameIndex(5)).unwrap();
    assert_eq!(mid.nodes.len(), 2);
    let total: f64 = mid.nodes.iter().map(|n| n.opacity).sum();
    assert!((total - 1.0).abs() < 1e-12);

    let after = Evaluator::eval_frame(&t, FrameIndex(12)).unwrap();
    assert_eq!(after.nodes.len(), 1);
    assert!(after.nodes[0].visual.is_text());
}

#[test]
fn matching_transform_morphs_in_place() {
    let mut s = stage();
    let id = s.add(square(0.0));
    s.play([Animation::transform(id, square(4.0)).eased(crate::Ease::Linear)], 1.0)
        .unwrap();
    let t = s.finish().unwrap();
    let mid = Evaluator::eval_frame(&t, FrameIndex(5)).unwrap();
    assert_eq!(mid.nodes.len(), 1);
    assert!((mid.nodes[0].visual.bounds().x0 - 2.0).abs() < 1e-12);
}
