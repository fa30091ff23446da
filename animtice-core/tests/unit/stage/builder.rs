use super::*;
use crate::foundation::core::{Canvas, Rgba8};
use kurbo::Rect;

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

fn square() -> Visual {
    Visual::rect(Rect::new(0.0, 0.0, 1.0, 1.0))
}

#[test]
fn play_advances_by_rounded_frames() {
    let mut s = stage();
    let id = s.stage(square());
    s.play([Animation::create(id)], 1.04).unwrap();
    assert_eq!(s.now(), FrameIndex(10));
    s.play([Animation::indicate(id)], 0.0).unwrap();
    assert_eq!(s.now(), FrameIndex(11), "zero run time still lasts one frame");
    s.wait(0.0).unwrap();
    assert_eq!(s.now(), FrameIndex(11));
    s.wait(0.5).unwrap();
    assert_eq!(s.now(), FrameIndex(16));
}

#[test]
fn negative_or_nan_times_are_rejected() {
    let mut s = stage();
    let id = s.add(square());
    assert!(s.play([Animation::indicate(id)], -1.0).is_err());
    assert!(s.play([Animation::indicate(id)], f64::NAN).is_err());
    assert!(s.wait(-0.1).is_err());
    assert_eq!(s.now(), FrameIndex(0));
}

#[test]
fn unknown_and_removed_ids_are_rejected() {
    let mut s = stage();
    assert!(s.play([Animation::create(ObjectId(7))], 1.0).is_err());

    let id = s.add(square());
    s.play([Animation::fade_out(id)], 1.0).unwrap();
    let err = s.play([Animation::indicate(id)], 1.0).unwrap_err();
    assert!(err.to_string().contains("removed"));
    assert!(s.remove(id).is_err());
}

#[test]
fn failed_play_records_nothing() {
    let mut s = stage();
    let a = s.stage(square());
    let r = s.play([Animation::create(a), Animation::create(ObjectId(9))], 1.0);
    assert!(r.is_err());
    assert_eq!(s.now(), FrameIndex(0));
    assert!(!s.is_visible(a));
}

#[test]
fn play_failing_midway_restores_touched_objects() {
    let mut s = stage();
    let a = s.stage(square());
    let r = s.play(
        [Animation::create(a), Animation::indicate(a), Animation::indicate(a)],
        1.0,
    );
    assert!(r.is_err());
    assert_eq!(s.now(), FrameIndex(0));
    assert!(!s.is_visible(a));
    s.play([Animation::fade_in(a)], 1.0).unwrap();
    let t = s.finish().unwrap();
    let track = &t.objects[0];
    assert!(track.draw.keys.is_empty());
    assert!(track.scale.keys.is_empty());
    assert_eq!(track.alive.start, FrameIndex(0));
}

#[test]
fn shifted_entrance_composes_with_shift() {
    let mut s = stage();
    let a = s.stage(square());
    s.play(
        [
            Animation::fade_in_shifted(a, Vec2::new(0.0, 1.0)),
            Animation::shift(a, Vec2::new(1.0, 0.0)),
        ],
        1.0,
    )
    .unwrap();
    assert!(s.is_visible(a));
    let t = s.finish().unwrap();
    let offset = &t.objects[0].offset;
    assert_eq!(offset.sample(FrameIndex(0)), Vec2::new(0.0, -1.0));
    assert_eq!(offset.sample(FrameIndex(10)), Vec2::new(1.0, 0.0));
}

#[test]
fn playhead_overflow_is_an_error() {
    let mut s = stage();
    let id = s.add(square());
    assert!(s.wait(1e300).is_err());
    s.wait(1e18).unwrap();
    assert_eq!(s.now(), FrameIndex(10_000_000_000_000_000_000));
    assert!(s.wait(1e18).is_err());
    assert!(s.play([Animation::indicate(id)], 1e18).is_err());
    assert_eq!(s.now(), FrameIndex(10_000_000_000_000_000_000));
}

#[test]
fn fade_out_ends_the_alive_range() {
    let mut s = stage();
    let id = s.add(square());
    s.wait(1.0).unwrap();
    s.play([Animation::fade_out(id)], 0.5).unwrap();
    s.wait(1.0).unwrap();
    let t = s.finish().unwrap();
    let track = &t.objects[0];
    assert_eq!(track.alive.start, FrameIndex(0));
    assert_eq!(track.alive.end, FrameIndex(15));
    assert_eq!(track.opacity.sample(FrameIndex(10)), 1.0);
    assert_eq!(track.opacity.sample(FrameIndex(15)), 0.0);
    assert_eq!(t.duration, FrameIndex(25));
}

#[test]
fn staged_objects_appear_with_their_entrance() {
    let mut s = stage();
    let id = s.stage(square());
    assert!(!s.is_visible(id));
    s.wait(1.0).unwrap();
    s.play([Animation::fade_in(id)], 1.0).unwrap();
    assert!(s.is_visible(id));
    let t = s.finish().unwrap();
    assert_eq!(t.objects[0].alive.start, FrameIndex(10));
    assert_eq!(t.objects[0].alive.end, FrameIndex(20));
}

#[test]
fn never_shown_objects_have_empty_ranges() {
    let mut s = stage();
    s.stage(square());
    s.wait(1.0).unwrap();
    let t = s.finish().unwrap();
    assert!(t.objects[0].alive.is_empty());
}

#[test]
fn shift_accumulates_offsets() {
    let mut s = stage();
    let id = s.add(square());
    s.play([Animation::shift(id, Vec2::new(1.0, 0.0))], 1.0).unwrap();
    s.play([Animation::shift(id, Vec2::new(0.0, 2.0))], 1.0).unwrap();
    assert_eq!(s.position(id).unwrap(), Point::new(1.5, 2.5));
}

#[test]
fn transform_replaces_the_current_visual_and_clears_offset() {
    let mut s = stage();
    let id = s.add(square());
    s.play([Animation::shift(id, Vec2::new(3.0, 0.0))], 1.0).unwrap();
    let target = Visual::rect(Rect::new(-2.0, -2.0, -1.0, -1.0));
    s.play([Animation::transform(id, target.clone())], 1.0).unwrap();
    assert_eq!(s.visual(id).unwrap(), &target);
    assert_eq!(s.position(id).unwrap(), Point::new(-1.5, -1.5));
    let t = s.finish().unwrap();
    assert_eq!(t.objects[0].shape_keys.len(), 1);
}

#[test]
fn transform_of_several_objects_is_rejected() {
    let mut s = stage();
    let a = s.add(square());
    let b = s.add(square());
    let mut anim = Animation::transform(a, square());
    anim.targets = Targets(vec![a, b]);
    assert!(s.play([anim], 1.0).is_err());
}

#[test]
fn move_along_ends_on_the_last_point() {
    let mut s = stage();
    let id = s.add(Visual::dot(Point::ZERO, 0.1));
    let pts = vec![Point::new(4.0, 0.0), Point::new(4.0, 3.0)];
    s.play([Animation::move_along(id, pts)], 0.7).unwrap();
    let p = s.position(id).unwrap();
    assert!((p.x - 4.0).abs() < 1e-9 && (p.y - 3.0).abs() < 1e-9);

    let t = s.finish().unwrap();
    let mid = t.objects[0].offset.sample(FrameIndex(4));
    assert!((mid.x - 4.0).abs() < 1e-9 && mid.y.abs() < 1e-9, "{mid:?}");
}

#[test]
fn steps_are_recorded_in_order() {
    let mut s = stage();
    s.begin_step("intro").unwrap();
    s.wait(1.0).unwrap();
    assert!(s.begin_step("nested").is_err());
    s.end_step().unwrap();
    s.begin_step("outro").unwrap();
    s.wait(0.5).unwrap();
    let t = s.finish().unwrap();
    let names: Vec<&str> = t.markers.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["intro", "outro"]);
    assert_eq!(t.markers[1].range.start, FrameIndex(10));
    assert_eq!(t.markers[1].range.end, FrameIndex(15));
}

#[test]
fn empty_stage_still_has_one_frame() {
    let t = stage().finish().unwrap();
    assert_eq!(t.duration, FrameIndex(1));
}

#[test]
fn arabic_stage_picks_arabic_text() {
    let s = Stage::new(StageSettings::default(), Locale::Ar).unwrap();
    assert_eq!(s.text(&Bilingual::new("one", "واحد")), "واحد");
}
