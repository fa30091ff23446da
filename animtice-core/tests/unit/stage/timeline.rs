use super::*;
use crate::{Locale, Stage, StageSettings};
use kurbo::{Point, Rect};

fn sample_timeline() -> Timeline {
    let settings = StageSettings {
        fps: Fps { num: 10, den: 1 },
        canvas: Canvas {
            width: 160,
            height: 90,
        },
        background: Rgba8::BLACK,
    };
    let mut s = Stage::new(settings, Locale::En).unwrap();
    s.begin_step("show").unwrap();
    s.add(Visual::rect(Rect::new(0.0, 0.0, 1.0, 1.0)));
    s.add(Visual::text("hi", Point::ZERO, 32.0));
    s.wait(2.0).unwrap();
    s.end_step().unwrap();
    s.finish().unwrap()
}

#[test]
fn json_round_trip_preserves_the_timeline() {
    let t = sample_timeline();
    let json = t.to_json_pretty().unwrap();
    assert_eq!(Timeline::from_json(&json).unwrap(), t);
}

#[test]
fn seconds_map_to_clamped_frames() {
    let t = sample_timeline();
    assert_eq!(t.frame_at_secs(0.55), FrameIndex(5));
    assert_eq!(t.frame_at_secs(100.0), FrameIndex(19));
    assert_eq!(t.frame_at_secs(-3.0), FrameIndex(0));
    assert_eq!(t.duration_secs(), 2.0);
}

#[test]
fn step_frame_is_last_frame_of_step() {
    let t = sample_timeline();
    assert_eq!(t.step_frame("show"), Some(FrameIndex(19)));
    assert_eq!(t.step_frame("missing"), None);
}

#[test]
fn alive_range_past_duration_is_invalid() {
    let mut t = sample_timeline();
    t.objects[0].alive.end = FrameIndex(99);
    assert!(t.validate().is_err());
}

#[test]
fn misnumbered_objects_are_invalid() {
    let mut t = sample_timeline();
    t.objects.swap(0, 1);
    assert!(t.validate().is_err());
}
