use std::cell::RefCell;

use super::*;
use crate::{
    foundation::core::FrameIndex,
    lesson::config::LessonConfig,
};

#[derive(Default)]
struct Recorder {
    config: LessonConfig,
    style: StyleConfig,
    log: RefCell<Vec<String>>,
    fail_at: Option<&'static str>,
    no_steps: bool,
}

impl Recorder {
    fn step(name: &'static str) -> Step<Self> {
        Step::new(name, move |l: &mut Recorder, stage: &mut Stage| {
            l.log.borrow_mut().push(name.to_owned());
            if l.fail_at == Some(name) {
                return Err(TiceError::validation("boom"));
            }
            stage.wait(0.5)
        })
    }
}

impl Lesson for Recorder {
    type Style = StyleConfig;
    type Config = LessonConfig;
    const ID: &'static str = "test-recorder";

    fn new(config: LessonConfig, style: StyleConfig) -> TiceResult<Self> {
        Ok(Self {
            config,
            style,
            ..Self::default()
        })
    }

    fn config(&self) -> &LessonConfig {
        &self.config
    }

    fn style(&self) -> &StyleConfig {
        &self.style
    }

    fn build_steps(&self) -> Vec<Step<Self>> {
        self.log.borrow_mut().push("build".to_owned());
        if self.no_steps {
            return Vec::new();
        }
        vec![Self::step("A"), Self::step("B"), Self::step("C")]
    }

    fn before_step(&self, _stage: &mut Stage, name: &str) -> TiceResult<()> {
        self.log.borrow_mut().push(format!("before {name}"));
        Ok(())
    }
}

fn stage() -> Stage {
    Stage::new(StageSettings::default(), Locale::En).unwrap()
}

#[test]
fn steps_run_once_in_order_after_build() {
    let mut lesson = Recorder::default();
    let mut s = stage();
    construct(&mut lesson, &mut s).unwrap();
    assert_eq!(
        *lesson.log.borrow(),
        ["build", "before A", "A", "before B", "B", "before C", "C"]
    );
    let names: Vec<&str> = s.markers().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);
}

#[test]
fn every_step_is_followed_by_the_pause() {
    let mut lesson = Recorder::default();
    let mut s = stage();
    construct(&mut lesson, &mut s).unwrap();
    // 0.5 s of step work + 0.45 s pause at 30 fps = 15 + 14 frames (13.5 rounds to 14).
    for m in s.markers() {
        assert_eq!(m.range.len_frames(), 29, "{}", m.name);
    }
    // Title write (30 frames) comes before the first step.
    assert_eq!(s.markers()[0].range.start, FrameIndex(30));
}

#[test]
fn title_is_faded_out_by_cleanup() {
    let mut lesson = Recorder::default();
    let mut s = stage();
    construct(&mut lesson, &mut s).unwrap();
    assert!(s.title().is_none());
    assert!(s.visible_ids().is_empty());
}

#[test]
fn empty_lessons_are_rejected() {
    let mut lesson = Recorder {
        no_steps: true,
        ..Recorder::default()
    };
    let err = construct(&mut lesson, &mut stage()).unwrap_err();
    assert!(matches!(err, TiceError::Lesson(_)));
}

#[test]
fn a_failing_step_aborts_the_rest() {
    let mut lesson = Recorder {
        fail_at: Some("B"),
        ..Recorder::default()
    };
    let err = construct(&mut lesson, &mut stage()).unwrap_err();
    assert!(matches!(err, TiceError::Validation(_)), "{err:?}");
    assert_eq!(*lesson.log.borrow(), ["build", "before A", "A", "before B", "B"]);
}

#[test]
fn banner_transforms_the_visible_title() {
    let lesson = Recorder::default();
    let mut s = stage();
    lesson.show_title(&mut s).unwrap();
    let title = s.title().unwrap();
    banner(&mut s, &lesson.style, &Bilingual::en_only("Next")).unwrap();
    assert_eq!(s.title(), Some(title));
    assert!(s.visual(title).unwrap().is_text());
}

#[test]
fn clear_keeps_the_banner() {
    let lesson = Recorder::default();
    let mut s = stage();
    lesson.show_title(&mut s).unwrap();
    s.add(Visual::dot(Point::ZERO, 0.1));
    clear(&mut s, &lesson.style).unwrap();
    assert_eq!(s.visible_ids(), vec![s.title().unwrap()]);
}

#[test]
fn build_timeline_applies_overrides_and_locale() {
    let inputs = LessonInputs {
        locale: Some(Locale::Ar),
        style: Some(serde_json::json!({ "pause": 0.0 })),
        config: Some(serde_json::json!({ "title": { "en": "T", "ar": "ع" } })),
        ..LessonInputs::default()
    };
    let t = build_timeline::<Recorder>(&inputs).unwrap();
    assert_eq!(t.markers.len(), 3);
    assert_eq!(t.markers[0].range.len_frames(), 15);

    let bad = LessonInputs {
        style: Some(serde_json::json!({ "rt_norm": -1.0 })),
        ..LessonInputs::default()
    };
    assert!(matches!(
        build_timeline::<Recorder>(&bad),
        Err(TiceError::Validation(_))
    ));
}

#[test]
fn enormous_pause_is_an_error_not_a_panic() {
    let inputs = LessonInputs {
        style: Some(serde_json::json!({ "pause": 1e300 })),
        ..LessonInputs::default()
    };
    assert!(matches!(
        build_timeline::<Recorder>(&inputs),
        Err(TiceError::Validation(_))
    ));
}
