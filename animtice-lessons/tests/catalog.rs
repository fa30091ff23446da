use animtice::{
    Canvas, Fps, Lesson, LessonInputs, Rgba8, StageSettings, Timeline, build_timeline,
    render_frame_svg,
};
use animtice_lessons::{
    AddingLesson, ChangeLesson, EquivalentLesson, FractionsLesson, LinesLesson, MeterLesson,
    ModelingLesson, PartValueLesson, PerimeterLesson, PlaceValueLesson, SegmentationLesson,
    ShapesLesson, SharingLesson, WholeLesson, catalog, find,
};

fn small() -> LessonInputs {
    LessonInputs {
        settings: StageSettings {
            fps: Fps::new(10, 1).unwrap(),
            canvas: Canvas {
                width: 160,
                height: 90,
            },
            background: Rgba8::BLACK,
        },
        ..LessonInputs::default()
    }
}

/// Builds `L` with defaults and checks the recorded markers against its step list.
fn builds_in_step_order<L: Lesson>() -> Timeline {
    let lesson = L::new(L::Config::default(), L::Style::default()).unwrap();
    let expected: Vec<&str> = lesson.build_steps().iter().map(|s| s.name).collect();

    let t = build_timeline::<L>(&small()).unwrap();
    let got: Vec<&str> = t.markers.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(got, expected, "{}", L::ID);
    assert!(!t.objects.is_empty(), "{}", L::ID);
    for w in t.markers.windows(2) {
        assert!(w[0].range.end.0 <= w[1].range.start.0, "{}", L::ID);
    }
    t
}

#[test]
fn every_lesson_builds_in_step_order() {
    builds_in_step_order::<PlaceValueLesson>();
    builds_in_step_order::<FractionsLesson>();
    builds_in_step_order::<EquivalentLesson>();
    builds_in_step_order::<AddingLesson>();
    builds_in_step_order::<MeterLesson>();
    builds_in_step_order::<PerimeterLesson>();
    builds_in_step_order::<SharingLesson>();
    builds_in_step_order::<ModelingLesson>();
    builds_in_step_order::<WholeLesson>();
    builds_in_step_order::<PartValueLesson>();
    builds_in_step_order::<ChangeLesson>();
    builds_in_step_order::<SegmentationLesson>();
    builds_in_step_order::<LinesLesson>();
    builds_in_step_order::<ShapesLesson>();
}

#[test]
fn catalog_ids_are_unique_and_findable() {
    let entries = catalog();
    assert_eq!(entries.len(), 14);
    for e in &entries {
        assert_eq!(find(e.id).map(|f| f.id), Some(e.id));
        assert!(!(e.title)().en.is_empty());
    }
    let mut ids: Vec<&str> = entries.iter().map(|e| e.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 14);
    assert!(find("m3-l99-unknown").is_none());
}

#[test]
fn catalog_builds_through_its_entries() {
    let entry = find("m3-l15-perimeter").unwrap();
    let t = (entry.build)(&small()).unwrap();
    assert!(t.step("mini_assessment").is_some());
}

#[test]
fn place_value_rejects_a_thousand() {
    let mut inputs = small();
    inputs.config = Some(serde_json::json!({ "examples": [275, 1000] }));
    let err = build_timeline::<PlaceValueLesson>(&inputs).unwrap_err();
    assert!(err.to_string().contains("1000"), "{err}");
}

#[test]
fn modeling_rejects_a_wrong_stated_answer() {
    let mut inputs = small();
    inputs.config = Some(serde_json::json!({
        "assessment": {
            "text": { "en": "13 and 8: how much longer?" },
            "model": { "kind": "difference", "larger": 13, "smaller": 8 },
            "answer": 6
        }
    }));
    assert!(build_timeline::<ModelingLesson>(&inputs).is_err());
}

#[test]
fn arabic_locale_changes_the_text_only() {
    let en = build_timeline::<SharingLesson>(&small()).unwrap();
    let mut inputs = small();
    inputs.locale = Some(animtice::Locale::Ar);
    let ar = build_timeline::<SharingLesson>(&inputs).unwrap();
    assert_eq!(en.duration, ar.duration);
    assert_eq!(en.objects.len(), ar.objects.len());
    assert_ne!(en.objects[0].visual, ar.objects[0].visual);
}

#[test]
fn step_frames_serialize_to_svg() {
    let t = builds_in_step_order::<FractionsLesson>();
    let f = t.step_frame("institutionalization_fraction_notation").unwrap();
    let svg = render_frame_svg(&t, f).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="160""#));
}
