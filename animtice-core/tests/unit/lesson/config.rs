use super::*;
use serde_json::json;

#[test]
fn defaults_follow_the_pacing_table() {
    let s = StyleConfig::default();
    assert_eq!((s.pause, s.rt_fast, s.rt_norm, s.rt_slow), (0.45, 0.7, 1.0, 1.25));
    assert!(s.validate().is_ok());
}

#[test]
fn partial_overrides_keep_other_defaults() {
    let s: StyleConfig =
        with_overrides(Some(json!({ "pause": 1.5, "palette": { "accent": "#ff0000" } }))).unwrap();
    assert_eq!(s.pause, 1.5);
    assert_eq!(s.rt_norm, 1.0);
    assert_eq!(s.palette.accent, Rgba8::rgb(255, 0, 0));
    assert_eq!(s.palette.text, Rgba8::WHITE);
}

#[test]
fn non_object_overrides_are_rejected() {
    assert!(with_overrides::<StyleConfig>(Some(json!([1, 2]))).is_err());
    assert!(with_overrides::<StyleConfig>(Some(json!({ "pause": "slow" }))).is_err());
}

#[test]
fn negative_times_are_invalid() {
    let s = StyleConfig {
        rt_fast: -0.1,
        ..StyleConfig::default()
    };
    assert!(s.validate().is_err());
    let s = StyleConfig {
        fill_opacity: 1.5,
        ..StyleConfig::default()
    };
    assert!(s.validate().is_err());
}

#[test]
fn huge_or_nan_times_are_invalid() {
    for pause in [1e300, f64::INFINITY, f64::NAN, MAX_STYLE_SECS + 1.0] {
        let s = StyleConfig {
            pause,
            ..StyleConfig::default()
        };
        assert!(s.validate().is_err(), "pause {pause} accepted");
    }
    let s = StyleConfig {
        rt_slow: MAX_STYLE_SECS,
        ..StyleConfig::default()
    };
    assert!(s.validate().is_ok());
}

#[test]
fn merge_replaces_arrays_whole() {
    let mut base = json!({ "a": [1, 2, 3], "b": { "c": 1, "d": 2 } });
    merge_json(&mut base, json!({ "a": [9], "b": { "d": 5 } }));
    assert_eq!(base, json!({ "a": [9], "b": { "c": 1, "d": 5 } }));
}

#[test]
fn lesson_config_reads_language() {
    let c: LessonConfig =
        serde_json::from_value(json!({ "title": { "en": "Lines" }, "language": "ar" })).unwrap();
    assert_eq!(c.language, Locale::Ar);
    assert_eq!(c.title.pick(c.language), "Lines");
}
