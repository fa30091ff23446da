use crate::{
    foundation::{
        core::Rgba8,
        error::{TiceError, TiceResult},
    },
    lesson::locale::{Bilingual, Locale},
};

/// Colors shared by every lesson.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    pub text: Rgba8,
    pub shape: Rgba8,
    pub accent: Rgba8,
    pub highlight: Rgba8,
    pub positive: Rgba8,
    pub negative: Rgba8,
    pub muted: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: Rgba8::WHITE,
            shape: Rgba8::BLUE,
            accent: Rgba8::TEAL,
            highlight: Rgba8::YELLOW,
            positive: Rgba8::GREEN,
            negative: Rgba8::RED,
            muted: Rgba8::GRAY,
        }
    }
}

/// Longest pause or run time a style may ask for, in seconds.
pub const MAX_STYLE_SECS: f64 = 60.0;

/// Display parameters common to all lessons. Times are in seconds, font sizes in points.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub stroke_width: f64,
    pub fill_opacity: f64,
    pub font_size_title: f64,
    pub font_size_main: f64,
    pub font_size_small: f64,
    /// Wait after every step.
    pub pause: f64,
    pub rt_fast: f64,
    pub rt_norm: f64,
    pub rt_slow: f64,
    pub palette: Palette,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke_width: 4.0,
            fill_opacity: 0.10,
            font_size_title: 38.0,
            font_size_main: 34.0,
            font_size_small: 28.0,
            pause: 0.45,
            rt_fast: 0.7,
            rt_norm: 1.0,
            rt_slow: 1.25,
            palette: Palette::default(),
        }
    }
}

impl StyleConfig {
    pub fn validate(&self) -> TiceResult<()> {
        for (name, v) in [
            ("stroke_width", self.stroke_width),
            ("font_size_title", self.font_size_title),
            ("font_size_main", self.font_size_main),
            ("font_size_small", self.font_size_small),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(TiceError::validation(format!("style {name} must be > 0")));
            }
        }
        for (name, v) in [
            ("pause", self.pause),
            ("rt_fast", self.rt_fast),
            ("rt_norm", self.rt_norm),
            ("rt_slow", self.rt_slow),
        ] {
            if !(0.0..=MAX_STYLE_SECS).contains(&v) {
                return Err(TiceError::validation(format!(
                    "style {name} must be in [0, {MAX_STYLE_SECS}] seconds"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.fill_opacity) {
            return Err(TiceError::validation("style fill_opacity must be in [0, 1]"));
        }
        Ok(())
    }
}

/// Content shared by every lesson: its title and default language.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LessonConfig {
    pub title: Bilingual,
    pub language: Locale,
}

impl LessonConfig {
    pub fn new(title: Bilingual) -> Self {
        Self {
            title,
            language: Locale::En,
        }
    }
}

/// A lesson's style record: the shared [`StyleConfig`] plus lesson-specific toggles.
pub trait LessonStyle {
    fn base(&self) -> &StyleConfig;

    fn validate(&self) -> TiceResult<()> {
        self.base().validate()
    }
}

/// A lesson's content record: the shared [`LessonConfig`] plus lesson data.
pub trait LessonContent {
    fn header(&self) -> &LessonConfig;

    /// Content invariants (positive counts, ranges, consistent answers).
    fn validate(&self) -> TiceResult<()> {
        Ok(())
    }
}

impl LessonStyle for StyleConfig {
    fn base(&self) -> &StyleConfig {
        self
    }
}

impl LessonContent for LessonConfig {
    fn header(&self) -> &LessonConfig {
        self
    }
}

/// Deep-merge `patch` into `base`: objects merge key by key, anything else replaces.
pub fn merge_json(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(b), serde_json::Value::Object(p)) => {
            for (k, v) in p {
                match b.get_mut(&k) {
                    Some(slot) => merge_json(slot, v),
                    None => {
                        b.insert(k, v);
                    }
                }
            }
        }
        (b, p) => *b = p,
    }
}

/// `T::default()` with the fields present in `patch` overridden.
pub fn with_overrides<T>(patch: Option<serde_json::Value>) -> TiceResult<T>
where
    T: Default + serde::Serialize + serde::de::DeserializeOwned,
{
    let Some(patch) = patch else {
        return Ok(T::default());
    };
    if !patch.is_object() {
        return Err(TiceError::validation("config overrides must be a JSON object"));
    }
    let mut base = serde_json::to_value(T::default())?;
    merge_json(&mut base, patch);
    Ok(serde_json::from_value(base)?)
}

#[cfg(test)]
#[path = "../../tests/unit/lesson/config.rs"]
mod tests;
