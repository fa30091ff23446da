use kurbo::Point;

use crate::{
    animation::action::Animation,
    foundation::error::{TiceError, TiceResult},
    lesson::{
        config::{LessonContent, LessonStyle, StyleConfig, with_overrides},
        locale::{Bilingual, Locale},
    },
    scene::{layout::BANNER_POINT, visual::Visual},
    stage::{builder::Stage, settings::StageSettings, timeline::Timeline},
};

/// Body of one lesson step. Steps may keep state on the lesson for later steps.
pub type StepFn<L> = Box<dyn Fn(&mut L, &mut Stage) -> TiceResult<()>>;

/// A named unit of a lesson, run exactly once in list order.
pub struct Step<L> {
    pub name: &'static str,
    pub run: StepFn<L>,
}

impl<L> Step<L> {
    pub fn new(
        name: &'static str,
        run: impl Fn(&mut L, &mut Stage) -> TiceResult<()> + 'static,
    ) -> Self {
        Self {
            name,
            run: Box::new(run),
        }
    }
}

impl<L> std::fmt::Debug for Step<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step").field("name", &self.name).finish()
    }
}

/// A lesson scene: an ordered list of steps over a shared [`Stage`], with a title shown first,
/// a pause after every step, and the title faded out at the end.
pub trait Lesson: Sized + 'static {
    type Style: LessonStyle + Default + serde::Serialize + serde::de::DeserializeOwned;
    type Config: LessonContent + Default + serde::Serialize + serde::de::DeserializeOwned;

    /// Catalog identifier, e.g. `m3-l15-perimeter`.
    const ID: &'static str;

    /// Build the lesson, rejecting invalid content.
    fn new(config: Self::Config, style: Self::Style) -> TiceResult<Self>;

    fn config(&self) -> &Self::Config;

    fn style(&self) -> &Self::Style;

    fn build_steps(&self) -> Vec<Step<Self>>;

    fn show_title(&self, stage: &mut Stage) -> TiceResult<()> {
        let s = self.style().base();
        let scale = s.font_size_title / s.font_size_main * 0.62;
        let title =
            caption(stage, s, &self.config().header().title, scale).moved_to(BANNER_POINT);
        let id = stage.stage(title);
        stage.play([Animation::write(id)], s.rt_norm)?;
        stage.set_title(Some(id));
        Ok(())
    }

    fn before_step(&self, _stage: &mut Stage, _name: &str) -> TiceResult<()> {
        Ok(())
    }

    fn after_step(&self, stage: &mut Stage, _name: &str) -> TiceResult<()> {
        stage.wait(self.style().base().pause)
    }

    fn cleanup(&self, stage: &mut Stage) -> TiceResult<()> {
        if let Some(title) = stage.title()
            && stage.is_visible(title)
        {
            stage.play([Animation::fade_out(title)], self.style().base().rt_fast)?;
        }
        stage.set_title(None);
        Ok(())
    }
}

/// Run `lesson` on `stage`: steps are built first, then title, steps with their hooks, cleanup.
#[tracing::instrument(skip_all, fields(lesson = L::ID))]
pub fn construct<L: Lesson>(lesson: &mut L, stage: &mut Stage) -> TiceResult<()> {
    let steps = lesson.build_steps();
    if steps.is_empty() {
        return Err(TiceError::lesson(format!("lesson '{}' has no steps", L::ID)));
    }

    lesson.show_title(stage)?;
    for step in &steps {
        tracing::debug!(step = step.name, at = stage.now().0, "step begin");
        stage.begin_step(step.name)?;
        lesson.before_step(stage, step.name)?;
        (step.run)(lesson, stage)
            .inspect_err(|e| tracing::error!(step = step.name, error = %e, "step failed"))?;
        lesson.after_step(stage, step.name)?;
        stage.end_step()?;
    }
    lesson.cleanup(stage)?;
    tracing::info!(steps = steps.len(), frames = stage.now().0, "lesson constructed");
    Ok(())
}

/// Text in the stage's language, `scale` times the main font size, centered at the origin.
pub fn caption(stage: &Stage, style: &StyleConfig, text: &Bilingual, scale: f64) -> Visual {
    Visual::text(stage.text(text), Point::ZERO, style.font_size_main * scale)
        .with_color(style.palette.text)
}

/// Replace the banner with `text`: transforms the current title, or writes a new one.
pub fn banner(stage: &mut Stage, style: &StyleConfig, text: &Bilingual) -> TiceResult<()> {
    let prompt = caption(stage, style, text, 0.56).moved_to(BANNER_POINT);
    match stage.title() {
        Some(id) if stage.is_visible(id) => {
            stage.play([Animation::transform(id, prompt)], style.rt_fast)
        }
        _ => {
            let id = stage.stage(prompt);
            stage.play([Animation::write(id)], style.rt_fast)?;
            stage.set_title(Some(id));
            Ok(())
        }
    }
}

/// Fade out everything on screen except the banner.
pub fn clear(stage: &mut Stage, style: &StyleConfig) -> TiceResult<()> {
    let title = stage.title();
    let ids: Vec<_> = stage
        .visible_ids()
        .into_iter()
        .filter(|id| Some(*id) != title)
        .collect();
    if ids.is_empty() {
        return Ok(());
    }
    stage.play([Animation::fade_out(ids)], style.rt_fast)
}

/// What a caller supplies to build one lesson's timeline.
#[derive(Clone, Debug, Default)]
pub struct LessonInputs {
    pub settings: StageSettings,
    /// Overrides the language of the lesson config when set.
    pub locale: Option<Locale>,
    /// Partial JSON object over the lesson's style defaults.
    pub style: Option<serde_json::Value>,
    /// Partial JSON object over the lesson's content defaults.
    pub config: Option<serde_json::Value>,
}

/// Build lesson `L` from defaults plus `inputs` overrides, run it on a fresh stage, and return
/// the finished timeline.
#[tracing::instrument(skip(inputs), fields(lesson = L::ID))]
pub fn build_timeline<L: Lesson>(inputs: &LessonInputs) -> TiceResult<Timeline> {
    let style: L::Style = with_overrides(inputs.style.clone())?;
    let config: L::Config = with_overrides(inputs.config.clone())?;
    style.validate()?;
    config.validate()?;

    let locale = inputs.locale.unwrap_or(config.header().language);
    let mut lesson = L::new(config, style)?;
    let mut stage = Stage::new(inputs.settings, locale)?;
    construct(&mut lesson, &mut stage)?;
    stage.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/lesson/orchestrator.rs"]
mod tests;
