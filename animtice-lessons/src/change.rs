//! `m3-l23-change-problems`: before → change → after.
//!
//! The three states are drawn as bars on their own rows. The unknown one carries a "?" until
//! the model has been linked to an operation.

use animtice::{
    Animation, Bilingual, Lesson, LessonConfig, LessonContent, LessonStyle, ObjectId, Point, Rect,
    Span, Stage, Step, StyleConfig, TiceError, TiceResult, Vec2, Visual, banner, clear,
};

use crate::common::{BOTTOM_Y, math, recap, scaffold_card, subtitle, surround, text_at};

/// Bars may not reach past this x.
const MAX_BAR_RIGHT: f64 = 6.6;
const MIN_BAR_WIDTH: f64 = 0.9;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChangeStyle {
    #[serde(flatten)]
    pub base: StyleConfig,
    pub unit_width: f64,
    pub bar_height: f64,
    pub change_opacity: f64,
    pub left_anchor_x: f64,
    pub before_y: f64,
    pub change_y: f64,
    pub after_y: f64,
    pub timeline_y: f64,
    pub timeline_width: f64,
    pub show_problem_text: bool,
    pub show_timeline: bool,
    pub show_model_to_operation: bool,
    pub show_context_answer: bool,
    pub show_verify: bool,
}

impl Default for ChangeStyle {
    fn default() -> Self {
        Self {
            base: StyleConfig {
                fill_opacity: 0.18,
                ..StyleConfig::default()
            },
            unit_width: 0.5,
            bar_height: 0.5,
            change_opacity: 0.25,
            left_anchor_x: -5.2,
            before_y: 0.9,
            change_y: 0.0,
            after_y: -0.9,
            timeline_y: -1.8,
            timeline_width: 10.8,
            show_problem_text: true,
            show_timeline: true,
            show_model_to_operation: true,
            show_context_answer: true,
            show_verify: true,
        }
    }
}

impl LessonStyle for ChangeStyle {
    fn base(&self) -> &StyleConfig {
        &self.base
    }

    fn validate(&self) -> TiceResult<()> {
        self.base.validate()?;
        for (name, v) in [
            ("unit_width", self.unit_width),
            ("bar_height", self.bar_height),
            ("timeline_width", self.timeline_width),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(TiceError::validation(format!("{name} must be > 0")));
            }
        }
        if !(0.0..=1.0).contains(&self.change_opacity) {
            return Err(TiceError::validation("change_opacity must be in [0, 1]"));
        }
        let rows = [
            self.left_anchor_x,
            self.before_y,
            self.change_y,
            self.after_y,
            self.timeline_y,
        ];
        if !rows.iter().all(|v| v.is_finite()) {
            return Err(TiceError::validation("layout positions must be finite"));
        }
        Ok(())
    }
}

impl ChangeStyle {
    fn span(&self, value: u32) -> Span {
        Span {
            start: self.left_anchor_x,
            width: (f64::from(value) * self.unit_width).max(MIN_BAR_WIDTH),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Something is gained: `after = before + change`.
    Increase,
    /// Something is lost: `after = before - change`.
    Decrease,
}

/// Which state is unknown, with the two that are given.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "unknown", rename_all = "snake_case")]
pub enum Situation {
    After { before: u32, change: u32 },
    Before { change: u32, after: u32 },
    Change { before: u32, after: u32 },
}

/// All three states of a solved change problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct States {
    pub before: u32,
    pub change: u32,
    pub after: u32,
}

impl Situation {
    /// Fill in the unknown state, or `None` when the givens do not fit `kind`. Every state must
    /// be at least one.
    pub fn solve(self, kind: ChangeKind) -> Option<States> {
        let positive = |x: u32| (x > 0).then_some(x);
        let (before, change, after) = match (self, kind) {
            (Self::After { before, change }, ChangeKind::Increase) => {
                (before, change, before.checked_add(change)?)
            }
            (Self::After { before, change }, ChangeKind::Decrease) => {
                (before, change, before.checked_sub(change)?)
            }
            (Self::Before { change, after }, ChangeKind::Increase) => {
                (after.checked_sub(change)?, change, after)
            }
            (Self::Before { change, after }, ChangeKind::Decrease) => {
                (after.checked_add(change)?, change, after)
            }
            (Self::Change { before, after }, ChangeKind::Increase) => {
                (before, after.checked_sub(before)?, after)
            }
            (Self::Change { before, after }, ChangeKind::Decrease) => {
                (before, before.checked_sub(after)?, after)
            }
        };
        Some(States {
            before: positive(before)?,
            change: positive(change)?,
            after: positive(after)?,
        })
    }

    pub fn unknown(self, states: States) -> u32 {
        match self {
            Self::After { .. } => states.after,
            Self::Before { .. } => states.before,
            Self::Change { .. } => states.change,
        }
    }

    /// The calculation that finds the unknown: `8 + 5 = 13`, `15 − 7 = 8`, `14 − 8 = 6`.
    pub fn operation(self, kind: ChangeKind, s: States) -> String {
        let gain = kind == ChangeKind::Increase;
        match self {
            Self::After { .. } => {
                let sign = if gain { "+" } else { "−" };
                format!("{} {sign} {} = {}", s.before, s.change, s.after)
            }
            Self::Before { .. } => {
                let sign = if gain { "−" } else { "+" };
                format!("{} {sign} {} = {}", s.after, s.change, s.before)
            }
            Self::Change { .. } if gain => format!("{} − {} = {}", s.after, s.before, s.change),
            Self::Change { .. } => format!("{} − {} = {}", s.before, s.after, s.change),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChangeProblem {
    pub question: Bilingual,
    pub kind: ChangeKind,
    #[serde(flatten)]
    pub situation: Situation,
    /// Plural name of what is counted.
    pub item: Bilingual,
    pub answer: u32,
}

impl ChangeProblem {
    pub fn states(&self) -> TiceResult<States> {
        self.situation.solve(self.kind).ok_or_else(|| {
            TiceError::validation(format!(
                "{:?} does not make a {:?} problem",
                self.situation, self.kind
            ))
        })
    }

    pub fn validate(&self) -> TiceResult<()> {
        let states = self.states()?;
        let unknown = self.situation.unknown(states);
        if unknown != self.answer {
            return Err(TiceError::validation(format!(
                "stated answer {} is wrong: {}",
                self.answer,
                self.situation.operation(self.kind, states)
            )));
        }
        Ok(())
    }

    /// "Answer: Now: 13 marbles", naming the unknown state.
    pub fn context_answer(&self) -> Bilingual {
        let (en, ar) = match self.situation {
            Situation::After { .. } => ("Now", "الآن"),
            Situation::Before { .. } => ("Before", "قبل"),
            Situation::Change { .. } => ("Change", "التحول"),
        };
        Bilingual {
            en: format!("Answer: {en}: {} {}", self.answer, self.item.en),
            ar: self
                .item
                .ar
                .as_ref()
                .map(|i| format!("الجواب: {ar}: {} {i}", self.answer)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChangePrompts {
    pub before: Bilingual,
    pub change: Bilingual,
    pub after: Bilingual,
    pub unknown: Bilingual,
    pub link: Bilingual,
}

impl Default for ChangePrompts {
    fn default() -> Self {
        Self {
            before: Bilingual::new(
                "Before: identify the initial state.",
                "قبل: نحدد الحالة الأولى.",
            ),
            change: Bilingual::new(
                "Change: what is added or removed?",
                "التحول: ماذا نضيف أو نحذف؟",
            ),
            after: Bilingual::new("After: identify the final state.", "بعد: نحدد الحالة النهائية."),
            unknown: Bilingual::new("Which part is unknown?", "ما الذي نبحث عنه؟"),
            link: Bilingual::new("Link the model to an operation.", "نربط النموذج بعملية حسابية."),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChangeConfig {
    #[serde(flatten)]
    pub header: LessonConfig,
    pub problems: Vec<ChangeProblem>,
    pub assessment: ChangeProblem,
    pub prompts: ChangePrompts,
}

impl Default for ChangeConfig {
    fn default() -> Self {
        Self {
            header: LessonConfig::new(Bilingual::new(
                "Solving change (transformation) problems",
                "حل مسائل البحث عن التحول",
            )),
            problems: vec![
                ChangeProblem {
                    question: Bilingual::new(
                        "Omar has 8 marbles. He finds 5 more. How many marbles does he have now?",
                        "لدى عمر 8 كريات. وجد 5 أخرى. كم كرية لديه الآن؟",
                    ),
                    kind: ChangeKind::Increase,
                    situation: Situation::After { before: 8, change: 5 },
                    item: Bilingual::new("marbles", "كريات"),
                    answer: 13,
                },
                ChangeProblem {
                    question: Bilingual::new(
                        "Lina has 14 stickers. She gives away 6. How many stickers does she have now?",
                        "لدى لينا 14 ملصقاً. أعطت 6. كم ملصقاً لديها الآن؟",
                    ),
                    kind: ChangeKind::Decrease,
                    situation: Situation::After { before: 14, change: 6 },
                    item: Bilingual::new("stickers", "ملصقات"),
                    answer: 8,
                },
                ChangeProblem {
                    question: Bilingual::new(
                        "Yassine has some coins. He receives 7 more and now has 15. How many did he have before?",
                        "لدى ياسين بعض القطع النقدية. أخذ 7 أخرى فصار لديه 15. كم كان لديه قبل؟",
                    ),
                    kind: ChangeKind::Increase,
                    situation: Situation::Before { change: 7, after: 15 },
                    item: Bilingual::new("coins", "قطع نقدية"),
                    answer: 8,
                },
            ],
            assessment: ChangeProblem {
                question: Bilingual::new(
                    "Salma had some pencils. She loses 4 and has 9 left. How many pencils did she have before?",
                    "كان لدى سلمى بعض الأقلام. أضاعت 4 وبقي لديها 9. كم قلماً كان لديها قبل؟",
                ),
                kind: ChangeKind::Decrease,
                situation: Situation::Before { change: 4, after: 9 },
                item: Bilingual::new("pencils", "أقلام"),
                answer: 13,
            },
            prompts: ChangePrompts::default(),
        }
    }
}

impl LessonContent for ChangeConfig {
    fn header(&self) -> &LessonConfig {
        &self.header
    }

    fn validate(&self) -> TiceResult<()> {
        if self.problems.is_empty() {
            return Err(TiceError::validation("at least one problem is needed"));
        }
        for (i, p) in self.problems.iter().enumerate() {
            p.validate()
                .map_err(|e| TiceError::validation(format!("problem {}: {e}", i + 1)))?;
        }
        self.assessment
            .validate()
            .map_err(|e| TiceError::validation(format!("assessment: {e}")))
    }
}

/// Ids of one drawn state bar.
#[derive(Clone, Copy)]
struct StateBar {
    rect: ObjectId,
    value: ObjectId,
    label: ObjectId,
}

#[derive(Debug)]
pub struct ChangeLesson {
    config: ChangeConfig,
    style: ChangeStyle,
}

impl Lesson for ChangeLesson {
    type Style = ChangeStyle;
    type Config = ChangeConfig;

    const ID: &'static str = "m3-l23-change-problems";

    fn new(config: ChangeConfig, style: ChangeStyle) -> TiceResult<Self> {
        config.validate()?;
        style.validate()?;
        for p in config.problems.iter().chain([&config.assessment]) {
            let s = p.states()?;
            let largest = s.before.max(s.after);
            if style.span(largest).end() > MAX_BAR_RIGHT {
                return Err(TiceError::validation(format!(
                    "a bar of {largest} units does not fit at unit_width {}",
                    style.unit_width
                )));
            }
        }
        Ok(Self { config, style })
    }

    fn config(&self) -> &ChangeConfig {
        &self.config
    }

    fn style(&self) -> &ChangeStyle {
        &self.style
    }

    fn build_steps(&self) -> Vec<Step<Self>> {
        vec![
            Step::new("intro", Self::intro),
            Step::new("exploration", Self::exploration),
            Step::new("collective_discussion", Self::discussion),
            Step::new("institutionalization", Self::institutionalization),
            Step::new("mini_assessment", Self::mini_assessment),
            Step::new("outro", Self::outro),
        ]
    }
}

impl ChangeLesson {
    fn rect_visual(&self, r: Rect, opacity: f64) -> Visual {
        let s = &self.style.base;
        Visual::rounded_rect(r, 0.16)
            .with_stroke(s.palette.shape, s.stroke_width)
            .with_fill(s.palette.shape, opacity)
    }

    /// Draw a state bar on row `y`; `hidden` values show as "?".
    fn state_bar(
        &self,
        stage: &mut Stage,
        span: Span,
        y: f64,
        value: u32,
        hidden: bool,
        label: Bilingual,
        opacity: f64,
    ) -> TiceResult<StateBar> {
        let s = &self.style.base;
        let r = span.to_rect(y, self.style.bar_height);
        let shown = if hidden {
            math(s, "?", 0.6, r.center()).with_color(s.palette.highlight)
        } else {
            math(s, value.to_string(), 0.5, r.center())
        };
        let label = text_at(stage, s, &label, 0.38, Point::new(r.x1 + 1.4, y));
        let ids = stage.stage_all([self.rect_visual(r, opacity), shown, label]);
        stage.play([Animation::create(ids.clone())], s.rt_norm)?;
        Ok(StateBar {
            rect: ids[0],
            value: ids[1],
            label: ids[2],
        })
    }

    fn timeline(&self, stage: &mut Stage) -> TiceResult<Vec<ObjectId>> {
        let s = &self.style.base;
        let st = &self.style;
        let half = st.timeline_width / 2.0;
        let (l, r) = (Point::new(-half, st.timeline_y), Point::new(half, st.timeline_y));
        let head = [
            Point::new(half - 0.25, st.timeline_y + 0.15),
            r,
            Point::new(half - 0.25, st.timeline_y - 0.15),
        ];
        let mut visuals = vec![
            Visual::line(l, r).with_stroke(s.palette.muted, s.stroke_width),
            Visual::polyline(&head).with_stroke(s.palette.muted, s.stroke_width),
        ];
        for (x, word) in [
            (-half + 0.6, Bilingual::new("before", "قبل")),
            (half - 0.6, Bilingual::new("after", "بعد")),
        ] {
            visuals.push(text_at(stage, s, &word, 0.38, Point::new(x, st.timeline_y + 0.3)));
        }
        let ids = stage.stage_all(visuals);
        stage.play([Animation::fade_in_shifted(ids.clone(), Vec2::new(0.0, -0.05))], s.rt_fast)?;
        Ok(ids)
    }

    /// Model one change problem and link it to its operation. Returns everything drawn.
    fn model(&self, stage: &mut Stage, problem: &ChangeProblem) -> TiceResult<Vec<ObjectId>> {
        let s = &self.style.base;
        let st = &self.style;
        let p = &self.config.prompts;
        let states = problem.states()?;
        let situation = problem.situation;
        let gain = problem.kind == ChangeKind::Increase;
        tracing::debug!(?situation, kind = ?problem.kind, answer = problem.answer, "modeling a change");
        let mut shown = Vec::new();

        if st.show_problem_text {
            let text = text_at(stage, s, &problem.question, 0.4, Point::new(0.0, 2.4));
            let text = stage.stage(text);
            stage.play([Animation::fade_in_shifted(text, Vec2::new(0.0, -0.1))], s.rt_norm)?;
            shown.push(text);
        }
        if st.show_timeline {
            shown.extend(self.timeline(stage)?);
        }

        let item = |word: &str, ar_word: &str, value: Option<u32>| {
            let v = value.map_or("?".to_string(), |v| v.to_string());
            Bilingual {
                en: format!("{word}: {v} {}", problem.item.en),
                ar: problem.item.ar.as_ref().map(|i| format!("{ar_word}: {v} {i}")),
            }
        };
        let known = |hidden: bool, v: u32| (!hidden).then_some(v);
        let hide_before = matches!(situation, Situation::Before { .. });
        let hide_change = matches!(situation, Situation::Change { .. });
        let hide_after = matches!(situation, Situation::After { .. });

        banner(stage, s, &p.before)?;
        let before_span = st.span(states.before);
        let before = self.state_bar(
            stage,
            before_span,
            st.before_y,
            states.before,
            hide_before,
            item("Before", "قبل", known(hide_before, states.before)),
            s.fill_opacity,
        )?;
        shown.extend([before.rect, before.value, before.label]);

        banner(stage, s, &p.change)?;
        let change_span = st.span(states.change);
        let sign = if gain { "+" } else { "−" };
        let v = known(hide_change, states.change).map_or("?".to_string(), |v| v.to_string());
        let change_label = Bilingual::new(
            format!("{sign} change: {v}"),
            format!("{sign} التحول: {v}"),
        );
        let change = self.state_bar(
            stage,
            change_span,
            st.change_y,
            states.change,
            hide_change,
            change_label,
            st.change_opacity,
        )?;
        shown.extend([change.rect, change.value]);

        banner(stage, s, &p.after)?;
        let after_span = st.span(states.after);
        let change_at = if gain {
            Span {
                start: after_span.start + before_span.width,
                width: change_span.width,
            }
        } else {
            Span {
                start: before_span.end() - change_span.width,
                width: change_span.width,
            }
        };
        let change_row = if gain { st.after_y } else { st.before_y };
        let moved = change_at.to_rect(change_row, st.bar_height);
        if gain {
            let copy = stage.add(self.rect_visual(before_span.to_rect(st.before_y, st.bar_height), 0.0));
            stage.play(
                [
                    Animation::transform(
                        copy,
                        self.rect_visual(before_span.to_rect(st.after_y, st.bar_height), 0.0),
                    ),
                    Animation::transform(change.rect, self.rect_visual(moved, st.change_opacity)),
                    Animation::fade_out(change.label),
                ],
                s.rt_norm,
            )?;
            stage.play([Animation::fade_out(copy)], s.rt_fast)?;
        }
        let after = self.state_bar(
            stage,
            after_span,
            st.after_y,
            states.after,
            hide_after,
            item("After", "بعد", known(hide_after, states.after)),
            s.fill_opacity,
        )?;
        shown.extend([after.rect, after.value, after.label]);
        if !gain {
            stage.play(
                [
                    Animation::transform(change.rect, self.rect_visual(moved, st.change_opacity)),
                    Animation::fade_out(change.label),
                ],
                s.rt_norm,
            )?;
            let cut = Visual::rect(moved)
                .without_stroke()
                .with_fill(s.palette.negative, 0.3);
            let cut = stage.stage(cut);
            stage.play([Animation::fade_in(cut)], s.rt_fast)?;
            stage.play([Animation::fade_out(cut)], s.rt_fast)?;
        }
        let change_value_at = moved.center();
        stage.play(
            [Animation::transform(
                change.value,
                if hide_change {
                    math(s, "?", 0.6, change_value_at).with_color(s.palette.highlight)
                } else {
                    math(s, states.change.to_string(), 0.5, change_value_at)
                },
            )],
            s.rt_fast,
        )?;

        banner(stage, s, &p.unknown)?;
        let (target, value_at) = match situation {
            Situation::Before { .. } => (before, before_span.to_rect(st.before_y, st.bar_height)),
            Situation::After { .. } => (after, after_span.to_rect(st.after_y, st.bar_height)),
            Situation::Change { .. } => (change, moved),
        };
        let glow = surround(s, value_at, 0.15).with_stroke(s.palette.highlight, 6.0);
        let glow = stage.stage(glow);
        stage.play([Animation::create(glow)], s.rt_fast)?;
        shown.push(glow);

        let at = Point::new(0.0, BOTTOM_Y + 0.2);
        let mut op = None;
        if st.show_model_to_operation {
            banner(stage, s, &p.link)?;
            let expr = math(s, situation.operation(problem.kind, states), 0.85, at);
            let expr = stage.stage(expr);
            stage.play([Animation::write(expr)], s.rt_norm)?;
            shown.push(expr);
            op = Some(expr);
        }
        stage.play(
            [Animation::transform(
                target.value,
                math(s, problem.answer.to_string(), 0.5, value_at.center())
                    .with_color(s.palette.positive),
            )],
            s.rt_fast,
        )?;
        if st.show_context_answer {
            let y = if op.is_some() { at.y + 0.6 } else { at.y };
            let answer = text_at(stage, s, &problem.context_answer(), 0.45, Point::new(0.0, y))
                .with_color(s.palette.positive);
            let answer = stage.stage(answer);
            stage.play([Animation::fade_in_shifted(answer, Vec2::new(0.0, -0.05))], s.rt_fast)?;
            shown.push(answer);
        }
        if st.show_verify && op.is_some() {
            let check = math(s, "✓", 0.8, Point::new(-2.6, at.y)).with_color(s.palette.positive);
            let check = stage.stage(check);
            stage.play([Animation::fade_in_shifted(check, Vec2::new(0.0, -0.05))], s.rt_fast)?;
            shown.push(check);
        }
        Ok(shown)
    }

    fn intro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        subtitle(
            stage,
            &self.style.base,
            &Bilingual::new(
                "Before → change → after: where is the unknown?",
                "قبل → التحول → بعد: أين المجهول؟",
            ),
        )
    }

    fn exploration(&mut self, stage: &mut Stage) -> TiceResult<()> {
        for problem in &self.config.problems {
            self.model(stage, problem)?;
            stage.wait(0.35)?;
            clear(stage, &self.style.base)?;
        }
        Ok(())
    }

    fn discussion(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(
            stage,
            s,
            &Bilingual::new(
                "Discussion: Sometimes the unknown is BEFORE, sometimes AFTER.",
                "نقاش: أحياناً المجهول قبل التحول وأحياناً بعده.",
            ),
        )?;
        scaffold_card(
            stage,
            s,
            &[
                Bilingual::new("• Identify what happens first.", "• نحدد ما يحدث أولاً."),
                Bilingual::new(
                    "• Identify the change (gain / loss).",
                    "• نحدد التحول (زيادة / نقصان).",
                ),
                Bilingual::new(
                    "• Then locate the unknown on the timeline.",
                    "• ثم نحدد مكان المجهول على الخط الزمني.",
                ),
            ],
        )
    }

    fn institutionalization(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(
            stage,
            s,
            &Bilingual::new(
                "Institutionalization: Initial → Transformation → Final",
                "التثبيت: الحالة الأولى → التحول → الحالة النهائية",
            ),
        )?;
        let rules = [
            math(s, "Final = Initial ± Change", 0.9, Point::new(0.0, 0.5)),
            math(s, "Initial = Final ∓ Change", 0.9, Point::new(0.0, -0.5)),
        ];
        let ids = stage.stage_all(rules);
        for id in &ids {
            stage.play([Animation::write(*id)], s.rt_norm)?;
        }
        stage.wait(0.6)?;
        stage.play([Animation::fade_out(ids)], s.rt_fast)
    }

    fn mini_assessment(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(
            stage,
            s,
            &Bilingual::new("Mini-check: where is the unknown?", "تحقق صغير: أين المجهول؟"),
        )?;
        let shown = self.model(stage, &self.config.assessment)?;
        stage.wait(0.35)?;
        stage.play([Animation::fade_out(shown)], s.rt_fast)
    }

    fn outro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        recap(
            stage,
            &self.style.base,
            &[
                Bilingual::new(
                    "• Before (initial): what we start with",
                    "• قبل (البداية): ما نبدأ به",
                ),
                Bilingual::new("• Change: added or removed", "• التحول: زيادة أو نقصان"),
                Bilingual::new("• After (final): what we end with", "• بعد (النهاية): ما ننتهي إليه"),
                Bilingual::new(
                    "• Place the unknown, then choose the operation",
                    "• نحدد مكان المجهول ثم نختار العملية",
                ),
            ],
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/change.rs"]
mod tests;
