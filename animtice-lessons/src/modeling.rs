//! `m3-l18-modeling`: word problems solved with bar models.
//!
//! Every problem states its answer in the content record. The answer is checked against the
//! model when the lesson is built, so a lesson can never animate a wrong result.

use animtice::{
    Animation, Bilingual, Lesson, LessonConfig, LessonContent, LessonStyle, ObjectId, Point, Rect,
    Rgba8, Span, Stage, Step, StyleConfig, TiceError, TiceResult, Vec2, Visual, banner,
    bracket_under, clear, difference_span, quantity_bars, segment_layout,
};

use crate::common::{BOTTOM_Y, bullet_lines, math, panel, recap, scaffold_card, subtitle, text_at};

/// Largest quantity a problem may draw.
pub const MAX_QUANTITY: u32 = 100;

/// Bars may not reach past this x.
const MAX_BAR_RIGHT: f64 = 6.6;
const TOP_ROW_Y: f64 = 1.0;
const BOTTOM_ROW_Y: f64 = -0.35;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ModelingStyle {
    #[serde(flatten)]
    pub base: StyleConfig,
    /// Bar length of one unit of quantity.
    pub unit_width: f64,
    pub bar_height: f64,
    pub bar_left_x: f64,
    pub show_problem_text: bool,
    pub show_relation_arrows: bool,
    pub show_reasoning_pause: bool,
    pub show_operation_reveal: bool,
    pub show_verify_step: bool,
}

impl Default for ModelingStyle {
    fn default() -> Self {
        Self {
            base: StyleConfig::default(),
            unit_width: 0.55,
            bar_height: 0.6,
            bar_left_x: -5.2,
            show_problem_text: true,
            show_relation_arrows: true,
            show_reasoning_pause: true,
            show_operation_reveal: true,
            show_verify_step: true,
        }
    }
}

impl LessonStyle for ModelingStyle {
    fn base(&self) -> &StyleConfig {
        &self.base
    }

    fn validate(&self) -> TiceResult<()> {
        self.base.validate()?;
        for (name, v) in [("unit_width", self.unit_width), ("bar_height", self.bar_height)] {
            if !(v.is_finite() && v > 0.0) {
                return Err(TiceError::validation(format!("{name} must be > 0")));
            }
        }
        if !self.bar_left_x.is_finite() {
            return Err(TiceError::validation("bar_left_x must be finite"));
        }
        Ok(())
    }
}

/// The structure of a word problem, with its known quantities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    /// Two parts, unknown whole: `a + b`.
    Total { a: u32, b: u32 },
    /// Known whole and one part, unknown other part: `total - given`.
    MissingPart { total: u32, given: u32 },
    /// Two quantities compared, unknown gap: `larger - smaller`.
    Difference { larger: u32, smaller: u32 },
    /// A quantity and how many more the other has, unknown other: `base + more`.
    CompareAdd { base: u32, more: u32 },
}

impl ModelKind {
    /// The unknown, or `None` when the quantities cannot form this model. Every part drawn,
    /// known or not, must be at least one unit.
    pub fn solve(self) -> Option<u32> {
        let positive = |x: u32| (x > 0).then_some(x);
        match self {
            Self::Total { a, b } => positive(a)?.checked_add(positive(b)?),
            Self::MissingPart { total, given } => {
                total.checked_sub(positive(given)?).and_then(positive)
            }
            Self::Difference { larger, smaller } => {
                larger.checked_sub(positive(smaller)?).and_then(positive)
            }
            Self::CompareAdd { base, more } => positive(base)?.checked_add(positive(more)?),
        }
    }

    /// Longest bar of the model, in units.
    pub fn extent(self) -> u32 {
        match self {
            Self::Total { a, b } => a.saturating_add(b),
            Self::MissingPart { total, .. } => total,
            Self::Difference { larger, .. } => larger,
            Self::CompareAdd { base, more } => base.saturating_add(more),
        }
    }

    /// The calculation that finds `answer`.
    pub fn operation(self, answer: u32) -> String {
        match self {
            Self::Total { a, b } => format!("{a} + {b} = {answer}"),
            Self::MissingPart { total, given } => format!("{total} − {given} = {answer}"),
            Self::Difference { larger, smaller } => format!("{larger} − {smaller} = {answer}"),
            Self::CompareAdd { base, more } => format!("{base} + {more} = {answer}"),
        }
    }

    /// The inverse calculation that checks `answer`.
    pub fn verification(self, answer: u32) -> String {
        match self {
            Self::Total { a, b } => format!("{answer} − {b} = {a}"),
            Self::MissingPart { total, given } => format!("{answer} + {given} = {total}"),
            Self::Difference { larger, smaller } => format!("{smaller} + {answer} = {larger}"),
            Self::CompareAdd { base, more } => format!("{answer} − {more} = {base}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModelProblem {
    pub text: Bilingual,
    pub model: ModelKind,
    /// The answer the lesson announces.
    pub answer: u32,
}

impl ModelProblem {
    pub fn validate(&self) -> TiceResult<()> {
        if self.model.extent() == 0 {
            return Err(TiceError::validation("a model needs a non-empty bar"));
        }
        if self.model.extent() > MAX_QUANTITY {
            return Err(TiceError::validation(format!(
                "quantities of {:?} exceed {MAX_QUANTITY}",
                self.model
            )));
        }
        match self.model.solve() {
            None => Err(TiceError::validation(format!(
                "quantities of {:?} do not make a model",
                self.model
            ))),
            Some(x) if x != self.answer => Err(TiceError::validation(format!(
                "stated answer {} is wrong: {}",
                self.answer,
                self.model.operation(x)
            ))),
            Some(_) => Ok(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ModelingPrompts {
    pub read: Bilingual,
    pub model: Bilingual,
    pub reason: Bilingual,
    pub calc: Bilingual,
    pub verify: Bilingual,
}

impl Default for ModelingPrompts {
    fn default() -> Self {
        Self {
            read: Bilingual::new("1. Read the problem.", "1. نقرأ المسألة."),
            model: Bilingual::new("2. Draw a bar model.", "2. نرسم نموذج الأشرطة."),
            reason: Bilingual::new("3. Where is the unknown?", "3. أين المجهول؟"),
            calc: Bilingual::new("4. Calculate.", "4. نحسب."),
            verify: Bilingual::new("5. Check the answer.", "5. نتحقق من الجواب."),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ModelingConfig {
    #[serde(flatten)]
    pub header: LessonConfig,
    pub problems: Vec<ModelProblem>,
    pub assessment: ModelProblem,
    pub prompts: ModelingPrompts,
}

impl Default for ModelingConfig {
    fn default() -> Self {
        Self {
            header: LessonConfig::new(Bilingual::new(
                "Modeling problem situations",
                "نمذجة وضعيات مسائل",
            )),
            problems: vec![
                ModelProblem {
                    text: Bilingual::new(
                        "Sara has 18 stickers. She gives 7 away. How many are left?",
                        "لدى سارة 18 ملصقاً. أعطت 7 منها. كم بقي لديها؟",
                    ),
                    model: ModelKind::MissingPart {
                        total: 18,
                        given: 7,
                    },
                    answer: 11,
                },
                ModelProblem {
                    text: Bilingual::new(
                        "Omar has 14 marbles, Ali has 9. How many more does Omar have?",
                        "لدى عمر 14 كرية ولدى علي 9. كم كرية يزيد عمر؟",
                    ),
                    model: ModelKind::Difference {
                        larger: 14,
                        smaller: 9,
                    },
                    answer: 5,
                },
                ModelProblem {
                    text: Bilingual::new(
                        "There are 6 red pencils and 8 blue pencils. How many in all?",
                        "هناك 6 أقلام حمراء و8 أقلام زرقاء. كم قلماً في المجموع؟",
                    ),
                    model: ModelKind::Total { a: 6, b: 8 },
                    answer: 14,
                },
            ],
            assessment: ModelProblem {
                text: Bilingual::new(
                    "A ribbon is 13 cm long, another is 8 cm. How much longer is the first?",
                    "طول شريط 13 سم وطول آخر 8 سم. بكم يزيد الأول؟",
                ),
                model: ModelKind::Difference {
                    larger: 13,
                    smaller: 8,
                },
                answer: 5,
            },
            prompts: ModelingPrompts::default(),
        }
    }
}

impl LessonContent for ModelingConfig {
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

/// A drawn model: the bars, and the marking of the unknown revealed separately.
struct Drawn {
    bars: Vec<Visual>,
    unknown: Vec<Visual>,
}

#[derive(Debug)]
pub struct ModelingLesson {
    config: ModelingConfig,
    style: ModelingStyle,
}

impl Lesson for ModelingLesson {
    type Style = ModelingStyle;
    type Config = ModelingConfig;

    const ID: &'static str = "m3-l18-modeling";

    fn new(config: ModelingConfig, style: ModelingStyle) -> TiceResult<Self> {
        config.validate()?;
        style.validate()?;
        for p in config.problems.iter().chain([&config.assessment]) {
            let right = style.bar_left_x + f64::from(p.model.extent()) * style.unit_width;
            if right > MAX_BAR_RIGHT {
                return Err(TiceError::validation(format!(
                    "a bar of {} units does not fit at unit_width {}",
                    p.model.extent(),
                    style.unit_width
                )));
            }
        }
        Ok(Self { config, style })
    }

    fn config(&self) -> &ModelingConfig {
        &self.config
    }

    fn style(&self) -> &ModelingStyle {
        &self.style
    }

    fn build_steps(&self) -> Vec<Step<Self>> {
        vec![
            Step::new("intro", Self::intro),
            Step::new("exploration_problems", Self::exploration),
            Step::new("collective_discussion_compare_models", Self::discussion),
            Step::new("institutionalization_strategy", Self::institutionalization),
            Step::new("mini_assessment", Self::mini_assessment),
            Step::new("outro", Self::outro),
        ]
    }
}

impl ModelingLesson {
    fn segment(&self, span: Span, y: f64, color: Rgba8, label: String) -> [Visual; 2] {
        let s = &self.style.base;
        let rect = Visual::rect(span.to_rect(y, self.style.bar_height))
            .with_stroke(color, s.stroke_width)
            .with_fill(color, 0.3);
        let label = math(s, label, 0.5, Point::new(span.center(), y));
        [rect, label]
    }

    /// The "?" over `span`: a bracket under the bar at row `y` and the mark below it.
    fn bracket(&self, span: Span, y: f64) -> Vec<Visual> {
        let s = &self.style.base;
        let top = y - self.style.bar_height / 2.0 - 0.08;
        let strokes = Visual::segments(&bracket_under(span, top, 0.22))
            .with_stroke(s.palette.highlight, s.stroke_width);
        let mark = math(s, "?", 0.7, Point::new(span.center(), top - 0.5))
            .with_color(s.palette.highlight);
        vec![strokes, mark]
    }

    /// An outlined empty box standing for the unknown.
    fn unknown_box(&self, span: Span, y: f64) -> Vec<Visual> {
        let s = &self.style.base;
        let r: Rect = span.to_rect(y, self.style.bar_height);
        vec![
            Visual::rect(r).with_stroke(s.palette.highlight, s.stroke_width),
            math(s, "?", 0.6, r.center()).with_color(s.palette.highlight),
        ]
    }

    fn draw(&self, model: ModelKind) -> TiceResult<Drawn> {
        let p = &self.style.base.palette;
        let u = self.style.unit_width;
        let left = self.style.bar_left_x;
        let mut bars = Vec::new();
        let unknown = match model {
            ModelKind::Total { a, b } => {
                let whole = f64::from(a + b) * u;
                let spans = segment_layout(left, whole, &[f64::from(a), f64::from(b)])?;
                bars.extend(self.segment(spans[0], TOP_ROW_Y, p.shape, a.to_string()));
                bars.extend(self.segment(spans[1], TOP_ROW_Y, p.accent, b.to_string()));
                self.bracket(Span { start: left, width: whole }, TOP_ROW_Y)
            }
            ModelKind::MissingPart { total, given } => {
                let whole = f64::from(total) * u;
                let top = Span { start: left, width: whole };
                bars.extend(self.segment(top, TOP_ROW_Y, p.shape, total.to_string()));
                let rest = f64::from(total - given);
                let spans = segment_layout(left, whole, &[f64::from(given), rest])?;
                bars.extend(self.segment(spans[0], BOTTOM_ROW_Y, p.accent, given.to_string()));
                self.unknown_box(spans[1], BOTTOM_ROW_Y)
            }
            ModelKind::Difference { larger, smaller } => {
                let spans = quantity_bars(left, u, &[larger, smaller])?;
                bars.extend(self.segment(spans[0], TOP_ROW_Y, p.shape, larger.to_string()));
                bars.extend(self.segment(spans[1], BOTTOM_ROW_Y, p.accent, smaller.to_string()));
                match difference_span(spans[0], spans[1]) {
                    Some(gap) => self.unknown_box(gap, BOTTOM_ROW_Y),
                    None => Vec::new(),
                }
            }
            ModelKind::CompareAdd { base, more } => {
                let first = Span { start: left, width: f64::from(base) * u };
                bars.extend(self.segment(first, TOP_ROW_Y, p.shape, base.to_string()));
                let whole = f64::from(base + more) * u;
                let spans = segment_layout(left, whole, &[f64::from(base), f64::from(more)])?;
                bars.extend(self.segment(spans[0], BOTTOM_ROW_Y, p.shape, base.to_string()));
                bars.extend(self.segment(spans[1], BOTTOM_ROW_Y, p.accent, format!("+{more}")));
                self.bracket(Span { start: left, width: whole }, BOTTOM_ROW_Y)
            }
        };
        Ok(Drawn { bars, unknown })
    }

    /// Read, model, reason, calculate and check one problem.
    fn solve(&self, stage: &mut Stage, problem: &ModelProblem) -> TiceResult<Vec<ObjectId>> {
        let s = &self.style.base;
        let p = &self.config.prompts;
        let st = &self.style;
        let mut shown = Vec::new();

        banner(stage, s, &p.read)?;
        if st.show_problem_text {
            let text = text_at(stage, s, &problem.text, 0.5, Point::new(0.0, 2.5));
            let text = stage.stage(text);
            stage.play([Animation::write(text)], s.rt_slow)?;
            shown.push(text);
        }

        banner(stage, s, &p.model)?;
        tracing::debug!(model = ?problem.model, answer = problem.answer, "solving a modeled problem");
        let drawn = self.draw(problem.model)?;
        let bars = stage.stage_all(drawn.bars);
        stage.play([Animation::create(bars.clone())], s.rt_norm)?;
        shown.extend(bars);

        banner(stage, s, &p.reason)?;
        if st.show_relation_arrows && !drawn.unknown.is_empty() {
            let unknown = stage.stage_all(drawn.unknown);
            stage.play([Animation::create(unknown.clone())], s.rt_norm)?;
            stage.play([Animation::indicate(unknown.clone())], s.rt_fast)?;
            shown.extend(unknown);
        }
        if st.show_reasoning_pause {
            stage.wait(0.8)?;
        }

        banner(stage, s, &p.calc)?;
        if st.show_operation_reveal {
            let op = problem.model.operation(problem.answer);
            let op = math(s, op, 0.85, Point::new(0.0, BOTTOM_Y + 0.75))
                .with_color(s.palette.positive);
            let op = stage.stage(op);
            stage.play([Animation::write(op)], s.rt_norm)?;
            shown.push(op);
        }

        if st.show_verify_step {
            banner(stage, s, &p.verify)?;
            let check = format!("✓ {}", problem.model.verification(problem.answer));
            let check = math(s, check, 0.6, Point::new(0.0, BOTTOM_Y)).with_color(s.palette.muted);
            let check = stage.stage(check);
            stage.play([Animation::fade_in_shifted(check, Vec2::new(0.0, 0.1))], s.rt_fast)?;
            shown.push(check);
        }
        Ok(shown)
    }

    fn intro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        subtitle(
            stage,
            &self.style.base,
            &Bilingual::new(
                "A drawing helps us see what to calculate.",
                "الرسم يساعدنا على رؤية ما يجب حسابه.",
            ),
        )
    }

    fn exploration(&mut self, stage: &mut Stage) -> TiceResult<()> {
        for problem in &self.config.problems {
            self.solve(stage, problem)?;
            stage.wait(0.4)?;
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
                "Discussion: how are the models different?",
                "نقاش: بماذا تختلف النماذج؟",
            ),
        )?;
        scaffold_card(
            stage,
            s,
            &[
                Bilingual::new(
                    "• Parts put together, whole unknown: we add.",
                    "• أجزاء مجتمعة والكل مجهول: نجمع.",
                ),
                Bilingual::new(
                    "• Whole known, one part unknown: we subtract.",
                    "• الكل معلوم وجزء مجهول: نطرح.",
                ),
                Bilingual::new(
                    "• Comparing two bars: the difference is the extra piece.",
                    "• المقارنة بين شريطين: الفرق هو الجزء الزائد.",
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
                "Institutionalization: a strategy for every problem",
                "التثبيت: استراتيجية لكل مسألة",
            ),
        )?;
        let p = &self.config.prompts;
        let card = Rect::from_center_size((0.0, 0.0), (8.0, 4.2));
        let backdrop = stage.stage(panel(s, card));
        let lines = bullet_lines(
            stage,
            s,
            &[
                p.read.clone(),
                p.model.clone(),
                p.reason.clone(),
                p.calc.clone(),
                p.verify.clone(),
            ],
            0.6,
            Point::new(card.x0 + 0.7, card.y1 - 0.6),
        );
        let lines = stage.stage_all(lines);
        stage.play([Animation::create(backdrop)], s.rt_fast)?;
        for id in &lines {
            stage.play(
                [Animation::fade_in_shifted(*id, Vec2::new(-0.15, 0.0))],
                s.rt_fast * 0.6,
            )?;
        }
        stage.wait(0.6)?;
        let mut ids = lines;
        ids.push(backdrop);
        stage.play([Animation::fade_out(ids)], s.rt_fast)
    }

    fn mini_assessment(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(
            stage,
            s,
            &Bilingual::new("Mini-check: model and solve.", "تحقق صغير: نمذج وحلّ."),
        )?;
        let shown = self.solve(stage, &self.config.assessment)?;
        stage.wait(0.5)?;
        stage.play([Animation::fade_out(shown)], s.rt_fast)
    }

    fn outro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        recap(
            stage,
            &self.style.base,
            &[
                Bilingual::new("• Read, then draw the bars", "• نقرأ ثم نرسم الأشرطة"),
                Bilingual::new("• Find where the ? is", "• نحدد مكان المجهول ؟"),
                Bilingual::new("• Add or subtract, then check", "• نجمع أو نطرح ثم نتحقق"),
            ],
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/modeling.rs"]
mod tests;
