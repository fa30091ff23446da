//! `m3-l21-part-value`: division problems where the unknown is the value of one part.
//!
//! The quotient is always shown as ONE highlighted part of the partitioned whole, never as a
//! count of parts.

use animtice::{
    Animation, Bilingual, Lesson, LessonConfig, LessonContent, LessonStyle, ObjectId, Orientation,
    Point, Rect, Span, Stage, Step, StyleConfig, TiceError, TiceResult, Vec2, Visual, banner,
    bar_dividers, clear, part_boxes,
};

use crate::common::{BOTTOM_Y, math, recap, scaffold_card, subtitle, surround, text_at};

pub const MAX_PARTS: u32 = 12;
pub const MAX_TOTAL: u32 = 100;

/// Bars may not reach past this x.
const MAX_BAR_RIGHT: f64 = 6.6;
const MIN_BAR_WIDTH: f64 = 1.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PartValueStyle {
    #[serde(flatten)]
    pub base: StyleConfig,
    pub unit_width: f64,
    pub bar_height: f64,
    pub left_anchor_x: f64,
    pub bar_y: f64,
    /// Row of the enlarged copy of the focused part.
    pub focus_y: f64,
    pub focus_buff: f64,
    pub show_problem_text: bool,
    pub show_zoom_focus: bool,
    pub show_symbolic_link: bool,
    pub show_context_answer: bool,
    pub show_verify: bool,
}

impl Default for PartValueStyle {
    fn default() -> Self {
        Self {
            base: StyleConfig {
                fill_opacity: 0.14,
                ..StyleConfig::default()
            },
            unit_width: 0.5,
            bar_height: 0.62,
            left_anchor_x: -5.2,
            bar_y: 0.2,
            focus_y: -1.3,
            focus_buff: 0.12,
            show_problem_text: true,
            show_zoom_focus: true,
            show_symbolic_link: true,
            show_context_answer: true,
            show_verify: true,
        }
    }
}

impl LessonStyle for PartValueStyle {
    fn base(&self) -> &StyleConfig {
        &self.base
    }

    fn validate(&self) -> TiceResult<()> {
        self.base.validate()?;
        for (name, v) in [
            ("unit_width", self.unit_width),
            ("bar_height", self.bar_height),
            ("focus_buff", self.focus_buff),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(TiceError::validation(format!("{name} must be > 0")));
            }
        }
        if ![self.left_anchor_x, self.bar_y, self.focus_y]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(TiceError::validation("layout positions must be finite"));
        }
        Ok(())
    }
}

impl PartValueStyle {
    /// The whole bar for `total` units, anchored at the left edge.
    pub fn whole_bar(&self, total: u32) -> Rect {
        let span = Span {
            start: self.left_anchor_x,
            width: (f64::from(total) * self.unit_width).max(MIN_BAR_WIDTH),
        };
        span.to_rect(self.bar_y, self.bar_height)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PartValueProblem {
    pub question: Bilingual,
    pub total: u32,
    pub n_parts: u32,
    /// What is shared, plural: "apples".
    pub item: Bilingual,
    /// One receiver, singular: "kid".
    pub receiver: Bilingual,
    pub answer: u32,
}

impl PartValueProblem {
    pub fn validate(&self) -> TiceResult<()> {
        if !(2..=MAX_PARTS).contains(&self.n_parts) {
            return Err(TiceError::validation(format!(
                "{} parts is outside 2..={MAX_PARTS}",
                self.n_parts
            )));
        }
        if !(1..=MAX_TOTAL).contains(&self.total) {
            return Err(TiceError::validation(format!(
                "total {} is outside 1..={MAX_TOTAL}",
                self.total
            )));
        }
        if self.total % self.n_parts != 0 {
            return Err(TiceError::validation(format!(
                "{} cannot be shared equally into {} parts",
                self.total, self.n_parts
            )));
        }
        let q = self.total / self.n_parts;
        if q != self.answer {
            return Err(TiceError::validation(format!(
                "stated answer {} is wrong: {}",
                self.answer,
                division(self.total, self.n_parts, q)
            )));
        }
        Ok(())
    }

    /// "One kid = 4 apples".
    pub fn context_answer(&self) -> Bilingual {
        let ar = match (&self.receiver.ar, &self.item.ar) {
            (Some(r), Some(i)) => Some(format!("{r} واحد = {} {i}", self.answer)),
            _ => None,
        };
        Bilingual {
            en: format!("One {} = {} {}", self.receiver.en, self.answer, self.item.en),
            ar,
        }
    }
}

/// `"12 ÷ 3 = 4"`.
pub fn division(total: u32, n_parts: u32, quotient: u32) -> String {
    format!("{total} ÷ {n_parts} = {quotient}")
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PartValuePrompts {
    pub total: Bilingual,
    pub parts: Bilingual,
    pub partition: Bilingual,
    pub focus: Bilingual,
    pub link: Bilingual,
}

impl Default for PartValuePrompts {
    fn default() -> Self {
        Self {
            total: Bilingual::new("Step 1: Identify the TOTAL.", "الخطوة 1: نحدد المجموع."),
            parts: Bilingual::new(
                "Step 2: Identify the NUMBER of equal parts.",
                "الخطوة 2: نحدد عدد الأجزاء المتساوية.",
            ),
            partition: Bilingual::new(
                "Step 3: Partition the whole into equal parts.",
                "الخطوة 3: نقسم الكل إلى أجزاء متساوية.",
            ),
            focus: Bilingual::new(
                "Step 4: Focus on ONE part: that's the quotient meaning.",
                "الخطوة 4: نركز على جزء واحد: هذا معنى خارج القسمة.",
            ),
            link: Bilingual::new(
                "Step 5: Link the part value to the division expression.",
                "الخطوة 5: نربط قيمة الجزء بعملية القسمة.",
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PartValueConfig {
    #[serde(flatten)]
    pub header: LessonConfig,
    pub problems: Vec<PartValueProblem>,
    pub assessment: PartValueProblem,
    pub prompts: PartValuePrompts,
}

impl Default for PartValueConfig {
    fn default() -> Self {
        Self {
            header: LessonConfig::new(Bilingual::new(
                "Division: find the value of one part",
                "حل مسائل قسمة للبحث عن قيمة الجزء",
            )),
            problems: vec![
                PartValueProblem {
                    question: Bilingual::new(
                        "12 apples are shared equally among 3 kids. How many apples does each kid get?",
                        "12 تفاحة توزع بالتساوي على 3 أطفال. كم تفاحة يأخذ كل طفل؟",
                    ),
                    total: 12,
                    n_parts: 3,
                    item: Bilingual::new("apples", "تفاحات"),
                    receiver: Bilingual::new("kid", "طفل"),
                    answer: 4,
                },
                PartValueProblem {
                    question: Bilingual::new(
                        "20 stickers are divided equally into 5 envelopes. How many stickers are in one envelope?",
                        "20 ملصقاً توزع بالتساوي في 5 أظرف. كم ملصقاً في الظرف الواحد؟",
                    ),
                    total: 20,
                    n_parts: 5,
                    item: Bilingual::new("stickers", "ملصقات"),
                    receiver: Bilingual::new("envelope", "ظرف"),
                    answer: 4,
                },
            ],
            assessment: PartValueProblem {
                question: Bilingual::new(
                    "18 flowers are shared equally among 6 vases. How many flowers in one vase?",
                    "18 زهرة توزع بالتساوي على 6 مزهريات. كم زهرة في المزهرية الواحدة؟",
                ),
                total: 18,
                n_parts: 6,
                item: Bilingual::new("flowers", "زهرات"),
                receiver: Bilingual::new("vase", "مزهرية"),
                answer: 3,
            },
            prompts: PartValuePrompts::default(),
        }
    }
}

impl LessonContent for PartValueConfig {
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

#[derive(Debug)]
pub struct PartValueLesson {
    config: PartValueConfig,
    style: PartValueStyle,
}

impl Lesson for PartValueLesson {
    type Style = PartValueStyle;
    type Config = PartValueConfig;

    const ID: &'static str = "m3-l21-part-value";

    fn new(config: PartValueConfig, style: PartValueStyle) -> TiceResult<Self> {
        config.validate()?;
        style.validate()?;
        for p in config.problems.iter().chain([&config.assessment]) {
            if style.whole_bar(p.total).x1 > MAX_BAR_RIGHT {
                return Err(TiceError::validation(format!(
                    "a bar of {} units does not fit at unit_width {}",
                    p.total, style.unit_width
                )));
            }
        }
        Ok(Self { config, style })
    }

    fn config(&self) -> &PartValueConfig {
        &self.config
    }

    fn style(&self) -> &PartValueStyle {
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

impl PartValueLesson {
    /// Partition the whole, focus one part and reveal its value. Returns everything drawn.
    fn find_part(&self, stage: &mut Stage, problem: &PartValueProblem) -> TiceResult<Vec<ObjectId>> {
        let s = &self.style.base;
        let st = &self.style;
        let p = &self.config.prompts;
        let q = problem.answer;
        tracing::debug!(
            total = problem.total,
            n_parts = problem.n_parts,
            quotient = q,
            "finding the value of one part"
        );
        let mut shown = Vec::new();

        if st.show_problem_text {
            let text = text_at(stage, s, &problem.question, 0.42, Point::new(0.0, 2.4));
            let text = stage.stage(text);
            stage.play([Animation::fade_in_shifted(text, Vec2::new(0.0, -0.1))], s.rt_norm)?;
            shown.push(text);
        }

        banner(stage, s, &p.total)?;
        let bar = st.whole_bar(problem.total);
        let outline = Visual::rounded_rect(bar, 0.18)
            .with_stroke(s.palette.shape, s.stroke_width)
            .with_fill(s.palette.shape, s.fill_opacity);
        let total = Bilingual {
            en: format!("Total = {} {}", problem.total, problem.item.en),
            ar: problem
                .item
                .ar
                .as_ref()
                .map(|i| format!("المجموع = {} {i}", problem.total)),
        };
        let total = text_at(stage, s, &total, 0.42, Point::new(bar.center().x, bar.y1 + 0.3));
        let ids = stage.stage_all([outline, total]);
        stage.play([Animation::create(ids.clone())], s.rt_norm)?;
        shown.extend(ids);

        banner(stage, s, &p.parts)?;
        let count = Bilingual::new(
            format!("{} equal parts", problem.n_parts),
            format!("{} أجزاء متساوية", problem.n_parts),
        );
        let count = text_at(stage, s, &count, 0.42, Point::new(bar.center().x, bar.y0 - 0.35));
        let count = stage.stage(count);
        stage.play([Animation::fade_in_shifted(count, Vec2::new(0.0, -0.05))], s.rt_fast)?;
        shown.push(count);

        banner(stage, s, &p.partition)?;
        let ticks = Visual::segments(&bar_dividers(bar, problem.n_parts, Orientation::Vertical)?)
            .with_stroke(s.palette.shape, s.stroke_width);
        let ticks = stage.stage(ticks);
        stage.play([Animation::create(ticks)], s.rt_norm)?;
        shown.push(ticks);
        let parts = part_boxes(bar, problem.n_parts, Orientation::Vertical)?;
        let flash: Vec<Visual> = parts
            .iter()
            .map(|r| Visual::rect(*r).without_stroke().with_fill(s.palette.accent, 0.22))
            .collect();
        let flash = stage.stage_all(flash);
        stage.play([Animation::fade_in(flash.clone())], s.rt_fast)?;
        stage.wait(0.15)?;
        stage.play([Animation::fade_out(flash)], s.rt_fast)?;

        banner(stage, s, &p.focus)?;
        let one = parts
            .first()
            .copied()
            .ok_or_else(|| TiceError::lesson("the whole has no parts"))?;
        let fill = Visual::rect(one)
            .without_stroke()
            .with_fill(s.palette.highlight, 0.3);
        let glow = surround(s, one, st.focus_buff).with_stroke(s.palette.highlight, 6.0);
        let mark = math(s, "?", 0.8, one.center()).with_color(s.palette.highlight);
        let ids = stage.stage_all([fill, glow, mark]);
        stage.play([Animation::create(ids.clone())], s.rt_norm)?;
        let mark = ids[2];
        shown.extend(ids.iter().copied());
        stage.play(
            [Animation::transform(mark, math(s, q.to_string(), 0.7, one.center()))],
            s.rt_norm,
        )?;

        if st.show_zoom_focus {
            let center = Point::new(one.center().x.max(-4.0), st.focus_y);
            let zoom = Rect::from_center_size(center, (one.width() * 1.6, one.height() * 1.6));
            let copy = [
                Visual::rounded_rect(zoom, 0.12)
                    .with_stroke(s.palette.highlight, s.stroke_width)
                    .with_fill(s.palette.highlight, 0.3),
                math(s, q.to_string(), 0.9, center),
            ];
            let ids = stage.stage_all(copy);
            stage.play([Animation::fade_in_shifted(ids.clone(), Vec2::new(0.0, 0.3))], s.rt_norm)?;
            shown.extend(ids);
        }

        if st.show_context_answer {
            let caption = problem.context_answer();
            let caption = text_at(stage, s, &caption, 0.45, Point::new(1.5, st.focus_y))
                .with_color(s.palette.positive);
            let caption = stage.stage(caption);
            stage.play([Animation::fade_in_shifted(caption, Vec2::new(0.0, -0.05))], s.rt_fast)?;
            shown.push(caption);
        }

        let at = Point::new(0.0, BOTTOM_Y + 0.5);
        if st.show_symbolic_link {
            banner(stage, s, &p.link)?;
            let expr = math(s, division(problem.total, problem.n_parts, q), 0.9, at);
            let expr = stage.stage(expr);
            stage.play([Animation::write(expr)], s.rt_norm)?;
            shown.push(expr);
        }
        if st.show_verify {
            let x = if st.show_symbolic_link { -2.6 } else { 0.0 };
            let check = math(s, "✓", 0.8, Point::new(x, at.y)).with_color(s.palette.positive);
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
                "Share a total equally: how much is in ONE part?",
                "نوزع المجموع بالتساوي: كم في جزء واحد؟",
            ),
        )
    }

    fn exploration(&mut self, stage: &mut Stage) -> TiceResult<()> {
        for problem in &self.config.problems {
            self.find_part(stage, problem)?;
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
                "Discussion: Why is the answer the value of ONE part?",
                "نقاش: لماذا الجواب هو قيمة جزء واحد؟",
            ),
        )?;
        scaffold_card(
            stage,
            s,
            &[
                Bilingual::new(
                    "• Total is split into equal parts.",
                    "• نقسم المجموع إلى أجزاء متساوية.",
                ),
                Bilingual::new("• Each part has the same value.", "• كل جزء له نفس القيمة."),
                Bilingual::new(
                    "• The quotient tells the value of one share.",
                    "• الخارج يعطينا قيمة حصة واحدة.",
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
                "Institutionalization: total ÷ number of parts = value of one part",
                "التثبيت: المجموع ÷ عدد الأجزاء = قيمة الجزء",
            ),
        )?;
        let rule = math(
            s,
            "part value = total ÷ number of equal parts",
            0.85,
            Point::ZERO,
        );
        let rule = stage.stage(rule);
        stage.play([Animation::write(rule)], s.rt_norm)?;
        stage.wait(0.6)?;
        stage.play([Animation::fade_out(rule)], s.rt_fast)
    }

    fn mini_assessment(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        let a = &self.config.assessment;
        let prompt = Bilingual {
            en: format!(
                "Mini-check: {} {} shared among {}. Value of one part?",
                a.total, a.item.en, a.n_parts
            ),
            ar: a.item.ar.as_ref().map(|i| {
                format!(
                    "تحقق صغير: {} {i} توزع على {} أجزاء. ما قيمة جزء واحد؟",
                    a.total, a.n_parts
                )
            }),
        };
        banner(stage, s, &prompt)?;
        let shown = self.find_part(stage, a)?;
        stage.wait(0.35)?;
        stage.play([Animation::fade_out(shown)], s.rt_fast)
    }

    fn outro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        recap(
            stage,
            &self.style.base,
            &[
                Bilingual::new(
                    "• Known: total + number of equal parts",
                    "• المعطيات: المجموع + عدد الأجزاء",
                ),
                Bilingual::new("• Unknown: value of ONE part", "• المجهول: قيمة جزء واحد"),
                Bilingual::new(
                    "• Always highlight one part to interpret the quotient",
                    "• نُبرز جزءاً واحداً لفهم معنى الخارج",
                ),
            ],
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/part_value.rs"]
mod tests;
