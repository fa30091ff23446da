//! `m3-l19-whole-from-parts`: finding the whole from equal parts.
//!
//! One part is shown, repeated end to end, and the whole is built under it before any
//! calculation appears. Repeated addition comes first; multiplication only rewrites it.

use animtice::{
    Animation, Bilingual, Lesson, LessonConfig, LessonContent, LessonStyle, ObjectId, Point, Span,
    Stage, Step, StyleConfig, TiceError, TiceResult, Vec2, Visual, banner, bracket_under, clear,
};

use crate::common::{BOTTOM_Y, math, recap, scaffold_card, subtitle, surround, text_at};

pub const MAX_PARTS: u32 = 10;
/// Largest whole a problem may build.
pub const MAX_WHOLE: u32 = 100;

/// Bars may not reach past this x.
const MAX_BAR_RIGHT: f64 = 6.6;
/// Narrowest a drawn part may be, so its value stays readable.
const MIN_PART_WIDTH: f64 = 0.8;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WholeStyle {
    #[serde(flatten)]
    pub base: StyleConfig,
    /// Bar length of one unit of value.
    pub unit_width: f64,
    pub bar_height: f64,
    pub gap_between_parts: f64,
    pub left_anchor_x: f64,
    pub part_row_y: f64,
    pub whole_row_y: f64,
    pub show_repeated_addition: bool,
    /// Only shown after the repeated addition, as its rewrite.
    pub show_implicit_multiplication: bool,
    pub show_grouping_braces: bool,
    pub show_verify_step: bool,
}

impl Default for WholeStyle {
    fn default() -> Self {
        Self {
            base: StyleConfig {
                fill_opacity: 0.16,
                ..StyleConfig::default()
            },
            unit_width: 0.38,
            bar_height: 0.62,
            gap_between_parts: 0.14,
            left_anchor_x: -5.2,
            part_row_y: 0.4,
            whole_row_y: -1.0,
            show_repeated_addition: true,
            show_implicit_multiplication: true,
            show_grouping_braces: true,
            show_verify_step: true,
        }
    }
}

impl LessonStyle for WholeStyle {
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
        if !(self.gap_between_parts.is_finite() && self.gap_between_parts >= 0.0) {
            return Err(TiceError::validation("gap_between_parts must be >= 0"));
        }
        for (name, v) in [
            ("left_anchor_x", self.left_anchor_x),
            ("part_row_y", self.part_row_y),
            ("whole_row_y", self.whole_row_y),
        ] {
            if !v.is_finite() {
                return Err(TiceError::validation(format!("{name} must be finite")));
            }
        }
        Ok(())
    }
}

impl WholeStyle {
    /// Drawn width of a part worth `value`.
    pub fn part_width(&self, value: u32) -> f64 {
        (f64::from(value) * self.unit_width).max(MIN_PART_WIDTH)
    }
}

/// `n` equal parts of width `part_width` laid left to right with `gap` between them.
pub fn part_spans(left: f64, part_width: f64, gap: f64, n: u32) -> Vec<Span> {
    (0..n)
        .map(|i| Span {
            start: left + f64::from(i) * (part_width + gap),
            width: part_width,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EqualPartsProblem {
    pub text: Bilingual,
    pub part_value: u32,
    pub n_parts: u32,
    /// What one part is, e.g. "bag".
    pub part_label: Bilingual,
    /// What the whole counts, e.g. "candies".
    pub whole_label: Bilingual,
    pub answer: u32,
}

impl EqualPartsProblem {
    pub fn whole(&self) -> Option<u32> {
        self.part_value.checked_mul(self.n_parts)
    }

    pub fn validate(&self) -> TiceResult<()> {
        if self.part_value == 0 {
            return Err(TiceError::validation("a part must be worth at least 1"));
        }
        if !(2..=MAX_PARTS).contains(&self.n_parts) {
            return Err(TiceError::validation(format!(
                "{} parts is outside 2..={MAX_PARTS}",
                self.n_parts
            )));
        }
        match self.whole() {
            Some(w) if w > MAX_WHOLE => Err(TiceError::validation(format!(
                "whole {w} exceeds {MAX_WHOLE}"
            ))),
            Some(w) if w == self.answer => Ok(()),
            Some(w) => Err(TiceError::validation(format!(
                "stated answer {} is wrong: {}",
                self.answer,
                multiplication(self.part_value, self.n_parts, w)
            ))),
            None => Err(TiceError::validation("whole overflows")),
        }
    }
}

/// `"4 + 4 + 4 = 12"`.
pub fn repeated_addition(part: u32, n: u32, whole: u32) -> String {
    let terms = vec![part.to_string(); n as usize];
    format!("{} = {whole}", terms.join(" + "))
}

/// `"3 × 4 = 12"`: number of parts times the part.
pub fn multiplication(part: u32, n: u32, whole: u32) -> String {
    format!("{n} × {part} = {whole}")
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WholePrompts {
    pub part: Bilingual,
    pub repeat: Bilingual,
    pub merge: Bilingual,
    pub calc: Bilingual,
    pub verify: Bilingual,
}

impl Default for WholePrompts {
    fn default() -> Self {
        Self {
            part: Bilingual::new("We know ONE part.", "نعرف قيمة جزء واحد."),
            repeat: Bilingual::new(
                "Repeat the same part the required number of times.",
                "نكرر نفس الجزء العدد المطلوب من المرات.",
            ),
            merge: Bilingual::new(
                "Put parts end-to-end to build the whole.",
                "نضع الأجزاء متجاورة لبناء الكل.",
            ),
            calc: Bilingual::new("Now write the calculation.", "الآن نكتب الحساب."),
            verify: Bilingual::new(
                "Check: does the model match the total?",
                "تحقق: هل النموذج يطابق المجموع؟",
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WholeConfig {
    #[serde(flatten)]
    pub header: LessonConfig,
    pub problems: Vec<EqualPartsProblem>,
    pub assessment: EqualPartsProblem,
    pub prompts: WholePrompts,
}

impl Default for WholeConfig {
    fn default() -> Self {
        Self {
            header: LessonConfig::new(Bilingual::new(
                "Finding the whole from equal parts",
                "حل مسائل البحث عن الكل – أجزاء متساوية",
            )),
            problems: vec![
                EqualPartsProblem {
                    text: Bilingual::new(
                        "Each bag has 4 candies. There are 5 bags. How many candies in total?",
                        "في كل كيس 4 حلويات. هناك 5 أكياس. كم حلوى في المجموع؟",
                    ),
                    part_value: 4,
                    n_parts: 5,
                    part_label: Bilingual::new("bag", "كيس"),
                    whole_label: Bilingual::new("candies", "حلويات"),
                    answer: 20,
                },
                EqualPartsProblem {
                    text: Bilingual::new(
                        "Each box has 3 pencils. There are 6 boxes. How many pencils altogether?",
                        "في كل علبة 3 أقلام. هناك 6 علب. كم قلماً في المجموع؟",
                    ),
                    part_value: 3,
                    n_parts: 6,
                    part_label: Bilingual::new("box", "علبة"),
                    whole_label: Bilingual::new("pencils", "أقلام"),
                    answer: 18,
                },
            ],
            assessment: EqualPartsProblem {
                text: Bilingual::new(
                    "One part is 7. There are 4 equal parts. What is the whole?",
                    "جزء واحد = 7. هناك 4 أجزاء متساوية. ما هو الكل؟",
                ),
                part_value: 7,
                n_parts: 4,
                part_label: Bilingual::new("part", "جزء"),
                whole_label: Bilingual::new("whole", "الكل"),
                answer: 28,
            },
            prompts: WholePrompts::default(),
        }
    }
}

impl LessonContent for WholeConfig {
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
pub struct WholeLesson {
    config: WholeConfig,
    style: WholeStyle,
}

impl Lesson for WholeLesson {
    type Style = WholeStyle;
    type Config = WholeConfig;

    const ID: &'static str = "m3-l19-whole-from-parts";

    fn new(config: WholeConfig, style: WholeStyle) -> TiceResult<Self> {
        config.validate()?;
        style.validate()?;
        for p in config.problems.iter().chain([&config.assessment]) {
            let spans = part_spans(
                style.left_anchor_x,
                style.part_width(p.part_value),
                style.gap_between_parts,
                p.n_parts,
            );
            let right = spans.last().map_or(style.left_anchor_x, |s| s.end());
            if right > MAX_BAR_RIGHT {
                return Err(TiceError::validation(format!(
                    "{} parts of {} do not fit at unit_width {}",
                    p.n_parts, p.part_value, style.unit_width
                )));
            }
        }
        Ok(Self { config, style })
    }

    fn config(&self) -> &WholeConfig {
        &self.config
    }

    fn style(&self) -> &WholeStyle {
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

impl WholeLesson {
    fn bar(&self, span: Span, y: f64, value: String) -> [Visual; 2] {
        let s = &self.style.base;
        let rect = span.to_rect(y, self.style.bar_height);
        [
            Visual::rounded_rect(rect, 0.18)
                .with_stroke(s.palette.shape, s.stroke_width)
                .with_fill(s.palette.shape, s.fill_opacity),
            math(s, value, 0.5, rect.center()),
        ]
    }

    /// Build one whole from its parts and write the calculation. Returns everything drawn.
    fn build_whole(&self, stage: &mut Stage, problem: &EqualPartsProblem) -> TiceResult<Vec<ObjectId>> {
        let s = &self.style.base;
        let st = &self.style;
        let p = &self.config.prompts;
        let whole = problem.answer;
        tracing::debug!(
            part = problem.part_value,
            n = problem.n_parts,
            whole,
            "building a whole from equal parts"
        );
        let mut shown = Vec::new();

        let text = text_at(stage, s, &problem.text, 0.45, Point::new(0.0, 2.4));
        let text = stage.stage(text);
        stage.play([Animation::fade_in_shifted(text, Vec2::new(0.0, -0.1))], s.rt_norm)?;
        shown.push(text);

        banner(stage, s, &p.part)?;
        let spans = part_spans(
            st.left_anchor_x,
            st.part_width(problem.part_value),
            st.gap_between_parts,
            problem.n_parts,
        );
        let (first, rest) = spans
            .split_first()
            .ok_or_else(|| TiceError::lesson("a problem needs at least one part"))?;
        let value = problem.part_value.to_string();
        let first_bar = stage.stage_all(self.bar(*first, st.part_row_y, value.clone()));
        let name = Bilingual {
            en: format!("{} = {}", problem.part_label.en, problem.part_value),
            ar: problem
                .part_label
                .ar
                .as_ref()
                .map(|ar| format!("{ar} = {}", problem.part_value)),
        };
        let above = st.part_row_y + st.bar_height / 2.0 + 0.3;
        let name = text_at(stage, s, &name, 0.4, Point::new(first.center(), above));
        let name = stage.stage(name);
        stage.play(
            [
                Animation::create(first_bar.clone()),
                Animation::fade_in_shifted(name, Vec2::new(0.0, -0.05)),
            ],
            s.rt_norm,
        )?;
        shown.extend(first_bar);

        banner(stage, s, &p.repeat)?;
        for span in rest {
            let clone = stage.stage_all(self.bar(*span, st.part_row_y, value.clone()));
            stage.play(
                [Animation::fade_in_shifted(clone.clone(), Vec2::new(-0.1, 0.0))],
                s.rt_fast,
            )?;
            shown.extend(clone);
        }
        let row = Span {
            start: first.start,
            width: rest.last().unwrap_or(first).end() - first.start,
        };
        if st.show_grouping_braces {
            stage.play([Animation::fade_out(name)], s.rt_fast)?;
            let lift = st.part_row_y + st.bar_height / 2.0 + 0.08;
            let brace = Visual::segments(&bracket_under(row, lift, -0.2))
                .with_stroke(s.palette.accent, s.stroke_width);
            let count = Bilingual::new(
                format!("{} equal parts", problem.n_parts),
                format!("{} أجزاء متساوية", problem.n_parts),
            );
            let count = text_at(stage, s, &count, 0.4, Point::new(row.center(), lift + 0.5));
            let ids = stage.stage_all([brace, count]);
            stage.play([Animation::create(ids.clone())], s.rt_fast)?;
            shown.extend(ids);
        } else {
            shown.push(name);
        }

        banner(stage, s, &p.merge)?;
        let whole_span = Span {
            start: st.left_anchor_x,
            width: st.part_width(problem.part_value) * f64::from(problem.n_parts),
        };
        let [whole_bar, unknown] = self.bar(whole_span, st.whole_row_y, "?".to_string());
        let whole_rect = whole_span.to_rect(st.whole_row_y, st.bar_height);
        let label_y = st.whole_row_y - st.bar_height / 2.0 - 0.3;
        let whole_name = |value: &str| Bilingual {
            en: format!("{} = {value}", problem.whole_label.en),
            ar: problem.whole_label.ar.as_ref().map(|ar| format!("{ar} = {value}")),
        };
        let label = text_at(stage, s, &whole_name("?"), 0.4, Point::new(whole_span.center(), label_y));
        let ids = stage.stage_all([whole_bar, unknown.with_color(s.palette.highlight), label]);
        stage.play([Animation::create(ids.clone())], s.rt_norm)?;
        let (unknown, label) = (ids[1], ids[2]);
        shown.extend(ids.iter().copied());

        let highlight = stage.stage(surround(s, whole_rect, 0.12));
        stage.play([Animation::create(highlight)], s.rt_fast)?;
        shown.push(highlight);
        let total = math(s, whole.to_string(), 0.6, whole_rect.center());
        let named = text_at(
            stage,
            s,
            &whole_name(&whole.to_string()),
            0.4,
            Point::new(whole_span.center(), label_y),
        );
        stage.play(
            [
                Animation::transform(unknown, total),
                Animation::transform(label, named),
            ],
            s.rt_norm,
        )?;

        banner(stage, s, &p.calc)?;
        let at = Point::new(0.0, BOTTOM_Y + 0.6);
        let mut op = None;
        if st.show_repeated_addition {
            let sum = repeated_addition(problem.part_value, problem.n_parts, whole);
            let id = stage.stage(math(s, sum, 0.8, at));
            stage.play([Animation::write(id)], s.rt_norm)?;
            op = Some(id);
        }
        if st.show_implicit_multiplication {
            let product = math(s, multiplication(problem.part_value, problem.n_parts, whole), 0.9, at)
                .with_color(s.palette.positive);
            match op {
                Some(id) => stage.play([Animation::transform(id, product)], s.rt_norm)?,
                None => {
                    let id = stage.stage(product);
                    stage.play([Animation::write(id)], s.rt_norm)?;
                    op = Some(id);
                }
            }
        }
        shown.extend(op);

        if st.show_verify_step {
            banner(stage, s, &p.verify)?;
            let check = math(s, "✓", 0.9, Point::new(-3.2, at.y)).with_color(s.palette.positive);
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
                "Whole = several equal parts put together",
                "الكل = عدة أجزاء متساوية مجتمعة",
            ),
        )
    }

    fn exploration(&mut self, stage: &mut Stage) -> TiceResult<()> {
        for problem in &self.config.problems {
            self.build_whole(stage, problem)?;
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
                "Discussion: Why do we get the same total?",
                "نقاش: لماذا نحصل على نفس المجموع؟",
            ),
        )?;
        scaffold_card(
            stage,
            s,
            &[
                Bilingual::new("• Each part has the same value.", "• كل جزء له نفس القيمة."),
                Bilingual::new(
                    "• Repeating parts adds the same amount each time.",
                    "• تكرار الأجزاء يعني جمع نفس المقدار.",
                ),
                Bilingual::new(
                    "• The whole is the sum of all parts.",
                    "• الكل هو مجموع الأجزاء.",
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
                "Institutionalization: Whole from equal parts",
                "التثبيت: الكل من أجزاء متساوية",
            ),
        )?;
        let rules = [
            math(s, "Whole = part + part + … + part  (n times)", 0.75, Point::new(0.0, 0.5)),
            math(s, "Whole = n × part", 0.9, Point::new(0.0, -0.5)).with_color(s.palette.positive),
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
        let a = &self.config.assessment;
        banner(
            stage,
            s,
            &Bilingual::new(
                format!(
                    "Mini-check: One part = {}. Number of equal parts = {}. Find the whole.",
                    a.part_value, a.n_parts
                ),
                format!(
                    "تحقق صغير: جزء واحد = {}، وعدد الأجزاء = {}. أوجد الكل.",
                    a.part_value, a.n_parts
                ),
            ),
        )?;
        let shown = self.build_whole(stage, a)?;
        stage.wait(0.35)?;
        stage.play([Animation::fade_out(shown)], s.rt_fast)
    }

    fn outro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        recap(
            stage,
            &self.style.base,
            &[
                Bilingual::new("• Identify one part value", "• نحدد قيمة جزء واحد"),
                Bilingual::new(
                    "• Identify number of equal parts",
                    "• نحدد عدد الأجزاء المتساوية",
                ),
                Bilingual::new(
                    "• Repeat and assemble to build the whole",
                    "• نكرر ونجمع لبناء الكل",
                ),
                Bilingual::new("• Then write the calculation", "• ثم نكتب الحساب"),
            ],
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/whole_from_parts.rs"]
mod tests;
