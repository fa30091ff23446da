//! `m3-l13-adding-fractions`: adding fractions with the same denominator.
//!
//! Both fractions are shaded on bars cut the same way, then the shaded parts are slid onto one
//! result bar and counted. A sum past the whole spills onto a second bar.

use animtice::{
    Animation, Bilingual, Lesson, LessonConfig, LessonContent, LessonStyle, ObjectId, Orientation,
    Point, Rect, Stage, Step, StyleConfig, TiceError, TiceResult, Vec2, Visual, banner,
    bar_dividers, clear, part_boxes,
};

use crate::common::{
    BOTTOM_Y, fraction_text, math, panel, recap, scaffold_card, subtitle, surround, text_at,
};
use crate::fractions::Fraction;

/// Rows of the two addend bars, and of the first result bar.
const FIRST_Y: f64 = 1.0;
const SECOND_Y: f64 = -0.4;
const RESULT_Y: f64 = 0.3;
const BAR_CENTER_X: f64 = 0.6;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AddingStyle {
    #[serde(flatten)]
    pub base: StyleConfig,
    pub bar_width: f64,
    pub bar_height: f64,
    pub show_why_same_denominator: bool,
    /// Say whether the sum makes a whole, and write it as a mixed number past one.
    pub show_mixed_form_if_ge_1: bool,
    pub show_counter_ticks: bool,
}

impl Default for AddingStyle {
    fn default() -> Self {
        Self {
            base: StyleConfig {
                fill_opacity: 0.22,
                ..StyleConfig::default()
            },
            bar_width: 6.0,
            bar_height: 0.6,
            show_why_same_denominator: true,
            show_mixed_form_if_ge_1: true,
            show_counter_ticks: true,
        }
    }
}

impl LessonStyle for AddingStyle {
    fn base(&self) -> &StyleConfig {
        &self.base
    }

    fn validate(&self) -> TiceResult<()> {
        self.base.validate()?;
        for (name, v) in [("bar_width", self.bar_width), ("bar_height", self.bar_height)] {
            if !(v.is_finite() && v > 0.0) {
                return Err(TiceError::validation(format!("{name} must be > 0")));
            }
        }
        if self.bar_width > 9.0 {
            return Err(TiceError::validation("bar_width must be <= 9"));
        }
        Ok(())
    }
}

/// `a/denominator + b/denominator`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FractionSum {
    pub a: u32,
    pub b: u32,
    pub denominator: u32,
}

impl FractionSum {
    pub const fn new(a: u32, b: u32, denominator: u32) -> Self {
        Self { a, b, denominator }
    }

    /// Each addend is a non-zero proper fraction of a drawable whole.
    pub fn validate(self) -> TiceResult<()> {
        for n in [self.a, self.b] {
            if n == 0 {
                return Err(TiceError::validation("addends must be > 0"));
            }
            Fraction::new(n, self.denominator).validate()?;
        }
        Ok(())
    }

    /// Numerator of the sum; the denominator stays.
    pub fn total(self) -> u32 {
        self.a + self.b
    }

    pub fn sum(self) -> Fraction {
        Fraction::new(self.total(), self.denominator)
    }

    /// Bars needed to hold the sum.
    pub fn wholes_needed(self) -> u32 {
        self.total().div_ceil(self.denominator).max(1)
    }

    pub fn expression(self) -> String {
        format!(
            "{} + {} = {}",
            fraction_text(self.a, self.denominator),
            fraction_text(self.b, self.denominator),
            fraction_text(self.total(), self.denominator)
        )
    }

    /// The sum as a whole or mixed number, when it reaches one whole.
    pub fn mixed_text(self) -> Option<String> {
        let (total, d) = (self.total(), self.denominator);
        if total < d {
            return None;
        }
        let (whole, rest) = (total / d, total % d);
        Some(if rest == 0 {
            whole.to_string()
        } else {
            format!("{whole} {}", fraction_text(rest, d))
        })
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AddingPrompts {
    pub model: Bilingual,
    pub partition: Bilingual,
    pub shade_first: Bilingual,
    pub shade_second: Bilingual,
    pub combine: Bilingual,
    pub symbol: Bilingual,
    pub whole_check: Bilingual,
}

impl Default for AddingPrompts {
    fn default() -> Self {
        Self {
            model: Bilingual::new(
                "Model both fractions on the SAME whole.",
                "مثّل الكسرين على نفس الكل.",
            ),
            partition: Bilingual::new(
                "We lock the partition: same denominator = same-size parts.",
                "نثبت التقسيم: نفس المقام = أجزاء متساوية الحجم.",
            ),
            shade_first: Bilingual::new("Shade the first fraction.", "ظلّل الكسر الأول."),
            shade_second: Bilingual::new(
                "Shade the second fraction using the SAME partition.",
                "ظلّل الكسر الثاني باستعمال نفس التقسيم.",
            ),
            combine: Bilingual::new(
                "Combine the shaded parts and count.",
                "ادمج الأجزاء المظللة ثم عدّها.",
            ),
            symbol: Bilingual::new(
                "Now we write it as a fraction addition:",
                "الآن نكتب الجمع بالكسر:",
            ),
            whole_check: Bilingual::new(
                "Does the sum make a whole (1) or more?",
                "هل المجموع يساوي كلاً (1) أو أكثر؟",
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AddingConfig {
    #[serde(flatten)]
    pub header: LessonConfig,
    pub examples: Vec<FractionSum>,
    pub assessment: FractionSum,
    /// The sum announced at the end of the check, written over the same denominator.
    pub assessment_answer: Fraction,
    pub prompts: AddingPrompts,
}

impl Default for AddingConfig {
    fn default() -> Self {
        Self {
            header: LessonConfig::new(Bilingual::new("Adding fractions", "جمع الأعداد الكسرية")),
            examples: vec![
                FractionSum::new(1, 2, 4),
                FractionSum::new(3, 2, 5),
                FractionSum::new(3, 4, 6),
            ],
            assessment: FractionSum::new(2, 3, 7),
            assessment_answer: Fraction::new(5, 7),
            prompts: AddingPrompts::default(),
        }
    }
}

impl LessonContent for AddingConfig {
    fn header(&self) -> &LessonConfig {
        &self.header
    }

    fn validate(&self) -> TiceResult<()> {
        if self.examples.is_empty() {
            return Err(TiceError::validation("at least one example is needed"));
        }
        for (i, ex) in self.examples.iter().enumerate() {
            ex.validate()
                .map_err(|e| TiceError::validation(format!("example {}: {e}", i + 1)))?;
        }
        self.assessment
            .validate()
            .map_err(|e| TiceError::validation(format!("assessment: {e}")))?;
        if self.assessment_answer != self.assessment.sum() {
            return Err(TiceError::validation(format!(
                "assessment answer {} is wrong: {}",
                self.assessment_answer,
                self.assessment.expression()
            )));
        }
        Ok(())
    }
}

/// One bar cut into `denominator` parts: its outline, its cuts and its part boxes.
struct Bar {
    rect: Rect,
    outline: Visual,
    cuts: Option<Visual>,
    parts: Vec<Rect>,
}

#[derive(Debug)]
pub struct AddingLesson {
    config: AddingConfig,
    style: AddingStyle,
}

impl Lesson for AddingLesson {
    type Style = AddingStyle;
    type Config = AddingConfig;

    const ID: &'static str = "m3-l13-adding-fractions";

    fn new(config: AddingConfig, style: AddingStyle) -> TiceResult<Self> {
        config.validate()?;
        style.validate()?;
        Ok(Self { config, style })
    }

    fn config(&self) -> &AddingConfig {
        &self.config
    }

    fn style(&self) -> &AddingStyle {
        &self.style
    }

    fn build_steps(&self) -> Vec<Step<Self>> {
        vec![
            Step::new("intro", Self::intro),
            Step::new("exploration_examples", Self::exploration),
            Step::new("collective_discussion_why_denominator", Self::discussion),
            Step::new("institutionalization_rule", Self::institutionalization),
            Step::new("mini_assessment", Self::mini_assessment),
            Step::new("outro", Self::outro),
        ]
    }
}

impl AddingLesson {
    fn bar(&self, y: f64, denominator: u32) -> TiceResult<Bar> {
        let s = &self.style.base;
        let rect = Rect::from_center_size(
            (BAR_CENTER_X, y),
            (self.style.bar_width, self.style.bar_height),
        );
        let cuts = bar_dividers(rect, denominator, Orientation::Vertical)?;
        Ok(Bar {
            rect,
            outline: Visual::rect(rect).with_stroke(s.palette.shape, s.stroke_width),
            cuts: (!cuts.is_empty())
                .then(|| Visual::segments(&cuts).with_stroke(s.palette.shape, s.stroke_width)),
            parts: part_boxes(rect, denominator, Orientation::Vertical)?,
        })
    }

    fn shaded(&self, part: Rect) -> Visual {
        let s = &self.style.base;
        Visual::rect(part)
            .without_stroke()
            .with_fill(s.palette.accent, s.fill_opacity + 0.45)
            .with_z(-1)
    }

    fn label_at(bar: &Bar) -> Point {
        Point::new(bar.rect.x0 - 0.9, bar.rect.center().y)
    }

    /// Outline and cuts as staged ids, in that order.
    fn stage_bar(stage: &mut Stage, bar: &Bar) -> Vec<ObjectId> {
        let mut ids = vec![stage.stage(bar.outline.clone())];
        ids.extend(bar.cuts.clone().map(|c| stage.stage(c)));
        ids
    }

    /// Draw a bar and shade its first `n` parts, labelled `n/d` on the left.
    fn shade_addend(
        &self,
        stage: &mut Stage,
        bar: &Bar,
        n: u32,
        d: u32,
    ) -> TiceResult<(Vec<ObjectId>, ObjectId)> {
        let s = &self.style.base;
        let shading: Vec<Visual> = bar.parts.iter().take(n as usize).map(|r| self.shaded(*r)).collect();
        let shading = stage.stage_all(shading);
        let label = stage.stage(math(s, fraction_text(n, d), 0.9, Self::label_at(bar)));
        stage.play(
            [Animation::fade_in(shading.clone()), Animation::write(label)],
            s.rt_norm,
        )?;
        Ok((shading, label))
    }

    /// Model, combine and write one sum. Returns everything left on screen.
    fn add(&self, stage: &mut Stage, sum: FractionSum) -> TiceResult<Vec<ObjectId>> {
        let s = &self.style.base;
        let st = &self.style;
        let p = &self.config.prompts;
        let d = sum.denominator;
        tracing::debug!(a = sum.a, b = sum.b, denominator = d, "adding fractions");

        banner(stage, s, &p.model)?;
        let first = self.bar(FIRST_Y, d)?;
        let second = self.bar(SECOND_Y, d)?;
        let first_ids = Self::stage_bar(stage, &first);
        let second_ids = Self::stage_bar(stage, &second);
        stage.play(
            [
                Animation::create(first_ids.clone()),
                Animation::create(second_ids.clone()),
            ],
            s.rt_norm,
        )?;

        banner(stage, s, &p.partition)?;
        let locks = stage.stage_all([
            surround(s, first.rect, 0.08),
            surround(s, second.rect, 0.08),
        ]);
        stage.play([Animation::create(locks.clone())], s.rt_fast)?;
        stage.play([Animation::fade_out(locks)], s.rt_fast)?;

        banner(stage, s, &p.shade_first)?;
        let (shade_a, label_a) = self.shade_addend(stage, &first, sum.a, d)?;
        banner(stage, s, &p.shade_second)?;
        let (shade_b, label_b) = self.shade_addend(stage, &second, sum.b, d)?;

        banner(stage, s, &p.combine)?;
        let rows = sum.wholes_needed();
        let results: Vec<Bar> = (0..rows)
            .map(|k| self.bar(RESULT_Y - f64::from(k) * (st.bar_height + 0.45), d))
            .collect::<TiceResult<_>>()?;
        let result_parts: Vec<Rect> = results.iter().flat_map(|b| b.parts.clone()).collect();

        let mut moves = Vec::new();
        let mut shown = Vec::new();
        // The addend bars become the result bars; a spare second bar leaves.
        for (k, ids) in [&first_ids, &second_ids].into_iter().enumerate() {
            match results.get(k) {
                Some(target) => {
                    moves.push(Animation::transform(ids[0], target.outline.clone()));
                    if let (Some(cut), Some(target_cuts)) = (ids.get(1), &target.cuts) {
                        moves.push(Animation::transform(*cut, target_cuts.clone()));
                    }
                    shown.extend(ids.iter().copied());
                }
                None => moves.push(Animation::fade_out(ids.clone())),
            }
        }
        for (id, part) in shade_a.iter().chain(&shade_b).zip(&result_parts) {
            moves.push(Animation::transform(*id, self.shaded(*part)));
        }
        moves.push(Animation::fade_out(label_b));
        stage.play(moves, s.rt_slow)?;
        shown.extend(shade_a.iter().chain(&shade_b).copied());

        if st.show_counter_ticks {
            let ticks: Vec<Visual> = result_parts
                .iter()
                .take(sum.total() as usize)
                .enumerate()
                .map(|(k, r)| {
                    let at = Point::new(r.center().x, r.y1 + 0.22);
                    math(s, (k + 1).to_string(), 0.4, at).with_color(s.palette.highlight)
                })
                .collect();
            let ticks = stage.stage_all(ticks);
            stage.play(
                [Animation::fade_in_shifted(ticks.clone(), Vec2::new(0.0, 0.1))],
                s.rt_norm,
            )?;
            shown.extend(ticks);
        }

        banner(stage, s, &p.symbol)?;
        let expr = math(s, sum.expression(), 0.9, Point::new(0.0, BOTTOM_Y + 0.5));
        let expr = stage.stage(expr);
        stage.play([Animation::write(expr)], s.rt_norm)?;
        shown.push(expr);

        if st.show_mixed_form_if_ge_1
            && let Some(mixed) = sum.mixed_text()
        {
            banner(stage, s, &p.whole_check)?;
            let tag = if sum.total() == d {
                Bilingual::new("It makes exactly 1 whole.", "يساوي كلاً واحداً تماماً.")
            } else {
                Bilingual::new(
                    format!("It is more than 1 whole: {mixed}"),
                    format!("أكبر من 1: {mixed}"),
                )
            };
            let tag = text_at(stage, s, &tag, 0.55, Point::new(0.0, BOTTOM_Y + 1.2))
                .with_color(s.palette.positive);
            let tag = stage.stage(tag);
            stage.play([Animation::fade_in_shifted(tag, Vec2::new(0.0, 0.1))], s.rt_fast)?;
            shown.push(tag);
        }

        let total_label = math(
            s,
            fraction_text(sum.total(), d),
            0.9,
            Self::label_at(&results[0]),
        );
        stage.play([Animation::transform(label_a, total_label)], s.rt_fast)?;
        shown.push(label_a);
        Ok(shown)
    }

    fn intro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        subtitle(
            stage,
            &self.style.base,
            &Bilingual::new(
                "Combine equal parts of the SAME whole",
                "نجمع أجزاء متساوية من نفس الكل",
            ),
        )
    }

    fn exploration(&mut self, stage: &mut Stage) -> TiceResult<()> {
        for sum in &self.config.examples {
            self.add(stage, *sum)?;
            stage.wait(0.4)?;
            clear(stage, &self.style.base)?;
        }
        Ok(())
    }

    /// Halves and thirds side by side: one shaded part of each is not the same amount.
    fn unequal_parts(&self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        let halves = self.bar(1.4, 2)?;
        let thirds = self.bar(0.3, 3)?;
        let mut ids = Self::stage_bar(stage, &halves);
        ids.extend(Self::stage_bar(stage, &thirds));
        stage.play([Animation::create(ids.clone())], s.rt_norm)?;
        let shading = stage.stage_all([self.shaded(halves.parts[0]), self.shaded(thirds.parts[0])]);
        let labels = stage.stage_all([
            math(s, "1/2", 0.8, Self::label_at(&halves)),
            math(s, "1/3", 0.8, Self::label_at(&thirds)),
        ]);
        stage.play(
            [Animation::fade_in(shading.clone()), Animation::write(labels.clone())],
            s.rt_norm,
        )?;
        let note = text_at(
            stage,
            s,
            &Bilingual::new(
                "Different partitions → parts are not the same size.",
                "تقسيم مختلف → الأجزاء ليست بنفس الحجم.",
            ),
            0.5,
            Point::new(0.0, -0.5),
        )
        .with_color(s.palette.negative);
        let note = stage.stage(note);
        stage.play([Animation::fade_in(note)], s.rt_fast)?;
        stage.wait(0.6)?;
        ids.extend(shading);
        ids.extend(labels);
        ids.push(note);
        stage.play([Animation::fade_out(ids)], s.rt_fast)
    }

    fn discussion(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(
            stage,
            s,
            &Bilingual::new(
                "Discussion: Why must the denominator be the same?",
                "نقاش: لماذا يجب أن يكون المقام نفسه؟",
            ),
        )?;
        if self.style.show_why_same_denominator {
            self.unequal_parts(stage)?;
        }
        scaffold_card(
            stage,
            s,
            &[
                Bilingual::new(
                    "• Parts must be equal-sized to be counted together.",
                    "• يجب أن تكون الأجزاء متساوية الحجم لنعدّها معاً.",
                ),
                Bilingual::new(
                    "• Same denominator = same partition.",
                    "• نفس المقام = نفس التقسيم.",
                ),
                Bilingual::new(
                    "• Then we can combine shaded parts.",
                    "• عندها يمكن دمج الأجزاء المظللة.",
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
                "Institutionalization: keep denominator, add numerators",
                "التثبيت: نحافظ على المقام ونجمع البسطين",
            ),
        )?;
        let card = Rect::from_center_size((0.0, 0.0), (8.0, 2.8));
        let backdrop = stage.stage(panel(s, card));
        let rule = stage.stage(math(s, "a/n + b/n = (a + b)/n", 1.2, Point::new(0.0, 0.4)));
        let why = text_at(
            stage,
            s,
            &Bilingual::new(
                "Because we are counting the same-size parts.",
                "لأننا نعدّ أجزاءً متساوية الحجم.",
            ),
            0.5,
            Point::new(0.0, -0.6),
        );
        let why = stage.stage(why);
        stage.play([Animation::create(backdrop), Animation::write(rule)], s.rt_norm)?;
        stage.play([Animation::fade_in_shifted(why, Vec2::new(0.0, 0.1))], s.rt_fast)?;
        stage.wait(0.6)?;
        stage.play([Animation::fade_out([backdrop, rule, why])], s.rt_fast)
    }

    fn mini_assessment(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        let sum = self.config.assessment;
        banner(
            stage,
            s,
            &Bilingual::new("Mini-check: Add the shaded parts.", "تحقق صغير: اجمع الأجزاء المظللة."),
        )?;
        let first = self.bar(FIRST_Y, sum.denominator)?;
        let second = self.bar(SECOND_Y, sum.denominator)?;
        let mut ids = Self::stage_bar(stage, &first);
        ids.extend(Self::stage_bar(stage, &second));
        stage.play([Animation::create(ids.clone())], s.rt_norm)?;
        let (a, la) = self.shade_addend(stage, &first, sum.a, sum.denominator)?;
        let (b, lb) = self.shade_addend(stage, &second, sum.b, sum.denominator)?;
        ids.extend(a);
        ids.extend(b);
        ids.extend([la, lb]);

        let q = text_at(
            stage,
            s,
            &Bilingual::new("What is the sum?", "ما هو المجموع؟"),
            0.6,
            Point::new(0.0, -1.4),
        );
        let q = stage.stage(q);
        stage.play([Animation::fade_in(q)], s.rt_fast)?;
        stage.wait(0.8)?;

        let answer = self.config.assessment_answer;
        let reveal = format!(
            "{} + {} = {answer}",
            fraction_text(sum.a, sum.denominator),
            fraction_text(sum.b, sum.denominator)
        );
        let reveal = math(s, reveal, 0.9, Point::new(0.0, BOTTOM_Y + 0.5))
            .with_color(s.palette.positive);
        let boxed = surround(s, reveal.bounds(), 0.12);
        let reveal = stage.stage_all([reveal, boxed]);
        stage.play([Animation::write(reveal[0]), Animation::create(reveal[1])], s.rt_norm)?;
        stage.wait(0.5)?;
        ids.push(q);
        ids.extend(reveal);
        stage.play([Animation::fade_out(ids)], s.rt_fast)
    }

    fn outro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        recap(
            stage,
            &self.style.base,
            &[
                Bilingual::new(
                    "• Same denominator → same-size parts",
                    "• نفس المقام → أجزاء بنفس الحجم",
                ),
                Bilingual::new(
                    "• Combine shaded parts (count them)",
                    "• نجمع الأجزاء المظللة (ونعدّها)",
                ),
                Bilingual::new(
                    "• Keep denominator, add numerators",
                    "• نحافظ على المقام ونجمع البسطين",
                ),
            ],
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/adding.rs"]
mod tests;
