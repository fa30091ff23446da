//! `m3-l07-equivalent-fractions`: cutting every part into `k` smaller parts names the same
//! quantity with a new fraction.

use animtice::{
    Animation, Bilingual, Lesson, LessonConfig, LessonContent, LessonStyle, Line, ObjectId,
    Orientation, Point, Rect, Stage, Step, StyleConfig, TiceError, TiceResult, Vec2, Visual,
    banner, bar_dividers, circle_sectors, circle_spokes, clear, part_boxes, refinement_dividers,
};

use crate::common::{BOTTOM_Y, mark_correct, math, recap, scaffold_card, subtitle, text_at};
use crate::fractions::Fraction;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EquivalentStyle {
    #[serde(flatten)]
    pub base: StyleConfig,
    pub bar_width: f64,
    pub bar_height: f64,
    /// Vertical distance between the original bar and its refined copy.
    pub bar_gap: f64,
    pub show_circle_variant: bool,
    pub show_simplify_back: bool,
}

impl Default for EquivalentStyle {
    fn default() -> Self {
        Self {
            base: StyleConfig::default(),
            bar_width: 6.6,
            bar_height: 1.2,
            bar_gap: 1.9,
            show_circle_variant: true,
            show_simplify_back: true,
        }
    }
}

impl LessonStyle for EquivalentStyle {
    fn base(&self) -> &StyleConfig {
        &self.base
    }

    fn validate(&self) -> TiceResult<()> {
        self.base.validate()?;
        for (name, v) in [
            ("bar_width", self.bar_width),
            ("bar_height", self.bar_height),
            ("bar_gap", self.bar_gap),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(TiceError::validation(format!("{name} must be > 0")));
            }
        }
        if self.bar_gap <= self.bar_height {
            return Err(TiceError::validation("bar_gap must exceed bar_height"));
        }
        Ok(())
    }
}

/// `fraction` and its refinement by `factor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EquivalentExample {
    #[serde(flatten)]
    pub fraction: Fraction,
    pub factor: u32,
}

impl EquivalentExample {
    pub const fn new(numerator: u32, denominator: u32, factor: u32) -> Self {
        Self {
            fraction: Fraction::new(numerator, denominator),
            factor,
        }
    }

    pub fn refined(self) -> TiceResult<Fraction> {
        self.fraction
            .scaled(self.factor)
            .ok_or_else(|| TiceError::validation("refined fraction overflows"))
    }

    pub fn validate(self) -> TiceResult<()> {
        self.fraction.validate()?;
        if self.fraction.numerator == 0 {
            return Err(TiceError::validation("example numerator must be > 0"));
        }
        if self.factor < 2 {
            return Err(TiceError::validation(format!(
                "factor {} must be at least 2",
                self.factor
            )));
        }
        self.refined()?.validate()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EquivalentPrompts {
    pub start: Bilingual,
    pub duplicate: Bilingual,
    pub subdivide: Bilingual,
    pub same_quantity: Bilingual,
    pub reveal_label: Bilingual,
    pub simplify: Bilingual,
}

impl Default for EquivalentPrompts {
    fn default() -> Self {
        Self {
            start: Bilingual::new("Start with a fraction bar.", "نبدأ بشريط كسر."),
            duplicate: Bilingual::new(
                "Make an identical copy.",
                "ننشئ نسخة مطابقة.",
            ),
            subdivide: Bilingual::new(
                "Cut every part into smaller equal parts.",
                "نقسم كل جزء إلى أجزاء أصغر متساوية.",
            ),
            same_quantity: Bilingual::new(
                "The colored quantity did not change!",
                "الكمية الملوّنة لم تتغير!",
            ),
            reveal_label: Bilingual::new(
                "Same quantity, new name.",
                "الكمية نفسها، باسم جديد.",
            ),
            simplify: Bilingual::new(
                "Going back: divide both terms by the same number.",
                "العودة: نقسم الحدّين على العدد نفسه.",
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EquivalentConfig {
    #[serde(flatten)]
    pub header: LessonConfig,
    pub examples: Vec<EquivalentExample>,
    /// The fraction shown in the matching check.
    pub target: Fraction,
    /// Exactly one option must be equivalent to `target`.
    pub options: Vec<Fraction>,
    pub prompts: EquivalentPrompts,
}

impl Default for EquivalentConfig {
    fn default() -> Self {
        Self {
            header: LessonConfig::new(Bilingual::new(
                "Equivalent fractions",
                "الكسور المتكافئة",
            )),
            examples: vec![EquivalentExample::new(1, 2, 2), EquivalentExample::new(2, 3, 2)],
            target: Fraction::new(3, 4),
            options: vec![Fraction::new(3, 8), Fraction::new(6, 8), Fraction::new(4, 6)],
            prompts: EquivalentPrompts::default(),
        }
    }
}

impl LessonContent for EquivalentConfig {
    fn header(&self) -> &LessonConfig {
        &self.header
    }

    fn validate(&self) -> TiceResult<()> {
        if self.examples.is_empty() {
            return Err(TiceError::validation("at least one example is needed"));
        }
        for ex in &self.examples {
            ex.validate()?;
        }
        self.target.validate()?;
        for o in &self.options {
            o.validate()?;
        }
        let hits = self
            .options
            .iter()
            .filter(|o| o.is_equivalent(self.target))
            .count();
        if hits != 1 {
            return Err(TiceError::validation(format!(
                "exactly one option must be equivalent to {}, found {hits}",
                self.target
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct EquivalentLesson {
    config: EquivalentConfig,
    style: EquivalentStyle,
}

impl Lesson for EquivalentLesson {
    type Style = EquivalentStyle;
    type Config = EquivalentConfig;

    const ID: &'static str = "m3-l07-equivalent-fractions";

    fn new(config: EquivalentConfig, style: EquivalentStyle) -> TiceResult<Self> {
        config.validate()?;
        style.validate()?;
        Ok(Self { config, style })
    }

    fn config(&self) -> &EquivalentConfig {
        &self.config
    }

    fn style(&self) -> &EquivalentStyle {
        &self.style
    }

    fn build_steps(&self) -> Vec<Step<Self>> {
        vec![
            Step::new("intro", Self::intro),
            Step::new("exploration_examples", Self::exploration),
            Step::new("collective_discussion_why_equal", Self::discussion),
            Step::new(
                "institutionalization_vocab_and_simplify",
                Self::institutionalization,
            ),
            Step::new("mini_assessment_match", Self::mini_assessment),
            Step::new("outro", Self::outro),
        ]
    }
}

impl EquivalentLesson {
    fn bar(&self, center_y: f64) -> Rect {
        Rect::from_center_size(
            (-0.6, center_y),
            (self.style.bar_width, self.style.bar_height),
        )
    }

    fn outline(&self, v: Visual) -> Visual {
        v.with_stroke(self.style.base.palette.shape, self.style.base.stroke_width)
    }

    fn shading(&self, bar: Rect, fraction: Fraction) -> TiceResult<Vec<Visual>> {
        let s = &self.style.base;
        Ok(part_boxes(bar, fraction.denominator, Orientation::Vertical)?
            .into_iter()
            .take(fraction.numerator as usize)
            .map(|r| {
                Visual::rect(r)
                    .without_stroke()
                    .with_fill(s.palette.accent, 0.55)
                    .with_z(-1)
            })
            .collect())
    }

    /// Outline, dividers and shading of `fraction` on `bar`, not yet shown.
    fn bar_model(&self, bar: Rect, fraction: Fraction) -> TiceResult<Vec<Visual>> {
        let mut out = vec![self.outline(Visual::rect(bar))];
        let cuts = bar_dividers(bar, fraction.denominator, Orientation::Vertical)?;
        if !cuts.is_empty() {
            out.push(self.outline(Visual::segments(&cuts)));
        }
        out.extend(self.shading(bar, fraction)?);
        Ok(out)
    }

    fn label_at(&self, bar: Rect) -> Point {
        Point::new(bar.x1 + 0.9, bar.center().y)
    }

    fn explore_one(&self, stage: &mut Stage, ex: EquivalentExample) -> TiceResult<()> {
        let s = &self.style.base;
        let p = &self.config.prompts;
        let refined = ex.refined()?;
        let top = self.bar(1.0);
        let bottom = self.bar(1.0 - self.style.bar_gap);
        let drop = Vec2::new(0.0, bottom.center().y - top.center().y);

        banner(stage, s, &p.start)?;
        let original = stage.stage_all(self.bar_model(top, ex.fraction)?);
        stage.play([Animation::create(original.clone())], s.rt_norm)?;
        let label = math(s, ex.fraction.text(), 0.9, self.label_at(top));
        let label = stage.stage(label);
        stage.play([Animation::write(label)], s.rt_fast)?;

        banner(stage, s, &p.duplicate)?;
        let copy = stage.stage_all(self.bar_model(top, ex.fraction)?);
        stage.play([Animation::fade_in(copy.clone())], s.rt_fast)?;
        stage.play([Animation::shift(copy.clone(), drop)], s.rt_norm)?;

        banner(stage, s, &p.subdivide)?;
        let fine = refinement_dividers(
            bottom,
            ex.fraction.denominator,
            ex.factor,
            Orientation::Vertical,
        )?;
        let fine = Visual::segments(&fine)
            .with_stroke(s.palette.highlight, s.stroke_width * 0.75)
            .with_z(1);
        let fine = stage.stage(fine);
        stage.play([Animation::create(fine)], s.rt_slow)?;

        banner(stage, s, &p.same_quantity)?;
        // The coarse shading gives way to the fine parts it is made of.
        let coarse_shading: Vec<ObjectId> = copy
            .iter()
            .rev()
            .take(ex.fraction.numerator as usize)
            .copied()
            .collect();
        let fine_shading = stage.stage_all(self.shading(bottom, refined)?);
        stage.play(
            [
                Animation::fade_out(coarse_shading),
                Animation::fade_in(fine_shading.clone()),
            ],
            s.rt_norm,
        )?;
        let edge_x = top.x0 + top.width() * f64::from(ex.fraction.numerator)
            / f64::from(ex.fraction.denominator);
        let guide = Visual::line(
            Point::new(edge_x, top.y1 + 0.2),
            Point::new(edge_x, bottom.y0 - 0.2),
        )
        .with_stroke(s.palette.highlight, s.stroke_width)
        .with_z(4);
        let guide = stage.stage(guide);
        stage.play([Animation::create(guide)], s.rt_fast)?;
        stage.play([Animation::indicate(fine_shading)], s.rt_fast)?;

        banner(stage, s, &p.reveal_label)?;
        let new_label = stage.add(math(s, ex.fraction.text(), 0.9, self.label_at(top)));
        stage.play(
            [Animation::transform(
                new_label,
                math(s, refined.text(), 0.9, self.label_at(bottom)).with_color(s.palette.highlight),
            )],
            s.rt_norm,
        )?;
        let equation = format!("{} = {}", ex.fraction, refined);
        let equation = math(s, equation, 1.0, Point::new(0.0, BOTTOM_Y + 0.2))
            .with_color(s.palette.positive);
        let equation = stage.stage(equation);
        stage.play([Animation::write(equation)], s.rt_norm)?;
        stage.wait(0.5)?;
        clear(stage, s)
    }

    fn intro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        subtitle(
            stage,
            &self.style.base,
            &Bilingual::new(
                "Can two different fractions show the same amount?",
                "هل يمكن لكسرين مختلفين أن يمثلا الكمية نفسها؟",
            ),
        )
    }

    fn exploration(&mut self, stage: &mut Stage) -> TiceResult<()> {
        for ex in &self.config.examples {
            self.explore_one(stage, *ex)?;
        }
        Ok(())
    }

    /// Two discs, one cut in `d` and one in `d * k`, with the same amount colored.
    fn circle_variant(&self, stage: &mut Stage, ex: EquivalentExample) -> TiceResult<()> {
        let s = &self.style.base;
        let refined = ex.refined()?;
        let r = 1.0;
        let mut ids = Vec::new();
        for (fraction, cx) in [(ex.fraction, -2.2), (refined, 2.2)] {
            let c = Point::new(cx, 0.8);
            let mut parts = vec![self.outline(Visual::circle(c, r))];
            let spokes: Vec<Line> = circle_spokes(c, r, fraction.denominator)?;
            if fraction.denominator > 1 {
                parts.push(self.outline(Visual::segments(&spokes)));
            }
            parts.extend(
                circle_sectors(c, r, fraction.denominator)?
                    .into_iter()
                    .take(fraction.numerator as usize)
                    .map(|p| {
                        Visual::path(p)
                            .without_stroke()
                            .with_fill(s.palette.accent, 0.55)
                            .with_z(-1)
                    }),
            );
            parts.push(math(s, fraction.text(), 0.8, Point::new(cx, 0.8 - r - 0.45)));
            ids.extend(stage.stage_all(parts));
        }
        ids.push(stage.stage(math(s, "=", 1.2, Point::new(0.0, 0.8))));
        stage.play([Animation::fade_in(ids.clone())], s.rt_norm)?;
        stage.wait(0.5)?;
        stage.play([Animation::fade_out(ids)], s.rt_fast)
    }

    fn discussion(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(
            stage,
            s,
            &Bilingual::new("Discussion: why are they equal?", "نقاش: لماذا هما متساويان؟"),
        )?;
        if self.style.show_circle_variant {
            self.circle_variant(stage, self.config.examples[0])?;
        }
        scaffold_card(
            stage,
            s,
            &[
                Bilingual::new(
                    "• Each part was cut into the same number of smaller parts.",
                    "• قُسم كل جزء إلى العدد نفسه من الأجزاء الأصغر.",
                ),
                Bilingual::new(
                    "• Both numbers are multiplied by that same number.",
                    "• يُضرب العددان في العدد نفسه.",
                ),
                Bilingual::new(
                    "• The colored amount stays the same.",
                    "• تبقى الكمية الملوّنة نفسها.",
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
                "Institutionalization: equivalent fractions",
                "التثبيت: الكسور المتكافئة",
            ),
        )?;
        let vocab = Bilingual::new(
            "Fractions that name the same quantity are equivalent.",
            "الكسور التي تمثل الكمية نفسها كسور متكافئة.",
        );
        let vocab = text_at(stage, s, &vocab, 0.55, Point::new(0.0, 1.6));
        let rule = math(s, "a/b = (a × k)/(b × k)", 1.0, Point::new(0.0, 0.6))
            .with_color(s.palette.highlight);
        let mut ids = stage.stage_all([vocab, rule]);
        for id in &ids {
            stage.play([Animation::write(*id)], s.rt_norm)?;
        }

        let ex = self.config.examples[0];
        let refined = ex.refined()?;
        let k = ex.factor;
        let forward = format!(
            "{} = ({} × {k})/({} × {k}) = {}",
            ex.fraction, ex.fraction.numerator, ex.fraction.denominator, refined
        );
        let forward = stage.stage(math(s, forward, 0.8, Point::new(0.0, -0.4)));
        stage.play([Animation::write(forward)], s.rt_norm)?;
        ids.push(forward);

        if self.style.show_simplify_back {
            banner(stage, s, &self.config.prompts.simplify)?;
            let back = format!(
                "{} = ({} ÷ {k})/({} ÷ {k}) = {}",
                refined, refined.numerator, refined.denominator, ex.fraction
            );
            let back = math(s, back, 0.8, Point::new(0.0, -1.4)).with_color(s.palette.positive);
            let back = stage.stage(back);
            stage.play([Animation::write(back)], s.rt_norm)?;
            ids.push(back);
        }
        stage.wait(0.5)?;
        stage.play([Animation::fade_out(ids)], s.rt_fast)
    }

    fn mini_assessment(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        let target = self.config.target;
        banner(
            stage,
            s,
            &Bilingual::new(
                format!("Mini-check: which fraction equals {target}?"),
                format!("تحقق صغير: أي كسر يساوي {target}؟"),
            ),
        )?;
        let bar = Rect::from_center_size(
            (0.0, 1.3),
            (self.style.bar_width * 0.7, self.style.bar_height * 0.8),
        );
        let mut ids = stage.stage_all(self.bar_model(bar, target)?);
        ids.push(stage.stage(math(s, target.text(), 0.85, self.label_at(bar))));
        stage.play([Animation::fade_in(ids.clone())], s.rt_norm)?;

        let n = self.config.options.len();
        let mut answer = None;
        for (i, option) in self.config.options.iter().enumerate() {
            let center = Point::new((i as f64 - (n as f64 - 1.0) / 2.0) * 2.2, -0.8);
            let card = Rect::from_center_size(center, (1.5, 1.0));
            let frame = Visual::rounded_rect(card, 0.12).with_stroke(s.palette.muted, 3.0);
            let pair = stage.stage_all([frame, math(s, option.text(), 0.85, center)]);
            stage.play(
                [Animation::fade_in_shifted(pair.clone(), Vec2::new(0.0, 0.1))],
                s.rt_fast,
            )?;
            ids.extend(pair);
            if option.is_equivalent(target) {
                answer = Some(card);
            }
        }
        stage.wait(0.6)?;
        let card =
            answer.ok_or_else(|| TiceError::lesson("no option is equivalent to the target"))?;
        ids.extend(mark_correct(stage, s, card)?);
        stage.wait(0.5)?;
        stage.play([Animation::fade_out(ids)], s.rt_fast)
    }

    fn outro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        recap(
            stage,
            &self.style.base,
            &[
                Bilingual::new(
                    "• Equivalent fractions show the same quantity",
                    "• الكسور المتكافئة تمثل الكمية نفسها",
                ),
                Bilingual::new(
                    "• Multiply both terms by the same number",
                    "• نضرب الحدّين في العدد نفسه",
                ),
                Bilingual::new(
                    "• Divide both terms to simplify",
                    "• نقسم الحدّين للتبسيط",
                ),
            ],
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/equivalent.rs"]
mod tests;
