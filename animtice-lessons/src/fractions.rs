//! `m3-l04-fractions`: a whole cut into equal parts, some of them taken, written `n/d`.

use animtice::{
    Animation, Bilingual, Lesson, LessonConfig, LessonContent, LessonStyle, ObjectId, Orientation,
    Point, Rect, Stage, Step, StyleConfig, TiceError, TiceResult, Vec2, Visual, banner,
    bar_dividers, circle_sectors, circle_spokes, clear, part_boxes,
};

use crate::common::{BOTTOM_Y, fraction_text, mark_correct, math, recap, scaffold_card, text_at};

/// Largest denominator a model can be cut into and stay readable.
pub const MAX_DENOMINATOR: u32 = 24;

/// Horizontal distance between models shown side by side.
const COLUMN_GAP: f64 = 4.4;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FractionsStyle {
    #[serde(flatten)]
    pub base: StyleConfig,
    /// Size multiplier applied to every fraction model.
    pub shape_scale: f64,
    pub show_names: bool,
    pub show_mini_assessment: bool,
}

impl Default for FractionsStyle {
    fn default() -> Self {
        Self {
            base: StyleConfig {
                fill_opacity: 0.2,
                ..StyleConfig::default()
            },
            shape_scale: 1.15,
            show_names: true,
            show_mini_assessment: true,
        }
    }
}

impl LessonStyle for FractionsStyle {
    fn base(&self) -> &StyleConfig {
        &self.base
    }

    fn validate(&self) -> TiceResult<()> {
        self.base.validate()?;
        if !(self.shape_scale.is_finite() && self.shape_scale > 0.0) {
            return Err(TiceError::validation("shape_scale must be > 0"));
        }
        Ok(())
    }
}

/// The whole a fraction is taken from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelShape {
    /// A disc cut into sectors (pizza, cake).
    #[default]
    Circle,
    /// A rectangle cut into strips (chocolate bar).
    Rect,
    /// A thin bar cut into segments (a length of ribbon).
    Bar,
}

/// `numerator` of `denominator` equal parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fraction {
    pub numerator: u32,
    pub denominator: u32,
}

impl Fraction {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// A proper fraction of a drawable whole: `0 < d <= MAX_DENOMINATOR`, `n <= d`.
    pub fn validate(self) -> TiceResult<()> {
        if self.denominator == 0 || self.denominator > MAX_DENOMINATOR {
            return Err(TiceError::validation(format!(
                "denominator {} must be in 1..={MAX_DENOMINATOR}",
                self.denominator
            )));
        }
        if self.numerator > self.denominator {
            return Err(TiceError::validation(format!(
                "numerator {} exceeds denominator {}",
                self.numerator, self.denominator
            )));
        }
        Ok(())
    }

    pub fn text(self) -> String {
        fraction_text(self.numerator, self.denominator)
    }

    /// Both terms multiplied by `factor`.
    pub fn scaled(self, factor: u32) -> Option<Self> {
        Some(Self::new(
            self.numerator.checked_mul(factor)?,
            self.denominator.checked_mul(factor)?,
        ))
    }

    /// Same quantity: `a/b` and `c/d` with `a * d == c * b`.
    pub fn is_equivalent(self, other: Self) -> bool {
        u64::from(self.numerator) * u64::from(other.denominator)
            == u64::from(other.numerator) * u64::from(self.denominator)
    }
}

impl std::fmt::Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FractionExample {
    pub name: Bilingual,
    #[serde(flatten)]
    pub fraction: Fraction,
    #[serde(default)]
    pub shape: ModelShape,
    #[serde(default)]
    pub orientation: Orientation,
}

impl FractionExample {
    pub fn new(name: Bilingual, fraction: Fraction, shape: ModelShape) -> Self {
        Self {
            name,
            fraction,
            shape,
            orientation: Orientation::Vertical,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FractionsPrompts {
    pub observe: Bilingual,
    pub name: Bilingual,
    pub taken: Bilingual,
    pub symbol: Bilingual,
}

impl Default for FractionsPrompts {
    fn default() -> Self {
        Self {
            observe: Bilingual::new(
                "Observe: the whole is cut into equal parts.",
                "لاحظ: الكل مقسّم إلى أجزاء متساوية.",
            ),
            name: Bilingual::new(
                "How many equal parts make the whole?",
                "كم جزءاً متساوياً يكوّن الكل؟",
            ),
            taken: Bilingual::new(
                "Color the parts we take.",
                "نلوّن الأجزاء التي نأخذها.",
            ),
            symbol: Bilingual::new(
                "Write it: parts taken / equal parts.",
                "نكتب: الأجزاء المأخوذة / الأجزاء المتساوية.",
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FractionsConfig {
    #[serde(flatten)]
    pub header: LessonConfig,
    /// Shown side by side during exploration (at most three).
    pub examples: Vec<FractionExample>,
    pub notation: FractionExample,
    pub assessment: FractionExample,
    /// Choices for the matching check; exactly one must read as the assessment fraction.
    pub options: Vec<Fraction>,
    pub prompts: FractionsPrompts,
}

impl Default for FractionsConfig {
    fn default() -> Self {
        Self {
            header: LessonConfig::new(Bilingual::new(
                "Representing and reading fractions",
                "تمثيل الكسور وقراءتها",
            )),
            examples: vec![
                FractionExample::new(
                    Bilingual::new("Pizza", "بيتزا"),
                    Fraction::new(1, 4),
                    ModelShape::Circle,
                ),
                FractionExample::new(
                    Bilingual::new("Chocolate bar", "لوح شوكولاتة"),
                    Fraction::new(2, 6),
                    ModelShape::Rect,
                ),
                FractionExample::new(
                    Bilingual::new("Ribbon", "شريط"),
                    Fraction::new(3, 5),
                    ModelShape::Bar,
                ),
            ],
            notation: FractionExample::new(
                Bilingual::new("Cake", "كعكة"),
                Fraction::new(3, 5),
                ModelShape::Circle,
            ),
            assessment: FractionExample::new(
                Bilingual::new("Which fraction is colored?", "ما الكسر الملوّن؟"),
                Fraction::new(2, 4),
                ModelShape::Rect,
            ),
            options: vec![Fraction::new(1, 4), Fraction::new(2, 4), Fraction::new(3, 4)],
            prompts: FractionsPrompts::default(),
        }
    }
}

impl LessonContent for FractionsConfig {
    fn header(&self) -> &LessonConfig {
        &self.header
    }

    fn validate(&self) -> TiceResult<()> {
        if self.examples.is_empty() || self.examples.len() > 3 {
            return Err(TiceError::validation("between 1 and 3 examples are needed"));
        }
        for ex in self
            .examples
            .iter()
            .chain([&self.notation, &self.assessment])
        {
            ex.fraction.validate()?;
        }
        for o in &self.options {
            o.validate()?;
        }
        let hits = self
            .options
            .iter()
            .filter(|o| **o == self.assessment.fraction)
            .count();
        if hits != 1 {
            return Err(TiceError::validation(format!(
                "exactly one option must be {}, found {hits}",
                self.assessment.fraction
            )));
        }
        Ok(())
    }
}

/// A drawn fraction model: the whole, its cuts, and the shading of the taken parts.
struct Model {
    outline: Visual,
    cuts: Option<Visual>,
    shading: Vec<Visual>,
}

#[derive(Debug)]
pub struct FractionsLesson {
    config: FractionsConfig,
    style: FractionsStyle,
}

impl Lesson for FractionsLesson {
    type Style = FractionsStyle;
    type Config = FractionsConfig;

    const ID: &'static str = "m3-l04-fractions";

    fn new(config: FractionsConfig, style: FractionsStyle) -> TiceResult<Self> {
        config.validate()?;
        style.validate()?;
        Ok(Self { config, style })
    }

    fn config(&self) -> &FractionsConfig {
        &self.config
    }

    fn style(&self) -> &FractionsStyle {
        &self.style
    }

    fn build_steps(&self) -> Vec<Step<Self>> {
        let mut steps = vec![
            Step::new("intro", Self::intro),
            Step::new("exploration_examples", Self::exploration),
            Step::new("collective_discussion_compare", Self::discussion),
            Step::new(
                "institutionalization_fraction_notation",
                Self::institutionalization,
            ),
        ];
        if self.style.show_mini_assessment {
            steps.push(Step::new("mini_assessment_match", Self::mini_assessment));
        }
        steps.push(Step::new("outro", Self::outro));
        steps
    }
}

impl FractionsLesson {
    fn model(&self, ex: &FractionExample, center: Point) -> TiceResult<Model> {
        let s = &self.style.base;
        let k = self.style.shape_scale;
        let Fraction {
            numerator,
            denominator,
        } = ex.fraction;
        let shade = |v: Visual| {
            v.without_stroke()
                .with_fill(s.palette.accent, s.fill_opacity + 0.45)
                .with_z(-1)
        };
        let stroke = |v: Visual| v.with_stroke(s.palette.shape, s.stroke_width);

        let model = match ex.shape {
            ModelShape::Circle => {
                let r = 1.1 * k;
                let spokes = if denominator > 1 {
                    Some(stroke(Visual::segments(&circle_spokes(center, r, denominator)?)))
                } else {
                    None
                };
                let shading = circle_sectors(center, r, denominator)?
                    .into_iter()
                    .take(numerator as usize)
                    .map(|p| shade(Visual::path(p)))
                    .collect();
                Model {
                    outline: stroke(Visual::circle(center, r)),
                    cuts: spokes,
                    shading,
                }
            }
            ModelShape::Rect | ModelShape::Bar => {
                let size = match ex.shape {
                    ModelShape::Rect => (2.4 * k, 1.6 * k),
                    _ => (3.6 * k, 0.6 * k),
                };
                let whole = Rect::from_center_size(center, size);
                let orientation = match ex.shape {
                    ModelShape::Bar => Orientation::Vertical,
                    _ => ex.orientation,
                };
                let cuts = bar_dividers(whole, denominator, orientation)?;
                let shading = part_boxes(whole, denominator, orientation)?
                    .into_iter()
                    .take(numerator as usize)
                    .map(|r| shade(Visual::rect(r)))
                    .collect();
                Model {
                    outline: stroke(Visual::rect(whole)),
                    cuts: (!cuts.is_empty()).then(|| stroke(Visual::segments(&cuts))),
                    shading,
                }
            }
        };
        Ok(model)
    }

    /// Draw the whole and its cuts; returns the ids and the shading still to be revealed.
    fn draw_whole(
        &self,
        stage: &mut Stage,
        model: Model,
    ) -> TiceResult<(Vec<ObjectId>, Vec<Visual>)> {
        let mut ids = vec![stage.stage(model.outline)];
        ids.extend(model.cuts.map(|c| stage.stage(c)));
        stage.play([Animation::create(ids.clone())], self.style.base.rt_norm)?;
        Ok((ids, model.shading))
    }

    fn shade(&self, stage: &mut Stage, shading: Vec<Visual>) -> TiceResult<Vec<ObjectId>> {
        let ids = stage.stage_all(shading);
        if !ids.is_empty() {
            stage.play([Animation::fade_in(ids.clone())], self.style.base.rt_norm)?;
        }
        Ok(ids)
    }

    fn column_x(i: usize, n: usize) -> f64 {
        (i as f64 - (n as f64 - 1.0) / 2.0) * COLUMN_GAP
    }

    fn intro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        crate::common::subtitle(
            stage,
            &self.style.base,
            &Bilingual::new(
                "Sharing a whole fairly: equal parts.",
                "نتقاسم الكل بعدل: أجزاء متساوية.",
            ),
        )
    }

    fn exploration(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        let n = self.config.examples.len();
        let y = 0.3;

        banner(stage, s, &self.config.prompts.observe)?;
        let mut pending = Vec::with_capacity(n);
        for (i, ex) in self.config.examples.iter().enumerate() {
            let center = Point::new(Self::column_x(i, n), y);
            let model = self.model(ex, center)?;
            let top = model.outline.bounds().y1;
            let (_, shading) = self.draw_whole(stage, model)?;
            if self.style.show_names {
                let name = text_at(stage, s, &ex.name, 0.5, Point::new(center.x, top + 0.4));
                let name = stage.stage(name);
                stage.play([Animation::fade_in_shifted(name, Vec2::new(0.0, 0.1))], s.rt_fast)?;
            }
            pending.push(shading);
        }

        banner(stage, s, &self.config.prompts.name)?;
        let counts: Vec<Visual> = self
            .config
            .examples
            .iter()
            .enumerate()
            .map(|(i, ex)| {
                let parts = Bilingual::new(
                    format!("{} equal parts", ex.fraction.denominator),
                    format!("{} أجزاء متساوية", ex.fraction.denominator),
                );
                text_at(stage, s, &parts, 0.42, Point::new(Self::column_x(i, n), y - 1.75))
                    .with_color(s.palette.muted)
            })
            .collect();
        let counts = stage.stage_all(counts);
        stage.play([Animation::write(counts.clone())], s.rt_norm)?;

        banner(stage, s, &self.config.prompts.taken)?;
        for shading in pending {
            self.shade(stage, shading)?;
        }

        banner(stage, s, &self.config.prompts.symbol)?;
        stage.play([Animation::fade_out(counts)], s.rt_fast)?;
        let symbols: Vec<Visual> = self
            .config
            .examples
            .iter()
            .enumerate()
            .map(|(i, ex)| {
                math(s, ex.fraction.text(), 0.9, Point::new(Self::column_x(i, n), y - 1.8))
                    .with_color(s.palette.highlight)
            })
            .collect();
        let symbols = stage.stage_all(symbols);
        for id in symbols {
            stage.play([Animation::write(id)], s.rt_fast)?;
        }
        Ok(())
    }

    fn discussion(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = self.style.base.clone();
        banner(
            stage,
            &s,
            &Bilingual::new(
                "Discussion: what do the two numbers tell us?",
                "نقاش: ماذا يخبرنا العددان؟",
            ),
        )?;
        clear(stage, &s)?;
        scaffold_card(
            stage,
            &s,
            &[
                Bilingual::new(
                    "• The bottom number counts the equal parts of the whole.",
                    "• العدد السفلي يعدّ الأجزاء المتساوية للكل.",
                ),
                Bilingual::new(
                    "• The top number counts the parts we take.",
                    "• العدد العلوي يعدّ الأجزاء المأخوذة.",
                ),
                Bilingual::new(
                    "• The parts must be equal, whatever the shape.",
                    "• يجب أن تكون الأجزاء متساوية مهما كان الشكل.",
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
                "Institutionalization: numerator and denominator",
                "التثبيت: البسط والمقام",
            ),
        )?;
        let ex = &self.config.notation;
        let model = self.model(ex, Point::new(-3.2, -0.2))?;
        let (mut ids, shading) = self.draw_whole(stage, model)?;
        ids.extend(self.shade(stage, shading)?);

        let x = 1.6;
        let num = math(s, ex.fraction.numerator.to_string(), 1.2, Point::new(x, 0.55));
        let bar = Visual::line(Point::new(x - 0.45, -0.2), Point::new(x + 0.45, -0.2))
            .with_stroke(s.palette.text, s.stroke_width);
        let den = math(s, ex.fraction.denominator.to_string(), 1.2, Point::new(x, -0.95));
        let symbol = stage.stage_all([num, bar, den]);
        stage.play([Animation::write(symbol.clone())], s.rt_norm)?;
        ids.extend(symbol);

        let labels = [
            (
                Bilingual::new("numerator: parts taken", "البسط: الأجزاء المأخوذة"),
                0.55,
            ),
            (
                Bilingual::new("denominator: equal parts", "المقام: الأجزاء المتساوية"),
                -0.95,
            ),
        ];
        for (text, ly) in labels {
            let v = crate::common::bullet_lines(stage, s, &[text], 0.48, Point::new(x + 0.9, ly));
            let v = stage.stage_all(v.into_iter().map(|v| v.with_color(s.palette.highlight)));
            stage.play([Animation::fade_in_shifted(v.clone(), Vec2::new(-0.1, 0.0))], s.rt_fast)?;
            ids.extend(v);
        }
        let Fraction {
            numerator: n,
            denominator: d,
        } = ex.fraction;
        let reading = Bilingual::new(
            format!("We read {n}/{d}: {n} out of {d}"),
            format!("نقرأ {n}/{d}: {n} من {d}"),
        );
        let reading = text_at(stage, s, &reading, 0.52, Point::new(0.0, BOTTOM_Y + 0.3));
        let reading = stage.stage(reading);
        stage.play([Animation::write(reading)], s.rt_norm)?;
        ids.push(reading);

        stage.wait(0.5)?;
        stage.play([Animation::fade_out(ids)], s.rt_fast)
    }

    fn mini_assessment(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        let ex = &self.config.assessment;
        banner(stage, s, &ex.name)?;

        let model = self.model(ex, Point::new(-3.4, -0.2))?;
        let (mut ids, shading) = self.draw_whole(stage, model)?;
        ids.extend(self.shade(stage, shading)?);

        let n = self.config.options.len();
        let mut answer = None;
        for (i, option) in self.config.options.iter().enumerate() {
            let center = Point::new(2.2 + (i as f64 - (n as f64 - 1.0) / 2.0) * 1.7, -0.2);
            let card = Rect::from_center_size(center, (1.3, 1.0));
            let frame = Visual::rounded_rect(card, 0.12).with_stroke(s.palette.muted, 3.0);
            let label = math(s, option.text(), 0.85, center);
            let pair = stage.stage_all([frame, label]);
            stage.play(
                [Animation::fade_in_shifted(pair.clone(), Vec2::new(0.0, 0.1))],
                s.rt_fast,
            )?;
            ids.extend(pair);
            if *option == ex.fraction {
                answer = Some(card);
            }
        }
        stage.wait(0.6)?;
        let card =
            answer.ok_or_else(|| TiceError::lesson("no option matches the colored fraction"))?;
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
                    "• A fraction names equal parts of a whole",
                    "• الكسر يسمّي أجزاء متساوية من الكل",
                ),
                Bilingual::new(
                    "• denominator = number of equal parts",
                    "• المقام = عدد الأجزاء المتساوية",
                ),
                Bilingual::new("• numerator = parts taken", "• البسط = الأجزاء المأخوذة"),
            ],
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/fractions.rs"]
mod tests;
