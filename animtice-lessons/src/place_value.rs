//! `m3-l01-place-value`: numbers up to 999 with base-ten blocks, digit cards and the expanded
//! form `n = h×100 + t×10 + u`.

use animtice::{
    Animation, Bilingual, Lesson, LessonConfig, LessonContent, LessonStyle, Line, ObjectId,
    Orientation, Point, Rect, Stage, Step, StyleConfig, TiceError, TiceResult, Vec2, Visual,
    banner, bar_dividers, clear, grid_points,
};

use crate::common::{mark_correct, math, recap, scaffold_card, subtitle, surround, text_at};

pub const MAX_NUMBER: u32 = 999;

/// Centers of the hundreds, tens and units zones.
const ZONES: [Point; 3] = [
    Point::new(-4.0, -0.2),
    Point::new(0.6, -0.2),
    Point::new(4.4, -0.2),
];
const ZONE_LABEL_Y: f64 = -2.6;
const NUMBER_Y: f64 = 2.45;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlaceValueStyle {
    #[serde(flatten)]
    pub base: StyleConfig,
    /// Side of one unit cube; a ten is 10 of them long, a hundred 10 by 10.
    pub block_unit: f64,
    pub show_digit_cards: bool,
    pub show_number_line: bool,
}

impl Default for PlaceValueStyle {
    fn default() -> Self {
        Self {
            base: StyleConfig::default(),
            block_unit: 0.12,
            show_digit_cards: true,
            show_number_line: true,
        }
    }
}

impl LessonStyle for PlaceValueStyle {
    fn base(&self) -> &StyleConfig {
        &self.base
    }

    fn validate(&self) -> TiceResult<()> {
        self.base.validate()?;
        if !(self.block_unit > 0.0 && self.block_unit <= 0.15) {
            return Err(TiceError::validation("block_unit must be in (0, 0.15]"));
        }
        Ok(())
    }
}

/// Hundreds, tens and units digits of a number in `0..=999`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digits {
    pub hundreds: u32,
    pub tens: u32,
    pub units: u32,
}

impl Digits {
    pub fn of(n: u32) -> TiceResult<Self> {
        if n > MAX_NUMBER {
            return Err(TiceError::validation(format!(
                "{n} is out of range 0..={MAX_NUMBER}"
            )));
        }
        Ok(Self {
            hundreds: n / 100,
            tens: n / 10 % 10,
            units: n % 10,
        })
    }

    pub fn value(self) -> u32 {
        self.hundreds * 100 + self.tens * 10 + self.units
    }

    pub fn as_array(self) -> [u32; 3] {
        [self.hundreds, self.tens, self.units]
    }

    /// `h×100 + t×10 + u`.
    pub fn expanded(self) -> String {
        format!(
            "{}×100 + {}×10 + {}",
            self.hundreds, self.tens, self.units
        )
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlaceValuePrompts {
    pub observe: Bilingual,
    pub compare: Bilingual,
    pub hypothesize: Bilingual,
}

impl Default for PlaceValuePrompts {
    fn default() -> Self {
        Self {
            observe: Bilingual::new(
                "Observe: how many hundreds, tens and units?",
                "لاحظ: كم مئة وكم عشرة وكم وحدة؟",
            ),
            compare: Bilingual::new(
                "Compare: which number is bigger, and why?",
                "قارن: أي العددين أكبر، ولماذا؟",
            ),
            hypothesize: Bilingual::new(
                "What does a 0 digit tell us?",
                "ماذا يعني الرقم 0؟",
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlaceValueConfig {
    #[serde(flatten)]
    pub header: LessonConfig,
    pub examples: Vec<u32>,
    pub assessment: u32,
    /// Answer choices; exactly one must be the assessment number.
    pub options: Vec<u32>,
    pub prompts: PlaceValuePrompts,
}

impl Default for PlaceValueConfig {
    fn default() -> Self {
        Self {
            header: LessonConfig::new(Bilingual::new(
                "Numbers up to 999: hundreds, tens and units",
                "الأعداد إلى 999: المئات والعشرات والوحدات",
            )),
            examples: vec![275, 509, 903, 118],
            assessment: 342,
            options: vec![243, 342, 324],
            prompts: PlaceValuePrompts::default(),
        }
    }
}

impl LessonContent for PlaceValueConfig {
    fn header(&self) -> &LessonConfig {
        &self.header
    }

    fn validate(&self) -> TiceResult<()> {
        if self.examples.len() < 2 {
            return Err(TiceError::validation("at least two examples are needed to compare"));
        }
        for n in self.examples.iter().chain(&self.options).chain([&self.assessment]) {
            Digits::of(*n)?;
        }
        let hits = self.options.iter().filter(|o| **o == self.assessment).count();
        if hits != 1 {
            return Err(TiceError::validation(format!(
                "exactly one option must be {}, found {hits}",
                self.assessment
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct PlaceValueLesson {
    config: PlaceValueConfig,
    style: PlaceValueStyle,
}

impl Lesson for PlaceValueLesson {
    type Style = PlaceValueStyle;
    type Config = PlaceValueConfig;

    const ID: &'static str = "m3-l01-place-value";

    fn new(config: PlaceValueConfig, style: PlaceValueStyle) -> TiceResult<Self> {
        config.validate()?;
        style.validate()?;
        Ok(Self { config, style })
    }

    fn config(&self) -> &PlaceValueConfig {
        &self.config
    }

    fn style(&self) -> &PlaceValueStyle {
        &self.style
    }

    fn build_steps(&self) -> Vec<Step<Self>> {
        let mut steps = vec![
            Step::new("intro", Self::intro),
            Step::new("exploration_concrete", Self::exploration),
            Step::new("collective_discussion", Self::discussion),
        ];
        if self.style.show_digit_cards {
            steps.push(Step::new("transition_to_symbols", Self::transition_to_symbols));
        }
        steps.extend([
            Step::new("institutionalization_rule", Self::institutionalization),
            Step::new("mini_assessment", Self::mini_assessment),
            Step::new("outro", Self::outro),
        ]);
        steps
    }
}

fn place_names() -> [Bilingual; 3] {
    [
        Bilingual::new("hundreds", "مئات"),
        Bilingual::new("tens", "عشرات"),
        Bilingual::new("units", "وحدات"),
    ]
}

impl PlaceValueLesson {
    fn block(&self, rect: Rect, lines: Vec<Line>) -> [Visual; 2] {
        let s = &self.style.base;
        let body = Visual::rect(rect)
            .with_stroke(s.palette.shape, 2.5)
            .with_fill(s.palette.shape, 0.35);
        let grid = Visual::segments(&lines).with_stroke(s.palette.shape, 1.0);
        [body, grid]
    }

    fn hundred(&self, center: Point) -> TiceResult<[Visual; 2]> {
        let side = 10.0 * self.style.block_unit;
        let r = Rect::from_center_size(center, (side, side));
        let mut lines = bar_dividers(r, 10, Orientation::Vertical)?;
        lines.extend(bar_dividers(r, 10, Orientation::Horizontal)?);
        Ok(self.block(r, lines))
    }

    fn ten(&self, center: Point) -> TiceResult<[Visual; 2]> {
        let b = self.style.block_unit;
        let r = Rect::from_center_size(center, (b, 10.0 * b));
        Ok(self.block(r, bar_dividers(r, 10, Orientation::Horizontal)?))
    }

    fn unit(&self, center: Point) -> Visual {
        let b = self.style.block_unit;
        let s = &self.style.base;
        Visual::rect(Rect::from_center_size(center, (b, b)))
            .with_stroke(s.palette.accent, 2.0)
            .with_fill(s.palette.accent, 0.6)
    }

    /// Block visuals of one place, laid out in its zone.
    fn zone_blocks(&self, place: usize, count: u32) -> TiceResult<Vec<Visual>> {
        let b = self.style.block_unit;
        let n = count as usize;
        let (cols, dx, dy) = match place {
            0 => (3, 10.0 * b + 0.15, 10.0 * b + 0.15),
            1 => (9, b + 0.22, 0.0),
            _ => (3, b + 0.18, b + 0.18),
        };
        let cols = cols.min(n);
        let rows = n.div_ceil(cols.max(1));
        let mut out = Vec::new();
        for c in grid_points(rows, cols, ZONES[place], dx, dy).into_iter().take(n) {
            match place {
                0 => out.extend(self.hundred(c)?),
                1 => out.extend(self.ten(c)?),
                _ => out.push(self.unit(c)),
            }
        }
        Ok(out)
    }

    /// All blocks for `n`, revealed place by place. Returns every id drawn.
    fn show_blocks(
        &self,
        stage: &mut Stage,
        n: u32,
        with_counts: bool,
    ) -> TiceResult<Vec<ObjectId>> {
        let s = &self.style.base;
        let digits = Digits::of(n)?;
        let names = place_names();
        let mut ids = Vec::new();
        for (place, count) in digits.as_array().into_iter().enumerate() {
            let blocks = stage.stage_all(self.zone_blocks(place, count)?);
            if !blocks.is_empty() {
                stage.play(
                    [Animation::fade_in_shifted(blocks.clone(), Vec2::new(0.0, 0.15))],
                    s.rt_norm,
                )?;
            }
            ids.extend(blocks);
            if with_counts {
                let label = format!("{}: {count}", stage.text(&names[place]));
                let label = math(s, label, 0.5, Point::new(ZONES[place].x, ZONE_LABEL_Y));
                let label = stage.stage(label);
                stage.play([Animation::write(label)], s.rt_fast)?;
                ids.push(label);
            }
        }
        Ok(ids)
    }

    fn intro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        subtitle(
            stage,
            &self.style.base,
            &Bilingual::new(
                "Ten units make a ten, ten tens make a hundred.",
                "عشر وحدات تكوّن عشرة، وعشر عشرات تكوّن مئة.",
            ),
        )
    }

    fn exploration(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(stage, s, &self.config.prompts.observe)?;
        for n in &self.config.examples {
            self.show_blocks(stage, *n, true)?;
            let number = math(s, n.to_string(), 1.1, Point::new(0.0, NUMBER_Y))
                .with_color(s.palette.highlight);
            let number = stage.stage(number);
            stage.play([Animation::write(number)], s.rt_norm)?;
            stage.wait(0.4)?;
            clear(stage, s)?;
        }
        Ok(())
    }

    fn discussion(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        let ex = &self.config.examples;
        banner(stage, s, &self.config.prompts.compare)?;

        let (a, b) = (ex[0], ex[1]);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let sign = if lo == hi { "=" } else { "<" };
        let compare = math(s, format!("{lo} {sign} {hi}"), 1.1, Point::new(0.0, 1.2))
            .with_color(s.palette.highlight);
        let compare = stage.stage(compare);
        stage.play([Animation::write(compare)], s.rt_norm)?;
        let hint = Bilingual::new(
            "Compare the hundreds first, then the tens, then the units.",
            "نقارن المئات أولاً، ثم العشرات، ثم الوحدات.",
        );
        let hint = text_at(stage, s, &hint, 0.5, Point::new(0.0, 0.3));
        let hint = stage.stage(hint);
        stage.play([Animation::fade_in_shifted(hint, Vec2::new(0.0, 0.1))], s.rt_fast)?;
        stage.wait(0.5)?;
        stage.play([Animation::fade_out([compare, hint])], s.rt_fast)?;

        banner(stage, s, &self.config.prompts.hypothesize)?;
        let zero_example = ex
            .iter()
            .copied()
            .find(|n| Digits::of(*n).is_ok_and(|d| d.tens == 0 || d.units == 0))
            .unwrap_or(ex[0]);
        scaffold_card(
            stage,
            s,
            &[
                Bilingual::new(
                    format!("• In {zero_example}, a 0 means: none of that place."),
                    format!("• في {zero_example}، الصفر يعني: لا شيء في تلك الخانة."),
                ),
                Bilingual::new(
                    "• The place of a digit gives its value.",
                    "• خانة الرقم تحدد قيمته.",
                ),
                Bilingual::new(
                    "• 10 units = 1 ten, 10 tens = 1 hundred.",
                    "• 10 وحدات = عشرة، 10 عشرات = مئة.",
                ),
            ],
        )
    }

    fn transition_to_symbols(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(
            stage,
            s,
            &Bilingual::new("From blocks to digits", "من المكعبات إلى الأرقام"),
        )?;
        let n = self.config.examples[0];
        let digits = Digits::of(n)?;
        let mut ids = self.show_blocks(stage, n, false)?;

        let headers = [
            Bilingual::new("H", "م"),
            Bilingual::new("T", "ع"),
            Bilingual::new("U", "و"),
        ];
        for (place, d) in digits.as_array().into_iter().enumerate() {
            let c = Point::new(ZONES[place].x, -2.45);
            let card = Rect::from_center_size(c, (1.0, 1.1));
            let frame = Visual::rounded_rect(card, 0.12).with_stroke(s.palette.text, 3.0);
            let head = text_at(stage, s, &headers[place], 0.4, Point::new(c.x, card.y1 + 0.25))
                .with_color(s.palette.muted);
            let digit = math(s, d.to_string(), 1.0, c).with_color(s.palette.highlight);
            let card_ids = stage.stage_all([frame, head, digit]);
            stage.play(
                [Animation::fade_in_shifted(card_ids.clone(), Vec2::new(0.0, 0.15))],
                s.rt_fast,
            )?;
            ids.extend(card_ids);
        }
        let number = math(s, n.to_string(), 1.1, Point::new(0.0, NUMBER_Y))
            .with_color(s.palette.highlight);
        let number = stage.stage(number);
        stage.play([Animation::write(number)], s.rt_norm)?;
        ids.push(number);
        stage.wait(0.5)?;
        stage.play([Animation::fade_out(ids)], s.rt_fast)
    }

    /// Ticks every 100 from 0 to 1000, with `n` marked.
    fn number_line(&self, stage: &mut Stage, n: u32) -> TiceResult<Vec<ObjectId>> {
        let s = &self.style.base;
        let (x0, x1, y) = (-6.0, 6.0, -2.3);
        let x_of = |v: u32| x0 + (x1 - x0) * f64::from(v) / 1000.0;
        let axis = Visual::line(Point::new(x0, y), Point::new(x1, y))
            .with_stroke(s.palette.text, 3.0);
        let ticks: Vec<Line> = (0..=10)
            .map(|i| {
                let x = x_of(i * 100);
                Line::new(Point::new(x, y - 0.12), Point::new(x, y + 0.12))
            })
            .collect();
        let ticks = Visual::segments(&ticks).with_stroke(s.palette.text, 2.5);
        let mut parts = vec![axis, ticks];
        parts.extend((0..=10).map(|i| {
            math(s, (i * 100).to_string(), 0.32, Point::new(x_of(i * 100), y - 0.38))
                .with_color(s.palette.muted)
        }));
        let mut ids = stage.stage_all(parts);
        stage.play([Animation::create(ids.clone())], s.rt_norm)?;

        let marker = Visual::dot(Point::new(x_of(0), y), 0.1)
            .with_fill(s.palette.highlight, 1.0)
            .with_z(4);
        let marker = stage.stage(marker);
        stage.play([Animation::fade_in(marker)], s.rt_fast)?;
        stage.play([Animation::move_along(marker, vec![Point::new(x_of(n), y)])], s.rt_slow)?;
        let tag = math(s, n.to_string(), 0.5, Point::new(x_of(n), y + 0.4))
            .with_color(s.palette.highlight);
        let tag = stage.stage(tag);
        stage.play([Animation::write(tag)], s.rt_fast)?;
        ids.extend([marker, tag]);
        Ok(ids)
    }

    fn institutionalization(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(
            stage,
            s,
            &Bilingual::new("Institutionalization: place value", "التثبيت: القيمة المكانية"),
        )?;
        let rule = math(s, "n = h×100 + t×10 + u", 1.0, Point::new(0.0, 1.4));
        let frame = surround(s, rule.bounds(), 0.2);
        let mut ids = stage.stage_all([rule, frame]);
        stage.play([Animation::write(ids[0]), Animation::create(ids[1])], s.rt_norm)?;

        let n = self.config.examples[0];
        let digits = Digits::of(n)?;
        let example = math(s, format!("{n} = {}", digits.expanded()), 0.8, Point::new(0.0, 0.3))
            .with_color(s.palette.highlight);
        let example = stage.stage(example);
        stage.play([Animation::write(example)], s.rt_norm)?;
        ids.push(example);

        if self.style.show_number_line {
            ids.extend(self.number_line(stage, n)?);
        }
        stage.wait(0.5)?;
        stage.play([Animation::fade_out(ids)], s.rt_fast)
    }

    fn mini_assessment(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(
            stage,
            s,
            &Bilingual::new(
                "Mini-check: which number do the blocks show?",
                "تحقق صغير: ما العدد الذي تمثله المكعبات؟",
            ),
        )?;
        let target = self.config.assessment;
        let mut ids = self.show_blocks(stage, target, false)?;

        let n = self.config.options.len();
        let mut answer = None;
        for (i, option) in self.config.options.iter().enumerate() {
            let center = Point::new((i as f64 - (n as f64 - 1.0) / 2.0) * 2.2, -2.6);
            let card = Rect::from_center_size(center, (1.6, 0.8));
            let frame = Visual::rounded_rect(card, 0.12).with_stroke(s.palette.muted, 3.0);
            let pair = stage.stage_all([frame, math(s, option.to_string(), 0.8, center)]);
            stage.play([Animation::fade_in(pair.clone())], s.rt_fast)?;
            ids.extend(pair);
            if *option == target {
                answer = Some(card);
            }
        }
        stage.wait(0.6)?;
        let card = answer.ok_or_else(|| TiceError::lesson("no option matches the blocks"))?;
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
                    "• 10 units = 1 ten, 10 tens = 1 hundred",
                    "• 10 وحدات = عشرة، 10 عشرات = مئة",
                ),
                Bilingual::new("• Each digit's place gives its value", "• خانة الرقم تحدد قيمته"),
                Bilingual::new("• n = h×100 + t×10 + u", "• n = h×100 + t×10 + u"),
            ],
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/place_value.rs"]
mod tests;
