//! `m3-l14-meter`: the meter as a standard unit of length.
//!
//! Objects are measured by laying one-meter pieces end to end from the start mark to the end
//! mark and counting them.

use animtice::{
    Animation, Bilingual, Lesson, LessonConfig, LessonContent, LessonStyle, ObjectId, Point, Rect,
    Span, Stage, Step, StyleConfig, TiceError, TiceResult, Vec2, Visual, banner, clear,
    segment_layout,
};

use crate::common::{
    BOTTOM_Y, bottom_note, mark_correct, math, option_row, recap, scaffold_card, subtitle,
    text_at,
};

pub const MAX_METERS: u32 = 5;

/// Objects must stay inside `[-HALF_WIDTH, HALF_WIDTH]`.
const HALF_WIDTH: f64 = 6.8;
const MEASURE_Y: f64 = 0.2;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MeterStyle {
    #[serde(flatten)]
    pub base: StyleConfig,
    /// How long one meter looks on screen.
    pub meter_length: f64,
    pub meter_height: f64,
    pub object_height: f64,
    /// Seconds to lay down each meter piece.
    pub iteration_run_time: f64,
    pub show_nonstandard_units_demo: bool,
    pub show_snap_guides: bool,
    pub show_iteration_counter: bool,
}

impl Default for MeterStyle {
    fn default() -> Self {
        Self {
            base: StyleConfig {
                fill_opacity: 0.18,
                ..StyleConfig::default()
            },
            meter_length: 2.6,
            meter_height: 0.35,
            object_height: 0.55,
            iteration_run_time: 0.45,
            show_nonstandard_units_demo: true,
            show_snap_guides: true,
            show_iteration_counter: true,
        }
    }
}

impl LessonStyle for MeterStyle {
    fn base(&self) -> &StyleConfig {
        &self.base
    }

    fn validate(&self) -> TiceResult<()> {
        self.base.validate()?;
        for (name, v) in [
            ("meter_length", self.meter_length),
            ("meter_height", self.meter_height),
            ("object_height", self.object_height),
            ("iteration_run_time", self.iteration_run_time),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(TiceError::validation(format!("{name} must be > 0")));
            }
        }
        Ok(())
    }
}

/// A real object drawn as a board, a whole number of meters long.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeasuredObject {
    pub name: Bilingual,
    pub length_m: u32,
    /// Row the object sits on while objects are compared.
    #[serde(default)]
    pub y: f64,
    /// Horizontal shift of its center while objects are compared.
    #[serde(default)]
    pub offset_x: f64,
}

impl MeasuredObject {
    pub fn new(name: Bilingual, length_m: u32, y: f64, offset_x: f64) -> Self {
        Self {
            name,
            length_m,
            y,
            offset_x,
        }
    }

    pub fn validate(&self) -> TiceResult<()> {
        if !(1..=MAX_METERS).contains(&self.length_m) {
            return Err(TiceError::validation(format!(
                "length {} m must be in 1..={MAX_METERS}",
                self.length_m
            )));
        }
        if !(self.y.is_finite() && self.offset_x.is_finite()) {
            return Err(TiceError::validation("object position must be finite"));
        }
        Ok(())
    }

    /// The object's extent along x when centered on `center_x`.
    pub fn span(&self, center_x: f64, meter_length: f64) -> Span {
        let width = f64::from(self.length_m) * meter_length;
        Span {
            start: center_x - width / 2.0,
            width,
        }
    }

    /// `"N m"`.
    pub fn measurement(&self) -> String {
        format!("{} m", self.length_m)
    }
}

/// One-meter pieces laid end to end along `object`, first piece at the start mark.
pub fn meter_pieces(object: Span, length_m: u32) -> TiceResult<Vec<Span>> {
    segment_layout(object.start, object.width, &vec![1.0; length_m as usize])
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MeterPrompts {
    pub compare: Bilingual,
    pub need_unit: Bilingual,
    pub meter: Bilingual,
    pub repeat: Bilingual,
    pub count: Bilingual,
    pub label: Bilingual,
    pub alignment: Bilingual,
}

impl Default for MeterPrompts {
    fn default() -> Self {
        Self {
            compare: Bilingual::new(
                "Can we decide which is longer just by looking?",
                "هل يمكن أن نعرف الأطول فقط بالنظر؟",
            ),
            need_unit: Bilingual::new(
                "We need a common unit to measure.",
                "نحتاج إلى وحدة مشتركة للقياس.",
            ),
            meter: Bilingual::new(
                "This is 1 meter (m). We place it at the start.",
                "هذا متر واحد (m). نضعه عند البداية.",
            ),
            repeat: Bilingual::new(
                "Repeat the meter unit until we reach the end.",
                "نكرر وحدة المتر حتى نصل إلى النهاية.",
            ),
            count: Bilingual::new("Count how many meters fit.", "نعد كم متراً نحتاج."),
            label: Bilingual::new(
                "We write the measurement with the symbol m:",
                "نكتب القياس مع الرمز m:",
            ),
            alignment: Bilingual::new(
                "Alignment matters: start point and end point.",
                "المحاذاة مهمة: نقطة البداية ونقطة النهاية.",
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MeterConfig {
    #[serde(flatten)]
    pub header: LessonConfig,
    pub objects: Vec<MeasuredObject>,
    pub prompts: MeterPrompts,
    pub assessment: MeasuredObject,
    /// Lengths in meters offered as answers; exactly one matches the assessment object.
    pub assessment_options: Vec<u32>,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            header: LessonConfig::new(Bilingual::new(
                "Units of length measurement: the meter (m)",
                "وحدات قياس الأطوال: المتر (m)",
            )),
            objects: vec![
                MeasuredObject::new(Bilingual::new("desk", "مكتب"), 2, 0.7, -1.1),
                MeasuredObject::new(Bilingual::new("rope", "حبل"), 2, -0.7, 0.9),
            ],
            prompts: MeterPrompts::default(),
            assessment: MeasuredObject::new(Bilingual::new("board", "لوح"), 3, 0.0, 0.0),
            assessment_options: vec![2, 3, 4],
        }
    }
}

impl LessonContent for MeterConfig {
    fn header(&self) -> &LessonConfig {
        &self.header
    }

    fn validate(&self) -> TiceResult<()> {
        if self.objects.is_empty() {
            return Err(TiceError::validation("at least one object is needed"));
        }
        for (i, o) in self.objects.iter().enumerate() {
            o.validate()
                .map_err(|e| TiceError::validation(format!("object {}: {e}", i + 1)))?;
        }
        self.assessment
            .validate()
            .map_err(|e| TiceError::validation(format!("assessment: {e}")))?;
        let matching = self
            .assessment_options
            .iter()
            .filter(|o| **o == self.assessment.length_m)
            .count();
        if matching != 1 {
            return Err(TiceError::validation(format!(
                "exactly one option must be {} m, found {matching}",
                self.assessment.length_m
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct MeterLesson {
    config: MeterConfig,
    style: MeterStyle,
}

impl Lesson for MeterLesson {
    type Style = MeterStyle;
    type Config = MeterConfig;

    const ID: &'static str = "m3-l14-meter";

    fn new(config: MeterConfig, style: MeterStyle) -> TiceResult<Self> {
        config.validate()?;
        style.validate()?;
        let placed = config
            .objects
            .iter()
            .map(|o| (o, o.offset_x))
            .chain([(&config.assessment, 0.0)]);
        for (o, center_x) in placed {
            let span = o.span(center_x, style.meter_length);
            if span.start < -HALF_WIDTH || span.end() > HALF_WIDTH {
                return Err(TiceError::validation(format!(
                    "a {} does not fit at meter_length {}",
                    o.measurement(),
                    style.meter_length
                )));
            }
        }
        Ok(Self { config, style })
    }

    fn config(&self) -> &MeterConfig {
        &self.config
    }

    fn style(&self) -> &MeterStyle {
        &self.style
    }

    fn build_steps(&self) -> Vec<Step<Self>> {
        vec![
            Step::new("intro", Self::intro),
            Step::new("exploration_compare", Self::exploration),
            Step::new("collective_discussion_need_unit", Self::discussion),
            Step::new(
                "institutionalization_meter_iteration",
                Self::institutionalization,
            ),
            Step::new("mini_assessment", Self::mini_assessment),
            Step::new("outro", Self::outro),
        ]
    }
}

impl MeterLesson {
    /// The object as a board with its name above it.
    fn board(&self, stage: &Stage, object: &MeasuredObject, span: Span, y: f64) -> [Visual; 2] {
        let s = &self.style.base;
        let rect = span.to_rect(y, self.style.object_height);
        let board = Visual::rounded_rect(rect, 0.18)
            .with_stroke(s.palette.shape, s.stroke_width)
            .with_fill(s.palette.shape, s.fill_opacity);
        let name = text_at(stage, s, &object.name, 0.5, Point::new(rect.x0 - 0.7, y));
        [board, name]
    }

    /// Start and end ticks with their words under them.
    fn endpoints(&self, stage: &Stage, span: Span, y: f64) -> Vec<Visual> {
        let s = &self.style.base;
        let h = self.style.object_height;
        let mut visuals = Vec::new();
        for (x, word) in [
            (span.start, Bilingual::new("start", "بداية")),
            (span.end(), Bilingual::new("end", "نهاية")),
        ] {
            let tick = Visual::line(Point::new(x, y - h), Point::new(x, y + h))
                .with_stroke(s.palette.highlight, s.stroke_width);
            visuals.push(tick);
            visuals.push(text_at(stage, s, &word, 0.45, Point::new(x, y - h - 0.3)));
        }
        visuals
    }

    /// A one-meter piece resting on top of a board centered on row `y`.
    fn piece(&self, span: Span, y: f64, k: usize) -> Visual {
        let s = &self.style.base;
        let row = y + self.style.object_height / 2.0 + self.style.meter_height / 2.0;
        let color = if k % 2 == 0 {
            s.palette.accent
        } else {
            s.palette.highlight
        };
        Visual::rounded_rect(span.to_rect(row, self.style.meter_height), 0.12)
            .with_stroke(color, s.stroke_width)
            .with_fill(color, 0.35)
    }

    /// Lay the meter along `object`, count the pieces and write the measurement.
    fn measure(&self, stage: &mut Stage, object: &MeasuredObject) -> TiceResult<()> {
        let s = &self.style.base;
        let st = &self.style;
        let p = &self.config.prompts;
        tracing::debug!(length_m = object.length_m, "measuring with the meter");

        let span = object.span(0.0, st.meter_length);
        let board = self.board(stage, object, span, MEASURE_Y);
        let board = stage.stage_all(board);
        stage.play([Animation::create(board)], s.rt_norm)?;
        let ends = self.endpoints(stage, span, MEASURE_Y);
        let ends = stage.stage_all(ends);
        stage.play([Animation::fade_in(ends)], s.rt_fast)?;

        banner(stage, s, &p.meter)?;
        let pieces = meter_pieces(span, object.length_m)?;
        let first = stage.stage(self.piece(pieces[0], MEASURE_Y, 0));
        let row_top = MEASURE_Y + st.object_height / 2.0 + st.meter_height;
        let unit_label = math(s, "1 m", 0.5, Point::new(pieces[0].center(), row_top + 0.3));
        let unit_label = stage.stage(unit_label);
        stage.play(
            [
                Animation::fade_in_shifted(first, Vec2::new(0.0, -0.3)),
                Animation::fade_in(unit_label),
            ],
            s.rt_norm,
        )?;

        banner(stage, s, &p.repeat)?;
        let counter_at = Point::new((span.end() + 0.9).min(6.3), MEASURE_Y + 1.4);
        let counter = if st.show_iteration_counter {
            let ring = Visual::circle(counter_at, 0.38).with_stroke(s.palette.highlight, 3.0);
            let ids = stage.stage_all([ring, math(s, "1", 0.7, counter_at)]);
            stage.play([Animation::fade_in(ids.clone())], s.rt_fast)?;
            Some(ids[1])
        } else {
            None
        };
        stage.play([Animation::fade_out(unit_label)], s.rt_fast)?;
        for (k, piece) in pieces.iter().enumerate().skip(1) {
            let id = stage.stage(self.piece(*piece, MEASURE_Y, k));
            let mut anims = vec![Animation::fade_in_shifted(id, Vec2::new(0.4, 0.0))];
            if let Some(counter) = counter {
                anims.push(Animation::transform(
                    counter,
                    math(s, (k + 1).to_string(), 0.7, counter_at),
                ));
            }
            stage.play(anims, st.iteration_run_time)?;
        }

        banner(stage, s, &p.count)?;
        if let Some(counter) = counter {
            stage.play([Animation::indicate(counter)], s.rt_fast)?;
        }

        banner(stage, s, &p.label)?;
        let y = MEASURE_Y - st.object_height - 1.0;
        let result = math(s, object.measurement(), 1.0, Point::new(0.0, y))
            .with_color(s.palette.positive);
        let result = stage.stage(result);
        stage.play([Animation::write(result)], s.rt_norm)?;

        banner(stage, s, &p.alignment)?;
        stage.wait(0.5)?;
        clear(stage, s)
    }

    fn intro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        subtitle(
            stage,
            &self.style.base,
            &Bilingual::new(
                "Estimate vs Measure — we need a standard unit",
                "التقدير vs القياس — نحتاج وحدة معيارية",
            ),
        )
    }

    fn exploration(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(stage, s, &self.config.prompts.compare)?;
        let mut spans = Vec::new();
        for o in &self.config.objects {
            let span = o.span(o.offset_x, self.style.meter_length);
            let board = self.board(stage, o, span, o.y);
            let ids = stage.stage_all(board);
            stage.play([Animation::create(ids)], s.rt_norm)?;
            spans.push((span, o.y));
        }
        if self.style.show_snap_guides {
            let h = self.style.object_height;
            let guides: Vec<Visual> = spans
                .iter()
                .flat_map(|(span, y)| [span.start, span.end()].map(|x| (x, *y)))
                .map(|(x, y)| {
                    Visual::line(Point::new(x, y - h), Point::new(x, y + h))
                        .with_stroke(s.palette.muted, 2.0)
                })
                .collect();
            let guides = stage.stage_all(guides);
            stage.play([Animation::create(guides)], s.rt_fast)?;
        }
        bottom_note(
            stage,
            s,
            &Bilingual::new(
                "Looks confusing… because they are not aligned.",
                "يبدو الأمر محيّراً… لأنهما غير مُحاذيين.",
            ),
        )?;
        stage.wait(0.6)?;
        clear(stage, s)
    }

    /// Two hand spans of different sizes: the same object would get different counts.
    fn hand_spans(&self, stage: &mut Stage) -> TiceResult<Vec<ObjectId>> {
        let s = &self.style.base;
        let mut visuals = Vec::new();
        for (i, (width, name)) in [
            (1.1, Bilingual::new("hand span A", "شبر أ")),
            (1.6, Bilingual::new("hand span B", "شبر ب")),
        ]
        .into_iter()
        .enumerate()
        {
            let y = 1.3 - i as f64 * 1.1;
            let r = Rect::from_center_size((0.0, y), (width, 0.3));
            visuals.push(
                Visual::rounded_rect(r, 0.1)
                    .with_stroke(s.palette.accent, s.stroke_width)
                    .with_fill(s.palette.accent, 0.3),
            );
            visuals.push(text_at(stage, s, &name, 0.45, Point::new(0.0, y - 0.4)));
        }
        let ids = stage.stage_all(visuals);
        stage.play([Animation::fade_in_shifted(ids.clone(), Vec2::new(0.0, 0.1))], s.rt_norm)?;
        Ok(ids)
    }

    fn discussion(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(stage, s, &self.config.prompts.need_unit)?;
        let spans = if self.style.show_nonstandard_units_demo {
            self.hand_spans(stage)?
        } else {
            Vec::new()
        };
        scaffold_card(
            stage,
            s,
            &[
                Bilingual::new(
                    "• Different people → different hand spans/steps.",
                    "• أشخاص مختلفون → قياسات مختلفة بالخطوة/الكف.",
                ),
                Bilingual::new("• So results differ.", "• لذلك تختلف النتائج."),
                Bilingual::new(
                    "• We agree on one standard unit.",
                    "• نتفق على وحدة معيارية واحدة.",
                ),
            ],
        )?;
        if !spans.is_empty() {
            stage.play([Animation::fade_out(spans)], s.rt_fast)?;
        }
        Ok(())
    }

    fn institutionalization(&mut self, stage: &mut Stage) -> TiceResult<()> {
        for object in &self.config.objects {
            self.measure(stage, object)?;
        }
        Ok(())
    }

    fn mini_assessment(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(
            stage,
            s,
            &Bilingual::new(
                "Mini-check: How many meters long is this object?",
                "تحقق صغير: كم متر طول هذا الشيء؟",
            ),
        )?;
        let object = &self.config.assessment;
        let span = object.span(0.0, self.style.meter_length);
        let board = self.board(stage, object, span, 1.0);
        let mut ids = stage.stage_all(board);
        stage.play([Animation::create(ids.clone())], s.rt_norm)?;
        let pieces: Vec<Visual> = meter_pieces(span, object.length_m)?
            .into_iter()
            .enumerate()
            .map(|(k, piece)| self.piece(piece, 1.0, k))
            .collect();
        let pieces = stage.stage_all(pieces);
        stage.play([Animation::fade_in(pieces.clone())], s.rt_norm)?;
        ids.extend(pieces);

        let labels: Vec<String> = self
            .config
            .assessment_options
            .iter()
            .map(|m| format!("{m} m"))
            .collect();
        let (options, cards) = option_row(stage, s, &labels, -1.2)?;
        ids.extend(options);
        stage.wait(0.6)?;
        let card = self
            .config
            .assessment_options
            .iter()
            .position(|m| *m == object.length_m)
            .map(|i| cards[i])
            .ok_or_else(|| TiceError::lesson("no option matches the object's length"))?;
        ids.extend(mark_correct(stage, s, card)?);
        let ok = Bilingual::new(
            format!("Correct: {}", object.measurement()),
            format!("صحيح: {}", object.measurement()),
        );
        let ok = text_at(stage, s, &ok, 0.56, Point::new(0.0, BOTTOM_Y));
        let ok = stage.stage(ok);
        stage.play([Animation::fade_in(ok)], s.rt_fast)?;
        ids.push(ok);
        stage.wait(0.5)?;
        stage.play([Animation::fade_out(ids)], s.rt_fast)
    }

    fn outro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        recap(
            stage,
            &self.style.base,
            &[
                Bilingual::new(
                    "• Meter (m) is a standard unit of length",
                    "• المتر (m) وحدة معيارية للطول",
                ),
                Bilingual::new(
                    "• Always align at the start and end",
                    "• دائماً نحاذي البداية والنهاية",
                ),
                Bilingual::new("• Repeat the unit and count", "• نكرر الوحدة ونعدّ"),
                Bilingual::new("• Write: value + m", "• نكتب: عدد + m"),
            ],
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/meter.rs"]
mod tests;
