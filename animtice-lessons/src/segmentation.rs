//! `m3-l26-bar-segmentation`: choosing a segmentation of one whole bar that matches a story.
//!
//! The flow per problem is bar → candidate segmentations → the faithful one → labels → target
//! segment → operation hint. No calculation is shown.

use animtice::{
    Animation, Bilingual, Lesson, LessonConfig, LessonContent, LessonStyle, ObjectId, Point, Rect,
    Span, Stage, Step, StyleConfig, TiceError, TiceResult, Vec2, Visual, arrange_row, banner,
    clear, segment_layout,
};

use crate::common::{BOTTOM_Y, math, recap, scaffold_card, subtitle, surround, text_at};

pub const MAX_OPTIONS: usize = 4;
pub const MAX_SEGMENTS: usize = 6;
/// How far a segmentation's ratios may sum from one.
pub const RATIO_TOLERANCE: f64 = 0.01;

const QUESTION_Y: f64 = 2.3;
const OPTION_GAP: f64 = 0.6;
const MAX_ROW_WIDTH: f64 = 13.6;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SegmentationStyle {
    #[serde(flatten)]
    pub base: StyleConfig,
    pub bar_width: f64,
    pub bar_height: f64,
    pub left_anchor_x: f64,
    pub bar_y: f64,
    pub options_y: f64,
    /// Size of a candidate relative to the whole bar.
    pub option_scale: f64,
    pub ghost_opacity: f64,
    pub chosen_opacity: f64,
    pub show_problem_text: bool,
    pub show_options: bool,
    pub show_operation_link: bool,
    pub forbid_early_calculation: bool,
}

impl Default for SegmentationStyle {
    fn default() -> Self {
        Self {
            base: StyleConfig {
                fill_opacity: 0.10,
                ..StyleConfig::default()
            },
            bar_width: 10.4,
            bar_height: 0.62,
            left_anchor_x: -5.2,
            bar_y: -0.1,
            options_y: -1.45,
            option_scale: 0.3,
            ghost_opacity: 0.25,
            chosen_opacity: 0.16,
            show_problem_text: true,
            show_options: true,
            show_operation_link: true,
            forbid_early_calculation: true,
        }
    }
}

impl LessonStyle for SegmentationStyle {
    fn base(&self) -> &StyleConfig {
        &self.base
    }

    fn validate(&self) -> TiceResult<()> {
        self.base.validate()?;
        for (name, v) in [
            ("bar_width", self.bar_width),
            ("bar_height", self.bar_height),
            ("option_scale", self.option_scale),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(TiceError::validation(format!("{name} must be > 0")));
            }
        }
        for (name, v) in [
            ("ghost_opacity", self.ghost_opacity),
            ("chosen_opacity", self.chosen_opacity),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(TiceError::validation(format!("{name} must be in [0, 1]")));
            }
        }
        if !(self.left_anchor_x.is_finite() && self.bar_y.is_finite() && self.options_y.is_finite())
        {
            return Err(TiceError::validation("layout positions must be finite"));
        }
        if self.left_anchor_x + self.bar_width > 6.8 {
            return Err(TiceError::validation("the whole bar does not fit on screen"));
        }
        Ok(())
    }
}

impl SegmentationStyle {
    /// Width of a row of `n` shrunk candidates.
    pub fn options_row_width(&self, n: usize) -> f64 {
        let n = n as f64;
        n * self.bar_width * self.option_scale + (n - 1.0).max(0.0) * OPTION_GAP
    }
}

/// One candidate cut of the whole bar.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SegmentationOption {
    /// Share of the whole for each segment, left to right. They sum to one.
    pub ratios: Vec<f64>,
    pub labels: Vec<Bilingual>,
    /// Segment that answers the question.
    #[serde(default)]
    pub highlight: Option<usize>,
    #[serde(default)]
    pub correct: bool,
    /// Shown only after the faithful segmentation is chosen.
    #[serde(default)]
    pub operation_hint: Option<Bilingual>,
}

impl SegmentationOption {
    pub fn new(ratios: &[f64], labels: &[(&str, &str)]) -> Self {
        Self {
            ratios: ratios.to_vec(),
            labels: labels.iter().map(|(en, ar)| Bilingual::new(*en, *ar)).collect(),
            highlight: None,
            correct: false,
            operation_hint: None,
        }
    }

    /// Mark this as the faithful segmentation.
    pub fn faithful(mut self, highlight: Option<usize>, hint: Bilingual) -> Self {
        self.correct = true;
        self.highlight = highlight;
        self.operation_hint = Some(hint);
        self
    }

    pub fn validate(&self) -> TiceResult<()> {
        let n = self.ratios.len();
        if !(1..=MAX_SEGMENTS).contains(&n) {
            return Err(TiceError::validation(format!(
                "{n} segments is outside 1..={MAX_SEGMENTS}"
            )));
        }
        if self.ratios.iter().any(|r| !(r.is_finite() && *r > 0.0)) {
            return Err(TiceError::validation("segment ratios must be > 0"));
        }
        let sum: f64 = self.ratios.iter().sum();
        if (sum - 1.0).abs() > RATIO_TOLERANCE {
            return Err(TiceError::validation(format!(
                "segment ratios sum to {sum}, not 1"
            )));
        }
        if self.labels.len() != n {
            return Err(TiceError::validation(format!(
                "{} labels for {n} segments",
                self.labels.len()
            )));
        }
        if let Some(i) = self.highlight
            && i >= n
        {
            return Err(TiceError::validation(format!(
                "highlighted segment {i} is out of range"
            )));
        }
        Ok(())
    }

    /// The segments laid over `bar`.
    pub fn spans(&self, bar: Span) -> TiceResult<Vec<Span>> {
        segment_layout(bar.start, bar.width, &self.ratios)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SegmentationProblem {
    pub question: Bilingual,
    pub options: Vec<SegmentationOption>,
}

impl SegmentationProblem {
    pub fn validate(&self) -> TiceResult<()> {
        if !(2..=MAX_OPTIONS).contains(&self.options.len()) {
            return Err(TiceError::validation(format!(
                "{} options is outside 2..={MAX_OPTIONS}",
                self.options.len()
            )));
        }
        for (i, o) in self.options.iter().enumerate() {
            o.validate()
                .map_err(|e| TiceError::validation(format!("option {}: {e}", option_letter(i))))?;
        }
        let correct = self.options.iter().filter(|o| o.correct).count();
        if correct != 1 {
            return Err(TiceError::validation(format!(
                "exactly one option must be correct, found {correct}"
            )));
        }
        Ok(())
    }

    pub fn correct(&self) -> TiceResult<&SegmentationOption> {
        self.options
            .iter()
            .find(|o| o.correct)
            .ok_or_else(|| TiceError::lesson("no correct segmentation"))
    }
}

/// "A", "B", ...
pub fn option_letter(i: usize) -> char {
    char::from(b'A' + (i % 26) as u8)
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SegmentationPrompts {
    pub show_bar: Bilingual,
    pub options: Bilingual,
    pub validate: Bilingual,
    pub label: Bilingual,
    pub target: Bilingual,
    pub link: Bilingual,
}

impl Default for SegmentationPrompts {
    fn default() -> Self {
        Self {
            show_bar: Bilingual::new("Start from one whole bar.", "ننطلق من شريط يمثل الكل."),
            options: Bilingual::new(
                "Propose segmentation options (some are wrong).",
                "نقترح تقسيمات مختلفة (بعضها غير صحيح).",
            ),
            validate: Bilingual::new(
                "Validate the segmentation that matches the situation.",
                "نثبت التقسيم الذي يطابق الوضعية.",
            ),
            label: Bilingual::new(
                "Label each segment (meaning matters).",
                "نسمي كل جزء (المعنى هو الأهم).",
            ),
            target: Bilingual::new(
                "Highlight the segment that answers the question.",
                "نبرز الجزء الذي يجيب عن السؤال.",
            ),
            link: Bilingual::new("Only now, connect to the operation.", "بعدها فقط نربط بالعملية."),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    #[serde(flatten)]
    pub header: LessonConfig,
    pub problems: Vec<SegmentationProblem>,
    pub assessment: SegmentationProblem,
    pub prompts: SegmentationPrompts,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        let part = ("part", "جزء");
        Self {
            header: LessonConfig::new(Bilingual::new(
                "Problem solving – representing parts on bar models",
                "حل المسائل – تمثيل الأجزاء على نموذج الأشرطة",
            )),
            problems: vec![
                SegmentationProblem {
                    question: Bilingual::new(
                        "Ali has 8 marbles. Sara has 3 more marbles than Ali. What part is the difference?",
                        "لدى علي 8 كريات. لدى سارة 3 كريات أكثر من علي. ما الجزء الذي يمثل الفرق؟",
                    ),
                    options: vec![
                        SegmentationOption::new(&[0.5, 0.5], &[("Ali", "علي"), ("Sara", "سارة")]),
                        SegmentationOption::new(&[0.72, 0.28], &[("Sara", "سارة"), ("Ali", "علي")]),
                        SegmentationOption::new(
                            &[0.72, 0.28],
                            &[("same as Ali", "مثل علي"), ("extra (difference)", "الزائد (الفرق)")],
                        )
                        .faithful(
                            Some(1),
                            Bilingual::new(
                                "difference → subtraction (or addition if asked for total)",
                                "الفرق → طرح (أو جمع إذا طُلب المجموع)",
                            ),
                        ),
                    ],
                },
                SegmentationProblem {
                    question: Bilingual::new(
                        "A ribbon is cut into 4 equal parts. One part is 5 cm. Which segments are equal parts?",
                        "قُطع شريط إلى 4 أجزاء متساوية. طول جزء واحد 5 سم. ما الأجزاء المتساوية؟",
                    ),
                    options: vec![
                        SegmentationOption::new(&[0.25; 4], &[part; 4]).faithful(
                            None,
                            Bilingual::new(
                                "whole = repeated equal parts (repeated addition / multiplication)",
                                "الكل = أجزاء متساوية مكررة (جمع متكرر / ضرب)",
                            ),
                        ),
                        SegmentationOption::new(&[0.4, 0.2, 0.2, 0.2], &[part; 4]),
                        SegmentationOption::new(
                            &[0.5, 0.5],
                            &[("2 parts", "جزءان"), ("2 parts", "جزءان")],
                        ),
                    ],
                },
                SegmentationProblem {
                    question: Bilingual::new(
                        "A box has 20 candies. 12 are strawberry. The rest are lemon.",
                        "في علبة 20 حلوى. 12 منها بالفراولة. والباقي بالليمون.",
                    ),
                    options: vec![
                        SegmentationOption::new(
                            &[0.6, 0.4],
                            &[("12 strawberry", "12 فراولة"), ("? lemon", "? ليمون")],
                        )
                        .faithful(
                            Some(1),
                            Bilingual::new(
                                "remainder → subtraction (total − known part)",
                                "الباقي → طرح (الكل − الجزء المعلوم)",
                            ),
                        ),
                        SegmentationOption::new(
                            &[0.5, 0.5],
                            &[("strawberry", "فراولة"), ("lemon", "ليمون")],
                        ),
                        SegmentationOption::new(
                            &[0.2, 0.8],
                            &[("? lemon", "? ليمون"), ("12 strawberry", "12 فراولة")],
                        ),
                    ],
                },
            ],
            assessment: SegmentationProblem {
                question: Bilingual::new(
                    "A jar has 15 candies. 5 are eaten. The rest are left. Which segmentation matches this?",
                    "في برطمان 15 حلوى. أُكلت 5. والباقي بقي. أي تقسيم يطابق ذلك؟",
                ),
                options: vec![
                    SegmentationOption::new(&[0.33, 0.67], &[("5 eaten", "5 مأكولة"), ("? left", "? باقية")])
                        .faithful(
                            Some(1),
                            Bilingual::new("left = total − eaten", "الباقي = الكل − المأكول"),
                        ),
                    SegmentationOption::new(&[0.5, 0.5], &[("eaten", "مأكولة"), ("left", "باقية")]),
                    SegmentationOption::new(&[0.2, 0.8], &[("? left", "? باقية"), ("5 eaten", "5 مأكولة")]),
                ],
            },
            prompts: SegmentationPrompts::default(),
        }
    }
}

impl LessonContent for SegmentationConfig {
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
pub struct SegmentationLesson {
    config: SegmentationConfig,
    style: SegmentationStyle,
}

impl Lesson for SegmentationLesson {
    type Style = SegmentationStyle;
    type Config = SegmentationConfig;

    const ID: &'static str = "m3-l26-bar-segmentation";

    fn new(config: SegmentationConfig, style: SegmentationStyle) -> TiceResult<Self> {
        config.validate()?;
        style.validate()?;
        let most = config
            .problems
            .iter()
            .chain([&config.assessment])
            .map(|p| p.options.len())
            .max()
            .unwrap_or(0);
        if style.show_options && style.options_row_width(most) > MAX_ROW_WIDTH {
            return Err(TiceError::validation(format!(
                "{most} options do not fit at option_scale {}",
                style.option_scale
            )));
        }
        Ok(Self { config, style })
    }

    fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    fn style(&self) -> &SegmentationStyle {
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

/// Pieces of one drawn candidate: each visual with its dimmed form.
struct Ghost {
    pieces: Vec<(Visual, Visual)>,
}

impl SegmentationLesson {
    fn whole(&self) -> Span {
        Span {
            start: self.style.left_anchor_x,
            width: self.style.bar_width,
        }
    }

    /// Segment rectangles and the thin separators between them.
    fn overlay(&self, spans: &[Span], y: f64, height: f64, opacity: f64) -> Vec<Visual> {
        let s = &self.style.base;
        let mut visuals: Vec<Visual> = spans
            .iter()
            .map(|sp| {
                Visual::rect(sp.to_rect(y, height))
                    .with_stroke(s.palette.accent, s.stroke_width)
                    .with_fill(s.palette.accent, opacity)
            })
            .collect();
        for sp in spans.iter().take(spans.len().saturating_sub(1)) {
            let x = sp.end();
            visuals.push(
                Visual::line(Point::new(x, y - height / 2.0), Point::new(x, y + height / 2.0))
                    .with_stroke(s.palette.muted, 3.0),
            );
        }
        visuals
    }

    /// Candidate `i` of `n`, shrunk and placed on the options row with its letter below.
    fn ghost(&self, option: &SegmentationOption, i: usize, n: usize) -> TiceResult<Ghost> {
        let s = &self.style.base;
        let st = &self.style;
        let width = st.bar_width * st.option_scale;
        let height = st.bar_height * 0.6;
        let center_x = (i as f64 - (n as f64 - 1.0) / 2.0) * (width + OPTION_GAP);
        let bar = Span {
            start: center_x - width / 2.0,
            width,
        };
        let mut shown = vec![
            Visual::rect(bar.to_rect(st.options_y, height))
                .with_stroke(s.palette.shape, 2.0)
                .with_fill(s.palette.shape, 0.02),
        ];
        shown.extend(self.overlay(&option.spans(bar)?, st.options_y, height, st.ghost_opacity));
        let letter = option_letter(i).to_string();
        shown.push(math(s, letter, 0.45, Point::new(center_x, st.options_y - height / 2.0 - 0.3)));
        let pieces = shown
            .into_iter()
            .map(|v| {
                let dim = if v.is_text() {
                    v.clone().with_color(s.palette.muted)
                } else {
                    let stroke = v.stroke.map_or(1.0, |k| k.width);
                    v.clone()
                        .with_stroke(s.palette.muted, stroke)
                        .with_fill(s.palette.muted, 0.03)
                };
                (v, dim)
            })
            .collect();
        Ok(Ghost { pieces })
    }

    /// Segment labels above the bar, on two alternating rows so narrow neighbours don't collide.
    fn labels(&self, stage: &Stage, option: &SegmentationOption, spans: &[Span]) -> Vec<Visual> {
        let s = &self.style.base;
        let top = self.style.bar_y + self.style.bar_height / 2.0;
        spans
            .iter()
            .zip(&option.labels)
            .enumerate()
            .map(|(i, (sp, label))| {
                let y = top + if i % 2 == 0 { 0.3 } else { 0.7 };
                text_at(stage, s, label, 0.4, Point::new(sp.center(), y))
            })
            .collect()
    }

    fn segment(&self, stage: &mut Stage, problem: &SegmentationProblem) -> TiceResult<Vec<ObjectId>> {
        let s = &self.style.base;
        let st = &self.style;
        let p = &self.config.prompts;
        let correct = problem.correct()?;
        tracing::debug!(
            options = problem.options.len(),
            segments = correct.ratios.len(),
            "segmenting a bar"
        );
        let mut shown = Vec::new();

        if st.show_problem_text {
            let text = text_at(stage, s, &problem.question, 0.4, Point::new(0.0, QUESTION_Y));
            let text = stage.stage(text);
            stage.play([Animation::fade_in_shifted(text, Vec2::new(0.0, -0.1))], s.rt_norm)?;
            shown.push(text);
        }

        banner(stage, s, &p.show_bar)?;
        let whole = self.whole();
        let bar: Rect = whole.to_rect(st.bar_y, st.bar_height);
        let outline = Visual::rounded_rect(bar, 0.18)
            .with_stroke(s.palette.shape, s.stroke_width)
            .with_fill(s.palette.shape, s.fill_opacity);
        let outline = stage.stage(outline);
        stage.play([Animation::create(outline)], s.rt_norm)?;
        shown.push(outline);

        banner(stage, s, &p.options)?;
        let mut ghosts = Vec::new();
        if st.show_options {
            let n = problem.options.len();
            for (i, option) in problem.options.iter().enumerate() {
                let ghost = self.ghost(option, i, n)?;
                let ids = stage.stage_all(ghost.pieces.iter().map(|(v, _)| v.clone()));
                stage.play([Animation::fade_in_shifted(ids.clone(), Vec2::new(0.0, -0.05))], s.rt_fast)?;
                ghosts.extend(ids.into_iter().zip(ghost.pieces.into_iter().map(|(_, dim)| dim)));
            }
        }

        banner(stage, s, &p.validate)?;
        if !ghosts.is_empty() {
            stage.play(
                ghosts
                    .iter()
                    .map(|(id, dim)| Animation::transform(*id, dim.clone())),
                s.rt_fast,
            )?;
            shown.extend(ghosts.iter().map(|(id, _)| *id));
        }
        let spans = correct.spans(whole)?;
        let chosen = self.overlay(&spans, st.bar_y, st.bar_height, st.chosen_opacity);
        let chosen = stage.stage_all(chosen);
        stage.play([Animation::fade_in_shifted(chosen.clone(), Vec2::new(0.0, -0.05))], s.rt_norm)?;
        shown.extend(chosen.iter().copied());
        let check = math(s, "✓", 0.8, Point::new(bar.x1 + 0.4, st.bar_y)).with_color(s.palette.positive);
        let check = stage.stage(check);
        stage.play([Animation::fade_in_shifted(check, Vec2::new(0.0, -0.05))], s.rt_fast)?;
        shown.push(check);

        banner(stage, s, &p.label)?;
        let labels = self.labels(stage, correct, &spans);
        let labels = stage.stage_all(labels);
        stage.play([Animation::fade_in_shifted(labels.clone(), Vec2::new(0.0, -0.05))], s.rt_norm)?;
        shown.extend(labels);

        banner(stage, s, &p.target)?;
        if let Some(target) = correct.highlight.and_then(|i| spans.get(i)) {
            let r = target.to_rect(st.bar_y, st.bar_height);
            let glow = surround(s, r, 0.12).with_stroke(s.palette.highlight, 6.0);
            let mark = math(s, "?", 0.8, r.center()).with_color(s.palette.highlight);
            let ids = stage.stage_all([glow, mark]);
            stage.play([Animation::create(ids.clone())], s.rt_norm)?;
            shown.extend(ids);
        }

        if st.show_operation_link
            && let Some(hint) = &correct.operation_hint
        {
            banner(stage, s, &p.link)?;
            let hint = Bilingual {
                en: format!("Operation hint: {}", hint.en),
                ar: hint.ar.as_ref().map(|ar| format!("تلميح العملية: {ar}")),
            };
            let hint = text_at(stage, s, &hint, 0.42, Point::new(0.0, BOTTOM_Y));
            let hint = stage.stage(hint);
            stage.play([Animation::fade_in_shifted(hint, Vec2::new(0.0, -0.05))], s.rt_norm)?;
            shown.push(hint);
            if st.forbid_early_calculation {
                let stop = Bilingual::new("No calculation yet", "لا حساب بعد");
                let stop = text_at(stage, s, &stop, 0.4, Point::new(0.0, BOTTOM_Y + 0.5))
                    .with_color(s.palette.muted);
                let stop = stage.stage(stop);
                stage.play([Animation::fade_in(stop)], s.rt_fast)?;
                shown.push(stop);
            }
        }
        Ok(shown)
    }

    fn intro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        subtitle(
            stage,
            &self.style.base,
            &Bilingual::new(
                "Good segmentation = correct reasoning.",
                "تقسيم صحيح = تفكير صحيح.",
            ),
        )
    }

    fn exploration(&mut self, stage: &mut Stage) -> TiceResult<()> {
        for problem in &self.config.problems {
            self.segment(stage, problem)?;
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
                "Discussion: Which segmentation is faithful to the story?",
                "نقاش: أي تقسيم يطابق القصة فعلاً؟",
            ),
        )?;
        scaffold_card(
            stage,
            s,
            &[
                Bilingual::new(
                    "• Each segment must mean something.",
                    "• كل جزء يجب أن يمثل معنى.",
                ),
                Bilingual::new(
                    "• Equal story parts → equal segments.",
                    "• أجزاء متساوية في القصة → أجزاء متساوية في الشريط.",
                ),
                Bilingual::new(
                    "• A random split is not a model.",
                    "• تقسيم عشوائي ليس نموذجاً.",
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
                "Institutionalization: segment → label → target → operation",
                "التثبيت: نقسم → نسمي → نحدد الهدف → نختار العملية",
            ),
        )?;
        let chain = [
            Bilingual::new("segment", "نقسم"),
            Bilingual::en_only("→"),
            Bilingual::new("label", "نسمي"),
            Bilingual::en_only("→"),
            Bilingual::new("target (?)", "الهدف (?)"),
            Bilingual::en_only("→"),
            Bilingual::new("operation", "العملية"),
        ];
        let words: Vec<Visual> = chain.iter().map(|w| text_at(stage, s, w, 0.55, Point::ZERO)).collect();
        let row = arrange_row(words, Point::new(0.0, -0.3), 0.22);
        let ids = stage.stage_all(row);
        stage.play([Animation::fade_in_shifted(ids.clone(), Vec2::new(0.0, 0.1))], s.rt_norm)?;
        stage.wait(0.45)?;
        stage.play([Animation::fade_out(ids)], s.rt_fast)
    }

    fn mini_assessment(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(
            stage,
            s,
            &Bilingual::new(
                "Mini-check: choose the correct segmentation (equal parts or extra part).",
                "تحقق صغير: اختر التقسيم الصحيح (أجزاء متساوية أو جزء زائد).",
            ),
        )?;
        let shown = self.segment(stage, &self.config.assessment)?;
        stage.wait(0.35)?;
        stage.play([Animation::fade_out(shown)], s.rt_fast)
    }

    fn outro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        recap(
            stage,
            &self.style.base,
            &[
                Bilingual::new("• Segment with meaning", "• نقسم بمعنى"),
                Bilingual::new("• Label what is known", "• نكتب المعلوم"),
                Bilingual::new("• Highlight the asked part", "• نبرز المطلوب"),
                Bilingual::new("• Then choose the operation", "• ثم نختار العملية"),
            ],
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/segmentation.rs"]
mod tests;
