//! `m3-g06-lines`: parallel, intersecting and perpendicular lines.
//!
//! Short segments are extended until they either never meet, meet at a point, or meet at a right
//! angle. The closing check classifies configured pairs and refuses pairs whose stated relation
//! does not match their geometry.

use animtice::{
    Animation, Bilingual, Ease, Lesson, LessonConfig, LessonContent, LessonStyle, Line, ObjectId,
    Point, Rect, Stage, Step, StyleConfig, TiceError, TiceResult, Vec2, Visual, are_parallel,
    are_perpendicular, banner, clear, extend_line, line_intersection, right_angle_marker,
};

use crate::common::{BOTTOM_Y, math, panel, subtitle, text_at};

/// Cosine below which two lines count as perpendicular.
const RIGHT_ANGLE_TOL: f64 = 1e-6;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LinesStyle {
    #[serde(flatten)]
    pub base: StyleConfig,
    /// Stroke width of the demo lines, in points.
    pub line_stroke: f64,
    pub aux_stroke: f64,
    pub marker_stroke: f64,
    pub right_angle_size: f64,
    pub show_symbols: bool,
    pub show_labels: bool,
    pub show_real_world_hints: bool,
    pub show_classifier: bool,
}

impl Default for LinesStyle {
    fn default() -> Self {
        Self {
            base: StyleConfig::default(),
            line_stroke: 7.0,
            aux_stroke: 4.0,
            marker_stroke: 7.0,
            right_angle_size: 0.35,
            show_symbols: true,
            show_labels: true,
            show_real_world_hints: true,
            show_classifier: true,
        }
    }
}

impl LessonStyle for LinesStyle {
    fn base(&self) -> &StyleConfig {
        &self.base
    }

    fn validate(&self) -> TiceResult<()> {
        self.base.validate()?;
        for (name, v) in [
            ("line_stroke", self.line_stroke),
            ("aux_stroke", self.aux_stroke),
            ("marker_stroke", self.marker_stroke),
            ("right_angle_size", self.right_angle_size),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(TiceError::validation(format!("{name} must be > 0")));
            }
        }
        Ok(())
    }
}

/// How two lines sit relative to each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Parallel,
    Intersecting,
    Perpendicular,
}

impl Relation {
    /// Relation of the infinite lines through `a` and `b`; `None` if either is a point.
    pub fn classify(a: Line, b: Line) -> Option<Self> {
        if a.p0 == a.p1 || b.p0 == b.p1 {
            return None;
        }
        if are_parallel(a, b) {
            Some(Self::Parallel)
        } else if are_perpendicular(a, b, RIGHT_ANGLE_TOL) {
            Some(Self::Perpendicular)
        } else {
            Some(Self::Intersecting)
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Parallel => "∥",
            Self::Intersecting => "×",
            Self::Perpendicular => "⊥",
        }
    }

    pub fn name(self) -> Bilingual {
        match self {
            Self::Parallel => Bilingual::new("parallel", "متوازيان"),
            Self::Intersecting => Bilingual::new("intersecting", "متقاطعان"),
            Self::Perpendicular => Bilingual::new("perpendicular", "متعامدان"),
        }
    }
}

/// One pair for the classification check, drawn around the origin of its card.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LinePair {
    pub a: Line,
    pub b: Line,
    pub expected: Relation,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LinesPrompts {
    pub explore: Bilingual,
    pub parallel: Bilingual,
    pub intersect: Bilingual,
    pub perpendicular: Bilingual,
    pub institution: Bilingual,
    pub classify: Bilingual,
}

impl Default for LinesPrompts {
    fn default() -> Self {
        Self {
            explore: Bilingual::new(
                "Exploration: observe line behaviors when we extend them.",
                "استكشاف: نلاحظ سلوك المستقيمات عند تمديدها.",
            ),
            parallel: Bilingual::new(
                "Parallel: extend both lines… they never meet.",
                "التوازي: نمدّ المستقيمين… لا يلتقيان أبداً.",
            ),
            intersect: Bilingual::new(
                "Not parallel: extend… they meet at a point.",
                "غير متوازيين: نمدّ… يلتقيان في نقطة.",
            ),
            perpendicular: Bilingual::new(
                "Perpendicular: they meet and form a right angle.",
                "التعامد: يلتقيان ويشكلان زاوية قائمة.",
            ),
            institution: Bilingual::new(
                "Institutionalization: name, symbol, and how to recognize.",
                "التثبيت: الاسم، الرمز، وكيف نتعرف.",
            ),
            classify: Bilingual::new(
                "Classify each pair: ∥ , ⊥ , or just intersecting.",
                "صنّف كل زوج: ∥ أو ⊥ أو تقاطع فقط.",
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LinesConfig {
    #[serde(flatten)]
    pub header: LessonConfig,
    /// Vertical positions of the parallel, intersecting and perpendicular demos.
    pub rows: [f64; 3],
    /// Length of the short demo segments before extension.
    pub demo_length: f64,
    pub parallel_gap: f64,
    /// Half-angle between the two intersecting demo lines, in degrees.
    pub intersect_half_angle_deg: f64,
    /// Starting tilt of the second perpendicular line away from vertical, in degrees.
    pub perpendicular_tilt_deg: f64,
    pub prompts: LinesPrompts,
    pub classifier: Vec<LinePair>,
}

impl Default for LinesConfig {
    fn default() -> Self {
        let seg = |x0: f64, y0: f64, x1: f64, y1: f64| Line::new((x0, y0), (x1, y1));
        Self {
            header: LessonConfig::new(Bilingual::new(
                "Identifying line positions – parallelism and perpendicularity",
                "تعرف أوضاع المستقيمات – التوازي والتعامد",
            )),
            rows: [1.4, 0.1, -1.4],
            demo_length: 2.4,
            parallel_gap: 0.45,
            intersect_half_angle_deg: 12.0,
            perpendicular_tilt_deg: 25.0,
            prompts: LinesPrompts::default(),
            classifier: vec![
                LinePair {
                    a: seg(-1.0, 0.3, 1.0, 0.3),
                    b: seg(-1.0, -0.3, 1.0, -0.3),
                    expected: Relation::Parallel,
                },
                LinePair {
                    a: seg(-1.0, 0.0, 1.0, 0.0),
                    b: seg(0.0, -0.8, 0.0, 0.8),
                    expected: Relation::Perpendicular,
                },
                LinePair {
                    a: seg(-1.0, -0.5, 1.0, 0.5),
                    b: seg(-1.0, 0.6, 1.0, -0.2),
                    expected: Relation::Intersecting,
                },
            ],
        }
    }
}

impl LessonContent for LinesConfig {
    fn header(&self) -> &LessonConfig {
        &self.header
    }

    fn validate(&self) -> TiceResult<()> {
        if !(self.demo_length.is_finite() && self.demo_length > 0.0) {
            return Err(TiceError::validation("demo_length must be > 0"));
        }
        if !(self.parallel_gap.is_finite() && self.parallel_gap > 0.0) {
            return Err(TiceError::validation("parallel_gap must be > 0"));
        }
        let a = self.intersect_half_angle_deg;
        if !(a > 0.0 && a < 90.0) {
            return Err(TiceError::validation(
                "intersect_half_angle_deg must be in (0, 90)",
            ));
        }
        for (i, pair) in self.classifier.iter().enumerate() {
            match Relation::classify(pair.a, pair.b) {
                None => {
                    return Err(TiceError::validation(format!(
                        "classifier pair {i} has a zero-length line"
                    )));
                }
                Some(r) if r != pair.expected => {
                    return Err(TiceError::validation(format!(
                        "classifier pair {i} is {r:?}, not {:?}",
                        pair.expected
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Lines lesson. Each demo keeps its objects so the institutionalization step can point back
/// at them.
#[derive(Debug)]
pub struct LinesLesson {
    config: LinesConfig,
    style: LinesStyle,
    demos: Vec<Vec<ObjectId>>,
}

impl Lesson for LinesLesson {
    type Style = LinesStyle;
    type Config = LinesConfig;

    const ID: &'static str = "m3-g06-lines";

    fn new(config: LinesConfig, style: LinesStyle) -> TiceResult<Self> {
        config.validate()?;
        style.validate()?;
        Ok(Self {
            config,
            style,
            demos: Vec::new(),
        })
    }

    fn config(&self) -> &LinesConfig {
        &self.config
    }

    fn style(&self) -> &LinesStyle {
        &self.style
    }

    fn build_steps(&self) -> Vec<Step<Self>> {
        let mut steps = vec![
            Step::new("intro", Self::intro),
            Step::new("parallel_demo", Self::parallel_demo),
            Step::new("intersect_demo", Self::intersect_demo),
            Step::new("perpendicular_demo", Self::perpendicular_demo),
            Step::new("institutionalization", Self::institutionalization),
        ];
        if self.style.show_classifier {
            steps.push(Step::new("classifier_check", Self::classifier_check));
        }
        steps
    }
}

impl LinesLesson {
    fn demo_line(&self, line: Line) -> Visual {
        Visual::line(line.p0, line.p1)
            .with_stroke(self.style.base.palette.shape, self.style.line_stroke)
    }

    /// Short tag to the right of a demo row: the symbol and/or the relation's name.
    fn tags(&self, stage: &mut Stage, relation: Relation, y: f64) -> Vec<ObjectId> {
        let s = &self.style.base;
        let mut tags = Vec::new();
        if self.style.show_symbols {
            let sym =
                math(s, relation.symbol(), 0.9, Point::new(3.6, y)).with_color(s.palette.highlight);
            tags.push(stage.stage(sym));
        }
        if self.style.show_labels {
            let name = text_at(stage, s, &relation.name(), 0.5, Point::new(5.2, y));
            tags.push(stage.stage(name));
        }
        tags
    }

    fn intro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        subtitle(
            stage,
            s,
            &Bilingual::new("Extend • Observe • Name", "نمدّ • نلاحظ • نسمّي"),
        )?;
        banner(stage, s, &self.config.prompts.explore)
    }

    /// A hint picture on the left of a row: rails for parallel lines, a crossing for the rest.
    fn hint(&self, stage: &mut Stage, relation: Relation, y: f64) -> TiceResult<Option<ObjectId>> {
        if !self.style.show_real_world_hints {
            return Ok(None);
        }
        let c = Point::new(-5.4, y);
        let lines = match relation {
            Relation::Parallel => {
                let mut ls = vec![
                    Line::new(c + Vec2::new(-0.9, 0.2), c + Vec2::new(0.9, 0.2)),
                    Line::new(c + Vec2::new(-0.9, -0.2), c + Vec2::new(0.9, -0.2)),
                ];
                ls.extend((0..5).map(|i| {
                    let x = -0.8 + 0.4 * f64::from(i);
                    Line::new(c + Vec2::new(x, -0.3), c + Vec2::new(x, 0.3))
                }));
                ls
            }
            _ => vec![
                Line::new(c + Vec2::new(-0.9, 0.0), c + Vec2::new(0.9, 0.0)),
                Line::new(c + Vec2::new(0.0, -0.5), c + Vec2::new(0.0, 0.5)),
            ],
        };
        let v = Visual::segments(&lines)
            .with_stroke(self.style.base.palette.muted, self.style.aux_stroke);
        let id = stage.stage(v);
        stage.play([Animation::fade_in(id)], self.style.base.rt_fast)?;
        Ok(Some(id))
    }

    fn parallel_demo(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = self.style.base.clone();
        let y = self.config.rows[0];
        let half = self.config.demo_length / 2.0;
        let gap = self.config.parallel_gap / 2.0;
        banner(stage, &s, &self.config.prompts.parallel)?;

        let l1 = Line::new((-1.5 - half, y + gap), (-1.5 + half, y + gap));
        let l2 = Line::new((-1.5 - half, y - gap), (-1.5 + half, y - gap));
        let ids = stage.stage_all([self.demo_line(l1), self.demo_line(l2)]);
        stage.play([Animation::create(ids.clone())], s.rt_norm)?;

        let mut group = ids.clone();
        group.extend(self.hint(stage, Relation::Parallel, y)?);

        let long = [extend_line(l1, 2.3), extend_line(l2, 2.3)];
        stage.play(
            ids.iter()
                .zip(long)
                .map(|(id, l)| Animation::transform(*id, self.demo_line(l))),
            s.rt_slow,
        )?;

        // A faint dot far along the rails: still no meeting point.
        let far = Visual::dot(Point::new(5.6, y), 0.06).with_fill(s.palette.muted, 0.5);
        let far = stage.stage(far);
        stage.play([Animation::fade_in(far)], s.rt_fast)?;
        stage.play([Animation::fade_out(far)], s.rt_fast)?;

        let tags = self.tags(stage, Relation::Parallel, y);
        if !tags.is_empty() {
            stage.play([Animation::write(tags.clone())], s.rt_fast)?;
        }
        group.extend(tags);
        self.demos.push(group);
        Ok(())
    }

    fn intersect_demo(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = self.style.base.clone();
        let y = self.config.rows[1];
        let half = self.config.demo_length / 2.0;
        banner(stage, &s, &self.config.prompts.intersect)?;

        // Two segments that tilt toward each other and only cross once extended.
        let a = self.config.intersect_half_angle_deg.to_radians();
        let dir_up = Vec2::new(a.cos(), a.sin());
        let dir_down = Vec2::new(a.cos(), -a.sin());
        let left = Point::new(-4.2, y);
        let c1 = left + Vec2::new(half, -0.35);
        let c2 = left + Vec2::new(half, 0.35);
        let l1 = Line::new(c1 - dir_up * half, c1 + dir_up * half);
        let l2 = Line::new(c2 - dir_down * half, c2 + dir_down * half);
        let ids = stage.stage_all([self.demo_line(l1), self.demo_line(l2)]);
        stage.play([Animation::create(ids.clone())], s.rt_norm)?;

        let long = [extend_line(l1, 2.2), extend_line(l2, 2.2)];
        stage.play(
            ids.iter()
                .zip(long)
                .map(|(id, l)| Animation::transform(*id, self.demo_line(l))),
            s.rt_slow,
        )?;

        let mut group = ids;
        if let Some(p) = line_intersection(l1, l2) {
            let dot = Visual::dot(p, 0.09)
                .with_fill(s.palette.highlight, 1.0)
                .with_z(4);
            let dot = stage.stage(dot);
            stage.play([Animation::fade_in(dot)], s.rt_fast)?;
            stage.play([Animation::indicate(dot)], s.rt_fast)?;
            group.push(dot);
        }
        let tags = self.tags(stage, Relation::Intersecting, y);
        if !tags.is_empty() {
            stage.play([Animation::write(tags.clone())], s.rt_fast)?;
        }
        group.extend(tags);
        self.demos.push(group);
        Ok(())
    }

    fn perpendicular_demo(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = self.style.base.clone();
        let y = self.config.rows[2];
        let half = self.config.demo_length / 2.0;
        banner(stage, &s, &self.config.prompts.perpendicular)?;

        let pivot = Point::new(-1.3, y);
        let span = Vec2::new(half * 1.6, 0.0);
        let base = Line::new(pivot - span, pivot + span);
        let reach = 0.55;
        let tilt = self.config.perpendicular_tilt_deg.to_radians();
        let tilted_dir = Vec2::new(tilt.sin(), tilt.cos());
        let tilted = Line::new(pivot - tilted_dir * reach, pivot + tilted_dir * reach);
        let upright = Line::new(pivot - Vec2::new(0.0, reach), pivot + Vec2::new(0.0, reach));

        let base_id = stage.stage(self.demo_line(base));
        let turn_id = stage.stage(self.demo_line(tilted));
        stage.play([Animation::create([base_id, turn_id])], s.rt_norm)?;
        let mut group = vec![base_id, turn_id];
        group.extend(self.hint(stage, Relation::Perpendicular, y)?);

        stage.play(
            [Animation::transform(turn_id, self.demo_line(upright)).eased(Ease::InOutCubic)],
            s.rt_slow,
        )?;

        if let Some(vertex) = line_intersection(base, upright)
            && let Some(marker) = right_angle_marker(
                vertex,
                base.p1 - base.p0,
                upright.p1 - upright.p0,
                self.style.right_angle_size,
            )
        {
            let m = Visual::segments(&marker)
                .with_stroke(s.palette.highlight, self.style.marker_stroke * 0.6)
                .with_z(3);
            let m = stage.stage(m);
            stage.play([Animation::create(m)], s.rt_fast)?;
            group.push(m);
        }
        let tags = self.tags(stage, Relation::Perpendicular, y);
        if !tags.is_empty() {
            stage.play([Animation::write(tags.clone())], s.rt_fast)?;
        }
        group.extend(tags);
        self.demos.push(group);
        Ok(())
    }

    fn institutionalization(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = self.style.base.clone();
        banner(stage, &s, &self.config.prompts.institution)?;

        for group in &self.demos {
            stage.play([Animation::indicate(group.clone())], 0.5)?;
        }
        clear(stage, &s)?;

        let rules = [
            Bilingual::new(
                "Parallel: lines never meet when extended  (∥)",
                "التوازي: لا يلتقي المستقيمان عند التمديد  (∥)",
            ),
            Bilingual::new(
                "Intersecting: extended lines meet at one point",
                "التقاطع: يلتقي المستقيمان في نقطة واحدة",
            ),
            Bilingual::new(
                "Perpendicular: they meet at a right angle  (⊥)",
                "التعامد: يلتقيان بزاوية قائمة  (⊥)",
            ),
        ];
        let card = Rect::from_center_size((0.0, -0.3), (11.6, 2.9));
        let backdrop = stage.stage(panel(&s, card));
        let lines = crate::common::bullet_lines(
            stage,
            &s,
            &rules,
            0.55,
            Point::new(card.x0 + 0.6, card.y1 - 0.7),
        );
        let mut ids = stage.stage_all(lines);
        stage.play(
            [
                Animation::create(backdrop),
                Animation::fade_in_shifted(ids.clone(), Vec2::new(0.0, 0.1)),
            ],
            s.rt_norm,
        )?;
        stage.wait(0.45)?;
        ids.push(backdrop);
        stage.play([Animation::fade_out(ids)], s.rt_fast)?;
        self.demos.clear();
        Ok(())
    }

    fn classifier_check(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = self.style.base.clone();
        banner(stage, &s, &self.config.prompts.classify)?;
        let pairs = self.config.classifier.clone();
        if pairs.is_empty() {
            return Ok(());
        }

        let n = pairs.len() as f64;
        let width = (12.0 / n).min(4.0);
        let mut shown = Vec::new();
        for (i, pair) in pairs.iter().enumerate() {
            let cx = -width * (n - 1.0) / 2.0 + width * i as f64;
            let card = Rect::from_center_size((cx, 0.2), (width - 0.4, 2.6));
            let shift = Vec2::new(cx, 0.4);
            let a = Line::new(pair.a.p0 + shift, pair.a.p1 + shift);
            let b = Line::new(pair.b.p0 + shift, pair.b.p1 + shift);
            let ids = vec![
                stage.stage(panel(&s, card)),
                stage.stage(self.demo_line(a)),
                stage.stage(self.demo_line(b)),
            ];
            stage.play([Animation::create(ids.clone())], s.rt_fast)?;
            shown.extend(ids);
        }
        stage.wait(0.5)?;

        for (i, pair) in pairs.iter().enumerate() {
            let cx = -width * (n - 1.0) / 2.0 + width * i as f64;
            let relation = Relation::classify(pair.a, pair.b).unwrap_or(pair.expected);
            let label = format!("{}: {}", i + 1, relation.symbol());
            let tag = math(&s, label, 0.65, Point::new(cx, -0.75)).with_color(s.palette.positive);
            let tag = stage.stage(tag);
            stage.play([Animation::write(tag)], s.rt_fast)?;
            shown.push(tag);
        }
        let done = text_at(
            stage,
            &s,
            &Bilingual::new(
                "Extend, then look for a meeting point.",
                "نمدّ ثم نبحث عن نقطة التقاء.",
            ),
            0.5,
            Point::new(0.0, BOTTOM_Y),
        );
        let done = stage.stage(done);
        stage.play([Animation::fade_in(done)], s.rt_fast)?;
        stage.wait(0.25)?;
        shown.push(done);
        stage.play([Animation::fade_out(shown)], s.rt_fast)
    }
}

#[cfg(test)]
#[path = "../tests/unit/lines.rs"]
mod tests;
