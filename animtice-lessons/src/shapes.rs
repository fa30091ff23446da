//! `m3-g07-shape-properties`: standard shapes described by their properties.
//!
//! Each shape is shown on its own while its sides are counted, its vertices dotted and its
//! corners marked (a square glyph for right angles, a wedge otherwise). The shapes are then set
//! side by side and sorted into families that share the same counts.

use std::f64::consts::TAU;

use animtice::{
    Animation, Bilingual, Lesson, LessonConfig, LessonContent, LessonStyle, Line, ObjectId, Point,
    Rect, Stage, Step, StyleConfig, TiceError, TiceResult, Vec2, Visual, are_perpendicular,
    arrange_row, banner, centroid, clear, edge_length, perp, polygon_edges, recentered,
    regular_polygon, right_angle_marker, sector_path, unit,
};

use crate::common::{
    bullet_lines, mark_correct, math, option_row, panel, recap, scaffold_card, subtitle, text_at,
};

pub const MAX_SIDES: usize = 12;

const SHAPE_CENTER: Point = Point::new(-2.8, 0.2);
const PANEL_CENTER: Point = Point::new(4.1, 0.1);
const COMPARE_ROW_Y: f64 = -2.2;
/// Cosine below which two sides count as perpendicular.
const RIGHT_ANGLE_TOL: f64 = 1e-6;
const TICK_HALF: f64 = 0.12;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShapesStyle {
    #[serde(flatten)]
    pub base: StyleConfig,
    pub vertex_radius: f64,
    /// Stroke width of ticks and angle marks, in points.
    pub marker_stroke: f64,
    /// Radius of angle wedges; right-angle glyphs use most of it.
    pub angle_radius: f64,
    /// Size of the shapes in the comparison row relative to their main drawing.
    pub mini_scale: f64,
    /// Seconds spent on each side while counting.
    pub count_run_time: f64,
    pub show_angle_markers: bool,
    pub show_side_markers: bool,
    pub show_vertex_markers: bool,
    pub show_comparison_panel: bool,
    pub show_classification_step: bool,
}

impl Default for ShapesStyle {
    fn default() -> Self {
        Self {
            base: StyleConfig::default(),
            vertex_radius: 0.10,
            marker_stroke: 3.0,
            angle_radius: 0.35,
            mini_scale: 0.32,
            count_run_time: 0.22,
            show_angle_markers: true,
            show_side_markers: true,
            show_vertex_markers: true,
            show_comparison_panel: true,
            show_classification_step: true,
        }
    }
}

impl LessonStyle for ShapesStyle {
    fn base(&self) -> &StyleConfig {
        &self.base
    }

    fn validate(&self) -> TiceResult<()> {
        self.base.validate()?;
        for (name, v) in [
            ("vertex_radius", self.vertex_radius),
            ("marker_stroke", self.marker_stroke),
            ("angle_radius", self.angle_radius),
            ("mini_scale", self.mini_scale),
            ("count_run_time", self.count_run_time),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(TiceError::validation(format!("{name} must be > 0")));
            }
        }
        Ok(())
    }
}

/// A named polygon, vertices in either winding order around any origin.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Figure {
    pub name: Bilingual,
    pub vertices: Vec<Point>,
}

impl Figure {
    pub fn new(name: Bilingual, vertices: Vec<Point>) -> Self {
        Self { name, vertices }
    }

    pub fn sides(&self) -> usize {
        self.vertices.len()
    }

    /// A closed polygon has as many vertices as sides.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn validate(&self) -> TiceResult<()> {
        let n = self.sides();
        if !(3..=MAX_SIDES).contains(&n) {
            return Err(TiceError::validation(format!(
                "a shape needs 3..={MAX_SIDES} vertices, got {n}"
            )));
        }
        if self.vertices.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(TiceError::validation("vertices must be finite"));
        }
        if polygon_edges(&self.vertices)
            .into_iter()
            .any(|e| edge_length(e) < 1e-6)
        {
            return Err(TiceError::validation("a shape has a zero-length side"));
        }
        if self.signed_area2().abs() < 1e-9 {
            return Err(TiceError::validation("a shape must enclose some area"));
        }
        Ok(())
    }

    /// Twice the signed area; positive when the vertices run counter-clockwise.
    fn signed_area2(&self) -> f64 {
        polygon_edges(&self.vertices)
            .iter()
            .map(|e| e.p0.x * e.p1.y - e.p1.x * e.p0.y)
            .sum()
    }

    /// Counter-clockwise vertices scaled by `scale` about their centroid, which lands on `center`.
    pub fn placed(&self, center: Point, scale: f64) -> Vec<Point> {
        let mut pts = self.vertices.clone();
        if self.signed_area2() < 0.0 {
            pts.reverse();
        }
        let c = centroid(&pts).unwrap_or(Point::ZERO);
        let scaled: Vec<Point> = pts.iter().map(|p| c + (*p - c) * scale).collect();
        recentered(&scaled, center)
    }

    /// For each corner of [`Figure::placed`], whether its two sides meet at a right angle.
    pub fn right_angles(&self) -> Vec<bool> {
        let pts = self.placed(Point::ZERO, 1.0);
        let n = pts.len();
        (0..n)
            .map(|i| {
                let cur = pts[i];
                let to_prev = Line::new(cur, pts[(i + n - 1) % n]);
                let to_next = Line::new(cur, pts[(i + 1) % n]);
                are_perpendicular(to_prev, to_next, RIGHT_ANGLE_TOL)
            })
            .collect()
    }
}

/// Plural name of the family of `sides`-sided shapes.
pub fn family_name(sides: usize) -> Bilingual {
    match sides {
        3 => Bilingual::new("triangles", "مثلثات"),
        4 => Bilingual::new("quadrilaterals", "رباعيات"),
        5 => Bilingual::new("pentagons", "خماسيات"),
        6 => Bilingual::new("hexagons", "سداسيات"),
        n => Bilingual::new(format!("{n}-sided shapes"), format!("أشكال ذات {n} أضلاع")),
    }
}

/// Indices of `figures` grouped by side count, smallest count first.
pub fn families(figures: &[Figure]) -> Vec<(usize, Vec<usize>)> {
    let mut groups: Vec<(usize, Vec<usize>)> = Vec::new();
    for (i, f) in figures.iter().enumerate() {
        match groups.iter_mut().find(|(n, _)| *n == f.sides()) {
            Some((_, members)) => members.push(i),
            None => groups.push((f.sides(), vec![i])),
        }
    }
    groups.sort_by_key(|(n, _)| *n);
    groups
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShapesPrompts {
    pub display: Bilingual,
    pub sides: Bilingual,
    pub vertices: Bilingual,
    pub angles: Bilingual,
    pub compare: Bilingual,
    pub classify: Bilingual,
}

impl Default for ShapesPrompts {
    fn default() -> Self {
        Self {
            display: Bilingual::new("Look at the shape.", "نلاحظ الشكل."),
            sides: Bilingual::new("Count the sides.", "نعد الأضلاع."),
            vertices: Bilingual::new("Count the vertices.", "نعد الرؤوس."),
            angles: Bilingual::new("Highlight the angles (corners).", "نبرز الزوايا (الأركان)."),
            compare: Bilingual::new("Compare shapes by properties.", "نقارن الأشكال حسب الخاصيات."),
            classify: Bilingual::new(
                "Classify: same properties → same family.",
                "نصنف: نفس الخاصيات → نفس العائلة.",
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShapesConfig {
    #[serde(flatten)]
    pub header: LessonConfig,
    pub shapes: Vec<Figure>,
    pub prompts: ShapesPrompts,
    /// Shape whose sides are counted in the closing check.
    pub assessment: Figure,
    /// Side counts offered as answers; exactly one matches the assessment shape.
    pub assessment_options: Vec<u32>,
}

impl Default for ShapesConfig {
    fn default() -> Self {
        let pts = |v: &[(f64, f64)]| v.iter().map(|&(x, y)| Point::new(x, y)).collect();
        Self {
            header: LessonConfig::new(Bilingual::new(
                "Properties of standard geometric shapes",
                "خاصيات الأشكال الهندسية الاعتيادية",
            )),
            shapes: vec![
                Figure::new(
                    Bilingual::new("Triangle", "مثلث"),
                    pts(&[(0.0, 1.6), (-1.4, -1.0), (1.4, -1.0)]),
                ),
                Figure::new(
                    Bilingual::new("Square", "مربع"),
                    pts(&[(-1.2, 1.2), (1.2, 1.2), (1.2, -1.2), (-1.2, -1.2)]),
                ),
                Figure::new(
                    Bilingual::new("Rectangle", "مستطيل"),
                    pts(&[(-1.8, 1.1), (1.8, 1.1), (1.8, -1.1), (-1.8, -1.1)]),
                ),
                Figure::new(
                    Bilingual::new("Pentagon", "خماسي"),
                    pts(&[(0.0, 1.7), (-1.6, 0.5), (-1.0, -1.4), (1.0, -1.4), (1.6, 0.5)]),
                ),
            ],
            prompts: ShapesPrompts::default(),
            assessment: Figure::new(
                Bilingual::new("Hexagon", "سداسي"),
                regular_polygon(6, Point::ZERO, 1.3, 0.0),
            ),
            assessment_options: vec![5, 6, 7],
        }
    }
}

impl LessonContent for ShapesConfig {
    fn header(&self) -> &LessonConfig {
        &self.header
    }

    fn validate(&self) -> TiceResult<()> {
        if self.shapes.is_empty() {
            return Err(TiceError::validation("at least one shape is needed"));
        }
        for (i, f) in self.shapes.iter().enumerate() {
            f.validate()
                .map_err(|e| TiceError::validation(format!("shape {}: {e}", i + 1)))?;
        }
        self.assessment
            .validate()
            .map_err(|e| TiceError::validation(format!("assessment: {e}")))?;
        let sides = self.assessment.sides() as u32;
        let matching = self
            .assessment_options
            .iter()
            .filter(|o| **o == sides)
            .count();
        if matching != 1 {
            return Err(TiceError::validation(format!(
                "exactly one option must be {sides}, found {matching}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct ShapesLesson {
    config: ShapesConfig,
    style: ShapesStyle,
}

impl Lesson for ShapesLesson {
    type Style = ShapesStyle;
    type Config = ShapesConfig;

    const ID: &'static str = "m3-g07-shape-properties";

    fn new(config: ShapesConfig, style: ShapesStyle) -> TiceResult<Self> {
        config.validate()?;
        style.validate()?;
        Ok(Self { config, style })
    }

    fn config(&self) -> &ShapesConfig {
        &self.config
    }

    fn style(&self) -> &ShapesStyle {
        &self.style
    }

    fn build_steps(&self) -> Vec<Step<Self>> {
        let mut steps = vec![
            Step::new("intro", Self::intro),
            Step::new("exploration_properties", Self::exploration),
        ];
        if self.style.show_comparison_panel {
            steps.push(Step::new("collective_discussion_compare", Self::discussion));
        }
        if self.style.show_classification_step {
            steps.push(Step::new(
                "institutionalization_classify",
                Self::institutionalization,
            ));
        }
        steps.extend([
            Step::new("mini_assessment", Self::mini_assessment),
            Step::new("outro", Self::outro),
        ]);
        steps
    }
}

impl ShapesLesson {
    fn outline(&self, vertices: &[Point]) -> Visual {
        let s = &self.style.base;
        Visual::polygon(vertices)
            .with_stroke(s.palette.shape, s.stroke_width)
            .with_fill(s.palette.shape, s.fill_opacity)
    }

    /// A short stroke across the middle of every side.
    fn side_ticks(vertices: &[Point]) -> Vec<Line> {
        polygon_edges(vertices)
            .into_iter()
            .filter_map(|e| {
                let d = unit(e.p1 - e.p0)?;
                let m = e.p0.midpoint(e.p1);
                Some(Line::new(m - perp(d) * TICK_HALF, m + perp(d) * TICK_HALF))
            })
            .collect()
    }

    /// The mark inside corner `i` of counter-clockwise `vertices`.
    fn angle_mark(&self, vertices: &[Point], i: usize, right: bool) -> Visual {
        let s = &self.style.base;
        let n = vertices.len();
        let cur = vertices[i];
        let to_next = vertices[(i + 1) % n] - cur;
        let to_prev = vertices[(i + n - 1) % n] - cur;
        let r = self.style.angle_radius;
        if right && let Some(glyph) = right_angle_marker(cur, to_next, to_prev, r * 0.7) {
            return Visual::segments(&glyph)
                .with_stroke(s.palette.highlight, self.style.marker_stroke);
        }
        let a0 = to_next.atan2();
        let mut sweep = to_prev.atan2() - a0;
        if sweep <= 0.0 {
            sweep += TAU;
        }
        Visual::path(sector_path(cur, r, a0, a0 + sweep))
            .with_stroke(s.palette.highlight, self.style.marker_stroke)
            .with_fill(s.palette.highlight, 0.25)
    }

    /// Count the sides one at a time with a running counter.
    fn count_sides(&self, stage: &mut Stage, vertices: &[Point]) -> TiceResult<()> {
        let s = &self.style.base;
        let at = PANEL_CENTER + Vec2::new(0.0, 1.6);
        let counter = stage.stage(math(s, "0", 0.7, at));
        stage.play([Animation::fade_in(counter)], s.rt_fast)?;
        for (i, edge) in polygon_edges(vertices).into_iter().enumerate() {
            let side = Visual::line(edge.p0, edge.p1)
                .with_stroke(s.palette.accent, s.stroke_width + 2.0);
            let side = stage.stage(side);
            stage.play([Animation::create(side)], self.style.count_run_time)?;
            stage.play(
                [Animation::transform(counter, math(s, (i + 1).to_string(), 0.7, at))],
                self.style.count_run_time * 0.7,
            )?;
        }
        Ok(())
    }

    fn property_panel(&self, stage: &Stage, figure: &Figure) -> Vec<Visual> {
        let s = &self.style.base;
        let card = Rect::from_center_size(PANEL_CENTER, (4.9, 2.4));
        let name = stage.text(&figure.name);
        let (sides, vertices) = (figure.sides(), figure.vertex_count());
        let mut visuals = vec![panel(s, card)];
        visuals.extend(bullet_lines(
            stage,
            s,
            &[
                Bilingual::new(format!("Name: {name}"), format!("الاسم: {name}")),
                Bilingual::new(format!("Sides: {sides}"), format!("الأضلاع: {sides}")),
                Bilingual::new(format!("Vertices: {vertices}"), format!("الرؤوس: {vertices}")),
            ],
            0.55,
            Point::new(card.x0 + 0.5, card.y1 - 0.55),
        ));
        visuals
    }

    /// Display one shape and reveal its properties. Everything shown is faded out at the end.
    fn describe(&self, stage: &mut Stage, figure: &Figure) -> TiceResult<()> {
        let s = &self.style.base;
        let st = &self.style;
        let p = &self.config.prompts;

        banner(stage, s, &p.display)?;
        let vertices = figure.placed(SHAPE_CENTER, 1.0);
        tracing::debug!(
            shape = %figure.name.en,
            sides = figure.sides(),
            right_angles = figure.right_angles().iter().filter(|&&r| r).count(),
            "describing a shape"
        );
        let outline = self.outline(&vertices);
        let top = outline.bounds().y1;
        let shape = stage.stage(outline);
        let name = text_at(stage, s, &figure.name, 0.6, Point::new(SHAPE_CENTER.x, top + 0.45));
        let name = stage.stage(name);
        stage.play(
            [
                Animation::create(shape),
                Animation::fade_in_shifted(name, Vec2::new(0.0, 0.05)),
            ],
            s.rt_norm,
        )?;

        if st.show_side_markers {
            banner(stage, s, &p.sides)?;
            self.count_sides(stage, &vertices)?;
            let ticks = Visual::segments(&Self::side_ticks(&vertices))
                .with_stroke(s.palette.text, st.marker_stroke);
            let ticks = stage.stage(ticks);
            stage.play([Animation::fade_in(ticks)], s.rt_fast)?;
            stage.wait(0.15)?;
        }

        if st.show_vertex_markers {
            banner(stage, s, &p.vertices)?;
            let dots = vertices.iter().map(|v| {
                Visual::dot(*v, st.vertex_radius).with_fill(s.palette.text, 1.0)
            });
            let dots = stage.stage_all(dots);
            stage.play([Animation::fade_in_shifted(dots, Vec2::new(0.0, 0.03))], s.rt_fast)?;
        }

        if st.show_angle_markers {
            banner(stage, s, &p.angles)?;
            let marks: Vec<Visual> = figure
                .right_angles()
                .into_iter()
                .enumerate()
                .map(|(i, right)| self.angle_mark(&vertices, i, right))
                .collect();
            let marks = stage.stage_all(marks);
            stage.play([Animation::fade_in(marks)], s.rt_norm)?;
        }

        let card = self.property_panel(stage, figure);
        let card = stage.stage_all(card);
        stage.play([Animation::fade_in_shifted(card, Vec2::new(0.0, 0.08))], s.rt_norm)?;
        stage.wait(0.35)?;
        clear(stage, s)
    }

    /// The configured shapes shrunk into a labelled row along the bottom.
    fn comparison_row(&self, stage: &Stage) -> Vec<Visual> {
        let s = &self.style.base;
        let minis: Vec<Visual> = self
            .config
            .shapes
            .iter()
            .map(|f| self.outline(&f.placed(Point::ZERO, self.style.mini_scale)))
            .collect();
        let minis = arrange_row(minis, Point::new(0.0, COMPARE_ROW_Y), 0.9);
        let mut visuals = Vec::with_capacity(minis.len() * 2);
        for (mini, figure) in minis.into_iter().zip(&self.config.shapes) {
            let b = mini.bounds();
            let label = text_at(stage, s, &figure.name, 0.4, Point::new(b.center().x, b.y0 - 0.25));
            visuals.push(mini);
            visuals.push(label);
        }
        visuals
    }

    fn intro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        subtitle(
            stage,
            &self.style.base,
            &Bilingual::new(
                "Sides, vertices and angles describe a shape.",
                "الأضلاع والرؤوس والزوايا تصف الشكل.",
            ),
        )
    }

    fn exploration(&mut self, stage: &mut Stage) -> TiceResult<()> {
        for figure in &self.config.shapes {
            self.describe(stage, figure)?;
        }
        Ok(())
    }

    fn discussion(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(stage, s, &self.config.prompts.compare)?;
        let row = self.comparison_row(stage);
        let row = stage.stage_all(row);
        stage.play(
            [Animation::fade_in_shifted(row.clone(), Vec2::new(0.0, 0.08))],
            s.rt_norm,
        )?;
        scaffold_card(
            stage,
            s,
            &[
                Bilingual::new(
                    "• A shape has as many vertices as sides.",
                    "• للشكل عدد من الرؤوس يساوي عدد أضلاعه.",
                ),
                Bilingual::new(
                    "• Size and position do not change these counts.",
                    "• الحجم والموضع لا يغيران هذه الأعداد.",
                ),
                Bilingual::new(
                    "• Some corners are right angles.",
                    "• بعض الأركان زوايا قائمة.",
                ),
            ],
        )?;
        stage.play([Animation::fade_out(row)], s.rt_fast)
    }

    fn institutionalization(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(stage, s, &self.config.prompts.classify)?;
        let card = Rect::from_center_size((0.0, 0.3), (6.8, 3.4));
        let header = Bilingual::new("Shape | sides | vertices", "الشكل | الأضلاع | الرؤوس");
        let rows: Vec<Bilingual> = self
            .config
            .shapes
            .iter()
            .map(|f| {
                let name = stage.text(&f.name);
                Bilingual::en_only(format!("{name} | {} | {}", f.sides(), f.vertex_count()))
            })
            .collect();
        let top_left = Point::new(card.x0 + 0.5, card.y1 - 0.5);
        let mut visuals = vec![panel(s, card)];
        visuals.extend(bullet_lines(stage, s, std::slice::from_ref(&header), 0.5, top_left));
        let backdrop_and_header = stage.stage_all(visuals);
        let rows = bullet_lines(stage, s, &rows, 0.45, top_left - Vec2::new(0.0, 0.55));
        let rows = stage.stage_all(rows);
        stage.play(
            [
                Animation::fade_in_shifted(backdrop_and_header.clone(), Vec2::new(0.0, 0.08)),
                Animation::fade_in_shifted(rows.clone(), Vec2::new(0.0, 0.08)),
            ],
            s.rt_norm,
        )?;

        let mut shown = backdrop_and_header;
        shown.extend(rows.iter().copied());
        for (sides, members) in families(&self.config.shapes) {
            let ids: Vec<ObjectId> = members.iter().map(|i| rows[*i]).collect();
            stage.play([Animation::indicate(ids)], s.rt_fast)?;
            let family = family_name(sides);
            let note = Bilingual::new(
                format!("{sides} sides, {sides} vertices: {}", family.en),
                format!(
                    "{sides} أضلاع و{sides} رؤوس: {}",
                    family.ar.as_deref().unwrap_or(&family.en)
                ),
            );
            let note = text_at(stage, s, &note, 0.5, Point::new(0.0, card.y0 - 0.45))
                .with_color(s.palette.positive);
            let note = stage.stage(note);
            stage.play([Animation::fade_in(note)], s.rt_fast)?;
            stage.wait(0.3)?;
            stage.play([Animation::fade_out(note)], s.rt_fast)?;
        }
        stage.wait(0.35)?;
        stage.play([Animation::fade_out(shown)], s.rt_fast)
    }

    fn mini_assessment(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(
            stage,
            s,
            &Bilingual::new(
                "Mini-check: how many sides does this shape have?",
                "تحقق صغير: كم ضلعاً لهذا الشكل؟",
            ),
        )?;
        let figure = &self.config.assessment;
        let vertices = figure.placed(Point::new(0.0, 0.9), 1.0);
        let shape = stage.stage(self.outline(&vertices));
        stage.play([Animation::create(shape)], s.rt_norm)?;

        let labels: Vec<String> = self
            .config
            .assessment_options
            .iter()
            .map(u32::to_string)
            .collect();
        let (mut ids, cards) = option_row(stage, s, &labels, -1.7)?;
        ids.push(shape);
        stage.wait(0.6)?;
        let sides = figure.sides() as u32;
        let card = self
            .config
            .assessment_options
            .iter()
            .position(|o| *o == sides)
            .map(|i| cards[i])
            .ok_or_else(|| TiceError::lesson("no option matches the side count"))?;
        ids.extend(mark_correct(stage, s, card)?);
        stage.wait(0.5)?;
        stage.play([Animation::fade_out(ids)], s.rt_fast)
    }

    fn outro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        recap(
            stage,
            &self.style.base,
            &[
                Bilingual::new("• Count the sides", "• نعد الأضلاع"),
                Bilingual::new("• Count the vertices", "• نعد الرؤوس"),
                Bilingual::new("• Look at the angles", "• نلاحظ الزوايا"),
                Bilingual::new("• Same counts → same family", "• نفس الأعداد → نفس العائلة"),
            ],
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/shapes.rs"]
mod tests;
