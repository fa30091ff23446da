//! `m3-l15-perimeter`: perimeter of squares, rectangles and triangles by tracing their sides.

use animtice::{
    Animation, Bilingual, Lesson, LessonConfig, LessonContent, LessonStyle, ObjectId, Point, Rect,
    Stage, Step, StyleConfig, TiceError, TiceResult, Vec2, Visual, banner, edge_label_anchor,
    edge_length, format_quantity, polygon_edges, rect_vertices, recentered,
};

use crate::common::{BOTTOM_Y, math, panel, recap, scaffold_card, subtitle, text_at};

/// Where traced shapes sit on screen.
const SHAPE_CENTER: Point = Point::new(-2.8, -0.1);

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PerimeterStyle {
    #[serde(flatten)]
    pub base: StyleConfig,
    pub tracer_radius: f64,
    /// Seconds the tracer spends on each side.
    pub trace_run_time: f64,
    pub highlight_run_time: f64,
    /// Unit written after lengths; empty hides it.
    pub units: String,
    pub show_string_metaphor: bool,
    pub show_area_contrast: bool,
    pub show_sum_panel: bool,
    pub sum_panel_width: f64,
    pub sum_panel_height: f64,
}

impl Default for PerimeterStyle {
    fn default() -> Self {
        Self {
            base: StyleConfig::default(),
            tracer_radius: 0.08,
            trace_run_time: 1.0,
            highlight_run_time: 0.45,
            units: "cm".to_owned(),
            show_string_metaphor: true,
            show_area_contrast: true,
            show_sum_panel: true,
            sum_panel_width: 6.0,
            sum_panel_height: 2.6,
        }
    }
}

impl LessonStyle for PerimeterStyle {
    fn base(&self) -> &StyleConfig {
        &self.base
    }

    fn validate(&self) -> TiceResult<()> {
        self.base.validate()?;
        for (name, v) in [
            ("tracer_radius", self.tracer_radius),
            ("trace_run_time", self.trace_run_time),
            ("highlight_run_time", self.highlight_run_time),
            ("sum_panel_width", self.sum_panel_width),
            ("sum_panel_height", self.sum_panel_height),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(TiceError::validation(format!("{name} must be > 0")));
            }
        }
        Ok(())
    }
}

/// A standard shape given by its side lengths, in lesson units (cm by default).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    Square { side: f64 },
    Rectangle { width: f64, height: f64 },
    /// Sides in drawing order: base, then the side leaving the base's right end, then the last.
    Triangle { a: f64, b: f64, c: f64 },
}

impl ShapeSpec {
    pub fn name(&self) -> Bilingual {
        match self {
            Self::Square { .. } => Bilingual::new("Square", "مربع"),
            Self::Rectangle { .. } => Bilingual::new("Rectangle", "مستطيل"),
            Self::Triangle { .. } => Bilingual::new("Triangle", "مثلث"),
        }
    }

    /// Side lengths in the order the sides are traced.
    pub fn sides(&self) -> Vec<f64> {
        match *self {
            Self::Square { side } => vec![side; 4],
            Self::Rectangle { width, height } => vec![width, height, width, height],
            Self::Triangle { a, b, c } => vec![a, b, c],
        }
    }

    pub fn perimeter(&self) -> f64 {
        self.sides().iter().sum()
    }

    pub fn validate(&self) -> TiceResult<()> {
        let sides = self.sides();
        if sides.iter().any(|s| !(s.is_finite() && *s > 0.0)) {
            return Err(TiceError::validation("side lengths must be > 0"));
        }
        if let Self::Triangle { a, b, c } = *self
            && !(a + b > c && b + c > a && a + c > b)
        {
            return Err(TiceError::validation(format!(
                "sides {a}, {b}, {c} do not make a triangle"
            )));
        }
        Ok(())
    }

    /// Counter-clockwise vertices, `scale` scene units per lesson unit, centered on `center`.
    ///
    /// Edge `i` of the result has length `sides()[i] * scale`.
    pub fn vertices(&self, scale: f64, center: Point) -> TiceResult<Vec<Point>> {
        self.validate()?;
        let pts = match *self {
            Self::Square { side } => rect_vertices(center, side * scale, side * scale),
            Self::Rectangle { width, height } => {
                rect_vertices(center, width * scale, height * scale)
            }
            Self::Triangle { a, b, c } => {
                // Third vertex from the two sides meeting it.
                let x = (a * a + c * c - b * b) / (2.0 * a);
                let y = (c * c - x * x).max(0.0).sqrt();
                let raw = [
                    Point::ZERO,
                    Point::new(a * scale, 0.0),
                    Point::new(x * scale, y * scale),
                ];
                recentered(&raw, center)
            }
        };
        Ok(pts)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PerimeterPrompts {
    pub trace: Bilingual,
    pub follow: Bilingual,
    pub total: Bilingual,
    pub not_area: Bilingual,
}

impl Default for PerimeterPrompts {
    fn default() -> Self {
        Self {
            trace: Bilingual::new(
                "Perimeter is the length around the shape.",
                "المحيط هو الطول حول الشكل.",
            ),
            follow: Bilingual::new(
                "Let’s trace the contour side by side.",
                "لنَتْبَعْ حدود الشكل ضلعاً ضلعاً.",
            ),
            total: Bilingual::new("Total perimeter:", "المحيط الكلي:"),
            not_area: Bilingual::new(
                "Perimeter is NOT the filled area.",
                "المحيط ليس هو المساحة المظللة.",
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PerimeterConfig {
    #[serde(flatten)]
    pub header: LessonConfig,
    /// Shapes traced during exploration.
    pub shapes: Vec<ShapeSpec>,
    /// Scene units per lesson unit.
    pub scale: f64,
    pub prompts: PerimeterPrompts,
    pub assessment: ShapeSpec,
    /// The perimeter announced at the end of the check; must match the shape.
    pub assessment_answer: f64,
}

impl Default for PerimeterConfig {
    fn default() -> Self {
        Self {
            header: LessonConfig::new(Bilingual::new(
                "Identifying perimeters of standard geometric shapes",
                "تعرف محيطات الأشكال الهندسية الاعتيادية",
            )),
            shapes: vec![
                ShapeSpec::Square { side: 4.0 },
                ShapeSpec::Rectangle {
                    width: 6.0,
                    height: 3.0,
                },
            ],
            scale: 0.45,
            prompts: PerimeterPrompts::default(),
            assessment: ShapeSpec::Triangle {
                a: 3.0,
                b: 4.0,
                c: 5.0,
            },
            assessment_answer: 12.0,
        }
    }
}

impl LessonContent for PerimeterConfig {
    fn header(&self) -> &LessonConfig {
        &self.header
    }

    fn validate(&self) -> TiceResult<()> {
        if self.shapes.is_empty() {
            return Err(TiceError::validation("at least one shape is needed"));
        }
        for s in &self.shapes {
            s.validate()?;
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(TiceError::validation("scale must be > 0"));
        }
        self.assessment.validate()?;
        let p = self.assessment.perimeter();
        if (p - self.assessment_answer).abs() > 1e-9 {
            return Err(TiceError::validation(format!(
                "assessment answer {} does not match the perimeter {}",
                format_quantity(self.assessment_answer),
                format_quantity(p)
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct PerimeterLesson {
    config: PerimeterConfig,
    style: PerimeterStyle,
}

impl Lesson for PerimeterLesson {
    type Style = PerimeterStyle;
    type Config = PerimeterConfig;

    const ID: &'static str = "m3-l15-perimeter";

    fn new(config: PerimeterConfig, style: PerimeterStyle) -> TiceResult<Self> {
        config.validate()?;
        style.validate()?;
        Ok(Self { config, style })
    }

    fn config(&self) -> &PerimeterConfig {
        &self.config
    }

    fn style(&self) -> &PerimeterStyle {
        &self.style
    }

    fn build_steps(&self) -> Vec<Step<Self>> {
        vec![
            Step::new("intro", Self::intro),
            Step::new("exploration_trace", Self::exploration_trace),
            Step::new(
                "collective_discussion_perimeter_vs_area",
                Self::discussion,
            ),
            Step::new("institutionalization_notation", Self::institutionalization),
            Step::new("mini_assessment", Self::mini_assessment),
            Step::new("outro", Self::outro),
        ]
    }
}

impl PerimeterLesson {
    /// `value` with the unit appended, when there is one.
    fn with_unit(&self, value: f64) -> String {
        let v = format_quantity(value);
        if self.style.units.is_empty() {
            v
        } else {
            format!("{v} {}", self.style.units)
        }
    }

    /// `a + b + ... = total unit`.
    fn sum_chain(&self, values: &[f64]) -> String {
        let terms: Vec<String> = values.iter().map(|v| format_quantity(*v)).collect();
        let total: f64 = values.iter().sum();
        format!("{} = {}", terms.join(" + "), self.with_unit(total))
    }

    /// Draw `spec`, label its sides, trace them one by one while the running sum grows, then
    /// show the total. Returns everything left on screen.
    fn trace_shape_and_sum(&self, stage: &mut Stage, spec: &ShapeSpec) -> TiceResult<Vec<ObjectId>> {
        let s = &self.style.base;
        let k = self.config.scale;
        banner(stage, s, &self.config.prompts.trace)?;

        let vertices = spec.vertices(k, SHAPE_CENTER)?;
        let outline = Visual::polygon(&vertices)
            .with_stroke(s.palette.shape, s.stroke_width)
            .with_fill(s.palette.shape, s.fill_opacity);
        let top = outline.bounds().y1;
        let shape = stage.stage(outline);
        let name = text_at(stage, s, &spec.name(), 0.55, Point::new(SHAPE_CENTER.x, top + 0.45));
        let name = stage.stage(name);
        stage.play(
            [
                Animation::create(shape),
                Animation::fade_in_shifted(name, Vec2::new(0.0, 0.1)),
            ],
            s.rt_norm,
        )?;
        let mut shown = vec![shape, name];

        let edges = polygon_edges(&vertices);
        let values = spec.sides();
        let labels: Vec<Visual> = edges
            .iter()
            .zip(&values)
            .map(|(edge, v)| {
                math(s, self.with_unit(*v), 0.45, edge_label_anchor(*edge, -0.3))
                    .with_color(s.palette.highlight)
            })
            .collect();

        let sum_box = Rect::from_center_size(
            (3.6, -0.1),
            (self.style.sum_panel_width, self.style.sum_panel_height),
        );
        if self.style.show_sum_panel {
            let p = stage.stage(panel(s, sum_box));
            stage.play(
                [Animation::fade_in_shifted(p, Vec2::new(-0.1, 0.0))],
                s.rt_fast,
            )?;
            shown.push(p);
        }
        let labels = stage.stage_all(labels);
        stage.play(
            [Animation::fade_in_shifted(labels.clone(), Vec2::new(0.0, 0.05))],
            s.rt_norm,
        )?;
        shown.extend(labels);

        banner(stage, s, &self.config.prompts.follow)?;
        let tracer = Visual::dot(vertices[0], self.style.tracer_radius)
            .with_fill(s.palette.highlight, 1.0)
            .with_z(6);
        let tracer = stage.stage(tracer);
        stage.play(
            [Animation::fade_in_shifted(tracer, Vec2::new(0.0, 0.05))],
            s.rt_fast,
        )?;
        shown.push(tracer);

        let mut running: Option<ObjectId> = None;
        for (i, edge) in edges.iter().enumerate() {
            let hi = Visual::line(edge.p0, edge.p1)
                .with_stroke(s.palette.highlight, s.stroke_width + 3.0)
                .with_z(2);
            let hi = stage.stage(hi);
            stage.play([Animation::create(hi)], self.style.highlight_run_time)?;
            stage.play(
                [Animation::move_along(tracer, vec![edge.p1])],
                self.style.trace_run_time,
            )?;

            let chain = math(s, self.sum_chain(&values[..=i]), 0.6, sum_box.center());
            match running {
                None => {
                    let id = stage.stage(chain);
                    stage.play([Animation::write(id)], s.rt_fast)?;
                    running = Some(id);
                }
                Some(id) => stage.play([Animation::transform(id, chain)], s.rt_fast)?,
            }
            stage.play([Animation::fade_out(hi)], s.rt_fast)?;
        }
        shown.extend(running);

        banner(stage, s, &self.config.prompts.total)?;
        let total = format!("P = {}", self.with_unit(spec.perimeter()));
        let total = math(s, total, 0.8, Point::new(sum_box.center().x, sum_box.y0 - 0.45))
            .with_color(s.palette.positive);
        let total = stage.stage(total);
        stage.play([Animation::write(total)], s.rt_norm)?;
        shown.push(total);

        if self.style.show_string_metaphor {
            shown.extend(self.unroll_string(stage, &vertices)?);
        }
        Ok(shown)
    }

    /// Lift the outline off the shape as a loop of string and pull it straight along the
    /// bottom: its length is the perimeter.
    fn unroll_string(&self, stage: &mut Stage, vertices: &[Point]) -> TiceResult<Vec<ObjectId>> {
        let s = &self.style.base;
        let mut loop_pts = vertices.to_vec();
        loop_pts.push(vertices[0]);
        let lengths: Vec<f64> = polygon_edges(vertices).into_iter().map(edge_length).collect();
        let total: f64 = lengths.iter().sum();

        let y = BOTTOM_Y + 0.7;
        let mut x = -total / 2.0;
        let mut straight = vec![Point::new(x, y)];
        for l in &lengths {
            x += l;
            straight.push(Point::new(x, y));
        }

        let string_style = |v: Visual| v.with_stroke(s.palette.accent, 6.0).with_z(3);
        let string = stage.stage(string_style(Visual::polyline(&loop_pts)));
        stage.play([Animation::create(string)], s.rt_fast)?;
        stage.play(
            [Animation::transform(string, string_style(Visual::polyline(&straight)))],
            s.rt_slow,
        )?;
        let hint = Bilingual::new("string", "خيط");
        let hint = text_at(stage, s, &hint, 0.45, Point::new(0.0, y - 0.35));
        let hint = stage.stage(hint);
        stage.play([Animation::fade_in_shifted(hint, Vec2::new(0.0, 0.1))], s.rt_fast)?;
        Ok(vec![string, hint])
    }

    fn intro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        subtitle(
            stage,
            &self.style.base,
            &Bilingual::new(
                "We measure the boundary (around), not the inside.",
                "نقيس الحدود (حول الشكل)، وليس الداخل.",
            ),
        )
    }

    fn exploration_trace(&mut self, stage: &mut Stage) -> TiceResult<()> {
        for spec in &self.config.shapes {
            let shown = self.trace_shape_and_sum(stage, spec)?;
            stage.wait(0.4)?;
            stage.play([Animation::fade_out(shown)], self.style.base.rt_fast)?;
        }
        Ok(())
    }

    fn discussion(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(
            stage,
            s,
            &Bilingual::new("Discussion: Perimeter vs Area", "نقاش: المحيط والمساحة"),
        )?;
        if self.style.show_area_contrast {
            let r1 = Rect::from_center_size((-4.4, 1.0), (3.2, 1.6));
            let r2 = Rect::from_center_size((-0.8, 1.0), (2.4, 2.2));
            let rects: Vec<ObjectId> = [r1, r2]
                .into_iter()
                .map(|r| {
                    stage.stage(
                        Visual::rect(r)
                            .with_stroke(s.palette.shape, s.stroke_width)
                            .with_fill(s.palette.shape, 0.18),
                    )
                })
                .collect();
            let tag = text_at(
                stage,
                s,
                &self.config.prompts.not_area,
                0.52,
                Point::new(-2.6, -0.45),
            )
            .with_color(s.palette.negative);
            let tag = stage.stage(tag);
            stage.play(
                [
                    Animation::fade_in_shifted(rects.clone(), Vec2::new(0.0, 0.05)),
                    Animation::fade_in_shifted(tag, Vec2::new(0.0, 0.05)),
                ],
                s.rt_norm,
            )?;
            // Boundary only: trace both outlines over the filled rectangles.
            let outlines = stage.stage_all([r1, r2].into_iter().map(|r| {
                Visual::rect(r)
                    .with_stroke(s.palette.highlight, s.stroke_width + 2.0)
                    .with_z(2)
            }));
            stage.play([Animation::create(outlines.clone())], self.style.trace_run_time)?;
            stage.wait(0.5)?;
            let mut all = rects;
            all.extend(outlines);
            all.push(tag);
            stage.play([Animation::fade_out(all)], s.rt_fast)?;
        }
        scaffold_card(
            stage,
            s,
            &[
                Bilingual::new(
                    "• Perimeter = length around (boundary).",
                    "• المحيط = الطول حول الشكل (الحدود).",
                ),
                Bilingual::new("• Area = surface inside.", "• المساحة = السطح داخل الشكل."),
                Bilingual::new(
                    "• A big area can still have smaller perimeter (and vice versa).",
                    "• قد تكون المساحة كبيرة لكن المحيط أصغر (والعكس).",
                ),
            ],
        )
    }

    fn institutionalization(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(
            stage,
            s,
            &Bilingual::new("Institutionalization: Perimeter (P)", "التثبيت: المحيط (P)"),
        )?;
        let rule = Bilingual::new("P = sum of side lengths", "P = مجموع أطوال الأضلاع");
        let rule = text_at(stage, s, &rule, 0.8, Point::new(0.0, 0.3));
        let example = self.config.shapes[0].sides();
        let terms: Vec<String> = example.iter().map(|v| format_quantity(*v)).collect();
        let example = math(s, format!("P = {}", terms.join(" + ")), 0.7, Point::new(0.0, -0.5));
        let ids = stage.stage_all([rule, example]);
        for id in &ids {
            stage.play([Animation::write(*id)], s.rt_norm)?;
        }
        stage.wait(0.5)?;
        stage.play([Animation::fade_out(ids)], s.rt_fast)
    }

    fn mini_assessment(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(
            stage,
            s,
            &Bilingual::new("Mini-check: Find the perimeter.", "تحقق صغير: أوجد المحيط."),
        )?;
        let mut shown = self.trace_shape_and_sum(stage, &self.config.assessment)?;
        let sides = self.config.assessment.sides();
        let terms: Vec<String> = sides.iter().map(|v| format_quantity(*v)).collect();
        let answer = format!(
            "P = {} = {}",
            terms.join(" + "),
            format_quantity(self.config.assessment_answer)
        );
        let answer = math(s, answer, 0.75, Point::new(0.0, BOTTOM_Y))
            .with_color(s.palette.positive);
        let answer = stage.stage(answer);
        stage.play([Animation::write(answer)], s.rt_norm)?;
        stage.wait(0.5)?;
        shown.push(answer);
        stage.play([Animation::fade_out(shown)], s.rt_fast)
    }

    fn outro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let units = &self.style.units;
        recap(
            stage,
            &self.style.base,
            &[
                Bilingual::new(
                    "• Perimeter = length around the shape",
                    "• المحيط = الطول حول الشكل",
                ),
                Bilingual::new("• Trace all sides (don’t skip!)", "• نتبع كل الأضلاع (بدون إهمال)"),
                Bilingual::new("• Add side lengths: P = ...", "• نجمع أطوال الأضلاع: P = ..."),
                Bilingual::new(
                    format!("• Use units ({units})"),
                    format!("• نستعمل الوحدة ({units})"),
                ),
            ],
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/perimeter.rs"]
mod tests;
