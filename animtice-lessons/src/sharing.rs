//! `m3-l16-division-sharing`: division as fair sharing. Tokens are dealt one at a time to each
//! group in turn until too few are left for another round; what stays behind is the remainder.

use animtice::{
    Animation, Bilingual, Lesson, LessonConfig, LessonContent, LessonStyle, ObjectId, Point, Stage,
    Step, StyleConfig, TiceError, TiceResult, Vec2, Visual, banner, clear, grid_points,
};

use crate::common::{BOTTOM_Y, bottom_note, math, recap, scaffold_card, subtitle, text_at};

pub const MAX_GROUPS: u32 = 5;
pub const MAX_TOTAL: u32 = 36;

/// Row of the token pool and row of the group containers.
const POOL_Y: f64 = 1.85;
const GROUPS_Y: f64 = -0.7;
const GROUP_SPACING: f64 = 2.4;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SharingStyle {
    #[serde(flatten)]
    pub base: StyleConfig,
    pub token_radius: f64,
    pub token_spacing: f64,
    pub container_radius: f64,
    pub max_tokens_per_row: u32,
    /// Seconds for one token to travel to its group.
    pub deal_run_time: f64,
    pub show_equality_check: bool,
    pub show_division_expression: bool,
    pub show_round_robin_pointer: bool,
}

impl Default for SharingStyle {
    fn default() -> Self {
        Self {
            base: StyleConfig::default(),
            token_radius: 0.14,
            token_spacing: 0.42,
            container_radius: 1.05,
            max_tokens_per_row: 6,
            deal_run_time: 0.3,
            show_equality_check: true,
            show_division_expression: true,
            show_round_robin_pointer: true,
        }
    }
}

impl LessonStyle for SharingStyle {
    fn base(&self) -> &StyleConfig {
        &self.base
    }

    fn validate(&self) -> TiceResult<()> {
        self.base.validate()?;
        for (name, v) in [
            ("token_radius", self.token_radius),
            ("token_spacing", self.token_spacing),
            ("container_radius", self.container_radius),
            ("deal_run_time", self.deal_run_time),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(TiceError::validation(format!("{name} must be > 0")));
            }
        }
        if self.max_tokens_per_row == 0 {
            return Err(TiceError::validation("max_tokens_per_row must be > 0"));
        }
        if self.token_spacing < 2.0 * self.token_radius {
            return Err(TiceError::validation(
                "tokens would overlap: token_spacing < 2 * token_radius",
            ));
        }
        Ok(())
    }
}

/// `total` objects shared fairly between `groups`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SharingExample {
    pub total: u32,
    pub groups: u32,
}

impl SharingExample {
    pub const fn new(total: u32, groups: u32) -> Self {
        Self { total, groups }
    }

    pub fn quotient(self) -> u32 {
        self.total / self.groups
    }

    pub fn remainder(self) -> u32 {
        self.total % self.groups
    }

    pub fn validate(self) -> TiceResult<()> {
        if !(1..=MAX_GROUPS).contains(&self.groups) {
            return Err(TiceError::validation(format!(
                "groups {} must be in 1..={MAX_GROUPS}",
                self.groups
            )));
        }
        if !(1..=MAX_TOTAL).contains(&self.total) {
            return Err(TiceError::validation(format!(
                "total {} must be in 1..={MAX_TOTAL}",
                self.total
            )));
        }
        Ok(())
    }

    /// `total ÷ groups = q`, with ` R r` when something is left over.
    pub fn expression(self) -> String {
        let base = format!("{} ÷ {} = {}", self.total, self.groups, self.quotient());
        match self.remainder() {
            0 => base,
            r => format!("{base} R {r}"),
        }
    }

    /// Round-robin dealing: token `i` goes to group `i % groups` as that group's
    /// `i / groups`-th token. Tokens of the incomplete last round are not dealt.
    pub fn deal(self) -> Vec<(u32, u32)> {
        let dealt = self.quotient() * self.groups;
        (0..dealt).map(|i| (i % self.groups, i / self.groups)).collect()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SharingPrompts {
    pub share: Bilingual,
    pub deal: Bilingual,
    pub check: Bilingual,
    pub leftover: Bilingual,
    pub write: Bilingual,
}

impl Default for SharingPrompts {
    fn default() -> Self {
        Self {
            share: Bilingual::new(
                "Share the objects fairly between the groups.",
                "نوزّع الأشياء بالتساوي على المجموعات.",
            ),
            deal: Bilingual::new(
                "One for each group, again and again…",
                "واحد لكل مجموعة، ثم مرة أخرى…",
            ),
            check: Bilingual::new(
                "Does every group have the same number?",
                "هل لكل مجموعة العدد نفسه؟",
            ),
            leftover: Bilingual::new(
                "Not enough for another round: the remainder.",
                "لا يكفي لجولة أخرى: هذا هو الباقي.",
            ),
            write: Bilingual::new(
                "We write it as a division.",
                "نكتبها على شكل قسمة.",
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SharingConfig {
    #[serde(flatten)]
    pub header: LessonConfig,
    pub examples: Vec<SharingExample>,
    pub assessment: SharingExample,
    /// Share per group announced in the check; must be the quotient.
    pub assessment_answer: u32,
    pub prompts: SharingPrompts,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            header: LessonConfig::new(Bilingual::new(
                "Division as fair sharing",
                "القسمة توزيع عادل",
            )),
            examples: vec![
                SharingExample::new(12, 3),
                SharingExample::new(15, 5),
                SharingExample::new(14, 4),
            ],
            assessment: SharingExample::new(16, 4),
            assessment_answer: 4,
            prompts: SharingPrompts::default(),
        }
    }
}

impl LessonContent for SharingConfig {
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
        self.assessment.validate()?;
        if self.assessment.quotient() != self.assessment_answer {
            return Err(TiceError::validation(format!(
                "assessment answer {} does not match {}",
                self.assessment_answer,
                self.assessment.expression()
            )));
        }
        Ok(())
    }
}

/// Objects of one sharing scene, for the steps that look back at it.
#[derive(Debug, Default)]
struct Dealt {
    containers: Vec<ObjectId>,
    remainder: Vec<ObjectId>,
    everything: Vec<ObjectId>,
}

#[derive(Debug)]
pub struct SharingLesson {
    config: SharingConfig,
    style: SharingStyle,
}

impl Lesson for SharingLesson {
    type Style = SharingStyle;
    type Config = SharingConfig;

    const ID: &'static str = "m3-l16-division-sharing";

    fn new(config: SharingConfig, style: SharingStyle) -> TiceResult<Self> {
        config.validate()?;
        style.validate()?;
        Ok(Self { config, style })
    }

    fn config(&self) -> &SharingConfig {
        &self.config
    }

    fn style(&self) -> &SharingStyle {
        &self.style
    }

    fn build_steps(&self) -> Vec<Step<Self>> {
        vec![
            Step::new("intro", Self::intro),
            Step::new("exploration_examples", Self::exploration),
            Step::new("collective_discussion_strategy", Self::discussion),
            Step::new("institutionalization_symbol", Self::institutionalization),
            Step::new("mini_assessment", Self::mini_assessment),
            Step::new("outro", Self::outro),
        ]
    }
}

impl SharingLesson {
    fn group_center(i: u32, groups: u32) -> Point {
        let x = (f64::from(i) - (f64::from(groups) - 1.0) / 2.0) * GROUP_SPACING;
        Point::new(x, GROUPS_Y)
    }

    /// Pool positions of all tokens, rows of `max_tokens_per_row` from the top-left.
    fn pool_points(&self, total: u32) -> Vec<Point> {
        let cols = self.style.max_tokens_per_row.min(total) as usize;
        let rows = total.div_ceil(self.style.max_tokens_per_row) as usize;
        let d = self.style.token_spacing;
        grid_points(rows, cols, Point::new(0.0, POOL_Y), d, d)
            .into_iter()
            .take(total as usize)
            .collect()
    }

    /// Where a group's tokens sit inside its container.
    fn slot_points(&self, center: Point, per_group: u32) -> Vec<Point> {
        let cols = (f64::from(per_group).sqrt().ceil() as u32).max(1);
        let rows = per_group.div_ceil(cols);
        let d = self.style.token_spacing;
        grid_points(rows as usize, cols as usize, center, d, d)
    }

    /// Set up pool and containers, then deal. With `fast` the dealing is one move per round.
    fn share(&self, stage: &mut Stage, ex: SharingExample, fast: bool) -> TiceResult<Dealt> {
        let s = &self.style.base;
        let p = &self.config.prompts;
        let mut out = Dealt::default();
        tracing::debug!(total = ex.total, groups = ex.groups, fast, "sharing");

        banner(stage, s, &p.share)?;
        let tokens: Vec<Visual> = self
            .pool_points(ex.total)
            .into_iter()
            .map(|c| {
                Visual::dot(c, self.style.token_radius)
                    .with_fill(s.palette.accent, 1.0)
                    .with_z(3)
            })
            .collect();
        let tokens = stage.stage_all(tokens);
        stage.play([Animation::fade_in(tokens.clone())], s.rt_norm)?;

        let r = self.style.container_radius;
        for g in 0..ex.groups {
            let c = Self::group_center(g, ex.groups);
            let ring = Visual::circle(c, r).with_stroke(s.palette.shape, s.stroke_width);
            let tag = math(s, format!("G{}", g + 1), 0.45, Point::new(c.x, c.y + r + 0.3));
            out.containers.push(stage.stage(ring));
            out.everything.push(stage.stage(tag));
        }
        out.everything.extend(out.containers.iter().copied());
        stage.play([Animation::create(out.everything.clone())], s.rt_norm)?;

        let pointer = if self.style.show_round_robin_pointer && !fast {
            let at = Self::group_center(0, ex.groups) + Vec2::new(0.0, r + 0.7);
            let tri = Visual::polygon(&[
                at + Vec2::new(-0.15, 0.15),
                at + Vec2::new(0.15, 0.15),
                at + Vec2::new(0.0, -0.1),
            ])
            .with_fill(s.palette.highlight, 1.0)
            .without_stroke()
            .with_z(6);
            let id = stage.stage(tri);
            stage.play([Animation::fade_in(id)], s.rt_fast)?;
            out.everything.push(id);
            Some(id)
        } else {
            None
        };

        banner(stage, s, &p.deal)?;
        let q = ex.quotient();
        let slots: Vec<Vec<Point>> = (0..ex.groups)
            .map(|g| self.slot_points(Self::group_center(g, ex.groups), q))
            .collect();
        let moves: Vec<Animation> = ex
            .deal()
            .into_iter()
            .zip(&tokens)
            .map(|((g, k), id)| Animation::move_along(*id, vec![slots[g as usize][k as usize]]))
            .collect();
        if fast {
            let round = ex.groups as usize;
            let mut moves = moves.into_iter().peekable();
            while moves.peek().is_some() {
                let batch: Vec<Animation> = moves.by_ref().take(round).collect();
                stage.play(batch, self.style.deal_run_time * 1.5)?;
            }
        } else {
            for (i, anim) in moves.into_iter().enumerate() {
                let g = i as u32 % ex.groups;
                let mut batch = vec![anim];
                if let Some(pointer) = pointer {
                    let above = Self::group_center(g, ex.groups) + Vec2::new(0.0, r + 0.65);
                    batch.push(Animation::move_along(pointer, vec![above]));
                }
                stage.play(batch, self.style.deal_run_time)?;
            }
        }
        let dealt = (q * ex.groups) as usize;
        out.remainder = tokens[dealt..].to_vec();
        out.everything.extend(tokens);

        if self.style.show_equality_check {
            banner(stage, s, &p.check)?;
            let counts: Vec<Visual> = (0..ex.groups)
                .map(|g| {
                    let c = Self::group_center(g, ex.groups);
                    math(s, q.to_string(), 0.6, Point::new(c.x, c.y - r - 0.35))
                        .with_color(s.palette.highlight)
                })
                .collect();
            let counts = stage.stage_all(counts);
            stage.play([Animation::write(counts.clone())], s.rt_fast)?;
            // Fair dealing leaves every group with the same count.
            let verdict = Bilingual::new("✓ equal", "✓ متساوية");
            let verdict = text_at(stage, s, &verdict, 0.55, Point::new(5.6, POOL_Y))
                .with_color(s.palette.positive);
            let verdict = stage.stage(verdict);
            stage.play([Animation::fade_in_shifted(verdict, Vec2::new(0.0, 0.1))], s.rt_fast)?;
            out.everything.extend(counts);
            out.everything.push(verdict);
        }

        if !out.remainder.is_empty() {
            banner(stage, s, &p.leftover)?;
            stage.play([Animation::indicate(out.remainder.clone())], s.rt_norm)?;
            let note = math(
                s,
                format!("R = {}", ex.remainder()),
                0.6,
                Point::new(-5.6, POOL_Y),
            )
            .with_color(s.palette.negative);
            let note = stage.stage(note);
            stage.play([Animation::write(note)], s.rt_fast)?;
            out.everything.push(note);
        }
        Ok(out)
    }

    fn intro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        subtitle(
            stage,
            &self.style.base,
            &Bilingual::new(
                "Sharing fairly: everyone gets the same.",
                "التوزيع العادل: يأخذ الجميع العدد نفسه.",
            ),
        )
    }

    fn exploration(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        for ex in &self.config.examples {
            let dealt = self.share(stage, *ex, false)?;
            if self.style.show_division_expression {
                banner(stage, s, &self.config.prompts.write)?;
                let expr = math(s, ex.expression(), 0.9, Point::new(0.0, BOTTOM_Y + 0.15))
                    .with_color(s.palette.positive);
                let expr = stage.stage(expr);
                stage.play([Animation::write(expr)], s.rt_norm)?;
            }
            stage.play([Animation::indicate(dealt.containers)], s.rt_fast)?;
            stage.wait(0.4)?;
            clear(stage, s)?;
        }
        Ok(())
    }

    fn discussion(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(
            stage,
            s,
            &Bilingual::new(
                "Discussion: how did we make it fair?",
                "نقاش: كيف جعلنا التوزيع عادلاً؟",
            ),
        )?;
        scaffold_card(
            stage,
            s,
            &[
                Bilingual::new(
                    "• Give one to each group, then start again.",
                    "• نعطي واحداً لكل مجموعة، ثم نعيد.",
                ),
                Bilingual::new(
                    "• Stop when there are not enough for every group.",
                    "• نتوقف عندما لا يكفي الباقي لكل المجموعات.",
                ),
                Bilingual::new(
                    "• Check: every group has the same number.",
                    "• نتحقق: لكل مجموعة العدد نفسه.",
                ),
            ],
        )
    }

    fn institutionalization(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        banner(
            stage,
            s,
            &Bilingual::new("Institutionalization: the ÷ sign", "التثبيت: علامة القسمة ÷"),
        )?;
        let general = math(s, "total ÷ groups = share per group", 0.8, Point::new(0.0, 1.2))
            .with_color(s.palette.highlight);
        let mut ids = vec![stage.stage(general)];
        stage.play([Animation::write(ids[0])], s.rt_norm)?;

        let lines: Vec<Visual> = self
            .config
            .examples
            .iter()
            .enumerate()
            .map(|(i, ex)| math(s, ex.expression(), 0.75, Point::new(0.0, 0.2 - 0.75 * i as f64)))
            .collect();
        let lines = stage.stage_all(lines);
        for id in &lines {
            stage.play([Animation::write(*id)], s.rt_fast)?;
        }
        ids.extend(lines);

        let note = bottom_note(
            stage,
            s,
            &Bilingual::new(
                "R is the remainder: what cannot be shared fairly.",
                "R هو الباقي: ما لا يمكن توزيعه بالتساوي.",
            ),
        )?;
        ids.push(note);
        stage.wait(0.6)?;
        stage.play([Animation::fade_out(ids)], s.rt_fast)
    }

    fn mini_assessment(&mut self, stage: &mut Stage) -> TiceResult<()> {
        let s = &self.style.base;
        let ex = self.config.assessment;
        let question = format!("{} ÷ {} = ?", ex.total, ex.groups);
        banner(
            stage,
            s,
            &Bilingual::new(format!("Mini-check: {question}"), format!("تحقق صغير: {question}")),
        )?;
        let dealt = self.share(stage, ex, true)?;
        let answer = Bilingual::new(
            format!("Each group gets {}.", self.config.assessment_answer),
            format!("تأخذ كل مجموعة {}.", self.config.assessment_answer),
        );
        let answer = text_at(stage, s, &answer, 0.6, Point::new(0.0, BOTTOM_Y + 0.15))
            .with_color(s.palette.positive);
        let answer = stage.stage(answer);
        stage.play([Animation::write(answer)], s.rt_norm)?;
        stage.wait(0.5)?;
        let mut ids = dealt.everything;
        ids.push(answer);
        stage.play([Animation::fade_out(ids)], s.rt_fast)
    }

    fn outro(&mut self, stage: &mut Stage) -> TiceResult<()> {
        recap(
            stage,
            &self.style.base,
            &[
                Bilingual::new("• Share one at a time, in turns", "• نوزّع واحداً واحداً بالتناوب"),
                Bilingual::new("• Every group gets the same number", "• تأخذ كل مجموعة العدد نفسه"),
                Bilingual::new(
                    "• total ÷ groups = share (R = leftover)",
                    "• المجموع ÷ المجموعات = النصيب (R = الباقي)",
                ),
            ],
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/sharing.rs"]
mod tests;
