//! Presentation pieces every lesson reuses: subtitles, bullet panels, recaps, answer boxes.

use animtice::{
    Animation, BANNER_POINT, Bilingual, ObjectId, POINTS_PER_UNIT, Point, Rect, Stage, StyleConfig,
    TextAnchor, TiceResult, Vec2, Visual, caption,
};

/// Row for notes along the bottom edge.
pub(crate) const BOTTOM_Y: f64 = -3.3;

/// Right edge that recaps and side panels stay inside of.
const RIGHT_EDGE_X: f64 = 6.8;

/// Lesson text centered on `at`.
pub(crate) fn text_at(
    stage: &Stage,
    style: &StyleConfig,
    text: &Bilingual,
    scale: f64,
    at: Point,
) -> Visual {
    caption(stage, style, text, scale).moved_to(at)
}

/// Untranslated text (numbers, expressions, symbols) centered on `at`.
pub(crate) fn math(style: &StyleConfig, content: impl Into<String>, scale: f64, at: Point) -> Visual {
    Visual::text(content, at, style.font_size_main * scale).with_color(style.palette.text)
}

/// `n/d` as plain text.
pub(crate) fn fraction_text(numerator: u32, denominator: u32) -> String {
    format!("{numerator}/{denominator}")
}

/// A soft rounded panel, the backdrop of scaffolds and rule boxes.
pub(crate) fn panel(style: &StyleConfig, rect: Rect) -> Visual {
    Visual::rounded_rect(rect, 0.25)
        .with_stroke(style.palette.text, 3.0)
        .with_fill(style.palette.text, 0.06)
        .with_z(-1)
}

/// Highlight box `buff` units around `rect`.
pub(crate) fn surround(style: &StyleConfig, rect: Rect, buff: f64) -> Visual {
    Visual::rounded_rect(rect.inflate(buff, buff), 0.08)
        .with_stroke(style.palette.highlight, style.stroke_width)
        .with_z(5)
}

/// Left-aligned lines stacked downward; the first line is centered vertically on `top_left.y`.
pub(crate) fn bullet_lines(
    stage: &Stage,
    style: &StyleConfig,
    lines: &[Bilingual],
    scale: f64,
    top_left: Point,
) -> Vec<Visual> {
    let size = style.font_size_main * scale;
    let step = size / POINTS_PER_UNIT + 0.18;
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let at = Point::new(top_left.x, top_left.y - step * i as f64);
            Visual::text(stage.text(line), at, size)
                .anchored(TextAnchor::Start)
                .with_color(style.palette.text)
        })
        .collect()
}

/// Flash `text` under the banner, then take it away.
pub(crate) fn subtitle(stage: &mut Stage, style: &StyleConfig, text: &Bilingual) -> TiceResult<()> {
    let v = text_at(stage, style, text, 0.52, BANNER_POINT - Vec2::new(0.0, 0.7));
    let id = stage.stage(v);
    stage.play(
        [Animation::fade_in_shifted(id, Vec2::new(0.0, -0.15))],
        style.rt_norm,
    )?;
    stage.wait(0.2)?;
    stage.play(
        [Animation::fade_out_shifted(id, Vec2::new(0.0, 0.1))],
        style.rt_fast,
    )
}

/// Show a note on the bottom row and return its id.
pub(crate) fn bottom_note(
    stage: &mut Stage,
    style: &StyleConfig,
    text: &Bilingual,
) -> TiceResult<ObjectId> {
    let v = text_at(stage, style, text, 0.52, Point::new(0.0, BOTTOM_Y));
    let id = stage.stage(v);
    stage.play(
        [Animation::fade_in_shifted(id, Vec2::new(0.0, 0.1))],
        style.rt_fast,
    )?;
    Ok(id)
}

/// Discussion card: a wide panel near the bottom with bullet lines, held, then removed.
pub(crate) fn scaffold_card(
    stage: &mut Stage,
    style: &StyleConfig,
    lines: &[Bilingual],
) -> TiceResult<()> {
    let card = Rect::from_center_size((0.0, -1.9), (11.5, 2.7));
    let backdrop = stage.stage(panel(style, card));
    let texts = bullet_lines(
        stage,
        style,
        lines,
        0.52,
        Point::new(card.x0 + 0.6, card.y1 - 0.6),
    );
    let mut ids = stage.stage_all(texts);
    stage.play(
        [
            Animation::create(backdrop),
            Animation::fade_in_shifted(ids.clone(), Vec2::new(0.0, 0.1)),
        ],
        style.rt_norm,
    )?;
    stage.wait(0.5)?;
    ids.push(backdrop);
    stage.play([Animation::fade_out(ids)], style.rt_fast)
}

/// Closing recap: a heading and bullets slid in on the right side, held, slid out.
pub(crate) fn recap(stage: &mut Stage, style: &StyleConfig, lines: &[Bilingual]) -> TiceResult<()> {
    let heading = Bilingual::new("Recap:", "الخلاصة:");
    let mut visuals = bullet_lines(stage, style, std::slice::from_ref(&heading), 0.6, Point::ZERO);
    visuals.extend(bullet_lines(stage, style, lines, 0.5, Point::new(0.0, -0.55)));

    let widest = visuals
        .iter()
        .map(|v| v.bounds().width())
        .fold(0.0_f64, f64::max);
    let x0 = (RIGHT_EDGE_X - widest).max(-RIGHT_EDGE_X);
    let shift = Vec2::new(x0, 1.0);
    let ids = stage.stage_all(visuals.into_iter().map(|v| v.translated(shift)));

    stage.play(
        [Animation::fade_in_shifted(ids.clone(), Vec2::new(-0.2, 0.0))],
        style.rt_norm,
    )?;
    stage.wait(0.6)?;
    stage.play(
        [Animation::fade_out_shifted(ids, Vec2::new(0.2, 0.0))],
        style.rt_fast,
    )
}

/// Box the correct option and say so underneath.
pub(crate) fn mark_correct(
    stage: &mut Stage,
    style: &StyleConfig,
    option: Rect,
) -> TiceResult<Vec<ObjectId>> {
    let boxed = stage.stage(surround(style, option, 0.12));
    let ok = Bilingual::new("Correct!", "صحيح!");
    let below = Point::new(option.center().x, option.y0 - 0.45);
    let label = text_at(stage, style, &ok, 0.55, below).with_color(style.palette.positive);
    let label = stage.stage(label);
    stage.play(
        [
            Animation::create(boxed),
            Animation::fade_in_shifted(label, Vec2::new(0.0, 0.1)),
        ],
        style.rt_norm,
    )?;
    Ok(vec![boxed, label])
}

/// Answer cards in a row centered on `y`, faded in one at a time. Returns the ids of every card
/// piece and each card's rectangle, in option order.
pub(crate) fn option_row(
    stage: &mut Stage,
    style: &StyleConfig,
    labels: &[String],
    y: f64,
) -> TiceResult<(Vec<ObjectId>, Vec<Rect>)> {
    let n = labels.len() as f64;
    let mut ids = Vec::new();
    let mut cards = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        let center = Point::new((i as f64 - (n - 1.0) / 2.0) * 2.2, y);
        let card = Rect::from_center_size(center, (1.6, 1.0));
        let frame = Visual::rounded_rect(card, 0.12).with_stroke(style.palette.muted, 3.0);
        let pair = stage.stage_all([frame, math(style, label.clone(), 0.8, center)]);
        stage.play(
            [Animation::fade_in_shifted(pair.clone(), Vec2::new(0.0, 0.1))],
            style.rt_fast,
        )?;
        ids.extend(pair);
        cards.push(card);
    }
    Ok((ids, cards))
}
