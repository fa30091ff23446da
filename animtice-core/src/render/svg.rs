use std::fmt::Write as _;

use kurbo::{BezPath, ParamCurve, ParamCurveArclen, PathEl, PathSeg};

use crate::{
    eval::evaluator::{EvaluatedFrame, EvaluatedNode},
    foundation::core::{Canvas, Rgba8, Viewport},
    scene::visual::{STROKE_POINTS_PER_UNIT, Shape, TextAnchor, TextRun},
};

const ARCLEN_ACCURACY: f64 = 1e-3;

/// Baseline sits this far below the text's vertical middle, in ems.
const BASELINE_DROP_EM: f64 = 0.35;

const FONT_FAMILY: &str = "DejaVu Sans, Noto Sans, Noto Sans Arabic, Arial, sans-serif";

/// Serialize an evaluated frame as a standalone SVG document in canvas pixels.
pub fn frame_to_svg(frame: &EvaluatedFrame, canvas: Canvas, background: Rgba8) -> String {
    let viewport = Viewport::new(canvas);
    let mut out = String::with_capacity(256 + frame.nodes.len() * 160);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height
    );
    let _ = write!(
        out,
        r#"<rect width="100%" height="100%" fill="{}" fill-opacity="{}"/>"#,
        background.to_svg_hex(),
        fmt_num(background.alpha())
    );
    for node in &frame.nodes {
        write_node(&mut out, node, viewport);
    }
    out.push_str("</svg>");
    out
}

fn write_node(out: &mut String, node: &EvaluatedNode, viewport: Viewport) {
    match &node.visual.shape {
        Shape::Path(path) => write_path(out, node, path, viewport),
        Shape::Text(run) => write_text(out, node, run, viewport),
    }
}

fn write_path(out: &mut String, node: &EvaluatedNode, path: &BezPath, viewport: Viewport) {
    let drawn = partial_path(path, node.draw);
    if drawn.elements().is_empty() {
        return;
    }
    let mut px = drawn;
    px.apply_affine(viewport.to_pixels());

    let _ = write!(out, r#"<path d="{}""#, px.to_svg());
    match node.visual.fill {
        Some(fill) => {
            let _ = write!(
                out,
                r#" fill="{}" fill-opacity="{}""#,
                fill.color.to_svg_hex(),
                fmt_num(fill.opacity * fill.color.alpha() * node.draw)
            );
        }
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = node.visual.stroke {
        let width = stroke.width / STROKE_POINTS_PER_UNIT * viewport.pixels_per_unit();
        let _ = write!(
            out,
            r#" stroke="{}" stroke-opacity="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round""#,
            stroke.color.to_svg_hex(),
            fmt_num(stroke.color.alpha()),
            fmt_num(width)
        );
    }
    if node.opacity < 1.0 {
        let _ = write!(out, r#" opacity="{}""#, fmt_num(node.opacity));
    }
    out.push_str("/>");
}

fn write_text(out: &mut String, node: &EvaluatedNode, run: &TextRun, viewport: Viewport) {
    let shown = revealed(&run.content, node.reveal);
    if shown.trim().is_empty() {
        return;
    }
    let ppu = viewport.pixels_per_unit();
    let font_px = run.size_units() * ppu;
    let at = viewport.to_pixels() * run.at;
    let anchor = match run.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let color = node.visual.fill.map_or(Rgba8::WHITE, |f| f.color);
    let fill_opacity = node
        .visual
        .fill
        .map_or(1.0, |f| f.opacity * f.color.alpha());

    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-family="{FONT_FAMILY}" font-size="{}" text-anchor="{anchor}" fill="{}" fill-opacity="{}""#,
        fmt_num(at.x),
        fmt_num(at.y + BASELINE_DROP_EM * font_px),
        fmt_num(font_px),
        color.to_svg_hex(),
        fmt_num(fill_opacity)
    );
    if run.bold {
        out.push_str(r#" font-weight="bold""#);
    }
    if is_rtl(shown) {
        out.push_str(r#" direction="rtl""#);
    }
    if node.opacity < 1.0 {
        let _ = write!(out, r#" opacity="{}""#, fmt_num(node.opacity));
    }
    out.push('>');
    escape_into(out, shown);
    out.push_str("</text>");
}

/// Leading characters of `s` covering `fraction` of it.
pub(crate) fn revealed(s: &str, fraction: f64) -> &str {
    if fraction >= 1.0 {
        return s;
    }
    let n = s.chars().count();
    let keep = (n as f64 * fraction.max(0.0)).round() as usize;
    match s.char_indices().nth(keep) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

/// The first `fraction` of every subpath, by arc length. Subpaths are drawn simultaneously.
pub fn partial_path(path: &BezPath, fraction: f64) -> BezPath {
    if fraction >= 1.0 {
        return path.clone();
    }
    let mut out = BezPath::new();
    if fraction <= 0.0 {
        return out;
    }
    for sub in subpaths(path) {
        let segs: Vec<PathSeg> = sub.segments().collect();
        let total: f64 = segs.iter().map(|s| s.arclen(ARCLEN_ACCURACY)).sum();
        let mut budget = total * fraction;
        let mut started = false;
        for seg in segs {
            if budget <= 0.0 {
                break;
            }
            let len = seg.arclen(ARCLEN_ACCURACY);
            let piece = if len <= budget {
                seg
            } else {
                seg.subsegment(0.0..seg.inv_arclen(budget, ARCLEN_ACCURACY))
            };
            budget -= len;
            if !started {
                out.move_to(piece.start());
                started = true;
            }
            out.push(piece.as_path_el());
        }
    }
    out
}

fn subpaths(path: &BezPath) -> Vec<BezPath> {
    let mut subs: Vec<BezPath> = Vec::new();
    for el in path.elements() {
        if matches!(el, PathEl::MoveTo(_)) || subs.is_empty() {
            subs.push(BezPath::new());
        }
        if let Some(cur) = subs.last_mut() {
            cur.push(*el);
        }
    }
    subs
}

fn is_rtl(s: &str) -> bool {
    s.chars()
        .any(|c| matches!(c, '\u{0590}'..='\u{08FF}' | '\u{FB1D}'..='\u{FEFC}'))
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
}

fn fmt_num(v: f64) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 {
        "0".to_owned()
    } else {
        format!("{r}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
