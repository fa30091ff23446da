//! animtice builds and renders the animated lessons of a grade-3 math curriculum.
//!
//! A lesson is an ordered list of named steps. Each step draws on a [`Stage`]: it registers
//! visual objects (shapes, lines, text) and plays animations on them. The stage records
//! everything on a frame-based [`Timeline`], which is then rendered to pixels and encoded.
//!
//! # Pipeline overview
//!
//! 1. **Construct**: [`construct`] runs a [`Lesson`]'s steps against a [`Stage`].
//! 2. **Evaluate**: `Timeline + FrameIndex -> EvaluatedFrame` (what is visible, in what order).
//! 3. **Render**: `EvaluatedFrame -> SVG -> FrameRGBA` via `usvg`/`resvg`.
//! 4. **Encode** (optional): stream frames to the system `ffmpeg` binary for MP4 output.
//!
//! Scene coordinates are in units: the frame is 8 units tall, the origin is at its center,
//! and y points up. Pure geometry helpers ([`polygon_edges`], [`line_intersection`],
//! [`bar_dividers`], [`right_angle_marker`], ...) work in the same units.
//!
//! For a walkthrough of writing a lesson, see [`crate::guide`].
#![forbid(unsafe_code)]

mod animation;
mod encode;
mod eval;
mod foundation;
mod geometry;
mod lesson;
mod render;
mod scene;
mod stage;

/// How lessons are written, recorded and rendered.
pub mod guide;

pub use animation::action::{Animation, AnimationKind, Targets};
pub use animation::ease::Ease;
pub use animation::keyframes::{Keyframe, Keyframes, Lerp};
pub use encode::ffmpeg::{EncodeConfig, FfmpegEncoder, ensure_parent_dir, is_ffmpeg_on_path};
pub use eval::evaluator::{EvaluatedFrame, EvaluatedNode, Evaluator};
pub use foundation::core::{
    Affine, BezPath, Canvas, FRAME_HEIGHT_UNITS, Fps, FrameIndex, FrameRange, Line, Point, Rect,
    Rgba8, Vec2, Viewport,
};
pub use foundation::error::{TiceError, TiceResult};
pub use foundation::math::{format_quantity, perp, unit};
pub use geometry::bar_model::{Span, bracket_under, difference_span, quantity_bars, segment_layout};
pub use geometry::lines::{
    are_parallel, are_perpendicular, extend_line, line_intersection, long_line_through,
    right_angle_marker, segment_intersection,
};
pub use geometry::partition::{
    Orientation, bar_dividers, circle_sectors, circle_spokes, part_boxes, refinement_dividers,
    sector_path,
};
pub use geometry::polygon::{
    centroid, edge_label_anchor, edge_length, polygon_edges, polygon_perimeter, recentered,
    rect_vertices, regular_polygon,
};
pub use lesson::config::{
    LessonConfig, LessonContent, LessonStyle, MAX_STYLE_SECS, Palette, StyleConfig, merge_json,
    with_overrides,
};
pub use lesson::locale::{Bilingual, Locale};
pub use lesson::orchestrator::{
    Lesson, LessonInputs, Step, StepFn, banner, build_timeline, caption, clear, construct,
};
pub use render::pipeline::{
    RenderStats, RenderToMp4Opts, render_frame, render_frame_svg, render_frames_png,
    render_to_mp4, save_png,
};
pub use render::raster::{FrameRGBA, Rasterizer};
pub use render::svg::{frame_to_svg, partial_path};
pub use scene::layout::{
    BANNER_POINT, DEFAULT_BUFF, Direction, arrange_column, arrange_row, grid_points, next_to,
    union_bounds,
};
pub use scene::visual::{
    Fill, ObjectId, POINTS_PER_UNIT, STROKE_POINTS_PER_UNIT, Shape, Stroke, TextAnchor, TextRun,
    Visual,
};
pub use stage::builder::Stage;
pub use stage::settings::{Quality, StageSettings};
pub use stage::timeline::{ObjectTrack, ShapeKey, StepMarker, Timeline};
