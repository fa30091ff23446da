//! # animtice guide
//!
//! A walkthrough of how a lesson becomes a video, and of the pieces a new lesson is built from.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Visual`](crate::Visual): a path (stroke and fill) or a single line of text, in scene units
//! - [`Stage`](crate::Stage): the mutable context steps write to; owns objects and the playhead
//! - [`Animation`](crate::Animation): `Create`, `Write`, `FadeIn`, `FadeOut`, `Transform`,
//!   `MoveAlong`, `Shift`, `Indicate` over one or more [`ObjectId`](crate::ObjectId)s
//! - [`Timeline`](crate::Timeline): what the stage recorded; plain data, serializable to JSON
//! - [`Evaluator`](crate::Evaluator): resolves what is visible at a frame and in what order
//! - [`FrameRGBA`](crate::FrameRGBA): output pixels (RGBA8, premultiplied alpha)
//!
//! ---
//!
//! ## Scene units
//!
//! The frame is 8 units tall with the origin at its center and y pointing up; its width follows
//! the canvas aspect ratio (about 14.2 units at 16:9). Text sizes are in points
//! ([`POINTS_PER_UNIT`](crate::POINTS_PER_UNIT) points per unit) and stroke widths are in points
//! too ([`STROKE_POINTS_PER_UNIT`](crate::STROKE_POINTS_PER_UNIT) per unit), so a lesson looks the
//! same at every output resolution.
//!
//! ---
//!
//! ## Recording
//!
//! [`Stage::play`](crate::Stage::play) starts every animation it is given at the playhead, lasting
//! `round(run_time * fps)` frames (at least one), then moves the playhead past them.
//! [`Stage::wait`](crate::Stage::wait) only moves the playhead. Objects registered with
//! [`Stage::stage`](crate::Stage::stage) stay hidden until their first animation; objects
//! registered with [`Stage::add`](crate::Stage::add) are visible immediately. `FadeOut` and
//! [`Stage::remove`](crate::Stage::remove) end an object's life; animating it again is an error.
//!
//! ```
//! use animtice::{Animation, Locale, Point, Stage, StageSettings, Visual};
//!
//! let mut stage = Stage::new(StageSettings::default(), Locale::En).unwrap();
//! let dot = stage.stage(Visual::dot(Point::ZERO, 0.1));
//! stage.play([Animation::fade_in(dot)], 1.0).unwrap();
//! stage.play([Animation::move_along(dot, vec![Point::new(2.0, 0.0)])], 0.5).unwrap();
//! stage.wait(0.5).unwrap();
//!
//! let timeline = stage.finish().unwrap();
//! assert_eq!(timeline.duration.0, 60); // 2 s at 30 fps
//! ```
//!
//! ---
//!
//! ## Writing a lesson
//!
//! A lesson implements [`Lesson`](crate::Lesson): a style record, a content record, and
//! `build_steps`. [`construct`](crate::construct) builds the step list first, writes the title,
//! runs each step followed by the style's `pause`, and fades the title out at the end. Each step
//! is bracketed by a [`StepMarker`](crate::StepMarker) so a single step can be rendered on its own.
//!
//! ```
//! use animtice::{
//!     Animation, Lesson, LessonConfig, LessonInputs, Stage, Step, StyleConfig, TiceResult,
//!     Visual, build_timeline, polygon_edges, Point,
//! };
//!
//! struct Triangle {
//!     config: LessonConfig,
//!     style: StyleConfig,
//! }
//!
//! impl Triangle {
//!     fn draw(&mut self, stage: &mut Stage) -> TiceResult<()> {
//!         let pts = [Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(0.0, 1.5)];
//!         let sides = stage.stage_all(polygon_edges(&pts).into_iter().map(|e| Visual::line(e.p0, e.p1)));
//!         stage.play([Animation::create(sides)], self.style.rt_norm)
//!     }
//! }
//!
//! impl Lesson for Triangle {
//!     type Style = StyleConfig;
//!     type Config = LessonConfig;
//!     const ID: &'static str = "demo-triangle";
//!
//!     fn new(config: LessonConfig, style: StyleConfig) -> TiceResult<Self> {
//!         Ok(Self { config, style })
//!     }
//!     fn config(&self) -> &LessonConfig {
//!         &self.config
//!     }
//!     fn style(&self) -> &StyleConfig {
//!         &self.style
//!     }
//!     fn build_steps(&self) -> Vec<Step<Self>> {
//!         vec![Step::new("draw", Self::draw)]
//!     }
//! }
//!
//! let timeline = build_timeline::<Triangle>(&LessonInputs::default()).unwrap();
//! assert_eq!(timeline.markers[0].name, "draw");
//! ```
//!
//! ---
//!
//! ## Configuration
//!
//! Style and content records have defaults for every field. Callers override any subset with a
//! partial JSON object ([`LessonInputs`](crate::LessonInputs)); nested objects merge key by key,
//! arrays are replaced. Content invariants (positive partition counts, numbers within 0..=999,
//! answers that match the model) are checked before anything is recorded.
//!
//! ---
//!
//! ## Rendering
//!
//! - [`render_frame_svg`](crate::render_frame_svg): one frame as an SVG document
//! - [`render_frame`](crate::render_frame): one frame as pixels
//! - [`render_frames_png`](crate::render_frames_png): a PNG sequence
//! - [`render_to_mp4`](crate::render_to_mp4): H.264 MP4 through the system `ffmpeg`
//!
//! Runs of identical frames (waits, pauses) are rasterized once and reused; the returned
//! [`RenderStats`](crate::RenderStats) report how many.
