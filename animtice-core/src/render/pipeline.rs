use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    encode::ffmpeg::{EncodeConfig, FfmpegEncoder, ensure_parent_dir},
    eval::evaluator::Evaluator,
    foundation::{
        core::{FrameIndex, FrameRange},
        error::{TiceError, TiceResult},
    },
    render::{
        raster::{FrameRGBA, Rasterizer},
        svg::frame_to_svg,
    },
    stage::timeline::Timeline,
};

/// Evaluate one frame and serialize it as SVG.
pub fn render_frame_svg(timeline: &Timeline, frame: FrameIndex) -> TiceResult<String> {
    let eval = Evaluator::eval_frame(timeline, frame)?;
    Ok(frame_to_svg(&eval, timeline.canvas, timeline.background))
}

/// Evaluate and rasterize one frame.
///
/// Returns **premultiplied** RGBA8 pixels.
pub fn render_frame(
    timeline: &Timeline,
    frame: FrameIndex,
    raster: &Rasterizer,
) -> TiceResult<FrameRGBA> {
    let svg = render_frame_svg(timeline, frame)?;
    raster.rasterize(&svg, timeline.canvas)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    /// Frames that went through the rasterizer.
    pub frames_rendered: u64,
    /// Frames identical to their predecessor, whose pixels were reused.
    pub frames_reused: u64,
}

/// Frame source that skips rasterizing runs of identical frames (pauses, waits).
struct FrameStream<'a> {
    timeline: &'a Timeline,
    raster: &'a Rasterizer,
    last: Option<(String, FrameRGBA)>,
    stats: RenderStats,
}

impl<'a> FrameStream<'a> {
    fn new(timeline: &'a Timeline, raster: &'a Rasterizer) -> Self {
        Self {
            timeline,
            raster,
            last: None,
            stats: RenderStats::default(),
        }
    }

    fn next(&mut self, frame: FrameIndex) -> TiceResult<&FrameRGBA> {
        let svg = render_frame_svg(self.timeline, frame)?;
        self.stats.frames_total += 1;
        let reuse = self.last.as_ref().is_some_and(|(prev, _)| *prev == svg);
        if reuse {
            self.stats.frames_reused += 1;
        } else {
            let pixels = self.raster.rasterize(&svg, self.timeline.canvas)?;
            self.stats.frames_rendered += 1;
            self.last = Some((svg, pixels));
        }
        self.last
            .as_ref()
            .map(|(_, px)| px)
            .ok_or_else(|| TiceError::render("no frame rendered"))
    }
}

fn checked_range(timeline: &Timeline, range: Option<FrameRange>) -> TiceResult<FrameRange> {
    let range = range.unwrap_or(FrameRange {
        start: FrameIndex(0),
        end: timeline.duration,
    });
    if range.is_empty() || range.start.0 > range.end.0 {
        return Err(TiceError::validation("render range must be non-empty"));
    }
    if range.end.0 > timeline.duration.0 {
        return Err(TiceError::validation(format!(
            "render range ends at {} but the timeline has {} frames",
            range.end.0, timeline.duration.0
        )));
    }
    Ok(range)
}

pub fn save_png(frame: &FrameRGBA, path: &Path) -> TiceResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Write `frame_00000.png`, `frame_00001.png`, ... into `dir` for every frame in `range`
/// (the whole timeline when `None`).
#[tracing::instrument(skip(timeline, raster))]
pub fn render_frames_png(
    timeline: &Timeline,
    range: Option<FrameRange>,
    dir: &Path,
    raster: &Rasterizer,
) -> TiceResult<RenderStats> {
    let range = checked_range(timeline, range)?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create frame directory '{}'", dir.display()))?;

    let mut stream = FrameStream::new(timeline, raster);
    for f in range.start.0..range.end.0 {
        let pixels = stream.next(FrameIndex(f))?;
        save_png(pixels, &dir.join(format!("frame_{f:05}.png")))?;
    }
    tracing::info!(?stream.stats, "frames written");
    Ok(stream.stats)
}

/// Options for [`render_to_mp4`].
#[derive(Clone, Debug)]
pub struct RenderToMp4Opts {
    /// Frames to encode (start inclusive, end exclusive); the whole timeline when `None`.
    pub range: Option<FrameRange>,
    /// Whether to overwrite the output if it already exists.
    pub overwrite: bool,
    /// x264 constant rate factor.
    pub crf: u8,
}

impl Default for RenderToMp4Opts {
    fn default() -> Self {
        Self {
            range: None,
            overwrite: true,
            crf: 18,
        }
    }
}

/// Render a timeline to MP4 through the system `ffmpeg` binary.
///
/// Fractional frame rates are rounded to whole frames per second for the encoder.
#[tracing::instrument(skip(timeline, out_path, raster))]
pub fn render_to_mp4(
    timeline: &Timeline,
    out_path: impl Into<PathBuf>,
    opts: RenderToMp4Opts,
    raster: &Rasterizer,
) -> TiceResult<RenderStats> {
    timeline.validate()?;
    let range = checked_range(timeline, opts.range)?;

    let mut cfg = EncodeConfig::new(out_path, timeline.canvas, timeline.fps.whole_fps());
    cfg.overwrite = opts.overwrite;
    cfg.crf = opts.crf;
    cfg.background = timeline.background;

    let mut enc = FfmpegEncoder::new(cfg)?;
    let mut stream = FrameStream::new(timeline, raster);
    for f in range.start.0..range.end.0 {
        let pixels = stream.next(FrameIndex(f))?;
        enc.encode_frame(pixels)?;
        if f % 300 == 0 {
            tracing::debug!(frame = f, of = range.end.0, "encoding");
        }
    }
    enc.finish()?;
    tracing::info!(?stream.stats, "mp4 written");
    Ok(stream.stats)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
