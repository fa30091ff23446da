use std::{
    io::Write as _,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::{Canvas, Rgba8},
        error::{TiceError, TiceResult},
    },
    render::raster::FrameRGBA,
};

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub canvas: Canvas,
    pub fps: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
    /// x264 constant rate factor; lower is better quality.
    pub crf: u8,
    /// Color under transparent pixels.
    pub background: Rgba8,
}

impl EncodeConfig {
    pub fn new(out_path: impl Into<PathBuf>, canvas: Canvas, fps: u32) -> Self {
        Self {
            canvas,
            fps,
            out_path: out_path.into(),
            overwrite: true,
            crf: 18,
            background: Rgba8::BLACK,
        }
    }

    pub fn validate(&self) -> TiceResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(TiceError::validation("encode width/height must be non-zero"));
        }
        if self.fps == 0 {
            return Err(TiceError::validation("encode fps must be non-zero"));
        }
        if !self.canvas.width.is_multiple_of(2) || !self.canvas.height.is_multiple_of(2) {
            return Err(TiceError::validation(format!(
                "encode size {}x{} must be even for yuv420p output",
                self.canvas.width, self.canvas.height
            )));
        }
        if self.crf > 51 {
            return Err(TiceError::validation("encode crf must be in 0..=51"));
        }
        Ok(())
    }

    fn ffmpeg_args(&self) -> Vec<String> {
        let mut args: Vec<String> = vec![if self.overwrite { "-y" } else { "-n" }.to_owned()];
        args.extend(
            [
                "-loglevel",
                "error",
                "-f",
                "rawvideo",
                "-pix_fmt",
                "rgba",
                "-s",
                &format!("{}x{}", self.canvas.width, self.canvas.height),
                "-r",
                &self.fps.to_string(),
                "-i",
                "pipe:0",
                "-an",
                "-c:v",
                "libx264",
                "-crf",
                &self.crf.to_string(),
                "-pix_fmt",
                "yuv420p",
                "-movflags",
                "+faststart",
            ]
            .map(str::to_owned),
        );
        args.push(self.out_path.to_string_lossy().into_owned());
        args
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

pub fn ensure_parent_dir(path: &Path) -> TiceResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streams opaque RGBA frames into a system `ffmpeg` process writing H.264 MP4.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    child: Child,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
    frames: u64,
}

impl FfmpegEncoder {
    pub fn new(cfg: EncodeConfig) -> TiceResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(TiceError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(TiceError::encode(
                "ffmpeg is required for MP4 output, but was not found on PATH",
            ));
        }

        let mut child = Command::new("ffmpeg")
            .args(cfg.ffmpeg_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TiceError::encode(format!("failed to spawn ffmpeg: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| TiceError::encode("failed to open ffmpeg stdin"))?;

        tracing::info!(out = %cfg.out_path.display(), fps = cfg.fps, "ffmpeg started");
        Ok(Self {
            scratch: vec![0u8; cfg.canvas.width as usize * cfg.canvas.height as usize * 4],
            cfg,
            child,
            stdin: Some(stdin),
            frames: 0,
        })
    }

    pub fn encode_frame(&mut self, frame: &FrameRGBA) -> TiceResult<()> {
        if frame.width != self.cfg.canvas.width || frame.height != self.cfg.canvas.height {
            return Err(TiceError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.canvas.width, self.cfg.canvas.height
            )));
        }
        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.cfg.background,
        )?;

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| TiceError::encode("ffmpeg encoder is already finished"))?;
        stdin
            .write_all(&self.scratch)
            .map_err(|e| TiceError::encode(format!("failed to write frame to ffmpeg: {e}")))?;
        self.frames += 1;
        Ok(())
    }

    /// Close the pipe and wait for ffmpeg; its stderr becomes the error on failure.
    pub fn finish(mut self) -> TiceResult<u64> {
        drop(self.stdin.take());
        let output = self
            .child
            .wait_with_output()
            .map_err(|e| TiceError::encode(format!("failed to wait for ffmpeg: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TiceError::encode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        tracing::info!(frames = self.frames, "ffmpeg finished");
        Ok(self.frames)
    }
}

/// Composite `src` over an opaque `background` into `dst`.
pub(crate) fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    background: Rgba8,
) -> TiceResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(TiceError::validation(
            "flatten expects equal-length rgba8 buffers",
        ));
    }
    let bg = [background.r, background.g, background.b].map(u16::from);

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - a;
        for c in 0..3 {
            let fg = if src_is_premul {
                u16::from(s[c])
            } else {
                mul_div255(u16::from(s[c]), a)
            };
            d[c] = (fg + mul_div255(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
