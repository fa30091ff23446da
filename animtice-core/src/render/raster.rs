use std::{path::Path, sync::Arc};

use crate::foundation::{
    core::Canvas,
    error::{TiceError, TiceResult},
};

#[derive(Clone, Debug)]
/// RGBA8 pixels of one rendered frame, row-major, top row first.
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    /// Whether color channels are premultiplied by alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixels, as image files expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let p = self.data.get(i..i + 4)?;
        Some([p[0], p[1], p[2], p[3]])
    }
}

/// Turns SVG frame documents into pixels with `usvg` + `resvg`.
///
/// The font database is loaded once and shared by every frame.
pub struct Rasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Rasterizer {
    /// System fonts, plus every `.ttf`/`.otf`/`.ttc` file directly inside `fonts_dir`.
    pub fn new(fonts_dir: Option<&Path>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = fonts_dir {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.len(), "font database loaded");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// No fonts at all: text is skipped. Shapes-only rendering and tests.
    pub fn without_fonts() -> Self {
        Self {
            fontdb: Arc::new(usvg::fontdb::Database::new()),
        }
    }

    pub fn font_count(&self) -> usize {
        self.fontdb.len()
    }

    pub fn rasterize(&self, svg: &str, canvas: Canvas) -> TiceResult<FrameRGBA> {
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts)
            .map_err(|e| TiceError::render(format!("parse frame svg: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| {
                TiceError::render(format!(
                    "cannot allocate a {}x{} pixmap",
                    canvas.width, canvas.height
                ))
            })?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::default(),
            &mut pixmap.as_mut(),
        );

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "fonts directory is not readable");
        return;
    };
    for path in rd.flatten().map(|e| e.path()) {
        let is_font = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"));
        if is_font && db.load_font_file(&path).is_err() {
            tracing::warn!(path = %path.display(), "skipping unreadable font");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
