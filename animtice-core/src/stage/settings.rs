use crate::foundation::{
    core::{Canvas, Fps, Rgba8},
    error::{TiceError, TiceResult},
};

/// Output size and frame-rate presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    /// 854x480 at 15 fps.
    Low,
    /// 1280x720 at 30 fps.
    #[default]
    Medium,
    /// 1920x1080 at 60 fps.
    High,
}

impl Quality {
    pub fn settings(self) -> StageSettings {
        let (width, height, fps) = match self {
            Self::Low => (854, 480, 15),
            Self::Medium => (1280, 720, 30),
            Self::High => (1920, 1080, 60),
        };
        StageSettings {
            fps: Fps { num: fps, den: 1 },
            canvas: Canvas { width, height },
            background: Rgba8::BLACK,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StageSettings {
    pub fps: Fps,
    pub canvas: Canvas,
    pub background: Rgba8,
}

impl Default for StageSettings {
    fn default() -> Self {
        Quality::default().settings()
    }
}

impl StageSettings {
    pub fn validate(&self) -> TiceResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(TiceError::validation("canvas width/height must be > 0"));
        }
        Ok(())
    }
}
