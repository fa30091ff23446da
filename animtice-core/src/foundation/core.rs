use crate::foundation::error::{TiceError, TiceResult};

pub use kurbo::{Affine, BezPath, Line, Point, Rect, Vec2};

/// Height of the visible frame in scene units. Width follows the canvas aspect ratio.
pub const FRAME_HEIGHT_UNITS: f64 = 8.0;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> TiceResult<Self> {
        if start.0 > end.0 {
            return Err(TiceError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> TiceResult<Self> {
        if den == 0 {
            return Err(TiceError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(TiceError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }

    /// Number of frames covering `secs`, rounded to the nearest frame.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        (secs * self.as_f64()).round().max(0.0) as u64
    }

    /// Integer frame rate for encoders that cannot take a rational rate.
    pub fn whole_fps(self) -> u32 {
        (self.as_f64().round() as u32).max(1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// Straight (non-premultiplied) RGBA8 color. Serialized as `#rrggbb` or `#rrggbbaa`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    pub const GRAY: Self = Self::rgb(0x88, 0x88, 0x88);
    pub const BLUE: Self = Self::rgb(0x58, 0xC4, 0xDD);
    pub const TEAL: Self = Self::rgb(0x5C, 0xD0, 0xB3);
    pub const GREEN: Self = Self::rgb(0x83, 0xC1, 0x67);
    pub const YELLOW: Self = Self::rgb(0xF7, 0xD9, 0x6F);
    pub const ORANGE: Self = Self::rgb(0xFF, 0x86, 0x2F);
    pub const RED: Self = Self::rgb(0xFC, 0x62, 0x55);
    pub const PURPLE: Self = Self::rgb(0x9A, 0x72, 0xAC);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn from_hex(s: &str) -> TiceResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        let byte = |i: usize| -> TiceResult<u8> {
            hex.get(i..i + 2)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| TiceError::validation(format!("invalid hex color '{s}'")))
        };
        match hex.len() {
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => Err(TiceError::validation(format!("invalid hex color '{s}'"))),
        }
    }

    /// `#rrggbb`, alpha is carried separately as an SVG opacity.
    pub fn to_svg_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn alpha(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = TiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgba8> for String {
    fn from(c: Rgba8) -> Self {
        if c.a == 255 {
            c.to_svg_hex()
        } else {
            format!("{}{:02x}", c.to_svg_hex(), c.a)
        }
    }
}

/// Mapping between scene units (origin at the center, y up) and canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub canvas: Canvas,
}

impl Viewport {
    pub fn new(canvas: Canvas) -> Self {
        Self { canvas }
    }

    pub fn pixels_per_unit(self) -> f64 {
        f64::from(self.canvas.height) / FRAME_HEIGHT_UNITS
    }

    pub fn frame_width_units(self) -> f64 {
        f64::from(self.canvas.width) / self.pixels_per_unit()
    }

    pub fn to_pixels(self) -> Affine {
        let ppu = self.pixels_per_unit();
        Affine::translate(Vec2::new(
            f64::from(self.canvas.width) / 2.0,
            f64::from(self.canvas.height) / 2.0,
        )) * Affine::scale_non_uniform(ppu, -ppu)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
