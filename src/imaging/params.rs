//! Parameter types for compositing.
//!
//! These structs describe *what* to draw, not *how* to draw it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides frame and rect) and the [`backend`](super::backend) sink
//! (which does the actual pixel work). This separation allows swapping sinks
//! (e.g. for testing with a recording mock) without changing operation logic.
//!
//! ## Types
//!
//! - [`FillPercent`]: Share of the frame the photo may occupy (1–100, default 95). Clamped on construction.
//! - [`Background`]: Solid matte color behind the photo, default white.
//! - [`Resampling`]: Filter used when scaling the photo into its rect.
//! - [`CompositePlan`]: Everything one render needs: frame, rect, raster size, background.

use super::calculations::{DrawRect, Frame};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Share of the frame the photo's bounding box may occupy (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FillPercent(u32);

impl FillPercent {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for FillPercent {
    fn default() -> Self {
        Self(95)
    }
}

/// Solid RGB matte color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background(pub [u8; 3]);

impl Background {
    pub fn white() -> Self {
        Self([0xff, 0xff, 0xff])
    }

    pub fn rgb(self) -> [u8; 3] {
        self.0
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::white()
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for Background {
    type Err = String;

    /// Parse `#rrggbb` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid color '{s}': expected #rrggbb"));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self([r, g, b])),
            _ => Err(format!("invalid color '{s}': expected #rrggbb")),
        }
    }
}

/// Filter used to scale the photo into its draw rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resampling {
    Nearest,
    Triangle,
    CatmullRom,
    #[default]
    Lanczos3,
}

impl From<Resampling> for image::imageops::FilterType {
    fn from(r: Resampling) -> Self {
        use image::imageops::FilterType;
        match r {
            Resampling::Nearest => FilterType::Nearest,
            Resampling::Triangle => FilterType::Triangle,
            Resampling::CatmullRom => FilterType::CatmullRom,
            Resampling::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Everything needed to render one composite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositePlan {
    pub frame: Frame,
    pub rect: DrawRect,
    /// Whole-pixel size of the output raster.
    pub raster: (u32, u32),
    pub background: Background,
}
