//! Render sink trait and shared types.
//!
//! The [`RenderSink`] trait is the canvas-like surface every composite is
//! drawn on. It supports four operations: resize, fill, draw_image, and
//! encode_png. The sink is resized on every render because the frame size
//! changes with the ratio.
//!
//! The production implementation is
//! [`RasterCanvas`](super::raster_backend::RasterCanvas), an in-memory RGBA
//! buffer from the `image` crate.

use super::calculations::DrawRect;
use super::params::Background;
use image::{DynamicImage, RgbaImage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// An immutable decoded photo.
///
/// Both dimensions are guaranteed positive. A new upload replaces the whole
/// value; nothing mutates the pixels after construction.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self, RenderError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(RenderError::Decode(format!(
                "image has no pixels ({}x{})",
                pixels.width(),
                pixels.height()
            )));
        }
        Ok(Self { pixels })
    }

    pub fn from_dynamic(image: DynamicImage) -> Result<Self, RenderError> {
        Self::from_rgba(image.into_rgba8())
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Trait for raster surfaces a composite can be rendered onto.
///
/// Rendering is synchronous: each call completes before the next one is
/// made, and the sink is exclusively borrowed for the duration.
pub trait RenderSink {
    /// Resize the surface. Previous contents are discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Fill the whole surface with a solid color.
    fn fill(&mut self, color: Background);

    /// Draw `image` scaled into `rect`, blending over what is already there.
    fn draw_image(&mut self, image: &SourceImage, rect: DrawRect);

    /// Current surface size.
    fn dimensions(&self) -> (u32, u32);

    /// Serialize the current surface as PNG bytes.
    fn encode_png(&self) -> Result<Vec<u8>, RenderError>;
}
