//! In-memory raster sink built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` |
//! | Fill | `RgbaImage::from_pixel` |
//! | Scale into rect | `image::imageops::resize` (filter from [`Resampling`](super::Resampling)) |
//! | Draw | `image::imageops::overlay` (alpha blends over the matte) |
//! | Encode → PNG | `image::codecs::png::PngEncoder`, RGB8 |

use super::backend::{RenderError, RenderSink, SourceImage};
use super::calculations::DrawRect;
use super::params::{Background, Resampling};
use image::buffer::ConvertBuffer;
use image::codecs::png::PngEncoder;
use image::metadata::Orientation;
use image::{
    DynamicImage, ExtendedColorType, ImageDecoder, ImageEncoder, ImageFormat, ImageReader, Rgba,
    RgbImage, RgbaImage,
};
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// Extensions whose decoders are compiled in.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Whether `path` has an extension we can decode (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            supported_input_extensions()
                .iter()
                .any(|s| s.eq_ignore_ascii_case(e))
        })
}

/// Load and decode a photo from disk, upright.
///
/// The EXIF orientation tag is applied, so a portrait phone photo stored
/// sideways comes back with its width and height swapped.
pub fn load_source_image(path: &Path) -> Result<SourceImage, RenderError> {
    let decode_err = |e: image::ImageError| {
        RenderError::Decode(format!("Failed to decode {}: {}", path.display(), e))
    };

    let mut decoder = ImageReader::open(path)
        .map_err(RenderError::Io)?
        .with_guessed_format()
        .map_err(RenderError::Io)?
        .into_decoder()
        .map_err(decode_err)?;
    let orientation = decoder.orientation().map_err(decode_err)?;
    let mut decoded = DynamicImage::from_decoder(decoder).map_err(decode_err)?;
    if orientation != Orientation::NoTransforms {
        debug!(path = %path.display(), ?orientation, "applying EXIF orientation");
        decoded.apply_orientation(orientation);
    }
    SourceImage::from_dynamic(decoded)
}

/// RGBA raster surface. Always opaque once filled.
pub struct RasterCanvas {
    pixels: RgbaImage,
    filter: Resampling,
}

impl RasterCanvas {
    pub fn new(filter: Resampling) -> Self {
        Self {
            pixels: RgbaImage::new(1, 1),
            filter,
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Flatten to RGB8, dropping the (opaque) alpha channel.
    pub fn to_rgb(&self) -> RgbImage {
        self.pixels.convert()
    }
}

impl Default for RasterCanvas {
    fn default() -> Self {
        Self::new(Resampling::default())
    }
}

impl RenderSink for RasterCanvas {
    fn resize(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::new(width, height);
    }

    fn fill(&mut self, color: Background) {
        let [r, g, b] = color.rgb();
        let (w, h) = self.pixels.dimensions();
        self.pixels = RgbaImage::from_pixel(w, h, Rgba([r, g, b, 255]));
    }

    fn draw_image(&mut self, image: &SourceImage, rect: DrawRect) {
        let px = rect.to_pixels();
        if (px.width, px.height) == image.dimensions() {
            // Full-resolution draw: nothing to resample
            image::imageops::overlay(&mut self.pixels, image.pixels(), px.x, px.y);
        } else {
            let scaled = image::imageops::resize(
                image.pixels(),
                px.width,
                px.height,
                self.filter.into(),
            );
            image::imageops::overlay(&mut self.pixels, &scaled, px.x, px.y);
        }
    }

    fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let rgb = self.to_rgb();
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| RenderError::Encode(format!("PNG encode failed: {}", e)))?;
        Ok(bytes)
    }
}
