//! Shared test utilities for the borda test suite.
//!
//! Builds synthetic photos in memory and on disk so tests never depend on
//! fixture files.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let image = solid_image(1000, 2000, [0, 0, 0, 255]);
//! assert_eq!(image.dimensions(), (1000, 2000));
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! write_test_jpeg(&tmp.path().join("photo.jpg"), 200, 150);
//! ```

use image::{ImageBuffer, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;

use crate::imaging::SourceImage;

// =========================================================================
// In-memory images
// =========================================================================

/// A `width`×`height` source image of one RGBA color. Panics on a zero side.
pub fn solid_image(width: u32, height: u32, rgba: [u8; 4]) -> SourceImage {
    SourceImage::from_rgba(RgbaImage::from_pixel(width, height, Rgba(rgba)))
        .unwrap_or_else(|e| panic!("solid_image({width}, {height}): {e}"))
}

// =========================================================================
// On-disk images
// =========================================================================

/// Write a horizontal-gradient JPEG.
pub fn write_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128u8])
    });
    img.save(path).unwrap();
}

/// Write a gradient JPEG carrying an EXIF Orientation tag (1-8).
///
/// The pixels are stored as `width`×`height`; the tag tells viewers how to
/// turn them upright.
pub fn write_test_jpeg_with_orientation(path: &Path, width: u32, height: u32, orientation: u16) {
    let img: RgbImage = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128u8])
    });
    let mut jpeg = Vec::new();
    img.write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
        .unwrap();

    // Big-endian TIFF with a single IFD entry: 0x0112 Orientation, SHORT, 1
    let [hi, lo] = orientation.to_be_bytes();
    let mut exif: Vec<u8> = b"Exif\0\0MM\0\x2a\0\0\0\x08".to_vec();
    exif.extend_from_slice(&[0x00, 0x01]);
    exif.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, hi, lo, 0x00, 0x00]);
    exif.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

    // APP1 goes right after the SOI marker
    let segment_len = (exif.len() + 2) as u16;
    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(&exif);
    out.extend_from_slice(&jpeg[2..]);
    std::fs::write(path, out).unwrap();
}

/// Write a solid-color PNG.
pub fn write_test_png(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
    let img = ImageBuffer::from_pixel(width, height, Rgb(rgb));
    img.save(path).unwrap();
}
