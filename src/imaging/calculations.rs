//! Pure calculation functions for frame and draw-rect geometry.
//!
//! All functions here are pure and testable without any I/O or images.
//! Dimensions stay `f64` until the very last step ([`raster_size`],
//! [`DrawRect::to_pixels`]) so an animating ratio moves smoothly instead of
//! in whole-pixel jumps.

/// Output frame size in (possibly fractional) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// Where the scaled source image lands inside a [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A [`DrawRect`] snapped to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl DrawRect {
    /// Snap to whole pixels. Size is at least 1×1.
    ///
    /// Both edges are rounded and the size is their difference, so every
    /// edge lands within half a pixel of its exact position and opposite
    /// margins differ by at most one pixel.
    pub fn to_pixels(&self) -> PixelRect {
        let left = self.x.round();
        let top = self.y.round();
        let right = (self.x + self.width).round();
        let bottom = (self.y + self.height).round();
        PixelRect {
            x: left as i64,
            y: top as i64,
            width: ((right - left) as u32).max(1),
            height: ((bottom - top) as u32).max(1),
        }
    }
}

/// Calculate the frame for a source image at a target aspect ratio.
///
/// The source's longer side becomes the frame's longer side, so the export
/// never upscales the limiting dimension.
///
/// # Arguments
/// * `image` - Source image dimensions (width, height)
/// * `ratio` - Target aspect ratio (width / height), must be positive
///
/// # Examples
/// ```
/// # use borda::imaging::compute_frame;
/// // 1000x2000 at 9:16: ratio < 1, so the longer side becomes the height.
/// let frame = compute_frame((1000, 2000), 9.0 / 16.0);
/// assert_eq!(frame.height, 2000.0);
/// assert_eq!(frame.width, 1125.0);
///
/// // Square ratio keeps the longer side on both axes.
/// let frame = compute_frame((3000, 2000), 1.0);
/// assert_eq!((frame.width, frame.height), (3000.0, 3000.0));
/// ```
pub fn compute_frame(image: (u32, u32), ratio: f64) -> Frame {
    let (img_w, img_h) = image;
    let longer = img_w.max(img_h) as f64;

    if ratio >= 1.0 {
        // Landscape or square: width carries the longer side
        Frame {
            width: longer,
            height: longer / ratio,
        }
    } else {
        // Portrait: height carries the longer side
        Frame {
            width: longer * ratio,
            height: longer,
        }
    }
}

/// Calculate where the image is drawn inside the frame.
///
/// The image is scaled to fit the `fill_percent` share of the frame on the
/// binding axis, keeping its own aspect ratio, then centered.
///
/// # Arguments
/// * `image` - Source image dimensions (width, height)
/// * `frame` - Frame computed by [`compute_frame`]
/// * `fill_percent` - Share of the frame the image may occupy, 1–100
pub fn compute_draw_rect(image: (u32, u32), frame: Frame, fill_percent: u32) -> DrawRect {
    let (img_w, img_h) = image;
    let scale = fill_percent as f64 / 100.0;
    let avail_w = frame.width * scale;
    let avail_h = frame.height * scale;

    let img_aspect = img_w as f64 / img_h as f64;

    let (width, height) = if img_aspect > avail_w / avail_h {
        // Image is wider than the available box: width binds
        (avail_w, avail_w / img_aspect)
    } else {
        // Image is taller (or equal): height binds
        (avail_h * img_aspect, avail_h)
    };

    DrawRect {
        x: (frame.width - width) / 2.0,
        y: (frame.height - height) / 2.0,
        width,
        height,
    }
}

/// Whole-pixel raster size for a frame.
///
/// Fractions are truncated, the way a canvas truncates a fractional size.
/// Each side is at least 1 pixel.
pub fn raster_size(frame: Frame) -> (u32, u32) {
    let w = (frame.width as u32).max(1);
    let h = (frame.height as u32).max(1);
    (w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    const IMAGES: &[(u32, u32)] = &[
        (1000, 2000),
        (2000, 1000),
        (1000, 1000),
        (4032, 3024),
        (3024, 4032),
        (1, 5000),
        (7, 3),
    ];

    const RATIOS: &[f64] = &[9.0 / 16.0, 4.0 / 5.0, 1.0, 16.0 / 9.0, 2.39, 0.1, 10.0];

    // =========================================================================
    // compute_frame tests
    // =========================================================================

    #[test]
    fn frame_portrait_ratio_uses_longer_side_as_height() {
        let frame = compute_frame((1000, 2000), 9.0 / 16.0);
        assert_eq!(frame.height, 2000.0);
        assert_eq!(frame.width, 1125.0);
    }

    #[test]
    fn frame_landscape_ratio_uses_longer_side_as_width() {
        let frame = compute_frame((1000, 2000), 16.0 / 9.0);
        assert_eq!(frame.width, 2000.0);
        assert_eq!(frame.height, 1125.0);
    }

    #[test]
    fn frame_square_ratio() {
        let frame = compute_frame((1000, 1000), 1.0);
        assert_eq!(frame, Frame { width: 1000.0, height: 1000.0 });
    }

    #[test]
    fn frame_longer_side_preserved_for_all_inputs() {
        for &img in IMAGES {
            let longer = img.0.max(img.1) as f64;
            for &ratio in RATIOS {
                let frame = compute_frame(img, ratio);
                assert_eq!(
                    frame.width.max(frame.height),
                    longer,
                    "image {img:?} ratio {ratio}"
                );
            }
        }
    }

    #[test]
    fn frame_aspect_matches_ratio_for_all_inputs() {
        for &img in IMAGES {
            for &ratio in RATIOS {
                let frame = compute_frame(img, ratio);
                assert!(
                    (frame.aspect() - ratio).abs() < EPS * ratio.max(1.0),
                    "image {img:?} ratio {ratio} got {}",
                    frame.aspect()
                );
            }
        }
    }

    #[test]
    fn frame_nan_ratio_propagates() {
        // Precondition violation: not handled, the output is simply not finite
        let frame = compute_frame((100, 100), f64::NAN);
        assert!(frame.width.is_nan());
        assert_eq!(frame.height, 100.0);
    }

    // =========================================================================
    // compute_draw_rect tests
    // =========================================================================

    #[test]
    fn draw_rect_story_example() {
        // 1000x2000 at 9:16 with 95% fill. Ratio < 1 so the frame height is
        // the longer side (2000) and the width is 2000 * 0.5625 = 1125.
        let frame = compute_frame((1000, 2000), 9.0 / 16.0);
        let rect = compute_draw_rect((1000, 2000), frame, 95);

        // Image aspect 0.5 < available aspect 0.5625: height binds
        assert!(approx(rect.height, 1900.0));
        assert!(approx(rect.width, 950.0));
        assert!(approx(rect.x, 87.5));
        assert!(approx(rect.y, 50.0));
    }

    #[test]
    fn draw_rect_height_bound_in_tall_frame() {
        // Frame {2000, 3555.56} as if built from a 2000px longer side at
        // 9:16 with width on the longer side.
        let frame = Frame {
            width: 2000.0,
            height: 2000.0 / 0.5625,
        };
        let rect = compute_draw_rect((1000, 2000), frame, 95);

        assert!(approx(frame.height, 3555.555_555_6));
        // Image aspect 0.5 < available aspect 0.5625: height binds
        assert!(approx(rect.height, 3377.777_777_8));
        assert!(approx(rect.width, 1688.888_888_9));
        assert!(approx(rect.x, 155.555_555_6));
        assert!(approx(rect.y, 88.888_888_9));
    }

    #[test]
    fn draw_rect_full_bleed_square() {
        let frame = compute_frame((1000, 1000), 1.0);
        let rect = compute_draw_rect((1000, 1000), frame, 100);
        assert_eq!(
            rect,
            DrawRect {
                x: 0.0,
                y: 0.0,
                width: 1000.0,
                height: 1000.0,
            }
        );
    }

    #[test]
    fn draw_rect_wide_image_in_tall_frame_is_width_bound() {
        let frame = compute_frame((3000, 2000), 9.0 / 16.0);
        let rect = compute_draw_rect((3000, 2000), frame, 90);
        assert!(approx(rect.width, frame.width * 0.9));
        assert!(approx(rect.height, rect.width * 2000.0 / 3000.0));
    }

    #[test]
    fn draw_rect_preserves_image_aspect_for_all_inputs() {
        for &img in IMAGES {
            let img_aspect = img.0 as f64 / img.1 as f64;
            for &ratio in RATIOS {
                for fill in [1, 50, 95, 100] {
                    let frame = compute_frame(img, ratio);
                    let rect = compute_draw_rect(img, frame, fill);
                    let rel = (rect.width / rect.height - img_aspect).abs() / img_aspect;
                    assert!(rel < EPS, "image {img:?} ratio {ratio} fill {fill}");
                }
            }
        }
    }

    #[test]
    fn draw_rect_fits_available_box_for_all_inputs() {
        for &img in IMAGES {
            for &ratio in RATIOS {
                for fill in [1, 33, 95, 100] {
                    let frame = compute_frame(img, ratio);
                    let rect = compute_draw_rect(img, frame, fill);
                    let scale = fill as f64 / 100.0;
                    let slack = 1e-9 * frame.width.max(frame.height);
                    assert!(rect.width <= frame.width * scale + slack);
                    assert!(rect.height <= frame.height * scale + slack);
                    assert!(rect.x >= -slack && rect.y >= -slack);
                }
            }
        }
    }

    #[test]
    fn draw_rect_is_centered_for_all_inputs() {
        for &img in IMAGES {
            for &ratio in RATIOS {
                for fill in [1, 50, 95, 100] {
                    let frame = compute_frame(img, ratio);
                    let rect = compute_draw_rect(img, frame, fill);
                    let slack = 1e-9 * frame.width.max(frame.height);
                    assert!((rect.x + rect.width / 2.0 - frame.width / 2.0).abs() < slack);
                    assert!((rect.y + rect.height / 2.0 - frame.height / 2.0).abs() < slack);
                }
            }
        }
    }

    // =========================================================================
    // pixel snapping tests
    // =========================================================================

    #[test]
    fn raster_size_truncates_fractions() {
        let frame = Frame {
            width: 2000.0,
            height: 3555.56,
        };
        assert_eq!(raster_size(frame), (2000, 3555));
    }

    #[test]
    fn raster_size_never_zero() {
        let frame = Frame {
            width: 0.4,
            height: 10.0,
        };
        assert_eq!(raster_size(frame), (1, 10));
    }

    #[test]
    fn draw_rect_rounds_to_pixels() {
        let rect = DrawRect {
            x: 155.56,
            y: 88.89,
            width: 1688.89,
            height: 3377.78,
        };
        assert_eq!(
            rect.to_pixels(),
            PixelRect {
                x: 156,
                y: 89,
                width: 1688,
                height: 3378,
            }
        );
    }

    #[test]
    fn pixel_margins_stay_balanced() {
        // 100px frame. Rounding x and width separately gives margins 10 and 11
        let rect = DrawRect {
            x: 10.4,
            y: 10.4,
            width: 79.2,
            height: 79.2,
        };
        let px = rect.to_pixels();
        assert_eq!((px.x, px.width), (10, 80));
        assert_eq!((px.y, px.height), (10, 80));
        assert_eq!(100 - (px.x + px.width as i64), px.x);
    }

    #[test]
    fn pixel_edges_within_half_pixel_of_exact() {
        for &image in IMAGES {
            for &ratio in RATIOS {
                for fill in [1, 33, 50, 87, 95, 100] {
                    let frame = compute_frame(image, ratio);
                    let rect = compute_draw_rect(image, frame, fill);
                    if rect.width < 1.0 || rect.height < 1.0 {
                        // Sub-pixel photos are clamped to 1×1
                        continue;
                    }
                    let px = rect.to_pixels();
                    let (raster_w, raster_h) = raster_size(frame);

                    let right = px.x + px.width as i64;
                    let bottom = px.y + px.height as i64;
                    assert!((px.x as f64 - rect.x).abs() <= 0.5);
                    assert!((right as f64 - (rect.x + rect.width)).abs() <= 0.5 + 1e-9);
                    assert!((bottom as f64 - (rect.y + rect.height)).abs() <= 0.5 + 1e-9);

                    let left_margin = px.x;
                    let right_margin = raster_w as i64 - right;
                    let top_margin = px.y;
                    let bottom_margin = raster_h as i64 - bottom;
                    assert!(
                        (left_margin - right_margin).abs() <= 1,
                        "{image:?} at {ratio} fill {fill}: margins {left_margin}/{right_margin}"
                    );
                    assert!(
                        (top_margin - bottom_margin).abs() <= 1,
                        "{image:?} at {ratio} fill {fill}: margins {top_margin}/{bottom_margin}"
                    );
                }
            }
        }
    }
}
