//! High-level compositing operations.
//!
//! These functions combine calculations with sink execution.
//! They take the current settings, compute the plan, and call the sink.

use super::backend::{RenderSink, SourceImage};
use super::calculations::{compute_draw_rect, compute_frame, raster_size};
use super::params::{Background, CompositePlan, FillPercent};
use crate::ratio::AspectRatio;

/// Plan a composite without drawing it.
///
/// Useful for testing and for printing what a render will produce.
pub fn plan_composite(
    image: (u32, u32),
    ratio: f64,
    fill: FillPercent,
    background: Background,
) -> CompositePlan {
    let frame = compute_frame(image, ratio);
    let rect = compute_draw_rect(image, frame, fill.value());

    CompositePlan {
        frame,
        rect,
        raster: raster_size(frame),
        background,
    }
}

/// Render the composite onto `sink`.
///
/// Resizes the sink to the frame, fills it with the background, then draws
/// the photo centered at its computed rect.
pub fn render_composite(
    sink: &mut impl RenderSink,
    image: &SourceImage,
    ratio: f64,
    fill: FillPercent,
    background: Background,
) -> CompositePlan {
    let plan = plan_composite(image.dimensions(), ratio, fill, background);
    let (w, h) = plan.raster;

    sink.resize(w, h);
    sink.fill(plan.background);
    sink.draw_image(image, plan.rect);

    plan
}

/// Download filename: `borda-<W>x<H>-<timestamp>.png`.
pub fn export_file_name(ratio: &AspectRatio, timestamp_millis: u128) -> String {
    format!("borda-{}-{}.png", ratio.file_label(), timestamp_millis)
}

/// Share-sheet filename: `borda-<W>x<H>.png`.
pub fn share_file_name(ratio: &AspectRatio) -> String {
    format!("borda-{}.png", ratio.file_label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockSink, RecordedOp};
    use crate::ratio::parse_ratio;
    use crate::test_helpers::solid_image;

    #[test]
    fn plan_story_ratio_portrait_photo() {
        let plan = plan_composite(
            (1000, 2000),
            0.5625,
            FillPercent::new(95),
            Background::white(),
        );

        assert_eq!(plan.frame.width, 1125.0);
        assert_eq!(plan.frame.height, 2000.0);
        assert_eq!(plan.raster, (1125, 2000));
        assert!((plan.rect.height - 1900.0).abs() < 1e-9);
    }

    #[test]
    fn plan_full_bleed_square() {
        let plan = plan_composite((1000, 1000), 1.0, FillPercent::new(100), Background::white());

        assert_eq!(plan.raster, (1000, 1000));
        assert_eq!(plan.rect.x, 0.0);
        assert_eq!(plan.rect.y, 0.0);
        assert_eq!(plan.rect.width, 1000.0);
        assert_eq!(plan.rect.height, 1000.0);
    }

    #[test]
    fn plan_truncates_fractional_frame() {
        // 1000px longer side at 16:9 → 1000 x 562.5
        let plan = plan_composite(
            (1000, 800),
            16.0 / 9.0,
            FillPercent::default(),
            Background::white(),
        );
        assert_eq!(plan.raster, (1000, 562));
    }

    #[test]
    fn render_resizes_fills_then_draws() {
        let image = solid_image(100, 200, [0, 0, 0, 255]);
        let mut sink = MockSink::new();

        let plan = render_composite(
            &mut sink,
            &image,
            0.5625,
            FillPercent::new(95),
            Background::white(),
        );

        assert_eq!(
            sink.operations,
            vec![
                RecordedOp::Resize {
                    width: 112,
                    height: 200
                },
                RecordedOp::Fill([255, 255, 255]),
                RecordedOp::Draw { rect: plan.rect },
            ]
        );
    }

    #[test]
    fn render_uses_configured_background() {
        let image = solid_image(10, 10, [0, 0, 0, 255]);
        let mut sink = MockSink::new();

        render_composite(
            &mut sink,
            &image,
            1.0,
            FillPercent::default(),
            Background([1, 2, 3]),
        );

        assert_eq!(sink.operations[1], RecordedOp::Fill([1, 2, 3]));
    }

    #[test]
    fn export_name_includes_ratio_and_timestamp() {
        let ratio = parse_ratio("9:16").unwrap();
        assert_eq!(
            export_file_name(&ratio, 1_700_000_000_123),
            "borda-9x16-1700000000123.png"
        );
    }

    #[test]
    fn share_name_has_no_timestamp() {
        let ratio = parse_ratio("4:5").unwrap();
        assert_eq!(share_file_name(&ratio), "borda-4x5.png");
    }
}
