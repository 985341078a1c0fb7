//! # Borda
//!
//! Puts a photo on a solid matte at a fixed aspect ratio, the way social
//! apps want it (9:16 stories, 4:5 feed posts, square, widescreen), and
//! animates the frame smoothly when the ratio changes.
//!
//! # Pipeline
//!
//! ```text
//! select ratio ──▶ RatioAnimator ──┐ (each host frame: eased ratio)
//!                                  ▼
//! set fill % ──────────────▶ compute_frame ─▶ compute_draw_rect ─▶ RenderSink
//!                               (longer side kept)    (fit + center)   (fill, draw, PNG)
//! ```
//!
//! The frame always keeps the photo's longer side at full resolution, so a
//! ratio change adds matte instead of shrinking the photo. The fill percent
//! then decides how much of that frame the photo may cover.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`ratio`] | `W:H` parsing, the preset catalog, labels for file names |
//! | [`imaging`] | Frame and rect geometry, the [`RenderSink`](imaging::RenderSink) trait, the `image`-backed canvas |
//! | [`animation`] | Ease-out transitions between ratios, paced by a [`FrameHost`](animation::FrameHost) |
//! | [`session`] | One photo plus its settings; the operations a UI calls |
//! | [`config`] | `borda.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Injected Clock and Scheduler
//!
//! The animator never reads wall time or sleeps. Time and "call me on the
//! next refresh" both come from a [`FrameHost`](animation::FrameHost). A GUI
//! maps it onto its vsync callback; the CLI and the tests use
//! [`SteppedHost`](animation::SteppedHost), whose clock only moves when
//! told to. Transitions are therefore reproducible frame for frame.
//!
//! ## Fractional Geometry Until the Last Step
//!
//! Frames and draw rects stay `f64` through the whole computation and are
//! snapped to pixels only when a sink rasterizes them. An animating ratio
//! moves continuously instead of in whole-pixel steps.
//!
//! ## Export at the Target, Preview at the Displayed Ratio
//!
//! Fill changes redraw whatever ratio is on screen, even mid-transition.
//! Exports always render the ratio the user picked, so saving during a
//! transition never writes an in-between frame.

pub mod animation;
pub mod config;
pub mod imaging;
pub mod output;
pub mod ratio;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;
