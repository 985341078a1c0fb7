//! Frame geometry and compositing in pure Rust, `image` crate only.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` |
//! | **Frame / rect** | pure `f64` math in `calculations` |
//! | **Composite** | `imageops::resize` + `imageops::overlay` over a solid matte |
//! | **Encode** | `PngEncoder`, RGB8 |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for frame and rect math (unit testable)
//! - **Parameters**: Data structures describing a composite
//! - **Backend**: [`RenderSink`] trait + [`SourceImage`]
//! - **Raster backend**: [`RasterCanvas`], the production sink
//! - **Operations**: High-level functions combining calculations + sink

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod raster_backend;

pub use backend::{RenderError, RenderSink, SourceImage};
pub use calculations::{DrawRect, Frame, PixelRect, compute_draw_rect, compute_frame, raster_size};
pub use operations::{export_file_name, plan_composite, render_composite, share_file_name};
pub use params::{Background, CompositePlan, FillPercent, Resampling};
pub use raster_backend::{RasterCanvas, is_supported_image, load_source_image};
