//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Compose
//!
//! ```text
//! photo.jpg (1000 x 2000)
//!     Ratio: 9:16
//!     Fill: 95%
//!     Frame: 1125 x 2000
//!     Photo: 950 x 1900 at (87.50, 50)
//!     Output: ./borda-9x16-1700000000000.png
//! ```
//!
//! ## Animate
//!
//! ```text
//! photo.jpg (1000 x 2000)
//!     Transition: 9:16 → 1:1 over 450ms at 60 fps
//!     Frames: 28
//!     Output: frames/frame-0000.png … frames/frame-0027.png
//! ```
//!
//! ## Presets
//!
//! ```text
//! 001 9:16 (0.5625, portrait) default
//! 002 4:5 (0.8000, portrait)
//! 003 1:1 (1.0000, square)
//! 004 16:9 (1.7778, landscape)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::imaging::CompositePlan;
use crate::ratio::AspectRatio;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Whole values print bare, fractional ones with two decimals.
fn format_px(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn orientation(ratio: &AspectRatio) -> &'static str {
    let value = ratio.value();
    if value == 1.0 {
        "square"
    } else if ratio.is_portrait() {
        "portrait"
    } else {
        "landscape"
    }
}

/// File name of `path`, or the whole path when it has none.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Compose
// ============================================================================

/// What `borda compose` produced. Serialized as-is for `--json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposeSummary {
    pub source: String,
    pub source_width: u32,
    pub source_height: u32,
    pub ratio: String,
    pub fill_percent: u32,
    pub frame_width: f64,
    pub frame_height: f64,
    pub rect_x: f64,
    pub rect_y: f64,
    pub rect_width: f64,
    pub rect_height: f64,
    pub output_width: u32,
    pub output_height: u32,
    pub output: String,
}

impl ComposeSummary {
    pub fn new(
        source: &Path,
        source_size: (u32, u32),
        ratio: &AspectRatio,
        fill_percent: u32,
        plan: &CompositePlan,
        output: &Path,
    ) -> Self {
        Self {
            source: source.display().to_string(),
            source_width: source_size.0,
            source_height: source_size.1,
            ratio: ratio.label().to_string(),
            fill_percent,
            frame_width: plan.frame.width,
            frame_height: plan.frame.height,
            rect_x: plan.rect.x,
            rect_y: plan.rect.y,
            rect_width: plan.rect.width,
            rect_height: plan.rect.height,
            output_width: plan.raster.0,
            output_height: plan.raster.1,
            output: output.display().to_string(),
        }
    }
}

pub fn format_compose_summary(summary: &ComposeSummary) -> Vec<String> {
    let i = indent(1);
    vec![
        format!(
            "{} ({} x {})",
            display_name(Path::new(&summary.source)),
            summary.source_width,
            summary.source_height
        ),
        format!("{i}Ratio: {}", summary.ratio),
        format!("{i}Fill: {}%", summary.fill_percent),
        format!(
            "{i}Frame: {} x {}",
            format_px(summary.frame_width),
            format_px(summary.frame_height)
        ),
        format!(
            "{i}Photo: {} x {} at ({}, {})",
            format_px(summary.rect_width),
            format_px(summary.rect_height),
            format_px(summary.rect_x),
            format_px(summary.rect_y)
        ),
        format!("{i}Output: {}", summary.output),
    ]
}

pub fn print_compose_summary(summary: &ComposeSummary) {
    for line in format_compose_summary(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Animate
// ============================================================================

/// What `borda animate` produced.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSummary<'a> {
    pub source: &'a Path,
    pub source_size: (u32, u32),
    pub from: &'a AspectRatio,
    pub to: &'a AspectRatio,
    pub duration: Duration,
    pub fps: u32,
    /// Every written frame, in order.
    pub frames: &'a [std::path::PathBuf],
}

pub fn format_animation_summary(summary: &AnimationSummary<'_>) -> Vec<String> {
    let i = indent(1);
    let mut lines = vec![
        format!(
            "{} ({} x {})",
            display_name(summary.source),
            summary.source_size.0,
            summary.source_size.1
        ),
        format!(
            "{i}Transition: {} → {} over {}ms at {} fps",
            summary.from,
            summary.to,
            summary.duration.as_millis(),
            summary.fps
        ),
        format!("{i}Frames: {}", summary.frames.len()),
    ];
    match summary.frames {
        [] => {}
        [only] => lines.push(format!("{i}Output: {}", only.display())),
        [first, .., last] => lines.push(format!(
            "{i}Output: {} … {}",
            first.display(),
            last.display()
        )),
    }
    lines
}

pub fn print_animation_summary(summary: &AnimationSummary<'_>) {
    for line in format_animation_summary(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Presets
// ============================================================================

/// One line per preset; the default is marked.
pub fn format_presets(presets: &[AspectRatio], default: &AspectRatio) -> Vec<String> {
    presets
        .iter()
        .enumerate()
        .map(|(pos, preset)| {
            let line = format!(
                "{} {} ({:.4}, {})",
                format_index(pos + 1),
                preset,
                preset.value(),
                orientation(preset)
            );
            if preset.label() == default.label() {
                format!("{line} default")
            } else {
                line
            }
        })
        .collect()
}

pub fn print_presets(presets: &[AspectRatio], default: &AspectRatio) {
    for line in format_presets(presets, default) {
        println!("{}", line);
    }
}
