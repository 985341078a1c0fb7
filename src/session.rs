//! One editing session: a photo, its settings, and the surface it renders to.
//!
//! [`Session`] bundles the state that changes while a user works on a
//! photo ([`SourceImage`], selected ratio, fill percent, [`RatioAnimator`])
//! with the [`RenderSink`] it draws on and the [`FrameHost`] that paces the
//! animation. A UI shell (the CLI here) turns its own events into calls on
//! this type.
//!
//! ## Operations
//!
//! | Call | Effect |
//! |------|--------|
//! | [`load_image`](Session::load_image) | replace the photo, snap to the selected ratio, render |
//! | [`select_ratio`](Session::select_ratio) | parse `W:H`, start or retarget the transition |
//! | [`set_fill_percent`](Session::set_fill_percent) | re-render immediately at the displayed ratio |
//! | [`on_frame`](Session::on_frame) | host callback: advance the animation, render |
//! | [`export_png`](Session::export_png) | render at the target ratio, return PNG + filename |
//! | [`composite_png_bytes`](Session::composite_png_bytes) | same render, bytes only (for sharing) |
//! | [`reset`](Session::reset) | drop the photo, restore defaults |
//!
//! ## No Photo Yet
//!
//! Every render, export, and animation call made before a photo is loaded
//! is a silent no-op returning `None`. UI events can race the upload; a
//! slider moved before the decode finishes must not fail.
//!
//! ## Fill Changes Mid-Transition
//!
//! [`set_fill_percent`](Session::set_fill_percent) renders at the
//! *displayed* ratio, not the target, so dragging the slider during a
//! transition shows the in-between frame at the new size.

use crate::animation::{DEFAULT_DURATION, FrameHandle, FrameHost, RatioAnimator};
use crate::config::{BordaConfig, ConfigError};
use crate::imaging::{
    Background, CompositePlan, FillPercent, RenderError, RenderSink, SourceImage,
    export_file_name, render_composite, share_file_name,
};
use crate::ratio::{AspectRatio, RatioError, parse_ratio};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Ratio(#[from] RatioError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Starting values for a session, restored by [`Session::reset`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub ratio: AspectRatio,
    pub fill: FillPercent,
    pub background: Background,
    pub duration: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ratio: AspectRatio::default(),
            fill: FillPercent::default(),
            background: Background::default(),
            duration: DEFAULT_DURATION,
        }
    }
}

impl TryFrom<&BordaConfig> for SessionSettings {
    type Error = ConfigError;

    fn try_from(config: &BordaConfig) -> Result<Self, Self::Error> {
        let ratio = parse_ratio(&config.default_ratio)
            .map_err(|e| ConfigError::Validation(format!("default_ratio: {e}")))?;
        let background = config
            .background
            .parse()
            .map_err(|e| ConfigError::Validation(format!("background: {e}")))?;
        Ok(Self {
            ratio,
            fill: FillPercent::new(config.fill_percent),
            background,
            duration: Duration::from_millis(config.animation.duration_ms),
        })
    }
}

/// A rendered PNG and the name it should be saved under.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub plan: CompositePlan,
}

pub struct Session<S: RenderSink, H: FrameHost> {
    settings: SessionSettings,
    image: Option<SourceImage>,
    selected: AspectRatio,
    fill: FillPercent,
    animator: RatioAnimator,
    sink: S,
    host: H,
}

impl<S: RenderSink, H: FrameHost> Session<S, H> {
    pub fn new(sink: S, host: H, settings: SessionSettings) -> Self {
        let animator = RatioAnimator::new(settings.ratio.value(), settings.duration);
        Self {
            selected: settings.ratio.clone(),
            fill: settings.fill,
            image: None,
            animator,
            sink,
            host,
            settings,
        }
    }

    // ------------------------------------------------------------------
    // Input events
    // ------------------------------------------------------------------

    /// Replace the photo and render it at the selected ratio, without
    /// animating.
    pub fn load_image(&mut self, image: SourceImage) -> CompositePlan {
        debug!(
            width = image.width(),
            height = image.height(),
            ratio = %self.selected,
            "image loaded"
        );
        self.animator.snap_to(self.selected.value(), &mut self.host);
        let image = self.image.insert(image);
        render_composite(
            &mut self.sink,
            image,
            self.animator.displayed(),
            self.fill,
            self.settings.background,
        )
    }

    /// Parse a `W:H` selection and transition to it.
    ///
    /// Returns whether a transition was started.
    pub fn select_ratio(&mut self, ratio: &str) -> Result<bool, SessionError> {
        let ratio = parse_ratio(ratio)?;
        Ok(self.request_ratio(ratio))
    }

    /// Transition to `ratio`. With no photo loaded the selection is only
    /// recorded. Returns whether a transition was started.
    pub fn request_ratio(&mut self, ratio: AspectRatio) -> bool {
        let value = ratio.value();
        debug!(ratio = %ratio, "ratio selected");
        self.selected = ratio;

        if self.image.is_none() {
            self.animator.snap_to(value, &mut self.host);
            return false;
        }
        self.animator.request_ratio(value, &mut self.host)
    }

    /// Change the fill percent and re-render at the displayed ratio.
    pub fn set_fill_percent(&mut self, percent: u32) -> Option<CompositePlan> {
        self.fill = FillPercent::new(percent);
        debug!(fill = self.fill.value(), "fill percent changed");
        self.render_composite()
    }

    /// Host callback for a requested frame.
    ///
    /// Returns the plan that was rendered, or `None` for a stale handle or
    /// when no photo is loaded.
    pub fn on_frame(&mut self, handle: FrameHandle) -> Option<CompositePlan> {
        self.image.as_ref()?;
        let ratio = self.animator.step(handle, &mut self.host)?;
        self.render_at(ratio)
    }

    /// Drop the photo and restore the starting ratio and fill percent.
    pub fn reset(&mut self) {
        debug!("session reset");
        self.image = None;
        self.selected = self.settings.ratio.clone();
        self.fill = self.settings.fill;
        self.animator.snap_to(self.selected.value(), &mut self.host);
    }

    // ------------------------------------------------------------------
    // Rendering and export
    // ------------------------------------------------------------------

    /// Render at the displayed (possibly mid-transition) ratio.
    pub fn render_composite(&mut self) -> Option<CompositePlan> {
        self.render_at(self.animator.displayed())
    }

    /// Render at the target ratio and encode as PNG, named with the current
    /// wall-clock time.
    pub fn export_png(&mut self) -> Result<Option<ExportedImage>, SessionError> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        self.export_png_at(millis)
    }

    /// [`export_png`](Self::export_png) with an explicit filename timestamp.
    pub fn export_png_at(
        &mut self,
        timestamp_millis: u128,
    ) -> Result<Option<ExportedImage>, SessionError> {
        let Some(plan) = self.render_at(self.animator.target()) else {
            return Ok(None);
        };
        let bytes = self.sink.encode_png()?;
        let file_name = export_file_name(&self.selected, timestamp_millis);
        debug!(file_name, bytes = bytes.len(), "composite exported");
        Ok(Some(ExportedImage {
            file_name,
            bytes,
            plan,
        }))
    }

    /// The composite at the target ratio as PNG bytes, for a share sheet.
    pub fn composite_png_bytes(&mut self) -> Result<Option<Vec<u8>>, SessionError> {
        if self.render_at(self.animator.target()).is_none() {
            return Ok(None);
        }
        Ok(Some(self.sink.encode_png()?))
    }

    /// Filename offered to a share sheet: `borda-<W>x<H>.png`.
    pub fn share_file_name(&self) -> String {
        share_file_name(&self.selected)
    }

    fn render_at(&mut self, ratio: f64) -> Option<CompositePlan> {
        let image = self.image.as_ref()?;
        Some(render_composite(
            &mut self.sink,
            image,
            ratio,
            self.fill,
            self.settings.background,
        ))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn displayed_ratio(&self) -> f64 {
        self.animator.displayed()
    }

    pub fn target_ratio(&self) -> f64 {
        self.animator.target()
    }

    pub fn selected_ratio(&self) -> &AspectRatio {
        &self.selected
    }

    pub fn fill_percent(&self) -> FillPercent {
        self.fill
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
