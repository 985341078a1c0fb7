//! Ratio transition state machine.
//!
//! ```text
//!            request_ratio(r)              step: progress < 1
//!   ┌──────┐ ───────────────▶ ┌───────────┐ ◀──────┐
//!   │ Idle │                  │ Animating │ ───────┘
//!   └──────┘ ◀─────────────── └───────────┘ ◀──────┐
//!            step: progress = 1            request_ratio(r)  (retarget)
//! ```
//!
//! Every transition starts from the ratio currently on screen, never from
//! the previous target, so retargeting mid-flight cannot jump. At most one
//! frame callback is pending at any time: a retarget cancels the old one on
//! the host, and [`RatioAnimator::step`] ignores any handle that is not the
//! pending one.

use super::easing::{ease_out_cubic, lerp};
use super::host::{FrameHandle, FrameHost};
use std::time::Duration;
use tracing::{debug, trace};

/// Transition length used when nothing else is configured.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(450);

/// One in-flight transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub start_ratio: f64,
    pub target_ratio: f64,
    pub start_time: Duration,
    pub duration: Duration,
}

impl AnimationState {
    /// Linear progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start_time);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Eased ratio at `now`.
    pub fn sample(&self, now: Duration) -> f64 {
        lerp(
            self.start_ratio,
            self.target_ratio,
            ease_out_cubic(self.progress(now)),
        )
    }
}

/// Drives the displayed ratio toward the requested target.
#[derive(Debug, Clone)]
pub struct RatioAnimator {
    displayed: f64,
    target: f64,
    duration: Duration,
    state: Option<AnimationState>,
    pending: Option<FrameHandle>,
}

impl RatioAnimator {
    pub fn new(initial: f64, duration: Duration) -> Self {
        Self {
            displayed: initial,
            target: initial,
            duration,
            state: None,
            pending: None,
        }
    }

    /// Ratio currently on screen.
    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    /// Ratio the animator is heading toward (equal to `displayed` when idle).
    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&AnimationState> {
        self.state.as_ref()
    }

    /// Start (or retarget) a transition to `target`.
    ///
    /// Returns `false` without touching anything when already idle at
    /// `target`. Otherwise cancels any pending step, starts from the
    /// displayed ratio, and schedules the first step.
    pub fn request_ratio(&mut self, target: f64, host: &mut impl FrameHost) -> bool {
        if self.state.is_none() && self.displayed == target {
            trace!(target, "ratio already displayed, nothing to animate");
            return false;
        }

        let retarget = self.cancel_pending(host);
        let state = AnimationState {
            start_ratio: self.displayed,
            target_ratio: target,
            start_time: host.now(),
            duration: self.duration,
        };
        debug!(
            from = state.start_ratio,
            to = target,
            retarget,
            "ratio transition started"
        );

        self.target = target;
        self.state = Some(state);
        self.pending = Some(host.request_frame());
        true
    }

    /// Jump straight to `ratio`, abandoning any transition.
    pub fn snap_to(&mut self, ratio: f64, host: &mut impl FrameHost) {
        if self.cancel_pending(host) {
            debug!(ratio, "transition abandoned by snap");
        }
        self.state = None;
        self.displayed = ratio;
        self.target = ratio;
    }

    /// Advance one frame.
    ///
    /// Returns the ratio to render, or `None` when `handle` is not the
    /// pending callback (cancelled, already consumed, or from another
    /// animator). Schedules the next step until progress reaches 1, then
    /// lands exactly on the target and goes idle.
    pub fn step(&mut self, handle: FrameHandle, host: &mut impl FrameHost) -> Option<f64> {
        if self.pending != Some(handle) {
            trace!(?handle, "stale frame ignored");
            return None;
        }
        self.pending = None;

        let state = self.state?;
        let now = host.now();

        if state.progress(now) < 1.0 {
            self.displayed = state.sample(now);
            self.pending = Some(host.request_frame());
        } else {
            self.displayed = state.target_ratio;
            self.state = None;
            debug!(ratio = self.displayed, "ratio transition finished");
        }

        Some(self.displayed)
    }

    fn cancel_pending(&mut self, host: &mut impl FrameHost) -> bool {
        match self.pending.take() {
            Some(handle) => {
                host.cancel_frame(handle);
                true
            }
            None => false,
        }
    }
}
