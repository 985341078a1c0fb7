//! Animated ratio transitions.
//!
//! - **Easing**: the ease-out cubic curve and interpolation
//! - **Host**: [`FrameHost`] trait (clock + per-refresh callbacks) and the deterministic [`SteppedHost`]
//! - **Animator**: [`RatioAnimator`], the Idle/Animating state machine

mod animator;
mod easing;
mod host;

pub use animator::{AnimationState, DEFAULT_DURATION, RatioAnimator};
pub use easing::{ease_out_cubic, lerp};
pub use host::{FrameHandle, FrameHost, SteppedHost};
