//! Easing curves for ratio transitions.

/// Ease-out cubic: `1 - (1 - t)^3`.
///
/// Fast start, slow settle. `t` is clamped to `[0, 1]`, so the result is
/// always in `[0, 1]` with `f(0) == 0` and `f(1) == 1` exactly.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Linear interpolation from `start` to `end` by `t`.
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}
