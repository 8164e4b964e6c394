//! Frame-rate independent smoothing factors.

/// First-order exponential decay factor for one step: `max(0, 1 - rate * dt)`.
///
/// Multiplying a velocity by this each frame approximates continuous
/// exponential damping and never overshoots past zero, so damping can only
/// shrink a velocity, not invert it.
#[must_use]
pub fn decay_factor(rate: f32, dt: f32) -> f32 {
    (1.0 - rate * dt).max(0.0)
}

/// Blend weight for approaching a target value: `1 - base^dt`.
///
/// `value += (target - value) * approach_alpha(base, dt)` converges at the
/// same perceptual rate regardless of frame duration. `base` is the fraction
/// of the remaining distance still left after one second.
#[must_use]
pub fn approach_alpha(base: f32, dt: f32) -> f32 {
    1.0 - base.powf(dt)
}
