// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Tuning parameters for [`crate::Camera`].
///
/// Velocities are expressed in pixels per reference frame
/// ([`PanConfig::REFERENCE_FRAME_MS`]).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanConfig {
    /// Per-frame velocity decay factor (`0.0` stops instantly, `1.0` never
    /// slows down).
    pub friction: f64,
    /// Fraction of the remaining `target - view` distance covered each frame.
    pub smoothing: f64,
    /// Velocity components below this magnitude snap to zero.
    pub velocity_epsilon: f64,
    /// Distance below which `view` snaps onto `target`.
    pub settle_epsilon: f64,
    /// Scale from the instantaneous pointer delta to inertial velocity while
    /// dragging.
    pub drag_velocity_scale: f64,
    /// Scale from wheel deltas to velocity impulses.
    pub wheel_scale: f64,
}

impl PanConfig {
    /// Frame duration the per-frame constants are tuned for (60 Hz).
    pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;

    /// Returns a copy with out-of-range values replaced by their defaults.
    ///
    /// `friction` must lie in `[0, 1)`, `smoothing` in `(0, 1]`, and the
    /// remaining values must be finite and non-negative.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let non_negative = |v: f64, fallback: f64| {
            if v.is_finite() && v >= 0.0 {
                v
            } else {
                fallback
            }
        };
        Self {
            friction: if (0.0..1.0).contains(&self.friction) {
                self.friction
            } else {
                defaults.friction
            },
            smoothing: if self.smoothing > 0.0 && self.smoothing <= 1.0 {
                self.smoothing
            } else {
                defaults.smoothing
            },
            velocity_epsilon: non_negative(self.velocity_epsilon, defaults.velocity_epsilon),
            settle_epsilon: non_negative(self.settle_epsilon, defaults.settle_epsilon),
            drag_velocity_scale: non_negative(
                self.drag_velocity_scale,
                defaults.drag_velocity_scale,
            ),
            wheel_scale: non_negative(self.wheel_scale, defaults.wheel_scale),
        }
    }
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            friction: 0.90,
            smoothing: 0.14,
            velocity_epsilon: 0.01,
            settle_epsilon: 1e-3,
            drag_velocity_scale: 0.8,
            wheel_scale: 0.018,
        }
    }
}
