// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `powf`
use kurbo::{Point, Rect, Size, Vec2};

use crate::config::PanConfig;

/// Anchor captured when a drag begins.
#[derive(Clone, Copy, Debug)]
struct DragAnchor {
    start_target: Vec2,
    start_pointer: Point,
    last_pointer: Point,
}

/// Pan camera with inertia and exponential smoothing.
///
/// `Camera` tracks:
/// - the desired pan offset (`target`),
/// - the rendered pan offset (`view`), smoothed toward `target` every tick,
/// - the inertial `velocity` that keeps moving `target` after a drag ends.
///
/// While a drag is active the camera is *manipulated*: ticks only smooth, they
/// never integrate velocity.
#[derive(Clone, Debug)]
pub struct Camera {
    config: PanConfig,
    target: Vec2,
    view: Vec2,
    velocity: Vec2,
    drag: Option<DragAnchor>,
}

impl Camera {
    /// Creates a camera at rest at the origin.
    ///
    /// The configuration is [sanitized](PanConfig::sanitized) first.
    #[must_use]
    pub fn new(config: PanConfig) -> Self {
        Self {
            config: config.sanitized(),
            target: Vec2::ZERO,
            view: Vec2::ZERO,
            velocity: Vec2::ZERO,
            drag: None,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &PanConfig {
        &self.config
    }

    /// Replaces the configuration (sanitized). Offsets are kept.
    pub fn set_config(&mut self, config: PanConfig) {
        self.config = config.sanitized();
    }

    /// Desired pan offset.
    #[must_use]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Rendered pan offset.
    #[must_use]
    pub fn view(&self) -> Vec2 {
        self.view
    }

    /// Current inertial velocity in pixels per reference frame.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_manipulating(&self) -> bool {
        self.drag.is_some()
    }

    /// World point currently under the viewport center when `view` catches up
    /// with `target`.
    ///
    /// New content is biased toward this point.
    #[must_use]
    pub fn focus_point(&self) -> Point {
        (-self.target).to_point()
    }

    /// Returns `true` when there is no velocity and `view` has reached
    /// `target`.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.velocity == Vec2::ZERO && self.view == self.target
    }

    /// Advances one reference frame.
    ///
    /// Returns `true` while the camera is still moving, so the host knows
    /// whether another frame is needed.
    pub fn tick(&mut self) -> bool {
        if self.drag.is_none() {
            self.target += self.velocity;
            self.velocity *= self.config.friction;
            self.snap_velocity();
        }
        self.smooth(self.config.smoothing);
        !self.is_settled()
    }

    /// Advances by `elapsed_ms` of wall time.
    ///
    /// The per-frame constants are rescaled to the elapsed duration, so the
    /// motion is independent of the host's frame rate. An elapsed time equal
    /// to [`PanConfig::REFERENCE_FRAME_MS`] behaves exactly like
    /// [`Camera::tick`].
    pub fn advance(&mut self, elapsed_ms: f64) -> bool {
        if !(elapsed_ms.is_finite() && elapsed_ms > 0.0) {
            return self.tick();
        }
        let frames = elapsed_ms / PanConfig::REFERENCE_FRAME_MS;
        if self.drag.is_none() {
            self.target += self.velocity * frames;
            self.velocity *= self.config.friction.powf(frames);
            self.snap_velocity();
        }
        let remaining = (1.0 - self.config.smoothing).powf(frames);
        self.smooth(1.0 - remaining);
        !self.is_settled()
    }

    /// Starts a drag at `pointer` (screen coordinates).
    ///
    /// Captures the current target as the drag anchor and zeroes velocity.
    pub fn begin_drag(&mut self, pointer: Point) {
        self.velocity = Vec2::ZERO;
        self.drag = Some(DragAnchor {
            start_target: self.target,
            start_pointer: pointer,
            last_pointer: pointer,
        });
    }

    /// Moves the drag to `pointer`.
    ///
    /// The target follows the pointer's total displacement; velocity is
    /// re-derived from the instantaneous delta so that releasing mid-motion
    /// continues as inertia. Ignored when no drag is active.
    pub fn drag_to(&mut self, pointer: Point) {
        let Some(anchor) = self.drag.as_mut() else {
            return;
        };
        self.target = anchor.start_target + (pointer - anchor.start_pointer);
        self.velocity = (pointer - anchor.last_pointer) * self.config.drag_velocity_scale;
        anchor.last_pointer = pointer;
    }

    /// Ends the drag and lets the current velocity carry on as inertia.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Ends the drag without inertia.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
        self.velocity = Vec2::ZERO;
    }

    /// Zeroes velocity without ending an active drag.
    pub fn halt(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    /// Adds a wheel impulse to velocity.
    ///
    /// With `remap_vertical` (typically while Shift is held), the vertical
    /// wheel delta replaces the horizontal one and still drives vertical
    /// motion as well.
    pub fn wheel(&mut self, delta: Vec2, remap_vertical: bool) {
        let scale = self.config.wheel_scale;
        let impulse = if remap_vertical {
            Vec2::new(delta.y, delta.y)
        } else {
            delta
        };
        if impulse.x.is_finite() && impulse.y.is_finite() {
            self.velocity -= impulse * scale;
        }
    }

    /// Resets target and velocity to zero; `view` animates back over the
    /// following ticks.
    pub fn recenter(&mut self) {
        self.target = Vec2::ZERO;
        self.velocity = Vec2::ZERO;
    }

    /// Pans so that `world` ends up at the viewport center, animated.
    pub fn center_on(&mut self, world: Point) {
        if world.x.is_finite() && world.y.is_finite() {
            self.target = -world.to_vec2();
            self.velocity = Vec2::ZERO;
        }
    }

    /// Projects a world-space point into screen space for a viewport of
    /// `viewport` size, using the rendered offset.
    #[must_use]
    pub fn world_to_screen(&self, world: Point, viewport: Size) -> Point {
        viewport.to_rect().center() + world.to_vec2() + self.view
    }

    /// Inverse of [`Camera::world_to_screen`].
    #[must_use]
    pub fn screen_to_world(&self, screen: Point, viewport: Size) -> Point {
        screen - viewport.to_rect().center().to_vec2() - self.view
    }

    /// World-space rectangle currently covered by a viewport of `viewport`
    /// size.
    #[must_use]
    pub fn visible_world_rect(&self, viewport: Size) -> Rect {
        let origin = self.screen_to_world(Point::ORIGIN, viewport);
        Rect::from_origin_size(origin, viewport)
    }

    /// Snapshot of the current camera state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> CameraDebugInfo {
        CameraDebugInfo {
            target: self.target,
            view: self.view,
            velocity: self.velocity,
            manipulating: self.is_manipulating(),
            settled: self.is_settled(),
        }
    }

    fn snap_velocity(&mut self) {
        let eps = self.config.velocity_epsilon;
        if self.velocity.x.abs() < eps {
            self.velocity.x = 0.0;
        }
        if self.velocity.y.abs() < eps {
            self.velocity.y = 0.0;
        }
    }

    fn smooth(&mut self, factor: f64) {
        let delta = self.target - self.view;
        if delta.hypot() <= self.config.settle_epsilon {
            self.view = self.target;
        } else {
            self.view += delta * factor;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(PanConfig::default())
    }
}

/// Debug snapshot of a [`Camera`].
#[derive(Clone, Copy, Debug)]
pub struct CameraDebugInfo {
    /// Desired pan offset.
    pub target: Vec2,
    /// Rendered pan offset.
    pub view: Vec2,
    /// Inertial velocity.
    pub velocity: Vec2,
    /// Whether a drag is active.
    pub manipulating: bool,
    /// Whether the camera is at rest.
    pub settled: bool,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::Camera;
    use crate::PanConfig;

    #[test]
    fn smoothing_converges_without_overshoot() {
        let mut cam = Camera::default();
        cam.center_on(Point::new(-300.0, 120.0));
        let target = cam.target();

        let mut last = (target - cam.view()).hypot();
        let mut ticks = 0;
        while cam.tick() {
            let remaining = (target - cam.view()).hypot();
            assert!(remaining < last, "distance must strictly shrink");
            // Never past the target on either axis.
            assert!(cam.view().x <= target.x);
            assert!(cam.view().y >= target.y);
            last = remaining;
            ticks += 1;
            assert!(ticks < 10_000, "smoothing must settle in finite ticks");
        }
        assert_eq!(cam.view(), target);
    }

    #[test]
    fn inertia_decays_and_snaps_to_zero() {
        let mut cam = Camera::default();
        cam.wheel(Vec2::new(-100.0, 50.0), false);
        let v0 = cam.velocity();
        assert!(v0.x > 0.0 && v0.y < 0.0);

        cam.tick();
        assert!((cam.velocity().x - v0.x * 0.9).abs() < 1e-12);
        assert_eq!(cam.target(), v0);

        for _ in 0..500 {
            cam.tick();
        }
        assert_eq!(cam.velocity(), Vec2::ZERO);
        assert!(cam.is_settled());
    }

    #[test]
    fn drag_follows_total_offset_and_derives_velocity_from_last_delta() {
        let mut cam = Camera::default();
        cam.begin_drag(Point::new(100.0, 100.0));
        cam.drag_to(Point::new(130.0, 90.0));
        cam.drag_to(Point::new(140.0, 90.0));

        assert_eq!(cam.target(), Vec2::new(40.0, -10.0));
        assert_eq!(cam.velocity(), Vec2::new(10.0 * 0.8, 0.0));

        // Ticks while dragging never integrate velocity.
        cam.tick();
        assert_eq!(cam.target(), Vec2::new(40.0, -10.0));

        cam.end_drag();
        cam.tick();
        assert_eq!(cam.target(), Vec2::new(48.0, -10.0));
    }

    #[test]
    fn begin_drag_zeroes_inertia_and_cancel_drops_it() {
        let mut cam = Camera::default();
        cam.wheel(Vec2::new(500.0, 0.0), false);
        cam.begin_drag(Point::ORIGIN);
        assert_eq!(cam.velocity(), Vec2::ZERO);
        cam.drag_to(Point::new(20.0, 0.0));
        cam.cancel_drag();
        assert_eq!(cam.velocity(), Vec2::ZERO);
        assert!(!cam.is_manipulating());
    }

    #[test]
    fn drag_to_without_begin_is_ignored() {
        let mut cam = Camera::default();
        cam.drag_to(Point::new(50.0, 50.0));
        assert_eq!(cam.target(), Vec2::ZERO);
    }

    #[test]
    fn wheel_remap_copies_vertical_delta_to_horizontal_axis() {
        let mut cam = Camera::default();
        cam.wheel(Vec2::new(0.0, 100.0), true);
        assert_eq!(cam.velocity(), Vec2::new(-100.0 * 0.018, -100.0 * 0.018));

        // The horizontal delta is ignored while remapping.
        let mut cam = Camera::default();
        cam.wheel(Vec2::new(40.0, -50.0), true);
        assert_eq!(cam.velocity(), Vec2::new(50.0 * 0.018, 50.0 * 0.018));
    }

    #[test]
    fn recenter_animates_back_without_snapping() {
        let mut cam = Camera::default();
        cam.center_on(Point::new(500.0, 0.0));
        for _ in 0..400 {
            cam.tick();
        }
        assert_eq!(cam.view(), Vec2::new(-500.0, 0.0));

        cam.recenter();
        assert_eq!(cam.target(), Vec2::ZERO);
        cam.tick();
        assert!(cam.view().x < 0.0 && cam.view().x > -500.0);
    }

    #[test]
    fn advance_with_reference_frame_matches_tick() {
        let mut a = Camera::default();
        let mut b = Camera::default();
        a.wheel(Vec2::new(200.0, -80.0), false);
        b.wheel(Vec2::new(200.0, -80.0), false);
        for _ in 0..30 {
            a.tick();
            b.advance(PanConfig::REFERENCE_FRAME_MS);
        }
        assert!((a.view() - b.view()).hypot() < 1e-6);
        assert!((a.target() - b.target()).hypot() < 1e-6);
    }

    #[test]
    fn projection_roundtrip_and_visible_rect() {
        let mut cam = Camera::default();
        cam.center_on(Point::new(100.0, 50.0));
        for _ in 0..400 {
            cam.tick();
        }
        let viewport = Size::new(800.0, 600.0);

        // The focused world point sits at the viewport center.
        let center = cam.world_to_screen(Point::new(100.0, 50.0), viewport);
        assert!((center.x - 400.0).abs() < 1e-9);
        assert!((center.y - 300.0).abs() < 1e-9);

        let world = Point::new(-42.0, 17.5);
        let back = cam.screen_to_world(cam.world_to_screen(world, viewport), viewport);
        assert!((back - world).hypot() < 1e-9);

        let visible = cam.visible_world_rect(viewport);
        assert!(visible.contains(Point::new(100.0, 50.0)));
        assert_eq!(visible.size(), viewport);
    }
}
