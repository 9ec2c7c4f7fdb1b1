// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strewn Camera: a headless pan controller for an unbounded 2D plane.
//!
//! [`Camera`] owns three offsets:
//! - `target`: where the user asked the plane to be (set by drags, wheel
//!   impulses via inertia, or recentering),
//! - `view`: what is actually rendered, smoothed toward `target`,
//! - `velocity`: inertial motion applied to `target` while nobody is dragging.
//!
//! Every frame the host calls [`Camera::tick`] (or [`Camera::advance`] with the
//! elapsed time) and then hands [`Camera::view`] to its renderer. Within a
//! tick, inertia integration always happens before smoothing.
//!
//! The projection convention places the world origin at the center of the
//! viewport and then translates everything by `view`:
//! `screen = viewport_center + world + view`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use strewn_camera::{Camera, PanConfig};
//!
//! let mut camera = Camera::new(PanConfig::default());
//!
//! // Drag the plane 100px to the right.
//! camera.begin_drag(Point::new(10.0, 10.0));
//! camera.drag_to(Point::new(110.0, 10.0));
//! camera.end_drag();
//! assert_eq!(camera.target().x, 100.0);
//!
//! // The rendered offset catches up over a few frames.
//! for _ in 0..200 {
//!     camera.tick();
//! }
//! assert!(camera.view().x >= 100.0);
//!
//! // World origin now sits 100px right of the viewport center (plus inertia).
//! let screen = camera.world_to_screen(Point::ORIGIN, Size::new(800.0, 600.0));
//! assert!(screen.x >= 500.0);
//! ```
//!
//! ## Design notes
//!
//! - Smoothing is exponential (`view += (target - view) * smoothing`), not a
//!   spring: with `0 < smoothing < 1` the remaining distance shrinks
//!   geometrically and never overshoots.
//! - Wheel input adds an impulse to `velocity`, never to `target` directly.
//! - There is no zoom; items are laid out at a fixed pixel scale.
//!
//! This crate is `no_std`.

#![no_std]

mod camera;
mod config;

pub use camera::{Camera, CameraDebugInfo};
pub use config::PanConfig;
