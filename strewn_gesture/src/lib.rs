// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strewn Gesture: resolve a single pointer stream into pan, hold, or tap.
//!
//! One press on the plane can mean three things:
//! - **pan**: the pointer moves more than a few pixels before anything else
//!   happens, so the plane follows it;
//! - **hold**: the pointer stays on an item for the long-press duration, so
//!   the item is picked up (and may then be dragged);
//! - **tap**: the pointer is released on an item quickly and without moving.
//!
//! [`GestureClassifier`] is an explicit state machine over [`GestureState`].
//! Only one pointer is tracked at a time; events from any other pointer, and
//! any transition the machine does not describe, are rejected by returning
//! `None`. Every accepted press produces exactly one
//! [`GestureEvent::End`] carrying its [`GestureOutcome`].
//!
//! Time never comes from a clock: the host passes milliseconds into
//! [`GestureClassifier::pointer_down`], [`GestureClassifier::pointer_up`] and
//! [`GestureClassifier::poll_timer`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use strewn_gesture::{GestureClassifier, GestureEvent, GestureOutcome, PointerId};
//!
//! let mut gestures = GestureClassifier::<u32>::default();
//! let pointer = PointerId(1);
//!
//! // Press on item 42 and keep still for the long-press duration.
//! gestures.pointer_down(pointer, Point::new(100.0, 100.0), Some(42), 0);
//! let held = gestures.poll_timer(280);
//! assert!(matches!(held, Some(GestureEvent::HoldStart { item: 42, .. })));
//!
//! let end = gestures.pointer_up(pointer, Point::new(100.0, 100.0), 500);
//! assert_eq!(end, Some(GestureEvent::End(GestureOutcome::Hold(42))));
//! ```
//!
//! ## Features
//!
//! - `tracing`: log rejected transitions at debug level.
//! - `serde`: derive `Serialize`/`Deserialize` for [`GestureConfig`].
//!
//! This crate is `no_std`.

#![no_std]

mod classifier;
pub mod drag;

pub use classifier::{
    GestureClassifier, GestureConfig, GestureEvent, GestureOutcome, GestureState, PointerId,
};
