// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer travel tracking with a movement threshold.
//!
//! [`DragState`] remembers where a press started and where the pointer was
//! last seen. Each [`DragState::update`] reports the step since the previous
//! position, the total offset from the start, and whether this step is the
//! one that first pushed the pointer past the threshold on either axis.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use strewn_gesture::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 20.0));
//!
//! // Within the 6px slop: not moved yet.
//! let step = drag.update(Point::new(14.0, 24.0), 6.0).unwrap();
//! assert_eq!(step.delta, Vec2::new(4.0, 4.0));
//! assert!(!step.crossed);
//!
//! // 7px on x: crosses the threshold exactly once.
//! let step = drag.update(Point::new(17.0, 20.0), 6.0).unwrap();
//! assert_eq!(step.offset, Vec2::new(7.0, 0.0));
//! assert!(step.crossed);
//! assert!(drag.has_moved());
//! ```

use kurbo::{Point, Vec2};

/// Result of feeding one position into a [`DragState`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragStep {
    /// Movement since the previous position.
    pub delta: Vec2,
    /// Movement since the press started.
    pub offset: Vec2,
    /// `true` only for the update that first exceeded the threshold.
    pub crossed: bool,
}

/// Tracks one press from start to release.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    start: Option<Point>,
    last: Option<Point>,
    moved: bool,
}

impl DragState {
    /// Starts tracking a press at `pos`, forgetting any previous one.
    pub fn start(&mut self, pos: Point) {
        self.start = Some(pos);
        self.last = Some(pos);
        self.moved = false;
    }

    /// Records `pos`, returning the step, or `None` when no press is active.
    ///
    /// The pointer counts as moved once `|dx| > threshold` or
    /// `|dy| > threshold` relative to the start position.
    pub fn update(&mut self, pos: Point, threshold: f64) -> Option<DragStep> {
        let start = self.start?;
        let last = self.last.unwrap_or(start);
        let offset = pos - start;
        let crossed = !self.moved && (offset.x.abs() > threshold || offset.y.abs() > threshold);
        self.moved |= crossed;
        self.last = Some(pos);
        Some(DragStep {
            delta: pos - last,
            offset,
            crossed,
        })
    }

    /// Offset of `pos` from the start position.
    #[must_use]
    pub fn total_offset(&self, pos: Point) -> Option<Vec2> {
        self.start.map(|start| pos - start)
    }

    /// Start position of the active press.
    #[must_use]
    pub fn start_pos(&self) -> Option<Point> {
        self.start
    }

    /// Last recorded position of the active press.
    #[must_use]
    pub fn last_pos(&self) -> Option<Point> {
        self.last
    }

    /// Returns `true` once the active press has crossed the threshold.
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Returns `true` while a press is tracked.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    /// Stops tracking.
    pub fn end(&mut self) {
        *self = Self::default();
    }
}
