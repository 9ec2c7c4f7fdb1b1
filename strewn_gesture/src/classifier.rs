// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;

use kurbo::{Point, Vec2};
use strewn_timing::Timer;

use crate::drag::DragState;

/// Thresholds for [`GestureClassifier`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// How long a press on an item must stay still to become a hold.
    pub long_press_ms: u64,
    /// Travel on either axis (in pixels) beyond which a press counts as moved.
    pub move_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_ms: 280,
            move_threshold: 6.0,
        }
    }
}

/// Host-assigned pointer identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// Where the classifier is within one press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureState<K> {
    /// No pointer captured.
    #[default]
    Idle,
    /// Pressed, not moved, long-press not yet elapsed.
    PanCandidate {
        /// Captured pointer.
        pointer: PointerId,
        /// Item under the press, if any.
        item: Option<K>,
    },
    /// Moved past the threshold before a hold started.
    Panning {
        /// Captured pointer.
        pointer: PointerId,
        /// Item under the press, if any.
        item: Option<K>,
    },
    /// The long-press elapsed on an item.
    ItemHeld {
        /// Captured pointer.
        pointer: PointerId,
        /// Held item.
        item: K,
        /// Whether the pointer moved past the threshold while holding.
        dragged: bool,
    },
}

impl<K> GestureState<K> {
    /// Captured pointer, if any.
    #[must_use]
    pub fn pointer(&self) -> Option<PointerId> {
        match self {
            Self::Idle => None,
            Self::PanCandidate { pointer, .. }
            | Self::Panning { pointer, .. }
            | Self::ItemHeld { pointer, .. } => Some(*pointer),
        }
    }

    /// Returns `true` when no pointer is captured.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// How a press ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOutcome<K> {
    /// The plane was panned (or the press was on empty space, or cancelled).
    Pan,
    /// Short stationary press on an item.
    Tap(K),
    /// Long press on an item, released without dragging.
    Hold(K),
    /// Long press on an item, then dragged.
    ItemDrag(K),
}

/// Classified events emitted by [`GestureClassifier`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent<K> {
    /// A press began; the host starts a camera drag.
    PanStart {
        /// Press position.
        at: Point,
        /// Item under the press, if any.
        item: Option<K>,
    },
    /// The pointer moved while panning (or still a candidate).
    PanMove {
        /// Current position.
        at: Point,
        /// Offset from the press position.
        offset: Vec2,
        /// Step since the previous position.
        delta: Vec2,
    },
    /// The long-press elapsed on `item`.
    HoldStart {
        /// Held item.
        item: K,
        /// Pointer position when the hold began.
        at: Point,
    },
    /// The pointer moved while holding an item.
    HoldMove {
        /// Held item.
        item: K,
        /// Current position.
        at: Point,
        /// Offset from the press position.
        offset: Vec2,
        /// Step since the previous position.
        delta: Vec2,
    },
    /// The press ended. Emitted exactly once per accepted press.
    End(GestureOutcome<K>),
}

/// Single-pointer pan / long-press / tap state machine.
///
/// Feed it raw pointer events plus the host time, and call
/// [`GestureClassifier::poll_timer`] every frame so the long-press can fire.
/// Transitions not described on each method are rejected and return `None`
/// without changing state.
#[derive(Clone, Debug)]
pub struct GestureClassifier<K> {
    config: GestureConfig,
    state: GestureState<K>,
    drag: DragState,
    long_press: Timer,
}

impl<K: Copy + PartialEq + Debug> GestureClassifier<K> {
    /// Creates an idle classifier.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: GestureState::Idle,
            drag: DragState::default(),
            long_press: Timer::new(),
        }
    }

    /// Returns the thresholds in use.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &GestureState<K> {
        &self.state
    }

    /// Returns the pending long-press deadline, so hosts that sleep between
    /// frames know when to wake up.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.long_press.deadline()
    }

    /// Last position recorded for the active press, or `None` while idle.
    #[must_use]
    pub fn last_position(&self) -> Option<Point> {
        self.drag.last_pos()
    }

    /// Press at `at` with `hit` as the item under the pointer.
    ///
    /// Accepted only while idle. Arms the long-press timer when `hit` is an
    /// item.
    pub fn pointer_down(
        &mut self,
        pointer: PointerId,
        at: Point,
        hit: Option<K>,
        now: u64,
    ) -> Option<GestureEvent<K>> {
        if !self.state.is_idle() {
            self.reject("pointer_down", pointer);
            return None;
        }
        self.drag.start(at);
        if hit.is_some() {
            self.long_press.arm(now, self.config.long_press_ms);
        }
        self.state = GestureState::PanCandidate { pointer, item: hit };
        Some(GestureEvent::PanStart { at, item: hit })
    }

    /// Moves the captured pointer to `at`.
    ///
    /// Crossing the movement threshold cancels the long-press; a candidate
    /// becomes a pan, a held item becomes dragged.
    pub fn pointer_move(&mut self, pointer: PointerId, at: Point) -> Option<GestureEvent<K>> {
        if self.state.pointer() != Some(pointer) {
            self.reject("pointer_move", pointer);
            return None;
        }
        let step = self.drag.update(at, self.config.move_threshold)?;
        if step.crossed {
            self.on_moved();
        }
        match self.state {
            GestureState::PanCandidate { .. } | GestureState::Panning { .. } => {
                Some(GestureEvent::PanMove {
                    at,
                    offset: step.offset,
                    delta: step.delta,
                })
            }
            GestureState::ItemHeld { item, .. } => Some(GestureEvent::HoldMove {
                item,
                at,
                offset: step.offset,
                delta: step.delta,
            }),
            GestureState::Idle => None,
        }
    }

    /// Fires the long-press if it is due at `now`.
    ///
    /// Only a stationary candidate on an item turns into a hold.
    pub fn poll_timer(&mut self, now: u64) -> Option<GestureEvent<K>> {
        if !self.long_press.fire_if_due(now) {
            return None;
        }
        match self.state {
            GestureState::PanCandidate {
                pointer,
                item: Some(item),
            } => {
                self.state = GestureState::ItemHeld {
                    pointer,
                    item,
                    dragged: false,
                };
                let at = self.drag.last_pos().unwrap_or(Point::ORIGIN);
                Some(GestureEvent::HoldStart { item, at })
            }
            _ => None,
        }
    }

    /// Releases the captured pointer at `at`.
    ///
    /// A long-press that is already due at `now` is honored first, so a host
    /// that polls late still classifies a hold.
    pub fn pointer_up(
        &mut self,
        pointer: PointerId,
        at: Point,
        now: u64,
    ) -> Option<GestureEvent<K>> {
        if self.state.pointer() != Some(pointer) {
            self.reject("pointer_up", pointer);
            return None;
        }
        if let Some(step) = self.drag.update(at, self.config.move_threshold) {
            if step.crossed {
                self.on_moved();
            }
        }
        // A due hold on release still emits no HoldStart; the outcome says it.
        if self.long_press.fire_if_due(now) {
            if let GestureState::PanCandidate {
                pointer,
                item: Some(item),
            } = self.state
            {
                self.state = GestureState::ItemHeld {
                    pointer,
                    item,
                    dragged: false,
                };
            }
        }
        let outcome = match self.state {
            GestureState::ItemHeld {
                item, dragged: true, ..
            } => GestureOutcome::ItemDrag(item),
            GestureState::ItemHeld { item, .. } => GestureOutcome::Hold(item),
            GestureState::PanCandidate {
                item: Some(item), ..
            } => GestureOutcome::Tap(item),
            _ => GestureOutcome::Pan,
        };
        self.finish();
        Some(GestureEvent::End(outcome))
    }

    /// Aborts the captured pointer (e.g. the platform stole it).
    ///
    /// Behaves like [`GestureClassifier::pointer_up`] except that a press
    /// never classifies as a tap.
    pub fn pointer_cancel(&mut self, pointer: PointerId) -> Option<GestureEvent<K>> {
        if self.state.pointer() != Some(pointer) {
            self.reject("pointer_cancel", pointer);
            return None;
        }
        let outcome = match self.state {
            GestureState::ItemHeld {
                item, dragged: true, ..
            } => GestureOutcome::ItemDrag(item),
            GestureState::ItemHeld { item, .. } => GestureOutcome::Hold(item),
            _ => GestureOutcome::Pan,
        };
        self.finish();
        Some(GestureEvent::End(outcome))
    }

    /// Drops any press without emitting an outcome.
    pub fn reset(&mut self) {
        self.finish();
    }

    fn on_moved(&mut self) {
        self.long_press.cancel();
        self.state = match self.state {
            GestureState::PanCandidate { pointer, item } => GestureState::Panning { pointer, item },
            GestureState::ItemHeld { pointer, item, .. } => GestureState::ItemHeld {
                pointer,
                item,
                dragged: true,
            },
            other => other,
        };
    }

    fn finish(&mut self) {
        self.long_press.cancel();
        self.drag.end();
        self.state = GestureState::Idle;
    }

    #[cfg_attr(
        not(feature = "tracing"),
        expect(unused_variables, reason = "only read when logging")
    )]
    fn reject(&self, event: &'static str, pointer: PointerId) {
        #[cfg(feature = "tracing")]
        tracing::debug!(event, ?pointer, state = ?self.state, "gesture transition rejected");
    }
}

impl<K: Copy + PartialEq + Debug> Default for GestureClassifier<K> {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
