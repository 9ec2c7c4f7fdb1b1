// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strewn Timing: host-agnostic timing primitives.
//!
//! Nothing in this crate reads a clock. Hosts pass the current time in
//! milliseconds (from `performance.now()`, an `Instant`, a test counter, ...)
//! and the primitives answer "is it due yet?".
//!
//! - [`Timer`]: a one-shot, cancellable deadline. Cancelling is idempotent:
//!   cancelling an already fired or already cancelled timer is a no-op.
//! - [`Interval`]: a fixed-period repeating trigger with no backoff.
//! - [`FrameLoop`]: an explicit start/stop lifecycle for a per-frame tick,
//!   replacing self-rescheduling frame callbacks.
//!
//! ## Minimal example
//!
//! ```rust
//! use strewn_timing::Timer;
//!
//! let mut long_press = Timer::new();
//! long_press.arm(1_000, 280);
//!
//! assert!(!long_press.fire_if_due(1_100));
//! assert!(long_press.fire_if_due(1_280));
//! // One-shot: it does not fire again.
//! assert!(!long_press.fire_if_due(2_000));
//! // Cancelling a fired timer is harmless.
//! assert!(!long_press.cancel());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

/// One-shot deadline measured in host milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<u64>,
}

impl Timer {
    /// Creates a disarmed timer.
    #[must_use]
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arms the timer to fire `delay` milliseconds after `now`.
    ///
    /// Re-arming replaces any pending deadline.
    pub fn arm(&mut self, now: u64, delay: u64) {
        self.deadline = Some(now.saturating_add(delay));
    }

    /// Disarms the timer, returning `true` if it was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Returns `true` while a deadline is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns the pending deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Milliseconds left until the deadline (`0` once due).
    #[must_use]
    pub fn remaining(&self, now: u64) -> Option<u64> {
        self.deadline.map(|d| d.saturating_sub(now))
    }

    /// Fires the timer if its deadline has passed.
    ///
    /// Returns `true` exactly once per arming; the timer is disarmed when it
    /// fires.
    pub fn fire_if_due(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Fixed-period repeating trigger.
///
/// After firing, the next deadline is `now + period`. Missed periods are not
/// replayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    period: u64,
    next: Option<u64>,
}

impl Interval {
    /// Creates a stopped interval with the given period in milliseconds.
    ///
    /// A zero period is treated as one millisecond.
    #[must_use]
    pub const fn new(period: u64) -> Self {
        Self {
            period: if period == 0 { 1 } else { period },
            next: None,
        }
    }

    /// Returns the period in milliseconds.
    #[must_use]
    pub fn period(&self) -> u64 {
        self.period
    }

    /// Starts (or restarts) the interval; the first trigger is one period
    /// after `now`.
    pub fn start(&mut self, now: u64) {
        self.next = Some(now.saturating_add(self.period));
    }

    /// Stops the interval. Stopping a stopped interval is a no-op.
    pub fn stop(&mut self) {
        self.next = None;
    }

    /// Returns `true` while the interval is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// The next trigger time, if running.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.next
    }

    /// Returns `true` if a trigger is due at `now`, scheduling the next one.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.next {
            Some(next) if now >= next => {
                self.next = Some(now.saturating_add(self.period));
                true
            }
            _ => false,
        }
    }
}

/// Information about one frame handed out by [`FrameLoop::begin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Zero-based frame counter since the loop was created.
    pub index: u64,
    /// Host time of this frame.
    pub now: u64,
    /// Milliseconds since the previous frame (`0` for the first one after a
    /// start).
    pub elapsed: u64,
}

/// Start/stop lifecycle for a repeating per-frame tick.
///
/// The host's scheduler (`requestAnimationFrame`, a winit redraw, a test
/// loop) calls [`FrameLoop::begin`] every time it would render. While the
/// loop is stopped, `begin` returns `None` and the caller skips the tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameLoop {
    running: bool,
    frames: u64,
    last: Option<u64>,
}

impl FrameLoop {
    /// Creates a stopped frame loop.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            running: false,
            frames: 0,
            last: None,
        }
    }

    /// Starts ticking. Starting a running loop is a no-op.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.last = None;
        }
    }

    /// Stops ticking. Stopping a stopped loop is a no-op.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Returns `true` while the loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of frames handed out so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Begins a frame at `now`, or returns `None` while stopped.
    pub fn begin(&mut self, now: u64) -> Option<Frame> {
        if !self.running {
            return None;
        }
        let elapsed = self.last.map_or(0, |last| now.saturating_sub(last));
        let frame = Frame {
            index: self.frames,
            now,
            elapsed,
        };
        self.frames += 1;
        self.last = Some(now);
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameLoop, Interval, Timer};

    #[test]
    fn timer_fires_once_at_deadline() {
        let mut t = Timer::new();
        t.arm(100, 280);
        assert_eq!(t.deadline(), Some(380));
        assert_eq!(t.remaining(200), Some(180));
        assert!(!t.fire_if_due(379));
        assert!(t.fire_if_due(380));
        assert!(!t.is_armed());
        assert!(!t.fire_if_due(10_000));
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut t = Timer::new();
        assert!(!t.cancel());
        t.arm(0, 10);
        assert!(t.cancel());
        assert!(!t.cancel());
        assert!(!t.fire_if_due(100));
    }

    #[test]
    fn rearm_replaces_deadline() {
        let mut t = Timer::new();
        t.arm(0, 100);
        t.arm(50, 100);
        assert!(!t.fire_if_due(100));
        assert!(t.fire_if_due(150));
    }

    #[test]
    fn interval_triggers_each_period_without_replay() {
        let mut iv = Interval::new(9_000);
        assert!(!iv.poll(100_000));
        iv.start(0);
        assert!(!iv.poll(8_999));
        assert!(iv.poll(9_000));
        assert_eq!(iv.next_due(), Some(18_000));
        // A long stall triggers once, not three times.
        assert!(iv.poll(40_000));
        assert!(!iv.poll(40_001));
        iv.stop();
        assert!(!iv.is_running());
        assert!(!iv.poll(1_000_000));
    }

    #[test]
    fn zero_period_is_clamped() {
        assert_eq!(Interval::new(0).period(), 1);
    }

    #[test]
    fn frame_loop_only_ticks_while_running() {
        let mut frames = FrameLoop::new();
        assert!(frames.begin(0).is_none());

        frames.start();
        let f0 = frames.begin(16).unwrap();
        assert_eq!((f0.index, f0.elapsed), (0, 0));
        let f1 = frames.begin(33).unwrap();
        assert_eq!((f1.index, f1.elapsed), (1, 17));

        frames.stop();
        assert!(frames.begin(50).is_none());
        assert_eq!(frames.frames(), 2);

        // Restarting does not count the paused time as elapsed.
        frames.start();
        let f2 = frames.begin(500).unwrap();
        assert_eq!((f2.index, f2.elapsed), (2, 0));
    }
}
