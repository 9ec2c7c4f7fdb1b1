// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};
use strewn_timing::Interval;

/// Batch loading cadence and limits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// `limit` passed to the content source.
    pub request_limit: usize,
    /// Identifiers consumed from one response, duplicates included.
    pub max_per_batch: usize,
    /// Milliseconds between periodic loads.
    pub interval_ms: u64,
    /// Factor applied to the world bounds once per non-empty batch.
    pub growth: f64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            request_limit: 72,
            max_per_batch: 28,
            interval_ms: 9_000,
            growth: 1.06,
        }
    }
}

/// Proof that a batch load is in flight.
///
/// Only [`BatchLoader::begin`] creates tickets, and completing a load
/// consumes one, so a load cannot be finished twice.
#[derive(Debug)]
pub struct BatchTicket {
    serial: u64,
    limit: usize,
}

impl BatchTicket {
    /// Limit to request from the content source.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// What one completed batch did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Identifiers in the response.
    pub received: usize,
    /// Identifiers looked at (at most `max_per_batch`).
    pub consumed: usize,
    /// New items registered.
    pub placed: usize,
    /// Identifiers that were already placed.
    pub duplicates: usize,
    /// Identifiers dropped because every candidate cell was full.
    pub crowded: usize,
    /// Whether the world bounds grew.
    pub grew: bool,
}

/// Periodic, reentrancy-guarded batch scheduling.
#[derive(Clone, Debug)]
pub struct BatchLoader {
    config: LoaderConfig,
    interval: Interval,
    startup_pending: bool,
    in_flight: Option<u64>,
    serial: u64,
    completed: u64,
}

impl BatchLoader {
    /// Creates a stopped loader.
    #[must_use]
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            interval: Interval::new(config.interval_ms),
            startup_pending: false,
            in_flight: None,
            serial: 0,
            completed: 0,
        }
    }

    /// The loader configuration.
    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Starts the periodic schedule. The first [`BatchLoader::poll`] after
    /// starting reports a load as due immediately.
    pub fn start(&mut self, now: u64) {
        self.interval.start(now);
        self.startup_pending = true;
    }

    /// Stops the periodic schedule. A load already in flight may still
    /// complete.
    pub fn stop(&mut self) {
        self.interval.stop();
        self.startup_pending = false;
    }

    /// Returns `true` while the schedule runs.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.interval.is_running()
    }

    /// Returns `true` when a load should start at `now`.
    ///
    /// A period that elapses while a load is in flight is skipped rather than
    /// queued.
    pub fn poll(&mut self, now: u64) -> bool {
        let tick = self.interval.poll(now);
        let due = std::mem::take(&mut self.startup_pending) || tick;
        due && self.in_flight.is_none()
    }

    /// Begins a load, or returns `None` while another is in flight.
    pub fn begin(&mut self) -> Option<BatchTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        self.serial += 1;
        self.in_flight = Some(self.serial);
        Some(BatchTicket {
            serial: self.serial,
            limit: self.config.request_limit,
        })
    }

    /// Ends the load identified by `ticket`. Returns `false` for a ticket
    /// that does not belong to the current load.
    pub fn finish(&mut self, ticket: BatchTicket) -> bool {
        if self.in_flight != Some(ticket.serial) {
            return false;
        }
        self.in_flight = None;
        self.completed += 1;
        true
    }

    /// Returns `true` while a load is in flight.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Number of loads finished so far.
    #[must_use]
    pub fn completed(&self) -> u64 {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::{BatchLoader, LoaderConfig};

    #[test]
    fn startup_load_is_due_immediately_then_every_interval() {
        let mut loader = BatchLoader::new(LoaderConfig::default());
        assert!(!loader.poll(0));
        loader.start(1_000);
        assert!(loader.poll(1_000));
        assert!(!loader.poll(1_001));
        assert!(!loader.poll(9_999));
        assert!(loader.poll(10_000));
        loader.stop();
        assert!(!loader.poll(100_000));
    }

    #[test]
    fn only_one_load_in_flight() {
        let mut loader = BatchLoader::new(LoaderConfig::default());
        let ticket = loader.begin().unwrap();
        assert_eq!(ticket.limit(), 72);
        assert!(loader.begin().is_none());
        assert!(loader.finish(ticket));
        assert!(!loader.is_in_flight());
        assert_eq!(loader.completed(), 1);
        assert!(loader.begin().is_some());
    }

    #[test]
    fn ticks_during_a_load_are_skipped() {
        let mut loader = BatchLoader::new(LoaderConfig::default());
        loader.start(0);
        let ticket = loader.begin().unwrap();
        // Startup and the first tick both fall inside the load.
        assert!(!loader.poll(0));
        assert!(!loader.poll(9_000));
        loader.finish(ticket);
        assert!(!loader.poll(9_001));
        assert!(loader.poll(18_000));
    }

    #[test]
    fn foreign_ticket_is_refused() {
        let mut a = BatchLoader::new(LoaderConfig::default());
        let mut b = BatchLoader::new(LoaderConfig::default());
        let first = a.begin().unwrap();
        a.finish(first);
        a.begin().unwrap();
        let from_b = b.begin().unwrap();
        assert!(!a.finish(from_b));
        assert!(a.is_in_flight());
    }
}
