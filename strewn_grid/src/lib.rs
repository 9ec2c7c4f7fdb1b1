// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strewn Grid: a coarse, append-only occupancy grid.
//!
//! When content streams into an unbounded plane, something has to stop new
//! items from piling up in the same spot. [`OccupancyGrid`] divides the plane
//! into square cells and counts how many items were *placed* in each one.
//! Placement code asks for the count of a candidate position's cell and
//! rejects the candidate when the cell is already busy.
//!
//! The grid deliberately models "this region has gotten busy" rather than
//! live density:
//! - There is no removal operation; counts only grow for the lifetime of the
//!   grid.
//! - Items that later move (drag, push-away, layout) are not re-hashed.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use strewn_grid::{CellKey, OccupancyGrid};
//!
//! let mut grid = OccupancyGrid::new(360.0);
//! assert_eq!(grid.count(Point::new(10.0, 10.0)), 0);
//!
//! grid.increment(Point::new(10.0, 10.0));
//! grid.increment(Point::new(350.0, 5.0));
//!
//! // Both points fall into the same 360x360 cell.
//! assert_eq!(grid.count(Point::new(200.0, 200.0)), 2);
//! assert_eq!(grid.cell_of(Point::new(-1.0, 0.0)), CellKey::new(-1, 0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect};

use hashbrown::HashMap;

/// Integer coordinates of one grid cell.
///
/// Cell `(ix, iy)` covers world positions with
/// `ix * cell_size <= x < (ix + 1) * cell_size`, and likewise for `y`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellKey {
    /// Column index (`floor(x / cell_size)`).
    pub ix: i64,
    /// Row index (`floor(y / cell_size)`).
    pub iy: i64,
}

impl CellKey {
    /// Creates a cell key from column and row indices.
    #[must_use]
    pub const fn new(ix: i64, iy: i64) -> Self {
        Self { ix, iy }
    }
}

/// Append-only per-cell item counter.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    cell_size: f64,
    counts: HashMap<CellKey, u32>,
    total: u64,
}

impl OccupancyGrid {
    /// Cell edge length used when none (or an unusable one) is given.
    pub const DEFAULT_CELL_SIZE: f64 = 360.0;

    /// Creates an empty grid with square cells of edge `cell_size`.
    ///
    /// A non-finite or non-positive size falls back to
    /// [`OccupancyGrid::DEFAULT_CELL_SIZE`].
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            Self::DEFAULT_CELL_SIZE
        };
        Self {
            cell_size,
            counts: HashMap::new(),
            total: 0,
        }
    }

    /// Returns the cell edge length.
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Returns the key of the cell containing `pos`.
    ///
    /// Non-finite coordinates hash to cell `(0, 0)`.
    #[must_use]
    pub fn cell_of(&self, pos: Point) -> CellKey {
        CellKey::new(self.axis_index(pos.x), self.axis_index(pos.y))
    }

    /// Returns the counter of the cell containing `pos`, or `0`.
    #[must_use]
    pub fn count(&self, pos: Point) -> u32 {
        self.count_cell(self.cell_of(pos))
    }

    /// Returns the counter of `key`, or `0`.
    #[must_use]
    pub fn count_cell(&self, key: CellKey) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Increments the counter of the cell containing `pos` and returns the
    /// new count.
    pub fn increment(&mut self, pos: Point) -> u32 {
        let key = self.cell_of(pos);
        let count = self.counts.entry(key).or_insert(0);
        *count = count.saturating_add(1);
        self.total += 1;
        *count
    }

    /// Number of cells with a non-zero count.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all counters (the number of successful increments).
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Highest counter over all cells, or `0` for an empty grid.
    #[must_use]
    pub fn max_count(&self) -> u32 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Iterates over occupied cells and their counts in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (CellKey, u32)> + '_ {
        self.counts.iter().map(|(key, count)| (*key, *count))
    }

    /// Returns the world-space rectangle covered by `key`.
    #[must_use]
    pub fn cell_rect(&self, key: CellKey) -> Rect {
        let x0 = key.ix as f64 * self.cell_size;
        let y0 = key.iy as f64 * self.cell_size;
        Rect::new(x0, y0, x0 + self.cell_size, y0 + self.cell_size)
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "float-to-int `as` saturates, which is the behavior we want at the extremes"
    )]
    fn axis_index(&self, v: f64) -> i64 {
        if !v.is_finite() {
            return 0;
        }
        (v / self.cell_size).floor() as i64
    }
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CELL_SIZE)
    }
}
