// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size, Vec2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::item::ItemId;
use crate::world::World;

/// Parameters of the scatter placement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Occupancy cell edge.
    pub cell_size: f64,
    /// A candidate is rejected when its cell already holds this many items.
    pub max_per_cell: u32,
    /// Candidates tried per item before giving up.
    pub max_attempts: u32,
    /// Weight of the uniform world sample against the view center
    /// (`0.0` = always at the view center, `1.0` = uniform over the world).
    pub bias: f64,
    /// Half-width of the per-axis uniform jitter added to every candidate.
    pub jitter: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            cell_size: 360.0,
            max_per_cell: 6,
            max_attempts: 6,
            bias: 0.5,
            jitter: 600.0,
        }
    }
}

/// Outcome of [`Placer::place`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// A new item was registered.
    Placed(ItemId),
    /// The identifier was already placed as this item; nothing changed.
    Duplicate(ItemId),
    /// Every candidate landed in a full cell; nothing was registered.
    Crowded,
}

/// Scatters new items around the view center while bounding cell density.
#[derive(Clone, Debug)]
pub struct Placer {
    config: PlacementConfig,
    rng: SmallRng,
}

impl Placer {
    /// Creates a placer with a deterministic random stream.
    #[must_use]
    pub fn new(config: PlacementConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// The placement parameters.
    #[must_use]
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Draws one candidate position.
    ///
    /// `uniform(bounds) * bias + view_center * (1 - bias) + jitter`, where the
    /// uniform sample covers `bounds` centered on the origin. A non-finite
    /// result is replaced by the origin.
    pub fn candidate(&mut self, bounds: Size, view_center: Point) -> Point {
        let bias = self.config.bias;
        let uniform = Vec2::new(
            self.centered_sample(bounds.width),
            self.centered_sample(bounds.height),
        );
        let jitter_span = 2.0 * self.config.jitter;
        let jitter = Vec2::new(
            self.centered_sample(jitter_span),
            self.centered_sample(jitter_span),
        );
        let p = (uniform * bias + view_center.to_vec2() * (1.0 - bias) + jitter).to_point();
        if p.x.is_finite() && p.y.is_finite() {
            p
        } else {
            Point::ORIGIN
        }
    }

    /// Places `source` into `world`.
    ///
    /// Up to `max_attempts` candidates are drawn and the first one whose cell
    /// holds fewer than `max_per_cell` items is accepted. On acceptance the
    /// identifier is registered and the grid incremented; on any other
    /// outcome the world is left untouched.
    pub fn place(&mut self, world: &mut World, source: &str, view_center: Point) -> Placement {
        if let Some(existing) = world.lookup(source) {
            return Placement::Duplicate(existing);
        }
        for _ in 0..self.config.max_attempts {
            let candidate = self.candidate(world.bounds(), view_center);
            if world.grid().count(candidate) < self.config.max_per_cell {
                return Placement::Placed(world.insert(source, candidate));
            }
        }
        Placement::Crowded
    }

    /// Uniform in `[-extent / 2, extent / 2)`.
    fn centered_sample(&mut self, extent: f64) -> f64 {
        (self.rng.random::<f64>() - 0.5) * extent
    }
}
