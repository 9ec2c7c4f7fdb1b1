// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strewn Layout: local re-layout on a scattered plane.
//!
//! Nothing here owns items. Every function takes `(key, position)` pairs from
//! the caller and hands back new positions for the caller to write, so the
//! caller's position field stays the single source of truth.
//!
//! - [`Cluster`]: while an item is held, its first-found neighbors within a
//!   radius are arranged into a near-square grid centered on it, leaving the
//!   center cell to the held item. As the held item is dragged the grid
//!   follows, and [`Cluster::push`] moves non-members out of the way.
//! - [`push_outward`]: the radial push used by clusters, usable on its own.
//! - [`radial_spread`]: one-shot displacement of everything near a freshly
//!   expanded item out onto two alternating rings; nothing is pulled inward.
//! - [`ExpandedSet`]: which items are expanded, in order, plus the
//!   [`TrayEntry`] summary used to jump back to them.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use strewn_layout::{Cluster, ClusterConfig, ExpandedSet, Toggle};
//!
//! let items = [
//!     (0_u32, Point::new(0.0, 0.0)),
//!     (1, Point::new(50.0, 0.0)),
//!     (2, Point::new(0.0, 80.0)),
//!     (3, Point::new(5_000.0, 0.0)),
//! ];
//!
//! // Item 0 is held: 1 and 2 are close enough to join, 3 is not.
//! let cluster = Cluster::gather(0, items[0].1, items, &ClusterConfig::default());
//! assert_eq!(cluster.members(), &[1, 2]);
//! assert_eq!(cluster.slots().count(), 2);
//!
//! let mut expanded = ExpandedSet::new();
//! assert_eq!(expanded.toggle(2), Toggle::Expanded);
//! assert_eq!(expanded.toggle(2), Toggle::Collapsed);
//! assert!(expanded.is_empty());
//! ```
//!
//! Collapsing never restores positions moved by [`radial_spread`] or by a
//! cluster; the rearrangement is permanent.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cluster;
mod expand;
mod set;

pub use cluster::{Cluster, ClusterConfig, GridShape, push_outward};
pub use expand::{ExpandConfig, radial_spread};
pub use set::{ExpandedSet, Toggle, TrayEntry};
