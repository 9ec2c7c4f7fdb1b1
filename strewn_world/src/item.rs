// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placed items: identifiers, flags, and the item record itself.

use kurbo::{Point, Rect};

/// Dense handle of a placed item.
///
/// Handles are assigned in placement order and never reused: items live for
/// the whole session. Later handles are "newer" and win hit-test ties.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) u32);

impl ItemId {
    /// Position of the item in [`World::items`](crate::World::items).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Interaction state of an item.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ItemFlags: u8 {
        /// Picked up by a long-press; a cluster is built around it.
        const HELD     = 0b0000_0001;
        /// Toggled open by a tap.
        const EXPANDED = 0b0000_0010;
        /// Drawn above everything else and preferred by hit testing.
        const TOPMOST  = 0b0000_0100;
    }
}

/// One placed piece of content.
#[derive(Clone, Debug)]
pub struct Item {
    pub(crate) id: ItemId,
    pub(crate) source: String,
    pub(crate) position: Point,
    pub(crate) flags: ItemFlags,
}

impl Item {
    /// The item's handle.
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// The identifier (URL) the item was placed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Center of the item in world coordinates.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current flags.
    #[must_use]
    pub fn flags(&self) -> ItemFlags {
        self.flags
    }

    /// Shorthand for `flags().contains(ItemFlags::HELD)`.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.flags.contains(ItemFlags::HELD)
    }

    /// Shorthand for `flags().contains(ItemFlags::EXPANDED)`.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.flags.contains(ItemFlags::EXPANDED)
    }

    /// Shorthand for `flags().contains(ItemFlags::TOPMOST)`.
    #[must_use]
    pub fn is_topmost(&self) -> bool {
        self.flags.contains(ItemFlags::TOPMOST)
    }

    /// World-space square of edge `extent` centered on the item.
    #[must_use]
    pub fn bounds(&self, extent: f64) -> Rect {
        Rect::from_center_size(self.position, (extent, extent))
    }
}
