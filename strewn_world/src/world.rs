// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;
use kurbo::{Point, Size};
use strewn_grid::OccupancyGrid;

use crate::item::{Item, ItemFlags, ItemId};

/// Owner of every placed item, the used-identifier registry, and the
/// occupancy grid.
///
/// Positions stored here are the only source of truth; renderers receive
/// copies and nothing is ever read back from them.
#[derive(Clone, Debug)]
pub struct World {
    items: Vec<Item>,
    used: HashMap<String, ItemId>,
    grid: OccupancyGrid,
    bounds: Size,
    item_extent: f64,
}

impl World {
    /// Creates an empty world.
    ///
    /// `bounds` is the initial placement box (centered on the origin),
    /// `cell_size` the occupancy cell edge, `item_extent` the edge of the
    /// square each item occupies for hit testing.
    #[must_use]
    pub fn new(bounds: Size, cell_size: f64, item_extent: f64) -> Self {
        Self {
            items: Vec::new(),
            used: HashMap::new(),
            grid: OccupancyGrid::new(cell_size),
            bounds: sanitize_size(bounds),
            item_extent: if item_extent.is_finite() && item_extent > 0.0 {
                item_extent
            } else {
                0.0
            },
        }
    }

    /// Items in placement order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Looks up an item by handle.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.index())
    }

    /// Number of placed items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Handle of the item placed from `source`, if any.
    #[must_use]
    pub fn lookup(&self, source: &str) -> Option<ItemId> {
        self.used.get(source).copied()
    }

    /// The occupancy grid.
    #[must_use]
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Current placement box size.
    #[must_use]
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Edge of the square each item occupies.
    #[must_use]
    pub fn item_extent(&self) -> f64 {
        self.item_extent
    }

    /// Scales the placement box by `factor` on both axes.
    ///
    /// Non-finite or non-positive factors are ignored.
    pub fn grow(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.bounds = sanitize_size(self.bounds * factor);
        }
    }

    /// `(id, position)` of every item in placement order.
    pub fn positions(&self) -> impl Iterator<Item = (ItemId, Point)> + '_ {
        self.items.iter().map(|item| (item.id, item.position))
    }

    /// Registers a new item at `position` and counts it in the grid.
    ///
    /// The caller has already checked that `source` is unused.
    pub(crate) fn insert(&mut self, source: &str, position: Point) -> ItemId {
        let position = sanitize_point(position);
        let id = ItemId(u32::try_from(self.items.len()).unwrap_or(u32::MAX));
        self.grid.increment(position);
        self.used.insert(source.to_owned(), id);
        self.items.push(Item {
            id,
            source: source.to_owned(),
            position,
            flags: ItemFlags::empty(),
        });
        id
    }

    /// Moves an item. Non-finite positions land on the origin.
    ///
    /// The occupancy grid is not updated. Returns `false` for unknown handles.
    pub fn set_position(&mut self, id: ItemId, position: Point) -> bool {
        match self.items.get_mut(id.index()) {
            Some(item) => {
                item.position = sanitize_point(position);
                true
            }
            None => false,
        }
    }

    /// Sets `flags` on an item. Returns `false` for unknown handles.
    pub fn insert_flags(&mut self, id: ItemId, flags: ItemFlags) -> bool {
        self.update_flags(id, |f| f.insert(flags))
    }

    /// Clears `flags` on an item. Returns `false` for unknown handles.
    pub fn remove_flags(&mut self, id: ItemId, flags: ItemFlags) -> bool {
        self.update_flags(id, |f| f.remove(flags))
    }

    fn update_flags(&mut self, id: ItemId, f: impl FnOnce(&mut ItemFlags)) -> bool {
        match self.items.get_mut(id.index()) {
            Some(item) => {
                f(&mut item.flags);
                true
            }
            None => false,
        }
    }

    /// The item whose square contains `point`.
    ///
    /// Among overlapping items, topmost ones win, then the newest.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<ItemId> {
        self.items
            .iter()
            .filter(|item| item.bounds(self.item_extent).contains(point))
            .max_by_key(|item| (item.is_topmost(), item.id))
            .map(Item::id)
    }
}

pub(crate) fn sanitize_point(p: Point) -> Point {
    if p.x.is_finite() && p.y.is_finite() {
        p
    } else {
        Point::ORIGIN
    }
}

fn sanitize_size(s: Size) -> Size {
    Size::new(
        if s.width.is_finite() { s.width.max(0.0) } else { 0.0 },
        if s.height.is_finite() { s.height.max(0.0) } else { 0.0 },
    )
}
