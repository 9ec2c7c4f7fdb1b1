// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Vec2};

use crate::item::Item;

/// Receiver of everything the engine wants drawn.
///
/// Rendering is a pure projection of the engine's state: implementations
/// get copies of positions and flags and never feed anything back.
pub trait Renderer {
    /// A new item was placed.
    fn attach(&mut self, item: &Item);

    /// An item's position or flags changed.
    fn reposition(&mut self, item: &Item);

    /// An item came near the viewport for the first time; start fetching
    /// its content.
    fn load_content(&mut self, item: &Item);

    /// The rendered pan offset for this frame.
    fn set_offset(&mut self, view: Vec2);
}

/// Renderer that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn attach(&mut self, _item: &Item) {}

    fn reposition(&mut self, _item: &Item) {}

    fn load_content(&mut self, _item: &Item) {}

    fn set_offset(&mut self, _view: Vec2) {}
}

/// Decides when items are close enough to the viewport to load.
///
/// Each item is reported once per session, the first time its square comes
/// within `margin` of the visible rectangle.
#[derive(Clone, Debug)]
pub struct LazyLoader {
    margin: f64,
    requested: Vec<bool>,
}

impl LazyLoader {
    /// Creates a loader with the given margin in world units.
    #[must_use]
    pub fn new(margin: f64) -> Self {
        Self {
            margin: if margin.is_finite() { margin.max(0.0) } else { 0.0 },
            requested: Vec::new(),
        }
    }

    /// The margin around the viewport.
    #[must_use]
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Returns `true` if `item` has already been reported.
    #[must_use]
    pub fn is_requested(&self, item: &Item) -> bool {
        self.requested.get(item.id().index()).copied().unwrap_or(false)
    }

    /// Reports every not-yet-requested item whose square of edge `extent`
    /// intersects `visible` grown by the margin. Returns how many were
    /// reported.
    pub fn scan<F>(&mut self, items: &[Item], visible: Rect, extent: f64, mut on_enter: F) -> usize
    where
        F: FnMut(&Item),
    {
        let needed = items.iter().map(|i| i.id().index() + 1).max().unwrap_or(0);
        if self.requested.len() < needed {
            self.requested.resize(needed, false);
        }
        let zone = visible.inflate(self.margin, self.margin);
        let mut reported = 0;
        for item in items {
            let Some(slot) = self.requested.get_mut(item.id().index()) else {
                continue;
            };
            if *slot || !overlaps(zone, item.bounds(extent)) {
                continue;
            }
            *slot = true;
            reported += 1;
            on_enter(item);
        }
        reported
    }
}

fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}
