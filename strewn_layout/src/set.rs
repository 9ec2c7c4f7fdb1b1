// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::Point;

/// Result of [`ExpandedSet::toggle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    /// The key was added.
    Expanded,
    /// The key was removed.
    Collapsed,
}

/// One row of the tray summarizing the expanded items.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrayEntry<K> {
    /// Expanded item.
    pub item: K,
    /// Its current world position; activating the entry centers the camera
    /// here.
    pub position: Point,
}

/// Ordered set of expanded items plus a revision counter.
///
/// Keys keep their expansion order and uniqueness is enforced by equality,
/// so `K` needs neither `Hash` nor `Ord`. The revision is bumped only when
/// membership actually changes, which lets a tray view skip rebuilding when
/// nothing happened.
#[derive(Clone, Debug, Default)]
pub struct ExpandedSet<K> {
    items: Vec<K>,
    revision: u64,
}

impl<K> ExpandedSet<K> {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            revision: 0,
        }
    }

    /// Returns `true` when nothing is expanded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of expanded items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Expanded items in expansion order.
    #[must_use]
    pub fn items(&self) -> &[K] {
        &self.items
    }

    /// Iterates in expansion order.
    pub fn iter(&self) -> core::slice::Iter<'_, K> {
        self.items.iter()
    }

    /// Membership revision.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Removes every key and returns them in expansion order.
    pub fn clear(&mut self) -> Vec<K> {
        if self.items.is_empty() {
            return Vec::new();
        }
        self.bump_revision();
        core::mem::take(&mut self.items)
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<K: PartialEq> ExpandedSet<K> {
    /// Returns `true` if `key` is expanded.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.items.contains(key)
    }

    /// Adds `key`; returns `false` if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.items.push(key);
        self.bump_revision();
        true
    }

    /// Removes `key`; returns `false` if it was not present.
    ///
    /// The remaining keys keep their relative order.
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(idx) = self.items.iter().position(|k| k == key) else {
            return false;
        };
        self.items.remove(idx);
        self.bump_revision();
        true
    }

    /// Adds `key` if absent, removes it if present.
    pub fn toggle(&mut self, key: K) -> Toggle {
        if self.remove(&key) {
            Toggle::Collapsed
        } else {
            self.insert(key);
            Toggle::Expanded
        }
    }
}

impl<K: Copy> ExpandedSet<K> {
    /// Builds the tray: one entry per expanded item, in expansion order.
    ///
    /// `position_of` resolves a key to its world position; keys it cannot
    /// resolve are left out.
    pub fn tray<F>(&self, mut position_of: F) -> Vec<TrayEntry<K>>
    where
        F: FnMut(K) -> Option<Point>,
    {
        self.items
            .iter()
            .filter_map(|&item| position_of(item).map(|position| TrayEntry { item, position }))
            .collect()
    }
}
