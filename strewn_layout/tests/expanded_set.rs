// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `ExpandedSet`: membership, ordering, revision, and the tray.

use kurbo::Point;
use strewn_layout::{ExpandedSet, Toggle, TrayEntry};

#[test]
fn empty_set_basics() {
    let set = ExpandedSet::<u32>::new();
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
    assert_eq!(set.revision(), 0);
    assert!(set.tray(|_| Some(Point::ORIGIN)).is_empty());
}

#[test]
fn toggle_twice_restores_membership() {
    let mut set = ExpandedSet::new();
    set.insert(1);
    let before: Vec<_> = set.items().to_vec();

    assert_eq!(set.toggle(2), Toggle::Expanded);
    assert!(set.contains(&2));
    assert_eq!(set.toggle(2), Toggle::Collapsed);

    assert_eq!(set.items(), before.as_slice());
    assert_eq!(set.revision(), 3);
}

#[test]
fn multiple_items_expand_independently_in_order() {
    let mut set = ExpandedSet::new();
    set.toggle(5);
    set.toggle(3);
    set.toggle(9);
    assert_eq!(set.items(), &[5, 3, 9]);

    set.toggle(3);
    assert_eq!(set.items(), &[5, 9]);
}

#[test]
fn noop_mutations_keep_revision() {
    let mut set = ExpandedSet::new();
    assert!(set.insert(1));
    assert!(!set.insert(1));
    assert!(!set.remove(&2));
    assert_eq!(set.revision(), 1);
}

#[test]
fn clear_drains_in_order_and_bumps_once() {
    let mut set = ExpandedSet::new();
    assert!(set.clear().is_empty());
    assert_eq!(set.revision(), 0);

    set.insert('a');
    set.insert('b');
    let drained = set.clear();
    assert_eq!(drained, vec!['a', 'b']);
    assert!(set.is_empty());
    assert_eq!(set.revision(), 3);
}

#[test]
fn tray_lists_expanded_items_with_positions() {
    let mut set = ExpandedSet::new();
    set.insert(10_u32);
    set.insert(20);
    set.insert(30);

    // 20 cannot be resolved and is left out.
    let tray = set.tray(|item| (item != 20).then_some(Point::new(f64::from(item), 0.0)));
    assert_eq!(
        tray,
        vec![
            TrayEntry {
                item: 10,
                position: Point::new(10.0, 0.0)
            },
            TrayEntry {
                item: 30,
                position: Point::new(30.0, 0.0)
            },
        ]
    );
}
