// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sin`, `cos`
use kurbo::{Point, Vec2};

/// Distances used when an item is expanded.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExpandConfig {
    /// Items within this distance of the focused item are displaced.
    pub radius: f64,
    /// Ring distance for even-indexed displaced items.
    pub near_ring: f64,
    /// Ring distance for odd-indexed displaced items.
    pub far_ring: f64,
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            radius: 480.0,
            near_ring: 340.0,
            far_ring: 500.0,
        }
    }
}

/// Angle step for items sitting exactly on the focus (the golden angle).
const FALLBACK_ANGLE_STEP: f64 = 2.399_963_229_728_653;

/// One-shot radial layout around an expanded item at `focus`.
///
/// Every candidate within `config.radius` moves out to
/// `focus + bearing * ring`, where `bearing` is its unit direction from
/// `focus` and `ring` alternates between `near_ring` and `far_ring` by the
/// candidate's index among the displaced items. A candidate never moves
/// inward: one already at or past its ring keeps its position and is left
/// out of the result, though it still counts toward the alternation.
/// Candidates outside the radius, or with non-finite positions, are left
/// alone and not counted.
///
/// The caller filters out the focused item and any item that must not move
/// (for example, other expanded items).
pub fn radial_spread<K, I>(focus: Point, candidates: I, config: &ExpandConfig) -> Vec<(K, Point)>
where
    I: IntoIterator<Item = (K, Point)>,
{
    candidates
        .into_iter()
        .filter(|(_, pos)| {
            pos.x.is_finite() && pos.y.is_finite() && pos.distance(focus) <= config.radius
        })
        .enumerate()
        .filter_map(|(index, (key, pos))| {
            let ring = if index % 2 == 0 {
                config.near_ring
            } else {
                config.far_ring
            };
            if pos.distance(focus) >= ring {
                return None;
            }
            Some((key, focus + bearing(focus, pos, index) * ring))
        })
        .collect()
}

fn bearing(focus: Point, pos: Point, index: usize) -> Vec2 {
    let offset = pos - focus;
    let distance = offset.hypot();
    if distance > f64::EPSILON {
        offset / distance
    } else {
        let angle = index as f64 * FALLBACK_ANGLE_STEP;
        Vec2::new(angle.cos(), angle.sin())
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{ExpandConfig, radial_spread};

    #[test]
    fn rings_alternate_by_displaced_index() {
        let config = ExpandConfig::default();
        let focus = Point::new(100.0, 100.0);
        let moved = radial_spread(
            focus,
            [
                ('a', Point::new(110.0, 100.0)),
                // Out of range: neither moved nor counted.
                ('b', Point::new(900.0, 100.0)),
                ('c', Point::new(100.0, 50.0)),
                ('d', Point::new(90.0, 100.0)),
            ],
            &config,
        );
        assert_eq!(moved.len(), 3);
        assert_eq!(moved[0], ('a', Point::new(440.0, 100.0)));
        assert_eq!(moved[1], ('c', Point::new(100.0, -400.0)));
        assert_eq!(moved[2], ('d', Point::new(-240.0, 100.0)));
    }

    #[test]
    fn coincident_items_still_get_distinct_directions() {
        let focus = Point::new(0.0, 0.0);
        let moved = radial_spread(focus, [(1, focus), (2, focus)], &ExpandConfig::default());
        assert_eq!(moved.len(), 2);
        assert!((moved[0].1.distance(focus) - 340.0).abs() < 1e-9);
        assert!((moved[1].1.distance(focus) - 500.0).abs() < 1e-9);
        assert!(moved[0].1 != moved[1].1);
    }

    #[test]
    fn items_past_their_ring_are_never_pulled_inward() {
        let focus = Point::ORIGIN;
        let moved = radial_spread(
            focus,
            [
                // Near ring, already farther out: stays put.
                ('a', Point::new(450.0, 0.0)),
                // Far ring, still inside it: pushed out to 500.
                ('b', Point::new(0.0, 450.0)),
                ('c', Point::new(-100.0, 0.0)),
            ],
            &ExpandConfig::default(),
        );
        assert_eq!(moved, [('b', Point::new(0.0, 500.0)), ('c', Point::new(-340.0, 0.0))]);
    }

    #[test]
    fn non_finite_candidates_are_skipped() {
        let moved = radial_spread(
            Point::ORIGIN,
            [(1, Point::new(f64::INFINITY, 0.0))],
            &ExpandConfig::default(),
        );
        assert!(moved.is_empty());
    }
}
