// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Geometry and limits for a hold [`Cluster`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClusterConfig {
    /// Items within this distance of the held item join the cluster.
    pub radius: f64,
    /// Maximum number of members (the held item is not counted).
    pub max_neighbors: usize,
    /// Edge length of one grid slot.
    pub cell_size: f64,
    /// Space between adjacent slots.
    pub gap: f64,
    /// Multiplier on `radius` for the push-away zone.
    pub exclusion_scale: f64,
    /// Fraction of the penetration depth applied per push.
    pub push_strength: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            radius: 420.0,
            max_neighbors: 12,
            cell_size: 180.0,
            gap: 14.0,
            exclusion_scale: 1.2,
            push_strength: 1.0,
        }
    }
}

/// Column and row counts of a cluster grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridShape {
    /// Number of columns.
    pub cols: usize,
    /// Number of rows.
    pub rows: usize,
}

impl GridShape {
    /// The most square grid holding `n` slots:
    /// `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)`.
    #[must_use]
    pub fn near_square(n: usize) -> Self {
        if n == 0 {
            return Self::default();
        }
        let mut cols = 1;
        while cols * cols < n {
            cols += 1;
        }
        Self {
            cols,
            rows: n.div_ceil(cols),
        }
    }

    /// Total number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cols * self.rows
    }

    /// Row-major index of the cell whose center is the grid center, if any.
    ///
    /// Only grids with an odd number of both columns and rows have one.
    #[must_use]
    pub fn center_cell(&self) -> Option<usize> {
        if self.cols % 2 == 1 && self.rows % 2 == 1 {
            Some((self.rows / 2) * self.cols + self.cols / 2)
        } else {
            None
        }
    }

    /// Shape for `n` members around a held item that keeps the center free.
    ///
    /// Same as [`near_square`](Self::near_square) unless that grid has a
    /// center cell and no spare slot, in which case one more slot is added.
    #[must_use]
    pub fn around_center(n: usize) -> Self {
        let shape = Self::near_square(n);
        if shape.center_cell().is_some() && shape.capacity() == n {
            Self::near_square(n + 1)
        } else {
            shape
        }
    }
}

/// Neighbors of a held item, arranged in a grid around it.
///
/// A cluster is transient: it is built when the long-press fires, recentered
/// while the held item is dragged, and dropped on release. The positions it
/// hands out are written back by the caller and simply stay where they are
/// once the cluster is gone.
#[derive(Clone, Debug)]
pub struct Cluster<K> {
    anchor: K,
    center: Point,
    members: SmallVec<[K; 12]>,
    shape: GridShape,
    pitch: f64,
    exclusion_radius: f64,
    push_strength: f64,
}

impl<K: Copy + PartialEq> Cluster<K> {
    /// Collects the neighbors of `anchor` located at `center`.
    ///
    /// `items` is scanned in order; an item joins when it is not the anchor,
    /// its position is finite, and it lies within `config.radius`. Scanning
    /// stops at `config.max_neighbors` members, so membership is first-found,
    /// not nearest-first.
    pub fn gather<I>(anchor: K, center: Point, items: I, config: &ClusterConfig) -> Self
    where
        I: IntoIterator<Item = (K, Point)>,
    {
        let members: SmallVec<[K; 12]> = items
            .into_iter()
            .filter(|(key, pos)| {
                *key != anchor
                    && pos.x.is_finite()
                    && pos.y.is_finite()
                    && pos.distance(center) <= config.radius
            })
            .map(|(key, _)| key)
            .take(config.max_neighbors)
            .collect();
        Self {
            anchor,
            center,
            shape: GridShape::around_center(members.len()),
            members,
            pitch: config.cell_size + config.gap,
            exclusion_radius: config.radius * config.exclusion_scale,
            push_strength: config.push_strength,
        }
    }

    /// The held item.
    #[must_use]
    pub fn anchor(&self) -> K {
        self.anchor
    }

    /// Current grid center.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Members in slot order.
    #[must_use]
    pub fn members(&self) -> &[K] {
        &self.members
    }

    /// Returns `true` when `key` is the anchor or a member.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        *key == self.anchor || self.members.contains(key)
    }

    /// Grid dimensions.
    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Distance between adjacent slot centers.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Radius of the zone non-members are pushed out of.
    #[must_use]
    pub fn exclusion_radius(&self) -> f64 {
        self.exclusion_radius
    }

    /// Moves the grid to `center`.
    pub fn recenter(&mut self, center: Point) {
        if center.x.is_finite() && center.y.is_finite() {
            self.center = center;
        }
    }

    /// Center of slot `index`, or `None` past the last member.
    ///
    /// Slots run row-major and skip the center cell, which belongs to the
    /// held item.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<Point> {
        if index >= self.members.len() {
            return None;
        }
        let cell = match self.shape.center_cell() {
            Some(center) if index >= center => index + 1,
            _ => index,
        };
        let col = (cell % self.shape.cols) as f64;
        let row = (cell / self.shape.cols) as f64;
        let half_w = (self.shape.cols - 1) as f64 * 0.5;
        let half_h = (self.shape.rows - 1) as f64 * 0.5;
        Some(self.center + Vec2::new((col - half_w) * self.pitch, (row - half_h) * self.pitch))
    }

    /// Each member paired with its slot center.
    pub fn slots(&self) -> impl Iterator<Item = (K, Point)> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter_map(|(index, key)| self.slot(index).map(|pos| (*key, pos)))
    }

    /// Where a non-member at `pos` should move to stay clear of the cluster,
    /// or `None` when it is already outside the exclusion zone.
    #[must_use]
    pub fn push(&self, pos: Point) -> Option<Point> {
        push_outward(self.center, self.exclusion_radius, self.push_strength, pos)
    }
}

/// Pushes `pos` radially away from `center` when it lies inside `radius`.
///
/// The displacement is `(radius - distance) * strength` along the bearing from
/// `center`. A point sitting on the center is pushed along `+x`. Returns `None`
/// when `pos` is outside the zone or not finite.
#[must_use]
pub fn push_outward(center: Point, radius: f64, strength: f64, pos: Point) -> Option<Point> {
    if !(pos.x.is_finite() && pos.y.is_finite()) {
        return None;
    }
    let offset = pos - center;
    let distance = offset.hypot();
    if distance >= radius {
        return None;
    }
    let bearing = if distance > f64::EPSILON {
        offset / distance
    } else {
        Vec2::new(1.0, 0.0)
    };
    Some(pos + bearing * ((radius - distance) * strength))
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Point;

    use super::{Cluster, ClusterConfig, GridShape, push_outward};

    #[test]
    fn near_square_shapes() {
        assert_eq!(GridShape::near_square(0), GridShape { cols: 0, rows: 0 });
        assert_eq!(GridShape::near_square(1), GridShape { cols: 1, rows: 1 });
        assert_eq!(GridShape::near_square(2), GridShape { cols: 2, rows: 1 });
        assert_eq!(GridShape::near_square(5), GridShape { cols: 3, rows: 2 });
        assert_eq!(GridShape::near_square(9), GridShape { cols: 3, rows: 3 });
        assert_eq!(GridShape::near_square(10), GridShape { cols: 4, rows: 3 });
        assert_eq!(GridShape::near_square(12).capacity(), 12);
    }

    #[test]
    fn gather_is_first_found_and_capped() {
        let config = ClusterConfig {
            max_neighbors: 2,
            ..ClusterConfig::default()
        };
        let items = [
            (0_u32, Point::new(0.0, 0.0)),
            (1, Point::new(400.0, 0.0)),
            (2, Point::new(1_000.0, 0.0)),
            (3, Point::new(10.0, 0.0)),
            (4, Point::new(5.0, 0.0)),
        ];
        let cluster = Cluster::gather(0, Point::ORIGIN, items, &config);
        // 4 is nearer than 1, but 1 and 3 were found first.
        assert_eq!(cluster.members(), &[1, 3]);
        assert!(cluster.contains(&0));
        assert!(!cluster.contains(&4));
    }

    #[test]
    fn radius_is_inclusive_and_non_finite_skipped() {
        let items = [
            (1_u32, Point::new(420.0, 0.0)),
            (2, Point::new(f64::NAN, 0.0)),
            (3, Point::new(420.1, 0.0)),
        ];
        let cluster = Cluster::gather(0, Point::ORIGIN, items, &ClusterConfig::default());
        assert_eq!(cluster.members(), &[1]);
    }

    #[test]
    fn slots_are_centered_on_the_center() {
        let items = (1..=4_u32).map(|k| (k, Point::new(f64::from(k), 0.0)));
        let mut cluster =
            Cluster::gather(0, Point::new(100.0, 100.0), items, &ClusterConfig::default());
        assert_eq!(cluster.shape(), GridShape { cols: 2, rows: 2 });
        let pitch = cluster.pitch();
        assert_eq!(pitch, 194.0);

        let slots: Vec<_> = cluster.slots().collect();
        assert_eq!(slots[0], (1, Point::new(100.0 - pitch / 2.0, 100.0 - pitch / 2.0)));
        assert_eq!(slots[3], (4, Point::new(100.0 + pitch / 2.0, 100.0 + pitch / 2.0)));
        assert_eq!(cluster.slot(4), None);

        cluster.recenter(Point::new(0.0, 0.0));
        assert_eq!(cluster.slot(0), Some(Point::new(-pitch / 2.0, -pitch / 2.0)));
    }

    #[test]
    fn single_member_sits_beside_the_anchor() {
        let cluster = Cluster::gather(
            0_u32,
            Point::new(7.0, 8.0),
            [(1, Point::new(9.0, 8.0))],
            &ClusterConfig::default(),
        );
        assert_eq!(cluster.shape(), GridShape { cols: 2, rows: 1 });
        assert_eq!(cluster.slot(0), Some(Point::new(7.0 - 97.0, 8.0)));
    }

    #[test]
    fn no_member_shares_the_anchor_position() {
        let center = Point::new(50.0, -20.0);
        for n in 1..=12_usize {
            let items = (1..=n).map(|k| (k, center));
            let cluster = Cluster::gather(0, center, items, &ClusterConfig::default());
            assert_eq!(cluster.slots().count(), n);
            for (key, pos) in cluster.slots() {
                assert!(pos.distance(center) > 1.0, "member {key} of {n} is on the anchor");
            }
        }
    }

    #[test]
    fn odd_grids_skip_the_center_cell() {
        assert_eq!(GridShape { cols: 3, rows: 3 }.center_cell(), Some(4));
        assert_eq!(GridShape { cols: 3, rows: 2 }.center_cell(), None);
        assert_eq!(GridShape::around_center(1), GridShape { cols: 2, rows: 1 });
        assert_eq!(GridShape::around_center(8), GridShape { cols: 3, rows: 3 });
        assert_eq!(GridShape::around_center(9), GridShape { cols: 4, rows: 3 });

        let items = (1..=8_u32).map(|k| (k, Point::ORIGIN));
        let cluster = Cluster::gather(0, Point::ORIGIN, items, &ClusterConfig::default());
        let slots: Vec<_> = cluster.slots().map(|(_, pos)| pos).collect();
        assert_eq!(slots[3], Point::new(-194.0, 0.0));
        assert_eq!(slots[4], Point::new(194.0, 0.0));
        assert_eq!(slots[7], Point::new(194.0, 194.0));
    }

    #[test]
    fn push_outward_moves_to_the_boundary_at_full_strength() {
        let pushed = push_outward(Point::ORIGIN, 100.0, 1.0, Point::new(30.0, 40.0)).unwrap();
        assert!((pushed.distance(Point::ORIGIN) - 100.0).abs() < 1e-9);
        assert!((pushed.x / pushed.y - 0.75).abs() < 1e-12);

        let half = push_outward(Point::ORIGIN, 100.0, 0.5, Point::new(50.0, 0.0)).unwrap();
        assert_eq!(half, Point::new(75.0, 0.0));

        assert_eq!(push_outward(Point::ORIGIN, 100.0, 1.0, Point::new(100.0, 0.0)), None);
        assert_eq!(
            push_outward(Point::ORIGIN, 100.0, 1.0, Point::ORIGIN),
            Some(Point::new(100.0, 0.0))
        );
    }

    #[test]
    fn cluster_push_uses_scaled_radius() {
        let cluster: Cluster<u32> = Cluster::gather(
            0,
            Point::ORIGIN,
            core::iter::empty(),
            &ClusterConfig::default(),
        );
        assert!((cluster.exclusion_radius() - 504.0).abs() < 1e-9);
        assert!(cluster.push(Point::new(450.0, 0.0)).is_some());
        assert!(cluster.push(Point::new(510.0, 0.0)).is_none());
    }
}
