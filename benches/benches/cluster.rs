// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Vec2};
use strewn_layout::{Cluster, ClusterConfig, ExpandConfig, radial_spread};

/// `len` items on a loose spiral around the origin.
fn scatter(len: usize) -> Vec<(u32, Point)> {
    (0..len)
        .map(|i| {
            let t = i as f64 * 0.37;
            let r = 20.0 * t;
            (i as u32, Point::new(r * t.cos(), r * t.sin()))
        })
        .collect()
}

fn bench_gather(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster/gather");
    let config = ClusterConfig::default();

    for len in [100_usize, 1_000, 10_000] {
        let items = scatter(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &items, |b, items| {
            b.iter(|| {
                let cluster = Cluster::gather(0, Point::ORIGIN, items.iter().copied(), &config);
                black_box(cluster.members().len())
            });
        });
    }

    group.finish();
}

fn bench_drag_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster/drag_frame");
    let config = ClusterConfig::default();

    // One hold-move: recenter, lay out members, push everyone else.
    for len in [1_000_usize, 10_000] {
        let items = scatter(len);
        let mut cluster = Cluster::gather(0, Point::ORIGIN, items.iter().copied(), &config);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &items, |b, items| {
            let mut step = 0.0;
            b.iter(|| {
                step += 1.0;
                cluster.recenter(Point::ORIGIN + Vec2::new(step % 300.0, 0.0));
                let slots = cluster.slots().count();
                let pushed = items
                    .iter()
                    .filter(|(key, _)| !cluster.contains(key))
                    .filter_map(|(_, pos)| cluster.push(*pos))
                    .count();
                black_box((slots, pushed))
            });
        });
    }

    group.finish();
}

fn bench_spread(c: &mut Criterion) {
    let items = scatter(5_000);
    let config = ExpandConfig::default();
    c.bench_function("expand/radial_spread", |b| {
        b.iter(|| black_box(radial_spread(Point::ORIGIN, items.iter().copied(), &config).len()));
    });
}

criterion_group!(benches, bench_gather, bench_drag_frame, bench_spread);
criterion_main!(benches);
