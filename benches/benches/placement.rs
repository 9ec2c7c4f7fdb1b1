// Copyright 2025 the Strewn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Size};
use strewn_grid::OccupancyGrid;
use strewn_world::{PlacementConfig, Placer, World};

fn identifiers(len: usize) -> Vec<String> {
    (0..len).map(|i| format!("/proxy?url=img{i}.png")).collect()
}

fn bench_place(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/place");

    // Later items see fuller cells and retry more often, so cost per item
    // rises with the batch size until placements start failing outright.
    for len in [28_usize, 280, 2_800] {
        let ids = identifiers(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &ids, |b, ids| {
            b.iter_batched(
                || {
                    (
                        World::new(Size::new(1600.0, 1000.0), 360.0, 240.0),
                        Placer::new(PlacementConfig::default(), 7),
                    )
                },
                |(mut world, mut placer)| {
                    for id in ids {
                        black_box(placer.place(&mut world, id, Point::ORIGIN));
                    }
                    world
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_duplicates(c: &mut Criterion) {
    let ids = identifiers(2_000);
    let mut world = World::new(Size::new(20_000.0, 20_000.0), 360.0, 240.0);
    let mut placer = Placer::new(PlacementConfig::default(), 7);
    for id in &ids {
        placer.place(&mut world, id, Point::ORIGIN);
    }

    c.bench_function("placement/duplicate_lookup", |b| {
        b.iter(|| {
            for id in ids.iter().step_by(17) {
                black_box(placer.place(&mut world, id, Point::ORIGIN));
            }
        });
    });
}

fn bench_grid_count(c: &mut Criterion) {
    let mut grid = OccupancyGrid::new(360.0);
    for i in 0..10_000_u32 {
        let f = f64::from(i);
        grid.increment(Point::new((f * 37.0) % 9_000.0 - 4_500.0, (f * 53.0) % 9_000.0 - 4_500.0));
    }
    let queries: Vec<Point> = (0..1_024_u32)
        .map(|i| Point::new(f64::from(i) * 11.0 - 5_000.0, f64::from(i) * 7.0 - 3_000.0))
        .collect();

    c.bench_function("grid/count", |b| {
        b.iter(|| {
            let mut sum = 0_u32;
            for p in &queries {
                sum += grid.count(*p);
            }
            black_box(sum)
        });
    });
}

criterion_group!(benches, bench_place, bench_duplicates, bench_grid_count);
criterion_main!(benches);
