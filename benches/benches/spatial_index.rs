// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gridlogic_index::RTree;
use kurbo::Rect;

fn grid_tree(side: i32) -> RTree<i32> {
    let mut tree = RTree::new();
    for i in 0..side * side {
        let x = f64::from(i % side) * 3.0;
        let y = f64::from(i / side) * 3.0;
        tree.insert(Rect::new(x, y, x + 2.0, y + 2.0), i);
    }
    tree
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_index/build");

    for side in [8i32, 32, 96] {
        let count = side * side;
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &side, |b, &side| {
            b.iter(|| black_box(grid_tree(side)));
        });
    }

    group.finish();
}

fn bench_rect_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_index/query_rect");

    for side in [8i32, 32, 96] {
        let tree = grid_tree(side);
        let extent = f64::from(side) * 3.0;
        // A window covering roughly one ninth of the area.
        let window = Rect::new(extent / 3.0, extent / 3.0, extent * 2.0 / 3.0, extent * 2.0 / 3.0);

        group.bench_with_input(
            BenchmarkId::from_parameter(side * side),
            &tree,
            |b, tree| {
                b.iter(|| {
                    let mut hits = 0u32;
                    tree.visit_rect(window, |_, _| hits += 1);
                    black_box(hits)
                });
            },
        );
    }

    group.finish();
}

fn bench_point_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_index/query_point");

    for side in [8i32, 32, 96] {
        let tree = grid_tree(side);
        let center = f64::from(side) * 1.5;

        group.bench_with_input(
            BenchmarkId::from_parameter(side * side),
            &tree,
            |b, tree| {
                b.iter(|| {
                    let mut hits = 0u32;
                    tree.visit_point(center, center, |_, _| hits += 1);
                    black_box(hits)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_rect_query, bench_point_query);
criterion_main!(benches);
