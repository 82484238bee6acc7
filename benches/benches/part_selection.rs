// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use gridlogic_part_selection::{any_overlap, iter_parts, PartSelection};
use gridlogic_vocabulary::Part;

fn dense_selection(ranges: usize) -> PartSelection {
    // Alternating selected/unselected cells of width 2.
    PartSelection::from_parts(
        (0..ranges).map(|i| Part::new((i * 4) as u16, (i * 4 + 2) as u16)),
    )
}

fn bench_add_part(c: &mut Criterion) {
    let mut group = c.benchmark_group("part_selection/add_part");

    for ranges in [4usize, 64, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(ranges), &ranges, |b, &ranges| {
            b.iter_batched(
                || dense_selection(ranges),
                |mut selection| {
                    // Bridges every existing range into one.
                    selection.add_part(Part::new(0, (ranges * 4) as u16));
                    black_box(selection);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_overlap_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("part_selection/any_overlap");

    for ranges in [4usize, 64, 1024] {
        let a = dense_selection(ranges);
        // Shifted by one cell: touches everywhere, overlaps nowhere.
        let b_sel = PartSelection::from_parts(
            (0..ranges).map(|i| Part::new((i * 4 + 2) as u16, (i * 4 + 4) as u16)),
        );
        group.bench_with_input(
            BenchmarkId::from_parameter(ranges),
            &(a, b_sel),
            |bencher, (a, b_sel)| {
                bencher.iter(|| black_box(any_overlap(a, b_sel)));
            },
        );
    }

    group.finish();
}

fn bench_iter_parts(c: &mut Criterion) {
    let mut group = c.benchmark_group("part_selection/iter_parts");

    for ranges in [4usize, 64, 1024] {
        let selection = dense_selection(ranges);
        let full = Part::new(0, (ranges * 4) as u16);
        group.bench_with_input(
            BenchmarkId::from_parameter(ranges),
            &selection,
            |bencher, selection| {
                bencher.iter(|| {
                    let mut cells = 0u32;
                    iter_parts(full, selection, |part, selected| {
                        if selected {
                            cells += u32::from(part.length());
                        }
                    });
                    black_box(cells)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_add_part, bench_overlap_queries, bench_iter_parts);
criterion_main!(benches);
