// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the set-style predicates and the two cover iterators.

use gridlogic_part_selection::{
    any_overlap, are_disjoint, iter_overlapping_parts, iter_parts, part_inside_selection,
    part_overlaps_any, PartSelection,
};
use gridlogic_vocabulary::Part;

fn selection(parts: impl IntoIterator<Item = (u16, u16)>) -> PartSelection {
    PartSelection::from_parts(parts.into_iter().map(|(b, e)| Part::new(b, e)))
}

#[test]
fn part_inside_empty_selection() {
    assert!(!part_inside_selection(Part::new(15, 20), &selection([])));
}

#[test]
fn part_inside_single_range() {
    let part = Part::new(15, 20);

    assert!(!part_inside_selection(part, &selection([(10, 17)])));
    assert!(!part_inside_selection(part, &selection([(12, 17)])));
    assert!(!part_inside_selection(part, &selection([(17, 25)])));
    assert!(part_inside_selection(part, &selection([(10, 20)])));
    assert!(part_inside_selection(part, &selection([(15, 20)])));
    assert!(!part_inside_selection(part, &selection([(17, 20)])));
    assert!(part_inside_selection(part, &selection([(5, 30)])));
}

#[test]
fn part_inside_needs_one_covering_range() {
    let part = Part::new(15, 20);

    // Two disjoint ranges covering the ends do not contain the part.
    assert!(!part_inside_selection(part, &selection([(15, 17), (18, 20)])));
    assert!(part_inside_selection(part, &selection([(5, 10), (15, 20)])));
    assert!(part_inside_selection(part, &selection([(5, 10), (13, 24)])));
}

#[test]
fn part_overlap_with_empty_selection() {
    assert!(!part_overlaps_any(Part::new(15, 20), &selection([])));
}

#[test]
fn part_overlap_with_single_part() {
    let sel = selection([(5, 10)]);

    assert!(part_overlaps_any(Part::new(3, 6), &sel));
    assert!(part_overlaps_any(Part::new(5, 10), &sel));
    assert!(part_overlaps_any(Part::new(6, 10), &sel));
    assert!(part_overlaps_any(Part::new(5, 9), &sel));
    assert!(part_overlaps_any(Part::new(6, 9), &sel));
    assert!(part_overlaps_any(Part::new(9, 15), &sel));

    assert!(!part_overlaps_any(Part::new(0, 5), &sel));
    assert!(!part_overlaps_any(Part::new(0, 4), &sel));
    assert!(!part_overlaps_any(Part::new(10, 15), &sel));
    assert!(!part_overlaps_any(Part::new(15, 20), &sel));
}

#[test]
fn part_overlap_with_multiple_parts() {
    let sel = selection([(5, 10), (15, 20), (25, 30)]);

    assert!(part_overlaps_any(Part::new(0, 6), &sel));
    assert!(part_overlaps_any(Part::new(16, 19), &sel));
    assert!(part_overlaps_any(Part::new(29, 30), &sel));
    assert!(part_overlaps_any(Part::new(5, 30), &sel));
    assert!(part_overlaps_any(Part::new(15, 20), &sel));

    assert!(!part_overlaps_any(Part::new(0, 5), &sel));
    assert!(!part_overlaps_any(Part::new(10, 15), &sel));
    assert!(!part_overlaps_any(Part::new(20, 25), &sel));
    assert!(!part_overlaps_any(Part::new(35, 40), &sel));
}

#[test]
fn selection_overlap_with_empty_operands() {
    assert!(!any_overlap(&selection([]), &selection([(5, 10)])));
    assert!(!any_overlap(&selection([(10, 20)]), &selection([])));
    assert!(!any_overlap(&selection([]), &selection([])));
}

#[test]
fn selection_overlap_pairs() {
    let b = selection([(5, 10), (15, 20), (25, 30)]);

    assert!(any_overlap(&selection([(3, 6)]), &b));
    assert!(any_overlap(&selection([(15, 16)]), &b));
    assert!(any_overlap(&selection([(29, 30)]), &b));
    assert!(any_overlap(
        &selection([(0, 1), (2, 3), (4, 5), (15, 16)]),
        &b
    ));
    assert!(any_overlap(
        &selection([(24, 26), (40, 41), (43, 44), (50, 51)]),
        &b
    ));

    assert!(!any_overlap(&selection([(0, 3)]), &b));
    assert!(!any_overlap(&selection([(20, 25)]), &b));
    assert!(!any_overlap(&selection([(35, 40)]), &b));
    assert!(!any_overlap(&selection([(0, 1), (2, 3), (4, 5)]), &b));
}

#[test]
fn disjoint_is_the_negated_overlap() {
    let b = selection([(5, 10), (15, 20), (25, 30)]);

    assert!(are_disjoint(&selection([(0, 1), (2, 3), (4, 5)]), &b));
    assert!(are_disjoint(&selection([]), &b));
    assert!(!are_disjoint(&selection([(3, 6)]), &b));
    assert!(!are_disjoint(
        &selection([(0, 1), (2, 3), (4, 5), (29, 30)]),
        &b
    ));
}

fn collect_cover(full: (u16, u16), parts: &PartSelection) -> Vec<(u16, u16, bool)> {
    let mut result = Vec::new();
    iter_parts(Part::new(full.0, full.1), parts, |part, selected| {
        result.push((part.begin().value(), part.end().value(), selected));
    });
    result
}

#[test]
fn cover_of_empty_selection_is_one_gap() {
    assert_eq!(
        collect_cover((0, 100), &selection([])),
        [(0, 100, false)]
    );
}

#[test]
fn cover_alternates_selected_and_unselected() {
    assert_eq!(
        collect_cover((0, 100), &selection([(10, 20), (50, 60)])),
        [
            (0, 10, false),
            (10, 20, true),
            (20, 50, false),
            (50, 60, true),
            (60, 100, false),
        ]
    );
}

#[test]
fn cover_without_gaps_at_the_edges() {
    assert_eq!(
        collect_cover((0, 10), &selection([(0, 4), (6, 10)])),
        [(0, 4, true), (4, 6, false), (6, 10, true)]
    );

    assert_eq!(collect_cover((0, 10), &selection([(0, 10)])), [(0, 10, true)]);
}

fn collect_overlapping(
    full: (u16, u16),
    query: &PartSelection,
    target: &PartSelection,
) -> Vec<(u16, u16, u16, u16, bool)> {
    let mut result = Vec::new();
    iter_overlapping_parts(
        Part::new(full.0, full.1),
        query,
        target,
        |query_part, target_part, selected| {
            result.push((
                query_part.begin().value(),
                query_part.end().value(),
                target_part.begin().value(),
                target_part.end().value(),
                selected,
            ));
        },
    );
    result
}

#[test]
fn overlapping_iteration_with_empty_query_is_silent() {
    let target = selection([(10, 20)]);
    assert!(collect_overlapping((0, 30), &selection([]), &target).is_empty());
}

#[test]
fn overlapping_iteration_delivers_target_flags() {
    let query = selection([(5, 15), (18, 25)]);
    let target = selection([(10, 20)]);

    assert_eq!(
        collect_overlapping((0, 30), &query, &target),
        [
            (5, 15, 0, 10, false),
            (5, 15, 10, 20, true),
            (18, 25, 10, 20, true),
            (18, 25, 20, 30, false),
        ]
    );
}

#[test]
fn overlapping_iteration_spans_multiple_target_ranges() {
    let query = selection([(0, 30)]);
    let target = selection([(10, 20)]);

    assert_eq!(
        collect_overlapping((0, 30), &query, &target),
        [
            (0, 30, 0, 10, false),
            (0, 30, 10, 20, true),
            (0, 30, 20, 30, false),
        ]
    );
}
