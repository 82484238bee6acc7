// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gridlogic Part Selection: coalesced range algebra on wire segments.
//!
//! A wire segment is addressed by half-open [`Part`] ranges along its line.
//! [`PartSelection`] keeps a set of such ranges in canonical form:
//!
//! - parts are sorted ascending, and
//! - no two adjacent parts touch; touching or overlapping parts are merged
//!   on insertion.
//!
//! This canonical form is what makes wire editing tractable: the valid
//! sub-parts of a segment, the selected sub-parts of a segment, and the
//! ranges moved between segments during splits and merges are all
//! `PartSelection` values, and the editing layer reasons about them with
//! the set-style predicates and the two cover iterators ([`iter_parts`],
//! [`iter_overlapping_parts`]) from this crate.
//!
//! Most selections consist of one or two ranges, so the backing store is a
//! [`SmallVec`] with two inline slots.
//!
//! ## Example
//!
//! ```rust
//! use gridlogic_part_selection::PartSelection;
//! use gridlogic_vocabulary::Part;
//!
//! let mut selection = PartSelection::new();
//! selection.add_part(Part::new(5, 10));
//! selection.add_part(Part::new(0, 4));
//! // Touching parts coalesce.
//! selection.add_part(Part::new(4, 5));
//! assert_eq!(selection.iter().collect::<Vec<_>>(), [Part::new(0, 10)]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

use core::fmt;

use gridlogic_vocabulary::{Offset, Part};
use smallvec::SmallVec;

/// Backing store of a part selection; two ranges cover the common case.
type PartVec = SmallVec<[Part; 2]>;

/// Source and destination ranges of a part copy or move.
///
/// Both ranges must have the same length; the copied parts are shifted by
/// `destination.begin - source.begin`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PartCopyDefinition {
    /// Range the parts are copied into.
    pub destination: Part,
    /// Range the parts are taken from.
    pub source: Part,
}

impl PartCopyDefinition {
    /// Offset shift applied to copied parts.
    fn shift(&self) -> i32 {
        debug_assert_eq!(
            self.destination.length(),
            self.source.length(),
            "copy ranges need equal length"
        );
        i32::from(self.destination.begin().value()) - i32::from(self.source.begin().value())
    }
}

/// Selected parts on one wire segment, sorted and coalesced.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct PartSelection {
    parts: PartVec,
}

impl PartSelection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parts: PartVec::new_const(),
        }
    }

    /// Creates a selection covering a single part.
    #[must_use]
    pub fn from_part(part: Part) -> Self {
        let mut parts = PartVec::new();
        parts.push(part);
        Self { parts }
    }

    /// Creates a selection from arbitrary parts, coalescing as needed.
    #[must_use]
    pub fn from_parts(parts: impl IntoIterator<Item = Part>) -> Self {
        let mut selection = Self::new();
        for part in parts {
            selection.add_part(part);
        }
        selection
    }

    /// Returns whether no parts are selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Number of disjoint selected ranges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// The selected ranges in ascending order.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Iterates the selected ranges in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Part> + '_ {
        self.parts.iter().copied()
    }

    /// The first selected range.
    #[must_use]
    pub fn front(&self) -> Option<Part> {
        self.parts.first().copied()
    }

    /// The last selected range.
    #[must_use]
    pub fn back(&self) -> Option<Part> {
        self.parts.last().copied()
    }

    /// The largest selected offset.
    #[must_use]
    pub fn max_offset(&self) -> Option<Offset> {
        self.back().map(Part::end)
    }

    /// Adds a part, merging it with overlapping or touching neighbors.
    pub fn add_part(&mut self, part: Part) {
        // Window of existing parts that overlap or touch `part`.
        let first = self.parts.partition_point(|p| p.end() < part.begin());
        let mut last = first;
        let mut begin = part.begin();
        let mut end = part.end();
        while last < self.parts.len() && self.parts[last].begin() <= part.end() {
            begin = begin.min(self.parts[last].begin());
            end = end.max(self.parts[last].end());
            last += 1;
        }

        let merged = Part::try_new(begin, end).expect("merged range keeps positive length");
        self.parts.drain(first..last);
        self.parts.insert(first, merged);
        self.debug_check_invariant();
    }

    /// Removes a range, splitting partially covered parts.
    pub fn remove_part(&mut self, part: Part) {
        let mut result = PartVec::new();
        for &existing in &self.parts {
            if !existing.overlaps(part) {
                result.push(existing);
                continue;
            }
            if existing.begin() < part.begin() {
                result.push(
                    Part::try_new(existing.begin(), part.begin())
                        .expect("leading remainder keeps positive length"),
                );
            }
            if part.end() < existing.end() {
                result.push(
                    Part::try_new(part.end(), existing.end())
                        .expect("trailing remainder keeps positive length"),
                );
            }
        }
        self.parts = result;
        self.debug_check_invariant();
    }

    /// Copies the parts of `source` within the definition's source range
    /// into this selection, shifted to the destination range.
    pub fn copy_parts(&mut self, source: &Self, definition: PartCopyDefinition) {
        let shift = definition.shift();
        for part in source.iter() {
            let Some(overlap) = part.intersection(definition.source) else {
                continue;
            };
            self.add_part(shift_part(overlap, shift));
        }
    }

    /// The complement of this selection within `full_part`.
    #[must_use]
    pub fn inverted_selection(&self, full_part: Part) -> Self {
        let mut result = Self::new();
        iter_parts(full_part, self, |part, selected| {
            if !selected {
                result.add_part(part);
            }
        });
        result
    }

    fn debug_check_invariant(&self) {
        debug_assert!(
            self.parts
                .windows(2)
                .all(|w| w[0].end() < w[1].begin()),
            "parts need to be sorted and non-touching"
        );
    }
}

impl fmt::Debug for PartSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.parts.iter()).finish()
    }
}

impl FromIterator<Part> for PartSelection {
    fn from_iter<I: IntoIterator<Item = Part>>(iter: I) -> Self {
        Self::from_parts(iter)
    }
}

fn shift_part(part: Part, shift: i32) -> Part {
    let begin = i32::from(part.begin().value()) + shift;
    let end = i32::from(part.end().value()) + shift;
    debug_assert!(begin >= 0 && end <= i32::from(u16::MAX), "shift in range");
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "copy definitions keep offsets inside the segment"
    )]
    let (begin, end) = (begin as u16, end as u16);
    Part::new(begin, end)
}

/// Moves the parts selected by `definition` from `source` to `destination`.
pub fn move_parts_between(
    destination: &mut PartSelection,
    source: &mut PartSelection,
    definition: PartCopyDefinition,
) {
    destination.copy_parts(source, definition);
    source.remove_part(definition.source);
}

/// Moves parts within one selection from the source to the destination
/// range.
pub fn move_parts(selection: &mut PartSelection, definition: PartCopyDefinition) {
    let copied = {
        let mut tmp = PartSelection::new();
        tmp.copy_parts(selection, definition);
        tmp
    };
    selection.remove_part(definition.source);
    for part in copied.iter() {
        selection.add_part(part);
    }
}

/// Returns whether `part` overlaps any selected range of `selection`.
#[must_use]
pub fn part_overlaps_any(part: Part, selection: &PartSelection) -> bool {
    let index = selection
        .parts()
        .partition_point(|p| p.end() <= part.begin());
    selection
        .parts()
        .get(index)
        .is_some_and(|p| p.begin() < part.end())
}

/// Returns whether `part` lies fully inside one selected range of
/// `selection`.
///
/// Ranges are coalesced, so covering by two touching ranges cannot occur;
/// only the single range reaching past `part.begin` can contain the part.
#[must_use]
pub fn part_inside_selection(part: Part, selection: &PartSelection) -> bool {
    let index = selection
        .parts()
        .partition_point(|p| p.end() < part.end());
    selection
        .parts()
        .get(index)
        .is_some_and(|p| part.is_inside(*p))
}

/// Returns whether any range of `a` overlaps any range of `b`.
///
/// Linear merged walk over both sorted sequences.
#[must_use]
pub fn any_overlap(a: &PartSelection, b: &PartSelection) -> bool {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let (pa, pb) = (a.parts()[i], b.parts()[j]);
        if pa.overlaps(pb) {
            return true;
        }
        if pa.end() <= pb.end() {
            i += 1;
        } else {
            j += 1;
        }
    }
    false
}

/// Returns whether the selections share no cells.
#[must_use]
pub fn are_disjoint(a: &PartSelection, b: &PartSelection) -> bool {
    !any_overlap(a, b)
}

/// Walks the alternating selected and unselected ranges covering
/// `full_part`.
///
/// The callback receives each range together with its selected flag; empty
/// gaps are skipped. `full_part` must begin at offset zero and cover the
/// whole selection.
pub fn iter_parts(full_part: Part, selection: &PartSelection, mut func: impl FnMut(Part, bool)) {
    assert_eq!(
        full_part.begin(),
        Offset::ZERO,
        "cover iteration starts at the segment origin"
    );

    let mut pivot = full_part.begin();
    for part in selection.iter() {
        if pivot != part.begin() {
            func(
                Part::try_new(pivot, part.begin()).expect("gaps keep positive length"),
                false,
            );
        }
        func(part, true);
        pivot = part.end();
    }

    if pivot != full_part.end() {
        func(
            Part::try_new(pivot, full_part.end()).expect("tail keeps positive length"),
            false,
        );
    }
}

/// Delivers, for each query range, every covering range of `target` it
/// overlaps, together with the target range's selected flag.
///
/// Query parts must lie within `full_part`.
pub fn iter_overlapping_parts(
    full_part: Part,
    query: &PartSelection,
    target: &PartSelection,
    mut func: impl FnMut(Part, Part, bool),
) {
    let parts = query.parts();
    if parts.is_empty() {
        return;
    }

    let mut pivot = 0;
    iter_parts(full_part, target, |target_part, target_selected| {
        debug_assert!(
            pivot >= parts.len() || parts[pivot].end() > target_part.begin(),
            "query parts advance with the cover"
        );

        while pivot < parts.len() && parts[pivot].end() <= target_part.end() {
            debug_assert!(parts[pivot].overlaps(target_part), "delivered pairs overlap");
            func(parts[pivot], target_part, target_selected);
            pivot += 1;
        }
        if pivot < parts.len() && parts[pivot].begin() < target_part.end() {
            debug_assert!(parts[pivot].overlaps(target_part), "delivered pairs overlap");
            func(parts[pivot], target_part, target_selected);
        }
    });

    debug_assert_eq!(pivot, parts.len(), "every query part was visited");
}
