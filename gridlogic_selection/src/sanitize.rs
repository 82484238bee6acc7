// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalization of wire selections around crossing points.
//!
//! Wires accumulate crossing points where two segments of one wire meet.
//! A selection boundary that falls exactly on such a point is ambiguous:
//! it neither clearly includes nor excludes the crossing. Sanitization
//! shifts every such boundary off the crossing, outward when growing a
//! selection and inward when shrinking one.

use gridlogic_index::CollisionIndex;
use gridlogic_layout::{get_line, Layout};
use gridlogic_part_selection::PartSelection;
use gridlogic_vocabulary::{
    to_full_part, to_point, Offset, OrderedLine, Part, Segment, SegmentPart,
};

use crate::selection::Selection;

/// Direction boundaries are shifted off crossing points.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SanitizeMode {
    /// Grow the range until its boundaries clear the crossings.
    Expand,
    /// Shrink the range until its boundaries clear the crossings.
    Shrink,
}

/// Crossing lookups along one segment's line.
struct CrossingView<'a> {
    collision_index: &'a CollisionIndex,
    full_line: OrderedLine,
}

impl CrossingView<'_> {
    fn is_crossing(&self, offset: Offset) -> bool {
        let point =
            to_point(self.full_line, offset).expect("offsets stay within the segment");
        self.collision_index.is_wires_crossing(point)
    }

    fn max_offset(&self) -> Offset {
        to_full_part(self.full_line).end()
    }
}

fn find_lower(mut offset: Offset, view: &CrossingView<'_>, limit: Offset) -> Offset {
    while offset > limit {
        offset = offset.saturating_pred();
        if !view.is_crossing(offset) {
            return offset;
        }
    }
    offset
}

fn find_higher(mut offset: Offset, view: &CrossingView<'_>, limit: Offset) -> Offset {
    while offset < limit {
        offset = offset.saturating_succ();
        if !view.is_crossing(offset) {
            return offset;
        }
    }
    offset
}

/// The sanitized range, or `None` when it collapses to zero length.
fn find_sanitized_part(part: Part, view: &CrossingView<'_>, mode: SanitizeMode) -> Option<Part> {
    let begin_crossing = view.is_crossing(part.begin());
    let end_crossing = view.is_crossing(part.end());

    let (begin, end) = match mode {
        SanitizeMode::Expand => (
            if begin_crossing {
                find_lower(part.begin(), view, Offset::ZERO)
            } else {
                part.begin()
            },
            if end_crossing {
                find_higher(part.end(), view, view.max_offset())
            } else {
                part.end()
            },
        ),
        SanitizeMode::Shrink => (
            if begin_crossing {
                find_higher(part.begin(), view, part.end())
            } else {
                part.begin()
            },
            if end_crossing {
                find_lower(part.end(), view, part.begin())
            } else {
                part.end()
            },
        ),
    };

    (begin < end).then(|| Part::try_new(begin, end).expect("ordering checked"))
}

fn find_sanitized_parts(
    parts: &PartSelection,
    view: &CrossingView<'_>,
    mode: SanitizeMode,
) -> PartSelection {
    PartSelection::from_parts(
        parts
            .iter()
            .filter_map(|part| find_sanitized_part(part, view, mode)),
    )
}

fn any_boundary_crossing(parts: &PartSelection, view: &CrossingView<'_>) -> bool {
    parts
        .iter()
        .any(|part| view.is_crossing(part.begin()) || view.is_crossing(part.end()))
}

/// Shifts the boundaries of one wire range off crossing points.
///
/// Returns `None` when the range collapses.
#[must_use]
pub fn sanitize_part(
    segment_part: SegmentPart,
    layout: &Layout,
    collision_index: &CollisionIndex,
    mode: SanitizeMode,
) -> Option<SegmentPart> {
    let view = CrossingView {
        collision_index,
        full_line: get_line(layout, segment_part.segment),
    };
    find_sanitized_part(segment_part.part, &view, mode)
        .map(|part| SegmentPart::new(segment_part.segment, part))
}

/// Sanitizes every wire range of a selection in place.
///
/// Ranges that collapse are removed; segments left without ranges are
/// dropped from the selection.
pub fn sanitize_selection(
    selection: &mut Selection,
    layout: &Layout,
    collision_index: &CollisionIndex,
    mode: SanitizeMode,
) {
    let mut replacements: Vec<(Segment, PartSelection)> = Vec::new();

    for (segment, parts) in selection.selected_segments() {
        let view = CrossingView {
            collision_index,
            full_line: get_line(layout, segment),
        };
        if any_boundary_crossing(parts, &view) {
            replacements.push((segment, find_sanitized_parts(parts, &view, mode)));
        }
    }

    for (segment, parts) in replacements {
        selection.set_selection(segment, parts);
    }
}
