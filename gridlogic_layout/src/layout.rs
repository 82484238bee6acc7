// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout aggregate and its read helpers.

use core::fmt;

use gridlogic_part_selection::{part_inside_selection, part_overlaps_any, PartSelection};
use gridlogic_vocabulary::{
    is_representable_line, is_representable_point, to_full_part, to_line, DecorationId,
    DisplayState, InsertionMode, LogicItemId, OrderedLine, Segment, SegmentInfo, SegmentPart,
    WireId, FIRST_INSERTED_WIRE_ID,
};

use crate::decorations::DecorationStore;
use crate::logic_items::LogicItemStore;
use crate::wires::WireStore;

/// The authoritative store of a circuit under edit.
///
/// Holds logic items, decorations, and wires. All mutation goes through
/// the element stores; the layout itself carries no derived state.
#[derive(Clone, Default, PartialEq)]
pub struct Layout {
    logic_items: LogicItemStore,
    decorations: DecorationStore,
    wires: WireStore,
}

impl Layout {
    /// Creates an empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the layout holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.logic_items.is_empty() && self.decorations.is_empty() && self.wires.is_empty()
    }

    /// The logic item store.
    #[must_use]
    pub fn logic_items(&self) -> &LogicItemStore {
        &self.logic_items
    }

    /// Mutable access to the logic item store.
    #[must_use]
    pub fn logic_items_mut(&mut self) -> &mut LogicItemStore {
        &mut self.logic_items
    }

    /// The decoration store.
    #[must_use]
    pub fn decorations(&self) -> &DecorationStore {
        &self.decorations
    }

    /// Mutable access to the decoration store.
    #[must_use]
    pub fn decorations_mut(&mut self) -> &mut DecorationStore {
        &mut self.decorations
    }

    /// The wire store.
    #[must_use]
    pub fn wires(&self) -> &WireStore {
        &self.wires
    }

    /// Mutable access to the wire store.
    #[must_use]
    pub fn wires_mut(&mut self) -> &mut WireStore {
        &mut self.wires
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Layout with {} logic items, {} decorations and {} wires>",
            self.logic_items.len(),
            self.decorations.len(),
            self.wires.len()
        )
    }
}

/// Iterates all live logic item ids.
pub fn logicitem_ids(layout: &Layout) -> impl Iterator<Item = LogicItemId> + use<> {
    (0..layout.logic_items().len()).map(LogicItemId::from_index)
}

/// Iterates all live decoration ids.
pub fn decoration_ids(layout: &Layout) -> impl Iterator<Item = DecorationId> + use<> {
    (0..layout.decorations().len()).map(DecorationId::from_index)
}

/// Iterates all wire ids, aggregates included.
pub fn wire_ids(layout: &Layout) -> impl Iterator<Item = WireId> + use<> {
    (0..layout.wires().len()).map(WireId::from_index)
}

/// Iterates the ids of inserted wires.
pub fn inserted_wire_ids(layout: &Layout) -> impl Iterator<Item = WireId> + use<> {
    (FIRST_INSERTED_WIRE_ID.index()..layout.wires().len().max(FIRST_INSERTED_WIRE_ID.index()))
        .map(WireId::from_index)
}

/// Returns whether a logic item id refers to a live item.
#[must_use]
pub fn is_id_valid(layout: &Layout, logicitem_id: LogicItemId) -> bool {
    layout.logic_items().contains(logicitem_id)
}

/// Returns whether a segment id refers to a live segment.
#[must_use]
pub fn is_segment_valid(layout: &Layout, segment: Segment) -> bool {
    layout.wires().contains(segment.wire_id)
        && layout
            .wires()
            .segment_tree(segment.wire_id)
            .contains(segment.segment_index)
}

/// Returns whether a segment part lies within its live segment.
#[must_use]
pub fn is_segment_part_valid(layout: &Layout, segment_part: SegmentPart) -> bool {
    if !is_segment_valid(layout, segment_part.segment) {
        return false;
    }
    segment_part.part.end() <= to_full_part(get_line(layout, segment_part.segment)).end()
}

/// Returns whether a logic item is inserted.
#[must_use]
pub fn is_inserted(layout: &Layout, logicitem_id: LogicItemId) -> bool {
    layout
        .logic_items()
        .display_state(logicitem_id)
        .is_inserted()
}

/// Returns whether a wire's tree holds no segments.
#[must_use]
pub fn is_wire_empty(layout: &Layout, wire_id: WireId) -> bool {
    layout.wires().segment_tree(wire_id).is_empty()
}

/// Geometry and endpoint types of a segment.
#[must_use]
pub fn get_segment_info(layout: &Layout, segment: Segment) -> SegmentInfo {
    layout
        .wires()
        .segment_tree(segment.wire_id)
        .info(segment.segment_index)
}

/// The full line of a segment.
#[must_use]
pub fn get_line(layout: &Layout, segment: Segment) -> OrderedLine {
    get_segment_info(layout, segment).line
}

/// The sub-line covered by a segment part.
///
/// # Panics
///
/// Panics when the part extends beyond the segment; check
/// [`is_segment_part_valid`] first.
#[must_use]
pub fn get_part_line(layout: &Layout, segment_part: SegmentPart) -> OrderedLine {
    to_line(get_line(layout, segment_part.segment), segment_part.part)
        .expect("segment parts lie within their segment")
}

/// The valid parts of a segment.
#[must_use]
pub fn get_segment_valid_parts(layout: &Layout, segment: Segment) -> &PartSelection {
    layout
        .wires()
        .segment_tree(segment.wire_id)
        .valid_parts(segment.segment_index)
}

/// The display states at the two ends of a segment part.
///
/// Uninserted aggregates are uniform; inserted segments derive the pair
/// from the valid-part ranges: fully inside a valid range is `Valid`,
/// partially overlapping is `(Valid, Normal)`.
#[must_use]
pub fn get_display_states(layout: &Layout, segment_part: SegmentPart) -> (DisplayState, DisplayState) {
    use DisplayState::*;

    let wire_id = segment_part.segment.wire_id;
    if wire_id.is_temporary() {
        return (Temporary, Temporary);
    }
    if wire_id.is_colliding() {
        return (Colliding, Colliding);
    }

    let valid_parts = get_segment_valid_parts(layout, segment_part.segment);
    if part_inside_selection(segment_part.part, valid_parts) {
        (Valid, Valid)
    } else if part_overlaps_any(segment_part.part, valid_parts) {
        (Valid, Normal)
    } else {
        (Normal, Normal)
    }
}

/// The insertion modes matching [`get_display_states`].
#[must_use]
pub fn get_insertion_modes(
    layout: &Layout,
    segment_part: SegmentPart,
) -> (InsertionMode, InsertionMode) {
    let (first, second) = get_display_states(layout, segment_part);
    (first.into(), second.into())
}

/// Returns whether any wire holds segments.
#[must_use]
pub fn has_segments(layout: &Layout) -> bool {
    wire_ids(layout).any(|wire_id| !layout.wires().segment_tree(wire_id).is_empty())
}

/// Returns whether everything in the layout is fully inserted.
#[must_use]
pub fn all_normal_display_state(layout: &Layout) -> bool {
    use gridlogic_vocabulary::{COLLIDING_WIRE_ID, TEMPORARY_WIRE_ID};

    layout.wires().segment_tree(TEMPORARY_WIRE_ID).is_empty()
        && layout.wires().segment_tree(COLLIDING_WIRE_ID).is_empty()
        && logicitem_ids(layout)
            .all(|id| layout.logic_items().display_state(id) == DisplayState::Normal)
        && decoration_ids(layout)
            .all(|id| layout.decorations().display_state(id) == DisplayState::Normal)
        && inserted_wire_ids(layout).all(|wire_id| {
            layout
                .wires()
                .segment_tree(wire_id)
                .all_valid_parts()
                .all(PartSelection::is_empty)
        })
}

/// A copy of the layout moved by a grid delta.
///
/// Returns `None` when any element would leave the representable grid.
#[must_use]
pub fn moved_layout(layout: &Layout, delta_x: i32, delta_y: i32) -> Option<Layout> {
    let mut moved = layout.clone();

    for logicitem_id in logicitem_ids(layout) {
        let position = layout.logic_items().position(logicitem_id);
        if !is_representable_point(position, delta_x, delta_y) {
            return None;
        }
        moved.logic_items_mut().set_position(
            logicitem_id,
            gridlogic_vocabulary::add_unchecked_point(position, delta_x, delta_y),
        );
    }

    for decoration_id in decoration_ids(layout) {
        let position = layout.decorations().position(decoration_id);
        if !is_representable_point(position, delta_x, delta_y) {
            return None;
        }
        moved.decorations_mut().set_position(
            decoration_id,
            gridlogic_vocabulary::add_unchecked_point(position, delta_x, delta_y),
        );
    }

    for wire_id in wire_ids(layout) {
        let tree = moved.wires_mut().modifiable_segment_tree(wire_id);
        for segment_index in tree.indices().collect::<Vec<_>>() {
            let mut info = tree.info(segment_index);
            if !is_representable_line(info.line, delta_x, delta_y) {
                return None;
            }
            info.line = gridlogic_vocabulary::add_unchecked_line(info.line, delta_x, delta_y);
            tree.update_segment(segment_index, info);
        }
    }

    Some(moved)
}

/// Returns whether a part of a segment is marked valid anywhere.
#[must_use]
pub fn is_part_valid(layout: &Layout, segment_part: SegmentPart) -> bool {
    part_overlaps_any(
        segment_part.part,
        get_segment_valid_parts(layout, segment_part.segment),
    )
}
