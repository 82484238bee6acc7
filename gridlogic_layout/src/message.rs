// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental change messages emitted by the editing layer.
//!
//! Every committed mutation of the [`Layout`](crate::Layout) is announced
//! as exactly one [`InfoMessage`], delivered synchronously and in mutation
//! order. Derived state — indices, selections, validators — is maintained
//! purely from this stream, which is what makes replay-based validation
//! possible.
//!
//! Insertion-related messages carry the full geometry of the affected
//! element so consumers never have to read the layout while handling a
//! message.

use gridlogic_vocabulary::{
    DecorationCalculationData, DecorationId, LayoutCalculationData, LogicItemId, Part, Segment,
    SegmentInfo,
};

use crate::layout::{
    decoration_ids, inserted_wire_ids, is_inserted, logicitem_ids, Layout,
};

/// An element id of either store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementRef {
    /// A logic item.
    LogicItem(LogicItemId),
    /// A decoration.
    Decoration(DecorationId),
}

/// A single committed mutation of the layout.
#[derive(Clone, Debug, PartialEq)]
pub enum InfoMessage {
    /// An element was created in the temporary state.
    ElementCreated(ElementRef),
    /// A temporary element was deleted; its id is free again.
    ElementDeleted(ElementRef),
    /// Swap-removal renumbered an element.
    ElementIdUpdated {
        /// The element's id after renumbering.
        new_ref: ElementRef,
        /// The element's id before renumbering.
        old_ref: ElementRef,
    },

    /// A logic item entered the inserted state.
    LogicItemInserted {
        /// The inserted item.
        logicitem_id: LogicItemId,
        /// Full geometry of the item.
        data: LayoutCalculationData,
    },
    /// A logic item left the inserted state.
    LogicItemUninserted {
        /// The uninserted item.
        logicitem_id: LogicItemId,
        /// Full geometry of the item.
        data: LayoutCalculationData,
    },
    /// Swap-removal renumbered an inserted logic item.
    InsertedLogicItemIdUpdated {
        /// The item's id after renumbering.
        new_logicitem_id: LogicItemId,
        /// The item's id before renumbering.
        old_logicitem_id: LogicItemId,
        /// Full geometry of the item.
        data: LayoutCalculationData,
    },

    /// A decoration entered the inserted state.
    DecorationInserted {
        /// The inserted decoration.
        decoration_id: DecorationId,
        /// Full geometry of the decoration.
        data: DecorationCalculationData,
    },
    /// A decoration left the inserted state.
    DecorationUninserted {
        /// The uninserted decoration.
        decoration_id: DecorationId,
        /// Full geometry of the decoration.
        data: DecorationCalculationData,
    },
    /// Swap-removal renumbered an inserted decoration.
    InsertedDecorationIdUpdated {
        /// The decoration's id after renumbering.
        new_decoration_id: DecorationId,
        /// The decoration's id before renumbering.
        old_decoration_id: DecorationId,
        /// Full geometry of the decoration.
        data: DecorationCalculationData,
    },

    /// An uninserted segment was created.
    SegmentCreated {
        /// The new segment.
        segment: Segment,
    },
    /// An uninserted segment was deleted.
    SegmentDeleted {
        /// The deleted segment.
        segment: Segment,
    },
    /// Swap-removal or aggregate moves renumbered an uninserted segment.
    SegmentIdUpdated {
        /// The segment's id after renumbering.
        new_segment: Segment,
        /// The segment's id before renumbering.
        old_segment: Segment,
    },

    /// A segment entered the inserted state.
    SegmentInserted {
        /// The inserted segment.
        segment: Segment,
        /// Geometry and endpoint types of the segment.
        segment_info: SegmentInfo,
    },
    /// A segment left the inserted state.
    SegmentUninserted {
        /// The uninserted segment.
        segment: Segment,
        /// Geometry and endpoint types of the segment.
        segment_info: SegmentInfo,
    },
    /// Renumbering moved an inserted segment to a new id.
    InsertedSegmentIdUpdated {
        /// The segment's id after renumbering.
        new_segment: Segment,
        /// The segment's id before renumbering.
        old_segment: Segment,
        /// Geometry and endpoint types of the segment.
        segment_info: SegmentInfo,
    },
    /// The endpoint types of an inserted segment changed in place.
    InsertedEndPointsUpdated {
        /// The affected segment.
        segment: Segment,
        /// Endpoint types after the change.
        new_segment_info: SegmentInfo,
        /// Endpoint types before the change.
        old_segment_info: SegmentInfo,
    },

    /// Two segments of one wire merged into one.
    SegmentMerged {
        /// The segment that disappeared.
        segment_from: Segment,
        /// The segment now covering both lines.
        segment_to: Segment,
        /// Range of `segment_to` now covering what was `segment_from`.
        part_destination: Part,
    },
    /// A segment split into two at an offset.
    SegmentSplit {
        /// The segment that was split.
        segment_from: Segment,
        /// The range of `segment_from` that moved to the new segment.
        part_from: Part,
        /// The segment now covering that range, starting at offset zero.
        segment_to: Segment,
    },
}

/// Announces the full inserted state of a layout as a message stream.
///
/// This is the replay used to build a fresh index or validator from an
/// existing layout: one `…Inserted` message per inserted logic item,
/// decoration, and wire segment, in id order.
pub fn generate_inserted_messages(layout: &Layout, mut submit: impl FnMut(InfoMessage)) {
    for logicitem_id in logicitem_ids(layout) {
        if is_inserted(layout, logicitem_id) {
            submit(InfoMessage::LogicItemInserted {
                logicitem_id,
                data: layout.logic_items().calculation_data(logicitem_id),
            });
        }
    }

    for decoration_id in decoration_ids(layout) {
        if layout
            .decorations()
            .display_state(decoration_id)
            .is_inserted()
        {
            submit(InfoMessage::DecorationInserted {
                decoration_id,
                data: layout.decorations().calculation_data(decoration_id),
            });
        }
    }

    for wire_id in inserted_wire_ids(layout) {
        let tree = layout.wires().segment_tree(wire_id);
        for segment_index in tree.indices() {
            submit(InfoMessage::SegmentInserted {
                segment: Segment::new(wire_id, segment_index),
                segment_info: tree.info(segment_index),
            });
        }
    }
}
