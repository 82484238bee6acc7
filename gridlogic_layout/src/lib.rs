// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gridlogic Layout: the authoritative store of a circuit under edit.
//!
//! A [`Layout`] owns three element stores:
//!
//! - logic items, stored column-wise with dense ids,
//! - decorations, stored the same way, and
//! - wires, each owning a [`SegmentTree`] of axis-aligned segments.
//!
//! The layout is plain data: it validates definitions and keeps its own
//! geometric invariants, but it does not check collisions and does not talk
//! to any index. The editing layer mutates the layout and announces every
//! committed change as an [`InfoMessage`](message::InfoMessage); derived
//! indices, selections, and validators are built purely from that stream.
//!
//! Deletion uses swap-remove, so the last id of a store moves into the freed
//! slot. The corresponding `…Updated` messages announce such renumbering.
//!
//! Per-type geometry — connector positions, body cells, bounding boxes —
//! is a pure function of a [`LayoutCalculationData`] value and lives in
//! [`layout_info`].

mod decorations;
mod error;
mod layout;
mod logic_items;
mod segment_tree;
mod wires;

pub mod layout_info;
pub mod message;

pub use decorations::DecorationStore;
pub use error::LayoutError;
pub use layout::{
    all_normal_display_state, decoration_ids, get_display_states, get_insertion_modes,
    get_line, get_part_line, get_segment_info, get_segment_valid_parts, has_segments,
    inserted_wire_ids, is_id_valid, is_inserted, is_part_valid, is_segment_part_valid,
    is_segment_valid, is_wire_empty, logicitem_ids, moved_layout, wire_ids, Layout,
};
pub use logic_items::LogicItemStore;
pub use segment_tree::SegmentTree;
pub use wires::WireStore;
