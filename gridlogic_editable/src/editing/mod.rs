// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The editing operations of the circuit core.
//!
//! Every function takes the [`CircuitData`](crate::CircuitData) aggregate
//! and follows the shared contract: validate, check collisions through
//! the indices, mutate the layout, announce messages, record history.

mod decoration;
mod detail;
mod history_apply;
mod logicitem;
mod visible;
mod wire;

pub use decoration::{
    add_decoration, change_decoration_insertion_mode, delete_decoration, move_decoration,
    set_decoration_attributes,
};
pub use history_apply::{redo_group, undo_group};
pub use logicitem::{
    add_logicitem, change_logicitem_insertion_mode, delete_logicitem, move_logicitem,
    set_logicitem_attributes, toggle_inverter, ConnectorRef,
};
pub use visible::{
    visible_selection_add_decoration, visible_selection_add_operation, visible_selection_clear,
    visible_selection_pop_last, visible_selection_remove_decoration, visible_selection_set,
    visible_selection_update_last,
};
pub use wire::{
    add_wire_segment, delete_wire_segment, merge_wire_segments, move_temporary_wire_segment,
    split_wire_segment,
};
