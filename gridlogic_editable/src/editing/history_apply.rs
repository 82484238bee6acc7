// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replaying history groups.
//!
//! Undo pops one group of instructions off the undo stack and applies
//! them through the regular editing functions. While that happens the
//! recording state points at the redo stack, so each applied instruction
//! records its own inverse and the whole group becomes redoable. Redo is
//! the mirror image.

use gridlogic_history::{HistoryEntry, HistoryState};
use gridlogic_vocabulary::InsertionMode;

use crate::circuit_data::CircuitData;
use crate::editing::{decoration, visible};

/// Replays the most recent undo group.
///
/// A no-op on an empty undo stack.
pub fn undo_group(circuit: &mut CircuitData) {
    if circuit.history.undo_stack.is_empty() {
        return;
    }
    tracing::debug!("undo_group");

    circuit.history.state = HistoryState::RecordRedo;
    apply_group(circuit, StackSide::Undo);
    circuit.history.redo_stack.push_new_group();
    circuit.history.state = HistoryState::RecordUndo;
}

/// Replays the most recent redo group.
///
/// A no-op on an empty redo stack.
pub fn redo_group(circuit: &mut CircuitData) {
    if circuit.history.redo_stack.is_empty() {
        return;
    }
    tracing::debug!("redo_group");

    circuit.history.state = HistoryState::RecordUndo;
    apply_group(circuit, StackSide::Redo);
    circuit.history.undo_stack.push_new_group();
    circuit.history.state = HistoryState::RecordUndo;
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum StackSide {
    Undo,
    Redo,
}

fn top_entry(circuit: &CircuitData, side: StackSide) -> Option<HistoryEntry> {
    match side {
        StackSide::Undo => circuit.history.undo_stack.top_entry(),
        StackSide::Redo => circuit.history.redo_stack.top_entry(),
    }
}

fn apply_group(circuit: &mut CircuitData, side: StackSide) {
    // Skip the trailing group markers.
    while top_entry(circuit, side) == Some(HistoryEntry::NewGroup) {
        match side {
            StackSide::Undo => circuit.history.undo_stack.pop_new_group(),
            StackSide::Redo => circuit.history.redo_stack.pop_new_group(),
        }
    }

    while let Some(entry) = top_entry(circuit, side) {
        if entry == HistoryEntry::NewGroup {
            break;
        }
        apply_entry(circuit, side, entry);
    }
}

fn apply_entry(circuit: &mut CircuitData, side: StackSide, entry: HistoryEntry) {
    let stack = match side {
        StackSide::Undo => &mut circuit.history.undo_stack,
        StackSide::Redo => &mut circuit.history.redo_stack,
    };

    match entry {
        HistoryEntry::NewGroup => unreachable!("group markers terminate the apply loop"),

        HistoryEntry::DecorationCreateTemporary => {
            let (key, placed) = stack.pop_decoration_create_temporary();
            decoration::add_decoration_with_key(
                circuit,
                placed,
                InsertionMode::Temporary,
                Some(key),
            )
            .expect("recorded decorations re-create cleanly");
        }
        HistoryEntry::DecorationDeleteTemporary => {
            let key = stack.pop_decoration_delete_temporary();
            let decoration_id = circuit
                .key_index
                .decoration_id(key)
                .expect("recorded keys resolve while their group is applied");
            decoration::delete_decoration(circuit, decoration_id)
                .expect("recorded deletions apply cleanly");
        }
        HistoryEntry::DecorationMoveTemporary => {
            let (key, delta) = stack.pop_decoration_move_temporary();
            let decoration_id = circuit
                .key_index
                .decoration_id(key)
                .expect("recorded keys resolve while their group is applied");
            decoration::move_decoration(circuit, decoration_id, delta.x, delta.y)
                .expect("recorded moves apply cleanly");
        }
        HistoryEntry::DecorationToModeTemporary => {
            let key = stack.pop_decoration_to_mode_temporary();
            let decoration_id = circuit
                .key_index
                .decoration_id(key)
                .expect("recorded keys resolve while their group is applied");
            decoration::change_decoration_insertion_mode(
                circuit,
                decoration_id,
                InsertionMode::Temporary,
            )
            .expect("mode changes to temporary apply cleanly");
        }
        HistoryEntry::DecorationToModeColliding => {
            let key = stack.pop_decoration_to_mode_colliding();
            let decoration_id = circuit
                .key_index
                .decoration_id(key)
                .expect("recorded keys resolve while their group is applied");
            decoration::change_decoration_insertion_mode(
                circuit,
                decoration_id,
                InsertionMode::Collisions,
            )
            .expect("mode changes to collisions apply cleanly");
        }
        HistoryEntry::DecorationToModeInsert => {
            let key = stack.pop_decoration_to_mode_insert();
            let decoration_id = circuit
                .key_index
                .decoration_id(key)
                .expect("recorded keys resolve while their group is applied");
            decoration::change_decoration_insertion_mode(
                circuit,
                decoration_id,
                InsertionMode::InsertOrDiscard,
            )
            .expect("recorded insertions re-apply cleanly");
        }
        HistoryEntry::DecorationChangeAttributes => {
            let (key, attrs) = stack.pop_decoration_change_attributes();
            let decoration_id = circuit
                .key_index
                .decoration_id(key)
                .expect("recorded keys resolve while their group is applied");
            decoration::set_decoration_attributes(circuit, decoration_id, attrs)
                .expect("recorded attribute changes apply cleanly");
        }
        HistoryEntry::DecorationAddVisibleSelection => {
            let key = stack.pop_decoration_add_visible_selection();
            let decoration_id = circuit
                .key_index
                .decoration_id(key)
                .expect("recorded keys resolve while their group is applied");
            visible::visible_selection_add_decoration(circuit, decoration_id)
                .expect("recorded selection changes apply cleanly");
        }
        HistoryEntry::DecorationRemoveVisibleSelection => {
            let key = stack.pop_decoration_remove_visible_selection();
            let decoration_id = circuit
                .key_index
                .decoration_id(key)
                .expect("recorded keys resolve while their group is applied");
            visible::visible_selection_remove_decoration(circuit, decoration_id)
                .expect("recorded selection changes apply cleanly");
        }

        HistoryEntry::VisibleSelectionClear => {
            stack.pop_visible_selection_clear();
            visible::visible_selection_clear(circuit);
        }
        HistoryEntry::VisibleSelectionSet => {
            let selection = stack.pop_visible_selection_set();
            visible::visible_selection_set(circuit, selection);
        }
        HistoryEntry::VisibleSelectionAddOperation => {
            let operation = stack.pop_visible_selection_add_operation();
            visible::visible_selection_add_operation(circuit, operation.function, operation.rect);
        }
        HistoryEntry::VisibleSelectionUpdateLast => {
            let rect = stack.pop_visible_selection_update_last();
            visible::visible_selection_update_last(circuit, rect)
                .expect("recorded updates apply cleanly");
        }
        HistoryEntry::VisibleSelectionPopLast => {
            stack.pop_visible_selection_pop_last();
            visible::visible_selection_pop_last(circuit)
                .expect("recorded pops apply cleanly");
        }
    }
}
