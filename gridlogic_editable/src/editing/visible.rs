// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Operations on the visible selection, with history recording.

use gridlogic_history::StoredOperation;
use gridlogic_selection::Selection;
use gridlogic_vocabulary::{DecorationId, RectFine, SelectionFunction};

use crate::circuit_data::CircuitData;
use crate::error::CircuitError;

/// Records the restoration of the current visible selection: a set entry
/// with its contents, or a plain clear entry when it is empty.
fn record_restore(circuit: &mut CircuitData) {
    // Collapse pending operations first so one entry restores
    // everything.
    circuit
        .visible_selection
        .apply_all_operations(&circuit.layout, &circuit.index);
    let previous = circuit.visible_selection.initial_selection().clone();

    if let Some(stack) = circuit.history.recording_stack() {
        if previous.is_empty() {
            stack.push_visible_selection_clear();
        } else {
            stack.push_visible_selection_set(previous);
        }
    }
}

/// Clears the visible selection, recording its restoration.
pub fn visible_selection_clear(circuit: &mut CircuitData) {
    record_restore(circuit);
    circuit.visible_selection.clear();
}

/// Replaces the visible selection, recording the previous contents.
pub fn visible_selection_set(circuit: &mut CircuitData, selection: Selection) {
    record_restore(circuit);
    circuit.visible_selection.set_selection(selection);
}

/// Appends a rubber-band operation, recording its removal.
///
/// A toggle request is resolved against current membership into add or
/// substract before it enters the operation list.
pub fn visible_selection_add_operation(
    circuit: &mut CircuitData,
    function: SelectionFunction,
    rect: RectFine,
) {
    let function = match function {
        SelectionFunction::Toggle => resolve_toggle(circuit, rect),
        other => other,
    };

    if let Some(stack) = circuit.history.recording_stack() {
        stack.push_visible_selection_pop_last();
    }
    circuit.visible_selection.add(function, rect);
}

/// A toggle removes when the rectangle hits only selected content, and
/// adds otherwise.
fn resolve_toggle(circuit: &CircuitData, rect: RectFine) -> SelectionFunction {
    let hits = circuit.index.spatial_index().query_selection(rect);
    if hits.is_empty() {
        return SelectionFunction::Add;
    }

    let all_selected = circuit
        .visible_selection
        .with_selection(&circuit.layout, &circuit.index, |selection| {
            hits.iter().all(|payload| match payload {
                gridlogic_index::SpatialPayload::LogicItem(id) => {
                    selection.contains_logicitem(*id)
                }
                gridlogic_index::SpatialPayload::Decoration(id) => {
                    selection.contains_decoration(*id)
                }
                gridlogic_index::SpatialPayload::Segment(segment) => {
                    selection.segment_parts(*segment).is_some()
                }
            })
        });

    if all_selected {
        SelectionFunction::Substract
    } else {
        SelectionFunction::Add
    }
}

/// Replaces the rectangle of the last operation, recording the old one.
pub fn visible_selection_update_last(
    circuit: &mut CircuitData,
    rect: RectFine,
) -> Result<(), CircuitError> {
    let Some(last) = circuit.visible_selection.last_operation() else {
        return Err(CircuitError::InvalidState);
    };
    if last.rect == rect {
        return Ok(());
    }

    if let Some(stack) = circuit.history.recording_stack() {
        stack.push_visible_selection_update_last(last.rect);
    }
    circuit.visible_selection.update_last(rect);
    Ok(())
}

/// Removes the last operation, recording its re-addition.
pub fn visible_selection_pop_last(circuit: &mut CircuitData) -> Result<(), CircuitError> {
    let Some(last) = circuit.visible_selection.last_operation() else {
        return Err(CircuitError::InvalidState);
    };

    if let Some(stack) = circuit.history.recording_stack() {
        stack.push_visible_selection_add_operation(StoredOperation {
            function: last.function,
            rect: last.rect,
        });
    }
    circuit.visible_selection.pop_last();
    Ok(())
}

/// Adds a decoration to the visible selection, recording the removal.
pub fn visible_selection_add_decoration(
    circuit: &mut CircuitData,
    decoration_id: DecorationId,
) -> Result<(), CircuitError> {
    if !circuit.layout.decorations().contains(decoration_id) {
        return Err(CircuitError::InvalidId);
    }

    let key = circuit.key_index.decoration_key(decoration_id);
    if let Some(stack) = circuit.history.recording_stack() {
        stack.push_decoration_remove_visible_selection(key);
    }
    circuit.visible_selection.add_decoration(decoration_id);
    Ok(())
}

/// Removes a decoration from the visible selection, recording the
/// re-addition.
pub fn visible_selection_remove_decoration(
    circuit: &mut CircuitData,
    decoration_id: DecorationId,
) -> Result<(), CircuitError> {
    if !circuit.layout.decorations().contains(decoration_id) {
        return Err(CircuitError::InvalidId);
    }

    let key = circuit.key_index.decoration_key(decoration_id);
    if let Some(stack) = circuit.history.recording_stack() {
        stack.push_decoration_add_visible_selection(key);
    }
    circuit.visible_selection.remove_decoration(decoration_id);
    Ok(())
}
