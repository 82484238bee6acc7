// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editing operations on decorations.
//!
//! Decorations are the history-complete element kind: every operation
//! records its inverse on the active history stack, keyed by the
//! decoration's stable key.

use gridlogic_history::MoveDelta;
use gridlogic_layout::message::{ElementRef, InfoMessage};
use gridlogic_vocabulary::{
    checked_move_point, DecorationId, DecorationKey, DisplayState, InsertionMode,
    PlacedDecoration, TextElementAttrs,
};

use crate::circuit_data::CircuitData;
use crate::error::CircuitError;

/// Adds a decoration and brings it to the requested insertion mode.
pub fn add_decoration(
    circuit: &mut CircuitData,
    placed: PlacedDecoration,
    mode: InsertionMode,
) -> Result<DecorationId, CircuitError> {
    add_decoration_with_key(circuit, placed, mode, None)
}

/// Adds a decoration, optionally re-binding a recorded stable key.
///
/// Undo and redo re-create decorations under their original key so that
/// the remaining history entries keep resolving.
pub(crate) fn add_decoration_with_key(
    circuit: &mut CircuitData,
    placed: PlacedDecoration,
    mode: InsertionMode,
    key: Option<DecorationKey>,
) -> Result<DecorationId, CircuitError> {
    tracing::debug!(?placed.position, ?mode, "add_decoration");

    let decoration_id = circuit.layout.decorations_mut().add(
        placed.definition,
        placed.position,
        DisplayState::Temporary,
    )?;
    circuit.submit(InfoMessage::ElementCreated(ElementRef::Decoration(
        decoration_id,
    )));
    if let Some(key) = key {
        circuit.key_index.set_key(decoration_id, key);
    }

    let key = circuit.key_index.decoration_key(decoration_id);
    if let Some(stack) = circuit.history.recording_stack() {
        stack.push_decoration_delete_temporary(key);
    }

    if mode == InsertionMode::Temporary {
        return Ok(decoration_id);
    }

    match change_decoration_insertion_mode(circuit, decoration_id, mode) {
        Ok(()) => Ok(decoration_id),
        Err(error) => {
            let demoted =
                change_decoration_insertion_mode(circuit, decoration_id, InsertionMode::Temporary);
            debug_assert!(demoted.is_ok(), "demotion to temporary cannot fail");
            delete_decoration(circuit, decoration_id)?;
            Err(error)
        }
    }
}

/// Deletes a temporary decoration, recording its re-creation.
pub fn delete_decoration(
    circuit: &mut CircuitData,
    decoration_id: DecorationId,
) -> Result<(), CircuitError> {
    if !circuit.layout.decorations().contains(decoration_id) {
        return Err(CircuitError::InvalidId);
    }
    if circuit.layout.decorations().display_state(decoration_id) != DisplayState::Temporary {
        return Err(CircuitError::InvalidState);
    }

    let key = circuit.key_index.decoration_key(decoration_id);
    let placed = PlacedDecoration {
        definition: circuit.layout.decorations().to_definition(decoration_id),
        position: circuit.layout.decorations().position(decoration_id),
    };
    if let Some(stack) = circuit.history.recording_stack() {
        stack.push_decoration_create_temporary(key, placed);
    }

    let last_id = DecorationId::from_index(circuit.layout.decorations().len() - 1);
    let moved_data = (last_id != decoration_id).then(|| {
        (
            circuit.layout.decorations().calculation_data(last_id),
            circuit
                .layout
                .decorations()
                .display_state(last_id)
                .is_inserted(),
        )
    });

    let moved = circuit.layout.decorations_mut().swap_delete(decoration_id);
    circuit.submit(InfoMessage::ElementDeleted(ElementRef::Decoration(
        decoration_id,
    )));

    if let Some(old_id) = moved {
        let (data, was_inserted) = moved_data.expect("a moved id implies captured data");
        circuit.submit(InfoMessage::ElementIdUpdated {
            new_ref: ElementRef::Decoration(decoration_id),
            old_ref: ElementRef::Decoration(old_id),
        });
        if was_inserted {
            circuit.submit(InfoMessage::InsertedDecorationIdUpdated {
                new_decoration_id: decoration_id,
                old_decoration_id: old_id,
                data,
            });
        }
    }
    Ok(())
}

/// Moves a temporary decoration by a grid delta, recording the inverse
/// move.
pub fn move_decoration(
    circuit: &mut CircuitData,
    decoration_id: DecorationId,
    delta_x: i32,
    delta_y: i32,
) -> Result<(), CircuitError> {
    if !circuit.layout.decorations().contains(decoration_id) {
        return Err(CircuitError::InvalidId);
    }
    if circuit.layout.decorations().display_state(decoration_id) != DisplayState::Temporary {
        return Err(CircuitError::InvalidState);
    }

    let position = circuit.layout.decorations().position(decoration_id);
    let new_position = checked_move_point(position, delta_x, delta_y)?;
    let data = circuit.layout.decorations().calculation_data(decoration_id);
    if (gridlogic_vocabulary::DecorationCalculationData {
        position: new_position,
        ..data
    })
    .max_corner()
    .is_none()
    {
        return Err(CircuitError::InvalidDefinition {
            reason: "bounding rect leaves the grid",
        });
    }

    circuit
        .layout
        .decorations_mut()
        .set_position(decoration_id, new_position);

    let key = circuit.key_index.decoration_key(decoration_id);
    if let Some(stack) = circuit.history.recording_stack() {
        stack.push_decoration_move_temporary(
            key,
            MoveDelta {
                x: -delta_x,
                y: -delta_y,
            },
        );
    }
    Ok(())
}

/// Changes a decoration's insertion mode, recording the inverse
/// transition.
pub fn change_decoration_insertion_mode(
    circuit: &mut CircuitData,
    decoration_id: DecorationId,
    new_mode: InsertionMode,
) -> Result<(), CircuitError> {
    if !circuit.layout.decorations().contains(decoration_id) {
        return Err(CircuitError::InvalidId);
    }

    let state = circuit.layout.decorations().display_state(decoration_id);
    let current: InsertionMode = state.into();
    if current == new_mode {
        return Ok(());
    }
    let key = circuit.key_index.decoration_key(decoration_id);

    match (current, new_mode) {
        (InsertionMode::Temporary, InsertionMode::Collisions) => {
            temporary_to_collisions(circuit, decoration_id);
            if let Some(stack) = circuit.history.recording_stack() {
                stack.push_decoration_colliding_to_temporary(key);
            }
            Ok(())
        }
        (InsertionMode::Temporary, InsertionMode::InsertOrDiscard) => {
            temporary_to_collisions(circuit, decoration_id);
            if let Some(stack) = circuit.history.recording_stack() {
                stack.push_decoration_colliding_to_temporary(key);
            }
            collisions_to_insert(circuit, decoration_id, key)
        }
        (InsertionMode::Collisions, InsertionMode::InsertOrDiscard) => {
            collisions_to_insert(circuit, decoration_id, key)
        }
        (InsertionMode::Collisions, InsertionMode::Temporary) => {
            collisions_to_temporary(circuit, decoration_id);
            if let Some(stack) = circuit.history.recording_stack() {
                stack.push_decoration_temporary_to_colliding(key);
            }
            Ok(())
        }
        (InsertionMode::InsertOrDiscard, InsertionMode::Collisions) => {
            circuit
                .layout
                .decorations_mut()
                .set_display_state(decoration_id, DisplayState::Valid);
            if let Some(stack) = circuit.history.recording_stack() {
                stack.push_decoration_colliding_to_insert(key);
            }
            Ok(())
        }
        (InsertionMode::InsertOrDiscard, InsertionMode::Temporary) => {
            circuit
                .layout
                .decorations_mut()
                .set_display_state(decoration_id, DisplayState::Valid);
            if let Some(stack) = circuit.history.recording_stack() {
                stack.push_decoration_colliding_to_insert(key);
            }
            collisions_to_temporary(circuit, decoration_id);
            if let Some(stack) = circuit.history.recording_stack() {
                stack.push_decoration_temporary_to_colliding(key);
            }
            Ok(())
        }
        _ => unreachable!("all mode transitions are covered"),
    }
}

fn temporary_to_collisions(circuit: &mut CircuitData, decoration_id: DecorationId) {
    let data = circuit.layout.decorations().calculation_data(decoration_id);

    if circuit.index.collision_index().is_decoration_colliding(&data) {
        circuit
            .layout
            .decorations_mut()
            .set_display_state(decoration_id, DisplayState::Colliding);
        return;
    }

    circuit
        .layout
        .decorations_mut()
        .set_display_state(decoration_id, DisplayState::Valid);
    circuit.submit(InfoMessage::DecorationInserted {
        decoration_id,
        data,
    });
}

fn collisions_to_insert(
    circuit: &mut CircuitData,
    decoration_id: DecorationId,
    key: DecorationKey,
) -> Result<(), CircuitError> {
    match circuit.layout.decorations().display_state(decoration_id) {
        DisplayState::Valid => {
            circuit
                .layout
                .decorations_mut()
                .set_display_state(decoration_id, DisplayState::Normal);
            if let Some(stack) = circuit.history.recording_stack() {
                stack.push_decoration_insert_to_colliding(key);
            }
            Ok(())
        }
        DisplayState::Colliding => Err(CircuitError::Collision),
        _ => unreachable!("collision-mode decorations are valid or colliding"),
    }
}

fn collisions_to_temporary(circuit: &mut CircuitData, decoration_id: DecorationId) {
    let state = circuit.layout.decorations().display_state(decoration_id);
    if state == DisplayState::Valid {
        let data = circuit.layout.decorations().calculation_data(decoration_id);
        circuit.submit(InfoMessage::DecorationUninserted {
            decoration_id,
            data,
        });
    }
    circuit
        .layout
        .decorations_mut()
        .set_display_state(decoration_id, DisplayState::Temporary);
}

/// Replaces a text element's attributes, recording the previous value.
pub fn set_decoration_attributes(
    circuit: &mut CircuitData,
    decoration_id: DecorationId,
    attrs: TextElementAttrs,
) -> Result<(), CircuitError> {
    if !circuit.layout.decorations().contains(decoration_id) {
        return Err(CircuitError::InvalidId);
    }

    let previous = circuit
        .layout
        .decorations_mut()
        .set_attrs_text_element(decoration_id, attrs)?;

    let key = circuit.key_index.decoration_key(decoration_id);
    if let Some(stack) = circuit.history.recording_stack() {
        stack.push_decoration_change_attributes(key, previous);
    }
    Ok(())
}
