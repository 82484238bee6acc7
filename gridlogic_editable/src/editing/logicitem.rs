// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editing operations on logic items.

use gridlogic_layout::message::{ElementRef, InfoMessage};
use gridlogic_vocabulary::{
    checked_move_point, ClockGeneratorAttrs, ConnectionId, DisplayState, InsertionMode,
    LogicItemDefinition, LogicItemId, Point,
};

use crate::circuit_data::CircuitData;
use crate::editing::detail;
use crate::error::CircuitError;

/// A reference to one connector of a logic item.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConnectorRef {
    /// An input connector.
    Input(ConnectionId),
    /// An output connector.
    Output(ConnectionId),
}

/// Adds a logic item and brings it to the requested insertion mode.
///
/// In `InsertOrDiscard` mode a colliding item is removed again, with
/// compensating messages, and the call reports a collision.
pub fn add_logicitem(
    circuit: &mut CircuitData,
    definition: LogicItemDefinition,
    position: Point,
    mode: InsertionMode,
) -> Result<LogicItemId, CircuitError> {
    tracing::debug!(?definition.logicitem_type, ?position, ?mode, "add_logicitem");

    let logicitem_id =
        circuit
            .layout
            .logic_items_mut()
            .add(definition, position, DisplayState::Temporary)?;
    circuit.submit(InfoMessage::ElementCreated(ElementRef::LogicItem(
        logicitem_id,
    )));

    if mode == InsertionMode::Temporary {
        return Ok(logicitem_id);
    }

    match change_logicitem_insertion_mode(circuit, logicitem_id, mode) {
        Ok(()) => Ok(logicitem_id),
        Err(error) => {
            // Discard the rejected item; observers see a net-consistent
            // stream of create followed by delete.
            let demoted = change_logicitem_insertion_mode(
                circuit,
                logicitem_id,
                InsertionMode::Temporary,
            );
            debug_assert!(demoted.is_ok(), "demotion to temporary cannot fail");
            delete_logicitem(circuit, logicitem_id)?;
            Err(error)
        }
    }
}

/// Deletes a logic item.
///
/// Requires the temporary display state; inserted items are demoted
/// first. The swap-removed id is re-announced.
pub fn delete_logicitem(
    circuit: &mut CircuitData,
    logicitem_id: LogicItemId,
) -> Result<(), CircuitError> {
    if !circuit.layout.logic_items().contains(logicitem_id) {
        return Err(CircuitError::InvalidId);
    }
    if circuit.layout.logic_items().display_state(logicitem_id) != DisplayState::Temporary {
        return Err(CircuitError::InvalidState);
    }

    let last_id = LogicItemId::from_index(circuit.layout.logic_items().len() - 1);
    let moved_data = (last_id != logicitem_id).then(|| {
        (
            circuit.layout.logic_items().calculation_data(last_id),
            gridlogic_layout::is_inserted(&circuit.layout, last_id),
        )
    });

    let moved = circuit.layout.logic_items_mut().swap_delete(logicitem_id);
    circuit.submit(InfoMessage::ElementDeleted(ElementRef::LogicItem(
        logicitem_id,
    )));

    if let Some(old_id) = moved {
        let (data, was_inserted) = moved_data.expect("a moved id implies captured data");
        circuit.submit(InfoMessage::ElementIdUpdated {
            new_ref: ElementRef::LogicItem(logicitem_id),
            old_ref: ElementRef::LogicItem(old_id),
        });
        if was_inserted {
            circuit.submit(InfoMessage::InsertedLogicItemIdUpdated {
                new_logicitem_id: logicitem_id,
                old_logicitem_id: old_id,
                data,
            });
        }
    }
    Ok(())
}

/// Moves a temporary logic item by a grid delta.
pub fn move_logicitem(
    circuit: &mut CircuitData,
    logicitem_id: LogicItemId,
    delta_x: i32,
    delta_y: i32,
) -> Result<(), CircuitError> {
    if !circuit.layout.logic_items().contains(logicitem_id) {
        return Err(CircuitError::InvalidId);
    }
    if circuit.layout.logic_items().display_state(logicitem_id) != DisplayState::Temporary {
        return Err(CircuitError::InvalidState);
    }

    let position = circuit.layout.logic_items().position(logicitem_id);
    let new_position = checked_move_point(position, delta_x, delta_y)?;
    circuit
        .layout
        .logic_items_mut()
        .set_position(logicitem_id, new_position);
    Ok(())
}

/// Changes a logic item's insertion mode.
///
/// Transitions to `Collisions` classify the item as valid or colliding;
/// transitions to `InsertOrDiscard` commit valid items and reject
/// colliding ones, leaving them in the colliding state.
pub fn change_logicitem_insertion_mode(
    circuit: &mut CircuitData,
    logicitem_id: LogicItemId,
    new_mode: InsertionMode,
) -> Result<(), CircuitError> {
    if !circuit.layout.logic_items().contains(logicitem_id) {
        return Err(CircuitError::InvalidId);
    }

    let state = circuit.layout.logic_items().display_state(logicitem_id);
    let current: InsertionMode = state.into();
    if current == new_mode {
        return Ok(());
    }

    match (current, new_mode) {
        (InsertionMode::Temporary, InsertionMode::Collisions) => {
            temporary_to_collisions(circuit, logicitem_id);
            Ok(())
        }
        (InsertionMode::Temporary, InsertionMode::InsertOrDiscard) => {
            temporary_to_collisions(circuit, logicitem_id);
            collisions_to_insert(circuit, logicitem_id)
        }
        (InsertionMode::Collisions, InsertionMode::InsertOrDiscard) => {
            collisions_to_insert(circuit, logicitem_id)
        }
        (InsertionMode::Collisions, InsertionMode::Temporary) => {
            collisions_to_temporary(circuit, logicitem_id);
            Ok(())
        }
        (InsertionMode::InsertOrDiscard, InsertionMode::Collisions) => {
            circuit
                .layout
                .logic_items_mut()
                .set_display_state(logicitem_id, DisplayState::Valid);
            Ok(())
        }
        (InsertionMode::InsertOrDiscard, InsertionMode::Temporary) => {
            circuit
                .layout
                .logic_items_mut()
                .set_display_state(logicitem_id, DisplayState::Valid);
            collisions_to_temporary(circuit, logicitem_id);
            Ok(())
        }
        _ => unreachable!("all mode transitions are covered"),
    }
}

fn temporary_to_collisions(circuit: &mut CircuitData, logicitem_id: LogicItemId) {
    let data = circuit.layout.logic_items().calculation_data(logicitem_id);

    if detail::is_logicitem_colliding(circuit, &data) {
        circuit
            .layout
            .logic_items_mut()
            .set_display_state(logicitem_id, DisplayState::Colliding);
        return;
    }

    circuit
        .layout
        .logic_items_mut()
        .set_display_state(logicitem_id, DisplayState::Valid);
    circuit.submit(InfoMessage::LogicItemInserted { logicitem_id, data });
    detail::connect_wires_at_connectors(circuit, &data);
}

fn collisions_to_insert(
    circuit: &mut CircuitData,
    logicitem_id: LogicItemId,
) -> Result<(), CircuitError> {
    match circuit.layout.logic_items().display_state(logicitem_id) {
        DisplayState::Valid => {
            circuit
                .layout
                .logic_items_mut()
                .set_display_state(logicitem_id, DisplayState::Normal);
            Ok(())
        }
        DisplayState::Colliding => Err(CircuitError::Collision),
        _ => unreachable!("collision-mode items are valid or colliding"),
    }
}

fn collisions_to_temporary(circuit: &mut CircuitData, logicitem_id: LogicItemId) {
    let state = circuit.layout.logic_items().display_state(logicitem_id);
    if state == DisplayState::Valid {
        let data = circuit.layout.logic_items().calculation_data(logicitem_id);
        detail::disconnect_wires_at_connectors(circuit, &data);
        circuit.submit(InfoMessage::LogicItemUninserted { logicitem_id, data });
    }
    circuit
        .layout
        .logic_items_mut()
        .set_display_state(logicitem_id, DisplayState::Temporary);
}

/// Replaces the attributes of a clock generator.
pub fn set_logicitem_attributes(
    circuit: &mut CircuitData,
    logicitem_id: LogicItemId,
    attrs: ClockGeneratorAttrs,
) -> Result<(), CircuitError> {
    if !circuit.layout.logic_items().contains(logicitem_id) {
        return Err(CircuitError::InvalidId);
    }
    circuit
        .layout
        .logic_items_mut()
        .set_attrs_clock_generator(logicitem_id, attrs)?;
    Ok(())
}

/// Flips the inversion flag of one connector.
///
/// Requires the temporary display state, as inverters change the
/// connector geometry presented to the simulation.
pub fn toggle_inverter(
    circuit: &mut CircuitData,
    logicitem_id: LogicItemId,
    connector: ConnectorRef,
) -> Result<(), CircuitError> {
    if !circuit.layout.logic_items().contains(logicitem_id) {
        return Err(CircuitError::InvalidId);
    }
    if circuit.layout.logic_items().display_state(logicitem_id) != DisplayState::Temporary {
        return Err(CircuitError::InvalidState);
    }

    let store = circuit.layout.logic_items_mut();
    match connector {
        ConnectorRef::Input(input) => {
            if input.index() >= store.input_count(logicitem_id).count() {
                return Err(CircuitError::InvalidId);
            }
            store.toggle_input_inverter(logicitem_id, input);
        }
        ConnectorRef::Output(output) => {
            if output.index() >= store.output_count(logicitem_id).count() {
                return Err(CircuitError::InvalidId);
            }
            store.toggle_output_inverter(logicitem_id, output);
        }
    }
    Ok(())
}
