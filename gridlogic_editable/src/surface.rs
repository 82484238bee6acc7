// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The public editing surface.

use core::fmt;

use gridlogic_history::{has_ungrouped_entries, reopen_group};
use gridlogic_index::LayoutIndex;
use gridlogic_layout::message::InfoMessage;
use gridlogic_layout::Layout;
use gridlogic_selection::{Selection, SelectionResource};
use gridlogic_vocabulary::{
    ClockGeneratorAttrs, DecorationId, InsertionMode, Line, LogicItemDefinition, LogicItemId,
    Offset, PlacedDecoration, Point, RectFine, Segment, SegmentPart, SelectionFunction,
    SelectionId, TextElementAttrs,
};

use crate::circuit_data::CircuitData;
use crate::editing::{self, ConnectorRef};
use crate::error::CircuitError;

/// The editable circuit: editing operations, read access, selections,
/// visible selection, and history, over one [`CircuitData`].
///
/// This is the surface a GUI or command layer talks to. Operations are
/// synchronous and atomic; observers registered with
/// [`EditableCircuit::on_message`] see every committed mutation in order.
#[derive(Default)]
pub struct EditableCircuit {
    circuit: CircuitData,
}

impl EditableCircuit {
    /// Creates an empty circuit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a circuit that records all emitted messages.
    #[must_use]
    pub fn with_message_log() -> Self {
        let mut circuit = CircuitData::new();
        circuit.messages = Some(Vec::new());
        Self { circuit }
    }

    /// Read access to the layout.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.circuit.layout
    }

    /// Read access to the derived indices.
    #[must_use]
    pub fn layout_index(&self) -> &LayoutIndex {
        &self.circuit.index
    }

    /// The aggregate, for crate-level helpers and tests.
    #[must_use]
    pub fn circuit_data(&self) -> &CircuitData {
        &self.circuit
    }

    /// Mutable access to the aggregate, for crate-level helpers.
    #[must_use]
    pub fn circuit_data_mut(&mut self) -> &mut CircuitData {
        &mut self.circuit
    }

    /// Registers an observer for every committed mutation.
    pub fn on_message(&mut self, observer: impl FnMut(&InfoMessage) + 'static) {
        self.circuit.observers.push(Box::new(observer));
    }

    /// The recorded message log, when enabled.
    #[must_use]
    pub fn message_log(&self) -> Option<&[InfoMessage]> {
        self.circuit.messages.as_deref()
    }

    //
    // Logic items
    //

    /// Adds a logic item in the given mode.
    pub fn add_logicitem(
        &mut self,
        definition: LogicItemDefinition,
        position: Point,
        mode: InsertionMode,
    ) -> Result<LogicItemId, CircuitError> {
        self.user_edit(|circuit| editing::add_logicitem(circuit, definition, position, mode))
    }

    /// Deletes a temporary logic item.
    pub fn delete_logicitem(&mut self, logicitem_id: LogicItemId) -> Result<(), CircuitError> {
        self.user_edit(|circuit| editing::delete_logicitem(circuit, logicitem_id))
    }

    /// Moves a temporary logic item by a grid delta.
    pub fn move_logicitem(
        &mut self,
        logicitem_id: LogicItemId,
        delta_x: i32,
        delta_y: i32,
    ) -> Result<(), CircuitError> {
        self.user_edit(|circuit| editing::move_logicitem(circuit, logicitem_id, delta_x, delta_y))
    }

    /// Changes a logic item's insertion mode.
    pub fn change_logicitem_mode(
        &mut self,
        logicitem_id: LogicItemId,
        mode: InsertionMode,
    ) -> Result<(), CircuitError> {
        self.user_edit(|circuit| {
            editing::change_logicitem_insertion_mode(circuit, logicitem_id, mode)
        })
    }

    /// Replaces a clock generator's attributes.
    pub fn change_logicitem_attributes(
        &mut self,
        logicitem_id: LogicItemId,
        attrs: ClockGeneratorAttrs,
    ) -> Result<(), CircuitError> {
        self.user_edit(|circuit| editing::set_logicitem_attributes(circuit, logicitem_id, attrs))
    }

    /// Flips the inversion flag of one connector.
    pub fn toggle_inverter(
        &mut self,
        logicitem_id: LogicItemId,
        connector: ConnectorRef,
    ) -> Result<(), CircuitError> {
        self.user_edit(|circuit| editing::toggle_inverter(circuit, logicitem_id, connector))
    }

    //
    // Decorations
    //

    /// Adds a decoration in the given mode.
    pub fn add_decoration(
        &mut self,
        placed: PlacedDecoration,
        mode: InsertionMode,
    ) -> Result<DecorationId, CircuitError> {
        self.user_edit(|circuit| editing::add_decoration(circuit, placed, mode))
    }

    /// Deletes a temporary decoration.
    pub fn delete_decoration(&mut self, decoration_id: DecorationId) -> Result<(), CircuitError> {
        self.user_edit(|circuit| editing::delete_decoration(circuit, decoration_id))
    }

    /// Moves a temporary decoration by a grid delta.
    pub fn move_decoration(
        &mut self,
        decoration_id: DecorationId,
        delta_x: i32,
        delta_y: i32,
    ) -> Result<(), CircuitError> {
        self.user_edit(|circuit| {
            editing::move_decoration(circuit, decoration_id, delta_x, delta_y)
        })
    }

    /// Changes a decoration's insertion mode.
    pub fn change_decoration_mode(
        &mut self,
        decoration_id: DecorationId,
        mode: InsertionMode,
    ) -> Result<(), CircuitError> {
        self.user_edit(|circuit| {
            editing::change_decoration_insertion_mode(circuit, decoration_id, mode)
        })
    }

    /// Replaces a text element's attributes.
    pub fn change_decoration_attributes(
        &mut self,
        decoration_id: DecorationId,
        attrs: TextElementAttrs,
    ) -> Result<(), CircuitError> {
        self.user_edit(|circuit| {
            editing::set_decoration_attributes(circuit, decoration_id, attrs)
        })
    }

    //
    // Wires
    //

    /// Adds a wire segment in the given mode.
    pub fn add_wire_segment(
        &mut self,
        line: Line,
        mode: InsertionMode,
    ) -> Result<SegmentPart, CircuitError> {
        self.user_edit(|circuit| editing::add_wire_segment(circuit, line, mode))
    }

    /// Deletes a range of a wire segment.
    pub fn delete_wire_segment(&mut self, segment_part: SegmentPart) -> Result<(), CircuitError> {
        self.user_edit(|circuit| editing::delete_wire_segment(circuit, segment_part))
    }

    /// Splits a wire segment at an offset.
    pub fn split_wire(
        &mut self,
        segment: Segment,
        offset: Offset,
    ) -> Result<Segment, CircuitError> {
        self.user_edit(|circuit| editing::split_wire_segment(circuit, segment, offset))
    }

    /// Merges two collinear, touching segments of one wire.
    pub fn merge_wires(
        &mut self,
        segment_a: Segment,
        segment_b: Segment,
    ) -> Result<Segment, CircuitError> {
        self.user_edit(|circuit| editing::merge_wire_segments(circuit, segment_a, segment_b))
    }

    /// Moves a temporary wire segment by a grid delta.
    pub fn move_wire_segment(
        &mut self,
        segment: Segment,
        delta_x: i32,
        delta_y: i32,
    ) -> Result<(), CircuitError> {
        self.user_edit(|circuit| {
            editing::move_temporary_wire_segment(circuit, segment, delta_x, delta_y)
        })
    }

    //
    // Selections
    //

    /// Allocates a selection and returns its owning handle.
    #[must_use]
    pub fn create_selection(&self) -> SelectionResource {
        self.circuit.selection_store.create_selection()
    }

    /// Mutates a live selection through its id.
    pub fn with_selection_mut<R>(
        &self,
        selection_id: SelectionId,
        f: impl FnOnce(&mut Selection) -> R,
    ) -> Option<R> {
        self.circuit.selection_store.with_selection_mut(selection_id, f)
    }

    /// Reads a live selection through its id.
    pub fn with_selection<R>(
        &self,
        selection_id: SelectionId,
        f: impl FnOnce(&Selection) -> R,
    ) -> Option<R> {
        self.circuit.selection_store.with_selection(selection_id, f)
    }

    //
    // Visible selection
    //

    /// Clears the visible selection.
    pub fn visible_selection_clear(&mut self) {
        let _ = self.user_edit(|circuit| -> Result<(), CircuitError> {
            editing::visible_selection_clear(circuit);
            Ok(())
        });
    }

    /// Replaces the visible selection.
    pub fn visible_selection_set(&mut self, selection: Selection) {
        let _ = self.user_edit(|circuit| -> Result<(), CircuitError> {
            editing::visible_selection_set(circuit, selection);
            Ok(())
        });
    }

    /// Appends a rubber-band operation.
    pub fn visible_selection_add_operation(
        &mut self,
        function: SelectionFunction,
        rect: RectFine,
    ) {
        let _ = self.user_edit(|circuit| -> Result<(), CircuitError> {
            editing::visible_selection_add_operation(circuit, function, rect);
            Ok(())
        });
    }

    /// Replaces the rectangle of the last rubber-band operation.
    pub fn visible_selection_update_last(&mut self, rect: RectFine) -> Result<(), CircuitError> {
        self.user_edit(|circuit| editing::visible_selection_update_last(circuit, rect))
    }

    /// Removes the last rubber-band operation.
    pub fn visible_selection_pop_last(&mut self) -> Result<(), CircuitError> {
        self.user_edit(editing::visible_selection_pop_last)
    }

    /// Runs `f` on the materialized visible selection.
    pub fn with_visible_selection<R>(&self, f: impl FnOnce(&Selection) -> R) -> R {
        self.circuit
            .visible_selection
            .with_selection(&self.circuit.layout, &self.circuit.index, f)
    }

    //
    // History
    //

    /// Closes the current undo group; subsequent edits start a new one.
    pub fn begin_group(&mut self) {
        self.circuit.history.undo_stack.push_new_group();
    }

    /// Reopens the previous group so further edits join it.
    pub fn reopen_last_group(&mut self) {
        reopen_group(&mut self.circuit.history.undo_stack);
    }

    /// Returns whether edits exist above the last group marker.
    #[must_use]
    pub fn has_ungrouped_edits(&self) -> bool {
        has_ungrouped_entries(&self.circuit.history.undo_stack)
    }

    /// Reverts the most recent undo group.
    pub fn undo(&mut self) {
        self.circuit.history.undo_stack.push_new_group();
        editing::undo_group(&mut self.circuit);
        self.finish_operation();
    }

    /// Re-applies the most recent redo group.
    pub fn redo(&mut self) {
        editing::redo_group(&mut self.circuit);
        self.finish_operation();
    }

    /// Drops both history stacks.
    pub fn clear_history(&mut self) {
        self.circuit.history.clear();
    }

    /// Runs a user-initiated edit: the redo stack is invalidated and the
    /// aggregate is re-validated afterwards in debug builds.
    fn user_edit<R>(
        &mut self,
        f: impl FnOnce(&mut CircuitData) -> Result<R, CircuitError>,
    ) -> Result<R, CircuitError> {
        self.circuit.history.redo_stack.clear();
        let result = f(&mut self.circuit);
        self.finish_operation();
        result
    }

    fn finish_operation(&mut self) {
        if cfg!(debug_assertions) {
            self.circuit.validate();
        }
    }
}

impl fmt::Debug for EditableCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditableCircuit")
            .field("circuit", &self.circuit)
            .finish()
    }
}
