// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column-wise storage of logic items.

use core::fmt;

use gridlogic_vocabulary::{
    ClockGeneratorAttrs, ConnectionCount, ConnectionId, DisplayState, LayoutCalculationData,
    LogicItemDefinition, LogicItemId, LogicItemType, Orientation, Point,
};

use crate::error::LayoutError;
use crate::layout_info;

/// All logic items of a layout, stored as parallel columns.
///
/// Ids are indices into the columns. Deletion swap-removes; the caller is
/// told which id moved into the freed slot.
#[derive(Clone, Default, PartialEq)]
pub struct LogicItemStore {
    logicitem_types: Vec<LogicItemType>,
    input_counts: Vec<ConnectionCount>,
    output_counts: Vec<ConnectionCount>,
    orientations: Vec<Orientation>,
    positions: Vec<Point>,
    display_states: Vec<DisplayState>,
    attributes: Vec<Option<ClockGeneratorAttrs>>,
    input_inverters: Vec<Vec<bool>>,
    output_inverters: Vec<Vec<bool>>,
}

impl LogicItemStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            logicitem_types: Vec::new(),
            input_counts: Vec::new(),
            output_counts: Vec::new(),
            orientations: Vec::new(),
            positions: Vec::new(),
            display_states: Vec::new(),
            attributes: Vec::new(),
            input_inverters: Vec::new(),
            output_inverters: Vec::new(),
        }
    }

    /// Returns whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.logicitem_types.is_empty()
    }

    /// Number of live logic items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.logicitem_types.len()
    }

    /// Returns whether `id` refers to a live item.
    #[must_use]
    pub fn contains(&self, id: LogicItemId) -> bool {
        id.index() < self.len()
    }

    /// Validates a definition against its type's constraints.
    pub fn validate_definition(definition: &LogicItemDefinition) -> Result<(), LayoutError> {
        if !layout_info::is_input_output_count_valid(
            definition.logicitem_type,
            definition.input_count,
            definition.output_count,
        ) {
            return Err(LayoutError::invalid_definition(
                "input or output count outside the type's range",
            ));
        }
        if !layout_info::is_orientation_valid(definition.logicitem_type, definition.orientation) {
            return Err(LayoutError::invalid_definition(
                "orientation incompatible with the type's direction policy",
            ));
        }
        let needs_attrs = definition.logicitem_type == LogicItemType::ClockGenerator;
        if needs_attrs != definition.attrs_clock_generator.is_some() {
            return Err(LayoutError::invalid_definition(
                "clock attributes present iff the type is a clock generator",
            ));
        }
        Ok(())
    }

    /// Adds a logic item in the given display state.
    ///
    /// Fails with an invalid-definition error when the definition violates
    /// its type's constraints or the bounding rect leaves the grid.
    pub fn add(
        &mut self,
        definition: LogicItemDefinition,
        position: Point,
        display_state: DisplayState,
    ) -> Result<LogicItemId, LayoutError> {
        Self::validate_definition(&definition)?;

        let data = LayoutCalculationData {
            logicitem_type: definition.logicitem_type,
            position,
            input_count: definition.input_count,
            output_count: definition.output_count,
            orientation: definition.orientation,
        };
        if !layout_info::is_representable(&data) {
            return Err(LayoutError::invalid_definition(
                "bounding rect leaves the grid",
            ));
        }

        let id = LogicItemId::from_index(self.len());
        self.logicitem_types.push(definition.logicitem_type);
        self.input_counts.push(definition.input_count);
        self.output_counts.push(definition.output_count);
        self.orientations.push(definition.orientation);
        self.positions.push(position);
        self.display_states.push(display_state);
        self.attributes.push(definition.attrs_clock_generator);
        self.input_inverters
            .push(vec![false; definition.input_count.count()]);
        self.output_inverters
            .push(vec![false; definition.output_count.count()]);
        Ok(id)
    }

    /// Deletes an item by swap-remove.
    ///
    /// Returns the id that was moved into the freed slot, if any.
    pub fn swap_delete(&mut self, id: LogicItemId) -> Option<LogicItemId> {
        let slot = id.index();
        assert!(slot < self.len(), "logic item id out of range");

        self.logicitem_types.swap_remove(slot);
        self.input_counts.swap_remove(slot);
        self.output_counts.swap_remove(slot);
        self.orientations.swap_remove(slot);
        self.positions.swap_remove(slot);
        self.display_states.swap_remove(slot);
        self.attributes.swap_remove(slot);
        self.input_inverters.swap_remove(slot);
        self.output_inverters.swap_remove(slot);

        let moved = LogicItemId::from_index(self.len());
        (moved != id).then_some(moved)
    }

    /// The element kind.
    #[must_use]
    pub fn logicitem_type(&self, id: LogicItemId) -> LogicItemType {
        self.logicitem_types[id.index()]
    }

    /// Number of inputs.
    #[must_use]
    pub fn input_count(&self, id: LogicItemId) -> ConnectionCount {
        self.input_counts[id.index()]
    }

    /// Number of outputs.
    #[must_use]
    pub fn output_count(&self, id: LogicItemId) -> ConnectionCount {
        self.output_counts[id.index()]
    }

    /// Element orientation.
    #[must_use]
    pub fn orientation(&self, id: LogicItemId) -> Orientation {
        self.orientations[id.index()]
    }

    /// Grid position of the element origin.
    #[must_use]
    pub fn position(&self, id: LogicItemId) -> Point {
        self.positions[id.index()]
    }

    /// Lifecycle state.
    #[must_use]
    pub fn display_state(&self, id: LogicItemId) -> DisplayState {
        self.display_states[id.index()]
    }

    /// Clock attributes, present for clock generators.
    #[must_use]
    pub fn attrs_clock_generator(&self, id: LogicItemId) -> Option<&ClockGeneratorAttrs> {
        self.attributes[id.index()].as_ref()
    }

    /// Moves the element origin.
    pub fn set_position(&mut self, id: LogicItemId, position: Point) {
        self.positions[id.index()] = position;
    }

    /// Changes the lifecycle state.
    pub fn set_display_state(&mut self, id: LogicItemId, display_state: DisplayState) {
        self.display_states[id.index()] = display_state;
    }

    /// Replaces the clock attributes.
    ///
    /// Fails when the item is not a clock generator.
    pub fn set_attrs_clock_generator(
        &mut self,
        id: LogicItemId,
        attrs: ClockGeneratorAttrs,
    ) -> Result<ClockGeneratorAttrs, LayoutError> {
        if self.logicitem_type(id) != LogicItemType::ClockGenerator {
            return Err(LayoutError::invalid_definition(
                "only clock generators carry clock attributes",
            ));
        }
        let slot = &mut self.attributes[id.index()];
        let previous = slot.take().expect("clock generators always carry attributes");
        *slot = Some(attrs);
        Ok(previous)
    }

    /// Returns whether an input connector is inverted.
    #[must_use]
    pub fn input_inverted(&self, id: LogicItemId, input: ConnectionId) -> bool {
        self.input_inverters[id.index()][input.index()]
    }

    /// Returns whether an output connector is inverted.
    #[must_use]
    pub fn output_inverted(&self, id: LogicItemId, output: ConnectionId) -> bool {
        self.output_inverters[id.index()][output.index()]
    }

    /// Flips the inversion flag of an input connector.
    pub fn toggle_input_inverter(&mut self, id: LogicItemId, input: ConnectionId) {
        let flag = &mut self.input_inverters[id.index()][input.index()];
        *flag = !*flag;
    }

    /// Flips the inversion flag of an output connector.
    pub fn toggle_output_inverter(&mut self, id: LogicItemId, output: ConnectionId) {
        let flag = &mut self.output_inverters[id.index()][output.index()];
        *flag = !*flag;
    }

    /// The geometry inputs of an item.
    #[must_use]
    pub fn calculation_data(&self, id: LogicItemId) -> LayoutCalculationData {
        LayoutCalculationData {
            logicitem_type: self.logicitem_type(id),
            position: self.position(id),
            input_count: self.input_count(id),
            output_count: self.output_count(id),
            orientation: self.orientation(id),
        }
    }

    /// Rebuilds the definition of an item.
    #[must_use]
    pub fn to_definition(&self, id: LogicItemId) -> LogicItemDefinition {
        LogicItemDefinition {
            logicitem_type: self.logicitem_type(id),
            input_count: self.input_count(id),
            output_count: self.output_count(id),
            orientation: self.orientation(id),
            attrs_clock_generator: self.attributes[id.index()].clone(),
        }
    }
}

impl fmt::Debug for LogicItemStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<LogicItemStore with {} items>", self.len())
    }
}
