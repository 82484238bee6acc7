// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column-wise storage of decorations.

use core::fmt;

use gridlogic_vocabulary::{
    DecorationCalculationData, DecorationDefinition, DecorationId, DecorationType, DisplayState,
    Point, Size2d, TextElementAttrs,
};

use crate::error::LayoutError;

/// All decorations of a layout, stored as parallel columns.
///
/// Ids are indices into the columns; deletion swap-removes.
#[derive(Clone, Default, PartialEq)]
pub struct DecorationStore {
    decoration_types: Vec<DecorationType>,
    positions: Vec<Point>,
    sizes: Vec<Size2d>,
    display_states: Vec<DisplayState>,
    attributes: Vec<Option<TextElementAttrs>>,
}

impl DecorationStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            decoration_types: Vec::new(),
            positions: Vec::new(),
            sizes: Vec::new(),
            display_states: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Returns whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decoration_types.is_empty()
    }

    /// Number of live decorations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decoration_types.len()
    }

    /// Returns whether `id` refers to a live decoration.
    #[must_use]
    pub fn contains(&self, id: DecorationId) -> bool {
        id.index() < self.len()
    }

    /// Validates a definition against its type's constraints.
    pub fn validate_definition(definition: &DecorationDefinition) -> Result<(), LayoutError> {
        let needs_attrs = definition.decoration_type == DecorationType::TextElement;
        if needs_attrs != definition.attrs_text_element.is_some() {
            return Err(LayoutError::invalid_definition(
                "text attributes present iff the type is a text element",
            ));
        }
        Ok(())
    }

    /// Adds a decoration in the given display state.
    ///
    /// Fails when the definition is inconsistent or the decoration's rect
    /// leaves the grid. Sizes plus positions are checked with 32-bit
    /// arithmetic, so oversized definitions are caught instead of wrapping.
    pub fn add(
        &mut self,
        definition: DecorationDefinition,
        position: Point,
        display_state: DisplayState,
    ) -> Result<DecorationId, LayoutError> {
        Self::validate_definition(&definition)?;

        let data = DecorationCalculationData {
            position,
            size: definition.size,
            decoration_type: definition.decoration_type,
        };
        if data.max_corner().is_none() {
            return Err(LayoutError::invalid_definition(
                "bounding rect leaves the grid",
            ));
        }

        let id = DecorationId::from_index(self.len());
        self.decoration_types.push(definition.decoration_type);
        self.positions.push(position);
        self.sizes.push(definition.size);
        self.display_states.push(display_state);
        self.attributes.push(definition.attrs_text_element);
        Ok(id)
    }

    /// Deletes a decoration by swap-remove.
    ///
    /// Returns the id that was moved into the freed slot, if any.
    pub fn swap_delete(&mut self, id: DecorationId) -> Option<DecorationId> {
        let slot = id.index();
        assert!(slot < self.len(), "decoration id out of range");

        self.decoration_types.swap_remove(slot);
        self.positions.swap_remove(slot);
        self.sizes.swap_remove(slot);
        self.display_states.swap_remove(slot);
        self.attributes.swap_remove(slot);

        let moved = DecorationId::from_index(self.len());
        (moved != id).then_some(moved)
    }

    /// The decoration kind.
    #[must_use]
    pub fn decoration_type(&self, id: DecorationId) -> DecorationType {
        self.decoration_types[id.index()]
    }

    /// Grid position of the decoration origin.
    #[must_use]
    pub fn position(&self, id: DecorationId) -> Point {
        self.positions[id.index()]
    }

    /// Rectangular extent.
    #[must_use]
    pub fn size(&self, id: DecorationId) -> Size2d {
        self.sizes[id.index()]
    }

    /// Lifecycle state.
    #[must_use]
    pub fn display_state(&self, id: DecorationId) -> DisplayState {
        self.display_states[id.index()]
    }

    /// Text attributes, present for text elements.
    #[must_use]
    pub fn attrs_text_element(&self, id: DecorationId) -> Option<&TextElementAttrs> {
        self.attributes[id.index()].as_ref()
    }

    /// Moves the decoration origin.
    pub fn set_position(&mut self, id: DecorationId, position: Point) {
        self.positions[id.index()] = position;
    }

    /// Changes the lifecycle state.
    pub fn set_display_state(&mut self, id: DecorationId, display_state: DisplayState) {
        self.display_states[id.index()] = display_state;
    }

    /// Replaces the text attributes, returning the previous value.
    ///
    /// Fails when the decoration is not a text element.
    pub fn set_attrs_text_element(
        &mut self,
        id: DecorationId,
        attrs: TextElementAttrs,
    ) -> Result<TextElementAttrs, LayoutError> {
        if self.decoration_type(id) != DecorationType::TextElement {
            return Err(LayoutError::invalid_definition(
                "only text elements carry text attributes",
            ));
        }
        let slot = &mut self.attributes[id.index()];
        let previous = slot.take().expect("text elements always carry attributes");
        *slot = Some(attrs);
        Ok(previous)
    }

    /// The geometry inputs of a decoration.
    #[must_use]
    pub fn calculation_data(&self, id: DecorationId) -> DecorationCalculationData {
        DecorationCalculationData {
            position: self.position(id),
            size: self.size(id),
            decoration_type: self.decoration_type(id),
        }
    }

    /// Rebuilds the definition of a decoration.
    #[must_use]
    pub fn to_definition(&self, id: DecorationId) -> DecorationDefinition {
        DecorationDefinition {
            decoration_type: self.decoration_type(id),
            size: self.size(id),
            attrs_text_element: self.attributes[id.index()].clone(),
        }
    }
}

impl fmt::Debug for DecorationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<DecorationStore with {} items>", self.len())
    }
}
