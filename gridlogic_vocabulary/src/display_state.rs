// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element lifecycle states and the editing modes that target them.

/// Lifecycle stage of an element in the layout.
///
/// Elements are born `Temporary`, may oscillate between `Colliding` and
/// `Valid` while being placed, and become `Normal` once inserted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DisplayState {
    /// Inserted and part of the circuit.
    Normal,
    /// Marked for insertion; currently free of collisions.
    Valid,
    /// Marked for insertion; currently colliding.
    Colliding,
    /// Not inserted; invisible to the indices.
    Temporary,
}

impl DisplayState {
    /// Returns whether elements in this state participate in the indices.
    #[must_use]
    pub const fn is_inserted(self) -> bool {
        matches!(self, Self::Normal | Self::Valid)
    }
}

/// Target state class of an editing operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InsertionMode {
    /// Commit the element into the circuit or reject the operation.
    InsertOrDiscard,
    /// Track collisions while the element is being placed.
    Collisions,
    /// Keep the element uninserted.
    Temporary,
}

impl From<DisplayState> for InsertionMode {
    fn from(state: DisplayState) -> Self {
        match state {
            DisplayState::Normal => Self::InsertOrDiscard,
            DisplayState::Valid | DisplayState::Colliding => Self::Collisions,
            DisplayState::Temporary => Self::Temporary,
        }
    }
}

/// How a visible-selection operation combines with the selection so far.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SelectionFunction {
    /// Add everything under the rectangle.
    Add,
    /// Remove everything under the rectangle.
    Substract,
    /// Flip membership; resolved into add or substract at the surface.
    Toggle,
}
