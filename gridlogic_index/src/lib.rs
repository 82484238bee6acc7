// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gridlogic Index: derived lookup structures over the circuit layout.
//!
//! [`LayoutIndex`] bundles six sub-indices, each of which is maintained
//! purely from the [`InfoMessage`](gridlogic_layout::message::InfoMessage)
//! stream of committed mutations:
//!
//! - [`LogicItemConnectionIndex`] twice (inputs, outputs): grid point to
//!   logic-item connector.
//! - [`WireConnectionIndex`] twice (inputs, outputs): grid point to wire
//!   endpoint.
//! - [`CollisionIndex`]: per-cell occupancy classification driving the
//!   collision verdicts of the editing layer.
//! - [`SpatialIndex`]: an R-tree over inserted elements and segments for
//!   rectangle selection and point queries.
//!
//! All sub-indices replay deterministically: a fresh index built from the
//! recorded message stream of any editing sequence equals the live index.
//! The handlers assert the expected previous cell contents on every write,
//! so a desynchronized index fails fast instead of drifting.

mod collision;
mod connection;
mod rtree;
mod spatial;

pub use collision::{CellState, CollisionIndex};
pub use connection::{
    LogicItemConnectionEntry, LogicItemConnectionIndex, WireConnectionEntry, WireConnectionIndex,
};
pub use rtree::RTree;
pub use spatial::{SpatialIndex, SpatialPayload};

use gridlogic_layout::message::{generate_inserted_messages, InfoMessage};
use gridlogic_layout::Layout;

/// All derived indices of one layout.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutIndex {
    logicitem_inputs: LogicItemConnectionIndex,
    logicitem_outputs: LogicItemConnectionIndex,
    wire_inputs: WireConnectionIndex,
    wire_outputs: WireConnectionIndex,
    collision_index: CollisionIndex,
    spatial_index: SpatialIndex,
}

impl Default for LayoutIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutIndex {
    /// Creates empty indices.
    #[must_use]
    pub fn new() -> Self {
        Self {
            logicitem_inputs: LogicItemConnectionIndex::inputs(),
            logicitem_outputs: LogicItemConnectionIndex::outputs(),
            wire_inputs: WireConnectionIndex::inputs(),
            wire_outputs: WireConnectionIndex::outputs(),
            collision_index: CollisionIndex::new(),
            spatial_index: SpatialIndex::new(),
        }
    }

    /// Builds the indices of an existing layout by replay.
    #[must_use]
    pub fn from_layout(layout: &Layout) -> Self {
        let mut index = Self::new();
        generate_inserted_messages(layout, |message| index.submit(&message));
        index
    }

    /// Applies one committed mutation to every sub-index.
    pub fn submit(&mut self, message: &InfoMessage) {
        tracing::trace!(?message, "index update");

        self.logicitem_inputs.submit(message);
        self.logicitem_outputs.submit(message);
        self.wire_inputs.submit(message);
        self.wire_outputs.submit(message);
        self.collision_index.submit(message);
        self.spatial_index.submit(message);
    }

    /// Point lookup of logic-item inputs.
    #[must_use]
    pub fn logicitem_input_index(&self) -> &LogicItemConnectionIndex {
        &self.logicitem_inputs
    }

    /// Point lookup of logic-item outputs.
    #[must_use]
    pub fn logicitem_output_index(&self) -> &LogicItemConnectionIndex {
        &self.logicitem_outputs
    }

    /// Point lookup of wire inputs.
    #[must_use]
    pub fn wire_input_index(&self) -> &WireConnectionIndex {
        &self.wire_inputs
    }

    /// Point lookup of wire outputs.
    #[must_use]
    pub fn wire_output_index(&self) -> &WireConnectionIndex {
        &self.wire_outputs
    }

    /// Per-cell occupancy classification.
    #[must_use]
    pub fn collision_index(&self) -> &CollisionIndex {
        &self.collision_index
    }

    /// Spatial queries over inserted elements and segments.
    #[must_use]
    pub fn spatial_index(&self) -> &SpatialIndex {
        &self.spatial_index
    }

    /// Asserts that a fresh replay of `layout` produces these indices.
    ///
    /// # Panics
    ///
    /// Panics when any sub-index differs; a desynchronized index is a
    /// programming error.
    pub fn validate(&self, layout: &Layout) {
        let rebuilt = Self::from_layout(layout);
        assert!(
            *self == rebuilt,
            "live index diverged from a fresh replay of the layout"
        );
    }
}
