// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Storage of wires and their segment trees.

use core::fmt;

use gridlogic_vocabulary::{WireId, FIRST_INSERTED_WIRE_ID};

use crate::segment_tree::SegmentTree;

/// All wires of a layout.
///
/// The first two trees are the uninserted aggregates (temporary and
/// colliding) and always exist; inserted wires follow. Deleting an
/// inserted wire swap-removes its tree, and the caller is told which wire
/// id moved.
#[derive(Clone, PartialEq)]
pub struct WireStore {
    trees: Vec<SegmentTree>,
}

impl Default for WireStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WireStore {
    /// Creates a store holding only the two empty aggregates.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trees: vec![SegmentTree::new(), SegmentTree::new()],
        }
    }

    /// Number of wire trees, aggregates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Returns whether only the two empty aggregates exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.len() == FIRST_INSERTED_WIRE_ID.index()
            && self.trees.iter().all(SegmentTree::is_empty)
    }

    /// Returns whether `wire_id` refers to an existing tree.
    #[must_use]
    pub fn contains(&self, wire_id: WireId) -> bool {
        wire_id.index() < self.trees.len()
    }

    /// The segment tree of a wire.
    ///
    /// # Panics
    ///
    /// Panics for out-of-range wire ids.
    #[must_use]
    pub fn segment_tree(&self, wire_id: WireId) -> &SegmentTree {
        &self.trees[wire_id.index()]
    }

    /// Mutable access to the segment tree of a wire.
    #[must_use]
    pub fn modifiable_segment_tree(&mut self, wire_id: WireId) -> &mut SegmentTree {
        &mut self.trees[wire_id.index()]
    }

    /// Appends a new, empty inserted wire and returns its id.
    pub fn add_wire(&mut self) -> WireId {
        let id = WireId::from_index(self.trees.len());
        self.trees.push(SegmentTree::new());
        id
    }

    /// Deletes an inserted wire tree by swap-remove.
    ///
    /// Returns the wire id that was moved into the freed slot, if any.
    ///
    /// # Panics
    ///
    /// Panics when asked to delete one of the two aggregates.
    pub fn swap_delete_wire(&mut self, wire_id: WireId) -> Option<WireId> {
        assert!(
            wire_id.is_inserted(),
            "the uninserted aggregates cannot be deleted"
        );
        let slot = wire_id.index();
        assert!(slot < self.trees.len(), "wire id out of range");

        self.trees.swap_remove(slot);

        let moved = WireId::from_index(self.trees.len());
        (moved != wire_id).then_some(moved)
    }
}

impl fmt::Debug for WireStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<WireStore with {} wires>", self.trees.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlogic_vocabulary::{
        OrderedLine, Point, SegmentInfo, COLLIDING_WIRE_ID, TEMPORARY_WIRE_ID,
    };

    #[test]
    fn aggregates_always_exist() {
        let store = WireStore::new();
        assert!(store.is_empty());
        assert!(store.contains(TEMPORARY_WIRE_ID));
        assert!(store.contains(COLLIDING_WIRE_ID));
        assert!(!store.contains(FIRST_INSERTED_WIRE_ID));
    }

    #[test]
    fn wire_deletion_swap_removes() {
        let mut store = WireStore::new();
        let a = store.add_wire();
        let b = store.add_wire();
        let c = store.add_wire();
        assert_eq!(a, FIRST_INSERTED_WIRE_ID);

        let line = OrderedLine::new(Point::new(0, 0), Point::new(3, 0)).unwrap();
        store
            .modifiable_segment_tree(c)
            .add_segment(SegmentInfo::shadow(line));

        let moved = store.swap_delete_wire(a);
        assert_eq!(moved, Some(c));
        assert_eq!(store.segment_tree(a).len(), 1);
        assert!(store.contains(b));
        assert!(!store.contains(c));
    }
}
