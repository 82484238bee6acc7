// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifiers for circuit elements.
//!
//! Ids are dense indices into the owning store. Deleting an element
//! swap-removes it, so the last id moves; layers that must survive
//! renumbering listen to the id-update messages or hold stable keys.

use core::fmt;

use crate::part::Part;

macro_rules! dense_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            /// Creates an id from a store index.
            ///
            /// # Panics
            ///
            /// Panics when `index` exceeds `u32::MAX`.
            #[must_use]
            pub fn from_index(index: usize) -> Self {
                Self(u32::try_from(index).expect("store index exceeds id range"))
            }

            /// The store index this id refers to.
            #[must_use]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

dense_id! {
    /// Identifies a logic item in the layout.
    LogicItemId
}

dense_id! {
    /// Identifies a decoration in the layout.
    DecorationId
}

dense_id! {
    /// Identifies a wire and its segment tree.
    WireId
}

dense_id! {
    /// Identifies a segment within one wire's segment tree.
    SegmentIndex
}

/// Aggregate tree holding all segments that are not inserted yet.
pub const TEMPORARY_WIRE_ID: WireId = WireId(0);

/// Aggregate tree holding segments that currently collide.
pub const COLLIDING_WIRE_ID: WireId = WireId(1);

/// First id used for regular, inserted wires.
pub const FIRST_INSERTED_WIRE_ID: WireId = WireId(2);

impl WireId {
    /// Returns whether this is the temporary aggregate.
    #[must_use]
    pub fn is_temporary(self) -> bool {
        self == TEMPORARY_WIRE_ID
    }

    /// Returns whether this is the colliding aggregate.
    #[must_use]
    pub fn is_colliding(self) -> bool {
        self == COLLIDING_WIRE_ID
    }

    /// Returns whether this refers to an inserted wire tree.
    #[must_use]
    pub fn is_inserted(self) -> bool {
        self >= FIRST_INSERTED_WIRE_ID
    }
}

/// Identifies an input or output connector of a circuit element.
///
/// Backed by `i8`; elements have at most [`ConnectionId::MAX_COUNT`]
/// connectors of each kind.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(i8);

impl ConnectionId {
    /// Largest valid connector id.
    pub const MAX: Self = Self(i8::MAX);
    /// Number of connectors representable per kind.
    pub const MAX_COUNT: usize = i8::MAX as usize + 1;

    /// Creates a connector id from a dense index.
    ///
    /// # Panics
    ///
    /// Panics when `index` exceeds [`ConnectionId::MAX`].
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(i8::try_from(index).expect("connector index exceeds id range"))
    }

    /// The dense index of this connector.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConnectionId({})", self.0)
    }
}

/// Stable key of a logic item, unaffected by id renumbering.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogicItemKey(pub u64);

/// Stable key of a decoration, unaffected by id renumbering.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecorationKey(pub u64);

impl fmt::Debug for LogicItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogicItemKey({})", self.0)
    }
}

impl fmt::Debug for DecorationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DecorationKey({})", self.0)
    }
}

/// Key of a live selection in the selection registry.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectionId(pub u64);

impl fmt::Debug for SelectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SelectionId({})", self.0)
    }
}

/// Identifies one line segment in the circuit.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Segment {
    /// The wire whose tree contains the segment.
    pub wire_id: WireId,
    /// Index within the wire's segment tree.
    pub segment_index: SegmentIndex,
}

impl Segment {
    /// Creates a segment id.
    #[must_use]
    pub const fn new(wire_id: WireId, segment_index: SegmentIndex) -> Self {
        Self {
            wire_id,
            segment_index,
        }
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Segment({}, {})", self.wire_id, self.segment_index)
    }
}

/// A sub-range of a specific wire segment.
///
/// This is the smallest granularity of operations and selections on wires.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentPart {
    /// The segment the range lies on.
    pub segment: Segment,
    /// Offset range along the segment.
    pub part: Part,
}

impl SegmentPart {
    /// Creates a segment part.
    #[must_use]
    pub const fn new(segment: Segment, part: Part) -> Self {
        Self { segment, part }
    }
}

impl fmt::Debug for SegmentPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SegmentPart({:?}, {:?})", self.segment, self.part)
    }
}
