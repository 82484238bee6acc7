// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gridlogic Vocabulary: the strong types shared by every layer of the
//! circuit editor core.
//!
//! Circuits live on an integer grid. Positions, line segments, sub-segment
//! ranges, element identifiers, and lifecycle states all get their own
//! newtype here so that the editing, indexing, and history layers cannot mix
//! them up. The guiding rules:
//!
//! - Construction enforces the invariant. An [`OrderedLine`] is always
//!   axis-aligned with `p0 < p1`; a [`Part`] always has `begin < end`. Code
//!   holding one of these values never needs to re-validate it.
//! - Arithmetic that can leave the representable range goes through checked
//!   routines returning [`OverflowError`]; there is no silent wrapping.
//! - Identifiers are dense indices into the owning store. A freed id may be
//!   reassigned; stable keys ([`LogicItemKey`], [`DecorationKey`]) exist for
//!   layers that must survive renumbering.
//!
//! Sub-grid ("fine") coordinates are plain `f64` values carried in
//! [`kurbo`] types; see [`PointFine`] and [`RectFine`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod color;
mod connection_count;
mod display_state;
mod element;
mod error;
mod geometry;
mod grid;
mod ids;
mod line;
mod offset;
mod orientation;
mod part;
mod point;
mod rect;
mod segment_info;
mod time;

pub use color::Color;
pub use connection_count::ConnectionCount;
pub use display_state::{DisplayState, InsertionMode, SelectionFunction};
pub use element::{
    ClockGeneratorAttrs, DecorationCalculationData, DecorationDefinition, DecorationType,
    HorizontalAlignment, LayoutCalculationData, LogicItemDefinition, LogicItemType,
    PlacedDecoration, Size2d, TextElementAttrs, TextStyle,
};
pub use error::{OverflowError, RangeError};
pub use geometry::{
    add_unchecked_line, add_unchecked_point, checked_move_point, is_representable_line,
    is_representable_point, is_representable_rect, part_from_fine_rect, to_fine_rect,
    to_full_part, to_line, to_offset, to_point,
};
pub use grid::Coord;
pub use ids::{
    ConnectionId, DecorationId, DecorationKey, LogicItemId, LogicItemKey, Segment, SegmentIndex,
    SegmentPart, SelectionId, WireId, COLLIDING_WIRE_ID, FIRST_INSERTED_WIRE_ID,
    TEMPORARY_WIRE_ID,
};
pub use line::{Line, OrderedLine};
pub use offset::Offset;
pub use orientation::{are_orientations_compatible, DirectionType, Orientation};
pub use part::Part;
pub use point::{is_orthogonal, Point, PointFine, RectFine};
pub use rect::Rect;
pub use segment_info::{SegmentInfo, SegmentPointType};
pub use time::{Delay, Time};
