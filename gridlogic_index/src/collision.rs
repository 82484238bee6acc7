// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-cell occupancy classification.
//!
//! Every occupied grid cell carries three owner slots: a body owner (logic
//! item or decoration) and one wire owner per axis. Two sentinels annotate
//! cells beyond plain ownership: a connection tag marks "this cell anchors
//! a connector", a wire-point tag is reserved for "visual crossing only"
//! cells. Shadow points and visual cross points contribute nothing here.
//! The user-facing cell state is a pure function of the triple
//! ([`CollisionIndex::state`]); insertion and removal assert the expected
//! previous slot contents, so a desynchronized index fails fast.

use gridlogic_layout::layout_info::{element_body_points, input_locations, output_locations};
use gridlogic_layout::message::{ElementRef, InfoMessage};
use gridlogic_vocabulary::{
    DecorationCalculationData, LayoutCalculationData, OrderedLine, Point, SegmentInfo,
    SegmentPointType, WireId,
};
use hashbrown::HashMap;

/// Content of one wire owner slot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum WireSlot {
    /// Nothing occupies the slot.
    #[default]
    Free,
    /// A wire segment of this axis occupies the cell.
    Wire(WireId),
    /// The cell anchors a connector.
    ConnectionTag,
    /// Reserved annotation for visual crossings.
    ///
    /// Visual cross points currently contribute nothing to the map, like
    /// shadow points; the sentinel stays part of the cell derivation.
    #[allow(dead_code, reason = "reserved in the cell derivation; no current writer")]
    WirePointTag,
}

impl WireSlot {
    const fn is_free(self) -> bool {
        matches!(self, Self::Free)
    }

    const fn wire(self) -> Option<WireId> {
        match self {
            Self::Wire(wire_id) => Some(wire_id),
            _ => None,
        }
    }
}

/// The three owner slots of one occupied cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct CollisionData {
    body: Option<ElementRef>,
    horizontal: WireSlot,
    vertical: WireSlot,
}

impl CollisionData {
    /// A cell holding at most a leftover connection tag is dropped.
    fn is_empty(&self) -> bool {
        self.body.is_none()
            && self.horizontal.is_free()
            && matches!(self.vertical, WireSlot::Free | WireSlot::ConnectionTag)
    }
}

/// User-facing classification of one occupied cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellState {
    /// Body cell of a logic item or decoration.
    ElementBody,
    /// Connector cell of a logic item.
    ElementConnection,
    /// Endpoint connector cell of a wire.
    WireConnection,
    /// Interior of a horizontal wire segment.
    WireHorizontal,
    /// Interior of a vertical wire segment.
    WireVertical,
    /// Cell where segments of one wire meet end to interior.
    WirePoint,
    /// Cell where wire segments cross.
    WireCrossing,
    /// A wire connector meeting an element connector.
    ElementWireConnection,
    /// No consistent interpretation; always collides.
    Invalid,
}

/// What a candidate element contributes to one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ItemType {
    ElementBody,
    ElementConnection,
    WireConnection,
    WireHorizontal,
    WireVertical,
    WirePoint,
    /// Probe used for candidate lines; never inserted.
    WireNewUnknownPoint,
}

/// Owner written into a cell slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Owner {
    Element(ElementRef),
    Wire(WireId),
}

type CellMap = HashMap<Point, CollisionData, foldhash::fast::RandomState>;

/// Maps occupied grid cells to their owner triple.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionIndex {
    map: CellMap,
}

/// Walks the `(point, item_type)` contributions of a logic item.
fn iter_item_cells(
    data: &LayoutCalculationData,
    mut visit: impl FnMut(Point, ItemType) -> bool,
) -> bool {
    for connector in input_locations(data) {
        if !visit(connector.position, ItemType::ElementConnection) {
            return false;
        }
    }
    for point in element_body_points(data) {
        if !visit(point, ItemType::ElementBody) {
            return false;
        }
    }
    for connector in output_locations(data) {
        if !visit(connector.position, ItemType::ElementConnection) {
            return false;
        }
    }
    true
}

/// Walks the `(point, item_type)` contributions of a decoration.
fn iter_decoration_cells(
    data: &DecorationCalculationData,
    mut visit: impl FnMut(Point, ItemType) -> bool,
) -> bool {
    let max = data
        .max_corner()
        .expect("inserted decorations stay on the grid");
    let mut y = data.position.y;
    loop {
        let mut x = data.position.x;
        loop {
            if !visit(Point { x, y }, ItemType::ElementBody) {
                return false;
            }
            if x == max.x {
                break;
            }
            x = x.add_unchecked(1);
        }
        if y == max.y {
            break;
        }
        y = y.add_unchecked(1);
    }
    true
}

/// The cell contribution of a segment endpoint type.
fn endpoint_item_type(point_type: SegmentPointType) -> Option<ItemType> {
    match point_type {
        SegmentPointType::Input | SegmentPointType::Output => Some(ItemType::WireConnection),
        SegmentPointType::CollidingPoint => Some(ItemType::WirePoint),
        SegmentPointType::CrossPointHorizontal => Some(ItemType::WireHorizontal),
        SegmentPointType::CrossPointVertical => Some(ItemType::WireVertical),
        // Visual crossings annotate rendering only; like shadow points
        // they occupy nothing beyond the passing segments themselves.
        SegmentPointType::ShadowPoint | SegmentPointType::VisualCrossPoint => None,
        SegmentPointType::NewUnknown => Some(ItemType::WireNewUnknownPoint),
    }
}

/// Walks the `(point, item_type)` contributions of a wire segment.
fn iter_segment_cells(info: &SegmentInfo, mut visit: impl FnMut(Point, ItemType) -> bool) -> bool {
    let line = info.line;

    if line.is_horizontal() {
        let y = line.p0().y;
        let mut x = line.p0().x.add_unchecked(1);
        while x < line.p1().x {
            if !visit(Point { x, y }, ItemType::WireHorizontal) {
                return false;
            }
            x = x.add_unchecked(1);
        }
    } else {
        let x = line.p0().x;
        let mut y = line.p0().y.add_unchecked(1);
        while y < line.p1().y {
            if !visit(Point { x, y }, ItemType::WireVertical) {
                return false;
            }
            y = y.add_unchecked(1);
        }
    }

    if let Some(item_type) = endpoint_item_type(info.p0_type)
        && !visit(line.p0(), item_type)
    {
        return false;
    }
    if let Some(item_type) = endpoint_item_type(info.p1_type)
        && !visit(line.p1(), item_type)
    {
        return false;
    }
    true
}

impl CollisionIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classification of the cell at `position`, if occupied.
    #[must_use]
    pub fn state(&self, position: Point) -> Option<CellState> {
        self.map.get(&position).map(Self::to_state)
    }

    /// Derives the cell state from the owner triple.
    fn to_state(data: &CollisionData) -> CellState {
        use CellState::*;

        match (data.body, data.horizontal, data.vertical) {
            (Some(_), WireSlot::Free, WireSlot::Free) => ElementBody,
            (Some(_), WireSlot::Free, WireSlot::ConnectionTag) => ElementConnection,
            (None, WireSlot::Wire(_), WireSlot::ConnectionTag) => WireConnection,
            (None, WireSlot::Wire(_), WireSlot::Free) => WireHorizontal,
            (None, WireSlot::Free, WireSlot::Wire(_)) => WireVertical,
            (None, WireSlot::Wire(h), WireSlot::Wire(v)) if h == v => WirePoint,
            (None, WireSlot::Wire(_), WireSlot::Wire(_)) => WireCrossing,
            (None, WireSlot::Wire(_), WireSlot::WirePointTag) => WireCrossing,
            (Some(_), WireSlot::Wire(_), WireSlot::ConnectionTag) => ElementWireConnection,
            _ => Invalid,
        }
    }

    /// Returns whether wire segments cross at `position`.
    ///
    /// Crossing cells make selection boundaries ambiguous; the selection
    /// sanitizer shifts boundaries off them.
    #[must_use]
    pub fn is_wires_crossing(&self, position: Point) -> bool {
        matches!(
            self.state(position),
            Some(CellState::WireCrossing | CellState::WirePoint)
        )
    }

    /// The wire occupying `position`, preferring the horizontal slot.
    #[must_use]
    pub fn get_first_wire(&self, position: Point) -> Option<WireId> {
        let data = self.map.get(&position)?;
        data.horizontal.wire().or(data.vertical.wire())
    }

    /// Returns whether inserting `line` would connect a wire to itself.
    #[must_use]
    pub fn creates_loop(&self, line: OrderedLine) -> bool {
        match (
            self.get_first_wire(line.p0()),
            self.get_first_wire(line.p1()),
        ) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Returns whether a candidate cell contribution collides at
    /// `position`.
    fn state_colliding(&self, position: Point, item_type: ItemType) -> bool {
        let Some(data) = self.map.get(&position) else {
            return false;
        };
        let state = Self::to_state(data);

        use CellState::*;
        match item_type {
            ItemType::ElementBody => true,
            ItemType::ElementConnection => state != WireConnection,
            ItemType::WireConnection => state != ElementConnection,
            ItemType::WireHorizontal => state != WireVertical,
            ItemType::WireVertical => state != WireHorizontal,
            ItemType::WirePoint => true,
            ItemType::WireNewUnknownPoint => {
                // A probe collides with everything except compatible wire
                // cells it could connect to or cross.
                !matches!(
                    state,
                    ElementConnection | WireConnection | WireHorizontal | WireVertical | WirePoint
                )
            }
        }
    }

    /// Returns whether a logic item with this geometry collides.
    #[must_use]
    pub fn is_logicitem_colliding(&self, data: &LayoutCalculationData) -> bool {
        !iter_item_cells(data, |position, item_type| {
            !self.state_colliding(position, item_type)
        })
    }

    /// Returns whether a decoration with this geometry collides.
    #[must_use]
    pub fn is_decoration_colliding(&self, data: &DecorationCalculationData) -> bool {
        !iter_decoration_cells(data, |position, item_type| {
            !self.state_colliding(position, item_type)
        })
    }

    /// Returns whether inserting a wire along `line` collides.
    ///
    /// Also true when the line would connect a wire to itself.
    #[must_use]
    pub fn is_wire_colliding(&self, line: OrderedLine) -> bool {
        if self.creates_loop(line) {
            return true;
        }
        let probe = SegmentInfo::new(
            line,
            SegmentPointType::NewUnknown,
            SegmentPointType::NewUnknown,
        );
        !iter_segment_cells(&probe, |position, item_type| {
            !self.state_colliding(position, item_type)
        })
    }

    /// Applies `apply` to the slots addressed by one cell contribution.
    fn apply_at(&mut self, position: Point, item_type: ItemType, owner: Owner, insert: bool) {
        let data = self.map.entry(position).or_default();

        // The tag is set idempotently on insert and removal alike; it
        // disappears with the cell once every owner slot is free, which
        // keeps shared element-wire connector cells consistent.
        let set_connection_tag = |slot: &mut WireSlot| {
            assert!(
                matches!(slot, WireSlot::Free | WireSlot::ConnectionTag),
                "cannot tag connector cell, slot occupied"
            );
            *slot = WireSlot::ConnectionTag;
        };

        let write_body = |slot: &mut Option<ElementRef>, owner: Owner| {
            let Owner::Element(element) = owner else {
                panic!("body slots hold elements");
            };
            if insert {
                assert!(slot.is_none(), "body slot occupied during insert");
                *slot = Some(element);
            } else {
                assert_eq!(*slot, Some(element), "expected body owner during removal");
                *slot = None;
            }
        };
        let write_wire = |slot: &mut WireSlot, owner: Owner| {
            let Owner::Wire(wire_id) = owner else {
                panic!("wire slots hold wires");
            };
            if insert {
                assert!(slot.is_free(), "wire slot occupied during insert");
                *slot = WireSlot::Wire(wire_id);
            } else {
                assert_eq!(
                    *slot,
                    WireSlot::Wire(wire_id),
                    "expected wire owner during removal"
                );
                *slot = WireSlot::Free;
            }
        };
        match item_type {
            ItemType::ElementBody => write_body(&mut data.body, owner),
            ItemType::ElementConnection => {
                set_connection_tag(&mut data.vertical);
                write_body(&mut data.body, owner);
            }
            ItemType::WireConnection => {
                set_connection_tag(&mut data.vertical);
                write_wire(&mut data.horizontal, owner);
            }
            ItemType::WireHorizontal => write_wire(&mut data.horizontal, owner),
            ItemType::WireVertical => write_wire(&mut data.vertical, owner),
            ItemType::WirePoint => {
                write_wire(&mut data.horizontal, owner);
                write_wire(&mut data.vertical, owner);
            }
            ItemType::WireNewUnknownPoint => {
                panic!("probe types are never inserted")
            }
        }

        if data.is_empty() {
            self.map.remove(&position);
        }
    }

    fn insert_item(&mut self, owner: Owner, data: &LayoutCalculationData) {
        iter_item_cells(data, |position, item_type| {
            self.apply_at(position, item_type, owner, true);
            true
        });
    }

    fn remove_item(&mut self, owner: Owner, data: &LayoutCalculationData) {
        iter_item_cells(data, |position, item_type| {
            self.apply_at(position, item_type, owner, false);
            true
        });
    }

    fn insert_decoration(&mut self, owner: Owner, data: &DecorationCalculationData) {
        iter_decoration_cells(data, |position, item_type| {
            self.apply_at(position, item_type, owner, true);
            true
        });
    }

    fn remove_decoration(&mut self, owner: Owner, data: &DecorationCalculationData) {
        iter_decoration_cells(data, |position, item_type| {
            self.apply_at(position, item_type, owner, false);
            true
        });
    }

    fn insert_segment(&mut self, wire_id: WireId, info: &SegmentInfo) {
        iter_segment_cells(info, |position, item_type| {
            self.apply_at(position, item_type, Owner::Wire(wire_id), true);
            true
        });
    }

    fn remove_segment(&mut self, wire_id: WireId, info: &SegmentInfo) {
        iter_segment_cells(info, |position, item_type| {
            self.apply_at(position, item_type, Owner::Wire(wire_id), false);
            true
        });
    }

    /// Applies one committed mutation.
    pub fn submit(&mut self, message: &InfoMessage) {
        match message {
            InfoMessage::LogicItemInserted { logicitem_id, data } => {
                self.insert_item(Owner::Element(ElementRef::LogicItem(*logicitem_id)), data);
            }
            InfoMessage::LogicItemUninserted { logicitem_id, data } => {
                self.remove_item(Owner::Element(ElementRef::LogicItem(*logicitem_id)), data);
            }
            InfoMessage::InsertedLogicItemIdUpdated {
                new_logicitem_id,
                old_logicitem_id,
                data,
            } => {
                self.remove_item(
                    Owner::Element(ElementRef::LogicItem(*old_logicitem_id)),
                    data,
                );
                self.insert_item(
                    Owner::Element(ElementRef::LogicItem(*new_logicitem_id)),
                    data,
                );
            }
            InfoMessage::DecorationInserted {
                decoration_id,
                data,
            } => {
                self.insert_decoration(
                    Owner::Element(ElementRef::Decoration(*decoration_id)),
                    data,
                );
            }
            InfoMessage::DecorationUninserted {
                decoration_id,
                data,
            } => {
                self.remove_decoration(
                    Owner::Element(ElementRef::Decoration(*decoration_id)),
                    data,
                );
            }
            InfoMessage::InsertedDecorationIdUpdated {
                new_decoration_id,
                old_decoration_id,
                data,
            } => {
                self.remove_decoration(
                    Owner::Element(ElementRef::Decoration(*old_decoration_id)),
                    data,
                );
                self.insert_decoration(
                    Owner::Element(ElementRef::Decoration(*new_decoration_id)),
                    data,
                );
            }
            InfoMessage::SegmentInserted {
                segment,
                segment_info,
            } => {
                self.insert_segment(segment.wire_id, segment_info);
            }
            InfoMessage::SegmentUninserted {
                segment,
                segment_info,
            } => {
                self.remove_segment(segment.wire_id, segment_info);
            }
            InfoMessage::InsertedSegmentIdUpdated {
                new_segment,
                old_segment,
                segment_info,
            } => {
                if new_segment.wire_id != old_segment.wire_id {
                    self.remove_segment(old_segment.wire_id, segment_info);
                    self.insert_segment(new_segment.wire_id, segment_info);
                }
            }
            InfoMessage::InsertedEndPointsUpdated {
                segment,
                new_segment_info,
                old_segment_info,
            } => {
                self.remove_segment(segment.wire_id, old_segment_info);
                self.insert_segment(segment.wire_id, new_segment_info);
            }
            _ => {}
        }
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns whether no cell is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates all occupied cells with their states.
    pub fn states(&self) -> impl Iterator<Item = (Point, CellState)> + '_ {
        self.map
            .iter()
            .map(|(position, data)| (*position, Self::to_state(data)))
    }
}
