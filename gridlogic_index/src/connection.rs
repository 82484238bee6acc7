// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point lookups of logic-item and wire connectors.

use gridlogic_layout::layout_info::{input_locations, output_locations, ConnectorVec};
use gridlogic_layout::message::InfoMessage;
use gridlogic_vocabulary::{
    ConnectionId, LayoutCalculationData, LogicItemId, Orientation, Point, Segment, SegmentInfo,
    SegmentPointType,
};
use hashbrown::HashMap;

/// Whether an index tracks inputs or outputs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ConnectionKind {
    Input,
    Output,
}

/// A logic-item connector at a grid point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LogicItemConnectionEntry {
    /// The item owning the connector.
    pub logicitem_id: LogicItemId,
    /// Which of the item's connectors this is.
    pub connection_id: ConnectionId,
    /// Direction the connector faces.
    pub orientation: Orientation,
}

type LogicItemMap = HashMap<Point, LogicItemConnectionEntry, foldhash::fast::RandomState>;

/// Maps grid points to the inserted logic-item connectors anchored there.
#[derive(Clone, Debug)]
pub struct LogicItemConnectionIndex {
    kind: ConnectionKind,
    map: LogicItemMap,
}

impl Default for LogicItemConnectionIndex {
    fn default() -> Self {
        Self::inputs()
    }
}

impl PartialEq for LogicItemConnectionIndex {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.map == other.map
    }
}

impl LogicItemConnectionIndex {
    /// Creates an index over input connectors.
    #[must_use]
    pub fn inputs() -> Self {
        Self {
            kind: ConnectionKind::Input,
            map: LogicItemMap::default(),
        }
    }

    /// Creates an index over output connectors.
    #[must_use]
    pub fn outputs() -> Self {
        Self {
            kind: ConnectionKind::Output,
            map: LogicItemMap::default(),
        }
    }

    /// The connector anchored at `position`, if any.
    #[must_use]
    pub fn find(&self, position: Point) -> Option<LogicItemConnectionEntry> {
        self.map.get(&position).copied()
    }

    /// Iterates all connector positions.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.map.keys().copied()
    }

    fn locations(&self, data: &LayoutCalculationData) -> ConnectorVec {
        match self.kind {
            ConnectionKind::Input => input_locations(data),
            ConnectionKind::Output => output_locations(data),
        }
    }

    fn insert(&mut self, logicitem_id: LogicItemId, data: &LayoutCalculationData) {
        for (index, connector) in self.locations(data).into_iter().enumerate() {
            let entry = LogicItemConnectionEntry {
                logicitem_id,
                connection_id: ConnectionId::from_index(index),
                orientation: connector.orientation,
            };
            let previous = self.map.insert(connector.position, entry);
            assert!(
                previous.is_none(),
                "connector cell occupied during connection-index insert"
            );
        }
    }

    fn remove(&mut self, logicitem_id: LogicItemId, data: &LayoutCalculationData) {
        for connector in self.locations(data) {
            let removed = self.map.remove(&connector.position);
            assert!(
                removed.is_some_and(|entry| entry.logicitem_id == logicitem_id),
                "expected connector presence during connection-index remove"
            );
        }
    }

    fn update(
        &mut self,
        new_logicitem_id: LogicItemId,
        old_logicitem_id: LogicItemId,
        data: &LayoutCalculationData,
    ) {
        for connector in self.locations(data) {
            let entry = self
                .map
                .get_mut(&connector.position)
                .expect("expected connector presence during connection-index update");
            assert_eq!(
                entry.logicitem_id, old_logicitem_id,
                "expected old id during connection-index update"
            );
            entry.logicitem_id = new_logicitem_id;
        }
    }

    /// Applies one committed mutation.
    pub fn submit(&mut self, message: &InfoMessage) {
        match message {
            InfoMessage::LogicItemInserted { logicitem_id, data } => {
                self.insert(*logicitem_id, data);
            }
            InfoMessage::LogicItemUninserted { logicitem_id, data } => {
                self.remove(*logicitem_id, data);
            }
            InfoMessage::InsertedLogicItemIdUpdated {
                new_logicitem_id,
                old_logicitem_id,
                data,
            } => {
                self.update(*new_logicitem_id, *old_logicitem_id, data);
            }
            _ => {}
        }
    }
}

/// A wire endpoint at a grid point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WireConnectionEntry {
    /// The segment whose endpoint this is.
    pub segment: Segment,
    /// Direction the endpoint faces, away from the segment.
    pub orientation: Orientation,
}

type WireMap = HashMap<Point, WireConnectionEntry, foldhash::fast::RandomState>;

/// Maps grid points to the inserted wire endpoints anchored there.
#[derive(Clone, Debug)]
pub struct WireConnectionIndex {
    kind: ConnectionKind,
    map: WireMap,
}

impl Default for WireConnectionIndex {
    fn default() -> Self {
        Self::inputs()
    }
}

impl PartialEq for WireConnectionIndex {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.map == other.map
    }
}

/// Direction a wire endpoint faces: away from its segment.
fn endpoint_orientation(info: &SegmentInfo, position: Point) -> Orientation {
    let line = info.line;
    if position == line.p0() {
        if line.is_horizontal() {
            Orientation::Left
        } else {
            Orientation::Up
        }
    } else if line.is_horizontal() {
        Orientation::Right
    } else {
        Orientation::Down
    }
}

impl WireConnectionIndex {
    /// Creates an index over wire inputs.
    #[must_use]
    pub fn inputs() -> Self {
        Self {
            kind: ConnectionKind::Input,
            map: WireMap::default(),
        }
    }

    /// Creates an index over wire outputs.
    #[must_use]
    pub fn outputs() -> Self {
        Self {
            kind: ConnectionKind::Output,
            map: WireMap::default(),
        }
    }

    /// The wire endpoint anchored at `position`, if any.
    #[must_use]
    pub fn find(&self, position: Point) -> Option<WireConnectionEntry> {
        self.map.get(&position).copied()
    }

    /// Iterates all endpoint positions.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.map.keys().copied()
    }

    fn tracked_type(&self) -> SegmentPointType {
        match self.kind {
            ConnectionKind::Input => SegmentPointType::Input,
            ConnectionKind::Output => SegmentPointType::Output,
        }
    }

    fn endpoints(&self, info: &SegmentInfo) -> impl Iterator<Item = Point> + use<> {
        let tracked = self.tracked_type();
        let p0 = (info.p0_type == tracked).then(|| info.line.p0());
        let p1 = (info.p1_type == tracked).then(|| info.line.p1());
        p0.into_iter().chain(p1)
    }

    fn insert(&mut self, segment: Segment, info: &SegmentInfo) {
        for position in self.endpoints(info) {
            let entry = WireConnectionEntry {
                segment,
                orientation: endpoint_orientation(info, position),
            };
            let previous = self.map.insert(position, entry);
            assert!(
                previous.is_none(),
                "endpoint cell occupied during wire-index insert"
            );
        }
    }

    fn remove(&mut self, segment: Segment, info: &SegmentInfo) {
        for position in self.endpoints(info) {
            let removed = self.map.remove(&position);
            assert!(
                removed.is_some_and(|entry| entry.segment == segment),
                "expected endpoint presence during wire-index remove"
            );
        }
    }

    fn update(&mut self, new_segment: Segment, old_segment: Segment, info: &SegmentInfo) {
        for position in self.endpoints(info) {
            let entry = self
                .map
                .get_mut(&position)
                .expect("expected endpoint presence during wire-index update");
            assert_eq!(
                entry.segment, old_segment,
                "expected old segment during wire-index update"
            );
            entry.segment = new_segment;
        }
    }

    /// Applies one committed mutation.
    pub fn submit(&mut self, message: &InfoMessage) {
        match message {
            InfoMessage::SegmentInserted {
                segment,
                segment_info,
            } => {
                self.insert(*segment, segment_info);
            }
            InfoMessage::SegmentUninserted {
                segment,
                segment_info,
            } => {
                self.remove(*segment, segment_info);
            }
            InfoMessage::InsertedSegmentIdUpdated {
                new_segment,
                old_segment,
                segment_info,
            } => {
                self.update(*new_segment, *old_segment, segment_info);
            }
            InfoMessage::InsertedEndPointsUpdated {
                segment,
                new_segment_info,
                old_segment_info,
            } => {
                self.remove(*segment, old_segment_info);
                self.insert(*segment, new_segment_info);
            }
            _ => {}
        }
    }
}
