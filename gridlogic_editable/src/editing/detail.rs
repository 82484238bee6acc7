// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers of the editing operations: wire connections at logic
//! item connectors and the collision verdicts built on them.

use gridlogic_layout::layout_info::{input_locations, output_locations};
use gridlogic_layout::message::InfoMessage;
use gridlogic_vocabulary::{
    are_orientations_compatible, LayoutCalculationData, Orientation, Point, Segment, SegmentInfo,
    SegmentPointType,
};
use smallvec::SmallVec;

use crate::circuit_data::CircuitData;

/// A wire endpoint meeting a logic-item connector.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct WireConnection {
    /// The shared grid point.
    pub position: Point,
    /// The wire segment whose endpoint meets the connector.
    pub segment: Segment,
}

pub(crate) type WireConnections = SmallVec<[WireConnection; 3]>;

/// The wire endpoints that may become inputs of an inserted item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ConvertibleInputsResult {
    /// One endpoint per wire that can legally become an input.
    pub convertible_inputs: WireConnections,
    /// Whether any meeting wire cannot connect.
    pub any_collisions: bool,
}

/// Direction a segment endpoint faces: away from its line.
pub(crate) fn endpoint_orientation(info: &SegmentInfo, position: Point) -> Orientation {
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

/// Inserted-wire endpoints terminating at `position`.
pub(crate) fn wire_endpoints_at(circuit: &CircuitData, position: Point) -> WireConnections {
    let mut result = WireConnections::new();
    for segment in circuit.index.spatial_index().query_line_segments(position) {
        let info = gridlogic_layout::get_segment_info(&circuit.layout, segment);
        if info.line.is_endpoint(position) {
            result.push(WireConnection { position, segment });
        }
    }
    result
}

/// Returns whether a wire may gain an input: its tree has none yet.
pub(crate) fn is_convertible_to_input(circuit: &CircuitData, segment: Segment) -> bool {
    !circuit
        .layout
        .wires()
        .segment_tree(segment.wire_id)
        .has_input()
}

/// The set of wire endpoints convertible to inputs of an item, plus a
/// collision flag for wires that cannot connect.
pub(crate) fn find_convertible_wire_inputs(
    circuit: &CircuitData,
    data: &LayoutCalculationData,
) -> ConvertibleInputsResult {
    let mut result = ConvertibleInputsResult::default();

    for connector in output_locations(data) {
        let mut seen_wires: SmallVec<[gridlogic_vocabulary::WireId; 3]> = SmallVec::new();
        for connection in wire_endpoints_at(circuit, connector.position) {
            if seen_wires.contains(&connection.segment.wire_id) {
                continue;
            }
            seen_wires.push(connection.segment.wire_id);

            let info = gridlogic_layout::get_segment_info(&circuit.layout, connection.segment);
            let facing = endpoint_orientation(&info, connector.position);
            if !are_orientations_compatible(facing, connector.orientation) {
                result.any_collisions = true;
                continue;
            }
            if is_convertible_to_input(circuit, connection.segment) {
                result.convertible_inputs.push(connection);
            } else {
                result.any_collisions = true;
            }
        }
    }

    result
}

/// Returns whether inserting an item with this geometry collides.
pub(crate) fn is_logicitem_colliding(circuit: &CircuitData, data: &LayoutCalculationData) -> bool {
    circuit.index.collision_index().is_logicitem_colliding(data)
        || find_convertible_wire_inputs(circuit, data).any_collisions
}

/// Rewrites one endpoint type of an inserted segment, announcing the
/// change.
pub(crate) fn set_endpoint_type(
    circuit: &mut CircuitData,
    segment: Segment,
    position: Point,
    point_type: SegmentPointType,
) {
    let old_info = gridlogic_layout::get_segment_info(&circuit.layout, segment);
    if old_info.point_type_at(position) == point_type {
        return;
    }
    let new_info = old_info.with_point_type_at(position, point_type);

    circuit
        .layout
        .wires_mut()
        .modifiable_segment_tree(segment.wire_id)
        .update_segment(segment.segment_index, new_info);

    circuit.submit(InfoMessage::InsertedEndPointsUpdated {
        segment,
        new_segment_info: new_info,
        old_segment_info: old_info,
    });
}

/// Converts wire endpoints meeting the item's connectors into wire
/// connectors: inputs at the item's outputs, outputs at its inputs.
///
/// The caller has verified convertibility; one endpoint per grid point
/// carries the connector.
pub(crate) fn connect_wires_at_connectors(circuit: &mut CircuitData, data: &LayoutCalculationData) {
    for connection in find_convertible_wire_inputs(circuit, data).convertible_inputs {
        set_endpoint_type(
            circuit,
            connection.segment,
            connection.position,
            SegmentPointType::Input,
        );
    }

    for connector in input_locations(data) {
        let Some(connection) = wire_endpoints_at(circuit, connector.position)
            .into_iter()
            .find(|connection| {
                let info =
                    gridlogic_layout::get_segment_info(&circuit.layout, connection.segment);
                are_orientations_compatible(
                    endpoint_orientation(&info, connector.position),
                    connector.orientation,
                )
            })
        else {
            continue;
        };
        set_endpoint_type(
            circuit,
            connection.segment,
            connection.position,
            SegmentPointType::Output,
        );
    }
}

/// Reverts [`connect_wires_at_connectors`] when an item is uninserted.
pub(crate) fn disconnect_wires_at_connectors(
    circuit: &mut CircuitData,
    data: &LayoutCalculationData,
) {
    for connector in output_locations(data) {
        if let Some(entry) = circuit.index.wire_input_index().find(connector.position) {
            set_endpoint_type(
                circuit,
                entry.segment,
                connector.position,
                SegmentPointType::ShadowPoint,
            );
        }
    }
    for connector in input_locations(data) {
        if let Some(entry) = circuit.index.wire_output_index().find(connector.position) {
            set_endpoint_type(
                circuit,
                entry.segment,
                connector.position,
                SegmentPointType::ShadowPoint,
            );
        }
    }
}
