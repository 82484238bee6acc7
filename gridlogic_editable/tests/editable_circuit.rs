// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests of the editing surface: insertion modes, wire
//! unification, loop rejection, connector conversion, and atomicity.

use gridlogic_editable::{circuit_fingerprint, CircuitError, EditableCircuit};
use gridlogic_index::CellState;
use gridlogic_layout::message::InfoMessage;
use gridlogic_vocabulary::{
    ConnectionCount, DisplayState, InsertionMode, Line, LogicItemDefinition, LogicItemType,
    Orientation, Point, SegmentPointType, COLLIDING_WIRE_ID, FIRST_INSERTED_WIRE_ID,
    TEMPORARY_WIRE_ID,
};

fn and_definition(inputs: u8) -> LogicItemDefinition {
    LogicItemDefinition {
        logicitem_type: LogicItemType::And,
        input_count: ConnectionCount::new(inputs),
        output_count: ConnectionCount::new(1),
        orientation: Orientation::Right,
        attrs_clock_generator: None,
    }
}

fn line(x0: i16, y0: i16, x1: i16, y1: i16) -> Line {
    Line::new(Point::new(x0, y0), Point::new(x1, y1)).unwrap()
}

#[test]
fn logicitem_insertion_modes() {
    let mut circuit = EditableCircuit::new();

    let temporary = circuit
        .add_logicitem(and_definition(2), Point::new(0, 0), InsertionMode::Temporary)
        .unwrap();
    assert_eq!(
        circuit.layout().logic_items().display_state(temporary),
        DisplayState::Temporary
    );

    let inserted = circuit
        .add_logicitem(
            and_definition(2),
            Point::new(10, 0),
            InsertionMode::InsertOrDiscard,
        )
        .unwrap();
    assert_eq!(
        circuit.layout().logic_items().display_state(inserted),
        DisplayState::Normal
    );

    // A colliding placement in collision mode is kept as colliding.
    let colliding = circuit
        .add_logicitem(
            and_definition(2),
            Point::new(10, 0),
            InsertionMode::Collisions,
        )
        .unwrap();
    assert_eq!(
        circuit.layout().logic_items().display_state(colliding),
        DisplayState::Colliding
    );

    // The same placement with insert-or-discard is rejected and leaves
    // no trace.
    let count_before = circuit.layout().logic_items().len();
    let rejected = circuit.add_logicitem(
        and_definition(2),
        Point::new(10, 0),
        InsertionMode::InsertOrDiscard,
    );
    assert_eq!(rejected, Err(CircuitError::Collision));
    assert_eq!(circuit.layout().logic_items().len(), count_before);
}

#[test]
fn moves_require_the_temporary_state() {
    let mut circuit = EditableCircuit::new();

    let inserted = circuit
        .add_logicitem(
            and_definition(2),
            Point::new(0, 0),
            InsertionMode::InsertOrDiscard,
        )
        .unwrap();
    assert_eq!(
        circuit.move_logicitem(inserted, 1, 0),
        Err(CircuitError::InvalidState)
    );

    circuit
        .change_logicitem_mode(inserted, InsertionMode::Temporary)
        .unwrap();
    circuit.move_logicitem(inserted, 5, 3).unwrap();
    assert_eq!(
        circuit.layout().logic_items().position(inserted),
        Point::new(5, 3)
    );
}

#[test]
fn temporary_wires_land_in_the_aggregate() {
    let mut circuit = EditableCircuit::new();

    let part = circuit
        .add_wire_segment(line(0, 0, 10, 0), InsertionMode::Temporary)
        .unwrap();
    assert_eq!(part.segment.wire_id, TEMPORARY_WIRE_ID);

    let info =
        gridlogic_layout::get_segment_info(circuit.layout(), part.segment);
    assert_eq!(info.p0_type, SegmentPointType::ShadowPoint);
    assert_eq!(info.p1_type, SegmentPointType::ShadowPoint);
}

#[test]
fn inserted_wires_merge_at_shared_endpoints() {
    let mut circuit = EditableCircuit::new();
    let insert = InsertionMode::InsertOrDiscard;

    let first = circuit.add_wire_segment(line(0, 0, 5, 0), insert).unwrap();
    assert_eq!(first.segment.wire_id, FIRST_INSERTED_WIRE_ID);

    // Touching the end of the first wire joins its tree.
    let second = circuit.add_wire_segment(line(5, 0, 5, 5), insert).unwrap();
    assert_eq!(second.segment.wire_id, FIRST_INSERTED_WIRE_ID);

    // A separate wire elsewhere gets its own id.
    let third = circuit.add_wire_segment(line(20, 0, 25, 0), insert).unwrap();
    assert_ne!(third.segment.wire_id, FIRST_INSERTED_WIRE_ID);

    // Collinear continuation merges into a single segment.
    let fourth = circuit.add_wire_segment(line(25, 0, 30, 0), insert).unwrap();
    assert_eq!(fourth.segment.wire_id, third.segment.wire_id);
    let merged_line =
        gridlogic_layout::get_line(circuit.layout(), fourth.segment);
    assert_eq!(merged_line.p0(), Point::new(20, 0));
    assert_eq!(merged_line.p1(), Point::new(30, 0));
}

#[test]
fn wire_loop_is_rejected_into_the_colliding_aggregate() {
    let mut circuit = EditableCircuit::with_message_log();
    let insert = InsertionMode::InsertOrDiscard;

    circuit.add_wire_segment(line(0, 0, 5, 0), insert).unwrap();
    circuit.add_wire_segment(line(5, 0, 5, 5), insert).unwrap();
    circuit.add_wire_segment(line(5, 5, 0, 5), insert).unwrap();

    let count_inserted = |circuit: &EditableCircuit| {
        circuit
            .message_log()
            .unwrap()
            .iter()
            .filter(|message| matches!(message, InfoMessage::SegmentInserted { .. }))
            .count()
    };
    let inserted_before = count_inserted(&circuit);

    // Closing the rectangle would connect the wire to itself.
    let fourth = circuit.add_wire_segment(line(0, 5, 0, 0), insert).unwrap();
    assert_eq!(fourth.segment.wire_id, COLLIDING_WIRE_ID);
    assert_eq!(
        count_inserted(&circuit),
        inserted_before,
        "a rejected loop inserts nothing"
    );
}

#[test]
fn wire_endpoint_at_gate_output_becomes_an_input() {
    let mut circuit = EditableCircuit::new();
    let insert = InsertionMode::InsertOrDiscard;

    circuit
        .add_logicitem(and_definition(2), Point::new(10, 10), insert)
        .unwrap();

    let part = circuit
        .add_wire_segment(line(12, 10, 20, 10), insert)
        .unwrap();

    let info = gridlogic_layout::get_segment_info(circuit.layout(), part.segment);
    assert_eq!(info.line.p0(), Point::new(12, 10));
    assert_eq!(info.p0_type, SegmentPointType::Input);
    assert_eq!(info.p1_type, SegmentPointType::ShadowPoint);

    // The connector cell now carries both the element and the wire.
    assert_eq!(
        circuit
            .layout_index()
            .collision_index()
            .state(Point::new(12, 10)),
        Some(CellState::ElementWireConnection)
    );
    assert_eq!(
        circuit
            .layout_index()
            .wire_input_index()
            .find(Point::new(12, 10))
            .unwrap()
            .segment,
        part.segment
    );
}

#[test]
fn a_second_driver_for_one_wire_collides() {
    let mut circuit = EditableCircuit::new();
    let insert = InsertionMode::InsertOrDiscard;

    circuit
        .add_logicitem(and_definition(2), Point::new(0, 0), insert)
        .unwrap();
    circuit
        .add_logicitem(and_definition(2), Point::new(0, 10), insert)
        .unwrap();

    // Wire driven by the first gate, ending above the second gate's
    // output.
    circuit.add_wire_segment(line(2, 0, 6, 0), insert).unwrap();
    circuit.add_wire_segment(line(6, 0, 6, 10), insert).unwrap();

    // Connecting the second output to the same tree would add a second
    // driver.
    let rejected = circuit.add_wire_segment(line(2, 10, 6, 10), insert).unwrap();
    assert_eq!(rejected.segment.wire_id, COLLIDING_WIRE_ID);
}

#[test]
fn deleting_the_middle_splits_the_wire() {
    let mut circuit = EditableCircuit::new();
    let insert = InsertionMode::InsertOrDiscard;

    let part = circuit.add_wire_segment(line(0, 0, 10, 0), insert).unwrap();

    circuit
        .delete_wire_segment(gridlogic_vocabulary::SegmentPart::new(
            part.segment,
            gridlogic_vocabulary::Part::new(4, 6),
        ))
        .unwrap();

    // Two disconnected remainders now live in two wires.
    let lines: Vec<_> = gridlogic_layout::inserted_wire_ids(circuit.layout())
        .flat_map(|wire_id| {
            let tree = circuit.layout().wires().segment_tree(wire_id);
            tree.indices()
                .map(|index| tree.line(index))
                .collect::<Vec<_>>()
        })
        .collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.contains(
        &gridlogic_vocabulary::OrderedLine::new(Point::new(0, 0), Point::new(4, 0)).unwrap()
    ));
    assert!(lines.contains(
        &gridlogic_vocabulary::OrderedLine::new(Point::new(6, 0), Point::new(10, 0)).unwrap()
    ));
}

#[test]
fn observers_see_every_committed_mutation() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut circuit = EditableCircuit::new();
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = seen.clone();
    circuit.on_message(move |message| {
        sink.borrow_mut().push(format!("{message:?}"));
    });

    circuit
        .add_logicitem(
            and_definition(2),
            Point::new(0, 0),
            InsertionMode::InsertOrDiscard,
        )
        .unwrap();

    let seen = seen.borrow();
    assert!(seen.iter().any(|entry| entry.contains("ElementCreated")));
    assert!(seen.iter().any(|entry| entry.contains("LogicItemInserted")));
}

#[test]
fn fingerprints_are_stable_and_change_with_the_layout() {
    let mut a = EditableCircuit::new();
    let mut b = EditableCircuit::new();
    let insert = InsertionMode::InsertOrDiscard;

    a.add_logicitem(and_definition(2), Point::new(0, 0), insert)
        .unwrap();
    b.add_logicitem(and_definition(2), Point::new(0, 0), insert)
        .unwrap();
    assert_eq!(
        circuit_fingerprint(a.circuit_data()),
        circuit_fingerprint(b.circuit_data())
    );

    b.add_wire_segment(line(2, 0, 8, 0), insert).unwrap();
    assert_ne!(
        circuit_fingerprint(a.circuit_data()),
        circuit_fingerprint(b.circuit_data())
    );
}

#[test]
fn split_and_merge_roundtrip() {
    let mut circuit = EditableCircuit::new();
    let insert = InsertionMode::InsertOrDiscard;

    let part = circuit.add_wire_segment(line(0, 0, 10, 0), insert).unwrap();
    let tail = circuit
        .split_wire(part.segment, gridlogic_vocabulary::Offset::new(4))
        .unwrap();

    let tree = circuit
        .layout()
        .wires()
        .segment_tree(part.segment.wire_id);
    assert_eq!(tree.len(), 2);

    let merged = circuit.merge_wires(part.segment, tail).unwrap();
    let tree = circuit
        .layout()
        .wires()
        .segment_tree(part.segment.wire_id);
    assert_eq!(tree.len(), 1);
    let merged_line = gridlogic_layout::get_line(circuit.layout(), merged);
    assert_eq!(merged_line.p0(), Point::new(0, 0));
    assert_eq!(merged_line.p1(), Point::new(10, 0));
}
