// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canned example circuits for bring-up tests.

use gridlogic_vocabulary::{
    ConnectionCount, DecorationDefinition, DecorationType, InsertionMode, Line,
    LogicItemDefinition, LogicItemType, Orientation, PlacedDecoration, Point, Size2d,
    TextElementAttrs,
};

use crate::error::CircuitError;
use crate::surface::EditableCircuit;

fn gate(logicitem_type: LogicItemType, inputs: u8) -> LogicItemDefinition {
    LogicItemDefinition {
        logicitem_type,
        input_count: ConnectionCount::new(inputs),
        output_count: ConnectionCount::new(1),
        orientation: Orientation::Right,
        attrs_clock_generator: None,
    }
}

fn line(x0: i16, y0: i16, x1: i16, y1: i16) -> Line {
    Line::new(Point::new(x0, y0), Point::new(x1, y1)).expect("example lines are orthogonal")
}

fn label(text: &str, width: u16) -> PlacedDecoration {
    PlacedDecoration {
        definition: DecorationDefinition {
            decoration_type: DecorationType::TextElement,
            size: Size2d::new(width, 1),
            attrs_text_element: Some(TextElementAttrs {
                text: text.into(),
                ..TextElementAttrs::default()
            }),
        },
        position: Point::new(0, 0),
    }
}

/// Loads one of the four canned example circuits.
///
/// The circuit is cleared first; each example builds a fixed layout with
/// stable ids and segment ordering, so repeated loads of the same number
/// produce identical circuits.
///
/// # Panics
///
/// Panics for numbers outside `1..=4`.
pub fn load_circuit_example(
    circuit: &mut EditableCircuit,
    number: u32,
) -> Result<(), CircuitError> {
    *circuit = EditableCircuit::new();

    match number {
        1 => example_and_chain(circuit),
        2 => example_crossing_wires(circuit),
        3 => example_flipflop_bench(circuit),
        4 => example_annotated_display(circuit),
        _ => panic!("example circuits are numbered 1 to 4"),
    }
}

/// Two AND gates feeding an LED through a straight wire run.
fn example_and_chain(circuit: &mut EditableCircuit) -> Result<(), CircuitError> {
    let insert = InsertionMode::InsertOrDiscard;

    circuit.add_logicitem(gate(LogicItemType::And, 2), Point::new(0, 0), insert)?;
    circuit.add_logicitem(gate(LogicItemType::And, 2), Point::new(10, 0), insert)?;
    circuit.add_logicitem(
        LogicItemDefinition {
            logicitem_type: LogicItemType::Led,
            input_count: ConnectionCount::new(1),
            output_count: ConnectionCount::ZERO,
            orientation: Orientation::Undirected,
            attrs_clock_generator: None,
        },
        Point::new(20, 0),
        insert,
    )?;

    circuit.add_wire_segment(line(2, 0, 10, 0), insert)?;
    circuit.add_wire_segment(line(12, 0, 20, 0), insert)?;
    Ok(())
}

/// A rectangle of wires around two buffers; contains crossing points.
fn example_crossing_wires(circuit: &mut EditableCircuit) -> Result<(), CircuitError> {
    let insert = InsertionMode::InsertOrDiscard;

    circuit.add_wire_segment(line(0, 0, 10, 0), insert)?;
    circuit.add_wire_segment(line(0, 5, 10, 5), insert)?;
    // A vertical crossing both horizontal runs without touching their
    // endpoints.
    circuit.add_wire_segment(line(5, -3, 5, 8), insert)?;

    circuit.add_logicitem(gate(LogicItemType::Buffer, 1), Point::new(12, 0), insert)?;
    circuit.add_logicitem(gate(LogicItemType::Buffer, 1), Point::new(12, 5), insert)?;
    circuit.add_wire_segment(line(10, 0, 12, 0), insert)?;
    circuit.add_wire_segment(line(10, 5, 12, 5), insert)?;
    Ok(())
}

/// A clocked flip-flop with an XOR in front.
fn example_flipflop_bench(circuit: &mut EditableCircuit) -> Result<(), CircuitError> {
    let insert = InsertionMode::InsertOrDiscard;

    circuit.add_logicitem(
        LogicItemDefinition {
            logicitem_type: LogicItemType::ClockGenerator,
            input_count: ConnectionCount::new(3),
            output_count: ConnectionCount::new(3),
            orientation: Orientation::Right,
            attrs_clock_generator: Some(gridlogic_vocabulary::ClockGeneratorAttrs::default()),
        },
        Point::new(0, 0),
        insert,
    )?;
    circuit.add_logicitem(gate(LogicItemType::Xor, 2), Point::new(10, 0), insert)?;
    circuit.add_logicitem(
        LogicItemDefinition {
            logicitem_type: LogicItemType::FlipflopD,
            input_count: ConnectionCount::new(4),
            output_count: ConnectionCount::new(1),
            orientation: Orientation::Right,
            attrs_clock_generator: None,
        },
        Point::new(16, 0),
        insert,
    )?;

    circuit.add_wire_segment(line(5, 2, 8, 2), insert)?;
    circuit.add_wire_segment(line(12, 0, 16, 0), insert)?;
    Ok(())
}

/// A number display with labels.
fn example_annotated_display(circuit: &mut EditableCircuit) -> Result<(), CircuitError> {
    let insert = InsertionMode::InsertOrDiscard;

    circuit.add_logicitem(
        LogicItemDefinition {
            logicitem_type: LogicItemType::DisplayNumber,
            input_count: ConnectionCount::new(5),
            output_count: ConnectionCount::ZERO,
            orientation: Orientation::Right,
            attrs_clock_generator: None,
        },
        Point::new(10, 0),
        insert,
    )?;
    circuit.add_logicitem(gate(LogicItemType::Or, 3), Point::new(0, 0), insert)?;
    circuit.add_wire_segment(line(2, 1, 10, 1), insert)?;

    circuit.add_decoration(
        PlacedDecoration {
            position: Point::new(0, -3),
            ..label("inputs", 4)
        },
        insert,
    )?;
    circuit.add_decoration(
        PlacedDecoration {
            position: Point::new(10, -3),
            ..label("value", 3)
        },
        insert,
    )?;
    Ok(())
}
