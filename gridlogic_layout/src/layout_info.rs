// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-type geometry metadata of logic items.
//!
//! Everything here is a pure function of the element kind and, for the
//! variable-size kinds (standard gates, number display), its input count.
//! Positions returned by the `*_locations` functions are absolute grid
//! points, already transformed by the element's position and orientation.

use gridlogic_vocabulary::{
    ConnectionCount, ConnectionId, Coord, DirectionType, LayoutCalculationData, LogicItemType,
    Orientation, Point, Rect,
};
use smallvec::SmallVec;

/// Absolute position and facing direction of one connector.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConnectorInfo {
    /// Grid cell the connector occupies.
    pub position: Point,
    /// Direction the connector faces.
    pub orientation: Orientation,
}

/// Connector lists are small; inline storage covers every fixed type.
pub type ConnectorVec = SmallVec<[ConnectorInfo; 8]>;

/// Body point lists; the largest fixed elements stay inline.
pub type BodyPointVec = SmallVec<[Point; 28]>;

/// Untransformed connector: offsets relative to the element origin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct BaseConnector {
    x: i32,
    y: i32,
    orientation: Orientation,
}

/// Size, count ranges, and static connectors of a logic item type.
#[derive(Clone, Debug)]
pub struct LayoutInfo {
    /// Smallest allowed input count.
    pub input_count_min: ConnectionCount,
    /// Largest allowed input count.
    pub input_count_max: ConnectionCount,
    /// Input count used when a definition does not specify one.
    pub input_count_default: ConnectionCount,

    /// Smallest allowed output count.
    pub output_count_min: ConnectionCount,
    /// Largest allowed output count.
    pub output_count_max: ConnectionCount,
    /// Output count used when a definition does not specify one.
    pub output_count_default: ConnectionCount,

    /// Which orientations the type accepts.
    pub direction_type: DirectionType,

    /// Input that enables the element during simulation, if any.
    pub enable_input_id: Option<ConnectionId>,
}

/// Sizing of the variable-height standard gates (AND, OR, XOR).
pub mod standard_element {
    use super::{ConnectionCount, Coord};

    /// Smallest number of gate inputs.
    pub const MIN_INPUTS: ConnectionCount = ConnectionCount::new(2);
    /// Largest number of gate inputs.
    pub const MAX_INPUTS: ConnectionCount = ConnectionCount::new(128);
    /// Default number of gate inputs.
    pub const DEFAULT_INPUTS: ConnectionCount = ConnectionCount::new(2);

    /// Gate body width in grid cells.
    pub const WIDTH: i32 = 2;

    /// Gate height grows with the input count.
    #[must_use]
    pub const fn height(input_count: ConnectionCount) -> i32 {
        input_count.value() as i32 - 1
    }

    /// Vertical position of the single output.
    #[must_use]
    pub const fn output_height(input_count: ConnectionCount) -> i32 {
        height(input_count) / 2
    }

    /// Returns whether the gate body stays on the grid at `origin_y`.
    #[must_use]
    pub fn height_representable(origin_y: Coord, input_count: ConnectionCount) -> bool {
        Coord::is_representable(i32::from(origin_y.value()) + height(input_count))
    }
}

/// Sizing of the variable-size number display.
pub mod display_number {
    use super::ConnectionCount;

    /// Enable and negative-flag inputs.
    pub const CONTROL_INPUTS: ConnectionCount = ConnectionCount::new(2);
    /// Smallest number of value inputs.
    pub const MIN_VALUE_INPUTS: ConnectionCount = ConnectionCount::new(1);
    /// Largest number of value inputs.
    pub const MAX_VALUE_INPUTS: ConnectionCount = ConnectionCount::new(64);
    /// Default number of value inputs.
    pub const DEFAULT_VALUE_INPUTS: ConnectionCount = ConnectionCount::new(3);

    /// Smallest total input count.
    pub const MIN_INPUTS: ConnectionCount =
        ConnectionCount::new(CONTROL_INPUTS.value() + MIN_VALUE_INPUTS.value());
    /// Largest total input count.
    pub const MAX_INPUTS: ConnectionCount =
        ConnectionCount::new(CONTROL_INPUTS.value() + MAX_VALUE_INPUTS.value());
    /// Default total input count.
    pub const DEFAULT_INPUTS: ConnectionCount =
        ConnectionCount::new(CONTROL_INPUTS.value() + DEFAULT_VALUE_INPUTS.value());

    /// Value inputs of a given total input count.
    #[must_use]
    pub const fn value_inputs(input_count: ConnectionCount) -> ConnectionCount {
        ConnectionCount::new(input_count.value() - CONTROL_INPUTS.value())
    }

    /// Display width grows with the number of shown digits.
    #[must_use]
    pub const fn width(input_count: ConnectionCount) -> i32 {
        let digits = (value_inputs(input_count).value() as i32 + 3) / 4;
        2 + digits
    }

    /// Display height grows with the number of value inputs.
    #[must_use]
    pub const fn height(input_count: ConnectionCount) -> i32 {
        let value_count = value_inputs(input_count).value() as i32;
        if value_count < 2 {
            2
        } else {
            1 + value_count / 2 * 2
        }
    }
}

/// The basic layout information of a logic item type.
#[must_use]
pub fn layout_info(logicitem_type: LogicItemType) -> LayoutInfo {
    use LogicItemType::*;

    let fixed = |inputs: u8, outputs: u8, direction_type: DirectionType| LayoutInfo {
        input_count_min: ConnectionCount::new(inputs),
        input_count_max: ConnectionCount::new(inputs),
        input_count_default: ConnectionCount::new(inputs),
        output_count_min: ConnectionCount::new(outputs),
        output_count_max: ConnectionCount::new(outputs),
        output_count_default: ConnectionCount::new(outputs),
        direction_type,
        enable_input_id: None,
    };

    match logicitem_type {
        Buffer => fixed(1, 1, DirectionType::Directed),
        And | Or | Xor => LayoutInfo {
            input_count_min: standard_element::MIN_INPUTS,
            input_count_max: standard_element::MAX_INPUTS,
            input_count_default: standard_element::DEFAULT_INPUTS,
            output_count_min: ConnectionCount::new(1),
            output_count_max: ConnectionCount::new(1),
            output_count_default: ConnectionCount::new(1),
            direction_type: DirectionType::Directed,
            enable_input_id: None,
        },
        Button => fixed(0, 1, DirectionType::Undirected),
        Led => fixed(1, 0, DirectionType::Undirected),
        ClockGenerator => LayoutInfo {
            enable_input_id: Some(ConnectionId::from_index(0)),
            ..fixed(3, 3, DirectionType::Directed)
        },
        FlipflopJk => fixed(5, 2, DirectionType::Directed),
        FlipflopD => fixed(4, 1, DirectionType::Directed),
        FlipflopMsD => fixed(4, 1, DirectionType::Directed),
        LatchD => fixed(2, 1, DirectionType::Directed),
        ShiftRegister => fixed(3, 2, DirectionType::Directed),
        DisplayNumber => LayoutInfo {
            input_count_min: display_number::MIN_INPUTS,
            input_count_max: display_number::MAX_INPUTS,
            input_count_default: display_number::DEFAULT_INPUTS,
            output_count_min: ConnectionCount::ZERO,
            output_count_max: ConnectionCount::ZERO,
            output_count_default: ConnectionCount::ZERO,
            direction_type: DirectionType::Directed,
            enable_input_id: Some(ConnectionId::from_index(0)),
        },
        DisplayAscii => LayoutInfo {
            enable_input_id: Some(ConnectionId::from_index(0)),
            ..fixed(8, 0, DirectionType::Directed)
        },
        SubCircuit => LayoutInfo {
            input_count_min: ConnectionCount::ZERO,
            input_count_max: ConnectionCount::MAX,
            input_count_default: ConnectionCount::ZERO,
            output_count_min: ConnectionCount::ZERO,
            output_count_max: ConnectionCount::MAX,
            output_count_default: ConnectionCount::ZERO,
            direction_type: DirectionType::Directed,
            enable_input_id: None,
        },
    }
}

/// Untransformed width and height of an element.
fn base_size(data: &LayoutCalculationData) -> (i32, i32) {
    use LogicItemType::*;

    match data.logicitem_type {
        Buffer => (1, 0),
        And | Or | Xor => (standard_element::WIDTH, standard_element::height(data.input_count)),
        Button | Led => (0, 0),
        ClockGenerator => (5, 4),
        FlipflopJk => (4, 2),
        FlipflopD => (3, 2),
        FlipflopMsD => (4, 2),
        LatchD => (2, 1),
        ShiftRegister => (8, 2),
        DisplayNumber => (
            display_number::width(data.input_count),
            display_number::height(data.input_count),
        ),
        DisplayAscii => (4, 6),
        SubCircuit => (2, (data.input_count.value().max(data.output_count.value()) as i32).max(1)),
    }
}

/// Untransformed input connectors of an element.
fn base_inputs(data: &LayoutCalculationData) -> SmallVec<[BaseConnector; 8]> {
    use LogicItemType::*;
    use Orientation::*;

    let connector = |x: i32, y: i32, orientation: Orientation| BaseConnector { x, y, orientation };

    match data.logicitem_type {
        Buffer => SmallVec::from_slice(&[connector(0, 0, Left)]),
        And | Or | Xor => (0..i32::from(data.input_count.value()))
            .map(|index| connector(0, index, Left))
            .collect(),
        Button => SmallVec::new(),
        Led => SmallVec::from_slice(&[connector(0, 0, Undirected)]),
        // The simulation-only feedback connectors carry no position.
        ClockGenerator => SmallVec::from_slice(&[connector(3, 4, Down)]),
        FlipflopJk => SmallVec::from_slice(&[
            // clock
            connector(0, 1, Left),
            // j & k
            connector(0, 0, Left),
            connector(0, 2, Left),
            // set & reset
            connector(2, 0, Up),
            connector(2, 2, Down),
        ]),
        FlipflopD => SmallVec::from_slice(&[
            // clock
            connector(0, 1, Left),
            // data
            connector(0, 0, Left),
            // set & reset
            connector(2, 0, Up),
            connector(2, 2, Down),
        ]),
        FlipflopMsD => SmallVec::from_slice(&[
            // clock
            connector(0, 1, Left),
            // data
            connector(0, 0, Left),
            // set & reset
            connector(2, 0, Up),
            connector(2, 2, Down),
        ]),
        LatchD => SmallVec::from_slice(&[
            // clock
            connector(0, 1, Left),
            // data
            connector(0, 0, Left),
        ]),
        ShiftRegister => SmallVec::from_slice(&[
            // clock
            connector(0, 1, Left),
            // inputs
            connector(0, 0, Left),
            connector(0, 2, Left),
        ]),
        DisplayNumber => {
            let mut connectors = SmallVec::new();
            // enable below the value block, negative flag on top
            connectors.push(connector(
                display_number::width(data.input_count) - 1,
                display_number::height(data.input_count),
                Down,
            ));
            connectors.push(connector(1, 0, Up));
            for index in 0..i32::from(display_number::value_inputs(data.input_count).value()) {
                connectors.push(connector(0, index, Left));
            }
            connectors
        }
        DisplayAscii => {
            let mut connectors = SmallVec::new();
            // enable, then seven value inputs down the left edge
            connectors.push(connector(3, 6, Down));
            for index in 0..7 {
                connectors.push(connector(0, index, Left));
            }
            connectors
        }
        SubCircuit => (0..i32::from(data.input_count.value()))
            .map(|index| connector(0, index, Left))
            .collect(),
    }
}

/// Untransformed output connectors of an element.
fn base_outputs(data: &LayoutCalculationData) -> SmallVec<[BaseConnector; 8]> {
    use LogicItemType::*;
    use Orientation::*;

    let connector = |x: i32, y: i32, orientation: Orientation| BaseConnector { x, y, orientation };

    match data.logicitem_type {
        Buffer => SmallVec::from_slice(&[connector(1, 0, Right)]),
        And | Or | Xor => SmallVec::from_slice(&[connector(
            standard_element::WIDTH,
            standard_element::output_height(data.input_count),
            Right,
        )]),
        Button => SmallVec::from_slice(&[connector(0, 0, Undirected)]),
        Led => SmallVec::new(),
        // The simulation-only feedback connectors carry no position.
        ClockGenerator => SmallVec::from_slice(&[connector(5, 2, Right)]),
        FlipflopJk => SmallVec::from_slice(&[
            // Q and !Q
            connector(4, 0, Right),
            connector(4, 2, Right),
        ]),
        FlipflopD => SmallVec::from_slice(&[connector(3, 0, Right)]),
        FlipflopMsD => SmallVec::from_slice(&[connector(4, 0, Right)]),
        LatchD => SmallVec::from_slice(&[connector(2, 0, Right)]),
        ShiftRegister => SmallVec::from_slice(&[
            // Q and !Q
            connector(8, 0, Right),
            connector(8, 2, Right),
        ]),
        DisplayNumber | DisplayAscii => SmallVec::new(),
        SubCircuit => (0..i32::from(data.output_count.value()))
            .map(|index| connector(2, index, Right))
            .collect(),
    }
}

/// Rotation steps of an orientation, clockwise from [`Orientation::Right`].
const fn rotation_steps(orientation: Orientation) -> i32 {
    match orientation {
        Orientation::Right | Orientation::Undirected => 0,
        Orientation::Down => 1,
        Orientation::Left => 2,
        Orientation::Up => 3,
    }
}

/// Rotates a direction by the element orientation.
const fn rotate_direction(direction: Orientation, by: Orientation) -> Orientation {
    if matches!(direction, Orientation::Undirected) {
        return Orientation::Undirected;
    }
    const CYCLE: [Orientation; 4] = [
        Orientation::Right,
        Orientation::Down,
        Orientation::Left,
        Orientation::Up,
    ];
    let start = rotation_steps(direction);
    CYCLE[((start + rotation_steps(by)) % 4) as usize]
}

/// Maps an untransformed offset into the rotated bounding box.
fn rotate_offset(x: i32, y: i32, size: (i32, i32), orientation: Orientation) -> (i32, i32) {
    let (width, height) = size;
    match rotation_steps(orientation) {
        0 => (x, y),
        1 => (height - y, x),
        2 => (width - x, height - y),
        3 => (y, width - x),
        _ => unreachable!("rotation steps are mod 4"),
    }
}

/// Transformed width and height of an element's bounding box.
#[must_use]
pub fn element_size(data: &LayoutCalculationData) -> (i32, i32) {
    let (width, height) = base_size(data);
    match rotation_steps(data.orientation) {
        0 | 2 => (width, height),
        _ => (height, width),
    }
}

fn transform_point(data: &LayoutCalculationData, x: i32, y: i32) -> Point {
    let (tx, ty) = rotate_offset(x, y, base_size(data), data.orientation);
    Point {
        x: data.position.x.add_unchecked(tx),
        y: data.position.y.add_unchecked(ty),
    }
}

/// Absolute input connectors of an element.
#[must_use]
pub fn input_locations(data: &LayoutCalculationData) -> ConnectorVec {
    base_inputs(data)
        .into_iter()
        .map(|connector| ConnectorInfo {
            position: transform_point(data, connector.x, connector.y),
            orientation: rotate_direction(connector.orientation, data.orientation),
        })
        .collect()
}

/// Absolute output connectors of an element.
#[must_use]
pub fn output_locations(data: &LayoutCalculationData) -> ConnectorVec {
    base_outputs(data)
        .into_iter()
        .map(|connector| ConnectorInfo {
            position: transform_point(data, connector.x, connector.y),
            orientation: rotate_direction(connector.orientation, data.orientation),
        })
        .collect()
}

/// Absolute body cells of an element: the bounding box minus connectors.
#[must_use]
pub fn element_body_points(data: &LayoutCalculationData) -> BodyPointVec {
    let (width, height) = base_size(data);
    let connectors: SmallVec<[(i32, i32); 16]> = base_inputs(data)
        .into_iter()
        .chain(base_outputs(data))
        .map(|connector| (connector.x, connector.y))
        .collect();

    let mut points = BodyPointVec::new();
    for x in 0..=width {
        for y in 0..=height {
            if connectors.contains(&(x, y)) {
                continue;
            }
            points.push(transform_point(data, x, y));
        }
    }
    points
}

/// The bounding rectangle of an element.
///
/// # Panics
///
/// Panics when the rect leaves the grid; callers check
/// [`is_representable`] first.
#[must_use]
pub fn element_rect(data: &LayoutCalculationData) -> Rect {
    let (width, height) = element_size(data);
    let p1 = Point {
        x: data.position.x.add_unchecked(width),
        y: data.position.y.add_unchecked(height),
    };
    Rect::new(data.position, p1).expect("bounding extents are non-negative")
}

/// Returns whether the element's bounding rect stays on the grid.
///
/// Uses 32-bit intermediates so oversized definitions are detected instead
/// of wrapping.
#[must_use]
pub fn is_representable(data: &LayoutCalculationData) -> bool {
    let (width, height) = element_size(data);
    Coord::is_representable(i32::from(data.position.x.value()) + width)
        && Coord::is_representable(i32::from(data.position.y.value()) + height)
}

/// Returns whether the counts are within the type's declared range.
#[must_use]
pub fn is_input_output_count_valid(
    logicitem_type: LogicItemType,
    input_count: ConnectionCount,
    output_count: ConnectionCount,
) -> bool {
    let info = layout_info(logicitem_type);
    info.input_count_min <= input_count
        && input_count <= info.input_count_max
        && info.output_count_min <= output_count
        && output_count <= info.output_count_max
}

/// Returns whether the orientation is valid for the type's direction
/// policy.
#[must_use]
pub fn is_orientation_valid(logicitem_type: LogicItemType, orientation: Orientation) -> bool {
    layout_info(logicitem_type).direction_type.accepts(orientation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlogic_vocabulary::{ConnectionCount, LayoutCalculationData, LogicItemType, Point};

    fn and_gate(position: Point, inputs: u8) -> LayoutCalculationData {
        LayoutCalculationData {
            logicitem_type: LogicItemType::And,
            position,
            input_count: ConnectionCount::new(inputs),
            output_count: ConnectionCount::new(1),
            orientation: Orientation::Right,
        }
    }

    #[test]
    fn standard_gate_grows_with_inputs() {
        let data = and_gate(Point::new(10, 10), 2);
        assert_eq!(element_size(&data), (2, 1));

        let inputs = input_locations(&data);
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].position, Point::new(10, 10));
        assert_eq!(inputs[1].position, Point::new(10, 11));

        let outputs = output_locations(&data);
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].position, Point::new(12, 10));
        assert_eq!(outputs[0].orientation, Orientation::Right);

        let tall = and_gate(Point::new(0, 0), 5);
        assert_eq!(element_size(&tall), (2, 4));
        assert_eq!(output_locations(&tall)[0].position, Point::new(2, 2));
    }

    #[test]
    fn rotation_swaps_the_bounding_box() {
        let mut data = and_gate(Point::new(0, 0), 3);
        data.orientation = Orientation::Down;
        assert_eq!(element_size(&data), (2, 2));

        let outputs = output_locations(&data);
        assert_eq!(outputs[0].orientation, Orientation::Down);
    }

    #[test]
    fn body_points_exclude_connectors() {
        let data = and_gate(Point::new(0, 0), 2);
        let body = element_body_points(&data);
        // 3x2 cells minus two inputs and one output.
        assert_eq!(body.len(), 3);
        assert!(!body.contains(&Point::new(0, 0)));
        assert!(!body.contains(&Point::new(0, 1)));
        assert!(!body.contains(&Point::new(2, 0)));
        assert!(body.contains(&Point::new(1, 0)));
    }

    #[test]
    fn count_validation_uses_the_type_ranges() {
        assert!(is_input_output_count_valid(
            LogicItemType::And,
            ConnectionCount::new(2),
            ConnectionCount::new(1)
        ));
        assert!(!is_input_output_count_valid(
            LogicItemType::And,
            ConnectionCount::new(1),
            ConnectionCount::new(1)
        ));
        assert!(!is_input_output_count_valid(
            LogicItemType::Buffer,
            ConnectionCount::new(1),
            ConnectionCount::new(2)
        ));
    }

    #[test]
    fn representable_checks_the_transformed_rect() {
        let data = and_gate(Point::new(32766, 0), 2);
        assert!(!is_representable(&data));
        assert!(is_representable(&and_gate(Point::new(32765, 0), 2)));
    }
}
