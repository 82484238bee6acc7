// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Consistency tests of the per-type geometry metadata, across every
//! element kind and orientation.

use gridlogic_layout::layout_info::{
    element_body_points, element_rect, element_size, input_locations, is_input_output_count_valid,
    layout_info, output_locations,
};
use gridlogic_vocabulary::{
    ConnectionCount, LayoutCalculationData, LogicItemType, Orientation, Point,
};

const ALL_TYPES: [LogicItemType; 15] = [
    LogicItemType::Buffer,
    LogicItemType::And,
    LogicItemType::Or,
    LogicItemType::Xor,
    LogicItemType::Button,
    LogicItemType::Led,
    LogicItemType::ClockGenerator,
    LogicItemType::FlipflopJk,
    LogicItemType::FlipflopD,
    LogicItemType::FlipflopMsD,
    LogicItemType::LatchD,
    LogicItemType::ShiftRegister,
    LogicItemType::DisplayNumber,
    LogicItemType::DisplayAscii,
    LogicItemType::SubCircuit,
];

fn default_data(logicitem_type: LogicItemType, orientation: Orientation) -> LayoutCalculationData {
    let info = layout_info(logicitem_type);
    LayoutCalculationData {
        logicitem_type,
        position: Point::new(100, 100),
        input_count: info.input_count_default,
        output_count: info.output_count_default,
        orientation,
    }
}

fn default_orientation(logicitem_type: LogicItemType) -> Orientation {
    let info = layout_info(logicitem_type);
    if info.direction_type.accepts(Orientation::Right) {
        Orientation::Right
    } else {
        Orientation::Undirected
    }
}

#[test]
fn default_counts_are_within_the_declared_ranges() {
    for logicitem_type in ALL_TYPES {
        let info = layout_info(logicitem_type);
        assert!(
            info.input_count_min <= info.input_count_default
                && info.input_count_default <= info.input_count_max,
            "{logicitem_type:?} input defaults"
        );
        assert!(
            info.output_count_min <= info.output_count_default
                && info.output_count_default <= info.output_count_max,
            "{logicitem_type:?} output defaults"
        );
        assert!(is_input_output_count_valid(
            logicitem_type,
            info.input_count_default,
            info.output_count_default
        ));
    }
}

#[test]
fn connectors_lie_within_the_bounding_rect() {
    for logicitem_type in ALL_TYPES {
        let data = default_data(logicitem_type, default_orientation(logicitem_type));
        let rect = element_rect(&data);

        for connector in input_locations(&data)
            .into_iter()
            .chain(output_locations(&data))
        {
            assert!(
                rect.contains(connector.position),
                "{logicitem_type:?} connector {:?} outside {rect:?}",
                connector.position
            );
        }
    }
}

#[test]
fn body_points_and_connectors_are_disjoint() {
    for logicitem_type in ALL_TYPES {
        let data = default_data(logicitem_type, default_orientation(logicitem_type));
        let connectors: Vec<Point> = input_locations(&data)
            .into_iter()
            .chain(output_locations(&data))
            .map(|connector| connector.position)
            .collect();

        for point in element_body_points(&data) {
            assert!(
                !connectors.contains(&point),
                "{logicitem_type:?} body point {point:?} collides with a connector"
            );
        }
    }
}

#[test]
fn cell_counts_are_orientation_invariant() {
    for logicitem_type in ALL_TYPES {
        let info = layout_info(logicitem_type);
        if !info.direction_type.accepts(Orientation::Right) {
            continue;
        }

        let reference = default_data(logicitem_type, Orientation::Right);
        let reference_body = element_body_points(&reference).len();
        let reference_inputs = input_locations(&reference).len();

        for orientation in [Orientation::Down, Orientation::Left, Orientation::Up] {
            let rotated = default_data(logicitem_type, orientation);
            assert_eq!(
                element_body_points(&rotated).len(),
                reference_body,
                "{logicitem_type:?} body cells under {orientation:?}"
            );
            assert_eq!(
                input_locations(&rotated).len(),
                reference_inputs,
                "{logicitem_type:?} connectors under {orientation:?}"
            );
        }
    }
}

#[test]
fn rotation_swaps_extents() {
    for logicitem_type in ALL_TYPES {
        let info = layout_info(logicitem_type);
        if !info.direction_type.accepts(Orientation::Right) {
            continue;
        }

        let (width, height) = element_size(&default_data(logicitem_type, Orientation::Right));
        let (rot_width, rot_height) =
            element_size(&default_data(logicitem_type, Orientation::Down));
        assert_eq!((rot_width, rot_height), (height, width), "{logicitem_type:?}");
    }
}

#[test]
fn connectors_stay_distinct_per_type() {
    for logicitem_type in ALL_TYPES {
        let data = default_data(logicitem_type, default_orientation(logicitem_type));
        let mut positions: Vec<Point> = input_locations(&data)
            .into_iter()
            .chain(output_locations(&data))
            .map(|connector| connector.position)
            .collect();
        let total = positions.len();
        positions.sort_unstable();
        positions.dedup();
        assert_eq!(positions.len(), total, "{logicitem_type:?} duplicate connectors");
    }
}
