// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the derived indices: collision classification, connection
//! lookups, spatial queries, and replay equality.

use gridlogic_index::{CellState, LayoutIndex, SpatialPayload};
use gridlogic_layout::message::InfoMessage;
use gridlogic_layout::Layout;
use gridlogic_vocabulary::{
    ConnectionCount, DisplayState, LayoutCalculationData, LogicItemDefinition, LogicItemId,
    LogicItemType, OrderedLine, Orientation, Point, RectFine, Segment, SegmentIndex, SegmentInfo,
    SegmentPointType, WireId, FIRST_INSERTED_WIRE_ID,
};

fn and_data(position: Point, inputs: u8) -> LayoutCalculationData {
    LayoutCalculationData {
        logicitem_type: LogicItemType::And,
        position,
        input_count: ConnectionCount::new(inputs),
        output_count: ConnectionCount::new(1),
        orientation: Orientation::Right,
    }
}

fn hline(x0: i16, x1: i16, y: i16) -> OrderedLine {
    OrderedLine::new(Point::new(x0, y), Point::new(x1, y)).unwrap()
}

fn vline(x: i16, y0: i16, y1: i16) -> OrderedLine {
    OrderedLine::new(Point::new(x, y0), Point::new(x, y1)).unwrap()
}

fn segment(wire: u32, index: u32) -> Segment {
    Segment::new(
        WireId::from_index(wire as usize),
        SegmentIndex::from_index(index as usize),
    )
}

#[test]
fn logicitem_insertion_populates_all_indices() {
    let mut index = LayoutIndex::new();
    let id = LogicItemId::from_index(0);
    let data = and_data(Point::new(10, 10), 2);

    index.submit(&InfoMessage::LogicItemInserted {
        logicitem_id: id,
        data,
    });

    // Connector cells.
    let input = index.logicitem_input_index().find(Point::new(10, 10)).unwrap();
    assert_eq!(input.logicitem_id, id);
    assert_eq!(input.orientation, Orientation::Left);

    let output = index
        .logicitem_output_index()
        .find(Point::new(12, 10))
        .unwrap();
    assert_eq!(output.logicitem_id, id);
    assert_eq!(output.orientation, Orientation::Right);

    // Collision cells.
    assert_eq!(
        index.collision_index().state(Point::new(10, 10)),
        Some(CellState::ElementConnection)
    );
    assert_eq!(
        index.collision_index().state(Point::new(11, 10)),
        Some(CellState::ElementBody)
    );

    // Spatial entry.
    let hits = index
        .spatial_index()
        .query_selection(RectFine::new(9.0, 9.0, 13.0, 12.0));
    assert_eq!(hits, [SpatialPayload::LogicItem(id)]);

    // Body cells collide with everything.
    assert!(index.collision_index().is_logicitem_colliding(&and_data(
        Point::new(11, 10),
        2
    )));
}

#[test]
fn uninsertion_restores_the_empty_index() {
    let mut index = LayoutIndex::new();
    let id = LogicItemId::from_index(0);
    let data = and_data(Point::new(0, 0), 3);

    index.submit(&InfoMessage::LogicItemInserted {
        logicitem_id: id,
        data,
    });
    index.submit(&InfoMessage::LogicItemUninserted {
        logicitem_id: id,
        data,
    });

    assert_eq!(index, LayoutIndex::new());
}

#[test]
fn wire_cells_classify_by_axis() {
    let mut index = LayoutIndex::new();
    let info = SegmentInfo::new(
        hline(0, 10, 5),
        SegmentPointType::Input,
        SegmentPointType::ShadowPoint,
    );
    index.submit(&InfoMessage::SegmentInserted {
        segment: segment(2, 0),
        segment_info: info,
    });

    assert_eq!(
        index.collision_index().state(Point::new(0, 5)),
        Some(CellState::WireConnection)
    );
    assert_eq!(
        index.collision_index().state(Point::new(5, 5)),
        Some(CellState::WireHorizontal)
    );
    // Shadow endpoints leave no cell.
    assert_eq!(index.collision_index().state(Point::new(10, 5)), None);

    // A vertical wire may cross the horizontal interior.
    assert!(!index.collision_index().is_wire_colliding(vline(5, 0, 10)));
    // A parallel overlapping wire collides.
    assert!(index.collision_index().is_wire_colliding(hline(3, 7, 5)));

    let endpoint = index.wire_input_index().find(Point::new(0, 5)).unwrap();
    assert_eq!(endpoint.segment, segment(2, 0));
    assert_eq!(endpoint.orientation, Orientation::Left);
}

#[test]
fn visual_cross_points_occupy_nothing() {
    let mut index = LayoutIndex::new();
    let info = SegmentInfo::new(
        hline(0, 10, 5),
        SegmentPointType::Input,
        SegmentPointType::VisualCrossPoint,
    );
    index.submit(&InfoMessage::SegmentInserted {
        segment: segment(2, 0),
        segment_info: info,
    });

    // Like a shadow point, the visual crossing leaves its cell empty.
    assert_eq!(index.collision_index().state(Point::new(10, 5)), None);
    assert!(!index
        .collision_index()
        .is_wires_crossing(Point::new(10, 5)));

    // Uninsertion round-trips cleanly.
    index.submit(&InfoMessage::SegmentUninserted {
        segment: segment(2, 0),
        segment_info: info,
    });
    assert_eq!(index, LayoutIndex::new());
}

#[test]
fn endpoint_updates_to_visual_cross_points_clear_the_cell() {
    let mut index = LayoutIndex::new();
    let old_info = SegmentInfo::new(
        hline(0, 10, 5),
        SegmentPointType::Input,
        SegmentPointType::CollidingPoint,
    );
    index.submit(&InfoMessage::SegmentInserted {
        segment: segment(2, 0),
        segment_info: old_info,
    });
    assert_eq!(
        index.collision_index().state(Point::new(10, 5)),
        Some(CellState::WirePoint)
    );

    let new_info =
        old_info.with_point_type_at(Point::new(10, 5), SegmentPointType::VisualCrossPoint);
    index.submit(&InfoMessage::InsertedEndPointsUpdated {
        segment: segment(2, 0),
        new_segment_info: new_info,
        old_segment_info: old_info,
    });

    assert_eq!(index.collision_index().state(Point::new(10, 5)), None);
}

#[test]
fn loop_detection_uses_first_wires() {
    let mut index = LayoutIndex::new();
    let wire = FIRST_INSERTED_WIRE_ID;
    let horizontal = SegmentInfo::new(
        hline(0, 5, 0),
        SegmentPointType::Input,
        SegmentPointType::ShadowPoint,
    );
    // The open end keeps a visible point, so the cell stays owned.
    let vertical = SegmentInfo::new(
        vline(5, 0, 5),
        SegmentPointType::ShadowPoint,
        SegmentPointType::CollidingPoint,
    );
    index.submit(&InfoMessage::SegmentInserted {
        segment: Segment::new(wire, SegmentIndex::from_index(0)),
        segment_info: horizontal,
    });
    index.submit(&InfoMessage::SegmentInserted {
        segment: Segment::new(wire, SegmentIndex::from_index(1)),
        segment_info: vertical,
    });

    // Both endpoints belong to the same wire: closing the rectangle loops.
    assert!(index.collision_index().creates_loop(hline(0, 5, 5)));
    assert!(index.collision_index().is_wire_colliding(hline(0, 5, 5)));

    // A line touching only one end of the wire does not loop.
    assert!(!index.collision_index().creates_loop(vline(0, 0, 5)));
}

#[test]
fn endpoint_updates_move_connector_cells() {
    let mut index = LayoutIndex::new();
    let seg = segment(2, 0);
    let old_info = SegmentInfo::shadow(hline(12, 20, 10));
    index.submit(&InfoMessage::SegmentInserted {
        segment: seg,
        segment_info: old_info,
    });
    assert_eq!(index.collision_index().state(Point::new(12, 10)), None);

    let new_info = old_info.with_point_type_at(Point::new(12, 10), SegmentPointType::Input);
    index.submit(&InfoMessage::InsertedEndPointsUpdated {
        segment: seg,
        new_segment_info: new_info,
        old_segment_info: old_info,
    });

    assert_eq!(
        index.collision_index().state(Point::new(12, 10)),
        Some(CellState::WireConnection)
    );
    assert_eq!(
        index.wire_input_index().find(Point::new(12, 10)).unwrap().segment,
        seg
    );
}

#[test]
fn id_updates_rewrite_entries_in_place() {
    let mut index = LayoutIndex::new();
    let old_id = LogicItemId::from_index(3);
    let new_id = LogicItemId::from_index(0);
    let data = and_data(Point::new(-5, -5), 2);

    index.submit(&InfoMessage::LogicItemInserted {
        logicitem_id: old_id,
        data,
    });
    index.submit(&InfoMessage::InsertedLogicItemIdUpdated {
        new_logicitem_id: new_id,
        old_logicitem_id: old_id,
        data,
    });

    assert_eq!(
        index
            .logicitem_input_index()
            .find(Point::new(-5, -5))
            .unwrap()
            .logicitem_id,
        new_id
    );
    let hits = index
        .spatial_index()
        .query_selection(RectFine::new(-6.0, -6.0, -2.0, -2.0));
    assert_eq!(hits, [SpatialPayload::LogicItem(new_id)]);
}

#[test]
fn query_line_segments_covers_a_cross_point() {
    let mut index = LayoutIndex::new();
    let wire = FIRST_INSERTED_WIRE_ID;
    let infos = [
        SegmentInfo::shadow(hline(0, 5, 5)),
        SegmentInfo::shadow(hline(5, 10, 5)),
        SegmentInfo::shadow(vline(5, 0, 5)),
        SegmentInfo::shadow(vline(5, 5, 10)),
    ];
    for (i, info) in infos.iter().enumerate() {
        index.submit(&InfoMessage::SegmentInserted {
            segment: Segment::new(wire, SegmentIndex::from_index(i)),
            segment_info: *info,
        });
    }

    let segments = index.spatial_index().query_line_segments(Point::new(5, 5));
    assert_eq!(segments.len(), 4);
}

#[test]
fn replay_from_layout_matches_incremental_updates() {
    let mut layout = Layout::new();
    let mut index = LayoutIndex::new();

    let id = layout
        .logic_items_mut()
        .add(
            LogicItemDefinition {
                logicitem_type: LogicItemType::And,
                input_count: ConnectionCount::new(2),
                output_count: ConnectionCount::new(1),
                orientation: Orientation::Right,
                attrs_clock_generator: None,
            },
            Point::new(10, 10),
            DisplayState::Normal,
        )
        .unwrap();
    index.submit(&InfoMessage::LogicItemInserted {
        logicitem_id: id,
        data: layout.logic_items().calculation_data(id),
    });

    let wire_id = layout.wires_mut().add_wire();
    let info = SegmentInfo::new(
        hline(12, 20, 10),
        SegmentPointType::Input,
        SegmentPointType::ShadowPoint,
    );
    let seg_index = layout
        .wires_mut()
        .modifiable_segment_tree(wire_id)
        .add_segment(info);
    index.submit(&InfoMessage::SegmentInserted {
        segment: Segment::new(wire_id, seg_index),
        segment_info: info,
    });

    let rebuilt = LayoutIndex::from_layout(&layout);
    assert_eq!(index, rebuilt);
    index.validate(&layout);
}
