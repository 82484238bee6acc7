// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the layout aggregate: definition validation, swap-remove
//! renumbering, and segment-part display states.

use gridlogic_layout::{
    get_display_states, get_insertion_modes, moved_layout, Layout, LayoutError,
};
use gridlogic_vocabulary::{
    ConnectionCount, DecorationDefinition, DecorationType, DisplayState, InsertionMode,
    LogicItemDefinition, LogicItemType, OrderedLine, Orientation, Part, Point, Segment,
    SegmentIndex, SegmentInfo, SegmentPart, Size2d, TextElementAttrs, COLLIDING_WIRE_ID,
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

fn text_definition() -> DecorationDefinition {
    DecorationDefinition {
        decoration_type: DecorationType::TextElement,
        size: Size2d::new(4, 1),
        attrs_text_element: Some(TextElementAttrs::default()),
    }
}

#[test]
fn add_logicitem_validates_the_definition() {
    let mut layout = Layout::new();

    let ok = layout.logic_items_mut().add(
        and_definition(2),
        Point::new(0, 0),
        DisplayState::Temporary,
    );
    assert!(ok.is_ok());

    let too_few_inputs = layout.logic_items_mut().add(
        and_definition(1),
        Point::new(0, 0),
        DisplayState::Temporary,
    );
    assert!(matches!(
        too_few_inputs,
        Err(LayoutError::InvalidDefinition { .. })
    ));

    let bad_orientation = layout.logic_items_mut().add(
        LogicItemDefinition {
            orientation: Orientation::Undirected,
            ..and_definition(2)
        },
        Point::new(0, 0),
        DisplayState::Temporary,
    );
    assert!(matches!(
        bad_orientation,
        Err(LayoutError::InvalidDefinition { .. })
    ));

    let off_grid = layout.logic_items_mut().add(
        and_definition(2),
        Point::new(32767, 0),
        DisplayState::Temporary,
    );
    assert!(matches!(off_grid, Err(LayoutError::InvalidDefinition { .. })));
}

#[test]
fn decoration_rect_checks_use_wide_arithmetic() {
    let mut layout = Layout::new();

    let oversized = layout.decorations_mut().add(
        DecorationDefinition {
            size: Size2d::new(10, 1),
            ..text_definition()
        },
        Point::new(32760, 0),
        DisplayState::Temporary,
    );
    assert!(matches!(
        oversized,
        Err(LayoutError::InvalidDefinition { .. })
    ));

    let fits = layout.decorations_mut().add(
        text_definition(),
        Point::new(32760, 0),
        DisplayState::Temporary,
    );
    assert!(fits.is_ok());
}

#[test]
fn swap_delete_reports_the_moved_id() {
    let mut layout = Layout::new();
    let a = layout
        .logic_items_mut()
        .add(and_definition(2), Point::new(0, 0), DisplayState::Temporary)
        .unwrap();
    let _b = layout
        .logic_items_mut()
        .add(and_definition(2), Point::new(0, 5), DisplayState::Temporary)
        .unwrap();
    let c = layout
        .logic_items_mut()
        .add(and_definition(2), Point::new(0, 10), DisplayState::Temporary)
        .unwrap();

    let moved = layout.logic_items_mut().swap_delete(a);
    assert_eq!(moved, Some(c));
    assert_eq!(layout.logic_items().position(a), Point::new(0, 10));
}

#[test]
fn aggregate_wires_have_uniform_display_states() {
    let mut layout = Layout::new();
    let line = OrderedLine::new(Point::new(0, 0), Point::new(10, 0)).unwrap();

    let temp_index = layout
        .wires_mut()
        .modifiable_segment_tree(TEMPORARY_WIRE_ID)
        .add_segment(SegmentInfo::shadow(line));
    let temp_part = SegmentPart::new(
        Segment::new(TEMPORARY_WIRE_ID, temp_index),
        Part::new(0, 10),
    );
    assert_eq!(
        get_display_states(&layout, temp_part),
        (DisplayState::Temporary, DisplayState::Temporary)
    );
    assert_eq!(
        get_insertion_modes(&layout, temp_part),
        (InsertionMode::Temporary, InsertionMode::Temporary)
    );

    let coll_index = layout
        .wires_mut()
        .modifiable_segment_tree(COLLIDING_WIRE_ID)
        .add_segment(SegmentInfo::shadow(line));
    let coll_part = SegmentPart::new(
        Segment::new(COLLIDING_WIRE_ID, coll_index),
        Part::new(0, 10),
    );
    assert_eq!(
        get_display_states(&layout, coll_part),
        (DisplayState::Colliding, DisplayState::Colliding)
    );
}

#[test]
fn valid_parts_drive_inserted_display_states() {
    let mut layout = Layout::new();
    let wire_id = layout.wires_mut().add_wire();
    let line = OrderedLine::new(Point::new(0, 0), Point::new(10, 0)).unwrap();
    let index = layout
        .wires_mut()
        .modifiable_segment_tree(wire_id)
        .add_segment(SegmentInfo::shadow(line));
    layout
        .wires_mut()
        .modifiable_segment_tree(wire_id)
        .mark_valid(index, Part::new(2, 6));

    let segment = Segment::new(wire_id, index);

    let inside = SegmentPart::new(segment, Part::new(3, 5));
    assert_eq!(
        get_display_states(&layout, inside),
        (DisplayState::Valid, DisplayState::Valid)
    );

    let straddling = SegmentPart::new(segment, Part::new(4, 9));
    assert_eq!(
        get_display_states(&layout, straddling),
        (DisplayState::Valid, DisplayState::Normal)
    );

    let outside = SegmentPart::new(segment, Part::new(6, 10));
    assert_eq!(
        get_display_states(&layout, outside),
        (DisplayState::Normal, DisplayState::Normal)
    );
}

#[test]
fn moved_layout_translates_or_rejects() {
    let mut layout = Layout::new();
    layout
        .logic_items_mut()
        .add(and_definition(2), Point::new(5, 5), DisplayState::Temporary)
        .unwrap();
    let wire_id = layout.wires_mut().add_wire();
    let line = OrderedLine::new(Point::new(0, 0), Point::new(4, 0)).unwrap();
    let index = layout
        .wires_mut()
        .modifiable_segment_tree(wire_id)
        .add_segment(SegmentInfo::shadow(line));

    let moved = moved_layout(&layout, 10, -3).unwrap();
    assert_eq!(
        moved
            .logic_items()
            .position(gridlogic_vocabulary::LogicItemId::from_index(0)),
        Point::new(15, 2)
    );
    let moved_line = moved.wires().segment_tree(wire_id).line(index);
    assert_eq!(moved_line.p0(), Point::new(10, -3));
    assert_eq!(moved_line.p1(), Point::new(14, -3));

    assert!(moved_layout(&layout, 32760, 0).is_none());
}

#[test]
fn segment_index_accessors_expose_valid_parts() {
    let mut layout = Layout::new();
    let wire_id = layout.wires_mut().add_wire();
    let line = OrderedLine::new(Point::new(0, 0), Point::new(8, 0)).unwrap();
    let index: SegmentIndex = layout
        .wires_mut()
        .modifiable_segment_tree(wire_id)
        .add_segment(SegmentInfo::shadow(line));

    layout
        .wires_mut()
        .modifiable_segment_tree(wire_id)
        .mark_valid(index, Part::new(0, 3));
    layout
        .wires_mut()
        .modifiable_segment_tree(wire_id)
        .unmark_valid(index, Part::new(1, 2));

    let segment = Segment::new(wire_id, index);
    assert_eq!(
        gridlogic_layout::get_segment_valid_parts(&layout, segment).parts(),
        [Part::new(0, 1), Part::new(2, 3)]
    );
    assert_eq!(
        gridlogic_layout::get_part_line(&layout, SegmentPart::new(segment, Part::new(2, 5)))
            .p0(),
        Point::new(2, 0)
    );
}
