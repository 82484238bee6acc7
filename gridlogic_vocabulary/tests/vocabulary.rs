// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-module tests of the vocabulary: construction invariants,
//! checked arithmetic, and the line/offset/part conversions.

use gridlogic_vocabulary::{
    are_orientations_compatible, checked_move_point, to_full_part, to_line, to_offset, to_point,
    ConnectionCount, Coord, Delay, Line, Offset, OrderedLine, Orientation, Part, Point, Rect,
    SegmentInfo, SegmentPointType, Time, COLLIDING_WIRE_ID, FIRST_INSERTED_WIRE_ID,
    TEMPORARY_WIRE_ID,
};

#[test]
fn reserved_wire_ids_are_ordered() {
    assert!(TEMPORARY_WIRE_ID.is_temporary());
    assert!(COLLIDING_WIRE_ID.is_colliding());
    assert!(FIRST_INSERTED_WIRE_ID.is_inserted());
    assert!(!TEMPORARY_WIRE_ID.is_inserted());
    assert!(!COLLIDING_WIRE_ID.is_inserted());
    assert!(TEMPORARY_WIRE_ID < COLLIDING_WIRE_ID);
    assert!(COLLIDING_WIRE_ID < FIRST_INSERTED_WIRE_ID);
}

#[test]
fn ordered_lines_sort_their_endpoints() {
    let reversed = Line::new(Point::new(8, 3), Point::new(2, 3)).unwrap();
    let ordered = OrderedLine::from(reversed);
    assert_eq!(ordered.p0(), Point::new(2, 3));
    assert_eq!(ordered.p1(), Point::new(8, 3));

    // Vertical ordering runs by y.
    let vertical = OrderedLine::new(Point::new(4, 9), Point::new(4, -1)).unwrap();
    assert_eq!(vertical.p0(), Point::new(4, -1));
    assert!(vertical.is_vertical());
}

#[test]
fn offsets_walk_lines_in_both_directions() {
    let line = OrderedLine::new(Point::new(-4, 2), Point::new(6, 2)).unwrap();
    assert_eq!(to_full_part(line), Part::new(0, 10));

    for (x, offset) in [(-4_i16, 0_u16), (0, 4), (6, 10)] {
        let point = Point::new(x, 2);
        assert_eq!(to_offset(line, point).unwrap(), Offset::new(offset));
        assert_eq!(to_point(line, Offset::new(offset)).unwrap(), point);
    }

    let sub = to_line(line, Part::new(2, 5)).unwrap();
    assert_eq!(sub.p0(), Point::new(-2, 2));
    assert_eq!(sub.p1(), Point::new(1, 2));
}

#[test]
fn checked_moves_report_overflow_as_values() {
    let point = Point::new(32_000, -32_000);
    assert!(checked_move_point(point, 767, 0).is_ok());
    assert!(checked_move_point(point, 768, 0).is_err());
    assert!(checked_move_point(point, 0, -769).is_err());

    assert!(Coord::MAX.checked_add(Coord::new(1)).is_err());
    assert!(ConnectionCount::MAX
        .checked_add(ConnectionCount::new(1))
        .is_err());
    assert!(Time::MAX.checked_add(Delay::EPSILON).is_err());
}

#[test]
fn connector_compatibility_is_symmetric() {
    use Orientation::*;
    for (a, b) in [(Right, Left), (Up, Down), (Undirected, Right)] {
        assert!(are_orientations_compatible(a, b));
        assert!(are_orientations_compatible(b, a));
    }
    for (a, b) in [(Right, Right), (Right, Up), (Down, Left)] {
        assert!(!are_orientations_compatible(a, b));
        assert!(!are_orientations_compatible(b, a));
    }
}

#[test]
fn segment_info_addresses_endpoints_by_position() {
    let line = OrderedLine::new(Point::new(0, 0), Point::new(5, 0)).unwrap();
    let info = SegmentInfo::new(line, SegmentPointType::Input, SegmentPointType::ShadowPoint);

    assert_eq!(info.point_type_at(Point::new(0, 0)), SegmentPointType::Input);
    assert_eq!(
        info.point_type_at(Point::new(5, 0)),
        SegmentPointType::ShadowPoint
    );

    let updated = info.with_point_type_at(Point::new(5, 0), SegmentPointType::Output);
    assert_eq!(updated.p1_type, SegmentPointType::Output);
    assert_eq!(updated.p0_type, SegmentPointType::Input);
}

#[test]
fn rects_and_parts_enforce_ordering() {
    assert!(Rect::new(Point::new(0, 0), Point::new(-1, 0)).is_err());
    assert!(Part::try_new(Offset::new(5), Offset::new(5)).is_err());
    assert!(Line::new(Point::new(1, 1), Point::new(2, 2)).is_err());
}
