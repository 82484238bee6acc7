// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replay property: an index rebuilt from a recorded message stream
//! equals the live index, for arbitrary interleavings of insertions,
//! renumberings, and removals.

use gridlogic_index::LayoutIndex;
use gridlogic_layout::message::InfoMessage;
use gridlogic_vocabulary::{
    ConnectionCount, LayoutCalculationData, LogicItemId, LogicItemType, OrderedLine, Orientation,
    Point, Segment, SegmentIndex, SegmentInfo, SegmentPointType, WireId,
};

fn gate(position: Point, logicitem_type: LogicItemType, inputs: u8) -> LayoutCalculationData {
    LayoutCalculationData {
        logicitem_type,
        position,
        input_count: ConnectionCount::new(inputs),
        output_count: ConnectionCount::new(1),
        orientation: Orientation::Right,
    }
}

fn segment(wire: usize, index: usize) -> Segment {
    Segment::new(WireId::from_index(wire), SegmentIndex::from_index(index))
}

fn hsegment(x0: i16, x1: i16, y: i16) -> SegmentInfo {
    SegmentInfo::new(
        OrderedLine::new(Point::new(x0, y), Point::new(x1, y)).unwrap(),
        SegmentPointType::Input,
        SegmentPointType::ShadowPoint,
    )
}

/// Replays `messages` into a fresh index and compares against `live`.
fn assert_replay_equal(live: &LayoutIndex, messages: &[InfoMessage]) {
    let mut replayed = LayoutIndex::new();
    for message in messages {
        replayed.submit(message);
    }
    assert_eq!(*live, replayed);
}

#[test]
fn interleaved_stream_replays_identically() {
    let mut live = LayoutIndex::new();
    let mut log: Vec<InfoMessage> = Vec::new();
    let mut submit = |index: &mut LayoutIndex, message: InfoMessage| {
        index.submit(&message);
        log.push(message);
    };

    // A handful of gates on separate rows.
    for row in 0..6_i16 {
        submit(
            &mut live,
            InfoMessage::LogicItemInserted {
                logicitem_id: LogicItemId::from_index(row as usize),
                data: gate(Point::new(0, row * 4), LogicItemType::And, 2),
            },
        );
    }

    // Wires driven by each gate.
    for row in 0..6_i16 {
        submit(
            &mut live,
            InfoMessage::SegmentInserted {
                segment: segment(2 + row as usize, 0),
                segment_info: hsegment(2, 12, row * 4),
            },
        );
    }

    // Renumber some gates, as swap-removal would.
    for row in [1_i16, 3] {
        let data = gate(Point::new(0, row * 4), LogicItemType::And, 2);
        submit(
            &mut live,
            InfoMessage::InsertedLogicItemIdUpdated {
                new_logicitem_id: LogicItemId::from_index(10 + row as usize),
                old_logicitem_id: LogicItemId::from_index(row as usize),
                data,
            },
        );
    }

    // Remove a couple of wires again.
    for row in [0_i16, 4] {
        submit(
            &mut live,
            InfoMessage::SegmentUninserted {
                segment: segment(2 + row as usize, 0),
                segment_info: hsegment(2, 12, row * 4),
            },
        );
    }

    assert_replay_equal(&live, &log);
}

#[test]
fn uninsertion_in_any_order_drains_the_index() {
    let mut live = LayoutIndex::new();

    let gates: Vec<_> = (0..5_usize)
        .map(|i| {
            (
                LogicItemId::from_index(i),
                gate(Point::new(0, i as i16 * 4), LogicItemType::Or, 3),
            )
        })
        .collect();

    for (id, data) in &gates {
        live.submit(&InfoMessage::LogicItemInserted {
            logicitem_id: *id,
            data: *data,
        });
    }

    // Remove middle-out, which is what swap-removal tends to produce.
    for &index in &[2_usize, 0, 4, 1, 3] {
        let (id, data) = &gates[index];
        live.submit(&InfoMessage::LogicItemUninserted {
            logicitem_id: *id,
            data: *data,
        });
    }

    assert_eq!(live, LayoutIndex::new());
}

#[test]
fn endpoint_update_stream_is_equivalent_to_direct_insertion() {
    // Inserting with final endpoint types equals inserting with plain
    // ends and updating afterwards.
    let seg = segment(2, 0);
    let plain = SegmentInfo::shadow(
        OrderedLine::new(Point::new(0, 0), Point::new(8, 0)).unwrap(),
    );
    let connected = SegmentInfo::new(
        plain.line,
        SegmentPointType::Input,
        SegmentPointType::ShadowPoint,
    );

    let mut direct = LayoutIndex::new();
    direct.submit(&InfoMessage::SegmentInserted {
        segment: seg,
        segment_info: connected,
    });

    let mut stepped = LayoutIndex::new();
    stepped.submit(&InfoMessage::SegmentInserted {
        segment: seg,
        segment_info: plain,
    });
    stepped.submit(&InfoMessage::InsertedEndPointsUpdated {
        segment: seg,
        new_segment_info: connected,
        old_segment_info: plain,
    });

    assert_eq!(direct, stepped);
}
