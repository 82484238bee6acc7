// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editing operations on wires.
//!
//! Wire insertion unifies the new segment with everything it touches:
//! wires meeting at its endpoints merge into the lowest id, endpoints
//! landing on logic-item connectors become wire connectors, and endpoints
//! landing mid-segment become cross points. Deletion is the mirror image:
//! ranges are cut out at part granularity, junction annotations are
//! recomputed, collinear leftovers merge back, and a wire that falls
//! apart is split into one tree per connected component.

use gridlogic_layout::message::InfoMessage;
use gridlogic_vocabulary::{
    are_orientations_compatible, to_full_part, InsertionMode, Line, Offset, OrderedLine, Part,
    Point, Segment, SegmentIndex, SegmentInfo, SegmentPart, SegmentPointType, WireId,
    COLLIDING_WIRE_ID, TEMPORARY_WIRE_ID,
};
use smallvec::SmallVec;

use crate::circuit_data::CircuitData;
use crate::editing::detail;
use crate::error::CircuitError;

/// Adds a wire segment in the requested insertion mode.
///
/// The line is normalized; in `Temporary` mode the segment lands in the
/// temporary aggregate, in the colliding modes it lands either in the
/// colliding aggregate or fully inserted and unified with its
/// surroundings.
pub fn add_wire_segment(
    circuit: &mut CircuitData,
    line: Line,
    mode: InsertionMode,
) -> Result<SegmentPart, CircuitError> {
    let line = OrderedLine::from(line);
    tracing::debug!(?line, ?mode, "add_wire_segment");

    match mode {
        InsertionMode::Temporary => Ok(add_to_aggregate(circuit, TEMPORARY_WIRE_ID, line)),
        InsertionMode::Collisions => {
            if is_wire_colliding(circuit, line) {
                Ok(add_to_aggregate(circuit, COLLIDING_WIRE_ID, line))
            } else {
                insert_wire_segment(circuit, line, true)
            }
        }
        InsertionMode::InsertOrDiscard => {
            if is_wire_colliding(circuit, line) {
                Ok(add_to_aggregate(circuit, COLLIDING_WIRE_ID, line))
            } else {
                insert_wire_segment(circuit, line, false)
            }
        }
    }
}

/// All inserted wires whose segments pass through or end at `point`.
fn wires_at(circuit: &CircuitData, point: Point) -> SmallVec<[WireId; 4]> {
    let mut wires = SmallVec::new();
    for segment in circuit.index.spatial_index().query_line_segments(point) {
        let line = gridlogic_layout::get_line(&circuit.layout, segment);
        if line.contains(point) && !wires.contains(&segment.wire_id) {
            wires.push(segment.wire_id);
        }
    }
    wires
}

/// The full collision verdict for a candidate line.
///
/// Cell-level collisions aside, a line whose two endpoints touch the same
/// wire would create a loop and is rejected. Endpoint touching is decided
/// through the spatial index: plain wire ends leave no collision cell.
fn is_wire_colliding(circuit: &CircuitData, line: OrderedLine) -> bool {
    let wires_p0 = wires_at(circuit, line.p0());
    let wires_p1 = wires_at(circuit, line.p1());
    if wires_p0.iter().any(|wire_id| wires_p1.contains(wire_id)) {
        return true;
    }
    circuit.index.collision_index().is_wire_colliding(line)
}

fn add_to_aggregate(circuit: &mut CircuitData, wire_id: WireId, line: OrderedLine) -> SegmentPart {
    let index = circuit
        .layout
        .wires_mut()
        .modifiable_segment_tree(wire_id)
        .add_segment(SegmentInfo::shadow(line));
    let segment = Segment::new(wire_id, index);
    circuit.submit(InfoMessage::SegmentCreated { segment });
    SegmentPart::new(segment, to_full_part(line))
}

/// How one endpoint of a new segment attaches to its surroundings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Attachment {
    /// Nothing at the point.
    Free,
    /// A logic-item output drives the wire here.
    ItemOutput,
    /// A logic-item input is driven by the wire here.
    ItemInput,
    /// An inserted wire occupies the point; it merges with the segment.
    Wire(WireId),
}

fn classify_endpoint(circuit: &CircuitData, point: Point) -> Attachment {
    if circuit.index.logicitem_output_index().find(point).is_some() {
        return Attachment::ItemOutput;
    }
    if circuit.index.logicitem_input_index().find(point).is_some() {
        return Attachment::ItemInput;
    }
    if let Some(&wire_id) = wires_at(circuit, point).first() {
        return Attachment::Wire(wire_id);
    }
    Attachment::Free
}

/// Inserts a non-colliding segment, unifying wires and connectors.
fn insert_wire_segment(
    circuit: &mut CircuitData,
    line: OrderedLine,
    mark_valid: bool,
) -> Result<SegmentPart, CircuitError> {
    let attachments = [
        classify_endpoint(circuit, line.p0()),
        classify_endpoint(circuit, line.p1()),
    ];

    // Orientation checks for item connectors; incompatible attachments
    // divert the whole segment to the colliding aggregate.
    for (point, attachment) in [(line.p0(), attachments[0]), (line.p1(), attachments[1])] {
        let compatible = match attachment {
            Attachment::ItemOutput => {
                let entry = circuit
                    .index
                    .logicitem_output_index()
                    .find(point)
                    .expect("classification found the connector");
                are_orientations_compatible(wire_end_orientation(line, point), entry.orientation)
            }
            Attachment::ItemInput => {
                let entry = circuit
                    .index
                    .logicitem_input_index()
                    .find(point)
                    .expect("classification found the connector");
                are_orientations_compatible(wire_end_orientation(line, point), entry.orientation)
            }
            _ => true,
        };
        if !compatible {
            return Ok(add_to_aggregate(circuit, COLLIDING_WIRE_ID, line));
        }
    }

    // Merge all touched wires into the one with the lowest id. An
    // endpoint may meet several wires; every one of them connects.
    let mut touched: SmallVec<[WireId; 4]> = SmallVec::new();
    for (point, attachment) in [(line.p0(), attachments[0]), (line.p1(), attachments[1])] {
        if matches!(attachment, Attachment::Wire(_)) {
            for wire_id in wires_at(circuit, point) {
                if !touched.contains(&wire_id) {
                    touched.push(wire_id);
                }
            }
        }
    }

    // Driving the wire from an item output requires the merged tree to
    // have no other input.
    if attachments.contains(&Attachment::ItemOutput) {
        let input_count: usize = touched
            .iter()
            .map(|&wire_id| circuit.layout.wires().segment_tree(wire_id).input_count())
            .sum();
        let new_inputs = attachments
            .iter()
            .filter(|&&attachment| attachment == Attachment::ItemOutput)
            .count();
        if input_count + new_inputs > 1 {
            return Ok(add_to_aggregate(circuit, COLLIDING_WIRE_ID, line));
        }
    }

    let target = match touched.iter().copied().min() {
        Some(target) => {
            let mut sources: SmallVec<[WireId; 2]> =
                touched.iter().copied().filter(|&w| w != target).collect();
            sources.sort_unstable_by(|a, b| b.cmp(a));
            for source in sources {
                merge_wire_into(circuit, source, target);
            }
            target
        }
        None => circuit.layout.wires_mut().add_wire(),
    };

    // Endpoint types at insertion: connectors first, junctions second.
    let p0_type = endpoint_type_at(circuit, target, line, line.p0(), attachments[0]);
    let p1_type = endpoint_type_at(circuit, target, line, line.p1(), attachments[1]);

    let info = SegmentInfo::new(line, p0_type, p1_type);
    let index = circuit
        .layout
        .wires_mut()
        .modifiable_segment_tree(target)
        .add_segment(info);
    let segment = Segment::new(target, index);
    circuit.submit(InfoMessage::SegmentCreated { segment });
    circuit.submit(InfoMessage::SegmentInserted {
        segment,
        segment_info: info,
    });

    if mark_valid {
        circuit
            .layout
            .wires_mut()
            .modifiable_segment_tree(target)
            .mark_valid(index, to_full_part(line));
    }

    // Collinear neighbors sharing a plain endpoint merge away.
    let segment = try_merge_at(circuit, segment, line.p0());
    let segment = try_merge_at(circuit, segment, line.p1());

    let full = to_full_part(gridlogic_layout::get_line(&circuit.layout, segment));
    Ok(SegmentPart::new(segment, full))
}

/// Direction a new wire end faces at `point`: away from the line.
fn wire_end_orientation(line: OrderedLine, point: Point) -> gridlogic_vocabulary::Orientation {
    detail::endpoint_orientation(&SegmentInfo::shadow(line), point)
}

/// The endpoint type of a new segment at `point` given its attachment.
fn endpoint_type_at(
    circuit: &CircuitData,
    wire_id: WireId,
    line: OrderedLine,
    point: Point,
    attachment: Attachment,
) -> SegmentPointType {
    match attachment {
        Attachment::ItemOutput => SegmentPointType::Input,
        Attachment::ItemInput => SegmentPointType::Output,
        Attachment::Free => SegmentPointType::ShadowPoint,
        Attachment::Wire(_) => {
            // Junction in the (already merged) target tree: terminating
            // on a passing segment's interior is a cross point of the
            // terminating axis; meeting endpoints stay plain. The
            // annotation is carried once per axis.
            let tree = circuit.layout.wires().segment_tree(wire_id);
            let passes = tree.indices().any(|index| {
                let segment_line = tree.line(index);
                segment_line.contains(point) && !segment_line.is_endpoint(point)
            });
            let claimed = tree.indices().any(|index| {
                let info = tree.info(index);
                info.line.is_endpoint(point)
                    && info.line.is_horizontal() == line.is_horizontal()
                    && info.point_type_at(point).is_cross_point()
            });
            if passes && !claimed {
                if line.is_horizontal() {
                    SegmentPointType::CrossPointHorizontal
                } else {
                    SegmentPointType::CrossPointVertical
                }
            } else {
                SegmentPointType::ShadowPoint
            }
        }
    }
}

/// Moves every segment of `source` into `target`, then deletes the empty
/// source tree, re-announcing all renumbered ids.
fn merge_wire_into(circuit: &mut CircuitData, source: WireId, target: WireId) {
    debug_assert!(source.is_inserted() && target.is_inserted() && source != target);

    let source_tree =
        std::mem::take(circuit.layout.wires_mut().modifiable_segment_tree(source));
    for old_index in source_tree.indices() {
        let info = source_tree.info(old_index);
        let new_index = circuit
            .layout
            .wires_mut()
            .modifiable_segment_tree(target)
            .add_segment(info);
        for part in source_tree.valid_parts(old_index).iter() {
            circuit
                .layout
                .wires_mut()
                .modifiable_segment_tree(target)
                .mark_valid(new_index, part);
        }
        circuit.submit(InfoMessage::InsertedSegmentIdUpdated {
            new_segment: Segment::new(target, new_index),
            old_segment: Segment::new(source, old_index),
            segment_info: info,
        });
    }

    delete_empty_wire(circuit, source);
}

/// Deletes an empty inserted wire tree, re-announcing the segments of the
/// wire that swap-removal renumbered.
fn delete_empty_wire(circuit: &mut CircuitData, wire_id: WireId) {
    debug_assert!(gridlogic_layout::is_wire_empty(&circuit.layout, wire_id));

    if let Some(old_wire_id) = circuit.layout.wires_mut().swap_delete_wire(wire_id) {
        let indices: Vec<SegmentIndex> = circuit
            .layout
            .wires()
            .segment_tree(wire_id)
            .indices()
            .collect();
        for index in indices {
            let info = circuit.layout.wires().segment_tree(wire_id).info(index);
            circuit.submit(InfoMessage::InsertedSegmentIdUpdated {
                new_segment: Segment::new(wire_id, index),
                old_segment: Segment::new(old_wire_id, index),
                segment_info: info,
            });
        }
    }
}

/// Merges `segment` with a collinear neighbor sharing a plain endpoint at
/// `point`, if exactly one exists. Returns the surviving segment id.
fn try_merge_at(circuit: &mut CircuitData, segment: Segment, point: Point) -> Segment {
    let tree = circuit.layout.wires().segment_tree(segment.wire_id);
    let own_line = tree.line(segment.segment_index);
    let own_type = tree.info(segment.segment_index).point_type_at(point);
    if own_type != SegmentPointType::ShadowPoint {
        return segment;
    }

    // Exactly one other terminating segment, collinear, plain endpoint,
    // and nothing passing through.
    let mut other: Option<SegmentIndex> = None;
    let mut terminating = 0usize;
    for index in tree.indices() {
        if index == segment.segment_index {
            continue;
        }
        let line = tree.line(index);
        if line.is_endpoint(point) {
            terminating += 1;
            let collinear = line.is_horizontal() == own_line.is_horizontal();
            let plain = tree.info(index).point_type_at(point) == SegmentPointType::ShadowPoint;
            if collinear && plain {
                other = Some(index);
            }
        } else if line.contains(point) {
            return segment;
        }
    }
    let Some(other) = other else {
        return segment;
    };
    if terminating != 1 {
        return segment;
    }

    merge_segments_with_messages(circuit, segment.wire_id, segment.segment_index, other)
}

/// Merges two segments of one inserted wire, announcing every step.
///
/// The merged segment keeps the lower of the two indices; the freed slot
/// is re-announced. Returns the merged segment id.
fn merge_segments_with_messages(
    circuit: &mut CircuitData,
    wire_id: WireId,
    index_a: SegmentIndex,
    index_b: SegmentIndex,
) -> Segment {
    let tree = circuit.layout.wires().segment_tree(wire_id);
    let info_a = tree.info(index_a);
    let info_b = tree.info(index_b);

    let (lead_index, lead_info, tail_index, tail_info) = if info_a.line.p0() < info_b.line.p0() {
        (index_a, info_a, index_b, info_b)
    } else {
        (index_b, info_b, index_a, info_a)
    };
    let lead_len = to_full_part(lead_info.line).end();
    let total = lead_len
        .checked_add(to_full_part(tail_info.line).end())
        .expect("merged lines stay on the grid");

    let moved = circuit
        .layout
        .wires_mut()
        .modifiable_segment_tree(wire_id)
        .merge_segments(index_a, index_b)
        .expect("merge candidates touch end to start");

    let kept_index = index_a.min(index_b);
    let removed_index = index_a.max(index_b);
    let kept = Segment::new(wire_id, kept_index);
    let merged_info = circuit
        .layout
        .wires()
        .segment_tree(wire_id)
        .info(kept_index);

    circuit.submit(InfoMessage::SegmentUninserted {
        segment: Segment::new(wire_id, index_a),
        segment_info: info_a,
    });
    circuit.submit(InfoMessage::SegmentUninserted {
        segment: Segment::new(wire_id, index_b),
        segment_info: info_b,
    });
    circuit.submit(InfoMessage::SegmentMerged {
        segment_from: Segment::new(wire_id, lead_index),
        segment_to: kept,
        part_destination: Part::try_new(Offset::ZERO, lead_len).expect("leads have length"),
    });
    circuit.submit(InfoMessage::SegmentMerged {
        segment_from: Segment::new(wire_id, tail_index),
        segment_to: kept,
        part_destination: Part::try_new(lead_len, total).expect("tails have length"),
    });
    circuit.submit(InfoMessage::SegmentInserted {
        segment: kept,
        segment_info: merged_info,
    });

    if let Some(old_index) = moved {
        let info = circuit
            .layout
            .wires()
            .segment_tree(wire_id)
            .info(removed_index);
        circuit.submit(InfoMessage::InsertedSegmentIdUpdated {
            new_segment: Segment::new(wire_id, removed_index),
            old_segment: Segment::new(wire_id, old_index),
            segment_info: info,
        });
    }

    kept
}

/// Splits a segment at an offset, announcing every step.
///
/// Works on inserted wires and on the uninserted aggregates. Returns the
/// new segment covering the trailing range.
pub fn split_wire_segment(
    circuit: &mut CircuitData,
    segment: Segment,
    offset: Offset,
) -> Result<Segment, CircuitError> {
    if !gridlogic_layout::is_segment_valid(&circuit.layout, segment) {
        return Err(CircuitError::InvalidId);
    }
    let inserted = segment.wire_id.is_inserted();
    let old_info = gridlogic_layout::get_segment_info(&circuit.layout, segment);
    let old_full = to_full_part(old_info.line);

    let new_index = circuit
        .layout
        .wires_mut()
        .modifiable_segment_tree(segment.wire_id)
        .split_segment(segment.segment_index, offset)?;
    let new_segment = Segment::new(segment.wire_id, new_index);

    let first_info = gridlogic_layout::get_segment_info(&circuit.layout, segment);
    let second_info = gridlogic_layout::get_segment_info(&circuit.layout, new_segment);

    if inserted {
        circuit.submit(InfoMessage::SegmentUninserted {
            segment,
            segment_info: old_info,
        });
    }
    circuit.submit(InfoMessage::SegmentCreated {
        segment: new_segment,
    });
    circuit.submit(InfoMessage::SegmentSplit {
        segment_from: segment,
        part_from: Part::try_new(offset, old_full.end())?,
        segment_to: new_segment,
    });
    if inserted {
        circuit.submit(InfoMessage::SegmentInserted {
            segment,
            segment_info: first_info,
        });
        circuit.submit(InfoMessage::SegmentInserted {
            segment: new_segment,
            segment_info: second_info,
        });
    }
    Ok(new_segment)
}

/// Merges two collinear, touching segments of one wire.
///
/// The shared endpoints must be plain shadow points.
pub fn merge_wire_segments(
    circuit: &mut CircuitData,
    segment_a: Segment,
    segment_b: Segment,
) -> Result<Segment, CircuitError> {
    if !gridlogic_layout::is_segment_valid(&circuit.layout, segment_a)
        || !gridlogic_layout::is_segment_valid(&circuit.layout, segment_b)
        || segment_a.wire_id != segment_b.wire_id
        || segment_a == segment_b
    {
        return Err(CircuitError::InvalidId);
    }

    let info_a = gridlogic_layout::get_segment_info(&circuit.layout, segment_a);
    let info_b = gridlogic_layout::get_segment_info(&circuit.layout, segment_b);
    let (lead, tail) = if info_a.line.p0() < info_b.line.p0() {
        (info_a, info_b)
    } else {
        (info_b, info_a)
    };
    if lead.line.p1() != tail.line.p0() {
        return Err(CircuitError::Range(gridlogic_vocabulary::RangeError {
            reason: "merged segments need to touch end to start",
        }));
    }
    let shared = lead.line.p1();
    if lead.point_type_at(shared) != SegmentPointType::ShadowPoint
        || tail.point_type_at(shared) != SegmentPointType::ShadowPoint
    {
        return Err(CircuitError::InvalidState);
    }

    if segment_a.wire_id.is_inserted() {
        Ok(merge_segments_with_messages(
            circuit,
            segment_a.wire_id,
            segment_a.segment_index,
            segment_b.segment_index,
        ))
    } else {
        merge_aggregate_segments(circuit, segment_a, segment_b)
    }
}

/// Merge within an uninserted aggregate: no index messages, only the
/// selection remapping.
fn merge_aggregate_segments(
    circuit: &mut CircuitData,
    segment_a: Segment,
    segment_b: Segment,
) -> Result<Segment, CircuitError> {
    let wire_id = segment_a.wire_id;
    let tree = circuit.layout.wires().segment_tree(wire_id);
    let info_a = tree.info(segment_a.segment_index);
    let info_b = tree.info(segment_b.segment_index);
    let (lead_index, lead_info, tail_index, tail_info) = if info_a.line.p0() < info_b.line.p0() {
        (
            segment_a.segment_index,
            info_a,
            segment_b.segment_index,
            info_b,
        )
    } else {
        (
            segment_b.segment_index,
            info_b,
            segment_a.segment_index,
            info_a,
        )
    };
    let lead_len = to_full_part(lead_info.line).end();
    let total = lead_len.checked_add(to_full_part(tail_info.line).end())?;

    let moved = circuit
        .layout
        .wires_mut()
        .modifiable_segment_tree(wire_id)
        .merge_segments(segment_a.segment_index, segment_b.segment_index)?;

    let kept_index = segment_a.segment_index.min(segment_b.segment_index);
    let removed_index = segment_a.segment_index.max(segment_b.segment_index);
    let kept = Segment::new(wire_id, kept_index);

    circuit.submit(InfoMessage::SegmentMerged {
        segment_from: Segment::new(wire_id, lead_index),
        segment_to: kept,
        part_destination: Part::try_new(Offset::ZERO, lead_len)?,
    });
    circuit.submit(InfoMessage::SegmentMerged {
        segment_from: Segment::new(wire_id, tail_index),
        segment_to: kept,
        part_destination: Part::try_new(lead_len, total)?,
    });
    if let Some(old_index) = moved {
        circuit.submit(InfoMessage::SegmentIdUpdated {
            new_segment: Segment::new(wire_id, removed_index),
            old_segment: Segment::new(wire_id, old_index),
        });
    }
    Ok(kept)
}

/// Deletes a range of a wire segment.
///
/// The range is isolated by splits, removed, and the surroundings are
/// cleaned up: junction annotations recomputed, collinear leftovers
/// merged, disconnected remainders moved to wires of their own, and
/// emptied wires deleted.
pub fn delete_wire_segment(
    circuit: &mut CircuitData,
    segment_part: SegmentPart,
) -> Result<(), CircuitError> {
    if !gridlogic_layout::is_segment_part_valid(&circuit.layout, segment_part) {
        return Err(CircuitError::InvalidId);
    }
    tracing::debug!(?segment_part, "delete_wire_segment");

    let wire_id = segment_part.segment.wire_id;
    let inserted = wire_id.is_inserted();
    let full = to_full_part(gridlogic_layout::get_line(
        &circuit.layout,
        segment_part.segment,
    ));
    let part = segment_part.part;

    // Isolate the doomed range as one segment.
    let mut doomed = segment_part.segment;
    if part.end() < full.end() {
        split_wire_segment(circuit, doomed, part.end())?;
    }
    if part.begin() > full.begin() {
        doomed = split_wire_segment(circuit, doomed, part.begin())?;
    }

    let doomed_info = gridlogic_layout::get_segment_info(&circuit.layout, doomed);

    if inserted {
        circuit.submit(InfoMessage::SegmentUninserted {
            segment: doomed,
            segment_info: doomed_info,
        });
    }
    circuit.submit(InfoMessage::SegmentDeleted { segment: doomed });
    delete_slot(circuit, doomed, inserted);

    if inserted {
        for point in [doomed_info.line.p0(), doomed_info.line.p1()] {
            update_endpoint_types_at(circuit, wire_id, point);
            merge_leftovers_at(circuit, wire_id, point);
        }
        split_off_disconnected(circuit, wire_id);
    }
    Ok(())
}

/// Removes a slot whose segment is already gone from the indices,
/// re-announcing whatever swap-removal moved into it.
fn delete_slot(circuit: &mut CircuitData, segment: Segment, inserted: bool) {
    let moved = circuit
        .layout
        .wires_mut()
        .modifiable_segment_tree(segment.wire_id)
        .delete_segment(segment.segment_index);

    if let Some(old_index) = moved {
        let info = gridlogic_layout::get_segment_info(&circuit.layout, segment);
        if inserted {
            circuit.submit(InfoMessage::InsertedSegmentIdUpdated {
                new_segment: segment,
                old_segment: Segment::new(segment.wire_id, old_index),
                segment_info: info,
            });
        } else {
            circuit.submit(InfoMessage::SegmentIdUpdated {
                new_segment: segment,
                old_segment: Segment::new(segment.wire_id, old_index),
            });
        }
    }
}

/// Recomputes junction annotations of every segment terminating at
/// `point`, preserving connector endpoints.
fn update_endpoint_types_at(circuit: &mut CircuitData, wire_id: WireId, point: Point) {
    let tree = circuit.layout.wires().segment_tree(wire_id);

    let mut passes_horizontal = false;
    let mut passes_vertical = false;
    let mut terminating: SmallVec<[SegmentIndex; 4]> = SmallVec::new();
    for index in tree.indices() {
        let line = tree.line(index);
        if line.is_endpoint(point) {
            terminating.push(index);
        } else if line.contains(point) {
            if line.is_horizontal() {
                passes_horizontal = true;
            } else {
                passes_vertical = true;
            }
        }
    }

    // One terminating segment per axis carries the cross annotation;
    // existing annotations keep their claim so the cell ownership never
    // double-writes.
    let tree = circuit.layout.wires().segment_tree(wire_id);
    let holds_cross = |index: &SegmentIndex, horizontal: bool| {
        let info = tree.info(*index);
        info.line.is_horizontal() == horizontal && info.point_type_at(point).is_cross_point()
    };
    let mut horizontal_claimed = terminating.iter().any(|index| holds_cross(index, true));
    let mut vertical_claimed = terminating.iter().any(|index| holds_cross(index, false));

    for index in terminating {
        let info = circuit.layout.wires().segment_tree(wire_id).info(index);
        let current = info.point_type_at(point);
        if matches!(
            current,
            SegmentPointType::Input | SegmentPointType::Output | SegmentPointType::VisualCrossPoint
        ) {
            continue;
        }

        let passes_other_axis = if info.line.is_horizontal() {
            passes_vertical
        } else {
            passes_horizontal
        };

        let desired = if current.is_cross_point() {
            // An existing annotation survives while something still
            // passes; otherwise the junction is gone.
            if passes_other_axis {
                current
            } else {
                SegmentPointType::ShadowPoint
            }
        } else if info.line.is_horizontal() && passes_other_axis && !horizontal_claimed {
            horizontal_claimed = true;
            SegmentPointType::CrossPointHorizontal
        } else if info.line.is_vertical() && passes_other_axis && !vertical_claimed {
            vertical_claimed = true;
            SegmentPointType::CrossPointVertical
        } else {
            SegmentPointType::ShadowPoint
        };

        if desired != current {
            detail::set_endpoint_type(circuit, Segment::new(wire_id, index), point, desired);
        }
    }
}

/// Merges the collinear pair left at `point` after a deletion, if the
/// junction reduced to a straight line.
fn merge_leftovers_at(circuit: &mut CircuitData, wire_id: WireId, point: Point) {
    let tree = circuit.layout.wires().segment_tree(wire_id);
    let mut terminating: SmallVec<[SegmentIndex; 4]> = SmallVec::new();
    for index in tree.indices() {
        let line = tree.line(index);
        if line.is_endpoint(point) {
            terminating.push(index);
        } else if line.contains(point) {
            return;
        }
    }
    let &[a, b] = &terminating[..] else {
        return;
    };

    let info_a = tree.info(a);
    let info_b = tree.info(b);
    let collinear = info_a.line.is_horizontal() == info_b.line.is_horizontal();
    if collinear
        && info_a.point_type_at(point) == SegmentPointType::ShadowPoint
        && info_b.point_type_at(point) == SegmentPointType::ShadowPoint
    {
        merge_segments_with_messages(circuit, wire_id, a, b);
    }
}

/// Splits a wire into one tree per connected component, deleting it
/// entirely when no segments remain.
fn split_off_disconnected(circuit: &mut CircuitData, wire_id: WireId) {
    let tree = circuit.layout.wires().segment_tree(wire_id);
    let count = tree.len();
    if count == 0 {
        delete_empty_wire(circuit, wire_id);
        return;
    }

    // Union-find over segments; connected when one contains an endpoint
    // of the other.
    let mut parent: Vec<usize> = (0..count).collect();
    fn find(parent: &mut [usize], i: usize) -> usize {
        if parent[i] != i {
            let root = find(parent, parent[i]);
            parent[i] = root;
        }
        parent[i]
    }
    for i in 0..count {
        for j in (i + 1)..count {
            let line_i = tree.line(SegmentIndex::from_index(i));
            let line_j = tree.line(SegmentIndex::from_index(j));
            let touching = line_i.contains(line_j.p0())
                || line_i.contains(line_j.p1())
                || line_j.contains(line_i.p0())
                || line_j.contains(line_i.p1());
            if touching {
                let root_i = find(&mut parent, i);
                let root_j = find(&mut parent, j);
                parent[root_i] = root_j;
            }
        }
    }

    let first_root = find(&mut parent, 0);
    let disconnected: Vec<usize> = (0..count)
        .filter(|&i| find(&mut parent, i) != first_root)
        .collect();
    if disconnected.is_empty() {
        return;
    }

    // Group the strays by component root and give each its own wire.
    let mut roots: Vec<usize> = disconnected
        .iter()
        .map(|&i| find(&mut parent, i))
        .collect();
    roots.sort_unstable();
    roots.dedup();

    // Collect infos before mutating; slots are deleted afterwards in
    // descending order so pending indices stay valid.
    let mut moves: Vec<(usize, WireId, SegmentIndex)> = Vec::new();
    for root in roots {
        let new_wire = circuit.layout.wires_mut().add_wire();
        for &i in disconnected
            .iter()
            .filter(|&&i| find(&mut parent, i) == root)
        {
            let old_index = SegmentIndex::from_index(i);
            let info = circuit.layout.wires().segment_tree(wire_id).info(old_index);
            let valid: Vec<Part> = circuit
                .layout
                .wires()
                .segment_tree(wire_id)
                .valid_parts(old_index)
                .iter()
                .collect();
            let new_index = circuit
                .layout
                .wires_mut()
                .modifiable_segment_tree(new_wire)
                .add_segment(info);
            for part in valid {
                circuit
                    .layout
                    .wires_mut()
                    .modifiable_segment_tree(new_wire)
                    .mark_valid(new_index, part);
            }
            circuit.submit(InfoMessage::InsertedSegmentIdUpdated {
                new_segment: Segment::new(new_wire, new_index),
                old_segment: Segment::new(wire_id, old_index),
                segment_info: info,
            });
            moves.push((i, new_wire, new_index));
        }
    }

    let mut doomed_slots: Vec<usize> = moves.iter().map(|&(i, _, _)| i).collect();
    doomed_slots.sort_unstable_by(|a, b| b.cmp(a));
    for slot in doomed_slots {
        // The moved-out slots are already re-announced; swap-removal here
        // may renumber surviving segments, which is announced normally.
        let moved = circuit
            .layout
            .wires_mut()
            .modifiable_segment_tree(wire_id)
            .delete_segment(SegmentIndex::from_index(slot));
        if let Some(old_index) = moved {
            let target = SegmentIndex::from_index(slot);
            let info = circuit.layout.wires().segment_tree(wire_id).info(target);
            circuit.submit(InfoMessage::InsertedSegmentIdUpdated {
                new_segment: Segment::new(wire_id, target),
                old_segment: Segment::new(wire_id, old_index),
                segment_info: info,
            });
        }
    }
}

/// Moves a segment of the temporary aggregate by a grid delta.
pub fn move_temporary_wire_segment(
    circuit: &mut CircuitData,
    segment: Segment,
    delta_x: i32,
    delta_y: i32,
) -> Result<(), CircuitError> {
    if !gridlogic_layout::is_segment_valid(&circuit.layout, segment) {
        return Err(CircuitError::InvalidId);
    }
    if !segment.wire_id.is_temporary() {
        return Err(CircuitError::InvalidState);
    }

    let info = gridlogic_layout::get_segment_info(&circuit.layout, segment);
    if !gridlogic_vocabulary::is_representable_line(info.line, delta_x, delta_y) {
        return Err(CircuitError::Overflow(gridlogic_vocabulary::OverflowError {
            type_name: "Coord",
        }));
    }
    let moved_line = gridlogic_vocabulary::add_unchecked_line(info.line, delta_x, delta_y);
    circuit
        .layout
        .wires_mut()
        .modifiable_segment_tree(segment.wire_id)
        .update_segment(segment.segment_index, SegmentInfo { line: moved_line, ..info });
    Ok(())
}
