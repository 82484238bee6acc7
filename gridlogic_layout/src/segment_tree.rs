// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-wire segment storage.

use core::fmt;

use gridlogic_part_selection::{PartCopyDefinition, PartSelection};
use gridlogic_vocabulary::{
    to_full_part, to_line, to_point, Offset, OrderedLine, Part, RangeError, SegmentIndex,
    SegmentInfo, SegmentPointType,
};

use crate::error::LayoutError;

/// The segments of one wire, with their surviving valid parts.
///
/// Segments are stored densely; deletion swap-removes, and the caller is
/// told which index moved so it can re-announce the renumbering. Each
/// segment carries a [`PartSelection`] of the ranges that are individually
/// marked valid while the wire is being placed.
#[derive(Clone, Default, PartialEq)]
pub struct SegmentTree {
    segments: Vec<SegmentInfo>,
    valid_parts: Vec<PartSelection>,
}

impl SegmentTree {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
            valid_parts: Vec::new(),
        }
    }

    /// Returns whether the tree holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Iterates all segment indices.
    pub fn indices(&self) -> impl Iterator<Item = SegmentIndex> + use<> {
        (0..self.segments.len()).map(SegmentIndex::from_index)
    }

    /// Returns whether `index` refers to a live segment.
    #[must_use]
    pub fn contains(&self, index: SegmentIndex) -> bool {
        index.index() < self.segments.len()
    }

    /// Geometry and endpoint types of a segment.
    ///
    /// # Panics
    ///
    /// Panics for out-of-range indices.
    #[must_use]
    pub fn info(&self, index: SegmentIndex) -> SegmentInfo {
        self.segments[index.index()]
    }

    /// The line of a segment.
    #[must_use]
    pub fn line(&self, index: SegmentIndex) -> OrderedLine {
        self.info(index).line
    }

    /// The valid parts of a segment.
    #[must_use]
    pub fn valid_parts(&self, index: SegmentIndex) -> &PartSelection {
        &self.valid_parts[index.index()]
    }

    /// Iterates the valid parts of all segments.
    pub fn all_valid_parts(&self) -> impl Iterator<Item = &PartSelection> {
        self.valid_parts.iter()
    }

    /// Appends a segment and returns its index.
    pub fn add_segment(&mut self, info: SegmentInfo) -> SegmentIndex {
        let index = SegmentIndex::from_index(self.segments.len());
        self.segments.push(info);
        self.valid_parts.push(PartSelection::new());
        index
    }

    /// Replaces the geometry of a segment.
    ///
    /// The valid parts must still fit the new line; callers shrink or move
    /// them beforehand when the line changes length.
    pub fn update_segment(&mut self, index: SegmentIndex, info: SegmentInfo) {
        let slot = index.index();
        debug_assert!(
            self.valid_parts[slot]
                .max_offset()
                .is_none_or(|max| max <= to_full_part(info.line).end()),
            "valid parts need to fit the new line"
        );
        self.segments[slot] = info;
    }

    /// Marks a range of a segment valid.
    pub fn mark_valid(&mut self, index: SegmentIndex, part: Part) {
        self.valid_parts[index.index()].add_part(part);
    }

    /// Unmarks a range of a segment.
    pub fn unmark_valid(&mut self, index: SegmentIndex, part: Part) {
        self.valid_parts[index.index()].remove_part(part);
    }

    /// Deletes a segment by swap-remove.
    ///
    /// Returns the index that was moved into the freed slot, if any, so the
    /// caller can announce the renumbering.
    pub fn delete_segment(&mut self, index: SegmentIndex) -> Option<SegmentIndex> {
        let slot = index.index();
        assert!(slot < self.segments.len(), "segment index out of range");

        self.segments.swap_remove(slot);
        self.valid_parts.swap_remove(slot);

        let moved = SegmentIndex::from_index(self.segments.len());
        (moved != index).then_some(moved)
    }

    /// Splits a segment at `offset`, keeping the leading range in place.
    ///
    /// The trailing range becomes a new segment starting at offset zero;
    /// its index is returned. Both new endpoints at the split point start
    /// as [`SegmentPointType::ShadowPoint`]; callers recompute endpoint
    /// types afterwards. Valid parts are distributed over both halves.
    pub fn split_segment(
        &mut self,
        index: SegmentIndex,
        offset: Offset,
    ) -> Result<SegmentIndex, LayoutError> {
        let info = self.info(index);
        let full = to_full_part(info.line);
        if offset <= full.begin() || offset >= full.end() {
            return Err(LayoutError::Range(RangeError::new(
                "split offset needs to be inside the segment",
            )));
        }

        let split_point = to_point(info.line, offset)?;
        let first_line = OrderedLine::new(info.line.p0(), split_point)?;
        let second_line = OrderedLine::new(split_point, info.line.p1())?;

        let first_info = SegmentInfo::new(first_line, info.p0_type, SegmentPointType::ShadowPoint);
        let second_info =
            SegmentInfo::new(second_line, SegmentPointType::ShadowPoint, info.p1_type);

        let old_valid = self.valid_parts[index.index()].clone();
        let first_part = Part::try_new(full.begin(), offset)?;
        let second_part = Part::try_new(offset, full.end())?;

        let mut first_valid = PartSelection::new();
        first_valid.copy_parts(
            &old_valid,
            PartCopyDefinition {
                destination: first_part,
                source: first_part,
            },
        );
        let mut second_valid = PartSelection::new();
        second_valid.copy_parts(
            &old_valid,
            PartCopyDefinition {
                destination: Part::try_new(Offset::ZERO, second_part.length().into())?,
                source: second_part,
            },
        );

        self.segments[index.index()] = first_info;
        self.valid_parts[index.index()] = first_valid;

        let new_index = self.add_segment(second_info);
        self.valid_parts[new_index.index()] = second_valid;
        Ok(new_index)
    }

    /// Merges two collinear, touching segments.
    ///
    /// The shared endpoint disappears; the outer endpoint types survive,
    /// and valid parts of both segments are carried over. The merged
    /// segment is stored at the lower of the two indices, so the removal
    /// of the other slot can never move it. Returns the index that was
    /// moved by that removal, if any.
    pub fn merge_segments(
        &mut self,
        index_a: SegmentIndex,
        index_b: SegmentIndex,
    ) -> Result<Option<SegmentIndex>, LayoutError> {
        assert_ne!(index_a, index_b, "cannot merge a segment with itself");
        let info_a = self.info(index_a);
        let info_b = self.info(index_b);

        // Order the two segments along the shared axis.
        let (lead_index, tail_index) = if info_a.line.p0() < info_b.line.p0() {
            (index_a, index_b)
        } else {
            (index_b, index_a)
        };
        let lead = self.info(lead_index);
        let tail = self.info(tail_index);

        if lead.line.p1() != tail.line.p0() {
            return Err(LayoutError::Range(RangeError::new(
                "merged segments need to touch end to start",
            )));
        }
        let merged_line = OrderedLine::new(lead.line.p0(), tail.line.p1())?;

        let merged_info = SegmentInfo::new(merged_line, lead.p0_type, tail.p1_type);
        let lead_len = to_full_part(lead.line).end();
        let tail_full = to_full_part(tail.line);

        let mut merged_valid = self.valid_parts[lead_index.index()].clone();
        merged_valid.copy_parts(
            &self.valid_parts[tail_index.index()].clone(),
            PartCopyDefinition {
                destination: Part::try_new(lead_len, lead_len.checked_add(tail_full.end())?)?,
                source: tail_full,
            },
        );

        let keep_index = index_a.min(index_b);
        let delete_index = index_a.max(index_b);

        self.segments[keep_index.index()] = merged_info;
        self.valid_parts[keep_index.index()] = merged_valid;

        Ok(self.delete_segment(delete_index))
    }

    /// Number of endpoints typed as [`SegmentPointType::Input`].
    #[must_use]
    pub fn input_count(&self) -> usize {
        self.endpoint_count(SegmentPointType::Input)
    }

    /// Number of endpoints typed as [`SegmentPointType::Output`].
    #[must_use]
    pub fn output_count(&self) -> usize {
        self.endpoint_count(SegmentPointType::Output)
    }

    /// Returns whether any endpoint is typed as an input.
    #[must_use]
    pub fn has_input(&self) -> bool {
        self.input_count() > 0
    }

    fn endpoint_count(&self, point_type: SegmentPointType) -> usize {
        self.segments
            .iter()
            .map(|info| {
                usize::from(info.p0_type == point_type) + usize::from(info.p1_type == point_type)
            })
            .sum()
    }

    /// The sub-line covered by a part of a segment.
    pub fn part_line(&self, index: SegmentIndex, part: Part) -> Result<OrderedLine, LayoutError> {
        Ok(to_line(self.line(index), part)?)
    }
}

impl fmt::Debug for SegmentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentTree")
            .field("segments", &self.segments)
            .field("valid_parts", &self.valid_parts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlogic_vocabulary::Point;

    fn hline(x0: i16, x1: i16, y: i16) -> OrderedLine {
        OrderedLine::new(Point::new(x0, y), Point::new(x1, y)).unwrap()
    }

    fn shadow(line: OrderedLine) -> SegmentInfo {
        SegmentInfo::shadow(line)
    }

    #[test]
    fn add_and_delete_swap_removes() {
        let mut tree = SegmentTree::new();
        let a = tree.add_segment(shadow(hline(0, 5, 0)));
        let _b = tree.add_segment(shadow(hline(0, 5, 1)));
        let c = tree.add_segment(shadow(hline(0, 5, 2)));

        let moved = tree.delete_segment(a);
        assert_eq!(moved, Some(c));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.line(a), hline(0, 5, 2));
    }

    #[test]
    fn split_distributes_valid_parts() {
        let mut tree = SegmentTree::new();
        let index = tree.add_segment(shadow(hline(0, 10, 0)));
        tree.mark_valid(index, Part::new(2, 8));

        let second = tree.split_segment(index, Offset::new(6)).unwrap();

        assert_eq!(tree.line(index), hline(0, 6, 0));
        assert_eq!(tree.line(second), hline(6, 10, 0));
        assert_eq!(tree.valid_parts(index).parts(), [Part::new(2, 6)]);
        assert_eq!(tree.valid_parts(second).parts(), [Part::new(0, 2)]);
    }

    #[test]
    fn split_rejects_boundary_offsets() {
        let mut tree = SegmentTree::new();
        let index = tree.add_segment(shadow(hline(0, 10, 0)));
        assert!(tree.split_segment(index, Offset::ZERO).is_err());
        assert!(tree.split_segment(index, Offset::new(10)).is_err());
    }

    #[test]
    fn merge_joins_touching_segments() {
        let mut tree = SegmentTree::new();
        let a = tree.add_segment(SegmentInfo::new(
            hline(0, 6, 0),
            SegmentPointType::Input,
            SegmentPointType::ShadowPoint,
        ));
        let b = tree.add_segment(SegmentInfo::new(
            hline(6, 10, 0),
            SegmentPointType::ShadowPoint,
            SegmentPointType::Output,
        ));
        tree.mark_valid(a, Part::new(0, 6));
        tree.mark_valid(b, Part::new(0, 4));

        tree.merge_segments(a, b).unwrap();

        assert_eq!(tree.len(), 1);
        let info = tree.info(a);
        assert_eq!(info.line, hline(0, 10, 0));
        assert_eq!(info.p0_type, SegmentPointType::Input);
        assert_eq!(info.p1_type, SegmentPointType::Output);
        assert_eq!(tree.valid_parts(a).parts(), [Part::new(0, 10)]);
    }

    #[test]
    fn merge_rejects_disjoint_segments() {
        let mut tree = SegmentTree::new();
        let a = tree.add_segment(shadow(hline(0, 4, 0)));
        let b = tree.add_segment(shadow(hline(6, 10, 0)));
        assert!(tree.merge_segments(a, b).is_err());
    }

    #[test]
    fn endpoint_counts() {
        let mut tree = SegmentTree::new();
        tree.add_segment(SegmentInfo::new(
            hline(0, 4, 0),
            SegmentPointType::Input,
            SegmentPointType::ShadowPoint,
        ));
        tree.add_segment(SegmentInfo::new(
            hline(4, 8, 0),
            SegmentPointType::ShadowPoint,
            SegmentPointType::Output,
        ));
        assert_eq!(tree.input_count(), 1);
        assert_eq!(tree.output_count(), 1);
        assert!(tree.has_input());
    }
}
