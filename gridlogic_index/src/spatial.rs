// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial queries over inserted elements and segments.

use gridlogic_layout::layout_info::element_rect;
use gridlogic_layout::message::InfoMessage;
use gridlogic_vocabulary::{
    to_fine_rect, DecorationCalculationData, DecorationId, LayoutCalculationData, LogicItemId,
    Point, RectFine, Segment, SegmentInfo,
};
use smallvec::SmallVec;

use crate::rtree::RTree;

/// What a spatial entry refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SpatialPayload {
    /// An inserted logic item.
    LogicItem(LogicItemId),
    /// An inserted decoration.
    Decoration(DecorationId),
    /// An inserted wire segment.
    Segment(Segment),
}

impl SpatialPayload {
    /// The segment, when this entry refers to one.
    #[must_use]
    pub const fn segment(self) -> Option<Segment> {
        match self {
            Self::Segment(segment) => Some(segment),
            _ => None,
        }
    }
}

/// The selection box of a logic item.
fn logicitem_box(data: &LayoutCalculationData) -> RectFine {
    to_fine_rect(element_rect(data))
}

/// The selection box of a decoration.
fn decoration_box(data: &DecorationCalculationData) -> RectFine {
    let max = data
        .max_corner()
        .expect("inserted decorations stay on the grid");
    RectFine::new(
        data.position.x.to_fine(),
        data.position.y.to_fine(),
        max.x.to_fine(),
        max.y.to_fine(),
    )
}

/// The selection box of a wire segment: its line, with zero thickness.
fn segment_box(info: &SegmentInfo) -> RectFine {
    RectFine::new(
        info.line.p0().x.to_fine(),
        info.line.p0().y.to_fine(),
        info.line.p1().x.to_fine(),
        info.line.p1().y.to_fine(),
    )
}

/// An R-tree over the boxes of all inserted elements and segments.
#[derive(Clone, Debug, Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialPayload>,
}

impl SpatialIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything whose box intersects `rect`.
    #[must_use]
    pub fn query_selection(&self, rect: RectFine) -> Vec<SpatialPayload> {
        let mut result = Vec::new();
        self.tree.visit_rect(rect, |_, payload| result.push(*payload));
        result
    }

    /// Up to four segments whose box contains the point.
    ///
    /// Four entries cover the four directions meeting at a cross point.
    #[must_use]
    pub fn query_line_segments(&self, point: Point) -> SmallVec<[Segment; 4]> {
        let mut result = SmallVec::new();
        self.tree
            .visit_point(point.x.to_fine(), point.y.to_fine(), |_, payload| {
                if let Some(segment) = payload.segment()
                    && result.len() < 4
                {
                    result.push(segment);
                }
            });
        result
    }

    /// Number of indexed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns whether nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Applies one committed mutation.
    pub fn submit(&mut self, message: &InfoMessage) {
        match message {
            InfoMessage::LogicItemInserted { logicitem_id, data } => {
                self.tree
                    .insert(logicitem_box(data), SpatialPayload::LogicItem(*logicitem_id));
            }
            InfoMessage::LogicItemUninserted { logicitem_id, data } => {
                self.tree
                    .remove(logicitem_box(data), SpatialPayload::LogicItem(*logicitem_id));
            }
            InfoMessage::InsertedLogicItemIdUpdated {
                new_logicitem_id,
                old_logicitem_id,
                data,
            } => {
                self.tree
                    .remove(logicitem_box(data), SpatialPayload::LogicItem(*old_logicitem_id));
                self.tree
                    .insert(logicitem_box(data), SpatialPayload::LogicItem(*new_logicitem_id));
            }
            InfoMessage::DecorationInserted {
                decoration_id,
                data,
            } => {
                self.tree
                    .insert(decoration_box(data), SpatialPayload::Decoration(*decoration_id));
            }
            InfoMessage::DecorationUninserted {
                decoration_id,
                data,
            } => {
                self.tree
                    .remove(decoration_box(data), SpatialPayload::Decoration(*decoration_id));
            }
            InfoMessage::InsertedDecorationIdUpdated {
                new_decoration_id,
                old_decoration_id,
                data,
            } => {
                self.tree
                    .remove(decoration_box(data), SpatialPayload::Decoration(*old_decoration_id));
                self.tree
                    .insert(decoration_box(data), SpatialPayload::Decoration(*new_decoration_id));
            }
            InfoMessage::SegmentInserted {
                segment,
                segment_info,
            } => {
                self.tree
                    .insert(segment_box(segment_info), SpatialPayload::Segment(*segment));
            }
            InfoMessage::SegmentUninserted {
                segment,
                segment_info,
            } => {
                self.tree
                    .remove(segment_box(segment_info), SpatialPayload::Segment(*segment));
            }
            InfoMessage::InsertedSegmentIdUpdated {
                new_segment,
                old_segment,
                segment_info,
            } => {
                self.tree
                    .remove(segment_box(segment_info), SpatialPayload::Segment(*old_segment));
                self.tree
                    .insert(segment_box(segment_info), SpatialPayload::Segment(*new_segment));
            }
            InfoMessage::InsertedEndPointsUpdated { .. } => {
                // Endpoint types do not change a segment's box.
            }
            _ => {}
        }
    }
}

impl PartialEq for SpatialIndex {
    fn eq(&self, other: &Self) -> bool {
        let sort_key = |&(rect, payload): &(RectFine, SpatialPayload)| {
            (
                rect.x0.to_bits(),
                rect.y0.to_bits(),
                rect.x1.to_bits(),
                rect.y1.to_bits(),
                payload,
            )
        };
        let mut a = self.tree.entries();
        let mut b = other.tree.entries();
        a.sort_by_key(sort_key);
        b.sort_by_key(sort_key);
        a == b
    }
}
