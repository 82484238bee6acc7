// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segment endpoint classification.

use core::fmt;

use crate::line::OrderedLine;
use crate::point::Point;

/// What a segment endpoint represents at its grid point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SegmentPointType {
    /// Connects to a logic-item output or an external source.
    Input,
    /// Connects to a logic-item input.
    Output,
    /// Endpoint of a segment in the colliding aggregate.
    CollidingPoint,
    /// A horizontal segment terminates here while a vertical one passes.
    CrossPointHorizontal,
    /// A vertical segment terminates here while a horizontal one passes.
    CrossPointVertical,
    /// Endpoint without own meaning, e.g. on the passing side of a T
    /// junction or in the temporary aggregate.
    #[default]
    ShadowPoint,
    /// Two segments of one wire cross here with a visible connection dot.
    VisualCrossPoint,
    /// Probe type used while testing a candidate line for collisions.
    NewUnknown,
}

impl SegmentPointType {
    /// Returns whether this endpoint anchors a connector.
    #[must_use]
    pub const fn is_connection(self) -> bool {
        matches!(self, Self::Input | Self::Output)
    }

    /// Returns whether this endpoint is a cross point of either axis.
    #[must_use]
    pub const fn is_cross_point(self) -> bool {
        matches!(self, Self::CrossPointHorizontal | Self::CrossPointVertical)
    }
}

/// Geometry and endpoint classification of one wire segment.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct SegmentInfo {
    /// The segment's line, in canonical order.
    pub line: OrderedLine,
    /// Classification of `line.p0()`.
    pub p0_type: SegmentPointType,
    /// Classification of `line.p1()`.
    pub p1_type: SegmentPointType,
}

impl SegmentInfo {
    /// Creates a segment info.
    #[must_use]
    pub const fn new(line: OrderedLine, p0_type: SegmentPointType, p1_type: SegmentPointType) -> Self {
        Self {
            line,
            p0_type,
            p1_type,
        }
    }

    /// A segment with both endpoints as shadow points.
    #[must_use]
    pub const fn shadow(line: OrderedLine) -> Self {
        Self::new(line, SegmentPointType::ShadowPoint, SegmentPointType::ShadowPoint)
    }

    /// The endpoint type at `position`.
    ///
    /// # Panics
    ///
    /// Panics when `position` is not one of the two endpoints.
    #[must_use]
    pub fn point_type_at(&self, position: Point) -> SegmentPointType {
        if position == self.line.p0() {
            self.p0_type
        } else if position == self.line.p1() {
            self.p1_type
        } else {
            panic!("position is not an endpoint of the segment")
        }
    }

    /// Returns a copy with the endpoint type at `position` replaced.
    ///
    /// # Panics
    ///
    /// Panics when `position` is not one of the two endpoints.
    #[must_use]
    pub fn with_point_type_at(mut self, position: Point, point_type: SegmentPointType) -> Self {
        if position == self.line.p0() {
            self.p0_type = point_type;
        } else if position == self.line.p1() {
            self.p1_type = point_type;
        } else {
            panic!("position is not an endpoint of the segment");
        }
        self
    }
}

impl fmt::Debug for SegmentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SegmentInfo({:?} {:?} - {:?} {:?})",
            self.line.p0(),
            self.p0_type,
            self.line.p1(),
            self.p1_type
        )
    }
}
