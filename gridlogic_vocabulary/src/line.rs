// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned lines between grid points.

use core::fmt;

use crate::error::RangeError;
use crate::point::{is_orthogonal, Point};

/// A horizontal or vertical line with positive length.
///
/// Endpoints keep the order they were given; see [`OrderedLine`] for the
/// canonical form.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    /// First endpoint.
    pub p0: Point,
    /// Second endpoint.
    pub p1: Point,
}

impl Line {
    /// Creates a line, rejecting diagonal or zero-length spans.
    pub fn new(p0: Point, p1: Point) -> Result<Self, RangeError> {
        if !is_orthogonal(p0, p1) {
            return Err(RangeError::new(
                "line needs to be horizontal or vertical with positive length",
            ));
        }
        Ok(Self { p0, p1 })
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line({:?} - {:?})", self.p0, self.p1)
    }
}

/// An axis-aligned line in canonical order: `p0 < p1`.
///
/// For horizontal lines `p0.x < p1.x`; for vertical lines `p0.y < p1.y`.
/// This is the form stored in segment trees, so that offsets along the
/// line are unambiguous.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderedLine {
    p0: Point,
    p1: Point,
}

impl OrderedLine {
    /// Creates an ordered line, rejecting diagonal or zero-length spans.
    ///
    /// Endpoints may be given in either order; they are normalized.
    pub fn new(a: Point, b: Point) -> Result<Self, RangeError> {
        let line = Line::new(a, b)?;
        Ok(Self::from(line))
    }

    /// The smaller endpoint.
    #[must_use]
    pub const fn p0(self) -> Point {
        self.p0
    }

    /// The larger endpoint.
    #[must_use]
    pub const fn p1(self) -> Point {
        self.p1
    }

    /// Returns whether the line runs along the x axis.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        self.p0.y == self.p1.y
    }

    /// Returns whether the line runs along the y axis.
    #[must_use]
    pub fn is_vertical(self) -> bool {
        self.p0.x == self.p1.x
    }

    /// Returns whether `point` lies on the line, endpoints included.
    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        if self.is_horizontal() {
            point.y == self.p0.y && self.p0.x <= point.x && point.x <= self.p1.x
        } else {
            point.x == self.p0.x && self.p0.y <= point.y && point.y <= self.p1.y
        }
    }

    /// Returns whether `point` is one of the two endpoints.
    #[must_use]
    pub fn is_endpoint(self, point: Point) -> bool {
        point == self.p0 || point == self.p1
    }
}

impl From<Line> for OrderedLine {
    fn from(line: Line) -> Self {
        if line.p1 < line.p0 {
            Self {
                p0: line.p1,
                p1: line.p0,
            }
        } else {
            Self {
                p0: line.p0,
                p1: line.p1,
            }
        }
    }
}

impl fmt::Debug for OrderedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrderedLine({:?} - {:?})", self.p0, self.p1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_line_normalizes_endpoints() {
        let line = OrderedLine::new(Point::new(5, 0), Point::new(0, 0)).unwrap();
        assert_eq!(line.p0(), Point::new(0, 0));
        assert_eq!(line.p1(), Point::new(5, 0));
        assert!(line.is_horizontal());
        assert!(!line.is_vertical());
    }

    #[test]
    fn rejects_diagonal_and_zero_length() {
        assert!(OrderedLine::new(Point::new(0, 0), Point::new(1, 1)).is_err());
        assert!(OrderedLine::new(Point::new(3, 3), Point::new(3, 3)).is_err());
    }

    #[test]
    fn contains_checks_span() {
        let line = OrderedLine::new(Point::new(2, 1), Point::new(2, 6)).unwrap();
        assert!(line.contains(Point::new(2, 4)));
        assert!(line.contains(Point::new(2, 1)));
        assert!(!line.contains(Point::new(2, 7)));
        assert!(!line.contains(Point::new(3, 4)));
    }
}
