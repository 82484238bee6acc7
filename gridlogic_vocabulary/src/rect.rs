// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete axis-aligned rectangles.

use core::fmt;

use crate::error::RangeError;
use crate::point::Point;

/// A discrete rectangle defined by two ordered corner points.
///
/// Invariant: `p0.x <= p1.x` and `p0.y <= p1.y`. Zero width or height is
/// allowed; single cells are `p0 == p1`.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    p0: Point,
    p1: Point,
}

impl Rect {
    /// Creates a rectangle from ordered corners.
    pub fn new(p0: Point, p1: Point) -> Result<Self, RangeError> {
        if p0.x > p1.x || p0.y > p1.y {
            return Err(RangeError::new("rect corners need to be ordered"));
        }
        Ok(Self { p0, p1 })
    }

    /// Creates a rectangle from two arbitrary corners, swapping as needed.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let p0 = Point {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
        };
        let p1 = Point {
            x: a.x.max(b.x),
            y: a.y.max(b.y),
        };
        Self { p0, p1 }
    }

    /// The minimum corner.
    #[must_use]
    pub const fn p0(self) -> Point {
        self.p0
    }

    /// The maximum corner.
    #[must_use]
    pub const fn p1(self) -> Point {
        self.p1
    }

    /// Returns whether `point` lies inside the rectangle (inclusive).
    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        self.p0.x <= point.x && point.x <= self.p1.x && self.p0.y <= point.y && point.y <= self.p1.y
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect({:?}, {:?})", self.p0, self.p1)
    }
}
