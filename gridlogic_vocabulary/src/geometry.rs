// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between lines, offsets, parts, and fine rectangles.

use crate::error::RangeError;
use crate::grid::Coord;
use crate::line::OrderedLine;
use crate::offset::Offset;
use crate::part::Part;
use crate::point::{Point, RectFine};
use crate::rect::Rect;

/// The part covering a full line.
#[must_use]
pub fn to_full_part(line: OrderedLine) -> Part {
    let length = if line.is_horizontal() {
        i32::from(line.p1().x.value()) - i32::from(line.p0().x.value())
    } else {
        i32::from(line.p1().y.value()) - i32::from(line.p0().y.value())
    };
    debug_assert!(length > 0, "ordered lines have positive length");
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "line lengths fit the offset range by construction"
    )]
    let length = length as u16;
    Part::new(0, length)
}

/// The offset of `point` along `line`.
///
/// Reports an error when the point does not lie on the line.
pub fn to_offset(line: OrderedLine, point: Point) -> Result<Offset, RangeError> {
    if !line.contains(point) {
        return Err(RangeError::new("point does not lie on the line"));
    }
    let delta = if line.is_horizontal() {
        i32::from(point.x.value()) - i32::from(line.p0().x.value())
    } else {
        i32::from(point.y.value()) - i32::from(line.p0().y.value())
    };
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "containment guarantees a non-negative in-range delta"
    )]
    let delta = delta as u16;
    Ok(Offset::new(delta))
}

/// The grid point at `offset` along `line`.
///
/// Reports an error when the offset lies beyond the line's end.
pub fn to_point(line: OrderedLine, offset: Offset) -> Result<Point, RangeError> {
    if offset > to_full_part(line).end() {
        return Err(RangeError::new("offset lies beyond the line"));
    }
    let delta = i32::from(offset.value());
    let point = if line.is_horizontal() {
        Point {
            x: line.p0().x.add_unchecked(delta),
            y: line.p0().y,
        }
    } else {
        Point {
            x: line.p0().x,
            y: line.p0().y.add_unchecked(delta),
        }
    };
    Ok(point)
}

/// The sub-line of `line` covered by `part`.
///
/// Reports an error when the part extends beyond the line.
pub fn to_line(line: OrderedLine, part: Part) -> Result<OrderedLine, RangeError> {
    let p0 = to_point(line, part.begin())?;
    let p1 = to_point(line, part.end())?;
    OrderedLine::new(p0, p1)
}

/// Converts a discrete rect to its fine counterpart.
#[must_use]
pub fn to_fine_rect(rect: Rect) -> RectFine {
    RectFine::new(
        rect.p0().x.to_fine(),
        rect.p0().y.to_fine(),
        rect.p1().x.to_fine(),
        rect.p1().y.to_fine(),
    )
}

/// The part of `line` covered by a fine selection rectangle.
///
/// Partially covered cells count as covered. Returns `None` when the
/// rectangle misses the line or covers no positive length.
#[must_use]
pub fn part_from_fine_rect(line: OrderedLine, rect: RectFine) -> Option<Part> {
    let (axis_lo, axis_hi, cross, cross_lo, cross_hi) = if line.is_horizontal() {
        (
            line.p0().x.to_fine(),
            line.p1().x.to_fine(),
            line.p0().y.to_fine(),
            rect.y0,
            rect.y1,
        )
    } else {
        (
            line.p0().y.to_fine(),
            line.p1().y.to_fine(),
            line.p0().x.to_fine(),
            rect.x0,
            rect.x1,
        )
    };

    if cross < cross_lo || cross > cross_hi {
        return None;
    }

    let (rect_lo, rect_hi) = if line.is_horizontal() {
        (rect.x0, rect.x1)
    } else {
        (rect.y0, rect.y1)
    };

    let lo = rect_lo.max(axis_lo);
    let hi = rect_hi.min(axis_hi);
    if lo >= hi {
        return None;
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to the line span, which fits the offset range"
    )]
    let begin = (lo - axis_lo).floor() as u16;
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to the line span, which fits the offset range"
    )]
    let end = (hi - axis_lo).ceil() as u16;

    (begin < end).then(|| Part::new(begin, end))
}

/// Moves a point by a grid delta, reporting overflow as a value.
pub fn checked_move_point(
    point: Point,
    dx: i32,
    dy: i32,
) -> Result<Point, crate::error::OverflowError> {
    Ok(Point {
        x: point.x.checked_add_delta(dx)?,
        y: point.y.checked_add_delta(dy)?,
    })
}

/// Returns whether moving `point` by the delta stays on the grid.
#[must_use]
pub fn is_representable_point(point: Point, dx: i32, dy: i32) -> bool {
    Coord::is_representable(i32::from(point.x.value()) + dx)
        && Coord::is_representable(i32::from(point.y.value()) + dy)
}

/// Returns whether moving `line` by the delta stays on the grid.
#[must_use]
pub fn is_representable_line(line: OrderedLine, dx: i32, dy: i32) -> bool {
    is_representable_point(line.p0(), dx, dy) && is_representable_point(line.p1(), dx, dy)
}

/// Returns whether a rect spanned from `position` by the given extents
/// stays on the grid. Extents use 32-bit intermediates so oversized
/// definitions are caught instead of wrapping.
#[must_use]
pub fn is_representable_rect(position: Point, width: i32, height: i32) -> bool {
    is_representable_point(position, width, height)
}

/// Moves a point by a delta the caller has already bounds-checked.
#[must_use]
pub fn add_unchecked_point(point: Point, dx: i32, dy: i32) -> Point {
    Point {
        x: point.x.add_unchecked(dx),
        y: point.y.add_unchecked(dy),
    }
}

/// Moves a line by a delta the caller has already bounds-checked.
#[must_use]
pub fn add_unchecked_line(line: OrderedLine, dx: i32, dy: i32) -> OrderedLine {
    let p0 = add_unchecked_point(line.p0(), dx, dy);
    let p1 = add_unchecked_point(line.p1(), dx, dy);
    OrderedLine::new(p0, p1).expect("translation preserves line shape")
}
