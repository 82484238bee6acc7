// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-dimensional grid coordinates.

use core::fmt;

use crate::error::OverflowError;

/// A discrete location on the grid in one dimension.
///
/// Backed by `i16`; the grid spans `[-32768, 32767]` in both axes. All
/// arithmetic that could leave this range is checked.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord(i16);

impl Coord {
    /// Smallest representable coordinate.
    pub const MIN: Self = Self(i16::MIN);
    /// Largest representable coordinate.
    pub const MAX: Self = Self(i16::MAX);

    /// Creates a coordinate from its raw value.
    #[must_use]
    pub const fn new(value: i16) -> Self {
        Self(value)
    }

    /// Returns the raw `i16` value.
    #[must_use]
    pub const fn value(self) -> i16 {
        self.0
    }

    /// Converts to the continuous (`f64`) grid coordinate space.
    #[must_use]
    pub const fn to_fine(self) -> f64 {
        self.0 as f64
    }

    /// Checked addition of two coordinates.
    pub const fn checked_add(self, rhs: Self) -> Result<Self, OverflowError> {
        match self.0.checked_add(rhs.0) {
            Some(value) => Ok(Self(value)),
            None => Err(OverflowError::new("Coord")),
        }
    }

    /// Checked subtraction of two coordinates.
    pub const fn checked_sub(self, rhs: Self) -> Result<Self, OverflowError> {
        match self.0.checked_sub(rhs.0) {
            Some(value) => Ok(Self(value)),
            None => Err(OverflowError::new("Coord")),
        }
    }

    /// Checked addition of a wide delta, as used by drag moves.
    pub const fn checked_add_delta(self, delta: i32) -> Result<Self, OverflowError> {
        let wide = self.0 as i32 + delta;
        if wide < Self::MIN.0 as i32 || wide > Self::MAX.0 as i32 {
            return Err(OverflowError::new("Coord"));
        }
        Ok(Self(wide as i16))
    }

    /// Returns whether `value + delta` stays representable.
    #[must_use]
    pub const fn is_representable(value: i32) -> bool {
        Self::MIN.0 as i32 <= value && value <= Self::MAX.0 as i32
    }

    /// Addition that the caller has already bounds-checked.
    ///
    /// Panics in debug builds when the precondition is violated.
    #[must_use]
    pub fn add_unchecked(self, delta: i32) -> Self {
        let wide = i32::from(self.0) + delta;
        debug_assert!(
            Self::is_representable(wide),
            "coordinate addition out of range"
        );
        #[expect(
            clippy::cast_possible_truncation,
            reason = "bounds checked by the caller"
        )]
        let narrow = wide as i16;
        Self(narrow)
    }
}

impl From<i16> for Coord {
    fn from(value: i16) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_arithmetic_reports_overflow() {
        assert_eq!(
            Coord::new(1).checked_add(Coord::new(2)),
            Ok(Coord::new(3))
        );
        assert!(Coord::MAX.checked_add(Coord::new(1)).is_err());
        assert!(Coord::MIN.checked_sub(Coord::new(1)).is_err());
        assert!(Coord::MAX.checked_add_delta(1).is_err());
        assert_eq!(Coord::new(-5).checked_add_delta(10), Ok(Coord::new(5)));
    }
}
