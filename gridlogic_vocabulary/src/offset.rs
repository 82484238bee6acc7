// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offsets along a wire segment.

use core::fmt;

use crate::error::OverflowError;

/// A distance along an ordered line, measured in grid cells from `p0`.
///
/// Backed by `u16`, which covers the longest representable segment.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset(u16);

impl Offset {
    /// Offset of a line's first endpoint.
    pub const ZERO: Self = Self(0);
    /// Largest representable offset.
    pub const MAX: Self = Self(u16::MAX);

    /// Creates an offset from its raw value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the raw `u16` value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Checked addition.
    pub const fn checked_add(self, rhs: Self) -> Result<Self, OverflowError> {
        match self.0.checked_add(rhs.0) {
            Some(value) => Ok(Self(value)),
            None => Err(OverflowError::new("Offset")),
        }
    }

    /// Checked subtraction.
    pub const fn checked_sub(self, rhs: Self) -> Result<Self, OverflowError> {
        match self.0.checked_sub(rhs.0) {
            Some(value) => Ok(Self(value)),
            None => Err(OverflowError::new("Offset")),
        }
    }

    /// The next offset towards the line start, saturating at zero.
    #[must_use]
    pub const fn saturating_pred(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// The next offset towards the line end, saturating at the maximum.
    #[must_use]
    pub const fn saturating_succ(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl From<u16> for Offset {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
