// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulation time vocabulary.
//!
//! The editor core itself never advances time; these types exist for
//! element attributes such as the clock generator's period.

use core::fmt;

use crate::error::OverflowError;

/// A duration of simulation time in nanoseconds.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Delay(i64);

impl Delay {
    /// The zero duration.
    pub const ZERO: Self = Self(0);
    /// Smallest positive duration.
    pub const EPSILON: Self = Self(1);
    /// Smallest representable duration.
    pub const MIN: Self = Self(i64::MIN);
    /// Largest representable duration.
    pub const MAX: Self = Self(i64::MAX);

    /// Creates a delay from a nanosecond count.
    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Creates a delay from a microsecond count.
    ///
    /// # Panics
    ///
    /// Panics on overflow.
    #[must_use]
    pub const fn from_micros(micros: i64) -> Self {
        match micros.checked_mul(1_000) {
            Some(nanos) => Self(nanos),
            None => panic!("microsecond count exceeds the delay range"),
        }
    }

    /// Creates a delay from a millisecond count.
    ///
    /// # Panics
    ///
    /// Panics on overflow.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        match millis.checked_mul(1_000_000) {
            Some(nanos) => Self(nanos),
            None => panic!("millisecond count exceeds the delay range"),
        }
    }

    /// Returns the nanosecond count.
    #[must_use]
    pub const fn count_ns(self) -> i64 {
        self.0
    }

    /// Checked addition.
    pub const fn checked_add(self, rhs: Self) -> Result<Self, OverflowError> {
        match self.0.checked_add(rhs.0) {
            Some(value) => Ok(Self(value)),
            None => Err(OverflowError::new("Delay")),
        }
    }

    /// Checked subtraction.
    pub const fn checked_sub(self, rhs: Self) -> Result<Self, OverflowError> {
        match self.0.checked_sub(rhs.0) {
            Some(value) => Ok(Self(value)),
            None => Err(OverflowError::new("Delay")),
        }
    }

    /// Checked multiplication by an integer factor.
    pub const fn checked_mul(self, rhs: i64) -> Result<Self, OverflowError> {
        match self.0.checked_mul(rhs) {
            Some(value) => Ok(Self(value)),
            None => Err(OverflowError::new("Delay")),
        }
    }
}

impl fmt::Debug for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ns", self.0)
    }
}

/// A point in simulation time, in nanoseconds since simulation start.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(i64);

impl Time {
    /// Simulation start.
    pub const ZERO: Self = Self(0);
    /// Smallest representable time point.
    pub const MIN: Self = Self(i64::MIN);
    /// Largest representable time point.
    pub const MAX: Self = Self(i64::MAX);

    /// Creates a time point from a nanosecond count.
    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Returns the nanosecond count.
    #[must_use]
    pub const fn count_ns(self) -> i64 {
        self.0
    }

    /// Checked advance by a delay.
    pub const fn checked_add(self, delay: Delay) -> Result<Self, OverflowError> {
        match self.0.checked_add(delay.count_ns()) {
            Some(value) => Ok(Self(value)),
            None => Err(OverflowError::new("Time")),
        }
    }

    /// Checked difference of two time points.
    pub const fn checked_sub(self, rhs: Self) -> Result<Delay, OverflowError> {
        match self.0.checked_sub(rhs.0) {
            Some(value) => Ok(Delay::from_nanos(value)),
            None => Err(OverflowError::new("Time")),
        }
    }
}

impl fmt::Debug for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ns", self.0)
    }
}
