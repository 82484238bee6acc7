// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error values for checked vocabulary construction and arithmetic.

/// Arithmetic left the representable range of a vocabulary type.
///
/// All grid, offset, count, and time arithmetic in the core goes through
/// checked routines; this is the value they report instead of wrapping.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("arithmetic overflow on {type_name}")]
pub struct OverflowError {
    /// Name of the vocabulary type whose arithmetic overflowed.
    pub type_name: &'static str,
}

impl OverflowError {
    pub(crate) const fn new(type_name: &'static str) -> Self {
        Self { type_name }
    }
}

/// A geometric constraint was violated during construction.
///
/// Reported for unordered or empty ranges (`begin >= end`), diagonal or
/// zero-length lines, and offsets outside a segment's bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct RangeError {
    /// Human-readable description of the violated constraint.
    pub reason: &'static str,
}

impl RangeError {
    /// Constructs a range error with the given reason.
    pub const fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}
