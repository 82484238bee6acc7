// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The error surface of editing operations.

use gridlogic_layout::LayoutError;
use gridlogic_vocabulary::{OverflowError, RangeError};

/// Why an editing operation was rejected.
///
/// Operations report errors as values and leave the layout unchanged.
/// Internal consistency violations are not errors: they panic.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CircuitError {
    /// An element definition violates its type's constraints.
    #[error("invalid definition: {reason}")]
    InvalidDefinition {
        /// The violated constraint.
        reason: &'static str,
    },

    /// An id does not refer to a live element.
    #[error("id does not refer to a live element")]
    InvalidId,

    /// The operation requires the temporary display state.
    #[error("operation requires the temporary display state")]
    InvalidState,

    /// An insert was requested while the element collides.
    #[error("cannot insert a colliding element")]
    Collision,

    /// A geometric argument is out of range.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Checked arithmetic overflowed.
    #[error(transparent)]
    Overflow(#[from] OverflowError),
}

impl From<LayoutError> for CircuitError {
    fn from(error: LayoutError) -> Self {
        match error {
            LayoutError::InvalidDefinition { reason } => Self::InvalidDefinition { reason },
            LayoutError::InvalidId => Self::InvalidId,
            LayoutError::Range(range) => Self::Range(range),
            LayoutError::Overflow(overflow) => Self::Overflow(overflow),
        }
    }
}
