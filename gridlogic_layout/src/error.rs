// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error values reported by the layout stores.

use gridlogic_vocabulary::{OverflowError, RangeError};

/// Reasons a layout mutation is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// A definition violates the constraints of its element type.
    #[error("invalid definition: {reason}")]
    InvalidDefinition {
        /// The violated constraint.
        reason: &'static str,
    },

    /// An id does not refer to a live element.
    #[error("id does not refer to a live element")]
    InvalidId,

    /// A geometric argument is out of range.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Checked arithmetic overflowed.
    #[error(transparent)]
    Overflow(#[from] OverflowError),
}

impl LayoutError {
    pub(crate) const fn invalid_definition(reason: &'static str) -> Self {
        Self::InvalidDefinition { reason }
    }
}
