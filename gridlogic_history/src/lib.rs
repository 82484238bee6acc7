// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gridlogic History: grouped, coalescing undo and redo stacks.
//!
//! A [`HistoryStack`] records undo instructions as a sequence of
//! [`HistoryEntry`] discriminators with parallel side vectors carrying the
//! per-entry payloads. Entries describe the *inverse* of what the user
//! did: creating a decoration pushes a delete instruction, and so on.
//! [`HistoryEntry::NewGroup`] markers delimit user-visible transactions;
//! undo pops whole groups.
//!
//! Pushing applies coalescing rules so that no-op pairs vanish from the
//! stack: a create cancels an immediately preceding delete of the same
//! key, inverse mode changes cancel, repeated attribute changes and
//! rubber-band updates collapse. Popping an entry of the wrong kind is a
//! programming error and panics.
//!
//! [`History`] pairs two stacks with a recording state, so that replaying
//! undo instructions records the corresponding redo instructions.

mod stack;

pub use stack::{
    get_entry_before_skip, has_ungrouped_entries, last_non_group_entry, reopen_group,
    HistoryEntry, HistoryStack, MoveDelta, StoredOperation,
};

/// Which stack a recorded entry belongs to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HistoryState {
    /// Normal editing: record onto the undo stack.
    #[default]
    RecordUndo,
    /// Replaying undo instructions: record onto the redo stack.
    RecordRedo,
    /// History is disabled; nothing is recorded.
    Disabled,
}

/// Undo and redo stacks plus the recording state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    /// Instructions that revert committed operations.
    pub undo_stack: HistoryStack,
    /// Instructions that re-apply reverted operations.
    pub redo_stack: HistoryStack,
    /// Where newly recorded entries go.
    pub state: HistoryState,
}

impl History {
    /// Creates an empty, enabled history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stack entries are currently recorded onto, if any.
    #[must_use]
    pub fn recording_stack(&mut self) -> Option<&mut HistoryStack> {
        match self.state {
            HistoryState::RecordUndo => Some(&mut self.undo_stack),
            HistoryState::RecordRedo => Some(&mut self.redo_stack),
            HistoryState::Disabled => None,
        }
    }

    /// Returns whether an undoable group exists.
    #[must_use]
    pub fn has_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns whether a redoable group exists.
    #[must_use]
    pub fn has_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drops both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
