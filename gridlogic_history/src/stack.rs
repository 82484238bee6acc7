// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The entry stack and its coalescing push operations.

use core::fmt;

use gridlogic_selection::Selection;
use gridlogic_vocabulary::{
    DecorationKey, PlacedDecoration, RectFine, SelectionFunction, TextElementAttrs,
};

/// Grid delta of a recorded move.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveDelta {
    /// Horizontal delta in grid cells.
    pub x: i32,
    /// Vertical delta in grid cells.
    pub y: i32,
}

/// Discriminator of one undo instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HistoryEntry {
    /// Delimits a user-visible transaction.
    NewGroup,

    /// Re-create a temporary decoration.
    DecorationCreateTemporary,
    /// Delete a temporary decoration.
    DecorationDeleteTemporary,
    /// Move a temporary decoration by a delta.
    DecorationMoveTemporary,
    /// Change a decoration's mode to temporary.
    DecorationToModeTemporary,
    /// Change a decoration's mode to colliding.
    DecorationToModeColliding,
    /// Change a decoration's mode to inserted.
    DecorationToModeInsert,
    /// Restore a decoration's attributes.
    DecorationChangeAttributes,
    /// Add a decoration to the visible selection.
    DecorationAddVisibleSelection,
    /// Remove a decoration from the visible selection.
    DecorationRemoveVisibleSelection,

    /// Clear the visible selection.
    VisibleSelectionClear,
    /// Restore the visible selection to a saved value.
    VisibleSelectionSet,
    /// Re-append a rubber-band operation.
    VisibleSelectionAddOperation,
    /// Restore the rectangle of the last rubber-band operation.
    VisibleSelectionUpdateLast,
    /// Pop the last rubber-band operation.
    VisibleSelectionPopLast,
}

/// A rubber-band operation as stored on the stack.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StoredOperation {
    /// How the rectangle combines with the selection.
    pub function: SelectionFunction,
    /// The operation rectangle.
    pub rect: RectFine,
}

/// A stack of undo instructions with parallel payload vectors.
///
/// The `entries` vector is the source of truth; every other vector is
/// popped in lock-step with the entry kinds that reference it.
#[derive(Clone, Default, PartialEq)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,

    decoration_keys: Vec<DecorationKey>,
    placed_decorations: Vec<PlacedDecoration>,
    move_deltas: Vec<MoveDelta>,
    attributes: Vec<TextElementAttrs>,

    selections: Vec<Selection>,
    selection_rects: Vec<RectFine>,
    selection_functions: Vec<SelectionFunction>,
}

impl HistoryStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether no entries are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded entries, group markers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drops all entries.
    pub fn clear(&mut self) {
        if !self.is_empty() {
            *self = Self::default();
        }
    }

    /// The most recent entry, if any.
    #[must_use]
    pub fn top_entry(&self) -> Option<HistoryEntry> {
        self.entries.last().copied()
    }

    /// The recorded entry kinds, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    //
    // Groups
    //

    /// Pushes a group marker, unless the top already is one.
    pub fn push_new_group(&mut self) {
        if has_ungrouped_entries(self) {
            self.entries.push(HistoryEntry::NewGroup);
        }
    }

    /// Pops a group marker.
    pub fn pop_new_group(&mut self) {
        self.pop_expecting(HistoryEntry::NewGroup);
    }

    //
    // Decorations
    //

    /// Records re-creating a temporary decoration.
    ///
    /// Cancels against an immediately preceding delete of the same key.
    pub fn push_decoration_create_temporary(
        &mut self,
        decoration_key: DecorationKey,
        placed_decoration: PlacedDecoration,
    ) {
        if self.top_entry() == Some(HistoryEntry::DecorationDeleteTemporary)
            && self.decoration_keys.last() == Some(&decoration_key)
        {
            self.pop_decoration_delete_temporary();
            return;
        }

        self.entries.push(HistoryEntry::DecorationCreateTemporary);
        self.decoration_keys.push(decoration_key);
        self.placed_decorations.push(placed_decoration);
    }

    /// Records deleting a temporary decoration.
    ///
    /// Cancels against an immediately preceding create of the same key.
    pub fn push_decoration_delete_temporary(&mut self, decoration_key: DecorationKey) {
        if self.top_entry() == Some(HistoryEntry::DecorationCreateTemporary)
            && self.decoration_keys.last() == Some(&decoration_key)
        {
            self.pop_decoration_create_temporary();
            return;
        }

        self.entries.push(HistoryEntry::DecorationDeleteTemporary);
        self.decoration_keys.push(decoration_key);
    }

    /// Records moving a temporary decoration.
    pub fn push_decoration_move_temporary(
        &mut self,
        decoration_key: DecorationKey,
        delta: MoveDelta,
    ) {
        self.entries.push(HistoryEntry::DecorationMoveTemporary);
        self.decoration_keys.push(decoration_key);
        self.move_deltas.push(delta);
    }

    /// Records a colliding-to-temporary mode change.
    ///
    /// Cancels against the inverse change of the same key.
    pub fn push_decoration_colliding_to_temporary(&mut self, decoration_key: DecorationKey) {
        if self.top_entry() == Some(HistoryEntry::DecorationToModeColliding)
            && self.decoration_keys.last() == Some(&decoration_key)
        {
            self.pop_decoration_to_mode_colliding();
            return;
        }

        self.entries.push(HistoryEntry::DecorationToModeTemporary);
        self.decoration_keys.push(decoration_key);
    }

    /// Records a temporary-to-colliding mode change.
    ///
    /// Cancels against the inverse change; the intermediate colliding
    /// stage of a temporary-to-insert transition is skipped.
    pub fn push_decoration_temporary_to_colliding(&mut self, decoration_key: DecorationKey) {
        if self.top_entry() == Some(HistoryEntry::DecorationToModeTemporary)
            && self.decoration_keys.last() == Some(&decoration_key)
        {
            self.pop_decoration_to_mode_temporary();
            return;
        }
        if self.top_entry() == Some(HistoryEntry::DecorationToModeInsert)
            && self.decoration_keys.last() == Some(&decoration_key)
        {
            return;
        }

        self.entries.push(HistoryEntry::DecorationToModeColliding);
        self.decoration_keys.push(decoration_key);
    }

    /// Records a colliding-to-insert mode change.
    ///
    /// Cancels against the inverse change of the same key.
    pub fn push_decoration_colliding_to_insert(&mut self, decoration_key: DecorationKey) {
        if self.top_entry() == Some(HistoryEntry::DecorationToModeColliding)
            && self.decoration_keys.last() == Some(&decoration_key)
        {
            self.pop_decoration_to_mode_colliding();
            return;
        }

        self.entries.push(HistoryEntry::DecorationToModeInsert);
        self.decoration_keys.push(decoration_key);
    }

    /// Records an insert-to-colliding mode change.
    ///
    /// Cancels against the inverse change; the intermediate colliding
    /// stage of an insert-to-temporary transition is skipped.
    pub fn push_decoration_insert_to_colliding(&mut self, decoration_key: DecorationKey) {
        if self.top_entry() == Some(HistoryEntry::DecorationToModeInsert)
            && self.decoration_keys.last() == Some(&decoration_key)
        {
            self.pop_decoration_to_mode_insert();
            return;
        }
        if self.top_entry() == Some(HistoryEntry::DecorationToModeTemporary)
            && self.decoration_keys.last() == Some(&decoration_key)
        {
            return;
        }

        self.entries.push(HistoryEntry::DecorationToModeColliding);
        self.decoration_keys.push(decoration_key);
    }

    /// Records restoring a decoration's attributes.
    ///
    /// Repeated changes to the same key within one group are collapsed
    /// into the first recorded value.
    pub fn push_decoration_change_attributes(
        &mut self,
        decoration_key: DecorationKey,
        attrs: TextElementAttrs,
    ) {
        if last_non_group_entry(&self.entries) == Some(HistoryEntry::DecorationChangeAttributes)
            && self.decoration_keys.last() == Some(&decoration_key)
        {
            return;
        }

        self.entries.push(HistoryEntry::DecorationChangeAttributes);
        self.decoration_keys.push(decoration_key);
        self.attributes.push(attrs);
    }

    /// Records re-adding a decoration to the visible selection.
    pub fn push_decoration_add_visible_selection(&mut self, decoration_key: DecorationKey) {
        self.entries.push(HistoryEntry::DecorationAddVisibleSelection);
        self.decoration_keys.push(decoration_key);
    }

    /// Records removing a decoration from the visible selection.
    pub fn push_decoration_remove_visible_selection(&mut self, decoration_key: DecorationKey) {
        self.entries
            .push(HistoryEntry::DecorationRemoveVisibleSelection);
        self.decoration_keys.push(decoration_key);
    }

    /// Pops a create instruction.
    pub fn pop_decoration_create_temporary(&mut self) -> (DecorationKey, PlacedDecoration) {
        self.pop_expecting(HistoryEntry::DecorationCreateTemporary);
        (
            pop_vector(&mut self.decoration_keys),
            pop_vector(&mut self.placed_decorations),
        )
    }

    /// Pops a delete instruction.
    pub fn pop_decoration_delete_temporary(&mut self) -> DecorationKey {
        self.pop_expecting(HistoryEntry::DecorationDeleteTemporary);
        pop_vector(&mut self.decoration_keys)
    }

    /// Pops a move instruction.
    pub fn pop_decoration_move_temporary(&mut self) -> (DecorationKey, MoveDelta) {
        self.pop_expecting(HistoryEntry::DecorationMoveTemporary);
        (
            pop_vector(&mut self.decoration_keys),
            pop_vector(&mut self.move_deltas),
        )
    }

    /// Pops a to-temporary mode change.
    pub fn pop_decoration_to_mode_temporary(&mut self) -> DecorationKey {
        self.pop_expecting(HistoryEntry::DecorationToModeTemporary);
        pop_vector(&mut self.decoration_keys)
    }

    /// Pops a to-colliding mode change.
    pub fn pop_decoration_to_mode_colliding(&mut self) -> DecorationKey {
        self.pop_expecting(HistoryEntry::DecorationToModeColliding);
        pop_vector(&mut self.decoration_keys)
    }

    /// Pops a to-insert mode change.
    pub fn pop_decoration_to_mode_insert(&mut self) -> DecorationKey {
        self.pop_expecting(HistoryEntry::DecorationToModeInsert);
        pop_vector(&mut self.decoration_keys)
    }

    /// Pops an attribute restore.
    pub fn pop_decoration_change_attributes(&mut self) -> (DecorationKey, TextElementAttrs) {
        self.pop_expecting(HistoryEntry::DecorationChangeAttributes);
        (
            pop_vector(&mut self.decoration_keys),
            pop_vector(&mut self.attributes),
        )
    }

    /// Pops a visible-selection add.
    pub fn pop_decoration_add_visible_selection(&mut self) -> DecorationKey {
        self.pop_expecting(HistoryEntry::DecorationAddVisibleSelection);
        pop_vector(&mut self.decoration_keys)
    }

    /// Pops a visible-selection remove.
    pub fn pop_decoration_remove_visible_selection(&mut self) -> DecorationKey {
        self.pop_expecting(HistoryEntry::DecorationRemoveVisibleSelection);
        pop_vector(&mut self.decoration_keys)
    }

    //
    // Visible selection
    //

    /// Records clearing the visible selection.
    pub fn push_visible_selection_clear(&mut self) {
        self.entries.push(HistoryEntry::VisibleSelectionClear);
    }

    /// Records restoring the visible selection to a saved value.
    pub fn push_visible_selection_set(&mut self, selection: Selection) {
        self.entries.push(HistoryEntry::VisibleSelectionSet);
        self.selections.push(selection);
    }

    /// Records re-appending a rubber-band operation.
    ///
    /// An operation popped and re-added within one group cancels the pop
    /// and any rectangle updates between them.
    pub fn push_visible_selection_add_operation(&mut self, operation: StoredOperation) {
        if get_entry_before_skip(&self.entries, HistoryEntry::VisibleSelectionUpdateLast)
            == Some(HistoryEntry::VisibleSelectionPopLast)
        {
            while self.top_entry() == Some(HistoryEntry::VisibleSelectionUpdateLast) {
                self.pop_visible_selection_update_last();
            }
            self.pop_visible_selection_pop_last();
            return;
        }

        self.entries.push(HistoryEntry::VisibleSelectionAddOperation);
        self.selection_functions.push(operation.function);
        self.selection_rects.push(operation.rect);
    }

    /// Records restoring the rectangle of the last rubber-band operation.
    ///
    /// Consecutive updates within one group collapse into the first.
    pub fn push_visible_selection_update_last(&mut self, rect: RectFine) {
        if last_non_group_entry(&self.entries) == Some(HistoryEntry::VisibleSelectionUpdateLast) {
            return;
        }

        self.entries.push(HistoryEntry::VisibleSelectionUpdateLast);
        self.selection_rects.push(rect);
    }

    /// Records popping the last rubber-band operation.
    pub fn push_visible_selection_pop_last(&mut self) {
        self.entries.push(HistoryEntry::VisibleSelectionPopLast);
    }

    /// Pops a clear instruction.
    pub fn pop_visible_selection_clear(&mut self) {
        self.pop_expecting(HistoryEntry::VisibleSelectionClear);
    }

    /// Pops a set instruction.
    pub fn pop_visible_selection_set(&mut self) -> Selection {
        self.pop_expecting(HistoryEntry::VisibleSelectionSet);
        pop_vector(&mut self.selections)
    }

    /// Pops an add-operation instruction.
    pub fn pop_visible_selection_add_operation(&mut self) -> StoredOperation {
        self.pop_expecting(HistoryEntry::VisibleSelectionAddOperation);
        StoredOperation {
            function: pop_vector(&mut self.selection_functions),
            rect: pop_vector(&mut self.selection_rects),
        }
    }

    /// Pops an update-last instruction.
    pub fn pop_visible_selection_update_last(&mut self) -> RectFine {
        self.pop_expecting(HistoryEntry::VisibleSelectionUpdateLast);
        pop_vector(&mut self.selection_rects)
    }

    /// Pops a pop-last instruction.
    pub fn pop_visible_selection_pop_last(&mut self) {
        self.pop_expecting(HistoryEntry::VisibleSelectionPopLast);
    }

    fn pop_expecting(&mut self, expected: HistoryEntry) {
        let top = self.entries.pop();
        assert_eq!(
            top,
            Some(expected),
            "history stack popped an entry of the wrong kind"
        );
    }
}

impl fmt::Debug for HistoryStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryStack")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

fn pop_vector<T>(vector: &mut Vec<T>) -> T {
    vector
        .pop()
        .expect("side vector ran dry; stack vectors are popped in lock-step")
}

/// The most recent entry not equal to `skip_type`.
#[must_use]
pub fn get_entry_before_skip(
    entries: &[HistoryEntry],
    skip_type: HistoryEntry,
) -> Option<HistoryEntry> {
    entries.iter().rev().find(|&&entry| entry != skip_type).copied()
}

/// The most recent entry that is not a group marker.
#[must_use]
pub fn last_non_group_entry(entries: &[HistoryEntry]) -> Option<HistoryEntry> {
    get_entry_before_skip(entries, HistoryEntry::NewGroup)
}

/// Returns whether entries exist above the last group marker.
#[must_use]
pub fn has_ungrouped_entries(stack: &HistoryStack) -> bool {
    stack
        .top_entry()
        .is_some_and(|entry| entry != HistoryEntry::NewGroup)
}

/// Pops trailing group markers so the next push joins the previous group.
pub fn reopen_group(stack: &mut HistoryStack) {
    while stack.top_entry() == Some(HistoryEntry::NewGroup) {
        stack.pop_new_group();
    }
}
