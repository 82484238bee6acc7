// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ownership of live selections.

use core::cell::RefCell;
use core::fmt;
use std::rc::{Rc, Weak};

use gridlogic_layout::message::InfoMessage;
use gridlogic_vocabulary::SelectionId;
use hashbrown::HashMap;

use crate::selection::Selection;

type State = foldhash::fast::RandomState;

#[derive(Default)]
struct StoreInner {
    next_key: u64,
    selections: HashMap<SelectionId, Selection, State>,
}

/// Owns the storage of every live selection.
///
/// Selections are created through [`SelectionStore::create_selection`] and
/// freed when the returned [`SelectionResource`] is dropped. The store
/// fans the layout's message stream out to every live selection so they
/// stay valid under id renumbering.
#[derive(Default)]
pub struct SelectionStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl SelectionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh, empty selection and returns its owning handle.
    #[must_use]
    pub fn create_selection(&self) -> SelectionResource {
        self.create_selection_from(Selection::new())
    }

    /// Allocates a selection with initial contents.
    #[must_use]
    pub fn create_selection_from(&self, selection: Selection) -> SelectionResource {
        let mut inner = self.inner.borrow_mut();
        let selection_id = SelectionId(inner.next_key);
        inner.next_key += 1;
        inner.selections.insert(selection_id, selection);

        SelectionResource {
            store: Rc::downgrade(&self.inner),
            selection_id: Some(selection_id),
        }
    }

    /// Returns whether `selection_id` refers to a live selection.
    #[must_use]
    pub fn contains(&self, selection_id: SelectionId) -> bool {
        self.inner.borrow().selections.contains_key(&selection_id)
    }

    /// Number of live selections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().selections.len()
    }

    /// Returns whether no selections are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().selections.is_empty()
    }

    /// Reads a live selection.
    ///
    /// Returns `None` for stale ids.
    pub fn with_selection<R>(
        &self,
        selection_id: SelectionId,
        f: impl FnOnce(&Selection) -> R,
    ) -> Option<R> {
        self.inner.borrow().selections.get(&selection_id).map(f)
    }

    /// Mutates a live selection.
    ///
    /// Returns `None` for stale ids.
    pub fn with_selection_mut<R>(
        &self,
        selection_id: SelectionId,
        f: impl FnOnce(&mut Selection) -> R,
    ) -> Option<R> {
        self.inner
            .borrow_mut()
            .selections
            .get_mut(&selection_id)
            .map(f)
    }

    /// Keeps every live selection valid across a committed mutation.
    pub fn submit(&self, message: &InfoMessage) {
        for selection in self.inner.borrow_mut().selections.values_mut() {
            selection.submit(message);
        }
    }
}

impl fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<SelectionStore with {} selections>", self.len())
    }
}

/// RAII owner of one selection in a [`SelectionStore`].
///
/// The handle deliberately gives no access to the selection's contents;
/// it only keeps the storage alive and knows its id. Dropping the handle
/// frees the selection. Destruction order between handle and store is
/// immaterial: a handle outliving its store clears without effect.
#[derive(Default)]
pub struct SelectionResource {
    store: Weak<RefCell<StoreInner>>,
    selection_id: Option<SelectionId>,
}

impl SelectionResource {
    /// The id of the held selection, if the handle still owns one.
    #[must_use]
    pub fn selection_id(&self) -> Option<SelectionId> {
        self.selection_id
    }

    /// Returns whether the handle currently owns a live selection.
    #[must_use]
    pub fn holds_selection(&self) -> bool {
        match (self.selection_id, self.store.upgrade()) {
            (Some(selection_id), Some(store)) => {
                store.borrow().selections.contains_key(&selection_id)
            }
            _ => false,
        }
    }

    /// Frees the held selection; idempotent.
    pub fn clear(&mut self) {
        if let Some(selection_id) = self.selection_id.take()
            && let Some(store) = self.store.upgrade()
        {
            store.borrow_mut().selections.remove(&selection_id);
        }
        self.store = Weak::new();
    }
}

impl Drop for SelectionResource {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for SelectionResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.selection_id {
            Some(selection_id) => write!(f, "SelectionResource({selection_id:?})"),
            None => write!(f, "SelectionResource(empty)"),
        }
    }
}
