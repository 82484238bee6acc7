// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mutable aggregate every editing operation works on.

use core::fmt;

use gridlogic_history::History;
use gridlogic_index::LayoutIndex;
use gridlogic_layout::message::InfoMessage;
use gridlogic_layout::Layout;
use gridlogic_selection::{SelectionStore, VisibleSelection};

use crate::key_index::KeyIndex;
use crate::validator::MessageValidator;

/// Observer callback receiving every committed mutation.
pub(crate) type Observer = Box<dyn FnMut(&InfoMessage)>;

/// The layout plus everything derived from it.
///
/// All mutation flows through the editing functions in
/// [`editing`](crate::editing); they commit a change to the layout and
/// then call [`CircuitData::submit`], which fans the message out to every
/// derived structure synchronously. Observers therefore always see a
/// layout consistent with the message received.
pub struct CircuitData {
    /// The authoritative store.
    pub layout: Layout,
    /// Derived lookup structures.
    pub index: LayoutIndex,
    /// All live selections.
    pub selection_store: SelectionStore,
    /// The interactive rubber-band selection.
    pub visible_selection: VisibleSelection,
    /// Undo and redo stacks.
    pub history: History,
    /// Stable decoration keys for the history.
    pub key_index: KeyIndex,
    /// Recorded message log, when enabled.
    pub messages: Option<Vec<InfoMessage>>,
    /// Replay validator, when enabled.
    pub message_validator: Option<MessageValidator>,
    pub(crate) observers: Vec<Observer>,
}

impl Default for CircuitData {
    fn default() -> Self {
        Self::new()
    }
}

impl CircuitData {
    /// Creates an empty aggregate.
    ///
    /// The message validator is enabled in debug and test builds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layout: Layout::new(),
            index: LayoutIndex::new(),
            selection_store: SelectionStore::new(),
            visible_selection: VisibleSelection::new(),
            history: History::new(),
            key_index: KeyIndex::new(),
            messages: None,
            message_validator: cfg!(debug_assertions).then(MessageValidator::new),
            observers: Vec::new(),
        }
    }

    /// Fans one committed mutation out to every derived structure.
    pub fn submit(&mut self, message: InfoMessage) {
        tracing::trace!(?message, "submit");

        self.index.submit(&message);
        self.selection_store.submit(&message);
        self.visible_selection.submit(&message);
        self.key_index.submit(&message);

        for observer in &mut self.observers {
            observer(&message);
        }

        if let Some(messages) = &mut self.messages {
            messages.push(message.clone());
        }
        if let Some(validator) = &mut self.message_validator {
            validator.submit(&message);
        }
    }

    /// Asserts that every derived structure matches the layout.
    ///
    /// # Panics
    ///
    /// Panics on any divergence.
    pub fn validate(&self) {
        self.index.validate(&self.layout);
        if let Some(validator) = &self.message_validator {
            validator.validate(&self.layout);
        }
    }
}

impl fmt::Debug for CircuitData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitData")
            .field("layout", &self.layout)
            .field("index", &self.index)
            .field("visible_selection", &self.visible_selection)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
