// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable decoration keys across id renumbering.
//!
//! History entries reference decorations by key, never by id: ids are
//! reassigned by swap-remove, keys are not. The index follows the message
//! stream; re-creating a decoration during undo re-binds its recorded key
//! with [`KeyIndex::set_key`].

use gridlogic_layout::message::{ElementRef, InfoMessage};
use gridlogic_vocabulary::{DecorationId, DecorationKey};
use hashbrown::HashMap;

type State = foldhash::fast::RandomState;

/// Bidirectional decoration key-id mapping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyIndex {
    key_to_id: HashMap<DecorationKey, DecorationId, State>,
    id_to_key: HashMap<DecorationId, DecorationKey, State>,
    next_key: u64,
}

impl KeyIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The id currently bound to `key`.
    #[must_use]
    pub fn decoration_id(&self, key: DecorationKey) -> Option<DecorationId> {
        self.key_to_id.get(&key).copied()
    }

    /// The key of a live decoration.
    ///
    /// # Panics
    ///
    /// Panics when the id is not tracked; every live decoration has a key.
    #[must_use]
    pub fn decoration_key(&self, decoration_id: DecorationId) -> DecorationKey {
        *self
            .id_to_key
            .get(&decoration_id)
            .expect("every live decoration carries a key")
    }

    /// Re-binds a freshly created decoration to a recorded key.
    ///
    /// Used during undo and redo so the re-created decoration keeps the
    /// key its history entries reference.
    pub fn set_key(&mut self, decoration_id: DecorationId, key: DecorationKey) {
        let previous = self
            .id_to_key
            .insert(decoration_id, key)
            .expect("re-keyed decorations are live");
        self.key_to_id.remove(&previous);
        self.key_to_id.insert(key, decoration_id);
        self.next_key = self.next_key.max(key.0 + 1);
    }

    /// Applies one committed mutation.
    pub fn submit(&mut self, message: &InfoMessage) {
        match message {
            InfoMessage::ElementCreated(ElementRef::Decoration(decoration_id)) => {
                let key = DecorationKey(self.next_key);
                self.next_key += 1;
                let stale = self.id_to_key.insert(*decoration_id, key);
                assert!(stale.is_none(), "created decoration id already tracked");
                self.key_to_id.insert(key, *decoration_id);
            }
            InfoMessage::ElementDeleted(ElementRef::Decoration(decoration_id)) => {
                let key = self
                    .id_to_key
                    .remove(decoration_id)
                    .expect("deleted decoration id was tracked");
                self.key_to_id.remove(&key);
            }
            InfoMessage::ElementIdUpdated {
                new_ref: ElementRef::Decoration(new_id),
                old_ref: ElementRef::Decoration(old_id),
            } => {
                let key = self
                    .id_to_key
                    .remove(old_id)
                    .expect("renumbered decoration id was tracked");
                self.id_to_key.insert(*new_id, key);
                self.key_to_id.insert(key, *new_id);
            }
            _ => {}
        }
    }
}
