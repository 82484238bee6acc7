// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the selection container and the selection store.

use gridlogic_layout::message::{ElementRef, InfoMessage};
use gridlogic_selection::{Selection, SelectionStore};
use gridlogic_vocabulary::{
    DecorationId, LogicItemId, Part, Segment, SegmentIndex, SegmentPart, WireId,
};

fn segment(wire: usize, index: usize) -> Segment {
    Segment::new(WireId::from_index(wire), SegmentIndex::from_index(index))
}

#[test]
fn contains_checks_ids_and_ranges() {
    let mut selection = Selection::new();
    let item = LogicItemId::from_index(4);
    let decoration = DecorationId::from_index(1);

    selection.add_logicitem(item);
    selection.add_decoration(decoration);
    selection.add_segment(SegmentPart::new(segment(2, 0), Part::new(0, 10)));

    assert!(selection.contains_logicitem(item));
    assert!(selection.contains_decoration(decoration));
    assert!(selection.contains_segment(SegmentPart::new(segment(2, 0), Part::new(2, 8))));
    assert!(!selection.contains_segment(SegmentPart::new(segment(2, 0), Part::new(8, 12))));
    assert!(!selection.contains_segment(SegmentPart::new(segment(2, 1), Part::new(0, 1))));

    selection.remove_segment(SegmentPart::new(segment(2, 0), Part::new(0, 10)));
    assert!(selection.is_empty() || selection.segment_parts(segment(2, 0)).is_none());
}

#[test]
fn deletion_messages_drop_entries() {
    let mut selection = Selection::new();
    let item = LogicItemId::from_index(0);
    selection.add_logicitem(item);
    selection.add_segment(SegmentPart::new(segment(0, 3), Part::new(0, 5)));

    selection.submit(&InfoMessage::ElementDeleted(ElementRef::LogicItem(item)));
    selection.submit(&InfoMessage::SegmentDeleted {
        segment: segment(0, 3),
    });

    assert!(selection.is_empty());
}

#[test]
fn renumbering_messages_rewrite_ids() {
    let mut selection = Selection::new();
    let old_item = LogicItemId::from_index(7);
    selection.add_logicitem(old_item);
    selection.add_segment(SegmentPart::new(segment(4, 2), Part::new(1, 3)));

    let new_item = LogicItemId::from_index(2);
    selection.submit(&InfoMessage::ElementIdUpdated {
        new_ref: ElementRef::LogicItem(new_item),
        old_ref: ElementRef::LogicItem(old_item),
    });
    selection.submit(&InfoMessage::SegmentIdUpdated {
        new_segment: segment(2, 0),
        old_segment: segment(4, 2),
    });

    assert!(!selection.contains_logicitem(old_item));
    assert!(selection.contains_logicitem(new_item));
    assert!(selection.contains_segment(SegmentPart::new(segment(2, 0), Part::new(1, 3))));
}

#[test]
fn split_moves_the_tail_ranges() {
    let mut selection = Selection::new();
    selection.add_segment(SegmentPart::new(segment(2, 0), Part::new(2, 9)));

    // Split at offset 6: [6, 10) moves to the new segment, rebased to 0.
    selection.submit(&InfoMessage::SegmentSplit {
        segment_from: segment(2, 0),
        part_from: Part::new(6, 10),
        segment_to: segment(2, 1),
    });

    assert_eq!(
        selection.segment_parts(segment(2, 0)).unwrap().parts(),
        [Part::new(2, 6)]
    );
    assert_eq!(
        selection.segment_parts(segment(2, 1)).unwrap().parts(),
        [Part::new(0, 3)]
    );
}

#[test]
fn merge_rebases_the_disappearing_ranges() {
    let mut selection = Selection::new();
    selection.add_segment(SegmentPart::new(segment(2, 1), Part::new(0, 3)));

    // Segment 1 (length 4) is appended to segment 0 at offset 6.
    selection.submit(&InfoMessage::SegmentMerged {
        segment_from: segment(2, 1),
        segment_to: segment(2, 0),
        part_destination: Part::new(6, 10),
    });

    assert!(selection.segment_parts(segment(2, 1)).is_none());
    assert_eq!(
        selection.segment_parts(segment(2, 0)).unwrap().parts(),
        [Part::new(6, 9)]
    );
}

#[test]
fn store_frees_selections_with_their_handles() {
    let store = SelectionStore::new();
    let handle = store.create_selection();
    let id = handle.selection_id().unwrap();

    assert!(store.contains(id));
    assert!(handle.holds_selection());
    assert_eq!(store.len(), 1);

    store
        .with_selection_mut(id, |selection| {
            selection.add_logicitem(LogicItemId::from_index(0));
        })
        .unwrap();
    assert_eq!(
        store.with_selection(id, |selection| selection
            .contains_logicitem(LogicItemId::from_index(0))),
        Some(true)
    );

    drop(handle);
    assert!(!store.contains(id));
    assert!(store.is_empty());
}

#[test]
fn handle_outliving_the_store_clears_quietly() {
    let handle = {
        let store = SelectionStore::new();
        store.create_selection()
    };
    assert!(!handle.holds_selection());
    drop(handle);
}

#[test]
fn store_fans_messages_to_every_selection() {
    let store = SelectionStore::new();
    let a = store.create_selection();
    let b = store.create_selection();
    let item = LogicItemId::from_index(5);

    for handle in [&a, &b] {
        store
            .with_selection_mut(handle.selection_id().unwrap(), |selection| {
                selection.add_logicitem(item);
            })
            .unwrap();
    }

    store.submit(&InfoMessage::ElementDeleted(ElementRef::LogicItem(item)));

    for handle in [&a, &b] {
        assert_eq!(
            store.with_selection(handle.selection_id().unwrap(), Selection::is_empty),
            Some(true)
        );
    }
}

#[test]
fn explicit_clear_is_idempotent() {
    let store = SelectionStore::new();
    let mut handle = store.create_selection();
    let id = handle.selection_id().unwrap();

    handle.clear();
    assert!(!store.contains(id));
    assert_eq!(handle.selection_id(), None);
    handle.clear();
}
