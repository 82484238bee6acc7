// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the coalescing rules and group handling of the history
//! stack.

use gridlogic_history::{
    has_ungrouped_entries, reopen_group, HistoryEntry, HistoryStack, MoveDelta, StoredOperation,
};
use gridlogic_selection::Selection;
use gridlogic_vocabulary::{
    DecorationDefinition, DecorationKey, DecorationType, PlacedDecoration, Point, RectFine,
    SelectionFunction, Size2d, TextElementAttrs,
};

fn key(value: u64) -> DecorationKey {
    DecorationKey(value)
}

fn placed() -> PlacedDecoration {
    PlacedDecoration {
        definition: DecorationDefinition {
            decoration_type: DecorationType::TextElement,
            size: Size2d::new(3, 1),
            attrs_text_element: Some(TextElementAttrs::default()),
        },
        position: Point::new(2, 3),
    }
}

#[test]
fn create_cancels_preceding_delete() {
    let mut stack = HistoryStack::new();

    // The user created a decoration, then deleted it again.
    stack.push_decoration_delete_temporary(key(1));
    stack.push_decoration_create_temporary(key(1), placed());

    assert!(stack.is_empty());
}

#[test]
fn delete_cancels_preceding_create() {
    let mut stack = HistoryStack::new();

    stack.push_decoration_create_temporary(key(1), placed());
    stack.push_decoration_delete_temporary(key(1));

    assert!(stack.is_empty());
}

#[test]
fn cancellation_requires_matching_keys() {
    let mut stack = HistoryStack::new();

    stack.push_decoration_delete_temporary(key(1));
    stack.push_decoration_create_temporary(key(2), placed());

    assert_eq!(stack.len(), 2);
}

#[test]
fn inverse_mode_changes_cancel() {
    let mut stack = HistoryStack::new();

    stack.push_decoration_temporary_to_colliding(key(1));
    stack.push_decoration_colliding_to_temporary(key(1));
    assert!(stack.is_empty());

    stack.push_decoration_colliding_to_insert(key(1));
    stack.push_decoration_insert_to_colliding(key(1));
    assert!(stack.is_empty());
}

#[test]
fn intermediate_colliding_stage_collapses() {
    let mut stack = HistoryStack::new();

    // temporary -> colliding -> insert records only the endpoint pair.
    stack.push_decoration_colliding_to_temporary(key(1));
    stack.push_decoration_insert_to_colliding(key(1));

    assert_eq!(
        stack.entries(),
        [HistoryEntry::DecorationToModeTemporary]
    );
}

#[test]
fn repeated_attribute_changes_collapse() {
    let mut stack = HistoryStack::new();

    stack.push_decoration_change_attributes(key(1), TextElementAttrs::default());
    stack.push_decoration_change_attributes(key(1), TextElementAttrs::default());
    assert_eq!(stack.len(), 1);

    // A different key still records.
    stack.push_decoration_change_attributes(key(2), TextElementAttrs::default());
    assert_eq!(stack.len(), 2);
}

#[test]
fn move_entries_accumulate() {
    let mut stack = HistoryStack::new();

    stack.push_decoration_move_temporary(key(1), MoveDelta { x: 1, y: 0 });
    stack.push_decoration_move_temporary(key(1), MoveDelta { x: 0, y: 2 });
    assert_eq!(stack.len(), 2);

    let (popped_key, delta) = stack.pop_decoration_move_temporary();
    assert_eq!(popped_key, key(1));
    assert_eq!(delta, MoveDelta { x: 0, y: 2 });
}

#[test]
fn add_operation_cancels_pop_with_intervening_updates() {
    let mut stack = HistoryStack::new();

    stack.push_visible_selection_pop_last();
    stack.push_visible_selection_update_last(RectFine::new(0.0, 0.0, 1.0, 1.0));

    stack.push_visible_selection_add_operation(StoredOperation {
        function: SelectionFunction::Add,
        rect: RectFine::new(0.0, 0.0, 2.0, 2.0),
    });

    assert!(stack.is_empty());
}

#[test]
fn consecutive_update_last_entries_collapse() {
    let mut stack = HistoryStack::new();

    stack.push_visible_selection_update_last(RectFine::new(0.0, 0.0, 1.0, 1.0));
    stack.push_visible_selection_update_last(RectFine::new(0.0, 0.0, 5.0, 5.0));

    assert_eq!(stack.len(), 1);
    assert_eq!(
        stack.pop_visible_selection_update_last(),
        RectFine::new(0.0, 0.0, 1.0, 1.0)
    );
}

#[test]
fn groups_delimit_and_reopen() {
    let mut stack = HistoryStack::new();

    // No marker on an empty stack.
    stack.push_new_group();
    assert!(stack.is_empty());

    stack.push_decoration_delete_temporary(key(1));
    assert!(has_ungrouped_entries(&stack));

    stack.push_new_group();
    assert!(!has_ungrouped_entries(&stack));
    // A second marker is ignored.
    stack.push_new_group();
    assert_eq!(stack.len(), 2);

    reopen_group(&mut stack);
    assert_eq!(stack.entries(), [HistoryEntry::DecorationDeleteTemporary]);
}

#[test]
fn set_selection_roundtrips_through_the_stack() {
    let mut stack = HistoryStack::new();
    let mut selection = Selection::new();
    selection.add_logicitem(gridlogic_vocabulary::LogicItemId::from_index(3));

    stack.push_visible_selection_set(selection.clone());
    stack.push_visible_selection_clear();

    stack.pop_visible_selection_clear();
    assert_eq!(stack.pop_visible_selection_set(), selection);
    assert!(stack.is_empty());
}

#[test]
#[should_panic(expected = "wrong kind")]
fn popping_the_wrong_kind_is_fatal() {
    let mut stack = HistoryStack::new();
    stack.push_visible_selection_clear();
    let _ = stack.pop_decoration_delete_temporary();
}
