// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interactive rubber-band selection.

use core::cell::RefCell;
use core::fmt;

use gridlogic_index::{LayoutIndex, SpatialPayload};
use gridlogic_layout::message::InfoMessage;
use gridlogic_layout::{get_line, Layout};
use gridlogic_vocabulary::{
    part_from_fine_rect, RectFine, Segment, SegmentPart, SelectionFunction,
};

use crate::sanitize::{sanitize_selection, SanitizeMode};
use crate::selection::Selection;

/// One rectangle operation of the visible selection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Operation {
    /// How the rectangle combines with the selection so far.
    pub function: SelectionFunction,
    /// The operation rectangle, in fine grid coordinates.
    pub rect: RectFine,
}

/// An initial selection plus an ordered list of rectangle operations.
///
/// The materialized selection is computed lazily by replaying the
/// operations against the spatial index and cached until the next
/// mutation. Cache invariant: a cached value implies a non-empty
/// operation list.
#[derive(Default)]
pub struct VisibleSelection {
    initial_selection: Selection,
    operations: Vec<Operation>,
    cached_selection: RefCell<Option<Selection>>,
}

impl VisibleSelection {
    /// Creates an empty visible selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a visible selection starting from existing contents.
    #[must_use]
    pub fn from_selection(selection: Selection) -> Self {
        Self {
            initial_selection: selection,
            operations: Vec::new(),
            cached_selection: RefCell::new(None),
        }
    }

    /// Returns whether both the initial selection and operations are
    /// empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.initial_selection.is_empty() && self.operations.is_empty()
    }

    /// Removes all contents and operations.
    pub fn clear(&mut self) {
        self.initial_selection = Selection::new();
        self.operations.clear();
        self.cached_selection.replace(None);
    }

    /// Replaces the contents with a concrete selection, dropping all
    /// operations.
    pub fn set_selection(&mut self, selection: Selection) {
        self.initial_selection = selection;
        self.operations.clear();
        self.cached_selection.replace(None);
    }

    /// Appends a rectangle operation.
    pub fn add(&mut self, function: SelectionFunction, rect: RectFine) {
        self.operations.push(Operation { function, rect });
        self.cached_selection.replace(None);
    }

    /// Replaces the rectangle of the last operation.
    ///
    /// # Panics
    ///
    /// Panics when no operation exists.
    pub fn update_last(&mut self, rect: RectFine) {
        let last = self
            .operations
            .last_mut()
            .expect("cannot update last with no operations");
        if last.rect == rect {
            return;
        }
        last.rect = rect;
        self.cached_selection.replace(None);
    }

    /// Removes the last operation.
    ///
    /// # Panics
    ///
    /// Panics when no operation exists.
    pub fn pop_last(&mut self) {
        assert!(
            !self.operations.is_empty(),
            "cannot remove last with no operations"
        );
        self.operations.pop();
        self.cached_selection.replace(None);
    }

    /// The pending operations.
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// The last pending operation, if any.
    #[must_use]
    pub fn last_operation(&self) -> Option<Operation> {
        self.operations.last().copied()
    }

    /// The initial selection the operations start from.
    #[must_use]
    pub fn initial_selection(&self) -> &Selection {
        &self.initial_selection
    }

    /// Runs `f` on the materialized selection.
    ///
    /// Computes and caches the materialization when needed; with no
    /// pending operations the initial selection is used directly.
    pub fn with_selection<R>(
        &self,
        layout: &Layout,
        layout_index: &LayoutIndex,
        f: impl FnOnce(&Selection) -> R,
    ) -> R {
        if self.operations.is_empty() {
            debug_assert!(
                self.cached_selection.borrow().is_none(),
                "cache implies operations"
            );
            return f(&self.initial_selection);
        }

        let mut cache = self.cached_selection.borrow_mut();
        let selection = cache.get_or_insert_with(|| {
            calculate_selection(
                &self.initial_selection,
                &self.operations,
                layout,
                layout_index,
            )
        });
        f(selection)
    }

    /// Collapses all operations into the initial selection.
    ///
    /// A no-op on an empty operation list; idempotent.
    pub fn apply_all_operations(&mut self, layout: &Layout, layout_index: &LayoutIndex) {
        if self.operations.is_empty() {
            return;
        }
        let materialized = self.with_selection(layout, layout_index, Selection::clone);
        self.initial_selection = materialized;
        self.operations.clear();
        self.cached_selection.replace(None);
    }

    /// Adds a decoration to the initial selection.
    pub fn add_decoration(&mut self, decoration_id: gridlogic_vocabulary::DecorationId) {
        self.initial_selection.add_decoration(decoration_id);
        self.cached_selection.replace(None);
    }

    /// Removes a decoration from the initial selection.
    pub fn remove_decoration(&mut self, decoration_id: gridlogic_vocabulary::DecorationId) {
        self.initial_selection.remove_decoration(decoration_id);
        self.cached_selection.replace(None);
    }

    /// Keeps the initial selection valid across a committed mutation.
    ///
    /// The cache cannot always be updated in place (new elements may
    /// appear under a pending rectangle), so it is invalidated instead.
    pub fn submit(&mut self, message: &InfoMessage) {
        self.initial_selection.submit(message);
        self.cached_selection.replace(None);
    }
}

impl Clone for VisibleSelection {
    fn clone(&self) -> Self {
        Self {
            initial_selection: self.initial_selection.clone(),
            operations: self.operations.clone(),
            // The cache is not part of the value.
            cached_selection: RefCell::new(None),
        }
    }
}

impl PartialEq for VisibleSelection {
    fn eq(&self, other: &Self) -> bool {
        // The cache is not part of the value.
        self.initial_selection == other.initial_selection && self.operations == other.operations
    }
}

impl fmt::Debug for VisibleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<VisibleSelection with {} operations over {:?}>",
            self.operations.len(),
            self.initial_selection
        )
    }
}

fn add_segment_to_selection(
    segment: Segment,
    operation: Operation,
    selection: &mut Selection,
    layout: &Layout,
) {
    let line = get_line(layout, segment);
    let Some(part) = part_from_fine_rect(line, operation.rect) else {
        return;
    };
    let segment_part = SegmentPart::new(segment, part);

    match operation.function {
        SelectionFunction::Add => selection.add_segment(segment_part),
        SelectionFunction::Substract => selection.remove_segment(segment_part),
        SelectionFunction::Toggle => {
            panic!("toggle is resolved to add or substract before materialization")
        }
    }
}

fn apply_operation(
    selection: &mut Selection,
    layout: &Layout,
    layout_index: &LayoutIndex,
    operation: Operation,
) {
    for payload in layout_index.spatial_index().query_selection(operation.rect) {
        match payload {
            SpatialPayload::LogicItem(logicitem_id) => match operation.function {
                SelectionFunction::Add => selection.add_logicitem(logicitem_id),
                SelectionFunction::Substract => selection.remove_logicitem(logicitem_id),
                SelectionFunction::Toggle => {
                    panic!("toggle is resolved to add or substract before materialization")
                }
            },
            SpatialPayload::Decoration(decoration_id) => match operation.function {
                SelectionFunction::Add => selection.add_decoration(decoration_id),
                SelectionFunction::Substract => selection.remove_decoration(decoration_id),
                SelectionFunction::Toggle => {
                    panic!("toggle is resolved to add or substract before materialization")
                }
            },
            SpatialPayload::Segment(segment) => {
                add_segment_to_selection(segment, operation, selection, layout);
            }
        }
    }
}

/// Replays the operations onto a copy of the initial selection.
///
/// Every add is followed by an expanding sanitization pass, every
/// substract by a shrinking one, so selection boundaries never rest on
/// crossing points.
fn calculate_selection(
    initial_selection: &Selection,
    operations: &[Operation],
    layout: &Layout,
    layout_index: &LayoutIndex,
) -> Selection {
    let mut selection = initial_selection.clone();

    for operation in operations {
        apply_operation(&mut selection, layout, layout_index, *operation);

        match operation.function {
            SelectionFunction::Add => sanitize_selection(
                &mut selection,
                layout,
                layout_index.collision_index(),
                SanitizeMode::Expand,
            ),
            SelectionFunction::Substract => sanitize_selection(
                &mut selection,
                layout,
                layout_index.collision_index(),
                SanitizeMode::Shrink,
            ),
            SelectionFunction::Toggle => {
                panic!("toggle is resolved to add or substract before materialization")
            }
        }
    }

    selection
}
