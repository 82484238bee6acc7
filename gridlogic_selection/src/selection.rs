// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The selection container.

use core::fmt;

use gridlogic_layout::message::{ElementRef, InfoMessage};
use gridlogic_part_selection::{part_inside_selection, PartCopyDefinition, PartSelection};
use gridlogic_vocabulary::{
    DecorationId, LogicItemId, Offset, Part, Segment, SegmentPart,
};
use hashbrown::{HashMap, HashSet};

type State = foldhash::fast::RandomState;

/// Selected circuit content: item ids, decoration ids, and wire ranges.
///
/// Wire content is tracked per segment as a coalesced [`PartSelection`];
/// empty part selections are never stored.
#[derive(Clone, Default)]
pub struct Selection {
    logicitems: HashSet<LogicItemId, State>,
    decorations: HashSet<DecorationId, State>,
    segments: HashMap<Segment, PartSelection, State>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.logicitems.is_empty() && self.decorations.is_empty() && self.segments.is_empty()
    }

    /// Removes everything from the selection.
    pub fn clear(&mut self) {
        self.logicitems.clear();
        self.decorations.clear();
        self.segments.clear();
    }

    /// Adds a logic item.
    pub fn add_logicitem(&mut self, logicitem_id: LogicItemId) {
        self.logicitems.insert(logicitem_id);
    }

    /// Removes a logic item.
    pub fn remove_logicitem(&mut self, logicitem_id: LogicItemId) {
        self.logicitems.remove(&logicitem_id);
    }

    /// Adds a decoration.
    pub fn add_decoration(&mut self, decoration_id: DecorationId) {
        self.decorations.insert(decoration_id);
    }

    /// Removes a decoration.
    pub fn remove_decoration(&mut self, decoration_id: DecorationId) {
        self.decorations.remove(&decoration_id);
    }

    /// Adds a wire range.
    pub fn add_segment(&mut self, segment_part: SegmentPart) {
        self.segments
            .entry(segment_part.segment)
            .or_default()
            .add_part(segment_part.part);
    }

    /// Removes a wire range.
    pub fn remove_segment(&mut self, segment_part: SegmentPart) {
        if let Some(parts) = self.segments.get_mut(&segment_part.segment) {
            parts.remove_part(segment_part.part);
            if parts.is_empty() {
                self.segments.remove(&segment_part.segment);
            }
        }
    }

    /// Replaces the selected ranges of one segment.
    ///
    /// An empty selection removes the segment's entry.
    pub fn set_selection(&mut self, segment: Segment, parts: PartSelection) {
        if parts.is_empty() {
            self.segments.remove(&segment);
        } else {
            self.segments.insert(segment, parts);
        }
    }

    /// Returns whether a logic item is selected.
    #[must_use]
    pub fn contains_logicitem(&self, logicitem_id: LogicItemId) -> bool {
        self.logicitems.contains(&logicitem_id)
    }

    /// Returns whether a decoration is selected.
    #[must_use]
    pub fn contains_decoration(&self, decoration_id: DecorationId) -> bool {
        self.decorations.contains(&decoration_id)
    }

    /// Returns whether the whole wire range is selected.
    #[must_use]
    pub fn contains_segment(&self, segment_part: SegmentPart) -> bool {
        self.segments
            .get(&segment_part.segment)
            .is_some_and(|parts| part_inside_selection(segment_part.part, parts))
    }

    /// Iterates the selected logic items.
    pub fn selected_logicitems(&self) -> impl Iterator<Item = LogicItemId> + '_ {
        self.logicitems.iter().copied()
    }

    /// Iterates the selected decorations.
    pub fn selected_decorations(&self) -> impl Iterator<Item = DecorationId> + '_ {
        self.decorations.iter().copied()
    }

    /// Iterates the selected wire ranges per segment.
    pub fn selected_segments(&self) -> impl Iterator<Item = (Segment, &PartSelection)> + '_ {
        self.segments.iter().map(|(segment, parts)| (*segment, parts))
    }

    /// The selected ranges of one segment, if any.
    #[must_use]
    pub fn segment_parts(&self, segment: Segment) -> Option<&PartSelection> {
        self.segments.get(&segment)
    }

    /// Keeps the selection valid across a committed layout mutation.
    pub fn submit(&mut self, message: &InfoMessage) {
        match message {
            InfoMessage::ElementDeleted(element) => match element {
                ElementRef::LogicItem(id) => self.remove_logicitem(*id),
                ElementRef::Decoration(id) => self.remove_decoration(*id),
            },
            InfoMessage::ElementIdUpdated { new_ref, old_ref } => match (new_ref, old_ref) {
                (ElementRef::LogicItem(new_id), ElementRef::LogicItem(old_id)) => {
                    if self.logicitems.remove(old_id) {
                        self.logicitems.insert(*new_id);
                    }
                }
                (ElementRef::Decoration(new_id), ElementRef::Decoration(old_id)) => {
                    if self.decorations.remove(old_id) {
                        self.decorations.insert(*new_id);
                    }
                }
                _ => panic!("element renumbering keeps the element kind"),
            },
            InfoMessage::SegmentDeleted { segment } => {
                self.segments.remove(segment);
            }
            InfoMessage::SegmentIdUpdated {
                new_segment,
                old_segment,
            }
            | InfoMessage::InsertedSegmentIdUpdated {
                new_segment,
                old_segment,
                ..
            } => {
                if let Some(parts) = self.segments.remove(old_segment) {
                    self.segments.insert(*new_segment, parts);
                }
            }
            InfoMessage::SegmentSplit {
                segment_from,
                part_from,
                segment_to,
            } => self.handle_split(*segment_from, *part_from, *segment_to),
            InfoMessage::SegmentMerged {
                segment_from,
                segment_to,
                part_destination,
            } => self.handle_merge(*segment_from, *segment_to, *part_destination),
            _ => {}
        }
    }

    /// Moves the selected ranges of the split-off tail to the new segment.
    fn handle_split(&mut self, segment_from: Segment, part_from: Part, segment_to: Segment) {
        let Some(source) = self.segments.get_mut(&segment_from) else {
            return;
        };

        let mut moved = PartSelection::new();
        moved.copy_parts(
            source,
            PartCopyDefinition {
                destination: Part::try_new(Offset::ZERO, part_from.length().into())
                    .expect("split ranges have positive length"),
                source: part_from,
            },
        );
        source.remove_part(part_from);

        if self.segments[&segment_from].is_empty() {
            self.segments.remove(&segment_from);
        }
        if !moved.is_empty() {
            self.segments.insert(segment_to, moved);
        }
    }

    /// Re-anchors the disappearing segment's ranges in the merged one.
    fn handle_merge(&mut self, segment_from: Segment, segment_to: Segment, destination: Part) {
        let Some(source) = self.segments.remove(&segment_from) else {
            return;
        };
        let full_source = Part::try_new(Offset::ZERO, destination.length().into())
            .expect("merge ranges have positive length");

        let target = self.segments.entry(segment_to).or_default();
        target.copy_parts(
            &source,
            PartCopyDefinition {
                destination,
                source: full_source,
            },
        );
        if target.is_empty() {
            self.segments.remove(&segment_to);
        }
    }
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.logicitems == other.logicitems
            && self.decorations == other.decorations
            && self.segments == other.segments
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Selection with {} logic items, {} decorations and {} segments>",
            self.logicitems.len(),
            self.decorations.len(),
            self.segments.len()
        )
    }
}
