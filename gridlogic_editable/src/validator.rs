// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replay-based validation of the message stream.

use gridlogic_layout::message::{generate_inserted_messages, InfoMessage};
use gridlogic_layout::Layout;
use gridlogic_vocabulary::{
    DecorationCalculationData, DecorationId, LayoutCalculationData, LogicItemId, Segment,
    SegmentInfo,
};
use hashbrown::HashMap;

type State = foldhash::fast::RandomState;

/// A shadow of the layout's inserted state, built purely from messages.
///
/// After every editing operation the shadow must equal the inserted state
/// derived from the live layout; a mismatch means an operation mutated
/// the layout without announcing it (or announced it wrongly) and is
/// fatal. Enabled in debug and test builds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageValidator {
    logicitems: HashMap<LogicItemId, LayoutCalculationData, State>,
    decorations: HashMap<DecorationId, DecorationCalculationData, State>,
    segments: HashMap<Segment, SegmentInfo, State>,
}

impl MessageValidator {
    /// Creates an empty shadow.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one committed mutation to the shadow.
    pub fn submit(&mut self, message: &InfoMessage) {
        match message {
            InfoMessage::LogicItemInserted { logicitem_id, data } => {
                let stale = self.logicitems.insert(*logicitem_id, *data);
                assert!(stale.is_none(), "logic item inserted twice");
            }
            InfoMessage::LogicItemUninserted { logicitem_id, data } => {
                let removed = self.logicitems.remove(logicitem_id);
                assert_eq!(removed, Some(*data), "uninserted an unknown logic item");
            }
            InfoMessage::InsertedLogicItemIdUpdated {
                new_logicitem_id,
                old_logicitem_id,
                data,
            } => {
                let removed = self.logicitems.remove(old_logicitem_id);
                assert_eq!(removed, Some(*data), "renumbered an unknown logic item");
                self.logicitems.insert(*new_logicitem_id, *data);
            }
            InfoMessage::DecorationInserted {
                decoration_id,
                data,
            } => {
                let stale = self.decorations.insert(*decoration_id, *data);
                assert!(stale.is_none(), "decoration inserted twice");
            }
            InfoMessage::DecorationUninserted {
                decoration_id,
                data,
            } => {
                let removed = self.decorations.remove(decoration_id);
                assert_eq!(removed, Some(*data), "uninserted an unknown decoration");
            }
            InfoMessage::InsertedDecorationIdUpdated {
                new_decoration_id,
                old_decoration_id,
                data,
            } => {
                let removed = self.decorations.remove(old_decoration_id);
                assert_eq!(removed, Some(*data), "renumbered an unknown decoration");
                self.decorations.insert(*new_decoration_id, *data);
            }
            InfoMessage::SegmentInserted {
                segment,
                segment_info,
            } => {
                let stale = self.segments.insert(*segment, *segment_info);
                assert!(stale.is_none(), "segment inserted twice");
            }
            InfoMessage::SegmentUninserted {
                segment,
                segment_info,
            } => {
                let removed = self.segments.remove(segment);
                assert_eq!(removed, Some(*segment_info), "uninserted an unknown segment");
            }
            InfoMessage::InsertedSegmentIdUpdated {
                new_segment,
                old_segment,
                segment_info,
            } => {
                let removed = self.segments.remove(old_segment);
                assert_eq!(removed, Some(*segment_info), "renumbered an unknown segment");
                self.segments.insert(*new_segment, *segment_info);
            }
            InfoMessage::InsertedEndPointsUpdated {
                segment,
                new_segment_info,
                old_segment_info,
            } => {
                let removed = self.segments.remove(segment);
                assert_eq!(
                    removed,
                    Some(*old_segment_info),
                    "updated endpoints of an unknown segment"
                );
                self.segments.insert(*segment, *new_segment_info);
            }
            _ => {}
        }
    }

    /// Asserts that the shadow equals the layout's inserted state.
    ///
    /// # Panics
    ///
    /// Panics on any divergence.
    pub fn validate(&self, layout: &Layout) {
        let mut expected = Self::new();
        generate_inserted_messages(layout, |message| expected.submit(&message));
        assert!(
            *self == expected,
            "message stream diverged from the layout's inserted state"
        );
    }
}
