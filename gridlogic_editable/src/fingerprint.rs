// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable fingerprints of the render-relevant circuit state.
//!
//! Render layers poll the fingerprint to decide whether their inputs
//! changed; equal fingerprints mean equal layouts and visible
//! selections, at hash strength. The hash walks everything in id order,
//! so two structurally equal circuits fingerprint identically.

use core::hash::{BuildHasher, Hash, Hasher};

use gridlogic_layout::{decoration_ids, logicitem_ids, wire_ids, Layout};

use crate::circuit_data::CircuitData;

/// A stable fingerprint of the layout and visible selection.
#[must_use]
pub fn circuit_fingerprint(circuit: &CircuitData) -> u64 {
    let mut hasher = foldhash::fast::FixedState::default().build_hasher();

    hash_layout(&circuit.layout, &mut hasher);

    circuit
        .visible_selection
        .with_selection(&circuit.layout, &circuit.index, |selection| {
            let mut logicitems: Vec<_> = selection.selected_logicitems().collect();
            logicitems.sort_unstable();
            logicitems.hash(&mut hasher);

            let mut decorations: Vec<_> = selection.selected_decorations().collect();
            decorations.sort_unstable();
            decorations.hash(&mut hasher);

            let mut segments: Vec<_> = selection
                .selected_segments()
                .map(|(segment, parts)| (segment, parts.parts().to_vec()))
                .collect();
            segments.sort_unstable_by_key(|(segment, _)| *segment);
            segments.hash(&mut hasher);
        });

    hasher.finish()
}

fn hash_layout(layout: &Layout, hasher: &mut impl Hasher) {
    for logicitem_id in logicitem_ids(layout) {
        let store = layout.logic_items();
        store.logicitem_type(logicitem_id).hash(hasher);
        store.position(logicitem_id).hash(hasher);
        store.orientation(logicitem_id).hash(hasher);
        store.input_count(logicitem_id).hash(hasher);
        store.output_count(logicitem_id).hash(hasher);
        store.display_state(logicitem_id).hash(hasher);
        store.attrs_clock_generator(logicitem_id).hash(hasher);
    }

    for decoration_id in decoration_ids(layout) {
        let store = layout.decorations();
        store.decoration_type(decoration_id).hash(hasher);
        store.position(decoration_id).hash(hasher);
        store.size(decoration_id).hash(hasher);
        store.display_state(decoration_id).hash(hasher);
        store.attrs_text_element(decoration_id).hash(hasher);
    }

    for wire_id in wire_ids(layout) {
        let tree = layout.wires().segment_tree(wire_id);
        for index in tree.indices() {
            let info = tree.info(index);
            info.line.hash(hasher);
            info.p0_type.hash(hasher);
            info.p1_type.hash(hasher);
            tree.valid_parts(index).parts().hash(hasher);
        }
    }
}
