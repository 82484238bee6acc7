// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gridlogic Selection: stable selections over a changing circuit.
//!
//! A [`Selection`] names circuit content at the finest granularity the
//! editor supports: whole logic items, whole decorations, and sub-segment
//! ranges of wires. Selections stay valid while the circuit is edited by
//! consuming the layout's message stream: id renumbering rewrites contained
//! ids, deletions drop entries, and segment splits and merges move the
//! affected ranges.
//!
//! Three layers build on that container:
//!
//! - [`SelectionStore`] owns every live selection and hands out
//!   [`SelectionResource`] handles. The handle is the RAII owner of its
//!   selection: dropping it frees the storage, regardless of destruction
//!   order between handle and store.
//! - [`VisibleSelection`] is the interactive rubber-band selection: an
//!   initial selection plus an ordered list of rectangle operations,
//!   materialized lazily against the spatial index and cached.
//! - [`sanitize_selection`] normalizes wire selections whose boundaries
//!   fall on crossing points, where selection membership is ambiguous.

mod registry;
mod sanitize;
mod selection;
mod visible;

pub use registry::{SelectionResource, SelectionStore};
pub use sanitize::{sanitize_part, sanitize_selection, SanitizeMode};
pub use selection::Selection;
pub use visible::{Operation, VisibleSelection};
