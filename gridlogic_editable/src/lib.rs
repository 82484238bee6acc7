// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gridlogic Editable: the editing surface over the circuit core.
//!
//! [`EditableCircuit`] ties the pieces of the core together: the
//! authoritative [`Layout`](gridlogic_layout::Layout), the derived
//! [`LayoutIndex`](gridlogic_index::LayoutIndex), the selection store and
//! visible selection, and the undo history. Every editing operation
//! follows the same contract:
//!
//! 1. check preconditions,
//! 2. compute a collision verdict from the indices,
//! 3. mutate the layout,
//! 4. announce each committed mutation as an
//!    [`InfoMessage`](gridlogic_layout::message::InfoMessage), and
//! 5. record the inverse on the history stack unless recording is off.
//!
//! Messages fan out synchronously to the indices, the selection store,
//! the visible selection, registered observers, and — in debug and test
//! builds — a validator that rebuilds the inserted state from the stream
//! and compares it against the layout after every operation. Operations
//! are atomic: they either complete or leave the layout unchanged, and a
//! rejected insertion compensates any already announced mutations before
//! returning.

mod circuit_data;
pub mod editing;
mod error;
mod examples;
mod fingerprint;
mod key_index;
mod surface;
mod validator;

pub use circuit_data::CircuitData;
pub use error::CircuitError;
pub use examples::load_circuit_example;
pub use fingerprint::circuit_fingerprint;
pub use editing::ConnectorRef;
pub use key_index::KeyIndex;
pub use surface::EditableCircuit;
pub use validator::MessageValidator;
