//! Circuit model and wire bookkeeping.
//!
//! This module provides the in-memory representation of the circuit a
//! student is building. The [`Circuit`] struct holds all placed components
//! and the [`WireSystem`], and is only ever mutated by the interaction
//! controller.

mod model;
mod types;
mod wire;

pub use model::{Circuit, WORKSPACE_HIT_MARGIN};
pub use types::*;
pub use wire::{
    ComponentLink, ConnectionCandidate, Wire, WireColor, WireEnd, WireSystem, COLOR_CONNECTED,
    COLOR_DRAWING, DEFAULT_CONNECTION_THRESHOLD,
};
