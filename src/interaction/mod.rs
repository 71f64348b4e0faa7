//! Gesture-to-model interaction.
//!
//! The [`InteractionController`] owns the circuit and turns a stream of
//! per-frame [`PinchState`](crate::gesture::PinchState)s into palette picks,
//! drags, drops, deletions and wires. The [`Palette`] describes the strip of
//! component types along the top of the frame.

mod controller;
mod palette;

pub use controller::{Interaction, InteractionController, InteractionState};
pub use palette::{
    Palette, PaletteEntry, DEFAULT_PANEL_HEIGHT, SELECTION_MARGIN, SELECTION_TOLERANCE,
    WIRE_SELECTION_MARGIN,
};
