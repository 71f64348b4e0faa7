//! Read-only view of a session for renderers.

use serde::Serialize;

use crate::circuit::{ComponentLink, Wire};
use crate::components::{Component, ComponentKind};
use crate::gesture::{FingerGesture, PinchState};
use crate::interaction::{Interaction, InteractionState};
use crate::solver::{CircuitReport, CircuitType, ComponentAnalysis};

/// Everything a presentation layer needs to draw one frame.
///
/// Serialised as the `circuit_data` payload: one JSON object per frame.
#[derive(Debug, Clone, Serialize)]
pub struct CircuitSnapshot<'a> {
    /// Frames processed so far
    pub frame: u64,
    pub running: bool,
    pub components: &'a [Component],
    /// Finished wires followed by the one being drawn
    pub wires: Vec<&'a Wire>,
    pub connections: Vec<ComponentLink>,
    pub calculations: CircuitReport,
    pub analysis: Vec<ComponentAnalysis>,
    /// Wire-count heuristic; `calculations` does not use it
    pub topology: CircuitType,
    pub interaction: &'a InteractionState,
    pub event: Interaction,
    pub pinch: Option<&'a PinchState>,
    pub gesture: FingerGesture,
    pub selected: Option<ComponentKind>,
}

impl CircuitSnapshot<'_> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
