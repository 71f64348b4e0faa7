//! Pinch-driven drag, drop, delete and wiring.

use std::mem;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::palette::Palette;
use crate::circuit::{Circuit, ComponentId, ConnectionCandidate, Position, WireId};
use crate::components::ComponentKind;
use crate::gesture::{PinchState, SwitchCommand};

/// What the controller is doing between frames.
///
/// Payload lives only in the states where it means something.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InteractionState {
    #[default]
    Idle,
    /// Carrying a new component picked from the palette
    DraggingNew {
        kind: ComponentKind,
        temp_position: Option<Position>,
    },
    /// Carrying a component that is already placed
    DraggingExisting {
        id: ComponentId,
        kind: ComponentKind,
        /// Pinch point minus component center at grab time
        offset: Position,
        temp_position: Option<Position>,
    },
    /// Stretching the active wire
    DrawingWire {
        candidates: Vec<ConnectionCandidate>,
    },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    /// Kind of component being carried or drawn.
    pub fn dragging_kind(&self) -> Option<ComponentKind> {
        match self {
            InteractionState::Idle => None,
            InteractionState::DraggingNew { kind, .. } => Some(*kind),
            InteractionState::DraggingExisting { kind, .. } => Some(*kind),
            InteractionState::DrawingWire { .. } => Some(ComponentKind::Wire),
        }
    }

    /// Where a carried component should be drawn this frame.
    pub fn temp_position(&self) -> Option<Position> {
        match self {
            InteractionState::DraggingNew { temp_position, .. }
            | InteractionState::DraggingExisting { temp_position, .. } => *temp_position,
            _ => None,
        }
    }
}

/// Outcome of feeding one frame to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Interaction {
    None,
    /// Started moving a placed component
    Grabbed(ComponentId),
    /// A carried component follows the pinch
    Dragging(Position),
    WireStarted(Position),
    WireExtended { candidates: usize },
    Placed(ComponentId),
    Moved(ComponentId),
    /// Released over the palette
    Deleted(ComponentId),
    WireFinished {
        wire: Option<WireId>,
        marker: ComponentId,
    },
    /// New component released over the palette
    Discarded,
    /// Wire released over the palette or hand lost while drawing
    Cancelled,
    /// Hand lost while carrying a component
    Abandoned,
}

/// Owns the circuit and applies pinch gestures to it.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    circuit: Circuit,
    palette: Palette,
    state: InteractionState,
}

impl InteractionController {
    /// Create a controller over an empty circuit.
    pub fn new(palette: Palette, connection_threshold: f64) -> Self {
        Self {
            circuit: Circuit::with_connection_threshold(connection_threshold),
            palette,
            state: InteractionState::Idle,
        }
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Feed one frame's pinch measurement (`None` when no hand is visible).
    pub fn handle(&mut self, pinch: Option<&PinchState>) -> Interaction {
        let pos = match pinch {
            Some(p) if p.is_pinching => p.position,
            other => return self.release(other.map(|p| p.position)),
        };

        if self.state.is_idle() {
            if let Some(outcome) = self.begin(pos) {
                return outcome;
            }
            if self.state.is_idle() {
                return Interaction::None;
            }
        }

        match &mut self.state {
            InteractionState::DrawingWire { candidates } => {
                if self.circuit.wires().active().is_none() {
                    self.circuit.wires_mut().start(pos);
                    return Interaction::WireStarted(pos);
                }
                self.circuit.wires_mut().update_end(pos);
                *candidates = self
                    .circuit
                    .wires()
                    .check_connection(self.circuit.components());
                if !candidates.is_empty() {
                    debug!(count = candidates.len(), "wire connection candidates");
                }
                Interaction::WireExtended {
                    candidates: candidates.len(),
                }
            }
            InteractionState::DraggingNew { temp_position, .. } => {
                *temp_position = Some(pos);
                Interaction::Dragging(pos)
            }
            InteractionState::DraggingExisting {
                offset,
                temp_position,
                ..
            } => {
                let at = pos - *offset;
                *temp_position = Some(at);
                Interaction::Dragging(at)
            }
            InteractionState::Idle => Interaction::None,
        }
    }

    /// Pick up whatever is under a fresh pinch.
    ///
    /// Placed components win over the palette; a grab ends the frame.
    fn begin(&mut self, pos: Position) -> Option<Interaction> {
        if !self.palette.is_in_panel(pos) {
            if let Some(component) = self.circuit.component_at(pos) {
                let id = component.id;
                let kind = component.kind();
                self.state = InteractionState::DraggingExisting {
                    id,
                    kind,
                    offset: pos - component.position,
                    temp_position: None,
                };
                info!(component = %id, kind = %kind, "moving component");
                return Some(Interaction::Grabbed(id));
            }
        }

        self.state = match self.palette.select(pos)? {
            ComponentKind::Wire => InteractionState::DrawingWire {
                candidates: Vec::new(),
            },
            kind => InteractionState::DraggingNew {
                kind,
                temp_position: None,
            },
        };
        None
    }

    /// End the current gesture at `position` (`None` when the hand was lost).
    fn release(&mut self, position: Option<Position>) -> Interaction {
        let state = mem::take(&mut self.state);
        let in_workspace = position.filter(|p| !self.palette.is_in_panel(*p));

        match state {
            InteractionState::Idle => Interaction::None,

            InteractionState::DraggingNew { kind, .. } => match (position, in_workspace) {
                (_, Some(p)) => Interaction::Placed(self.circuit.place(kind, p)),
                (Some(_), None) => Interaction::Discarded,
                (None, _) => Interaction::Abandoned,
            },

            InteractionState::DraggingExisting { id, offset, .. } => match (position, in_workspace) {
                (_, Some(p)) => {
                    if self.circuit.move_component(id, p - offset) {
                        Interaction::Moved(id)
                    } else {
                        warn!(component = %id, "dragged component no longer exists");
                        Interaction::Abandoned
                    }
                }
                (Some(_), None) => match self.circuit.remove(id) {
                    Some(_) => Interaction::Deleted(id),
                    None => {
                        warn!(component = %id, "dragged component no longer exists");
                        Interaction::Abandoned
                    }
                },
                (None, _) => {
                    debug!(component = %id, "hand lost, component left in place");
                    Interaction::Abandoned
                }
            },

            InteractionState::DrawingWire { candidates } => match in_workspace {
                Some(p) => {
                    // the free end sits under the marker unless a candidate snaps it
                    let wires = self.circuit.wires_mut();
                    wires.update_end(p);
                    wires.apply_connections(&candidates);
                    let wire = wires.finish();
                    let marker = self.circuit.place(ComponentKind::Wire, p);
                    Interaction::WireFinished { wire, marker }
                }
                None => {
                    self.circuit.wires_mut().cancel();
                    debug!("wire cancelled");
                    Interaction::Cancelled
                }
            },
        }
    }

    /// Apply a finger-pose switch command to every switch.
    pub fn apply_switch_command(&mut self, command: SwitchCommand) -> usize {
        match command.target_state() {
            Some(state) => self.circuit.set_all_switches(state),
            None => 0,
        }
    }

    /// Clear every component and wire and drop any gesture in progress.
    pub fn reset(&mut self) {
        self.circuit.clear();
        self.state = InteractionState::Idle;
        self.palette.clear_selection();
    }
}
