//! The circuit model: placed components plus wires.

use tracing::info;

use super::types::{ComponentId, Position};
use super::wire::WireSystem;
use crate::components::{Component, ComponentKind, SwitchState};

/// Margin added to a component's footprint when hit-testing in the workspace.
pub const WORKSPACE_HIT_MARGIN: i32 = 20;

/// A circuit under construction.
///
/// This is the single source of truth for what is on the canvas. Components
/// are kept in placement order, which doubles as z-order (later on top).
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    components: Vec<Component>,
    wires: WireSystem,
}

impl Circuit {
    /// Create an empty circuit with the default wire connection threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty circuit with a custom wire connection threshold.
    pub fn with_connection_threshold(threshold: f64) -> Self {
        Self {
            components: Vec::new(),
            wires: WireSystem::new(threshold),
        }
    }

    /// All placed components in placement order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn wires(&self) -> &WireSystem {
        &self.wires
    }

    pub fn wires_mut(&mut self) -> &mut WireSystem {
        &mut self.wires
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Find a component by id.
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Find a component by id for mutation.
    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id == id)
    }

    /// Place a new component with its kind's default value.
    ///
    /// The id is the component count before insertion, unless a live
    /// component already holds that value; then the next free id above it.
    pub fn place(&mut self, kind: ComponentKind, position: Position) -> ComponentId {
        let id = self.next_id();
        self.components.push(Component::new(id, kind, position));
        info!(component = %id, kind = %kind, position = %position, "component placed");
        id
    }

    fn next_id(&self) -> ComponentId {
        let mut id = ComponentId(self.components.len());
        while self.component(id).is_some() {
            id.0 += 1;
        }
        id
    }

    /// Move an existing component. Returns `false` if the id is unknown.
    pub fn move_component(&mut self, id: ComponentId, position: Position) -> bool {
        match self.component_mut(id) {
            Some(component) => {
                component.position = position;
                info!(component = %id, position = %position, "component moved");
                true
            }
            None => false,
        }
    }

    /// Remove a component, returning it if it existed.
    pub fn remove(&mut self, id: ComponentId) -> Option<Component> {
        let idx = self.components.iter().position(|c| c.id == id)?;
        let removed = self.components.remove(idx);
        info!(component = %id, kind = %removed.kind(), "component removed");
        Some(removed)
    }

    /// The topmost component whose enlarged hit box contains `pos`.
    pub fn component_at(&self, pos: Position) -> Option<&Component> {
        self.components
            .iter()
            .rev()
            .find(|c| c.hit_test(pos, WORKSPACE_HIT_MARGIN))
    }

    /// Force every switch into `state`. Returns how many switches changed.
    pub fn set_all_switches(&mut self, state: SwitchState) -> usize {
        let mut changed = 0;
        for sw in self.components.iter_mut().filter_map(Component::as_switch_mut) {
            if sw.state != state {
                sw.set_state(state);
                changed += 1;
            }
        }
        if changed > 0 {
            info!(state = %state, changed, "switches set");
        }
        changed
    }

    /// Remove every component and every wire.
    pub fn clear(&mut self) {
        self.components.clear();
        self.wires.clear();
        info!("circuit reset");
    }
}
