//! Component models for the circuit builder.
//!
//! This module provides models for all placeable components:
//! - Sources: Battery
//! - Loads: Resistor, Lamp
//! - Controls: Switch
//! - Wire marker (bookkeeping only, never evaluated)
//!
//! A placed [`Component`] is a single record carrying the shared placement
//! data (id, position) plus a kind-specific [`ComponentValue`], so the
//! solver's dispatch over kinds is checked for exhaustiveness.

mod controls;
mod linear;
mod sources;

pub use controls::{Switch, SwitchState};
pub use linear::{Lamp, Resistor};
pub use sources::Battery;

use std::fmt;

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::circuit::{ComponentId, Position, Size};

/// The kinds of component a student can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Battery,
    Resistor,
    Lamp,
    Switch,
    Wire,
}

impl ComponentKind {
    /// All kinds, in palette order (wire first).
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Wire,
        ComponentKind::Battery,
        ComponentKind::Lamp,
        ComponentKind::Resistor,
        ComponentKind::Switch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Battery => "battery",
            ComponentKind::Resistor => "resistor",
            ComponentKind::Lamp => "lamp",
            ComponentKind::Switch => "switch",
            ComponentKind::Wire => "wire",
        }
    }

    /// Nominal drawn size of a placed component, used for workspace hit-testing.
    pub fn footprint(&self) -> Size {
        match self {
            ComponentKind::Battery => Size::new(80, 50),
            ComponentKind::Lamp => Size::new(60, 60),
            ComponentKind::Resistor => Size::new(80, 30),
            ComponentKind::Switch => Size::new(80, 40),
            ComponentKind::Wire => Size::new(60, 20),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placeholder value for a placed wire marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WireMarker {}

/// Kind-specific attributes of a placed component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ComponentValue {
    Battery(Battery),
    Resistor(Resistor),
    Lamp(Lamp),
    Switch(Switch),
    Wire(WireMarker),
}

impl ComponentValue {
    /// Default attributes for a freshly placed component of `kind`.
    pub fn default_for(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Battery => ComponentValue::Battery(Battery::default()),
            ComponentKind::Resistor => ComponentValue::Resistor(Resistor::default()),
            ComponentKind::Lamp => ComponentValue::Lamp(Lamp::default()),
            ComponentKind::Switch => ComponentValue::Switch(Switch::default()),
            ComponentKind::Wire => ComponentValue::Wire(WireMarker::default()),
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentValue::Battery(_) => ComponentKind::Battery,
            ComponentValue::Resistor(_) => ComponentKind::Resistor,
            ComponentValue::Lamp(_) => ComponentKind::Lamp,
            ComponentValue::Switch(_) => ComponentKind::Switch,
            ComponentValue::Wire(_) => ComponentKind::Wire,
        }
    }

    /// Resistance for resistive loads, `None` for everything else.
    pub fn resistance(&self) -> Option<f64> {
        match self {
            ComponentValue::Resistor(r) => Some(r.resistance),
            ComponentValue::Lamp(l) => Some(l.resistance),
            _ => None,
        }
    }
}

/// A component placed in the workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: ComponentId,
    /// Center of the component in screen pixels
    pub position: Position,
    pub value: ComponentValue,
    /// Reserved for terminal bookkeeping; always empty
    pub connections: Vec<ComponentId>,
}

impl Component {
    /// Create a component of `kind` with its default value.
    pub fn new(id: ComponentId, kind: ComponentKind, position: Position) -> Self {
        Self {
            id,
            position,
            value: ComponentValue::default_for(kind),
            connections: Vec::new(),
        }
    }

    pub fn kind(&self) -> ComponentKind {
        self.value.kind()
    }

    /// Check whether `p` falls inside this component's hit box.
    ///
    /// The box is the nominal footprint grown by `margin` in each dimension,
    /// tested per axis with strict half-extents.
    pub fn hit_test(&self, p: Position, margin: i32) -> bool {
        let area = self.kind().footprint().grow(margin);
        let dx = (p.x as i64 - self.position.x as i64).abs();
        let dy = (p.y as i64 - self.position.y as i64).abs();
        dx < (area.width / 2) as i64 && dy < (area.height / 2) as i64
    }

    /// Mutable access to the switch, if this component is one.
    pub fn as_switch_mut(&mut self) -> Option<&mut Switch> {
        match self.value {
            ComponentValue::Switch(ref mut sw) => Some(sw),
            _ => None,
        }
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Component", 5)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("type", &self.kind())?;
        s.serialize_field("position", &self.position)?;
        s.serialize_field("value", &self.value)?;
        s.serialize_field("connections", &self.connections)?;
        s.end()
    }
}
