//! Wire placement and endpoint connection tracking.
//!
//! At most one wire is being drawn at a time (the *active* wire). Finishing
//! it moves it into the completed collection. Connection detection is purely
//! distance based: an endpoint attaches to a component when it lies within
//! the connection threshold of the component's center.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use tracing::debug;

use super::types::{ComponentId, Position, WireId};
use crate::components::Component;

/// Default endpoint-to-component attach distance in pixels.
pub const DEFAULT_CONNECTION_THRESHOLD: f64 = 30.0;

/// RGB colour of a wire.
pub type WireColor = [u8; 3];

/// Colour of a wire that is not attached at both ends.
pub const COLOR_DRAWING: WireColor = [255, 255, 0];

/// Colour of a wire attached at both ends.
pub const COLOR_CONNECTED: WireColor = [0, 255, 0];

/// One end of a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WireEnd {
    Start,
    End,
}

/// A straight wire segment between two screen points.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    pub id: WireId,
    pub start_pos: Position,
    pub end_pos: Position,
    pub start_connection: Option<ComponentId>,
    pub end_connection: Option<ComponentId>,
    pub color: WireColor,
}

impl Wire {
    /// Create an unattached zero-length wire at `pos`.
    pub fn new(id: WireId, pos: Position) -> Self {
        Self {
            id,
            start_pos: pos,
            end_pos: pos,
            start_connection: None,
            end_connection: None,
            color: COLOR_DRAWING,
        }
    }

    /// A wire is connected iff both ends reference a component.
    pub fn is_connected(&self) -> bool {
        self.start_connection.is_some() && self.end_connection.is_some()
    }

    /// Position of one end.
    pub fn endpoint(&self, end: WireEnd) -> Position {
        match end {
            WireEnd::Start => self.start_pos,
            WireEnd::End => self.end_pos,
        }
    }

    fn attach(&mut self, end: WireEnd, component: ComponentId, point: Position) {
        match end {
            WireEnd::Start => {
                self.start_connection = Some(component);
                self.start_pos = point;
            }
            WireEnd::End => {
                self.end_connection = Some(component);
                self.end_pos = point;
            }
        }
        if self.is_connected() {
            self.color = COLOR_CONNECTED;
        }
    }
}

impl Serialize for Wire {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Wire", 7)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("start_pos", &self.start_pos)?;
        s.serialize_field("end_pos", &self.end_pos)?;
        s.serialize_field("start_connection", &self.start_connection)?;
        s.serialize_field("end_connection", &self.end_connection)?;
        s.serialize_field("is_connected", &self.is_connected())?;
        s.serialize_field("color", &self.color)?;
        s.end()
    }
}

/// A wire endpoint close enough to a component to attach to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectionCandidate {
    pub end: WireEnd,
    pub component: ComponentId,
    /// Point the endpoint snaps to (the component center)
    pub point: Position,
}

/// Two components joined by a fully connected wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentLink {
    pub from: ComponentId,
    pub to: ComponentId,
    pub wire: WireId,
}

/// Owns every finished wire plus the one being drawn.
#[derive(Debug, Clone)]
pub struct WireSystem {
    wires: Vec<Wire>,
    active: Option<Wire>,
    connection_threshold: f64,
    // never reused until `clear`
    next_id: usize,
}

impl Default for WireSystem {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECTION_THRESHOLD)
    }
}

impl WireSystem {
    /// Create an empty wire system.
    pub fn new(connection_threshold: f64) -> Self {
        Self {
            wires: Vec::new(),
            active: None,
            connection_threshold,
            next_id: 0,
        }
    }

    pub fn connection_threshold(&self) -> f64 {
        self.connection_threshold
    }

    /// The wire currently being drawn, if any.
    pub fn active(&self) -> Option<&Wire> {
        self.active.as_ref()
    }

    /// Finished wires.
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Begin drawing a new wire at `start`, replacing any active wire.
    ///
    /// The id is claimed only when the wire is finished, so a cancelled wire
    /// does not use one up.
    pub fn start(&mut self, start: Position) {
        self.active = Some(Wire::new(WireId(self.next_id), start));
    }

    /// Move the free end of the active wire.
    pub fn update_end(&mut self, end: Position) {
        if let Some(wire) = self.active.as_mut() {
            wire.end_pos = end;
        }
    }

    /// Move the active wire into the finished collection.
    pub fn finish(&mut self) -> Option<WireId> {
        let wire = self.active.take()?;
        let id = wire.id;
        self.next_id = id.0 + 1;
        self.wires.push(wire);
        Some(id)
    }

    /// Discard the active wire.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Which end of the active wire, if any, is under `pos`.
    pub fn grabbed_endpoint(&self, pos: Position) -> Option<WireEnd> {
        let wire = self.active.as_ref()?;
        [WireEnd::Start, WireEnd::End]
            .into_iter()
            .find(|&end| pos.distance_to(wire.endpoint(end)) < self.connection_threshold)
    }

    /// Find every component touched by an end of the active wire.
    pub fn check_connection(&self, components: &[Component]) -> Vec<ConnectionCandidate> {
        let Some(wire) = self.active.as_ref() else {
            return Vec::new();
        };

        let mut candidates = Vec::new();
        for component in components {
            for end in [WireEnd::Start, WireEnd::End] {
                if wire.endpoint(end).distance_to(component.position) < self.connection_threshold {
                    candidates.push(ConnectionCandidate {
                        end,
                        component: component.id,
                        point: component.position,
                    });
                }
            }
        }
        candidates
    }

    /// Attach the active wire's ends according to `candidates`.
    ///
    /// Later candidates for the same end win.
    pub fn apply_connections(&mut self, candidates: &[ConnectionCandidate]) {
        let Some(wire) = self.active.as_mut() else {
            return;
        };
        for c in candidates {
            wire.attach(c.end, c.component, c.point);
        }
        if wire.is_connected() {
            debug!(wire = %wire.id, "wire connected at both ends");
        }
    }

    /// Finished wires followed by the active one.
    pub fn all_wires(&self) -> impl Iterator<Item = &Wire> {
        self.wires.iter().chain(self.active.iter())
    }

    /// Remove a finished wire.
    pub fn remove_wire(&mut self, id: WireId) {
        self.wires.retain(|w| w.id != id);
    }

    /// Pairs of components joined by a finished, fully connected wire.
    pub fn connected_components(&self) -> Vec<ComponentLink> {
        self.wires
            .iter()
            .filter_map(|w| match (w.start_connection, w.end_connection) {
                (Some(from), Some(to)) => Some(ComponentLink { from, to, wire: w.id }),
                _ => None,
            })
            .collect()
    }

    /// Drop every wire, finished and active.
    pub fn clear(&mut self) {
        self.wires.clear();
        self.active = None;
        self.next_id = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentKind;

    fn battery_at(id: usize, x: i32, y: i32) -> Component {
        Component::new(ComponentId(id), ComponentKind::Battery, Position::new(x, y))
    }

    #[test]
    fn test_start_update_finish() {
        let mut ws = WireSystem::default();
        assert!(ws.finish().is_none());

        ws.start(Position::new(10, 200));
        ws.update_end(Position::new(80, 260));
        let active = ws.active().unwrap();
        assert_eq!(active.start_pos, Position::new(10, 200));
        assert_eq!(active.end_pos, Position::new(80, 260));
        assert_eq!(ws.all_wires().count(), 1);

        assert_eq!(ws.finish(), Some(WireId(0)));
        assert!(ws.active().is_none());
        assert_eq!(ws.wires().len(), 1);
    }

    #[test]
    fn test_connection_threshold_is_strict() {
        let mut ws = WireSystem::default();
        ws.start(Position::new(100, 300));
        ws.update_end(Position::new(400, 300));

        let near = battery_at(0, 129, 300);
        let edge = battery_at(1, 430, 300);
        let found = ws.check_connection(&[near, edge]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].end, WireEnd::Start);
        assert_eq!(found[0].component, ComponentId(0));
    }

    #[test]
    fn test_apply_connections_snaps_and_connects() {
        let mut ws = WireSystem::default();
        let a = battery_at(0, 100, 300);
        let b = battery_at(1, 400, 300);
        ws.start(Position::new(110, 310));
        ws.update_end(Position::new(390, 295));

        let found = ws.check_connection(&[a, b]);
        ws.apply_connections(&found);

        let wire = ws.active().unwrap();
        assert!(wire.is_connected());
        assert_eq!(wire.start_pos, Position::new(100, 300));
        assert_eq!(wire.end_pos, Position::new(400, 300));
        assert_eq!(wire.color, COLOR_CONNECTED);

        ws.finish();
        let links = ws.connected_components();
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].from, links[0].to), (ComponentId(0), ComponentId(1)));
    }

    #[test]
    fn test_half_connected_wire_is_not_connected() {
        let mut ws = WireSystem::default();
        ws.start(Position::new(100, 300));
        ws.update_end(Position::new(700, 700));
        let found = ws.check_connection(&[battery_at(0, 100, 300)]);
        ws.apply_connections(&found);
        let wire = ws.active().unwrap();
        assert!(!wire.is_connected());
        assert_eq!(wire.color, COLOR_DRAWING);
        ws.finish();
        assert!(ws.connected_components().is_empty());
    }

    #[test]
    fn test_grabbed_endpoint() {
        let mut ws = WireSystem::default();
        assert!(ws.grabbed_endpoint(Position::new(0, 0)).is_none());
        ws.start(Position::new(100, 300));
        ws.update_end(Position::new(300, 300));
        assert_eq!(ws.grabbed_endpoint(Position::new(110, 300)), Some(WireEnd::Start));
        assert_eq!(ws.grabbed_endpoint(Position::new(290, 310)), Some(WireEnd::End));
        assert_eq!(ws.grabbed_endpoint(Position::new(200, 300)), None);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut ws = WireSystem::default();
        ws.start(Position::new(0, 200));
        ws.finish();
        ws.start(Position::new(0, 250));
        ws.finish();
        ws.remove_wire(WireId(0));
        assert_eq!(ws.wires().len(), 1);
        assert_eq!(ws.wires()[0].id, WireId(1));

        ws.start(Position::new(5, 5));
        ws.clear();
        assert!(ws.wires().is_empty());
        assert!(ws.active().is_none());

        ws.start(Position::new(5, 5));
        assert_eq!(ws.finish(), Some(WireId(0)));
    }

    #[test]
    fn test_ids_stay_unique_after_removal() {
        let mut ws = WireSystem::default();
        ws.start(Position::new(0, 200));
        ws.finish();
        ws.start(Position::new(0, 250));
        ws.finish();
        ws.remove_wire(WireId(0));

        ws.start(Position::new(0, 300));
        assert_eq!(ws.finish(), Some(WireId(2)));
        let ids: Vec<_> = ws.wires().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![WireId(1), WireId(2)]);

        // removing the newest wire leaves the older one alone
        ws.remove_wire(WireId(2));
        assert_eq!(ws.wires().len(), 1);
        assert_eq!(ws.wires()[0].id, WireId(1));

        // a cancelled wire does not consume an id
        ws.start(Position::new(0, 350));
        ws.cancel();
        ws.start(Position::new(0, 400));
        assert_eq!(ws.finish(), Some(WireId(3)));
    }

    #[test]
    fn test_serialize_reports_is_connected() {
        let wire = Wire::new(WireId(2), Position::new(1, 2));
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["is_connected"], false);
        assert_eq!(json["start_connection"], serde_json::Value::Null);
        assert_eq!(json["color"], serde_json::json!([255, 255, 0]));
    }
}
