use approx::assert_relative_eq;

use circuit_cv::circuit::{ComponentId, Position, WireId};
use circuit_cv::components::{ComponentKind, ComponentValue, SwitchState};
use circuit_cv::gesture::landmarks::{
    INDEX_MCP, INDEX_TIP, MIDDLE_MCP, MIDDLE_TIP, PINKY_MCP, PINKY_TIP, RING_MCP, RING_TIP,
    THUMB_TIP,
};
use circuit_cv::gesture::{FrameSize, HandLandmarks, Landmark, LANDMARK_COUNT};
use circuit_cv::interaction::Interaction;
use circuit_cv::session::{Key, Session};
use circuit_cv::solver::CircuitType;

// Power-of-two frame: normalized coordinates map back to exact pixels.
const SIZE: FrameSize = FrameSize {
    width: 1024,
    height: 1024,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Pose {
    Pinch,
    Open,
    IndexUp,
    Peace,
}

fn at(x: i32, y: i32) -> Landmark {
    Landmark::new(x as f32 / 1024.0, y as f32 / 1024.0)
}

/// A hand centred on (x, y). Unless the pose says otherwise every fingertip
/// sits level with its knuckle, so no switch command fires.
fn hand(x: i32, y: i32, pose: Pose) -> HandLandmarks {
    let mut p = [at(x, y); LANDMARK_COUNT];
    let spread = if pose == Pose::Pinch { 4 } else { 64 };
    p[THUMB_TIP] = at(x - spread, y);
    p[INDEX_TIP] = at(x + spread, y);
    p[INDEX_MCP] = at(x + spread, y);

    if matches!(pose, Pose::IndexUp | Pose::Peace) {
        p[INDEX_MCP] = at(x + spread, y + 40);
        p[RING_MCP] = at(x, y + 40);
        p[RING_TIP] = at(x, y + 80);
        p[PINKY_MCP] = at(x, y + 40);
        p[PINKY_TIP] = at(x, y + 80);
    }
    if pose == Pose::Peace {
        p[MIDDLE_MCP] = at(x, y + 40);
        p[MIDDLE_TIP] = at(x, y - 20);
    }
    HandLandmarks::new(p)
}

fn frame(session: &mut Session, x: i32, y: i32, pose: Pose) -> Interaction {
    session.process_hand(Some(&hand(x, y, pose)), SIZE)
}

fn drag(session: &mut Session, from: (i32, i32), to: (i32, i32)) -> Interaction {
    frame(session, from.0, from.1, Pose::Pinch);
    frame(session, to.0, to.1, Pose::Pinch);
    frame(session, to.0, to.1, Pose::Open)
}

fn build_circuit(session: &mut Session) {
    assert_eq!(drag(session, (250, 60), (200, 400)), Interaction::Placed(ComponentId(0)));
    assert_eq!(drag(session, (550, 60), (400, 400)), Interaction::Placed(ComponentId(1)));
    assert_eq!(drag(session, (400, 60), (600, 400)), Interaction::Placed(ComponentId(2)));
    assert_eq!(drag(session, (700, 60), (800, 400)), Interaction::Placed(ComponentId(3)));
}

#[test]
fn test_place_defaults() {
    let mut session = Session::default();
    build_circuit(&mut session);

    let kinds: Vec<_> = session.circuit().components().iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ComponentKind::Battery,
            ComponentKind::Resistor,
            ComponentKind::Lamp,
            ComponentKind::Switch
        ]
    );
    let switch = session.circuit().component(ComponentId(3)).unwrap();
    assert!(matches!(switch.value, ComponentValue::Switch(s) if s.state == SwitchState::Off));

    // the OFF switch opens everything
    assert!(session.report().is_open());
    assert_eq!(session.report().current, 0.0);
}

#[test]
fn test_switch_gestures_drive_calculation() {
    let mut session = Session::default();
    build_circuit(&mut session);

    frame(&mut session, 512, 600, Pose::IndexUp);
    let report = *session.report();
    assert_eq!(report.circuit_type, CircuitType::Series);
    assert_relative_eq!(report.voltage, 12.0);
    assert_relative_eq!(report.resistance, 150.0);
    assert_relative_eq!(report.current, 0.08, epsilon = 1e-12);
    assert_relative_eq!(report.power, 0.96, epsilon = 1e-12);

    // an ordinary open hand leaves switches alone
    frame(&mut session, 512, 600, Pose::Open);
    assert_eq!(session.report().circuit_type, CircuitType::Series);

    frame(&mut session, 512, 600, Pose::Peace);
    assert!(session.report().is_open());
}

#[test]
fn test_move_then_delete_by_palette() {
    let mut session = Session::default();
    build_circuit(&mut session);
    frame(&mut session, 512, 600, Pose::IndexUp);

    let lamp = ComponentId(2);
    assert_eq!(frame(&mut session, 610, 400, Pose::Pinch), Interaction::Grabbed(lamp));
    frame(&mut session, 710, 500, Pose::Pinch);
    assert_eq!(frame(&mut session, 710, 500, Pose::Open), Interaction::Moved(lamp));
    assert_eq!(
        session.circuit().component(lamp).unwrap().position,
        Position::new(700, 500)
    );

    assert_eq!(drag(&mut session, (700, 500), (700, 50)), Interaction::Deleted(lamp));
    assert_eq!(session.circuit().len(), 3);
    assert!(session.circuit().component(lamp).is_none());

    assert_relative_eq!(session.report().current, 0.12, epsilon = 1e-12);
    assert_relative_eq!(session.report().power, 1.44, epsilon = 1e-12);
}

#[test]
fn test_hand_lost_mid_drag() {
    let mut session = Session::default();
    build_circuit(&mut session);

    frame(&mut session, 200, 400, Pose::Pinch);
    frame(&mut session, 300, 700, Pose::Pinch);
    assert_eq!(session.process_hand(None, SIZE), Interaction::Abandoned);
    assert_eq!(
        session.circuit().component(ComponentId(0)).unwrap().position,
        Position::new(200, 400)
    );
    assert!(session.controller().state().is_idle());
}

#[test]
fn test_wire_to_component() {
    let mut session = Session::default();
    build_circuit(&mut session);

    assert_eq!(
        frame(&mut session, 100, 60, Pose::Pinch),
        Interaction::WireStarted(Position::new(100, 60))
    );
    assert_eq!(
        frame(&mut session, 405, 395, Pose::Pinch),
        Interaction::WireExtended { candidates: 1 }
    );
    let event = frame(&mut session, 405, 395, Pose::Open);
    assert_eq!(
        event,
        Interaction::WireFinished {
            wire: Some(WireId(0)),
            marker: ComponentId(4)
        }
    );

    let wires = session.circuit().wires();
    let wire = &wires.wires()[0];
    assert_eq!(wire.start_connection, None);
    assert_eq!(wire.end_connection, Some(ComponentId(1)));
    assert_eq!(wire.end_pos, Position::new(400, 400));
    assert!(!wire.is_connected());
    assert!(wires.connected_components().is_empty());

    let json: serde_json::Value =
        serde_json::from_str(&session.snapshot().to_json().unwrap()).unwrap();
    assert_eq!(json["wires"].as_array().unwrap().len(), 1);
    assert_eq!(json["wires"][0]["is_connected"], false);
    assert_eq!(json["components"][4]["type"], "wire");
    assert_eq!(json["topology"], "open");
}

#[test]
fn test_reset_clears_everything() {
    let mut session = Session::default();
    session.start();
    build_circuit(&mut session);
    frame(&mut session, 512, 600, Pose::IndexUp);
    frame(&mut session, 100, 60, Pose::Pinch);
    frame(&mut session, 300, 300, Pose::Pinch);
    assert!(session.circuit().wires().active().is_some());

    assert!(session.handle_key(Key::Reset));
    assert!(session.circuit().is_empty());
    assert_eq!(session.circuit().wires().all_wires().count(), 0);
    assert!(session.controller().state().is_idle());
    assert!(session.report().is_open());

    // ids start over after a reset
    assert_eq!(
        drag(&mut session, (250, 60), (300, 300)),
        Interaction::Placed(ComponentId(0))
    );
}
