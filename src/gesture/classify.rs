//! Finger-pose classification for switch control.
//!
//! A direct geometric rule on vertical (y-axis) positions: a finger is
//! raised when its tip is above its knuckle (smaller y) and lowered when its
//! tip is below it. No temporal debouncing, so a finger fluttering around
//! its knuckle line flips the result every frame.

use serde::Serialize;

use super::landmarks::{
    HandLandmarks, INDEX_MCP, INDEX_TIP, MIDDLE_MCP, MIDDLE_TIP, PINKY_MCP, PINKY_TIP, RING_MCP,
    RING_TIP,
};
use crate::components::SwitchState;

/// Recognised finger poses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerGesture {
    /// Index raised, middle not raised, ring and pinky lowered
    IndexUp,
    /// Index and middle raised, ring and pinky lowered
    PeaceSign,
    None,
}

impl FingerGesture {
    /// What this pose asks of the switches.
    pub fn switch_command(&self) -> SwitchCommand {
        match self {
            FingerGesture::IndexUp => SwitchCommand::On,
            FingerGesture::PeaceSign => SwitchCommand::Off,
            FingerGesture::None => SwitchCommand::Unchanged,
        }
    }
}

/// Switch control derived from a finger pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchCommand {
    On,
    Off,
    Unchanged,
}

impl SwitchCommand {
    /// The state every switch should be forced into, if any.
    pub fn target_state(&self) -> Option<SwitchState> {
        match self {
            SwitchCommand::On => Some(SwitchState::On),
            SwitchCommand::Off => Some(SwitchState::Off),
            SwitchCommand::Unchanged => None,
        }
    }
}

fn raised(hand: &HandLandmarks, tip: usize, mcp: usize) -> bool {
    hand.get(tip).y < hand.get(mcp).y
}

fn lowered(hand: &HandLandmarks, tip: usize, mcp: usize) -> bool {
    hand.get(tip).y > hand.get(mcp).y
}

/// Classify the finger pose of a single hand.
pub fn classify_fingers(hand: &HandLandmarks) -> FingerGesture {
    let index_up = raised(hand, INDEX_TIP, INDEX_MCP);
    let middle_up = raised(hand, MIDDLE_TIP, MIDDLE_MCP);
    let ring_down = lowered(hand, RING_TIP, RING_MCP);
    let pinky_down = lowered(hand, PINKY_TIP, PINKY_MCP);

    match (index_up, middle_up, ring_down && pinky_down) {
        (true, true, true) => FingerGesture::PeaceSign,
        (true, false, true) => FingerGesture::IndexUp,
        _ => FingerGesture::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::landmarks::{Landmark, LANDMARK_COUNT};

    // Knuckles at y = 0.5; each finger's tip either above (0.3) or below (0.7).
    fn pose(index: bool, middle: bool, ring: bool, pinky: bool) -> HandLandmarks {
        let mut points = [Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        let tip_y = |up: bool| if up { 0.3 } else { 0.7 };
        points[INDEX_TIP] = Landmark::new(0.4, tip_y(index));
        points[MIDDLE_TIP] = Landmark::new(0.5, tip_y(middle));
        points[RING_TIP] = Landmark::new(0.6, tip_y(ring));
        points[PINKY_TIP] = Landmark::new(0.7, tip_y(pinky));
        HandLandmarks::new(points)
    }

    #[test]
    fn test_peace_sign_turns_off() {
        let g = classify_fingers(&pose(true, true, false, false));
        assert_eq!(g, FingerGesture::PeaceSign);
        assert_eq!(g.switch_command().target_state(), Some(SwitchState::Off));
    }

    #[test]
    fn test_index_up_turns_on() {
        let g = classify_fingers(&pose(true, false, false, false));
        assert_eq!(g, FingerGesture::IndexUp);
        assert_eq!(g.switch_command(), SwitchCommand::On);
    }

    #[test]
    fn test_other_poses_unchanged() {
        // open palm
        assert_eq!(classify_fingers(&pose(true, true, true, true)), FingerGesture::None);
        // fist
        assert_eq!(classify_fingers(&pose(false, false, false, false)), FingerGesture::None);
        // index + pinky
        assert_eq!(classify_fingers(&pose(true, false, false, true)), FingerGesture::None);
        assert_eq!(SwitchCommand::Unchanged.target_state(), None);
    }

    #[test]
    fn test_level_ring_is_not_lowered() {
        let mut hand = pose(true, false, false, false);
        let mut points = *hand.points();
        points[RING_TIP] = Landmark::new(0.6, 0.5);
        hand = HandLandmarks::new(points);
        assert_eq!(classify_fingers(&hand), FingerGesture::None);
    }
}
