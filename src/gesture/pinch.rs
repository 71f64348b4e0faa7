//! Pinch detection.
//!
//! A pinch is a thumb-tip / index-tip pixel distance below a fixed
//! threshold. Each frame is judged on its own; there is no smoothing.

use serde::Serialize;

use super::landmarks::{
    FrameSize, HandLandmarks, LandmarkSource, INDEX_TIP, MIDDLE_TIP, PINKY_TIP, RING_TIP,
    THUMB_TIP, WRIST,
};
use crate::circuit::{Position, Rect};

/// Default pinch threshold in pixels.
pub const DEFAULT_PINCH_THRESHOLD: f64 = 40.0;

/// Smallest accepted pinch threshold.
pub const MIN_PINCH_THRESHOLD: f64 = 10.0;

/// Largest accepted pinch threshold.
pub const MAX_PINCH_THRESHOLD: f64 = 100.0;

/// Pixel positions of the five fingertips and the wrist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FingerPositions {
    pub thumb: Position,
    pub index: Position,
    pub middle: Position,
    pub ring: Position,
    pub pinky: Position,
    pub wrist: Position,
}

impl FingerPositions {
    pub fn from_hand(hand: &HandLandmarks, size: FrameSize) -> Self {
        Self {
            thumb: hand.pixel(THUMB_TIP, size),
            index: hand.pixel(INDEX_TIP, size),
            middle: hand.pixel(MIDDLE_TIP, size),
            ring: hand.pixel(RING_TIP, size),
            pinky: hand.pixel(PINKY_TIP, size),
            wrist: hand.pixel(WRIST, size),
        }
    }
}

/// Per-frame pinch measurement. Recomputed from scratch every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PinchState {
    pub is_pinching: bool,
    /// Integer midpoint of thumb and index tips
    pub position: Position,
    /// Thumb-to-index distance in pixels
    pub distance: f64,
    /// 1.0 at zero distance, 0.0 at or beyond the threshold
    pub confidence: f64,
    pub thumb_pos: Position,
    pub index_pos: Position,
    pub finger_positions: FingerPositions,
}

/// Pinch confidence for a given distance: linear falloff to zero at the threshold.
pub fn pinch_confidence(distance: f64, threshold: f64) -> f64 {
    ((threshold - distance) / threshold).max(0.0)
}

/// Thumb/index pinch detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchDetector {
    threshold: f64,
}

impl Default for PinchDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_PINCH_THRESHOLD,
        }
    }
}

impl PinchDetector {
    /// Create a detector with the default threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with a custom threshold (clamped to [10, 100]).
    pub fn with_threshold(threshold: f64) -> Self {
        let mut detector = Self::default();
        detector.set_threshold(threshold);
        detector
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Set the pinch threshold, clamped to [10, 100] pixels.
    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold.clamp(MIN_PINCH_THRESHOLD, MAX_PINCH_THRESHOLD);
    }

    /// Run the landmark source on `frame` and measure the pinch.
    ///
    /// Returns the located hand alongside the pinch state so callers can feed
    /// the same landmarks to the finger-gesture classifier. `None` means no
    /// hand is visible.
    pub fn detect<S: LandmarkSource>(
        &self,
        source: &mut S,
        frame: &S::Frame,
    ) -> Option<(HandLandmarks, PinchState)> {
        let size = source.frame_size(frame);
        let hand = source.locate(frame)?;
        let state = self.measure(&hand, size);
        Some((hand, state))
    }

    /// Measure the pinch for an already located hand.
    pub fn measure(&self, hand: &HandLandmarks, size: FrameSize) -> PinchState {
        let thumb_pos = hand.pixel(THUMB_TIP, size);
        let index_pos = hand.pixel(INDEX_TIP, size);
        let distance = thumb_pos.distance_to(index_pos);

        PinchState {
            is_pinching: distance < self.threshold,
            position: thumb_pos.midpoint(index_pos),
            distance,
            confidence: pinch_confidence(distance, self.threshold),
            thumb_pos,
            index_pos,
            finger_positions: FingerPositions::from_hand(hand, size),
        }
    }
}

/// Map a camera pixel position into a workspace rectangle.
pub fn camera_to_workspace(camera_pos: Position, camera_size: FrameSize, workspace: Rect) -> Position {
    let norm_x = camera_pos.x as f64 / camera_size.width as f64;
    let norm_y = camera_pos.y as f64 / camera_size.height as f64;
    Position::new(
        (workspace.x as f64 + norm_x * workspace.width as f64) as i32,
        (workspace.y as f64 + norm_y * workspace.height as f64) as i32,
    )
}
