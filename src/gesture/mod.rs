//! Hand gesture recognition.
//!
//! This module turns one hand's normalized landmarks into the two signals
//! the interaction layer needs:
//!
//! - [`PinchState`]: thumb/index pinch measured in pixel space, the primary
//!   "grab" action
//! - [`FingerGesture`]: index-only / peace-sign poses, used to drive switches
//!
//! Landmark extraction itself happens outside the crate behind the
//! [`LandmarkSource`] trait.

mod classify;
pub mod landmarks;
mod pinch;

pub use classify::{classify_fingers, FingerGesture, SwitchCommand};
pub use landmarks::{
    FrameSize, HandLandmarks, Landmark, LandmarkSource, PreTracked, TrackedFrame, LANDMARK_COUNT,
};
pub use pinch::{
    camera_to_workspace, pinch_confidence, FingerPositions, PinchDetector, PinchState,
    DEFAULT_PINCH_THRESHOLD, MAX_PINCH_THRESHOLD, MIN_PINCH_THRESHOLD,
};
