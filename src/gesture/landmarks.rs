//! Hand landmark storage and the landmark source seam.

use serde::{Deserialize, Serialize};

use crate::circuit::Position;
use crate::error::{CircuitCvError, Result};

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Number of keypoints reported per hand.
pub const LANDMARK_COUNT: usize = 21;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Largest accepted magnitude of a normalized coordinate.
///
/// Trackers report points slightly outside the frame for a partly visible
/// hand, so the bound is loose.
pub const MAX_LANDMARK_COORD: f32 = 4.0;

/// One keypoint in normalized image coordinates (0..1, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Denormalize against a frame, truncating toward zero.
    pub fn to_pixels(&self, size: FrameSize) -> Position {
        Position::new(
            (self.x * size.width as f32) as i32,
            (self.y * size.height as f32) as i32,
        )
    }
}

fn in_range(v: f32) -> bool {
    v.is_finite() && v.abs() <= MAX_LANDMARK_COORD
}

/// The 21 keypoints of a single tracked hand.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build from `[x, y]` pairs; extra trailing values per point (z) are ignored.
    ///
    /// Non-finite coordinates and coordinates beyond [`MAX_LANDMARK_COORD`]
    /// are rejected.
    pub fn from_pairs<P: AsRef<[f32]>>(pairs: &[P]) -> Result<Self> {
        if pairs.len() != LANDMARK_COUNT {
            return Err(CircuitCvError::invalid_landmarks(pairs.len()));
        }
        let mut points = [Landmark::default(); LANDMARK_COUNT];
        for (index, (slot, pair)) in points.iter_mut().zip(pairs).enumerate() {
            let (x, y) = match pair.as_ref() {
                [x, y, ..] => (*x, *y),
                _ => return Err(CircuitCvError::invalid_landmarks(pairs.len())),
            };
            if !in_range(x) || !in_range(y) {
                return Err(CircuitCvError::LandmarkOutOfRange { index, x, y });
            }
            *slot = Landmark::new(x, y);
        }
        Ok(Self { points })
    }

    /// Build from a flat `x0, y0, x1, y1, ...` buffer of 42 floats.
    pub fn from_flat(values: &[f32]) -> Result<Self> {
        if values.len() != LANDMARK_COUNT * 2 {
            return Err(CircuitCvError::invalid_landmarks(values.len() / 2));
        }
        let pairs: Vec<&[f32]> = values.chunks_exact(2).collect();
        Self::from_pairs(&pairs)
    }

    /// Keypoint by index (see the `*_TIP` / `*_MCP` constants).
    pub fn get(&self, idx: usize) -> Landmark {
        self.points[idx]
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }

    /// Pixel position of a keypoint.
    pub fn pixel(&self, idx: usize, size: FrameSize) -> Position {
        self.points[idx].to_pixels(size)
    }
}

/// Dimensions of a camera frame in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    /// Create a frame size, rejecting empty frames.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CircuitCvError::InvalidFrameSize { width, height });
        }
        Ok(Self { width, height })
    }
}

impl Default for FrameSize {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

// ============================================================================
// LANDMARK SOURCE
// ============================================================================

/// Anything that can find a hand in a camera frame.
///
/// Returning `None` means no hand is visible, which is a normal state and
/// not an error.
pub trait LandmarkSource {
    type Frame;

    /// Pixel dimensions of `frame`.
    fn frame_size(&self, frame: &Self::Frame) -> FrameSize;

    /// Locate at most one hand in `frame`.
    fn locate(&mut self, frame: &Self::Frame) -> Option<HandLandmarks>;
}

/// A frame whose landmarks were already extracted upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedFrame {
    pub size: FrameSize,
    pub hand: Option<HandLandmarks>,
}

/// Pass-through source for frames tracked by an external process.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreTracked;

impl LandmarkSource for PreTracked {
    type Frame = TrackedFrame;

    fn frame_size(&self, frame: &TrackedFrame) -> FrameSize {
        frame.size
    }

    fn locate(&mut self, frame: &TrackedFrame) -> Option<HandLandmarks> {
        frame.hand.clone()
    }
}
