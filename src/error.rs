//! Error types for the gesture circuit builder.
//!
//! This module provides a unified error type [`CircuitCvError`] that covers
//! all error conditions that can occur while reading hand-tracking input,
//! driving the interaction pipeline and writing circuit snapshots.
//!
//! A missing hand is not an error: detection returns `None` for it. Division
//! by zero resistance is guarded inside the solver and never surfaces here.

use thiserror::Error;

/// Result type alias using [`CircuitCvError`].
pub type Result<T> = std::result::Result<T, CircuitCvError>;

/// Unified error type for all circuit builder operations.
#[derive(Error, Debug)]
pub enum CircuitCvError {
    // ============ Landmark / Frame Errors ============
    /// A hand was reported with the wrong number of keypoints
    #[error("Expected {expected} hand landmarks, found {found}")]
    InvalidLandmarks { expected: usize, found: usize },

    /// A keypoint is not finite or lies far outside the frame
    #[error("Landmark {index} out of range: ({x}, {y})")]
    LandmarkOutOfRange { index: usize, x: f32, y: f32 },

    /// Frame dimensions cannot be used to denormalize landmarks
    #[error("Invalid frame size {width}x{height}")]
    InvalidFrameSize { width: u32, height: u32 },

    /// Malformed line on the frame input stream
    #[error("Frame parse error at line {line}: {message}")]
    FrameParse { line: usize, message: String },

    // ============ Source Errors ============
    /// The landmark source (camera + tracker) could not be opened
    #[error("Landmark source unavailable: {message}")]
    SourceUnavailable { message: String },

    // ============ I/O Errors ============
    /// Error reading frame input
    #[error("Frame input error: {message}")]
    InputError { message: String },

    /// Error writing snapshot output
    #[error("Snapshot output error: {message}")]
    OutputError { message: String },

    /// Snapshot (de)serialisation failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl CircuitCvError {
    /// Create a frame parse error
    pub fn frame_parse(line: usize, message: impl Into<String>) -> Self {
        Self::FrameParse {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid landmark count error
    pub fn invalid_landmarks(found: usize) -> Self {
        Self::InvalidLandmarks {
            expected: crate::gesture::LANDMARK_COUNT,
            found,
        }
    }
}
