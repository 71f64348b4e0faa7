//! # Circuit CV
//!
//! A gesture-driven builder for simple DC circuits.
//!
//! A student pinches component types out of a palette at the top of the
//! camera view, drops them into the workspace, moves them, drags them back
//! to the palette to delete them and stretches wires between them. Finger
//! poses flip every switch at once. After every frame the circuit is
//! re-evaluated with Ohm's law.
//!
//! This library provides:
//! - Pinch and finger-pose recognition from 21 hand landmarks
//! - An explicit interaction state machine over a component/wire model
//! - A deliberately simple Ohm's-law calculator with per-component figures
//! - A line-oriented JSON frame pipeline (CLI) and browser bindings (WASM)
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`gesture`] - Hand landmarks, pinch detection, finger-pose classification
//! - [`components`] - Component kinds and their values (battery, resistor, lamp, switch)
//! - [`circuit`] - The placed-component model and the wire system
//! - [`interaction`] - Palette layout and the pinch-driven controller
//! - [`solver`] - Circuit evaluation
//! - [`session`] - The per-frame pipeline and serialisable snapshots
//! - [`stream`] - Frame input and snapshot output (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! hand-tracker --json /dev/video0 | circuit-cv --paced > snapshots.jsonl
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmCircuitBuilder } from 'circuit_cv';
//!
//! const builder = new WasmCircuitBuilder(1280, 720);
//! builder.start_stream();
//! const snapshot = JSON.parse(builder.process_frame(landmarks));
//! ```
//!
//! ## Frame Pipeline
//!
//! For every camera frame:
//!
//! 1. Measure the thumb/index distance in pixels; below the threshold is a pinch
//! 2. Feed the pinch to the interaction controller (select, drag, drop, delete, wire)
//! 3. Classify the finger pose and force all switches ON or OFF
//! 4. Sum batteries and loads and apply Ohm's law

pub mod circuit;
pub mod components;
pub mod error;
pub mod gesture;
pub mod interaction;
pub mod session;
pub mod solver;

#[cfg(feature = "cli")]
pub mod stream;

// Re-export main types for convenience
pub use circuit::{Circuit, DEFAULT_CONNECTION_THRESHOLD};
pub use error::{CircuitCvError, Result};
pub use session::{CircuitSnapshot, Session, SessionConfig};
pub use solver::{evaluate, CircuitReport};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuitBuilder;

/// Frame rate of the desktop loop, in frames per second.
pub const TARGET_FPS: u32 = session::DEFAULT_TARGET_FPS;
