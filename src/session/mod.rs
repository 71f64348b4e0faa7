//! The per-frame pipeline.
//!
//! A [`Session`] ties the pieces together the way the desktop loop and the
//! web variant both use them. For every frame:
//!
//! 1. measure the pinch of the visible hand (if any)
//! 2. feed it to the [`InteractionController`]
//! 3. classify the finger pose and force every switch accordingly
//! 4. re-evaluate the circuit
//!
//! Everything is synchronous; one call finishes all work for its frame.

mod config;
mod snapshot;

pub use config::{SessionConfig, DEFAULT_TARGET_FPS};
pub use snapshot::CircuitSnapshot;

use serde::Deserialize;
use tracing::info;

use crate::circuit::Circuit;
use crate::gesture::{
    classify_fingers, FingerGesture, FrameSize, HandLandmarks, LandmarkSource, PinchDetector,
    PinchState,
};
use crate::interaction::{Interaction, InteractionController};
use crate::solver::{analyze_topology, CircuitCalculator, CircuitReport};

/// Keyboard commands of the desktop loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    /// `R`: clear all components and wires
    Reset,
    /// `ESC`: leave the loop
    Escape,
}

/// Application context: detector, controller, calculator and run flag.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    detector: PinchDetector,
    controller: InteractionController,
    calculator: CircuitCalculator,
    report: CircuitReport,
    pinch: Option<PinchState>,
    gesture: FingerGesture,
    last_event: Interaction,
    running: bool,
    frames: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    /// Create a stopped session over an empty circuit.
    pub fn new(config: SessionConfig) -> Self {
        let detector = PinchDetector::with_threshold(config.pinch_threshold);
        let controller =
            InteractionController::new(config.palette.clone(), config.connection_threshold);
        Self {
            config,
            detector,
            controller,
            calculator: CircuitCalculator::new(),
            report: CircuitReport::open(),
            pinch: None,
            gesture: FingerGesture::None,
            last_event: Interaction::None,
            running: false,
            frames: 0,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn detector(&self) -> &PinchDetector {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut PinchDetector {
        &mut self.detector
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn circuit(&self) -> &Circuit {
        self.controller.circuit()
    }

    /// Rounded figures from the last processed frame.
    pub fn report(&self) -> &CircuitReport {
        &self.report
    }

    /// Pinch measured on the last processed frame.
    pub fn pinch(&self) -> Option<&PinchState> {
        self.pinch.as_ref()
    }

    pub fn last_event(&self) -> Interaction {
        self.last_event
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        if !self.running {
            info!("stream started");
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            info!("stream stopped");
        }
        self.running = false;
    }

    /// Locate the hand in `frame` with `source` and run the pipeline.
    pub fn process<S: LandmarkSource>(&mut self, source: &mut S, frame: &S::Frame) -> Interaction {
        match self.detector.detect(source, frame) {
            Some((hand, pinch)) => self.advance(Some(&hand), Some(pinch)),
            None => self.advance(None, None),
        }
    }

    /// Run the pipeline for one frame whose landmarks are already known.
    ///
    /// `None` means no hand is visible; any gesture in progress is released.
    pub fn process_hand(&mut self, hand: Option<&HandLandmarks>, size: FrameSize) -> Interaction {
        let pinch = hand.map(|h| self.detector.measure(h, size));
        self.advance(hand, pinch)
    }

    fn advance(&mut self, hand: Option<&HandLandmarks>, pinch: Option<PinchState>) -> Interaction {
        self.frames += 1;
        self.pinch = pinch;
        self.last_event = self.controller.handle(self.pinch.as_ref());

        self.gesture = hand.map(classify_fingers).unwrap_or(FingerGesture::None);
        self.controller.apply_switch_command(self.gesture.switch_command());

        self.report = self.calculator.calculate(self.controller.circuit().components());
        self.last_event
    }

    /// Apply a keyboard command. Returns `false` once the loop should end.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Reset => self.reset(),
            Key::Escape => self.stop(),
        }
        self.running
    }

    /// Clear the circuit, drop any gesture in progress and re-evaluate.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.last_event = Interaction::None;
        self.report = self.calculator.calculate(self.controller.circuit().components());
    }

    /// View of the current state for rendering or serialisation.
    pub fn snapshot(&self) -> CircuitSnapshot<'_> {
        let circuit = self.controller.circuit();
        let connections = circuit.wires().connected_components();
        CircuitSnapshot {
            frame: self.frames,
            running: self.running,
            components: circuit.components(),
            wires: circuit.wires().all_wires().collect(),
            topology: analyze_topology(circuit.len(), &connections),
            connections,
            calculations: self.report,
            analysis: self.calculator.component_analysis(circuit.components()),
            interaction: self.controller.state(),
            event: self.last_event,
            pinch: self.pinch.as_ref(),
            gesture: self.gesture,
            selected: self.controller.palette().selected(),
        }
    }
}
