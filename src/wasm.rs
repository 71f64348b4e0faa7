//! WASM bindings for the circuit builder.
//!
//! The browser runs hand tracking itself (for example MediaPipe Hands in
//! JavaScript) and hands the landmarks of each video frame to the builder.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuitBuilder } from 'circuit_cv';
//!
//! await init();
//!
//! const builder = new WasmCircuitBuilder(video.videoWidth, video.videoHeight);
//! builder.start_stream();
//!
//! hands.onResults((results) => {
//!   const hand = results.multiHandLandmarks?.[0];
//!   const flat = hand ? new Float32Array(hand.flatMap((p) => [p.x, p.y])) : new Float32Array();
//!   const snapshot = JSON.parse(builder.process_frame(flat));
//!   render(snapshot);
//! });
//! ```

use wasm_bindgen::prelude::*;

use crate::error::CircuitCvError;
use crate::gesture::{FrameSize, HandLandmarks};
use crate::session::{Session, SessionConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: CircuitCvError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// JavaScript happily passes NaN or Infinity where a number is expected.
fn finite(name: &str, value: f64) -> Result<f64, CircuitCvError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CircuitCvError::WasmError {
            message: format!("{name} must be a finite number, got {value}"),
        })
    }
}

/// Gesture circuit builder for the browser.
///
/// Mirrors the web demo's endpoints: `start_stream` / `stop_stream` toggle
/// frame processing and `circuit_data` returns the current snapshot.
#[wasm_bindgen]
pub struct WasmCircuitBuilder {
    session: Session,
    size: FrameSize,
}

#[wasm_bindgen]
impl WasmCircuitBuilder {
    /// Create a stopped builder for video frames of the given size.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<WasmCircuitBuilder, JsValue> {
        let size = FrameSize::new(width, height).map_err(to_js)?;
        let session = Session::new(SessionConfig::new().with_frame_size(size));
        Ok(WasmCircuitBuilder { session, size })
    }

    /// Create a builder with custom pinch and connection thresholds.
    #[wasm_bindgen]
    pub fn with_thresholds(
        width: u32,
        height: u32,
        pinch_threshold: f64,
        connection_threshold: f64,
    ) -> Result<WasmCircuitBuilder, JsValue> {
        let size = FrameSize::new(width, height).map_err(to_js)?;
        let pinch_threshold = finite("pinch_threshold", pinch_threshold).map_err(to_js)?;
        let connection_threshold =
            finite("connection_threshold", connection_threshold).map_err(to_js)?;
        let config = SessionConfig::new()
            .with_frame_size(size)
            .with_pinch_threshold(pinch_threshold)
            .with_connection_threshold(connection_threshold);
        Ok(WasmCircuitBuilder {
            session: Session::new(config),
            size,
        })
    }

    /// Process one video frame and return the snapshot JSON.
    ///
    /// `landmarks` holds 42 floats (x, y per keypoint, normalized); an empty
    /// array means no hand is visible. While the stream is stopped the frame
    /// is ignored and the current snapshot is returned unchanged.
    #[wasm_bindgen]
    pub fn process_frame(&mut self, landmarks: &[f32]) -> Result<String, JsValue> {
        if self.session.is_running() {
            let hand = if landmarks.is_empty() {
                None
            } else {
                Some(HandLandmarks::from_flat(landmarks).map_err(to_js)?)
            };
            self.session.process_hand(hand.as_ref(), self.size);
        }
        self.circuit_data()
    }

    #[wasm_bindgen]
    pub fn start_stream(&mut self) {
        self.session.start();
    }

    #[wasm_bindgen]
    pub fn stop_stream(&mut self) {
        self.session.stop();
    }

    #[wasm_bindgen(getter)]
    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Current components and calculations as JSON.
    #[wasm_bindgen]
    pub fn circuit_data(&self) -> Result<String, JsValue> {
        self.session
            .snapshot()
            .to_json()
            .map_err(|e| to_js(CircuitCvError::from(e)))
    }

    /// Clear every component and wire (the `R` key).
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Change the pinch threshold (clamped to [10, 100] pixels).
    #[wasm_bindgen]
    pub fn set_pinch_threshold(&mut self, threshold: f64) -> Result<(), JsValue> {
        let threshold = finite("pinch_threshold", threshold).map_err(to_js)?;
        self.session.detector_mut().set_threshold(threshold);
        Ok(())
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_thresholds() {
        assert_eq!(finite("pinch_threshold", 40.0).unwrap(), 40.0);
        match finite("pinch_threshold", f64::NAN) {
            Err(CircuitCvError::WasmError { message }) => {
                assert!(message.starts_with("pinch_threshold"))
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(finite("connection_threshold", f64::INFINITY).is_err());
    }
}
