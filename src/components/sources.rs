//! Voltage sources.

use serde::Serialize;

/// A DC battery.
///
/// Every battery on the canvas is treated as series-additive by the solver,
/// regardless of where it sits or how it is wired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Battery {
    pub voltage: f64,
}

impl Battery {
    /// Voltage of a freshly placed battery.
    pub const DEFAULT_VOLTAGE: f64 = 12.0;

    /// Create a new battery.
    pub fn new(voltage: f64) -> Self {
        Self { voltage }
    }
}

impl Default for Battery {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VOLTAGE)
    }
}
