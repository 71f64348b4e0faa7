//! Resistive loads: Resistor and Lamp.
//!
//! A lamp is modelled exactly like a resistor for calculation purposes; it
//! only adds a brightness estimate for display.

use serde::Serialize;

/// A fixed resistor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Resistor {
    pub resistance: f64,
}

impl Resistor {
    /// Resistance of a freshly placed resistor, in ohms.
    pub const DEFAULT_RESISTANCE: f64 = 100.0;

    /// Create a new resistor.
    pub fn new(resistance: f64) -> Self {
        Self { resistance }
    }

    /// Voltage across this resistor for a given series current.
    pub fn voltage_drop(&self, current: f64) -> f64 {
        current * self.resistance
    }

    /// Power dissipated for a given series current (I^2 * R).
    pub fn power(&self, current: f64) -> f64 {
        current * current * self.resistance
    }
}

impl Default for Resistor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RESISTANCE)
    }
}

/// An incandescent lamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lamp {
    pub resistance: f64,
}

impl Lamp {
    /// Resistance of a freshly placed lamp, in ohms.
    pub const DEFAULT_RESISTANCE: f64 = 50.0;

    /// Power at which the lamp is drawn at full brightness, in watts.
    pub const FULL_BRIGHTNESS_POWER: f64 = 10.0;

    /// Create a new lamp.
    pub fn new(resistance: f64) -> Self {
        Self { resistance }
    }

    /// Voltage across the lamp for a given series current.
    pub fn voltage_drop(&self, current: f64) -> f64 {
        current * self.resistance
    }

    /// Power dissipated for a given series current.
    pub fn power(&self, current: f64) -> f64 {
        current * current * self.resistance
    }

    /// Brightness in percent, saturating at 100.
    pub fn brightness(&self, current: f64) -> f64 {
        (self.power(current) / Self::FULL_BRIGHTNESS_POWER * 100.0).min(100.0)
    }
}

impl Default for Lamp {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RESISTANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_resistor_drop_and_power() {
        let r = Resistor::default();
        assert_relative_eq!(r.voltage_drop(0.12), 12.0);
        assert_relative_eq!(r.power(0.12), 1.44, epsilon = 1e-12);
    }

    #[test]
    fn test_lamp_brightness_saturates() {
        let lamp = Lamp::default();
        // 0.2 A through 50 ohm = 2 W -> 20 %
        assert_relative_eq!(lamp.brightness(0.2), 20.0, epsilon = 1e-9);
        assert_relative_eq!(lamp.brightness(5.0), 100.0);
    }
}
