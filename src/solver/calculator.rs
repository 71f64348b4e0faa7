//! Ohm's-law circuit evaluation.

use std::fmt;

use serde::Serialize;

use super::analysis::{analyze_component, ComponentAnalysis};
use super::round_to;
use crate::components::{Component, ComponentValue};

/// Shape of the evaluated circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CircuitType {
    Series,
    Parallel,
    /// Never produced by the current heuristics
    Mixed,
    #[default]
    Open,
}

impl CircuitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CircuitType::Series => "series",
            CircuitType::Parallel => "parallel",
            CircuitType::Mixed => "mixed",
            CircuitType::Open => "open",
        }
    }
}

impl fmt::Display for CircuitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Totals for the whole circuit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CircuitReport {
    /// Volts
    pub voltage: f64,
    /// Amperes
    pub current: f64,
    /// Ohms
    pub resistance: f64,
    /// Watts
    pub power: f64,
    pub circuit_type: CircuitType,
}

impl CircuitReport {
    /// All-zero open circuit.
    pub fn open() -> Self {
        Self::default()
    }

    /// Apply Ohm's law to a total voltage and resistance.
    ///
    /// Non-positive resistance yields zero current and power.
    pub(crate) fn from_totals(voltage: f64, resistance: f64, circuit_type: CircuitType) -> Self {
        let current = if resistance > 0.0 { voltage / resistance } else { 0.0 };
        Self {
            voltage,
            current,
            resistance,
            power: voltage * current,
            circuit_type,
        }
    }

    /// Display precision: two decimals, three for current.
    pub fn rounded(&self) -> Self {
        Self {
            voltage: round_to(self.voltage, 2),
            current: round_to(self.current, 3),
            resistance: round_to(self.resistance, 2),
            power: round_to(self.power, 2),
            circuit_type: self.circuit_type,
        }
    }

    pub fn is_open(&self) -> bool {
        self.circuit_type == CircuitType::Open
    }
}

/// Evaluates the placed components and remembers the last result.
///
/// The model is deliberately naive: every battery on the canvas adds to the
/// source voltage and every resistor or lamp adds to the load, wherever they
/// sit and whether or not any wire joins them. An OFF switch anywhere opens
/// the whole circuit.
#[derive(Debug, Clone, Default)]
pub struct CircuitCalculator {
    last: CircuitReport,
}

impl CircuitCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate `components` and return the rounded report.
    pub fn calculate(&mut self, components: &[Component]) -> CircuitReport {
        self.last = Self::totals(components);
        self.last.rounded()
    }

    fn totals(components: &[Component]) -> CircuitReport {
        let mut voltage = 0.0;
        let mut resistance = 0.0;
        let mut has_battery = false;
        let mut has_load = false;

        for component in components {
            match &component.value {
                ComponentValue::Switch(sw) if sw.is_open() => return CircuitReport::open(),
                ComponentValue::Battery(b) => {
                    has_battery = true;
                    voltage += b.voltage;
                }
                value => {
                    if let Some(r) = value.resistance() {
                        has_load = true;
                        resistance += r;
                    }
                }
            }
        }

        if !has_battery || !has_load || resistance <= 0.0 {
            return CircuitReport::open();
        }
        CircuitReport::from_totals(voltage, resistance, CircuitType::Series)
    }

    /// Unrounded result of the last evaluation.
    pub fn last(&self) -> &CircuitReport {
        &self.last
    }

    /// Unrounded current of the last evaluation, in amperes.
    pub fn current(&self) -> f64 {
        self.last.current
    }

    /// Per-component figures using the last evaluated current.
    ///
    /// Wire markers are skipped.
    pub fn component_analysis(&self, components: &[Component]) -> Vec<ComponentAnalysis> {
        components
            .iter()
            .filter_map(|c| analyze_component(c, self.last.current))
            .collect()
    }
}

/// One-shot evaluation of `components`, rounded for display.
pub fn evaluate(components: &[Component]) -> CircuitReport {
    CircuitCalculator::new().calculate(components)
}
