//! Per-component figures derived from the circuit current.

use serde::Serialize;

use super::round_to;
use crate::circuit::ComponentId;
use crate::components::{Component, ComponentValue, SwitchState};

/// Figures for one placed component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentAnalysis {
    pub id: ComponentId,
    #[serde(flatten)]
    pub detail: AnalysisDetail,
}

/// Kind-specific figures, rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnalysisDetail {
    Battery {
        voltage: f64,
    },
    Resistor {
        resistance: f64,
        voltage_drop: f64,
        power: f64,
    },
    Lamp {
        resistance: f64,
        voltage_drop: f64,
        power: f64,
        /// Percent of full brightness
        brightness: f64,
    },
    Switch {
        state: SwitchState,
    },
}

impl AnalysisDetail {
    pub fn description(&self) -> &'static str {
        match self {
            AnalysisDetail::Battery { .. } => "Supplies electrical energy",
            AnalysisDetail::Resistor { .. } => "Limits the flow of current",
            AnalysisDetail::Lamp { .. } => "Turns electrical energy into light",
            AnalysisDetail::Switch { .. } => "Opens or closes the circuit",
        }
    }
}

/// Figures for `component` at the given series current.
///
/// Wire markers carry nothing to analyse and yield `None`.
pub fn analyze_component(component: &Component, current: f64) -> Option<ComponentAnalysis> {
    let detail = match &component.value {
        ComponentValue::Battery(b) => AnalysisDetail::Battery { voltage: b.voltage },
        ComponentValue::Resistor(r) => AnalysisDetail::Resistor {
            resistance: r.resistance,
            voltage_drop: round_to(r.voltage_drop(current), 2),
            power: round_to(r.power(current), 2),
        },
        ComponentValue::Lamp(l) => AnalysisDetail::Lamp {
            resistance: l.resistance,
            voltage_drop: round_to(l.voltage_drop(current), 2),
            power: round_to(l.power(current), 2),
            brightness: round_to(l.brightness(current), 0),
        },
        ComponentValue::Switch(sw) => AnalysisDetail::Switch { state: sw.state },
        ComponentValue::Wire(_) => return None,
    };
    Some(ComponentAnalysis {
        id: component.id,
        detail,
    })
}
