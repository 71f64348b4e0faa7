//! Alternative network reductions.
//!
//! Neither routine is used by [`evaluate`](super::evaluate); they give the
//! figures the same components would produce if explicitly wired in series
//! or in parallel.

use super::calculator::{CircuitReport, CircuitType};
use crate::circuit::ComponentLink;
use crate::components::{Component, ComponentValue};

fn sources(components: &[Component]) -> impl Iterator<Item = f64> + '_ {
    components.iter().filter_map(|c| match c.value {
        ComponentValue::Battery(b) => Some(b.voltage),
        _ => None,
    })
}

fn loads(components: &[Component]) -> impl Iterator<Item = f64> + '_ {
    components.iter().filter_map(|c| c.value.resistance())
}

/// Every battery and every load in one loop.
pub fn calculate_series(components: &[Component]) -> CircuitReport {
    if sources(components).next().is_none() || loads(components).next().is_none() {
        return CircuitReport::open();
    }
    let voltage: f64 = sources(components).sum();
    let resistance: f64 = loads(components).sum();
    if resistance <= 0.0 {
        return CircuitReport {
            voltage,
            ..CircuitReport::open()
        };
    }
    CircuitReport::from_totals(voltage, resistance, CircuitType::Series).rounded()
}

/// Every load across the highest battery voltage.
///
/// Loads with non-positive resistance are left out of the reciprocal sum.
pub fn calculate_parallel(components: &[Component]) -> CircuitReport {
    let Some(voltage) = sources(components).reduce(f64::max) else {
        return CircuitReport::open();
    };
    if loads(components).next().is_none() {
        return CircuitReport::open();
    }
    let reciprocal: f64 = loads(components).filter(|r| *r > 0.0).map(|r| 1.0 / r).sum();
    if reciprocal == 0.0 {
        return CircuitReport {
            voltage,
            ..CircuitReport::open()
        };
    }
    CircuitReport::from_totals(voltage, 1.0 / reciprocal, CircuitType::Parallel).rounded()
}

/// Guess the topology from the number of fully connected wires.
///
/// Only counts links; which components they join is not inspected.
pub fn analyze_topology(component_count: usize, links: &[ComponentLink]) -> CircuitType {
    if links.is_empty() {
        CircuitType::Open
    } else if links.len() + 1 == component_count {
        CircuitType::Series
    } else {
        CircuitType::Parallel
    }
}
