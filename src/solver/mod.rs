//! DC circuit evaluation.
//!
//! The main path is [`evaluate`] / [`CircuitCalculator`]: a single-loop
//! Ohm's-law model that sums every battery into one source and every
//! resistor and lamp into one series load. Wire connectivity is not
//! consulted.
//!
//! ```text
//! V = sum(battery voltages)
//! R = sum(resistor and lamp resistances)
//! I = V / R        (0 when R <= 0)
//! P = V * I
//! ```
//!
//! [`calculate_series`], [`calculate_parallel`] and [`analyze_topology`] are
//! standalone helpers for explicitly wired networks; per-component figures
//! come from [`analyze_component`].

mod analysis;
mod calculator;
mod networks;

pub use analysis::{analyze_component, AnalysisDetail, ComponentAnalysis};
pub use calculator::{evaluate, CircuitCalculator, CircuitReport, CircuitType};
pub use networks::{analyze_topology, calculate_parallel, calculate_series};

/// Round `value` to `decimals` places, halves away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.12345, 3), 0.123);
        assert_eq!(round_to(1.4449, 2), 1.44);
        assert_eq!(round_to(19.6, 0), 20.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
    }
}
