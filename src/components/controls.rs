//! Control components: Switch.

use std::fmt;

use serde::Serialize;

/// Position of a switch lever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SwitchState {
    On,
    #[default]
    Off,
}

impl SwitchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwitchState::On => "ON",
            SwitchState::Off => "OFF",
        }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-pole switch.
///
/// Any switch in the `Off` state opens the whole circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Switch {
    pub state: SwitchState,
}

impl Switch {
    /// Create a new switch.
    pub fn new(state: SwitchState) -> Self {
        Self { state }
    }

    /// Set the switch state.
    pub fn set_state(&mut self, state: SwitchState) {
        self.state = state;
    }

    /// Toggle the switch state.
    pub fn toggle(&mut self) {
        self.state = match self.state {
            SwitchState::On => SwitchState::Off,
            SwitchState::Off => SwitchState::On,
        };
    }

    /// Check whether the switch breaks the circuit.
    pub fn is_open(&self) -> bool {
        self.state == SwitchState::Off
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_off() {
        let sw = Switch::default();
        assert!(sw.is_open());
        assert_eq!(sw.state.to_string(), "OFF");
    }

    #[test]
    fn test_toggle() {
        let mut sw = Switch::default();
        sw.toggle();
        assert_eq!(sw.state, SwitchState::On);
        sw.toggle();
        assert_eq!(sw.state, SwitchState::Off);
    }

    #[test]
    fn test_serializes_uppercase() {
        let json = serde_json::to_string(&Switch::new(SwitchState::On)).unwrap();
        assert_eq!(json, r#"{"state":"ON"}"#);
    }
}
