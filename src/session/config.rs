//! Session configuration.

use std::time::Duration;

use crate::circuit::DEFAULT_CONNECTION_THRESHOLD;
use crate::gesture::{FrameSize, DEFAULT_PINCH_THRESHOLD, MAX_PINCH_THRESHOLD, MIN_PINCH_THRESHOLD};
use crate::interaction::Palette;

/// Frame rate of the desktop loop.
pub const DEFAULT_TARGET_FPS: u32 = 30;

/// Configuration for a [`Session`](super::Session).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Camera frame size used to denormalize landmarks.
    pub frame_size: FrameSize,
    /// Thumb-to-index distance (pixels) below which a pinch registers.
    pub pinch_threshold: f64,
    /// Wire endpoint attach distance (pixels).
    pub connection_threshold: f64,
    /// Frames per second for paced loops.
    pub target_fps: u32,
    pub palette: Palette,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_size: FrameSize::default(),
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
            connection_threshold: DEFAULT_CONNECTION_THRESHOLD,
            target_fps: DEFAULT_TARGET_FPS,
            palette: Palette::standard(),
        }
    }
}

impl SessionConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame_size(mut self, frame_size: FrameSize) -> Self {
        self.frame_size = frame_size;
        self
    }

    /// Set the pinch threshold (clamped to [10, 100] pixels).
    ///
    /// Lower values need a tighter pinch; higher values trigger more easily
    /// but also fire on a loosely curled hand.
    pub fn with_pinch_threshold(mut self, threshold: f64) -> Self {
        self.pinch_threshold = threshold.clamp(MIN_PINCH_THRESHOLD, MAX_PINCH_THRESHOLD);
        self
    }

    pub fn with_connection_threshold(mut self, threshold: f64) -> Self {
        self.connection_threshold = threshold;
        self
    }

    /// Set the target frame rate. Zero is treated as one.
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps.max(1);
        self
    }

    /// Time budget of one frame at the target rate.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.target_fps.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::new();
        assert_eq!(config.frame_size, FrameSize::default());
        assert_eq!(config.pinch_threshold, 40.0);
        assert_eq!(config.connection_threshold, 30.0);
        assert_eq!(config.target_fps, 30);
        assert_eq!(config.palette.panel_height(), 120);
    }

    #[test]
    fn test_builders_clamp() {
        let config = SessionConfig::new()
            .with_pinch_threshold(500.0)
            .with_target_fps(0)
            .with_connection_threshold(45.0);
        assert_eq!(config.pinch_threshold, 100.0);
        assert_eq!(config.target_fps, 1);
        assert_eq!(config.connection_threshold, 45.0);
        assert_eq!(SessionConfig::new().with_pinch_threshold(2.0).pinch_threshold, 10.0);
    }

    #[test]
    fn test_frame_interval() {
        assert_eq!(SessionConfig::new().frame_interval(), Duration::from_nanos(33_333_333));
        assert_eq!(
            SessionConfig::new().with_target_fps(50).frame_interval(),
            Duration::from_millis(20)
        );
    }
}
