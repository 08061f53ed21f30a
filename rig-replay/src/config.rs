//! Replay configuration.

use crate::error::ReplayError;
use serde::Deserialize;
use std::time::Duration;

/// Playback settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Playback speed multiplier: 1.0 reproduces the recorded cadence,
    /// 2.0 plays twice as fast.
    pub speed: f64,
    /// Emissions later than this past their deadline are logged as warnings.
    pub late_warning_ms: u64,
}

impl ReplayConfig {
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn late_warning(&self) -> Duration {
        Duration::from_millis(self.late_warning_ms)
    }

    pub fn validate(&self) -> Result<(), ReplayError> {
        if self.speed.is_finite() && self.speed > 0.0 {
            Ok(())
        } else {
            Err(ReplayError::InvalidSpeed(self.speed))
        }
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            late_warning_ms: 50,
        }
    }
}
