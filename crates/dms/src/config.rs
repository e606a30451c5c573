//! DMS configuration

use serde::{Deserialize, Serialize};

use crate::DmsError;

/// Debounce and cooldown settings for one alert class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Frames the condition must hold before the first alert
    pub required_consecutive_frames: u32,
    /// Minimum seconds between two alerts of this class
    pub cooldown_seconds: f64,
}

impl DebounceConfig {
    pub fn new(required_consecutive_frames: u32, cooldown_seconds: f64) -> Self {
        Self {
            required_consecutive_frames,
            cooldown_seconds,
        }
    }

    pub fn validate(&self, name: &str) -> Result<(), DmsError> {
        if self.required_consecutive_frames == 0 {
            return Err(DmsError::Config(format!(
                "{name}: required_consecutive_frames must be at least 1"
            )));
        }
        if !self.cooldown_seconds.is_finite() || self.cooldown_seconds < 0.0 {
            return Err(DmsError::Config(format!(
                "{name}: cooldown_seconds must be a non-negative number, got {}",
                self.cooldown_seconds
            )));
        }
        Ok(())
    }
}

/// DMS configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DmsConfig {
    /// Mean EAR below this counts as eyes closed
    pub ear_threshold: f64,

    /// MAR above this counts as yawning
    pub mar_threshold: f64,

    pub drowsiness: DebounceConfig,

    pub yawning: DebounceConfig,
}

impl Default for DmsConfig {
    fn default() -> Self {
        Self {
            ear_threshold: 0.25,
            mar_threshold: 0.55,
            drowsiness: DebounceConfig::new(20, 5.0),
            yawning: DebounceConfig::new(15, 5.0),
        }
    }
}

impl DmsConfig {
    pub fn validate(&self) -> Result<(), DmsError> {
        for (name, value) in [("ear_threshold", self.ear_threshold), ("mar_threshold", self.mar_threshold)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DmsError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        self.drowsiness.validate("drowsiness")?;
        self.yawning.validate("yawning")
    }
}
