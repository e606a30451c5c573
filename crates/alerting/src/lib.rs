//! Alerting System
//!
//! Delivers DMS alert events to the driver: a timed on-screen banner, a
//! spoken message on a background task, and one line in the alert log.

mod banner;
mod dispatcher;
mod log;
mod speech;

pub use banner::AlertBanner;
pub use dispatcher::{AlertDispatcher, DispatchSummary};
pub use log::{AlertLog, NO_ALERTS_MESSAGE, NO_LOG_FILE_MESSAGE};
pub use speech::{ConsoleSpeech, SpeechSink};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Alerting errors
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("Alert log I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Speech failed: {0}")]
    Speech(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Alert delivery configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertingConfig {
    /// Append-only alert log
    pub log_path: PathBuf,
    /// How long the banner stays visible (seconds)
    pub banner_seconds: f64,
    /// Speak alert messages
    pub speech_enabled: bool,
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("alert_log.txt"),
            banner_seconds: 3.0,
            speech_enabled: true,
        }
    }
}

impl AlertingConfig {
    pub fn banner_duration(&self) -> Result<Duration, AlertError> {
        Duration::try_from_secs_f64(self.banner_seconds)
            .map_err(|e| AlertError::Config(format!("banner_seconds {}: {}", self.banner_seconds, e)))
    }
}
