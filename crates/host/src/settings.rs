//! Layered host settings: defaults, optional TOML file, environment

use std::path::Path;

use alerting::AlertingConfig;
use config::{Config, ConfigError, Environment, File};
use dms::DmsConfig;
use serde::{Deserialize, Serialize};

/// Settings file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "drowsiness";

/// Environment prefix, e.g. `DROWSY__DETECTION__EAR_THRESHOLD=0.22`
pub const ENV_PREFIX: &str = "DROWSY";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// All host settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub detection: DmsConfig,
    pub alerts: AlertingConfig,
    pub logging: LoggingConfig,
}

impl Settings {
    /// Load settings. An explicit `path` must exist; the default file is optional.
    ///
    /// Every layer merges field by field onto the defaults, so a file or
    /// environment variable may override a single nested key.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[detection]
ear_threshold = 0.22

[detection.yawning]
required_consecutive_frames = 10
cooldown_seconds = 8.0

[alerts]
log_path = "/var/log/dms/alerts.txt"
speech_enabled = false
"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.detection.ear_threshold, 0.22);
        assert_eq!(settings.detection.mar_threshold, 0.55);
        assert_eq!(settings.detection.yawning.required_consecutive_frames, 10);
        assert_eq!(settings.detection.yawning.cooldown_seconds, 8.0);
        assert_eq!(settings.detection.drowsiness.required_consecutive_frames, 20);
        assert_eq!(settings.alerts.log_path, Path::new("/var/log/dms/alerts.txt"));
        assert!(!settings.alerts.speech_enabled);
        assert_eq!(settings.alerts.banner_seconds, 3.0);
        assert_eq!(settings.logging, LoggingConfig::default());
    }

    #[test]
    fn test_single_keys_merge_onto_class_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[detection.yawning]\ncooldown_seconds = 8.5").unwrap();
        // No other test asserts the drowsiness cooldown.
        std::env::set_var("DROWSY__DETECTION__DROWSINESS__COOLDOWN_SECONDS", "9.5");

        let settings = Settings::load(Some(file.path())).unwrap();
        std::env::remove_var("DROWSY__DETECTION__DROWSINESS__COOLDOWN_SECONDS");

        assert_eq!(settings.detection.yawning.cooldown_seconds, 8.5);
        assert_eq!(settings.detection.yawning.required_consecutive_frames, 15);
        assert_eq!(settings.detection.drowsiness.cooldown_seconds, 9.5);
        assert_eq!(settings.detection.drowsiness.required_consecutive_frames, 20);
        assert_eq!(settings.detection.ear_threshold, 0.25);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
