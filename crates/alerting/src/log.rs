//! Append-only alert log

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use dms::{AlertClass, AlertEvent};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::AlertError;

/// Shown by `AlertLog::view` when the log file does not exist
pub const NO_LOG_FILE_MESSAGE: &str = "No log file found.";
/// Shown by `AlertLog::view` when the log file is empty
pub const NO_ALERTS_MESSAGE: &str = "No alerts logged yet.";

/// One line per fired alert, stamped with local wall-clock time
#[derive(Debug, Clone)]
pub struct AlertLog {
    path: PathBuf,
}

impl AlertLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `[YYYY-MM-DD HH:MM:SS] <Class> Alert Triggered`
    pub fn format_line(class: AlertClass, at: DateTime<Local>) -> String {
        format!("[{}] {} Alert Triggered", at.format("%Y-%m-%d %H:%M:%S"), class.name())
    }

    /// Append a line for `event`, stamped now
    pub async fn append(&self, event: &AlertEvent) -> Result<(), AlertError> {
        self.append_at(event.class, Local::now()).await
    }

    pub async fn append_at(&self, class: AlertClass, at: DateTime<Local>) -> Result<(), AlertError> {
        let mut line = Self::format_line(class, at);
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        debug!("Alert logged to {}: {}", self.path.display(), line.trim_end());
        Ok(())
    }

    /// Full log contents, `None` if nothing has been logged to this path yet
    pub async fn read(&self) -> Result<Option<String>, AlertError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Log contents for display, with messages for the missing and empty cases
    pub async fn view(&self) -> Result<String, AlertError> {
        Ok(match self.read().await? {
            None => NO_LOG_FILE_MESSAGE.to_string(),
            Some(contents) if contents.trim().is_empty() => NO_ALERTS_MESSAGE.to_string(),
            Some(contents) => contents,
        })
    }
}
