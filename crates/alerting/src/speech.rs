//! Spoken alert output

use tracing::info;

use crate::AlertError;

/// Text-to-speech backend. `speak` blocks until the utterance finishes.
pub trait SpeechSink: Send + Sync {
    fn speak(&self, message: &str) -> Result<(), AlertError>;
}

/// Speech stand-in that writes the utterance to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSpeech;

impl SpeechSink for ConsoleSpeech {
    fn speak(&self, message: &str) -> Result<(), AlertError> {
        info!("[Voice Alert]: {}", message);
        Ok(())
    }
}
