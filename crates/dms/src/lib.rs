//! Driver Monitoring System (DMS)
//!
//! Real-time driver state analysis from facial landmarks:
//! - Eye aspect ratio (prolonged eye closure / drowsiness)
//! - Mouth aspect ratio (sustained wide opening / yawning)
//! - Per-class debouncing and cooldown of alerts
//! - Frame-processing worker loop feeding an alert channel

pub mod analysis;
pub mod config;
pub mod debounce;
pub mod evaluator;
pub mod geometry;
pub mod landmarks;
pub mod monitor;

#[cfg(test)]
pub(crate) mod test_support;

pub use analysis::{AlertClass, AlertEvent, RatioSample};
pub use config::{DebounceConfig, DmsConfig};
pub use debounce::{AlertDebouncer, DebounceState};
pub use evaluator::FrameEvaluator;
pub use geometry::{eye_aspect_ratio, mouth_aspect_ratio, GeometryError};
pub use landmarks::{LandmarkProvider, LandmarkSet, Point2D, LANDMARK_COUNT};
pub use monitor::{DetectionLoop, LoopSummary, StopHandle, StopReason};

use camera_capture::CameraError;
use thiserror::Error;

/// DMS error types
#[derive(Error, Debug)]
pub enum DmsError {
    #[error("Degenerate landmark geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Landmark extraction failed: {0}")]
    Landmarks(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Frame acquisition failed: {0}")]
    Camera(#[from] CameraError),
}
