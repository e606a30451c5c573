//! Camera Capture Library for Driver Monitoring
//!
//! Provides the frame types and acquisition seam used by the DMS worker:
//! - `VideoFrame` decoded RGB frames stamped with capture time
//! - `FrameSource` blocking frame acquisition (live camera, replay, tests)
//! - `MonotonicClock` fractional-second capture timestamps

pub mod frame;
pub mod source;

pub use frame::VideoFrame;
pub use source::{FrameSource, MonotonicClock, VecSource};

use thiserror::Error;

/// Camera error types
#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Streaming error: {0}")]
    Stream(String),
}
