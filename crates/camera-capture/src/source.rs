//! Frame acquisition interface

use std::collections::VecDeque;
use std::time::Instant;

use tracing::debug;

use crate::{CameraError, VideoFrame};

/// Blocking source of video frames.
///
/// `Ok(None)` means the stream ended normally; `Err` means the device failed.
/// Both end the acquisition loop.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, CameraError>;
}

/// Monotonic capture clock, counting from its creation
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }

    /// Elapsed nanoseconds since the clock was created
    pub fn now_ns(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }

    /// Elapsed fractional seconds since the clock was created
    pub fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory frame source, yielding queued results in order
#[derive(Debug, Default)]
pub struct VecSource {
    queue: VecDeque<Result<VideoFrame, CameraError>>,
}

impl VecSource {
    pub fn new(frames: impl IntoIterator<Item = VideoFrame>) -> Self {
        Self {
            queue: frames.into_iter().map(Ok).collect(),
        }
    }

    /// Queue a device failure after the frames already queued
    pub fn push_failure(&mut self, error: CameraError) {
        self.queue.push_back(Err(error));
    }
}

impl FrameSource for VecSource {
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, CameraError> {
        match self.queue.pop_front() {
            Some(Ok(frame)) => {
                debug!("Replaying frame {}", frame.sequence);
                Ok(Some(frame))
            }
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }
}
