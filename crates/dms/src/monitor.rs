//! Frame-processing worker loop
//!
//! Runs acquisition, landmark extraction and evaluation sequentially on a
//! dedicated thread, forwarding alerts over a channel. The host consumes the
//! channel for display, speech and logging; nothing on that side touches the
//! debounce state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use camera_capture::FrameSource;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::analysis::AlertEvent;
use crate::evaluator::FrameEvaluator;
use crate::landmarks::LandmarkProvider;

/// Cooperative stop flag, checked once per frame
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `StopHandle::stop` was called
    Stopped,
    /// The frame source reported end of stream
    SourceExhausted,
    /// The frame source failed
    AcquisitionFailed,
    /// The alert receiver was dropped
    ConsumerClosed,
}

/// Counters reported when the loop ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub frames: u64,
    pub alerts: u64,
    /// Frames dropped because landmark extraction failed
    pub skipped_frames: u64,
    pub reason: StopReason,
}

/// Detection worker: source -> landmarks -> evaluator -> alert channel
pub struct DetectionLoop<S, P> {
    source: S,
    provider: P,
    evaluator: FrameEvaluator,
    stop: StopHandle,
}

impl<S: FrameSource, P: LandmarkProvider> DetectionLoop<S, P> {
    pub fn new(source: S, provider: P, evaluator: FrameEvaluator) -> Self {
        Self {
            source,
            provider,
            evaluator,
            stop: StopHandle::new(),
        }
    }

    /// Handle that stops the loop before its next frame
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Run until stopped, exhausted, failed or the receiver is gone.
    ///
    /// Blocks the calling thread; must not be called from an async context.
    pub fn run(mut self, events: mpsc::Sender<AlertEvent>) -> LoopSummary {
        info!("Starting detection loop");

        let mut frames = 0;
        let mut alerts = 0;
        let mut skipped_frames = 0;

        let reason = loop {
            if self.stop.is_stopped() {
                break StopReason::Stopped;
            }

            let frame = match self.source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    info!("Frame source exhausted");
                    break StopReason::SourceExhausted;
                }
                Err(e) => {
                    warn!("Frame acquisition failed: {}", e);
                    break StopReason::AcquisitionFailed;
                }
            };
            frames += 1;

            let faces = match self.provider.detect(&frame) {
                Ok(faces) => faces,
                Err(e) => {
                    warn!("Landmark extraction failed for frame {}: {}", frame.sequence, e);
                    skipped_frames += 1;
                    continue;
                }
            };

            let now = frame.timestamp_secs();
            let mut closed = false;
            for event in self.evaluator.evaluate_frame(&faces, now) {
                if events.blocking_send(event).is_err() {
                    closed = true;
                    break;
                }
                alerts += 1;
            }
            if closed {
                warn!("Alert receiver closed, stopping detection loop");
                break StopReason::ConsumerClosed;
            }
        };

        let summary = LoopSummary {
            frames,
            alerts,
            skipped_frames,
            reason,
        };
        info!("Detection loop stopped: {:?}", summary);
        summary
    }
}
