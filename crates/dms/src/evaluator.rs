//! Per-frame evaluation of all detected faces

use tracing::{debug, warn};

use crate::analysis::{AlertClass, AlertEvent, RatioSample};
use crate::config::DmsConfig;
use crate::debounce::AlertDebouncer;
use crate::landmarks::LandmarkSet;
use crate::DmsError;

/// Binds face geometry to the two alert debouncers.
///
/// Debounce state is kept per alert class, not per face: with several faces
/// in view their frames all feed the same counters.
pub struct FrameEvaluator {
    config: DmsConfig,
    drowsiness: AlertDebouncer,
    yawning: AlertDebouncer,
}

impl FrameEvaluator {
    pub fn new(config: DmsConfig) -> Result<Self, DmsError> {
        config.validate()?;
        Ok(Self {
            drowsiness: AlertDebouncer::new(AlertClass::Drowsiness, config.drowsiness),
            yawning: AlertDebouncer::new(AlertClass::Yawning, config.yawning),
            config,
        })
    }

    /// Evaluate one frame. Events are ordered by face, drowsiness before yawning.
    pub fn evaluate_frame(&mut self, faces: &[LandmarkSet], now: f64) -> Vec<AlertEvent> {
        let mut events = Vec::new();

        if faces.is_empty() {
            self.drowsiness.evaluate(false, now);
            self.yawning.evaluate(false, now);
            return events;
        }

        for (index, face) in faces.iter().enumerate() {
            let sample = match RatioSample::from_landmarks(face) {
                Ok(sample) => sample,
                Err(e) => {
                    warn!("Skipping face {} at {:.3}s: {}", index, now, e);
                    continue;
                }
            };
            debug!("face {}: EAR: {:.2}, MAR: {:.2}", index, sample.ear, sample.mar);

            events.extend(self.evaluate_sample(&sample, now));
        }

        events
    }

    /// Feed one face's ratios into both debouncers
    pub fn evaluate_sample(&mut self, sample: &RatioSample, now: f64) -> Vec<AlertEvent> {
        let eyes_closed = sample.ear < self.config.ear_threshold;
        let mouth_open = sample.mar > self.config.mar_threshold;

        [
            self.drowsiness.evaluate(eyes_closed, now),
            self.yawning.evaluate(mouth_open, now),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn drowsiness(&self) -> &AlertDebouncer {
        &self.drowsiness
    }

    pub fn yawning(&self) -> &AlertDebouncer {
        &self.yawning
    }

    /// Reset both debouncers (on driver change)
    pub fn reset(&mut self) {
        self.drowsiness.reset();
        self.yawning.reset();
    }
}
