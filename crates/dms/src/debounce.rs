//! Per-class alert debouncing and cooldown
//!
//! A debouncer turns a per-frame boolean ("condition met") into at most one
//! `AlertEvent` per cooldown window. The condition must hold for
//! `required_consecutive_frames` frames in a row before the class becomes
//! eligible. Once eligible, a sustained condition keeps the count saturated,
//! so the first frame after the cooldown expires fires again without a new
//! ramp-up. A single frame without the condition resets the count.

use tracing::{debug, info};

use crate::analysis::{AlertClass, AlertEvent};
use crate::config::DebounceConfig;

/// Debounce state of one alert class
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DebounceState {
    /// Consecutive frames the condition has held
    pub consecutive_count: u32,
    /// Timestamp (seconds) of the last fired alert
    pub last_fired_at: Option<f64>,
}

impl DebounceState {
    /// Suppressed while less than `cooldown_seconds` has passed; a gap of exactly the cooldown may fire
    fn cooling_down(&self, now: f64, cooldown_seconds: f64) -> bool {
        match self.last_fired_at {
            Some(last) => now - last < cooldown_seconds,
            None => false,
        }
    }
}

/// Debouncer for a single alert class
#[derive(Debug, Clone)]
pub struct AlertDebouncer {
    class: AlertClass,
    config: DebounceConfig,
    state: DebounceState,
}

impl AlertDebouncer {
    pub fn new(class: AlertClass, config: DebounceConfig) -> Self {
        Self {
            class,
            config,
            state: DebounceState::default(),
        }
    }

    /// Feed one frame's condition. Timestamps must be non-decreasing.
    pub fn evaluate(&mut self, condition_met: bool, now: f64) -> Option<AlertEvent> {
        if !condition_met {
            if self.state.consecutive_count > 0 {
                debug!("{} condition cleared after {} frames", self.class, self.state.consecutive_count);
            }
            self.state.consecutive_count = 0;
            return None;
        }

        self.state.consecutive_count = self.state.consecutive_count.saturating_add(1);

        if self.state.consecutive_count < self.config.required_consecutive_frames {
            return None;
        }

        if self.state.cooling_down(now, self.config.cooldown_seconds) {
            debug!("{} alert suppressed: in cooldown period", self.class);
            return None;
        }

        self.state.last_fired_at = Some(now);
        info!(
            "{} alert fired at {:.3}s after {} consecutive frames",
            self.class, now, self.state.consecutive_count
        );
        Some(AlertEvent::new(self.class, now))
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Forget counts and cooldown (on driver change)
    pub fn reset(&mut self) {
        self.state = DebounceState::default();
    }
}
