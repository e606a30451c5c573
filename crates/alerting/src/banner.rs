//! Timed on-screen alert banner

use std::time::{Duration, Instant};

use dms::AlertClass;

/// Banner text shown for a fixed time after each alert.
///
/// A newer alert replaces the text and restarts the timer.
#[derive(Debug, Clone)]
pub struct AlertBanner {
    duration: Duration,
    current: Option<(AlertClass, Instant)>,
}

impl AlertBanner {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: None,
        }
    }

    pub fn show(&mut self, class: AlertClass, at: Instant) {
        self.current = Some((class, at));
    }

    /// Text visible at `now`, if any
    pub fn text_at(&self, now: Instant) -> Option<&'static str> {
        let (class, shown_at) = self.current?;
        if now.saturating_duration_since(shown_at) < self.duration {
            Some(class.banner())
        } else {
            None
        }
    }
}
