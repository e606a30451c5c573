//! DMS ratio samples and alert events

use serde::{Deserialize, Serialize};

use crate::geometry::{eye_aspect_ratio, mouth_aspect_ratio, GeometryError};
use crate::landmarks::LandmarkSet;

/// DMS alert types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertClass {
    /// Eyes closed for too many consecutive frames
    Drowsiness,

    /// Mouth held wide open for too many consecutive frames
    Yawning,
}

impl AlertClass {
    /// Name used in the alert log
    pub fn name(&self) -> &'static str {
        match self {
            Self::Drowsiness => "Drowsiness",
            Self::Yawning => "Yawning",
        }
    }

    /// Spoken message
    pub fn message(&self) -> &'static str {
        match self {
            Self::Drowsiness => "You seem drowsy. Please stay alert.",
            Self::Yawning => "You are yawning. Please take a break.",
        }
    }

    /// On-screen banner text
    pub fn banner(&self) -> &'static str {
        match self {
            Self::Drowsiness => "DROWSINESS ALERT!",
            Self::Yawning => "YAWNING ALERT!",
        }
    }
}

impl std::fmt::Display for AlertClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A fired alert, handed to the host for display, speech and logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub class: AlertClass,
    /// Frame timestamp (seconds) that fired the alert
    pub fired_at: f64,
    pub message: String,
}

impl AlertEvent {
    pub fn new(class: AlertClass, fired_at: f64) -> Self {
        Self {
            class,
            fired_at,
            message: class.message().to_string(),
        }
    }
}

/// Openness ratios of one face in one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioSample {
    /// Mean eye aspect ratio of both eyes
    pub ear: f64,
    /// Mouth aspect ratio
    pub mar: f64,
}

impl RatioSample {
    pub fn from_landmarks(face: &LandmarkSet) -> Result<Self, GeometryError> {
        let left = eye_aspect_ratio(face.left_eye())?;
        let right = eye_aspect_ratio(face.right_eye())?;
        let mar = mouth_aspect_ratio(face.mouth())?;

        Ok(Self {
            ear: (left + right) / 2.0,
            mar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{degenerate_face, face};

    #[test]
    fn test_sample_from_face() {
        let sample = RatioSample::from_landmarks(&face(0.3, 0.2)).unwrap();
        assert!((sample.ear - 0.3).abs() < 1e-9);
        assert!((sample.mar - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_sample_from_degenerate_face() {
        assert!(matches!(
            RatioSample::from_landmarks(&degenerate_face()),
            Err(GeometryError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_event_carries_class_message() {
        let event = AlertEvent::new(AlertClass::Yawning, 4.5);
        assert_eq!(event.message, "You are yawning. Please take a break.");
        assert_eq!(event.class.to_string(), "Yawning");
        assert_eq!(AlertClass::Drowsiness.banner(), "DROWSINESS ALERT!");
    }
}
