//! Eye and mouth aspect ratios from landmark contours

use thiserror::Error;

use crate::landmarks::Point2D;

/// Geometry failures for a single face
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Reference width collapsed to zero (or the ratio is not finite)
    #[error("{ratio} has a zero-width reference segment")]
    DivisionByZero { ratio: &'static str },

    #[error("expected {expected} landmarks, got {actual}")]
    PointCount { expected: usize, actual: usize },
}

/// Eye aspect ratio over the six-point eye contour p1..p6.
///
/// `(|p2-p6| + |p3-p5|) / (2 |p1-p4|)`. Drops towards zero as the eye closes.
pub fn eye_aspect_ratio(eye: &[Point2D; 6]) -> Result<f64, GeometryError> {
    let a = eye[1].distance(&eye[5]);
    let b = eye[2].distance(&eye[4]);
    let c = eye[0].distance(&eye[3]);

    checked_ratio("eye aspect ratio", a + b, 2.0 * c)
}

/// Mouth aspect ratio over the 20-point lip contour (48..68).
///
/// Three vertical openings (2-10, 3-9, 4-8) over three times the width (0-6).
pub fn mouth_aspect_ratio(mouth: &[Point2D; 20]) -> Result<f64, GeometryError> {
    let a = mouth[2].distance(&mouth[10]);
    let b = mouth[3].distance(&mouth[9]);
    let c = mouth[4].distance(&mouth[8]);
    let d = mouth[0].distance(&mouth[6]);

    checked_ratio("mouth aspect ratio", a + b + c, 3.0 * d)
}

fn checked_ratio(ratio: &'static str, numerator: f64, denominator: f64) -> Result<f64, GeometryError> {
    if denominator == 0.0 {
        return Err(GeometryError::DivisionByZero { ratio });
    }
    let value = numerator / denominator;
    if !value.is_finite() {
        return Err(GeometryError::DivisionByZero { ratio });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{eye, mouth};
    use proptest::prelude::*;

    #[test]
    fn test_open_and_closed_eye() {
        let open = eye_aspect_ratio(&eye(30.0, 9.0)).unwrap();
        let closed = eye_aspect_ratio(&eye(30.0, 1.5)).unwrap();
        assert!((open - 0.3).abs() < 1e-12);
        assert!((closed - 0.05).abs() < 1e-12);
        assert!(closed < open);
    }

    #[test]
    fn test_degenerate_eye() {
        let mut contour = eye(30.0, 9.0);
        contour[3] = contour[0];
        assert_eq!(
            eye_aspect_ratio(&contour),
            Err(GeometryError::DivisionByZero { ratio: "eye aspect ratio" })
        );
    }

    #[test]
    fn test_mouth_ratio() {
        let yawn = mouth_aspect_ratio(&mouth(40.0, 28.0)).unwrap();
        let rest = mouth_aspect_ratio(&mouth(40.0, 4.0)).unwrap();
        assert!((yawn - 0.7).abs() < 1e-12);
        assert!((rest - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_mouth() {
        let mut contour = mouth(40.0, 10.0);
        contour[6] = contour[0];
        assert!(matches!(
            mouth_aspect_ratio(&contour),
            Err(GeometryError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let mut contour = eye(30.0, 9.0);
        contour[1] = Point2D::new(f64::INFINITY, 0.0);
        assert!(eye_aspect_ratio(&contour).is_err());
    }

    proptest! {
        #[test]
        fn pt_symmetric_eye_matches_closed_form(width in 0.5_f64..200.0, opening in 0.0_f64..100.0) {
            let ear = eye_aspect_ratio(&eye(width, opening)).unwrap();
            prop_assert_eq!(ear, (opening + opening) / (2.0 * width));
        }

        #[test]
        fn pt_ratios_are_deterministic(width in 1.0_f64..100.0, opening in 0.0_f64..80.0) {
            let e = eye(width, opening);
            let m = mouth(width, opening);
            prop_assert_eq!(eye_aspect_ratio(&e), eye_aspect_ratio(&e));
            prop_assert_eq!(mouth_aspect_ratio(&m), mouth_aspect_ratio(&m));
        }
    }
}
