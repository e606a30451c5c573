//! Facial landmark types (68-point convention)

use std::ops::Range;

use camera_capture::VideoFrame;
use serde::{Deserialize, Serialize};

use crate::geometry::GeometryError;
use crate::DmsError;

/// Number of points produced per face by the landmark model
pub const LANDMARK_COUNT: usize = 68;

/// Right eye contour (p1..p6)
pub const RIGHT_EYE: Range<usize> = 36..42;
/// Left eye contour (p1..p6)
pub const LEFT_EYE: Range<usize> = 42..48;
/// Outer and inner lip contour
pub const MOUTH: Range<usize> = 48..68;

/// Image-space landmark coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// All 68 landmarks of one detected face in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: Vec<Point2D>,
    right_eye: [Point2D; 6],
    left_eye: [Point2D; 6],
    mouth: [Point2D; 20],
}

impl LandmarkSet {
    /// Wrap a detector result, rejecting any count other than 68
    pub fn new(points: Vec<Point2D>) -> Result<Self, GeometryError> {
        if points.len() != LANDMARK_COUNT {
            return Err(GeometryError::PointCount {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            });
        }
        Ok(Self {
            right_eye: region(&points, RIGHT_EYE)?,
            left_eye: region(&points, LEFT_EYE)?,
            mouth: region(&points, MOUTH)?,
            points,
        })
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn left_eye(&self) -> &[Point2D; 6] {
        &self.left_eye
    }

    pub fn right_eye(&self) -> &[Point2D; 6] {
        &self.right_eye
    }

    pub fn mouth(&self) -> &[Point2D; 20] {
        &self.mouth
    }
}

/// Copy a fixed index range out of a full landmark list
fn region<const N: usize>(
    points: &[Point2D],
    range: Range<usize>,
) -> Result<[Point2D; N], GeometryError> {
    points
        .get(range)
        .and_then(|slice| <[Point2D; N]>::try_from(slice).ok())
        .ok_or(GeometryError::PointCount {
            expected: LANDMARK_COUNT,
            actual: points.len(),
        })
}

/// External face-landmark detector.
///
/// Returns one `LandmarkSet` per detected face, in detection order.
pub trait LandmarkProvider {
    fn detect(&mut self, frame: &VideoFrame) -> Result<Vec<LandmarkSet>, DmsError>;
}
