//! Synthetic landmark builders for unit tests

use crate::landmarks::{LandmarkSet, Point2D, LANDMARK_COUNT, LEFT_EYE, MOUTH, RIGHT_EYE};

/// Symmetric eye contour with EAR = opening / width
pub fn eye(width: f64, opening: f64) -> [Point2D; 6] {
    let half = opening / 2.0;
    [
        Point2D::new(0.0, 0.0),
        Point2D::new(width / 3.0, half),
        Point2D::new(2.0 * width / 3.0, half),
        Point2D::new(width, 0.0),
        Point2D::new(2.0 * width / 3.0, -half),
        Point2D::new(width / 3.0, -half),
    ]
}

/// Lip contour with MAR = opening / width
pub fn mouth(width: f64, opening: f64) -> [Point2D; 20] {
    let half = opening / 2.0;
    let mut points = [Point2D::default(); 20];
    for (i, p) in points.iter_mut().enumerate() {
        // Filler outline points, never read by the ratio.
        *p = Point2D::new(width * i as f64 / 20.0, width / 4.0);
    }
    points[0] = Point2D::new(0.0, 0.0);
    points[6] = Point2D::new(width, 0.0);
    points[2] = Point2D::new(width / 3.0, -half);
    points[10] = Point2D::new(width / 3.0, half);
    points[3] = Point2D::new(width / 2.0, -half);
    points[9] = Point2D::new(width / 2.0, half);
    points[4] = Point2D::new(2.0 * width / 3.0, -half);
    points[8] = Point2D::new(2.0 * width / 3.0, half);
    points
}

/// Full 68-point face with both eyes at `ear` and the mouth at `mar`
pub fn face(ear: f64, mar: f64) -> LandmarkSet {
    let mut points: Vec<Point2D> = (0..LANDMARK_COUNT)
        .map(|i| Point2D::new(i as f64 * 4.0, 240.0))
        .collect();

    place(&mut points, RIGHT_EYE.start, &eye(32.0, ear * 32.0), (96.0, 120.0));
    place(&mut points, LEFT_EYE.start, &eye(32.0, ear * 32.0), (160.0, 120.0));
    place(&mut points, MOUTH.start, &mouth(64.0, mar * 64.0), (96.0, 192.0));

    LandmarkSet::new(points).unwrap()
}

/// Face whose eye corners coincide, so the EAR denominator is zero
pub fn degenerate_face() -> LandmarkSet {
    let mut points = face(0.1, 0.9).points().to_vec();
    points[RIGHT_EYE.start + 3] = points[RIGHT_EYE.start];
    LandmarkSet::new(points).unwrap()
}

fn place(points: &mut [Point2D], start: usize, region: &[Point2D], (dx, dy): (f64, f64)) {
    for (offset, p) in region.iter().enumerate() {
        points[start + offset] = Point2D::new(p.x + dx, p.y + dy);
    }
}
