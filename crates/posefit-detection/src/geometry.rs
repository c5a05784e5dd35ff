// ABOUTME: Image-plane geometry for pose landmarks
// ABOUTME: Angle at a joint between two limb segments and Euclidean distance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use posefit_core::models::Point2;

/// Angle in degrees at `b` between the segments `b→a` and `b→c`
///
/// Returns 0 when either segment has zero length. The cosine is clamped to
/// `[-1, 1]` so rounding on nearly collinear points never produces `NaN`.
#[must_use]
pub fn calculate_angle(a: Point2, b: Point2, c: Point2) -> f32 {
    let ba_x = f64::from(a.x) - f64::from(b.x);
    let ba_y = f64::from(a.y) - f64::from(b.y);
    let bc_x = f64::from(c.x) - f64::from(b.x);
    let bc_y = f64::from(c.y) - f64::from(b.y);

    let magnitude_ba = ba_x.hypot(ba_y);
    let magnitude_bc = bc_x.hypot(bc_y);
    if magnitude_ba == 0.0 || magnitude_bc == 0.0 {
        return 0.0;
    }

    let cosine = (ba_x.mul_add(bc_x, ba_y * bc_y) / (magnitude_ba * magnitude_bc)).clamp(-1.0, 1.0);
    cosine.acos().to_degrees() as f32
}

/// Euclidean distance between two points
#[must_use]
pub fn distance(p: Point2, q: Point2) -> f32 {
    (p.x - q.x).hypot(p.y - q.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_right_angle() {
        let angle = calculate_angle(
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
        );
        approx(angle, 90.0);
    }

    #[test]
    fn test_straight_and_folded() {
        let straight = calculate_angle(
            Point2::new(0.0, 0.0),
            Point2::new(0.5, 0.5),
            Point2::new(1.0, 1.0),
        );
        approx(straight, 180.0);
        assert!(!straight.is_nan());

        let folded = calculate_angle(
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
        );
        approx(folded, 0.0);
    }

    #[test]
    fn test_zero_length_segment_returns_zero() {
        let p = Point2::new(0.3, 0.3);
        assert_eq!(calculate_angle(p, p, Point2::new(1.0, 0.0)), 0.0);
        assert_eq!(calculate_angle(Point2::new(1.0, 0.0), p, p), 0.0);
    }

    #[test]
    fn test_distance() {
        approx(distance(Point2::new(0.0, 0.0), Point2::new(0.3, 0.4)), 0.5);
    }
}
