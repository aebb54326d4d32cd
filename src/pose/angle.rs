//! Joint angle calculation using the dot product.
//!
//! cos(θ) = (v1 · v2) / (|v1| × |v2|), with v1 = a − vertex, v2 = b − vertex.
//!
//! Both functions are pure.  An angle is "unknown" (`None`) when any of the
//! three points is absent, scores below [`MIN_KEYPOINT_SCORE`], or when
//! either ray has zero length.

use crate::pose::keypoint::Keypoint;

/// Keypoints with a confidence below this are ignored.
pub const MIN_KEYPOINT_SCORE: f64 = 0.3;

/// Interior angle in degrees at `vertex` between the rays to `a` and `b`.
///
/// Returns a value in `[0, 180]`, or `None` when the angle cannot be
/// measured.  Symmetric in `a` and `b`.
///
/// ```rust
/// use pose_coach::pose::{joint_angle, Joint, Keypoint};
///
/// let hip = Keypoint::new(Joint::LeftHip, 0.0, 0.0, 0.9);
/// let knee = Keypoint::new(Joint::LeftKnee, 0.0, 100.0, 0.9);
/// let ankle = Keypoint::new(Joint::LeftAnkle, 100.0, 100.0, 0.9);
///
/// let angle = joint_angle(Some(&hip), Some(&knee), Some(&ankle)).unwrap();
/// assert!((angle - 90.0).abs() < 1e-9);
/// ```
pub fn joint_angle(
    a: Option<&Keypoint>,
    vertex: Option<&Keypoint>,
    b: Option<&Keypoint>,
) -> Option<f64> {
    let (a, vertex, b) = (a?, vertex?, b?);
    if [a, vertex, b].iter().any(|kp| !is_confident(kp)) {
        return None;
    }

    let v1 = (a.x - vertex.x, a.y - vertex.y);
    let v2 = (b.x - vertex.x, b.y - vertex.y);

    let mag1 = v1.0.hypot(v1.1);
    let mag2 = v2.0.hypot(v2.1);
    if mag1 == 0.0 || mag2 == 0.0 {
        return None;
    }

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    let degrees = cos_angle.acos().to_degrees();

    // Non-finite coordinates propagate to NaN; treat as unmeasurable.
    degrees.is_finite().then_some(degrees)
}

/// Mean of the known angles, or `None` when every input is unknown.
pub fn average_angle(angles: &[Option<f64>]) -> Option<f64> {
    let known: Vec<f64> = angles.iter().flatten().copied().collect();
    if known.is_empty() {
        return None;
    }
    Some(known.iter().sum::<f64>() / known.len() as f64)
}

fn is_confident(kp: &Keypoint) -> bool {
    kp.score >= MIN_KEYPOINT_SCORE
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::keypoint::Joint;

    fn kp(x: f64, y: f64) -> Keypoint {
        Keypoint::new(Joint::Nose, x, y, 0.9)
    }

    fn angle(a: (f64, f64), v: (f64, f64), b: (f64, f64)) -> Option<f64> {
        joint_angle(Some(&kp(a.0, a.1)), Some(&kp(v.0, v.1)), Some(&kp(b.0, b.1)))
    }

    #[test]
    fn straight_line_is_180() {
        let deg = angle((0.0, 0.0), (0.5, 0.0), (1.0, 0.0)).unwrap();
        assert!((deg - 180.0).abs() < 1e-9);
    }

    #[test]
    fn right_angle_is_90() {
        let deg = angle((0.0, 0.0), (0.5, 0.0), (0.5, 0.5)).unwrap();
        assert!((deg - 90.0).abs() < 1e-9);
    }

    #[test]
    fn folded_back_is_0() {
        let deg = angle((1.0, 0.0), (0.0, 0.0), (2.0, 0.0)).unwrap();
        assert!(deg.abs() < 1e-6);
    }

    #[test]
    fn symmetric_in_outer_points() {
        let points = [
            ((3.0, 7.0), (1.0, 1.0), (-4.0, 2.5)),
            ((0.1, 0.2), (0.3, 0.1), (0.9, 0.9)),
            ((100.0, 0.0), (0.0, 0.0), (-100.0, 1e-9)),
            ((5.0, 5.0), (5.0, 6.0), (5.0, 7.0)),
        ];
        for (a, v, b) in points {
            assert_eq!(angle(a, v, b), angle(b, v, a));
        }
    }

    #[test]
    fn always_within_range() {
        let coords = [-250.0, -1.0, -1e-7, 0.0, 1e-7, 0.3, 2.0, 640.0];
        for &ax in &coords {
            for &by in &coords {
                for &vx in &coords {
                    if let Some(deg) = angle((ax, 1.0), (vx, 0.5), (2.0, by)) {
                        assert!(deg.is_finite());
                        assert!((0.0..=180.0).contains(&deg), "{deg} out of range");
                    }
                }
            }
        }
    }

    #[test]
    fn zero_length_ray_is_unknown() {
        assert_eq!(angle((1.0, 1.0), (1.0, 1.0), (2.0, 2.0)), None);
        assert_eq!(angle((0.0, 0.0), (1.0, 1.0), (1.0, 1.0)), None);
    }

    #[test]
    fn missing_point_is_unknown() {
        let p = kp(0.0, 0.0);
        let q = kp(1.0, 0.0);
        assert_eq!(joint_angle(None, Some(&p), Some(&q)), None);
        assert_eq!(joint_angle(Some(&p), None, Some(&q)), None);
        assert_eq!(joint_angle(Some(&p), Some(&q), None), None);
    }

    #[test]
    fn low_confidence_is_unknown() {
        let a = kp(0.0, 0.0);
        let v = Keypoint::new(Joint::LeftKnee, 1.0, 0.0, 0.29);
        let b = kp(1.0, 1.0);
        assert_eq!(joint_angle(Some(&a), Some(&v), Some(&b)), None);

        let v = Keypoint::new(Joint::LeftKnee, 1.0, 0.0, MIN_KEYPOINT_SCORE);
        assert!(joint_angle(Some(&a), Some(&v), Some(&b)).is_some());
    }

    #[test]
    fn non_finite_coordinates_are_unknown() {
        assert_eq!(angle((f64::NAN, 0.0), (1.0, 0.0), (2.0, 1.0)), None);
    }

    #[test]
    fn average_ignores_unknown() {
        assert_eq!(average_angle(&[Some(60.0), None, Some(120.0)]), Some(90.0));
        assert_eq!(average_angle(&[None, Some(45.0)]), Some(45.0));
        assert_eq!(average_angle(&[None, None]), None);
        assert_eq!(average_angle(&[]), None);
    }
}
