//! Synthetic poses with exact joint angles, shared by the evaluator and
//! pipeline tests.

use crate::pose::{Joint, Keypoint, Pose};

const SCORE: f64 = 0.9;
const LIMB: f64 = 100.0;

fn put(pose: &mut Pose, joint: Joint, x: f64, y: f64) {
    pose.set(Keypoint::new(joint, x, y, SCORE));
}

/// Place `a` straight above `vertex` and `b` so that the angle a–vertex–b is `deg`.
fn hinge(pose: &mut Pose, a: Joint, vertex: Joint, b: Joint, at: (f64, f64), deg: f64) {
    let rad = deg.to_radians();
    put(pose, a, at.0, at.1 - LIMB);
    put(pose, vertex, at.0, at.1);
    put(pose, b, at.0 + LIMB * rad.sin(), at.1 - LIMB * rad.cos());
}

/// Both legs with the given knee angles and an upright torso.
pub(crate) fn leg_pose(left_knee: f64, right_knee: f64) -> Pose {
    let mut pose = Pose::empty();
    hinge(&mut pose, Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle, (200.0, 300.0), left_knee);
    hinge(&mut pose, Joint::RightHip, Joint::RightKnee, Joint::RightAnkle, (400.0, 300.0), right_knee);
    set_torso(&mut pose, 180.0);
    put(&mut pose, Joint::RightShoulder, 400.0, 100.0);
    pose
}

/// Move the left shoulder so that shoulder–hip–knee (left) is `deg`.
///
/// Expects the left knee straight below the left hip, as built by [`leg_pose`].
pub(crate) fn set_torso(pose: &mut Pose, deg: f64) {
    let rad = deg.to_radians();
    let (hx, hy) = (200.0, 200.0);
    put(pose, Joint::LeftShoulder, hx + LIMB * rad.sin(), hy + LIMB * rad.cos());
}

/// Both arms with the given elbow angles and a straight hip line.
pub(crate) fn arm_pose(left_elbow: f64, right_elbow: f64) -> Pose {
    let mut pose = Pose::empty();
    hinge(&mut pose, Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist, (200.0, 200.0), left_elbow);
    hinge(&mut pose, Joint::RightShoulder, Joint::RightElbow, Joint::RightWrist, (400.0, 200.0), right_elbow);
    set_hip_line(&mut pose, 180.0);
    pose
}

/// Place the hips so that left shoulder–left hip–right hip is `deg`.
///
/// Expects the left shoulder at (200, 100), as built by [`arm_pose`].
pub(crate) fn set_hip_line(pose: &mut Pose, deg: f64) {
    let rad = deg.to_radians();
    let (hx, hy) = (200.0, 300.0);
    put(pose, Joint::LeftHip, hx, hy);
    put(pose, Joint::RightHip, hx + LIMB * rad.sin(), hy - LIMB * rad.cos());
}

/// Left arm raised to `shoulder` degrees (elbow–shoulder–hip) and left leg at `leg` degrees.
pub(crate) fn jack_pose(shoulder: f64, leg: f64) -> Pose {
    let mut pose = Pose::empty();
    let s = shoulder.to_radians();
    put(&mut pose, Joint::LeftShoulder, 200.0, 100.0);
    put(&mut pose, Joint::LeftHip, 200.0, 300.0);
    put(&mut pose, Joint::LeftElbow, 200.0 + LIMB * s.sin(), 100.0 + LIMB * s.cos());
    hinge(&mut pose, Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle, (200.0, 400.0), leg);
    pose
}

/// Head with the nose displaced by `offset` ear-distances from the ear midpoint,
/// and the right shoulder tilted by `tilt_deg` relative to the left.
pub(crate) fn head_pose(offset: f64, ear_distance: f64, tilt_deg: f64) -> Pose {
    let mut pose = Pose::empty();
    let cx = 320.0;
    put(&mut pose, Joint::LeftEar, cx - ear_distance / 2.0, 100.0);
    put(&mut pose, Joint::RightEar, cx + ear_distance / 2.0, 100.0);
    put(&mut pose, Joint::Nose, cx + offset * ear_distance, 110.0);
    put(&mut pose, Joint::LeftShoulder, cx - 100.0, 200.0);
    put(
        &mut pose,
        Joint::RightShoulder,
        cx + 100.0,
        200.0 + 200.0 * tilt_deg.to_radians().tan(),
    );
    pose
}
