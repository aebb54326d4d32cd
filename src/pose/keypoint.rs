//! Keypoint data model: the 17-landmark joint taxonomy, a single keypoint,
//! a full pose and a timestamped sample.
//!
//! A [`Pose`] always has exactly [`JOINT_COUNT`] slots.  A slot is `None`
//! when the pose estimator did not return that joint for the frame; low
//! confidence joints are kept and filtered later by the angle calculator.
//!
//! # Example
//!
//! ```rust
//! use pose_coach::pose::{Joint, Keypoint, Pose};
//!
//! let mut pose = Pose::empty();
//! pose.set(Keypoint::new(Joint::LeftKnee, 320.0, 240.0, 0.9));
//! assert!(pose.get(Joint::LeftKnee).is_some());
//! assert!(pose.get(Joint::RightKnee).is_none());
//! ```

use serde::{Deserialize, Serialize};

/// Number of landmarks tracked per frame.
pub const JOINT_COUNT: usize = 17;

// ---------------------------------------------------------------------------
// Joint
// ---------------------------------------------------------------------------

/// The fixed, ordered set of tracked landmarks (MoveNet / COCO order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Joint {
    /// All joints in slot order.
    pub const ALL: [Joint; JOINT_COUNT] = [
        Joint::Nose,
        Joint::LeftEye,
        Joint::RightEye,
        Joint::LeftEar,
        Joint::RightEar,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
    ];

    /// Slot index of this joint inside a [`Pose`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Joint at slot `index`, or `None` when out of range.
    pub fn from_index(index: usize) -> Option<Joint> {
        Self::ALL.get(index).copied()
    }

    /// snake_case name, identical to the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Joint::Nose => "nose",
            Joint::LeftEye => "left_eye",
            Joint::RightEye => "right_eye",
            Joint::LeftEar => "left_ear",
            Joint::RightEar => "right_ear",
            Joint::LeftShoulder => "left_shoulder",
            Joint::RightShoulder => "right_shoulder",
            Joint::LeftElbow => "left_elbow",
            Joint::RightElbow => "right_elbow",
            Joint::LeftWrist => "left_wrist",
            Joint::RightWrist => "right_wrist",
            Joint::LeftHip => "left_hip",
            Joint::RightHip => "right_hip",
            Joint::LeftKnee => "left_knee",
            Joint::RightKnee => "right_knee",
            Joint::LeftAnkle => "left_ankle",
            Joint::RightAnkle => "right_ankle",
        }
    }
}

// ---------------------------------------------------------------------------
// Keypoint
// ---------------------------------------------------------------------------

/// An estimated 2D joint position with a confidence score in `[0, 1]`.
///
/// Coordinates are in input-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub joint: Joint,
    pub x: f64,
    pub y: f64,
    pub score: f64,
}

impl Keypoint {
    pub fn new(joint: Joint, x: f64, y: f64, score: f64) -> Self {
        Self { joint, x, y, score }
    }

    /// Euclidean distance to `other` in pixels.
    pub fn distance_to(&self, other: &Keypoint) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// ---------------------------------------------------------------------------
// Pose
// ---------------------------------------------------------------------------

/// One frame of keypoints, indexed by [`Joint`].
///
/// Serialized as a flat list of present keypoints; joints missing from the
/// list deserialize as absent slots.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Keypoint>", into = "Vec<Keypoint>")]
pub struct Pose {
    slots: [Option<Keypoint>; JOINT_COUNT],
}

impl Pose {
    /// A pose with every slot absent.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, joint: Joint) -> Option<&Keypoint> {
        self.slots[joint.index()].as_ref()
    }

    /// Store `keypoint` in the slot of its own joint, replacing any previous value.
    pub fn set(&mut self, keypoint: Keypoint) {
        self.slots[keypoint.joint.index()] = Some(keypoint);
    }

    pub fn remove(&mut self, joint: Joint) {
        self.slots[joint.index()] = None;
    }

    /// Raw slot access in joint order.
    pub fn slots(&self) -> &[Option<Keypoint>; JOINT_COUNT] {
        &self.slots
    }

    /// Number of joints present in this frame.
    pub fn present_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.present_count() == 0
    }

    /// Iterate over present keypoints in joint order.
    pub fn iter(&self) -> impl Iterator<Item = &Keypoint> {
        self.slots.iter().flatten()
    }
}

impl From<Vec<Keypoint>> for Pose {
    fn from(keypoints: Vec<Keypoint>) -> Self {
        let mut pose = Pose::empty();
        for kp in keypoints {
            pose.set(kp);
        }
        pose
    }
}

impl From<Pose> for Vec<Keypoint> {
    fn from(pose: Pose) -> Self {
        pose.iter().copied().collect()
    }
}

// ---------------------------------------------------------------------------
// ExerciseSample
// ---------------------------------------------------------------------------

/// A pose plus the monotonic timestamp (milliseconds) at which it was captured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSample {
    pub timestamp_ms: u64,
    #[serde(rename = "keypoints")]
    pub pose: Pose,
}

impl ExerciseSample {
    pub fn new(pose: Pose, timestamp_ms: u64) -> Self {
        Self { timestamp_ms, pose }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
