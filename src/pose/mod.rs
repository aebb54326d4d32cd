//! Pose primitives: keypoint data model, temporal smoothing and joint geometry.
//!
//! # Pipeline
//!
//! ```text
//! raw Pose (from the estimator) → KeypointSmoother → smoothed Pose
//!                                                  → joint_angle / average_angle
//! ```

pub mod angle;
pub mod keypoint;
pub mod smoother;

pub use angle::{average_angle, joint_angle, MIN_KEYPOINT_SCORE};
pub use keypoint::{ExerciseSample, Joint, Keypoint, Pose, JOINT_COUNT};
pub use smoother::{KeypointSmoother, DEFAULT_SMOOTHING_WINDOW};
