//! Head rotation: nose offset from the ear midpoint, normalised by the
//! inter-ear distance.
//!
//! | Offset `|o|`      | Direction | Phase |
//! |-------------------|-----------|-------|
//! | `< 0.2`           | center    | up    |
//! | `0.2 ..= 0.3`     | side      | none  |
//! | `> 0.3`           | side      | down  |
//!
//! Accuracy blends rotation range (70 %) with shoulder levelness (30 %).
//! Frames missing the nose, an ear or a shoulder, or where the ears are
//! closer than [`MIN_EAR_DISTANCE_PX`], produce [`PositionResult::neutral`].

use crate::exercise::rules::{FeedbackRule, PositionResult};
use crate::pose::{Joint, Pose};

/// Ears closer than this (pixels) mean the face was not detected properly.
pub const MIN_EAR_DISTANCE_PX: f64 = 20.0;

const CENTER_BELOW: f64 = 0.2;
const ROTATED_ABOVE: f64 = 0.3;
const GOOD_ROTATION_MIN: f64 = 0.3;
const GOOD_ROTATION_MAX: f64 = 0.6;
const ROTATE_MORE_BELOW: f64 = 0.35;
const RECENTER_ABOVE: f64 = 0.5;
const SHOULDER_TILT_ABOVE_DEG: f64 = 10.0;
const POSTURE_PENALTY_PER_DEG: f64 = 3.0;
const ROTATION_WEIGHT: f64 = 0.7;
const POSTURE_WEIGHT: f64 = 0.3;

pub const ROTATE_MORE: &str = "Rotate your head more to the side";
pub const SHOULDERS_LEVEL: &str = "Keep your shoulders level";
pub const RETURN_TO_CENTER: &str = "Return to center position";

// ---------------------------------------------------------------------------
// HeadDirection
// ---------------------------------------------------------------------------

/// Which way the head points, as seen in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadDirection {
    Left,
    Right,
    #[default]
    Center,
}

// ---------------------------------------------------------------------------
// HeadRotationEvaluator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct HeadRotationEvaluator {
    last_direction: HeadDirection,
}

impl HeadRotationEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction observed on the last successfully assessed frame.
    pub fn last_direction(&self) -> HeadDirection {
        self.last_direction
    }

    pub fn evaluate(&mut self, pose: &Pose) -> PositionResult {
        // Presence only; confidence is not consulted here.
        let (Some(nose), Some(left_ear), Some(right_ear), Some(left_shoulder), Some(right_shoulder)) = (
            pose.get(Joint::Nose),
            pose.get(Joint::LeftEar),
            pose.get(Joint::RightEar),
            pose.get(Joint::LeftShoulder),
            pose.get(Joint::RightShoulder),
        ) else {
            return PositionResult::neutral();
        };

        let ear_distance = left_ear.distance_to(right_ear);
        if ear_distance < MIN_EAR_DISTANCE_PX {
            return PositionResult::neutral();
        }

        let ear_center_x = (left_ear.x + right_ear.x) / 2.0;
        let offset = (nose.x - ear_center_x) / ear_distance;
        if !offset.is_finite() {
            return PositionResult::neutral();
        }
        let magnitude = offset.abs();

        let direction = if magnitude < CENTER_BELOW {
            HeadDirection::Center
        } else if offset > 0.0 {
            HeadDirection::Right
        } else {
            HeadDirection::Left
        };
        let centered = direction == HeadDirection::Center;
        let is_down = !centered && magnitude > ROTATED_ABOVE;
        let is_up = centered && magnitude < CENTER_BELOW;
        self.last_direction = direction;

        let rotation_score =
            magnitude.clamp(GOOD_ROTATION_MIN, GOOD_ROTATION_MAX) / GOOD_ROTATION_MAX * 100.0;

        // |atan(dy/dx)|, but well-defined for vertical or coincident shoulders.
        let shoulder_tilt = (right_shoulder.y - left_shoulder.y)
            .abs()
            .atan2((right_shoulder.x - left_shoulder.x).abs())
            .to_degrees();
        let posture_score = (100.0 - shoulder_tilt * POSTURE_PENALTY_PER_DEG).max(0.0);

        let accuracy = (rotation_score * ROTATION_WEIGHT + posture_score * POSTURE_WEIGHT)
            .clamp(0.0, 100.0);

        log::trace!(
            "head rotation: offset={offset:.3} direction={direction:?} tilt={shoulder_tilt:.1}"
        );

        PositionResult {
            accuracy,
            is_down,
            is_up,
            feedback_rules: vec![
                FeedbackRule::new(ROTATE_MORE)
                    .when(is_down)
                    .when_below(magnitude, ROTATE_MORE_BELOW),
                FeedbackRule::new(SHOULDERS_LEVEL).when_above(shoulder_tilt, SHOULDER_TILT_ABOVE_DEG),
                FeedbackRule::new(RETURN_TO_CENTER)
                    .when(!is_up)
                    .when(!centered)
                    .when_above(magnitude, RECENTER_ABOVE),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
