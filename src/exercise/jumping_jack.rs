//! Jumping jack: left shoulder abduction (elbow–shoulder–hip) plus left leg
//! extension (hip–knee–ankle).
//!
//! Arms overhead count as "down" and arms at the sides with a straight leg
//! count as "up", so one rep is a full raise followed by a return.

use crate::exercise::rules::{accuracy_toward, FeedbackRule, PositionResult};
use crate::pose::{joint_angle, Joint, Pose};

const ARMS_RAISED_ABOVE: f64 = 120.0;
const ARMS_LOWERED_BELOW: f64 = 60.0;
const LEG_STRAIGHT_ABOVE: f64 = 170.0;
const TARGET: f64 = 80.0;
const RAISE_HIGHER_ABOVE: f64 = 90.0;

pub const RAISE_ARMS: &str = "Raise your arms higher";

#[derive(Debug, Clone, Copy, Default)]
pub struct JumpingJackEvaluator;

impl JumpingJackEvaluator {
    pub fn evaluate(&self, pose: &Pose) -> PositionResult {
        let shoulder = joint_angle(
            pose.get(Joint::LeftElbow),
            pose.get(Joint::LeftShoulder),
            pose.get(Joint::LeftHip),
        );
        let leg = joint_angle(
            pose.get(Joint::LeftHip),
            pose.get(Joint::LeftKnee),
            pose.get(Joint::LeftAnkle),
        );

        // Fallbacks are per comparison, not per angle.
        let is_up = shoulder.unwrap_or(0.0) < ARMS_LOWERED_BELOW
            && leg.unwrap_or(180.0) > LEG_STRAIGHT_ABOVE;
        let is_down = shoulder.unwrap_or(180.0) > ARMS_RAISED_ABOVE;

        PositionResult {
            accuracy: accuracy_toward(shoulder.unwrap_or(0.0), TARGET),
            is_down,
            is_up,
            feedback_rules: vec![FeedbackRule::new(RAISE_ARMS)
                .when(!is_up)
                .when_above(shoulder.unwrap_or(180.0), RAISE_HIGHER_ABOVE)],
        }
    }
}
