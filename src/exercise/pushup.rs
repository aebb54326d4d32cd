//! Push-up: the more bent of the two elbows (shoulder–elbow–wrist).

use crate::exercise::rules::{accuracy_toward, FeedbackRule, PositionResult};
use crate::pose::{joint_angle, Joint, Pose};

const DOWN_BELOW: f64 = 70.0;
const UP_ABOVE: f64 = 160.0;
const TARGET: f64 = 90.0;
const LOWER_CHEST_ABOVE: f64 = 130.0;
const HIP_LINE_BELOW: f64 = 165.0;

pub const LOWER_CHEST: &str = "Lower your chest";
pub const BACK_STRAIGHT: &str = "Keep your back straight";

#[derive(Debug, Clone, Copy, Default)]
pub struct PushUpEvaluator;

impl PushUpEvaluator {
    pub fn evaluate(&self, pose: &Pose) -> PositionResult {
        let left_elbow = joint_angle(
            pose.get(Joint::LeftShoulder),
            pose.get(Joint::LeftElbow),
            pose.get(Joint::LeftWrist),
        );
        let right_elbow = joint_angle(
            pose.get(Joint::RightShoulder),
            pose.get(Joint::RightElbow),
            pose.get(Joint::RightWrist),
        );
        let hip_line = joint_angle(
            pose.get(Joint::LeftShoulder),
            pose.get(Joint::LeftHip),
            pose.get(Joint::RightHip),
        )
        .unwrap_or(180.0);

        let elbow = left_elbow.unwrap_or(180.0).min(right_elbow.unwrap_or(180.0));
        let is_down = elbow < DOWN_BELOW;
        let is_up = elbow > UP_ABOVE;

        PositionResult {
            accuracy: accuracy_toward(elbow, TARGET),
            is_down,
            is_up,
            feedback_rules: vec![
                FeedbackRule::new(LOWER_CHEST)
                    .when(!is_down)
                    .when_above(elbow, LOWER_CHEST_ABOVE),
                FeedbackRule::new(BACK_STRAIGHT).when_below(hip_line, HIP_LINE_BELOW),
            ],
        }
    }
}
