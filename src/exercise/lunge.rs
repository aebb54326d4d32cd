//! Lunge: the more bent of the front (left) and back (right) knees.

use crate::exercise::rules::{accuracy_toward, FeedbackRule, PositionResult};
use crate::pose::{joint_angle, Joint, Pose};

const DOWN_BELOW: f64 = 90.0;
const UP_ABOVE: f64 = 160.0;
const TARGET: f64 = 100.0;
const LOWER_HIPS_ABOVE: f64 = 120.0;
const TORSO_BELOW: f64 = 150.0;

pub const LOWER_HIPS: &str = "Lower your hips";
pub const TORSO_UPRIGHT: &str = "Keep torso upright";

#[derive(Debug, Clone, Copy, Default)]
pub struct LungeEvaluator;

impl LungeEvaluator {
    pub fn evaluate(&self, pose: &Pose) -> PositionResult {
        let front_knee = joint_angle(
            pose.get(Joint::LeftHip),
            pose.get(Joint::LeftKnee),
            pose.get(Joint::LeftAnkle),
        );
        let back_knee = joint_angle(
            pose.get(Joint::RightHip),
            pose.get(Joint::RightKnee),
            pose.get(Joint::RightAnkle),
        );
        let torso = joint_angle(
            pose.get(Joint::LeftShoulder),
            pose.get(Joint::LeftHip),
            pose.get(Joint::LeftKnee),
        )
        .unwrap_or(180.0);

        let knee = front_knee.unwrap_or(180.0).min(back_knee.unwrap_or(180.0));
        let is_down = knee < DOWN_BELOW;
        let is_up = knee > UP_ABOVE;

        PositionResult {
            accuracy: accuracy_toward(knee, TARGET),
            is_down,
            is_up,
            feedback_rules: vec![
                FeedbackRule::new(LOWER_HIPS)
                    .when(!is_down)
                    .when_above(knee, LOWER_HIPS_ABOVE),
                FeedbackRule::new(TORSO_UPRIGHT).when_below(torso, TORSO_BELOW),
            ],
        }
    }
}
