//! Squat: average knee angle (hip–knee–ankle) over both legs.

use crate::exercise::rules::{accuracy_toward, FeedbackRule, PositionResult};
use crate::pose::{average_angle, joint_angle, Joint, Pose};

const DOWN_BELOW: f64 = 70.0;
const UP_ABOVE: f64 = 160.0;
const TARGET: f64 = 90.0;
const BEND_MORE_ABOVE: f64 = 120.0;
const BACK_STRAIGHT_BELOW: f64 = 150.0;

pub const BEND_KNEES: &str = "Bend your knees more";
pub const BACK_STRAIGHT: &str = "Keep your back straight";

#[derive(Debug, Clone, Copy, Default)]
pub struct SquatEvaluator;

impl SquatEvaluator {
    pub fn evaluate(&self, pose: &Pose) -> PositionResult {
        let left_knee = joint_angle(
            pose.get(Joint::LeftHip),
            pose.get(Joint::LeftKnee),
            pose.get(Joint::LeftAnkle),
        );
        let right_knee = joint_angle(
            pose.get(Joint::RightHip),
            pose.get(Joint::RightKnee),
            pose.get(Joint::RightAnkle),
        );
        // Unknown knees read as standing.
        let knee = average_angle(&[left_knee, right_knee]).unwrap_or(180.0);
        let torso = joint_angle(
            pose.get(Joint::LeftShoulder),
            pose.get(Joint::LeftHip),
            pose.get(Joint::LeftKnee),
        )
        .unwrap_or(180.0);

        let is_down = knee < DOWN_BELOW;
        let is_up = knee > UP_ABOVE;

        PositionResult {
            accuracy: accuracy_toward(knee, TARGET),
            is_down,
            is_up,
            feedback_rules: vec![
                FeedbackRule::new(BEND_KNEES)
                    .when(!is_down)
                    .when_above(knee, BEND_MORE_ABOVE),
                FeedbackRule::new(BACK_STRAIGHT).when_below(torso, BACK_STRAIGHT_BELOW),
            ],
        }
    }
}
