//! Exercise evaluators: map a smoothed pose to a [`PositionResult`].
//!
//! The set of exercises is closed, so dispatch is a plain `match` over
//! [`Evaluator`] rather than a trait object.
//!
//! | Exercise     | Primary measurement                    | Down            | Up                      |
//! |--------------|----------------------------------------|-----------------|-------------------------|
//! | Squat        | mean knee angle                        | `< 70°`         | `> 160°`                |
//! | Push-up      | min elbow angle                        | `< 70°`         | `> 160°`                |
//! | Lunge        | min knee angle                         | `< 90°`         | `> 160°`                |
//! | Jumping jack | shoulder + leg angle                   | shoulder `> 120°` | shoulder `< 60°`, leg `> 170°` |
//! | Head rotation| nose offset / ear distance             | `|o| > 0.3`     | `|o| < 0.2`             |
//!
//! # Example
//!
//! ```rust
//! use pose_coach::exercise::{Evaluator, Exercise};
//! use pose_coach::pose::{ExerciseSample, Pose};
//!
//! let exercise: Exercise = "squat".parse().unwrap();
//! let mut evaluator = Evaluator::for_exercise(exercise);
//! let result = evaluator.evaluate_position(&ExerciseSample::new(Pose::empty(), 0));
//! assert!(result.accuracy >= 0.0 && result.accuracy <= 100.0);
//! ```

pub mod head_rotation;
pub mod jumping_jack;
pub mod lunge;
pub mod pushup;
pub mod rules;
pub mod squat;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pose::ExerciseSample;

pub use head_rotation::{HeadDirection, HeadRotationEvaluator};
pub use jumping_jack::JumpingJackEvaluator;
pub use lunge::LungeEvaluator;
pub use pushup::PushUpEvaluator;
pub use rules::{accuracy_toward, Check, FeedbackRule, PositionResult};
pub use squat::SquatEvaluator;

// ---------------------------------------------------------------------------
// Exercise
// ---------------------------------------------------------------------------

/// The supported exercises.
///
/// Serialized as the lowercase route name (`"squat"`, `"pushup"`, `"lunge"`,
/// `"jumpingjack"`, `"headrotation"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exercise {
    #[default]
    Squat,
    PushUp,
    Lunge,
    JumpingJack,
    HeadRotation,
}

impl Exercise {
    pub const ALL: [Exercise; 5] = [
        Exercise::Squat,
        Exercise::PushUp,
        Exercise::Lunge,
        Exercise::JumpingJack,
        Exercise::HeadRotation,
    ];

    /// Canonical route name.
    pub fn slug(self) -> &'static str {
        match self {
            Exercise::Squat => "squat",
            Exercise::PushUp => "pushup",
            Exercise::Lunge => "lunge",
            Exercise::JumpingJack => "jumpingjack",
            Exercise::HeadRotation => "headrotation",
        }
    }

    /// Display title, e.g. for a session header.
    pub fn title(self) -> &'static str {
        match self {
            Exercise::Squat => "Squats",
            Exercise::PushUp => "Pushups",
            Exercise::Lunge => "Lunges",
            Exercise::JumpingJack => "Jumping Jacks",
            Exercise::HeadRotation => "Head Rotations",
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// The name did not match any supported exercise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown exercise {0:?} (expected one of: squat, pushup, lunge, jumpingjack, headrotation)")]
pub struct UnknownExercise(pub String);

impl FromStr for Exercise {
    type Err = UnknownExercise;

    /// Case-insensitive; `-`, `_` and spaces are ignored and a trailing
    /// plural `s` is accepted (`"Push-Ups"`, `"jumping_jack"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        let by_slug = |key: &str| Exercise::ALL.into_iter().find(|e| e.slug() == key);

        by_slug(normalized.as_str())
            .or_else(|| normalized.strip_suffix('s').and_then(by_slug))
            .ok_or_else(|| UnknownExercise(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// The active per-exercise evaluator.
#[derive(Debug, Clone)]
pub enum Evaluator {
    Squat(SquatEvaluator),
    PushUp(PushUpEvaluator),
    Lunge(LungeEvaluator),
    JumpingJack(JumpingJackEvaluator),
    HeadRotation(HeadRotationEvaluator),
}

impl Evaluator {
    pub fn for_exercise(exercise: Exercise) -> Self {
        match exercise {
            Exercise::Squat => Evaluator::Squat(SquatEvaluator),
            Exercise::PushUp => Evaluator::PushUp(PushUpEvaluator),
            Exercise::Lunge => Evaluator::Lunge(LungeEvaluator),
            Exercise::JumpingJack => Evaluator::JumpingJack(JumpingJackEvaluator),
            Exercise::HeadRotation => Evaluator::HeadRotation(HeadRotationEvaluator::new()),
        }
    }

    pub fn exercise(&self) -> Exercise {
        match self {
            Evaluator::Squat(_) => Exercise::Squat,
            Evaluator::PushUp(_) => Exercise::PushUp,
            Evaluator::Lunge(_) => Exercise::Lunge,
            Evaluator::JumpingJack(_) => Exercise::JumpingJack,
            Evaluator::HeadRotation(_) => Exercise::HeadRotation,
        }
    }

    /// Assess one (smoothed) frame.  Never fails; unmeasurable input degrades
    /// to fallback angles or a neutral result.
    pub fn evaluate_position(&mut self, sample: &ExerciseSample) -> PositionResult {
        let pose = &sample.pose;
        match self {
            Evaluator::Squat(e) => e.evaluate(pose),
            Evaluator::PushUp(e) => e.evaluate(pose),
            Evaluator::Lunge(e) => e.evaluate(pose),
            Evaluator::JumpingJack(e) => e.evaluate(pose),
            Evaluator::HeadRotation(e) => e.evaluate(pose),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
