//! The per-session engine facade.
//!
//! ```text
//! ExerciseSample ─▶ KeypointSmoother ─▶ Evaluator ─▶ PositionResult
//!                                                      │
//!                         ┌────────────────────────────┤
//!                         ▼                            ▼
//!               RepStateMachine::update     FeedbackDebouncer::evaluate
//!                         │                            │
//!                         └──────────▶ ExerciseResult ◀┘
//! ```
//!
//! One [`ExerciseEngine`] is scoped to exactly one session.  It is driven
//! synchronously (`&mut self`) and is the only place that mutates rep count,
//! phase or debounce timers.
//!
//! # Example
//!
//! ```rust
//! use pose_coach::exercise::Exercise;
//! use pose_coach::pipeline::{EngineSettings, ExerciseEngine, RepPhase};
//! use pose_coach::pose::{ExerciseSample, Pose};
//!
//! let mut engine = ExerciseEngine::new(Exercise::Squat, EngineSettings::default());
//! let result = engine.process(&ExerciseSample::new(Pose::empty(), 0));
//! assert_eq!(result.reps, 0);
//! assert_eq!(result.state, RepPhase::Idle);
//! ```

use serde::{Deserialize, Serialize};

use crate::exercise::{Evaluator, Exercise};
use crate::pipeline::feedback::{DebounceSettings, FeedbackDebouncer};
use crate::pipeline::state::{RepPhase, RepStateMachine};
use crate::pose::{ExerciseSample, KeypointSmoother, DEFAULT_SMOOTHING_WINDOW};
use crate::sink::WorkoutSummary;

// ---------------------------------------------------------------------------
// ExerciseResult
// ---------------------------------------------------------------------------

/// Per-frame output handed to the UI and the speaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseResult {
    pub reps: u32,
    pub state: RepPhase,
    /// Form score for this frame, 0–100.
    pub accuracy: f64,
    /// A cue to speak verbatim, at most one per frame.
    pub feedback: Option<String>,
}

// ---------------------------------------------------------------------------
// EngineSettings
// ---------------------------------------------------------------------------

/// Tunables for one engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Moving-average window in frames; values below 1 are treated as 1.
    pub smoothing_window: usize,
    pub debounce: DebounceSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            debounce: DebounceSettings::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// ExerciseEngine
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ExerciseEngine {
    exercise: Exercise,
    settings: EngineSettings,
    smoother: KeypointSmoother,
    evaluator: Evaluator,
    reps: RepStateMachine,
    /// Created on the first frame.
    feedback: Option<FeedbackDebouncer>,
    /// Accuracy of the most recent frame.
    last_accuracy: Option<f64>,
    frames: u64,
    first_timestamp_ms: Option<u64>,
    last_timestamp_ms: Option<u64>,
}

impl ExerciseEngine {
    pub fn new(exercise: Exercise, settings: EngineSettings) -> Self {
        Self {
            exercise,
            settings,
            smoother: KeypointSmoother::new(settings.smoothing_window.max(1)),
            evaluator: Evaluator::for_exercise(exercise),
            reps: RepStateMachine::new(),
            feedback: None,
            last_accuracy: None,
            frames: 0,
            first_timestamp_ms: None,
            last_timestamp_ms: None,
        }
    }

    pub fn exercise(&self) -> Exercise {
        self.exercise
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    /// Frames processed since construction or the last [`reset`](Self::reset).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one raw frame through the whole chain.
    pub fn process(&mut self, sample: &ExerciseSample) -> ExerciseResult {
        let smoothed = ExerciseSample::new(self.smoother.smooth(&sample.pose), sample.timestamp_ms);
        let position = self.evaluator.evaluate_position(&smoothed);

        let previous_phase = self.reps.phase();
        let (state, reps) = self.reps.update(position.is_down, position.is_up);
        if state != previous_phase {
            log::debug!(
                "{}: {} -> {} at {} ms",
                self.exercise,
                previous_phase.label(),
                state.label(),
                sample.timestamp_ms
            );
        }

        let debounce = self.settings.debounce;
        let feedback = self
            .feedback
            .get_or_insert_with(|| FeedbackDebouncer::new(debounce))
            .evaluate(&position.feedback_rules, sample.timestamp_ms)
            .map(str::to_owned);

        self.last_accuracy = Some(position.accuracy);
        self.frames += 1;
        self.first_timestamp_ms.get_or_insert(sample.timestamp_ms);
        self.last_timestamp_ms = Some(sample.timestamp_ms);

        ExerciseResult {
            reps,
            state,
            accuracy: position.accuracy,
            feedback,
        }
    }

    /// Accuracy of the latest frame; `None` before the first frame.
    pub fn last_accuracy(&self) -> Option<f64> {
        self.last_accuracy
    }

    /// Session totals as of now.
    pub fn summary(&self) -> WorkoutSummary {
        let accuracy = self.last_accuracy.unwrap_or(0.0).round().clamp(0.0, 100.0) as u8;
        let duration_ms = match (self.first_timestamp_ms, self.last_timestamp_ms) {
            (Some(first), Some(last)) => last.saturating_sub(first),
            _ => 0,
        };
        WorkoutSummary {
            exercise: self.exercise,
            reps: self.reps.reps(),
            accuracy,
            duration_ms,
        }
    }

    /// Start a fresh session with the same exercise and settings.
    pub fn reset(&mut self) {
        self.smoother.clear();
        self.evaluator = Evaluator::for_exercise(self.exercise);
        self.reps.reset();
        self.feedback = None;
        self.last_accuracy = None;
        self.frames = 0;
        self.first_timestamp_ms = None;
        self.last_timestamp_ms = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
