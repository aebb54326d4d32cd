//! Session runner: drives one [`ExerciseEngine`] from a frame channel.
//!
//! [`SessionRunner`] owns the engine and the [`SharedState`], and consumes
//! [`ExerciseSample`]s from a `tokio::sync::mpsc` channel until every sender
//! is dropped.
//!
//! # Flow
//!
//! ```text
//! ExerciseSample (mpsc)
//!   └─▶ ExerciseEngine::process            [sync, O(17)]
//!         ├─▶ SharedState: latest result, frame count
//!         └─▶ feedback is Some
//!               ├─▶ SharedState.last_feedback
//!               └─▶ Speaker::speak (verbatim)
//! channel closed
//!   └─▶ running = false, return WorkoutSummary
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::pipeline::engine::{ExerciseEngine, ExerciseResult};
use crate::pipeline::state::SharedState;
use crate::pose::ExerciseSample;
use crate::sink::{Speaker, WorkoutSummary};

/// Runs one session.
///
/// ```rust,no_run
/// use pose_coach::exercise::Exercise;
/// use pose_coach::pipeline::{new_shared_state, EngineSettings, ExerciseEngine, SessionRunner};
///
/// # async fn example() {
/// let state = new_shared_state(Exercise::Squat);
/// let engine = ExerciseEngine::new(Exercise::Squat, EngineSettings::default());
/// let (frame_tx, frame_rx) = tokio::sync::mpsc::channel(32);
///
/// let runner = SessionRunner::new(engine, state);
/// // frame_tx is handed to the pose source
/// # drop(frame_tx);
/// let summary = runner.run(frame_rx).await;
/// # }
/// ```
pub struct SessionRunner {
    engine: ExerciseEngine,
    state: SharedState,
    speaker: Option<Arc<dyn Speaker>>,
}

impl SessionRunner {
    /// Create a runner.  The engine is reset so every run is a fresh session.
    pub fn new(mut engine: ExerciseEngine, state: SharedState) -> Self {
        engine.reset();
        Self {
            engine,
            state,
            speaker: None,
        }
    }

    /// Speak every non-null feedback cue through `speaker`.
    pub fn with_speaker(mut self, speaker: Arc<dyn Speaker>) -> Self {
        self.speaker = Some(speaker);
        self
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Process frames until `frames` is closed, then return the session summary.
    pub async fn run(mut self, mut frames: mpsc::Receiver<ExerciseSample>) -> WorkoutSummary {
        let exercise = self.engine.exercise();
        log::info!("session: {} started", exercise.title());
        {
            let mut st = self.state.lock().unwrap();
            st.exercise = exercise;
            st.latest = None;
            st.last_feedback = None;
            st.frames = 0;
            st.running = true;
        }

        while let Some(sample) = frames.recv().await {
            let result = self.engine.process(&sample);
            self.publish(&result);
        }

        let summary = self.engine.summary();
        self.state.lock().unwrap().running = false;
        log::info!(
            "session: {} finished, {} reps, {}% accuracy over {} ms",
            exercise.title(),
            summary.reps,
            summary.accuracy,
            summary.duration_ms
        );
        summary
    }

    fn publish(&self, result: &ExerciseResult) {
        {
            let mut st = self.state.lock().unwrap();
            st.frames += 1;
            st.latest = Some(result.clone());
            if let Some(feedback) = &result.feedback {
                st.last_feedback = Some(feedback.clone());
            }
        }

        // Lock released before calling out.
        if let (Some(feedback), Some(speaker)) = (&result.feedback, &self.speaker) {
            speaker.speak(feedback);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
