//! Per-session processing: engine facade, rep counting, feedback debouncing
//! and the async runner that ties them to a frame channel.
//!
//! # Architecture
//!
//! ```text
//! PoseSource ──▶ mpsc::Receiver<ExerciseSample>
//!                       │
//!                       ▼
//!              SessionRunner::run()  ← async tokio task
//!                       │
//!                       ├─ ExerciseEngine::process
//!                       │     ├─ KeypointSmoother
//!                       │     ├─ Evaluator            → PositionResult
//!                       │     ├─ RepStateMachine      → phase, reps
//!                       │     └─ FeedbackDebouncer    → Option<cue>
//!                       ├─ Speaker::speak(cue)
//!                       └─ WorkoutSummary on channel close
//!
//! SharedState (Arc<Mutex<SessionState>>) ←─── read by a UI
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use pose_coach::exercise::Exercise;
//! use pose_coach::pipeline::{new_shared_state, EngineSettings, ExerciseEngine, SessionRunner};
//! use pose_coach::sink::LogSpeaker;
//!
//! #[tokio::main]
//! async fn main() {
//!     let state = new_shared_state(Exercise::Squat);
//!     let engine = ExerciseEngine::new(Exercise::Squat, EngineSettings::default());
//!
//!     let (frame_tx, frame_rx) = mpsc::channel(32);
//!     let runner = SessionRunner::new(engine, state.clone()).with_speaker(Arc::new(LogSpeaker));
//!
//!     // frame_tx is fed by a PoseSource
//!     # drop(frame_tx);
//!     let summary = runner.run(frame_rx).await;
//!     println!("{} reps", summary.reps);
//! }
//! ```

pub mod engine;
pub mod feedback;
pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use engine::{EngineSettings, ExerciseEngine, ExerciseResult};
pub use feedback::{
    DebounceSettings, FeedbackDebouncer, DEFAULT_COOLDOWN_MS, DEFAULT_MIN_CONDITION_MS,
};
pub use runner::SessionRunner;
pub use state::{new_shared_state, RepPhase, RepStateMachine, SessionState, SharedState};
