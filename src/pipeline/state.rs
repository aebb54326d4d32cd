//! Repetition state machine and shared session state.
//!
//! [`RepStateMachine`] turns the evaluator's per-frame `is_down` / `is_up`
//! signals into a [`RepPhase`] and a repetition count.  It holds no
//! kinematic knowledge of its own.
//!
//! [`SessionState`] is the single source of truth for a UI watching a
//! running session: latest result, last spoken cue and frame count.
//! [`SharedState`] is a type alias for `Arc<Mutex<SessionState>>`.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::exercise::Exercise;
use crate::pipeline::engine::ExerciseResult;

// ---------------------------------------------------------------------------
// RepPhase
// ---------------------------------------------------------------------------

/// Phase of the current repetition.
///
/// ```text
/// Idle ──down──▶ Down ──up (rep += 1)──▶ Up ──down──▶ Down ──▶ …
/// ```
///
/// `Idle` is only ever the initial phase; it is never re-entered except by
/// [`RepStateMachine::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepPhase {
    #[default]
    Idle,
    Down,
    Up,
}

impl RepPhase {
    /// Lowercase label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            RepPhase::Idle => "idle",
            RepPhase::Down => "down",
            RepPhase::Up => "up",
        }
    }
}

// ---------------------------------------------------------------------------
// RepStateMachine
// ---------------------------------------------------------------------------

/// Counts repetitions from down/up signals.
#[derive(Debug, Clone, Default)]
pub struct RepStateMachine {
    phase: RepPhase,
    reps: u32,
}

impl RepStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RepPhase {
        self.phase
    }

    pub fn reps(&self) -> u32 {
        self.reps
    }

    /// Apply one frame's signals and return the resulting `(phase, reps)`.
    ///
    /// The three transitions are checked in a fixed order within a single
    /// call, so a frame that is both down and up can advance more than one
    /// step.  Down → Up is the only place the count increases.
    pub fn update(&mut self, is_down: bool, is_up: bool) -> (RepPhase, u32) {
        if self.phase == RepPhase::Idle && is_down {
            self.phase = RepPhase::Down;
        }
        if self.phase == RepPhase::Down && is_up {
            self.phase = RepPhase::Up;
            self.reps += 1;
            log::debug!("rep completed (total {})", self.reps);
        }
        if self.phase == RepPhase::Up && is_down {
            self.phase = RepPhase::Down;
        }
        (self.phase, self.reps)
    }

    /// Back to `Idle` with zero reps (session start only).
    pub fn reset(&mut self) {
        self.phase = RepPhase::Idle;
        self.reps = 0;
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// What a UI needs to render a running session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub exercise: Exercise,
    /// Most recent per-frame result; `None` before the first frame.
    pub latest: Option<ExerciseResult>,
    /// Last non-null feedback, kept on screen until replaced.
    pub last_feedback: Option<String>,
    pub frames: u64,
    /// `false` once the frame stream has ended.
    pub running: bool,
}

impl SessionState {
    pub fn new(exercise: Exercise) -> Self {
        Self {
            exercise,
            latest: None,
            last_feedback: None,
            frames: 0,
            running: false,
        }
    }

    /// Rep count of the latest result (0 before the first frame).
    pub fn reps(&self) -> u32 {
        self.latest.as_ref().map_or(0, |r| r.reps)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Exercise::default())
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`SessionState`].
///
/// Cheap to clone (`Arc` clone).  Hold the lock only for short critical
/// sections and never across `.await` points.
pub type SharedState = Arc<Mutex<SessionState>>;

pub fn new_shared_state(exercise: Exercise) -> SharedState {
    Arc::new(Mutex::new(SessionState::new(exercise)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
