//! Per-frame evaluation output: [`PositionResult`] and its [`FeedbackRule`]s.
//!
//! A feedback rule is a message plus a list of threshold [`Check`]s that were
//! captured from the current frame's measurements.  The rule is active when
//! every check holds.  Rules are rebuilt every frame, so there is nothing to
//! capture by reference and nothing goes stale between frames.

// ---------------------------------------------------------------------------
// Check
// ---------------------------------------------------------------------------

/// A single comparison evaluated against values measured this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    /// A boolean already derived for this frame (e.g. "not in the down position").
    Flag(bool),
    /// `value < limit`
    Below { value: f64, limit: f64 },
    /// `value > limit`
    Above { value: f64, limit: f64 },
}

impl Check {
    pub fn holds(&self) -> bool {
        match *self {
            Check::Flag(flag) => flag,
            Check::Below { value, limit } => value < limit,
            Check::Above { value, limit } => value > limit,
        }
    }
}

// ---------------------------------------------------------------------------
// FeedbackRule
// ---------------------------------------------------------------------------

/// A candidate spoken cue.  Message text is stable per exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRule {
    pub message: &'static str,
    checks: Vec<Check>,
}

impl FeedbackRule {
    /// A rule with no checks yet (always active until checks are added).
    pub fn new(message: &'static str) -> Self {
        Self {
            message,
            checks: Vec::new(),
        }
    }

    pub fn when(mut self, flag: bool) -> Self {
        self.checks.push(Check::Flag(flag));
        self
    }

    pub fn when_below(mut self, value: f64, limit: f64) -> Self {
        self.checks.push(Check::Below { value, limit });
        self
    }

    pub fn when_above(mut self, value: f64, limit: f64) -> Self {
        self.checks.push(Check::Above { value, limit });
        self
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// `true` when every check holds for the frame this rule was built from.
    pub fn is_active(&self) -> bool {
        self.checks.iter().all(Check::holds)
    }
}

// ---------------------------------------------------------------------------
// PositionResult
// ---------------------------------------------------------------------------

/// Assessment of a single frame by an exercise evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionResult {
    /// Form score in `[0, 100]`.
    pub accuracy: f64,
    pub is_down: bool,
    pub is_up: bool,
    /// Candidate cues in priority order (first active wins).
    pub feedback_rules: Vec<FeedbackRule>,
}

impl PositionResult {
    /// Result used when the pose cannot be assessed at all.
    pub fn neutral() -> Self {
        Self {
            accuracy: 50.0,
            is_down: false,
            is_up: false,
            feedback_rules: Vec::new(),
        }
    }
}

/// `100 − |angle − target|`, clamped to `[0, 100]`.
pub fn accuracy_toward(angle: f64, target: f64) -> f64 {
    (100.0 - (angle - target).abs()).clamp(0.0, 100.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
