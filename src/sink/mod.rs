//! Outbound collaborators of a session.
//!
//! - [`Speaker`]: vocalizes feedback cues (shipped: [`LogSpeaker`]).
//! - [`HistorySink`]: stores the [`WorkoutSummary`] of each finished session
//!   (shipped: [`JsonlHistory`]).
//!
//! The engine knows nothing about either; the session runner and the binary
//! wire them in.

pub mod history;
pub mod speaker;

pub use history::{HistoryError, HistoryRecord, HistorySink, JsonlHistory, WorkoutSummary};
pub use speaker::{LogSpeaker, Speaker};

// test-only re-export for the runner tests.
#[cfg(test)]
pub use speaker::RecordingSpeaker;
