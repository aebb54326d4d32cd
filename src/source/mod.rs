//! Inbound pose frames.
//!
//! The pose estimator is an injected capability: anything implementing
//! [`PoseSource`] can drive a session.  [`JsonlPoseSource`] replays frames
//! recorded as JSON Lines.
//!
//! ```text
//! PoseSource ──feed_channel (blocking thread)──▶ mpsc::Sender<ExerciseSample>
//!                                                    │
//!                                                    ▼
//!                                             SessionRunner::run
//! ```

pub mod jsonl;

use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::pose::ExerciseSample;

pub use jsonl::JsonlPoseSource;

// ---------------------------------------------------------------------------
// SourceError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot open frame file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read frame: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed frame on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// PoseSource trait
// ---------------------------------------------------------------------------

/// Produces raw pose frames in capture order.
///
/// Implementations may block; callers run them off the async runtime.
pub trait PoseSource: Send {
    /// The next frame, or `Ok(None)` once the source is exhausted.
    fn next_sample(&mut self) -> Result<Option<ExerciseSample>, SourceError>;
}

// Compile-time assertion: Box<dyn PoseSource> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn PoseSource>) {}
};

/// Push every frame from `source` into `tx` until the source is exhausted or
/// the receiver is dropped.  Returns the number of frames sent.
///
/// Blocks the calling thread; run it under `tokio::task::spawn_blocking`.
pub fn feed_channel(
    source: &mut dyn PoseSource,
    tx: &mpsc::Sender<ExerciseSample>,
) -> Result<u64, SourceError> {
    let mut sent = 0;
    while let Some(sample) = source.next_sample()? {
        if tx.blocking_send(sample).is_err() {
            log::debug!("source: receiver dropped after {sent} frames");
            break;
        }
        sent += 1;
    }
    Ok(sent)
}
