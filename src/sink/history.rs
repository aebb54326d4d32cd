//! Workout history: one [`WorkoutSummary`] per finished session.
//!
//! [`JsonlHistory`] appends one JSON object per line, so a crash mid-write can
//! at worst corrupt the last line.  Corrupt lines are skipped on read.
//!
//! ```text
//! {"exercise":"squat","reps":12,"accuracy":81,"durationMs":64000,"recordedAt":1760870400000}
//! ```

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::AsyncWriteExt;

use crate::exercise::Exercise;

// ---------------------------------------------------------------------------
// WorkoutSummary
// ---------------------------------------------------------------------------

/// Totals for one finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    pub exercise: Exercise,
    pub reps: u32,
    /// Mean per-frame accuracy, rounded, 0–100.
    pub accuracy: u8,
    pub duration_ms: u64,
}

/// A persisted [`WorkoutSummary`] plus the wall-clock time it was stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    #[serde(flatten)]
    pub summary: WorkoutSummary,
    /// Unix time in milliseconds.
    pub recorded_at: u64,
}

impl HistoryRecord {
    /// Stamp `summary` with the current wall-clock time.
    pub fn now(summary: WorkoutSummary) -> Self {
        let recorded_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            summary,
            recorded_at,
        }
    }
}

// ---------------------------------------------------------------------------
// HistoryError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode history record: {0}")]
    Encode(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// HistorySink trait
// ---------------------------------------------------------------------------

/// Receives the summary of every finished session.
#[async_trait]
pub trait HistorySink: Send + Sync {
    async fn record(&self, summary: WorkoutSummary) -> Result<HistoryRecord, HistoryError>;
}

// ---------------------------------------------------------------------------
// JsonlHistory
// ---------------------------------------------------------------------------

/// Append-only JSON Lines history file.
#[derive(Debug, Clone)]
pub struct JsonlHistory {
    path: PathBuf,
}

impl JsonlHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All readable records, most recent first.  A missing file is an empty
    /// history.
    pub async fn list(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        let mut records = Vec::new();
        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<HistoryRecord>(line) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!(
                    "history: skipping corrupt line {} in {}: {e}",
                    i + 1,
                    self.path.display()
                ),
            }
        }
        records.reverse();
        Ok(records)
    }

    fn io_error(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl HistorySink for JsonlHistory {
    async fn record(&self, summary: WorkoutSummary) -> Result<HistoryRecord, HistoryError> {
        let record = HistoryRecord::now(summary);
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| self.io_error(e))?;
        file.flush().await.map_err(|e| self.io_error(e))?;

        log::info!(
            "history: recorded {} x{} ({}%) to {}",
            summary.exercise,
            summary.reps,
            summary.accuracy,
            self.path.display()
        );
        Ok(record)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn summary(exercise: Exercise, reps: u32) -> WorkoutSummary {
        WorkoutSummary {
            exercise,
            reps,
            accuracy: 80,
            duration_ms: 30_000,
        }
    }

    fn history_in_temp() -> (JsonlHistory, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let history = JsonlHistory::new(dir.path().join("nested").join("history.jsonl"));
        (history, dir)
    }

    #[test]
    fn summary_uses_camel_case() {
        let json = serde_json::to_value(summary(Exercise::JumpingJack, 3)).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "exercise": "jumpingjack",
                "reps": 3,
                "accuracy": 80,
                "durationMs": 30000
            })
        );
    }

    #[test]
    fn record_flattens_summary() {
        let record = HistoryRecord {
            summary: summary(Exercise::Squat, 1),
            recorded_at: 42,
        };
        let json = serde_json::to_string(&record).expect("serialize");
        assert!(json.contains("\"durationMs\":30000"));
        assert!(json.contains("\"recordedAt\":42"));
        let back: HistoryRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, record);
    }

    #[tokio::test]
    async fn missing_file_is_empty_history() {
        let (history, _dir) = history_in_temp();
        assert!(history.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn lists_most_recent_first() {
        let (history, _dir) = history_in_temp();
        history.record(summary(Exercise::Squat, 10)).await.expect("record");
        history.record(summary(Exercise::Lunge, 8)).await.expect("record");
        history.record(summary(Exercise::PushUp, 5)).await.expect("record");

        let exercises: Vec<Exercise> = history
            .list()
            .await
            .expect("list")
            .iter()
            .map(|r| r.summary.exercise)
            .collect();
        assert_eq!(exercises, vec![Exercise::PushUp, Exercise::Lunge, Exercise::Squat]);
    }

    #[tokio::test]
    async fn corrupt_lines_are_skipped() {
        let (history, _dir) = history_in_temp();
        history.record(summary(Exercise::Squat, 1)).await.expect("record");

        let mut content = tokio::fs::read_to_string(history.path()).await.expect("read");
        content.push_str("{not json\n\n");
        tokio::fs::write(history.path(), content).await.expect("write");

        history.record(summary(Exercise::Lunge, 2)).await.expect("record");

        let records = history.list().await.expect("list");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].summary.reps, 2);
        assert_eq!(records[1].summary.reps, 1);
    }

    #[tokio::test]
    async fn works_behind_arc_dyn() {
        let (history, _dir) = history_in_temp();
        let sink: Arc<dyn HistorySink> = Arc::new(history.clone());
        let record = sink.record(summary(Exercise::HeadRotation, 4)).await.expect("record");
        assert!(record.recorded_at > 0);
        assert_eq!(history.list().await.expect("list"), vec![record]);
    }
}
