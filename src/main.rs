//! Application entry point: replays a recorded keypoint session.
//!
//! ```text
//! pose-coach [exercise] [frames.jsonl]
//! pose-coach history
//! ```
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Apply command-line overrides.
//! 4. Create the [`tokio`] runtime.
//! 5. Spawn the frame reader on a blocking thread, feeding a bounded channel.
//! 6. Run the [`SessionRunner`] until the reader closes the channel.
//! 7. Hand the summary to the history sink and print it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::sync::mpsc;

use pose_coach::config::{AppConfig, AppPaths};
use pose_coach::exercise::Exercise;
use pose_coach::pipeline::{new_shared_state, ExerciseEngine, SessionRunner};
use pose_coach::sink::{HistorySink, JsonlHistory, LogSpeaker};
use pose_coach::source::{feed_channel, JsonlPoseSource};

/// Frames buffered between the reader and the engine.
const FRAME_CHANNEL_CAPACITY: usize = 64;

const USAGE: &str = "usage: pose-coach [exercise] [frames.jsonl]\n       pose-coach history";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

enum Command {
    Session {
        exercise: Exercise,
        frames_file: PathBuf,
    },
    History,
}

fn parse_args(args: &[String], config: &AppConfig) -> Result<Command> {
    if args.first().map(String::as_str) == Some("history") {
        return Ok(Command::History);
    }
    if args.len() > 2 {
        bail!("too many arguments\n{USAGE}");
    }

    let exercise = match args.first() {
        Some(name) => name.parse::<Exercise>()?,
        None => config.session.exercise,
    };
    let frames_file = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => match &config.session.frames_file {
            Some(path) => path.clone(),
            None => bail!("no frames file given and session.frames_file is not set\n{USAGE}"),
        },
    };

    Ok(Command::Session {
        exercise,
        frames_file,
    })
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

async fn run_session(config: &AppConfig, exercise: Exercise, frames_file: PathBuf) -> Result<()> {
    let mut source = JsonlPoseSource::open(&frames_file)?;
    let (frame_tx, frame_rx) = mpsc::channel(FRAME_CHANNEL_CAPACITY);

    let reader = tokio::task::spawn_blocking(move || feed_channel(&mut source, &frame_tx));

    let state = new_shared_state(exercise);
    let engine = ExerciseEngine::new(exercise, config.engine_settings());
    let mut runner = SessionRunner::new(engine, Arc::clone(&state));
    if config.feedback.voice_enabled {
        runner = runner.with_speaker(Arc::new(LogSpeaker));
    }

    let summary = runner.run(frame_rx).await;

    let frames = reader
        .await
        .context("frame reader task failed")?
        .with_context(|| format!("reading {}", frames_file.display()))?;
    log::debug!("read {frames} frames from {}", frames_file.display());

    if config.history.enabled {
        let history = JsonlHistory::new(config.history_file(&AppPaths::new()));
        if let Err(e) = history.record(summary).await {
            log::warn!("could not save workout history: {e}");
        }
    }

    println!(
        "{}: {} reps, {}% accuracy, {:.1} s",
        exercise.title(),
        summary.reps,
        summary.accuracy,
        summary.duration_ms as f64 / 1000.0
    );
    Ok(())
}

async fn show_history(config: &AppConfig) -> Result<()> {
    let history = JsonlHistory::new(config.history_file(&AppPaths::new()));
    let records = history.list().await?;
    if records.is_empty() {
        println!("no workouts recorded yet");
        return Ok(());
    }
    for record in records {
        let s = record.summary;
        println!(
            "{:>15}  {:<15} {:>4} reps  {:>3}%  {:>6.1} s",
            record.recorded_at,
            s.exercise.title(),
            s.reps,
            s.accuracy,
            s.duration_ms as f64 / 1000.0
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e:#}); using defaults");
        AppConfig::default()
    });

    // 3. Command line
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args, &config)?;

    // 4. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    rt.block_on(async {
        match command {
            Command::Session {
                exercise,
                frames_file,
            } => run_session(&config, exercise, frames_file).await,
            Command::History => show_history(&config).await,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn positional_arguments_override_config() {
        let config = AppConfig::default();
        match parse_args(&args(&["lunges", "/tmp/f.jsonl"]), &config).expect("parse") {
            Command::Session {
                exercise,
                frames_file,
            } => {
                assert_eq!(exercise, Exercise::Lunge);
                assert_eq!(frames_file, PathBuf::from("/tmp/f.jsonl"));
            }
            Command::History => panic!("expected a session"),
        }
    }

    #[test]
    fn falls_back_to_configured_session() {
        let mut config = AppConfig::default();
        config.session.exercise = Exercise::PushUp;
        config.session.frames_file = Some(PathBuf::from("/tmp/push.jsonl"));
        match parse_args(&[], &config).expect("parse") {
            Command::Session {
                exercise,
                frames_file,
            } => {
                assert_eq!(exercise, Exercise::PushUp);
                assert_eq!(frames_file, PathBuf::from("/tmp/push.jsonl"));
            }
            Command::History => panic!("expected a session"),
        }
    }

    #[test]
    fn missing_frames_file_is_an_error() {
        assert!(parse_args(&args(&["squat"]), &AppConfig::default()).is_err());
    }

    #[test]
    fn unknown_exercise_is_an_error() {
        let err = parse_args(&args(&["plank", "f.jsonl"]), &AppConfig::default())
            .err()
            .expect("error");
        assert!(err.to_string().contains("plank"));
    }

    #[test]
    fn history_command() {
        assert!(matches!(
            parse_args(&args(&["history"]), &AppConfig::default()),
            Ok(Command::History)
        ));
    }
}
