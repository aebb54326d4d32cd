//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files.  Every section is
//! `#[serde(default)]`, so a partial `settings.toml` fills the gaps with
//! defaults.
//!
//! ```toml
//! [session]
//! exercise = "squat"
//! frames_file = "/home/me/recordings/squats.jsonl"
//!
//! [smoothing]
//! window = 4
//!
//! [feedback]
//! cooldown_ms = 5000
//! min_condition_ms = 2000
//! voice_enabled = true
//!
//! [history]
//! enabled = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::exercise::Exercise;
use crate::pipeline::{DebounceSettings, EngineSettings, DEFAULT_COOLDOWN_MS, DEFAULT_MIN_CONDITION_MS};
use crate::pose::DEFAULT_SMOOTHING_WINDOW;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// What to run when no command-line arguments are given.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub exercise: Exercise,
    /// Recorded keypoint frames (JSON Lines) to replay.
    pub frames_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// SmoothingConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Frames in the keypoint moving average (minimum 1; 1 disables smoothing).
    pub window: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_SMOOTHING_WINDOW,
        }
    }
}

// ---------------------------------------------------------------------------
// FeedbackConfig
// ---------------------------------------------------------------------------

/// Spoken feedback timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Minimum milliseconds between two spoken cues.
    pub cooldown_ms: u64,
    /// Milliseconds a condition must hold before it is spoken.
    pub min_condition_ms: u64,
    /// Send cues to the speaker at all.
    pub voice_enabled: bool,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            min_condition_ms: DEFAULT_MIN_CONDITION_MS,
            voice_enabled: true,
        }
    }
}

// ---------------------------------------------------------------------------
// HistoryConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Persist a summary of every finished session.
    pub enabled: bool,
    /// Override for the history file; `None` uses [`AppPaths::history_file`].
    pub file: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: None,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use pose_coach::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub smoothing: SmoothingConfig,
    pub feedback: FeedbackConfig,
    pub history: HistoryConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.smoothing.window >= 1,
            "smoothing.window must be at least 1 (got {})",
            self.smoothing.window
        );
        Ok(())
    }

    /// Engine tunables derived from the `smoothing` and `feedback` sections.
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            smoothing_window: self.smoothing.window,
            debounce: DebounceSettings {
                cooldown_ms: self.feedback.cooldown_ms,
                min_condition_ms: self.feedback.min_condition_ms,
            },
        }
    }

    /// The history file to use, honouring `history.file`.
    pub fn history_file(&self, paths: &AppPaths) -> PathBuf {
        self.history
            .file
            .clone()
            .unwrap_or_else(|| paths.history_file.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// A default `AppConfig` survives a TOML round trip unchanged.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(original, loaded);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.session.exercise, Exercise::Squat);
        assert!(cfg.session.frames_file.is_none());
        assert_eq!(cfg.smoothing.window, 4);
        assert_eq!(cfg.feedback.cooldown_ms, 5_000);
        assert_eq!(cfg.feedback.min_condition_ms, 2_000);
        assert!(cfg.feedback.voice_enabled);
        assert!(cfg.history.enabled);
        assert!(cfg.history.file.is_none());
        assert_eq!(cfg.engine_settings(), EngineSettings::default());
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.session.exercise = Exercise::HeadRotation;
        cfg.session.frames_file = Some(PathBuf::from("/tmp/frames.jsonl"));
        cfg.smoothing.window = 2;
        cfg.feedback.cooldown_ms = 8_000;
        cfg.feedback.voice_enabled = false;
        cfg.history.file = Some(PathBuf::from("/tmp/history.jsonl"));

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded, cfg);
        assert_eq!(loaded.engine_settings().smoothing_window, 2);
        assert_eq!(loaded.engine_settings().debounce.cooldown_ms, 8_000);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[session]\nexercise = \"jumpingjack\"\n").expect("write");

        let cfg = AppConfig::load_from(&path).expect("load");
        assert_eq!(cfg.session.exercise, Exercise::JumpingJack);
        assert_eq!(cfg.smoothing, SmoothingConfig::default());
        assert_eq!(cfg.feedback, FeedbackConfig::default());
    }

    #[test]
    fn zero_window_is_rejected() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[smoothing]\nwindow = 0\n").expect("write");

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("smoothing.window"));
    }

    #[test]
    fn unknown_exercise_is_a_parse_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[session]\nexercise = \"plank\"\n").expect("write");

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn history_file_override() {
        let paths = AppPaths::new();
        let mut cfg = AppConfig::default();
        assert_eq!(cfg.history_file(&paths), paths.history_file);

        cfg.history.file = Some(PathBuf::from("/tmp/mine.jsonl"));
        assert_eq!(cfg.history_file(&paths), PathBuf::from("/tmp/mine.jsonl"));
    }
}
