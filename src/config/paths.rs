//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings):
//!   Windows: %APPDATA%\pose-coach\
//!   macOS:   ~/Library/Application Support/pose-coach/
//!   Linux:   ~/.config/pose-coach/
//!
//! Data dir (workout history):
//!   Windows: %LOCALAPPDATA%\pose-coach\
//!   macOS:   ~/Library/Application Support/pose-coach/
//!   Linux:   ~/.local/share/pose-coach/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Directory for persisted session data.
    pub data_dir: PathBuf,
    /// Full path to `history.jsonl`.
    pub history_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "pose-coach";

    /// Platform config and data directories, each with a `pose-coach`
    /// subdirectory; `.` stands in for a directory the platform lacks.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let history_file = data_dir.join("history.jsonl");

        Self {
            config_dir,
            settings_file,
            data_dir,
            history_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
