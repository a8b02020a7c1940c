//! Configuration settings for focus-space.
//!
//! Settings are loaded from `~/.focus-space/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::FocusError;
use crate::features::focus::timer::{DurationPreset, DEFAULT_BREAK_REMINDER_MINUTES};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Focus timer settings.
    pub timer: TimerConfig,
    /// Ambient audio settings.
    pub audio: AudioConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// TUI color theme.
    #[serde(default)]
    pub theme: Theme,
}

/// TUI color theme.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light text on a dark terminal.
    #[default]
    Dark,
    /// Dark text on a light terminal.
    Light,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dark => write!(f, "dark"),
            Self::Light => write!(f, "light"),
        }
    }
}

/// Focus timer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Session length the timer starts with, in minutes.
    #[serde(default = "default_session_minutes")]
    pub default_minutes: u32,
    /// Minutes of focus before a break reminder.
    #[serde(default = "default_break_reminder")]
    pub break_reminder_minutes: u32,
    /// Enable desktop notifications.
    #[serde(default = "default_true")]
    pub notifications: bool,
}

/// Ambient audio settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Playback volume, 0.0 to 1.0.
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Start muted.
    #[serde(default)]
    pub muted: bool,
    /// Player program to use instead of auto-detection.
    #[serde(default)]
    pub player: Option<String>,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_session_minutes() -> u32 {
    DurationPreset::Pomodoro.minutes()
}

const fn default_break_reminder() -> u32 {
    DEFAULT_BREAK_REMINDER_MINUTES
}

const fn default_true() -> bool {
    true
}

const fn default_volume() -> f32 {
    0.5
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            theme: Theme::default(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_minutes: default_session_minutes(),
            break_reminder_minutes: default_break_reminder(),
            notifications: default_true(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            muted: false,
            player: None,
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, FocusError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            FocusError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            FocusError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), FocusError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| FocusError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            FocusError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Serialize to YAML for display.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, FocusError> {
        serde_yaml::to_string(self)
            .map_err(|e| FocusError::Config(format!("Failed to serialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.theme, Theme::Dark);
        assert_eq!(config.timer.default_minutes, 25);
        assert_eq!(config.timer.break_reminder_minutes, 60);
        assert!(config.timer.notifications);
        assert!((config.audio.volume - 0.5).abs() < f32::EPSILON);
        assert!(!config.audio.muted);
        assert!(config.audio.player.is_none());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.timer.default_minutes, 25);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.timer.default_minutes = 50;
        config.general.theme = Theme::Light;
        config.audio.player = Some("mpv".to_string());

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.timer.default_minutes, 50);
        assert_eq!(loaded.general.theme, Theme::Light);
        assert_eq!(loaded.audio.player.as_deref(), Some("mpv"));
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r#"
timer:
  break_reminder_minutes: 90
"#;
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.timer.break_reminder_minutes, 90);
        assert_eq!(config.timer.default_minutes, 25);
        assert!(config.timer.notifications);
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "timer: [not, a, map]").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(FocusError::Config(_))
        ));
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
