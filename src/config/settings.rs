//! Timer configuration for pomidor.
//!
//! Settings are persisted as pretty-printed JSON at
//! `~/.pomidor/config.json` and written back on every change.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PomidorError;

/// Upper bound on the integer fields. 1440 minutes is a full day;
/// anything larger is a typo, and bounding here keeps the
/// seconds arithmetic downstream comfortably inside `u32`.
const FIELD_MAX: u32 = 1440;

/// Timer configuration.
///
/// All duration fields are minutes and must be between 1 and 1440;
/// `sessions_before_long_break` is used as a modulus and shares the
/// same bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Length of a work session in minutes.
    pub work_duration: u32,
    /// Length of a short break in minutes.
    pub short_break: u32,
    /// Length of a long break in minutes.
    pub long_break: u32,
    /// Number of work sessions between long breaks.
    pub sessions_before_long_break: u32,
    /// Play a desktop notification when a phase completes.
    pub notification_sound: bool,
    /// Automatically start the next phase after a short delay.
    pub auto_start: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_duration: 25,
            short_break: 5,
            long_break: 15,
            sessions_before_long_break: 4,
            notification_sound: true,
            auto_start: false,
        }
    }
}

/// How the configuration was obtained at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file existed and parsed cleanly.
    Loaded,
    /// The file was absent; defaults were written.
    CreatedDefault,
    /// The file existed but was unreadable or out of range; defaults
    /// were written. Carries the reason for display.
    RecoveredDefault(String),
}

impl Config {
    /// Load configuration from `path`, creating it with defaults if
    /// absent and falling back to defaults if it fails to parse or
    /// validate.
    ///
    /// # Errors
    ///
    /// Returns an error only if the file cannot be read or written;
    /// a corrupt file is recovered, not an error.
    pub fn load_or_create(path: &Path) -> Result<(Self, LoadOutcome), PomidorError> {
        if !path.exists() {
            let config = Self::default();
            config.save_to_path(path)?;
            return Ok((config, LoadOutcome::CreatedDefault));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PomidorError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let reason = match serde_json::from_str::<Self>(&contents) {
            Ok(config) => match config.validate() {
                Ok(()) => return Ok((config, LoadOutcome::Loaded)),
                Err(e) => e.to_string(),
            },
            Err(e) => e.to_string(),
        };

        let config = Self::default();
        config.save_to_path(path)?;
        Ok((config, LoadOutcome::RecoveredDefault(reason)))
    }

    /// Save configuration to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), PomidorError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PomidorError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            PomidorError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Check the range invariants on the integer fields.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first out-of-range field.
    pub fn validate(&self) -> Result<(), PomidorError> {
        let fields = [
            ("work_duration", self.work_duration),
            ("short_break", self.short_break),
            ("long_break", self.long_break),
            ("sessions_before_long_break", self.sessions_before_long_break),
        ];

        for (name, value) in fields {
            if !(1..=FIELD_MAX).contains(&value) {
                return Err(invalid_number(name));
            }
        }

        Ok(())
    }
}

/// Raw settings-form values, one string per configuration field.
///
/// Produced by the settings form and parsed atomically: either every
/// field is valid and a new [`Config`] is returned, or nothing changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDraft {
    pub work_duration: String,
    pub short_break: String,
    pub long_break: String,
    pub sessions_before_long_break: String,
    pub notification_sound: String,
    pub auto_start: String,
}

impl SettingsDraft {
    /// Pre-fill a draft from the current configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            work_duration: config.work_duration.to_string(),
            short_break: config.short_break.to_string(),
            long_break: config.long_break.to_string(),
            sessions_before_long_break: config.sessions_before_long_break.to_string(),
            notification_sound: config.notification_sound.to_string(),
            auto_start: config.auto_start.to_string(),
        }
    }

    /// Parse and validate every field.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid field; the error
    /// message tells the user what kind of value is required.
    pub fn parse(&self) -> Result<Config, PomidorError> {
        Ok(Config {
            work_duration: parse_positive("work_duration", &self.work_duration)?,
            short_break: parse_positive("short_break", &self.short_break)?,
            long_break: parse_positive("long_break", &self.long_break)?,
            sessions_before_long_break: parse_positive(
                "sessions_before_long_break",
                &self.sessions_before_long_break,
            )?,
            notification_sound: parse_flag("notification_sound", &self.notification_sound)?,
            auto_start: parse_flag("auto_start", &self.auto_start)?,
        })
    }
}

/// Parse an integer field; zero, negative, and oversized values are
/// rejected.
fn parse_positive(name: &str, raw: &str) -> Result<u32, PomidorError> {
    let value = raw.trim().parse::<u32>().map_err(|_| invalid_number(name))?;
    if !(1..=FIELD_MAX).contains(&value) {
        return Err(invalid_number(name));
    }
    Ok(value)
}

/// Parse a boolean field; only case-insensitive "true"/"false" are accepted.
fn parse_flag(name: &str, raw: &str) -> Result<bool, PomidorError> {
    match raw.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(PomidorError::Settings(format!(
            "{name} must be true or false"
        ))),
    }
}

fn invalid_number(name: &str) -> PomidorError {
    PomidorError::Settings(format!(
        "{name} must be a whole number between 1 and {FIELD_MAX}"
    ))
}
