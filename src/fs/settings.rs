//! Settings persistence module.
//!
//! This module loads application settings from JSON in
//! `.slashpad/settings.json`. The file is written by hand; saving is only
//! used to build fixtures.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default trigger character.
pub const DEFAULT_TRIGGER: char = '/';

/// Default autosave debounce in milliseconds.
pub const DEFAULT_AUTOSAVE_DEBOUNCE_MS: u64 = 1000;

/// Persisted settings that are saved between sessions.
///
/// Missing fields fall back to their defaults, so older or hand-written
/// files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PersistedSettings {
    /// Character that opens the command palette.
    pub trigger: char,
    /// Resolve candidates on a background task instead of inline.
    pub background_provider: bool,
    /// Idle time before the autosave snapshot is written.
    pub autosave_debounce_ms: u64,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self {
            trigger: DEFAULT_TRIGGER,
            background_provider: false,
            autosave_debounce_ms: DEFAULT_AUTOSAVE_DEBOUNCE_MS,
        }
    }
}

impl PersistedSettings {
    /// Applies command-line overrides on top of the file settings.
    #[must_use]
    pub fn with_overrides(mut self, trigger: Option<char>, background_provider: bool) -> Self {
        if let Some(trigger) = trigger {
            self.trigger = trigger;
        }
        self.background_provider |= background_provider;
        self
    }

    /// The autosave debounce as a [`Duration`].
    #[must_use]
    pub const fn autosave_debounce(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }
}

/// Loads settings from the specified settings file path.
///
/// If the file doesn't exist, returns default settings.
/// If the file exists but cannot be parsed, returns an error.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings(path: &Path) -> Result<PersistedSettings> {
    if !path.exists() {
        return Ok(PersistedSettings::default());
    }

    let content = std::fs::read_to_string(path).context("Failed to read settings file")?;

    serde_json::from_str(&content).context("Failed to parse settings file")
}

/// Saves settings to the specified settings file path.
///
/// The parent directory must exist (caller should ensure this).
///
/// # Errors
///
/// Returns an error if the file cannot be written.
#[cfg(test)]
pub fn save_settings(path: &Path, settings: &PersistedSettings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

    std::fs::write(path, json).context("Failed to write settings file")
}
