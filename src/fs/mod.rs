//! File system operations.

use std::path::{Path, PathBuf};

use anyhow::Context;

pub mod notes;
pub mod settings;

pub use notes::{
    AutosaveSnapshot, NoteError, StoredNote, create_note, list_notes, load_note, update_note,
};
#[cfg(test)]
pub use settings::save_settings;
pub use settings::{PersistedSettings, load_settings};

/// Name of the per-directory data folder.
pub const SLASHPAD_DIR: &str = ".slashpad";

/// Holds all slashpad-related paths derived from a base directory.
///
/// This struct enables dependency injection of filesystem paths, allowing
/// tests to use isolated temporary directories instead of the actual
/// working directory.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use slashpad::fs::SlashpadPaths;
///
/// let paths = SlashpadPaths::new(Path::new("/tmp/test"));
/// assert_eq!(
///     paths.autosave_file(),
///     Path::new("/tmp/test/.slashpad/autosave.json")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SlashpadPaths {
    base: PathBuf,
}

impl SlashpadPaths {
    /// Creates paths rooted at the given base directory.
    #[must_use]
    pub fn new(base: &Path) -> Self {
        Self {
            base: base.to_path_buf(),
        }
    }

    /// Creates paths rooted at the current working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn from_cwd() -> anyhow::Result<Self> {
        let base = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self { base })
    }

    /// Returns the base directory.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Returns the `.slashpad` directory path.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.base.join(SLASHPAD_DIR)
    }

    /// Returns the settings file path (`.slashpad/settings.json`).
    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.data_dir().join("settings.json")
    }

    /// Returns the autosave snapshot path (`.slashpad/autosave.json`).
    #[must_use]
    pub fn autosave_file(&self) -> PathBuf {
        self.data_dir().join("autosave.json")
    }

    /// Returns the notes directory path (`.slashpad/notes`).
    #[must_use]
    pub fn notes_dir(&self) -> PathBuf {
        self.data_dir().join("notes")
    }

    /// Returns the path of a single note file.
    #[must_use]
    pub fn note_file(&self, id: &str) -> PathBuf {
        self.notes_dir().join(format!("{id}.json"))
    }

    /// Returns the log file path (`.slashpad/slashpad.log`).
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.data_dir().join("slashpad.log")
    }

    /// Ensures the `.slashpad` directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_data_dir(&self) -> anyhow::Result<()> {
        let dir = self.data_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))
    }

    /// Ensures the notes directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_notes_dir(&self) -> anyhow::Result<()> {
        let dir = self.notes_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create notes directory: {}", dir.display()))
    }

    /// Loads settings from the settings file.
    ///
    /// If the file doesn't exist, returns default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_settings(&self) -> anyhow::Result<PersistedSettings> {
        load_settings(&self.settings_file())
    }

    /// Saves settings to the settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file cannot be written.
    #[cfg(test)]
    pub fn save_settings(&self, settings: &PersistedSettings) -> anyhow::Result<()> {
        self.ensure_data_dir()?;
        save_settings(&self.settings_file(), settings)
    }

    /// Reads the autosave snapshot, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_autosave(&self) -> anyhow::Result<Option<AutosaveSnapshot>> {
        let path = self.autosave_file();
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read autosave: {}", path.display()))?;
        let snapshot = serde_json::from_str(&content).context("Failed to parse autosave")?;
        Ok(Some(snapshot))
    }

    /// Writes the autosave snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be serialized or written.
    pub fn save_autosave(&self, snapshot: &AutosaveSnapshot) -> anyhow::Result<()> {
        self.ensure_data_dir()?;
        let json =
            serde_json::to_string_pretty(snapshot).context("Failed to serialize autosave")?;
        std::fs::write(self.autosave_file(), json).context("Failed to write autosave")
    }

    /// Removes the autosave snapshot. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear_autosave(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(self.autosave_file()) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                Err(e).context("Failed to remove autosave")
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn paths_are_derived_from_base() {
        let paths = SlashpadPaths::new(Path::new("/test/base"));

        assert_eq!(paths.base(), Path::new("/test/base"));
        assert_eq!(paths.data_dir(), Path::new("/test/base/.slashpad"));
        assert_eq!(
            paths.settings_file(),
            Path::new("/test/base/.slashpad/settings.json")
        );
        assert_eq!(paths.notes_dir(), Path::new("/test/base/.slashpad/notes"));
        assert_eq!(
            paths.note_file("abc"),
            Path::new("/test/base/.slashpad/notes/abc.json")
        );
        assert_eq!(
            paths.log_file(),
            Path::new("/test/base/.slashpad/slashpad.log")
        );
    }

    #[test]
    fn ensure_dirs_create_directories() {
        let temp = TempDir::new().unwrap();
        let paths = SlashpadPaths::new(temp.path());

        assert!(!paths.data_dir().exists());
        paths.ensure_data_dir().unwrap();
        assert!(paths.data_dir().exists());
        paths.ensure_notes_dir().unwrap();
        assert!(paths.notes_dir().exists());
    }

    #[test]
    fn autosave_missing_is_none() {
        let temp = TempDir::new().unwrap();
        let paths = SlashpadPaths::new(temp.path());
        assert!(paths.load_autosave().unwrap().is_none());
    }

    #[test]
    fn autosave_roundtrip_and_clear() {
        let temp = TempDir::new().unwrap();
        let paths = SlashpadPaths::new(temp.path());

        let snapshot = AutosaveSnapshot {
            note_id: Some("n1".to_string()),
            title: "Draft".to_string(),
            lines: vec!["# Hello".to_string(), String::new()],
        };
        paths.save_autosave(&snapshot).unwrap();
        assert_eq!(paths.load_autosave().unwrap(), Some(snapshot));

        paths.clear_autosave().unwrap();
        assert!(paths.load_autosave().unwrap().is_none());
        // Clearing twice is fine
        paths.clear_autosave().unwrap();
    }

    #[test]
    fn corrupt_autosave_is_an_error() {
        let temp = TempDir::new().unwrap();
        let paths = SlashpadPaths::new(temp.path());
        paths.ensure_data_dir().unwrap();
        std::fs::write(paths.autosave_file(), "{not json").unwrap();
        assert!(paths.load_autosave().is_err());
    }

    #[test]
    fn save_and_load_settings_roundtrip() {
        let temp = TempDir::new().unwrap();
        let paths = SlashpadPaths::new(temp.path());

        let settings = PersistedSettings {
            trigger: ';',
            background_provider: true,
            autosave_debounce_ms: 250,
        };

        paths.save_settings(&settings).unwrap();
        assert_eq!(paths.load_settings().unwrap(), settings);
    }
}
