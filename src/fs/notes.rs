//! Note storage.
//!
//! Each note is a JSON file in `.slashpad/notes/<id>.json`. Ids are random
//! v4 UUIDs and timestamps are UTC.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::fs::SlashpadPaths;

/// Domain errors of the note store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NoteError {
    /// A note cannot be saved without a title.
    #[error("a title is required to save a note")]
    TitleRequired,
    /// No note with this id exists.
    #[error("note not found: {0}")]
    NotFound(String),
}

/// A note as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredNote {
    pub id: String,
    pub title: String,
    /// Document content, one entry per line.
    pub lines: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unsaved editor state written by autosave.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AutosaveSnapshot {
    /// Id of the note being edited, if it was loaded or saved before.
    pub note_id: Option<String>,
    pub title: String,
    pub lines: Vec<String>,
}

fn require_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(NoteError::TitleRequired.into());
    }
    Ok(title.to_string())
}

fn write_note(paths: &SlashpadPaths, note: &StoredNote) -> Result<()> {
    paths.ensure_notes_dir()?;
    let path = paths.note_file(&note.id);
    let json = serde_json::to_string_pretty(note).context("Failed to serialize note")?;
    std::fs::write(&path, json).with_context(|| format!("Failed to write note: {}", path.display()))
}

/// Creates a new note with a fresh id.
///
/// # Errors
///
/// Returns [`NoteError::TitleRequired`] if `title` is blank, or an I/O error
/// if the note cannot be written.
pub fn create_note(paths: &SlashpadPaths, title: &str, lines: &[String]) -> Result<StoredNote> {
    let title = require_title(title)?;
    let now = Utc::now();
    let note = StoredNote {
        id: Uuid::new_v4().to_string(),
        title,
        lines: lines.to_vec(),
        created_at: now,
        updated_at: now,
    };
    write_note(paths, &note)?;
    Ok(note)
}

/// Overwrites the title and content of an existing note.
///
/// `created_at` is preserved and `updated_at` is bumped.
///
/// # Errors
///
/// Returns [`NoteError::TitleRequired`] for a blank title,
/// [`NoteError::NotFound`] if the note does not exist, or an I/O error.
pub fn update_note(
    paths: &SlashpadPaths,
    id: &str,
    title: &str,
    lines: &[String],
) -> Result<StoredNote> {
    let title = require_title(title)?;
    let mut note = load_note(paths, id)?;
    note.title = title;
    note.lines = lines.to_vec();
    note.updated_at = Utc::now();
    write_note(paths, &note)?;
    Ok(note)
}

/// Reads one note.
///
/// # Errors
///
/// Returns [`NoteError::NotFound`] if there is no such note, or an error if
/// the file cannot be read or parsed.
pub fn load_note(paths: &SlashpadPaths, id: &str) -> Result<StoredNote> {
    let path = paths.note_file(id);
    if !path.exists() {
        return Err(NoteError::NotFound(id.to_string()).into());
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read note: {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse note: {}", path.display()))
}

/// Lists all notes, most recently updated first.
///
/// Files that cannot be read or parsed are skipped with a warning.
///
/// # Errors
///
/// Returns an error if the notes directory exists but cannot be read.
pub fn list_notes(paths: &SlashpadPaths) -> Result<Vec<StoredNote>> {
    let dir = paths.notes_dir();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut notes = Vec::new();
    let entries = std::fs::read_dir(&dir)
        .with_context(|| format!("Failed to read notes directory: {}", dir.display()))?;

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }

        let parsed = std::fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|content| serde_json::from_str::<StoredNote>(&content).map_err(Into::into));
        match parsed {
            Ok(note) => notes.push(note),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable note"),
        }
    }

    notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn create_writes_json_file() -> Result<()> {
        let temp = TempDir::new()?;
        let paths = SlashpadPaths::new(temp.path());

        let note = create_note(&paths, "  Groceries ", &lines(&["- [ ] milk"]))?;
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.created_at, note.updated_at);
        assert!(paths.note_file(&note.id).exists());
        assert!(Uuid::parse_str(&note.id).is_ok());

        assert_eq!(load_note(&paths, &note.id)?, note);
        Ok(())
    }

    #[test]
    fn blank_title_is_rejected() -> Result<()> {
        let temp = TempDir::new()?;
        let paths = SlashpadPaths::new(temp.path());

        let err = create_note(&paths, "   ", &[]).err();
        assert_eq!(
            err.as_ref().and_then(|e| e.downcast_ref::<NoteError>()),
            Some(&NoteError::TitleRequired)
        );
        assert!(!paths.notes_dir().exists());
        Ok(())
    }

    #[test]
    fn update_keeps_created_at() -> Result<()> {
        let temp = TempDir::new()?;
        let paths = SlashpadPaths::new(temp.path());

        let note = create_note(&paths, "Draft", &lines(&["one"]))?;
        let updated = update_note(&paths, &note.id, "Final", &lines(&["one", "two"]))?;

        assert_eq!(updated.id, note.id);
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.lines, lines(&["one", "two"]));
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.updated_at >= note.updated_at);
        Ok(())
    }

    #[test]
    fn update_missing_note_is_not_found() -> Result<()> {
        let temp = TempDir::new()?;
        let paths = SlashpadPaths::new(temp.path());

        let err = update_note(&paths, "missing", "Title", &[]).err();
        assert_eq!(
            err.as_ref().and_then(|e| e.downcast_ref::<NoteError>()),
            Some(&NoteError::NotFound("missing".to_string()))
        );
        Ok(())
    }

    #[test]
    fn list_is_sorted_by_update_time() -> Result<()> {
        let temp = TempDir::new()?;
        let paths = SlashpadPaths::new(temp.path());

        let mut older = create_note(&paths, "Older", &[])?;
        older.updated_at -= Duration::hours(1);
        write_note(&paths, &older)?;
        let newer = create_note(&paths, "Newer", &[])?;

        let titles: Vec<String> = list_notes(&paths)?.into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["Newer".to_string(), "Older".to_string()]);
        assert_ne!(newer.id, older.id);
        Ok(())
    }

    #[test]
    fn list_skips_garbage_files() -> Result<()> {
        let temp = TempDir::new()?;
        let paths = SlashpadPaths::new(temp.path());

        create_note(&paths, "Good", &[])?;
        std::fs::write(paths.notes_dir().join("broken.json"), "{")?;
        std::fs::write(paths.notes_dir().join("readme.txt"), "hi")?;

        let notes = list_notes(&paths)?;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Good");
        Ok(())
    }

    #[test]
    fn list_without_directory_is_empty() -> Result<()> {
        let temp = TempDir::new()?;
        let paths = SlashpadPaths::new(temp.path());
        assert!(list_notes(&paths)?.is_empty());
        Ok(())
    }
}
