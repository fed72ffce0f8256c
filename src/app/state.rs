//! Application state structures.
//!
//! This module contains the state definitions for different parts of the application:
//!
//! - **`EditorState`**: The note buffer plus autosave bookkeeping
//! - **`NoteState`**: Identity of the note being edited
//! - **`NotesListState`**: The saved-notes picker
//! - **`PromptState`**: Single-line modal prompts (image URL, title)
//! - **`LayoutState`**: Dynamic layout dimensions

use std::time::Instant;

use ratatui::layout::Rect;

use crate::app::EditorLayout;
use crate::app::buffer::NoteBuffer;
use crate::core::DocRange;
use crate::fs::StoredNote;

/// Application modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Editing the note; the palette is live.
    #[default]
    Edit,
    /// Picking a saved note.
    Notes,
    /// A single-line prompt has focus.
    Prompt,
}

/// What a prompt is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// URL for the image command. `range` is the trigger text to replace.
    ImageUrl { range: DocRange },
    /// Note title. `save_after` continues a save that needed a title.
    Title { save_after: bool },
}

impl PromptKind {
    /// Title of the prompt box.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ImageUrl { .. } => " Image URL ",
            Self::Title { .. } => " Note Title ",
        }
    }
}

/// State of the open prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub kind: PromptKind,
    pub input: String,
}

impl PromptState {
    #[must_use]
    pub const fn new(kind: PromptKind, input: String) -> Self {
        Self { kind, input }
    }
}

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

/// One-line message shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    /// Creates an info message.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    /// Creates a warning message.
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Warning,
            text: text.into(),
        }
    }
}

/// State of the note editor.
///
/// Uses [`NoteBuffer`] for the text and tracks when it last changed so
/// autosave can wait for a pause in typing.
#[derive(Clone, Default)]
pub struct EditorState {
    /// The document being edited.
    pub buffer: NoteBuffer,

    // === Autosave State ===
    /// Timestamp of the last edit (for autosave debouncing).
    pub last_edit_time: Option<Instant>,
    /// Whether there are changes not yet written to the autosave file.
    pub is_dirty: bool,
}

impl EditorState {
    /// Creates editor state around an existing buffer.
    #[must_use]
    pub fn new(buffer: NoteBuffer) -> Self {
        Self {
            buffer,
            last_edit_time: None,
            is_dirty: false,
        }
    }

    /// Records an edit for autosave.
    pub fn mark_dirty(&mut self) {
        self.is_dirty = true;
        self.last_edit_time = Some(Instant::now());
    }

    /// Replaces the buffer and clears autosave bookkeeping.
    pub fn replace(&mut self, buffer: NoteBuffer) {
        *self = Self::new(buffer);
    }
}

/// Identity of the note in the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteState {
    /// Id of the stored note, `None` until first saved.
    pub id: Option<String>,
    pub title: String,
}

/// State of the saved-notes picker.
#[derive(Debug, Clone, Default)]
pub struct NotesListState {
    pub notes: Vec<StoredNote>,
    pub selected: usize,
}

impl NotesListState {
    /// Moves the selection up, wrapping at the top.
    pub fn select_up(&mut self) {
        if self.notes.is_empty() {
            return;
        }
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(self.notes.len() - 1);
    }

    /// Moves the selection down, wrapping at the bottom.
    pub fn select_down(&mut self) {
        if self.notes.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.notes.len();
    }

    /// The highlighted note.
    #[must_use]
    pub fn selected_note(&self) -> Option<&StoredNote> {
        self.notes.get(self.selected)
    }
}

/// Dynamic layout dimensions, recalculated every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutState {
    /// The cached editor layout.
    pub editor: EditorLayout,
    /// Where the palette was drawn, for mouse hit testing.
    pub palette_area: Option<Rect>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(id: &str) -> StoredNote {
        StoredNote {
            id: id.to_string(),
            title: id.to_string(),
            lines: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn notes_selection_wraps() {
        let mut list = NotesListState {
            notes: vec![note("a"), note("b"), note("c")],
            selected: 0,
        };
        list.select_up();
        assert_eq!(list.selected, 2);
        list.select_down();
        assert_eq!(list.selected, 0);
        list.select_down();
        assert_eq!(list.selected_note().map(|n| n.id.as_str()), Some("b"));
    }

    #[test]
    fn empty_notes_list_is_inert() {
        let mut list = NotesListState::default();
        list.select_down();
        list.select_up();
        assert_eq!(list.selected, 0);
        assert!(list.selected_note().is_none());
    }

    #[test]
    fn mark_dirty_records_time() {
        let mut editor = EditorState::default();
        assert!(!editor.is_dirty);
        editor.mark_dirty();
        assert!(editor.is_dirty);
        assert!(editor.last_edit_time.is_some());

        editor.replace(NoteBuffer::new());
        assert!(!editor.is_dirty);
        assert!(editor.last_edit_time.is_none());
    }
}
