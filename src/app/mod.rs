//! Main application state and logic.
//!
//! This module contains the core App struct and its implementation,
//! organized into submodules:
//! - `buffer` - The note buffer the palette edits
//! - `input` - Edit classification, provider dispatch and caret anchoring
//! - `render` - UI rendering
//! - `state` - Application state structures
//! - `events` - Event handling logic
//!
//! ## Application Modes
//!
//! - **`Edit`**: The note editor. Typing the trigger character opens the
//!   command palette next to the caret.
//! - **`Notes`**: Modal list of saved notes (Ctrl+O)
//! - **`Prompt`**: Modal single-line prompt for an image URL or the note title
//!
//! ## Persistence
//!
//! Edits are autosaved to `.slashpad/autosave.json` after a pause in typing.
//! Ctrl+S stores the note under `.slashpad/notes/`.

pub mod buffer;
pub mod events;
mod input;
mod layout;
mod render;
pub mod state;

#[cfg(test)]
mod tests;

pub use buffer::NoteBuffer;
pub use input::{
    Viewport, WrapResult, caret_anchor, classify_edit, editor_viewport, wrap_lines_for_display,
};
pub use layout::{EditorLayout, calculate_editor_layout, centered_rect};
pub use state::{
    AppMode, EditorState, LayoutState, NoteState, NotesListState, PromptKind, PromptState,
    StatusLevel, StatusMessage,
};

use std::sync::Arc;

use anyhow::Result;
use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::Args;
use crate::core::{
    CandidateProvider, CandidateRequest, CandidateResponse, CommandRegistry, CommandResult,
    DocumentChange, spawn_provider_task,
};
use crate::fs::{
    AutosaveSnapshot, NoteError, PersistedSettings, SlashpadPaths, create_note, list_notes,
    load_note, update_note,
};
use crate::palette::{EndReason, SuggestionController, place_overlay};
use crate::tui::Theme;
use crate::tui::widgets::CommandPalette;

/// Channel buffer size for background candidate lookups.
const PROVIDER_CHANNEL_SIZE: usize = 16;

/// Document shown when there is nothing to restore.
#[must_use]
pub fn welcome_lines(trigger: char) -> Vec<String> {
    vec![
        "## Welcome to slashpad".to_string(),
        String::new(),
        format!("Type {trigger} at the start of a line or after a space to open the command palette."),
        "Ctrl+S saves, Ctrl+N starts a new note, Ctrl+O opens saved notes, Ctrl+T sets the title."
            .to_string(),
        String::new(),
    ]
}

/// How candidate requests are answered.
enum ProviderMode {
    /// Resolved on the UI thread as soon as they are issued.
    Inline,
    /// Resolved by `spawn_provider_task`; answers are drained in `process_events`.
    Background {
        request_tx: mpsc::Sender<CandidateRequest>,
        response_rx: mpsc::Receiver<CandidateResponse>,
        /// Newest request not yet accepted by a full channel.
        queued: Option<CandidateRequest>,
    },
}

/// Main application state.
///
/// Organized into component sub-structs:
/// - `editor`: the note buffer and autosave state
/// - `palette`: the slash command session controller
/// - `note` / `notes_list` / `prompt`: note workspace state
/// - `layout`: Dynamic layout dimensions updated each frame
pub struct App {
    // =========================================================================
    // Shared State
    // =========================================================================
    /// All slashpad-related filesystem paths.
    pub(crate) paths: SlashpadPaths,
    /// Effective settings (file plus CLI overrides).
    pub(crate) settings: PersistedSettings,
    /// Theme for styling.
    pub(crate) theme: Theme,
    /// Current application mode.
    pub(crate) mode: AppMode,
    /// Should quit flag.
    should_quit: bool,

    // =========================================================================
    // Palette
    // =========================================================================
    /// Slash command session controller.
    pub(crate) palette: SuggestionController,
    /// Built-in block commands, also the candidate provider.
    registry: Arc<CommandRegistry>,
    provider: ProviderMode,

    // =========================================================================
    // Component States
    // =========================================================================
    /// Note editor state.
    pub(crate) editor: EditorState,
    /// Identity of the edited note.
    pub(crate) note: NoteState,
    /// Saved-notes picker.
    pub(crate) notes_list: NotesListState,
    /// Open prompt, present while `mode` is `Prompt`.
    pub(crate) prompt: Option<PromptState>,
    /// Last status message for the footer.
    pub(crate) status: Option<StatusMessage>,
    /// Dynamic layout dimensions.
    pub(crate) layout: LayoutState,
}

impl App {
    /// Creates the application from command-line arguments.
    ///
    /// Settings are read from `paths`; a broken settings file falls back to
    /// defaults with a warning. CLI flags override the file.
    ///
    /// Must be called inside a tokio runtime when the background provider is
    /// enabled.
    #[must_use]
    pub fn new(paths: SlashpadPaths, args: &Args) -> Self {
        let (settings, warning) = match paths.load_settings() {
            Ok(settings) => (settings, None),
            Err(e) => {
                warn!(error = %e, "failed to load settings, using defaults");
                (
                    PersistedSettings::default(),
                    Some(StatusMessage::warning(format!("Failed to load settings: {e}"))),
                )
            }
        };
        let settings = settings.with_overrides(args.trigger, args.background_provider);

        let mut app = Self::with_settings(paths, settings);
        if let Some(warning) = warning {
            app.status = Some(warning);
        }
        app
    }

    /// Creates the application with explicit settings.
    ///
    /// Restores the autosave snapshot if one exists, otherwise shows the
    /// welcome document.
    #[must_use]
    pub fn with_settings(paths: SlashpadPaths, settings: PersistedSettings) -> Self {
        let registry = Arc::new(CommandRegistry::with_builtins());
        let provider = if settings.background_provider {
            let (request_tx, request_rx) = mpsc::channel(PROVIDER_CHANNEL_SIZE);
            let (response_tx, response_rx) = mpsc::channel(PROVIDER_CHANNEL_SIZE);
            let candidates: Arc<dyn CandidateProvider> = registry.clone();
            spawn_provider_task(candidates, request_rx, response_tx);
            ProviderMode::Background {
                request_tx,
                response_rx,
                queued: None,
            }
        } else {
            ProviderMode::Inline
        };

        let mut app = Self {
            paths,
            palette: SuggestionController::new(settings.trigger),
            settings,
            theme: Theme::default(),
            mode: AppMode::Edit,
            should_quit: false,
            registry,
            provider,
            editor: EditorState::default(),
            note: NoteState::default(),
            notes_list: NotesListState::default(),
            prompt: None,
            status: None,
            layout: LayoutState::default(),
        };

        if let Err(e) = app.paths.ensure_data_dir() {
            warn!(error = %e, "failed to create data directory");
        }

        match app.paths.load_autosave() {
            Ok(Some(snapshot)) => {
                info!(note_id = ?snapshot.note_id, "restored autosave");
                app.note = NoteState {
                    id: snapshot.note_id,
                    title: snapshot.title,
                };
                app.set_buffer(snapshot.lines);
            }
            Ok(None) => app.set_buffer(welcome_lines(app.palette.trigger())),
            Err(e) => {
                warn!(error = %e, "failed to restore autosave");
                app.status = Some(StatusMessage::warning(format!(
                    "Failed to restore autosave: {e}"
                )));
                app.set_buffer(welcome_lines(app.palette.trigger()));
            }
        }

        app
    }

    /// Returns true if the application should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The current mode.
    #[must_use]
    pub const fn mode(&self) -> AppMode {
        self.mode
    }

    /// The palette controller.
    #[must_use]
    pub const fn palette(&self) -> &SuggestionController {
        &self.palette
    }

    /// The note buffer.
    #[must_use]
    pub const fn buffer(&self) -> &NoteBuffer {
        &self.editor.buffer
    }

    /// Returns the filesystem paths used by this app.
    #[must_use]
    pub const fn paths(&self) -> &SlashpadPaths {
        &self.paths
    }

    /// Replaces the document, closing any palette session first.
    fn set_buffer(&mut self, lines: Vec<String>) {
        self.palette.cancel(EndReason::CaretLeftRange);
        let mut buffer = NoteBuffer::from_lines(lines);
        buffer.set_placeholder(format!("Type {} for commands...", self.palette.trigger()));
        self.editor.replace(buffer);
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Calculates and caches the layout based on terminal dimensions.
    ///
    /// Also re-anchors the palette overlay at the caret. Should be called once
    /// per frame before rendering.
    pub fn update_layout(&mut self, terminal_area: Rect) {
        self.layout.editor = calculate_editor_layout(terminal_area);

        let anchor = if self.mode == AppMode::Edit {
            caret_anchor(
                self.editor.buffer.lines(),
                self.editor.buffer.cursor(),
                self.layout.editor.editor_inner,
            )
        } else {
            None
        };
        self.palette.update_anchor(anchor);

        self.layout.palette_area = match (self.palette.session(), self.palette.overlay()) {
            (Some(session), Some(overlay)) => {
                let (width, height) = CommandPalette::new(session, &self.theme).preferred_size();
                Some(place_overlay(
                    overlay.anchor(),
                    width,
                    height,
                    terminal_area,
                ))
            }
            _ => None,
        };
    }

    // =========================================================================
    // Background provider
    // =========================================================================

    /// Applies candidate answers from the background provider and retries a
    /// request the full channel could not take.
    ///
    /// Does nothing when candidates are resolved inline.
    pub fn process_events(&mut self) {
        let ProviderMode::Background { response_rx, .. } = &mut self.provider else {
            return;
        };
        while let Ok(response) = response_rx.try_recv() {
            self.palette.resolve(response);
        }
        self.flush_queued_request();
    }

    // =========================================================================
    // Command results
    // =========================================================================

    /// Follows up on a confirmed palette command.
    pub(crate) fn handle_command_result(&mut self, result: CommandResult) {
        match result {
            CommandResult::Applied => self.after_edit(DocumentChange::Edited),
            CommandResult::RequestImageUrl { range } => {
                self.open_prompt(PromptKind::ImageUrl { range }, String::new());
            }
        }
    }

    // =========================================================================
    // Modals
    // =========================================================================

    /// Opens a prompt, closing the palette.
    pub(crate) fn open_prompt(&mut self, kind: PromptKind, input: String) {
        self.palette.cancel(EndReason::FocusLost);
        self.prompt = Some(PromptState::new(kind, input));
        self.mode = AppMode::Prompt;
    }

    /// Opens the title prompt pre-filled with the current title.
    pub(crate) fn open_title_prompt(&mut self, save_after: bool) {
        let title = self.note.title.clone();
        self.open_prompt(PromptKind::Title { save_after }, title);
    }

    /// Closes the prompt without applying it.
    pub(crate) fn cancel_prompt(&mut self) {
        self.prompt = None;
        self.mode = AppMode::Edit;
    }

    /// Applies the prompt input and returns to the editor.
    pub(crate) fn submit_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            self.mode = AppMode::Edit;
            return;
        };
        self.mode = AppMode::Edit;

        match prompt.kind {
            PromptKind::ImageUrl { range } => {
                if crate::core::apply_image(&mut self.editor.buffer, range, &prompt.input) {
                    self.after_edit(DocumentChange::Edited);
                }
            }
            PromptKind::Title { save_after } => {
                self.note.title = prompt.input.trim().to_string();
                self.editor.mark_dirty();
                if save_after {
                    self.save_note();
                }
            }
        }
    }

    /// Opens the saved-notes picker.
    pub(crate) fn open_notes(&mut self) {
        self.palette.cancel(EndReason::FocusLost);
        match list_notes(&self.paths) {
            Ok(notes) => {
                self.notes_list.notes = notes;
                self.notes_list.selected = 0;
                self.mode = AppMode::Notes;
            }
            Err(e) => {
                warn!(error = %e, "failed to list notes");
                self.status = Some(StatusMessage::warning(format!("Failed to list notes: {e}")));
            }
        }
    }

    /// Closes the notes picker.
    pub(crate) fn close_notes(&mut self) {
        self.mode = AppMode::Edit;
    }

    // =========================================================================
    // Note persistence
    // =========================================================================

    /// Saves the note.
    ///
    /// A blank title opens the title prompt and saves once it is submitted.
    /// A note without an id is created, otherwise the stored note is updated.
    /// A successful save removes the autosave snapshot.
    pub(crate) fn save_note(&mut self) {
        if self.note.title.trim().is_empty() {
            self.open_title_prompt(true);
            return;
        }

        let lines = self.editor.buffer.lines().to_vec();
        let (result, message) = match &self.note.id {
            Some(id) => (
                update_note(&self.paths, id, &self.note.title, &lines),
                "Note updated",
            ),
            None => (
                create_note(&self.paths, &self.note.title, &lines),
                "Saved new note",
            ),
        };

        match result {
            Ok(stored) => {
                info!(id = %stored.id, "note saved");
                self.note.id = Some(stored.id);
                self.note.title = stored.title;
                self.status = Some(StatusMessage::info(message));
                self.editor.is_dirty = false;
                if let Err(e) = self.paths.clear_autosave() {
                    warn!(error = %e, "failed to remove autosave");
                }
            }
            Err(e) => {
                if let Some(NoteError::NotFound(id)) = e.downcast_ref::<NoteError>() {
                    // The stored note vanished; save as a new one next time
                    debug!(%id, "stored note missing");
                    self.note.id = None;
                }
                warn!(error = %e, "failed to save note");
                self.status = Some(StatusMessage::warning(format!("Save failed: {e}")));
            }
        }
    }

    /// Starts an empty, unsaved note and removes the autosave snapshot.
    pub(crate) fn new_note(&mut self) {
        self.note = NoteState::default();
        self.set_buffer(Vec::new());
        if let Err(e) = self.paths.clear_autosave() {
            warn!(error = %e, "failed to remove autosave");
        }
        self.status = Some(StatusMessage::info("New note"));
    }

    /// Loads the note highlighted in the picker and snapshots it to autosave.
    pub(crate) fn load_selected_note(&mut self) {
        let Some(id) = self.notes_list.selected_note().map(|n| n.id.clone()) else {
            self.close_notes();
            return;
        };

        match load_note(&self.paths, &id) {
            Ok(note) => {
                info!(%id, "note loaded");
                self.note = NoteState {
                    id: Some(note.id),
                    title: note.title,
                };
                self.set_buffer(note.lines);
                self.write_autosave();
                self.status = Some(StatusMessage::info(format!("Opened \"{}\"", self.note.title)));
            }
            Err(e) => {
                warn!(%id, error = %e, "failed to load note");
                self.status = Some(StatusMessage::warning(format!("Failed to open note: {e}")));
            }
        }
        self.close_notes();
    }

    // =========================================================================
    // Tick / Autosave
    // =========================================================================

    /// Performs periodic tasks like autosave.
    ///
    /// This method should be called regularly (e.g., on each event loop tick).
    /// The save only occurs once the configured debounce has passed since the
    /// last edit.
    pub fn tick(&mut self) {
        if !self.editor.is_dirty {
            return;
        }

        let Some(last_edit) = self.editor.last_edit_time else {
            return;
        };

        if last_edit.elapsed() < self.settings.autosave_debounce() {
            return;
        }

        self.write_autosave();
    }

    /// Writes the autosave snapshot now.
    ///
    /// Failures are reported in the footer and the log. The dirty flag is
    /// cleared either way so a failing disk does not retry every tick.
    pub fn write_autosave(&mut self) {
        if let Err(e) = self.paths.save_autosave(&self.snapshot()) {
            warn!(error = %e, "autosave failed");
            self.status = Some(StatusMessage::warning(format!("Autosave failed: {e}")));
        }
        self.editor.is_dirty = false;
    }

    /// Writes pending changes before exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn flush_autosave(&mut self) -> Result<()> {
        if !self.editor.is_dirty {
            return Ok(());
        }
        self.paths.save_autosave(&self.snapshot())?;
        self.editor.is_dirty = false;
        Ok(())
    }

    fn snapshot(&self) -> AutosaveSnapshot {
        AutosaveSnapshot {
            note_id: self.note.id.clone(),
            title: self.note.title.clone(),
            lines: self.editor.buffer.lines().to_vec(),
        }
    }
}
