//! Event handling logic for the App.
//!
//! Keys reach the palette first. Only keys it does not consume go on to the
//! global shortcuts and then to the note buffer.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::debug;

use super::App;
use crate::app::classify_edit;
use crate::app::state::AppMode;
use crate::core::DocumentChange;
use crate::palette::{EndReason, PaletteKeyResult};
use crate::tui::widgets::palette_row_at;

const fn is_ctrl(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
}

impl App {
    /// Handles pasted text from bracketed paste mode.
    ///
    /// Multi-line pasted text arrives as a single `Event::Paste(String)`.
    ///
    /// # Line Ending Normalization
    ///
    /// Windows-style line endings (`\r\n`) and standalone `\r` become `\n`
    /// before insertion.
    ///
    /// # Control Character Filtering
    ///
    /// Control characters other than newlines are dropped. Prompts are single
    /// line, so newlines are dropped there too.
    pub fn handle_paste(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

        match self.mode {
            AppMode::Edit => {
                let filtered: String = normalized
                    .chars()
                    .filter(|c| !c.is_control() || *c == '\n')
                    .collect();
                if self.editor.buffer.insert_str(&filtered) {
                    self.after_edit(DocumentChange::Edited);
                }
            }
            AppMode::Prompt => {
                if let Some(prompt) = &mut self.prompt {
                    prompt
                        .input
                        .extend(normalized.chars().filter(|c| !c.is_control()));
                }
            }
            AppMode::Notes => {}
        }
    }

    /// Handles a key event.
    ///
    /// Ctrl+C and Ctrl+Q quit from any mode.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if is_ctrl(&key) && matches!(key.code, KeyCode::Char('c' | 'q')) {
            self.should_quit = true;
            return;
        }

        match self.mode {
            AppMode::Edit => self.handle_edit_key(key),
            AppMode::Notes => self.handle_notes_key(key),
            AppMode::Prompt => self.handle_prompt_key(key),
        }
    }

    /// Handles keys in the editor.
    fn handle_edit_key(&mut self, key: KeyEvent) {
        match self.palette.handle_key(&key, &mut self.editor.buffer) {
            PaletteKeyResult::Consumed => return,
            PaletteKeyResult::Executed(result) => {
                self.handle_command_result(result);
                return;
            }
            PaletteKeyResult::NotConsumed => {}
        }

        if is_ctrl(&key) {
            match key.code {
                KeyCode::Char('s') => {
                    self.save_note();
                    return;
                }
                KeyCode::Char('n') => {
                    self.new_note();
                    return;
                }
                KeyCode::Char('o') => {
                    self.open_notes();
                    return;
                }
                KeyCode::Char('t') => {
                    self.open_title_prompt(false);
                    return;
                }
                _ => {}
            }
        }

        // Delegate everything else to tui-textarea
        let before = self.editor.buffer.cursor();
        let modified = self.editor.buffer.input(key);
        let moved = self.editor.buffer.cursor() != before;

        if let Some(change) = classify_edit(&key, modified, moved) {
            self.after_edit(change);
        }
    }

    /// Handles keys in the saved-notes picker.
    fn handle_notes_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.notes_list.select_up(),
            KeyCode::Down => self.notes_list.select_down(),
            KeyCode::Enter => self.load_selected_note(),
            KeyCode::Esc => self.close_notes(),
            _ => {}
        }
    }

    /// Handles keys in a prompt.
    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_prompt(),
            KeyCode::Esc => self.cancel_prompt(),
            KeyCode::Backspace => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.input.pop();
                }
            }
            KeyCode::Char(c) if !is_ctrl(&key) => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.input.push(c);
                }
            }
            _ => {}
        }
    }

    /// Handles mouse events over the palette.
    ///
    /// Moving over a row highlights it; a left click confirms it. Events
    /// outside the palette are ignored.
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        if self.mode != AppMode::Edit {
            return;
        }
        let (Some(area), Some(session)) = (self.layout.palette_area, self.palette.session()) else {
            return;
        };
        let Some(index) = palette_row_at(area, event.column, event.row, session) else {
            return;
        };

        match event.kind {
            MouseEventKind::Moved => {
                self.palette.hover(index);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(result) = self.palette.click(index, &mut self.editor.buffer) {
                    self.handle_command_result(result);
                }
            }
            _ => {}
        }
    }

    /// Ends the palette session when the terminal loses focus.
    pub fn handle_focus_lost(&mut self) {
        if self.palette.cancel(EndReason::FocusLost) {
            debug!("palette closed on focus loss");
        }
    }
}
