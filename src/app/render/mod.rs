//! Rendering methods for the App.
//!
//! This module contains all UI rendering logic including:
//! - **Editor**: Header, note buffer, footer and the command palette
//! - **Notes list**: Modal overlay for opening saved notes
//! - **Prompt**: Modal overlay for the image URL and note title

mod editor;
mod notes;
mod prompt;

use ratatui::Frame;

use super::{App, AppMode};

impl App {
    /// Renders the application UI.
    ///
    /// The editor is always drawn; modal modes overlay it.
    pub fn render(&self, frame: &mut Frame) {
        self.render_editor(frame);
        match self.mode {
            AppMode::Edit => {}
            AppMode::Notes => self.render_notes(frame),
            AppMode::Prompt => self.render_prompt(frame),
        }
    }
}
