//! Layout calculation helpers for the TUI.
//!
//! This module provides a single source of truth for layout definitions,
//! ensuring that `App::update_layout` (which anchors the palette) and
//! `App::render` always agree on where the editor is.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Block, Borders};

/// Layout of the editor screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditorLayout {
    /// Header area (note title, 1 line).
    pub header: Rect,
    /// Bordered editor area.
    pub editor: Rect,
    /// Editor area inside the borders, where text is drawn.
    pub editor_inner: Rect,
    /// Footer area (key hints or status, 1 line).
    pub footer: Rect,
}

const EDITOR_CONSTRAINTS: [Constraint; 3] = [
    Constraint::Length(1), // Header
    Constraint::Min(3),    // Editor (grows)
    Constraint::Length(1), // Footer
];

/// Calculates the editor layout for the given terminal area.
#[must_use]
pub fn calculate_editor_layout(area: Rect) -> EditorLayout {
    let [header, editor, footer] = Layout::vertical(EDITOR_CONSTRAINTS).areas(area);
    let editor_inner = Block::default().borders(Borders::ALL).inner(editor);

    EditorLayout {
        header,
        editor,
        editor_inner,
        footer,
    }
}

/// Centers a `width` x `height` box in `area`, shrinking it to fit.
#[must_use]
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
