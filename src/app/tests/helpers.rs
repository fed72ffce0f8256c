//! Shared test utilities for the app module.
//!
//! - `create_test_app` / `create_test_app_with_lines` - `App` instances backed
//!   by a temporary directory
//! - `render_app_to_terminal` - Renders the app to a `TestBackend`
//! - Key event helpers (`char_key`, `key`, `ctrl_key`, `type_str`)

use anyhow::Result;
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{Terminal, backend::TestBackend, layout::Rect};
use tempfile::TempDir;

use crate::app::{App, NoteBuffer};
use crate::fs::{PersistedSettings, SlashpadPaths};

/// Creates a [`KeyEvent`] for a character key with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

/// Creates a [`KeyEvent`] for `code` with no modifiers.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Creates a Ctrl+`c` [`KeyEvent`].
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Creates a mouse event at the given cell.
pub fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// Creates a left click at the given cell.
pub fn click(column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Down(MouseButton::Left), column, row)
}

/// Types every character of `s` as a separate key press.
pub fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
        app.handle_key(char_key(c));
    }
}

/// Creates an `App` with the given settings in a fresh temporary directory.
///
/// The directory must outlive the app, so it is returned alongside it.
pub fn create_test_app_with_settings(settings: PersistedSettings) -> Result<(App, TempDir)> {
    let dir = tempfile::tempdir()?;
    let app = App::with_settings(SlashpadPaths::new(dir.path()), settings);
    Ok((app, dir))
}

/// Creates an `App` with default settings. It starts on the welcome document.
pub fn create_test_app() -> Result<(App, TempDir)> {
    create_test_app_with_settings(PersistedSettings::default())
}

/// Creates an `App` whose note holds `lines`, with the caret at
/// (`cursor_row`, `cursor_col`).
///
/// `cursor_col` is a character index.
pub fn create_test_app_with_lines(
    lines: &[&str],
    cursor_row: usize,
    cursor_col: usize,
) -> Result<(App, TempDir)> {
    let (mut app, dir) = create_test_app()?;
    let mut buffer = NoteBuffer::default();
    buffer.set_lines(
        lines.iter().map(|s| (*s).to_string()).collect(),
        (cursor_row, cursor_col),
    );
    app.editor.replace(buffer);
    Ok((app, dir))
}

/// Renders the app to a `TestBackend` terminal.
///
/// Calls `update_layout()` before drawing, like the main loop does.
///
/// # Errors
///
/// Returns an error if terminal creation or rendering fails.
pub fn render_app_to_terminal(
    app: &mut App,
    width: u16,
    height: u16,
) -> Result<Terminal<TestBackend>> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;

    app.update_layout(Rect::new(0, 0, width, height));
    terminal.draw(|f| app.render(f))?;

    Ok(terminal)
}

/// Returns the rendered rows as plain strings.
pub fn buffer_rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    let area = *buffer.area();
    (area.y..area.bottom())
        .map(|y| {
            (area.x..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect()
        })
        .collect()
}

/// Returns true if any rendered row contains `needle`.
pub fn screen_contains(terminal: &Terminal<TestBackend>, needle: &str) -> bool {
    buffer_rows(terminal).iter().any(|row| row.contains(needle))
}
