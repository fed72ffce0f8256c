//! Editor rendering.
//!
//! Draws the header, the note, the footer and, while a palette session has an
//! overlay, the command palette at the caret.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::state::StatusLevel;
use crate::app::{App, AppMode, editor_viewport, wrap_lines_for_display};
use crate::tui::widgets::CommandPalette;

impl App {
    /// Renders the editor screen.
    ///
    /// Uses the cached layout from `self.layout.editor`, calculated once per
    /// frame in `update_layout()`.
    pub(crate) fn render_editor(&self, frame: &mut Frame) {
        let layout = self.layout.editor;

        self.render_header(frame, layout.header);
        self.render_note(frame, layout.editor, layout.editor_inner);
        self.render_footer(frame, layout.footer);

        // Palette goes last so it sits on top of the note
        if let (Some(session), Some(area)) = (self.palette.session(), self.layout.palette_area) {
            frame.render_widget(CommandPalette::new(session, &self.theme), area);
        }
    }

    /// Renders the header with the note title.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title = if self.note.title.is_empty() {
            Span::styled("Untitled", self.theme.muted_style())
        } else {
            Span::styled(self.note.title.as_str(), self.theme.normal_style())
        };
        let mut spans = vec![Span::styled(" slashpad ", self.theme.header_style()), title];
        if self.editor.is_dirty {
            spans.push(Span::styled(" *", self.theme.warning_style()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Renders the note and places the terminal cursor at the caret.
    fn render_note(&self, frame: &mut Frame, area: Rect, inner: Rect) {
        let border_style = if self.mode == AppMode::Edit {
            self.theme.focused_border_style()
        } else {
            self.theme.border_style()
        };
        let block = Block::bordered()
            .title(" Note ")
            .title_style(self.theme.header_style())
            .border_style(border_style);
        frame.render_widget(block, area);

        let buffer = &self.editor.buffer;
        let Some(view) = editor_viewport(buffer.lines(), buffer.cursor(), inner) else {
            return;
        };

        if buffer.is_empty() {
            let placeholder = Paragraph::new(Span::styled(
                buffer.placeholder(),
                self.theme.placeholder_style(),
            ));
            frame.render_widget(placeholder, inner);
        } else {
            // Wrap each line on its own so continuation rows keep its style
            let width = inner.width as usize;
            let visual: Vec<Line> = buffer
                .lines()
                .iter()
                .flat_map(|line| {
                    let style = self.theme.line_style(line);
                    wrap_lines_for_display(std::slice::from_ref(line), 0, 0, width)
                        .visual_lines
                        .into_iter()
                        .map(move |segment| Line::styled(segment, style))
                })
                .skip(view.scroll)
                .take(inner.height as usize)
                .collect();
            frame.render_widget(Paragraph::new(visual), inner);
        }

        if self.mode == AppMode::Edit {
            frame.set_cursor_position(Position::new(
                inner.x + view.caret_col,
                inner.y + view.caret_row,
            ));
        }
    }

    /// Renders the footer: palette hints, the last status message, or key hints.
    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let content = if self.palette.is_open() {
            vec![
                Span::styled(" [↑/↓] ", self.theme.highlight_style()),
                Span::styled("Navigate  ", self.theme.muted_style()),
                Span::styled("[Enter] ", self.theme.highlight_style()),
                Span::styled("Insert  ", self.theme.muted_style()),
                Span::styled("[Esc] ", self.theme.highlight_style()),
                Span::styled("Dismiss", self.theme.muted_style()),
            ]
        } else if let Some(status) = &self.status {
            let style = match status.level {
                StatusLevel::Info => self.theme.success_style(),
                StatusLevel::Warning => self.theme.warning_style(),
            };
            vec![Span::styled(format!(" {}", status.text), style)]
        } else {
            vec![
                Span::styled(" [Ctrl+S] ", self.theme.highlight_style()),
                Span::styled("Save  ", self.theme.muted_style()),
                Span::styled("[Ctrl+N] ", self.theme.highlight_style()),
                Span::styled("New  ", self.theme.muted_style()),
                Span::styled("[Ctrl+O] ", self.theme.highlight_style()),
                Span::styled("Open  ", self.theme.muted_style()),
                Span::styled("[Ctrl+T] ", self.theme.highlight_style()),
                Span::styled("Title  ", self.theme.muted_style()),
                Span::styled("[Ctrl+Q] ", self.theme.highlight_style()),
                Span::styled("Quit", self.theme.muted_style()),
            ]
        };

        frame.render_widget(Paragraph::new(Line::from(content)), area);
    }
}
