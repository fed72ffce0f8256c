//! Saved-notes picker rendering.

use ratatui::{
    Frame,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, centered_rect};

/// Shown when no note has been saved yet.
const NO_NOTES: &str = "No saved notes yet.";

impl App {
    /// Renders the notes picker as a centered overlay.
    pub(crate) fn render_notes(&self, frame: &mut Frame) {
        let list = &self.notes_list;
        // One row per note plus spacing, hints and borders
        let rows = u16::try_from(list.notes.len().max(1)).unwrap_or(u16::MAX);
        let popup_area = centered_rect(60, rows.saturating_add(4), frame.area());

        frame.render_widget(Clear, popup_area);

        let mut content_lines = Vec::new();
        if list.notes.is_empty() {
            content_lines.push(Line::from(Span::styled(NO_NOTES, self.theme.muted_style())));
        }
        for (i, note) in list.notes.iter().enumerate() {
            let is_selected = i == list.selected;
            let (prefix, style) = if is_selected {
                ("› ", self.theme.highlight_style())
            } else {
                ("  ", self.theme.normal_style())
            };
            let updated = note.updated_at.format("%Y-%m-%d %H:%M").to_string();
            content_lines.push(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(note.title.as_str(), style),
                Span::styled(format!("  {updated}"), self.theme.muted_style()),
            ]));
        }

        content_lines.push(Line::from(""));
        content_lines.push(Line::from(vec![
            Span::styled("[↑/↓] ", self.theme.highlight_style()),
            Span::styled("Navigate  ", self.theme.muted_style()),
            Span::styled("[Enter] ", self.theme.highlight_style()),
            Span::styled("Open  ", self.theme.muted_style()),
            Span::styled("[Esc] ", self.theme.highlight_style()),
            Span::styled("Close", self.theme.muted_style()),
        ]));

        let block = Block::default()
            .title(" Saved Notes ")
            .title_style(self.theme.header_style())
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style());

        frame.render_widget(Paragraph::new(content_lines).block(block), popup_area);
    }
}
