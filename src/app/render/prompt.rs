//! Prompt rendering.

use ratatui::{
    Frame,
    layout::Position,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, PromptKind, centered_rect};

impl App {
    /// Renders the open prompt as a centered single-line box.
    pub(crate) fn render_prompt(&self, frame: &mut Frame) {
        let Some(prompt) = &self.prompt else {
            return;
        };

        let popup_area = centered_rect(60, 4, frame.area());
        frame.render_widget(Clear, popup_area);

        let hint = match prompt.kind {
            PromptKind::ImageUrl { .. } => " [Enter] Insert  [Esc] Cancel ",
            PromptKind::Title { save_after: true } => " [Enter] Save  [Esc] Cancel ",
            PromptKind::Title { save_after: false } => " [Enter] Set  [Esc] Cancel ",
        };

        let block = Block::default()
            .title(prompt.kind.label())
            .title_style(self.theme.header_style())
            .title_bottom(Line::from(Span::styled(hint, self.theme.muted_style())))
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style());
        let inner = block.inner(popup_area);

        let input = Paragraph::new(Line::from(Span::styled(
            prompt.input.as_str(),
            self.theme.normal_style(),
        )))
        .block(block);
        frame.render_widget(input, popup_area);

        if inner.width > 0 && inner.height > 0 {
            let typed = u16::try_from(prompt.input.width()).unwrap_or(u16::MAX);
            let x = inner.x + typed.min(inner.width - 1);
            frame.set_cursor_position(Position::new(x, inner.y));
        }
    }
}
