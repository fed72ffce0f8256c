//! Slash command palette widget.
//!
//! Displays the candidates of the open palette session next to the caret,
//! with an explicit empty state when nothing matches.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::palette::SuggestionSession;
use crate::tui::Theme;

/// Maximum number of visible rows in the palette.
pub const MAX_PALETTE_ROWS: usize = 8;

/// Shown when the query matches nothing.
pub const NO_RESULTS: &str = "결과 없음";

/// Shown while the first answer for a session is outstanding.
pub const LOADING: &str = "...";

const MIN_WIDTH: u16 = 16;
const MAX_WIDTH: u16 = 48;

/// Index of the first visible row so the highlight stays in view.
fn scroll_offset(session: &SuggestionSession, visible_rows: usize) -> usize {
    session
        .selection()
        .highlighted()
        .map_or(0, |i| (i + 1).saturating_sub(visible_rows.max(1)))
}

/// Maps a screen cell inside the palette to a candidate index.
///
/// Returns `None` for the border, the empty state, or rows past the list.
#[must_use]
pub fn palette_row_at(
    area: Rect,
    column: u16,
    row: u16,
    session: &SuggestionSession,
) -> Option<usize> {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    if column < inner.x || column >= inner.right() || row < inner.y || row >= inner.bottom() {
        return None;
    }
    let offset = scroll_offset(session, inner.height as usize);
    let index = offset + (row - inner.y) as usize;
    (index < session.selection().len()).then_some(index)
}

/// Widget for rendering the command palette.
pub struct CommandPalette<'a> {
    session: &'a SuggestionSession,
    theme: &'a Theme,
}

impl<'a> CommandPalette<'a> {
    /// Creates a new palette widget for an open session.
    #[must_use]
    pub const fn new(session: &'a SuggestionSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }

    /// Calculates the preferred size for the palette.
    ///
    /// Returns (width, height) in terminal cells. The empty state still takes
    /// one row.
    #[must_use]
    pub fn preferred_size(&self) -> (u16, u16) {
        let candidates = self.session.selection().candidates();

        let widest = candidates
            .iter()
            .map(|c| c.title.width())
            .chain(std::iter::once(NO_RESULTS.width()))
            .max()
            .unwrap_or(0);

        // "> " prefix, borders, one cell of padding
        let width = u16::try_from(widest + 5)
            .unwrap_or(MAX_WIDTH)
            .clamp(MIN_WIDTH, MAX_WIDTH);

        let content_rows = candidates.len().clamp(1, MAX_PALETTE_ROWS);
        // Safe cast: content_rows is at most MAX_PALETTE_ROWS
        #[allow(clippy::cast_possible_truncation)]
        let height = (content_rows + 2) as u16;

        (width, height)
    }

    fn placeholder(&self) -> ListItem<'static> {
        let text = if self.session.is_pending() {
            LOADING
        } else {
            NO_RESULTS
        };
        ListItem::new(Line::from(Span::styled(
            format!("  {text}"),
            self.theme.muted_style(),
        )))
    }
}

impl Widget for CommandPalette<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first
        Clear.render(area, buf);

        let block = Block::default()
            .title(" Commands ")
            .title_style(self.theme.header_style())
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style());

        let inner = block.inner(area);
        block.render(area, buf);

        let selection = self.session.selection();
        let items: Vec<ListItem> = if selection.is_empty() {
            vec![self.placeholder()]
        } else {
            let visible = inner.height as usize;
            let offset = scroll_offset(self.session, visible);
            let highlighted = selection.highlighted();
            selection
                .candidates()
                .iter()
                .enumerate()
                .skip(offset)
                .take(visible)
                .map(|(i, candidate)| {
                    let is_selected = highlighted == Some(i);
                    let style = if is_selected {
                        self.theme.highlight_style()
                    } else {
                        self.theme.normal_style()
                    };
                    let prefix = if is_selected { "> " } else { "  " };
                    ListItem::new(Line::from(vec![
                        Span::styled(prefix, style),
                        Span::styled(candidate.title, style),
                    ]))
                })
                .collect()
        };

        Widget::render(List::new(items), inner, buf);
    }
}
