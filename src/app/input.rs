//! Text input handling for the App.
//!
//! This module handles:
//! - Classifying textarea edits into palette notifications
//! - Forwarding candidate requests to the provider
//! - Visual line wrapping and the caret anchor used to place the palette

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{trace, warn};
use unicode_width::UnicodeWidthChar;

use super::{App, ProviderMode};
use crate::core::{CandidateRequest, CandidateResponse, DocumentChange, ProviderError};

/// Result of wrapping lines for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapResult {
    /// Visual lines after wrapping.
    pub visual_lines: Vec<String>,
    /// Visual row of the cursor (0-indexed).
    pub visual_cursor_row: usize,
    /// Visual column of the cursor within the visual row.
    pub visual_cursor_col: usize,
}

fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(1)
}

/// Wraps logical lines into visual lines based on available width.
///
/// # Arguments
/// * `logical_lines` - The lines as stored in the buffer
/// * `cursor_row` - Current cursor's logical row (0-indexed)
/// * `cursor_col` - Current cursor's byte position in the logical row
/// * `width` - Available width for each visual line (0 disables wrapping)
#[must_use]
pub fn wrap_lines_for_display(
    logical_lines: &[String],
    cursor_row: usize,
    cursor_col: usize,
    width: usize,
) -> WrapResult {
    let limit = if width == 0 { usize::MAX } else { width };

    let mut visual_lines = Vec::new();
    let mut cursor = None;

    for (row, line) in logical_lines.iter().enumerate() {
        let mut segment = String::new();
        let mut segment_width = 0;

        for (byte_pos, ch) in line.char_indices() {
            let w = char_width(ch);
            if segment_width + w > limit && !segment.is_empty() {
                visual_lines.push(std::mem::take(&mut segment));
                segment_width = 0;
            }
            if row == cursor_row && byte_pos == cursor_col && cursor.is_none() {
                cursor = Some((visual_lines.len(), segment_width));
            }
            segment.push(ch);
            segment_width += w;
        }

        // Cursor past the last character sits after the final segment
        if row == cursor_row && cursor.is_none() {
            cursor = Some((visual_lines.len(), segment_width));
        }
        visual_lines.push(segment);
    }

    let (visual_cursor_row, visual_cursor_col) = cursor.unwrap_or_else(|| {
        let row = visual_lines.len().saturating_sub(1);
        let col = visual_lines
            .last()
            .map_or(0, |l| l.chars().map(char_width).sum());
        (row, col)
    });

    WrapResult {
        visual_lines,
        visual_cursor_row,
        visual_cursor_col,
    }
}

/// Scroll position and caret cell of the editor viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First visual row shown.
    pub scroll: usize,
    /// Caret row relative to the top of the viewport.
    pub caret_row: u16,
    /// Caret column relative to the left of the viewport.
    pub caret_col: u16,
}

/// Computes the viewport for drawing `lines` into `inner`.
///
/// `cursor` is the (row, char column) reported by the textarea. The caret row
/// is kept in the middle of the viewport when the text is taller than it.
/// Returns `None` when the area has no room to show a caret.
#[must_use]
pub fn editor_viewport(lines: &[String], cursor: (usize, usize), inner: Rect) -> Option<Viewport> {
    if inner.width == 0 || inner.height == 0 {
        return None;
    }

    let (cursor_row, cursor_char_col) = cursor;
    // Convert character column to byte column for wrap_lines_for_display
    let cursor_byte_col = lines.get(cursor_row).map_or(0, |line| {
        line.char_indices()
            .nth(cursor_char_col)
            .map_or(line.len(), |(byte_pos, _)| byte_pos)
    });

    let wrap = wrap_lines_for_display(lines, cursor_row, cursor_byte_col, inner.width as usize);

    let visual_height = inner.height as usize;
    let scroll = wrap
        .visual_cursor_row
        .saturating_sub(visual_height / 2)
        .min(wrap.visual_lines.len().saturating_sub(visual_height));
    let visible_row = wrap
        .visual_cursor_row
        .saturating_sub(scroll)
        .min(visual_height - 1);
    let visible_col = wrap.visual_cursor_col.min(inner.width as usize - 1);

    // Both values are bounded by the inner area's u16 dimensions
    #[allow(clippy::cast_possible_truncation)]
    let (caret_row, caret_col) = (visible_row as u16, visible_col as u16);

    Some(Viewport {
        scroll,
        caret_row,
        caret_col,
    })
}

/// Screen cell of the caret inside the editor's inner area.
///
/// `None` puts the palette into headless mode.
#[must_use]
pub fn caret_anchor(lines: &[String], cursor: (usize, usize), inner: Rect) -> Option<Rect> {
    editor_viewport(lines, cursor, inner).map(|view| {
        Rect::new(
            inner.x + view.caret_col,
            inner.y + view.caret_row,
            1,
            1,
        )
    })
}

/// Maps a textarea key to the notification the palette should see.
///
/// `modified` is what the textarea reported; `moved` tells whether the caret
/// changed position.
#[must_use]
pub fn classify_edit(key: &KeyEvent, modified: bool, moved: bool) -> Option<DocumentChange> {
    if modified {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(DocumentChange::Inserted(c))
            }
            _ => Some(DocumentChange::Edited),
        }
    } else if moved {
        Some(DocumentChange::CaretMoved)
    } else {
        None
    }
}

impl App {
    // ===== Document notifications =====

    /// Marks the note dirty and clears the status message (unless only the
    /// caret moved), then lets the palette observe the change.
    pub(crate) fn after_edit(&mut self, change: DocumentChange) {
        if change != DocumentChange::CaretMoved {
            self.editor.mark_dirty();
            self.status = None;
        }
        if let Some(request) = self.palette.on_document_change(change, &self.editor.buffer) {
            self.dispatch_request(request);
        }
    }

    /// Hands a candidate request to the provider.
    ///
    /// Inline providers answer immediately. Background requests are answered
    /// through `process_events`. While the request channel is full only the
    /// newest request is kept and retried from `process_events`; the session
    /// stays pending meanwhile. A closed channel fails the request, which
    /// shows an empty list.
    pub(crate) fn dispatch_request(&mut self, request: CandidateRequest) {
        match &mut self.provider {
            ProviderMode::Inline => {
                let response = request.resolve(&*self.registry);
                self.palette.resolve(response);
            }
            ProviderMode::Background { queued, .. } => {
                // A newer request always supersedes a queued one
                *queued = Some(request);
                self.flush_queued_request();
            }
        }
    }

    /// Sends the queued background request, if any.
    pub(crate) fn flush_queued_request(&mut self) {
        let ProviderMode::Background {
            request_tx, queued, ..
        } = &mut self.provider
        else {
            return;
        };
        let Some(request) = queued.take() else {
            return;
        };

        match request_tx.try_send(request) {
            Ok(()) => {}
            Err(TrySendError::Full(request)) => {
                trace!(
                    generation = request.generation,
                    "request channel full, retrying later"
                );
                *queued = Some(request);
            }
            Err(TrySendError::Closed(request)) => {
                warn!("candidate provider task is gone");
                self.palette.resolve(CandidateResponse {
                    generation: request.generation,
                    result: Err(ProviderError::Aborted("request channel closed".into())),
                });
            }
        }
    }
}
