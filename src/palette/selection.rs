//! Highlight navigation over the current candidate list.
//!
//! Selection is by index, not by identity: replacing the list always resets
//! the highlight to the first entry.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::commands::Candidate;

/// What a key did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The key is not a palette key; the document should receive it.
    NotConsumed,
    /// The key was handled (possibly as a no-op on an empty list).
    Consumed,
    /// The key asks to confirm the candidate at this index.
    Confirm(usize),
}

impl SelectionOutcome {
    /// Returns true unless the key should fall through to the document.
    #[must_use]
    pub const fn is_consumed(&self) -> bool {
        !matches!(self, Self::NotConsumed)
    }
}

/// Candidate list plus the highlighted index.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    candidates: Vec<Candidate>,
    highlighted: usize,
}

impl Selection {
    /// Replaces the candidate list and resets the highlight to 0.
    pub fn replace(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
        self.highlighted = 0;
    }

    /// The current candidates in display order.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true if there is nothing to select.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The highlighted index, or `None` when the list is empty.
    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        (!self.candidates.is_empty()).then_some(self.highlighted)
    }

    #[cfg(test)]
    fn highlighted_candidate(&self) -> Option<&Candidate> {
        self.candidates.get(self.highlighted)
    }

    /// Returns the candidate at `index` if it is within bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    /// Moves the highlight down, wrapping from the last entry to the first.
    pub fn select_next(&mut self) {
        let len = self.candidates.len();
        if len > 0 {
            self.highlighted = (self.highlighted + 1) % len;
        }
    }

    /// Moves the highlight up, wrapping from the first entry to the last.
    pub fn select_previous(&mut self) {
        let len = self.candidates.len();
        if len > 0 {
            self.highlighted = (self.highlighted + len - 1) % len;
        }
    }

    /// Highlights `index` without confirming. Out-of-range indices are ignored.
    pub fn hover(&mut self, index: usize) -> bool {
        if index < self.candidates.len() {
            self.highlighted = index;
            true
        } else {
            false
        }
    }

    /// Routes a key to the selection.
    ///
    /// Arrow keys and Enter are always consumed while the palette is open,
    /// even with an empty list, so navigation never leaks into the document.
    /// Keys carrying Ctrl or Alt fall through.
    pub fn handle_key(&mut self, key: &KeyEvent) -> SelectionOutcome {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return SelectionOutcome::NotConsumed;
        }

        match key.code {
            KeyCode::Down => {
                self.select_next();
                SelectionOutcome::Consumed
            }
            KeyCode::Up => {
                self.select_previous();
                SelectionOutcome::Consumed
            }
            KeyCode::Enter => match self.highlighted() {
                Some(index) => SelectionOutcome::Confirm(index),
                None => SelectionOutcome::Consumed,
            },
            _ => SelectionOutcome::NotConsumed,
        }
    }
}
