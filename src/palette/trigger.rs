//! Trigger character detection.
//!
//! The detector watches document notifications and turns them into palette
//! lifecycle events:
//!
//! - [`TriggerEvent::Start`] when the trigger character is typed at a word
//!   boundary (line start or after whitespace)
//! - [`TriggerEvent::QueryChanged`] when the text between the trigger and the
//!   caret changes
//! - [`TriggerEvent::End`] when the caret leaves the trigger range, or when
//!   the controller closes the trigger explicitly
//!
//! The detector only reads the document.

use crate::core::document::{DocumentChange, DocumentEngine};

/// Why a trigger session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The caret moved before the trigger, or whitespace entered the query.
    CaretLeftRange,
    /// A candidate was confirmed.
    Confirmed,
    /// The user cancelled explicitly (Escape).
    Escaped,
    /// The document lost focus.
    FocusLost,
}

impl EndReason {
    /// Short label used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CaretLeftRange => "caret-left-range",
            Self::Confirmed => "confirmed",
            Self::Escaped => "escaped",
            Self::FocusLost => "focus-lost",
        }
    }
}

/// Lifecycle event emitted by [`TriggerDetector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    /// The trigger character was typed at `position`.
    Start {
        /// Offset of the trigger character.
        position: usize,
        /// Caret offset right after the trigger.
        caret: usize,
    },
    /// The text typed after the trigger changed.
    QueryChanged {
        /// Text between the trigger and the caret.
        query: String,
        /// Current caret offset.
        caret: usize,
    },
    /// The trigger session ended.
    End(EndReason),
}

/// An open trigger being tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenTrigger {
    position: usize,
    query: String,
}

/// Watches document edits for the trigger character.
#[derive(Debug, Clone)]
pub struct TriggerDetector {
    trigger: char,
    open: Option<OpenTrigger>,
}

impl TriggerDetector {
    /// Creates a detector for the given trigger character.
    #[must_use]
    pub const fn new(trigger: char) -> Self {
        Self {
            trigger,
            open: None,
        }
    }

    /// The configured trigger character.
    #[must_use]
    pub const fn trigger(&self) -> char {
        self.trigger
    }

    /// Returns true while a trigger is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Offset of the open trigger character, if any.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.open.as_ref().map(|t| t.position)
    }

    /// Processes one document notification.
    ///
    /// Must be called after the host applied the change, so `doc` reflects
    /// the new content and caret.
    pub fn observe(
        &mut self,
        change: DocumentChange,
        doc: &dyn DocumentEngine,
    ) -> Option<TriggerEvent> {
        let Some(open) = &mut self.open else {
            return self.detect_start(change, doc);
        };

        let caret = doc.caret();
        let trigger_still_there = doc
            .text_between(open.position, open.position + 1)
            .starts_with(self.trigger);

        if caret <= open.position || !trigger_still_there {
            self.open = None;
            return Some(TriggerEvent::End(EndReason::CaretLeftRange));
        }

        let query = doc.text_between(open.position + 1, caret);
        if query.chars().any(char::is_whitespace) {
            self.open = None;
            return Some(TriggerEvent::End(EndReason::CaretLeftRange));
        }

        if query == open.query {
            return None;
        }
        open.query.clone_from(&query);
        Some(TriggerEvent::QueryChanged { query, caret })
    }

    /// Closes the open trigger for an externally decided reason.
    ///
    /// Returns `None` if nothing was open.
    pub fn end(&mut self, reason: EndReason) -> Option<TriggerEvent> {
        self.open.take().map(|_| TriggerEvent::End(reason))
    }

    fn detect_start(
        &mut self,
        change: DocumentChange,
        doc: &dyn DocumentEngine,
    ) -> Option<TriggerEvent> {
        let DocumentChange::Inserted(c) = change else {
            return None;
        };
        if c != self.trigger {
            return None;
        }

        let caret = doc.caret();
        let position = caret.checked_sub(1)?;
        if !doc.text_between(position, caret).starts_with(self.trigger) {
            return None;
        }

        // Word boundary: line start or preceded by whitespace
        if position > 0 {
            let before = doc.text_between(position - 1, position);
            if !before.chars().all(char::is_whitespace) {
                return None;
            }
        }

        self.open = Some(OpenTrigger {
            position,
            query: String::new(),
        });
        Some(TriggerEvent::Start { position, caret })
    }
}

impl Default for TriggerDetector {
    fn default() -> Self {
        Self::new('/')
    }
}
