//! State of one open palette session.

use crate::core::document::DocRange;
use crate::palette::overlay::OverlayHandle;
use crate::palette::selection::Selection;

/// Everything the palette tracks between trigger start and trigger end.
///
/// Dropping the session releases its overlay.
#[derive(Debug)]
pub struct SuggestionSession {
    pub(crate) trigger_position: usize,
    pub(crate) query: String,
    pub(crate) range: DocRange,
    pub(crate) selection: Selection,
    pub(crate) generation: u64,
    pub(crate) pending: bool,
    pub(crate) overlay: Option<OverlayHandle>,
}

impl SuggestionSession {
    pub(crate) fn new(trigger_position: usize, caret: usize) -> Self {
        Self {
            trigger_position,
            query: String::new(),
            range: DocRange::new(trigger_position, caret),
            selection: Selection::default(),
            generation: 0,
            pending: false,
            overlay: None,
        }
    }

    /// Offset of the trigger character.
    #[must_use]
    pub const fn trigger_position(&self) -> usize {
        self.trigger_position
    }

    /// Text typed after the trigger.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Span from the trigger character to the caret.
    #[must_use]
    pub const fn range(&self) -> DocRange {
        self.range
    }

    /// Candidates and highlight.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Generation of the newest request issued for this session.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true while the newest request has not been answered.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// The overlay, if the caret anchor is currently measurable.
    #[must_use]
    pub const fn overlay(&self) -> Option<&OverlayHandle> {
        self.overlay.as_ref()
    }

    pub(crate) fn update_query(&mut self, query: String, caret: usize) {
        self.query = query;
        self.range = DocRange::new(self.trigger_position, caret);
    }
}
