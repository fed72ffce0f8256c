//! Suggestion controller.
//!
//! Ties the trigger detector, candidate provider, selection and overlay
//! together. The controller is driven by the host in three ways:
//!
//! 1. [`SuggestionController::on_document_change`] after every edit, which may
//!    return a [`CandidateRequest`] for the host to resolve
//! 2. [`SuggestionController::resolve`] with the provider's answer
//! 3. [`SuggestionController::handle_key`] before the document sees a key
//!
//! It is single-threaded; background lookups only ever talk to it through
//! tagged responses.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use tracing::{debug, trace, warn};

use crate::core::commands::CommandResult;
use crate::core::document::{DocumentChange, DocumentEngine};
use crate::core::provider::{CandidateRequest, CandidateResponse};
use crate::palette::overlay::{OverlayHandle, OverlayTracker};
use crate::palette::selection::SelectionOutcome;
use crate::palette::session::SuggestionSession;
use crate::palette::trigger::{EndReason, TriggerDetector, TriggerEvent};

/// Result of routing a key through the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKeyResult {
    /// The document should handle the key.
    NotConsumed,
    /// The palette handled the key.
    Consumed,
    /// The palette confirmed a candidate and ran its command.
    Executed(CommandResult),
}

impl PaletteKeyResult {
    /// Returns true if the document must not see the key.
    #[must_use]
    pub const fn is_consumed(&self) -> bool {
        !matches!(self, Self::NotConsumed)
    }
}

#[derive(Debug, Default)]
enum PaletteState {
    #[default]
    Closed,
    Open(SuggestionSession),
}

/// Orchestrates palette sessions.
#[derive(Debug)]
pub struct SuggestionController {
    detector: TriggerDetector,
    state: PaletteState,
    /// Last generation handed out. Shared by all sessions so a late answer
    /// for a closed session can never match a newer one.
    last_generation: u64,
    overlays: OverlayTracker,
}

impl SuggestionController {
    /// Creates a controller listening for `trigger`.
    #[must_use]
    pub fn new(trigger: char) -> Self {
        Self {
            detector: TriggerDetector::new(trigger),
            state: PaletteState::Closed,
            last_generation: 0,
            overlays: OverlayTracker::new(),
        }
    }

    /// The trigger character.
    #[must_use]
    pub const fn trigger(&self) -> char {
        self.detector.trigger()
    }

    /// Returns true while a session is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state, PaletteState::Open(_))
    }

    /// The open session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&SuggestionSession> {
        match &self.state {
            PaletteState::Open(session) => Some(session),
            PaletteState::Closed => None,
        }
    }

    /// The live overlay, if a session is open and anchored.
    #[must_use]
    pub fn overlay(&self) -> Option<&OverlayHandle> {
        self.session().and_then(SuggestionSession::overlay)
    }

    /// Number of overlays alive right now. Never more than one.
    #[must_use]
    pub fn live_overlays(&self) -> usize {
        self.overlays.live_count()
    }

    // =========================================================================
    // Document notifications
    // =========================================================================

    /// Feeds one document notification through the trigger detector.
    ///
    /// Returns the request the host must resolve when a session started or
    /// its query changed.
    pub fn on_document_change(
        &mut self,
        change: DocumentChange,
        doc: &dyn DocumentEngine,
    ) -> Option<CandidateRequest> {
        match self.detector.observe(change, doc)? {
            TriggerEvent::Start { position, caret } => {
                debug!(position, "palette session opened");
                self.state = PaletteState::Open(SuggestionSession::new(position, caret));
                self.issue_request()
            }
            TriggerEvent::QueryChanged { query, caret } => {
                let PaletteState::Open(session) = &mut self.state else {
                    return None;
                };
                session.update_query(query, caret);
                self.issue_request()
            }
            TriggerEvent::End(reason) => {
                self.close(reason);
                None
            }
        }
    }

    fn issue_request(&mut self) -> Option<CandidateRequest> {
        let PaletteState::Open(session) = &mut self.state else {
            return None;
        };
        self.last_generation += 1;
        session.generation = self.last_generation;
        session.pending = true;
        // The old list belongs to the previous query; nothing is confirmable
        // until the new answer arrives
        session.selection.replace(Vec::new());
        Some(CandidateRequest {
            query: session.query.clone(),
            generation: self.last_generation,
        })
    }

    /// Applies a provider answer.
    ///
    /// Answers for a closed session or an outdated generation are dropped.
    /// A failed lookup shows as an empty list and keeps the session open.
    /// Returns true if the session changed.
    pub fn resolve(&mut self, response: CandidateResponse) -> bool {
        let PaletteState::Open(session) = &mut self.state else {
            trace!(
                generation = response.generation,
                "dropping candidates for closed palette"
            );
            return false;
        };
        if response.generation != session.generation {
            trace!(
                generation = response.generation,
                current = session.generation,
                "dropping stale candidates"
            );
            return false;
        }

        session.pending = false;
        match response.result {
            Ok(candidates) => session.selection.replace(candidates),
            Err(e) => {
                warn!(query = %session.query, error = %e, "candidate provider failed");
                session.selection.replace(Vec::new());
            }
        }
        true
    }

    // =========================================================================
    // Input routing
    // =========================================================================

    /// Routes a key to the palette.
    ///
    /// Must be called before the document handles the key. When the result is
    /// consumed the host must not forward the key to the document.
    pub fn handle_key(&mut self, key: &KeyEvent, doc: &mut dyn DocumentEngine) -> PaletteKeyResult {
        let PaletteState::Open(session) = &mut self.state else {
            return PaletteKeyResult::NotConsumed;
        };

        if key.code == KeyCode::Esc
            && !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            self.close(EndReason::Escaped);
            return PaletteKeyResult::Consumed;
        }

        match session.selection.handle_key(key) {
            SelectionOutcome::NotConsumed => PaletteKeyResult::NotConsumed,
            SelectionOutcome::Consumed => PaletteKeyResult::Consumed,
            SelectionOutcome::Confirm(index) => self
                .confirm(index, doc)
                .map_or(PaletteKeyResult::Consumed, PaletteKeyResult::Executed),
        }
    }

    /// Highlights the candidate under the pointer.
    pub fn hover(&mut self, index: usize) -> bool {
        match &mut self.state {
            PaletteState::Open(session) => session.selection.hover(index),
            PaletteState::Closed => false,
        }
    }

    /// Confirms the candidate under the pointer.
    pub fn click(&mut self, index: usize, doc: &mut dyn DocumentEngine) -> Option<CommandResult> {
        self.confirm(index, doc)
    }

    /// Confirms the candidate at `index`.
    ///
    /// The index is checked against the current list; an invalid index is
    /// ignored and the session stays open. On success the session is closed
    /// before the command runs, so the command sees a document without an
    /// active palette.
    pub fn confirm(&mut self, index: usize, doc: &mut dyn DocumentEngine) -> Option<CommandResult> {
        let PaletteState::Open(session) = &self.state else {
            return None;
        };
        let Some(candidate) = session.selection.get(index).cloned() else {
            debug!(index, len = session.selection.len(), "ignoring invalid confirm");
            return None;
        };
        let range = session.range;

        self.close(EndReason::Confirmed);
        debug!(title = candidate.title, ?range, "running palette command");
        Some(candidate.run(doc, range))
    }

    /// Ends the open session for `reason`.
    ///
    /// Returns false if nothing was open.
    pub fn cancel(&mut self, reason: EndReason) -> bool {
        self.close(reason)
    }

    fn close(&mut self, reason: EndReason) -> bool {
        self.detector.end(reason);
        match std::mem::take(&mut self.state) {
            PaletteState::Open(session) => {
                debug!(
                    reason = reason.name(),
                    query = %session.query,
                    "palette session closed"
                );
                true
            }
            PaletteState::Closed => false,
        }
    }

    // =========================================================================
    // Overlay
    // =========================================================================

    /// Updates the overlay from the latest caret anchor.
    ///
    /// `None` means the caret position cannot be measured: the overlay is
    /// released but the session keeps routing keys. A later anchor brings the
    /// overlay back.
    pub fn update_anchor(&mut self, anchor: Option<Rect>) {
        let PaletteState::Open(session) = &mut self.state else {
            return;
        };
        match (anchor, session.overlay.as_mut()) {
            (Some(anchor), Some(overlay)) => overlay.reposition(anchor),
            (Some(anchor), None) => session.overlay = Some(self.overlays.acquire(anchor)),
            (None, Some(_)) => {
                debug!("caret anchor unavailable, hiding palette overlay");
                session.overlay = None;
            }
            (None, None) => {}
        }
    }
}

impl Default for SuggestionController {
    fn default() -> Self {
        Self::new('/')
    }
}
