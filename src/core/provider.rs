//! Candidate lookup for the palette.
//!
//! A provider turns a query into an ordered candidate list. The built-in
//! [`CommandRegistry`](crate::core::CommandRegistry) answers synchronously,
//! but the palette only ever talks to providers through
//! [`CandidateRequest`]/[`CandidateResponse`] pairs, so lookups can also run
//! on a background task (see [`spawn_provider_task`]).
//!
//! Each request carries the generation it was issued under. The palette
//! compares it against the open session when the response comes back and
//! drops anything stale.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::core::commands::Candidate;

/// Errors a candidate lookup can produce.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider failed to compute candidates.
    #[error("candidate lookup failed: {0}")]
    Lookup(String),
    /// The background lookup task died before answering.
    #[error("candidate lookup task aborted: {0}")]
    Aborted(String),
}

/// Source of palette candidates.
pub trait CandidateProvider: Send + Sync {
    /// Returns candidates for `query` in display order.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] if the lookup fails. The palette treats a
    /// failure as an empty list.
    fn candidates(&self, query: &str) -> Result<Vec<Candidate>, ProviderError>;
}

/// Query sent to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRequest {
    /// The query text (without the trigger character).
    pub query: String,
    /// Generation counter for discarding stale answers.
    pub generation: u64,
}

/// Provider answer for one [`CandidateRequest`].
#[derive(Debug, Clone)]
pub struct CandidateResponse {
    /// The generation of the request this answers.
    pub generation: u64,
    /// The candidates, or why they could not be produced.
    pub result: Result<Vec<Candidate>, ProviderError>,
}

impl CandidateRequest {
    /// Resolves the request synchronously on the calling thread.
    ///
    /// A provider that panics is reported as [`ProviderError::Aborted`], the
    /// same way the background task reports a crashed lookup.
    #[must_use]
    pub fn resolve(&self, provider: &dyn CandidateProvider) -> CandidateResponse {
        let result = catch_unwind(AssertUnwindSafe(|| provider.candidates(&self.query)))
            .unwrap_or_else(|_| Err(ProviderError::Aborted("provider panicked".to_string())));
        CandidateResponse {
            generation: self.generation,
            result,
        }
    }
}

/// Spawns a background task that answers candidate requests.
///
/// This function creates an async task that:
/// 1. Listens for [`CandidateRequest`] messages
/// 2. Runs the provider in a blocking task
/// 3. Sends the [`CandidateResponse`] back, tagged with the request generation
///
/// The task ends when either channel closes.
pub fn spawn_provider_task(
    provider: Arc<dyn CandidateProvider>,
    mut request_rx: mpsc::Receiver<CandidateRequest>,
    response_tx: mpsc::Sender<CandidateResponse>,
) {
    tokio::spawn(async move {
        while let Some(request) = request_rx.recv().await {
            let generation = request.generation;
            let provider = Arc::clone(&provider);

            let joined =
                tokio::task::spawn_blocking(move || provider.candidates(&request.query)).await;

            let result = joined.unwrap_or_else(|e| Err(ProviderError::Aborted(e.to_string())));
            if response_tx
                .send(CandidateResponse { generation, result })
                .await
                .is_err()
            {
                break;
            }
        }
    });
}
