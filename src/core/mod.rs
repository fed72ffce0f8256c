//! Core palette building blocks: the document boundary, the command registry,
//! and candidate providers.

pub mod commands;
pub mod document;
pub mod provider;

#[cfg(test)]
pub(crate) mod testing;

pub use commands::{
    BlockCommand, Candidate, CommandContext, CommandRegistry, CommandResult, HeadingCommand,
    ImageCommand, TaskListCommand, apply_image,
};
pub use document::{BlockKind, DocRange, DocumentChange, DocumentEngine, ListKind};
pub use provider::{
    CandidateProvider, CandidateRequest, CandidateResponse, ProviderError, spawn_provider_task,
};
