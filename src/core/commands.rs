//! Block command registry for the slash palette.
//!
//! This module provides a trait-based command architecture for the
//! structural elements the palette can insert (headings, lists, images).
//!
//! ## Architecture
//!
//! - [`BlockCommand`] trait defines the interface for all commands
//! - [`CommandRegistry`] holds the ordered registry and filters it by query
//! - [`Candidate`] is one filtered entry handed to the palette
//! - [`CommandResult`] tells the host whether more input is needed
//!
//! ## Adding New Commands
//!
//! 1. Create a struct implementing [`BlockCommand`]
//! 2. Register it in [`CommandRegistry::with_builtins()`]
//! 3. Handle any new [`CommandResult`] variants in the app
//!
//! ## Example
//!
//! ```rust,ignore
//! pub struct QuoteCommand;
//!
//! impl BlockCommand for QuoteCommand {
//!     fn title(&self) -> &'static str { "인용 (Quote)" }
//!     fn execute(&self, ctx: &mut CommandContext) -> CommandResult {
//!         ctx.doc.delete_range(ctx.range);
//!         // ...
//!         CommandResult::Applied
//!     }
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use crate::core::document::{BlockKind, DocRange, DocumentEngine, ListKind};
use crate::core::provider::{CandidateProvider, ProviderError};

/// Result of executing a block command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// The command finished editing the document.
    Applied,
    /// The command needs an image URL before it can edit the document.
    ///
    /// The range still holds the trigger text; the host deletes it once a
    /// URL is supplied.
    RequestImageUrl {
        /// The trigger range to replace with the image.
        range: DocRange,
    },
}

/// Context provided to commands during execution.
pub struct CommandContext<'a> {
    /// The document being edited.
    pub doc: &'a mut dyn DocumentEngine,
    /// Span from the trigger character to the caret.
    pub range: DocRange,
}

/// Trait for implementing palette commands.
///
/// Every command that edits the document must delete `ctx.range` first so
/// the trigger text never survives a confirmed selection.
pub trait BlockCommand: Send + Sync {
    /// Returns the title shown in the palette and matched against queries.
    fn title(&self) -> &'static str;

    /// Executes the command against the document.
    fn execute(&self, ctx: &mut CommandContext) -> CommandResult;
}

/// One selectable palette entry.
#[derive(Clone)]
pub struct Candidate {
    /// Display title.
    pub title: &'static str,
    /// Command applied when the candidate is confirmed.
    pub command: Arc<dyn BlockCommand>,
}

impl Candidate {
    /// Runs the candidate's command with the given document and range.
    pub fn run(&self, doc: &mut dyn DocumentEngine, range: DocRange) -> CommandResult {
        let mut ctx = CommandContext { doc, range };
        self.command.execute(&mut ctx)
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Registry of available palette commands.
///
/// The registry is fixed at startup and keeps insertion order, which is
/// also the order candidates are offered in.
pub struct CommandRegistry {
    commands: Vec<Arc<dyn BlockCommand>>,
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Registers a new command with the registry.
    pub fn register(&mut self, cmd: Arc<dyn BlockCommand>) {
        self.commands.push(cmd);
    }

    /// Returns all registered commands.
    #[must_use]
    pub fn all(&self) -> &[Arc<dyn BlockCommand>] {
        &self.commands
    }

    /// Returns candidates whose titles contain `query`, ignoring case.
    ///
    /// An empty query returns the whole registry.
    #[must_use]
    pub fn matching(&self, query: &str) -> Vec<Candidate> {
        let needle = query.to_lowercase();
        self.commands
            .iter()
            .filter(|cmd| cmd.title().to_lowercase().contains(&needle))
            .map(|cmd| Candidate {
                title: cmd.title(),
                command: Arc::clone(cmd),
            })
            .collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Creates a registry with all built-in commands pre-registered.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(HeadingCommand::h1()));
        registry.register(Arc::new(HeadingCommand::h2()));
        registry.register(Arc::new(TaskListCommand));
        registry.register(Arc::new(ImageCommand));
        registry
    }
}

impl CandidateProvider for CommandRegistry {
    fn candidates(&self, query: &str) -> Result<Vec<Candidate>, ProviderError> {
        Ok(self.matching(query))
    }
}

// =============================================================================
// Built-in Commands
// =============================================================================

/// Turns the current line into a heading.
pub struct HeadingCommand {
    level: u8,
    title: &'static str,
}

impl HeadingCommand {
    /// Level-one heading.
    #[must_use]
    pub const fn h1() -> Self {
        Self {
            level: 1,
            title: "제목 1 (H1)",
        }
    }

    /// Level-two heading.
    #[must_use]
    pub const fn h2() -> Self {
        Self {
            level: 2,
            title: "제목 2 (H2)",
        }
    }
}

impl BlockCommand for HeadingCommand {
    fn title(&self) -> &'static str {
        self.title
    }

    fn execute(&self, ctx: &mut CommandContext) -> CommandResult {
        ctx.doc.delete_range(ctx.range);
        ctx.doc
            .set_block(ctx.range.start, BlockKind::Heading(self.level));
        CommandResult::Applied
    }
}

/// Toggles a task list item on the current line.
pub struct TaskListCommand;

impl BlockCommand for TaskListCommand {
    fn title(&self) -> &'static str {
        "할 일 목록 (Task)"
    }

    fn execute(&self, ctx: &mut CommandContext) -> CommandResult {
        ctx.doc.delete_range(ctx.range);
        ctx.doc.toggle_list(ctx.range.start, ListKind::Task);
        CommandResult::Applied
    }
}

/// Inserts an image after asking the host for its URL.
///
/// The document is left untouched until the URL arrives, so cancelling the
/// prompt keeps the typed trigger text.
pub struct ImageCommand;

impl BlockCommand for ImageCommand {
    fn title(&self) -> &'static str {
        "이미지 (URL)"
    }

    fn execute(&self, ctx: &mut CommandContext) -> CommandResult {
        CommandResult::RequestImageUrl { range: ctx.range }
    }
}

/// Replaces `range` with an image referencing `src`.
///
/// Used by the host once the image prompt returns a URL. A blank URL leaves
/// the document untouched and returns `false`.
pub fn apply_image(doc: &mut dyn DocumentEngine, range: DocRange, src: &str) -> bool {
    let src = src.trim();
    if src.is_empty() {
        return false;
    }
    doc.delete_range(range);
    doc.insert_image(range.start, src);
    true
}
