//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// `slashpad` - terminal note editor with a slash-command palette
///
/// Type `/` at the start of a line or after a space to insert headings,
/// task lists and images.
#[derive(Parser, Debug)]
#[command(name = "slashpad", version, about, long_about = None)]
pub struct Args {
    /// Directory holding the `.slashpad` data folder (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Character that opens the command palette (overrides settings.json)
    #[arg(long, value_name = "CHAR")]
    pub trigger: Option<char>,

    /// Resolve palette candidates on a background task
    #[arg(long)]
    pub background_provider: bool,
}
