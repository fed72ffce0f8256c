//! `slashpad` - terminal note editor with a slash-command palette
//!
//! Typing the trigger character opens a filtered list of block commands
//! (headings, task lists, images) next to the caret.

pub mod app;
pub mod cli;
pub mod core;
pub mod fs;
pub mod logging;
pub mod palette;
pub mod tui;
