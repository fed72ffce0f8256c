//! Custom TUI widgets.

pub mod command_popup;

pub use command_popup::{CommandPalette, MAX_PALETTE_ROWS, NO_RESULTS, palette_row_at};
