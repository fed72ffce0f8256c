//! Terminal setup and configuration utilities.
//!
//! This module handles low-level terminal event configuration including:
//! - Bracketed paste mode (for reliable multi-line paste)
//! - Keyboard enhancement protocol (for unambiguous Escape)
//! - Mouse capture (hover and click on palette rows)
//! - Focus change reporting (focus loss closes the palette)

use std::io::stdout;

use ratatui::crossterm::event::{
    DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use ratatui::crossterm::execute;
use tracing::{debug, warn};

/// Guard to ensure terminal event modes are disabled on drop.
///
/// This ensures proper cleanup even if the application panics.
pub struct TerminalEventGuard {
    bracketed_paste_enabled: bool,
    keyboard_enhancement_enabled: bool,
    mouse_capture_enabled: bool,
    focus_change_enabled: bool,
}

impl TerminalEventGuard {
    #[must_use]
    pub fn new() -> Self {
        let mut guard = Self {
            bracketed_paste_enabled: false,
            keyboard_enhancement_enabled: false,
            mouse_capture_enabled: false,
            focus_change_enabled: false,
        };

        match execute!(stdout(), EnableBracketedPaste) {
            Ok(()) => {
                debug!("bracketed paste enabled");
                guard.bracketed_paste_enabled = true;
            }
            Err(e) => warn!(error = %e, "could not enable bracketed paste mode"),
        }

        // Kitty protocol: lets Escape arrive without the alt-prefix delay
        match execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        ) {
            Ok(()) => {
                debug!("keyboard enhancement enabled");
                guard.keyboard_enhancement_enabled = true;
            }
            Err(e) => debug!(error = %e, "keyboard enhancement unavailable"),
        }

        match execute!(stdout(), EnableMouseCapture) {
            Ok(()) => guard.mouse_capture_enabled = true,
            Err(e) => warn!(error = %e, "could not enable mouse capture"),
        }

        match execute!(stdout(), EnableFocusChange) {
            Ok(()) => guard.focus_change_enabled = true,
            Err(e) => debug!(error = %e, "focus change reporting unavailable"),
        }

        guard
    }
}

impl Default for TerminalEventGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalEventGuard {
    fn drop(&mut self) {
        if self.focus_change_enabled {
            let _ = execute!(stdout(), DisableFocusChange);
        }
        if self.mouse_capture_enabled {
            let _ = execute!(stdout(), DisableMouseCapture);
        }
        if self.keyboard_enhancement_enabled {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        if self.bracketed_paste_enabled {
            let _ = execute!(stdout(), DisableBracketedPaste);
        }
    }
}
