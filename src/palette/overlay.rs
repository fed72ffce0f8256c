//! Overlay ownership and placement.
//!
//! An [`OverlayHandle`] represents the rendered palette overlay. It is
//! acquired from an [`OverlayTracker`] when the palette has somewhere to
//! draw, stored inside the session, and released when dropped. Because the
//! handle lives in the session, every way a session can end (confirm,
//! escape, caret leaving the range, focus loss, app teardown) releases it.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ratatui::layout::Rect;

/// Counts live overlays so teardown can be observed.
#[derive(Debug, Clone, Default)]
pub struct OverlayTracker {
    live: Arc<AtomicUsize>,
}

impl OverlayTracker {
    /// Creates a tracker with no live overlays.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires an overlay anchored at `anchor`.
    #[must_use]
    pub fn acquire(&self, anchor: Rect) -> OverlayHandle {
        self.live.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(?anchor, "palette overlay created");
        OverlayHandle {
            anchor,
            live: Arc::clone(&self.live),
        }
    }

    /// Number of overlays currently alive.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.load(Ordering::Relaxed)
    }
}

/// Owning handle for the palette overlay.
#[derive(Debug)]
pub struct OverlayHandle {
    anchor: Rect,
    live: Arc<AtomicUsize>,
}

impl OverlayHandle {
    /// The caret rectangle the overlay is attached to.
    #[must_use]
    pub const fn anchor(&self) -> Rect {
        self.anchor
    }

    /// Moves the overlay to a new anchor.
    pub fn reposition(&mut self, anchor: Rect) {
        self.anchor = anchor;
    }
}

impl Drop for OverlayHandle {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::Relaxed);
        tracing::debug!(anchor = ?self.anchor, "palette overlay destroyed");
    }
}

/// Calculates where to draw an overlay of the given size next to `anchor`.
///
/// The overlay goes below the anchor if there's room, otherwise above.
/// Its left edge is aligned with the anchor and kept on screen.
///
/// # Arguments
///
/// * `anchor` - Caret rectangle on screen
/// * `width` - Width of the overlay
/// * `height` - Height of the overlay
/// * `screen` - Total screen area
#[must_use]
pub fn place_overlay(anchor: Rect, width: u16, height: u16, screen: Rect) -> Rect {
    let screen_bottom = screen.y.saturating_add(screen.height);
    let anchor_bottom = anchor.y.saturating_add(anchor.height.max(1));

    // Try to position below the anchor first
    let below_space = screen_bottom.saturating_sub(anchor_bottom);
    let above_space = anchor.y.saturating_sub(screen.y);

    let y = if below_space >= height {
        anchor_bottom
    } else if above_space >= height {
        anchor.y - height
    } else if below_space >= above_space {
        anchor_bottom
    } else {
        anchor.y - above_space.min(height)
    };

    // Horizontal positioning - align left edge with anchor, but keep on screen
    let screen_right = screen.x.saturating_add(screen.width);
    let width = width.min(screen.width);
    let x = if anchor.x.saturating_add(width) <= screen_right {
        anchor.x.max(screen.x)
    } else {
        screen_right.saturating_sub(width)
    };

    // Clamp height to available space
    let actual_height = height.min(screen_bottom.saturating_sub(y));

    Rect::new(x, y, width, actual_height)
}
