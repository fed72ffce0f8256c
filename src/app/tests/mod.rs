//! Tests for the app module.
//!
//! Tests are organized into submodules by feature area:
//! - `helpers` - Shared test utilities
//! - `palette` - Palette flows driven through `App` key and mouse handling
//! - `notes` - Saving, loading and autosave
//! - `ui` - Rendering to a `TestBackend`

#[allow(clippy::unwrap_used, clippy::expect_used)]
mod helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod notes;
