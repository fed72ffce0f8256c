//! The slash-command palette.
//!
//! - `trigger` - detects the trigger character and tracks the query
//! - `selection` - highlighted candidate and arrow-key navigation
//! - `session` - state of one open palette
//! - `overlay` - overlay ownership and placement next to the caret
//! - `controller` - ties the pieces together and routes keys

pub mod controller;
pub mod overlay;
pub mod selection;
pub mod session;
pub mod trigger;

pub use controller::{PaletteKeyResult, SuggestionController};
pub use overlay::{OverlayHandle, OverlayTracker, place_overlay};
pub use selection::{Selection, SelectionOutcome};
pub use session::SuggestionSession;
pub use trigger::{EndReason, TriggerDetector, TriggerEvent};
