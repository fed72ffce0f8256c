//! Document engine boundary.
//!
//! The palette never talks to `tui-textarea` directly. It sees the document
//! through [`DocumentEngine`], which exposes exactly what the trigger detector
//! and the block commands need: the caret, plain-text queries between two
//! offsets, and a handful of structural edits.
//!
//! ## Offsets
//!
//! Offsets count `char`s in the flattened document text, where every line
//! break counts as a single character. `"ab\ncd"` has offsets `0..=5`; the
//! `c` sits at offset 3.

/// Half-open range of document offsets (`start..end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocRange {
    /// First offset included in the range.
    pub start: usize,
    /// First offset after the range.
    pub end: usize,
}

impl DocRange {
    /// Creates a range, swapping the bounds if they are reversed.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Number of characters covered by the range.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the range covers no characters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Block-level node type of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockKind {
    /// Plain paragraph.
    #[default]
    Paragraph,
    /// Heading with a level between 1 and 3.
    Heading(u8),
}

/// List flavour toggled on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Bulleted list item (`- `).
    Bullet,
    /// Task list item (`- [ ] `).
    Task,
}

/// Notification handed to the trigger detector after the host applied an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentChange {
    /// A single character was typed at the caret.
    Inserted(char),
    /// Content changed in some other way (delete, paste, newline, command).
    Edited,
    /// Only the caret moved.
    CaretMoved,
}

/// Operations the palette needs from the host document engine.
pub trait DocumentEngine {
    /// Current caret offset.
    fn caret(&self) -> usize;

    /// Plain text between two offsets. Out-of-range bounds are clamped.
    fn text_between(&self, from: usize, to: usize) -> String;

    /// Deletes the characters in `range` and leaves the caret at `range.start`.
    fn delete_range(&mut self, range: DocRange);

    /// Turns the line containing `at` into the given block type.
    fn set_block(&mut self, at: usize, block: BlockKind);

    /// Toggles the given list type on the line containing `at`.
    fn toggle_list(&mut self, at: usize, list: ListKind);

    /// Inserts an image node referencing `src` at `at`.
    fn insert_image(&mut self, at: usize, src: &str);
}
