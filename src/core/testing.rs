//! In-memory document used by unit tests.

use crate::core::document::{BlockKind, DocRange, DocumentEngine, ListKind};

/// Structural edit recorded by [`RecordingDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocOp {
    Delete(DocRange),
    SetBlock(usize, BlockKind),
    ToggleList(usize, ListKind),
    InsertImage(usize, String),
}

/// Flat-text document that applies deletes and records every structural edit.
#[derive(Debug, Clone, Default)]
pub struct RecordingDocument {
    chars: Vec<char>,
    caret: usize,
    pub ops: Vec<DocOp>,
}

impl RecordingDocument {
    pub fn new(text: &str, caret: usize) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let caret = caret.min(chars.len());
        Self {
            chars,
            caret,
            ops: Vec::new(),
        }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Inserts `c` at the caret and advances it.
    pub fn type_char(&mut self, c: char) {
        self.chars.insert(self.caret, c);
        self.caret += 1;
    }

    /// Deletes the character before the caret.
    pub fn backspace(&mut self) {
        if self.caret > 0 {
            self.caret -= 1;
            self.chars.remove(self.caret);
        }
    }

    pub fn move_caret(&mut self, to: usize) {
        self.caret = to.min(self.chars.len());
    }
}

impl DocumentEngine for RecordingDocument {
    fn caret(&self) -> usize {
        self.caret
    }

    fn text_between(&self, from: usize, to: usize) -> String {
        let to = to.min(self.chars.len());
        let from = from.min(to);
        self.chars[from..to].iter().collect()
    }

    fn delete_range(&mut self, range: DocRange) {
        let end = range.end.min(self.chars.len());
        let start = range.start.min(end);
        self.chars.drain(start..end);
        self.caret = start;
        self.ops.push(DocOp::Delete(range));
    }

    fn set_block(&mut self, at: usize, block: BlockKind) {
        self.ops.push(DocOp::SetBlock(at, block));
    }

    fn toggle_list(&mut self, at: usize, list: ListKind) {
        self.ops.push(DocOp::ToggleList(at, list));
    }

    fn insert_image(&mut self, at: usize, src: &str) {
        self.ops.push(DocOp::InsertImage(at, src.to_string()));
    }
}
