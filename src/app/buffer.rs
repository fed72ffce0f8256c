//! Note buffer backed by `tui-textarea`.
//!
//! [`NoteBuffer`] is the document the palette edits. It stores plain lines and
//! marks block types with markdown-style prefixes:
//!
//! | Block          | Prefix    |
//! |----------------|-----------|
//! | heading 1..3   | `# ` .. `### ` |
//! | bullet item    | `- `      |
//! | task item      | `- [ ] `  |
//! | image          | `![](src)` inline |
//!
//! Offsets follow [`DocumentEngine`]: one per `char`, one per line break.

use ratatui::crossterm::event::KeyEvent;
use tui_textarea::{CursorMove, TextArea};

use crate::core::{BlockKind, DocRange, DocumentEngine, ListKind};

/// Placeholder shown while the note is empty.
pub const DEFAULT_PLACEHOLDER: &str = "Type / for commands...";

const TASK_PREFIX: &str = "- [ ] ";
const BULLET_PREFIX: &str = "- ";

/// Block prefix found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinePrefix {
    Heading,
    Bullet,
    Task,
}

/// Detects the block prefix of `line`, returning its kind and length in chars.
fn detect_prefix(line: &str) -> Option<(LinePrefix, usize)> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if (1..=6).contains(&hashes) && line[hashes..].starts_with(' ') {
        return Some((LinePrefix::Heading, hashes + 1));
    }
    if line.starts_with(TASK_PREFIX) || line.starts_with("- [x] ") || line.starts_with("- [X] ") {
        return Some((LinePrefix::Task, TASK_PREFIX.len()));
    }
    if line.starts_with(BULLET_PREFIX) {
        return Some((LinePrefix::Bullet, BULLET_PREFIX.len()));
    }
    None
}

/// Multi-line note text with a caret.
#[derive(Clone)]
pub struct NoteBuffer {
    textarea: TextArea<'static>,
    placeholder: String,
}

impl Default for NoteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::from_lines(vec![String::new()])
    }

    /// Creates a buffer holding `lines` with the caret at the end.
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        let mut buffer = Self {
            textarea: TextArea::default(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        };
        let last_row = lines.len().saturating_sub(1);
        let last_col = lines.last().map_or(0, |l| l.chars().count());
        buffer.set_lines(lines, (last_row, last_col));
        buffer
    }

    /// Changes the placeholder text, e.g. to mention a custom trigger.
    pub fn set_placeholder(&mut self, text: impl Into<String>) {
        self.placeholder = text.into();
    }

    /// Text shown while the buffer is empty.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Lets the textarea handle a key. Returns true if the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        self.textarea.input(key)
    }

    /// Inserts a string at the caret. Line breaks split lines.
    pub fn insert_str(&mut self, text: &str) -> bool {
        self.textarea.insert_str(text)
    }

    /// The lines of the buffer.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        self.textarea.lines()
    }

    /// The whole text with `\n` between lines.
    #[must_use]
    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Returns true if the buffer holds a single empty line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines().iter().all(String::is_empty) && self.lines().len() <= 1
    }

    /// Caret as (row, col), col counted in chars.
    #[must_use]
    pub fn cursor(&self) -> (usize, usize) {
        self.textarea.cursor()
    }

    /// Converts a (row, col) position to a document offset, clamping both.
    #[must_use]
    pub fn offset_of(&self, row: usize, col: usize) -> usize {
        let lines = self.lines();
        let row = row.min(lines.len().saturating_sub(1));
        let before: usize = lines[..row].iter().map(|l| l.chars().count() + 1).sum();
        let width = lines.get(row).map_or(0, |l| l.chars().count());
        before + col.min(width)
    }

    /// Converts a document offset to a (row, col) position, clamping to the end.
    #[must_use]
    pub fn position_of(&self, offset: usize) -> (usize, usize) {
        position_in(self.lines(), offset)
    }

    /// Replaces the content and places the caret at `cursor`.
    ///
    /// An empty `lines` becomes a single empty line.
    pub fn set_lines(&mut self, mut lines: Vec<String>, cursor: (usize, usize)) {
        if lines.is_empty() {
            lines.push(String::new());
        }
        let row = cursor.0.min(lines.len() - 1);
        let col = cursor.1.min(lines[row].chars().count());

        let mut textarea = TextArea::new(lines);

        textarea.move_cursor(CursorMove::Top);
        for _ in 0..row {
            textarea.move_cursor(CursorMove::Down);
        }
        textarea.move_cursor(CursorMove::Head);
        for _ in 0..col {
            textarea.move_cursor(CursorMove::Forward);
        }

        self.textarea = textarea;
    }

    fn chars(&self) -> Vec<char> {
        self.text().chars().collect()
    }

    /// Rebuilds from flattened chars with the caret at `caret`.
    fn set_chars(&mut self, chars: &[char], caret: usize) {
        let text: String = chars.iter().collect();
        let lines: Vec<String> = text.split('\n').map(String::from).collect();
        let cursor = position_in(&lines, caret);
        self.set_lines(lines, cursor);
    }

    /// Replaces the block prefix of `row` with `prefix`, keeping the caret on
    /// the same character.
    fn replace_prefix(&mut self, row: usize, prefix: &str) {
        let mut lines = self.lines().to_vec();
        let Some(line) = lines.get_mut(row) else {
            return;
        };
        let old_len = detect_prefix(line).map_or(0, |(_, len)| len);
        let rest = line.chars().skip(old_len).collect::<String>();
        *line = format!("{prefix}{rest}");

        let (crow, ccol) = self.cursor();
        let new_len = prefix.chars().count();
        let cursor = if crow == row {
            (row, ccol.saturating_sub(old_len) + new_len)
        } else {
            (crow, ccol)
        };
        self.set_lines(lines, cursor);
    }
}

fn position_in(lines: &[String], offset: usize) -> (usize, usize) {
    let mut remaining = offset;
    for (row, line) in lines.iter().enumerate() {
        let width = line.chars().count();
        if remaining <= width {
            return (row, remaining);
        }
        remaining -= width + 1;
    }
    let last = lines.len().saturating_sub(1);
    (last, lines.get(last).map_or(0, |l| l.chars().count()))
}

impl DocumentEngine for NoteBuffer {
    fn caret(&self) -> usize {
        let (row, col) = self.cursor();
        self.offset_of(row, col)
    }

    fn text_between(&self, from: usize, to: usize) -> String {
        let range = DocRange::new(from, to);
        self.text()
            .chars()
            .skip(range.start)
            .take(range.len())
            .collect()
    }

    fn delete_range(&mut self, range: DocRange) {
        let mut chars = self.chars();
        let start = range.start.min(chars.len());
        let end = range.end.min(chars.len());
        chars.drain(start..end);
        self.set_chars(&chars, start);
    }

    fn set_block(&mut self, at: usize, block: BlockKind) {
        let (row, _) = self.position_of(at);
        let prefix = match block {
            BlockKind::Paragraph => String::new(),
            BlockKind::Heading(level) => format!("{} ", "#".repeat(level.clamp(1, 3).into())),
        };
        self.replace_prefix(row, &prefix);
    }

    fn toggle_list(&mut self, at: usize, list: ListKind) {
        let (row, _) = self.position_of(at);
        let current = self
            .lines()
            .get(row)
            .and_then(|line| detect_prefix(line))
            .map(|(kind, _)| kind);
        let (kind, prefix) = match list {
            ListKind::Bullet => (LinePrefix::Bullet, BULLET_PREFIX),
            ListKind::Task => (LinePrefix::Task, TASK_PREFIX),
        };
        if current == Some(kind) {
            self.replace_prefix(row, "");
        } else {
            self.replace_prefix(row, prefix);
        }
    }

    fn insert_image(&mut self, at: usize, src: &str) {
        let mut chars = self.chars();
        let at = at.min(chars.len());
        let image: Vec<char> = format!("![]({src})").chars().collect();
        let caret = at + image.len();
        chars.splice(at..at, image);
        self.set_chars(&chars, caret);
    }
}
