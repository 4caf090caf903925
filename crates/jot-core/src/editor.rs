use anyhow::Result;

use crate::buffer::{Cursor, TextBuffer};
use crate::history::History;
use crate::keymap::Input;

/// Maximum number of undo snapshots kept in memory.
const HISTORY_DEPTH: usize = 30;

/// What the editor is currently doing with its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Primary editing mode.
    Insert,
    /// Quit was requested with unsaved changes; waiting for y/n.
    ConfirmExit,
    /// Accumulating a search query; Enter jumps to the next match.
    Find { query: Vec<char> },
}

/// What the event loop should do after an input was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Continue,
    Exit,
}

/// Persistence seam for the save keybind.
///
/// The TUI shell implements this over a flat file; tests swap in an
/// in-memory store.
pub trait DocumentStore {
    fn persist(&mut self, lines: &[Vec<char>]) -> Result<()>;
}

/// One editing session: buffer, cursor, mode, and undo history.
///
/// [`apply`](Editor::apply) is the single entry point: it consumes one
/// logical input, mutates the session, and tells the event loop whether
/// to keep going. A failed persist propagates as a fatal error without
/// touching the buffer or the unsaved flag.
pub struct Editor {
    pub buffer: TextBuffer,
    pub cursor: Cursor,
    pub mode: Mode,
    /// True whenever the buffer differs from what was last persisted.
    pub unsaved: bool,
    history: History,
}

impl Editor {
    pub fn new(buffer: TextBuffer, unsaved: bool) -> Self {
        Self {
            buffer,
            cursor: Cursor::default(),
            mode: Mode::Insert,
            unsaved,
            history: History::new(HISTORY_DEPTH),
        }
    }

    /// Open a pristine session over a string.
    pub fn from_text(text: &str) -> Self {
        Self::new(TextBuffer::from_text(text), false)
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Apply one logical input and report whether the session should end.
    pub fn apply(&mut self, input: Input, store: &mut dyn DocumentStore) -> Result<EditorAction> {
        match self.mode {
            Mode::Insert => self.apply_insert(input, store),
            Mode::ConfirmExit => self.apply_confirm_exit(input, store),
            Mode::Find { .. } => Ok(self.apply_find(input)),
        }
    }

    fn apply_insert(
        &mut self,
        input: Input,
        store: &mut dyn DocumentStore,
    ) -> Result<EditorAction> {
        match input {
            Input::PrintableChar(c) => {
                self.push_history();
                self.buffer.insert_char(&mut self.cursor, c);
                self.unsaved = true;
            }
            Input::MoveLeft => self.cursor.x = self.cursor.x.saturating_sub(1),
            Input::MoveRight => {
                self.cursor.x = (self.cursor.x + 1).min(self.buffer.line_len(self.cursor.y));
            }
            Input::MoveUp => self.move_to_line(self.cursor.y.saturating_sub(1)),
            Input::MoveDown => {
                self.move_to_line((self.cursor.y + 1).min(self.buffer.line_count() - 1));
            }
            Input::Home => self.cursor.x = 0,
            Input::End => self.cursor.x = self.buffer.line_len(self.cursor.y),
            Input::PageUp => self.move_to_line(0),
            Input::PageDown => self.move_to_line(self.buffer.line_count() - 1),
            Input::Enter => {
                self.push_history();
                self.buffer.insert_newline(&mut self.cursor);
                self.unsaved = true;
            }
            Input::DeleteForward => {
                let at_buffer_end = self.cursor.y + 1 == self.buffer.line_count()
                    && self.cursor.x == self.buffer.line_len(self.cursor.y);
                if !at_buffer_end {
                    self.push_history();
                    self.buffer.delete_forward(&mut self.cursor);
                    self.unsaved = true;
                }
            }
            Input::DeleteBackward => {
                if self.cursor != Cursor::default() {
                    self.push_history();
                    self.buffer.delete_backward(&mut self.cursor);
                    self.unsaved = true;
                }
            }
            Input::TriggerFind => self.mode = Mode::Find { query: Vec::new() },
            Input::TriggerUndo => self.pop_history(),
            Input::TriggerSave => {
                store.persist(self.buffer.lines())?;
                self.unsaved = false;
            }
            Input::TriggerQuit => {
                if self.unsaved {
                    self.mode = Mode::ConfirmExit;
                } else {
                    return Ok(EditorAction::Exit);
                }
            }
            Input::Escape | Input::ScreenResized => {}
        }
        Ok(EditorAction::Continue)
    }

    fn apply_confirm_exit(
        &mut self,
        input: Input,
        store: &mut dyn DocumentStore,
    ) -> Result<EditorAction> {
        match input {
            Input::PrintableChar('y') => {
                store.persist(self.buffer.lines())?;
                Ok(EditorAction::Exit)
            }
            Input::PrintableChar('n') => Ok(EditorAction::Exit),
            Input::Escape => {
                self.mode = Mode::Insert;
                Ok(EditorAction::Continue)
            }
            _ => Ok(EditorAction::Continue),
        }
    }

    fn apply_find(&mut self, input: Input) -> EditorAction {
        match input {
            Input::PrintableChar(c) => {
                if let Mode::Find { query } = &mut self.mode {
                    query.push(c);
                }
            }
            Input::DeleteBackward => {
                if let Mode::Find { query } = &mut self.mode {
                    query.pop();
                }
            }
            Input::Enter => {
                if let Mode::Find { query } = &self.mode {
                    if !query.is_empty() {
                        let query = query.clone();
                        self.find_next(&query);
                    }
                }
            }
            Input::Escape => self.mode = Mode::Insert,
            _ => {}
        }
        EditorAction::Continue
    }

    /// Move vertically, clamping the column to the target line's length.
    fn move_to_line(&mut self, y: usize) {
        self.cursor.y = y;
        self.cursor.x = self.cursor.x.min(self.buffer.line_len(y));
    }

    // ── Find ─────────────────────────────────────────────────────────

    /// Jump to the next occurrence of `query`.
    ///
    /// Scans the rest of the current line strictly after the cursor,
    /// then every line below, stopping at the first hit. Failing that it
    /// wraps and scans from the top through the starting line; a hit in
    /// the wrap phase does not stop the scan, so the last matching line
    /// up to and including the starting one wins. The cursor is
    /// untouched when nothing matches.
    fn find_next(&mut self, query: &[char]) {
        let Cursor { x, y } = self.cursor;
        if x < self.buffer.line_len(y) {
            if let Some(idx) = find_in(&self.buffer.line(y)[x + 1..], query) {
                self.cursor.x = x + idx + 1;
                return;
            }
        }
        for row in y + 1..self.buffer.line_count() {
            if let Some(idx) = find_in(self.buffer.line(row), query) {
                self.cursor = Cursor { x: idx, y: row };
                return;
            }
        }
        for row in 0..=y {
            if let Some(idx) = find_in(self.buffer.line(row), query) {
                self.cursor = Cursor { x: idx, y: row };
            }
        }
    }

    // ── Undo ─────────────────────────────────────────────────────────

    /// Snapshot the buffer ahead of a mutation.
    fn push_history(&mut self) {
        self.history.push(self.buffer.snapshot());
    }

    /// Restore the most recent snapshot and pull the cursor back into
    /// range. The line clamp runs first so the column clamp indexes a
    /// line that exists.
    fn pop_history(&mut self) {
        if let Some(snapshot) = self.history.pop() {
            self.buffer.restore(&snapshot);
            self.cursor.y = self.cursor.y.min(self.buffer.line_count() - 1);
            self.cursor.x = self.cursor.x.min(self.buffer.line_len(self.cursor.y));
        }
    }
}

/// First occurrence of `needle` in `hay`, as a char index. Literal and
/// case-sensitive.
fn find_in(hay: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    hay.windows(needle.len()).position(|w| w == needle)
}
