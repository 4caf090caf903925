/// An edit position: `x` is the column, `y` the line, both 0-indexed.
///
/// `x` may equal the line length, the insertion point after the last
/// character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
}

/// A multi-line text buffer addressed by a 2D cursor.
///
/// Lines are stored as `Vec<Vec<char>>`, one entry per line without the
/// trailing newline. Columns count code points, so cursor, find, and
/// viewport arithmetic all work in screen cells rather than byte offsets.
/// The buffer is never empty: an empty document is a single empty line.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<Vec<char>>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
        }
    }

    /// Build a buffer from raw lines, normalizing empty input to a single
    /// empty line.
    pub fn from_lines(lines: Vec<Vec<char>>) -> Self {
        if lines.is_empty() {
            Self::new()
        } else {
            Self { lines }
        }
    }

    /// Build a buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines().map(|line| line.chars().collect()).collect())
    }

    /// The full text joined with newlines.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(line.iter());
        }
        out
    }

    pub fn lines(&self) -> &[Vec<char>] {
        &self.lines
    }

    pub fn line(&self, y: usize) -> &[char] {
        &self.lines[y]
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line_len(&self, y: usize) -> usize {
        self.lines[y].len()
    }

    // ── Mutation primitives ──────────────────────────────────────────

    /// Insert `c` at the cursor and advance it one column.
    pub fn insert_char(&mut self, at: &mut Cursor, c: char) {
        self.lines[at.y].insert(at.x, c);
        at.x += 1;
    }

    /// Split the line at the cursor; the tail becomes a new line below
    /// and the cursor moves to its start.
    pub fn insert_newline(&mut self, at: &mut Cursor) {
        let tail = self.lines[at.y].split_off(at.x);
        self.lines.insert(at.y + 1, tail);
        at.y += 1;
        at.x = 0;
    }

    /// Delete the character under the cursor. At end of line the next
    /// line is merged up; at the very end of the buffer this is a no-op.
    pub fn delete_forward(&mut self, at: &mut Cursor) {
        if at.x == self.lines[at.y].len() {
            if at.y + 1 < self.lines.len() {
                let next = self.lines.remove(at.y + 1);
                self.lines[at.y].extend(next);
            }
        } else {
            self.lines[at.y].remove(at.x);
            at.x = at.x.min(self.lines[at.y].len());
        }
    }

    /// Delete the character before the cursor. At column 0 the line is
    /// merged onto the previous one; at (0,0) this is a no-op.
    pub fn delete_backward(&mut self, at: &mut Cursor) {
        if at.x == 0 {
            if at.y > 0 {
                let line = self.lines.remove(at.y);
                at.y -= 1;
                at.x = self.lines[at.y].len();
                self.lines[at.y].extend(line);
            }
        } else {
            at.x -= 1;
            self.lines[at.y].remove(at.x);
        }
    }

    // ── Snapshots ────────────────────────────────────────────────────

    /// Deep copy of the lines for the undo stack. Later edits to the
    /// live buffer never reach a taken snapshot.
    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            lines: self.lines.clone(),
        }
    }

    /// Replace the whole buffer with a snapshot's lines.
    pub fn restore(&mut self, snapshot: &BufferSnapshot) {
        self.lines = snapshot.lines.clone();
    }
}

/// The buffer's lines as they were before a mutation.
#[derive(Debug, Clone)]
pub struct BufferSnapshot {
    pub lines: Vec<Vec<char>>,
}
