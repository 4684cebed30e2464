use super::EditError;

/// Default maximum number of lines in a buffer.
pub const DEFAULT_MAX_LINES: usize = 100;
/// Default line capacity. A line holds at most `capacity - 1` bytes.
pub const DEFAULT_LINE_CAPACITY: usize = 256;

/// Size caps for a [`TextBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    max_lines: usize,
    line_capacity: usize,
}

impl Limits {
    /// Create limits, rejecting caps that leave no room to edit.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidLimits`] if `max_lines` is zero or
    /// `line_capacity` is below 2.
    pub const fn new(max_lines: usize, line_capacity: usize) -> Result<Self, EditError> {
        if max_lines == 0 {
            return Err(EditError::InvalidLimits("max_lines must be at least 1"));
        }
        if line_capacity < 2 {
            return Err(EditError::InvalidLimits("line_capacity must be at least 2"));
        }
        Ok(Self {
            max_lines,
            line_capacity,
        })
    }

    /// Maximum number of lines the buffer may hold.
    pub const fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Line capacity; a line's length must stay strictly below it.
    pub const fn line_capacity(&self) -> usize {
        self.line_capacity
    }

    /// Longest line the buffer will hold, in bytes.
    pub const fn max_line_len(&self) -> usize {
        self.line_capacity.saturating_sub(1)
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            line_capacity: DEFAULT_LINE_CAPACITY,
        }
    }
}

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self { line: 0, col: 0 }
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Cursor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    /// Start of the current or previous word on this line.
    WordLeft,
    /// Start of the next word on this line (or line end).
    WordRight,
    LineStart,
    LineEnd,
}

/// What happened to the input while loading a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Lines now in the buffer.
    pub lines: usize,
    /// Lines cut down to the maximum line length.
    pub truncated: usize,
    /// Lines that had unsupported characters replaced.
    pub sanitized: usize,
    /// Input lines beyond the line limit that were not loaded.
    pub dropped: usize,
}

impl LoadReport {
    /// Whether the loaded buffer differs from the input text.
    pub const fn is_lossy(&self) -> bool {
        self.truncated > 0 || self.sanitized > 0 || self.dropped > 0
    }
}

/// A bounded sequence of bounded ASCII lines plus a cursor.
///
/// Invariants, held after every operation:
/// - `1 <= line_count() <= limits.max_lines`
/// - every line is printable ASCII and shorter than `limits.line_capacity`
/// - `cursor.line < line_count()` and `cursor.col <= line_len(cursor.line)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor: Cursor,
    limits: Limits,
    dirty: bool,
}

impl TextBuffer {
    /// Create an empty buffer (one empty line) with the given limits.
    pub fn new(limits: Limits) -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Cursor::new(),
            limits,
            dirty: false,
        }
    }

    /// Create a buffer holding `lines`, sanitized and capped to `limits`.
    pub fn from_lines<I, S>(lines: I, limits: Limits) -> (Self, LoadReport)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buf = Self::new(limits);
        let report = buf.load_lines(lines);
        (buf, report)
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The caps this buffer enforces.
    pub const fn limits(&self) -> Limits {
        self.limits
    }

    /// Whether the buffer has been modified since creation, load, or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Number of lines in the document.
    pub const fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Content of a line.
    pub fn line(&self, line_idx: usize) -> Option<&str> {
        self.lines.get(line_idx).map(String::as_str)
    }

    /// All lines in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Length of a line in bytes, 0 for lines that do not exist.
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.lines.get(line_idx).map_or(0, String::len)
    }

    /// Insert text at the cursor and move the cursor past it.
    ///
    /// # Errors
    ///
    /// [`EditError::UnsupportedText`] if `text` holds anything but printable
    /// ASCII, [`EditError::LineFull`] if the line would reach its capacity.
    pub fn insert_text(&mut self, text: &str) -> Result<(), EditError> {
        if text.is_empty() {
            return Ok(());
        }
        if !text.bytes().all(is_printable) {
            return Err(EditError::UnsupportedText);
        }
        let capacity = self.limits.line_capacity;
        let line = &mut self.lines[self.cursor.line];
        if line.len() + text.len() >= capacity {
            return Err(EditError::LineFull { capacity });
        }
        line.insert_str(self.cursor.col, text);
        self.cursor.col += text.len();
        self.dirty = true;
        Ok(())
    }

    /// Insert a single character at the cursor.
    ///
    /// # Errors
    ///
    /// Same as [`TextBuffer::insert_text`].
    pub fn insert_char(&mut self, ch: char) -> Result<(), EditError> {
        self.insert_text(ch.encode_utf8(&mut [0; 4]))
    }

    /// Split the current line at the cursor (Enter).
    ///
    /// # Errors
    ///
    /// [`EditError::TooManyLines`] when the buffer already holds the
    /// maximum number of lines.
    pub fn split_line(&mut self) -> Result<(), EditError> {
        let max_lines = self.limits.max_lines;
        if self.lines.len() >= max_lines {
            return Err(EditError::TooManyLines { max_lines });
        }
        let Cursor { line, col } = self.cursor;
        let rest = self.lines[line].split_off(col);
        self.lines.insert(line + 1, rest);
        self.cursor = Cursor::at(line + 1, 0);
        self.clamp_col();
        self.dirty = true;
        Ok(())
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// At column 0 the current line is joined onto the previous one.
    /// Returns `true` if anything was deleted.
    ///
    /// # Errors
    ///
    /// [`EditError::MergeOverflow`] if the joined line would reach the line
    /// capacity. Nothing is removed in that case.
    pub fn delete_backward(&mut self) -> Result<bool, EditError> {
        let Cursor { line, col } = self.cursor;
        if col > 0 {
            self.lines[line].remove(col - 1);
            self.cursor.col -= 1;
            self.dirty = true;
            return Ok(true);
        }
        if line == 0 {
            return Ok(false);
        }

        let prev_len = self.lines[line - 1].len();
        self.check_merge(prev_len, self.lines[line].len())?;
        let current = self.lines.remove(line);
        self.lines[line - 1].push_str(&current);
        self.cursor = Cursor::at(line - 1, prev_len);
        self.dirty = true;
        Ok(true)
    }

    /// Delete the character at the cursor (Delete).
    ///
    /// At the end of a line the next line is joined onto this one.
    /// Returns `true` if anything was deleted.
    ///
    /// # Errors
    ///
    /// [`EditError::MergeOverflow`] if the joined line would reach the line
    /// capacity.
    pub fn delete_forward(&mut self) -> Result<bool, EditError> {
        let Cursor { line, col } = self.cursor;
        let len = self.lines[line].len();
        if col < len {
            self.lines[line].remove(col);
            self.dirty = true;
            return Ok(true);
        }
        if line + 1 >= self.lines.len() {
            return Ok(false);
        }

        self.check_merge(len, self.lines[line + 1].len())?;
        let next = self.lines.remove(line + 1);
        self.lines[line].push_str(&next);
        self.dirty = true;
        Ok(true)
    }

    /// Move the cursor.
    pub fn move_cursor(&mut self, motion: Motion) {
        match motion {
            Motion::Left => self.move_left(),
            Motion::Right => self.move_right(),
            Motion::Up => self.move_up(),
            Motion::Down => self.move_down(),
            Motion::WordLeft => {
                self.cursor.col = word_start_before(self.current_bytes(), self.cursor.col);
            }
            Motion::WordRight => {
                self.cursor.col = next_word_start(self.current_bytes(), self.cursor.col);
            }
            Motion::LineStart => self.cursor.col = 0,
            Motion::LineEnd => self.cursor.col = self.line_len(self.cursor.line),
        }
    }

    /// Move the cursor to a position, clamped into the document.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.cursor.line = line.min(self.lines.len() - 1);
        self.cursor.col = col;
        self.clamp_col();
    }

    /// Replace the whole document.
    ///
    /// Keeps at most `max_lines` input lines, strips a trailing `\r`,
    /// replaces characters other than printable ASCII (tabs become a
    /// space, everything else `?`), and truncates lines to the maximum
    /// line length. An empty input yields one empty line. The cursor goes
    /// back to the origin and the buffer is clean afterwards.
    pub fn load_lines<I, S>(&mut self, lines: I) -> LoadReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = LoadReport::default();
        let max_len = self.limits.max_line_len();
        let mut kept: Vec<String> = Vec::new();

        for raw in lines {
            if kept.len() == self.limits.max_lines {
                report.dropped += 1;
                continue;
            }
            let (mut line, sanitized) = sanitize_line(raw.as_ref());
            if sanitized {
                report.sanitized += 1;
            }
            if line.len() > max_len {
                line.truncate(max_len);
                report.truncated += 1;
            }
            kept.push(line);
        }
        if kept.is_empty() {
            kept.push(String::new());
        }

        report.lines = kept.len();
        self.lines = kept;
        self.cursor = Cursor::new();
        self.dirty = false;
        report
    }

    /// The document as one string per line.
    pub fn serialize(&self) -> Vec<String> {
        self.lines.clone()
    }

    // --- Private helpers ---

    fn current_bytes(&self) -> &[u8] {
        self.lines[self.cursor.line].as_bytes()
    }

    fn clamp_col(&mut self) {
        let len = self.line_len(self.cursor.line);
        if self.cursor.col > len {
            self.cursor.col = len;
        }
    }

    const fn check_merge(&self, left: usize, right: usize) -> Result<(), EditError> {
        let capacity = self.limits.line_capacity;
        if left + right >= capacity {
            return Err(EditError::MergeOverflow { capacity });
        }
        Ok(())
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.col = self.line_len(self.cursor.line);
        }
    }

    fn move_right(&mut self) {
        if self.cursor.col < self.line_len(self.cursor.line) {
            self.cursor.col += 1;
        } else if self.cursor.line + 1 < self.lines.len() {
            self.cursor.line += 1;
            self.cursor.col = 0;
        }
    }

    fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.clamp_col();
        }
    }

    fn move_down(&mut self) {
        if self.cursor.line + 1 < self.lines.len() {
            self.cursor.line += 1;
            self.clamp_col();
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

const fn is_printable(b: u8) -> bool {
    b == b' ' || b.is_ascii_graphic()
}

/// Strip a trailing `\r` and replace unsupported characters.
///
/// Returns the clean line and whether anything was replaced.
fn sanitize_line(raw: &str) -> (String, bool) {
    let raw = raw.strip_suffix('\r').unwrap_or(raw);
    let mut replaced = false;
    let line = raw
        .chars()
        .map(|c| {
            if c.is_ascii() && is_printable(c as u8) {
                c
            } else {
                replaced = true;
                if c == '\t' { ' ' } else { '?' }
            }
        })
        .collect::<String>();
    (line, replaced)
}

/// Column where the word before `col` starts: skip blanks, then the word.
fn word_start_before(bytes: &[u8], col: usize) -> usize {
    let mut col = col.min(bytes.len());
    while col > 0 && bytes[col - 1] == b' ' {
        col -= 1;
    }
    while col > 0 && bytes[col - 1] != b' ' {
        col -= 1;
    }
    col
}

/// Column where the next word starts: skip the word, then blanks.
fn next_word_start(bytes: &[u8], col: usize) -> usize {
    let len = bytes.len();
    let mut col = col.min(len);
    while col < len && bytes[col] != b' ' {
        col += 1;
    }
    while col < len && bytes[col] == b' ' {
        col += 1;
    }
    col
}
