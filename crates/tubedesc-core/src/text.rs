//! Cursor-aware text buffer backing every editable field.
//!
//! The cursor is a byte offset that always sits on a char boundary.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
    multiline: bool,
}

impl TextBuffer {
    pub fn single_line() -> Self {
        Self::default()
    }

    pub fn multi_line() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    /// Replace the content and park the cursor at the end.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let mut text = text.into();
        if !self.multiline {
            text = first_line(&text).to_string();
        }
        self.cursor = text.len();
        self.text = text;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn cursor(&self) -> usize {
        self.cursor.min(self.text.len())
    }

    fn clamp_cursor(&mut self) {
        if self.cursor > self.text.len() {
            self.cursor = self.text.len();
        }
    }

    /// Insert a character at the cursor. Newlines are dropped in single-line buffers.
    pub fn insert_char(&mut self, c: char) {
        if c == '\n' && !self.multiline {
            return;
        }
        self.clamp_cursor();
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert pasted text. Single-line buffers keep only the first line.
    pub fn insert_str(&mut self, s: &str) {
        let s = if self.multiline { s } else { first_line(s) };
        self.clamp_cursor();
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    pub fn newline(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        self.clamp_cursor();
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete the word before the cursor (Ctrl+W).
    pub fn delete_word(&mut self) {
        self.clamp_cursor();
        if self.cursor == 0 {
            return;
        }
        let bytes = self.text.as_bytes();
        let mut end = self.cursor;
        while end > 0 && bytes[end - 1].is_ascii_whitespace() {
            end -= 1;
        }
        let mut start = end;
        while start > 0 && !bytes[start - 1].is_ascii_whitespace() {
            start -= 1;
        }
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        self.clamp_cursor();
        if let Some((i, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.cursor = i;
        }
    }

    pub fn move_right(&mut self) {
        self.clamp_cursor();
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Line number and column (in bytes) of the cursor.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let cursor = self.cursor();
        let before = &self.text[..cursor];
        let line = before.matches('\n').count();
        let col = before.rfind('\n').map(|p| cursor - p - 1).unwrap_or(cursor);
        (line, col)
    }

    /// Move up one line. Returns false when already on the first line.
    pub fn move_up(&mut self) -> bool {
        let (line, col) = self.cursor_line_col();
        if line == 0 {
            return false;
        }
        let lines: Vec<&str> = self.text.split('\n').collect();
        let start: usize = lines[..line - 1].iter().map(|l| l.len() + 1).sum();
        self.cursor = start + floor_boundary(lines[line - 1], col);
        true
    }

    /// Move down one line. Returns false when already on the last line.
    pub fn move_down(&mut self) -> bool {
        let (line, col) = self.cursor_line_col();
        let lines: Vec<&str> = self.text.split('\n').collect();
        if line + 1 >= lines.len() {
            return false;
        }
        let start: usize = lines[..line + 1].iter().map(|l| l.len() + 1).sum();
        self.cursor = start + floor_boundary(lines[line + 1], col);
        true
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}

/// Largest char boundary in `line` that is `<= col`.
fn floor_boundary(line: &str, col: usize) -> usize {
    let mut col = col.min(line.len());
    while !line.is_char_boundary(col) {
        col -= 1;
    }
    col
}
