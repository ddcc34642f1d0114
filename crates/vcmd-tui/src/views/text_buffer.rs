//! Line-oriented text buffer backing every pane.
//!
//! List panes use it as a read-only line store with a row cursor; editable
//! panes also route keystrokes through [`TextBuffer::input`].

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Cursor movement commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Up,
    Down,
    Forward,
    Back,
    Head,
    End,
    Top,
    Bottom,
}

/// Text stored as lines with a (row, col) cursor in char units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_row: 0,
            cursor_col: 0,
        }
    }
}

impl TextBuffer {
    /// Builds a buffer holding `text`, cursor at the origin.
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::default();
        buffer.set_text(text);
        buffer
    }

    /// Replaces the contents and resets the cursor.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(ToString::to_string).collect();
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.ensure_line();
    }

    /// Replaces the contents with one line per item.
    pub fn set_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.ensure_line();
    }

    /// Returns the whole buffer joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns line `row`, if present.
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    /// Returns the current cursor position as (row, col).
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    /// Moves the cursor, clamped to existing text.
    pub fn set_cursor(&mut self, row: usize, col: usize) {
        self.cursor_row = row;
        self.cursor_col = col;
        self.ensure_line();
    }

    /// Inserts a string at the cursor, advancing the cursor.
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        self.ensure_line();
        let row = self.cursor_row;

        if !text.contains('\n') {
            let line = &mut self.lines[row];
            let byte_idx = char_to_byte_index(line, self.cursor_col);
            line.insert_str(byte_idx, text);
            self.cursor_col += text.chars().count();
            return;
        }

        let current_line = self.lines[row].clone();
        let byte_idx = char_to_byte_index(&current_line, self.cursor_col);
        let (prefix, suffix) = current_line.split_at(byte_idx);

        let parts: Vec<&str> = text.split('\n').collect();
        let last = parts.len() - 1;

        let mut new_lines: Vec<String> = Vec::with_capacity(parts.len());
        new_lines.push(format!("{prefix}{}", parts[0]));
        for part in &parts[1..last] {
            new_lines.push((*part).to_string());
        }
        new_lines.push(format!("{}{suffix}", parts[last]));

        self.lines.splice(row..=row, new_lines);
        self.cursor_row = row + last;
        self.cursor_col = parts[last].chars().count();
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    pub fn insert_newline(&mut self) {
        self.insert_str("\n");
    }

    /// Deletes the character at the cursor (Delete key semantics).
    pub fn delete_next_char(&mut self) {
        self.ensure_line();

        let row = self.cursor_row;
        let col = self.cursor_col;
        let line_len = line_char_len(&self.lines[row]);

        if col >= line_len {
            if row + 1 < self.lines.len() {
                let next = self.lines.remove(row + 1);
                self.lines[row].push_str(&next);
            }
            return;
        }

        let line = &mut self.lines[row];
        let start = char_to_byte_index(line, col);
        let end = char_to_byte_index(line, col + 1);
        line.replace_range(start..end, "");
    }

    /// Deletes the character before the cursor (Backspace semantics).
    pub fn delete_prev_char(&mut self) {
        self.ensure_line();

        if self.cursor_col > 0 {
            let row = self.cursor_row;
            let col = self.cursor_col - 1;
            let line = &mut self.lines[row];
            let start = char_to_byte_index(line, col);
            let end = char_to_byte_index(line, col + 1);
            line.replace_range(start..end, "");
            self.cursor_col = col;
            return;
        }

        if self.cursor_row == 0 {
            return;
        }

        let row = self.cursor_row;
        let prev_len = line_char_len(&self.lines[row - 1]);
        let current = self.lines.remove(row);
        self.lines[row - 1].push_str(&current);
        self.cursor_row -= 1;
        self.cursor_col = prev_len;
    }

    /// Moves the cursor according to a movement command.
    pub fn move_cursor(&mut self, movement: CursorMove) {
        self.ensure_line();
        match movement {
            CursorMove::Up => {
                if self.cursor_row > 0 {
                    self.cursor_row -= 1;
                    self.clamp_col();
                }
            }
            CursorMove::Down => {
                if self.cursor_row + 1 < self.lines.len() {
                    self.cursor_row += 1;
                    self.clamp_col();
                }
            }
            CursorMove::Forward => {
                let len = line_char_len(&self.lines[self.cursor_row]);
                if self.cursor_col < len {
                    self.cursor_col += 1;
                } else if self.cursor_row + 1 < self.lines.len() {
                    self.cursor_row += 1;
                    self.cursor_col = 0;
                }
            }
            CursorMove::Back => {
                if self.cursor_col > 0 {
                    self.cursor_col -= 1;
                } else if self.cursor_row > 0 {
                    self.cursor_row -= 1;
                    self.cursor_col = line_char_len(&self.lines[self.cursor_row]);
                }
            }
            CursorMove::Head => self.cursor_col = 0,
            CursorMove::End => self.cursor_col = line_char_len(&self.lines[self.cursor_row]),
            CursorMove::Top => {
                self.cursor_row = 0;
                self.clamp_col();
            }
            CursorMove::Bottom => {
                self.cursor_row = self.lines.len() - 1;
                self.clamp_col();
            }
        }
    }

    /// Applies a key as a plain-text edit.
    pub fn input(&mut self, key: KeyEvent) {
        if matches!(key.kind, KeyEventKind::Release) {
            return;
        }

        match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(ch);
            }
            KeyCode::Tab => self.insert_char('\t'),
            KeyCode::Enter => self.insert_newline(),
            KeyCode::Backspace => self.delete_prev_char(),
            KeyCode::Delete => self.delete_next_char(),
            KeyCode::Left => self.move_cursor(CursorMove::Back),
            KeyCode::Right => self.move_cursor(CursorMove::Forward),
            KeyCode::Up => self.move_cursor(CursorMove::Up),
            KeyCode::Down => self.move_cursor(CursorMove::Down),
            KeyCode::Home => self.move_cursor(CursorMove::Head),
            KeyCode::End => self.move_cursor(CursorMove::End),
            _ => {}
        }
    }

    /// Number of chars on the cursor's line.
    pub fn current_line_len(&self) -> usize {
        self.lines.get(self.cursor_row).map_or(0, |l| line_char_len(l))
    }

    fn clamp_col(&mut self) {
        let len = line_char_len(&self.lines[self.cursor_row]);
        self.cursor_col = self.cursor_col.min(len);
    }

    fn ensure_line(&mut self) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
            self.cursor_row = 0;
            self.cursor_col = 0;
            return;
        }

        if self.cursor_row >= self.lines.len() {
            self.cursor_row = self.lines.len() - 1;
        }
        self.clamp_col();
    }
}

fn line_char_len(line: &str) -> usize {
    line.chars().count()
}

fn char_to_byte_index(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map_or(line.len(), |(i, _)| i)
}
