//! Text utilities for pane rendering.
//!
//! Tabs are expanded to a fixed number of spaces rather than tab stops, so a
//! cursor column maps to a display column without knowing its neighbours.

use std::borrow::Cow;

use unicode_width::UnicodeWidthChar;

/// Display columns a tab occupies.
pub const TAB_WIDTH: usize = 4;

fn char_width(ch: char) -> usize {
    if ch == '\t' {
        TAB_WIDTH
    } else {
        ch.width().unwrap_or(0)
    }
}

/// Replaces tabs with spaces.
pub fn expand_tabs(line: &str) -> Cow<'_, str> {
    if line.contains('\t') {
        Cow::Owned(line.replace('\t', &" ".repeat(TAB_WIDTH)))
    } else {
        Cow::Borrowed(line)
    }
}

/// Display width of the first `col` characters of `line`.
pub fn display_width_until(line: &str, col: usize) -> usize {
    line.chars().take(col).map(char_width).sum()
}

/// Splits `line` into rows of at most `width` display columns.
///
/// Always returns at least one row. A character wider than `width` gets a
/// row of its own.
pub fn wrap_to_width(line: &str, width: usize) -> Vec<String> {
    let expanded = expand_tabs(line);
    if width == 0 {
        return vec![expanded.into_owned()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    for ch in expanded.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(ch);
        used += w;
    }
    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}
