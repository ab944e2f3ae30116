//! Pure text helpers for the Editor: character/word boundaries and row layout.
//!
//! These are stateless and operate on byte offsets that always sit on char boundaries.

use std::ops::Range;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Find the byte offset of the previous word boundary before `pos` in `text`.
///
/// Skips non-word characters first, then word characters (readline `backward-word`).
pub(super) fn prev_word_boundary(text: &str, pos: usize) -> usize {
    let mut chars = text[..pos].char_indices().rev().peekable();

    while chars.peek().is_some_and(|&(_, c)| !is_word_char(c)) {
        chars.next();
    }

    let mut boundary = 0;
    while let Some(&(i, c)) = chars.peek() {
        if !is_word_char(c) {
            boundary = i + c.len_utf8();
            break;
        }
        boundary = i;
        chars.next();
    }

    boundary
}

/// Flattens line breaks to spaces and drops other control characters.
pub(super) fn sanitize(text: &str) -> String {
    text.replace("\r\n", " ")
        .chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Split `text` into rows no wider than `width` display columns.
/// Always returns at least one (possibly empty) row.
pub(super) fn layout_rows(text: &str, width: usize) -> Vec<Range<usize>> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut start = 0;
    let mut row_width = 0;

    for (i, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if row_width + w > width && row_width > 0 {
            rows.push(start..i);
            start = i;
            row_width = 0;
        }
        row_width += w;
    }
    rows.push(start..text.len());
    rows
}

/// Row and column (display cells) of the cursor at byte offset `cursor`.
pub(super) fn cursor_cell(text: &str, cursor: usize, width: usize) -> (usize, usize) {
    let width = width.max(1);
    let rows = layout_rows(text, width);
    let last = rows.len() - 1;

    for (idx, row) in rows.iter().enumerate() {
        if cursor < row.end || idx == last {
            let col = text[row.start..cursor].width();
            // A cursor after a full last row sits at the start of the next one
            if col >= width {
                return (idx + 1, 0);
            }
            return (idx, col);
        }
    }
    (last, 0)
}
