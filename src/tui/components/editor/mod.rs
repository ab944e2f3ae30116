//! # Editor Component
//!
//! The bounded prompt editor at the bottom of the screen.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing and bracketed paste), capped at 280 characters
//! - Handle editing (backspace, delete, cursor movement, line kills)
//! - Handle submission (Enter)
//! - Render a `┃ ` prompt on every row and a placeholder while empty
//!
//! Newline insertion is disabled: pasted line breaks become spaces. Long
//! prompts hard-wrap across the editor's three rows and scroll to keep the
//! cursor visible.

mod text;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use text::{
    cursor_cell, layout_rows, next_char_boundary, prev_char_boundary, prev_word_boundary,
    sanitize,
};

pub const CHAR_LIMIT: usize = 280;
pub const EDITOR_HEIGHT: u16 = 3;
pub const PROMPT: &str = "┃ ";
pub const PLACEHOLDER: &str = "Send a message...";

/// High-level events emitted by the Editor
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// User submitted the text (Enter pressed). The buffer is already cleared.
    Submit(String),
    ContentChanged,
    /// Input was refused because the character limit is reached.
    LimitReached,
}

pub struct Editor {
    buffer: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    width: u16,
    /// First visible row when the content is taller than the editor
    scroll_offset: u16,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            width: 30,
            scroll_offset: 0,
        }
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        EDITOR_HEIGHT
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = width;
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Width available for text after the prompt glyph.
    fn text_width(&self) -> usize {
        (self.width as usize).saturating_sub(PROMPT.width()).max(1)
    }

    /// Inserts as much of `text` as the character limit allows.
    fn insert(&mut self, text: &str) -> Option<EditorEvent> {
        let remaining = CHAR_LIMIT.saturating_sub(self.char_count());
        let accepted: String = text.chars().take(remaining).collect();
        if accepted.is_empty() {
            return (!text.is_empty()).then_some(EditorEvent::LimitReached);
        }
        self.buffer.insert_str(self.cursor, &accepted);
        self.cursor += accepted.len();
        Some(EditorEvent::ContentChanged)
    }

    /// Keeps the cursor row inside the visible window.
    fn update_scroll_offset(&mut self) {
        let (row, _) = cursor_cell(&self.buffer, self.cursor, self.text_width());
        let row = row as u16;
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + EDITOR_HEIGHT {
            self.scroll_offset = row + 1 - EDITOR_HEIGHT;
        }
    }

    fn visible_lines(&self) -> Vec<Line<'static>> {
        let prompt_style = Style::default().fg(Color::White);
        let mut lines = Vec::with_capacity(EDITOR_HEIGHT as usize);

        if self.buffer.is_empty() {
            lines.push(Line::from(vec![
                Span::styled(PROMPT, prompt_style),
                Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
            ]));
        } else {
            let rows = layout_rows(&self.buffer, self.text_width());
            for row in rows
                .iter()
                .skip(self.scroll_offset as usize)
                .take(EDITOR_HEIGHT as usize)
            {
                lines.push(Line::from(vec![
                    Span::styled(PROMPT, prompt_style),
                    Span::raw(self.buffer[row.clone()].to_string()),
                ]));
            }
        }

        while lines.len() < EDITOR_HEIGHT as usize {
            lines.push(Line::from(Span::styled(PROMPT, prompt_style)));
        }
        lines
    }
}

impl Component for Editor {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.width = area.width;
        self.update_scroll_offset();

        frame.render_widget(Paragraph::new(self.visible_lines()), area);

        let (row, col) = cursor_cell(&self.buffer, self.cursor, self.text_width());
        let cursor_x = area.x + PROMPT.width() as u16 + col as u16;
        let cursor_y = area.y + (row as u16).saturating_sub(self.scroll_offset);
        if cursor_x < area.right() && cursor_y < area.bottom() {
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

impl EventHandler for Editor {
    type Event = EditorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => self.insert(&sanitize(&c.to_string())),
            TuiEvent::Paste(text) => self.insert(&sanitize(text)),
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                EditorEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                EditorEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                EditorEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                EditorEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                EditorEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                EditorEvent::ContentChanged
            }),
            TuiEvent::DeleteToStart => (self.cursor > 0).then(|| {
                self.buffer.drain(..self.cursor);
                self.cursor = 0;
                EditorEvent::ContentChanged
            }),
            TuiEvent::DeleteToEnd => (self.cursor < self.buffer.len()).then(|| {
                self.buffer.truncate(self.cursor);
                EditorEvent::ContentChanged
            }),
            TuiEvent::DeleteWordBack => (self.cursor > 0).then(|| {
                let start = prev_word_boundary(&self.buffer, self.cursor);
                self.buffer.drain(start..self.cursor);
                self.cursor = start;
                EditorEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.reset();
                Some(EditorEvent::Submit(text))
            }
            _ => None,
        }
    }
}
