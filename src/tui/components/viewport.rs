//! # Viewport Component
//!
//! Scrollable window over pre-wrapped, styled lines.
//!
//! The viewport never wraps: callers hand it lines already wrapped to
//! `width`, so the line count is the content height and scroll math is exact.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub struct Viewport {
    pub width: u16,
    pub height: u16,
    y_offset: usize,
    lines: Vec<Line<'static>>,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            y_offset: 0,
            lines: Vec::new(),
        }
    }

    /// Replaces the content, keeping the offset within bounds.
    pub fn set_content(&mut self, lines: Vec<Line<'static>>) {
        self.lines = lines;
        self.y_offset = self.y_offset.min(self.max_offset());
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    pub fn y_offset(&self) -> usize {
        self.y_offset
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.height as usize)
    }

    pub fn at_bottom(&self) -> bool {
        self.y_offset >= self.max_offset()
    }

    pub fn goto_bottom(&mut self) {
        self.y_offset = self.max_offset();
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.y_offset = self.y_offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.y_offset = (self.y_offset + n).min(self.max_offset());
    }

    /// The lines currently inside the window.
    pub fn visible_lines(&self) -> &[Line<'static>] {
        let end = (self.y_offset + self.height as usize).min(self.lines.len());
        &self.lines[self.y_offset.min(end)..end]
    }

    /// Content as plain text, one string per line.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.to_string()).collect()
    }
}

impl Component for Viewport {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.visible_lines().to_vec()), area);
    }
}

impl EventHandler for Viewport {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let page = (self.height as usize).max(1);
        match event {
            TuiEvent::ScrollUp => self.scroll_up(1),
            TuiEvent::ScrollDown => self.scroll_down(1),
            TuiEvent::ScrollPageUp => self.scroll_up(page),
            TuiEvent::ScrollPageDown => self.scroll_down(page),
            _ => return None,
        }
        Some(())
    }
}
