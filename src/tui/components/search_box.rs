//! # SearchBox Component
//!
//! Single-line keyword input at the bottom of the screen.
//!
//! The buffer and cursor are internal state. Every edit emits
//! `SearchBoxEvent::Changed`, and the parent turns that into a fresh search.
//! When the text is wider than the box, the view scrolls horizontally to
//! keep the cursor visible.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchBoxEvent {
    Changed(String),
}

pub struct SearchBox {
    pub buffer: String,
    /// Byte offset of the cursor in `buffer` (always on a char boundary).
    cursor: usize,
    /// Prop: keyword searched when the buffer is empty, shown as a placeholder.
    pub placeholder: String,
}

impl SearchBox {
    pub fn new(initial: &str, placeholder: &str) -> Self {
        Self {
            buffer: initial.to_string(),
            cursor: initial.len(),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }

    fn changed(&self) -> Option<SearchBoxEvent> {
        Some(SearchBoxEvent::Changed(self.buffer.clone()))
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Search");

        let inner_width = area.width.saturating_sub(2);
        let cursor_col = self.buffer[..self.cursor].width() as u16;
        // Keep one column free for the cursor at the end of the text
        let scroll_x = cursor_col.saturating_sub(inner_width.saturating_sub(1));

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(format!("{} (default)", self.placeholder)).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Paragraph::new(self.buffer.as_str())
                .style(Style::default().fg(Color::Green))
                .scroll((0, scroll_x))
        };

        frame.render_widget(paragraph.block(block), area);
        frame.set_cursor_position((area.x + 1 + cursor_col - scroll_x, area.y + 1));
    }
}

impl EventHandler for SearchBox {
    type Event = SearchBoxEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                // Single-line box: newlines become spaces
                let text = text.replace(['\r', '\n'], " ");
                if text.is_empty() {
                    return None;
                }
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                self.changed()
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.changed()
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = self.next_boundary();
                self.buffer.drain(self.cursor..next);
                self.changed()
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.prev_boundary();
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = self.next_boundary();
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            _ => None,
        }
    }
}
