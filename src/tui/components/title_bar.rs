//! # TitleBar Component
//!
//! One-line status bar at the top of the screen.
//!
//! Purely presentational: every field is a prop copied out of `App` before
//! the frame is drawn.
//!
//! ```text
//! Gourmet "ramen" | 43 shops | ★ 2 | Searching "ramen"...
//! ```

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Effective keyword of the current session
    pub keyword: String,
    /// Number of restaurants loaded so far
    pub result_count: usize,
    pub favorite_count: usize,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(
        keyword: String,
        result_count: usize,
        favorite_count: usize,
        status_message: String,
    ) -> Self {
        Self {
            keyword,
            result_count,
            favorite_count,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let shops = if self.result_count == 1 {
            "1 shop".to_string()
        } else {
            format!("{} shops", self.result_count)
        };

        let mut spans = vec![
            Span::styled("Gourmet", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" \"{}\" | {shops} | ", self.keyword)),
            Span::styled(
                format!("★ {}", self.favorite_count),
                Style::default().fg(Color::Yellow),
            ),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
