//! # Favorites Manager Component
//!
//! Overlay listing saved favorites, newest first. Opened with Ctrl+F,
//! dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FavoritesManagerState` lives in `TuiState` while the overlay is open
//! - `FavoritesManager` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use super::truncate_to_width;
use crate::core::favorites::FavoriteEntry;
use crate::tui::event::TuiEvent;

pub struct FavoritesManagerState {
    pub entries: Vec<FavoriteEntry>,
    pub selected: usize,
    pub confirm_delete: bool,
    pub list_state: ListState,
}

impl FavoritesManagerState {
    pub fn new(entries: Vec<FavoriteEntry>) -> Self {
        let mut list_state = ListState::default();
        if !entries.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            entries,
            selected: 0,
            confirm_delete: false,
            list_state,
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<FavoritesEvent> {
        // Any key other than a second 'd' cancels a pending delete
        let is_delete_key = matches!(event, TuiEvent::InputChar('d'));
        if !is_delete_key {
            self.confirm_delete = false;
        }

        match event {
            TuiEvent::Escape | TuiEvent::OpenFavorites => Some(FavoritesEvent::Dismiss),
            TuiEvent::CursorUp => {
                if !self.entries.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.entries.is_empty() {
                    self.selected = (self.selected + 1).min(self.entries.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => self
                .entries
                .get(self.selected)
                .map(|entry| FavoritesEvent::Open(entry.id.clone())),
            TuiEvent::InputChar('d') => {
                let id = self.entries.get(self.selected)?.id.clone();
                if self.confirm_delete {
                    self.confirm_delete = false;
                    Some(FavoritesEvent::Remove(id))
                } else {
                    self.confirm_delete = true;
                    None
                }
            }
            _ => None,
        }
    }

    /// Drop an entry from the local list after the store removed it.
    pub fn remove_entry(&mut self, id: &str) {
        self.entries.retain(|e| e.id != id);
        if self.entries.is_empty() {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(self.entries.len() - 1);
            self.list_state.select(Some(self.selected));
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesEvent {
    Open(String),
    Remove(String),
    Dismiss,
}

pub struct FavoritesManager<'a> {
    state: &'a mut FavoritesManagerState,
}

impl<'a> FavoritesManager<'a> {
    pub fn new(state: &'a mut FavoritesManagerState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(80, 70, area);
        frame.render_widget(Clear, overlay);

        let help_text = if self.state.confirm_delete {
            " Press d again to remove | Esc Cancel "
        } else {
            " Enter Coupon  d Remove  Esc Back "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Favorites ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.state.entries.is_empty() {
            let empty = Paragraph::new("No favorites yet. Press Ctrl+S on a result.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        // "  Jan 15  <name>" inside borders + padding
        let inner_width = overlay.width.saturating_sub(4) as usize;

        let items: Vec<ListItem> = self
            .state
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let date = format_timestamp(entry.added_at);
                let name_width = inner_width.saturating_sub(date.len() + 2);
                let name = truncate_to_width(&entry.name, name_width);

                let style = if i == self.state.selected {
                    let fg = if self.state.confirm_delete {
                        Color::Red
                    } else {
                        Color::White
                    };
                    Style::default()
                        .fg(fg)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(date, style),
                    Span::styled("  ", style),
                    Span::styled(name, style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Format a Unix timestamp as "Jan 15" in local time.
fn format_timestamp(ts: i64) -> String {
    use chrono::{DateTime, Local, Utc};
    let dt: DateTime<Local> = DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_default()
        .with_timezone(&Local);
    dt.format("%b %d").to_string()
}

fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
