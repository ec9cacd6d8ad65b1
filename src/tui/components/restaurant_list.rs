//! # RestaurantList Component
//!
//! Scrollable result list. Each row is two lines: favorite star and name,
//! then the coupon URL dimmed. A footer row reports loading, end of
//! results, or no results.
//!
//! `RestaurantList` is created each frame and wraps the persistent
//! `RestaurantListState` plus borrowed props.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::api::Restaurant;
use crate::core::favorites::FavoritesStore;
use crate::core::search::Phase;
use crate::tui::component::Component;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Selection state for the list. Must be persisted in the parent TuiState.
#[derive(Default)]
pub struct RestaurantListState {
    pub list_state: ListState,
}

impl RestaurantListState {
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Moves the selection by `delta` rows within `len` results.
    pub fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let next = match self.list_state.selected() {
            Some(current) => current.saturating_add_signed(delta).min(len - 1),
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    /// True when the selection sits on the last result.
    pub fn is_at_end(&self, len: usize) -> bool {
        len > 0 && self.list_state.selected() == Some(len - 1)
    }

    /// Keeps the selection valid after the results changed underneath it.
    pub fn clamp(&mut self, len: usize) {
        match self.list_state.selected() {
            Some(_) if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    pub fn reset(&mut self) {
        self.list_state = ListState::default();
    }
}

pub struct RestaurantList<'a> {
    pub state: &'a mut RestaurantListState,
    pub results: &'a [Restaurant],
    pub favorites: &'a FavoritesStore,
    pub phase: Phase,
    pub spinner_frame: usize,
}

impl<'a> RestaurantList<'a> {
    pub fn new(
        state: &'a mut RestaurantListState,
        results: &'a [Restaurant],
        favorites: &'a FavoritesStore,
        phase: Phase,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            results,
            favorites,
            phase,
            spinner_frame,
        }
    }

    fn row(&self, restaurant: &'a Restaurant) -> ListItem<'a> {
        let (star, star_style) = if self.favorites.is_favorite(&restaurant.id) {
            ("★", Style::default().fg(Color::Yellow))
        } else {
            ("☆", Style::default().fg(Color::DarkGray))
        };
        let coupon = restaurant.coupon_url();
        let coupon_line = if coupon.is_empty() {
            "no coupon page"
        } else {
            coupon
        };
        ListItem::new(vec![
            Line::from(vec![
                Span::styled(star, star_style),
                Span::raw(" "),
                Span::styled(
                    restaurant.name.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                format!("  {coupon_line}"),
                Style::default().fg(Color::DarkGray),
            )),
        ])
    }

    fn footer(&self) -> Option<ListItem<'a>> {
        let text = match self.phase {
            Phase::Loading => format!(
                "{} Loading...",
                SPINNER[self.spinner_frame % SPINNER.len()]
            ),
            Phase::Exhausted if self.results.is_empty() => "No results".to_string(),
            Phase::Exhausted => "End of results".to_string(),
            Phase::Idle => return None,
        };
        Some(ListItem::new(Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))))
    }
}

impl<'a> Component for RestaurantList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.clamp(self.results.len());

        let mut items: Vec<ListItem> = self.results.iter().map(|r| self.row(r)).collect();
        if let Some(footer) = self.footer() {
            items.push(footer);
        }

        let list = List::new(items)
            .block(Block::default().borders(Borders::TOP | Borders::BOTTOM))
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▌");

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
