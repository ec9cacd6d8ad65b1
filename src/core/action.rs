//! # Actions
//!
//! Everything that can happen in Gourmet becomes an `Action`.
//! User edits the search text? That's `Action::Search(text)`.
//! A page arrives? That's `Action::PageLoaded { generation, outcome }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the I/O the adapter must
//! perform. No network or process I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Favorites writes are the one exception: the store is synchronous, so a
//! toggle commits before `update()` returns.

use log::{info, warn};

use crate::api::{NetworkError, Restaurant};
use crate::core::search::{Completion, PageRequest};
use crate::core::state::App;

pub const FAILED_STATUS: &str = "Failed to fetch restaurants";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Search text changed (or was submitted).
    Search(String),
    /// Pull-to-refresh: reload page one of the current query.
    Refresh,
    /// Selection reached the end of the list.
    LoadMore,
    PageLoaded {
        generation: u64,
        outcome: Result<Vec<Restaurant>, NetworkError>,
    },
    /// Toggle the result at this index.
    ToggleFavorite(usize),
    RemoveFavorite(String),
    /// Open the coupon page of the result at this index.
    OpenCoupon(usize),
    OpenFavoriteCoupon(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Fetch(PageRequest),
    OpenUrl(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Search(text) => {
            let request = app.session.start_search(&text);
            app.status_message = format!("Searching \"{}\"...", request.keyword);
            Effect::Fetch(request)
        }
        Action::Refresh => match app.session.load_page(true) {
            Some(request) => {
                app.status_message = format!("Refreshing \"{}\"...", request.keyword);
                Effect::Fetch(request)
            }
            None => Effect::None,
        },
        Action::LoadMore => match app.session.load_page(false) {
            Some(request) => Effect::Fetch(request),
            None => Effect::None,
        },
        Action::PageLoaded {
            generation,
            outcome,
        } => {
            match app.session.complete(generation, outcome) {
                Completion::Applied { .. } => app.status_message.clear(),
                Completion::Failed(err) => {
                    warn!("Search failed: {}", err);
                    app.status_message = FAILED_STATUS.to_string();
                }
                Completion::Stale => {}
            }
            Effect::None
        }
        Action::ToggleFavorite(index) => {
            let Some(restaurant) = app.session.results().get(index).cloned() else {
                return Effect::None;
            };
            match app.favorites.toggle(&restaurant) {
                Ok(true) => {
                    info!("Added \"{}\" ({}) to favorites", restaurant.name, restaurant.id);
                    app.status_message = format!("Added \"{}\" to favorites", restaurant.name);
                }
                Ok(false) => {
                    info!("Removed \"{}\" ({}) from favorites", restaurant.name, restaurant.id);
                    app.status_message = format!("Removed \"{}\" from favorites", restaurant.name);
                }
                Err(e) => {
                    warn!("Failed to toggle favorite {}: {}", restaurant.id, e);
                    app.status_message = format!("Favorites update failed: {e}");
                }
            }
            Effect::None
        }
        Action::RemoveFavorite(id) => {
            match app.favorites.remove(&id) {
                Ok(entry) => {
                    info!("Removed \"{}\" ({}) from favorites", entry.name, entry.id);
                    app.status_message = format!("Removed \"{}\" from favorites", entry.name);
                }
                Err(e) => {
                    warn!("Failed to remove favorite {}: {}", id, e);
                    app.status_message = format!("Favorites update failed: {e}");
                }
            }
            Effect::None
        }
        Action::OpenCoupon(index) => app
            .session
            .results()
            .get(index)
            .map(|r| r.coupon_url())
            .filter(|url| !url.is_empty())
            .map_or(Effect::None, |url| Effect::OpenUrl(url.to_string())),
        Action::OpenFavoriteCoupon(id) => app
            .favorites
            .get(&id)
            .map(|entry| entry.coupon_url.as_str())
            .filter(|url| !url.is_empty())
            .map_or(Effect::None, |url| Effect::OpenUrl(url.to_string())),
        Action::Quit => Effect::Quit,
    }
}
