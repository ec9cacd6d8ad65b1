//! # Application State
//!
//! Core business state for Gourmet. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── directory: Arc<dyn RestaurantDirectory>  // remote search backend
//! ├── session: SearchSession                   // query, results, paging
//! ├── favorites: FavoritesStore                // persistent favorites
//! └── status_message: String                   // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::api::RestaurantDirectory;
use crate::core::config::ResolvedConfig;
use crate::core::favorites::FavoritesStore;
use crate::core::search::SearchSession;

pub const WELCOME_STATUS: &str = "Type to search restaurants";

pub struct App {
    pub directory: Arc<dyn RestaurantDirectory>,
    pub session: SearchSession,
    pub favorites: FavoritesStore,
    pub status_message: String,
}

impl App {
    pub fn new(
        directory: Arc<dyn RestaurantDirectory>,
        favorites: FavoritesStore,
        fallback_keyword: &str,
    ) -> Self {
        Self {
            directory,
            session: SearchSession::new(fallback_keyword),
            favorites,
            status_message: String::from(WELCOME_STATUS),
        }
    }

    pub fn from_config(
        directory: Arc<dyn RestaurantDirectory>,
        favorites: FavoritesStore,
        config: &ResolvedConfig,
    ) -> Self {
        Self::new(directory, favorites, &config.default_keyword)
    }
}
