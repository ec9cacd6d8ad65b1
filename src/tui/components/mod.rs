//! # TUI Components
//!
//! ## Stateless Components
//!
//! - `TitleBar`: keyword, result count, favorite count, status
//!
//! ## Stateful Components
//!
//! - `SearchBox`: keyword input, emits `SearchBoxEvent::Changed`
//! - `RestaurantList`: result rows over a persistent `RestaurantListState`
//! - `FavoritesManager`: favorites overlay over `FavoritesManagerState`
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── search_box.rs
//! ├── restaurant_list.rs
//! └── favorites_manager.rs
//! ```

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

mod title_bar;
pub use title_bar::TitleBar;

pub mod favorites_manager;
pub mod restaurant_list;
pub mod search_box;
pub use favorites_manager::{FavoritesEvent, FavoritesManager, FavoritesManagerState};
pub use restaurant_list::{RestaurantList, RestaurantListState};
pub use search_box::{SearchBox, SearchBoxEvent};

/// Truncate `s` to at most `max_width` terminal columns, ending in "..." when cut.
///
/// Shop names are mostly full-width Japanese, so this counts display
/// columns rather than bytes.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let budget = max_width - 3;
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::truncate_to_width;

    #[test]
    fn test_truncate_short_string_untouched() {
        assert_eq!(truncate_to_width("Shop", 10), "Shop");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
    }

    #[test]
    fn test_truncate_full_width() {
        // Each kanji is two columns wide
        assert_eq!(truncate_to_width("焼肉食べ放題", 8), "焼肉...");
    }

    #[test]
    fn test_truncate_tiny_width() {
        assert_eq!(truncate_to_width("Hello", 2), "..");
    }
}
