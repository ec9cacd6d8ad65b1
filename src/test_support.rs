//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{CouponUrls, NetworkError, Restaurant, RestaurantDirectory, SearchQuery};
use crate::core::favorites::FavoritesStore;
use crate::core::search::DEFAULT_KEYWORD;
use crate::core::state::App;

/// A directory for tests that don't need real API calls.
pub struct NoopDirectory;

#[async_trait]
impl RestaurantDirectory for NoopDirectory {
    fn name(&self) -> &str {
        "noop"
    }

    async fn search(&self, _query: SearchQuery<'_>) -> Result<Vec<Restaurant>, NetworkError> {
        Ok(Vec::new())
    }
}

/// A restaurant fixture with both coupon URLs set.
pub fn restaurant(id: &str) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        name: format!("Shop {id}"),
        logo_image_url: format!("https://img.example/{id}.jpg"),
        coupon_urls: CouponUrls {
            pc: format!("https://pc.example/{id}"),
            mobile: format!("https://sp.example/{id}"),
        },
    }
}

/// `count` restaurants with ids `R{first}..`.
pub fn restaurants(first: usize, count: usize) -> Vec<Restaurant> {
    (first..first + count)
        .map(|i| restaurant(&format!("R{i}")))
        .collect()
}

/// Creates a test App with a NoopDirectory and an in-memory store.
pub fn test_app() -> App {
    App::new(Arc::new(NoopDirectory), FavoritesStore::in_memory(), DEFAULT_KEYWORD)
}
