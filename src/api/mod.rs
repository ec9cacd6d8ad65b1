pub mod client;
pub mod hotpepper;
pub mod types;

pub use client::{NetworkError, RestaurantDirectory, SearchQuery};
pub use hotpepper::HotPepperClient;
pub use types::{CouponUrls, Restaurant};
