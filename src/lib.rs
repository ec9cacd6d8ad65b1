//! Gourmet library exports for testing

pub mod api;
pub mod core;
pub mod tui;
pub mod viewer;

#[cfg(test)]
pub mod test_support;
