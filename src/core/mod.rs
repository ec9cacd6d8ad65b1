//! # Core Application Logic
//!
//! This module contains Gourmet's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                    ┌───────────┴─────────────┐
//!                    ▼                         ▼
//!             ┌────────────┐           ┌──────────────┐
//!             │    TUI     │           │  Directory   │
//!             │  Adapter   │           │  client      │
//!             │ (ratatui)  │           │  (reqwest)   │
//!             └────────────┘           └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`search`]: Query, result merging and pagination
//! - [`favorites`]: Persistent favorites set
//! - [`config`]: Config file and override resolution

pub mod action;
pub mod config;
pub mod favorites;
pub mod search;
pub mod state;
