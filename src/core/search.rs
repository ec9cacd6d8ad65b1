//! # Search Session
//!
//! Tracks one ongoing search: the query, the accumulated results, and the
//! pagination state. Decides what to fetch next and merges what comes back.
//!
//! ```text
//!            start_search / load_page(true)
//!   Idle ──────────────────────────────────┐
//!    ▲  ▲          load_page(false)        ▼
//!    │  └──────────── (N ≥ 1) ◄──────── Loading
//!    │                                     │ N == 0 or failure
//!    └── start_search ◄──────────── Exhausted
//! ```
//!
//! Every request carries a generation number. Only the response whose
//! generation matches the pending request is applied; anything older is a
//! stale response and is dropped on arrival.

use log::{debug, info};

use crate::api::{NetworkError, Restaurant};

/// Fixed page size sent as `count` on every request.
pub const PAGE_SIZE: u32 = 20;

/// Keyword used when the entered text is empty after trimming.
pub const DEFAULT_KEYWORD: &str = "ランチ";

/// A page fetch the adapter must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub keyword: String,
    pub start: u32,
    pub count: u32,
}

/// What `complete` did with a response.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Records merged (or, for zero records, the session was exhausted).
    Applied { received: usize },
    /// The request failed; results were cleared and the session exhausted.
    Failed(NetworkError),
    /// A newer request superseded this one. Nothing changed.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    generation: u64,
    reset: bool,
}

pub struct SearchSession {
    query: String,
    fallback_keyword: String,
    results: Vec<Restaurant>,
    is_exhausted: bool,
    generation: u64,
    pending: Option<Pending>,
}

impl SearchSession {
    pub fn new(fallback_keyword: impl Into<String>) -> Self {
        let fallback_keyword = fallback_keyword.into();
        Self {
            query: fallback_keyword.clone(),
            fallback_keyword,
            results: Vec::new(),
            is_exhausted: false,
            generation: 0,
            pending: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Restaurant] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_exhausted(&self) -> bool {
        self.is_exhausted
    }

    pub fn phase(&self) -> Phase {
        if self.is_loading() {
            Phase::Loading
        } else if self.is_exhausted {
            Phase::Exhausted
        } else {
            Phase::Idle
        }
    }

    /// Starts a fresh search for the entered text.
    ///
    /// Always issues a request, superseding any request still in flight.
    pub fn start_search(&mut self, raw: &str) -> PageRequest {
        let trimmed = raw.trim();
        self.query = if trimmed.is_empty() {
            self.fallback_keyword.clone()
        } else {
            trimmed.to_string()
        };
        self.results.clear();
        self.is_exhausted = false;
        self.issue(true)
    }

    /// Requests a page for the current query.
    ///
    /// `reset` fetches from offset 1 and replaces the results on success.
    /// Otherwise the next page is fetched from `len(results) + 1`, which
    /// assumes every earlier page came back at exactly `PAGE_SIZE`.
    /// An incremental load is dropped while a request is in flight or once
    /// the session is exhausted.
    pub fn load_page(&mut self, reset: bool) -> Option<PageRequest> {
        if !reset {
            if self.is_loading() {
                debug!("Incremental load dropped: request already in flight");
                return None;
            }
            if self.is_exhausted {
                debug!("Incremental load dropped: session exhausted");
                return None;
            }
        }
        Some(self.issue(reset))
    }

    fn issue(&mut self, reset: bool) -> PageRequest {
        let start = if reset {
            1
        } else {
            self.results.len() as u32 + 1
        };
        self.generation += 1;
        self.pending = Some(Pending {
            generation: self.generation,
            reset,
        });
        info!(
            "Page request #{}: keyword={:?}, start={}, count={}",
            self.generation, self.query, start, PAGE_SIZE
        );
        PageRequest {
            generation: self.generation,
            keyword: self.query.clone(),
            start,
            count: PAGE_SIZE,
        }
    }

    /// Applies the outcome of the request tagged `generation`.
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<Vec<Restaurant>, NetworkError>,
    ) -> Completion {
        let Some(pending) = self.pending.filter(|p| p.generation == generation) else {
            debug!(
                "Dropping stale response #{} (current #{})",
                generation, self.generation
            );
            return Completion::Stale;
        };
        self.pending = None;

        match outcome {
            Ok(records) => {
                let received = records.len();
                if pending.reset {
                    self.results = records;
                    self.is_exhausted = false;
                } else {
                    self.results.extend(records);
                }
                if received == 0 {
                    self.is_exhausted = true;
                }
                info!(
                    "Page #{} applied: received={}, total={}",
                    generation,
                    received,
                    self.results.len()
                );
                Completion::Applied { received }
            }
            Err(err) => {
                self.results.clear();
                self.is_exhausted = true;
                Completion::Failed(err)
            }
        }
    }
}
