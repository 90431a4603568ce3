//! Actions accepted by the state reducer.
//!
//! This module defines the [`Action`] type, the closed set of state transitions the
//! [`AppState`](crate::app::AppState) reducer understands. Actions are produced by
//! the request coordinator as requests start, resolve, or are cleared; the UI
//! layer never constructs them directly.
//!
//! # Example
//!
//! ```rust
//! use tunegrid::app::{Action, AppState};
//!
//! let state = AppState::default().reduce(&Action::SearchRequested("Anuv Jain".to_string()));
//! assert_eq!(state.search_term(), "Anuv Jain");
//! ```

use crate::domain::{GridResult, TrackDetail, TrackId};

/// State transitions applied by [`AppState::reduce`](crate::app::AppState::reduce).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A search for the given term was issued.
    SearchRequested(String),
    /// The current search resolved with results.
    SearchSucceeded(GridResult),
    /// The current search failed with a user-visible message.
    SearchFailed(String),
    /// The search term was cleared; term, grid, and error reset together.
    GridCleared,

    /// A detail lookup for the given track was issued.
    DetailRequested(TrackId),
    /// The current detail lookup resolved (from cache or network).
    DetailSucceeded(TrackDetail),
    /// The current detail lookup failed with a user-visible message.
    DetailFailed(String),
    /// The detail view was left; detail state resets.
    DetailCleared,
}
