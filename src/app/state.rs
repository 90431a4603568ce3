//! Application state, reducer, and view model computation.
//!
//! This module defines [`AppState`], the observable UI state of the search and
//! detail pages, and [`StateStore`], the owner of the current snapshot. State only
//! changes through [`AppState::reduce`], a pure function of the previous snapshot
//! and an [`Action`]: no hidden state, no side effects, and every action is
//! accepted.
//!
//! # State Components
//!
//! - **Search**: term, grid data, search error, pending flag
//! - **Detail**: requested track id, track details, lookup error, pending flag
//!
//! # Example
//!
//! ```rust
//! use tunegrid::app::{Action, AppState};
//! use tunegrid::domain::GridResult;
//!
//! let state = AppState::default()
//!     .reduce(&Action::SearchFailed("Something went wrong".to_string()))
//!     .reduce(&Action::SearchSucceeded(GridResult::default()));
//! assert!(state.search_error().is_none());
//! ```

use super::actions::Action;
use crate::domain::{GridResult, TrackDetail, TrackId};
use crate::ui::helpers::{detail_link, format_price, format_release_date, truncate_text, CARD_TITLE_LIMIT};
use crate::ui::viewmodel::{CardView, DetailView, GridView};

/// Snapshot of the observable UI state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    search_term: String,
    grid_data: GridResult,
    search_error: Option<String>,
    search_pending: bool,

    track_id: Option<TrackId>,
    track_details: Option<TrackDetail>,
    track_search_error: Option<String>,
    detail_pending: bool,
}

impl AppState {
    /// Produces the next snapshot for `action`.
    #[must_use]
    pub fn reduce(&self, action: &Action) -> Self {
        let mut next = self.clone();
        match action {
            Action::SearchRequested(term) => {
                next.search_term.clone_from(term);
                next.search_pending = true;
            }
            Action::SearchSucceeded(data) => {
                next.grid_data = data.clone();
                next.search_error = None;
                next.search_pending = false;
            }
            Action::SearchFailed(error) => {
                next.grid_data = GridResult::default();
                next.search_error = Some(error.clone());
                next.search_pending = false;
            }
            Action::GridCleared => {
                next.search_term = String::new();
                next.grid_data = GridResult::default();
                next.search_error = None;
                next.search_pending = false;
            }
            Action::DetailRequested(track_id) => {
                next.track_id = Some(*track_id);
                next.detail_pending = true;
            }
            Action::DetailSucceeded(detail) => {
                next.track_id = Some(detail.track_id());
                next.track_details = Some(detail.clone());
                next.track_search_error = None;
                next.detail_pending = false;
            }
            Action::DetailFailed(error) => {
                next.track_details = None;
                next.track_search_error = Some(error.clone());
                next.detail_pending = false;
            }
            Action::DetailCleared => {
                next.track_id = None;
                next.track_details = None;
                next.track_search_error = None;
                next.detail_pending = false;
            }
        }
        next
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub const fn grid_data(&self) -> &GridResult {
        &self.grid_data
    }

    #[must_use]
    pub fn search_error(&self) -> Option<&str> {
        self.search_error.as_deref()
    }

    /// Whether a search request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.search_pending
    }

    #[must_use]
    pub const fn track_id(&self) -> Option<TrackId> {
        self.track_id
    }

    #[must_use]
    pub const fn track_details(&self) -> Option<&TrackDetail> {
        self.track_details.as_ref()
    }

    #[must_use]
    pub fn track_search_error(&self) -> Option<&str> {
        self.track_search_error.as_deref()
    }

    /// Whether a detail lookup is in flight.
    #[must_use]
    pub const fn is_detail_loading(&self) -> bool {
        self.detail_pending
    }

    /// Computes the search page view model.
    #[must_use]
    pub fn compute_grid_view(&self) -> GridView {
        let search_caption = (!self.search_term.is_empty())
            .then(|| format!("Search query: {}", self.search_term));
        let count_caption = (self.grid_data.result_count != 0)
            .then(|| format!("Matching music: {}", self.grid_data.result_count));

        let cards = self
            .grid_data
            .items
            .iter()
            .map(|song| CardView {
                track_id: song.track_id,
                title: truncate_text(&song.track_name, CARD_TITLE_LIMIT),
                artist: song.artist_name.clone(),
                artwork_url: song.artwork_url.clone(),
                preview_url: song.preview_url.clone(),
                detail_link: detail_link(song.track_id),
            })
            .collect();

        GridView {
            search_caption,
            count_caption,
            cards,
            error: self.search_error.clone(),
            loading: self.search_pending,
        }
    }

    /// Computes the detail page view model.
    ///
    /// While nothing has resolved yet the view is empty and `loading` reflects
    /// whether a lookup is pending.
    #[must_use]
    pub fn compute_detail_view(&self) -> DetailView {
        let Some(detail) = &self.track_details else {
            return DetailView {
                loading: self.detail_pending || self.track_search_error.is_none(),
                error: self.track_search_error.clone(),
                ..DetailView::default()
            };
        };

        let price = detail
            .collection_price
            .or(detail.summary.price)
            .map(|amount| format_price(amount, detail.currency.as_deref()));

        DetailView {
            loading: false,
            error: self.track_search_error.clone(),
            title: detail.summary.track_name.clone(),
            artist: detail.summary.artist_name.clone(),
            release_date: detail.release_date.as_deref().map(format_release_date),
            price,
            apple_music_url: detail.track_view_url.clone(),
            preview_url: detail.summary.preview_url.clone(),
            collection: detail.collection_name.clone(),
            genre: detail.genre.clone(),
            country: detail.country.clone(),
        }
    }
}

/// Owner of the current [`AppState`] snapshot.
///
/// Only [`StateStore::dispatch`] changes the snapshot; readers get clones.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    state: AppState,
}

impl StateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `action` and returns the resulting snapshot.
    pub fn dispatch(&mut self, action: &Action) -> &AppState {
        tracing::trace!(action = ?action, "dispatch");
        self.state = self.state.reduce(action);
        &self.state
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }
}
