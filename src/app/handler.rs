//! UI event handling.
//!
//! [`Frontend`] is what an embedding UI talks to. It translates page-level
//! [`Event`]s into coordinator calls, applies the input debounce, and exposes
//! the state snapshot and emission stream for rendering.
//!
//! # Event Types
//!
//! - **Search page**: `SearchTermChanged`, `SearchSubmitted`, `Mounted`
//! - **Detail page**: `NavigatedToDetail`, `NavigatedBack`
//!
//! Requests are spawned on the tokio runtime, so every method that may start
//! one must be called from within a runtime.

use crate::api::SearchApi;
use crate::app::AppState;
use crate::coordinator::{Emission, RequestCoordinator};
use crate::domain::TrackId;
use crate::infrastructure::Debouncer;
use crate::ui::{DetailView, GridView};
use futures_util::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// Debounce key of the search input field.
pub const SEARCH_INPUT_KEY: &str = "search-input";

/// Default quiet period before a typed term is searched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Events raised by the search and detail pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The search input changed to the given text.
    SearchTermChanged(String),
    /// The user submitted the search input (Enter or the search button).
    SearchSubmitted(String),
    /// The search page was mounted.
    Mounted,
    /// The detail page for a track was opened.
    NavigatedToDetail(TrackId),
    /// The detail page was left.
    NavigatedBack,
}

/// Entry point of the UI layer into the search core.
#[derive(Debug)]
pub struct Frontend {
    coordinator: RequestCoordinator,
    debouncer: Debouncer<&'static str>,
    debounce: Duration,
}

impl Frontend {
    #[must_use]
    pub fn new(coordinator: RequestCoordinator, debounce: Duration) -> Self {
        Self {
            coordinator,
            debouncer: Debouncer::new(),
            debounce,
        }
    }

    /// Builds a frontend with a fresh coordinator over `api`.
    #[must_use]
    pub fn with_api(api: Arc<dyn SearchApi>, debounce: Duration) -> Self {
        Self::new(RequestCoordinator::new(api), debounce)
    }

    #[must_use]
    pub const fn coordinator(&self) -> &RequestCoordinator {
        &self.coordinator
    }

    #[must_use]
    pub fn snapshot(&self) -> AppState {
        self.coordinator.snapshot()
    }

    /// Receives every success and failure emission from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Emission> {
        self.coordinator.subscribe()
    }

    #[must_use]
    pub fn grid_view(&self) -> GridView {
        self.snapshot().compute_grid_view()
    }

    #[must_use]
    pub fn detail_view(&self) -> DetailView {
        self.snapshot().compute_detail_view()
    }

    /// Whether a typed term is waiting for the debounce delay.
    #[must_use]
    pub fn is_search_pending(&self) -> bool {
        self.debouncer.is_pending(&SEARCH_INPUT_KEY)
    }

    /// Dispatches `event` to its handler.
    ///
    /// Returns `true` when the snapshot changed synchronously and the caller
    /// should re-render right away. Later changes arrive through
    /// [`subscribe`](Self::subscribe).
    pub fn handle_event(&self, event: &Event) -> bool {
        let _span = tracing::debug_span!("handle_event", event = ?event).entered();
        let before = self.snapshot();

        match event {
            Event::SearchTermChanged(term) => self.on_search_term_change(term),
            Event::SearchSubmitted(term) => self.on_search_submit(term),
            Event::Mounted => self.on_mount(),
            Event::NavigatedToDetail(track_id) => self.on_navigate_to_detail(*track_id),
            Event::NavigatedBack => self.on_navigate_back(),
        }

        self.snapshot() != before
    }

    /// Debounces a non-empty term into a search; an empty term clears at once.
    pub fn on_search_term_change(&self, term: &str) {
        if term.is_empty() {
            self.debouncer.cancel(&SEARCH_INPUT_KEY);
            self.coordinator.clear_search();
            return;
        }

        let coordinator = self.coordinator.clone();
        let term = term.to_string();
        self.debouncer.trigger(SEARCH_INPUT_KEY, self.debounce, move || async move {
            coordinator.search(term).await;
        });
    }

    /// Searches `term` immediately, dropping any debounced search.
    pub fn on_search_submit(&self, term: &str) {
        self.debouncer.cancel(&SEARCH_INPUT_KEY);
        if term.is_empty() {
            self.coordinator.clear_search();
        } else {
            spawn(self.coordinator.search(term));
        }
    }

    /// Re-issues the stored search when its results are missing.
    pub fn on_mount(&self) {
        let state = self.snapshot();
        if !state.search_term().is_empty() && state.grid_data().is_empty() {
            tracing::debug!(term = state.search_term(), "re-searching stored term on mount");
            spawn(self.coordinator.search(state.search_term()));
        }
    }

    /// Clears the previous detail and loads `track_id`.
    pub fn on_navigate_to_detail(&self, track_id: TrackId) {
        self.coordinator.clear_detail();
        spawn(self.coordinator.fetch_track_detail(track_id));
    }

    pub fn on_navigate_back(&self) {
        self.coordinator.clear_detail();
    }
}

fn spawn(request: BoxFuture<'static, Option<Emission>>) {
    drop(tokio::spawn(request));
}
