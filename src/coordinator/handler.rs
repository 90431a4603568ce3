//! Request coordinator implementation.
//!
//! [`RequestCoordinator`] mediates every search and detail lookup. It owns the two
//! request channels, the track detail cache, and the state store, and applies
//! three rules:
//!
//! - **Latest wins**: a request id is taken synchronously when an operation is
//!   called, so issuance order, not response arrival order, decides which
//!   response may touch state.
//! - **Cache first**: detail lookups consult the cache before the network; a hit
//!   never issues a call.
//! - **No escaping errors**: every failure becomes a `Failed` state and a failure
//!   emission.
//!
//! Shared state sits behind one mutex that is never held across an `.await`;
//! the only suspension points are the API calls themselves.

use super::channel::{Channel, RequestId, RequestState};
use super::messages::Emission;
use crate::api::{ApiResponse, SearchApi};
use crate::app::{Action, AppState, StateStore};
use crate::domain::{GridResult, TrackDetail, TrackId};
use crate::storage::ResultCache;
use futures_util::future::{self, BoxFuture, FutureExt};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tracing::Instrument;

/// Capacity of the emission broadcast buffer per subscriber.
const EMISSION_BUFFER: usize = 64;

/// Mutable state shared by all clones of a coordinator.
#[derive(Debug)]
struct Shared {
    search: Channel<GridResult>,
    detail: Channel<TrackDetail>,
    cache: ResultCache,
    store: StateStore,
}

/// Coordinates search and detail requests against a [`SearchApi`].
///
/// Cheap to clone; clones share channels, cache, and store.
#[derive(Clone)]
pub struct RequestCoordinator {
    api: Arc<dyn SearchApi>,
    shared: Arc<Mutex<Shared>>,
    emissions: broadcast::Sender<Emission>,
}

impl std::fmt::Debug for RequestCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestCoordinator")
            .field("shared", &self.shared)
            .finish_non_exhaustive()
    }
}

impl RequestCoordinator {
    #[must_use]
    pub fn new(api: Arc<dyn SearchApi>) -> Self {
        let (emissions, _) = broadcast::channel(EMISSION_BUFFER);
        Self {
            api,
            shared: Arc::new(Mutex::new(Shared {
                search: Channel::new("search"),
                detail: Channel::new("detail"),
                cache: ResultCache::new(),
                store: StateStore::new(),
            })),
            emissions,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribes to every emission produced from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Emission> {
        self.emissions.subscribe()
    }

    /// Returns a clone of the current state snapshot.
    #[must_use]
    pub fn snapshot(&self) -> AppState {
        self.lock().store.state().clone()
    }

    #[must_use]
    pub fn search_state(&self) -> RequestState<GridResult> {
        self.lock().search.state().clone()
    }

    #[must_use]
    pub fn detail_state(&self) -> RequestState<TrackDetail> {
        self.lock().detail.state().clone()
    }

    /// Returns the cached detail for `track_id`, if any.
    #[must_use]
    pub fn cached_detail(&self, track_id: TrackId) -> Option<TrackDetail> {
        self.lock().cache.get(track_id).cloned()
    }

    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.lock().cache.len()
    }

    fn publish(&self, emission: &Emission) {
        tracing::debug!(failure = emission.is_failure(), receivers = self.emissions.receiver_count(), "publishing emission");
        // No subscribers is not an error.
        let _ = self.emissions.send(emission.clone());
    }

    /// Searches the catalog for `term`, superseding any search in flight.
    ///
    /// The request id is taken before this function returns, so of several
    /// calls issued before any resolves only the last may update state. The
    /// returned future yields `None` when its response was discarded as stale.
    ///
    /// An empty term is not searched; it clears the search channel instead.
    pub fn search(&self, term: impl Into<String>) -> BoxFuture<'static, Option<Emission>> {
        let term = term.into();
        if term.is_empty() {
            tracing::debug!("empty search term routed to clear");
            self.clear_search();
            return future::ready(None).boxed();
        }

        let request_id = {
            let mut shared = self.lock();
            let request_id = shared.search.begin();
            shared.store.dispatch(&Action::SearchRequested(term.clone()));
            request_id
        };

        let span = tracing::debug_span!("search", request_id = request_id, term = %term);
        let this = self.clone();
        async move {
            let response = this.api.search_tracks(&term).await;
            this.finish_search(request_id, response)
        }
        .instrument(span)
        .boxed()
    }

    fn finish_search(&self, request_id: RequestId, response: ApiResponse) -> Option<Emission> {
        let status = response.status;
        let outcome = response.into_grid().map_err(|e| {
            tracing::debug!(error = %e, status = status, "search failed");
            e.user_message()
        });

        let emission = {
            let mut shared = self.lock();
            if !shared.search.resolve(request_id, &outcome) {
                tracing::trace!(channel = shared.search.name(), request_id = request_id, "response discarded");
                return None;
            }
            match outcome {
                Ok(data) => {
                    tracing::debug!(result_count = data.result_count, "search succeeded");
                    shared.store.dispatch(&Action::SearchSucceeded(data.clone()));
                    Emission::GridSuccess(data)
                }
                Err(message) => {
                    shared.store.dispatch(&Action::SearchFailed(message.clone()));
                    Emission::GridFailure(message)
                }
            }
        };

        self.publish(&emission);
        Some(emission)
    }

    /// Loads the detail of `track_id`, preferring the cache.
    ///
    /// On a cache hit the success is applied and emitted before this function
    /// returns, without a network call or a new request id. On a miss a request
    /// is issued on the detail channel under the same latest-wins rule as
    /// [`search`](Self::search); a successful response is cached before it is
    /// emitted.
    pub fn fetch_track_detail(&self, track_id: TrackId) -> BoxFuture<'static, Option<Emission>> {
        let request_id = {
            let mut shared = self.lock();
            shared.store.dispatch(&Action::DetailRequested(track_id));

            if let Some(detail) = shared.cache.get(track_id).cloned() {
                tracing::debug!(track_id = track_id, "track detail served from cache");
                shared.detail.settle(detail.clone());
                shared.store.dispatch(&Action::DetailSucceeded(detail.clone()));
                drop(shared);

                let emission = Emission::DetailSuccess(detail);
                self.publish(&emission);
                return future::ready(Some(emission)).boxed();
            }

            shared.detail.begin()
        };

        let span = tracing::debug_span!("fetch_track_detail", request_id = request_id, track_id = track_id);
        let this = self.clone();
        async move {
            let response = this.api.get_track_details(track_id).await;
            this.finish_detail(request_id, track_id, response)
        }
        .instrument(span)
        .boxed()
    }

    fn finish_detail(&self, request_id: RequestId, track_id: TrackId, response: ApiResponse) -> Option<Emission> {
        let status = response.status;
        let outcome = response.into_track_detail(track_id).map_err(|e| {
            tracing::debug!(error = %e, status = status, "track detail lookup failed");
            e.user_message()
        });

        let emission = {
            let mut shared = self.lock();
            if !shared.detail.resolve(request_id, &outcome) {
                tracing::trace!(channel = shared.detail.name(), request_id = request_id, "response discarded");
                return None;
            }
            match outcome {
                Ok(detail) => {
                    shared.cache.put(track_id, detail.clone());
                    shared.store.dispatch(&Action::DetailSucceeded(detail.clone()));
                    Emission::DetailSuccess(detail)
                }
                Err(message) => {
                    shared.store.dispatch(&Action::DetailFailed(message.clone()));
                    Emission::DetailFailure(message)
                }
            }
        };

        self.publish(&emission);
        Some(emission)
    }

    /// Resets the search channel and clears term, grid, and error together.
    ///
    /// A search still in flight completes but its response is discarded.
    pub fn clear_search(&self) {
        let mut shared = self.lock();
        shared.search.reset();
        shared.store.dispatch(&Action::GridCleared);
    }

    /// Resets the detail channel and detail state. Cached entries are kept.
    pub fn clear_detail(&self) {
        let mut shared = self.lock();
        shared.detail.reset();
        shared.store.dispatch(&Action::DetailCleared);
    }
}
