//! View model types representing renderable UI state.
//!
//! View models are immutable, display-ready projections of an
//! [`AppState`](crate::app::AppState) snapshot. They are created via
//! `AppState::compute_grid_view()` and `AppState::compute_detail_view()` and
//! contain no business logic.

use crate::domain::TrackId;

/// Search page: caption lines, the result grid, and status flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridView {
    /// `Search query: <term>` when a term is set.
    pub search_caption: Option<String>,

    /// `Matching music: <n>` when the result count is non-zero.
    pub count_caption: Option<String>,

    /// Cards in API relevance order.
    pub cards: Vec<CardView>,

    /// User-visible search failure, if the last search failed.
    pub error: Option<String>,

    /// Whether a search is in flight.
    pub loading: bool,
}

/// One song card in the result grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub track_id: TrackId,
    /// Track name truncated for the card.
    pub title: String,
    pub artist: String,
    pub artwork_url: Option<String>,
    pub preview_url: Option<String>,
    /// Route of the detail page for this card.
    pub detail_link: String,
}

/// Track detail page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailView {
    /// Whether the detail lookup is still pending.
    pub loading: bool,
    /// User-visible lookup failure.
    pub error: Option<String>,
    pub title: String,
    pub artist: String,
    /// Release date formatted as `Month D, YYYY`.
    pub release_date: Option<String>,
    /// Collection price with currency marker.
    pub price: Option<String>,
    pub apple_music_url: Option<String>,
    pub preview_url: Option<String>,
    pub collection: Option<String>,
    pub genre: Option<String>,
    pub country: Option<String>,
}
