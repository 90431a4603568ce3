//! Track domain models.
//!
//! This module defines the catalog types exchanged with the search API and held in
//! application state: [`SongSummary`] rows of a search grid, the richer
//! [`TrackDetail`] shown on a detail page, and the [`GridResult`] envelope of a
//! search response. All types are immutable once received; a newer response
//! replaces them wholesale.
//!
//! Field names follow the internal camelCase convention. The boundary adapter in
//! [`crate::api`] converts wire keys before these types are deserialized.

use crate::domain::error::{Result, TunegridError};
use serde::{Deserialize, Serialize};

/// Catalog identifier of a track, unique within a result set.
pub type TrackId = i64;

/// One row of a search result grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongSummary {
    pub track_id: TrackId,
    #[serde(default)]
    pub track_name: String,
    #[serde(default)]
    pub artist_name: String,
    #[serde(rename = "artworkUrl100", default)]
    pub artwork_url: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(rename = "trackPrice", default)]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
}

impl SongSummary {
    /// Creates a summary with only the identifying fields set.
    ///
    /// # Examples
    ///
    /// ```
    /// use tunegrid::domain::SongSummary;
    ///
    /// let song = SongSummary::new(1650765257, "Dhairya", "Sajjan Raj Vaidya");
    /// assert_eq!(song.track_name, "Dhairya");
    /// assert!(song.preview_url.is_none());
    /// ```
    #[must_use]
    pub fn new(track_id: TrackId, track_name: impl Into<String>, artist_name: impl Into<String>) -> Self {
        Self {
            track_id,
            track_name: track_name.into(),
            artist_name: artist_name.into(),
            artwork_url: None,
            preview_url: None,
            price: None,
            short_description: None,
            long_description: None,
        }
    }
}

/// Full track information for the detail view.
///
/// A superset of [`SongSummary`]; the summary fields are flattened so the same
/// camelCase keys deserialize into either type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDetail {
    #[serde(flatten)]
    pub summary: SongSummary,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub collection_name: Option<String>,
    #[serde(rename = "primaryGenreName", default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub track_view_url: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub collection_price: Option<f64>,
}

impl TrackDetail {
    /// Returns the track id this detail is keyed by.
    #[must_use]
    pub const fn track_id(&self) -> TrackId {
        self.summary.track_id
    }
}

impl From<SongSummary> for TrackDetail {
    fn from(summary: SongSummary) -> Self {
        Self {
            summary,
            release_date: None,
            collection_name: None,
            genre: None,
            country: None,
            track_view_url: None,
            currency: None,
            collection_price: None,
        }
    }
}

/// Payload of a successful search.
///
/// `items` preserves the relevance order returned by the API. The wire name
/// `results` is accepted as an alias.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridResult {
    #[serde(default)]
    pub result_count: usize,
    #[serde(alias = "results", default)]
    pub items: Vec<SongSummary>,
}

impl GridResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Payload of a detail lookup: `{ results: [TrackDetail] }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    #[serde(default)]
    pub result_count: usize,
    #[serde(default)]
    pub results: Vec<TrackDetail>,
}

impl LookupResult {
    /// Extracts the first detail of the lookup.
    ///
    /// # Errors
    ///
    /// Returns [`TunegridError::Parse`] when the lookup matched nothing.
    pub fn into_first(self, track_id: TrackId) -> Result<TrackDetail> {
        self.results
            .into_iter()
            .next()
            .ok_or_else(|| TunegridError::Parse(format!("no track found for id {track_id}")))
    }
}
