//! Search API abstraction.
//!
//! This module defines the [`SearchApi`] trait consumed by the request
//! coordinator and the [`ApiResponse`] envelope every call resolves to. The
//! envelope never represents a Rust error: transport failures are folded into
//! `ok == false` responses so callers interpret success and failure in one place.
//!
//! # Implementations
//!
//! - [`crate::api::ItunesClient`]: HTTP client for the iTunes Search API

use crate::domain::error::{Result, TunegridError};
use crate::domain::{GridResult, LookupResult, TrackDetail, TrackId};
use async_trait::async_trait;
use serde_json::{json, Value};

/// Response envelope returned by every [`SearchApi`] call.
///
/// `data` already uses camelCase keys. On failure it may carry
/// `originalError.message` with an explanation from the server or transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Whether the call completed with a 2xx status and a JSON body.
    pub ok: bool,
    /// HTTP status, or `0` when no response was received.
    pub status: u16,
    /// Decoded body, or an error body on failure.
    pub data: Value,
}

impl ApiResponse {
    /// Builds a successful envelope.
    #[must_use]
    pub const fn success(status: u16, data: Value) -> Self {
        Self { ok: true, status, data }
    }

    /// Builds a failed envelope carrying `message` as `originalError.message`.
    #[must_use]
    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            status,
            data: json!({ "originalError": { "message": message.into() } }),
        }
    }

    /// Extracts `originalError.message` from a failed body, if present.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.data
            .get("originalError")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .map(String::from)
    }

    /// Rejects bodies that arrived as raw text instead of JSON.
    fn into_json(self) -> Result<Value> {
        match self.data {
            Value::String(_) => Err(TunegridError::Parse("response body is not JSON".to_string())),
            data => Ok(data),
        }
    }

    fn into_network_error(self) -> TunegridError {
        TunegridError::Network {
            status: self.status,
            message: self.error_message(),
        }
    }

    /// Interprets the envelope as a search payload.
    ///
    /// # Errors
    ///
    /// [`TunegridError::Network`] when `ok` is false, [`TunegridError::Parse`]
    /// when the body does not describe a [`GridResult`].
    pub fn into_grid(self) -> Result<GridResult> {
        if !self.ok {
            return Err(self.into_network_error());
        }
        Ok(serde_json::from_value(self.into_json()?)?)
    }

    /// Interprets the envelope as a lookup payload and takes its first entry.
    ///
    /// # Errors
    ///
    /// [`TunegridError::Network`] when `ok` is false, [`TunegridError::Parse`]
    /// when the body is malformed or the lookup matched nothing.
    pub fn into_track_detail(self, track_id: TrackId) -> Result<TrackDetail> {
        if !self.ok {
            return Err(self.into_network_error());
        }
        let lookup: LookupResult = serde_json::from_value(self.into_json()?)?;
        lookup.into_first(track_id)
    }
}

/// Remote search service consumed by the coordinator.
///
/// Both operations are plain request/response calls. Implementations must not
/// panic or return early on failure; every outcome is an [`ApiResponse`].
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Searches the catalog for `term`.
    async fn search_tracks(&self, term: &str) -> ApiResponse;

    /// Looks up a single track by id.
    async fn get_track_details(&self, track_id: TrackId) -> ApiResponse;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_exposes_original_error_message() {
        let response = ApiResponse::failure(500, "Internal Server Error");
        assert!(!response.ok);
        assert_eq!(response.error_message().as_deref(), Some("Internal Server Error"));

        let err = response.into_grid().unwrap_err();
        assert_eq!(err.user_message(), "Internal Server Error");
    }

    #[test]
    fn failure_without_body_falls_back_to_default_message() {
        let response = ApiResponse { ok: false, status: 500, data: Value::Null };
        let err = response.into_grid().unwrap_err();
        assert_eq!(err.user_message(), crate::domain::DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn malformed_success_body_is_a_parse_error() {
        let response = ApiResponse::success(200, json!({ "resultCount": "many" }));
        assert!(matches!(response.into_grid(), Err(TunegridError::Parse(_))));
    }

    #[test]
    fn text_body_reports_readable_parse_error() {
        let response = ApiResponse::success(200, Value::String("<html>oops</html>".to_string()));
        let err = response.clone().into_grid().unwrap_err();
        assert_eq!(err.user_message(), "Parse error: response body is not JSON");

        let err = response.into_track_detail(1).unwrap_err();
        assert!(matches!(err, TunegridError::Parse(msg) if msg == "response body is not JSON"));
    }

    #[test]
    fn lookup_takes_first_result() {
        let response = ApiResponse::success(
            200,
            json!({ "resultCount": 1, "results": [ { "trackId": 9, "trackName": "Nine" } ] }),
        );
        let detail = response.into_track_detail(9).unwrap();
        assert_eq!(detail.summary.track_name, "Nine");
    }
}
