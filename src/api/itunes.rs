//! HTTP client for the iTunes Search API.
//!
//! [`ItunesClient`] implements [`SearchApi`] on top of `reqwest`. It owns the
//! boundary conventions: request bodies are converted camelCase → snake_case
//! before sending and response bodies snake_case → camelCase after receipt.
//! Every outcome, including transport errors and undecodable bodies, is
//! returned as an [`ApiResponse`].

use crate::api::case::{camelize_keys, snakify_keys};
use crate::api::client::{ApiResponse, SearchApi};
use crate::domain::error::{Result, TunegridError};
use crate::domain::TrackId;
use crate::Config;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::Instrument;

const USER_AGENT: &str = concat!("tunegrid/", env!("CARGO_PKG_VERSION"));

/// iTunes Search API client.
#[derive(Debug, Clone)]
pub struct ItunesClient {
    http: reqwest::Client,
    base_url: String,
    search_limit: Option<u32>,
    country: Option<String>,
}

impl ItunesClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TunegridError::Config`] if the base URL is empty or the
    /// underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(TunegridError::Config("base_url must not be empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TunegridError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            search_limit: config.search_limit,
            country: config.country.clone(),
        })
    }

    /// Returns the base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Serializes an internal request body using wire (snake_case) keys.
    ///
    /// # Errors
    ///
    /// Returns [`TunegridError::Parse`] if the body cannot be serialized.
    pub fn encode_body(body: &Value) -> Result<String> {
        Ok(serde_json::to_string(&snakify_keys(body.clone()))?)
    }

    fn search_query(&self, term: &str) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("term", term.to_string()),
            ("media", "music".to_string()),
            ("entity", "song".to_string()),
        ];
        if let Some(limit) = self.search_limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(country) = &self.country {
            query.push(("country", country.clone()));
        }
        query
    }

    /// Sends a request and folds every outcome into an [`ApiResponse`].
    async fn send(&self, request: reqwest::RequestBuilder) -> ApiResponse {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(error = %e, "search api transport failure");
                let status = e.status().map_or(0, |s| s.as_u16());
                return ApiResponse::failure(status, e.to_string());
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(error = %e, status = status.as_u16(), "failed to read response body");
                return ApiResponse::failure(status.as_u16(), e.to_string());
            }
        };

        classify(status, text)
    }
}

/// Interprets an HTTP status and raw body as an [`ApiResponse`].
///
/// JSON bodies are converted to camelCase keys. A 2xx body that is not JSON is
/// kept as a string so decoding reports it as a parse failure; a non-2xx body
/// that is not JSON carries no data.
fn classify(status: reqwest::StatusCode, text: String) -> ApiResponse {
    match serde_json::from_str::<Value>(&text) {
        Ok(body) => {
            let data = camelize_keys(body);
            if status.is_success() {
                ApiResponse::success(status.as_u16(), data)
            } else {
                ApiResponse { ok: false, status: status.as_u16(), data }
            }
        }
        Err(e) if status.is_success() => {
            tracing::debug!(error = %e, "response body is not JSON");
            ApiResponse::success(status.as_u16(), Value::String(text))
        }
        Err(_) => ApiResponse {
            ok: false,
            status: status.as_u16(),
            data: Value::Null,
        },
    }
}

#[async_trait]
impl SearchApi for ItunesClient {
    async fn search_tracks(&self, term: &str) -> ApiResponse {
        let url = format!("{}/search", self.base_url);
        let request = self.http.get(&url).query(&self.search_query(term));
        self.send(request)
            .instrument(tracing::debug_span!("itunes_search", term = %term))
            .await
    }

    async fn get_track_details(&self, track_id: TrackId) -> ApiResponse {
        let url = format!("{}/lookup", self.base_url);
        let request = self.http.get(&url).query(&[("id", track_id.to_string())]);
        self.send(request)
            .instrument(tracing::debug_span!("itunes_lookup", track_id = track_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_empty_base_url() {
        let config = Config {
            base_url: "/".to_string(),
            ..Config::default()
        };
        assert!(matches!(ItunesClient::new(&config), Err(TunegridError::Config(_))));
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let config = Config {
            base_url: "https://itunes.apple.com/".to_string(),
            ..Config::default()
        };
        let client = ItunesClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "https://itunes.apple.com");
    }

    #[test]
    fn search_query_includes_optional_limit_and_country() {
        let config = Config {
            search_limit: Some(25),
            country: Some("IN".to_string()),
            ..Config::default()
        };
        let client = ItunesClient::new(&config).unwrap();
        let query = client.search_query("Alag Aasmaan");
        assert!(query.contains(&("term", "Alag Aasmaan".to_string())));
        assert!(query.contains(&("limit", "25".to_string())));
        assert!(query.contains(&("country", "IN".to_string())));
    }

    #[test]
    fn encode_body_uses_wire_keys() {
        let body = json!({ "searchTerm": "x", "pageInfo": { "pageSize": 10 } });
        let encoded = ItunesClient::encode_body(&body).unwrap();
        let decoded: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, json!({ "search_term": "x", "page_info": { "page_size": 10 } }));
    }

    #[test]
    fn non_json_success_body_becomes_a_parse_failure() {
        let response = classify(reqwest::StatusCode::OK, "not json".to_string());
        assert!(response.ok);

        let err = response.into_grid().unwrap_err();
        assert!(matches!(err, TunegridError::Parse(_)));
        assert_eq!(err.user_message(), "Parse error: response body is not JSON");
    }

    #[test]
    fn non_json_error_body_falls_back_to_default_message() {
        let response = classify(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "<html>".to_string());
        assert!(!response.ok);
        assert_eq!(response.status, 500);
        assert_eq!(response.data, Value::Null);
        assert_eq!(response.into_grid().unwrap_err().user_message(), crate::domain::DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn json_error_body_keeps_server_message() {
        let body = json!({ "original_error": { "message": "Invalid value(s) for key(s): [entity]" } });
        let response = classify(reqwest::StatusCode::BAD_REQUEST, body.to_string());
        assert!(!response.ok);
        assert_eq!(
            response.error_message().as_deref(),
            Some("Invalid value(s) for key(s): [entity]")
        );
    }

    #[test]
    fn snake_case_body_is_camelized_before_decoding() {
        let body = json!({
            "result_count": 1,
            "results": [ { "track_id": 5, "track_name": "Dhairya", "artwork_url_100": "u" } ]
        });
        let grid = classify(reqwest::StatusCode::OK, body.to_string()).into_grid().unwrap();

        assert_eq!(grid.result_count, 1);
        assert_eq!(grid.items[0].track_id, 5);
        assert_eq!(grid.items[0].track_name, "Dhairya");
        assert_eq!(grid.items[0].artwork_url.as_deref(), Some("u"));
    }

    #[tokio::test]
    async fn unreachable_host_yields_failed_envelope() {
        let config = Config {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 2,
            ..Config::default()
        };
        let client = ItunesClient::new(&config).unwrap();
        let response = client.search_tracks("anything").await;
        assert!(!response.ok);
        assert!(response.error_message().is_some());
    }
}
