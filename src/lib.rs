//! tunegrid: search core for a music catalog browser backed by the iTunes
//! Search API.
//!
//! The crate provides everything between a UI and the network:
//! - Debounced search-as-you-type with immediate clearing
//! - Latest-wins request coordination, so a slow stale response never
//!   overwrites a newer one
//! - A cache-first track detail lookup
//! - A pure reducer over a single observable state snapshot
//! - Display-ready view models for a results grid and a detail page

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Frontend, events
//! │  - Event handling and debounce                      │
//! │  - Reducer and selectors                            │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Coordinator (coordinator/)                         │  ← Latest wins
//! │  - Search and detail channels                       │
//! │  - Emission broadcast                               │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ API Layer     │   │ Storage Layer │   │ UI Layer      │
//! │ (api/)        │   │ (storage/)    │   │ (ui/)         │
//! │ - SearchApi   │   │ - Detail cache│   │ - View models │
//! │ - iTunes HTTP │   │               │   │ - Formatting  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, Observability              │
//! │  - Track models and errors (domain/)                │
//! │  - Debouncer and paths (infrastructure/)            │
//! │  - tracing + optional JSON span export              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: Search API trait, response envelope, iTunes client
//! - [`app`]: State, actions, and the [`Frontend`]
//! - [`coordinator`]: Request coordination
//! - [`domain`]: Track models and errors
//! - [`infrastructure`]: Debouncer and filesystem paths
//! - [`storage`]: Track detail cache
//! - [`ui`]: View models
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! ```toml
//! # tunegrid.toml
//! base_url = "https://itunes.apple.com"
//! debounce_ms = 200
//! request_timeout_secs = 30
//! search_limit = 50
//! country = "IN"
//! trace_level = "debug"
//! trace_file = "tunegrid-otlp.json"
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use tunegrid::{initialize, Config, Event};
//!
//! # #[tokio::main]
//! # async fn main() -> tunegrid::Result<()> {
//! let frontend = initialize(&Config::from_env())?;
//! let mut emissions = frontend.subscribe();
//!
//! frontend.handle_event(&Event::SearchTermChanged("Alag Aasmaan".to_string()));
//! if let Ok(emission) = emissions.recv().await {
//!     println!("{emission:?}");
//! }
//! println!("{:?}", frontend.grid_view());
//! # Ok(())
//! # }
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub mod api;
pub mod app;
pub mod coordinator;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;

pub use api::{ApiResponse, ItunesClient, SearchApi};
pub use app::{Action, AppState, Event, Frontend, StateStore};
pub use coordinator::{Emission, RequestCoordinator};
pub use domain::{GridResult, Result, SongSummary, TrackDetail, TrackId, TunegridError};

/// Default iTunes Search API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://itunes.apple.com";

/// Runtime configuration.
///
/// Every field has a default, so partial sources (a map, the environment, a
/// TOML file) only need to name what they change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the search API. Default: `https://itunes.apple.com`
    pub base_url: String,

    /// Quiet period before a typed term is searched. Default: 200
    pub debounce_ms: u64,

    /// Per-request HTTP timeout. Default: 30
    pub request_timeout_secs: u64,

    /// Maximum number of search results requested. Default: API default
    pub search_limit: Option<u32>,

    /// Two-letter storefront country code. Default: API default (US)
    pub country: Option<String>,

    /// Tracing filter directive, e.g. `debug` or `tunegrid=trace`.
    ///
    /// `RUST_LOG` takes precedence. Default: `"info"`
    pub trace_level: Option<String>,

    /// File receiving one JSON line per finished span.
    ///
    /// A relative path is placed in the tunegrid data directory. Unset
    /// disables span export.
    pub trace_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce_ms: 200,
            request_timeout_secs: 30,
            search_limit: None,
            country: None,
            trace_level: None,
            trace_file: None,
        }
    }
}

impl Config {
    /// Builds a configuration from string key/value pairs.
    ///
    /// Unknown keys are ignored, and unparsable or empty values fall back to
    /// their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use tunegrid::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "350".to_string());
    /// map.insert("request_timeout_secs".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.debounce_ms, 350);
    /// assert_eq!(config.request_timeout_secs, 30);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            map.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let number = |key: &str| text(key).and_then(|v| v.parse::<u64>().ok());

        Self {
            base_url: text("base_url").unwrap_or(defaults.base_url),
            debounce_ms: number("debounce_ms").unwrap_or(defaults.debounce_ms),
            request_timeout_secs: number("request_timeout_secs").unwrap_or(defaults.request_timeout_secs),
            search_limit: text("search_limit").and_then(|v| v.parse().ok()),
            country: text("country"),
            trace_level: text("trace_level"),
            trace_file: text("trace_file"),
        }
    }

    /// Builds a configuration from the process environment.
    ///
    /// Reads `ITUNES_URL`, `TUNEGRID_DEBOUNCE_MS`, `TUNEGRID_TIMEOUT_SECS`,
    /// `TUNEGRID_SEARCH_LIMIT`, `TUNEGRID_COUNTRY`, `TUNEGRID_TRACE_LEVEL`,
    /// and `TUNEGRID_TRACE_FILE`.
    #[must_use]
    pub fn from_env() -> Self {
        const VARS: [(&str, &str); 7] = [
            ("ITUNES_URL", "base_url"),
            ("TUNEGRID_DEBOUNCE_MS", "debounce_ms"),
            ("TUNEGRID_TIMEOUT_SECS", "request_timeout_secs"),
            ("TUNEGRID_SEARCH_LIMIT", "search_limit"),
            ("TUNEGRID_COUNTRY", "country"),
            ("TUNEGRID_TRACE_LEVEL", "trace_level"),
            ("TUNEGRID_TRACE_FILE", "trace_file"),
        ];

        let map: BTreeMap<String, String> = VARS
            .iter()
            .filter_map(|(var, key)| std::env::var(var).ok().map(|value| ((*key).to_string(), value)))
            .collect();
        Self::from_map(&map)
    }

    /// Loads a TOML configuration file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TunegridError::Io`] when the file cannot be read and
    /// [`TunegridError::Toml`] when it is not valid TOML for this structure.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Builds a ready-to-use [`Frontend`] talking to the iTunes API.
///
/// Installs tracing, then wires the HTTP client, coordinator, cache, state
/// store, and debouncer together. Nothing is global: two frontends share no
/// state.
///
/// # Errors
///
/// Returns [`TunegridError::Config`] when the HTTP client cannot be built
/// from `config`.
pub fn initialize(config: &Config) -> Result<Frontend> {
    observability::init_tracing(config);
    tracing::debug!(base_url = %config.base_url, debounce_ms = config.debounce_ms, "initializing tunegrid");

    let client = ItunesClient::new(config)?;
    Ok(Frontend::with_api(Arc::new(client), config.debounce()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn from_map_ignores_blank_values() {
        let mut map = BTreeMap::new();
        map.insert("base_url".to_string(), "  ".to_string());
        map.insert("country".to_string(), "IN".to_string());
        map.insert("search_limit".to_string(), "25".to_string());

        let config = Config::from_map(&map);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.country.as_deref(), Some("IN"));
        assert_eq!(config.search_limit, Some(25));
    }

    #[test]
    fn from_file_fills_missing_keys_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://localhost:8080\"\ndebounce_ms = 50").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.debounce(), Duration::from_millis(50));
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.trace_file.is_none());
    }

    #[test]
    fn from_file_reports_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debounce_ms = \"fast\"").unwrap();
        assert!(matches!(Config::from_file(file.path()), Err(TunegridError::Toml(_))));
    }

    #[test]
    fn from_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(Config::from_file(missing), Err(TunegridError::Io(_))));
    }

    #[test]
    fn initialize_rejects_empty_base_url() {
        let config = Config {
            base_url: String::new(),
            ..Config::default()
        };
        assert!(matches!(initialize(&config), Err(TunegridError::Config(_))));
    }
}
