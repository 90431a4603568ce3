//! Error types for the tunegrid search core.
//!
//! This module defines the centralized error type [`TunegridError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Errors raised while talking to the search API never escape the request
//! coordinator. They are flattened into a single user-visible message via
//! [`TunegridError::user_message`] and stored in the state store instead.

use thiserror::Error;

/// Message shown when a failure carries no server-provided explanation.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";

/// The main error type for tunegrid operations.
///
/// # Examples
///
/// ```
/// use tunegrid::domain::TunegridError;
///
/// let err = TunegridError::Network { status: 500, message: None };
/// assert_eq!(err.user_message(), "Something went wrong");
///
/// let err = TunegridError::Parse("missing field `trackId`".to_string());
/// assert!(err.user_message().contains("trackId"));
/// ```
#[derive(Debug, Error)]
pub enum TunegridError {
    /// The API answered with a non-2xx status or the transport failed.
    ///
    /// `status` is `0` when no HTTP status was received at all (DNS failure,
    /// refused connection, timeout). `message` holds the server or transport
    /// explanation when one was available.
    #[error("Network error (status {status}): {}", message.as_deref().unwrap_or(DEFAULT_ERROR_MESSAGE))]
    Network {
        /// HTTP status code, or `0` for transport failures.
        status: u16,
        /// Explanation extracted from the response body, if any.
        message: Option<String>,
    },

    /// The response body could not be interpreted.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML configuration file could not be decoded.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl TunegridError {
    /// Returns the human-readable message surfaced to the UI layer.
    ///
    /// Network failures show the server-provided message when present and
    /// [`DEFAULT_ERROR_MESSAGE`] otherwise; every other variant uses its
    /// `Display` text.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network { message, .. } => message
                .clone()
                .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for TunegridError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// A specialized `Result` type for tunegrid operations.
pub type Result<T> = std::result::Result<T, TunegridError>;
