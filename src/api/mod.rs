//! Boundary adapter for the remote search service.
//!
//! # Modules
//!
//! - `case`: Recursive snake_case ↔ camelCase key conversion
//! - `client`: [`SearchApi`] trait and the [`ApiResponse`] envelope
//! - `itunes`: `reqwest`-backed iTunes implementation

pub mod case;
pub mod client;
pub mod itunes;

pub use client::{ApiResponse, SearchApi};
pub use itunes::ItunesClient;
