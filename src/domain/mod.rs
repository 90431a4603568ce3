//! Domain layer for the tunegrid search core.
//!
//! This module contains the catalog types and error definitions shared by every
//! other layer, independent of HTTP, runtime, or rendering concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`track`]: Song, track detail, and search grid models
//!
//! # Examples
//!
//! ```
//! use tunegrid::domain::{GridResult, Result, SongSummary};
//!
//! fn single_hit() -> Result<GridResult> {
//!     Ok(GridResult {
//!         result_count: 1,
//!         items: vec![SongSummary::new(1650765257, "Dhairya", "Sajjan Raj Vaidya")],
//!     })
//! }
//! ```

pub mod error;
pub mod track;

pub use error::{Result, TunegridError, DEFAULT_ERROR_MESSAGE};
pub use track::{GridResult, LookupResult, SongSummary, TrackDetail, TrackId};
