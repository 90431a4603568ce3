//! Shared formatting helpers for view model computation.
//!
//! These functions turn raw catalog fields into display strings. They are pure
//! and operate on characters rather than bytes, so multi-byte track names are
//! never split mid-character.
//!
//! # Example
//!
//! ```rust
//! use tunegrid::ui::helpers::{detail_link, truncate_text};
//!
//! assert_eq!(truncate_text("Jo Tum Mere Ho", 18), "Jo Tum Mere Ho");
//! assert_eq!(detail_link(1650765257), "/details/1650765257");
//! ```

use crate::domain::TrackId;
use chrono::{DateTime, NaiveDate};

/// Maximum number of characters of a track name shown on a grid card.
pub const CARD_TITLE_LIMIT: usize = 18;

/// Truncates `text` to `limit` characters, appending `...` when shortened.
#[must_use]
pub fn truncate_text(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let kept: String = text.chars().take(limit).collect();
    format!("{kept}...")
}

/// Route of the detail page for a track.
#[must_use]
pub fn detail_link(track_id: TrackId) -> String {
    format!("/details/{track_id}")
}

/// Formats an ISO-8601 release date as `Month D, YYYY`.
///
/// Accepts full RFC 3339 timestamps (`2022-12-16T12:00:00Z`) and plain dates
/// (`2022-12-16`). Anything else is returned unchanged.
///
/// # Example
///
/// ```rust
/// use tunegrid::ui::helpers::format_release_date;
///
/// assert_eq!(format_release_date("2022-12-16T12:00:00Z"), "December 16, 2022");
/// assert_eq!(format_release_date("someday"), "someday");
/// ```
#[must_use]
pub fn format_release_date(raw: &str) -> String {
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Formats a price, prefixing `$` for USD.
#[must_use]
pub fn format_price(amount: f64, currency: Option<&str>) -> String {
    match currency {
        Some("USD") => format!("${amount:.2}"),
        Some(other) => format!("{amount:.2} {other}"),
        None => format!("{amount:.2}"),
    }
}
