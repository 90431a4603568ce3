//! In-memory track detail cache.
//!
//! [`ResultCache`] maps a track id to the last successful detail lookup for it.
//! It is a plain data structure: no eviction, no TTL, no size bound. Entries live
//! for the lifetime of the owning coordinator.

use crate::domain::{TrackDetail, TrackId};
use std::collections::HashMap;

/// Track id → detail mapping consulted before any detail network call.
#[derive(Debug, Clone, Default)]
pub struct ResultCache {
    entries: HashMap<TrackId, TrackDetail>,
}

impl ResultCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached detail for `key`, if any.
    #[must_use]
    pub fn get(&self, key: TrackId) -> Option<&TrackDetail> {
        self.entries.get(&key)
    }

    /// Inserts `value` under `key`, replacing any previous entry.
    pub fn put(&mut self, key: TrackId, value: TrackDetail) {
        let replaced = self.entries.insert(key, value).is_some();
        tracing::trace!(track_id = key, replaced = replaced, size = self.entries.len(), "cache put");
    }

    #[must_use]
    pub fn contains(&self, key: TrackId) -> bool {
        self.entries.contains_key(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
