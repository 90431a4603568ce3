//! Storage layer for in-process data.
//!
//! Nothing here is persisted across process restarts. The only resident store is
//! the track detail cache used by the coordinator's cache-first reads.
//!
//! # Modules
//!
//! - `cache`: Track id → detail mapping

pub mod cache;

pub use cache::ResultCache;
