//! Infrastructure layer for timers and filesystem interactions.
//!
//! # Modules
//!
//! - [`debounce`]: Keyed trailing-edge debouncer on the tokio runtime
//! - [`paths`]: Data directory and configured path resolution

pub mod debounce;
pub mod paths;

pub use debounce::Debouncer;
pub use paths::{data_dir, expand_tilde, resolve_trace_file};
