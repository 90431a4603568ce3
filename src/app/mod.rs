//! Application layer: state, actions, and UI event handling.
//!
//! # Architecture
//!
//! Data flows in one direction:
//!
//! ```text
//! UI Event → Frontend → Debouncer → RequestCoordinator → Action → AppState::reduce
//!                                          │
//!                                          └──→ Emission (broadcast) → UI
//! ```
//!
//! # Modules
//!
//! - [`actions`]: State transitions understood by the reducer
//! - [`handler`]: Page events and the [`Frontend`] entry point
//! - [`state`]: State snapshot, reducer, selectors, and view model computation
//!
//! # Example
//!
//! ```rust
//! use tunegrid::app::{Action, StateStore};
//!
//! let mut store = StateStore::new();
//! store.dispatch(&Action::SearchRequested("Alag Aasmaan".to_string()));
//! assert!(store.state().is_loading());
//! ```

pub mod actions;
pub mod handler;
pub mod state;

pub use actions::Action;
pub use handler::{Event, Frontend};
pub use state::{AppState, StateStore};
