//! Presentation layer: display-ready projections of application state.
//!
//! Rendering itself (widgets, styling, routing) belongs to the embedding UI.
//! This layer only computes what to show.
//!
//! ```text
//! AppState → compute_grid_view / compute_detail_view → GridView / DetailView
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types
//! - [`helpers`]: Text, date, and price formatting

pub mod helpers;
pub mod viewmodel;

pub use viewmodel::{CardView, DetailView, GridView};
