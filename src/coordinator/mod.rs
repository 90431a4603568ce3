//! Request coordination between the UI layer and the search API.
//!
//! # Modules
//!
//! - [`channel`]: Latest-wins request slots
//! - [`handler`]: The [`RequestCoordinator`] itself
//! - [`messages`]: Emissions delivered to subscribers

pub mod channel;
pub mod handler;
pub mod messages;

pub use channel::{Channel, RequestId, RequestState};
pub use handler::RequestCoordinator;
pub use messages::Emission;
