//! Emissions published by the request coordinator.
//!
//! Every search or detail request that is still current when it resolves produces
//! exactly one [`Emission`]. Stale responses produce none. Emissions are returned
//! from the request futures and broadcast to every subscriber, which is how the
//! UI layer receives its result and error callbacks.

use crate::domain::{GridResult, TrackDetail};

#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    /// The current search resolved with results.
    GridSuccess(GridResult),
    /// The current search failed; carries the user-visible message.
    GridFailure(String),
    /// A detail lookup resolved, from cache or network.
    DetailSuccess(TrackDetail),
    /// The current detail lookup failed; carries the user-visible message.
    DetailFailure(String),
}

impl Emission {
    /// Whether this emission reports a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::GridFailure(_) | Self::DetailFailure(_))
    }
}
