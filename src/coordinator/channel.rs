//! Request channels with latest-wins sequencing.
//!
//! A [`Channel`] is an independent request/response slot (search or detail). Each
//! request issued on a channel gets a fresh, monotonically increasing
//! [`RequestId`] and moves the channel to [`RequestState::Pending`]. A response
//! may only be applied while the channel is still pending on that exact id; any
//! other response is stale and must be discarded.

/// Sequence number of a request on a channel.
pub type RequestId = u64;

/// Current state of a channel.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Pending(RequestId),
    Succeeded(T),
    Failed(String),
}

/// One logical request slot.
#[derive(Debug, Clone)]
pub struct Channel<T> {
    name: &'static str,
    last_issued: RequestId,
    state: RequestState<T>,
}

impl<T: Clone> Channel<T> {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            last_issued: 0,
            state: RequestState::Idle,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn state(&self) -> &RequestState<T> {
        &self.state
    }

    /// Issues a new request, superseding whatever was in flight.
    pub fn begin(&mut self) -> RequestId {
        self.last_issued += 1;
        let request_id = self.last_issued;
        if let RequestState::Pending(previous) = self.state {
            tracing::debug!(channel = self.name, superseded = previous, request_id = request_id, "request superseded");
        }
        self.state = RequestState::Pending(request_id);
        request_id
    }

    /// Whether a response for `request_id` may still be applied.
    #[must_use]
    pub fn is_current(&self, request_id: RequestId) -> bool {
        matches!(self.state, RequestState::Pending(current) if current == request_id)
    }

    /// Records the outcome of `request_id`.
    ///
    /// Returns `false`, leaving the channel untouched, when the response is
    /// stale.
    pub fn resolve(&mut self, request_id: RequestId, outcome: &std::result::Result<T, String>) -> bool {
        if !self.is_current(request_id) {
            tracing::debug!(channel = self.name, request_id = request_id, state = ?self.state_kind(), "discarding stale response");
            return false;
        }
        self.state = match outcome {
            Ok(value) => RequestState::Succeeded(value.clone()),
            Err(message) => RequestState::Failed(message.clone()),
        };
        true
    }

    /// Marks the channel succeeded without issuing a request.
    ///
    /// Used for cache hits: no id is consumed, but any request still in flight
    /// stops being current.
    pub fn settle(&mut self, value: T) {
        self.state = RequestState::Succeeded(value);
    }

    /// Returns the channel to idle; in-flight responses become stale.
    pub fn reset(&mut self) {
        self.state = RequestState::Idle;
    }

    const fn state_kind(&self) -> &'static str {
        match self.state {
            RequestState::Idle => "idle",
            RequestState::Pending(_) => "pending",
            RequestState::Succeeded(_) => "succeeded",
            RequestState::Failed(_) => "failed",
        }
    }
}
