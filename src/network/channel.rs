//! Dispatch Channel Boundary
//!
//! The transport to the backend is supplied by the embedding application;
//! the core only needs to hand it requests and to be fed the inbound events
//! it produces. Sends are fire-and-forget: a successful `send` means the
//! transport accepted the request, not that session state has changed.
//! Resulting changes arrive later as [`InboundEvent`]s, delivered one at a
//! time.

use crate::network::request::ActionRequest;
use crate::session::state::SessionState;

/// Outbound half of the backend connection.
pub trait DispatchChannel {
    /// Deliver a request to the backend.
    ///
    /// A transport or backend rejection surfaces here; local session state
    /// is never touched by a failed send. Retrying is the caller's choice.
    fn send(&self, request: &ActionRequest) -> Result<(), DispatchError>;
}

/// Push notification delivered by the backend connection.
#[derive(Clone, Debug, PartialEq)]
pub enum InboundEvent {
    /// A full session snapshot, to be applied wholesale.
    StateUpdated(SessionState),
    /// The session's game has started.
    SessionStarted,
}

/// A request did not make it to the backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DispatchError {
    /// The transport or backend rejected the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The connection is gone.
    #[error("dispatch channel is closed")]
    Closed,
}
