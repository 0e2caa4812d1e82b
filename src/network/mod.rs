//! Backend Boundary
//!
//! Typed requests to the backend, the dispatch channel interface, and the
//! inbound events it delivers. The wire format belongs to the backend; this
//! layer only guarantees that outgoing requests are well-formed.

pub mod channel;
pub mod loopback;
pub mod request;

pub use channel::{DispatchChannel, DispatchError, InboundEvent};
pub use loopback::LoopbackChannel;
pub use request::{ActionRequest, JoinPayload, RequestError};
