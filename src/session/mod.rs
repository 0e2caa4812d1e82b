//! Session State and Lifecycle
//!
//! Everything the client knows about one game session: the snapshot shapes,
//! the store holding the best-known snapshot, the phase state machine, and
//! the engine facade that ties them to the backend boundary.

pub mod engine;
pub mod phase;
pub mod state;
pub mod store;

pub use engine::{EngineError, SessionEngine, SessionHandle};
pub use phase::PhaseController;
pub use state::{BotArchetype, GamePhase, PlayerInfo, PlayerKind, SessionState, SnapshotError};
pub use store::{ApplyReport, SessionStore, SubscriptionId};
