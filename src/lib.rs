//! # Wildsow Client Core
//!
//! Client-side session synchronization and action dispatch for the Wildsow
//! card game. Holds the client's best-known copy of the server-owned session
//! state, translates lobby intents into action requests, and notifies the UI
//! when the session moves between lifecycle phases.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    WILDSOW CLIENT CORE                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  session/        - Session state and lifecycle               │
//! │  ├── state.rs    - Snapshot types and validation              │
//! │  ├── store.rs    - Snapshot store with cache fallback         │
//! │  ├── phase.rs    - Lobby → Active → Ended state machine       │
//! │  └── engine.rs   - Facade wiring store, phases and intents    │
//! │                                                              │
//! │  network/        - Backend boundary                           │
//! │  ├── request.rs  - Action request construction                │
//! │  ├── channel.rs  - Dispatch channel trait, inbound events     │
//! │  └── loopback.rs - In-process channel for demos and tests     │
//! │                                                              │
//! │  cache/          - Local cache boundary                       │
//! │  roster.rs       - Bot name pool and archetype table          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cooperative Model
//!
//! The whole core runs on one logical thread:
//! - No concurrent writers to session state
//! - Inbound events are processed one at a time, to completion
//! - Subscriber callbacks run synchronously in registration order
//! - `send` is fire-and-forget; state changes arrive as inbound events
//!
//! Transport and persistent storage live behind the [`DispatchChannel`] and
//! [`CacheAdapter`] traits and are supplied by the embedding application.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cache;
pub mod network;
pub mod roster;
pub mod session;

// Re-export commonly used types
pub use cache::{CacheAdapter, CacheError, MemoryCache};
pub use network::{
    ActionRequest, DispatchChannel, DispatchError, InboundEvent, JoinPayload, LoopbackChannel,
    RequestError,
};
pub use roster::{archetype_for, BotRoster, RosterError, DEFAULT_BOT_NAMES};
pub use session::{
    ApplyReport, BotArchetype, EngineError, GamePhase, PhaseController, PlayerInfo, PlayerKind,
    SessionEngine, SessionHandle, SessionState, SessionStore, SnapshotError, SubscriptionId,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
