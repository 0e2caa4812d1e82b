//! Local Cache Boundary
//!
//! The client keeps a handful of values (identity, last-known session
//! snapshot, bot name pool) in a key-value cache that survives reloads.
//! The cache itself belongs to the embedding application; this module only
//! defines the interface the core consumes, plus an in-memory implementation
//! for demos and tests.

pub mod memory;

pub use memory::MemoryCache;

/// Cache keys used by the core.
pub mod keys {
    /// Logged-in player's display name.
    pub const USERNAME: &str = "username";
    /// Identifier of the session the client last entered.
    pub const SESSION_ID: &str = "sessionId";
    /// JSON-encoded last-known session snapshot.
    pub const GAME_STATE: &str = "gameState";
    /// JSON-encoded ordered pool of unused bot names.
    pub const BOT_NAMES: &str = "botNames";
}

/// Key-value cache consumed by the core.
///
/// Writes are overwrite-last-wins with no versioning; the cache is a
/// best-effort convenience, never the authority on session state. Methods
/// take `&self` (local-storage semantics) so one adapter can be shared via
/// `Rc` by every component that needs it.
pub trait CacheAdapter {
    /// Look up a value. Absent keys return `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
}

/// Cache adapter failures.
///
/// All cache failures are non-fatal to the core; callers log them and
/// carry on with in-memory state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// The adapter rejected the write (quota, I/O, ...).
    #[error("cache write rejected: {0}")]
    WriteRejected(String),

    /// The value could not be encoded for storage.
    #[error("cache value could not be encoded: {0}")]
    Encode(String),
}
