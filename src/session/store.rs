//! Session State Store
//!
//! Holds the client's best-known session snapshot and fans out change
//! notifications. Snapshots replace held state wholesale; there is no
//! partial merge, so the held value can never be a hybrid of two server
//! states. Until the first live snapshot arrives, reads fall back to the
//! snapshot persisted in the local cache.

use std::rc::Rc;

use tracing::{debug, warn};

use crate::cache::{keys, CacheAdapter, CacheError};
use crate::session::state::{SessionState, SnapshotError};

// =============================================================================
// SUBSCRIPTIONS
// =============================================================================

/// Handle identifying one registered subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered callback registry.
///
/// Handlers run synchronously in registration order, one at a time; a
/// handler must not block indefinitely or it starves the ones after it.
pub(crate) struct Listeners<E> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn FnMut(&E)>)>,
}

impl<E> Listeners<E> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn subscribe(&mut self, handler: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(handler)));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, event: &E) {
        for (_, handler) in self.entries.iter_mut() {
            handler(event);
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Result of a successful snapshot application.
///
/// The in-memory update always succeeded; `persist_error` carries the
/// non-fatal cache write failure, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Cache write failure, if the snapshot could not be persisted.
    pub persist_error: Option<CacheError>,
}

impl ApplyReport {
    /// True if the snapshot also reached the cache.
    pub fn persisted(&self) -> bool {
        self.persist_error.is_none()
    }
}

/// Holds the current authoritative-or-cached session snapshot.
pub struct SessionStore {
    cache: Rc<dyn CacheAdapter>,
    live: Option<SessionState>,
    listeners: Listeners<SessionState>,
}

impl SessionStore {
    /// Create a store backed by the given cache.
    pub fn new(cache: Rc<dyn CacheAdapter>) -> Self {
        Self {
            cache,
            live: None,
            listeners: Listeners::new(),
        }
    }

    /// The most recent known snapshot.
    ///
    /// Falls back to the cache-persisted snapshot only while no live
    /// snapshot has been received this process lifetime. A malformed cached
    /// value is treated as absent.
    pub fn current(&self) -> Option<SessionState> {
        if let Some(live) = &self.live {
            return Some(live.clone());
        }
        self.cached_snapshot()
    }

    /// True once a live snapshot has been applied this process lifetime.
    pub fn has_live_snapshot(&self) -> bool {
        self.live.is_some()
    }

    /// Replace the held snapshot wholesale.
    ///
    /// Rejects malformed snapshots and leaves held state untouched. On
    /// acceptance the snapshot is persisted to the cache (best-effort) and
    /// every subscriber is notified exactly once, in registration order.
    pub fn apply_snapshot(&mut self, next: SessionState) -> Result<ApplyReport, SnapshotError> {
        next.validate()?;

        let persist_error = self.persist(&next).err();
        if let Some(err) = &persist_error {
            warn!(error = %err, "session snapshot accepted but not persisted");
        }

        debug!(
            session_id = %next.session_id,
            phase = ?next.phase,
            players = next.players.len(),
            "applied session snapshot"
        );

        let snapshot = next.clone();
        self.live = Some(next);
        self.listeners.notify(&snapshot);

        Ok(ApplyReport { persist_error })
    }

    /// Register a snapshot listener.
    pub fn subscribe(&mut self, handler: impl FnMut(&SessionState) + 'static) -> SubscriptionId {
        self.listeners.subscribe(handler)
    }

    /// Remove a listener. Returns false if the handle was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn persist(&self, snapshot: &SessionState) -> Result<(), CacheError> {
        let json =
            serde_json::to_string(snapshot).map_err(|e| CacheError::Encode(e.to_string()))?;
        self.cache.set(keys::GAME_STATE, &json)
    }

    fn cached_snapshot(&self) -> Option<SessionState> {
        let raw = self.cache.get(keys::GAME_STATE)?;
        match SessionState::from_json(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(error = %err, "ignoring malformed cached session snapshot");
                None
            }
        }
    }
}
