//! Session Engine
//!
//! Facade owning one session's client-side state: the snapshot store, the
//! phase controller, the bot roster and the dispatch channel handle. Created
//! when the client enters a session, dropped when it leaves; there is no
//! ambient global session.
//!
//! Control flow: UI intent → request construction → dispatch channel →
//! (async) inbound event → store update → phase controller → UI
//! notifications.

use std::rc::Rc;

use tracing::info;

use crate::cache::{keys, CacheAdapter, CacheError};
use crate::network::channel::{DispatchChannel, DispatchError, InboundEvent};
use crate::network::request::{ActionRequest, JoinPayload, RequestError};
use crate::roster::{archetype_for, BotRoster, RosterError};
use crate::session::phase::PhaseController;
use crate::session::state::{GamePhase, SessionState, SnapshotError};
use crate::session::store::{Listeners, SessionStore, SubscriptionId};

// =============================================================================
// SESSION HANDLE
// =============================================================================

/// Identity a session engine is created with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionHandle {
    /// Session the client has entered.
    pub session_id: String,
    /// Logged-in player's display name.
    pub username: String,
}

impl SessionHandle {
    /// Handle for a known session and user.
    pub fn new(session_id: &str, username: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            username: username.to_string(),
        }
    }

    /// Restore the handle persisted by a previous visit.
    ///
    /// Both keys must be present and non-empty; otherwise the caller should
    /// route the user back through login.
    pub fn restore(cache: &dyn CacheAdapter) -> Option<Self> {
        let session_id = cache.get(keys::SESSION_ID)?;
        let username = cache.get(keys::USERNAME)?;
        if session_id.trim().is_empty() || username.trim().is_empty() {
            return None;
        }
        Some(Self {
            session_id,
            username,
        })
    }

    /// Persist the handle for the next visit.
    pub fn persist(&self, cache: &dyn CacheAdapter) -> Result<(), CacheError> {
        cache.set(keys::SESSION_ID, &self.session_id)?;
        cache.set(keys::USERNAME, &self.username)
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// Anything a session engine operation can fail with.
///
/// Nothing here is fatal; every failure is recoverable by retrying or by
/// surfacing a message to the user.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Intent validation failed before any send.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The transport or backend rejected a request.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// No bot names left to claim.
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// An inbound snapshot was malformed and rejected.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// One session's client-side sync and dispatch core.
pub struct SessionEngine {
    handle: SessionHandle,
    store: SessionStore,
    phase: PhaseController,
    roster: BotRoster,
    channel: Rc<dyn DispatchChannel>,
    phase_listeners: Listeners<GamePhase>,
}

impl SessionEngine {
    /// Create the engine for one session.
    ///
    /// The store and roster load their persisted state from `cache`; the
    /// phase controller starts in [`GamePhase::Lobby`].
    pub fn new(
        handle: SessionHandle,
        cache: Rc<dyn CacheAdapter>,
        channel: Rc<dyn DispatchChannel>,
    ) -> Self {
        Self {
            handle,
            store: SessionStore::new(cache.clone()),
            phase: PhaseController::new(),
            roster: BotRoster::new(cache),
            channel,
            phase_listeners: Listeners::new(),
        }
    }

    /// Identity this engine was created with.
    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    /// Best-known session snapshot, live or cached.
    pub fn current_state(&self) -> Option<SessionState> {
        self.store.current()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> GamePhase {
        self.phase.phase()
    }

    /// Bot identities still available to claim.
    pub fn roster(&self) -> &BotRoster {
        &self.roster
    }

    // -------------------------------------------------------------------------
    // Intents
    // -------------------------------------------------------------------------

    /// Ask the backend to start the game.
    ///
    /// Fire-and-forget: the phase does not change here. The transition
    /// arrives later as a `sessionStarted` signal or an `Active` snapshot.
    pub fn start_game(&mut self) -> Result<(), EngineError> {
        let request = ActionRequest::start(&self.handle.session_id, &self.handle.username)?;
        self.channel.send(&request)?;
        info!(session_id = %self.handle.session_id, "start request dispatched");
        Ok(())
    }

    /// Claim a bot name and ask the backend to add the bot to the roster.
    ///
    /// Returns the claimed display name. A transport rejection releases the
    /// name back into the pool, so local state ends up untouched; an
    /// exhausted pool fails before anything is sent.
    pub fn add_bot(&mut self, descriptor: &str) -> Result<String, EngineError> {
        let name = self.roster.claim_name()?;
        let payload = JoinPayload::bot(archetype_for(descriptor));

        let request = match ActionRequest::join(&self.handle.session_id, &name, Some(payload)) {
            Ok(request) => request,
            Err(err) => {
                self.roster.release_name(name);
                return Err(err.into());
            }
        };
        if let Err(err) = self.channel.send(&request) {
            self.roster.release_name(name);
            return Err(err.into());
        }

        info!(bot = %name, archetype = ?payload.bot_archetype, "join request dispatched");
        Ok(name)
    }

    // -------------------------------------------------------------------------
    // Inbound events
    // -------------------------------------------------------------------------

    /// Process one inbound event to completion.
    ///
    /// Events must be fed one at a time; all subscriber notifications a
    /// snapshot triggers finish before this returns. A rejected snapshot
    /// surfaces here and changes nothing.
    pub fn handle_event(&mut self, event: InboundEvent) -> Result<(), EngineError> {
        match event {
            InboundEvent::StateUpdated(snapshot) => {
                let next_phase = snapshot.phase;
                let _report = self.store.apply_snapshot(snapshot)?;
                if let Some(changed) = self.phase.observe_phase(next_phase) {
                    self.phase_listeners.notify(&changed);
                }
            }
            InboundEvent::SessionStarted => {
                if let Some(changed) = self.phase.session_started() {
                    self.phase_listeners.notify(&changed);
                }
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    /// Register a snapshot listener on the store.
    pub fn subscribe_state(
        &mut self,
        handler: impl FnMut(&SessionState) + 'static,
    ) -> SubscriptionId {
        self.store.subscribe(handler)
    }

    /// Remove a snapshot listener.
    pub fn unsubscribe_state(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Register a phase-change listener.
    pub fn on_phase_changed(
        &mut self,
        handler: impl FnMut(&GamePhase) + 'static,
    ) -> SubscriptionId {
        self.phase_listeners.subscribe(handler)
    }

    /// Remove a phase-change listener.
    pub fn unsubscribe_phase(&mut self, id: SubscriptionId) -> bool {
        self.phase_listeners.unsubscribe(id)
    }
}
