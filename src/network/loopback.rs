//! Loopback Channel
//!
//! In-process [`DispatchChannel`] that plays the backend's part: accepted
//! requests mutate a miniature session and produce the inbound events a
//! real connection would push. Events queue until the caller drains them,
//! which keeps delivery asynchronous relative to `send`, exactly like the
//! real transport. Used by the demo binary and integration-style tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use tracing::debug;

use crate::network::channel::{DispatchChannel, DispatchError, InboundEvent};
use crate::network::request::ActionRequest;
use crate::session::state::{GamePhase, PlayerInfo, SessionState};

#[derive(Default)]
struct Inner {
    session: Option<SessionState>,
    queue: VecDeque<InboundEvent>,
    fail_next: Option<DispatchError>,
    sent: Vec<ActionRequest>,
}

/// Backend stand-in speaking the engine's own request/event language.
#[derive(Default)]
pub struct LoopbackChannel {
    inner: RefCell<Inner>,
}

impl LoopbackChannel {
    /// Create a channel with no session yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all queued inbound events, oldest first.
    pub fn drain_events(&self) -> Vec<InboundEvent> {
        self.inner.borrow_mut().queue.drain(..).collect()
    }

    /// Make the next `send` fail with the given error.
    pub fn fail_next_send(&self, error: DispatchError) {
        self.inner.borrow_mut().fail_next = Some(error);
    }

    /// Every request accepted so far, in order.
    pub fn sent_requests(&self) -> Vec<ActionRequest> {
        self.inner.borrow().sent.clone()
    }
}

impl DispatchChannel for LoopbackChannel {
    fn send(&self, request: &ActionRequest) -> Result<(), DispatchError> {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        if let Some(error) = inner.fail_next.take() {
            return Err(error);
        }
        inner.sent.push(request.clone());

        match request {
            ActionRequest::Join {
                session_id,
                actor_name,
                payload,
            } => {
                let session = inner
                    .session
                    .get_or_insert_with(|| SessionState::new(session_id, GamePhase::Lobby));
                let player = match payload {
                    Some(p) => PlayerInfo::bot(actor_name, p.bot_archetype),
                    None => PlayerInfo::human(actor_name),
                };
                debug!(participant = %actor_name, "loopback join");
                session.players.push(player);
                let snapshot = session.clone();
                inner.queue.push_back(InboundEvent::StateUpdated(snapshot));
            }
            ActionRequest::Start { session_id, .. } => {
                let session = inner
                    .session
                    .get_or_insert_with(|| SessionState::new(session_id, GamePhase::Lobby));
                session.phase = GamePhase::Active;
                let snapshot = session.clone();
                debug!(session_id = %snapshot.session_id, "loopback start");
                inner.queue.push_back(InboundEvent::SessionStarted);
                inner.queue.push_back(InboundEvent::StateUpdated(snapshot));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::request::JoinPayload;
    use crate::session::state::BotArchetype;

    #[test]
    fn test_join_emits_grown_snapshot() {
        let channel = LoopbackChannel::new();
        channel
            .send(&ActionRequest::join("g1", "Antje", None).unwrap())
            .unwrap();
        channel
            .send(&ActionRequest::join("g1", "DT", Some(JoinPayload::bot(BotArchetype::Random))).unwrap())
            .unwrap();

        let events = channel.drain_events();
        assert_eq!(events.len(), 2);
        match &events[1] {
            InboundEvent::StateUpdated(snapshot) => {
                assert_eq!(snapshot.players.len(), 2);
                assert_eq!(snapshot.players[1].display_name, "DT");
            }
            other => panic!("unexpected event: {other:?}"),
        }
        // Queue is emptied by the drain.
        assert!(channel.drain_events().is_empty());
    }

    #[test]
    fn test_start_emits_signal_then_active_snapshot() {
        let channel = LoopbackChannel::new();
        channel
            .send(&ActionRequest::start("g1", "Antje").unwrap())
            .unwrap();

        let events = channel.drain_events();
        assert_eq!(events[0], InboundEvent::SessionStarted);
        match &events[1] {
            InboundEvent::StateUpdated(snapshot) => {
                assert_eq!(snapshot.phase, GamePhase::Active)
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_injected_failure_hits_next_send_only() {
        let channel = LoopbackChannel::new();
        channel.fail_next_send(DispatchError::Closed);

        let request = ActionRequest::join("g1", "Antje", None).unwrap();
        assert!(matches!(
            channel.send(&request),
            Err(DispatchError::Closed)
        ));
        // Failed sends record nothing and emit nothing.
        assert!(channel.sent_requests().is_empty());
        assert!(channel.drain_events().is_empty());

        channel.send(&request).unwrap();
        assert_eq!(channel.sent_requests().len(), 1);
    }
}
