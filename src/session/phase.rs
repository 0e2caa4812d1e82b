//! Phase Controller
//!
//! Owns the lobby → game transition on the client. Phases only move
//! forward; observing the same phase twice is a no-op, and nothing leaves
//! [`GamePhase::Ended`].

use tracing::info;

use crate::session::state::{GamePhase, SessionState};

/// Forward-only state machine over [`GamePhase`].
///
/// Transitions are driven two ways: by inspecting applied snapshots and by
/// the explicit `sessionStarted` signal. Both paths are idempotent; a
/// transition is reported at most once per actual phase change.
#[derive(Debug, Default)]
pub struct PhaseController {
    phase: GamePhase,
}

impl PhaseController {
    /// Start in [`GamePhase::Lobby`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// React to an applied snapshot. Returns the new phase if it changed.
    pub fn observe_snapshot(&mut self, snapshot: &SessionState) -> Option<GamePhase> {
        self.observe_phase(snapshot.phase)
    }

    /// React to an observed phase. Returns the new phase if it changed.
    ///
    /// A late-joining client that first sees an `Ended` snapshot while
    /// still in `Lobby` jumps straight to `Ended`; backward observations
    /// are ignored.
    pub fn observe_phase(&mut self, next: GamePhase) -> Option<GamePhase> {
        if next <= self.phase {
            return None;
        }
        info!(from = ?self.phase, to = ?next, "session phase changed");
        self.phase = next;
        Some(next)
    }

    /// React to the backend's `sessionStarted` signal.
    ///
    /// Moves to `Active` regardless of roster size; rule validation is not
    /// this client's job.
    pub fn session_started(&mut self) -> Option<GamePhase> {
        self.observe_phase(GamePhase::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(phase: GamePhase) -> SessionState {
        SessionState::new("g1", phase)
    }

    #[test]
    fn test_starts_in_lobby() {
        assert_eq!(PhaseController::new().phase(), GamePhase::Lobby);
    }

    #[test]
    fn test_session_started_moves_to_active() {
        let mut controller = PhaseController::new();
        assert_eq!(controller.session_started(), Some(GamePhase::Active));
        assert_eq!(controller.phase(), GamePhase::Active);
    }

    #[test]
    fn test_active_snapshot_moves_to_active_once() {
        let mut controller = PhaseController::new();
        assert_eq!(
            controller.observe_snapshot(&snapshot(GamePhase::Active)),
            Some(GamePhase::Active)
        );
        // Re-applying an identical snapshot changes nothing.
        assert_eq!(controller.observe_snapshot(&snapshot(GamePhase::Active)), None);
    }

    #[test]
    fn test_signal_then_snapshot_is_idempotent() {
        let mut controller = PhaseController::new();
        assert!(controller.session_started().is_some());
        assert_eq!(controller.observe_snapshot(&snapshot(GamePhase::Active)), None);
    }

    #[test]
    fn test_ended_is_terminal() {
        let mut controller = PhaseController::new();
        controller.observe_phase(GamePhase::Active);
        assert_eq!(
            controller.observe_phase(GamePhase::Ended),
            Some(GamePhase::Ended)
        );

        // Nothing leaves Ended, whatever arrives afterwards.
        assert_eq!(controller.observe_phase(GamePhase::Ended), None);
        assert_eq!(controller.observe_phase(GamePhase::Active), None);
        assert_eq!(controller.observe_phase(GamePhase::Lobby), None);
        assert_eq!(controller.session_started(), None);
        assert_eq!(controller.phase(), GamePhase::Ended);
    }

    #[test]
    fn test_lobby_snapshot_is_noop() {
        let mut controller = PhaseController::new();
        assert_eq!(controller.observe_snapshot(&snapshot(GamePhase::Lobby)), None);
    }

    #[test]
    fn test_late_join_jumps_to_ended() {
        let mut controller = PhaseController::new();
        assert_eq!(
            controller.observe_snapshot(&snapshot(GamePhase::Ended)),
            Some(GamePhase::Ended)
        );
    }
}
