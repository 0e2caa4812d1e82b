//! Session Snapshot Types
//!
//! Shapes of the server-owned session state as seen by the client.
//! Snapshots are always complete and applied wholesale; the client never
//! patches individual fields. Field names follow the backend's JSON
//! (camelCase).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// =============================================================================
// PHASE
// =============================================================================

/// Coarse lifecycle stage of a session.
///
/// Ordered so that lifecycle progression is a comparison:
/// `Lobby < Active < Ended`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Players and bots are still joining.
    #[default]
    Lobby,
    /// The game is running; the roster is frozen.
    Active,
    /// The game is over. Terminal.
    Ended,
}

// =============================================================================
// PLAYERS
// =============================================================================

/// Whether a participant is controlled by a person or by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// A person at a client.
    Human,
    /// A backend-controlled participant.
    Bot,
}

/// Behavioral category assigned to a bot participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotArchetype {
    /// Plays uniformly at random.
    Random,
    /// Plays from card statistics.
    Statistical,
    /// No behavior assigned yet.
    None,
}

/// One participant in a session roster.
///
/// The display name is the participant's identity inside the roster and
/// must be unique within a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    /// Unique display name.
    pub display_name: String,
    /// Human or bot.
    pub kind: PlayerKind,
    /// Archetype, present only when `kind` is [`PlayerKind::Bot`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_archetype: Option<BotArchetype>,
}

impl PlayerInfo {
    /// A human participant.
    pub fn human(display_name: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            kind: PlayerKind::Human,
            bot_archetype: None,
        }
    }

    /// A bot participant with its archetype.
    pub fn bot(display_name: &str, archetype: BotArchetype) -> Self {
        Self {
            display_name: display_name.to_string(),
            kind: PlayerKind::Bot,
            bot_archetype: Some(archetype),
        }
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Complete, self-consistent description of a session at one point in time.
///
/// Player order is join order and stays stable across snapshots of the same
/// session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Opaque identifier, stable for the session lifetime.
    pub session_id: String,
    /// Current lifecycle stage.
    pub phase: GamePhase,
    /// Participants in join order.
    #[serde(default)]
    pub players: Vec<PlayerInfo>,
}

impl SessionState {
    /// An empty snapshot for the given session and phase.
    pub fn new(session_id: &str, phase: GamePhase) -> Self {
        Self {
            session_id: session_id.to_string(),
            phase,
            players: Vec::new(),
        }
    }

    /// Decode and validate a snapshot from JSON.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self =
            serde_json::from_str(raw).map_err(|e| SnapshotError::Malformed(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check well-formedness.
    ///
    /// A snapshot that fails here is rejected at the store boundary and
    /// never replaces held state.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.session_id.trim().is_empty() {
            return Err(SnapshotError::MissingSessionId);
        }

        let mut seen = BTreeSet::new();
        for player in &self.players {
            if player.display_name.trim().is_empty() {
                return Err(SnapshotError::UnnamedPlayer);
            }
            if !seen.insert(player.display_name.as_str()) {
                return Err(SnapshotError::DuplicatePlayer(player.display_name.clone()));
            }
            if player.kind == PlayerKind::Human && player.bot_archetype.is_some() {
                return Err(SnapshotError::ArchetypeOnHuman(player.display_name.clone()));
            }
        }

        Ok(())
    }
}

/// Why an inbound snapshot was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot carries no session identifier.
    #[error("snapshot has no session id")]
    MissingSessionId,

    /// A roster entry has an empty display name.
    #[error("snapshot roster has a player with no display name")]
    UnnamedPlayer,

    /// Two roster entries share a display name.
    #[error("duplicate player in roster: {0}")]
    DuplicatePlayer(String),

    /// A human roster entry carries a bot archetype.
    #[error("player {0} is human but carries a bot archetype")]
    ArchetypeOnHuman(String),

    /// The raw payload could not be decoded at all.
    #[error("snapshot could not be decoded: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lobby_snapshot() -> SessionState {
        SessionState {
            session_id: "g1".to_string(),
            phase: GamePhase::Lobby,
            players: vec![
                PlayerInfo::human("Antje"),
                PlayerInfo::bot("DT", BotArchetype::Random),
            ],
        }
    }

    #[test]
    fn test_valid_snapshot_passes() {
        assert!(lobby_snapshot().validate().is_ok());
    }

    #[test]
    fn test_missing_session_id_rejected() {
        let mut snapshot = lobby_snapshot();
        snapshot.session_id = "  ".to_string();
        assert_eq!(snapshot.validate(), Err(SnapshotError::MissingSessionId));
    }

    #[test]
    fn test_duplicate_player_rejected() {
        let mut snapshot = lobby_snapshot();
        snapshot.players.push(PlayerInfo::human("Antje"));
        assert_eq!(
            snapshot.validate(),
            Err(SnapshotError::DuplicatePlayer("Antje".to_string()))
        );
    }

    #[test]
    fn test_archetype_on_human_rejected() {
        let mut snapshot = lobby_snapshot();
        snapshot.players[0].bot_archetype = Some(BotArchetype::Statistical);
        assert_eq!(
            snapshot.validate(),
            Err(SnapshotError::ArchetypeOnHuman("Antje".to_string()))
        );
    }

    #[test]
    fn test_phase_ordering_matches_lifecycle() {
        assert!(GamePhase::Lobby < GamePhase::Active);
        assert!(GamePhase::Active < GamePhase::Ended);
    }

    #[test]
    fn test_json_wire_shape() {
        let json = serde_json::to_string(&lobby_snapshot()).unwrap();
        assert!(json.contains("\"sessionId\":\"g1\""));
        assert!(json.contains("\"phase\":\"lobby\""));
        assert!(json.contains("\"displayName\":\"DT\""));
        assert!(json.contains("\"botArchetype\":\"random\""));
        // Humans carry no archetype field at all
        assert!(!json.contains("\"botArchetype\":null"));
    }

    #[test]
    fn test_from_json_round_trip() {
        let snapshot = lobby_snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(SessionState::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_from_json_rejects_missing_phase() {
        let err = SessionState::from_json(r#"{"sessionId":"g1","players":[]}"#).unwrap_err();
        assert!(matches!(err, SnapshotError::Malformed(_)));
    }
}
