//! Action Requests
//!
//! Typed intents sent to the backend. Construction is pure and validates
//! inputs up front, so a malformed intent never reaches the dispatch
//! channel. The wire shape is the backend's JSON: a lowercase `type` tag
//! with camelCase fields.

use serde::{Deserialize, Serialize};

use crate::session::state::BotArchetype;

/// Structured data attached to a `join` request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinPayload {
    /// Archetype the joining bot should play as.
    pub bot_archetype: BotArchetype,
}

impl JoinPayload {
    /// Payload for a bot join.
    pub fn bot(bot_archetype: BotArchetype) -> Self {
        Self { bot_archetype }
    }
}

/// A well-formed request to the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActionRequest {
    /// Start the session's game. `actor_name` is the requesting human.
    #[serde(rename_all = "camelCase")]
    Start {
        /// Target session.
        session_id: String,
        /// The human requesting the start.
        actor_name: String,
    },

    /// Add a participant to the session roster.
    #[serde(rename_all = "camelCase")]
    Join {
        /// Target session.
        session_id: String,
        /// Display name of the new participant.
        actor_name: String,
        /// Bot metadata; absent for human joins.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload: Option<JoinPayload>,
    },
}

impl ActionRequest {
    /// Build a `start` request.
    pub fn start(session_id: &str, actor_name: &str) -> Result<Self, RequestError> {
        if actor_name.trim().is_empty() {
            return Err(RequestError::MissingActor);
        }
        Ok(Self::Start {
            session_id: session_id.to_string(),
            actor_name: actor_name.to_string(),
        })
    }

    /// Build a `join` request.
    pub fn join(
        session_id: &str,
        actor_name: &str,
        payload: Option<JoinPayload>,
    ) -> Result<Self, RequestError> {
        if actor_name.trim().is_empty() {
            return Err(RequestError::MissingParticipant);
        }
        Ok(Self::Join {
            session_id: session_id.to_string(),
            actor_name: actor_name.to_string(),
            payload,
        })
    }

    /// Session the request targets.
    pub fn session_id(&self) -> &str {
        match self {
            Self::Start { session_id, .. } | Self::Join { session_id, .. } => session_id,
        }
    }

    /// Name of the acting or joining participant.
    pub fn actor_name(&self) -> &str {
        match self {
            Self::Start { actor_name, .. } | Self::Join { actor_name, .. } => actor_name,
        }
    }
}

/// Why a request could not be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// A start request needs a non-empty actor name.
    #[error("start request needs an actor name")]
    MissingActor,

    /// A join request needs a non-empty participant name.
    #[error("join request needs a participant name")]
    MissingParticipant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_request_shape() {
        let request = ActionRequest::start("g1", "Antje").unwrap();
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"type":"start","sessionId":"g1","actorName":"Antje"}"#
        );
    }

    #[test]
    fn test_join_request_carries_payload() {
        let payload = JoinPayload::bot(BotArchetype::Statistical);
        let request = ActionRequest::join("g1", "DT", Some(payload)).unwrap();
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"type":"join","sessionId":"g1","actorName":"DT","payload":{"botArchetype":"statistical"}}"#
        );
    }

    #[test]
    fn test_human_join_omits_payload() {
        let request = ActionRequest::join("g1", "Antje", None).unwrap();
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("payload"));
    }

    #[test]
    fn test_start_rejects_empty_actor() {
        assert_eq!(
            ActionRequest::start("g1", ""),
            Err(RequestError::MissingActor)
        );
        assert_eq!(
            ActionRequest::start("g1", "   "),
            Err(RequestError::MissingActor)
        );
    }

    #[test]
    fn test_join_rejects_empty_participant() {
        assert_eq!(
            ActionRequest::join("g1", "", None),
            Err(RequestError::MissingParticipant)
        );
    }

    #[test]
    fn test_accessors() {
        let request = ActionRequest::join("g1", "DT", None).unwrap();
        assert_eq!(request.session_id(), "g1");
        assert_eq!(request.actor_name(), "DT");
    }
}
