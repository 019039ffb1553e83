//! WebSocket message types: envelope and commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for events.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Builds a server message with a fresh id and the current time.
    #[must_use]
    pub fn server(msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Builds a reply that echoes the request id.
    #[must_use]
    pub fn reply(id: String, msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id,
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Builds an error reply.
    #[must_use]
    pub fn error(id: String, code: u16, message: &str) -> Self {
        Self::reply(
            id,
            WsMessageType::Error,
            serde_json::json!({ "code": code, "message": message }),
        )
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast event.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands carried in the payload of a [`WsMessageType::Command`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Receive these event types. `"*"` selects all.
    Subscribe {
        /// Event type names, e.g. `"sample_collected"`.
        events: Vec<String>,
    },
    /// Stop receiving these event types. `"*"` selects all.
    Unsubscribe {
        /// Event type names.
        events: Vec<String>,
    },
    /// Run a collection now and reply with its summary.
    Refresh,
    /// Reply with the latest stored node status.
    GetStatus,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn command_parses_from_payload() {
        let payload = serde_json::json!({ "command": "subscribe", "events": ["*"] });
        let Ok(WsCommand::Subscribe { events }) = serde_json::from_value(payload) else {
            panic!("expected subscribe");
        };
        assert_eq!(events, vec!["*".to_string()]);

        let payload = serde_json::json!({ "command": "get_status" });
        assert!(matches!(
            serde_json::from_value::<WsCommand>(payload),
            Ok(WsCommand::GetStatus)
        ));
    }

    #[test]
    fn error_reply_keeps_id() {
        let msg = WsMessage::error("req-1".to_string(), 400, "malformed JSON");
        assert_eq!(msg.id, "req-1");
        assert_eq!(msg.msg_type, WsMessageType::Error);
        assert_eq!(msg.payload["code"], 400);
    }
}
