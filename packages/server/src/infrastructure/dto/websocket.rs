//! WebSocket frame DTOs for the relay.
//!
//! Every frame is a JSON text frame with a kebab-case `type` field.
//! Payloads are carried as [`RawValue`] so the bytes a receiver sees are the
//! bytes the sender wrote.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use thiserror::Error;

use crate::domain::RoomKey;

/// Event types a client may send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientEventType {
    Join,
    RelayBroadcast,
    RelayTyping,
}

/// Event types the relay sends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServerEventType {
    Connected,
    NewMessage,
    UserTyping,
}

/// Raw client frame as it appears on the wire.
///
/// Fields not used by an event type are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientFrame {
    pub r#type: ClientEventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Box<RawValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ClientFrame {
    pub fn join(room: impl Into<String>) -> Self {
        Self {
            r#type: ClientEventType::Join,
            room: Some(room.into()),
            payload: None,
            user: None,
        }
    }

    pub fn relay_broadcast(room: impl Into<String>, payload: Box<RawValue>) -> Self {
        Self {
            r#type: ClientEventType::RelayBroadcast,
            room: Some(room.into()),
            payload: Some(payload),
            user: None,
        }
    }

    pub fn relay_typing(room: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            r#type: ClientEventType::RelayTyping,
            room: Some(room.into()),
            payload: None,
            user: Some(user.into()),
        }
    }
}

/// Why an incoming text frame was not understood
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame is not a valid client event: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("'{event}' frame is missing '{field}'")]
    MissingField {
        event: &'static str,
        field: &'static str,
    },
}

/// A decoded client event
#[derive(Debug, Clone)]
pub enum ClientEvent {
    Join {
        room: RoomKey,
    },
    RelayBroadcast {
        room: RoomKey,
        payload: Box<RawValue>,
    },
    RelayTyping {
        room: RoomKey,
        user: String,
    },
}

impl ClientEvent {
    /// Decode one text frame.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError`] for invalid JSON, an unknown `type`, or a
    /// missing field. A `null` payload counts as missing.
    pub fn parse(text: &str) -> Result<Self, FrameError> {
        let frame: ClientFrame = serde_json::from_str(text)?;
        Self::try_from(frame)
    }
}

impl TryFrom<ClientFrame> for ClientEvent {
    type Error = FrameError;

    fn try_from(frame: ClientFrame) -> Result<Self, Self::Error> {
        let missing = |event, field| FrameError::MissingField { event, field };

        match frame.r#type {
            ClientEventType::Join => {
                let room = frame.room.ok_or_else(|| missing("join", "room"))?;
                Ok(Self::Join {
                    room: RoomKey::from(room),
                })
            }
            ClientEventType::RelayBroadcast => {
                let room = frame.room.ok_or_else(|| missing("relay-broadcast", "room"))?;
                let payload = frame.payload.ok_or_else(|| missing("relay-broadcast", "payload"))?;
                Ok(Self::RelayBroadcast {
                    room: RoomKey::from(room),
                    payload,
                })
            }
            ClientEventType::RelayTyping => {
                let room = frame.room.ok_or_else(|| missing("relay-typing", "room"))?;
                let user = frame.user.ok_or_else(|| missing("relay-typing", "user"))?;
                Ok(Self::RelayTyping {
                    room: RoomKey::from(room),
                    user,
                })
            }
        }
    }
}

/// Only the `type` of a relay frame, for dispatching before full decoding
#[derive(Debug, Clone, Deserialize)]
pub struct ServerEventEnvelope {
    pub r#type: ServerEventType,
}

/// Greeting sent once, right after the upgrade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectedMessage {
    pub r#type: ServerEventType,
    pub connection_id: String,
}

impl ConnectedMessage {
    pub fn new(connection_id: impl Into<String>) -> Self {
        Self {
            r#type: ServerEventType::Connected,
            connection_id: connection_id.into(),
        }
    }
}

/// Relayed message record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    pub r#type: ServerEventType,
    pub room: String,
    pub payload: Box<RawValue>,
}

impl NewMessage {
    pub fn new(room: &RoomKey, payload: Box<RawValue>) -> Self {
        Self {
            r#type: ServerEventType::NewMessage,
            room: room.as_str().to_string(),
            payload,
        }
    }
}

/// "user is typing" signal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTypingMessage {
    pub r#type: ServerEventType,
    pub room: String,
    pub user: String,
}

impl UserTypingMessage {
    pub fn new(room: &RoomKey, user: impl Into<String>) -> Self {
        Self {
            r#type: ServerEventType::UserTyping,
            room: room.as_str().to_string(),
            user: user.into(),
        }
    }
}
