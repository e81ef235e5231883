//! Message records the client sends and the relay events it displays.

use chrono::{DateTime, Utc};
use famchat_server::infrastructure::dto::websocket::{
    ConnectedMessage, NewMessage, ServerEventEnvelope, ServerEventType, UserTypingMessage,
};
use famchat_shared::time::now_millis;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use uuid::Uuid;

/// Message record carried as the `relay-broadcast` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: String,
    pub content: String,
    pub sender: String,
    /// Unix milliseconds (UTC)
    pub created_at: i64,
}

impl ChatRecord {
    pub fn new(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            sender: sender.into(),
            created_at: now_millis(),
        }
    }

    pub fn to_raw(&self) -> Result<Box<RawValue>, serde_json::Error> {
        serde_json::value::to_raw_value(self)
    }
}

/// A relay frame as the client shows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    Connected { connection_id: String },
    Chat(ChatRecord),
    /// A `new-message` whose payload is not a [`ChatRecord`]
    Other { payload: String },
    Typing { user: String },
}

impl RelayEvent {
    pub fn parse(frame: &str) -> Result<Self, serde_json::Error> {
        let envelope: ServerEventEnvelope = serde_json::from_str(frame)?;
        match envelope.r#type {
            ServerEventType::Connected => {
                let msg: ConnectedMessage = serde_json::from_str(frame)?;
                Ok(Self::Connected {
                    connection_id: msg.connection_id,
                })
            }
            ServerEventType::NewMessage => {
                let msg: NewMessage = serde_json::from_str(frame)?;
                Ok(match serde_json::from_str::<ChatRecord>(msg.payload.get()) {
                    Ok(record) => Self::Chat(record),
                    Err(_) => Self::Other {
                        payload: msg.payload.get().to_string(),
                    },
                })
            }
            ServerEventType::UserTyping => {
                let msg: UserTypingMessage = serde_json::from_str(frame)?;
                Ok(Self::Typing { user: msg.user })
            }
        }
    }
}

/// One line for the terminal: `[12:34:56] Carlos: hi`
pub fn format_chat_line(record: &ChatRecord) -> String {
    let time = DateTime::<Utc>::from_timestamp_millis(record.created_at)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());
    format!("[{time}] {}: {}", record.sender, record.content)
}
