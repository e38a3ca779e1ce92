//! Room Message Data Structures
//!
//! A room message is an immutable, append-only log entry. There is no edit
//! or delete operation; rows only disappear when their room is deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::user::UserSummary;

/// Rendering hint for a message body
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Plain chat text
    Text,
    /// Code snippet, rendered monospaced
    Code,
    /// Service-generated notice
    System,
}

impl Default for MessageType {
    fn default() -> Self {
        MessageType::Text
    }
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Code => "code",
            MessageType::System => "system",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(MessageType::Text),
            "code" => Some(MessageType::Code),
            "system" => Some(MessageType::System),
            _ => None,
        }
    }
}

/// A message row as stored in the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMessage {
    /// Unique message ID
    pub id: String,
    /// Room this message belongs to
    pub room_id: String,
    /// Gateway user ID of the author
    pub author_id: String,
    /// Sanitized message body
    pub content: String,
    /// Rendering hint
    pub message_type: MessageType,
    /// When the message was appended
    pub created_at: DateTime<Utc>,
}

impl RoomMessage {
    /// Pair the stored row with a resolved author profile
    pub fn into_view(self, author: UserSummary) -> MessageView {
        MessageView {
            id: self.id,
            room_id: self.room_id,
            author,
            content: self.content,
            message_type: self.message_type,
            created_at: self.created_at,
        }
    }
}

/// A message as returned to clients, with the author resolved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    /// Unique message ID
    pub id: String,
    /// Room this message belongs to
    pub room_id: String,
    /// Resolved author profile
    pub author: UserSummary,
    /// Sanitized message body
    pub content: String,
    /// Rendering hint
    pub message_type: MessageType,
    /// When the message was appended
    pub created_at: DateTime<Utc>,
}
