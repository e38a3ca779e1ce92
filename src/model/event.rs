//! Realtime Socket Events
//!
//! Wire vocabulary for the websocket endpoint. Frames are adjacently
//! tagged JSON, e.g.:
//!
//! ```json
//! {"event": "join_room", "data": {"roomId": "abc"}}
//! ```
//!
//! Event names match what the web client already emits and listens for,
//! so `ClientEvent` covers inbound frames and `ServerEvent` outbound ones.

use serde::{Deserialize, Serialize};

use crate::model::message::{MessageType, MessageView};

/// Events a client may send over the socket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    /// Subscribe to a room channel and announce the join
    JoinRoom { room_id: String },
    /// Unsubscribe from a room channel and announce the leave
    LeaveRoom { room_id: String },
    /// Append a message to a room log and fan it out
    SendMessage {
        room_id: String,
        author: String,
        content: String,
        message_type: Option<MessageType>,
    },
    /// Subscribe to a blog post channel
    JoinBlogPost { post_id: String },
    /// Unsubscribe from a blog post channel
    LeaveBlogPost { post_id: String },
    /// Relay an already-persisted comment to a blog post channel
    NewComment {
        post_id: String,
        comment: serde_json::Value,
    },
    /// Relay updated vote counts to a blog post channel
    VoteUpdate {
        post_id: String,
        upvotes: i64,
        downvotes: i64,
        #[serde(rename = "type")]
        vote_type: String,
    },
    /// Subscribe to a user's notification channel
    SubscribeNotifications { user_id: String },
    /// Unsubscribe from a user's notification channel
    UnsubscribeNotifications { user_id: String },
}

/// Events the server pushes to subscribed connections
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// Another connection joined the room
    UserJoined {
        room_id: String,
        connection_id: String,
    },
    /// Another connection left the room
    UserLeft {
        room_id: String,
        connection_id: String,
    },
    /// A message was appended to the room log
    ReceiveMessage(MessageView),
    /// A comment was added to the blog post
    CommentAdded(serde_json::Value),
    /// Vote counts changed on the blog post
    VoteChanged {
        post_id: String,
        upvotes: i64,
        downvotes: i64,
        #[serde(rename = "type")]
        vote_type: String,
    },
    /// A notification for the subscribed user
    NewNotification(serde_json::Value),
    /// An operation requested by this connection failed
    Error { message: String },
}
