//! Shared Data Structures
//!
//! This module contains the data structures shared across the service:
//!
//! - `UserSummary` - Resolved user profile embedded in payloads
//! - `Room`, `RoomView`, `RoomDetail` - Room entity and response shapes
//! - `RoomMessage`, `MessageView`, `MessageType` - Message log entries
//! - `ClientEvent`, `ServerEvent` - Realtime socket vocabulary

pub mod event;
pub mod message;
pub mod room;
pub mod user;

use chrono::{DateTime, Utc};

/// Decode a stored epoch-milliseconds timestamp.
///
/// Timestamps are persisted as INTEGER millis so range scans order
/// numerically; out-of-range values clamp to the epoch rather than fail
/// a read.
pub(crate) fn datetime_from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
}

// Re-export all types
pub use event::{ClientEvent, ServerEvent};
pub use message::{MessageType, MessageView, RoomMessage};
pub use room::{
    CreateRoomRequest, ListRoomsResponse, MembershipRequest, Room, RoomDetail, RoomView,
    DEFAULT_MAX_MEMBERS, ROOM_DETAIL_MESSAGE_LIMIT,
};
pub use user::UserSummary;
