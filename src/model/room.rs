//! Room Data Structures
//!
//! This module contains the room entity plus the request and response
//! shapes used by the room REST endpoints:
//!
//! - `Room` - A room row as stored
//! - `RoomView` - A room with creator, members, and tags resolved
//! - `RoomDetail` - `RoomView` plus the most recent messages
//! - `CreateRoomRequest` / `MembershipRequest` / `ListRoomsResponse`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::message::MessageView;
use crate::model::user::UserSummary;

/// Default member cap applied when a create request does not set one
pub const DEFAULT_MAX_MEMBERS: i64 = 50;

/// Number of recent messages embedded in a room detail payload
pub const ROOM_DETAIL_MESSAGE_LIMIT: i64 = 100;

/// A room row as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Unique room ID
    pub id: String,
    /// Room name shown in the directory
    pub name: String,
    /// Sanitized room description
    pub description: String,
    /// Gateway user ID of the creator
    pub creator_id: String,
    /// Whether the room is listed in the public directory
    pub is_public: bool,
    /// Maximum number of members, always at least 1
    pub max_members: i64,
    /// When the room was created
    pub created_at: DateTime<Utc>,
    /// When the room last changed (membership or message append)
    pub updated_at: DateTime<Utc>,
}

/// A room as returned to clients, with user references resolved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    /// Unique room ID
    pub id: String,
    /// Room name
    pub name: String,
    /// Room description
    pub description: String,
    /// Resolved creator profile
    pub creator: UserSummary,
    /// Resolved member profiles in join order
    pub members: Vec<UserSummary>,
    /// Whether the room is listed in the public directory
    pub is_public: bool,
    /// Maximum number of members
    pub max_members: i64,
    /// Discovery tags in insertion order
    pub tags: Vec<String>,
    /// When the room was created
    pub created_at: DateTime<Utc>,
    /// When the room last changed
    pub updated_at: DateTime<Utc>,
}

/// A room view plus its most recent messages, oldest first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomDetail {
    #[serde(flatten)]
    pub room: RoomView,
    pub messages: Vec<MessageView>,
}

/// Body of `POST /api/rooms`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    /// Room name, required and non-blank
    pub name: String,
    /// Optional description, sanitized before storage
    pub description: Option<String>,
    /// Gateway user ID of the creator
    pub creator: String,
    /// Defaults to true when omitted
    pub is_public: Option<bool>,
    /// Defaults to 50 when omitted, must be at least 1
    pub max_members: Option<i64>,
    /// Discovery tags, blank entries dropped
    pub tags: Option<Vec<String>>,
}

/// Body of `POST /api/rooms/{id}/join` and `POST /api/rooms/{id}/leave`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRequest {
    /// Gateway user ID of the joining or leaving user
    pub user_id: String,
}

/// Response of `GET /api/rooms`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRoomsResponse {
    /// One page of public rooms, newest first
    pub rooms: Vec<RoomView>,
    /// Total page count for the active filter
    pub total_pages: i64,
}
