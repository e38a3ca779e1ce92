//! Route Configuration Module
//!
//! This module assembles all HTTP routes for the server.
//!
//! # Route Organization
//!
//! ## Room API
//!
//! - `GET /api/rooms` - List public rooms (search, tags, pagination)
//! - `POST /api/rooms` - Create a room
//! - `GET /api/rooms/{id}` - Room detail with recent messages
//! - `DELETE /api/rooms/{id}` - Delete a room and its messages
//! - `POST /api/rooms/{id}/join` - Join a room
//! - `POST /api/rooms/{id}/leave` - Leave a room
//! - `GET /api/rooms/{id}/messages` - Paginated message history
//!
//! ## Realtime
//!
//! - `GET /ws` - Websocket upgrade for live events
//!
//! ## Fallback
//!
//! Unknown routes return 404.

/// Main router creation
pub mod router;

// Re-export commonly used functions
pub use router::create_router;
