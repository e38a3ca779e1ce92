//! Room Directory Module
//!
//! Rooms are the unit of membership and conversation. This module owns
//! the room lifecycle (create, list, fetch, join, leave, delete) and the
//! REST handlers exposing it:
//!
//! - `db` - Store operations and membership rules
//! - `handlers` - HTTP handlers mounted under `/api/rooms`

pub mod db;
pub mod handlers;
