//! Message Log Module
//!
//! Append-only message storage per room. Appends arrive from the realtime
//! socket; reads serve both the paginated history endpoint and the recent
//! messages embedded in a room detail payload.

pub mod db;
