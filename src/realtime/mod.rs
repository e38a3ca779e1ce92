//! Realtime Module
//!
//! Fan-out of live events over a single websocket endpoint:
//!
//! - `broker` - Named channels mapping to sets of connection queues
//! - `socket` - The `/ws` upgrade handler, read loop, and event dispatch
//!
//! A connection multiplexes any number of channels (rooms, blog posts,
//! notification feeds) over one socket; the broker tracks who is where.

pub mod broker;
pub mod socket;

pub use broker::{ChannelBroker, ChannelId};
