//! Huddle - Main Library
//!
//! Huddle is the room and messaging core of a community platform: a room
//! directory with capacity-bounded membership, an append-only message log
//! per room, and a websocket broker that fans live events out to room,
//! blog post, and notification channels.
//!
//! # Overview
//!
//! This library provides:
//! - Room lifecycle: create, list, fetch, join, leave, delete
//! - Append-only message history with stable pagination
//! - Realtime fan-out over a single multiplexed websocket
//! - Read-time resolution of user IDs into display profiles
//!
//! # Module Structure
//!
//! - **`model`** - Wire and storage data structures
//! - **`error`** - Error taxonomy and HTTP conversion
//! - **`sanitize`** - HTML stripping that preserves fenced code blocks
//! - **`rooms`** - Room directory store and REST handlers
//! - **`messages`** - Message log store
//! - **`users`** - User directory read-side
//! - **`realtime`** - Channel broker and websocket endpoint
//! - **`routes`** - Router assembly
//! - **`server`** - Configuration, state, and initialization
//!
//! # Usage
//!
//! ```rust,no_run
//! use huddle::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env();
//! let app = create_app(&config).await?;
//! // Serve app with Axum
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod messages;
pub mod model;
pub mod realtime;
pub mod rooms;
pub mod routes;
pub mod sanitize;
pub mod server;
pub mod users;

/// Embedded schema migrations, shared by the server and the test suites
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

// Re-export the types most callers touch
pub use error::AppError;
pub use realtime::{ChannelBroker, ChannelId};
pub use server::state::AppState;
