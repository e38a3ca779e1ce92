//! Application State Management
//!
//! This module defines the application state structure and implements
//! the `FromRef` traits for Axum state extraction.
//!
//! # Architecture
//!
//! `AppState` is the central state container, holding:
//! - The SQLite connection pool
//! - The realtime channel broker
//!
//! # Thread Safety
//!
//! Both fields are cheaply cloneable handles over shared interiors:
//! `SqlitePool` is a pool handle, and `ChannelBroker` wraps its channel
//! table in `Arc<Mutex<..>>`.
//!
//! # State Extraction
//!
//! The `FromRef` implementations let handlers extract just the part of
//! the state they use: the REST handlers take `State<SqlitePool>`, the
//! socket handler takes the whole `State<AppState>`.

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::realtime::ChannelBroker;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,

    /// Realtime channel broker
    ///
    /// Subscription table for rooms, blog posts, and notification feeds.
    /// Socket tasks register their outbound queues here.
    pub broker: ChannelBroker,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            broker: ChannelBroker::new(),
        }
    }
}

/// Implement FromRef for the connection pool
///
/// This allows handlers to take `State<SqlitePool>` directly instead of
/// the entire `AppState`.
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pool.clone()
    }
}

/// Implement FromRef for the channel broker
impl FromRef<AppState> for ChannelBroker {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.broker.clone()
    }
}
