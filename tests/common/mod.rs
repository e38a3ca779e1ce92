//! Shared test fixtures
//!
//! Every suite runs against a private in-memory SQLite database with the
//! real migrations applied, and the real router on top of it.

#![allow(dead_code)]

use std::str::FromStr;

use axum_test::TestServer;
use huddle::{routes::create_router, AppState};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// In-memory SQLite pool with the schema applied
///
/// A single connection keeps every query on the same in-memory database;
/// extra connections would each see their own empty one. Foreign keys are
/// on, matching the server pool.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Failed to parse database URL")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database pool");

    huddle::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Seed a user directory row so reads resolve a real profile
pub async fn seed_user(pool: &SqlitePool, id: &str, display_name: &str, avatar_url: &str) {
    huddle::users::db::upsert_user(pool, id, display_name, avatar_url)
        .await
        .expect("Failed to seed user");
}

/// Test server over the full router, plus the state behind it
pub async fn test_server() -> (TestServer, AppState) {
    let state = AppState::new(test_pool().await);
    let server =
        TestServer::new(create_router(state.clone())).expect("Failed to start test server");

    (server, state)
}

/// Like `test_server`, but over a real HTTP transport for websockets
pub async fn test_ws_server() -> (TestServer, AppState) {
    let state = AppState::new(test_pool().await);
    let server = TestServer::builder()
        .http_transport()
        .build(create_router(state.clone()))
        .expect("Failed to start test server");

    (server, state)
}
