//! Server Initialization
//!
//! This module handles setup of the Axum HTTP server: connecting the
//! SQLite pool, running migrations, creating the application state, and
//! assembling the router with its CORS layer.
//!
//! # Initialization Process
//!
//! 1. Connect the connection pool (creating the database file if needed)
//! 2. Run embedded migrations
//! 3. Create `AppState` (pool + channel broker)
//! 4. Build the router and attach CORS

use std::str::FromStr;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;

use crate::routes::router::create_router;
use crate::server::config::ServerConfig;
use crate::server::state::AppState;

/// Open the SQLite pool for the given connection string
///
/// The database file is created on first run and foreign keys are
/// enforced on every connection.
pub async fn connect_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(16)
        .connect_with(options)
        .await
}

/// Create and configure the Axum application
pub async fn create_app(config: &ServerConfig) -> Result<Router, Box<dyn std::error::Error>> {
    tracing::info!("Initializing huddle backend server");

    // Step 1: Connect the store and bring the schema up to date
    let pool = connect_pool(&config.database_url).await?;
    crate::MIGRATOR.run(&pool).await?;
    tracing::info!("Database ready at {}", config.database_url);

    // Step 2: Create app state (pool + channel broker)
    let app_state = AppState::new(pool);

    // Step 3: Create router with all routes and the CORS layer
    let app = create_router(app_state).layer(cors_layer(&config.frontend_url));

    tracing::info!("Router configured");

    Ok(app)
}

/// CORS layer allowing the configured frontend origin
///
/// Credentialed CORS cannot use a wildcard origin, so an unparseable
/// `FRONTEND_URL` degrades to the restrictive default layer.
fn cors_layer(frontend_url: &str) -> CorsLayer {
    match frontend_url.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true),
        Err(_) => {
            tracing::warn!(
                "FRONTEND_URL {:?} is not a valid origin, denying cross-origin requests",
                frontend_url
            );
            CorsLayer::new()
        }
    }
}
