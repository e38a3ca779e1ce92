//! Server Configuration
//!
//! This module loads server configuration from environment variables,
//! with sensible defaults for local development.
//!
//! # Configuration Sources
//!
//! - `SERVER_PORT` - TCP port to listen on (default 5000)
//! - `DATABASE_URL` - SQLite connection string (default `sqlite://huddle.db?mode=rwc`)
//! - `FRONTEND_URL` - Allowed CORS origin (default `http://localhost:5173`)
//!
//! # Error Handling
//!
//! Malformed values fall back to their defaults with a warning rather
//! than aborting startup.

/// Default SQLite database, created on first run
pub const DEFAULT_DATABASE_URL: &str = "sqlite://huddle.db?mode=rwc";

/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Default frontend origin for CORS
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

/// Runtime configuration loaded once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to listen on
    pub port: u16,
    /// SQLite connection string
    pub database_url: String,
    /// Allowed CORS origin for the web frontend
    pub frontend_url: String,
}

impl ServerConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Self {
        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!("SERVER_PORT {:?} is not a valid port, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string());

        Self {
            port,
            database_url,
            frontend_url,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
        }
    }
}
