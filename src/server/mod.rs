//! Server Module
//!
//! This module contains the code for initializing and configuring the
//! Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs   - Module exports and documentation
//! ├── state.rs - AppState and FromRef implementations
//! ├── config.rs - Configuration loading from the environment
//! └── init.rs  - Pool setup, migrations, and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env`
//! 2. **Store Setup**: pool connection and embedded migrations
//! 3. **State Creation**: connection pool plus channel broker
//! 4. **Router Creation**: routes and CORS

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::ServerConfig;
pub use init::create_app;
pub use state::AppState;
