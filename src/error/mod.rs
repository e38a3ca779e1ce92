//! Service Error Module
//!
//! This module defines the error taxonomy for the room and messaging
//! service. Every failure a handler or store operation can produce maps
//! onto one of these variants, and each variant maps onto exactly one
//! HTTP status.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Error Types
//!
//! - `Validation` - Malformed or missing request input (400)
//! - `NotFound` - Referenced entity does not exist (404)
//! - `Capacity` - Room is at its member cap (400)
//! - `Forbidden` - Operation not allowed for this user (400)
//! - `Store` - Underlying sqlx failure (500, detail kept out of the body)

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::AppError;
