//! Service Error Types
//!
//! This module defines the error enum used by handlers and store
//! operations. Variants carry the client-facing message; constructors
//! keep call sites short.

use axum::http::StatusCode;
use thiserror::Error;

/// All failures the service reports to clients
///
/// The first four variants are domain failures whose message goes to the
/// client verbatim. `Store` wraps database errors; its detail is logged
/// server-side and never leaves the process.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing request input
    #[error("{message}")]
    Validation { message: String },

    /// Referenced room, message, or user does not exist
    #[error("{message}")]
    NotFound { message: String },

    /// Room is already at its member cap
    #[error("{message}")]
    Capacity { message: String },

    /// Operation not allowed for this user
    #[error("{message}")]
    Forbidden { message: String },

    /// Underlying database failure
    #[error("storage error: {0}")]
    Store(#[from] sqlx::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a capacity error
    pub fn capacity(message: impl Into<String>) -> Self {
        Self::Capacity {
            message: message.into(),
        }
    }

    /// Create a forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation` - 400 Bad Request
    /// - `NotFound` - 404 Not Found
    /// - `Capacity` - 400 Bad Request
    /// - `Forbidden` - 400 Bad Request
    /// - `Store` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Capacity { .. } => StatusCode::BAD_REQUEST,
            Self::Forbidden { .. } => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Store errors collapse to a fixed string; the wrapped detail is for
    /// logs only.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::NotFound { message }
            | Self::Capacity { message }
            | Self::Forbidden { message } => message.clone(),
            Self::Store(_) => "storage error".to_string(),
        }
    }
}
