//! Error Conversion
//!
//! This module converts service errors into HTTP responses so handlers
//! can return `Result<_, AppError>` directly.
//!
//! # Response Format
//!
//! Error responses are JSON with the shape the web client expects:
//!
//! ```json
//! {
//!   "message": "Room is full"
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::types::AppError;

impl IntoResponse for AppError {
    /// Convert a service error into an HTTP response
    ///
    /// Domain errors expose their message as-is. Store errors are logged
    /// with full detail here and the client only sees a generic body.
    fn into_response(self) -> Response {
        if let AppError::Store(err) = &self {
            tracing::error!("storage error: {err}");
        }

        let status = self.status_code();
        let body = Json(json!({ "message": self.message() }));

        (status, body).into_response()
    }
}
