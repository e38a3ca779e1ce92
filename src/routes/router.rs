//! Router Configuration
//!
//! This module provides the router creation function wiring every
//! endpoint to its handler.
//!
//! # Route Order
//!
//! 1. Room API routes under `/api/rooms`
//! 2. The websocket upgrade at `/ws`
//! 3. Fallback handler (404)

use axum::http::StatusCode;
use axum::Router;

use crate::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state (connection pool and channel broker)
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new()
        .route(
            "/api/rooms",
            axum::routing::get({
                use crate::rooms::handlers::list_rooms;
                list_rooms
            })
            .post({
                use crate::rooms::handlers::create_room;
                create_room
            }),
        )
        .route(
            "/api/rooms/{id}",
            axum::routing::get({
                use crate::rooms::handlers::get_room;
                get_room
            })
            .delete({
                use crate::rooms::handlers::delete_room;
                delete_room
            }),
        )
        .route(
            "/api/rooms/{id}/join",
            axum::routing::post({
                use crate::rooms::handlers::join_room;
                join_room
            }),
        )
        .route(
            "/api/rooms/{id}/leave",
            axum::routing::post({
                use crate::rooms::handlers::leave_room;
                leave_room
            }),
        )
        .route(
            "/api/rooms/{id}/messages",
            axum::routing::get({
                use crate::rooms::handlers::get_room_messages;
                get_room_messages
            }),
        )
        .route(
            "/ws",
            axum::routing::get({
                use crate::realtime::socket::ws_handler;
                ws_handler
            }),
        );

    // Fallback handler for 404
    let router = router.fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") });

    router.with_state(app_state)
}
