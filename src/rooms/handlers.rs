//! Room HTTP Handlers
//!
//! This module contains the HTTP handlers mounted under `/api/rooms`.
//! Handlers stay thin: parse the request, call into the store, shape the
//! response. Domain rules live in `rooms::db` and `messages::db`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;

use super::db;
use crate::error::AppError;
use crate::messages;
use crate::model::{
    CreateRoomRequest, ListRoomsResponse, MembershipRequest, MessageView, RoomDetail, RoomView,
    ROOM_DETAIL_MESSAGE_LIMIT,
};

/// Default page size for the room directory
const DEFAULT_ROOM_PAGE_SIZE: i64 = 20;

/// Default page size for message history
const DEFAULT_MESSAGE_PAGE_SIZE: i64 = 50;

/// Query parameters for `GET /api/rooms`
#[derive(Debug, Deserialize)]
pub struct ListRoomsParams {
    pub search: Option<String>,
    /// Comma-separated tag filter, any-match
    pub tags: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Query parameters for `GET /api/rooms/{id}/messages`
#[derive(Debug, Deserialize)]
pub struct ListMessagesParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Create a room
pub async fn create_room(
    State(pool): State<SqlitePool>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomView>), AppError> {
    let room = db::create_room(&pool, request).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// List public rooms with search, tag filter, and pagination
pub async fn list_rooms(
    State(pool): State<SqlitePool>,
    Query(params): Query<ListRoomsParams>,
) -> Result<Json<ListRoomsResponse>, AppError> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_ROOM_PAGE_SIZE);
    let tags = split_tags(params.tags.as_deref());

    let (rooms, total_pages) =
        db::list_rooms(&pool, params.search.as_deref(), &tags, page, limit).await?;

    Ok(Json(ListRoomsResponse { rooms, total_pages }))
}

/// Fetch one room with its most recent messages embedded
pub async fn get_room(
    State(pool): State<SqlitePool>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetail>, AppError> {
    let room = db::get_room_view(&pool, &room_id).await?;
    let messages =
        messages::db::list_messages(&pool, &room_id, 1, ROOM_DETAIL_MESSAGE_LIMIT).await?;

    Ok(Json(RoomDetail { room, messages }))
}

/// Join a room
pub async fn join_room(
    State(pool): State<SqlitePool>,
    Path(room_id): Path<String>,
    Json(request): Json<MembershipRequest>,
) -> Result<Json<RoomView>, AppError> {
    let room = db::join_room(&pool, &room_id, &request.user_id).await?;
    Ok(Json(room))
}

/// Leave a room
pub async fn leave_room(
    State(pool): State<SqlitePool>,
    Path(room_id): Path<String>,
    Json(request): Json<MembershipRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    db::leave_room(&pool, &room_id, &request.user_id).await?;
    Ok(Json(json!({ "message": "Left room successfully" })))
}

/// Delete a room and its message log
pub async fn delete_room(
    State(pool): State<SqlitePool>,
    Path(room_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    db::delete_room(&pool, &room_id).await?;
    Ok(Json(json!({ "message": "Room deleted successfully" })))
}

/// Paginated message history, oldest-to-newest within the page
pub async fn get_room_messages(
    State(pool): State<SqlitePool>,
    Path(room_id): Path<String>,
    Query(params): Query<ListMessagesParams>,
) -> Result<Json<Vec<MessageView>>, AppError> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_MESSAGE_PAGE_SIZE);

    let messages = messages::db::list_messages(&pool, &room_id, page, limit).await?;
    Ok(Json(messages))
}

fn split_tags(tags: Option<&str>) -> Vec<String> {
    tags.map(|raw| {
        raw.split(',')
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags(None), Vec::<String>::new());
        assert_eq!(split_tags(Some("")), Vec::<String>::new());
        assert_eq!(
            split_tags(Some("rust, async ,,web")),
            vec!["rust".to_string(), "async".to_string(), "web".to_string()]
        );
    }
}
