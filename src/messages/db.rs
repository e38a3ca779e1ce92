//! Database operations for the message log
//!
//! Messages are immutable once appended. Reads fetch newest-first so page
//! 1 is always the most recent window, then reverse each page so clients
//! render oldest-to-newest. Ties on `created_at` fall back to insertion
//! order via rowid.

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use crate::error::AppError;
use crate::model::{datetime_from_millis, MessageType, MessageView, RoomMessage, UserSummary};
use crate::sanitize;
use crate::users;

/// Append a message to a room's log
///
/// The insert and the room's `updated_at` bump share one transaction;
/// a message never lands in a room that was deleted concurrently.
pub async fn append_message(
    pool: &SqlitePool,
    room_id: &str,
    author_id: &str,
    content: &str,
    message_type: Option<MessageType>,
) -> Result<MessageView, AppError> {
    if author_id.trim().is_empty() {
        return Err(AppError::validation("Message author is required"));
    }

    let content = sanitize::clean(content);
    if content.is_empty() {
        return Err(AppError::validation("Message content is required"));
    }

    let message_type = message_type.unwrap_or_default();
    let message_id = Uuid::new_v4().to_string();
    let now = Utc::now().timestamp_millis();

    let mut tx = pool.begin().await?;

    let room_exists = sqlx::query("SELECT 1 FROM rooms WHERE id = ?")
        .bind(room_id)
        .fetch_optional(&mut *tx)
        .await?
        .is_some();
    if !room_exists {
        return Err(AppError::not_found("Room not found"));
    }

    sqlx::query(
        r#"
        INSERT INTO room_messages (id, room_id, author_id, content, message_type, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&message_id)
    .bind(room_id)
    .bind(author_id)
    .bind(&content)
    .bind(message_type.as_str())
    .bind(now)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE rooms SET updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(room_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    let author = users::db::get_user_summary(pool, author_id)
        .await?
        .unwrap_or_else(|| UserSummary::missing(author_id));

    let message = RoomMessage {
        id: message_id,
        room_id: room_id.to_string(),
        author_id: author_id.to_string(),
        content,
        message_type,
        created_at: datetime_from_millis(now),
    };

    Ok(message.into_view(author))
}

/// One page of a room's log, oldest-to-newest within the page
///
/// Page 1 holds the most recent messages. An unknown room simply yields
/// an empty page; history reads carry no existence check. Page
/// arithmetic saturates at the integer ceiling.
pub async fn list_messages(
    pool: &SqlitePool,
    room_id: &str,
    page: i64,
    limit: i64,
) -> Result<Vec<MessageView>, AppError> {
    let page = page.max(1);
    let limit = limit.max(1);
    let offset = (page - 1).saturating_mul(limit);

    let rows = sqlx::query(
        r#"
        SELECT id, room_id, author_id, content, message_type, created_at
        FROM room_messages
        WHERE room_id = ?
        ORDER BY created_at DESC, rowid DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(room_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let messages: Vec<RoomMessage> = rows.iter().map(message_from_row).collect();

    let mut author_ids: Vec<String> = messages.iter().map(|m| m.author_id.clone()).collect();
    author_ids.sort();
    author_ids.dedup();
    let authors = users::db::get_user_summaries(pool, &author_ids).await?;

    let mut views: Vec<MessageView> = messages
        .into_iter()
        .map(|message| {
            let author = authors
                .get(&message.author_id)
                .cloned()
                .unwrap_or_else(|| UserSummary::missing(&message.author_id));
            message.into_view(author)
        })
        .collect();

    // Fetched newest-first for stable pagination; delivered oldest-first.
    views.reverse();

    Ok(views)
}

/// Remove every message in a room
///
/// Runs on the caller's transaction so the room delete cascade stays
/// atomic. Returns the number of rows removed.
pub async fn delete_room_messages(
    conn: &mut sqlx::SqliteConnection,
    room_id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM room_messages WHERE room_id = ?")
        .bind(room_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

fn message_from_row(row: &SqliteRow) -> RoomMessage {
    RoomMessage {
        id: row.get("id"),
        room_id: row.get("room_id"),
        author_id: row.get("author_id"),
        content: row.get("content"),
        message_type: MessageType::from_str(row.get::<String, _>("message_type").as_str())
            .unwrap_or_default(),
        created_at: datetime_from_millis(row.get("created_at")),
    }
}
