//! Database operations for rooms
//!
//! This module contains the store side of the room directory: CRUD,
//! membership, and the read-time joins that resolve creator and member
//! IDs into profiles.
//!
//! Membership rules live here rather than in the handlers because they
//! must hold inside the same transaction that mutates the tables. SQLite
//! serializes writers, so `COUNT(members) <= max_members` checked inside
//! a transaction is a hard invariant, not a best effort.

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::error::AppError;
use crate::messages;
use crate::model::{
    datetime_from_millis, CreateRoomRequest, Room, RoomView, UserSummary, DEFAULT_MAX_MEMBERS,
};
use crate::sanitize;
use crate::users;

/// Create a room; the creator is automatically its first member
pub async fn create_room(pool: &SqlitePool, req: CreateRoomRequest) -> Result<RoomView, AppError> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::validation("Room name is required"));
    }
    if req.creator.trim().is_empty() {
        return Err(AppError::validation("Room creator is required"));
    }

    let max_members = req.max_members.unwrap_or(DEFAULT_MAX_MEMBERS);
    if max_members < 1 {
        return Err(AppError::validation("maxMembers must be at least 1"));
    }

    let description = sanitize::clean(req.description.as_deref().unwrap_or(""));
    let is_public = req.is_public.unwrap_or(true);
    let tags: Vec<String> = req
        .tags
        .unwrap_or_default()
        .iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();

    let room_id = Uuid::new_v4().to_string();
    let now = Utc::now().timestamp_millis();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO rooms (id, name, description, creator_id, is_public, max_members, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&room_id)
    .bind(&name)
    .bind(&description)
    .bind(&req.creator)
    .bind(is_public)
    .bind(max_members)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO room_members (room_id, user_id, joined_at) VALUES (?, ?, ?)")
        .bind(&room_id)
        .bind(&req.creator)
        .bind(now)
        .execute(&mut *tx)
        .await?;

    for tag in &tags {
        sqlx::query("INSERT OR IGNORE INTO room_tags (room_id, tag) VALUES (?, ?)")
            .bind(&room_id)
            .bind(tag)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::info!(room_id = %room_id, creator = %req.creator, "room created");

    get_room_view(pool, &room_id).await
}

/// Fetch a room row, `None` when the ID does not exist
pub async fn fetch_room(pool: &SqlitePool, room_id: &str) -> Result<Option<Room>, AppError> {
    let row = sqlx::query(
        r#"
        SELECT id, name, description, creator_id, is_public, max_members, created_at, updated_at
        FROM rooms
        WHERE id = ?
        "#,
    )
    .bind(room_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| room_from_row(&r)))
}

/// Fetch a room with creator, members, and tags resolved
pub async fn get_room_view(pool: &SqlitePool, room_id: &str) -> Result<RoomView, AppError> {
    let room = fetch_room(pool, room_id)
        .await?
        .ok_or_else(|| AppError::not_found("Room not found"))?;

    resolve_room_view(pool, &room).await
}

/// List public rooms with optional name search and tag filter
///
/// `search` is a case-insensitive substring match on the name; `tags`
/// matches rooms carrying at least one of the given tags. Returns the
/// requested page (newest rooms first) and the total page count for the
/// active filter. Page arithmetic saturates at the integer ceiling.
pub async fn list_rooms(
    pool: &SqlitePool,
    search: Option<&str>,
    tags: &[String],
    page: i64,
    limit: i64,
) -> Result<(Vec<RoomView>, i64), AppError> {
    let page = page.max(1);
    let limit = limit.max(1);
    let offset = (page - 1).saturating_mul(limit);

    let search = search.map(str::trim).filter(|term| !term.is_empty());

    let mut count_query: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT COUNT(*) AS count FROM rooms");
    push_list_filters(&mut count_query, search, tags);
    let total: i64 = count_query.build().fetch_one(pool).await?.get("count");
    let total_pages = total.saturating_add(limit - 1) / limit;

    let mut page_query: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT id, name, description, creator_id, is_public, max_members, created_at, updated_at FROM rooms",
    );
    push_list_filters(&mut page_query, search, tags);
    page_query.push(" ORDER BY created_at DESC, rowid DESC LIMIT ");
    page_query.push_bind(limit);
    page_query.push(" OFFSET ");
    page_query.push_bind(offset);

    let rows = page_query.build().fetch_all(pool).await?;

    let mut rooms = Vec::with_capacity(rows.len());
    for row in &rows {
        let room = room_from_row(row);
        rooms.push(resolve_room_view(pool, &room).await?);
    }

    Ok((rooms, total_pages))
}

/// Add a user to a room, idempotently
///
/// Capacity is checked before the idempotency check, so a full room
/// rejects the request even for a user who is already a member.
pub async fn join_room(
    pool: &SqlitePool,
    room_id: &str,
    user_id: &str,
) -> Result<RoomView, AppError> {
    if user_id.trim().is_empty() {
        return Err(AppError::validation("userId is required"));
    }

    let now = Utc::now().timestamp_millis();
    let mut tx = pool.begin().await?;

    let room = sqlx::query("SELECT max_members FROM rooms WHERE id = ?")
        .bind(room_id)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(room) = room else {
        return Err(AppError::not_found("Room not found"));
    };
    let max_members: i64 = room.get("max_members");

    let member_count: i64 =
        sqlx::query("SELECT COUNT(*) AS count FROM room_members WHERE room_id = ?")
            .bind(room_id)
            .fetch_one(&mut *tx)
            .await?
            .get("count");

    if member_count >= max_members {
        return Err(AppError::capacity("Room is full"));
    }

    let already_member = sqlx::query("SELECT 1 FROM room_members WHERE room_id = ? AND user_id = ?")
        .bind(room_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .is_some();

    if !already_member {
        sqlx::query("INSERT INTO room_members (room_id, user_id, joined_at) VALUES (?, ?, ?)")
            .bind(room_id)
            .bind(user_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE rooms SET updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(room_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    get_room_view(pool, room_id).await
}

/// Remove a user from a room
///
/// The creator cannot leave; leaving a room the user is not in succeeds
/// without changing anything.
pub async fn leave_room(pool: &SqlitePool, room_id: &str, user_id: &str) -> Result<(), AppError> {
    let now = Utc::now().timestamp_millis();
    let mut tx = pool.begin().await?;

    let room = sqlx::query("SELECT creator_id FROM rooms WHERE id = ?")
        .bind(room_id)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(room) = room else {
        return Err(AppError::not_found("Room not found"));
    };
    let creator_id: String = room.get("creator_id");

    if creator_id == user_id {
        return Err(AppError::forbidden("Creator cannot leave the room"));
    }

    let removed = sqlx::query("DELETE FROM room_members WHERE room_id = ? AND user_id = ?")
        .bind(room_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if removed > 0 {
        sqlx::query("UPDATE rooms SET updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(room_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Delete a room and everything hanging off it
///
/// Messages go first, then the room row; members and tags cascade with
/// the room. One transaction, so a crash can never leave orphan messages.
pub async fn delete_room(pool: &SqlitePool, room_id: &str) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let exists = sqlx::query("SELECT 1 FROM rooms WHERE id = ?")
        .bind(room_id)
        .fetch_optional(&mut *tx)
        .await?
        .is_some();
    if !exists {
        return Err(AppError::not_found("Room not found"));
    }

    let removed = messages::db::delete_room_messages(&mut tx, room_id).await?;
    sqlx::query("DELETE FROM rooms WHERE id = ?")
        .bind(room_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(room_id = %room_id, messages = removed, "room deleted");
    Ok(())
}

/// Resolve a room row into its client-facing view
async fn resolve_room_view(pool: &SqlitePool, room: &Room) -> Result<RoomView, AppError> {
    let member_ids = member_ids(pool, &room.id).await?;
    let tags = tag_list(pool, &room.id).await?;

    let mut lookup_ids = member_ids.clone();
    if !lookup_ids.contains(&room.creator_id) {
        lookup_ids.push(room.creator_id.clone());
    }
    let summaries = users::db::get_user_summaries(pool, &lookup_ids).await?;

    let creator = summaries
        .get(&room.creator_id)
        .cloned()
        .unwrap_or_else(|| UserSummary::missing(&room.creator_id));
    let members = member_ids
        .iter()
        .map(|id| {
            summaries
                .get(id)
                .cloned()
                .unwrap_or_else(|| UserSummary::missing(id))
        })
        .collect();

    Ok(RoomView {
        id: room.id.clone(),
        name: room.name.clone(),
        description: room.description.clone(),
        creator,
        members,
        is_public: room.is_public,
        max_members: room.max_members,
        tags,
        created_at: room.created_at,
        updated_at: room.updated_at,
    })
}

/// Member IDs in join order
async fn member_ids(pool: &SqlitePool, room_id: &str) -> Result<Vec<String>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT user_id FROM room_members WHERE room_id = ? ORDER BY joined_at ASC, rowid ASC",
    )
    .bind(room_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|row| row.get("user_id")).collect())
}

/// Tags in insertion order
async fn tag_list(pool: &SqlitePool, room_id: &str) -> Result<Vec<String>, sqlx::Error> {
    let rows = sqlx::query("SELECT tag FROM room_tags WHERE room_id = ? ORDER BY rowid ASC")
        .bind(room_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|row| row.get("tag")).collect())
}

fn room_from_row(row: &SqliteRow) -> Room {
    Room {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        creator_id: row.get("creator_id"),
        is_public: row.get("is_public"),
        max_members: row.get("max_members"),
        created_at: datetime_from_millis(row.get("created_at")),
        updated_at: datetime_from_millis(row.get("updated_at")),
    }
}

/// Shared WHERE clause for the list and count queries
fn push_list_filters<'a>(
    query: &mut QueryBuilder<'a, Sqlite>,
    search: Option<&'a str>,
    tags: &'a [String],
) {
    query.push(" WHERE is_public = 1");

    if let Some(term) = search {
        query.push(" AND name LIKE ");
        query.push_bind(format!("%{}%", escape_like(term)));
        query.push(" ESCAPE '\\'");
    }

    if !tags.is_empty() {
        query.push(
            " AND EXISTS (SELECT 1 FROM room_tags WHERE room_tags.room_id = rooms.id AND room_tags.tag IN (",
        );
        let mut list = query.separated(", ");
        for tag in tags {
            list.push_bind(tag.as_str());
        }
        query.push("))");
    }
}

fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
