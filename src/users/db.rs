//! Database operations for the user directory
//!
//! Batch lookups keep the read-time joins in rooms and messages to one
//! query per payload instead of one per referenced user.

use std::collections::HashMap;

use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::model::UserSummary;

/// Look up a single user summary
pub async fn get_user_summary(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Option<UserSummary>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, display_name, avatar_url
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| UserSummary {
        id: r.get("id"),
        display_name: r.get("display_name"),
        avatar_url: r.get("avatar_url"),
    }))
}

/// Look up many user summaries at once, keyed by user ID
///
/// IDs with no directory row are simply absent from the map; callers fall
/// back to `UserSummary::missing`.
pub async fn get_user_summaries(
    pool: &SqlitePool,
    user_ids: &[String],
) -> Result<HashMap<String, UserSummary>, sqlx::Error> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT id, display_name, avatar_url FROM users WHERE id IN (");
    let mut ids = query.separated(", ");
    for user_id in user_ids {
        ids.push_bind(user_id);
    }
    query.push(")");

    let rows = query.build().fetch_all(pool).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let summary = UserSummary {
                id: row.get("id"),
                display_name: row.get("display_name"),
                avatar_url: row.get("avatar_url"),
            };
            (summary.id.clone(), summary)
        })
        .collect())
}

/// Insert or update a directory row
///
/// Used when the gateway pushes a profile snapshot, and by tests to seed
/// authors and members.
pub async fn upsert_user(
    pool: &SqlitePool,
    user_id: &str,
    display_name: &str,
    avatar_url: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO users (id, display_name, avatar_url)
        VALUES (?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            display_name = excluded.display_name,
            avatar_url = excluded.avatar_url
        "#,
    )
    .bind(user_id)
    .bind(display_name)
    .bind(avatar_url)
    .execute(pool)
    .await?;

    Ok(())
}
