use serde::Serialize;
use sqlx::types::Json;
use sqlx::{FromRow, SqlitePool};
use time::OffsetDateTime;

use crate::entries::dto::NewEntry;

/// One journaling record. `apps` and `tags` live as JSON text in the entries
/// table and must round-trip without losing order or duplicates.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: i64,
    pub user_id: i64,
    #[sqlx(json)]
    pub apps: Vec<String>,
    pub screen_time: i64,
    pub reflection: String,
    #[sqlx(json)]
    pub tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Append one row. Entries are never updated or deleted.
pub async fn insert(
    db: &SqlitePool,
    user_id: i64,
    entry: &NewEntry,
    created_at: OffsetDateTime,
) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO entries (user_id, apps, screen_time, reflection, tags, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(Json(&entry.apps))
    .bind(entry.screen_time)
    .bind(&entry.reflection)
    .bind(Json(&entry.tags))
    .bind(created_at)
    .fetch_one(db)
    .await
}

/// All of one user's entries, newest first.
pub async fn list_by_user(db: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<Entry>> {
    sqlx::query_as::<_, Entry>(
        r#"
        SELECT id, user_id, apps, screen_time, reflection, tags, created_at
        FROM entries
        WHERE user_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}
