/// Item model and database operations
///
/// Items are the only resource of both servers. In the public API every item
/// is globally visible and `user_id` is NULL; in the authenticated app every
/// query filters by the owning user.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE items (
///     id          INTEGER PRIMARY KEY AUTOINCREMENT,
///     name        TEXT    NOT NULL CHECK (length(trim(name)) > 0),
///     description TEXT,
///     created_at  TEXT    NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
///     user_id     INTEGER REFERENCES users (id)
/// );
/// ```
///
/// Write operations take any SQLite executor so callers can run them inside a
/// transaction (see [`crate::items`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteExecutor, SqlitePool};

/// Wire format of `created_at` in JSON responses and rendered pages
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Item row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    /// Store-assigned ID
    pub id: i64,

    /// Trimmed, never empty
    pub name: String,

    /// Trimmed; None instead of an empty string
    pub description: Option<String>,

    /// Set by the store's UTC clock at insert time
    pub created_at: DateTime<Utc>,

    /// Owning user (authenticated app only)
    pub user_id: Option<i64>,
}

/// Input for inserting an item
///
/// Values must already be normalized; use [`crate::items::ItemInput::validate`].
#[derive(Debug, Clone)]
pub struct CreateItem {
    pub name: String,
    pub description: Option<String>,
    pub user_id: Option<i64>,
}

impl Item {
    /// Formats `created_at` as `YYYY-MM-DD HH:MM:SS` (UTC, second precision)
    pub fn created_at_display(&self) -> String {
        self.created_at.format(CREATED_AT_FORMAT).to_string()
    }

    /// Inserts a new item and returns the stored row
    pub async fn create<'e, E>(executor: E, data: CreateItem) -> Result<Self, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, description, user_id)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, description, created_at, user_id
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.user_id)
        .fetch_one(executor)
        .await
    }

    /// Finds an item by ID and owner
    ///
    /// An item owned by someone else is reported exactly like a missing one.
    pub async fn find_owned<'e, E>(
        executor: E,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, created_at, user_id
            FROM items
            WHERE id = ?1 AND user_id = ?2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(executor)
        .await
    }

    /// Lists every item, newest first
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, created_at, user_id
            FROM items
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Lists the items owned by one user, newest first
    pub async fn list_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, created_at, user_id
            FROM items
            WHERE user_id = ?1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Overwrites name and description of an owned item
    ///
    /// Returns the updated row, or None if no item with this ID belongs to
    /// the user. `id`, `created_at` and `user_id` are never touched.
    pub async fn update_owned<'e, E>(
        executor: E,
        id: i64,
        user_id: i64,
        name: String,
        description: Option<String>,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET name = ?1, description = ?2
            WHERE id = ?3 AND user_id = ?4
            RETURNING id, name, description, created_at, user_id
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(id)
        .bind(user_id)
        .fetch_optional(executor)
        .await
    }

    /// Deletes an owned item
    ///
    /// Returns true if a row was removed.
    pub async fn delete_owned<'e, E>(executor: E, id: i64, user_id: i64) -> Result<bool, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM items WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts every item
    pub async fn count_all(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(pool)
            .await
    }

    /// Counts items whose `created_at` falls on the store's current UTC date
    pub async fn count_created_today(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE date(created_at) = date('now')")
            .fetch_one(pool)
            .await
    }
}
