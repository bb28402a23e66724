/// Login session model
///
/// A session maps an opaque cookie token to a user until it expires. Only the
/// SHA-256 of the token is stored (see [`crate::auth::session`]), so a leaked
/// database cannot be replayed as cookies.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sessions (
///     token_hash TEXT    PRIMARY KEY NOT NULL,
///     user_id    INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
///     remember   BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TEXT    NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
///     expires_at TEXT    NOT NULL
/// );
/// ```
///
/// Expiry is computed and compared with the store's clock, in the same text
/// format as `created_at`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

/// Session row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Session {
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub user_id: i64,

    /// "Remember me" sessions get the long TTL and a persistent cookie
    pub remember: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Identity resolved from a live session
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SessionUser {
    pub user_id: i64,
    pub username: String,
}

/// Input for opening a session
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub token_hash: String,
    pub user_id: i64,
    pub remember: bool,

    /// Lifetime from now, in seconds
    pub ttl_seconds: i64,
}

#[derive(sqlx::FromRow)]
struct SessionLookup {
    user_id: i64,
    username: String,
    expired: bool,
}

impl Session {
    /// Opens a new session
    pub async fn create<'e, E>(executor: E, data: CreateSession) -> Result<Self, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token_hash, user_id, remember, expires_at)
            VALUES (?1, ?2, ?3, strftime('%Y-%m-%d %H:%M:%f', 'now', ?4))
            RETURNING token_hash, user_id, remember, created_at, expires_at
            "#,
        )
        .bind(data.token_hash)
        .bind(data.user_id)
        .bind(data.remember)
        .bind(format!("{:+} seconds", data.ttl_seconds))
        .fetch_one(executor)
        .await
    }

    /// Resolves a token hash to the user it belongs to
    ///
    /// Returns None for unknown or expired sessions. An expired session is
    /// deleted as a side effect.
    pub async fn resolve(
        pool: &SqlitePool,
        token_hash: &str,
    ) -> Result<Option<SessionUser>, sqlx::Error> {
        let lookup = sqlx::query_as::<_, SessionLookup>(
            r#"
            SELECT s.user_id, u.username,
                   s.expires_at <= strftime('%Y-%m-%d %H:%M:%f', 'now') AS expired
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token_hash = ?1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await?;

        match lookup {
            Some(row) if row.expired => {
                debug!(user_id = row.user_id, "Session expired, removing");
                Self::delete(pool, token_hash).await?;
                Ok(None)
            }
            Some(row) => Ok(Some(SessionUser {
                user_id: row.user_id,
                username: row.username,
            })),
            None => Ok(None),
        }
    }

    /// Deletes a session; returns true if it existed
    pub async fn delete<'e, E>(executor: E, token_hash: &str) -> Result<bool, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = ?1")
            .bind(token_hash)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes every expired session, returning how many were removed
    pub async fn delete_expired(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM sessions WHERE expires_at <= strftime('%Y-%m-%d %H:%M:%f', 'now')",
        )
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
