/// User model and database operations
///
/// Users exist only in the authenticated app. They are created once at
/// registration and read at login and on every authenticated request; there
/// is no update or delete path.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id            INTEGER PRIMARY KEY AUTOINCREMENT,
///     username      TEXT    NOT NULL UNIQUE,
///     email         TEXT    NOT NULL,
///     password_hash TEXT    NOT NULL,
///     created_at    TEXT    NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use itemlist_shared::models::user::{User, CreateUser};
/// use itemlist_shared::auth::password::hash_password;
///
/// # async fn example(pool: sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// let user = User::create(
///     &pool,
///     CreateUser {
///         username: "alice".to_string(),
///         email: "alice@example.com".to_string(),
///         password_hash: hash_password("pw123")?,
///     },
/// )
/// .await?;
///
/// let found = User::find_by_username(&pool, "alice").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteExecutor, SqlitePool};

/// User account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Store-assigned ID
    pub id: i64,

    /// Unique login name, matched exactly
    pub username: String,

    /// Contact address (not unique)
    pub email: String,

    /// Argon2id PHC string
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the account was registered
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password!)
    pub password_hash: String,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Fails with a unique-constraint database error if the username is taken.
    pub async fn create<'e, E>(executor: E, data: CreateUser) -> Result<Self, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES (?1, ?2, ?3)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_one(executor)
        .await
    }

    /// Finds a user by exact (case-sensitive) username
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }
}

/// Returns true if the error is a unique-constraint violation
///
/// Lets callers turn a registration race on `username` into a form error.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
