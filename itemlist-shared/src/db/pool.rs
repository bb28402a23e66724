/// Database connection pool management
///
/// This module builds the SQLite connection pool shared by both item list
/// servers. The database file is created on first start, foreign keys are
/// enforced on every connection, and a health check runs before the pool is
/// handed out.
///
/// # Example
///
/// ```no_run
/// use itemlist_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: "sqlite://items.db".to_string(),
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///
///     let row: (i64,) = sqlx::query_as("SELECT ?")
///         .bind(42i64)
///         .fetch_one(&pool)
///         .await?;
///
///     Ok(())
/// }
/// ```

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Configuration for the database connection pool
///
/// Timeouts are in seconds so they map directly onto environment variables.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL (e.g., "sqlite://items.db" or "sqlite::memory:")
    pub url: String,

    /// Maximum number of connections in the pool
    ///
    /// An in-memory database lives inside a single connection, so tests pin
    /// this to 1.
    pub max_connections: u32,

    /// Minimum number of idle connections to maintain
    pub min_connections: u32,

    /// Timeout for acquiring a connection from the pool (seconds)
    pub connect_timeout_seconds: u64,

    /// How long a connection can remain idle before being closed (seconds)
    ///
    /// None = connections are never closed for being idle
    pub idle_timeout_seconds: Option<u64>,

    /// Maximum lifetime of a connection before forced recycling (seconds)
    ///
    /// None = connections live until the pool is closed
    pub max_lifetime_seconds: Option<u64>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 30,
            idle_timeout_seconds: Some(600),
            max_lifetime_seconds: Some(1800),
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a private in-memory database
    ///
    /// Uses a single connection that is never recycled, so the schema and
    /// rows survive for as long as the pool does.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_seconds: 5,
            idle_timeout_seconds: None,
            max_lifetime_seconds: None,
        }
    }
}

/// Creates and initializes a SQLite connection pool
///
/// This function:
/// 1. Parses the URL and enables `create_if_missing` and foreign keys
/// 2. Builds the pool with the configured limits
/// 3. Runs a health check so an unusable database fails at startup
///
/// # Errors
///
/// Returns an error if the URL is invalid, the database cannot be opened,
/// or the health check fails.
pub async fn create_pool(config: DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        connect_timeout_seconds = config.connect_timeout_seconds,
        "Creating database connection pool"
    );

    let connect_options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(config.idle_timeout_seconds.map(Duration::from_secs))
        .max_lifetime(config.max_lifetime_seconds.map(Duration::from_secs));

    if config.min_connections > config.max_connections {
        warn!(
            min_connections = config.min_connections,
            max_connections = config.max_connections,
            "min_connections exceeds max_connections, clamping"
        );
        pool_options = pool_options.min_connections(config.max_connections);
    }

    let pool = pool_options.connect_with(connect_options).await?;

    health_check(&pool).await?;

    info!("Database connection pool created successfully");
    Ok(pool)
}

/// Performs a health check on the database connection
///
/// Executes `SELECT 1` to verify the database is reachable and responding.
///
/// # Errors
///
/// Returns an error if the query fails or returns an unexpected value.
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("Performing database health check");

    let result: (i32,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if result.0 == 1 {
        debug!("Database health check passed");
        Ok(())
    } else {
        warn!("Database health check returned unexpected value: {}", result.0);
        Err(sqlx::Error::Protocol(
            "Health check returned unexpected value".into(),
        ))
    }
}

/// Gracefully closes the connection pool
pub async fn close_pool(pool: SqlitePool) {
    info!("Closing database connection pool");
    pool.close().await;
    info!("Database connection pool closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout_seconds, 30);
        assert_eq!(config.idle_timeout_seconds, Some(600));
        assert_eq!(config.max_lifetime_seconds, Some(1800));
    }

    #[test]
    fn test_in_memory_config_never_recycles() {
        let config = DatabaseConfig::in_memory();
        assert_eq!(config.max_connections, 1);
        assert!(config.idle_timeout_seconds.is_none());
        assert!(config.max_lifetime_seconds.is_none());
    }

    #[tokio::test]
    async fn test_create_in_memory_pool() {
        let pool = create_pool(DatabaseConfig::in_memory())
            .await
            .expect("in-memory pool should open");

        health_check(&pool).await.expect("health check should pass");
        close_pool(pool).await;
    }

    #[tokio::test]
    async fn test_health_check_fails_after_close() {
        let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();
        pool.close().await;

        assert!(health_check(&pool).await.is_err());
    }

    #[tokio::test]
    async fn test_unopenable_path_is_rejected() {
        let config = DatabaseConfig {
            url: "sqlite:///nonexistent-itemlist-dir/nested/items.db".to_string(),
            ..DatabaseConfig::in_memory()
        };

        assert!(create_pool(config).await.is_err());
    }
}
