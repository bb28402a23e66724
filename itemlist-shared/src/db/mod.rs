/// Database layer for the item list servers
///
/// # Modules
///
/// - `pool`: SQLite connection pool management with health checks
/// - `migrations`: Embedded schema migrations
/// - Models are in the `models` module at crate root level
///
/// # Example
///
/// ```no_run
/// use itemlist_shared::db::{migrations::run_migrations, pool::{create_pool, DatabaseConfig}};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     })
///     .await?;
///
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;

/// Opens an in-memory database with the full schema applied
///
/// Used by unit and integration tests across the workspace.
pub async fn connect_in_memory() -> Result<sqlx::SqlitePool, sqlx::Error> {
    let pool = pool::create_pool(pool::DatabaseConfig::in_memory()).await?;
    migrations::run_migrations(&pool).await?;
    Ok(pool)
}
