/// Database migration runner
///
/// The schema lives in `itemlist-shared/migrations/` and is embedded into the
/// binaries with `sqlx::migrate!`, so both servers create their tables on
/// startup when they are missing.
///
/// # Migration Files
///
/// Each migration is a single `{timestamp}_{name}.sql` file. Applied versions
/// are recorded in the `_sqlx_migrations` table.
///
/// # Example
///
/// ```no_run
/// use itemlist_shared::db::pool::{create_pool, DatabaseConfig};
/// use itemlist_shared::db::migrations::run_migrations;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(DatabaseConfig {
///         url: "sqlite://items.db".to_string(),
///         ..Default::default()
///     })
///     .await?;
///
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

use sqlx::sqlite::SqlitePool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// Safe to call on every startup: already-applied migrations are skipped.
///
/// # Errors
///
/// Returns an error if a migration fails to execute or an applied migration
/// no longer matches its embedded checksum.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    match sqlx::migrate!("./migrations").run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
