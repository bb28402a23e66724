//! # Item List API Server
//!
//! Serves the public JSON items API and its landing page.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=sqlite://items.db cargo run -p itemlist-api
//! ```

use itemlist_api::{
    app::{build_router, AppState},
    config::Config,
    templates,
};
use itemlist_shared::db::{migrations, pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!(
        "Item List API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let db = pool::create_pool(config.database.pool_config()).await?;
    migrations::run_migrations(&db).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(db.clone(), config, templates::load()?);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool::close_pool(db).await;
    tracing::info!("Server stopped");

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "itemlist_api=debug,itemlist_shared=info,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
