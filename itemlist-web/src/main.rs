//! # Item List Web App
//!
//! Serves the authenticated, server-rendered item list.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=sqlite://items_auth.db cargo run -p itemlist-web
//! ```

use itemlist_shared::{
    db::{migrations, pool},
    models::session::Session,
};
use itemlist_web::{
    app::{build_router, AppState},
    config::Config,
    templates,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!(
        "Item List Web App v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let db = pool::create_pool(config.database.pool_config()).await?;
    migrations::run_migrations(&db).await?;

    let purged = Session::delete_expired(&db).await?;
    if purged > 0 {
        tracing::info!(purged, "Removed expired sessions");
    }

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
        .unwrap_or_else(|_| "itemlist_web=debug,itemlist_shared=info,tower_http=debug".into());

    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
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
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, exiting..."),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
