/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use itemlist_api::{app::AppState, config::Config, templates};
/// use itemlist_shared::db::pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let db = pool::create_pool(config.database.pool_config()).await?;
/// let state = AppState::new(db, config, templates::load()?);
/// let app = itemlist_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use handlebars::Handlebars;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Page templates
    pub templates: Arc<Handlebars<'static>>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool, config: Config, templates: Handlebars<'static>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            templates: Arc::new(templates),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET  /             # Landing page
/// ├── GET  /health       # Health check
/// └── /api/
///     ├── GET  /items    # List items, newest first
///     ├── POST /items    # Create item
///     └── GET  /stats    # Item counters
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let api_routes = Router::new()
        .route(
            "/items",
            get(routes::items::list_items).post(routes::items::create_item),
        )
        .route("/stats", get(routes::stats::get_stats));

    let cors = if state.config.cors_is_permissive() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .route("/", get(routes::pages::index))
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
