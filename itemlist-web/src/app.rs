/// Application state and router builder

use crate::{
    config::Config,
    middleware::{auth::require_login, security::SecurityHeadersLayer},
};
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use handlebars::Handlebars;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
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
/// ├── GET|POST /register            # public
/// ├── GET|POST /login               # public
/// ├── GET      /                    # guarded
/// ├── GET      /logout              # guarded
/// ├── POST     /add_item            # guarded
/// ├── POST     /update_item/:id     # guarded
/// └── POST     /delete_item/:id     # guarded
/// ```
///
/// The login guard is a route layer, so unknown paths still 404 instead of
/// redirecting to the login page.
pub fn build_router(state: AppState) -> Router {
    use crate::routes::{auth, items};

    let guarded = Router::new()
        .route("/", get(items::index))
        .route("/logout", get(auth::logout))
        .route("/add_item", post(items::add_item))
        .route("/update_item/:id", post(items::update_item))
        .route("/delete_item/:id", post(items::delete_item))
        .route_layer(from_fn_with_state(state.clone(), require_login));

    let public = Router::new()
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login));

    Router::new()
        .merge(public)
        .merge(guarded)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SecurityHeadersLayer::new(state.config.web.cookie_secure))
        .with_state(state)
}
