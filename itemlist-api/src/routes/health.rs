/// Health check endpoint
///
/// Runs a trivial round-trip query against the store.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// 200 {"status": "ok", "database": "connected"}
/// 500 {"status": "error", "message": "<database error>"}
/// ```

use crate::app::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use itemlist_shared::db::pool;
use serde::{Deserialize, Serialize};

/// Healthy response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

/// Unhealthy response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthErrorResponse {
    pub status: String,
    pub message: String,
}

/// Health check handler
///
/// Never fails: a database error becomes a 500 body instead of propagating.
pub async fn health_check(State(state): State<AppState>) -> Response {
    match pool::health_check(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                database: "connected".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthErrorResponse {
                    status: "error".to_string(),
                    message: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
