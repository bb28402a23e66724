/// Statistics endpoint
///
/// ```text
/// GET /api/stats
/// ```
///
/// ```json
/// {"total_items": 2, "items_today": 2, "database_status": "connected"}
/// ```
///
/// Recomputed on every call; "today" is the store's current UTC date.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use itemlist_shared::items;
use serde::{Deserialize, Serialize};

/// Stats response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_items: i64,
    pub items_today: i64,
    pub database_status: String,
}

/// Stats handler
///
/// # Errors
///
/// - `500 Internal Server Error`: `{"error": "Stats error: ..."}`
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<StatsResponse>> {
    let stats = items::item_stats(&state.db)
        .await
        .map_err(|e| ApiError::Internal(format!("Stats error: {}", e)))?;

    Ok(Json(StatsResponse {
        total_items: stats.total_items,
        items_today: stats.items_today,
        database_status: "connected".to_string(),
    }))
}
