/// Landing page
///
/// `GET /` renders a small page whose script talks to the JSON endpoints.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, response::Html};
use serde_json::json;

pub async fn index(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let page = state.templates.render(
        "index",
        &json!({ "version": env!("CARGO_PKG_VERSION") }),
    )?;

    Ok(Html(page))
}
