/// Error handling for the public items API
///
/// Every handler returns `Result<T, ApiError>`, which renders as a JSON body
/// of the form `{"error": "<message>"}`. Database failures are reported with
/// their underlying message, matching what API clients already parse.
///
/// # Example
///
/// ```
/// use itemlist_api::error::{ApiError, ApiResult};
/// use axum::Json;
/// use serde_json::json;
///
/// async fn handler() -> ApiResult<Json<serde_json::Value>> {
///     Err(ApiError::BadRequest("Name is required".to_string()))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use itemlist_shared::items::ItemError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400), e.g. a blank item name
    BadRequest(String),

    /// Internal server error (500); the message is sent to the client as is
    Internal(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(self) -> String {
        match self {
            ApiError::BadRequest(msg) | ApiError::Internal(msg) => msg,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(ErrorResponse {
            error: self.message(),
        });

        (status, body).into_response()
    }
}

/// Convert item errors to API errors
impl From<ItemError> for ApiError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::Validation(e) => ApiError::BadRequest(e.to_string()),
            // The public API has no by-id routes, so NotFound is unreachable
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Convert template errors to API errors
impl From<handlebars::RenderError> for ApiError {
    fn from(err: handlebars::RenderError) -> Self {
        ApiError::Internal(format!("Template error: {}", err))
    }
}
