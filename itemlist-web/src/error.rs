/// Error handling for the authenticated items app
///
/// Expected failures (bad form input, unknown item, wrong password) never
/// reach this type: handlers turn them into flash messages or re-rendered
/// forms. `WebError` covers what is left, and always renders the same
/// generic page so no internal detail reaches the browser.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use itemlist_shared::{auth::password::PasswordError, items::ItemError};
use std::fmt;

/// Web result type alias
pub type WebResult<T> = Result<T, WebError>;

/// Unexpected failure while handling a request
#[derive(Debug)]
pub enum WebError {
    /// Database query failed
    Database(sqlx::Error),

    /// Password hashing or verification failed
    Password(PasswordError),

    /// Page template failed to render
    Template(handlebars::RenderError),

    /// Anything else (blocking task panics, malformed cookies)
    Internal(String),
}

/// Body of every 500 page
pub const GENERIC_ERROR_PAGE: &str = "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>Error</title></head>\
<body><h1>Something went wrong</h1><p>An error occurred. Please try again.</p><p><a href=\"/\">Back</a></p></body></html>\n";

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::Database(e) => write!(f, "Database error: {}", e),
            WebError::Password(e) => write!(f, "Password error: {}", e),
            WebError::Template(e) => write!(f, "Template error: {}", e),
            WebError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for WebError {}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Html(GENERIC_ERROR_PAGE)).into_response()
    }
}

impl From<sqlx::Error> for WebError {
    fn from(err: sqlx::Error) -> Self {
        WebError::Database(err)
    }
}

impl From<PasswordError> for WebError {
    fn from(err: PasswordError) -> Self {
        WebError::Password(err)
    }
}

impl From<handlebars::RenderError> for WebError {
    fn from(err: handlebars::RenderError) -> Self {
        WebError::Template(err)
    }
}

impl From<ItemError> for WebError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::Database(e) => WebError::Database(e),
            other => WebError::Internal(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for WebError {
    fn from(err: tokio::task::JoinError) -> Self {
        WebError::Internal(format!("Blocking task failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WebError::Database(sqlx::Error::PoolClosed);
        assert!(err.to_string().starts_with("Database error: "));

        let err = WebError::Internal("boom".to_string());
        assert_eq!(err.to_string(), "Internal error: boom");
    }

    #[tokio::test]
    async fn test_response_hides_details() {
        let response = WebError::Database(sqlx::Error::PoolClosed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("An error occurred. Please try again."));
        assert!(!html.contains("pool"));
    }
}
