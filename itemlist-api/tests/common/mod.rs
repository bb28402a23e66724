/// Common test utilities for integration tests
///
/// Each test gets its own in-memory database with migrations applied, so
/// tests never share rows and need no cleanup.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use itemlist_api::app::{build_router, AppState};
use itemlist_api::config::{ApiConfig, Config, DatabaseConfig};
use itemlist_api::templates;
use itemlist_shared::db;
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context with a fresh database
    pub async fn new() -> anyhow::Result<Self> {
        let db = db::connect_in_memory().await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
        };

        let state = AppState::new(db.clone(), config, templates::load()?);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Sends a request and returns the status and raw body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    /// GETs a path and parses the body as JSON
    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    /// POSTs a raw body to a path and parses the response as JSON
    pub async fn post_raw(
        &self,
        uri: &str,
        content_type: &str,
        body: impl Into<Body>,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", content_type)
            .body(body.into())
            .unwrap();
        let (status, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    /// POSTs a JSON value to a path
    pub async fn post_json(
        &self,
        uri: &str,
        value: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.post_raw(uri, "application/json", value.to_string())
            .await
    }
}
