/// Integration tests for the Item List API
///
/// These drive the full router against an in-memory database:
/// - Item creation, validation and listing
/// - Statistics
/// - Health reporting, including a dead database
/// - The landing page

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestContext;
use itemlist_shared::models::item::Item;
use serde_json::json;

#[tokio::test]
async fn test_create_item_trims_and_normalizes() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .post_json("/api/items", json!({ "name": "  Milk  ", "description": "" }))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Item created successfully");
    assert_eq!(body["item"]["name"], "Milk");
    assert!(body["item"]["description"].is_null());
    assert!(body["item"]["id"].is_i64());

    let created_at = body["item"]["created_at"].as_str().unwrap();
    assert_eq!(created_at.len(), "2025-01-01 12:00:00".len());
    assert_eq!(&created_at[10..11], " ");
}

#[tokio::test]
async fn test_create_item_keeps_description() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .post_json("/api/items", json!({ "name": "Bread", "description": "  wholegrain " }))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["item"]["description"], "wholegrain");
}

#[tokio::test]
async fn test_create_item_rejects_blank_name() {
    let ctx = TestContext::new().await.unwrap();

    for payload in [json!({ "name": "   " }), json!({}), json!({ "name": 7 })] {
        let (status, body) = ctx.post_json("/api/items", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Name is required");
    }

    assert_eq!(Item::count_all(&ctx.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_item_accepts_long_name() {
    let ctx = TestContext::new().await.unwrap();
    let name = "x".repeat(500);

    let (status, body) = ctx
        .post_json("/api/items", json!({ "name": name }))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], name);
    assert_eq!(Item::count_all(&ctx.db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_item_invalid_json() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .post_raw("/api/items", "application/json", "{not json")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON body");
}

#[tokio::test]
async fn test_create_item_ignores_content_type() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .post_raw("/api/items", "text/plain", r#"{"name": "Eggs"}"#)
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["item"]["name"], "Eggs");
}

#[tokio::test]
async fn test_list_items_newest_first() {
    let ctx = TestContext::new().await.unwrap();

    let (_, body) = ctx.get_json("/api/items").await;
    assert_eq!(body["items"], json!([]));

    for name in ["first", "second", "third"] {
        let (status, _) = ctx.post_json("/api/items", json!({ "name": name })).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = ctx.get_json("/api/items").await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn test_stats_counts_items() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.get_json("/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_items"], 0);
    assert_eq!(body["items_today"], 0);

    ctx.post_json("/api/items", json!({ "name": "Milk" })).await;
    ctx.post_json("/api/items", json!({ "name": "Bread" })).await;

    let (status, body) = ctx.get_json("/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "total_items": 2, "items_today": 2, "database_status": "connected" })
    );
}

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.get_json("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "database": "connected" }));
}

#[tokio::test]
async fn test_dead_database_reports_errors() {
    let ctx = TestContext::new().await.unwrap();
    ctx.db.close().await;

    let (status, body) = ctx.get_json("/health").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert!(body["message"].is_string());

    let (status, body) = ctx.get_json("/api/stats").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("Stats error: "));

    let (status, body) = ctx.get_json("/api/items").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("Database error: "));
}

#[tokio::test]
async fn test_index_page() {
    let ctx = TestContext::new().await.unwrap();

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = ctx.send(request).await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("<title>Item List</title>"));
    assert!(html.contains("/api/items"));
}
