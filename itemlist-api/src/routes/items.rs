/// Item endpoints
///
/// # Endpoints
///
/// - `GET /api/items` - List every item, newest first
/// - `POST /api/items` - Create an item
///
/// # Item format
///
/// ```json
/// {
///   "id": 1,
///   "name": "Milk",
///   "description": null,
///   "created_at": "2025-01-01 12:00:00"
/// }
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use itemlist_shared::{
    items::{self, ItemInput},
    models::item::Item,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Item as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,

    /// `YYYY-MM-DD HH:MM:SS`, UTC
    pub created_at: String,
}

impl From<&Item> for ItemResponse {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            created_at: item.created_at_display(),
        }
    }
}

/// List response
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<ItemResponse>,
}

/// Create response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateItemResponse {
    pub message: String,
    pub item: ItemResponse,
}

/// Lists all items, newest first
///
/// # Errors
///
/// - `500 Internal Server Error`: `{"error": "Database error: ..."}`
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<ItemsResponse>> {
    let items = items::list_items(&state.db, None).await?;

    Ok(Json(ItemsResponse {
        items: items.iter().map(ItemResponse::from).collect(),
    }))
}

/// Creates an item
///
/// The body is parsed as JSON whatever the Content-Type header says.
///
/// ```text
/// POST /api/items
///
/// {"name": "  Milk  ", "description": ""}
/// ```
///
/// Responds `201` with `{"message": "Item created successfully", "item": {...}}`.
///
/// # Errors
///
/// - `400 Bad Request`: `{"error": "Name is required"}` or an unparsable body
/// - `500 Internal Server Error`: `{"error": "Database error: ..."}`
pub async fn create_item(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<CreateItemResponse>)> {
    let input = parse_item_input(&body)?;

    let item = items::create_item(&state.db, None, &input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateItemResponse {
            message: "Item created successfully".to_string(),
            item: ItemResponse::from(&item),
        }),
    ))
}

/// Pulls `name` and `description` out of a JSON body
///
/// Missing keys, non-object bodies and non-string values all count as absent.
fn parse_item_input(body: &[u8]) -> Result<ItemInput, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| ApiError::BadRequest("Invalid JSON body".to_string()))?;

    let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

    Ok(ItemInput {
        name: field("name"),
        description: field("description"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_input() {
        let input = parse_item_input(br#"{"name": " Milk ", "description": "2l"}"#).unwrap();
        assert_eq!(input.name.as_deref(), Some(" Milk "));
        assert_eq!(input.description.as_deref(), Some("2l"));
    }

    #[test]
    fn test_parse_item_input_treats_odd_values_as_absent() {
        let input = parse_item_input(br#"{"name": 42, "description": null}"#).unwrap();
        assert!(input.name.is_none());
        assert!(input.description.is_none());

        let input = parse_item_input(b"[1, 2, 3]").unwrap();
        assert!(input.name.is_none());
    }

    #[test]
    fn test_parse_item_input_rejects_garbage() {
        let err = parse_item_input(b"name=Milk").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(msg) if msg == "Invalid JSON body"));
    }
}
