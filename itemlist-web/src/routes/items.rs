/// Per-user item pages
///
/// # Endpoints
///
/// - `GET /` - The caller's items, newest first
/// - `POST /add_item` - Create an item
/// - `POST /update_item/:id` - Rename/redescribe an item
/// - `POST /delete_item/:id` - Delete an item
///
/// All routes are guarded. Writes always redirect back to `/` with a flash;
/// an id owned by someone else is reported exactly like a missing one.

use crate::{
    app::AppState,
    error::WebResult,
    flash::{self, Flash},
    middleware::auth::AuthContext,
    templates::{self, IndexContent, ItemView, Page},
};
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect},
    Extension, Form,
};
use axum_extra::extract::CookieJar;
use itemlist_shared::items::{self, ItemError, ItemInput, ValidationError};
use serde::Deserialize;

/// Add/update form
#[derive(Debug, Deserialize)]
pub struct ItemForm {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,
}

impl ItemForm {
    fn into_input(self) -> ItemInput {
        ItemInput::new(self.name, Some(self.description))
    }
}

/// Flash for a failed write
fn flash_for_error(err: ItemError) -> Flash {
    match err {
        ItemError::Validation(ValidationError::NameRequired) => Flash::NameRequired,
        ItemError::NotFound => Flash::ItemNotFound,
        ItemError::Database(e) => {
            tracing::error!(error = %e, "Item write failed");
            Flash::GenericError
        }
    }
}

fn back_to_index(jar: CookieJar, outcome: Result<Flash, ItemError>) -> impl IntoResponse {
    let flash = outcome.unwrap_or_else(flash_for_error);
    (flash::set(jar, flash), Redirect::to("/"))
}

/// GET /
pub async fn index(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    jar: CookieJar,
) -> WebResult<impl IntoResponse> {
    let items = items::list_items(&state.db, Some(auth.user_id)).await?;

    let (jar, flash) = flash::take(jar);
    let html = templates::render(
        &state.templates,
        "index",
        &Page {
            title: "My Items",
            flash,
            username: Some(auth.username),
            content: IndexContent {
                items: items
                    .iter()
                    .map(|item| ItemView {
                        id: item.id,
                        name: item.name.clone(),
                        description: item.description.clone(),
                        created_at: item.created_at_display(),
                    })
                    .collect(),
            },
        },
    )?;

    Ok((jar, Html(html)))
}

/// POST /add_item
pub async fn add_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    jar: CookieJar,
    Form(form): Form<ItemForm>,
) -> impl IntoResponse {
    let outcome = items::create_item(&state.db, Some(auth.user_id), &form.into_input())
        .await
        .map(|_| Flash::ItemAdded);

    back_to_index(jar, outcome)
}

/// POST /update_item/:id
pub async fn update_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<ItemForm>,
) -> impl IntoResponse {
    let outcome = items::update_item(&state.db, auth.user_id, id, &form.into_input())
        .await
        .map(|_| Flash::ItemUpdated);

    back_to_index(jar, outcome)
}

/// POST /delete_item/:id
pub async fn delete_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> impl IntoResponse {
    let outcome = items::delete_item(&state.db, auth.user_id, id)
        .await
        .map(|()| Flash::ItemDeleted);

    back_to_index(jar, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_for_error() {
        assert_eq!(
            flash_for_error(ItemError::Validation(ValidationError::NameRequired)),
            Flash::NameRequired
        );
        assert_eq!(flash_for_error(ItemError::NotFound), Flash::ItemNotFound);
        assert_eq!(
            flash_for_error(ItemError::Database(sqlx::Error::PoolClosed)),
            Flash::GenericError
        );
    }

    #[test]
    fn test_form_keeps_raw_values_for_validation() {
        let input = ItemForm {
            name: "  Milk ".to_string(),
            description: "   ".to_string(),
        }
        .into_input();

        let valid = input.validate().unwrap();
        assert_eq!(valid.name, "Milk");
        assert_eq!(valid.description, None);
    }
}
