//! Item validation and persistence orchestration
//!
//! Both servers go through this module for every write, so the
//! trimming/defaulting rules and the one-transaction-per-write guarantee are
//! identical everywhere. How an [`ItemError`] is shown to the caller is up to
//! each server: the public API reports database messages verbatim, the
//! authenticated app replaces them with a generic retry message.

use crate::models::item::{CreateItem, Item};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

/// Input rejected before touching the store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,
}

/// Failure of an item operation
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No item with this ID belongs to the caller
    #[error("Item not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Raw name/description as submitted by a client
#[derive(Debug, Clone, Default)]
pub struct ItemInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Name and description after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidItem {
    pub name: String,
    pub description: Option<String>,
}

impl ItemInput {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: Some(name.into()),
            description,
        }
    }

    /// Trims both fields, requires a name and turns a blank description into None
    pub fn validate(&self) -> Result<ValidItem, ValidationError> {
        let name = self.name.as_deref().unwrap_or_default().trim();
        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(ValidItem {
            name: name.to_string(),
            description,
        })
    }
}

/// Lists items, newest first
///
/// `owner` = None lists every item (public API); Some(user) lists only that
/// user's items.
pub async fn list_items(pool: &SqlitePool, owner: Option<i64>) -> Result<Vec<Item>, ItemError> {
    let items = match owner {
        Some(user_id) => Item::list_by_user(pool, user_id).await?,
        None => Item::list_all(pool).await?,
    };
    Ok(items)
}

/// Validates and inserts an item in its own transaction
pub async fn create_item(
    pool: &SqlitePool,
    owner: Option<i64>,
    input: &ItemInput,
) -> Result<Item, ItemError> {
    let valid = input.validate()?;

    let mut tx = pool.begin().await?;
    let item = match Item::create(
        &mut *tx,
        CreateItem {
            name: valid.name,
            description: valid.description,
            user_id: owner,
        },
    )
    .await
    {
        Ok(item) => item,
        Err(e) => {
            warn!(error = %e, "Item insert failed, rolling back");
            tx.rollback().await?;
            return Err(e.into());
        }
    };
    tx.commit().await?;

    info!(item_id = item.id, user_id = ?owner, "Item created");
    Ok(item)
}

/// Re-validates and overwrites an owned item in its own transaction
///
/// Lookup happens before validation, so a missing item is reported as
/// [`ItemError::NotFound`] whatever the input.
pub async fn update_item(
    pool: &SqlitePool,
    owner: i64,
    id: i64,
    input: &ItemInput,
) -> Result<Item, ItemError> {
    let mut tx = pool.begin().await?;

    if Item::find_owned(&mut *tx, id, owner).await?.is_none() {
        debug!(item_id = id, user_id = owner, "Update target not found");
        return Err(ItemError::NotFound);
    }

    let valid = input.validate()?;

    let updated = match Item::update_owned(&mut *tx, id, owner, valid.name, valid.description).await
    {
        Ok(Some(item)) => item,
        Ok(None) => return Err(ItemError::NotFound),
        Err(e) => {
            warn!(error = %e, item_id = id, "Item update failed, rolling back");
            tx.rollback().await?;
            return Err(e.into());
        }
    };
    tx.commit().await?;

    info!(item_id = id, user_id = owner, "Item updated");
    Ok(updated)
}

/// Permanently deletes an owned item in its own transaction
pub async fn delete_item(pool: &SqlitePool, owner: i64, id: i64) -> Result<(), ItemError> {
    let mut tx = pool.begin().await?;

    let deleted = match Item::delete_owned(&mut *tx, id, owner).await {
        Ok(deleted) => deleted,
        Err(e) => {
            warn!(error = %e, item_id = id, "Item delete failed, rolling back");
            tx.rollback().await?;
            return Err(e.into());
        }
    };

    if !deleted {
        debug!(item_id = id, user_id = owner, "Delete target not found");
        return Err(ItemError::NotFound);
    }
    tx.commit().await?;

    info!(item_id = id, user_id = owner, "Item deleted");
    Ok(())
}

/// Item counters reported by the public API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStats {
    pub total_items: i64,
    pub items_today: i64,
}

/// Counts all items and the items created on the store's current UTC date
pub async fn item_stats(pool: &SqlitePool) -> Result<ItemStats, sqlx::Error> {
    let total_items = Item::count_all(pool).await?;
    let items_today = Item::count_created_today(pool).await?;

    Ok(ItemStats {
        total_items,
        items_today,
    })
}
