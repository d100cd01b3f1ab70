//! # Item Repository
//!
//! Database operations for stock items.
//!
//! All reads and writes are scoped to the owning account: an item belongs
//! to exactly one user, and nobody else's queries can see or touch it.
//! Stock decrements during a sale do NOT go through this repository - they
//! live inside the checkout transaction in [`crate::repository::sale`].

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use stockbook_core::Item;

const ITEM_COLUMNS: &str = "id, name, quantity, category_id, price_cents, owner_id, created_at";

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Lists all items of one owner, oldest first (dashboard order).
    pub async fn list_for_owner(&self, owner_id: &str) -> DbResult<Vec<Item>> {
        let items: Vec<Item> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE owner_id = ?1 ORDER BY created_at, id"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists the owner's items with stock on hand (quantity > 0).
    ///
    /// Feeds the sale form: out-of-stock items are not offered for sale.
    pub async fn list_available(&self, owner_id: &str) -> DbResult<Vec<Item>> {
        let items: Vec<Item> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM items \
             WHERE owner_id = ?1 AND quantity > 0 ORDER BY name"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets one item by id, scoped to the owner.
    ///
    /// Returns `Ok(None)` both when the id doesn't exist and when it exists
    /// but belongs to someone else - callers can't tell the difference, and
    /// that's intentional.
    pub async fn get_owned(&self, id: &str, owner_id: &str) -> DbResult<Option<Item>> {
        let item: Option<Item> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1 AND owner_id = ?2"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a new item (id generated beforehand).
    pub async fn insert(&self, item: &Item) -> DbResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting item");

        sqlx::query(
            "INSERT INTO items (id, name, quantity, category_id, price_cents, owner_id, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.quantity)
        .bind(&item.category_id)
        .bind(item.price_cents)
        .bind(&item.owner_id)
        .bind(item.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates name, quantity, category and price of an owned item.
    ///
    /// ## Errors
    /// `DbError::NotFound` if the item doesn't exist or is owned by
    /// someone else.
    pub async fn update(&self, item: &Item) -> DbResult<()> {
        debug!(id = %item.id, "Updating item");

        let result = sqlx::query(
            "UPDATE items SET name = ?3, quantity = ?4, category_id = ?5, price_cents = ?6 \
             WHERE id = ?1 AND owner_id = ?2",
        )
        .bind(&item.id)
        .bind(&item.owner_id)
        .bind(&item.name)
        .bind(item.quantity)
        .bind(&item.category_id)
        .bind(item.price_cents)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", &item.id));
        }

        Ok(())
    }

    /// Deletes an owned item.
    ///
    /// Fails with a foreign key violation if the item already appears on a
    /// sale line; sold items are part of history and cannot be removed.
    pub async fn delete(&self, id: &str, owner_id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting item");

        let result = sqlx::query("DELETE FROM items WHERE id = ?1 AND owner_id = ?2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }
}

/// Helper to generate a new item ID.
pub fn generate_item_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builds a new item with a fresh id and creation timestamp.
pub fn new_item(
    name: &str,
    quantity: i64,
    category_id: Option<String>,
    price_cents: i64,
    owner_id: &str,
) -> Item {
    Item {
        id: generate_item_id(),
        name: name.to_string(),
        quantity,
        category_id,
        price_cents,
        owner_id: owner_id.to_string(),
        created_at: Utc::now(),
    }
}
