//! # Sale Repository
//!
//! The sale transaction processor and the sale read paths.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       One Unit of Work                                  │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    resolve customer ──────────────── missing? ► InvalidCustomer         │
//! │    INSERT sale                                                          │
//! │    for each cart line (submission order):                               │
//! │      quantity > 0? ───────────────── no? ──────► InvalidQuantity        │
//! │      re-read item (inside tx) ────── missing? ─► ItemNotFound           │
//! │      requested <= available? ─────── no? ──────► InsufficientStock      │
//! │      INSERT sale_line (price snapshot)                                  │
//! │      UPDATE items SET quantity = quantity - n                           │
//! │                       WHERE id = ? AND quantity >= n                    │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any rejection returns early; the dropped transaction rolls back        │
//! │  everything. No partial sale, no partial decrement.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The re-read inside the transaction matters when a cart names the same
//! item twice: the second line must see the first line's decrement. The
//! guarded UPDATE is the store-level backstop against concurrent writers;
//! SQLite's transaction isolation serializes them.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{CheckoutError, DbResult};
use stockbook_core::{CartLine, Item, Sale, SaleLine, SaleRejection};

/// One row of the sales listing and of the weekly report: a sale with its
/// customer name and computed total.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SaleSummary {
    pub sale_id: String,
    pub created_at: DateTime<Utc>,
    pub customer_name: String,
    pub total_cents: i64,
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Runs the sale transaction: validates the cart against current stock,
    /// persists the sale and its lines, and decrements inventory - all or
    /// nothing.
    ///
    /// Lines are processed in submission order and the first failure wins.
    /// Items must belong to `owner_id`. Each line's `unit_price_cents` is a
    /// snapshot of the item's price at this moment.
    ///
    /// ## Errors
    /// - [`CheckoutError::Rejected`] - user-input problem, transaction
    ///   rolled back, safe to re-render the form with the message
    /// - [`CheckoutError::Db`] - infrastructure failure, also rolled back
    pub async fn checkout(
        &self,
        owner_id: &str,
        customer_id: &str,
        lines: &[CartLine],
    ) -> Result<Sale, CheckoutError> {
        if lines.is_empty() {
            return Err(SaleRejection::EmptyCart.into());
        }

        let mut tx = self.pool.begin().await?;

        let customer: Option<(String,)> =
            sqlx::query_as("SELECT id FROM customers WHERE id = ?1")
                .bind(customer_id)
                .fetch_optional(&mut *tx)
                .await?;

        if customer.is_none() {
            return Err(SaleRejection::InvalidCustomer(customer_id.to_string()).into());
        }

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query("INSERT INTO sales (id, customer_id, created_at) VALUES (?1, ?2, ?3)")
            .bind(&sale.id)
            .bind(&sale.customer_id)
            .bind(sale.created_at)
            .execute(&mut *tx)
            .await?;

        for line in lines {
            if line.quantity <= 0 {
                return Err(SaleRejection::InvalidQuantity {
                    item_id: line.item_id.clone(),
                    requested: line.quantity,
                }
                .into());
            }

            // Re-read inside the transaction: reflects decrements already
            // made by earlier lines of this cart.
            let item: Option<Item> = sqlx::query_as(
                "SELECT id, name, quantity, category_id, price_cents, owner_id, created_at \
                 FROM items WHERE id = ?1 AND owner_id = ?2",
            )
            .bind(&line.item_id)
            .bind(owner_id)
            .fetch_optional(&mut *tx)
            .await?;

            let item = match item {
                Some(item) => item,
                None => return Err(SaleRejection::ItemNotFound(line.item_id.clone()).into()),
            };

            if item.quantity < line.quantity {
                return Err(SaleRejection::InsufficientStock {
                    item_id: item.id,
                    name: item.name,
                    available: item.quantity,
                    requested: line.quantity,
                }
                .into());
            }

            sqlx::query(
                "INSERT INTO sale_lines (id, sale_id, item_id, quantity, unit_price_cents, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&sale.id)
            .bind(&item.id)
            .bind(line.quantity)
            .bind(item.price_cents)
            .bind(sale.created_at)
            .execute(&mut *tx)
            .await?;

            // Guarded decrement: the WHERE clause re-checks stock at write
            // time, so a concurrent writer can never push quantity below zero.
            let result =
                sqlx::query("UPDATE items SET quantity = quantity - ?2 WHERE id = ?1 AND quantity >= ?2")
                    .bind(&item.id)
                    .bind(line.quantity)
                    .execute(&mut *tx)
                    .await?;

            if result.rows_affected() == 0 {
                return Err(SaleRejection::InsufficientStock {
                    item_id: item.id,
                    name: item.name,
                    available: item.quantity,
                    requested: line.quantity,
                }
                .into());
            }

            debug!(sale_id = %sale.id, item_id = %line.item_id, quantity = line.quantity, "Sale line recorded");
        }

        tx.commit().await?;

        info!(sale_id = %sale.id, customer_id = %customer_id, lines = lines.len(), "Sale committed");

        Ok(sale)
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale: Option<Sale> =
            sqlx::query_as("SELECT id, customer_id, created_at FROM sales WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(sale)
    }

    /// Gets all lines of a sale, in the order they were written.
    pub async fn get_lines(&self, sale_id: &str) -> DbResult<Vec<SaleLine>> {
        let lines: Vec<SaleLine> = sqlx::query_as(
            "SELECT id, sale_id, item_id, quantity, unit_price_cents, created_at \
             FROM sale_lines WHERE sale_id = ?1 ORDER BY rowid",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Lists all sales with customer name and computed total, newest first
    /// (the orders page).
    pub async fn list_summaries(&self) -> DbResult<Vec<SaleSummary>> {
        let rows: Vec<SaleSummary> = sqlx::query_as(
            "SELECT s.id AS sale_id, s.created_at AS created_at, c.name AS customer_name, \
                    COALESCE(SUM(l.quantity * l.unit_price_cents), 0) AS total_cents \
             FROM sales s \
             JOIN customers c ON c.id = s.customer_id \
             LEFT JOIN sale_lines l ON l.sale_id = s.id \
             GROUP BY s.id, s.created_at, c.name \
             ORDER BY s.created_at DESC, s.id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Lists sales created on or after `start`, oldest first. Totals are
    /// computed from the line snapshots - the report is immune to later
    /// price edits. Feeds the weekly report.
    pub async fn list_summaries_since(
        &self,
        start: DateTime<Utc>,
    ) -> DbResult<Vec<SaleSummary>> {
        let rows: Vec<SaleSummary> = sqlx::query_as(
            "SELECT s.id AS sale_id, s.created_at AS created_at, c.name AS customer_name, \
                    COALESCE(SUM(l.quantity * l.unit_price_cents), 0) AS total_cents \
             FROM sales s \
             JOIN customers c ON c.id = s.customer_id \
             LEFT JOIN sale_lines l ON l.sale_id = s.id \
             WHERE s.created_at >= ?1 \
             GROUP BY s.id, s.created_at, c.name \
             ORDER BY s.created_at, s.id",
        )
        .bind(start)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
