//! # Domain Types
//!
//! Core domain types used throughout Stockbook.
//!
//! ## Entity Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────┐      ┌──────────────┐      ┌──────────────┐          │
//! │  │   Category   │◄─────│     Item     │      │   Customer   │          │
//! │  │  ──────────  │      │  ──────────  │      │  ──────────  │          │
//! │  │  id (UUID)   │      │  id (UUID)   │      │  id (UUID)   │          │
//! │  │  name        │      │  quantity    │      │  tax_id (UQ) │          │
//! │  └──────────────┘      │  price_cents │      └──────┬───────┘          │
//! │                        │  owner_id    │             │                  │
//! │                        └──────┬───────┘             │                  │
//! │                               │ snapshot            │                  │
//! │                        ┌──────▼───────┐      ┌──────▼───────┐          │
//! │                        │   SaleLine   │─────►│     Sale     │          │
//! │                        │  ──────────  │      │  ──────────  │          │
//! │                        │  quantity    │      │  id (UUID)   │          │
//! │                        │  unit_price  │      │  customer_id │          │
//! │                        └──────────────┘      └──────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sale and SaleLine are write-once: created by the checkout transaction and
//! never mutated afterwards. A sale's total is always computed from its
//! lines, never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A catalog category. Deleting one nullifies the reference on its items;
/// the items themselves survive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,
}

// =============================================================================
// Item
// =============================================================================

/// A stock item, owned by exactly one user account.
///
/// Mutated by the CRUD endpoints and by the checkout transaction (quantity
/// decrement). `quantity >= 0` is a hard invariant, enforced both here and
/// by a CHECK constraint in the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Item {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Stock on hand. Never negative.
    pub quantity: i64,

    /// Category reference. None after the category was deleted.
    pub category_id: Option<String>,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Account that owns this item. Only the owner can sell or edit it.
    pub owner_id: String,

    /// When the item was created.
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Returns the unit price as a Money value.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether `requested` units can be sold from current stock.
    pub fn can_sell(&self, requested: i64) -> bool {
        requested > 0 && requested <= self.quantity
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A registered customer. `tax_id` is unique across the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Full name.
    pub name: String,

    /// Tax identifier - unique business key.
    pub tax_id: String,

    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,

    /// When the customer was registered.
    pub registered_at: DateTime<Utc>,
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale. Immutable once created; its total is the sum of its
/// lines' subtotals and is computed on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Customer this sale was made to.
    pub customer_id: String,

    /// When the sale was committed.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sale Line
// =============================================================================

/// One line of a sale.
///
/// Uses the snapshot pattern: `unit_price_cents` is copied from the item at
/// checkout time, so later price edits never move historical totals.
/// Creating a line and decrementing the item's stock happen in the same
/// transaction - one never exists without the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleLine {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Sale this line belongs to.
    pub sale_id: String,

    /// Item that was sold.
    pub item_id: String,

    /// Units sold. Always positive.
    pub quantity: i64,

    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,

    /// When the line was created (same instant as its sale).
    pub created_at: DateTime<Utc>,
}

impl SaleLine {
    /// Returns the frozen unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line subtotal: quantity × frozen unit price.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

/// Computes a sale total from its lines.
///
/// Kept as a free function so both the API layer and the report generator
/// agree on the arithmetic.
pub fn sale_total(lines: &[SaleLine]) -> Money {
    lines.iter().map(SaleLine::subtotal).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(qty: i64, unit_price_cents: i64) -> SaleLine {
        SaleLine {
            id: "line".to_string(),
            sale_id: "sale".to_string(),
            item_id: "item".to_string(),
            quantity: qty,
            unit_price_cents,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_line_subtotal() {
        assert_eq!(line(3, 1000).subtotal().cents(), 3000);
        assert_eq!(line(1, 99).subtotal().cents(), 99);
    }

    #[test]
    fn test_sale_total_sums_lines() {
        let lines = vec![line(3, 1000), line(2, 250)];
        assert_eq!(sale_total(&lines).cents(), 3500);
    }

    #[test]
    fn test_sale_total_empty() {
        assert_eq!(sale_total(&[]).cents(), 0);
    }

    #[test]
    fn test_can_sell() {
        let item = Item {
            id: "i".to_string(),
            name: "Widget".to_string(),
            quantity: 5,
            category_id: None,
            price_cents: 1000,
            owner_id: "u".to_string(),
            created_at: Utc::now(),
        };

        assert!(item.can_sell(5));
        assert!(item.can_sell(1));
        assert!(!item.can_sell(6));
        assert!(!item.can_sell(0));
        assert!(!item.can_sell(-1));
    }
}
