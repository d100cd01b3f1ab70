//! # Error Types
//!
//! Domain-specific error types for stockbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockbook-core errors (this file)                                      │
//! │  ├── SaleRejection    - Why a submitted cart was refused                │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  stockbook-db errors (separate crate)                                   │
//! │  ├── DbError          - Database operation failures                     │
//! │  └── CheckoutError    - SaleRejection | DbError at the tx boundary      │
//! │                                                                         │
//! │  apps/server                                                            │
//! │  └── ApiError         - What the client sees (status + message)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. `thiserror` derives, never manual impls
//! 2. Errors carry context (item id, available vs requested)
//! 3. Rejections are enum variants, never strings
//! 4. Sale rejections are ordinary values: the checkout loop returns them
//!    per line and the transaction coordinator rolls back - nothing is
//!    signalled by panicking

use thiserror::Error;

// =============================================================================
// Sale Rejection
// =============================================================================

/// Why a submitted cart was refused.
///
/// These are user-input errors. The checkout transaction catches the first
/// one in submission order, rolls back the whole unit of work, and the API
/// returns the message with a 4xx status. None of them are system faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaleRejection {
    /// The customer id did not resolve to a registered customer.
    #[error("Customer not found: {0}")]
    InvalidCustomer(String),

    /// The cart payload could not be decoded from its wire encoding.
    #[error("Cart payload could not be parsed: {0}")]
    MalformedCart(String),

    /// The cart decoded fine but contained no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// A line requested a non-positive quantity.
    #[error("Invalid quantity {requested} for item {item_id}")]
    InvalidQuantity { item_id: String, requested: i64 },

    /// A line referenced an item that does not exist or is not owned by the
    /// acting account.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// A line requested more units than the item has in stock.
    ///
    /// `available` is the stock as seen inside the transaction, i.e. after
    /// decrements from earlier lines of the same cart.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        item_id: String,
        name: String,
        available: i64,
        requested: i64,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used by the CRUD surfaces before anything touches the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. malformed UUID or tax id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        let err = SaleRejection::InsufficientStock {
            item_id: "abc".to_string(),
            name: "Widget".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Widget: available 3, requested 5"
        );

        assert_eq!(SaleRejection::EmptyCart.to_string(), "Cart is empty");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }
}
