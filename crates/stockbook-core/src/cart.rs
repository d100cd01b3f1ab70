//! # Cart Wire Decoding
//!
//! The sale submission endpoint receives the cart as a string-encoded JSON
//! array of `{item_id, quantity}` pairs (the form serializes its selection
//! into a hidden field). This module turns that string into typed lines.
//!
//! ## Decoding Outcomes
//! ```text
//! "[{\"item_id\":\"a\",\"quantity\":3}]"  ──►  Ok(vec![CartLine { .. }])
//! "not json"                              ──►  Err(MalformedCart)
//! "[]"                                    ──►  Err(EmptyCart)
//! more than MAX_CART_LINES entries        ──►  Err(MalformedCart)
//! ```
//!
//! Quantity *values* are not judged here: a line with quantity 0 decodes
//! fine and is rejected by the transaction processor per line, in
//! submission order, so the error names the offending item.

use serde::{Deserialize, Serialize};

use crate::error::SaleRejection;
use crate::MAX_CART_LINES;

/// One requested line of a sale: which item and how many units.
///
/// Order matters: lines are processed in the order the client submitted
/// them, and the first invalid line aborts the whole cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Item to sell (UUID).
    pub item_id: String,

    /// Requested units. Validated by the transaction processor.
    pub quantity: i64,
}

/// Decodes the wire encoding of a cart into ordered lines.
///
/// ## Errors
/// - [`SaleRejection::MalformedCart`] - not valid JSON, wrong shape, or
///   over the line limit
/// - [`SaleRejection::EmptyCart`] - decoded to zero lines
pub fn parse(raw: &str) -> Result<Vec<CartLine>, SaleRejection> {
    let lines: Vec<CartLine> =
        serde_json::from_str(raw).map_err(|e| SaleRejection::MalformedCart(e.to_string()))?;

    if lines.is_empty() {
        return Err(SaleRejection::EmptyCart);
    }

    if lines.len() > MAX_CART_LINES {
        return Err(SaleRejection::MalformedCart(format!(
            "cart cannot have more than {} lines",
            MAX_CART_LINES
        )));
    }

    Ok(lines)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_cart() {
        let raw = r#"[{"item_id":"a","quantity":3},{"item_id":"b","quantity":1}]"#;
        let lines = parse(raw).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].item_id, "a");
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(lines[1].item_id, "b");
    }

    #[test]
    fn test_parse_preserves_submission_order() {
        let raw = r#"[{"item_id":"z","quantity":1},{"item_id":"a","quantity":1}]"#;
        let lines = parse(raw).unwrap();
        assert_eq!(lines[0].item_id, "z");
        assert_eq!(lines[1].item_id, "a");
    }

    #[test]
    fn test_parse_malformed_json() {
        assert!(matches!(
            parse("not json"),
            Err(SaleRejection::MalformedCart(_))
        ));
        assert!(matches!(
            parse(r#"{"item_id":"a"}"#),
            Err(SaleRejection::MalformedCart(_))
        ));
    }

    #[test]
    fn test_parse_empty_cart() {
        assert_eq!(parse("[]"), Err(SaleRejection::EmptyCart));
    }

    #[test]
    fn test_parse_zero_quantity_decodes() {
        // Quantity validation belongs to the transaction processor, which
        // can name the offending item in submission order.
        let lines = parse(r#"[{"item_id":"a","quantity":0}]"#).unwrap();
        assert_eq!(lines[0].quantity, 0);
    }

    #[test]
    fn test_parse_rejects_oversized_cart() {
        let line = r#"{"item_id":"a","quantity":1}"#;
        let raw = format!("[{}]", vec![line; MAX_CART_LINES + 1].join(","));
        assert!(matches!(
            parse(&raw),
            Err(SaleRejection::MalformedCart(_))
        ));
    }
}
