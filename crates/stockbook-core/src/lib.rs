//! # stockbook-core: Pure Domain Logic for Stockbook
//!
//! This crate is the heart of the inventory and sales system. It contains
//! the domain model and business rules as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Stockbook Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/server (axum)                           │   │
//! │  │    item CRUD ──► sale submission ──► weekly report              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockbook-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│   │   │
//! │  │   │   Item    │  │   Money   │  │ CartLine  │  │   rules   │   │   │
//! │  │   │   Sale    │  │  (cents)  │  │  parsing  │  │  checks   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockbook-db (Database Layer)                    │   │
//! │  │        SQLite queries, migrations, checkout transaction          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Category, Customer, Sale, SaleLine)
//! - [`money`] - Money type with integer cent arithmetic (no floating point!)
//! - [`cart`] - Cart wire decoding for sale submissions
//! - [`error`] - Typed domain errors, including sale rejection reasons
//! - [`validation`] - Input validation rules

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// Re-exports for convenience: `use stockbook_core::Money` instead of
// `use stockbook_core::money::Money`.
pub use cart::CartLine;
pub use error::{SaleRejection, ValidationError};
pub use money::Money;
pub use types::*;

/// Maximum number of lines allowed in a single submitted cart.
///
/// Prevents runaway submissions; a legitimate sale never comes close.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity accepted for a single stock adjustment or cart line.
///
/// Guards against typos (1000 instead of 10) on manual entry.
pub const MAX_LINE_QUANTITY: i64 = 999;
