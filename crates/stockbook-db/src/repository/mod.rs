//! # Repository Module
//!
//! Database repository implementations for Stockbook.
//!
//! Each repository wraps the pool and isolates the SQL for one aggregate.
//! Handlers never write SQL; they call repository methods:
//!
//! ```text
//! HTTP handler ──► db.items().list_for_owner(owner) ──► SQL ──► SQLite
//! ```
//!
//! ## Available Repositories
//!
//! - [`item::ItemRepository`] - Stock item CRUD
//! - [`category::CategoryRepository`] - Category list/create/delete
//! - [`customer::CustomerRepository`] - Customer registry
//! - [`sale::SaleRepository`] - Checkout transaction, sale reads, report rows

pub mod category;
pub mod customer;
pub mod item;
pub mod sale;
