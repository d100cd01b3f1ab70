//! # HTTP Routes
//!
//! Route registration and shared handler plumbing.
//!
//! ## API Surface
//! ```text
//! GET    /health                  liveness + database ping
//!
//! GET    /api/items               list the caller's items
//! GET    /api/items/available     items with stock on hand (sale form)
//! POST   /api/items               create item
//! GET    /api/items/:id           fetch one item
//! PUT    /api/items/:id           update item
//! DELETE /api/items/:id           delete item
//!
//! GET    /api/categories          list categories
//! POST   /api/categories          create category
//! DELETE /api/categories/:id      delete category (items keep existing)
//!
//! GET    /api/customers           list customers
//! POST   /api/customers           register customer
//! GET    /api/customers/:id       fetch one customer
//!
//! POST   /api/sales               run the sale transaction
//! GET    /api/sales               orders listing (newest first, with totals)
//! GET    /api/sales/:id           one sale with its lines
//!
//! GET    /api/reports/weekly      CSV report for the current week
//! ```
//!
//! Item reads and writes are scoped to the acting account, identified by
//! the `X-User-Id` header. Session management sits in front of this
//! service; here the header is trusted as-is.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;
use crate::error::ApiError;
use stockbook_db::Database;

pub mod categories;
pub mod customers;
pub mod items;
pub mod reports;
pub mod sales;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
}

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/items", get(items::list).post(items::create))
        .route("/api/items/available", get(items::available))
        .route(
            "/api/items/:id",
            get(items::get).put(items::update).delete(items::remove),
        )
        .route(
            "/api/categories",
            get(categories::list).post(categories::create),
        )
        .route("/api/categories/:id", delete(categories::remove))
        .route(
            "/api/customers",
            get(customers::list).post(customers::create),
        )
        .route("/api/customers/:id", get(customers::get))
        .route("/api/sales", get(sales::list).post(sales::create))
        .route("/api/sales/:id", get(sales::get))
        .route("/api/reports/weekly", get(reports::weekly))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Extracts the acting account id from the `X-User-Id` header.
pub fn owner_id(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get("x-user-id")
        .ok_or_else(|| ApiError::unauthorized("X-User-Id header is required"))?;

    let owner = value
        .to_str()
        .map_err(|_| ApiError::unauthorized("X-User-Id header is not valid text"))?
        .trim();

    if owner.is_empty() {
        return Err(ApiError::unauthorized("X-User-Id header is empty"));
    }

    Ok(owner.to_string())
}

/// Liveness endpoint: confirms the process is up and the database answers.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    if state.db.health_check().await {
        (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({ "status": "ok" })),
        )
    } else {
        (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "status": "degraded" })),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_id_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", "user-1".parse().unwrap());
        assert_eq!(owner_id(&headers).unwrap(), "user-1");
    }

    #[test]
    fn test_owner_id_missing_or_blank() {
        let headers = HeaderMap::new();
        assert!(owner_id(&headers).is_err());

        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", "   ".parse().unwrap());
        assert!(owner_id(&headers).is_err());
    }
}
