//! Sale endpoints: cart submission and the orders listing.
//!
//! ## Cart Wire Format
//! The sale form serializes its selection into a JSON string, so the
//! request body nests an encoded array inside a JSON field:
//! ```json
//! {
//!   "customer_id": "550e8400-...",
//!   "items": "[{\"item_id\":\"7c9e...\",\"quantity\":3}]"
//! }
//! ```
//! [`stockbook_core::cart::parse`] decodes the string; the transaction in
//! [`stockbook_db::SaleRepository::checkout`] does everything else. A
//! rejected cart has already been rolled back by the time the error
//! reaches the client.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::{owner_id, AppState};
use stockbook_core::types::sale_total;
use stockbook_core::{cart, Money, SaleLine};
use stockbook_db::SaleSummary;

/// Body for sale submission.
#[derive(Debug, Deserialize)]
pub struct CreateSaleRequest {
    pub customer_id: String,

    /// String-encoded JSON array of cart lines.
    pub items: String,
}

/// A committed sale with its lines and computed total.
#[derive(Debug, Serialize)]
pub struct SaleResponse {
    pub id: String,
    pub customer_id: String,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<SaleLine>,
    pub total_cents: i64,
    pub total: String,
}

/// One row of the orders listing.
#[derive(Debug, Serialize)]
pub struct SaleListEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub customer_name: String,
    pub total_cents: i64,
    pub total: String,
}

impl From<SaleSummary> for SaleListEntry {
    fn from(summary: SaleSummary) -> Self {
        let total = Money::from_cents(summary.total_cents);
        SaleListEntry {
            id: summary.sale_id,
            created_at: summary.created_at,
            customer_name: summary.customer_name,
            total_cents: summary.total_cents,
            total: total.to_decimal_string(),
        }
    }
}

fn sale_response(
    id: String,
    customer_id: String,
    created_at: DateTime<Utc>,
    lines: Vec<SaleLine>,
) -> SaleResponse {
    let total = sale_total(&lines);
    SaleResponse {
        id,
        customer_id,
        created_at,
        total_cents: total.cents(),
        total: total.to_decimal_string(),
        lines,
    }
}

/// POST /api/sales
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateSaleRequest>,
) -> Result<(StatusCode, Json<SaleResponse>), ApiError> {
    let owner = owner_id(&headers)?;

    let lines = cart::parse(&req.items).map_err(ApiError::from)?;

    let sale = state
        .db
        .sales()
        .checkout(&owner, &req.customer_id, &lines)
        .await?;

    let lines = state.db.sales().get_lines(&sale.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(sale_response(
            sale.id,
            sale.customer_id,
            sale.created_at,
            lines,
        )),
    ))
}

/// GET /api/sales
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<SaleListEntry>>, ApiError> {
    let summaries = state.db.sales().list_summaries().await?;
    Ok(Json(summaries.into_iter().map(Into::into).collect()))
}

/// GET /api/sales/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SaleResponse>, ApiError> {
    let sale = state
        .db
        .sales()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Sale", &id))?;

    let lines = state.db.sales().get_lines(&sale.id).await?;

    Ok(Json(sale_response(
        sale.id,
        sale.customer_id,
        sale.created_at,
        lines,
    )))
}
