//! Customer endpoints: the registry behind the sale form.
//!
//! The tax id is the business key; the database enforces uniqueness and a
//! duplicate registration comes back as a 409.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::routes::AppState;
use stockbook_core::validation::{validate_name, validate_tax_id};
use stockbook_core::Customer;
use stockbook_db::NewCustomer;

/// Body for customer registration.
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub tax_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// GET /api/customers
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, ApiError> {
    let customers = state.db.customers().list().await?;
    Ok(Json(customers))
}

/// GET /api/customers/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    let customer = state
        .db
        .customers()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer", &id))?;
    Ok(Json(customer))
}

/// POST /api/customers
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    validate_name(&req.name)?;
    validate_tax_id(&req.tax_id)?;

    let customer = state
        .db
        .customers()
        .insert(NewCustomer {
            name: req.name.trim().to_string(),
            tax_id: req.tax_id.trim().to_string(),
            email: req.email,
            phone: req.phone,
            address: req.address,
            city: req.city,
            state: req.state,
        })
        .await?;

    info!(id = %customer.id, "Customer registered");

    Ok((StatusCode::CREATED, Json(customer)))
}
