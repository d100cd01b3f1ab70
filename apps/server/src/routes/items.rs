//! Item endpoints: the inventory CRUD surface.
//!
//! Every operation here is scoped to the acting account; see
//! [`super::owner_id`]. Stock decrements never happen through these
//! handlers - only the sale transaction moves stock down.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::routes::{owner_id, AppState};
use stockbook_core::validation::{
    validate_name, validate_price_cents, validate_stock_quantity,
};
use stockbook_core::Item;
use stockbook_db::repository::item::new_item;

/// Body for item creation.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub quantity: i64,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub price_cents: i64,
}

/// Body for item update. All fields are replaced.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub name: String,
    pub quantity: i64,
    #[serde(default)]
    pub category_id: Option<String>,
    pub price_cents: i64,
}

/// GET /api/items
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Item>>, ApiError> {
    let owner = owner_id(&headers)?;
    let items = state.db.items().list_for_owner(&owner).await?;
    Ok(Json(items))
}

/// GET /api/items/available
pub async fn available(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Item>>, ApiError> {
    let owner = owner_id(&headers)?;
    let items = state.db.items().list_available(&owner).await?;
    Ok(Json(items))
}

/// GET /api/items/:id
pub async fn get(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let owner = owner_id(&headers)?;
    let item = state
        .db
        .items()
        .get_owned(&id, &owner)
        .await?
        .ok_or_else(|| ApiError::not_found("Item", &id))?;
    Ok(Json(item))
}

/// POST /api/items
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let owner = owner_id(&headers)?;

    validate_name(&req.name)?;
    validate_stock_quantity(req.quantity)?;
    validate_price_cents(req.price_cents)?;

    let item = new_item(
        req.name.trim(),
        req.quantity,
        req.category_id,
        req.price_cents,
        &owner,
    );
    state.db.items().insert(&item).await?;

    info!(id = %item.id, owner = %owner, "Item created");

    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/items/:id
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<Item>, ApiError> {
    let owner = owner_id(&headers)?;

    validate_name(&req.name)?;
    validate_stock_quantity(req.quantity)?;
    validate_price_cents(req.price_cents)?;

    let mut item = state
        .db
        .items()
        .get_owned(&id, &owner)
        .await?
        .ok_or_else(|| ApiError::not_found("Item", &id))?;

    item.name = req.name.trim().to_string();
    item.quantity = req.quantity;
    item.category_id = req.category_id;
    item.price_cents = req.price_cents;

    state.db.items().update(&item).await?;

    Ok(Json(item))
}

/// DELETE /api/items/:id
///
/// Items that already appear on a sale line are part of history and come
/// back as a validation error (foreign key in the schema).
pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let owner = owner_id(&headers)?;
    state.db.items().delete(&id, &owner).await?;

    info!(id = %id, owner = %owner, "Item deleted");

    Ok(StatusCode::NO_CONTENT)
}
