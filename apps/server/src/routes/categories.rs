//! Category endpoints.
//!
//! Categories are shared across accounts (a small shop runs one catalog).
//! Deleting a category never deletes items; the schema nulls their
//! reference instead.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::routes::AppState;
use stockbook_core::validation::validate_name;
use stockbook_core::Category;

/// Body for category creation.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

/// GET /api/categories
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state.db.categories().list().await?;
    Ok(Json(categories))
}

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    validate_name(&req.name)?;

    let category = state.db.categories().insert(req.name.trim()).await?;

    info!(id = %category.id, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

/// DELETE /api/categories/:id
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.db.categories().delete(&id).await?;

    info!(id = %id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
