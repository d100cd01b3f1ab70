//! Report endpoint.
//!
//! GET /api/reports/weekly returns the current week's sales as a CSV
//! download. A copy lands in the configured reports directory as an audit
//! trail; the response body is the same bytes.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Local;

use crate::error::ApiError;
use crate::report;
use crate::routes::AppState;

/// GET /api/reports/weekly
pub async fn weekly(State(state): State<AppState>) -> Result<Response, ApiError> {
    let start = report::week_start(Local::now());
    let sales = state.db.sales().list_summaries_since(start).await?;

    let file = report::generate(&sales, &state.config.reports_dir)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        file.bytes,
    )
        .into_response();

    Ok(response)
}
