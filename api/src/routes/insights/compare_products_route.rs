use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::Response,
};
use tracing::instrument;

use crate::core::app_state::AppState;
use crate::core::http::response_envelope::ApiResponse;
use crate::error_handler::AppResult;
use crate::routes::insights::compare_products_request::CompareProductsRequest;

/// `POST /api/v1/insights/compare` — one comparative narrative over the
/// supplied products.
///
/// Comparisons are ad-hoc: the result is returned directly and never
/// persisted. Fewer than two products is a 4xx; an inference failure is
/// reported inline in the result.
#[instrument(skip_all, fields(count = payload.products.len()))]
pub async fn compare_products_route(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CompareProductsRequest>,
) -> AppResult<Response> {
    let result = state
        .orchestrator
        .compare(payload.products, payload.model)
        .await?;
    Ok(ApiResponse::success(result).into_response_with_status(StatusCode::OK))
}
