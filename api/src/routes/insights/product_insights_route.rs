use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use serde::Serialize;

use product_store::Insight;

use crate::core::app_state::AppState;
use crate::core::http::response_envelope::ApiResponse;
use crate::error_handler::AppResult;

/// Response payload for `/api/v1/insights/product/{product_id}`.
#[derive(Serialize)]
pub struct ProductInsightsResponse {
    pub product_id: String,
    pub count: usize,
    /// Stored insights in creation order, failed attempts included.
    pub insights: Vec<Insight>,
}

/// `GET /api/v1/insights/product/{product_id}` — stored insights for a
/// product, in creation order.
pub async fn product_insights_route(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
) -> AppResult<Response> {
    let insights = state.store.list_insights(&product_id).await?;
    Ok(ApiResponse::success(ProductInsightsResponse {
        count: insights.len(),
        product_id,
        insights,
    })
    .into_response_with_status(StatusCode::OK))
}
