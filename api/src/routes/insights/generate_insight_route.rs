use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::Response,
};
use tracing::instrument;

use ai_insight_service::{InsightRequest, ProductRef};

use crate::core::app_state::AppState;
use crate::core::http::response_envelope::ApiResponse;
use crate::error_handler::{AppError, AppResult};
use crate::routes::insights::generate_insight_request::GenerateInsightRequest;

/// `POST /api/v1/insights/generate` — generate and persist one insight.
///
/// Request-level problems (unknown product id, missing competitors, an
/// ambiguous product reference) come back as 4xx. Inference failures do
/// not: they are recorded in the returned insight's `error` field.
#[instrument(skip_all, fields(insight_type = %payload.insight_type.as_str()))]
pub async fn generate_insight_route(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenerateInsightRequest>,
) -> AppResult<Response> {
    let product =
        ProductRef::resolve(payload.product_id, payload.product).map_err(AppError::from)?;

    let request = InsightRequest {
        product,
        insight_type: payload.insight_type,
        context: payload.context,
        include_competitors: payload.include_competitors,
        competitors: payload.competitors,
        model: payload.model,
    };

    let insight = state.orchestrator.generate_insight(request).await?;
    Ok(ApiResponse::success(insight).into_response_with_status(StatusCode::OK))
}
