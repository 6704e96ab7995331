use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};
use serde::Serialize;

use crate::core::app_state::AppState;
use crate::core::http::response_envelope::ApiResponse;

/// Response payload for `/api/v1/insights/models`.
#[derive(Serialize)]
pub struct ListModelsResponse {
    /// Models available at the inference endpoint, in server order.
    /// Empty when the endpoint is unreachable.
    pub models: Vec<String>,
    /// The configured default model.
    pub current_model: String,
}

/// `GET /api/v1/insights/models` — available model catalog.
pub async fn list_models_route(State(state): State<Arc<AppState>>) -> Response {
    let models = state.orchestrator.available_models().await;
    ApiResponse::success(ListModelsResponse {
        models,
        current_model: state.orchestrator.default_model().to_string(),
    })
    .into_response_with_status(StatusCode::OK)
}
