use axum::Json;
use serde::Serialize;

/// Service banner for `GET /`.
#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn root_route() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Marketplace Insights API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}

/// Liveness payload for `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health_route() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
