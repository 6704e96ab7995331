use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::Response,
};
use serde::Serialize;
use tracing::instrument;

use product_store::{ProductCreate, ProductFilter, ProductUpdate};

use crate::core::app_state::AppState;
use crate::core::http::response_envelope::ApiResponse;
use crate::error_handler::{AppError, AppResult};

/// `POST /api/v1/products` — create a product record.
#[instrument(skip_all, fields(marketplace = %payload.marketplace))]
pub async fn create_product_route(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Response> {
    payload.validate().map_err(AppError::BadRequest)?;
    let product = state.store.create_product(payload).await?;
    Ok(ApiResponse::success(product).into_response_with_status(StatusCode::CREATED))
}

/// `GET /api/v1/products` — list products with optional
/// marketplace/category filters and skip/limit pagination.
pub async fn list_products_route(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<Response> {
    let products = state.store.list_products(&filter).await?;
    Ok(ApiResponse::success(products).into_response_with_status(StatusCode::OK))
}

/// `GET /api/v1/products/{id}` — fetch one product.
pub async fn get_product_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let product = state
        .store
        .get_product(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    Ok(ApiResponse::success(product).into_response_with_status(StatusCode::OK))
}

/// `PUT /api/v1/products/{id}` — patch a product.
#[instrument(skip_all, fields(id = %id))]
pub async fn update_product_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Response> {
    payload.validate().map_err(AppError::BadRequest)?;
    let product = state
        .store
        .update_product(&id, payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    Ok(ApiResponse::success(product).into_response_with_status(StatusCode::OK))
}

/// Payload confirming a deletion.
#[derive(Serialize)]
pub struct DeleteProductResponse {
    pub message: &'static str,
}

/// `DELETE /api/v1/products/{id}` — delete a product; stored insights for
/// it are removed by the store's cascade.
#[instrument(skip_all, fields(id = %id))]
pub async fn delete_product_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    if !state.store.delete_product(&id).await? {
        return Err(AppError::NotFound(format!("product {id}")));
    }
    Ok(
        ApiResponse::success(DeleteProductResponse {
            message: "Product deleted successfully",
        })
        .into_response_with_status(StatusCode::OK),
    )
}
