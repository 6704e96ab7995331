//! HTTP boundary for the marketplace insights backend.
//!
//! Thin wrappers over the core contracts: routes deserialize the wire
//! shapes, call into the orchestrator or the store, and wrap outcomes in
//! the response envelope. No insight logic lives here.

use std::{env, error::Error, sync::Arc};

mod core;
mod error_handler;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tracing::info;

use ai_insight_service::{InsightOrchestrator, OllamaClient, config::default_config};
use product_store::{InMemoryStore, ProductStore};

use crate::core::app_state::AppState;
use crate::routes::health_route::{health_route, root_route};
use crate::routes::insights::{
    compare_products_route::compare_products_route,
    generate_insight_route::generate_insight_route, list_models_route::list_models_route,
    product_insights_route::product_insights_route,
};
use crate::routes::products::products_route::{
    create_product_route, delete_product_route, get_product_route, list_products_route,
    update_product_route,
};

pub async fn start() -> Result<(), Box<dyn Error>> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".into());

    let cfg = default_config::config_from_env()?;
    let store: Arc<dyn ProductStore> = Arc::new(InMemoryStore::new());
    let llm = Arc::new(OllamaClient::new(&cfg.endpoint)?);
    let orchestrator = Arc::new(InsightOrchestrator::new(store.clone(), llm, cfg));

    let state = Arc::new(AppState {
        store,
        orchestrator,
    });

    let app = Router::new()
        .route("/", get(root_route))
        .route("/health", get(health_route))
        .route(
            "/api/v1/products",
            post(create_product_route).get(list_products_route),
        )
        .route(
            "/api/v1/products/{id}",
            get(get_product_route)
                .put(update_product_route)
                .delete(delete_product_route),
        )
        .route("/api/v1/insights/generate", post(generate_insight_route))
        .route(
            "/api/v1/insights/product/{product_id}",
            get(product_insights_route),
        )
        .route("/api/v1/insights/compare", post(compare_products_route))
        .route("/api/v1/insights/models", get(list_models_route))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&host_url).await?;
    info!(%host_url, "marketplace insights API listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
