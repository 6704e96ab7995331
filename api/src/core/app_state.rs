use std::sync::Arc;

use ai_insight_service::InsightOrchestrator;
use product_store::ProductStore;

/// Shared state for all HTTP handlers.
///
/// Both handles are long-lived and shared-read; nothing here is mutated
/// after startup.
#[derive(Clone)]
pub struct AppState {
    /// Product and insight persistence.
    pub store: Arc<dyn ProductStore>,
    /// Insight generation core.
    pub orchestrator: Arc<InsightOrchestrator>,
}
