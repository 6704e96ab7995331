use serde::Deserialize;

use ai_insight_service::CompetitorView;

/// Request payload for `/api/v1/insights/compare`.
#[derive(Debug, Deserialize)]
pub struct CompareProductsRequest {
    /// Products to compare, minimum two. Order is preserved in the result.
    pub products: Vec<CompetitorView>,
    /// Model override; the configured default is used when absent.
    #[serde(default)]
    pub model: Option<String>,
}
