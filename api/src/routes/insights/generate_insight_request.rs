use serde::Deserialize;

use ai_insight_service::{CompetitorView, InlineProduct};
use product_store::InsightType;

/// Request payload for `/api/v1/insights/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateInsightRequest {
    /// Stored product id. Mutually exclusive with `product`.
    #[serde(default)]
    pub product_id: Option<String>,
    /// Inline product attributes for ad-hoc runs.
    #[serde(default)]
    pub product: Option<InlineProduct>,
    /// Kind of insight to generate; defaults to `general`.
    #[serde(default)]
    pub insight_type: InsightType,
    /// Free-text context appended to the prompt verbatim.
    #[serde(default)]
    pub context: Option<String>,
    /// Opt into competitor framing without inline competitor data.
    #[serde(default)]
    pub include_competitors: bool,
    /// Competitor summaries for `competitor_analysis`.
    #[serde(default)]
    pub competitors: Vec<CompetitorView>,
    /// Model override; the configured default is used when absent.
    #[serde(default)]
    pub model: Option<String>,
}
