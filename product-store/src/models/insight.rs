use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of analytical insight to produce for a product.
///
/// A closed set: template selection in the insight core is an exhaustive
/// `match` over these variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// Balanced overview: market fit, pricing sanity, improvements.
    #[default]
    General,
    /// Demand trend direction, seasonality, growth/decline signals.
    TrendAnalysis,
    /// Price competitiveness and a recommended price range.
    PricingInsight,
    /// Side-by-side judgment against a supplied competitor set.
    CompetitorAnalysis,
}

impl InsightType {
    /// Wire tag, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::TrendAnalysis => "trend_analysis",
            Self::PricingInsight => "pricing_insight",
            Self::CompetitorAnalysis => "competitor_analysis",
        }
    }
}

/// A generated (or failed) insight record.
///
/// Invariant: exactly one of `content` / `error` is set — never both, never
/// neither. Records are only built through [`Insight::generated`] and
/// [`Insight::failed`], so the invariant holds by construction. Records are
/// created once and never mutated; deletion follows the product-deletion
/// cascade in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Record identifier (UUID string).
    pub id: String,
    /// Source product id; `None` for ad-hoc runs on inline attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub insight_type: InsightType,
    /// Generated narrative. Set on success only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Human-readable failure message. Set on failure only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Name of the model that produced (or failed to produce) the content.
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

impl Insight {
    /// Builds a successful generation record.
    pub fn generated(
        product_id: Option<String>,
        insight_type: InsightType,
        content: String,
        model: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            product_id,
            insight_type,
            content: Some(content),
            error: None,
            model,
            generated_at: Utc::now(),
        }
    }

    /// Builds a failed generation record. Failed attempts are stored too,
    /// so they remain auditable.
    pub fn failed(
        product_id: Option<String>,
        insight_type: InsightType,
        error: String,
        model: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            product_id,
            insight_type,
            content: None,
            error: Some(error),
            model,
            generated_at: Utc::now(),
        }
    }

    /// Whether generation succeeded.
    pub fn is_success(&self) -> bool {
        self.content.is_some()
    }
}
