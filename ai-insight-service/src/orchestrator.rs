//! Orchestration of insight generation and product comparison.
//!
//! Composes the prompt builder and the inference client, and persists the
//! outcome through the product store. The contract callers rely on:
//! request-level problems (unknown product, missing competitors) and
//! storage failures come back as errors, while inference failures are
//! captured into the returned record — a failed generation is still a
//! stored, auditable insight, not an exception.
//!
//! Stateless between calls; the collaborator handles are shared-read and
//! never mutated after construction.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use product_store::{Insight, InsightType, ProductStore};

use crate::config::insight_config::InferenceConfig;
use crate::error_handler::{RequestError, Result};
use crate::prompt::{CompetitorView, ProductView, build_comparison_prompt, build_prompt};
use crate::services::ollama_client::InferenceClient;

/// Ad-hoc product attributes for insight generation without a stored
/// record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineProduct {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Short free-text feature summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
}

impl From<&InlineProduct> for ProductView {
    fn from(inline: &InlineProduct) -> Self {
        Self {
            name: inline.name.clone(),
            description: inline.features.clone(),
            category: None,
            price: inline.price,
            marketplace: None,
        }
    }
}

/// Target of an insight request: a stored product or inline attributes.
#[derive(Debug, Clone)]
pub enum ProductRef {
    ById(String),
    Inline(InlineProduct),
}

impl ProductRef {
    /// Resolves the two optional wire fields into a single target. The two
    /// are mutually exclusive: both set and neither set are request errors.
    pub fn resolve(
        product_id: Option<String>,
        inline: Option<InlineProduct>,
    ) -> std::result::Result<Self, RequestError> {
        match (product_id, inline) {
            (Some(_), Some(_)) => Err(RequestError::AmbiguousProductRef),
            (Some(id), None) => Ok(Self::ById(id)),
            (None, Some(product)) => Ok(Self::Inline(product)),
            (None, None) => Err(RequestError::MissingProductRef),
        }
    }
}

/// Transient insight-generation request, constructed by the caller.
#[derive(Debug, Clone)]
pub struct InsightRequest {
    pub product: ProductRef,
    pub insight_type: InsightType,
    /// Free-text context appended to the prompt verbatim.
    pub context: Option<String>,
    /// Opt-in to competitor framing without inline competitor data.
    pub include_competitors: bool,
    pub competitors: Vec<CompetitorView>,
    /// Model override; the configured default is used when absent.
    pub model: Option<String>,
}

/// Outcome of a product comparison.
///
/// Ephemeral: returned to the caller, never persisted. Echoes the input
/// products in the order they were supplied — the only ordering guarantee
/// in the system. Exactly one of `narrative` / `error` is set.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub products: Vec<CompetitorView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub model: String,
}

impl ComparisonResult {
    pub fn is_success(&self) -> bool {
        self.narrative.is_some()
    }
}

/// Composes prompt building, inference and persistence.
pub struct InsightOrchestrator {
    store: Arc<dyn ProductStore>,
    llm: Arc<dyn InferenceClient>,
    cfg: InferenceConfig,
}

impl InsightOrchestrator {
    pub fn new(
        store: Arc<dyn ProductStore>,
        llm: Arc<dyn InferenceClient>,
        cfg: InferenceConfig,
    ) -> Self {
        Self { store, llm, cfg }
    }

    /// Generates one insight and persists it.
    ///
    /// A single inference attempt is made; on any inference failure the
    /// kind is written into the record's `error` field and the record is
    /// stored and returned — failed attempts remain auditable.
    #[instrument(skip_all, fields(insight_type = %request.insight_type.as_str()))]
    pub async fn generate_insight(&self, request: InsightRequest) -> Result<Insight> {
        let (product_id, view) = self.resolve_view(&request.product).await?;
        validate_preconditions(&request)?;

        let prompt = build_prompt(
            request.insight_type,
            &view,
            request.context.as_deref(),
            &request.competitors,
        );
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.cfg.model)
            .to_string();

        let insight = match self.llm.generate(&prompt, &model, self.cfg.timeout()).await {
            Ok(text) => {
                info!(model = %model, "insight generated");
                Insight::generated(product_id, request.insight_type, text, model)
            }
            Err(err) => {
                warn!(model = %model, error = %err, "inference failed; storing failed record");
                Insight::failed(
                    product_id,
                    request.insight_type,
                    failure_message(err.kind(), &err.to_string()),
                    model,
                )
            }
        };

        Ok(self.store.save_insight(insight).await?)
    }

    /// Builds a single comparative prompt over the given products and runs
    /// one inference call.
    ///
    /// Needs at least two products. The result is returned directly and
    /// never persisted; inference failures are reported inline.
    #[instrument(skip_all, fields(count = products.len()))]
    pub async fn compare(
        &self,
        products: Vec<CompetitorView>,
        model: Option<String>,
    ) -> Result<ComparisonResult> {
        if products.len() < 2 {
            return Err(RequestError::TooFewProducts {
                got: products.len(),
            }
            .into());
        }

        let prompt = build_comparison_prompt(&products);
        let model = model.unwrap_or_else(|| self.cfg.model.clone());

        let result = match self.llm.generate(&prompt, &model, self.cfg.timeout()).await {
            Ok(text) => ComparisonResult {
                products,
                narrative: Some(text),
                error: None,
                model,
            },
            Err(err) => {
                warn!(model = %model, error = %err, "comparison inference failed");
                ComparisonResult {
                    products,
                    narrative: None,
                    error: Some(failure_message(err.kind(), &err.to_string())),
                    model,
                }
            }
        };

        Ok(result)
    }

    /// Models available at the configured endpoint; empty when the
    /// endpoint is unreachable.
    pub async fn available_models(&self) -> Vec<String> {
        self.llm.list_models().await
    }

    /// The configured default model name.
    pub fn default_model(&self) -> &str {
        &self.cfg.model
    }

    /* --------------------- Internals --------------------- */

    /// Resolves the request target into a normalized view, plus the source
    /// product id when the target is a stored record.
    async fn resolve_view(&self, product: &ProductRef) -> Result<(Option<String>, ProductView)> {
        match product {
            ProductRef::ById(id) => {
                let found = self.store.get_product(id).await?;
                let product = found.ok_or_else(|| RequestError::ProductNotFound(id.clone()))?;
                Ok((Some(product.id.clone()), ProductView::from(&product)))
            }
            ProductRef::Inline(inline) => Ok((None, ProductView::from(inline))),
        }
    }
}

/// Insight-type preconditions, checked before any inference call.
fn validate_preconditions(request: &InsightRequest) -> std::result::Result<(), RequestError> {
    if request.insight_type == InsightType::CompetitorAnalysis
        && request.competitors.is_empty()
        && !request.include_competitors
    {
        return Err(RequestError::MissingCompetitors);
    }
    Ok(())
}

/// Human-readable failure text embedding the failure kind.
fn failure_message(kind: &str, detail: &str) -> String {
    format!("inference failed ({kind}): {detail}")
}
