//! Unified error handling for `ai-insight-service`.
//!
//! One top-level error type [`InsightServiceError`] for the whole crate,
//! with domain-specific kinds grouped in nested enums ([`RequestError`],
//! [`InferenceError`], [`ConfigError`]). Small helpers for reading env
//! variables return the unified [`Result<T>`] alias.
//!
//! Messages carry the `[AI Insight Service]` suffix to simplify attribution
//! in logs.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

pub use product_store::StorageError;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, InsightServiceError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-insight-service` crate.
///
/// Variants wrap domain-specific enums. Note the split the orchestrator
/// maintains: [`RequestError`] and [`StorageError`] propagate to callers,
/// while [`InferenceError`] is captured into the insight record on the
/// generation path — the `Inference` variant exists for callers driving
/// the client directly.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum InsightServiceError {
    /// Invalid request input; generation is never attempted.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// A single inference exchange failed.
    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// The persistence collaborator failed. Never masked: a silently-lost
    /// insight is worse than a visible failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration/validation errors (startup/readiness).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Underlying HTTP client error (construction, not a call).
    #[error("[AI Insight Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/* ------------------------------------------------------------------------- */
/* Request errors                                                            */
/* ------------------------------------------------------------------------- */

/// Bad request input, surfaced immediately to the caller before any
/// inference call is made.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RequestError {
    /// `competitor_analysis` was requested without competitor data and
    /// without the include-competitors opt-in.
    #[error("[AI Insight Service] competitor_analysis requires at least one competitor")]
    MissingCompetitors,

    /// A comparison needs two or more products.
    #[error("[AI Insight Service] comparison requires at least 2 products, got {got}")]
    TooFewProducts { got: usize },

    /// The referenced product id is unknown to the store.
    #[error("[AI Insight Service] product not found: {0}")]
    ProductNotFound(String),

    /// The request carries both a stored product id and inline attributes;
    /// the two are mutually exclusive.
    #[error("[AI Insight Service] request carries both a product id and inline attributes")]
    AmbiguousProductRef,

    /// The request carries neither a stored product id nor inline
    /// attributes.
    #[error("[AI Insight Service] request carries neither a product id nor inline attributes")]
    MissingProductRef,
}

/* ------------------------------------------------------------------------- */
/* Inference errors                                                          */
/* ------------------------------------------------------------------------- */

/// Failure kinds of a single inference exchange. One attempt per call; no
/// retries anywhere in the core.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum InferenceError {
    /// No connection to the inference endpoint could be established.
    #[error("[AI Insight Service] inference endpoint unreachable: {0}")]
    Unreachable(String),

    /// No response within the configured deadline.
    #[error("[AI Insight Service] inference timed out after {0:?}")]
    Timeout(Duration),

    /// Non-success status from the endpoint; the body snippet is carried
    /// through.
    #[error("[AI Insight Service] inference endpoint returned {status}: {snippet}")]
    ServerError {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Short snippet of the response body.
        snippet: String,
    },

    /// Success status, but the generated text field is absent or blank.
    #[error("[AI Insight Service] inference endpoint returned an empty response")]
    EmptyResponse,
}

impl InferenceError {
    /// Short stable tag naming the failure kind; embedded in failed insight
    /// records.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unreachable(_) => "unreachable",
            Self::Timeout(_) => "timeout",
            Self::ServerError { .. } => "server_error",
            Self::EmptyResponse => "empty_response",
        }
    }
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[AI Insight Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (ports, timeouts).
    #[error("[AI Insight Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `OLLAMA_PORT`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u64`).
        reason: &'static str,
    },

    /// Endpoint is empty or missing an http/https scheme.
    #[error("[AI Insight Service] invalid inference endpoint: {0}")]
    InvalidEndpoint(String),
}

/* ------------------------------------------------------------------------- */
/* Helpers                                                                   */
/* ------------------------------------------------------------------------- */

/// Trims a response body down to a short, log-friendly snippet.
pub fn make_snippet(text: &str) -> String {
    text.chars().take(240).collect()
}

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// [`ConfigError::MissingVar`] if the variable is absent or empty.
pub fn must_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// [`ConfigError::InvalidNumber`] if the variable is set but not a valid
/// `u64`.
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.parse::<u64>().map(Some).map_err(|_| {
            InsightServiceError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        _ => Ok(None),
    }
}
