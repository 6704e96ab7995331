//! Insight-generation core for the marketplace backend.
//!
//! The crate turns a stored product (or a set of inline product summaries)
//! into a structured prompt, submits it to a local Ollama endpoint, and
//! interprets the response:
//!
//! - [`prompt`] — pure prompt construction per [`InsightType`], no I/O
//! - [`services::ollama_client`] — one deadline-bounded inference exchange
//! - [`orchestrator`] — composition: resolve, validate, generate, persist
//! - [`config`] — immutable inference configuration, env constructors
//! - [`error_handler`] — unified error taxonomy
//!
//! [`InsightType`]: product_store::InsightType

pub mod config;
pub mod error_handler;
pub mod orchestrator;
pub mod prompt;
pub mod services;

pub use config::insight_config::InferenceConfig;
pub use error_handler::{InferenceError, InsightServiceError, RequestError, Result};
pub use orchestrator::{
    ComparisonResult, InlineProduct, InsightOrchestrator, InsightRequest, ProductRef,
};
pub use prompt::{CompetitorView, ProductView};
pub use services::ollama_client::{InferenceClient, OllamaClient};
