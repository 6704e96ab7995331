//! Default inference config loaded strictly from environment variables.
//!
//! # Environment variables
//!
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory)
//! - `OLLAMA_MODEL`                = default model (mandatory)
//! - `LLM_TIMEOUT_SECS`            = optional generation deadline (u64)

use crate::config::insight_config::InferenceConfig;
use crate::error_handler::{ConfigError, InsightServiceError, env_opt_u64, must_env};

/// Deadline applied when `LLM_TIMEOUT_SECS` is unset. Local inference can
/// be slow; two minutes keeps cold model loads inside the window.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Resolves the Ollama endpoint strictly from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
///
/// # Errors
///
/// - [`ConfigError::MissingVar`] if both are missing
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
fn ollama_endpoint() -> Result<String, InsightServiceError> {
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }
    if let Ok(port) = std::env::var("OLLAMA_PORT") {
        if !port.trim().is_empty() {
            let _ = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "OLLAMA_PORT",
                    reason: "expected u16 (1..=65535)",
                })?;
            return Ok(format!("http://localhost:{port}"));
        }
    }
    Err(InsightServiceError::Config(ConfigError::MissingVar(
        "OLLAMA_URL or OLLAMA_PORT",
    )))
}

/// Constructs the inference config from environment.
///
/// # Env
/// - `OLLAMA_URL` or `OLLAMA_PORT` (required)
/// - `OLLAMA_MODEL` (required)
/// - `LLM_TIMEOUT_SECS` (optional)
pub fn config_from_env() -> Result<InferenceConfig, InsightServiceError> {
    let endpoint = ollama_endpoint()?;
    let model = must_env("OLLAMA_MODEL")?;
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(InferenceConfig {
        endpoint,
        model,
        timeout_secs,
    })
}
