//! Thin client for the local Ollama API.
//!
//! Two exchanges are used:
//! - `POST {endpoint}/api/generate` — one complete (non-streamed) text
//!   generation, deadline-bounded, no retries
//! - `GET {endpoint}/api/tags`      — available model listing
//!
//! Failure kinds are mapped onto [`InferenceError`]: connection failures
//! to `Unreachable`, deadline expiry to `Timeout`, non-2xx statuses to
//! `ServerError` (body snippet carried through), and 2xx responses whose
//! generated text is absent or blank to `EmptyResponse`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error_handler::{ConfigError, InferenceError, Result, make_snippet};

/// Client-wide timeout covering the lightweight catalog exchange;
/// generation calls override it per request.
const CLIENT_TIMEOUT_SECS: u64 = 30;

/// Single-exchange inference contract.
///
/// Implementations are stateless beyond their connection handle; one
/// in-flight request per call, deadline-bounded, no retry policy.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Performs one non-streamed generation request.
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        timeout: Duration,
    ) -> std::result::Result<String, InferenceError>;

    /// Models available at the endpoint, in server order.
    ///
    /// Transport failures are non-fatal: an empty list is returned and the
    /// failure is logged. Absence of models is itself meaningful.
    async fn list_models(&self) -> Vec<String>;
}

/// [`InferenceClient`] backed by a local Ollama server.
///
/// Reuses a single HTTP client; URLs are precomputed at construction.
pub struct OllamaClient {
    client: reqwest::Client,
    url_generate: String,
    url_tags: String,
}

impl OllamaClient {
    /// Creates a client for the given endpoint base URL.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidEndpoint`] if the endpoint is empty or is
    ///   missing an http/https scheme
    /// - transport error if the HTTP client cannot be built
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ConfigError::InvalidEndpoint(endpoint.to_string()).into());
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(CLIENT_TIMEOUT_SECS))
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_generate = format!("{}/api/generate", base);
        let url_tags = format!("{}/api/tags", base);

        Ok(Self {
            client,
            url_generate,
            url_tags,
        })
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    #[instrument(skip_all, fields(model = %model))]
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        timeout: Duration,
    ) -> std::result::Result<String, InferenceError> {
        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
        };

        debug!("POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_send_error(e, timeout))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(InferenceError::ServerError {
                status,
                snippet: make_snippet(&text),
            });
        }

        // A malformed payload and a missing text field are the same failure
        // from the caller's point of view.
        let out: GenerateResponse = resp
            .json()
            .await
            .map_err(|_| InferenceError::EmptyResponse)?;

        if out.response.trim().is_empty() {
            return Err(InferenceError::EmptyResponse);
        }

        Ok(out.response)
    }

    async fn list_models(&self) -> Vec<String> {
        debug!("GET {}", self.url_tags);
        let resp = match self.client.get(&self.url_tags).send().await {
            Ok(resp) => resp,
            Err(err) => {
                warn!(error = %err, "model catalog unavailable");
                return Vec::new();
            }
        };

        if !resp.status().is_success() {
            warn!(status = %resp.status(), "model catalog returned non-success status");
            return Vec::new();
        }

        match resp.json::<TagsResponse>().await {
            Ok(tags) => tags
                .models
                .unwrap_or_default()
                .into_iter()
                .map(|t| t.name)
                .collect(),
            Err(err) => {
                warn!(error = %err, "failed to decode model catalog");
                Vec::new()
            }
        }
    }
}

/// Maps a transport-level send failure onto its [`InferenceError`] kind.
/// Anything that is not a deadline expiry counts as unreachable: no
/// response was obtained.
fn classify_send_error(err: reqwest::Error, timeout: Duration) -> InferenceError {
    if err.is_timeout() {
        InferenceError::Timeout(timeout)
    } else {
        InferenceError::Unreachable(err.to_string())
    }
}

/* ==========================
HTTP payloads
========================== */

/// Request body for `/api/generate` (non-streaming).
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response body for `/api/generate`.
///
/// Minimal shape: the generated text is in `response`. Defaulted so an
/// absent field surfaces as a blank string, caught by the emptiness check.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// One entry of `/api/tags`.
#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

/// Response body for `/api/tags`.
#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Option<Vec<ModelTag>>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn endpoint_must_carry_an_http_scheme() {
        assert!(OllamaClient::new("").is_err());
        assert!(OllamaClient::new("localhost:11434").is_err());
        assert!(OllamaClient::new("ftp://localhost:11434").is_err());
        assert!(OllamaClient::new("http://localhost:11434").is_ok());
        assert!(OllamaClient::new("https://ollama.internal/").is_ok());
    }

    #[test]
    fn trailing_slash_is_normalized_into_urls() {
        let client = OllamaClient::new("http://localhost:11434/").unwrap();
        assert_eq!(client.url_generate, "http://localhost:11434/api/generate");
        assert_eq!(client.url_tags, "http://localhost:11434/api/tags");
    }

    #[test]
    fn generate_request_serializes_with_stream_disabled() {
        let body = GenerateRequest {
            model: "llama3.2",
            prompt: "hello",
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama3.2");
        assert_eq!(json["prompt"], "hello");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn generate_response_defaults_missing_text_to_blank() {
        let out: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(out.response, "");
        let out: GenerateResponse =
            serde_json::from_str(r#"{"response":"hi","done":true}"#).unwrap();
        assert_eq!(out.response, "hi");
    }

    #[test]
    fn tags_response_decodes_in_server_order() {
        let tags: TagsResponse = serde_json::from_str(
            r#"{"models":[{"name":"llama3.2:latest","size":1},{"name":"qwen3:14b"}]}"#,
        )
        .unwrap();
        let names: Vec<String> = tags
            .models
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["llama3.2:latest", "qwen3:14b"]);

        let empty: TagsResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.models.is_none());
    }
}
