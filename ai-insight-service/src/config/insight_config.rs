use std::time::Duration;

/// Configuration for the insight inference path.
///
/// Constructed once at startup and passed by reference into the
/// orchestrator and client constructors — no ambient/global lookup.
///
/// # Fields
///
/// - `endpoint`: local inference server base URL (e.g. `http://localhost:11434`).
/// - `model`: default model used when a request carries no override.
/// - `timeout_secs`: deadline for one generation request.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Inference endpoint base URL.
    pub endpoint: String,

    /// Default model identifier (e.g. `"llama3.2"`).
    pub model: String,

    /// Per-request generation deadline, in seconds.
    pub timeout_secs: u64,
}

impl InferenceConfig {
    /// The generation deadline as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
