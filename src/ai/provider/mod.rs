//! LLM Provider Abstraction
//!
//! The enrichment stage sees a language model only as
//! `generate(prompt, temperature) -> text`. Providers are passed in explicitly,
//! so concurrent runs can use independently configured or mocked models.

mod gemini;
mod ollama;
mod openai;

pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

pub use crate::types::{ErrorCategory, ErrorClassifier, LlmError};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::LlmConfig;
use crate::types::{GeniusError, Result};

/// Shared provider handle for concurrent enrichment calls
pub type SharedProvider = Arc<dyn LlmProvider>;

/// Fallible text generation
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate text for `prompt`. No retries.
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;
}

pub const SUPPORTED_PROVIDERS: &[&str] = &["gemini", "openai", "ollama"];

/// Create a shared provider from configuration.
///
/// A missing credential yields [`GeniusError::EnrichmentUnavailable`]; an unknown
/// provider name or malformed endpoint yields [`GeniusError::Config`].
pub fn create_provider(config: &LlmConfig) -> Result<SharedProvider> {
    match config.provider.as_str() {
        "gemini" => Ok(Arc::new(GeminiProvider::new(config)?)),
        "openai" => Ok(Arc::new(OpenAiProvider::new(config)?)),
        "ollama" => Ok(Arc::new(OllamaProvider::new(config)?)),
        other => Err(GeniusError::Config(format!(
            "Unknown provider: {}. Supported: {}",
            other,
            SUPPORTED_PROVIDERS.join(", ")
        ))),
    }
}

// =============================================================================
// Shared HTTP plumbing
// =============================================================================

fn http_client(provider: &str, timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| {
            GeniusError::Config(format!("Failed to create HTTP client for {}: {}", provider, e))
        })
}

/// Turn a non-success status into a classified [`LlmError`]
async fn check_status(response: reqwest::Response, provider: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ErrorClassifier::classify_http_status(
        status.as_u16(),
        &format!("API error ({}): {}", status, body),
        provider,
    )
    .into())
}

/// Reject empty replies so callers can treat them as failures
fn non_empty(text: String, provider: &str) -> Result<String> {
    if text.trim().is_empty() {
        return Err(
            LlmError::with_provider(ErrorCategory::ParseError, "Empty response", provider).into(),
        );
    }
    Ok(text)
}
