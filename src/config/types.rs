//! Configuration Types
//!
//! All configuration structures with defaults matching the documented pipeline
//! behavior. Supports global (~/.config/codegenius/) and project (.codegenius/)
//! level configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{analysis, enrichment, network};
use crate::types::{GeniusError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// File walking and extraction settings
    pub analysis: AnalysisConfig,

    /// AI enrichment settings
    pub enrichment: EnrichmentConfig,

    /// LLM provider settings
    pub llm: LlmConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            analysis: AnalysisConfig::default(),
            enrichment: EnrichmentConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `GeniusError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.analysis.preview_chars == 0 {
            return Err(GeniusError::Config(
                "analysis.preview_chars must be greater than 0".to_string(),
            ));
        }

        if self.analysis.max_file_size == 0 {
            return Err(GeniusError::Config(
                "analysis.max_file_size must be greater than 0".to_string(),
            ));
        }

        if self.analysis.extraction_concurrency == 0 {
            return Err(GeniusError::Config(
                "analysis.extraction_concurrency must be greater than 0".to_string(),
            ));
        }

        if self.enrichment.concurrency == 0 {
            return Err(GeniusError::Config(
                "enrichment.concurrency must be greater than 0".to_string(),
            ));
        }

        if self.enrichment.call_timeout_secs == 0 {
            return Err(GeniusError::Config(
                "enrichment.call_timeout_secs must be greater than 0".to_string(),
            ));
        }

        for (name, value) in [
            ("enrichment.file_temperature", self.enrichment.file_temperature),
            (
                "enrichment.function_temperature",
                self.enrichment.function_temperature,
            ),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(GeniusError::Config(format!(
                    "{} must be between 0.0 and 2.0, got {}",
                    name, value
                )));
            }
        }

        if self.llm.timeout_secs == 0 {
            return Err(GeniusError::Config(
                "llm.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Analysis Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory names pruned at any depth (exact name match)
    pub exclude_dirs: Vec<String>,

    /// Characters of each file kept as the prompt preview
    pub preview_chars: usize,

    /// Maximum file size in bytes
    pub max_file_size: u64,

    /// Also honor .gitignore files while walking
    pub respect_gitignore: bool,

    /// Files extracted concurrently
    pub extraction_concurrency: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: analysis::DEFAULT_EXCLUDED_DIRS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            preview_chars: analysis::DEFAULT_PREVIEW_CHARS,
            max_file_size: analysis::DEFAULT_MAX_FILE_SIZE,
            respect_gitignore: false,
            extraction_concurrency: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }
}

// =============================================================================
// Enrichment Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Run AI enrichment when a provider is available
    pub enabled: bool,

    /// Functions per file that get their own model call; 0 sends none and
    /// every function gets the placeholder
    pub function_cap: usize,

    /// Maximum concurrent model calls
    pub concurrency: usize,

    /// Per-call timeout in seconds
    pub call_timeout_secs: u64,

    /// Temperature for whole-file analysis
    pub file_temperature: f32,

    /// Temperature for per-function analysis
    pub function_temperature: f32,
}

impl EnrichmentConfig {
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            function_cap: enrichment::DEFAULT_FUNCTION_CAP,
            concurrency: enrichment::DEFAULT_CONCURRENCY,
            call_timeout_secs: enrichment::DEFAULT_CALL_TIMEOUT_SECS,
            file_temperature: enrichment::FILE_TEMPERATURE,
            function_temperature: enrichment::FUNCTION_TEMPERATURE,
        }
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name: gemini, openai, ollama
    pub provider: String,

    /// Model name (provider default when unset)
    pub model: Option<String>,

    /// API base URL override
    pub api_base: Option<String>,

    /// API key; falls back to the provider's environment variable.
    /// Never serialized to output.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum tokens to generate
    pub max_tokens: usize,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: None,
            api_base: None,
            api_key: None,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            max_tokens: network::DEFAULT_MAX_TOKENS,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
