//! Unified Error Type System
//!
//! Centralized error types for the whole pipeline.
//!
//! ## Propagation
//!
//! - **RepositoryUnreadable**: fatal, aborts the run
//! - **FileDecodeSkipped**: per file, the file is left out of the analysis
//! - **EnrichmentUnavailable**: global, enrichment is skipped for the run
//! - **EnrichmentCallFailed**: per call, replaced by a literal fallback string
//!
//! Only fatal errors, configuration errors and cancellation ever reach the caller
//! of [`crate::pipeline::Pipeline::run`]. Everything else degrades into placeholder
//! text inside the rendered document.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Classification of language-model failures.
///
/// The core never retries, so categories only feed logging and fallback text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rate limited or quota exhausted
    RateLimit,
    /// Authentication failed (missing or rejected credential)
    Auth,
    /// Network/connectivity issues
    Network,
    /// Provider unavailable or model not found
    Unavailable,
    /// Invalid request
    BadRequest,
    /// Response could not be parsed or was empty
    ParseError,
    /// Temporary server issues
    Transient,
    /// Unknown error
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::Transient => write!(f, "TRANSIENT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// =============================================================================
// LLM Error
// =============================================================================

/// Language-model error with category and provider context
#[derive(Debug, Clone)]
pub struct LlmError {
    pub category: ErrorCategory,
    pub message: String,
    pub provider: Option<String>,
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for LlmError {}

impl LlmError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
        }
    }

    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            provider: Some(provider.into()),
        }
    }

    /// Add provider context to existing error
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Maps transport failures onto [`ErrorCategory`]
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an HTTP status code returned by a provider
    pub fn classify_http_status(status: u16, message: &str, provider: &str) -> LlmError {
        let category = match status {
            429 => ErrorCategory::RateLimit,
            401 | 403 => ErrorCategory::Auth,
            400 | 422 => ErrorCategory::BadRequest,
            404 => ErrorCategory::Unavailable,
            500 | 502 | 503 | 504 => ErrorCategory::Transient,
            _ => ErrorCategory::Unknown,
        };
        LlmError::with_provider(category, message, provider)
    }

    /// Classify a reqwest transport error
    pub fn classify_transport(err: &reqwest::Error, provider: &str) -> LlmError {
        let category = if err.is_timeout() || err.is_connect() {
            ErrorCategory::Network
        } else if err.is_decode() {
            ErrorCategory::ParseError
        } else if err.is_request() {
            ErrorCategory::BadRequest
        } else {
            ErrorCategory::Unknown
        };
        LlmError::with_provider(category, err.to_string(), provider)
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum GeniusError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Pipeline Errors
    // -------------------------------------------------------------------------
    #[error("Repository unreadable at {}: {source}", path.display())]
    RepositoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Skipped {path}: {reason}")]
    FileDecodeSkipped { path: String, reason: String },

    #[error("Enrichment unavailable: {0}")]
    EnrichmentUnavailable(String),

    #[error("Enrichment call failed for {target}: {source}")]
    EnrichmentCallFailed {
        target: String,
        #[source]
        source: LlmError,
    },

    #[error("Run cancelled")]
    Cancelled,

    // -------------------------------------------------------------------------
    // LLM Errors
    // -------------------------------------------------------------------------
    #[error("LLM error: {0}")]
    Llm(LlmError),

    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),
}

impl From<LlmError> for GeniusError {
    fn from(err: LlmError) -> Self {
        GeniusError::Llm(err)
    }
}

pub type Result<T> = std::result::Result<T, GeniusError>;

impl GeniusError {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    pub fn repository_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::RepositoryUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Whether this error must abort a run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::RepositoryUnreadable { .. } | Self::Config(_) | Self::Cancelled
        )
    }

    /// Reduce any failure of a single generation call to an [`LlmError`]
    pub fn into_llm_error(self) -> LlmError {
        match self {
            Self::Llm(err) => err,
            Self::EnrichmentCallFailed { source, .. } => source,
            Self::Timeout { .. } => LlmError::new(ErrorCategory::Network, self.to_string()),
            Self::Json(_) => LlmError::new(ErrorCategory::ParseError, self.to_string()),
            other => LlmError::new(ErrorCategory::Unknown, other.to_string()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
