//! AI Integration Layer
//!
//! Optional enrichment of extracted files with language-model descriptions.

pub mod enricher;
pub mod prompt;
pub mod provider;
pub mod timeout;

pub use enricher::{AiEnricher, unavailable_function};
pub use prompt::{PromptBuilder, PromptTemplates};
pub use provider::{
    GeminiProvider, LlmProvider, OllamaProvider, OpenAiProvider, SharedProvider, create_provider,
};
pub use timeout::with_timeout;
