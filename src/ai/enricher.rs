//! AI Enrichment
//!
//! Attaches a whole-file description and per-function descriptions to each
//! [`FileRecord`]. Every model call is isolated: a failure, timeout or empty
//! reply turns into a literal fallback string and the stage carries on.

use futures::StreamExt;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::prompt::PromptTemplates;
use super::provider::SharedProvider;
use super::timeout::with_timeout;
use crate::config::EnrichmentConfig;
use crate::types::{ErrorCategory, FileRecord, GeniusError, LlmError, Result};

/// Description for functions beyond the per-file cap
pub fn unavailable_function(name: &str) -> String {
    format!("{} - purpose analysis unavailable", name)
}

fn failed_function(name: &str, err: &LlmError) -> String {
    format!("{} - purpose analysis unavailable ({})", name, err)
}

fn failed_file(err: &LlmError) -> String {
    format!("AI analysis failed: {}", err)
}

/// One model call: the whole file, or one of its functions
#[derive(Debug, Clone)]
enum Target {
    File(usize),
    Function(usize, String),
}

pub struct AiEnricher {
    provider: SharedProvider,
    config: EnrichmentConfig,
    call_timeout: Duration,
}

impl AiEnricher {
    pub fn new(provider: SharedProvider, config: EnrichmentConfig) -> Self {
        let call_timeout = config.call_timeout();
        Self {
            provider,
            config,
            call_timeout,
        }
    }

    /// Override the per-call timeout
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Enrich every record.
    ///
    /// Never fails because of the model. Each record gets a description and one
    /// entry per distinct function name; the first `function_cap` names are sent
    /// to the model, the rest get a placeholder. No call is scheduled after
    /// `cancel` fires, and the run then ends with [`GeniusError::Cancelled`].
    #[instrument(skip_all, fields(provider = %self.provider.name(), files = records.len()))]
    pub async fn enrich(
        &self,
        mut records: Vec<FileRecord>,
        cancel: &CancellationToken,
    ) -> Result<Vec<FileRecord>> {
        let targets = self.plan(&records);
        let total = targets.len();
        info!(
            "Enriching {} files with {} ({} calls, concurrency {})",
            records.len(),
            self.provider.model(),
            total,
            self.config.concurrency
        );

        let results: Vec<(Target, String)> = {
            let records = &records;
            futures::stream::iter(targets)
                .take_while(|_| futures::future::ready(!cancel.is_cancelled()))
                .map(|target| async move {
                    let text = self.describe(records, &target).await;
                    (target, text)
                })
                .buffer_unordered(self.config.concurrency.max(1))
                .collect()
                .await
        };

        if cancel.is_cancelled() {
            return Err(GeniusError::Cancelled);
        }

        for (target, text) in results {
            match target {
                Target::File(i) => records[i].description = Some(text),
                Target::Function(i, name) => {
                    records[i]
                        .function_descriptions
                        .get_or_insert_with(BTreeMap::new)
                        .insert(name, text);
                }
            }
        }

        for record in &mut records {
            let names: Vec<String> = record
                .distinct_functions()
                .into_iter()
                .map(str::to_string)
                .collect();
            let descriptions = record.function_descriptions.get_or_insert_with(BTreeMap::new);
            for name in names {
                descriptions
                    .entry(name)
                    .or_insert_with_key(|name| unavailable_function(name));
            }
        }

        info!("Enrichment finished ({} calls)", total);
        Ok(records)
    }

    fn plan(&self, records: &[FileRecord]) -> Vec<Target> {
        let mut targets = Vec::new();
        for (i, record) in records.iter().enumerate() {
            targets.push(Target::File(i));
            for name in record
                .distinct_functions()
                .into_iter()
                .take(self.config.function_cap)
            {
                targets.push(Target::Function(i, name.to_string()));
            }
        }
        targets
    }

    /// Run one call and reduce it to text, substituting the fallback on failure
    async fn describe(&self, records: &[FileRecord], target: &Target) -> String {
        match target {
            Target::File(i) => {
                let record = &records[*i];
                let prompt = PromptTemplates::file_analysis(record);
                match self
                    .generate(&prompt, self.config.file_temperature, &record.path)
                    .await
                {
                    Ok(text) => text,
                    Err(err) => failed_file(&err),
                }
            }
            Target::Function(i, name) => {
                let record = &records[*i];
                let prompt = PromptTemplates::function_purpose(name, record.language);
                let label = format!("{}:{}", record.path, name);
                match self
                    .generate(&prompt, self.config.function_temperature, &label)
                    .await
                {
                    Ok(text) => text,
                    Err(err) => failed_function(name, &err),
                }
            }
        }
    }

    async fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        target: &str,
    ) -> std::result::Result<String, LlmError> {
        let result = with_timeout(
            self.call_timeout,
            self.provider.generate(prompt, temperature),
            target,
        )
        .await
        .map_err(GeniusError::into_llm_error)
        .and_then(|text| {
            let text = text.trim();
            if text.is_empty() {
                Err(LlmError::with_provider(
                    ErrorCategory::ParseError,
                    "Empty response",
                    self.provider.name(),
                ))
            } else {
                Ok(text.to_string())
            }
        });

        match &result {
            Ok(_) => debug!("Described {}", target),
            Err(err) => {
                let failure = GeniusError::EnrichmentCallFailed {
                    target: target.to_string(),
                    source: err.clone(),
                };
                warn!("{}", failure);
            }
        }
        result
    }
}
