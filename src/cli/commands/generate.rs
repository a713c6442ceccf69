//! Generate Command
//!
//! Run the full pipeline and write the documentation.
//!
//! Usage:
//!   codegenius generate <PATH> [--source <label>] [--output <file>] [--no-ai]
//!                              [--provider <name>] [--model <name>]

use std::fs;
use std::path::PathBuf;

use super::run_pipeline;
use crate::cli::Output;
use crate::config::{Config, ConfigLoader};
use crate::pipeline::Pipeline;
use crate::types::Result;

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub path: PathBuf,
    /// Repository label for the document header (defaults to the path)
    pub source: Option<String>,
    /// Write the document here instead of stdout
    pub output: Option<PathBuf>,
    pub no_ai: bool,
    pub provider: Option<String>,
    pub model: Option<String>,
}

impl GenerateOptions {
    /// Command-line flags take precedence over every config source
    pub fn apply(&self, config: &mut Config) {
        if self.no_ai {
            config.enrichment.enabled = false;
        }
        if let Some(provider) = &self.provider {
            config.llm.provider = provider.clone();
        }
        if let Some(model) = &self.model {
            config.llm.model = Some(model.clone());
        }
    }
}

pub fn run(options: GenerateOptions) -> Result<()> {
    let out = Output::new();
    let mut config = ConfigLoader::load()?;
    options.apply(&mut config);

    let mut pipeline = Pipeline::new(&options.path, config).with_configured_provider()?;
    if let Some(source) = &options.source {
        pipeline = pipeline.with_source(source.as_str());
    }

    let result = run_pipeline(pipeline)?;

    match &options.output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &result.document)?;
        }
        None => print!("{}", result.document),
    }

    out.header("Documentation generated");
    out.field("Files analyzed", result.records.len());
    out.field("Classes", result.graph.class_count());
    out.field("Functions", result.graph.function_count());
    out.field("Relationships", result.graph.edge_count());
    if result.enriched {
        out.field("AI analysis", "yes");
    } else {
        out.warning("AI analysis skipped; sections show placeholder text");
    }
    if let Some(path) = &options.output {
        out.success(&format!("Wrote {}", path.display()));
    }
    Ok(())
}
