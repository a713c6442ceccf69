//! End-to-end Analysis Pipeline
//!
//! repository path → [`FileTreeWalker`] → [`RepositoryExtractor`] →
//! [`CodeGraphBuilder`] → [`AiEnricher`] (optional) → [`DocumentRenderer`]
//!
//! One run per repository with no state shared between runs. Only an unreadable
//! root, invalid configuration or cancellation fail a run; everything else
//! degrades into placeholder text in the document.

use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::ai::{AiEnricher, SharedProvider, create_provider};
use crate::analyzer::{FileTree, FileTreeWalker, RepositoryExtractor};
use crate::config::Config;
use crate::graph::{CodeGraph, CodeGraphBuilder, NodeLinkGraph};
use crate::render::DocumentRenderer;
use crate::types::{FileRecord, GeniusError, Result};

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub file_tree: FileTree,
    /// Records in walk order, enriched when a provider was available
    pub records: Vec<FileRecord>,
    pub graph: CodeGraph,
    pub document: String,
    pub enriched: bool,
}

impl AnalysisOutput {
    /// Node/edge list of the graph
    pub fn node_link(&self) -> NodeLinkGraph {
        self.graph.to_node_link()
    }
}

pub struct Pipeline {
    root: PathBuf,
    source: String,
    config: Config,
    provider: Option<SharedProvider>,
    cancel: CancellationToken,
}

impl Pipeline {
    pub fn new<P: AsRef<Path>>(root: P, config: Config) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            source: root.display().to_string(),
            root,
            config,
            provider: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Label shown as the repository location (defaults to the root path)
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_provider(mut self, provider: SharedProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Build the provider named by `llm` configuration.
    ///
    /// A missing credential only disables enrichment; other provider errors are
    /// returned.
    pub fn with_configured_provider(mut self) -> Result<Self> {
        if !self.config.enrichment.enabled {
            return Ok(self);
        }
        match create_provider(&self.config.llm) {
            Ok(provider) => self.provider = Some(provider),
            Err(e @ GeniusError::EnrichmentUnavailable(_)) => warn!("{}", e),
            Err(e) => return Err(e),
        }
        Ok(self)
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that aborts this run when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn run(&self) -> Result<AnalysisOutput> {
        self.config.validate()?;

        // Stage 1: file tree
        self.checkpoint()?;
        let walker = FileTreeWalker::from_config(&self.root, &self.config.analysis);
        let file_tree = tokio::task::spawn_blocking(move || walker.walk())
            .await
            .map_err(|e| GeniusError::Io(std::io::Error::other(e)))??;
        info!(
            "Stage 1: {} files in {} directories",
            file_tree.file_count(),
            file_tree.dir_count()
        );

        // Stage 2: entity extraction
        self.checkpoint()?;
        let records = RepositoryExtractor::new(&self.root, &self.config.analysis)
            .extract(&file_tree, &self.cancel)
            .await?;
        info!("Stage 2: {} source files extracted", records.len());

        // Stage 3: graph
        self.checkpoint()?;
        let graph = CodeGraphBuilder::build(&records);
        info!(
            "Stage 3: graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        // Stage 4: enrichment
        self.checkpoint()?;
        let (records, enriched) = self.enrich(records).await?;

        // Stage 5: document
        self.checkpoint()?;
        let document = DocumentRenderer::new(&self.source).render(&graph, &records);
        info!("Stage 5: rendered {} bytes of documentation", document.len());

        Ok(AnalysisOutput {
            file_tree,
            records,
            graph,
            document,
            enriched,
        })
    }

    async fn enrich(&self, records: Vec<FileRecord>) -> Result<(Vec<FileRecord>, bool)> {
        if !self.config.enrichment.enabled {
            info!("Stage 4: enrichment disabled");
            return Ok((records, false));
        }
        let Some(provider) = &self.provider else {
            let unavailable =
                GeniusError::EnrichmentUnavailable("no language model configured".to_string());
            warn!("Stage 4: {}", unavailable);
            return Ok((records, false));
        };

        let enriched = AiEnricher::new(provider.clone(), self.config.enrichment.clone())
            .enrich(records, &self.cancel)
            .await?;
        info!("Stage 4: enriched {} files", enriched.len());
        Ok((enriched, true))
    }

    fn checkpoint(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(GeniusError::Cancelled);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::LlmProvider;
    use crate::graph::{NodeKind, Relation};
    use async_trait::async_trait;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct CannedProvider;

    #[async_trait]
    impl LlmProvider for CannedProvider {
        async fn generate(&self, prompt: &str, _temperature: f32) -> Result<String> {
            if prompt.contains("function/method") {
                Ok("Does one thing.".to_string())
            } else {
                Ok("A small module.".to_string())
            }
        }

        fn name(&self) -> &str {
            "canned"
        }

        fn model(&self) -> &str {
            "canned-1"
        }
    }

    fn repo() -> TempDir {
        let temp = TempDir::new().unwrap();
        let write = |rel: &str, content: &str| {
            let path = temp.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        };
        write("a.py", "import b\n\nclass A:\n    pass\n\ndef f():\n    pass\n");
        write("b.py", "def helper():\n    return 1\n");
        write("node_modules/dep/index.js", "function hidden() {}\n");
        write("notes.txt", "def not_code():\n");
        temp
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.analysis.extraction_concurrency = 2;
        config
    }

    #[tokio::test]
    async fn test_run_without_provider() {
        let temp = repo();
        let output = Pipeline::new(temp.path(), config())
            .with_source("https://github.com/acme/demo")
            .run()
            .await
            .unwrap();

        assert!(!output.enriched);
        let paths: Vec<_> = output.records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["a.py", "b.py"]);
        assert!(output.file_tree.files_in("node_modules").is_none());
        assert!(output.records.iter().all(|r| !r.is_enriched()));

        let edges = output.graph.edge_triples();
        assert!(edges.contains(&(
            "a.py:A".to_string(),
            "a.py:f".to_string(),
            Relation::Contains
        )));
        assert!(edges.contains(&(
            "file:a.py".to_string(),
            "file:b.py".to_string(),
            Relation::Imports
        )));
        assert_eq!(output.graph.count_kind(NodeKind::File), 2);

        assert!(output.document.starts_with("# demo - Codebase Documentation"));
        assert_eq!(
            output
                .document
                .matches("**AI Analysis:** Analysis not available")
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn test_run_with_provider() {
        let temp = repo();
        let output = Pipeline::new(temp.path(), config())
            .with_provider(Arc::new(CannedProvider))
            .run()
            .await
            .unwrap();

        assert!(output.enriched);
        assert!(output.document.contains("**AI Analysis:** A small module."));
        assert!(output.document.contains("- `helper`: Does one thing."));
        assert!(!output.document.contains("Analysis not available"));
    }

    #[tokio::test]
    async fn test_enrichment_disabled_ignores_provider() {
        let temp = repo();
        let mut config = config();
        config.enrichment.enabled = false;
        let output = Pipeline::new(temp.path(), config)
            .with_provider(Arc::new(CannedProvider))
            .run()
            .await
            .unwrap();
        assert!(!output.enriched);
    }

    #[tokio::test]
    async fn test_missing_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        let result = Pipeline::new(temp.path().join("gone"), config()).run().await;
        assert!(matches!(
            result,
            Err(GeniusError::RepositoryUnreadable { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_repository_still_renders() {
        let temp = TempDir::new().unwrap();
        let output = Pipeline::new(temp.path(), config()).run().await.unwrap();
        assert!(output.records.is_empty());
        assert!(output.graph.is_empty());
        assert!(output.document.contains("- **Files Analyzed:** 0"));
        assert!(output.document.contains("Installation"));
    }

    #[tokio::test]
    async fn test_cancelled_run() {
        let temp = repo();
        let pipeline = Pipeline::new(temp.path(), config());
        pipeline.cancellation_token().cancel();
        assert!(matches!(pipeline.run().await, Err(GeniusError::Cancelled)));
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let temp = repo();
        let mut config = config();
        config.analysis.preview_chars = 0;
        let result = Pipeline::new(temp.path(), config).run().await;
        assert!(matches!(result, Err(GeniusError::Config(_))));
    }

    #[test]
    fn test_configured_provider_without_key_disables_enrichment() {
        let mut config = config();
        config.llm.provider = "openai".to_string();
        // a blank configured key shadows the environment and counts as missing
        config.llm.api_key = Some(String::new());
        let pipeline = Pipeline::new(".", config).with_configured_provider().unwrap();
        assert!(pipeline.provider.is_none());
    }

    #[test]
    fn test_configured_provider_rejects_unknown_name() {
        let mut config = config();
        config.llm.provider = "nope".to_string();
        let result = Pipeline::new(".", config).with_configured_provider();
        assert!(matches!(result, Err(GeniusError::Config(_))));
    }
}
