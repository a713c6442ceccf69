//! Entity Extraction
//!
//! [`EntityExtractor`] turns one file's text into [`Entities`] using the profile
//! selected by its extension. [`RepositoryExtractor`] runs it over every
//! supported file of a walked tree, in parallel, and collects [`FileRecord`]s in
//! walk order.

use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::language::Language;
use super::profiles::profile_for;
use crate::analyzer::scanner::FileTree;
use crate::config::AnalysisConfig;
use crate::constants::analysis::BINARY_SNIFF_BYTES;
use crate::types::{Entities, FileRecord, GeniusError, Result};

// =============================================================================
// Single-file extraction
// =============================================================================

/// Stateless pattern-based extractor. Never fails on malformed source.
pub struct EntityExtractor;

impl EntityExtractor {
    /// Extract entities from `text`, dispatching on `extension` (without the dot)
    pub fn extract(text: &str, extension: &str) -> Entities {
        Self::extract_language(text, Language::from_extension(extension))
    }

    pub fn extract_language(text: &str, language: Language) -> Entities {
        let profile = profile_for(language.profile());
        Entities {
            functions: profile.function.find_all(text),
            classes: profile.class.find_all(text),
            imports: profile
                .import
                .as_ref()
                .map(|rule| rule.find_all(text))
                .unwrap_or_default(),
        }
    }
}

/// Decode raw bytes as source text.
///
/// Content with a NUL byte in its first [`BINARY_SNIFF_BYTES`] bytes is treated as
/// binary. The error string is the skip reason.
pub fn decode_source(bytes: Vec<u8>) -> std::result::Result<String, String> {
    let sniff = &bytes[..bytes.len().min(BINARY_SNIFF_BYTES)];
    if sniff.contains(&0) {
        return Err("binary content".to_string());
    }
    String::from_utf8(bytes).map_err(|e| format!("not valid UTF-8: {}", e.utf8_error()))
}

// =============================================================================
// Repository extraction
// =============================================================================

/// Extracts every supported file of a [`FileTree`] into a [`FileRecord`].
#[derive(Clone)]
pub struct RepositoryExtractor {
    root: Arc<PathBuf>,
    preview_chars: usize,
    max_file_size: u64,
    concurrency: usize,
}

impl RepositoryExtractor {
    pub fn new<P: AsRef<Path>>(root: P, config: &AnalysisConfig) -> Self {
        Self {
            root: Arc::new(root.as_ref().to_path_buf()),
            preview_chars: config.preview_chars,
            max_file_size: config.max_file_size,
            concurrency: config.extraction_concurrency.max(1),
        }
    }

    /// Files of `tree` that an extraction profile applies to, in walk order
    pub fn supported_paths(tree: &FileTree) -> Vec<String> {
        tree.file_paths()
            .into_iter()
            .filter(|path| Language::from_path(path).is_supported())
            .collect()
    }

    /// Extract all supported files.
    ///
    /// Files are read on the blocking pool, at most `extraction_concurrency` at a
    /// time. Records come back in walk order regardless of completion order.
    /// Undecodable files are logged and left out. No new file is scheduled once
    /// `cancel` fires, and the call then returns [`GeniusError::Cancelled`].
    pub async fn extract(
        &self,
        tree: &FileTree,
        cancel: &CancellationToken,
    ) -> Result<Vec<FileRecord>> {
        self.extract_with_progress(tree, cancel, |_, _| {}).await
    }

    /// [`Self::extract`], calling `on_file(done, total)` after each file settles
    #[instrument(skip_all, fields(root = %self.root.display()))]
    pub async fn extract_with_progress(
        &self,
        tree: &FileTree,
        cancel: &CancellationToken,
        mut on_file: impl FnMut(usize, usize),
    ) -> Result<Vec<FileRecord>> {
        let paths = Self::supported_paths(tree);
        let total = paths.len();

        let mut stream = futures::stream::iter(paths)
            .take_while(|_| futures::future::ready(!cancel.is_cancelled()))
            .map(|path| {
                let this = self.clone();
                tokio::task::spawn_blocking(move || this.extract_file(path))
            })
            .buffered(self.concurrency);

        let mut records = Vec::with_capacity(total);
        let mut skipped = 0usize;
        let mut done = 0usize;

        while let Some(joined) = stream.next().await {
            done += 1;
            match joined {
                Ok(Ok(record)) => {
                    debug!(
                        "{}: {} functions, {} classes, {} imports",
                        record.path,
                        record.functions.len(),
                        record.classes.len(),
                        record.imports.len()
                    );
                    records.push(record);
                }
                Ok(Err(e)) => {
                    debug!("{}", e);
                    skipped += 1;
                }
                Err(e) => {
                    warn!("Extraction task failed: {}", e);
                    skipped += 1;
                }
            }
            on_file(done, total);
        }

        if cancel.is_cancelled() {
            return Err(GeniusError::Cancelled);
        }

        info!(
            "Extracted {} of {} source files ({} skipped)",
            records.len(),
            total,
            skipped
        );
        Ok(records)
    }

    fn extract_file(&self, rel: String) -> Result<FileRecord> {
        let full = self.root.join(&rel);
        let skip = |reason: String| GeniusError::FileDecodeSkipped {
            path: rel.clone(),
            reason,
        };

        let size = std::fs::metadata(&full)
            .map_err(|e| skip(e.to_string()))?
            .len();
        if size > self.max_file_size {
            return Err(skip(format!(
                "{} bytes exceeds limit of {}",
                size, self.max_file_size
            )));
        }

        let bytes = std::fs::read(&full).map_err(|e| skip(e.to_string()))?;
        let content = decode_source(bytes).map_err(&skip)?;

        let language = Language::from_path(&rel);
        let entities = EntityExtractor::extract_language(&content, language);
        Ok(FileRecord::new(
            rel,
            language,
            content,
            entities,
            self.preview_chars,
        ))
    }
}
