//! CodeGenius - Codebase Documentation Generator
//!
//! Walks a repository checkout, extracts functions, classes and imports with
//! per-language pattern rules, links them into a code graph, optionally asks a
//! language model to describe each file and function, and renders a single
//! Markdown document with a Mermaid diagram.
//!
//! ## Quick Start
//!
//! ```ignore
//! use codegenius::{Config, Pipeline};
//!
//! let output = Pipeline::new("path/to/repo", Config::default())
//!     .with_configured_provider()?
//!     .run()
//!     .await?;
//! println!("{}", output.document);
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: file tree walking and pattern-based entity extraction
//! - [`graph`]: code graph of files, classes and functions
//! - [`ai`]: LLM provider abstraction and enrichment
//! - [`render`]: Markdown and Mermaid output
//! - [`pipeline`]: end-to-end orchestration

pub mod ai;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod graph;
pub mod pipeline;
pub mod render;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

pub use config::{Config, ConfigLoader};
pub use pipeline::{AnalysisOutput, Pipeline};
pub use types::{Entities, ErrorCategory, FileRecord, GeniusError, LlmError, Result};

// =============================================================================
// Stage Re-exports
// =============================================================================

pub use ai::{AiEnricher, LlmProvider, SharedProvider, create_provider};
pub use analyzer::{EntityExtractor, FileTree, FileTreeWalker, Language, RepositoryExtractor};
pub use graph::{CodeGraph, CodeGraphBuilder, NodeKind, NodeLinkGraph, Relation};
pub use render::DocumentRenderer;
