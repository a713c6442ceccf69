//! Code Analyzer Module
//!
//! - File tree walking with directory pruning
//! - Per-language entity extraction

pub mod parser;
pub mod scanner;

pub use parser::{EntityExtractor, Language, RepositoryExtractor};
pub use scanner::{FileTree, FileTreeWalker};
