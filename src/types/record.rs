use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::analyzer::parser::Language;

/// Entities pulled out of one file by a language profile.
///
/// Each sequence is in first-occurrence order and keeps duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    pub functions: Vec<String>,
    pub classes: Vec<String>,
    pub imports: Vec<String>,
}

impl Entities {
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.classes.is_empty() && self.imports.is_empty()
    }
}

/// One analyzed source file.
///
/// Created once during extraction. Only the enrichment fields change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the repository root, `/`-separated. Unique per run.
    pub path: String,
    pub language: Language,
    /// Full text; not exported, empty when read back from JSON
    #[serde(skip)]
    pub content: String,
    /// First `preview_chars` characters of `content`, used for prompts
    pub preview: String,
    pub functions: Vec<String>,
    pub classes: Vec<String>,
    pub imports: Vec<String>,
    /// Whole-file description, `None` until enrichment runs
    pub description: Option<String>,
    /// Function name → description, `None` until enrichment runs
    pub function_descriptions: Option<BTreeMap<String, String>>,
}

impl FileRecord {
    pub fn new(
        path: impl Into<String>,
        language: Language,
        content: String,
        entities: Entities,
        preview_chars: usize,
    ) -> Self {
        let preview = content.chars().take(preview_chars).collect();
        Self {
            path: path.into(),
            language,
            content,
            preview,
            functions: entities.functions,
            classes: entities.classes,
            imports: entities.imports,
            description: None,
            function_descriptions: None,
        }
    }

    /// Path with its extension removed and separators turned into dots
    /// (`pkg/util.py` → `pkg.util`). Used by the import heuristic.
    pub fn dotted_stem(&self) -> String {
        let path = Path::new(&self.path);
        let stem = match path.extension() {
            Some(ext) => {
                let ext_len = ext.len() + 1;
                &self.path[..self.path.len() - ext_len]
            }
            None => self.path.as_str(),
        };
        stem.replace(['/', '\\'], ".")
    }

    /// Function names in first-occurrence order without repeats
    pub fn distinct_functions(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.functions
            .iter()
            .map(String::as_str)
            .filter(|name| seen.insert(*name))
            .collect()
    }

    pub fn is_enriched(&self) -> bool {
        self.description.is_some() || self.function_descriptions.is_some()
    }
}
