//! Documentation Renderer
//!
//! Serializes the graph and (possibly enriched) records into one markdown
//! document. Rendering never fails; every optional field has a literal default.

use tracing::debug;

use super::mermaid;
use crate::constants::render::{ANALYSIS_NOT_AVAILABLE, MAX_LISTED_IMPORTS};
use crate::graph::CodeGraph;
use crate::types::FileRecord;

pub struct DocumentRenderer {
    source: String,
    repo_name: String,
}

impl DocumentRenderer {
    /// `source` names where the repository came from (URL or path)
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            repo_name: repo_name(source),
        }
    }

    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    /// Render the document. Sections follow the order of `records`.
    pub fn render(&self, graph: &CodeGraph, records: &[FileRecord]) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {} - Codebase Documentation\n\n", self.repo_name));
        output.push_str(&format!("**Repository:** {}\n\n", self.source));

        output.push_str("## Overview\n\n");
        output.push_str(&format!("- **Files Analyzed:** {}\n", records.len()));
        output.push_str(&format!("- **Classes:** {}\n", graph.class_count()));
        output.push_str(&format!("- **Functions:** {}\n", graph.function_count()));
        output.push_str(&format!(
            "- **Code Relationships:** {}\n\n",
            graph.edge_count()
        ));

        if !records.is_empty() {
            output.push_str("## File Analysis\n\n");
            for record in records {
                self.render_file(&mut output, record);
            }
        }

        output.push_str("## Code Structure\n\n");
        output.push_str(&mermaid::render_graph(graph));
        output.push('\n');

        output.push_str("## Installation & Usage\n\n");
        output.push_str("```bash\n");
        output.push_str("# Clone the repository\n");
        output.push_str(&format!("git clone {}\n\n", self.source));
        output.push_str("# Install dependencies\n");
        output.push_str("pip install -r requirements.txt\n\n");
        output.push_str("# Run the application\n");
        output.push_str("python main.py\n");
        output.push_str("```\n\n");

        output.push_str("## Generated by CodeGenius\n\n");
        output.push_str(
            "*This documentation was automatically generated using AI-powered code analysis.*\n",
        );

        debug!(
            "Rendered {} file sections ({} bytes)",
            records.len(),
            output.len()
        );
        output
    }

    fn render_file(&self, output: &mut String, record: &FileRecord) {
        output.push_str(&format!("### `{}`\n\n", record.path));
        output.push_str(&format!(
            "**AI Analysis:** {}\n\n",
            record.description.as_deref().unwrap_or(ANALYSIS_NOT_AVAILABLE)
        ));

        if !record.classes.is_empty() {
            output.push_str("**Classes:**\n");
            let mut seen = std::collections::HashSet::new();
            for class in record.classes.iter().filter(|c| seen.insert(c.as_str())) {
                output.push_str(&format!("- `{}`\n", class));
            }
            output.push('\n');
        }

        let functions = record.distinct_functions();
        if !functions.is_empty() {
            output.push_str("**Functions:**\n");
            for name in functions {
                let description = record
                    .function_descriptions
                    .as_ref()
                    .and_then(|d| d.get(name))
                    .cloned()
                    .unwrap_or_else(|| format!("Function {}", name));
                output.push_str(&format!("- `{}`: {}\n", name, description));
            }
            output.push('\n');
        }

        if !record.imports.is_empty() {
            output.push_str("**Dependencies:**\n");
            for import in record.imports.iter().take(MAX_LISTED_IMPORTS) {
                output.push_str(&format!("- `{}`\n", import));
            }
            if record.imports.len() > MAX_LISTED_IMPORTS {
                output.push_str(&format!(
                    "- ... and {} more imports\n",
                    record.imports.len() - MAX_LISTED_IMPORTS
                ));
            }
            output.push('\n');
        }
    }
}

/// Last path segment of a URL or filesystem path, without a `.git` suffix
fn repo_name(source: &str) -> String {
    let trimmed = source.trim_end_matches(['/', '\\']);
    let last = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    let name = last.strip_suffix(".git").unwrap_or(last);
    if name.is_empty() {
        source.to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::parser::Language;
    use crate::graph::CodeGraphBuilder;
    use crate::types::Entities;
    use std::collections::BTreeMap;

    fn record(path: &str, functions: &[&str], classes: &[&str], imports: Vec<String>) -> FileRecord {
        FileRecord::new(
            path,
            Language::from_path(path),
            String::new(),
            Entities {
                functions: functions.iter().map(|s| s.to_string()).collect(),
                classes: classes.iter().map(|s| s.to_string()).collect(),
                imports,
            },
            2000,
        )
    }

    #[test]
    fn test_repo_name() {
        assert_eq!(repo_name("https://github.com/acme/widgets"), "widgets");
        assert_eq!(repo_name("https://github.com/acme/widgets.git"), "widgets");
        assert_eq!(repo_name("/tmp/checkouts/widgets/"), "widgets");
        assert_eq!(repo_name("widgets"), "widgets");
    }

    #[test]
    fn test_empty_graph_document() {
        let renderer = DocumentRenderer::new("https://github.com/acme/empty");
        let doc = renderer.render(&CodeGraph::new(), &[]);

        assert!(doc.starts_with("# empty - Codebase Documentation\n"));
        assert!(doc.contains("Overview"));
        assert!(doc.contains("Installation"));
        assert!(doc.contains("- **Files Analyzed:** 0\n"));
        assert!(doc.contains("- **Classes:** 0\n"));
        assert!(doc.contains("- **Functions:** 0\n"));
        assert!(doc.contains("- **Code Relationships:** 0\n"));
        assert!(!doc.contains("## File Analysis"));
        assert!(doc.trim_end().ends_with("AI-powered code analysis.*"));
    }

    #[test]
    fn test_unenriched_sections_use_defaults() {
        let records = vec![
            record("a.py", &["f", "f"], &["A"], vec!["import b".into()]),
            record("b.py", &[], &[], vec![]),
        ];
        let graph = CodeGraphBuilder::build(&records);
        let doc = DocumentRenderer::new("acme/demo").render(&graph, &records);

        assert_eq!(doc.matches("**AI Analysis:** Analysis not available").count(), 2);
        assert!(doc.contains("### `a.py`\n"));
        assert!(doc.contains("### `b.py`\n"));
        assert!(doc.contains("- `A`\n"));
        assert_eq!(doc.matches("- `f`: Function f\n").count(), 1);
        assert!(doc.contains("- `import b`\n"));
        assert!(doc.contains("- **Files Analyzed:** 2\n"));
        assert!(doc.contains("- **Code Relationships:** 2\n"));
        assert!(doc.contains("    a_py_A_3 -- contains --> a_py_f_2\n"));
        assert!(doc.contains("    file_a_py_0 -- imports --> file_b_py_1\n"));

        let a = doc.find("### `a.py`").unwrap();
        let b = doc.find("### `b.py`").unwrap();
        let structure = doc.find("## Code Structure").unwrap();
        let install = doc.find("## Installation & Usage").unwrap();
        assert!(a < b && b < structure && structure < install);
    }

    #[test]
    fn test_enriched_descriptions() {
        let mut rec = record("a.py", &["f"], &[], vec![]);
        rec.description = Some("Parses input.".to_string());
        rec.function_descriptions = Some(BTreeMap::from([(
            "f".to_string(),
            "Reads a line.".to_string(),
        )]));
        let records = vec![rec];
        let doc = DocumentRenderer::new("demo").render(&CodeGraphBuilder::build(&records), &records);

        assert!(doc.contains("**AI Analysis:** Parses input.\n"));
        assert!(doc.contains("- `f`: Reads a line.\n"));
        assert!(!doc.contains("Analysis not available"));
    }

    #[test]
    fn test_imports_are_truncated() {
        let imports: Vec<String> = (0..13).map(|i| format!("import m{}", i)).collect();
        let records = vec![record("a.py", &[], &[], imports)];
        let doc = DocumentRenderer::new("demo").render(&CodeGraphBuilder::build(&records), &records);

        assert!(doc.contains("- `import m9`\n"));
        assert!(!doc.contains("- `import m10`\n"));
        assert!(doc.contains("- ... and 3 more imports\n"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let records = vec![
            record("x.js", &["go", "stop"], &["Car"], vec!["y".into()]),
            record("y.js", &["honk"], &[], vec![]),
        ];
        let graph = CodeGraphBuilder::build(&records);
        let renderer = DocumentRenderer::new("demo");
        assert_eq!(
            renderer.render(&graph, &records),
            renderer.render(&graph, &records)
        );
    }
}
