//! Graph Command
//!
//! Print the code graph without AI enrichment.

use clap::ValueEnum;

use super::run_pipeline;
use crate::config::ConfigLoader;
use crate::graph::CodeGraph;
use crate::pipeline::Pipeline;
use crate::types::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GraphFormat {
    #[default]
    Text,
    /// Node-link JSON
    Json,
}

pub fn run(path: &std::path::Path, format: GraphFormat) -> Result<()> {
    let mut config = ConfigLoader::load()?;
    config.enrichment.enabled = false;

    let result = run_pipeline(Pipeline::new(path, config))?;

    match format {
        GraphFormat::Json => {
            let json = serde_json::to_string_pretty(&result.node_link())?;
            println!("{}", json);
        }
        GraphFormat::Text => print!("{}", format_text(&result.graph)),
    }
    Ok(())
}

fn format_text(graph: &CodeGraph) -> String {
    let mut out = format!("Nodes ({}):\n", graph.node_count());
    for node in graph.nodes() {
        out.push_str(&format!("  [{}] {}\n", node.kind, node.id()));
    }
    out.push_str(&format!("\nEdges ({}):\n", graph.edge_count()));
    for (source, target, relation) in graph.edges() {
        out.push_str(&format!(
            "  {} -- {} --> {}\n",
            source.id(),
            relation,
            target.id()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Language;
    use crate::graph::CodeGraphBuilder;
    use crate::types::{Entities, FileRecord};

    #[test]
    fn test_format_text() {
        let record = FileRecord::new(
            "a.py",
            Language::Python,
            String::new(),
            Entities {
                functions: vec!["f".to_string()],
                classes: vec!["A".to_string()],
                imports: vec![],
            },
            2000,
        );
        let text = format_text(&CodeGraphBuilder::build(&[record]));

        assert!(text.starts_with("Nodes (3):\n  [file] file:a.py\n"));
        assert!(text.contains("  [class] a.py:A\n"));
        assert!(text.contains("Edges (1):\n  a.py:A -- contains --> a.py:f\n"));
    }

    #[test]
    fn test_format_values() {
        assert_eq!(GraphFormat::from_str("json", false), Ok(GraphFormat::Json));
        assert_eq!(GraphFormat::from_str("text", false), Ok(GraphFormat::Text));
        assert!(GraphFormat::from_str("yaml", false).is_err());
    }
}
