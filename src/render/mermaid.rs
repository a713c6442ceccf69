//! Mermaid `graph TD` rendering of a [`CodeGraph`]

use petgraph::graph::NodeIndex;

use crate::graph::{CodeGraph, GraphNode, NodeKind};

/// Mermaid-safe identifier.
///
/// The readable part maps every character outside `[A-Za-z0-9_]` to `_`, so it
/// can collide (`a-b.py` vs `a_b.py`); the arena handle suffix keeps ids unique.
pub fn node_id(idx: NodeIndex, node: &GraphNode) -> String {
    format!("{}_{}", sanitize(&node.id()), idx.index())
}

fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Class nodes as stadium shapes, function nodes as hexagons, then every edge.
/// File nodes are only referenced by edges.
pub fn render_graph(graph: &CodeGraph) -> String {
    let mut out = String::from("```mermaid\ngraph TD\n");

    for (idx, node) in graph.indexed_nodes() {
        match node.kind {
            NodeKind::Class => {
                out.push_str(&format!(
                    "    {}([Class: {}])\n",
                    node_id(idx, node),
                    node.label()
                ));
            }
            NodeKind::Function => {
                out.push_str(&format!(
                    "    {}{{{{Function: {}}}}}\n",
                    node_id(idx, node),
                    node.label()
                ));
            }
            NodeKind::File => {}
        }
    }

    for (source, target, relation) in graph.indexed_edges() {
        out.push_str(&format!(
            "    {} -- {} --> {}\n",
            node_id(source, graph.node(source)),
            relation,
            node_id(target, graph.node(target))
        ));
    }

    out.push_str("```\n");
    out
}
