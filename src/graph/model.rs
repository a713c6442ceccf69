//! Code Graph Model
//!
//! Nodes live in a petgraph arena addressed by [`NodeIndex`]. A side index from
//! (file, name) to handle makes insertion idempotent, and a set of
//! (source, target, relation) triples keeps edges unique.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

// =============================================================================
// Node and Edge Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Function,
    Class,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Function => "function",
            NodeKind::Class => "class",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// Class → function co-located in the same file
    Contains,
    /// File → file whose dotted path appears in an import string
    Imports,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Contains => "contains",
            Relation::Imports => "imports",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file, function or class.
///
/// `file` refers to the owning [`crate::types::FileRecord`] by path; the record owns
/// the underlying data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub kind: NodeKind,
    pub file: String,
    /// Entity name, `None` for file nodes
    pub name: Option<String>,
}

impl GraphNode {
    /// `file:<path>` for files, `<path>:<name>` for entities
    pub fn id(&self) -> String {
        match &self.name {
            None => format!("file:{}", self.file),
            Some(name) => format!("{}:{}", self.file, name),
        }
    }

    /// Entity name, or the path for file nodes
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.file)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum NodeKey {
    File(String),
    Entity { file: String, name: String },
}

// =============================================================================
// Code Graph
// =============================================================================

/// Directed graph of files, functions and classes.
///
/// Built once per run by [`super::CodeGraphBuilder`] and read-only afterwards.
/// Iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct CodeGraph {
    graph: DiGraph<GraphNode, Relation>,
    index: HashMap<NodeKey, NodeIndex>,
    edge_set: HashSet<(NodeIndex, NodeIndex, Relation)>,
}

impl CodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Construction (crate-internal)
    // -------------------------------------------------------------------------

    pub(crate) fn add_file(&mut self, path: &str) -> NodeIndex {
        let key = NodeKey::File(path.to_string());
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.graph.add_node(GraphNode {
            kind: NodeKind::File,
            file: path.to_string(),
            name: None,
        });
        self.index.insert(key, idx);
        idx
    }

    /// Insert a function or class node.
    ///
    /// A repeated (file, name) returns the existing handle. When a class and a
    /// function share a name in one file the node is a class.
    pub(crate) fn add_entity(&mut self, file: &str, name: &str, kind: NodeKind) -> NodeIndex {
        let key = NodeKey::Entity {
            file: file.to_string(),
            name: name.to_string(),
        };
        if let Some(&idx) = self.index.get(&key) {
            if kind == NodeKind::Class {
                self.graph[idx].kind = NodeKind::Class;
            }
            return idx;
        }
        let idx = self.graph.add_node(GraphNode {
            kind,
            file: file.to_string(),
            name: Some(name.to_string()),
        });
        self.index.insert(key, idx);
        idx
    }

    /// Insert an edge unless the identical triple already exists.
    /// Returns whether a new edge was added.
    pub(crate) fn add_edge(&mut self, source: NodeIndex, target: NodeIndex, relation: Relation) -> bool {
        if !self.edge_set.insert((source, target, relation)) {
            return false;
        }
        self.graph.add_edge(source, target, relation);
        true
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    pub fn node(&self, idx: NodeIndex) -> &GraphNode {
        &self.graph[idx]
    }

    pub fn file_node(&self, path: &str) -> Option<NodeIndex> {
        self.index.get(&NodeKey::File(path.to_string())).copied()
    }

    pub fn entity_node(&self, file: &str, name: &str) -> Option<NodeIndex> {
        self.index
            .get(&NodeKey::Entity {
                file: file.to_string(),
                name: name.to_string(),
            })
            .copied()
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Nodes with their handles, in insertion order
    pub fn indexed_nodes(&self) -> impl Iterator<Item = (NodeIndex, &GraphNode)> {
        self.graph.node_indices().map(|idx| (idx, &self.graph[idx]))
    }

    /// Edges as (source handle, target handle, relation) in insertion order
    pub fn indexed_edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, Relation)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source(), e.target(), *e.weight()))
    }

    /// Edges as (source, target, relation) in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&GraphNode, &GraphNode, Relation)> {
        self.graph
            .edge_references()
            .map(|e| (&self.graph[e.source()], &self.graph[e.target()], *e.weight()))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes().filter(|n| n.kind == kind).count()
    }

    pub fn class_count(&self) -> usize {
        self.count_kind(NodeKind::Class)
    }

    pub fn function_count(&self) -> usize {
        self.count_kind(NodeKind::Function)
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    // -------------------------------------------------------------------------
    // Order-independent views
    // -------------------------------------------------------------------------

    pub fn node_ids(&self) -> BTreeSet<String> {
        self.nodes().map(GraphNode::id).collect()
    }

    pub fn edge_triples(&self) -> BTreeSet<(String, String, Relation)> {
        self.edges()
            .map(|(s, t, r)| (s.id(), t.id(), r))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    /// Node/edge list for programmatic consumers
    pub fn to_node_link(&self) -> NodeLinkGraph {
        NodeLinkGraph {
            nodes: self
                .nodes()
                .map(|n| NodeLinkNode {
                    id: n.id(),
                    kind: n.kind,
                    file: n.file.clone(),
                })
                .collect(),
            edges: self
                .edges()
                .map(|(s, t, relation)| NodeLinkEdge {
                    source: s.id(),
                    target: t.id(),
                    relation,
                })
                .collect(),
        }
    }
}

// =============================================================================
// Node-link Export
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLinkGraph {
    pub nodes: Vec<NodeLinkNode>,
    pub edges: Vec<NodeLinkEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLinkNode {
    pub id: String,
    pub kind: NodeKind,
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLinkEdge {
    pub source: String,
    pub target: String,
    pub relation: Relation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ids() {
        let mut g = CodeGraph::new();
        let file = g.add_file("a.py");
        let class = g.add_entity("a.py", "A", NodeKind::Class);
        assert_eq!(g.node(file).id(), "file:a.py");
        assert_eq!(g.node(class).id(), "a.py:A");
        assert_eq!(g.node(file).label(), "a.py");
        assert_eq!(g.node(class).label(), "A");
    }

    #[test]
    fn test_insertion_is_idempotent() {
        let mut g = CodeGraph::new();
        let a = g.add_entity("a.py", "f", NodeKind::Function);
        let b = g.add_entity("a.py", "f", NodeKind::Function);
        assert_eq!(a, b);
        assert_eq!(g.add_file("a.py"), g.add_file("a.py"));
        assert_eq!(g.node_count(), 2);

        // same name in another file is a different node
        let c = g.add_entity("b.py", "f", NodeKind::Function);
        assert_ne!(a, c);
    }

    #[test]
    fn test_class_wins_name_collision() {
        let mut g = CodeGraph::new();
        let f = g.add_entity("a.py", "Thing", NodeKind::Function);
        let c = g.add_entity("a.py", "Thing", NodeKind::Class);
        assert_eq!(f, c);
        assert_eq!(g.node(c).kind, NodeKind::Class);

        // a later function insert does not downgrade
        g.add_entity("a.py", "Thing", NodeKind::Function);
        assert_eq!(g.node(c).kind, NodeKind::Class);
        assert_eq!(g.class_count(), 1);
        assert_eq!(g.function_count(), 0);
    }

    #[test]
    fn test_duplicate_edges_are_rejected() {
        let mut g = CodeGraph::new();
        let a = g.add_file("a.py");
        let b = g.add_file("b.py");
        assert!(g.add_edge(a, b, Relation::Imports));
        assert!(!g.add_edge(a, b, Relation::Imports));
        assert!(g.add_edge(a, b, Relation::Contains));
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_node_link_export() {
        let mut g = CodeGraph::new();
        let a = g.add_file("a.py");
        let b = g.add_file("b.py");
        g.add_edge(a, b, Relation::Imports);

        let json = serde_json::to_value(g.to_node_link()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "nodes": [
                    {"id": "file:a.py", "kind": "file", "file": "a.py"},
                    {"id": "file:b.py", "kind": "file", "file": "b.py"}
                ],
                "edges": [
                    {"source": "file:a.py", "target": "file:b.py", "relation": "imports"}
                ]
            })
        );
    }
}
