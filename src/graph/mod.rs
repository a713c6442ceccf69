//! Code Graph
//!
//! Files, functions and classes linked by `contains` and `imports` edges.

mod builder;
mod model;

pub use builder::CodeGraphBuilder;
pub use model::{CodeGraph, GraphNode, NodeKind, NodeLinkEdge, NodeLinkGraph, NodeLinkNode, Relation};
