use petgraph::graph::NodeIndex;
use tracing::{debug, instrument};

use super::model::{CodeGraph, NodeKind, Relation};
use crate::types::FileRecord;

/// Builds a [`CodeGraph`] from the complete set of [`FileRecord`]s.
///
/// A pure function of its input: the same records in the same order always give
/// the same nodes and edges in the same order.
pub struct CodeGraphBuilder;

impl CodeGraphBuilder {
    #[instrument(skip_all, fields(files = records.len()))]
    pub fn build(records: &[FileRecord]) -> CodeGraph {
        let mut graph = CodeGraph::new();

        for record in records {
            graph.add_file(&record.path);
        }

        for record in records {
            for name in &record.functions {
                graph.add_entity(&record.path, name, NodeKind::Function);
            }
            for name in &record.classes {
                graph.add_entity(&record.path, name, NodeKind::Class);
            }
        }

        for record in records {
            Self::link_contains(&mut graph, record);
        }

        Self::link_imports(&mut graph, records);

        debug!(
            "Built graph: {} nodes ({} classes, {} functions), {} edges",
            graph.node_count(),
            graph.class_count(),
            graph.function_count(),
            graph.edge_count()
        );
        graph
    }

    /// Every class of a file contains every function of the same file.
    ///
    /// Co-location only; method membership is not checked. A function whose name
    /// collapsed into a class node is not a target.
    fn link_contains(graph: &mut CodeGraph, record: &FileRecord) {
        let classes = Self::entity_handles(graph, record, &record.classes);
        let functions: Vec<NodeIndex> = Self::entity_handles(graph, record, &record.functions)
            .into_iter()
            .filter(|&idx| graph.node(idx).kind == NodeKind::Function)
            .collect();

        for &class in &classes {
            for &function in &functions {
                if class != function {
                    graph.add_edge(class, function, Relation::Contains);
                }
            }
        }
    }

    /// File → file edge when another file's dotted stem is a substring of an
    /// import string.
    ///
    /// Permissive: `import library` matches the stem of `lib.py`, while aliased
    /// or relative imports are missed.
    fn link_imports(graph: &mut CodeGraph, records: &[FileRecord]) {
        let targets: Vec<(String, Option<NodeIndex>)> = records
            .iter()
            .map(|r| (r.dotted_stem(), graph.file_node(&r.path)))
            .collect();

        for record in records {
            let Some(source) = graph.file_node(&record.path) else {
                continue;
            };
            for import in &record.imports {
                for (stem, target) in &targets {
                    let Some(target) = *target else {
                        continue;
                    };
                    if target == source || stem.is_empty() {
                        continue;
                    }
                    if import.contains(stem.as_str()) {
                        graph.add_edge(source, target, Relation::Imports);
                    }
                }
            }
        }
    }

    fn entity_handles(graph: &CodeGraph, record: &FileRecord, names: &[String]) -> Vec<NodeIndex> {
        let mut handles: Vec<NodeIndex> = Vec::with_capacity(names.len());
        for name in names {
            if let Some(idx) = graph.entity_node(&record.path, name)
                && !handles.contains(&idx)
            {
                handles.push(idx);
            }
        }
        handles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::parser::Language;
    use crate::types::Entities;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn record(path: &str, functions: &[&str], classes: &[&str], imports: &[&str]) -> FileRecord {
        let owned = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        FileRecord::new(
            path,
            Language::from_path(path),
            String::new(),
            Entities {
                functions: owned(functions),
                classes: owned(classes),
                imports: owned(imports),
            },
            2000,
        )
    }

    fn triples(graph: &CodeGraph) -> BTreeSet<(String, String, Relation)> {
        graph.edge_triples()
    }

    fn triple(s: &str, t: &str, r: Relation) -> (String, String, Relation) {
        (s.to_string(), t.to_string(), r)
    }

    #[test]
    fn test_single_file_class_and_function() {
        let graph = CodeGraphBuilder::build(&[record("a.py", &["f"], &["A"], &[])]);

        let ids: Vec<_> = graph.node_ids().into_iter().collect();
        assert_eq!(ids, vec!["a.py:A", "a.py:f", "file:a.py"]);
        assert_eq!(
            graph.node(graph.entity_node("a.py", "A").unwrap()).kind,
            NodeKind::Class
        );
        assert_eq!(
            graph.node(graph.entity_node("a.py", "f").unwrap()).kind,
            NodeKind::Function
        );
        assert_eq!(
            triples(&graph),
            BTreeSet::from([triple("a.py:A", "a.py:f", Relation::Contains)])
        );
    }

    #[test]
    fn test_import_edge_requires_target_file() {
        let graph = CodeGraphBuilder::build(&[
            record("a.py", &[], &[], &["import b"]),
            record("b.py", &[], &[], &[]),
        ]);
        assert_eq!(
            triples(&graph),
            BTreeSet::from([triple("file:a.py", "file:b.py", Relation::Imports)])
        );

        let graph = CodeGraphBuilder::build(&[record("a.py", &[], &[], &["import b"])]);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_nested_import_uses_dotted_stem() {
        let graph = CodeGraphBuilder::build(&[
            record("main.py", &[], &[], &["from pkg.util import"]),
            record("pkg/util.py", &[], &[], &[]),
            record("pkg/other.py", &[], &[], &[]),
        ]);
        assert_eq!(
            triples(&graph),
            BTreeSet::from([triple("file:main.py", "file:pkg/util.py", Relation::Imports)])
        );
    }

    #[test]
    fn test_import_heuristic_is_permissive() {
        // "a" is a substring of "import data", so the edge exists
        let graph = CodeGraphBuilder::build(&[
            record("main.py", &[], &[], &["import data"]),
            record("a.py", &[], &[], &[]),
        ]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_no_self_import() {
        let graph = CodeGraphBuilder::build(&[record("a.py", &[], &[], &["import a"])]);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_duplicates_collapse() {
        let graph = CodeGraphBuilder::build(&[
            record("a.py", &["f", "f", "g"], &["A", "A"], &["import b", "import b"]),
            record("b.py", &[], &[], &[]),
        ]);

        assert_eq!(graph.function_count(), 2);
        assert_eq!(graph.class_count(), 1);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_contains_is_per_file() {
        let graph = CodeGraphBuilder::build(&[
            record("a.py", &["f"], &["A"], &[]),
            record("b.py", &["g"], &["B"], &[]),
        ]);
        assert_eq!(
            triples(&graph),
            BTreeSet::from([
                triple("a.py:A", "a.py:f", Relation::Contains),
                triple("b.py:B", "b.py:g", Relation::Contains),
            ])
        );
    }

    #[test]
    fn test_class_function_name_collision() {
        let graph = CodeGraphBuilder::build(&[record("a.py", &["Thing", "run"], &["Thing"], &[])]);
        assert_eq!(graph.class_count(), 1);
        assert_eq!(graph.function_count(), 1);
        assert_eq!(
            triples(&graph),
            BTreeSet::from([triple("a.py:Thing", "a.py:run", Relation::Contains)])
        );
    }

    #[test]
    fn test_empty_input() {
        let graph = CodeGraphBuilder::build(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    fn arb_records() -> impl Strategy<Value = Vec<FileRecord>> {
        let name = prop::sample::select(vec!["a", "b", "run", "Thing", "util", "main"]);
        let import = prop::sample::select(vec![
            "import a", "import b", "from pkg.util import", "import main", "import zzz",
        ]);
        let paths = prop::sample::subsequence(
            vec!["a.py", "b.py", "main.js", "pkg/util.py", "pkg/a.rb", "lib/run.c"],
            0..=6,
        );
        paths.prop_flat_map(move |paths| {
            let n = paths.len();
            (
                Just(paths),
                prop::collection::vec(
                    (
                        prop::collection::vec(name.clone(), 0..4),
                        prop::collection::vec(name.clone(), 0..3),
                        prop::collection::vec(import.clone(), 0..3),
                    ),
                    n,
                ),
            )
                .prop_map(|(paths, entities)| {
                    paths
                        .into_iter()
                        .zip(entities)
                        .map(|(path, (f, c, i))| record(path, &f, &c, &i))
                        .collect::<Vec<_>>()
                })
        })
    }

    proptest! {
        #[test]
        fn prop_build_is_deterministic(records in arb_records()) {
            let first = CodeGraphBuilder::build(&records);
            let second = CodeGraphBuilder::build(&records);
            prop_assert_eq!(first.node_ids(), second.node_ids());
            prop_assert_eq!(first.edge_triples(), second.edge_triples());
            prop_assert_eq!(first.to_node_link(), second.to_node_link());
        }

        #[test]
        fn prop_graph_invariants(records in arb_records()) {
            let graph = CodeGraphBuilder::build(&records);
            let paths: BTreeSet<&str> = records.iter().map(|r| r.path.as_str()).collect();

            for node in graph.nodes() {
                prop_assert!(paths.contains(node.file.as_str()));
            }

            for (source, target, relation) in graph.edges() {
                match relation {
                    Relation::Contains => {
                        prop_assert_eq!(source.kind, NodeKind::Class);
                        prop_assert_eq!(target.kind, NodeKind::Function);
                        prop_assert_eq!(&source.file, &target.file);
                    }
                    Relation::Imports => {
                        prop_assert_eq!(source.kind, NodeKind::File);
                        prop_assert_eq!(target.kind, NodeKind::File);
                        prop_assert_ne!(source.id(), target.id());
                    }
                }
            }

            let ids: Vec<String> = graph.nodes().map(|n| n.id()).collect();
            prop_assert_eq!(ids.len(), graph.node_ids().len());
        }
    }
}
