//! Reachability filter: shrink a graph to what the beginning nodes can reach.
//!
//! Beginning nodes are those whose label contains the filter substring. The
//! keep set is everything reachable from any of them along directed edges;
//! all other nodes and their edges are removed.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::config::TrimConfig;
use crate::error::GraphtrimError;
use crate::graph::DepGraph;

/// Counts of what a trim pass removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimReport {
    removed_nodes: usize,
    removed_edges: usize,
}

impl TrimReport {
    /// Number of nodes removed by the trim pass.
    pub fn removed_nodes(&self) -> usize {
        self.removed_nodes
    }

    /// Number of edges removed by the trim pass.
    pub fn removed_edges(&self) -> usize {
        self.removed_edges
    }
}

/// Trim `graph` to the subgraph reachable from nodes whose label contains
/// `filter`.
///
/// Matching is a case-sensitive substring test against the label attribute
/// (missing labels match nothing). Traversal follows edges in the
/// source-to-destination direction only and is cycle-safe. Edge pruning
/// honors [`TrimConfig::prune_by_source_only`]; the default removes any edge
/// with a removed endpoint.
///
/// # Errors
///
/// Returns [`GraphtrimError::NoMatch`] when no label contains `filter`; the
/// graph is left unmodified in that case.
pub fn trim_reachable(
    graph: &mut DepGraph,
    filter: &str,
    config: &TrimConfig,
) -> Result<TrimReport, GraphtrimError> {
    let keep = {
        let roots: Vec<&str> = graph
            .nodes()
            .filter(|node| node.label().contains(filter))
            .map(|node| node.id())
            .collect();
        if roots.is_empty() {
            return Err(GraphtrimError::NoMatch {
                filter: filter.to_string(),
            });
        }
        debug!(root_count = roots.len(); "Selected beginning nodes");

        let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
        for edge in graph.edges() {
            adjacency.entry(edge.source()).or_default().push(edge.destination());
        }

        // Iterative DFS; the keep set doubles as the visited set, so cycles
        // terminate and nodes reachable from several roots expand once.
        let mut keep: HashSet<String> = HashSet::new();
        let mut stack: Vec<&str> = roots;
        while let Some(id) = stack.pop() {
            if !keep.insert(id.to_string()) {
                continue;
            }
            if let Some(successors) = adjacency.get(id) {
                stack.extend(successors);
            }
        }
        keep
    };

    let removed_nodes = graph.retain_nodes(|node| keep.contains(node.id()));
    let removed_edges = graph.retain_edges(|edge| {
        keep.contains(edge.source())
            && (config.prune_by_source_only() || keep.contains(edge.destination()))
    });

    Ok(TrimReport {
        removed_nodes,
        removed_edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with_branch() -> DepGraph {
        // a -> b -> c, b -> d; only d's label lacks the "foo" marker
        DepGraph::from_dot_source(
            r#"digraph g {
                a [label="foo.A"];
                b [label="foo.B"];
                c [label="foo.C"];
                d [label="bar.D"];
                a -> b;
                b -> c;
                b -> d;
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn keeps_everything_reachable_from_label_matches() {
        let mut graph = graph_with_branch();
        let report = trim_reachable(&mut graph, "foo", &TrimConfig::default()).unwrap();

        // d survives via b -> d even though its own label does not match
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(report.removed_nodes(), 0);
        assert_eq!(report.removed_edges(), 0);
    }

    #[test]
    fn removes_unreachable_nodes_even_with_edges_into_kept_set() {
        let mut graph = DepGraph::from_dot_source(
            r#"digraph g {
                a [label="foo.A"];
                b [label="bar.B"];
                orphan [label="bar.Orphan"];
                a -> b;
                orphan -> b;
            }"#,
        )
        .unwrap();

        let report = trim_reachable(&mut graph, "foo", &TrimConfig::default()).unwrap();

        assert!(graph.node("orphan").is_none());
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(report.removed_nodes(), 1);
        assert_eq!(report.removed_edges(), 1);
    }

    #[test]
    fn cycles_terminate_and_survive_whole() {
        let mut graph = DepGraph::from_dot_source(
            r#"digraph g {
                a [label="foo.A"];
                b [label="bar.B"];
                c [label="bar.C"];
                a -> b;
                b -> c;
                c -> a;
            }"#,
        )
        .unwrap();

        trim_reachable(&mut graph, "foo", &TrimConfig::default()).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn no_match_errors_and_leaves_graph_unmodified() {
        let mut graph = graph_with_branch();

        let err = trim_reachable(&mut graph, "absent", &TrimConfig::default()).unwrap_err();
        assert!(matches!(err, GraphtrimError::NoMatch { ref filter } if filter == "absent"));

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn default_policy_prunes_edges_into_removed_nodes() {
        // b -> a points into the kept set but b itself is unreachable
        let mut graph = DepGraph::from_dot_source(
            r#"digraph g {
                a [label="foo.A"];
                b [label="bar.B"];
                b -> a;
                a -> a;
            }"#,
        )
        .unwrap();

        trim_reachable(&mut graph, "foo", &TrimConfig::default()).unwrap();

        assert_eq!(graph.node_count(), 1);
        // b -> a is gone with b; the self-loop stays
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges()[0].source(), "a");
    }

    #[test]
    fn legacy_mode_matches_default_on_reachability_trimmed_graphs() {
        // A kept source implies a reachable destination, so the two pruning
        // modes can only diverge for graphs shrunk by other means; a trim run
        // itself must produce identical results under both.
        let source = r#"digraph g {
            a [label="foo.A"];
            b [label="bar.B"];
            c [label="bar.C"];
            a -> b;
            b -> a;
            c -> b;
        }"#;

        let mut default_graph = DepGraph::from_dot_source(source).unwrap();
        trim_reachable(&mut default_graph, "foo", &TrimConfig::default()).unwrap();

        let mut legacy_graph = DepGraph::from_dot_source(source).unwrap();
        trim_reachable(&mut legacy_graph, "foo", &TrimConfig::new(true)).unwrap();

        assert_eq!(default_graph.node_count(), legacy_graph.node_count());
        assert_eq!(default_graph.edge_count(), legacy_graph.edge_count());
        assert_eq!(default_graph.edge_count(), 2);
    }
}
