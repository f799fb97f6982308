//! Graph-level structural validation rules (S001–S004). All are errors.

use std::collections::HashSet;

use crate::error::Diagnostic;
use crate::parse::graph::GraphIndex;
use crate::parse::types::WorkflowGraph;

/// Run all structural validation rules. Returns all errors found.
pub fn validate_structural(graph: &WorkflowGraph, index: &GraphIndex) -> Vec<Diagnostic> {
    let mut errors = Vec::new();

    s001_edges_reference_existing_nodes(graph, index, &mut errors);
    s002_nodes_have_names(graph, &mut errors);
    s003_unique_node_ids(graph, &mut errors);
    s004_unique_edge_ids(graph, &mut errors);

    errors
}

fn s001_edges_reference_existing_nodes(
    graph: &WorkflowGraph,
    index: &GraphIndex,
    errors: &mut Vec<Diagnostic>,
) {
    for &pos in &index.dangling {
        let edge = &graph.edges[pos];
        if !index.contains(&edge.source) {
            errors.push(
                Diagnostic::structural(
                    "S001",
                    format!(
                        "Edge '{}' references unknown source node '{}'",
                        edge.id, edge.source
                    ),
                    None,
                )
                .on_edge(&edge.id),
            );
        }
        if !index.contains(&edge.target) {
            errors.push(
                Diagnostic::structural(
                    "S001",
                    format!(
                        "Edge '{}' references unknown target node '{}'",
                        edge.id, edge.target
                    ),
                    None,
                )
                .on_edge(&edge.id),
            );
        }
    }
}

fn s002_nodes_have_names(graph: &WorkflowGraph, errors: &mut Vec<Diagnostic>) {
    for node in &graph.nodes {
        if node.name.trim().is_empty() {
            errors.push(Diagnostic::structural(
                "S002",
                format!("Node '{}' must have a name", node.id),
                Some(node.id.clone()),
            ));
        }
    }
}

fn s003_unique_node_ids(graph: &WorkflowGraph, errors: &mut Vec<Diagnostic>) {
    let mut seen = HashSet::new();
    for node in &graph.nodes {
        if !seen.insert(node.id.as_str()) {
            errors.push(Diagnostic::structural(
                "S003",
                format!("Duplicate node id '{}'", node.id),
                Some(node.id.clone()),
            ));
        }
    }
}

fn s004_unique_edge_ids(graph: &WorkflowGraph, errors: &mut Vec<Diagnostic>) {
    let mut seen = HashSet::new();
    for edge in &graph.edges {
        if !seen.insert(edge.id.as_str()) {
            errors.push(
                Diagnostic::structural("S004", format!("Duplicate edge id '{}'", edge.id), None)
                    .on_edge(&edge.id),
            );
        }
    }
}
