#![allow(dead_code)]

use flowgraph::parse::{self, Edge, Node, NodeKind, Workflow, WorkflowGraph};
use flowgraph::validate::ValidationReport;

// =============================================================================
// Fixture loading
// =============================================================================

pub fn load(json: &str) -> Workflow {
    parse::parse(json).expect("fixture should parse")
}

pub fn load_graph(json: &str) -> WorkflowGraph {
    load(json).graph
}

// =============================================================================
// Graph builders
// =============================================================================

/// Nodes `n0..` of the given kinds wired in a straight line with no handles.
pub fn chain(kinds: &[NodeKind]) -> WorkflowGraph {
    let nodes: Vec<Node> = kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| Node::new(format!("n{}", i), *kind, format!("Step {}", i)))
        .collect();
    let edges: Vec<Edge> = (1..nodes.len())
        .map(|i| Edge::new(format!("e{}", i), format!("n{}", i - 1), format!("n{}", i)))
        .collect();
    WorkflowGraph::new(nodes, edges)
}

pub fn node_with(id: &str, kind: NodeKind, config: serde_json::Value) -> Node {
    Node::new(id, kind, id)
        .with_config(config)
        .expect("config should be an object")
}

// =============================================================================
// Report helpers
// =============================================================================

pub fn error_codes(report: &ValidationReport) -> Vec<&str> {
    report.errors.iter().map(|d| d.code.as_str()).collect()
}

pub fn warning_codes(report: &ValidationReport) -> Vec<&str> {
    report.warnings.iter().map(|d| d.code.as_str()).collect()
}
