//! Port resolution: which semantic port an edge actually uses.
//!
//! Stored handles are only trusted when they are explicit. Generic aliases
//! (`output`, `output1`, `input-0`, …) and absent handles are re-derived from
//! the Capability Contract Table every time an edge is read, so changing an
//! upstream node's kind re-derives a sensible default.

use std::collections::HashMap;

use crate::contract::contract;
use crate::parse::types::{Edge, NodeKind, WorkflowGraph};

const TRACING_TARGET: &str = "flowgraph::resolve";

/// Fallbacks when an endpoint has no contract default (unknown node, or a
/// kind without ports on that side).
pub const GENERIC_OUTPUT: &str = "output";
pub const GENERIC_INPUT: &str = "input";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

/// Ports in effect for one edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPorts {
    pub source: String,
    pub target: String,
}

pub fn is_generic_handle(handle: &str) -> bool {
    handle.starts_with(GENERIC_OUTPUT) || handle.starts_with(GENERIC_INPUT)
}

/// `None` for a generic alias, the handle itself otherwise.
pub fn normalize_handle(handle: &str) -> Option<&str> {
    if is_generic_handle(handle) {
        None
    } else {
        Some(handle)
    }
}

/// Stored handle with empties and generic aliases stripped.
fn explicit(handle: Option<&str>) -> Option<&str> {
    handle.filter(|h| !h.is_empty()).and_then(normalize_handle)
}

/// The contract default for one side of a node kind.
pub fn default_port(kind: NodeKind, side: Side) -> Option<&'static str> {
    let c = contract(kind);
    match side {
        Side::Source => c.primary_output,
        Side::Target => c.primary_input,
    }
}

/// Resolve one side of an edge: the explicit handle when present, otherwise
/// the endpoint kind's primary port.
pub fn resolve_handle(
    edge: &Edge,
    side: Side,
    kind_of: impl Fn(&str) -> Option<NodeKind>,
) -> String {
    let (stored, endpoint, generic) = match side {
        Side::Source => (edge.source_output.as_deref(), edge.source.as_str(), GENERIC_OUTPUT),
        Side::Target => (edge.target_input.as_deref(), edge.target.as_str(), GENERIC_INPUT),
    };
    if let Some(handle) = explicit(stored) {
        return handle.to_string();
    }
    kind_of(endpoint)
        .and_then(|kind| default_port(kind, side))
        .unwrap_or(generic)
        .to_string()
}

/// Resolve both sides of an edge against the graph it belongs to.
pub fn resolve_edge(edge: &Edge, graph: &WorkflowGraph) -> ResolvedPorts {
    let kinds = kind_map(graph);
    resolve_edge_with(edge, &kinds)
}

fn resolve_edge_with(edge: &Edge, kinds: &HashMap<&str, NodeKind>) -> ResolvedPorts {
    let kind_of = |id: &str| kinds.get(id).copied();
    ResolvedPorts {
        source: resolve_handle(edge, Side::Source, kind_of),
        target: resolve_handle(edge, Side::Target, kind_of),
    }
}

fn kind_map(graph: &WorkflowGraph) -> HashMap<&str, NodeKind> {
    let mut kinds = HashMap::new();
    for node in &graph.nodes {
        kinds.entry(node.id.as_str()).or_insert(node.kind);
    }
    kinds
}

/// Persistence form: generic aliases stripped and handles equal to the
/// contract default omitted, so serialized graphs stay stable across
/// contract-table edits. Idempotent.
pub fn resolve_graph(graph: &WorkflowGraph) -> WorkflowGraph {
    let kinds = kind_map(graph);
    let mut repaired = 0usize;

    let edges = graph
        .edges
        .iter()
        .map(|edge| {
            let mut out = repair_condition_branch(edge, &kinds);
            let source_default = kinds
                .get(out.source.as_str())
                .and_then(|k| default_port(*k, Side::Source));
            let target_default = kinds
                .get(out.target.as_str())
                .and_then(|k| default_port(*k, Side::Target));

            out.source_output = compact(out.source_output.as_deref(), source_default);
            out.target_input = compact(out.target_input.as_deref(), target_default);

            if &out != edge {
                repaired += 1;
                tracing::trace!(
                    target: TRACING_TARGET,
                    edge_id = %edge.id,
                    source_output = ?out.source_output,
                    target_input = ?out.target_input,
                    "Normalized edge handles"
                );
            }
            out
        })
        .collect();

    tracing::debug!(
        target: TRACING_TARGET,
        edges = graph.edges.len(),
        repaired,
        "Resolved graph for persistence"
    );

    WorkflowGraph {
        nodes: graph.nodes.clone(),
        edges,
    }
}

/// Display form: every handle written out explicitly. Idempotent.
pub fn materialize_graph(graph: &WorkflowGraph) -> WorkflowGraph {
    let kinds = kind_map(graph);
    let edges = graph
        .edges
        .iter()
        .map(|edge| {
            let mut out = repair_condition_branch(edge, &kinds);
            let ports = resolve_edge_with(&out, &kinds);
            out.source_output = Some(ports.source);
            out.target_input = Some(ports.target);
            out
        })
        .collect();

    WorkflowGraph {
        nodes: graph.nodes.clone(),
        edges,
    }
}

fn compact(stored: Option<&str>, default: Option<&str>) -> Option<String> {
    match explicit(stored) {
        Some(handle) if Some(handle) != default => Some(handle.to_string()),
        _ => None,
    }
}

/// A connection dragged from a condition's `true`/`false` branch carries the
/// branch in `condition`, not in the handle.
fn repair_condition_branch(edge: &Edge, kinds: &HashMap<&str, NodeKind>) -> Edge {
    let mut out = edge.clone();
    let Some(kind) = kinds.get(edge.source.as_str()) else {
        return out;
    };
    if let Some(handle) = edge.source_output.as_deref() {
        if contract(*kind).is_virtual_output(handle) {
            out.condition = Some(handle.to_string());
            out.source_output = None;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::types::Node;

    fn chain() -> WorkflowGraph {
        WorkflowGraph::new(
            vec![
                Node::new("in", NodeKind::Input, "In"),
                Node::new("llm", NodeKind::Llm, "LLM"),
                Node::new("out", NodeKind::Output, "Out"),
            ],
            vec![
                Edge::new("e1", "in", "llm").with_source_output("output1"),
                Edge::new("e2", "llm", "out").with_target_input("input"),
            ],
        )
    }

    #[test]
    fn normalize_strips_generic_aliases() {
        assert_eq!(normalize_handle("output"), None);
        assert_eq!(normalize_handle("output1"), None);
        assert_eq!(normalize_handle("input-0"), None);
        assert_eq!(normalize_handle("inputs"), None);
        assert_eq!(normalize_handle("documents"), Some("documents"));
        assert_eq!(normalize_handle("my_output"), Some("my_output"));
    }

    #[test]
    fn resolve_falls_back_to_primary_ports() {
        let g = chain();
        let kind_of = |id: &str| g.kind_of(id);
        assert_eq!(resolve_handle(&g.edges[0], Side::Source, kind_of), "data");
        assert_eq!(resolve_handle(&g.edges[0], Side::Target, kind_of), "prompt");
        assert_eq!(resolve_handle(&g.edges[1], Side::Source, kind_of), "content");
        assert_eq!(resolve_handle(&g.edges[1], Side::Target, kind_of), "input");
    }

    #[test]
    fn explicit_handles_win() {
        let g = chain();
        let edge = Edge::new("e", "llm", "out").with_source_output("metadata");
        assert_eq!(resolve_handle(&edge, Side::Source, |id| g.kind_of(id)), "metadata");
    }

    #[test]
    fn unknown_endpoint_gets_generic_fallback() {
        let g = chain();
        let edge = Edge::new("e", "ghost", "out");
        assert_eq!(resolve_handle(&edge, Side::Source, |id| g.kind_of(id)), "output");
    }

    #[test]
    fn resolve_graph_omits_defaults() {
        let mut g = chain();
        g.edges[1].source_output = Some("content".into());
        g.edges.push(Edge::new("e3", "llm", "out").with_source_output("metadata"));
        let resolved = resolve_graph(&g);
        assert_eq!(resolved.edges[0].source_output, None);
        assert_eq!(resolved.edges[1].source_output, None);
        assert_eq!(resolved.edges[1].target_input, None);
        assert_eq!(resolved.edges[2].source_output.as_deref(), Some("metadata"));
    }

    #[test]
    fn resolve_graph_is_idempotent() {
        let mut g = chain();
        g.edges.push(Edge::new("e3", "in", "out").with_source_output("query"));
        let once = resolve_graph(&g);
        assert_eq!(resolve_graph(&once), once);
        let shown = materialize_graph(&g);
        assert_eq!(materialize_graph(&shown), shown);
    }

    #[test]
    fn condition_branch_handle_becomes_condition() {
        let g = WorkflowGraph::new(
            vec![
                Node::new("c", NodeKind::Condition, "Check"),
                Node::new("out", NodeKind::Output, "Out"),
            ],
            vec![Edge::new("e", "c", "out").with_source_output("false")],
        );
        let resolved = resolve_graph(&g);
        assert_eq!(resolved.edges[0].condition.as_deref(), Some("false"));
        assert_eq!(resolved.edges[0].source_output, None);
    }
}
