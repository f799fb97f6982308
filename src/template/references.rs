//! Per-node variable sets derived from incoming data-flow edges.

use std::collections::BTreeSet;

use crate::contract::contract;
use crate::error::GraphError;
use crate::parse::types::WorkflowGraph;
use crate::resolve::{GENERIC_INPUT, Side, is_generic_handle, resolve_handle};

use super::TRACING_TARGET;

/// Always offered, whatever the node's inputs.
pub const GLOBAL_REFERENCES: [&str; 5] = [
    "input.prompt",
    "input.query",
    "input.text",
    "context.tenant_id",
    "context.user_id",
];

/// Roots the runtime seeds from the workflow input and request context.
pub const ROOT_REFERENCES: [&str; 6] = ["prompt", "query", "text", "data", "tenant_id", "user_id"];

/// Every reference expression valid inside a template field of `node_id`,
/// sorted and deduplicated.
pub fn references_for(graph: &WorkflowGraph, node_id: &str) -> Result<Vec<String>, GraphError> {
    if graph.node(node_id).is_none() {
        return Err(GraphError::UnknownNode(node_id.to_string()));
    }

    let kind_of = |id: &str| graph.kind_of(id);
    let mut refs: BTreeSet<String> = GLOBAL_REFERENCES.iter().map(|r| r.to_string()).collect();

    for edge in graph.incoming(node_id) {
        let resolved = resolve_handle(edge, Side::Target, kind_of);
        let key = if resolved.is_empty() || is_generic_handle(&resolved) {
            GENERIC_INPUT.to_string()
        } else {
            resolved
        };

        refs.insert(key.clone());
        refs.insert(format!("data.{}", key));

        if let Some(producer) = graph.kind_of(&edge.source) {
            let port = resolve_handle(edge, Side::Source, kind_of);
            let root = if key == "data" { "data.data".to_string() } else { key.clone() };
            for suffix in contract(producer).shape_of(&port) {
                refs.insert(format!("{}{}", root, suffix));
            }
        }
    }

    tracing::debug!(
        target: TRACING_TARGET,
        node_id,
        references = refs.len(),
        "Collected template references"
    );
    Ok(refs.into_iter().collect())
}
