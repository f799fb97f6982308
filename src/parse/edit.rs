//! Editing operations on the graph value.
//!
//! Each returns a new `WorkflowGraph`; the receiver is left untouched so the
//! editor can keep the previous value for undo.

use crate::contract::contract;
use crate::error::GraphError;
use crate::resolve::normalize_handle;

use super::types::{Edge, Node, WorkflowGraph};

impl WorkflowGraph {
    pub fn with_node(&self, node: Node) -> WorkflowGraph {
        let mut next = self.clone();
        next.nodes.push(node);
        next
    }

    /// Remove a node together with every edge touching it.
    pub fn without_node(&self, node_id: &str) -> WorkflowGraph {
        WorkflowGraph {
            nodes: self.nodes.iter().filter(|n| n.id != node_id).cloned().collect(),
            edges: self.edges.iter().filter(|e| !e.touches(node_id)).cloned().collect(),
        }
    }

    pub fn with_edge(&self, edge: Edge) -> WorkflowGraph {
        let mut next = self.clone();
        next.edges.push(edge);
        next
    }

    pub fn without_edge(&self, edge_id: &str) -> WorkflowGraph {
        WorkflowGraph {
            nodes: self.nodes.clone(),
            edges: self.edges.iter().filter(|e| e.id != edge_id).cloned().collect(),
        }
    }

    /// Replace one node by applying `update` to a copy of it.
    pub fn with_node_updated(
        &self,
        node_id: &str,
        update: impl FnOnce(Node) -> Result<Node, GraphError>,
    ) -> Result<WorkflowGraph, GraphError> {
        let pos = self
            .nodes
            .iter()
            .position(|n| n.id == node_id)
            .ok_or_else(|| GraphError::UnknownNode(node_id.to_string()))?;
        let mut next = self.clone();
        next.nodes[pos] = update(self.nodes[pos].clone())?;
        Ok(next)
    }

    /// Add an edge the way a drag gesture would: generic handles are dropped,
    /// and a drag from a condition's `true`/`false` branch is recorded as the
    /// edge's `condition` rather than as a source port.
    pub fn connect(
        &self,
        id: impl Into<String>,
        source: &str,
        source_handle: Option<&str>,
        target: &str,
        target_handle: Option<&str>,
    ) -> Result<WorkflowGraph, GraphError> {
        let source_kind = self
            .kind_of(source)
            .ok_or_else(|| GraphError::UnknownNode(source.to_string()))?;
        if self.node(target).is_none() {
            return Err(GraphError::UnknownNode(target.to_string()));
        }

        let mut edge = Edge::new(id, source, target);
        match source_handle.filter(|h| !h.is_empty()).and_then(normalize_handle) {
            Some(h) if contract(source_kind).is_virtual_output(h) => {
                edge.condition = Some(h.to_string());
            }
            Some(h) => edge.source_output = Some(h.to_string()),
            None => {}
        }
        edge.target_input = target_handle
            .filter(|h| !h.is_empty())
            .and_then(normalize_handle)
            .map(str::to_string);

        Ok(self.with_edge(edge))
    }
}
