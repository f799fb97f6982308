//! Parse phase: JSON → Rust types + graph index.

pub mod edit;
pub mod graph;
pub mod types;

pub use graph::GraphIndex;
pub use types::*;

use crate::error::{Diagnostic, GraphError};

pub(crate) const TRACING_TARGET: &str = "flowgraph::parse";

/// Deserialize a persisted workflow JSON string.
pub fn parse(json: &str) -> Result<Workflow, GraphError> {
    let workflow = serde_json::from_str::<Workflow>(json)?;
    tracing::debug!(
        target: TRACING_TARGET,
        nodes = workflow.graph.nodes.len(),
        edges = workflow.graph.edges.len(),
        "Parsed workflow"
    );
    Ok(workflow)
}

/// Parse for a validation call: a malformed document becomes one `P001` diagnostic.
pub fn parse_for_validation(json: &str) -> Result<Workflow, Diagnostic> {
    parse(json).map_err(Diagnostic::from)
}

/// Serialize a workflow back to its wire form.
pub fn to_json(workflow: &Workflow) -> Result<String, GraphError> {
    Ok(serde_json::to_string(workflow)?)
}
