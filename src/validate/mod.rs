//! Validation phase.
//!
//! Structural rules, per-kind node rules, sandbox hints, reference checks
//! and advisory lints, collected into one `ValidationReport`. A bad node
//! never stops the pass; only malformed input does, and `validate_json`
//! turns that into a single `P001` error.

pub mod advisory;
pub mod node_rules;
pub mod references;
pub mod report;
pub mod sandbox;
pub mod structural;

pub use report::{ValidationOverlay, ValidationReport, ValidationResponse};

use crate::config::CompilerConfig;
use crate::error::Diagnostic;
use crate::parse::graph::GraphIndex;
use crate::parse::parse_for_validation;
use crate::parse::types::{Node, Workflow, WorkflowGraph};

pub(crate) const TRACING_TARGET: &str = "flowgraph::validate";

/// Validate the whole graph.
pub fn validate(graph: &WorkflowGraph, config: &CompilerConfig) -> ValidationReport {
    let index = GraphIndex::build(graph);

    let mut diagnostics = structural::validate_structural(graph, &index);
    for node in &graph.nodes {
        diagnostics.extend(validate_node(node));
    }
    diagnostics.extend(references::validate_references(graph));
    diagnostics.extend(advisory::validate_advisory(graph, &index, &config.directories));

    let mut report = ValidationReport::from_diagnostics(diagnostics);
    for suggestion in advisory::suggestions(&index) {
        report.suggest(suggestion);
    }

    tracing::debug!(
        target: TRACING_TARGET,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Validated workflow graph"
    );
    report
}

pub fn validate_workflow(workflow: &Workflow, config: &CompilerConfig) -> ValidationReport {
    validate(&workflow.graph, config)
}

/// Parse and validate; malformed input yields a report with one `P001` error.
pub fn validate_json(json: &str, config: &CompilerConfig) -> ValidationReport {
    match parse_for_validation(json) {
        Ok(workflow) => validate_workflow(&workflow, config),
        Err(diagnostic) => {
            tracing::debug!(
                target: TRACING_TARGET,
                error = %diagnostic,
                "Rejected malformed workflow"
            );
            ValidationReport::from_diagnostics([diagnostic])
        }
    }
}

/// Validate a single node's configuration, sandbox hints included.
pub fn validate_node(node: &Node) -> Vec<Diagnostic> {
    let mut diagnostics = node_rules::validate_node_config(node);
    diagnostics.extend(sandbox::validate_sandbox(node));
    diagnostics
}
