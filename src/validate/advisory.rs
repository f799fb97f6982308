//! Lint-style findings (A0xx) and report suggestions. Nothing here blocks save.

use std::collections::HashSet;

use crate::config::Directories;
use crate::contract::contract;
use crate::error::Diagnostic;
use crate::parse::graph::GraphIndex;
use crate::parse::types::{NodeConfig, WorkflowGraph, text};
use crate::resolve::normalize_handle;

use super::node_rules::label;

pub const CYCLE_SUGGESTION: &str =
    "The workflow contains a cycle; break it before executing, since execution follows data-flow order";

pub fn validate_advisory(
    graph: &WorkflowGraph,
    index: &GraphIndex,
    directories: &Directories,
) -> Vec<Diagnostic> {
    let mut warnings = Vec::new();

    a001_source_ports_exist(graph, &mut warnings);
    a003_no_isolated_nodes(graph, index, &mut warnings);
    a004_known_knowledge_bases(graph, directories, &mut warnings);
    a005_known_models(graph, directories, &mut warnings);

    warnings
}

/// Suggestions carried alongside the diagnostics.
pub fn suggestions(index: &GraphIndex) -> Vec<String> {
    let mut out = Vec::new();
    if index.is_cyclic() {
        out.push(CYCLE_SUGGESTION.to_string());
    }
    out
}

fn a001_source_ports_exist(graph: &WorkflowGraph, warnings: &mut Vec<Diagnostic>) {
    for edge in &graph.edges {
        let Some(kind) = graph.kind_of(&edge.source) else {
            continue;
        };
        let Some(port) = edge.source_output.as_deref().and_then(normalize_handle) else {
            continue;
        };
        if !port.is_empty() && !contract(kind).has_output(port) {
            warnings.push(
                Diagnostic::advisory(
                    "A001",
                    format!(
                        "Edge '{}' uses output '{}', which {} nodes do not produce",
                        edge.id, port, kind
                    ),
                    Some(edge.source.clone()),
                )
                .on_edge(&edge.id),
            );
        }
    }
}

fn a003_no_isolated_nodes(
    graph: &WorkflowGraph,
    index: &GraphIndex,
    warnings: &mut Vec<Diagnostic>,
) {
    if index.node_indices.len() < 2 {
        return;
    }
    let mut seen = HashSet::new();
    for node in &graph.nodes {
        if seen.insert(node.id.as_str()) && index.is_isolated(&node.id) {
            warnings.push(Diagnostic::advisory(
                "A003",
                format!("{} is not connected to any other node", label(node)),
                Some(node.id.clone()),
            ));
        }
    }
}

fn a004_known_knowledge_bases(
    graph: &WorkflowGraph,
    directories: &Directories,
    warnings: &mut Vec<Diagnostic>,
) {
    for node in &graph.nodes {
        let NodeConfig::Retriever(c) = &node.config else {
            continue;
        };
        let Some(kb) = text(&c.knowledge_base).filter(|kb| !kb.trim().is_empty()) else {
            continue;
        };
        if directories.knows_knowledge_base(kb) == Some(false) {
            warnings.push(Diagnostic::advisory(
                "A004",
                format!("{}: knowledge base '{}' was not found", label(node), kb),
                Some(node.id.clone()),
            ));
        }
    }
}

fn a005_known_models(
    graph: &WorkflowGraph,
    directories: &Directories,
    warnings: &mut Vec<Diagnostic>,
) {
    for node in &graph.nodes {
        let NodeConfig::Llm(c) = &node.config else {
            continue;
        };
        let Some(model) = text(&c.model).filter(|m| !m.trim().is_empty()) else {
            continue;
        };
        if directories.knows_model(model) == Some(false) {
            warnings.push(Diagnostic::advisory(
                "A005",
                format!("{}: model '{}' was not found", label(node), model),
                Some(node.id.clone()),
            ));
        }
    }
}
