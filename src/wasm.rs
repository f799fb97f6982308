//! WASM entry points for the browser editor.
//!
//! Every function takes JSON strings and returns a plain JS value, never an
//! exception. Workflow, layout, reference and completion results are tagged
//! `{status: "ok", ...}` or `{status: "errors", errors: [...]}`; validation
//! always returns a report.

use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::config::CompilerConfig;
use crate::error::{Diagnostic, DiagnosticKind, GraphError, Severity};
use crate::parse::types::{Node, Position, Workflow};
use crate::template::MustacheContext;

/// Normalize a workflow for saving: generic handles stripped, defaulted
/// handles omitted, condition branches repaired.
#[wasm_bindgen]
pub fn resolve_workflow(json: &str) -> JsValue {
    to_js(&map_workflow(json, crate::resolve::resolve_graph))
}

/// Every edge handle written out, for display.
#[wasm_bindgen]
pub fn materialize_workflow(json: &str) -> JsValue {
    to_js(&map_workflow(json, crate::resolve::materialize_graph))
}

fn map_workflow(
    json: &str,
    f: impl Fn(&crate::parse::WorkflowGraph) -> crate::parse::WorkflowGraph,
) -> WorkflowResult {
    let result = crate::parse::parse(json).and_then(|workflow| {
        let out = Workflow {
            graph: f(&workflow.graph),
            ..workflow
        };
        Ok(serde_json::to_value(&out)?)
    });
    match result {
        Ok(workflow) => WorkflowResult::Ok { workflow },
        Err(e) => WorkflowResult::Errors { errors: errors(e) },
    }
}

/// Client-side pre-check. Same shape as the remote validator's response,
/// plus the structured diagnostics.
#[wasm_bindgen]
pub fn validate_workflow(json: &str, config_json: &str) -> JsValue {
    to_js(&validate_workflow_inner(json, config_json))
}

fn validate_workflow_inner(json: &str, config_json: &str) -> ValidationDto {
    let report = match CompilerConfig::from_json(config_json) {
        Ok(config) => crate::validate::validate_json(json, &config),
        Err(e) => crate::validate::ValidationReport::from_diagnostics([Diagnostic::from(e)]),
    };
    let response = report.to_response();
    ValidationDto {
        is_valid: response.is_valid,
        errors: response.errors,
        warnings: response.warnings,
        suggestions: response.suggestions,
        diagnostics: report.diagnostics().cloned().map(DiagnosticDto::from).collect(),
    }
}

/// Validate one node as edited in the inspector.
#[wasm_bindgen]
pub fn validate_node(node_json: &str) -> JsValue {
    let result: Vec<DiagnosticDto> = match serde_json::from_str::<Node>(node_json) {
        Ok(node) => crate::validate::validate_node(&node)
            .into_iter()
            .map(DiagnosticDto::from)
            .collect(),
        Err(e) => errors(GraphError::from(e)),
    };
    to_js(&result)
}

/// Node positions keyed by id.
#[wasm_bindgen]
pub fn layout_workflow(json: &str, config_json: &str) -> JsValue {
    to_js(&layout_workflow_inner(json, config_json))
}

fn layout_workflow_inner(json: &str, config_json: &str) -> LayoutResult {
    let result = CompilerConfig::from_json(config_json).and_then(|config| {
        let workflow = crate::parse::parse(json)?;
        Ok(crate::layout::layout_with(&workflow.graph, &config.layout))
    });
    match result {
        Ok(positions) => LayoutResult::Ok { positions },
        Err(e) => LayoutResult::Errors { errors: errors(e) },
    }
}

/// Valid reference expressions for a node's template fields.
#[wasm_bindgen]
pub fn template_references(json: &str, node_id: &str) -> JsValue {
    to_js(&template_references_inner(json, node_id))
}

fn template_references_inner(json: &str, node_id: &str) -> ReferencesResult {
    let result = crate::parse::parse(json)
        .and_then(|workflow| crate::template::references_for(&workflow.graph, node_id));
    match result {
        Ok(references) => ReferencesResult::Ok { references },
        Err(e) => ReferencesResult::Errors { errors: errors(e) },
    }
}

/// Autocomplete at the caret. `full_picker` lifts the interactive cap.
#[wasm_bindgen]
pub fn complete_at(
    json: &str,
    node_id: &str,
    text: &str,
    caret: usize,
    full_picker: bool,
    config_json: &str,
) -> JsValue {
    to_js(&complete_at_inner(json, node_id, text, caret, full_picker, config_json))
}

fn complete_at_inner(
    json: &str,
    node_id: &str,
    text: &str,
    caret: usize,
    full_picker: bool,
    config_json: &str,
) -> CompletionResult {
    let result = CompilerConfig::from_json(config_json).and_then(|config| {
        let workflow = crate::parse::parse(json)?;
        let candidates = crate::template::references_for(&workflow.graph, node_id)?;
        let Some(context) = crate::template::context_at(text, caret) else {
            return Ok((None, Vec::new()));
        };
        let limit = (!full_picker).then_some(config.suggestions.interactive_limit);
        let context = ContextDto::new(context, text);
        let suggestions = crate::template::suggest(&candidates, &context.query, limit);
        Ok((Some(context), suggestions))
    });
    match result {
        Ok((context, suggestions)) => CompletionResult::Ok {
            context,
            suggestions,
        },
        Err(e) => CompletionResult::Errors { errors: errors(e) },
    }
}

/// Accept a suggestion at the caret, completing an open token or inserting a new one.
#[wasm_bindgen]
pub fn accept_suggestion(text: &str, caret: usize, candidate: &str) -> JsValue {
    to_js(&crate::template::insert_at(text, caret, candidate))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

/// `kind` and `severity` use the same snake_case names as `Diagnostic`.
#[derive(Debug, serde::Serialize)]
struct DiagnosticDto {
    code: String,
    kind: DiagnosticKind,
    severity: Severity,
    message: String,
    node_id: Option<String>,
    edge_id: Option<String>,
}

impl From<Diagnostic> for DiagnosticDto {
    fn from(d: Diagnostic) -> Self {
        DiagnosticDto {
            code: d.code,
            kind: d.kind,
            severity: d.severity,
            message: d.message,
            node_id: d.node_id,
            edge_id: d.edge_id,
        }
    }
}

fn errors(e: GraphError) -> Vec<DiagnosticDto> {
    vec![DiagnosticDto::from(Diagnostic::from(e))]
}

#[derive(Debug, serde::Serialize)]
struct ValidationDto {
    is_valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
    suggestions: Vec<String>,
    diagnostics: Vec<DiagnosticDto>,
}

#[derive(Debug, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum WorkflowResult {
    Ok { workflow: Value },
    Errors { errors: Vec<DiagnosticDto> },
}

#[derive(Debug, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum LayoutResult {
    Ok {
        positions: std::collections::BTreeMap<String, Position>,
    },
    Errors {
        errors: Vec<DiagnosticDto>,
    },
}

#[derive(Debug, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ReferencesResult {
    Ok { references: Vec<String> },
    Errors { errors: Vec<DiagnosticDto> },
}

#[derive(Debug, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum CompletionResult {
    /// `context` is null when the caret is not inside an open token.
    Ok {
        context: Option<ContextDto>,
        suggestions: Vec<String>,
    },
    Errors {
        errors: Vec<DiagnosticDto>,
    },
}

/// The open token around the caret together with the query typed so far.
#[derive(Debug, serde::Serialize)]
struct ContextDto {
    open_index: usize,
    replace_from: usize,
    replace_to: usize,
    query: String,
}

impl ContextDto {
    fn new(context: MustacheContext, text: &str) -> Self {
        ContextDto {
            open_index: context.open_index,
            replace_from: context.replace_from,
            replace_to: context.replace_to,
            query: context.query(text).to_string(),
        }
    }
}
