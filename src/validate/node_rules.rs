//! Per-node configuration validation (N0xx).
//! Match arms here must track `NodeConfig` in `parse/types.rs`.

use serde_json::{Number, Value};

use crate::contract::contract;
use crate::error::Diagnostic;
use crate::parse::types::*;

pub const HTTP_METHODS: [&str; 5] = ["GET", "POST", "PUT", "PATCH", "DELETE"];
pub const OUTPUT_FORMATS: [&str; 3] = ["json", "text", "markdown"];
pub const CONDITION_TYPES: [&str; 5] = ["equals", "contains", "greater_than", "less_than", "truthy"];

/// Validate a single node's config. Returns all findings.
pub fn validate_node_config(node: &Node) -> Vec<Diagnostic> {
    let mut errors = Vec::new();

    n001_required_keys(node, &mut errors);
    n002_field_types(node, &mut errors);

    match &node.config {
        NodeConfig::Llm(c) => {
            if let Some(t) = number(&c.temperature) {
                if !(0.0..=2.0).contains(&t) {
                    errors.push(Diagnostic::config(
                        "N010",
                        format!("{}: temperature must be between 0 and 2, got {}", label(node), t),
                        &node.id,
                    ));
                }
            }
            if let Some(n) = number(&c.max_tokens) {
                if n < 1.0 || n.fract() != 0.0 {
                    errors.push(Diagnostic::config(
                        "N011",
                        format!("{}: max_tokens must be an integer of at least 1, got {}", label(node), n),
                        &node.id,
                    ));
                }
            }
        }
        NodeConfig::Retriever(c) => {
            if let Some(k) = number(&c.top_k) {
                if !(1.0..=50.0).contains(&k) {
                    errors.push(Diagnostic::config(
                        "N012",
                        format!("{}: top_k must be between 1 and 50, got {}", label(node), k),
                        &node.id,
                    ));
                }
            }
        }
        NodeConfig::HttpRequest(c) => {
            if let Some(method) = text(&c.method) {
                if !HTTP_METHODS.contains(&method.to_ascii_uppercase().as_str()) {
                    errors.push(Diagnostic::config(
                        "N020",
                        format!("{}: invalid HTTP method '{}'", label(node), method),
                        &node.id,
                    ));
                }
            }
            if let Some(t) = number(&c.timeout) {
                if t <= 0.0 {
                    errors.push(Diagnostic::config(
                        "N021",
                        format!("{}: timeout must be greater than 0, got {}", label(node), t),
                        &node.id,
                    ));
                }
            }
            require_object(node, "N022", "headers", c.headers.as_ref(), &mut errors);
            require_object(node, "N023", "params", c.params.as_ref(), &mut errors);
        }
        NodeConfig::Condition(c) => {
            let condition_type = c.condition_type();
            if !CONDITION_TYPES.contains(&condition_type) {
                errors.push(Diagnostic::config_warning(
                    "N031",
                    format!(
                        "{}: unknown condition_type '{}', the value will be tested for truthiness",
                        label(node),
                        condition_type
                    ),
                    &node.id,
                ));
            }
            if condition_type != "truthy" && is_empty(c.condition_value.as_ref()) {
                errors.push(Diagnostic::config_warning(
                    "N030",
                    format!("{}: condition_value is empty", label(node)),
                    &node.id,
                ));
            }
        }
        NodeConfig::CodeExecutor(c) => {
            range(node, "timeout_sec", &c.timeout_sec, 0.1, 30.0, &mut errors);
            range(node, "max_memory_mb", &c.max_memory_mb, 16.0, 4096.0, &mut errors);
            range(node, "max_stdout_chars", &c.max_stdout_chars, 1000.0, 200_000.0, &mut errors);
            range(node, "max_input_bytes", &c.max_input_bytes, 10_000.0, 50_000_000.0, &mut errors);
            range(node, "max_result_bytes", &c.max_result_bytes, 10_000.0, 50_000_000.0, &mut errors);
        }
        NodeConfig::Output(c) => {
            if let Some(format) = text(&c.format) {
                if !OUTPUT_FORMATS.contains(&format) {
                    errors.push(Diagnostic::config(
                        "N050",
                        format!(
                            "{}: format must be one of json, text, markdown, got '{}'",
                            label(node),
                            format
                        ),
                        &node.id,
                    ));
                }
            }
        }
        NodeConfig::Input(_)
        | NodeConfig::Parser(_)
        | NodeConfig::Embeddings(_)
        | NodeConfig::Reranker(_)
        | NodeConfig::Classifier(_)
        | NodeConfig::DataTransformer(_) => {}
    }

    n060_flat_overrides(node, &mut errors);

    errors
}

/// `kind 'name'`, or the id when the node is unnamed.
pub(crate) fn label(node: &Node) -> String {
    let name = if node.name.trim().is_empty() {
        &node.id
    } else {
        &node.name
    };
    format!("{} '{}'", node.kind, name)
}

fn n001_required_keys(node: &Node, errors: &mut Vec<Diagnostic>) {
    for key in contract(node.kind).required {
        if is_empty(node.config.get(key).as_ref()) {
            errors.push(Diagnostic::config(
                "N001",
                format!("{}: {} is required", label(node), key),
                &node.id,
            ));
        }
    }
}

/// Wrongly typed fields are skipped by the range checks below, so each one
/// gets its own error here.
fn n002_field_types(node: &Node, errors: &mut Vec<Diagnostic>) {
    for mismatch in node.config.type_mismatches() {
        errors.push(Diagnostic::config(
            "N002",
            format!(
                "{}: {} must be {}, got {}",
                label(node),
                mismatch.field,
                mismatch.expected,
                mismatch.found
            ),
            &node.id,
        ));
    }
}

fn n060_flat_overrides(node: &Node, errors: &mut Vec<Diagnostic>) {
    match &node.overrides {
        None => {}
        Some(Value::Object(map)) => {
            for (key, value) in map {
                if value.is_object() || value.is_array() {
                    errors.push(Diagnostic::config(
                        "N060",
                        format!("{}: override '{}' must be a scalar value", label(node), key),
                        &node.id,
                    ));
                }
            }
        }
        Some(_) => errors.push(Diagnostic::config(
            "N060",
            format!("{}: overrides must be an object", label(node)),
            &node.id,
        )),
    }
}

fn require_object(
    node: &Node,
    code: &str,
    field: &str,
    value: Option<&Value>,
    errors: &mut Vec<Diagnostic>,
) {
    match value {
        None | Some(Value::Null) | Some(Value::Object(_)) => {}
        Some(_) => errors.push(Diagnostic::config(
            code,
            format!("{}: {} must be a JSON object", label(node), field),
            &node.id,
        )),
    }
}

fn range(
    node: &Node,
    field: &str,
    value: &Option<Field<Number>>,
    min: f64,
    max: f64,
    errors: &mut Vec<Diagnostic>,
) {
    if let Some(v) = number(value) {
        if !(min..=max).contains(&v) {
            errors.push(Diagnostic::config(
                "N040",
                format!("{}: {} must be between {} and {}, got {}", label(node), field, min, max, v),
                &node.id,
            ));
        }
    }
}

/// Absent, null, blank string, or empty array.
fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}
