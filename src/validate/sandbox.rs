//! Early feedback on code-executor content (C0xx, warnings only).
//! The sandbox enforces the real policy at run time.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Diagnostic;
use crate::parse::types::{Node, NodeConfig, text};

use super::node_rules::label;

static RESULT_ASSIGN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\bresult\b\s*(?:\[[^\]\n]*\]\s*)*(?::[^=\n]*)?=(?:[^=]|$)")
        .expect("valid result regex")
});

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:import\s+\w|from\s+[\w.]+\s+import\b)").expect("valid import regex")
});

static DUNDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__[A-Za-z0-9_]+__").expect("valid dunder regex"));

pub fn validate_sandbox(node: &Node) -> Vec<Diagnostic> {
    let mut warnings = Vec::new();
    let NodeConfig::CodeExecutor(c) = &node.config else {
        return warnings;
    };
    let Some(code) = text(&c.code).filter(|code| !code.trim().is_empty()) else {
        return warnings;
    };

    c001_assigns_result(node, code, &mut warnings);
    c002_no_imports(node, code, &mut warnings);
    c003_no_dunder_access(node, code, &mut warnings);

    warnings
}

fn c001_assigns_result(node: &Node, code: &str, warnings: &mut Vec<Diagnostic>) {
    if !RESULT_ASSIGN_RE.is_match(code) {
        warnings.push(Diagnostic::sandbox(
            "C001",
            format!("{}: code never assigns `result`, so the node has no output", label(node)),
            &node.id,
        ));
    }
}

fn c002_no_imports(node: &Node, code: &str, warnings: &mut Vec<Diagnostic>) {
    if let Some(m) = IMPORT_RE.find(code) {
        warnings.push(Diagnostic::sandbox(
            "C002",
            format!(
                "{}: '{}' is an import, which the sandbox blocks",
                label(node),
                m.as_str().trim()
            ),
            &node.id,
        ));
    }
}

fn c003_no_dunder_access(node: &Node, code: &str, warnings: &mut Vec<Diagnostic>) {
    if let Some(m) = DUNDER_RE.find(code) {
        warnings.push(Diagnostic::sandbox(
            "C003",
            format!(
                "{}: access to '{}' is blocked by the sandbox",
                label(node),
                m.as_str()
            ),
            &node.id,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::types::NodeKind;
    use serde_json::json;

    fn run(code: &str) -> Vec<String> {
        let node = Node::new("c", NodeKind::CodeExecutor, "Code")
            .with_config(json!({ "code": code }))
            .unwrap();
        validate_sandbox(&node).into_iter().map(|d| d.code).collect()
    }

    #[test]
    fn plain_assignment_is_clean() {
        assert!(run("x = data['a']\nresult = {'v': x}").is_empty());
    }

    #[test]
    fn result_assignment_forms() {
        assert!(run("result['total'] = 3").is_empty());
        assert!(run("result: dict = {}").is_empty());
        assert!(run("result=1").is_empty());
    }

    #[test]
    fn comparison_is_not_assignment() {
        assert_eq!(run("if result == 1:\n    pass"), vec!["C001"]);
        assert_eq!(run("my_result = 2"), vec!["C001"]);
    }

    #[test]
    fn imports_and_dunders() {
        assert_eq!(run("import os\nresult = 1"), vec!["C002"]);
        assert_eq!(run("  from os.path import join\nresult = 1"), vec!["C002"]);
        assert_eq!(run("result = ().__class__"), vec!["C003"]);
        assert_eq!(run("result = __import__('os')"), vec!["C003"]);
    }

    #[test]
    fn empty_code_is_left_to_required_check() {
        assert!(run("   ").is_empty());
    }
}
