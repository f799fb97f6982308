//! Reference-validity pass (R001, warnings only).

use std::collections::HashSet;

use crate::error::Diagnostic;
use crate::parse::types::WorkflowGraph;
use crate::template::{ROOT_REFERENCES, references_for, root_of, tokens};

use super::TRACING_TARGET;

/// Warn about every `{{ expr }}` whose root is neither reachable through an
/// incoming edge nor seeded by the runtime.
pub fn validate_references(graph: &WorkflowGraph) -> Vec<Diagnostic> {
    let mut warnings = Vec::new();
    let mut seen_nodes = HashSet::new();

    for node in &graph.nodes {
        if !seen_nodes.insert(node.id.as_str()) {
            continue;
        }
        let fields = node.template_fields();
        if fields.is_empty() {
            continue;
        }
        let Ok(refs) = references_for(graph, &node.id) else {
            continue;
        };

        let mut roots: HashSet<&str> = refs.iter().map(|r| root_of(r)).collect();
        roots.extend(ROOT_REFERENCES);

        for (field, text) in &fields {
            for token in tokens(text) {
                let known = roots.contains(token.root());
                tracing::trace!(
                    target: TRACING_TARGET,
                    node_id = %node.id,
                    field = %field,
                    expr = %token.expr,
                    known,
                    "Checked template reference"
                );
                if !known {
                    warnings.push(Diagnostic::reference(
                        format!("reference may not exist: {{{{{}}}}}", token.expr),
                        &node.id,
                    ));
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::types::{Edge, Node, NodeKind};
    use serde_json::json;

    fn answer(prompt: &str) -> Node {
        Node::new("b", NodeKind::Llm, "Answer")
            .with_config(json!({ "system_prompt": prompt }))
            .unwrap()
    }

    #[test]
    fn unmapped_root_warns_once() {
        let g = WorkflowGraph::new(
            vec![Node::new("a", NodeKind::RagRetriever, "Search"), answer("Use {{documents}}")],
            vec![Edge::new("e", "a", "b")],
        );
        let warnings = validate_references(&g);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "reference may not exist: {{documents}}");
        assert_eq!(warnings[0].node_id.as_deref(), Some("b"));
    }

    #[test]
    fn mapped_root_is_clean() {
        let g = WorkflowGraph::new(
            vec![Node::new("a", NodeKind::RagRetriever, "Search"), answer("Use {{documents[0].text}}")],
            vec![Edge::new("e", "a", "b").with_target_input("documents")],
        );
        assert!(validate_references(&g).is_empty());
    }

    #[test]
    fn runtime_roots_need_no_edge() {
        let g = WorkflowGraph::new(
            vec![answer("{{ query }} {{tenant_id}} {{input.text}} {{context.user_id}} {{data.x}}")],
            vec![],
        );
        assert!(validate_references(&g).is_empty());
    }
}
