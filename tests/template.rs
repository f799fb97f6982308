//! Integration tests for the Template Reference Resolver: variable sets and autocomplete.

mod helpers;

use flowgraph::config::CompilerConfig;
use flowgraph::error::GraphError;
use flowgraph::parse::{Edge, NodeKind, WorkflowGraph};
use flowgraph::template::{accept, context_at, insert_at, references_for, suggest};

fn retriever_into_llm(target_input: Option<&str>) -> WorkflowGraph {
    let mut edge = Edge::new("e1", "a", "b");
    edge.target_input = target_input.map(str::to_string);
    WorkflowGraph::new(
        vec![
            helpers::node_with("a", NodeKind::RagRetriever, serde_json::json!({ "knowledge_base": "kb" })),
            helpers::node_with("b", NodeKind::Llm, serde_json::json!({})),
        ],
        vec![edge],
    )
}

#[test]
fn default_port_gets_documents_shape() {
    let graph = retriever_into_llm(None);
    let refs = references_for(&graph, "b").unwrap();
    // target key is the llm's primary input
    assert!(refs.contains(&"prompt".to_string()), "{:?}", refs);
    assert!(refs.contains(&"data.prompt".to_string()));
    assert!(refs.contains(&"prompt[0].text".to_string()));
    assert!(!refs.contains(&"documents".to_string()));
}

#[test]
fn references_are_sorted_and_stable() {
    let graph = retriever_into_llm(Some("documents"));
    let refs = references_for(&graph, "b").unwrap();
    insta::assert_snapshot!(
        refs.join(" "),
        @"context.tenant_id context.user_id data.documents documents documents[0].metadata documents[0].score documents[0].text input.prompt input.query input.text"
    );
    assert_eq!(references_for(&graph, "b").unwrap(), refs);
}

#[test]
fn llm_metadata_shape() {
    let graph = WorkflowGraph::new(
        vec![
            helpers::node_with("l", NodeKind::Llm, serde_json::json!({})),
            helpers::node_with("o", NodeKind::Output, serde_json::json!({})),
        ],
        vec![Edge::new("e", "l", "o").with_source_output("metadata").with_target_input("meta")],
    );
    let refs = references_for(&graph, "o").unwrap();
    assert!(refs.contains(&"meta.model".to_string()));
    assert!(refs.contains(&"meta.usage.total_tokens".to_string()));
}

#[test]
fn http_response_shape() {
    let graph = helpers::load_graph(include_str!("fixtures/legacy_handles.json"));
    let refs = references_for(&graph, "output-1").unwrap();
    for expected in ["input", "data.input", "input.content", "input.text", "input.data"] {
        assert!(refs.contains(&expected.to_string()), "missing {}: {:?}", expected, refs);
    }
}

#[test]
fn unknown_node_is_rejected() {
    let graph = helpers::load_graph(include_str!("fixtures/chain_workflow.json"));
    assert!(matches!(references_for(&graph, "ghost"), Err(GraphError::UnknownNode(_))));
}

#[test]
fn autocomplete_scenario() {
    let graph = retriever_into_llm(Some("documents"));
    let text = "Hello {{doc";
    let ctx = context_at(text, text.len()).expect("caret is inside a token");
    assert_eq!(ctx.query(text), "doc");

    let refs = references_for(&graph, "b").unwrap();
    let limit = CompilerConfig::default().suggestions.interactive_limit;
    let suggestions = suggest(&refs, ctx.query(text), Some(limit));
    assert_eq!(suggestions[0], "documents");

    let done = accept(text, &ctx, &suggestions[0]);
    assert_eq!(done.text, "Hello {{documents}}");
    assert_eq!(done.caret, "Hello {{documents".len());
}

#[test]
fn interactive_cap_and_full_picker() {
    let candidates: Vec<String> = (0..20).map(|i| format!("field_{:02}", i)).collect();
    assert_eq!(suggest(&candidates, "field", Some(12)).len(), 12);
    assert_eq!(suggest(&candidates, "field", None).len(), 20);
    assert_eq!(suggest(&candidates, "FIELD_07", None), vec!["field_07"]);
}

#[test]
fn chip_click_outside_token_inserts_whole_token() {
    let done = insert_at("Summarize: ", 11, "documents[0].text");
    assert_eq!(done.text, "Summarize: {{documents[0].text}}");
    assert_eq!(done.caret, done.text.len());

    let done = insert_at("Q: {{ qu", 8, "query");
    assert_eq!(done.text, "Q: {{ query}}");
    assert_eq!(done.caret, 11);
}
