//! Integration tests for the Parse phase: workflow JSON parsing, round-trips, graph index,
//! immutable edits.
//! Update node-kind assertions/fixtures here when changing `src/parse/types.rs`.

mod helpers;

use flowgraph::error::GraphError;
use flowgraph::parse::{self, GraphIndex, NodeConfig, NodeKind};

#[test]
fn parse_rag_workflow() {
    let json = include_str!("fixtures/rag_workflow.json");
    let workflow = parse::parse(json).expect("Should parse successfully");
    assert_eq!(workflow.name, "Support Answer");
    assert_eq!(
        workflow.description.as_deref(),
        Some("Retrieve support articles and answer with citations")
    );
    assert_eq!(workflow.graph.nodes.len(), 4);
    assert_eq!(workflow.graph.edges.len(), 4);
}

#[test]
fn parse_round_trip() {
    let json = include_str!("fixtures/rag_workflow.json");
    let workflow = parse::parse(json).expect("Should parse");
    let serialized = parse::to_json(&workflow).expect("Should serialize");
    let workflow2 = parse::parse(&serialized).expect("Should parse again");
    assert_eq!(workflow, workflow2);
}

#[test]
fn parse_node_kinds_correct() {
    let workflow = helpers::load(include_str!("fixtures/rag_workflow.json"));
    let kinds: Vec<NodeKind> = workflow.graph.nodes.iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![NodeKind::Input, NodeKind::RagRetriever, NodeKind::Llm, NodeKind::Output]
    );
    match &workflow.graph.nodes[1].config {
        NodeConfig::Retriever(c) => {
            assert_eq!(parse::text(&c.knowledge_base), Some("kb-support"));
            assert_eq!(parse::number(&c.top_k), Some(5.0));
        }
        other => panic!("Expected retriever config, got {:?}", other),
    }
}

#[test]
fn parse_edge_handles() {
    let workflow = helpers::load(include_str!("fixtures/rag_workflow.json"));
    let e2 = workflow.graph.edge("e2").unwrap();
    assert_eq!(e2.source_output, None);
    assert_eq!(e2.target_input.as_deref(), Some("documents"));
}

#[test]
fn parse_invalid_json_returns_error() {
    let result = parse::parse("not valid json");
    assert!(matches!(result, Err(GraphError::Json(_))));
}

#[test]
fn parse_unknown_node_type_fails() {
    let json = r#"{"name": "x", "nodes": [{"id": "a", "type": "teleporter", "name": "A"}], "edges": []}"#;
    assert!(parse::parse(json).is_err());
}

#[test]
fn parse_non_object_config_fails() {
    let json = include_str!("fixtures/malformed_config.json");
    let err = parse::parse(json).unwrap_err();
    assert!(err.to_string().contains("non-object config"), "{}", err);
}

#[test]
fn parse_keeps_wrongly_typed_fields() {
    let workflow = helpers::load(include_str!("fixtures/mixed_findings.json"));
    match &workflow.graph.node("llm-1").unwrap().config {
        NodeConfig::Llm(c) => assert_eq!(parse::number(&c.temperature), Some(9.0)),
        other => panic!("Expected llm config, got {:?}", other),
    }
    let classifier = workflow.graph.node("classify-1").unwrap();
    assert_eq!(classifier.config.type_mismatches().len(), 1);
    assert_eq!(classifier.config_json()["categories"], "billing,bug");
}

#[test]
fn graph_index_over_fixture() {
    let graph = helpers::load_graph(include_str!("fixtures/rag_workflow.json"));
    let index = GraphIndex::build(&graph);
    assert_eq!(index.incoming_count("llm-1"), 2);
    assert_eq!(index.outgoing_count("input-1"), 2);
    assert!(index.dangling.is_empty());
    assert!(!index.is_cyclic());

    let cyclic = helpers::load_graph(include_str!("fixtures/cycle.json"));
    assert!(GraphIndex::build(&cyclic).is_cyclic());
}

#[test]
fn deleting_a_node_cascades() {
    let graph = helpers::load_graph(include_str!("fixtures/rag_workflow.json"));
    let next = graph.without_node("input-1");
    assert_eq!(next.nodes.len(), 3);
    let ids: Vec<&str> = next.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e2", "e4"]);
    // receiver untouched
    assert_eq!(graph.edges.len(), 4);
}

#[test]
fn connect_from_condition_branch() {
    let graph = helpers::load_graph(include_str!("fixtures/legacy_handles.json"));
    let next = graph
        .connect("e5", "cond-1", Some("false"), "http-1", None)
        .unwrap();
    let edge = next.edge("e5").unwrap();
    assert_eq!(edge.condition.as_deref(), Some("false"));
    assert_eq!(edge.source_output, None);
}
