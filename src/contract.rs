//! Capability Contract Table: the fixed ports and required keys of each node kind.
//!
//! Every other phase reads port names from here; nothing else hardcodes them.

use crate::parse::types::NodeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contract {
    pub kind: NodeKind,
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
    /// Connectable outputs that never take part in default-port inference.
    pub virtual_outputs: &'static [&'static str],
    pub primary_input: Option<&'static str>,
    pub primary_output: Option<&'static str>,
    /// Config keys that must hold a non-empty value.
    pub required: &'static [&'static str],
    /// Nested paths an output port exposes, as suffixes of the variable root.
    pub shapes: &'static [(&'static str, &'static [&'static str])],
}

impl Contract {
    /// Declared or virtual output.
    pub fn has_output(&self, port: &str) -> bool {
        self.outputs.contains(&port) || self.is_virtual_output(port)
    }

    pub fn is_virtual_output(&self, port: &str) -> bool {
        self.virtual_outputs.contains(&port)
    }

    /// Shape-hint suffixes for an output port; empty when the port is opaque.
    pub fn shape_of(&self, port: &str) -> &'static [&'static str] {
        self.shapes
            .iter()
            .find(|(name, _)| *name == port)
            .map(|(_, suffixes)| *suffixes)
            .unwrap_or(&[])
    }
}

const DOCUMENTS_SHAPE: &[&str] = &["[0].text", "[0].metadata", "[0].score"];
const METADATA_SHAPE: &[&str] = &[".model", ".usage.total_tokens"];
const PAYLOAD_SHAPE: &[&str] = &[".content", ".text", ".data"];

const RETRIEVER_INPUTS: &[&str] = &["query"];
const RETRIEVER_OUTPUTS: &[&str] = &["documents"];
const RETRIEVER_REQUIRED: &[&str] = &["knowledge_base"];
const RETRIEVER_SHAPES: &[(&str, &[&str])] = &[("documents", DOCUMENTS_SHAPE)];

const INPUT: Contract = Contract {
    kind: NodeKind::Input,
    inputs: &[],
    outputs: &["data", "input", "prompt", "query", "text"],
    virtual_outputs: &[],
    primary_input: None,
    primary_output: Some("data"),
    required: &[],
    shapes: &[],
};

const LLM: Contract = Contract {
    kind: NodeKind::Llm,
    inputs: &["prompt"],
    outputs: &["content", "metadata"],
    virtual_outputs: &[],
    primary_input: Some("prompt"),
    primary_output: Some("content"),
    required: &[],
    shapes: &[("metadata", METADATA_SHAPE)],
};

const RAG_RETRIEVER: Contract = Contract {
    kind: NodeKind::RagRetriever,
    inputs: RETRIEVER_INPUTS,
    outputs: RETRIEVER_OUTPUTS,
    virtual_outputs: &[],
    primary_input: Some("query"),
    primary_output: Some("documents"),
    required: RETRIEVER_REQUIRED,
    shapes: RETRIEVER_SHAPES,
};

const HYBRID_RETRIEVER: Contract = Contract {
    kind: NodeKind::HybridRetriever,
    ..RAG_RETRIEVER
};

const RETRIEVER: Contract = Contract {
    kind: NodeKind::Retriever,
    ..RAG_RETRIEVER
};

const HTTP_REQUEST: Contract = Contract {
    kind: NodeKind::HttpRequest,
    inputs: &["url"],
    outputs: &["response_data", "status_code", "success"],
    virtual_outputs: &[],
    primary_input: Some("url"),
    primary_output: Some("response_data"),
    required: &["url"],
    shapes: &[("response_data", PAYLOAD_SHAPE)],
};

const CONDITION: Contract = Contract {
    kind: NodeKind::Condition,
    inputs: &["value"],
    outputs: &["condition_result"],
    virtual_outputs: &["true", "false"],
    primary_input: Some("value"),
    primary_output: Some("condition_result"),
    required: &["field_path"],
    shapes: &[],
};

const CODE_EXECUTOR: Contract = Contract {
    kind: NodeKind::CodeExecutor,
    inputs: &["input"],
    outputs: &["result"],
    virtual_outputs: &[],
    primary_input: Some("input"),
    primary_output: Some("result"),
    required: &["code"],
    shapes: &[("result", PAYLOAD_SHAPE)],
};

const OUTPUT: Contract = Contract {
    kind: NodeKind::Output,
    inputs: &["input"],
    outputs: &[],
    virtual_outputs: &[],
    primary_input: Some("input"),
    primary_output: None,
    required: &[],
    shapes: &[],
};

const PARSER: Contract = Contract {
    kind: NodeKind::Parser,
    inputs: &["text"],
    outputs: &["parsed_data", "success"],
    virtual_outputs: &[],
    primary_input: Some("text"),
    primary_output: Some("parsed_data"),
    required: &[],
    shapes: &[],
};

const EMBEDDINGS: Contract = Contract {
    kind: NodeKind::Embeddings,
    inputs: &["text"],
    outputs: &["embedding", "dimensions"],
    virtual_outputs: &[],
    primary_input: Some("text"),
    primary_output: Some("embedding"),
    required: &[],
    shapes: &[],
};

const RERANKER: Contract = Contract {
    kind: NodeKind::Reranker,
    inputs: &["query", "documents"],
    outputs: &["reranked_documents"],
    virtual_outputs: &[],
    primary_input: Some("query"),
    primary_output: Some("reranked_documents"),
    required: &[],
    shapes: &[("reranked_documents", DOCUMENTS_SHAPE)],
};

const CLASSIFIER: Contract = Contract {
    kind: NodeKind::Classifier,
    inputs: &["text"],
    outputs: &["class", "confidence"],
    virtual_outputs: &[],
    primary_input: Some("text"),
    primary_output: Some("class"),
    required: &[],
    shapes: &[],
};

const DATA_TRANSFORMER: Contract = Contract {
    kind: NodeKind::DataTransformer,
    inputs: &["data"],
    outputs: &["json_output"],
    virtual_outputs: &[],
    primary_input: Some("data"),
    primary_output: Some("json_output"),
    required: &[],
    shapes: &[],
};

pub fn contract(kind: NodeKind) -> &'static Contract {
    match kind {
        NodeKind::Input => &INPUT,
        NodeKind::Llm => &LLM,
        NodeKind::RagRetriever => &RAG_RETRIEVER,
        NodeKind::HybridRetriever => &HYBRID_RETRIEVER,
        NodeKind::Retriever => &RETRIEVER,
        NodeKind::HttpRequest => &HTTP_REQUEST,
        NodeKind::Condition => &CONDITION,
        NodeKind::CodeExecutor => &CODE_EXECUTOR,
        NodeKind::Output => &OUTPUT,
        NodeKind::Parser => &PARSER,
        NodeKind::Embeddings => &EMBEDDINGS,
        NodeKind::Reranker => &RERANKER,
        NodeKind::Classifier => &CLASSIFIER,
        NodeKind::DataTransformer => &DATA_TRANSFORMER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_but_output_has_outputs() {
        for kind in NodeKind::ALL {
            let c = contract(kind);
            assert_eq!(c.kind, kind);
            if kind == NodeKind::Output {
                assert!(c.outputs.is_empty());
            } else {
                assert!(!c.outputs.is_empty(), "{} has no outputs", kind);
            }
        }
    }

    #[test]
    fn primary_ports_are_declared_ports() {
        for kind in NodeKind::ALL {
            let c = contract(kind);
            match c.primary_input {
                Some(p) => assert!(c.inputs.contains(&p), "{}: {}", kind, p),
                None => assert!(c.inputs.is_empty()),
            }
            match c.primary_output {
                Some(p) => assert!(c.outputs.contains(&p), "{}: {}", kind, p),
                None => assert!(c.outputs.is_empty()),
            }
        }
    }

    #[test]
    fn condition_branches_are_virtual() {
        let c = contract(NodeKind::Condition);
        assert!(c.has_output("true"));
        assert!(c.is_virtual_output("false"));
        assert_ne!(c.primary_output, Some("true"));
    }

    #[test]
    fn shape_hints() {
        assert_eq!(contract(NodeKind::RagRetriever).shape_of("documents").len(), 3);
        assert_eq!(
            contract(NodeKind::Llm).shape_of("metadata"),
            &[".model", ".usage.total_tokens"]
        );
        assert!(contract(NodeKind::Llm).shape_of("content").is_empty());
    }
}
