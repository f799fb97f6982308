//! Rust types for the persisted workflow JSON.
//!
//! Wire shape: `{ name, description, nodes: [{id, type, name, config, position}],
//! edges: [{id, source, target, source_output?, target_input?, condition?, transform?}] }`.
//! Node configuration is a typed record per kind; unknown keys are carried
//! through untouched so a load/save cycle never drops editor state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::GraphError;

// =============================================================================
// TOP-LEVEL WORKFLOW
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub graph: WorkflowGraph,
}

/// The editable graph value. Every phase takes it by reference and returns
/// a new value; nothing mutates a node or edge in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl WorkflowGraph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        WorkflowGraph { nodes, edges }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn kind_of(&self, id: &str) -> Option<NodeKind> {
        self.node(id).map(|n| n.kind)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Edges ending at `node_id`, in edge-list order.
    pub fn incoming<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.target == node_id)
    }

    /// Edges leaving `node_id`, in edge-list order.
    pub fn outgoing<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source == node_id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

// =============================================================================
// EDGE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Explicit output port on the source. `None` (or a generic alias such as
    /// `output1`) means "the source kind's primary output".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_input: Option<String>,
    /// `"true"` / `"false"` on edges leaving a condition branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Edge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_output: None,
            target_input: None,
            condition: None,
            transform: None,
        }
    }

    pub fn with_source_output(mut self, port: impl Into<String>) -> Self {
        self.source_output = Some(port.into());
        self
    }

    pub fn with_target_input(mut self, port: impl Into<String>) -> Self {
        self.target_input = Some(port.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

// =============================================================================
// NODE KIND
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Input,
    Llm,
    RagRetriever,
    HybridRetriever,
    Retriever,
    HttpRequest,
    Condition,
    CodeExecutor,
    Output,
    Parser,
    Embeddings,
    Reranker,
    Classifier,
    DataTransformer,
}

impl NodeKind {
    pub const ALL: [NodeKind; 14] = [
        NodeKind::Input,
        NodeKind::Llm,
        NodeKind::RagRetriever,
        NodeKind::HybridRetriever,
        NodeKind::Retriever,
        NodeKind::HttpRequest,
        NodeKind::Condition,
        NodeKind::CodeExecutor,
        NodeKind::Output,
        NodeKind::Parser,
        NodeKind::Embeddings,
        NodeKind::Reranker,
        NodeKind::Classifier,
        NodeKind::DataTransformer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Input => "input",
            NodeKind::Llm => "llm",
            NodeKind::RagRetriever => "rag_retriever",
            NodeKind::HybridRetriever => "hybrid_retriever",
            NodeKind::Retriever => "retriever",
            NodeKind::HttpRequest => "http_request",
            NodeKind::Condition => "condition",
            NodeKind::CodeExecutor => "code_executor",
            NodeKind::Output => "output",
            NodeKind::Parser => "parser",
            NodeKind::Embeddings => "embeddings",
            NodeKind::Reranker => "reranker",
            NodeKind::Classifier => "classifier",
            NodeKind::DataTransformer => "data_transformer",
        }
    }

    pub fn is_retriever(&self) -> bool {
        matches!(
            self,
            NodeKind::RagRetriever | NodeKind::HybridRetriever | NodeKind::Retriever
        )
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// NODE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub name: String,
    pub description: Option<String>,
    pub config: NodeConfig,
    /// `config.overrides` on the wire: static values filled into missing inputs.
    pub overrides: Option<Value>,
    pub position: Position,
}

impl Node {
    /// A freshly dropped node with the kind's default configuration.
    pub fn new(id: impl Into<String>, kind: NodeKind, name: impl Into<String>) -> Self {
        Node {
            id: id.into(),
            kind,
            name: name.into(),
            description: None,
            config: NodeConfig::default_for(kind),
            overrides: None,
            position: Position::default(),
        }
    }

    /// Replace the configuration from a raw JSON object, as the inspector does.
    pub fn with_config(mut self, config: Value) -> Result<Self, GraphError> {
        let (config, overrides) = split_config(&self.id, self.kind, config)?;
        self.config = config;
        self.overrides = overrides;
        Ok(self)
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// The configuration as it appears on the wire, overrides included.
    pub fn config_json(&self) -> Map<String, Value> {
        let mut map = self.config.to_map();
        if let Some(overrides) = &self.overrides {
            map.insert("overrides".into(), overrides.clone());
        }
        map
    }

    /// Fields whose text may contain `{{ … }}` tokens, as `(field, text)` pairs.
    /// Every string value under `overrides` is included as `overrides.<key>`.
    pub fn template_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        match &self.config {
            NodeConfig::Llm(c) => push_text(&mut fields, "system_prompt", text(&c.system_prompt)),
            NodeConfig::Output(c) => push_text(&mut fields, "template", text(&c.template)),
            NodeConfig::Condition(c) => {
                if let Some(Value::String(s)) = &c.condition_value {
                    push_text(&mut fields, "condition_value", Some(s));
                }
            }
            NodeConfig::HttpRequest(c) => push_text(&mut fields, "url", text(&c.url)),
            _ => {}
        }
        if let Some(Value::Object(map)) = &self.overrides {
            for (key, value) in map {
                if let Value::String(s) = value {
                    fields.push((format!("overrides.{}", key), s.clone()));
                }
            }
        }
        fields
    }
}

fn push_text(fields: &mut Vec<(String, String)>, name: &str, text: Option<&str>) {
    if let Some(text) = text {
        fields.push((name.to_string(), text.to_string()));
    }
}

/// Serde mirror of the wire node; `Node` converts through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawNode {
    id: String,
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    config: Value,
    #[serde(default)]
    position: Position,
}

impl TryFrom<RawNode> for Node {
    type Error = GraphError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let (config, overrides) = split_config(&raw.id, raw.kind, raw.config)?;
        Ok(Node {
            id: raw.id,
            kind: raw.kind,
            name: raw.name,
            description: raw.description,
            config,
            overrides,
            position: raw.position,
        })
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        let config = Value::Object(node.config_json());
        RawNode {
            id: node.id,
            kind: node.kind,
            name: node.name,
            description: node.description,
            config,
            position: node.position,
        }
    }
}

fn split_config(
    node_id: &str,
    kind: NodeKind,
    config: Value,
) -> Result<(NodeConfig, Option<Value>), GraphError> {
    let mut map = match config {
        Value::Null => Map::new(),
        Value::Object(map) => map,
        _ => {
            return Err(GraphError::ConfigNotObject {
                node_id: node_id.to_string(),
            });
        }
    };
    let overrides = map.remove("overrides").filter(|v| !v.is_null());
    let config = NodeConfig::from_map(node_id, kind, map)?;
    Ok((config, overrides))
}

// =============================================================================
// NODE CONFIG
// =============================================================================

/// Typed configuration. The retriever family shares one record.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeConfig {
    Input(InputConfig),
    Llm(LlmConfig),
    Retriever(RetrieverConfig),
    HttpRequest(HttpRequestConfig),
    Condition(ConditionConfig),
    CodeExecutor(CodeExecutorConfig),
    Output(OutputConfig),
    Parser(ParserConfig),
    Embeddings(EmbeddingsConfig),
    Reranker(RerankerConfig),
    Classifier(ClassifierConfig),
    DataTransformer(DataTransformerConfig),
}

impl NodeConfig {
    pub fn default_for(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Input => NodeConfig::Input(InputConfig::default()),
            NodeKind::Llm => NodeConfig::Llm(LlmConfig::default()),
            NodeKind::RagRetriever | NodeKind::HybridRetriever | NodeKind::Retriever => {
                NodeConfig::Retriever(RetrieverConfig::default())
            }
            NodeKind::HttpRequest => NodeConfig::HttpRequest(HttpRequestConfig::default()),
            NodeKind::Condition => NodeConfig::Condition(ConditionConfig::default()),
            NodeKind::CodeExecutor => NodeConfig::CodeExecutor(CodeExecutorConfig::default()),
            NodeKind::Output => NodeConfig::Output(OutputConfig::default()),
            NodeKind::Parser => NodeConfig::Parser(ParserConfig::default()),
            NodeKind::Embeddings => NodeConfig::Embeddings(EmbeddingsConfig::default()),
            NodeKind::Reranker => NodeConfig::Reranker(RerankerConfig::default()),
            NodeKind::Classifier => NodeConfig::Classifier(ClassifierConfig::default()),
            NodeKind::DataTransformer => {
                NodeConfig::DataTransformer(DataTransformerConfig::default())
            }
        }
    }

    pub fn from_map(
        node_id: &str,
        kind: NodeKind,
        map: Map<String, Value>,
    ) -> Result<Self, GraphError> {
        let value = Value::Object(map);
        let config = match kind {
            NodeKind::Input => from_value(node_id, value).map(NodeConfig::Input),
            NodeKind::Llm => from_value(node_id, value).map(NodeConfig::Llm),
            NodeKind::RagRetriever | NodeKind::HybridRetriever | NodeKind::Retriever => {
                from_value(node_id, value).map(NodeConfig::Retriever)
            }
            NodeKind::HttpRequest => from_value(node_id, value).map(NodeConfig::HttpRequest),
            NodeKind::Condition => from_value(node_id, value).map(NodeConfig::Condition),
            NodeKind::CodeExecutor => from_value(node_id, value).map(NodeConfig::CodeExecutor),
            NodeKind::Output => from_value(node_id, value).map(NodeConfig::Output),
            NodeKind::Parser => from_value(node_id, value).map(NodeConfig::Parser),
            NodeKind::Embeddings => from_value(node_id, value).map(NodeConfig::Embeddings),
            NodeKind::Reranker => from_value(node_id, value).map(NodeConfig::Reranker),
            NodeKind::Classifier => from_value(node_id, value).map(NodeConfig::Classifier),
            NodeKind::DataTransformer => {
                from_value(node_id, value).map(NodeConfig::DataTransformer)
            }
        }?;
        Ok(config)
    }

    /// The record as a JSON object, unknown keys included.
    pub fn to_map(&self) -> Map<String, Value> {
        let value = match self {
            NodeConfig::Input(c) => serde_json::to_value(c),
            NodeConfig::Llm(c) => serde_json::to_value(c),
            NodeConfig::Retriever(c) => serde_json::to_value(c),
            NodeConfig::HttpRequest(c) => serde_json::to_value(c),
            NodeConfig::Condition(c) => serde_json::to_value(c),
            NodeConfig::CodeExecutor(c) => serde_json::to_value(c),
            NodeConfig::Output(c) => serde_json::to_value(c),
            NodeConfig::Parser(c) => serde_json::to_value(c),
            NodeConfig::Embeddings(c) => serde_json::to_value(c),
            NodeConfig::Reranker(c) => serde_json::to_value(c),
            NodeConfig::Classifier(c) => serde_json::to_value(c),
            NodeConfig::DataTransformer(c) => serde_json::to_value(c),
        };
        match value {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Look up a configuration key by its wire name.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.to_map().remove(key)
    }
}

fn from_value<T: serde::de::DeserializeOwned>(node_id: &str, value: Value) -> Result<T, GraphError> {
    serde_json::from_value(value).map_err(|e| GraphError::InvalidConfig {
        node_id: node_id.to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// LOOSELY TYPED FIELDS
// =============================================================================

/// A config value that either has the record's declared type or is kept as
/// the raw JSON the editor stored. A wrong type on one field never fails the
/// whole node; validation reports it as `N002` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field<T> {
    Typed(T),
    Raw(Value),
}

impl<T> Field<T> {
    pub fn typed(&self) -> Option<&T> {
        match self {
            Field::Typed(v) => Some(v),
            Field::Raw(_) => None,
        }
    }
}

/// Numeric value of a field. Numeric strings count, as the runtime coerces
/// them (`"5"` reads as `5`).
pub fn number(value: &Option<Field<Number>>) -> Option<f64> {
    match value.as_ref()? {
        Field::Typed(n) => n.as_f64(),
        Field::Raw(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Field::Raw(_) => None,
    }
}

pub fn text(value: &Option<Field<String>>) -> Option<&str> {
    value.as_ref()?.typed().map(String::as_str)
}

pub fn list(value: &Option<Field<Vec<String>>>) -> Option<&[String]> {
    value.as_ref()?.typed().map(Vec::as_slice)
}

/// A field whose stored JSON cannot be read as its declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMismatch {
    pub field: &'static str,
    pub expected: &'static str,
    pub found: Value,
}

#[derive(Default)]
struct Mismatches(Vec<TypeMismatch>);

impl Mismatches {
    fn number(&mut self, field: &'static str, value: &Option<Field<Number>>) {
        if let Some(Field::Raw(raw)) = value {
            if number(value).is_none() {
                self.push(field, "a number", raw);
            }
        }
    }

    fn text(&mut self, field: &'static str, value: &Option<Field<String>>) {
        if let Some(Field::Raw(raw)) = value {
            self.push(field, "a string", raw);
        }
    }

    fn list(&mut self, field: &'static str, value: &Option<Field<Vec<String>>>) {
        if let Some(Field::Raw(raw)) = value {
            self.push(field, "a list of strings", raw);
        }
    }

    fn push(&mut self, field: &'static str, expected: &'static str, found: &Value) {
        self.0.push(TypeMismatch {
            field,
            expected,
            found: found.clone(),
        });
    }
}

impl NodeConfig {
    /// Fields holding JSON of the wrong type, in declaration order.
    pub fn type_mismatches(&self) -> Vec<TypeMismatch> {
        let mut m = Mismatches::default();
        match self {
            NodeConfig::Input(_) => {}
            NodeConfig::Llm(c) => {
                m.text("model", &c.model);
                m.text("system_prompt", &c.system_prompt);
                m.number("temperature", &c.temperature);
                m.number("max_tokens", &c.max_tokens);
            }
            NodeConfig::Retriever(c) => {
                m.text("knowledge_base", &c.knowledge_base);
                m.number("top_k", &c.top_k);
            }
            NodeConfig::HttpRequest(c) => {
                m.text("url", &c.url);
                m.text("method", &c.method);
                m.number("timeout", &c.timeout);
            }
            NodeConfig::Condition(c) => {
                m.text("field_path", &c.field_path);
                m.text("condition_type", &c.condition_type);
            }
            NodeConfig::CodeExecutor(c) => {
                m.text("code", &c.code);
                m.text("language", &c.language);
                m.number("timeout_sec", &c.timeout_sec);
                m.number("max_memory_mb", &c.max_memory_mb);
                m.number("max_stdout_chars", &c.max_stdout_chars);
                m.number("max_input_bytes", &c.max_input_bytes);
                m.number("max_result_bytes", &c.max_result_bytes);
            }
            NodeConfig::Output(c) => {
                m.text("format", &c.format);
                m.text("template", &c.template);
            }
            NodeConfig::Parser(c) => m.text("parser_type", &c.parser_type),
            NodeConfig::Embeddings(c) => m.text("model", &c.model),
            NodeConfig::Reranker(c) => m.number("top_k", &c.top_k),
            NodeConfig::Classifier(c) => {
                m.text("model", &c.model);
                m.list("categories", &c.categories);
            }
            NodeConfig::DataTransformer(c) => {
                m.text("transform_type", &c.transform_type);
                m.list("fields", &c.fields);
            }
        }
        m.0
    }
}

// =============================================================================
// CONFIG RECORDS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Field<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<Field<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Field<Number>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<Field<Number>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Shared by `rag_retriever`, `hybrid_retriever` and `retriever`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrieverConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_base: Option<Field<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<Field<Number>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpRequestConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Field<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<Field<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Field<Number>>,
    /// Must be a JSON object when present; kept loose so validation can say so.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_path: Option<Field<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_type: Option<Field<String>>,
    /// Compared against the field; numbers are allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_value: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConditionConfig {
    /// Runtime default when `condition_type` is absent.
    pub const DEFAULT_TYPE: &'static str = "equals";

    pub fn condition_type(&self) -> &str {
        text(&self.condition_type).unwrap_or(Self::DEFAULT_TYPE)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeExecutorConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Field<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Field<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_sec: Option<Field<Number>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_memory_mb: Option<Field<Number>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_stdout_chars: Option<Field<Number>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_input_bytes: Option<Field<Number>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_result_bytes: Option<Field<Number>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Field<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Field<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser_type: Option<Field<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Field<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<Field<Number>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Field<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Field<Vec<String>>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataTransformerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_type: Option<Field<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Field<Vec<String>>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
