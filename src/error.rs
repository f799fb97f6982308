//! Error types shared by every phase.
//!
//! `GraphError` is a hard failure on malformed input. `Diagnostic` is a
//! finding collected by validation; a bad node never aborts the pass.

use serde::{Deserialize, Serialize};

/// Malformed input that prevents a phase from running at all.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("failed to parse workflow JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("node '{node_id}' has a non-object config")]
    ConfigNotObject { node_id: String },

    #[error("node '{node_id}' has an invalid config: {reason}")]
    InvalidConfig { node_id: String, reason: String },

    #[error("unknown node '{0}'")]
    UnknownNode(String),
}

/// Where a finding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Dangling edge endpoint, missing node name, duplicate id, malformed input.
    Structural,
    /// Out-of-range or missing configuration for a node kind.
    Config,
    /// A template token whose root is not reachable.
    Reference,
    /// Code-executor content that looks like a sandbox-policy violation.
    Sandbox,
    /// Lint-style findings (undeclared ports, isolated nodes, unknown directory ids).
    Advisory,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::Structural => write!(f, "Structural"),
            DiagnosticKind::Config => write!(f, "Config"),
            DiagnosticKind::Reference => write!(f, "Reference"),
            DiagnosticKind::Sandbox => write!(f, "Sandbox"),
            DiagnosticKind::Advisory => write!(f, "Advisory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks save and execute.
    Error,
    /// Surfaced to the caller, never blocks.
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    pub node_id: Option<String>,
    pub edge_id: Option<String>,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.node_id, &self.edge_id) {
            (Some(id), _) => write!(
                f,
                "[{}:{}] {} (node '{}')",
                self.kind, self.code, self.message, id
            ),
            (None, Some(id)) => write!(
                f,
                "[{}:{}] {} (edge '{}')",
                self.kind, self.code, self.message, id
            ),
            (None, None) => write!(f, "[{}:{}] {}", self.kind, self.code, self.message),
        }
    }
}

impl Diagnostic {
    pub fn structural(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        Diagnostic {
            code: code.into(),
            kind: DiagnosticKind::Structural,
            severity: Severity::Error,
            message: message.into(),
            node_id,
            edge_id: None,
        }
    }

    pub fn config(code: &str, message: impl Into<String>, node_id: &str) -> Self {
        Diagnostic {
            code: code.into(),
            kind: DiagnosticKind::Config,
            severity: Severity::Error,
            message: message.into(),
            node_id: Some(node_id.to_string()),
            edge_id: None,
        }
    }

    pub fn config_warning(code: &str, message: impl Into<String>, node_id: &str) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            ..Diagnostic::config(code, message, node_id)
        }
    }

    pub fn reference(message: impl Into<String>, node_id: &str) -> Self {
        Diagnostic {
            code: "R001".into(),
            kind: DiagnosticKind::Reference,
            severity: Severity::Warning,
            message: message.into(),
            node_id: Some(node_id.to_string()),
            edge_id: None,
        }
    }

    pub fn sandbox(code: &str, message: impl Into<String>, node_id: &str) -> Self {
        Diagnostic {
            code: code.into(),
            kind: DiagnosticKind::Sandbox,
            severity: Severity::Warning,
            message: message.into(),
            node_id: Some(node_id.to_string()),
            edge_id: None,
        }
    }

    pub fn advisory(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        Diagnostic {
            code: code.into(),
            kind: DiagnosticKind::Advisory,
            severity: Severity::Warning,
            message: message.into(),
            node_id,
            edge_id: None,
        }
    }

    /// Attach the edge a finding is about.
    pub fn on_edge(mut self, edge_id: &str) -> Self {
        self.edge_id = Some(edge_id.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<GraphError> for Diagnostic {
    fn from(e: GraphError) -> Self {
        let node_id = match &e {
            GraphError::ConfigNotObject { node_id } | GraphError::InvalidConfig { node_id, .. } => {
                Some(node_id.clone())
            }
            GraphError::UnknownNode(id) => Some(id.clone()),
            GraphError::Json(_) => None,
        };
        Diagnostic::structural("P001", e.to_string(), node_id)
    }
}
