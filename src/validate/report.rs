//! Validation results: the local report, its wire form, and the overlay that
//! sits the remote validator's answer beside it.

use serde::{Deserialize, Serialize};

use crate::error::{Diagnostic, DiagnosticKind, GraphError};

/// Findings from one validation call. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub suggestions: Vec<String>,
}

impl ValidationReport {
    pub fn from_diagnostics(diagnostics: impl IntoIterator<Item = Diagnostic>) -> Self {
        let mut report = ValidationReport::default();
        for d in diagnostics {
            report.push(d);
        }
        report
    }

    /// File a diagnostic under errors or warnings by its severity.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.errors.push(diagnostic);
        } else {
            self.warnings.push(diagnostic);
        }
    }

    pub fn suggest(&mut self, suggestion: impl Into<String>) {
        self.suggestions.push(suggestion.into());
    }

    /// Errors block save and execute; warnings never do.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Everything attributed to one node, for focusing it in the editor.
    pub fn for_node<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics()
            .filter(move |d| d.node_id.as_deref() == Some(node_id))
    }

    pub fn warnings_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.warnings.iter().filter(move |d| d.kind == kind)
    }

    /// The remote validator's response shape.
    pub fn to_response(&self) -> ValidationResponse {
        ValidationResponse {
            is_valid: self.is_valid(),
            errors: self.errors.iter().map(|d| d.message.clone()).collect(),
            warnings: self.warnings.iter().map(|d| d.message.clone()).collect(),
            suggestions: self.suggestions.clone(),
        }
    }
}

/// `{is_valid, errors, warnings, suggestions}` as exchanged with the remote validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub is_valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ValidationResponse {
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The local pre-check and, once it arrives, the authoritative remote answer.
/// The two are shown side by side; neither rewrites the graph or the other.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOverlay {
    pub local: ValidationReport,
    pub remote: Option<ValidationResponse>,
}

impl ValidationOverlay {
    pub fn new(local: ValidationReport) -> Self {
        ValidationOverlay { local, remote: None }
    }

    pub fn with_remote(mut self, remote: ValidationResponse) -> Self {
        self.remote = Some(remote);
        self
    }

    /// True only once the remote validator has answered.
    pub fn is_confirmed(&self) -> bool {
        self.remote.is_some()
    }

    pub fn blocks_save(&self) -> bool {
        !self.local.is_valid() || self.remote.as_ref().is_some_and(|r| !r.is_valid)
    }

    /// Local then remote messages for one list, without repeats.
    pub fn errors(&self) -> Vec<String> {
        merge_messages(
            self.local.errors.iter().map(|d| d.message.as_str()),
            self.remote.as_ref().map(|r| r.errors.as_slice()),
        )
    }

    pub fn warnings(&self) -> Vec<String> {
        merge_messages(
            self.local.warnings.iter().map(|d| d.message.as_str()),
            self.remote.as_ref().map(|r| r.warnings.as_slice()),
        )
    }
}

fn merge_messages<'a>(
    local: impl Iterator<Item = &'a str>,
    remote: Option<&'a [String]>,
) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let remote = remote.unwrap_or(&[]).iter().map(String::as_str);
    for msg in local.chain(remote) {
        if !out.iter().any(|m| m == msg) {
            out.push(msg.to_string());
        }
    }
    out
}
