//! Caller-supplied settings for the analysis passes.
//!
//! Arrives as optional JSON at the wasm boundary; every field has a default so
//! `{}` or an empty string yields the stock editor behaviour.

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub layout: LayoutConfig,
    pub suggestions: SuggestionConfig,
    pub directories: Directories,
}

impl CompilerConfig {
    /// Parse a config JSON string; blank input means defaults.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }
}

/// Column/row spacing for the leveled layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub x_gap: f64,
    pub y_gap: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            x_gap: 280.0,
            y_gap: 140.0,
            x_offset: 40.0,
            y_offset: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Cap applied while typing; the full picker is uncapped.
    pub interactive_limit: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        SuggestionConfig {
            interactive_limit: 12,
        }
    }
}

/// Snapshots of the external knowledge-base and model directories.
/// `None` means the directory has not been loaded, which disables its check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Directories {
    pub knowledge_bases: Option<Vec<String>>,
    pub models: Option<Vec<String>>,
}

impl Directories {
    pub fn knows_knowledge_base(&self, id: &str) -> Option<bool> {
        self.knowledge_bases
            .as_ref()
            .map(|ids| ids.iter().any(|k| k == id))
    }

    pub fn knows_model(&self, id: &str) -> Option<bool> {
        self.models.as_ref().map(|ids| ids.iter().any(|m| m == id))
    }
}
