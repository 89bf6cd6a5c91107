//! Configuration file schema

use serde::{Deserialize, Serialize};

/// Which retrieval source to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalSourceKind {
    /// No document index configured
    #[default]
    None,
    /// Vectorize.io pipeline
    Vectorize,
}

/// Top-level configuration file (`conduit.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub sandbox: SandboxSection,
    pub retrieval: RetrievalSection,
    pub tools: ToolsSection,
}

/// `[sandbox]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxSection {
    /// Root directory all file tools are confined to
    pub root: String,
}

impl Default for SandboxSection {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
        }
    }
}

/// `[retrieval]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSection {
    pub source: RetrievalSourceKind,
}

/// `[tools]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsSection {
    /// Register the web search backend
    pub web_search: bool,
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self { web_search: true }
    }
}
