//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain) from "how to serialize them for
//! the model" (infrastructure). The reasoning loop presents the output of
//! this port to the model before each turn.

use conduit_domain::tool::entities::ToolDefinition;

/// Port for converting tool definitions to the model-facing JSON Schema form.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to provider-neutral JSON Schema.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert a set of definitions to a JSON Schema array (sorted by name).
    fn all_tools_schema(&self, tools: &[ToolDefinition]) -> Vec<serde_json::Value>;
}
