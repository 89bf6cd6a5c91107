//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::value_objects::ErrorKind;

/// Wire-level type of a tool parameter.
///
/// The discovery protocol only admits these three scalar types; anything
/// richer is flattened to a string by the backend that owns the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Boolean,
}

impl ParamType {
    pub fn as_str(&self) -> &str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
        }
    }

    /// Check whether a JSON argument value matches this parameter type.
    pub fn matches(&self, value: &serde_json::Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Integer => value.is_i64() || value.is_u64(),
            ParamType::Boolean => value.is_boolean(),
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Definition of a tool that can be invoked by the reasoning loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "read_file")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Parameter type
    pub param_type: ParamType,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: ParamType::String,
        }
    }

    pub fn with_type(mut self, param_type: ParamType) -> Self {
        self.param_type = param_type;
        self
    }
}

/// Registry of tool definitions with unique names.
///
/// Unlike an open map, registration is fallible: two backends declaring the
/// same tool name is a configuration error, not a shadowing opportunity.
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: HashMap<String, ToolDefinition>,
}

/// Error raised when a tool name is registered twice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Duplicate tool name: {name}")]
pub struct DuplicateToolError {
    pub name: String,
}

impl DuplicateToolError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::DuplicateTool
    }
}

impl ToolSpec {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool definition, failing on a name collision.
    pub fn try_register(&mut self, tool: ToolDefinition) -> Result<(), DuplicateToolError> {
        if self.tools.contains_key(&tool.name) {
            return Err(DuplicateToolError { name: tool.name });
        }
        self.tools.insert(tool.name.clone(), tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// A call to a tool with arguments, produced by the reasoning loop
/// and consumed exactly once by the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }

    /// Get an optional i64 argument
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.arguments.get(key).and_then(|v| v.as_i64())
    }

    /// Get an optional bool argument
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.arguments.get(key).and_then(|v| v.as_bool())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_type_matches() {
        assert!(ParamType::String.matches(&serde_json::json!("hi")));
        assert!(!ParamType::String.matches(&serde_json::json!(1)));
        assert!(ParamType::Integer.matches(&serde_json::json!(42)));
        assert!(!ParamType::Integer.matches(&serde_json::json!(4.2)));
        assert!(ParamType::Boolean.matches(&serde_json::json!(true)));
        assert!(!ParamType::Boolean.matches(&serde_json::json!("true")));
    }

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::new("read_file", "Read file contents").with_parameter(
            ToolParameter::new("path", "File path to read", true).with_type(ParamType::String),
        );

        assert_eq!(tool.name, "read_file");
        assert_eq!(tool.parameters.len(), 1);
        assert_eq!(tool.parameter("path").unwrap().param_type, ParamType::String);
        assert!(tool.parameter("nope").is_none());
    }

    #[test]
    fn test_tool_spec_register() {
        let mut spec = ToolSpec::new();
        spec.try_register(ToolDefinition::new("read_file", "Read file"))
            .unwrap();
        spec.try_register(ToolDefinition::new("write_file", "Write file"))
            .unwrap();

        assert!(spec.get("read_file").is_some());
        assert!(spec.get("write_file").is_some());
        assert!(spec.get("unknown").is_none());
        assert_eq!(spec.len(), 2);
    }

    #[test]
    fn test_tool_spec_duplicate_name() {
        let mut spec = ToolSpec::new();
        spec.try_register(ToolDefinition::new("search_documents", "Search"))
            .unwrap();
        let err = spec
            .try_register(ToolDefinition::new("search_documents", "Search again"))
            .unwrap_err();

        assert_eq!(err.name, "search_documents");
        assert_eq!(err.kind(), ErrorKind::DuplicateTool);
        // Original registration is untouched
        assert_eq!(spec.get("search_documents").unwrap().description, "Search");
    }

    #[test]
    fn test_tool_call() {
        let call = ToolCall::new("read_file")
            .with_arg("path", "notes/todo.txt")
            .with_arg("limit", 10i64)
            .with_arg("recursive", true);

        assert_eq!(call.tool_name, "read_file");
        assert_eq!(call.get_string("path"), Some("notes/todo.txt"));
        assert_eq!(call.require_string("path").unwrap(), "notes/todo.txt");
        assert!(call.require_string("missing").is_err());
        assert_eq!(call.get_i64("limit"), Some(10));
        assert_eq!(call.get_bool("recursive"), Some(true));
    }
}
