//! Wire protocol for the file tool server
//!
//! Two request kinds cross the boundary: discovery (`list_tools`) and
//! invocation (`call_tool`). Parameters travel as a name → spec mapping;
//! invocation answers carry `status: "ok"` with a payload or
//! `status: "error"` with a kind and message. All types serialize with
//! serde so the boundary behaves like a process boundary regardless of the
//! transport underneath.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use conduit_domain::tool::{
    entities::{ParamType, ToolDefinition, ToolParameter},
    value_objects::{ErrorKind, ToolError, ToolResult},
};

/// Wire form of one tool parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireParameter {
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub required: bool,
    pub description: String,
}

/// Wire form of a tool descriptor: parameters keyed by name.
///
/// A BTreeMap keeps serialization order deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: BTreeMap<String, WireParameter>,
}

impl From<&ToolDefinition> for WireToolDescriptor {
    fn from(definition: &ToolDefinition) -> Self {
        let parameters = definition
            .parameters
            .iter()
            .map(|p| {
                (
                    p.name.clone(),
                    WireParameter {
                        param_type: p.param_type,
                        required: p.required,
                        description: p.description.clone(),
                    },
                )
            })
            .collect();
        Self {
            name: definition.name.clone(),
            description: definition.description.clone(),
            parameters,
        }
    }
}

impl WireToolDescriptor {
    /// Rebuild the domain definition; parameters come back name-sorted.
    pub fn into_definition(self) -> ToolDefinition {
        let mut definition = ToolDefinition::new(self.name, self.description);
        for (name, param) in self.parameters {
            definition = definition.with_parameter(
                ToolParameter::new(name, param.description, param.required)
                    .with_type(param.param_type),
            );
        }
        definition
    }
}

/// Client → server message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Ask for the server's tool catalog
    ListTools,
    /// Invoke a tool by name
    CallTool {
        tool_name: String,
        #[serde(default)]
        arguments: HashMap<String, serde_json::Value>,
    },
}

/// Server → client message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    /// Reply to `ListTools`
    Tools { tools: Vec<WireToolDescriptor> },
    /// Successful invocation
    Ok { payload: serde_json::Value },
    /// Failed invocation; the kind is preserved exactly as classified
    /// at the point of occurrence
    Error { kind: ErrorKind, message: String },
}

impl Response {
    /// Convert an invocation response into the dispatcher-facing result.
    pub fn into_result(self, tool_name: &str) -> ToolResult {
        match self {
            Response::Ok { payload } => ToolResult::success(tool_name, payload),
            Response::Error { kind, message } => {
                ToolResult::failure(tool_name, ToolError::new(kind, message))
            }
            Response::Tools { .. } => ToolResult::failure(
                tool_name,
                ToolError::backend_error("Protocol mismatch: discovery reply to an invocation"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_wire_round_trip() {
        let definition = ToolDefinition::new("read_file", "Read a file")
            .with_parameter(ToolParameter::new("file_path", "Path to read", true))
            .with_parameter(
                ToolParameter::new("limit", "Max lines", false).with_type(ParamType::Integer),
            );

        let wire = WireToolDescriptor::from(&definition);
        let json = serde_json::to_value(&wire).unwrap();

        assert_eq!(json["name"], "read_file");
        assert_eq!(json["parameters"]["file_path"]["type"], "string");
        assert_eq!(json["parameters"]["file_path"]["required"], true);
        assert_eq!(json["parameters"]["limit"]["type"], "integer");

        let back: WireToolDescriptor = serde_json::from_value(json).unwrap();
        let rebuilt = back.into_definition();
        assert_eq!(rebuilt.name, "read_file");
        assert_eq!(rebuilt.parameters.len(), 2);
        assert_eq!(
            rebuilt.parameter("limit").unwrap().param_type,
            ParamType::Integer
        );
    }

    #[test]
    fn test_request_wire_form() {
        let request = Request::CallTool {
            tool_name: "read_file".to_string(),
            arguments: HashMap::from([(
                "file_path".to_string(),
                serde_json::json!("notes.txt"),
            )]),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "call_tool");
        assert_eq!(json["tool_name"], "read_file");
        assert_eq!(json["arguments"]["file_path"], "notes.txt");

        let list = serde_json::to_value(Request::ListTools).unwrap();
        assert_eq!(list["type"], "list_tools");
    }

    #[test]
    fn test_response_status_tags() {
        let ok = serde_json::to_value(Response::Ok {
            payload: serde_json::json!("content"),
        })
        .unwrap();
        assert_eq!(ok["status"], "ok");

        let err = serde_json::to_value(Response::Error {
            kind: ErrorKind::UnknownTool,
            message: "Unknown tool: nope".to_string(),
        })
        .unwrap();
        assert_eq!(err["status"], "error");
        assert_eq!(err["kind"], "UNKNOWN_TOOL");
    }

    #[test]
    fn test_response_into_result_preserves_kind() {
        let response = Response::Error {
            kind: ErrorKind::AccessDenied,
            message: "Access denied: ../x".to_string(),
        };
        let result = response.into_result("read_file");
        assert!(!result.is_success());
        assert_eq!(result.error_kind(), Some(ErrorKind::AccessDenied));
        assert_eq!(result.error().unwrap().message, "Access denied: ../x");
    }
}
