//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] that produces the
//! provider-neutral JSON Schema form the reasoning loop hands to the model.

use conduit_application::ports::tool_schema::ToolSchemaPort;
use conduit_domain::tool::entities::ToolDefinition;

/// Default converter producing provider-neutral JSON Schema.
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let mut prop = serde_json::Map::new();
            prop.insert("type".to_string(), serde_json::json!(param.param_type.as_str()));
            prop.insert(
                "description".to_string(),
                serde_json::json!(param.description),
            );
            properties.insert(param.name.clone(), serde_json::Value::Object(prop));

            if param.required {
                required.push(serde_json::json!(param.name));
            }
        }

        serde_json::json!({
            "name": tool.name,
            "description": tool.description,
            "input_schema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }

    fn all_tools_schema(&self, tools: &[ToolDefinition]) -> Vec<serde_json::Value> {
        let mut sorted: Vec<&ToolDefinition> = tools.iter().collect();
        sorted.sort_by_key(|t| &t.name);
        sorted.into_iter().map(|t| self.tool_to_schema(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conduit_domain::tool::entities::{ParamType, ToolParameter};

    #[test]
    fn test_tool_to_schema() {
        let converter = JsonSchemaToolConverter;
        let tool = ToolDefinition::new("read_file", "Read file contents")
            .with_parameter(ToolParameter::new("file_path", "File path to read", true))
            .with_parameter(
                ToolParameter::new("limit", "Max lines to read", false)
                    .with_type(ParamType::Integer),
            );

        let schema = converter.tool_to_schema(&tool);

        assert_eq!(schema["name"], "read_file");
        assert_eq!(schema["description"], "Read file contents");
        assert_eq!(schema["input_schema"]["type"], "object");
        assert_eq!(schema["input_schema"]["properties"]["file_path"]["type"], "string");
        assert_eq!(schema["input_schema"]["properties"]["limit"]["type"], "integer");

        let required = schema["input_schema"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 1);
        assert_eq!(required[0], "file_path");
    }

    #[test]
    fn test_all_tools_schema_sorted() {
        let converter = JsonSchemaToolConverter;
        let tools = vec![
            ToolDefinition::new("write_file", "Write file"),
            ToolDefinition::new("read_file", "Read file"),
        ];

        let schemas = converter.all_tools_schema(&tools);
        assert_eq!(schemas.len(), 2);
        assert_eq!(schemas[0]["name"], "read_file");
        assert_eq!(schemas[1]["name"], "write_file");
    }
}
