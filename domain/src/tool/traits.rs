//! Tool domain traits
//!
//! Pure validation of tool calls against their definitions. No I/O here;
//! execution traits live in [`super::backend`] and the application ports.

use super::entities::{ToolCall, ToolDefinition};

/// Validator for tool calls
///
/// Checks a call against its definition before any backend work runs:
/// required parameters present, no unknown parameters, argument types
/// matching the declared wire types.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        // Check that all required parameters are present
        for param in &definition.parameters {
            if param.required && !call.arguments.contains_key(&param.name) {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        // Check that all provided arguments are valid, correctly typed parameters
        for (arg_name, value) in &call.arguments {
            let Some(param) = definition.parameter(arg_name) else {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            };
            if !param.param_type.matches(value) {
                return Err(format!(
                    "Parameter '{}' of tool '{}' expects type {}",
                    arg_name, definition.name, param.param_type
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{ParamType, ToolParameter};

    fn read_file_definition() -> ToolDefinition {
        ToolDefinition::new("read_file", "Read a file")
            .with_parameter(ToolParameter::new("path", "File path", true))
            .with_parameter(
                ToolParameter::new("limit", "Max lines", false).with_type(ParamType::Integer),
            )
    }

    #[test]
    fn test_validator_missing_required() {
        let validator = DefaultToolValidator;
        let call = ToolCall::new("read_file");
        let result = validator.validate(&call, &read_file_definition());
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Missing required parameter"));
    }

    #[test]
    fn test_validator_unknown_param() {
        let validator = DefaultToolValidator;
        let call = ToolCall::new("read_file")
            .with_arg("path", "a.txt")
            .with_arg("mode", "fast");
        let result = validator.validate(&call, &read_file_definition());
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Unknown parameter"));
    }

    #[test]
    fn test_validator_wrong_type() {
        let validator = DefaultToolValidator;
        let call = ToolCall::new("read_file")
            .with_arg("path", "a.txt")
            .with_arg("limit", "ten");
        let result = validator.validate(&call, &read_file_definition());
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("expects type integer"));
    }

    #[test]
    fn test_validator_valid_call() {
        let validator = DefaultToolValidator;
        let call = ToolCall::new("read_file")
            .with_arg("path", "a.txt")
            .with_arg("limit", 20i64);
        assert!(validator.validate(&call, &read_file_definition()).is_ok());
    }
}
