//! Tool Executor port
//!
//! Defines the interface the reasoning loop uses to inspect and invoke tools.

use async_trait::async_trait;
use conduit_domain::tool::{
    entities::{ToolCall, ToolDefinition},
    value_objects::ToolResult,
};

/// Port for tool dispatch
///
/// This port defines how the application layer routes tool calls.
/// The implementation (the dispatcher) lives in the infrastructure layer.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Descriptors for every registered tool, reflecting the registry at
    /// call time. A disconnected backend's tools remain listed; invoking
    /// them reports the disconnect as a per-call failure.
    fn describe_all(&self) -> Vec<ToolDefinition>;

    /// Check if a tool is registered
    fn has_tool(&self, name: &str) -> bool {
        self.describe_all().iter().any(|t| t.name == name)
    }

    /// Names of all registered tools
    fn available_tools(&self) -> Vec<String> {
        self.describe_all().into_iter().map(|t| t.name).collect()
    }

    /// Invoke a tool call asynchronously
    async fn invoke(&self, call: &ToolCall) -> ToolResult;

    /// Invoke a tool call synchronously (blocking)
    ///
    /// The reasoning loop is strictly turn-based; this is the blocking
    /// round trip it drives. Implementations may override the default
    /// async-wrapping behavior.
    fn invoke_sync(&self, call: &ToolCall) -> ToolResult;
}
