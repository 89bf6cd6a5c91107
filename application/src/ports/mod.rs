//! Port definitions for the application layer

pub mod tool_executor;
pub mod tool_schema;

pub use tool_executor::ToolExecutorPort;
pub use tool_schema::ToolSchemaPort;
