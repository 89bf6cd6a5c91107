//! Domain layer for conduit
//!
//! This crate contains the core entities, value objects, and contracts for
//! the tool-dispatch pipeline. It has no dependencies on infrastructure or
//! I/O concerns.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! A tool is a named, schema-described capability the reasoning loop can
//! invoke. Tools come from backends: a retrieval source, a sandboxed
//! file-system server, a web search adapter. The dispatcher merges every
//! backend's catalog into one registry with unique names.
//!
//! ## Retrieval
//!
//! A [`RetrievalSource`] answers a question with a bounded,
//! relevance-descending sequence of documents. Sources declare the
//! environment variables they need so misconfiguration surfaces at startup.

pub mod retrieval;
pub mod tool;

// Re-export commonly used types
pub use retrieval::{
    DEFAULT_NUM_RESULTS, RetrievalError, RetrievalSource, RetrievedDocument, bound_by_relevance,
};
pub use tool::{
    backend::{DiscoveryError, ToolBackend},
    entities::{DuplicateToolError, ParamType, ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ErrorKind, ToolError, ToolResult},
};
