//! Tool backend abstraction
//!
//! This module defines the [`ToolBackend`] trait, which abstracts a concrete
//! source of tools that the dispatcher can route calls to: the retrieval
//! source adapter, the remote file-system tool client, or the web search
//! adapter.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    ToolDispatcher                       │
//! │  (merges backends into one registry, routes by name)    │
//! └─────────────────────────────────────────────────────────┘
//!          │                 │                  │
//!          ▼                 ▼                  ▼
//!   ┌───────────┐     ┌───────────┐      ┌───────────┐
//!   │ Retrieval │     │  Remote   │      │ WebSearch │
//!   │  Backend  │     │  Backend  │      │  Backend  │
//!   └───────────┘     └───────────┘      └───────────┘
//! ```
//!
//! Unlike a priority system, name collisions between backends are a fatal
//! configuration error at registry construction; two backends never compete
//! for the same tool name.

use async_trait::async_trait;
use thiserror::Error;

use super::entities::{ToolCall, ToolDefinition};
use super::value_objects::ToolResult;

/// Error raised while discovering a backend's tool catalog
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Backend could not be reached at all
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    /// Backend answered with something the protocol does not allow
    #[error("Malformed discovery response: {0}")]
    Malformed(String),
}

/// A concrete source of tools behind the dispatcher.
///
/// Implementations:
/// - `RetrievalToolBackend`: document retrieval exposed as `search_documents`
/// - `RemoteToolBackend`: tools discovered from a file tool server
/// - `WebSearchBackend`: web search via an instant-answer API
#[async_trait]
pub trait ToolBackend: Send + Sync {
    /// Unique identifier for this backend
    ///
    /// Examples: "retrieval:vectorize", "fs-server", "web"
    fn id(&self) -> &str;

    /// Display name for user-facing output
    fn display_name(&self) -> &str;

    /// The tools this backend contributes to the registry.
    ///
    /// Called once at dispatcher construction; the returned definitions are
    /// immutable for the backend's lifetime.
    fn describe_tools(&self) -> Vec<ToolDefinition>;

    /// Whether the backend can currently serve calls.
    ///
    /// A disconnected backend keeps its tools listed in the registry; only
    /// invocations against it fail.
    fn is_connected(&self) -> bool {
        true
    }

    /// Invoke a tool on this backend.
    ///
    /// The tool_name in the call matches one of the definitions returned by
    /// `describe_tools()`; the dispatcher guarantees this before routing.
    async fn call(&self, call: &ToolCall) -> ToolResult;
}
