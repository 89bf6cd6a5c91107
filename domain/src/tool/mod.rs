//! Tool domain module
//!
//! Core abstractions for the tool-dispatch pipeline: how a reasoning loop
//! discovers, validates, and invokes capabilities across heterogeneous
//! backends.
//!
//! # Overview
//!
//! Every tool is defined by a [`ToolDefinition`] (name, description, typed
//! parameters), invoked via a [`ToolCall`], and answers with a [`ToolResult`]
//! that is either an output payload or a [`ToolError`] from the closed
//! [`ErrorKind`](value_objects::ErrorKind) taxonomy.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (registry)   │    │ (invocation) │    │ (output)     │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ToolSpec`] — registry of definitions; duplicate names are an error
//! - [`ToolDefinition`] — schema for a single tool
//! - [`ToolCall`] — an invocation request with JSON arguments
//! - [`ToolResult`] — outcome, success or classified failure
//! - [`ToolValidator`] — pure argument validation against a definition
//! - [`ToolBackend`] — abstraction over concrete tool sources
//!
//! # Architecture
//!
//! - **Domain** (this module): pure definitions, no I/O
//! - **Application** (`ToolExecutorPort`): port trait for dispatch
//! - **Infrastructure** (`ToolDispatcher`, backends): routing, file I/O,
//!   the tool-server protocol, HTTP retrieval

pub mod backend;
pub mod entities;
pub mod traits;
pub mod value_objects;

pub use backend::{DiscoveryError, ToolBackend};
pub use entities::{DuplicateToolError, ParamType, ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ErrorKind, ToolError, ToolResult};
