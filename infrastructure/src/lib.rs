//! Infrastructure layer for conduit
//!
//! Concrete adapters behind the domain contracts and application ports:
//!
//! - [`sandbox`] — file operations confined to a root directory
//! - [`fsrpc`] — the tool server, its client, and their wire protocol
//! - [`tools`] — dispatcher registry and the tool backends it merges
//! - [`rag`] — retrieval source implementations
//! - [`config`] — configuration file loading

pub mod config;
pub mod fsrpc;
pub mod rag;
pub mod sandbox;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, RetrievalSourceKind};
pub use fsrpc::{FileToolServer, ToolServerClient};
pub use rag::{NoopRetrievalSource, VectorizeConfig, VectorizeSource};
pub use sandbox::SandboxedFs;
pub use tools::{JsonSchemaToolConverter, RemoteToolBackend, RetrievalToolBackend, ToolDispatcher};
