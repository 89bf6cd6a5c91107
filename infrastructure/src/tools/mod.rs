//! Tool backends and the dispatcher
//!
//! Backends adapt concrete capabilities to the registry:
//! - `retrieval`: a document source exposed as `search_documents`
//! - `remote`: tools discovered from a file tool server
//! - `web` (feature `web-tools`): web search via an instant-answer API
//!
//! The [`ToolDispatcher`] merges them into one registry with unique names
//! and routes calls; [`JsonSchemaToolConverter`] renders the catalog for
//! the model.

pub mod registry;
pub mod remote;
pub mod retrieval;
pub mod schema;
#[cfg(feature = "web-tools")]
pub mod web;

pub use registry::{RegistryError, ToolDispatcher, ToolDispatcherBuilder};
pub use remote::RemoteToolBackend;
pub use retrieval::{RetrievalToolBackend, SEARCH_DOCUMENTS};
pub use schema::JsonSchemaToolConverter;
#[cfg(feature = "web-tools")]
pub use web::{SEARCH_WEB, WebSearchBackend};
