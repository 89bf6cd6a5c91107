//! File-system tool server, client, and wire protocol
//!
//! The remote-procedure boundary around [`SandboxedFs`](crate::sandbox::SandboxedFs):
//! a [`FileToolServer`](server::FileToolServer) answers discovery and
//! invocation messages over a request/response channel, and a
//! [`ToolServerClient`](client::ToolServerClient) exposes the discovered
//! tools to the dispatcher. The channel carries serde wire types only, so
//! the boundary's ordering and error semantics match a process boundary.

pub mod client;
pub mod protocol;
pub mod server;

pub use client::ToolServerClient;
pub use protocol::{Request, Response, WireParameter, WireToolDescriptor};
pub use server::{FileToolServer, ServerConnection, ServerHandle, catalog};
