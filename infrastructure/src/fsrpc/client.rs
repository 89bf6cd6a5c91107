//! Tool server client
//!
//! [`ToolServerClient`] owns one connection to a [`FileToolServer`](super::server::FileToolServer)
//! and performs the one-time discovery exchange at connect time. After that,
//! every discovered tool is callable through [`call`](ToolServerClient::call).
//!
//! Failure discipline: discovery failure is a [`DiscoveryError`] the host
//! can log and move past (the dispatcher then runs with whatever other
//! backends succeeded); a connection lost after discovery surfaces per-call
//! as `DisconnectedBackend`, never as a crash.

use std::collections::HashMap;

use tokio::sync::oneshot;
use tracing::{debug, warn};

use conduit_domain::tool::{
    backend::DiscoveryError,
    entities::ToolDefinition,
    value_objects::{ToolError, ToolResult},
};

use super::protocol::{Request, Response};
use super::server::ServerConnection;

/// Client for one tool server connection.
pub struct ToolServerClient {
    server_id: String,
    connection: ServerConnection,
    tools: Vec<ToolDefinition>,
}

impl ToolServerClient {
    /// Connect and discover the server's tools.
    ///
    /// The discovery exchange happens exactly once; the returned client
    /// caches the catalog for its lifetime.
    pub async fn connect(
        server_id: impl Into<String>,
        connection: ServerConnection,
    ) -> Result<Self, DiscoveryError> {
        let server_id = server_id.into();

        let (reply_tx, reply_rx) = oneshot::channel();
        connection
            .send((Request::ListTools, reply_tx))
            .await
            .map_err(|_| DiscoveryError::Unreachable(format!("{}: server not running", server_id)))?;

        let response = reply_rx
            .await
            .map_err(|_| DiscoveryError::Unreachable(format!("{}: server dropped discovery", server_id)))?;

        let tools = match response {
            Response::Tools { tools } => tools
                .into_iter()
                .map(|descriptor| descriptor.into_definition())
                .collect::<Vec<_>>(),
            other => {
                return Err(DiscoveryError::Malformed(format!(
                    "{}: expected tool catalog, got {:?}",
                    server_id, other
                )));
            }
        };

        debug!(server = %server_id, count = tools.len(), "Discovered tools from server");
        Ok(Self {
            server_id,
            connection,
            tools,
        })
    }

    /// Identifier of the connected server
    pub fn server_id(&self) -> &str {
        &self.server_id
    }

    /// The catalog discovered at connect time
    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Whether the server side of the connection is still alive
    pub fn is_connected(&self) -> bool {
        !self.connection.is_closed()
    }

    /// Invoke a discovered tool.
    ///
    /// A connection lost since discovery yields `DisconnectedBackend`; the
    /// tool stays listed so the reasoning loop sees a recoverable failure,
    /// not a vanished capability.
    pub async fn call(
        &self,
        tool_name: &str,
        arguments: HashMap<String, serde_json::Value>,
    ) -> ToolResult {
        let request = Request::CallTool {
            tool_name: tool_name.to_string(),
            arguments,
        };

        let (reply_tx, reply_rx) = oneshot::channel();
        if self.connection.send((request, reply_tx)).await.is_err() {
            warn!(server = %self.server_id, tool = tool_name, "Call on disconnected server");
            return ToolResult::failure(
                tool_name,
                ToolError::disconnected_backend(&self.server_id),
            );
        }

        match reply_rx.await {
            Ok(response) => response.into_result(tool_name),
            Err(_) => ToolResult::failure(
                tool_name,
                ToolError::disconnected_backend(&self.server_id),
            ),
        }
    }
}
