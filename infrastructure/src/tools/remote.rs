//! Remote tool backend — adapts a [`ToolServerClient`] to the dispatcher
//!
//! The client already did discovery; this adapter hands its cached catalog
//! to the registry and forwards calls over the connection. Liveness tracks
//! the underlying channel, so after a server loss the tools stay listed
//! while invocations report `DisconnectedBackend`.

use async_trait::async_trait;

use conduit_domain::tool::{
    backend::ToolBackend,
    entities::{ToolCall, ToolDefinition},
    value_objects::ToolResult,
};

use crate::fsrpc::ToolServerClient;

/// Backend contributing a tool server's discovered tools to the registry.
pub struct RemoteToolBackend {
    id: String,
    client: ToolServerClient,
}

impl RemoteToolBackend {
    pub fn new(client: ToolServerClient) -> Self {
        Self {
            id: client.server_id().to_string(),
            client,
        }
    }
}

#[async_trait]
impl ToolBackend for RemoteToolBackend {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        "File System Tools"
    }

    fn describe_tools(&self) -> Vec<ToolDefinition> {
        self.client.tools().to_vec()
    }

    fn is_connected(&self) -> bool {
        self.client.is_connected()
    }

    async fn call(&self, call: &ToolCall) -> ToolResult {
        self.client
            .call(&call.tool_name, call.arguments.clone())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsrpc::FileToolServer;
    use crate::sandbox::SandboxedFs;
    use conduit_domain::tool::value_objects::ErrorKind;
    use tempfile::tempdir;

    async fn backend(dir: &tempfile::TempDir) -> (RemoteToolBackend, crate::fsrpc::ServerHandle) {
        let handle = FileToolServer::new(SandboxedFs::new(dir.path()).unwrap()).spawn();
        let client = ToolServerClient::connect("fs-server", handle.connection())
            .await
            .unwrap();
        (RemoteToolBackend::new(client), handle)
    }

    #[tokio::test]
    async fn test_describes_discovered_tools() {
        let dir = tempdir().unwrap();
        let (backend, handle) = backend(&dir).await;

        let tools = backend.describe_tools();
        assert_eq!(tools.len(), 5);
        assert!(backend.is_connected());

        handle.shutdown();
    }

    #[tokio::test]
    async fn test_forwards_calls() {
        let dir = tempdir().unwrap();
        let (backend, handle) = backend(&dir).await;

        let call = ToolCall::new("write_file")
            .with_arg("file_path", "f.txt")
            .with_arg("content", "payload");
        assert!(backend.call(&call).await.is_success());

        let call = ToolCall::new("read_file").with_arg("file_path", "f.txt");
        let result = backend.call(&call).await;
        assert_eq!(result.output_str(), Some("payload"));

        handle.shutdown();
    }

    #[tokio::test]
    async fn test_disconnect_reported_per_call() {
        let dir = tempdir().unwrap();
        let (backend, handle) = backend(&dir).await;
        handle.shutdown();
        tokio::task::yield_now().await;

        assert_eq!(backend.describe_tools().len(), 5);
        let result = backend
            .call(&ToolCall::new("read_file").with_arg("file_path", "f.txt"))
            .await;
        assert_eq!(result.error_kind(), Some(ErrorKind::DisconnectedBackend));
    }
}
