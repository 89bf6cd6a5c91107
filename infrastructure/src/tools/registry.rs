//! Tool Dispatcher
//!
//! The [`ToolDispatcher`] merges every configured backend — retrieval
//! sources, remote tool servers, the web search adapter — into one registry
//! and routes each [`ToolCall`] to the backend that owns the name.
//!
//! # Construction
//!
//! ```ignore
//! let dispatcher = ToolDispatcher::builder()
//!     .backend(RetrievalToolBackend::new(source))
//!     .backend(RemoteToolBackend::new(client))
//!     .build()?;   // DuplicateTool here is fatal, never silent shadowing
//! ```
//!
//! # Routing
//!
//! `invoke` looks the name up (`UnknownTool` if absent) and forwards the
//! call. Whatever the backend answers is passed through with its kind
//! intact — the dispatcher annotates which backend failed but never
//! reinterprets a specific kind into a generic one. `describe_all` reflects
//! the registry at call time: a disconnected backend's tools stay listed,
//! and invoking them reports the disconnect per call.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use conduit_application::ports::tool_executor::ToolExecutorPort;
use conduit_domain::tool::{
    backend::ToolBackend,
    entities::{ToolCall, ToolDefinition, ToolSpec},
    value_objects::{ToolError, ToolResult},
};

/// Fatal registry construction error
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two backends declared the same tool name
    #[error("Duplicate tool '{name}' declared by backends '{first}' and '{second}'")]
    DuplicateTool {
        name: String,
        first: String,
        second: String,
    },
}

/// Builder collecting backends before the one-time registry construction.
#[derive(Default)]
pub struct ToolDispatcherBuilder {
    backends: Vec<Arc<dyn ToolBackend>>,
}

impl ToolDispatcherBuilder {
    pub fn backend<B: ToolBackend + 'static>(self, backend: B) -> Self {
        self.backend_arc(Arc::new(backend))
    }

    pub fn backend_arc(mut self, backend: Arc<dyn ToolBackend>) -> Self {
        self.backends.push(backend);
        self
    }

    /// Build the registry, failing fast on any name collision.
    pub fn build(self) -> Result<ToolDispatcher, RegistryError> {
        let mut spec = ToolSpec::new();
        let mut owners: HashMap<String, usize> = HashMap::new();

        for (index, backend) in self.backends.iter().enumerate() {
            for definition in backend.describe_tools() {
                let name = definition.name.clone();
                if let Err(duplicate) = spec.try_register(definition) {
                    let first = self.backends[owners[&duplicate.name]].id().to_string();
                    return Err(RegistryError::DuplicateTool {
                        name: duplicate.name,
                        first,
                        second: backend.id().to_string(),
                    });
                }
                debug!(tool = %name, backend = backend.id(), "Registered tool");
                owners.insert(name, index);
            }
        }

        Ok(ToolDispatcher {
            backends: self.backends,
            owners,
            spec,
        })
    }
}

/// Dispatcher owning the tool registry for the process lifetime.
///
/// Built once at startup; the set of names never changes afterwards, only
/// backend liveness does.
pub struct ToolDispatcher {
    backends: Vec<Arc<dyn ToolBackend>>,
    /// Tool name → index into `backends`
    owners: HashMap<String, usize>,
    spec: ToolSpec,
}

impl ToolDispatcher {
    pub fn builder() -> ToolDispatcherBuilder {
        ToolDispatcherBuilder::default()
    }

    /// The merged tool specification
    pub fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    /// Identifiers of all registered backends
    pub fn backend_ids(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.id()).collect()
    }

    fn backend_for(&self, tool_name: &str) -> Option<&Arc<dyn ToolBackend>> {
        self.owners.get(tool_name).map(|&index| &self.backends[index])
    }
}

#[async_trait]
impl ToolExecutorPort for ToolDispatcher {
    fn describe_all(&self) -> Vec<ToolDefinition> {
        let mut tools: Vec<ToolDefinition> = self.spec.all().cloned().collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    async fn invoke(&self, call: &ToolCall) -> ToolResult {
        let Some(backend) = self.backend_for(&call.tool_name) else {
            return ToolResult::failure(&call.tool_name, ToolError::unknown_tool(&call.tool_name));
        };

        if !backend.is_connected() {
            warn!(
                tool = %call.tool_name,
                backend = backend.id(),
                "Invoke on disconnected backend"
            );
            return ToolResult::failure(
                &call.tool_name,
                ToolError::disconnected_backend(backend.id()),
            );
        }

        let mut result = backend.call(call).await;
        // Annotate origin without touching the kind or message
        if let Some(error) = result.error.as_mut()
            && error.details.is_none()
        {
            error.details = Some(format!("backend: {}", backend.id()));
        }
        result
    }

    fn invoke_sync(&self, call: &ToolCall) -> ToolResult {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tokio::task::block_in_place(|| handle.block_on(self.invoke(call)))
            }
            Err(_) => {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build();
                match runtime {
                    Ok(runtime) => runtime.block_on(self.invoke(call)),
                    Err(e) => ToolResult::failure(
                        &call.tool_name,
                        ToolError::backend_error(format!("Failed to create runtime: {}", e)),
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conduit_domain::tool::value_objects::ErrorKind;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FakeBackend {
        id: &'static str,
        tools: Vec<&'static str>,
        connected: AtomicBool,
    }

    impl FakeBackend {
        fn new(id: &'static str, tools: Vec<&'static str>) -> Self {
            Self {
                id,
                tools,
                connected: AtomicBool::new(true),
            }
        }
    }

    #[async_trait]
    impl ToolBackend for FakeBackend {
        fn id(&self) -> &str {
            self.id
        }

        fn display_name(&self) -> &str {
            "Fake"
        }

        fn describe_tools(&self) -> Vec<ToolDefinition> {
            self.tools
                .iter()
                .map(|name| ToolDefinition::new(*name, "fake tool"))
                .collect()
        }

        fn is_connected(&self) -> bool {
            self.connected.load(Ordering::SeqCst)
        }

        async fn call(&self, call: &ToolCall) -> ToolResult {
            ToolResult::success(&call.tool_name, format!("handled by {}", self.id))
        }
    }

    #[tokio::test]
    async fn test_routing_to_owning_backend() {
        let dispatcher = ToolDispatcher::builder()
            .backend(FakeBackend::new("alpha", vec!["search_documents"]))
            .backend(FakeBackend::new("beta", vec!["read_file", "write_file"]))
            .build()
            .unwrap();

        let result = dispatcher.invoke(&ToolCall::new("read_file")).await;
        assert_eq!(result.output_str(), Some("handled by beta"));

        let result = dispatcher.invoke(&ToolCall::new("search_documents")).await;
        assert_eq!(result.output_str(), Some("handled by alpha"));
    }

    #[tokio::test]
    async fn test_duplicate_tool_fails_construction() {
        let result = ToolDispatcher::builder()
            .backend(FakeBackend::new("alpha", vec!["search_documents"]))
            .backend(FakeBackend::new("beta", vec!["search_documents"]))
            .build();

        match result {
            Err(RegistryError::DuplicateTool { name, first, second }) => {
                assert_eq!(name, "search_documents");
                assert_eq!(first, "alpha");
                assert_eq!(second, "beta");
            }
            Ok(_) => panic!("expected DuplicateTool"),
        }
    }

    #[tokio::test]
    async fn test_unknown_tool_empty_and_populated() {
        let empty = ToolDispatcher::builder().build().unwrap();
        let result = empty.invoke(&ToolCall::new("does_not_exist")).await;
        assert_eq!(result.error_kind(), Some(ErrorKind::UnknownTool));

        let populated = ToolDispatcher::builder()
            .backend(FakeBackend::new("alpha", vec!["read_file"]))
            .build()
            .unwrap();
        let result = populated.invoke(&ToolCall::new("does_not_exist")).await;
        assert_eq!(result.error_kind(), Some(ErrorKind::UnknownTool));
    }

    #[tokio::test]
    async fn test_disconnected_backend_stays_listed() {
        let backend = Arc::new(FakeBackend::new("alpha", vec!["read_file"]));
        let dispatcher = ToolDispatcher::builder()
            .backend_arc(backend.clone())
            .build()
            .unwrap();

        backend.connected.store(false, Ordering::SeqCst);

        // Still listed...
        let tools = dispatcher.describe_all();
        assert!(tools.iter().any(|t| t.name == "read_file"));

        // ...but invocation reports the disconnect
        let result = dispatcher.invoke(&ToolCall::new("read_file")).await;
        assert_eq!(result.error_kind(), Some(ErrorKind::DisconnectedBackend));
    }

    #[tokio::test]
    async fn test_describe_all_sorted() {
        let dispatcher = ToolDispatcher::builder()
            .backend(FakeBackend::new("alpha", vec!["zeta_tool", "alpha_tool"]))
            .build()
            .unwrap();

        let names: Vec<_> = dispatcher.describe_all().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["alpha_tool", "zeta_tool"]);
    }

    #[tokio::test]
    async fn test_failure_annotated_with_backend() {
        struct FailingBackend;

        #[async_trait]
        impl ToolBackend for FailingBackend {
            fn id(&self) -> &str {
                "failing"
            }
            fn display_name(&self) -> &str {
                "Failing"
            }
            fn describe_tools(&self) -> Vec<ToolDefinition> {
                vec![ToolDefinition::new("broken_tool", "always fails")]
            }
            async fn call(&self, call: &ToolCall) -> ToolResult {
                ToolResult::failure(&call.tool_name, ToolError::backend_error("boom"))
            }
        }

        let dispatcher = ToolDispatcher::builder()
            .backend(FailingBackend)
            .build()
            .unwrap();

        let result = dispatcher.invoke(&ToolCall::new("broken_tool")).await;
        let error = result.error().unwrap();
        // Kind and message untouched, origin attached as details
        assert_eq!(error.kind, ErrorKind::BackendError);
        assert_eq!(error.message, "boom");
        assert_eq!(error.details.as_deref(), Some("backend: failing"));
    }
}
