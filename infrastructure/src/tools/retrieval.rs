//! Retrieval tool backend — exposes a document source as `search_documents`
//!
//! Each configured [`RetrievalSource`] becomes one dispatcher backend with a
//! single tool. With several sources configured, each backend carries a
//! distinct tool name (`search_documents`, `search_documents_<id>`, ...) so
//! registry names stay unique.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use conduit_domain::retrieval::{DEFAULT_NUM_RESULTS, RetrievalError, RetrievalSource};
use conduit_domain::tool::{
    backend::ToolBackend,
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};

/// Canonical name of the retrieval tool
pub const SEARCH_DOCUMENTS: &str = "search_documents";

/// Backend adapting one retrieval source to the tool registry.
pub struct RetrievalToolBackend {
    id: String,
    tool_name: String,
    source: Arc<dyn RetrievalSource>,
}

impl RetrievalToolBackend {
    /// Wrap a source under the canonical `search_documents` name.
    pub fn new(source: Arc<dyn RetrievalSource>) -> Self {
        Self::named(SEARCH_DOCUMENTS, source)
    }

    /// Wrap a source under an explicit tool name (for multi-source setups).
    pub fn named(tool_name: impl Into<String>, source: Arc<dyn RetrievalSource>) -> Self {
        let tool_name = tool_name.into();
        Self {
            id: format!("retrieval:{}", source.id()),
            tool_name,
            source,
        }
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            &self.tool_name,
            "Search through indexed documents to find relevant information",
        )
        .with_parameter(ToolParameter::new(
            "query",
            "The search query to find relevant documents",
            true,
        ))
        .with_parameter(
            ToolParameter::new(
                "num_results",
                "Number of documents to retrieve (default: 5)",
                false,
            )
            .with_type(ParamType::Integer),
        )
    }
}

#[async_trait]
impl ToolBackend for RetrievalToolBackend {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        "Document Retrieval"
    }

    fn describe_tools(&self) -> Vec<ToolDefinition> {
        vec![self.definition()]
    }

    async fn call(&self, call: &ToolCall) -> ToolResult {
        let definition = self.definition();
        if call.tool_name != definition.name {
            return ToolResult::failure(&call.tool_name, ToolError::unknown_tool(&call.tool_name));
        }
        if let Err(e) = DefaultToolValidator.validate(call, &definition) {
            return ToolResult::failure(&call.tool_name, ToolError::invalid_arguments(e));
        }

        let query = match call.require_string("query") {
            Ok(q) => q,
            Err(e) => return ToolResult::failure(&call.tool_name, ToolError::invalid_arguments(e)),
        };
        let num_results = call
            .get_i64("num_results")
            .map(|n| n.max(1) as usize)
            .unwrap_or(DEFAULT_NUM_RESULTS);

        debug!(source = self.source.id(), query, num_results, "Retrieving documents");

        match self.source.retrieve(query, num_results).await {
            Ok(documents) => {
                let total_found = documents.len();
                let results = serde_json::to_value(&documents).unwrap_or_default();
                ToolResult::success(
                    &call.tool_name,
                    serde_json::json!({
                        "query": query,
                        "results": results,
                        "total_found": total_found,
                    }),
                )
            }
            Err(error) => {
                let tool_error = match &error {
                    RetrievalError::Unavailable { .. } => {
                        ToolError::backend_unavailable(error.to_string())
                    }
                    RetrievalError::Backend(_) => ToolError::backend_error(error.to_string()),
                };
                ToolResult::failure(&call.tool_name, tool_error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conduit_domain::retrieval::{RetrievedDocument, bound_by_relevance};
    use conduit_domain::tool::value_objects::ErrorKind;

    struct StubSource {
        docs: usize,
        fail: Option<RetrievalError>,
    }

    #[async_trait]
    impl RetrievalSource for StubSource {
        fn id(&self) -> &str {
            "stub"
        }

        fn required_env_vars(&self) -> &[&'static str] {
            &[]
        }

        async fn retrieve(
            &self,
            _question: &str,
            num_results: usize,
        ) -> Result<Vec<RetrievedDocument>, RetrievalError> {
            if let Some(err) = &self.fail {
                return Err(match err {
                    RetrievalError::Unavailable { missing } => RetrievalError::Unavailable {
                        missing: missing.clone(),
                    },
                    RetrievalError::Backend(m) => RetrievalError::Backend(m.clone()),
                });
            }
            let docs: Vec<_> = (0..self.docs)
                .map(|i| {
                    RetrievedDocument::new(format!("doc {}", i))
                        .with_score(1.0 - i as f64 / 100.0)
                        .with_source("stub")
                })
                .collect();
            Ok(bound_by_relevance(docs, num_results))
        }
    }

    fn backend(docs: usize) -> RetrievalToolBackend {
        RetrievalToolBackend::new(Arc::new(StubSource { docs, fail: None }))
    }

    #[tokio::test]
    async fn test_search_documents_bounded() {
        let backend = backend(20);
        let call = ToolCall::new(SEARCH_DOCUMENTS)
            .with_arg("query", "question")
            .with_arg("num_results", 3i64);

        let result = backend.call(&call).await;
        assert!(result.is_success());

        let payload = result.output().unwrap();
        assert_eq!(payload["total_found"], 3);
        let results = payload["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        // Descending relevance
        assert_eq!(results[0]["content"], "doc 0");
        assert_eq!(results[2]["content"], "doc 2");
    }

    #[tokio::test]
    async fn test_default_num_results() {
        let backend = backend(20);
        let call = ToolCall::new(SEARCH_DOCUMENTS).with_arg("query", "question");

        let result = backend.call(&call).await;
        let payload = result.output().unwrap();
        assert_eq!(payload["total_found"], 5);
    }

    #[tokio::test]
    async fn test_zero_results_is_success() {
        let backend = backend(0);
        let call = ToolCall::new(SEARCH_DOCUMENTS).with_arg("query", "question");

        let result = backend.call(&call).await;
        assert!(result.is_success());
        assert_eq!(result.output().unwrap()["total_found"], 0);
    }

    #[tokio::test]
    async fn test_missing_query_invalid_arguments() {
        let backend = backend(5);
        let result = backend.call(&ToolCall::new(SEARCH_DOCUMENTS)).await;
        assert_eq!(result.error_kind(), Some(ErrorKind::InvalidArguments));
    }

    #[tokio::test]
    async fn test_unavailable_maps_to_backend_unavailable() {
        let backend = RetrievalToolBackend::new(Arc::new(StubSource {
            docs: 0,
            fail: Some(RetrievalError::Unavailable {
                missing: vec!["VECTORIZE_PIPELINE_ID".to_string()],
            }),
        }));

        let result = backend
            .call(&ToolCall::new(SEARCH_DOCUMENTS).with_arg("query", "q"))
            .await;
        let error = result.error().unwrap();
        assert_eq!(error.kind, ErrorKind::BackendUnavailable);
        assert!(error.message.contains("VECTORIZE_PIPELINE_ID"));
    }

    #[tokio::test]
    async fn test_backend_failure_maps_to_backend_error() {
        let backend = RetrievalToolBackend::new(Arc::new(StubSource {
            docs: 0,
            fail: Some(RetrievalError::Backend("connection reset".to_string())),
        }));

        let result = backend
            .call(&ToolCall::new(SEARCH_DOCUMENTS).with_arg("query", "q"))
            .await;
        let error = result.error().unwrap();
        assert_eq!(error.kind, ErrorKind::BackendError);
        assert!(error.message.contains("connection reset"));
    }

    #[tokio::test]
    async fn test_named_backend_uses_custom_tool_name() {
        let backend = RetrievalToolBackend::named(
            "search_documents_stub",
            Arc::new(StubSource { docs: 1, fail: None }),
        );

        let tools = backend.describe_tools();
        assert_eq!(tools[0].name, "search_documents_stub");

        let result = backend
            .call(&ToolCall::new("search_documents_stub").with_arg("query", "q"))
            .await;
        assert!(result.is_success());
    }
}
