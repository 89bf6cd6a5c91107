//! `search_web` tool — web search via the DuckDuckGo Instant Answer API.
//!
//! Part of the `web-tools` feature. The API needs no key and returns
//! instant answers, abstracts, and related topics as JSON; results are
//! formatted into readable text sections for the model.

use async_trait::async_trait;
use tracing::debug;

use conduit_domain::tool::{
    backend::ToolBackend,
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};

/// Canonical tool name for web search
pub const SEARCH_WEB: &str = "search_web";

/// DuckDuckGo Instant Answer API endpoint (no API key required)
const DDG_API_URL: &str = "https://api.duckduckgo.com/";

/// Maximum related topics included in the output
const MAX_RELATED_TOPICS: usize = 5;

/// HTTP timeout for search requests
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Backend providing web search as one dispatcher tool.
pub struct WebSearchBackend {
    client: reqwest::Client,
}

impl WebSearchBackend {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            SEARCH_WEB,
            "Search the web for current information. Returns instant answers and related topics.",
        )
        .with_parameter(ToolParameter::new(
            "query",
            "The search query for web search",
            true,
        ))
        .with_parameter(
            ToolParameter::new(
                "max_results",
                "Maximum number of related topics (default: 5)",
                false,
            )
            .with_type(ParamType::Integer),
        )
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<String, ToolError> {
        let response = self
            .client
            .get(DDG_API_URL)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .header("User-Agent", "Conduit/0.4 (Agent Tool)")
            .send()
            .await
            .map_err(|e| ToolError::backend_error(format!("Search request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ToolError::backend_error(format!(
                "Search API returned error: {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ToolError::backend_error(format!("Failed to parse search results: {}", e)))?;

        Ok(format_results(query, &body, max_results))
    }
}

impl Default for WebSearchBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Format the instant-answer JSON into text sections.
fn format_results(query: &str, data: &serde_json::Value, max_results: usize) -> String {
    let mut sections: Vec<String> = Vec::new();

    if let Some(abstract_text) = data["AbstractText"].as_str()
        && !abstract_text.is_empty()
    {
        let source = data["AbstractSource"].as_str().unwrap_or("Unknown");
        sections.push(format!("Summary ({}): {}", source, abstract_text));
    }

    if let Some(answer) = data["Answer"].as_str()
        && !answer.is_empty()
    {
        sections.push(format!("Answer: {}", answer));
    }

    let mut topics = Vec::new();
    if let Some(related) = data["RelatedTopics"].as_array() {
        for topic in related.iter().take(max_results) {
            if let Some(text) = topic["Text"].as_str()
                && !text.is_empty()
            {
                topics.push(format!("- {}", text));
            }
        }
    }
    if !topics.is_empty() {
        sections.push(format!("Related topics:\n{}", topics.join("\n")));
    }

    if sections.is_empty() {
        format!("No instant answer found for '{}'.", query)
    } else {
        sections.join("\n\n")
    }
}

#[async_trait]
impl ToolBackend for WebSearchBackend {
    fn id(&self) -> &str {
        "web"
    }

    fn display_name(&self) -> &str {
        "Web Search"
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
        let max_results = call
            .get_i64("max_results")
            .map(|n| n.max(1) as usize)
            .unwrap_or(MAX_RELATED_TOPICS);

        debug!(query, max_results, "Running web search");

        match self.search(query, max_results).await {
            Ok(output) => ToolResult::success(&call.tool_name, output),
            Err(error) => ToolResult::failure(&call.tool_name, error),
        }
    }
}
