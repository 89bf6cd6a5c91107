//! Retrieval domain entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata key carrying the backend relevance score
pub const SCORE_KEY: &str = "score";
/// Metadata key naming the originating backend
pub const SOURCE_KEY: &str = "source";
/// Metadata key carrying the backend document identifier
pub const ID_KEY: &str = "id";

/// A document returned by a retrieval source.
///
/// Metadata carries at least the source name and, when the backend provides
/// them, a relevance score and a document identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    /// Document text
    pub content: String,
    /// Backend metadata (source, score, identifier, ...)
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl RetrievedDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_score(self, score: f64) -> Self {
        self.with_metadata(SCORE_KEY, score)
    }

    pub fn with_source(self, source: impl Into<String>) -> Self {
        self.with_metadata(SOURCE_KEY, source.into())
    }

    /// Relevance score, if the backend reported one
    pub fn score(&self) -> Option<f64> {
        self.metadata.get(SCORE_KEY).and_then(|v| v.as_f64())
    }

    /// Originating backend name, if recorded
    pub fn source(&self) -> Option<&str> {
        self.metadata.get(SOURCE_KEY).and_then(|v| v.as_str())
    }
}

/// Order documents by descending relevance and cap the sequence length.
///
/// The sort is stable: documents with equal scores (or no score at all) keep
/// the backend's original order. Scoreless documents sort after scored ones.
pub fn bound_by_relevance(
    mut docs: Vec<RetrievedDocument>,
    num_results: usize,
) -> Vec<RetrievedDocument> {
    docs.sort_by(|a, b| {
        let sa = a.score().unwrap_or(f64::NEG_INFINITY);
        let sb = b.score().unwrap_or(f64::NEG_INFINITY);
        sb.partial_cmp(&sa).unwrap_or(std::cmp::Ordering::Equal)
    });
    docs.truncate(num_results);
    docs
}
