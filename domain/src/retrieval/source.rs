//! Retrieval source abstraction
//!
//! A [`RetrievalSource`] is a pluggable document-retrieval backend: given a
//! question it returns a relevance-ordered sequence of documents. Concrete
//! variants live in the infrastructure layer; the no-op variant returns an
//! empty sequence and the vector-pipeline variant talks HTTP.

use async_trait::async_trait;
use thiserror::Error;

use super::entities::RetrievedDocument;

/// Number of documents retrieved when the caller does not say otherwise
pub const DEFAULT_NUM_RESULTS: usize = 5;

/// Error raised by a retrieval source
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Required configuration is missing. Carries every missing environment
    /// variable name so misconfiguration is reported once, in full.
    #[error("Retrieval source unavailable, missing environment variables: {}", missing.join(", "))]
    Unavailable { missing: Vec<String> },

    /// Transport or query failure in the backend
    #[error("Retrieval backend error: {0}")]
    Backend(String),
}

/// Pluggable document-retrieval backend.
///
/// Zero results is a valid success, never an error. Implementations must cap
/// the returned sequence at `num_results` even when the backend has more,
/// and must order it by descending relevance (ties keep backend order).
#[async_trait]
pub trait RetrievalSource: Send + Sync {
    /// Unique identifier for this source (e.g., "noop", "vectorize")
    fn id(&self) -> &str;

    /// Environment variable names this source needs.
    ///
    /// Pure and side-effect-free; queried at startup so misconfiguration is
    /// reported before the agent loop begins, not on first use.
    fn required_env_vars(&self) -> &[&'static str];

    /// Retrieve documents relevant to the question.
    ///
    /// `num_results` is a hard cap on the sequence length; it is at least 1.
    async fn retrieve(
        &self,
        question: &str,
        num_results: usize,
    ) -> Result<Vec<RetrievedDocument>, RetrievalError>;
}
