//! No-op retrieval source
//!
//! The variant used when no document index is configured: every question
//! answers with an empty sequence, and no environment is required.

use async_trait::async_trait;

use conduit_domain::retrieval::{RetrievalError, RetrievalSource, RetrievedDocument};

/// Retrieval source that never finds anything.
#[derive(Debug, Clone, Default)]
pub struct NoopRetrievalSource;

impl NoopRetrievalSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RetrievalSource for NoopRetrievalSource {
    fn id(&self) -> &str {
        "noop"
    }

    fn required_env_vars(&self) -> &[&'static str] {
        &[]
    }

    async fn retrieve(
        &self,
        _question: &str,
        _num_results: usize,
    ) -> Result<Vec<RetrievedDocument>, RetrievalError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_returns_empty_success() {
        let source = NoopRetrievalSource::new();
        assert!(source.required_env_vars().is_empty());

        let docs = source.retrieve("anything", 5).await.unwrap();
        assert!(docs.is_empty());
    }
}
