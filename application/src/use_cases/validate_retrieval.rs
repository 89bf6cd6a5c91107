//! Startup validation of retrieval source configuration
//!
//! Every configured [`RetrievalSource`] declares the environment variables it
//! needs. This use case checks all of them against an explicit environment
//! snapshot before the agent loop begins, so misconfiguration surfaces once,
//! in full, instead of on the first retrieval call.

use std::collections::HashMap;
use std::sync::Arc;

use conduit_domain::retrieval::{RetrievalError, RetrievalSource};
use tracing::debug;

/// Validates retrieval source configuration against an environment snapshot.
///
/// The snapshot is injected rather than read from the process environment,
/// keeping validation pure and testable.
pub struct ValidateRetrievalUseCase {
    sources: Vec<Arc<dyn RetrievalSource>>,
}

impl ValidateRetrievalUseCase {
    pub fn new(sources: Vec<Arc<dyn RetrievalSource>>) -> Self {
        Self { sources }
    }

    /// Check every source's declared variables.
    ///
    /// Returns a single aggregated [`RetrievalError::Unavailable`] naming
    /// every missing variable across all sources. A variable set to the
    /// empty string counts as missing.
    pub fn execute(&self, env: &HashMap<String, String>) -> Result<(), RetrievalError> {
        let mut missing = Vec::new();

        for source in &self.sources {
            for var in source.required_env_vars() {
                let present = env.get(*var).is_some_and(|v| !v.is_empty());
                if !present && !missing.iter().any(|m| m == var) {
                    missing.push((*var).to_string());
                }
            }
            debug!(source = source.id(), "Validated retrieval source configuration");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(RetrievalError::Unavailable { missing })
        }
    }
}
