//! Vectorize retrieval source
//!
//! Talks to a Vectorize.io retrieval pipeline over HTTP. Configuration is
//! an explicit [`VectorizeConfig`] built from an environment snapshot — the
//! source never reads the process environment itself, so availability can
//! be validated deterministically at startup.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use conduit_domain::retrieval::{
    RetrievalError, RetrievalSource, RetrievedDocument, bound_by_relevance,
};
use conduit_domain::retrieval::entities::{ID_KEY, SCORE_KEY};

/// Environment variables the Vectorize source requires
pub const REQUIRED_ENV_VARS: &[&str] = &[
    "VECTORIZE_ORGANIZATION_ID",
    "VECTORIZE_PIPELINE_ACCESS_TOKEN",
    "VECTORIZE_PIPELINE_ID",
];

/// Default API endpoint
const DEFAULT_ENDPOINT: &str = "https://api.vectorize.io/v1";

/// HTTP timeout for retrieval requests
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Explicit configuration for the Vectorize source.
#[derive(Debug, Clone)]
pub struct VectorizeConfig {
    pub organization_id: String,
    pub access_token: String,
    pub pipeline_id: String,
    pub endpoint: String,
}

impl VectorizeConfig {
    /// Build from an environment snapshot.
    ///
    /// Pure: reports every missing variable in one aggregated error instead
    /// of failing on the first.
    pub fn from_env(
        env: &std::collections::HashMap<String, String>,
    ) -> Result<Self, RetrievalError> {
        let lookup = |key: &str| env.get(key).filter(|v| !v.is_empty()).cloned();

        let organization_id = lookup("VECTORIZE_ORGANIZATION_ID");
        let access_token = lookup("VECTORIZE_PIPELINE_ACCESS_TOKEN");
        let pipeline_id = lookup("VECTORIZE_PIPELINE_ID");

        let missing: Vec<String> = REQUIRED_ENV_VARS
            .iter()
            .zip([&organization_id, &access_token, &pipeline_id])
            .filter(|(_, value)| value.is_none())
            .map(|(var, _)| var.to_string())
            .collect();

        let (Some(organization_id), Some(access_token), Some(pipeline_id)) =
            (organization_id, access_token, pipeline_id)
        else {
            return Err(RetrievalError::Unavailable { missing });
        };

        Ok(Self {
            organization_id,
            access_token,
            pipeline_id,
            endpoint: lookup("VECTORIZE_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        })
    }
}

/// Shape of one document in the pipeline's retrieval response
#[derive(Debug, Deserialize)]
struct WireDocument {
    text: String,
    #[serde(default)]
    similarity: Option<f64>,
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RetrievalResponse {
    #[serde(default)]
    documents: Vec<WireDocument>,
}

/// Vector-index-backed retrieval source.
pub struct VectorizeSource {
    config: VectorizeConfig,
    client: reqwest::Client,
}

impl VectorizeSource {
    pub fn new(config: VectorizeConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    fn retrieval_url(&self) -> String {
        format!(
            "{}/org/{}/pipelines/{}/retrieval",
            self.config.endpoint, self.config.organization_id, self.config.pipeline_id
        )
    }
}

#[async_trait]
impl RetrievalSource for VectorizeSource {
    fn id(&self) -> &str {
        "vectorize"
    }

    fn required_env_vars(&self) -> &[&'static str] {
        REQUIRED_ENV_VARS
    }

    async fn retrieve(
        &self,
        question: &str,
        num_results: usize,
    ) -> Result<Vec<RetrievedDocument>, RetrievalError> {
        debug!(question, num_results, "Querying vectorize pipeline");

        let response = self
            .client
            .post(self.retrieval_url())
            .bearer_auth(&self.config.access_token)
            .json(&serde_json::json!({
                "question": question,
                "numResults": num_results,
            }))
            .send()
            .await
            .map_err(|e| RetrievalError::Backend(format!("Retrieval request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(RetrievalError::Backend(format!(
                "Retrieval API returned error: {}",
                response.status()
            )));
        }

        let body: RetrievalResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::Backend(format!("Malformed retrieval response: {}", e)))?;

        let docs: Vec<RetrievedDocument> = body
            .documents
            .into_iter()
            .map(|doc| {
                let mut out = RetrievedDocument::new(doc.text).with_source("vectorize");
                if let Some(score) = doc.similarity {
                    out = out.with_metadata(SCORE_KEY, score);
                }
                if let Some(id) = doc.id {
                    out = out.with_metadata(ID_KEY, id);
                }
                out
            })
            .collect();

        // The pipeline may return more than asked; the contract caps here
        Ok(bound_by_relevance(docs, num_results))
    }
}
