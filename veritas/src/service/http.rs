//! reqwest-backed collaborator client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{
    AnalysisInput, AnalysisService, DebateResponse, DeferredDebatePayload, ServiceError,
};
use crate::results::AnalysisResult;

/// Envelope around the results listing.
#[derive(Debug, Deserialize)]
struct ResultsEnvelope {
    #[serde(default)]
    results: Vec<AnalysisResult>,
}

/// HTTP client for the analysis/debate service.
pub struct HttpAnalysisService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAnalysisService {
    /// Create a client for the service at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn check_status(response: &reqwest::Response) -> Result<(), ServiceError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ServiceError::Status {
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn submit_analysis(&self, input: &AnalysisInput) -> Result<(), ServiceError> {
        let body = serde_json::json!({
            "topic": input.topic,
            "text": input.text,
            "significance_score": input.significance,
        });

        let response = self
            .client
            .post(self.url("/process"))
            .json(&body)
            .send()
            .await?;
        Self::check_status(&response)?;

        tracing::debug!("analysis submission accepted");
        Ok(())
    }

    async fn fetch_results(&self) -> Result<Vec<AnalysisResult>, ServiceError> {
        let response = self.client.get(self.url("/results")).send().await?;
        Self::check_status(&response)?;

        let envelope: ResultsEnvelope = response
            .json()
            .await
            .map_err(|e| ServiceError::Malformed(e.to_string()))?;

        tracing::debug!(count = envelope.results.len(), "results fetched");
        Ok(envelope.results)
    }

    async fn run_debate(&self) -> Result<DebateResponse, ServiceError> {
        let response = self.client.post(self.url("/debate")).send().await?;
        Self::check_status(&response)?;

        response
            .json()
            .await
            .map_err(|e| ServiceError::Malformed(e.to_string()))
    }

    async fn fetch_deferred_debate(
        &self,
        token: &str,
    ) -> Result<DeferredDebatePayload, ServiceError> {
        // The token names the stored result; the service exposes one
        // retrieval endpoint for it.
        tracing::debug!(token, "fetching deferred debate result");
        let response = self.client.get(self.url("/debate/result")).send().await?;
        Self::check_status(&response)?;

        response
            .json()
            .await
            .map_err(|e| ServiceError::Malformed(e.to_string()))
    }
}
