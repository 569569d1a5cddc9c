//! Remote analysis/debate collaborator — trait, wire types, and errors.
//!
//! The engine consumes the service through four logical operations; exact
//! wire framing is owned by the service. Every operation can fail with a
//! [`ServiceError`], and every failure is recoverable: the orchestrator
//! degrades to local simulation instead of propagating.

pub mod http;

pub use http::HttpAnalysisService;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::results::AnalysisResult;

/// Operator-provided input for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisInput {
    /// Topic under analysis. Required, non-empty.
    pub topic: String,
    /// Free-text context for the topic.
    pub text: String,
    /// Significance score in [0, 1].
    pub significance: f64,
}

impl AnalysisInput {
    pub fn new(topic: impl Into<String>, text: impl Into<String>, significance: f64) -> Self {
        Self {
            topic: topic.into(),
            text: text.into(),
            significance: significance.clamp(0.0, 1.0),
        }
    }
}

/// Error from a collaborator call.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// Transport-level failure: connect, timeout, broken stream.
    #[error("service request failed: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("service returned status {status}")]
    Status { status: u16 },

    /// The body arrived but did not have a usable shape.
    #[error("malformed service response: {0}")]
    Malformed(String),
}

impl ServiceError {
    /// Whether this failure is a payload-shape problem rather than a
    /// connectivity one. Recovery is identical; diagnosis is not.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

/// Log a recoverable collaborator failure. Network and malformed-payload
/// failures recover identically but are logged apart for diagnosis.
pub(crate) fn log_failure(operation: &str, err: &ServiceError) {
    if err.is_malformed() {
        tracing::warn!(kind = "malformed_response", %err, "{} payload unusable, degrading", operation);
    } else {
        tracing::warn!(kind = "network", %err, "{} failed, degrading", operation);
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// One `{agent, message}` entry of the structured transcript shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMessage {
    pub agent: String,
    pub message: String,
}

/// Transcript field of the immediate debate response.
///
/// The service returns either an ordered entry list or a single delimited
/// text blob; the variant is decided once here and never re-examined
/// downstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TranscriptPayload {
    Entries(Vec<AgentMessage>),
    Blob(String),
}

/// Explicit final-verdict object some responses carry inline.
#[derive(Debug, Clone, Deserialize)]
pub struct VerdictObject {
    pub trust_score: Option<f64>,
    pub reasoning: Option<String>,
    pub recommendation: Option<String>,
}

/// Immediate response of the debate operation.
#[derive(Debug, Clone, Deserialize)]
pub struct DebateResponse {
    pub status: Option<String>,
    pub message: Option<String>,
    /// Bare trust score (percent) on the immediate response.
    pub trust_score: Option<f64>,
    #[serde(rename = "debate_transcript")]
    pub transcript: Option<TranscriptPayload>,
    /// Deferred-reference token; the full transcript and verdict must be
    /// fetched with a supplementary call.
    #[serde(rename = "debate_file")]
    pub deferred_token: Option<String>,
    pub final_verdict: Option<VerdictObject>,
}

/// Payload of the supplementary deferred-debate fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct DeferredDebatePayload {
    pub topic: Option<String>,
    pub trust_score: Option<f64>,
    pub judgment: Option<String>,
    pub recommendation: Option<String>,
    /// Role-prefixed transcript entries (`LEFTIST OPENING:\n...`).
    #[serde(default)]
    pub debate_transcript: Vec<String>,
}

/// The remote analysis/debate collaborator.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Submit a topic for analysis; starts stage 1.
    async fn submit_analysis(&self, input: &AnalysisInput) -> Result<(), ServiceError>;

    /// Fetch the processed result set; completes stage 7.
    async fn fetch_results(&self) -> Result<Vec<AnalysisResult>, ServiceError>;

    /// Run the multi-agent debate and return its raw response.
    async fn run_debate(&self) -> Result<DebateResponse, ServiceError>;

    /// Fetch the deferred debate result named by `token`.
    async fn fetch_deferred_debate(&self, token: &str)
        -> Result<DeferredDebatePayload, ServiceError>;
}
