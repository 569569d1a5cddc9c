//! Debate session — collaborator-driven or scripted, revealed one tick at
//! a time.
//!
//! `run_debate` never fails: any collaborator failure degrades to the fixed
//! scripted debate and a default verdict, so the caller sees the same shape
//! of outcome either way.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::script::{scripted_debate, DebateScriptConfig};
use super::transcript::{
    normalize_delimited, normalize_prefixed, normalize_structured, DebatePayload,
    NormalizedTranscript, NormalizerConfig, Utterance,
};
use super::verdict::{resolve, Verdict, VerdictFields, DEFAULT_TRUST_SCORE};
use crate::service::{AnalysisService, DebateResponse};

/// Reasoning attached to the scripted-fallback verdict.
pub const FALLBACK_REASONING: &str =
    "Based on the debate, the core facts are well documented through reliable \
     sources while circumstances and interpretations vary significantly. Source \
     reliability ranges widely, with social media material providing limited \
     credibility; both sides presented valid evidence-based arguments.";

/// Debate behavior knobs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebateConfig {
    pub normalizer: NormalizerConfig,
    pub script: DebateScriptConfig,
    /// Stub score for the fallback verdict; `DEFAULT_TRUST_SCORE` when
    /// unset.
    pub fallback_score: Option<u8>,
}

/// Everything one debate run produces.
#[derive(Debug, Clone)]
pub struct DebateOutcome {
    pub utterances: Vec<Utterance>,
    pub verdict: Verdict,
    /// Whether the scripted fallback served the transcript.
    pub degraded: bool,
}

/// A debate session: the utterances revealed so far and the resolved
/// verdict. Owned by the run context; the display layer only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateSession {
    pub id: String,
    pub started_at: DateTime<Utc>,
    utterances: Vec<Utterance>,
    verdict: Option<Verdict>,
}

impl DebateSession {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            started_at: Utc::now(),
            utterances: Vec::new(),
            verdict: None,
        }
    }

    /// Utterances revealed so far, in sequence order.
    pub fn utterances(&self) -> &[Utterance] {
        &self.utterances
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    /// Append the next revealed utterance.
    pub fn reveal(&mut self, utterance: Utterance) {
        self.utterances.push(utterance);
    }

    pub fn set_verdict(&mut self, verdict: Verdict) {
        self.verdict = Some(verdict);
    }

    /// Discard utterances and verdict unconditionally.
    pub fn clear(&mut self) {
        self.utterances.clear();
        self.verdict = None;
    }
}

/// Forward-only feed over a normalized utterance sequence.
///
/// Finite and non-restartable: once an utterance is taken it is gone, and a
/// fresh feed requires a fresh normalization.
#[derive(Debug)]
pub struct UtteranceFeed {
    inner: std::vec::IntoIter<Utterance>,
}

impl UtteranceFeed {
    pub fn new(utterances: Vec<Utterance>) -> Self {
        Self {
            inner: utterances.into_iter(),
        }
    }

    /// Yield the next utterance, if any.
    pub fn next_utterance(&mut self) -> Option<Utterance> {
        self.inner.next()
    }

    pub fn remaining(&self) -> usize {
        self.inner.len()
    }
}

/// The fully local debate outcome: scripted transcript plus the default
/// (or stubbed) verdict. Used directly when the pipeline has already
/// degraded to simulation, and as the recovery path for failed calls.
pub fn scripted_outcome(config: &DebateConfig) -> DebateOutcome {
    DebateOutcome {
        utterances: scripted_debate(config.script),
        verdict: Verdict {
            trust_score_percent: config.fallback_score.unwrap_or(DEFAULT_TRUST_SCORE),
            reasoning: FALLBACK_REASONING.to_string(),
            recommendation: None,
        },
        degraded: true,
    }
}

/// Run one debate against the collaborator, normalizing its transcript and
/// resolving the verdict; degrade to the scripted debate on any failure.
pub async fn run_debate(service: &dyn AnalysisService, config: &DebateConfig) -> DebateOutcome {
    let response = match service.run_debate().await {
        Ok(response) => response,
        Err(err) => {
            crate::service::log_failure("debate", &err);
            return scripted_outcome(config);
        }
    };

    let payload = match DebatePayload::ingest(&response) {
        Ok(payload) => payload,
        Err(err) => {
            crate::service::log_failure("debate", &err);
            return scripted_outcome(config);
        }
    };

    normalize_and_resolve(service, config, &response, payload).await
}

async fn normalize_and_resolve(
    service: &dyn AnalysisService,
    config: &DebateConfig,
    response: &DebateResponse,
    payload: DebatePayload,
) -> DebateOutcome {
    // Candidate priority: explicit inline verdict (with structured judge
    // remarks), then the deferred supplement, then the bare response score.
    let mut candidates: Vec<VerdictFields> = Vec::new();
    if let Some(object) = &response.final_verdict {
        candidates.push(VerdictFields::from_verdict_object(object));
    }

    let (utterances, degraded) = match payload {
        DebatePayload::Structured(entries) => {
            let NormalizedTranscript {
                utterances,
                judge_remarks,
            } = normalize_structured(&entries, &config.normalizer);
            candidates.push(VerdictFields::from_judge_remarks(&judge_remarks));
            (utterances, false)
        }
        DebatePayload::Delimited(blob) => (normalize_delimited(&blob).utterances, false),
        DebatePayload::Deferred { token } => match service.fetch_deferred_debate(&token).await {
            Ok(deferred) => {
                candidates.push(VerdictFields::from_deferred(&deferred));
                if deferred.debate_transcript.is_empty() {
                    // Verdict came back without a transcript; reveal the
                    // scripted exchange so the operator still sees one.
                    (scripted_debate(config.script), true)
                } else {
                    (normalize_prefixed(&deferred.debate_transcript).utterances, false)
                }
            }
            Err(err) => {
                crate::service::log_failure("deferred debate fetch", &err);
                (scripted_debate(config.script), true)
            }
        },
    };

    candidates.push(VerdictFields::from_bare_response(response));

    DebateOutcome {
        utterances,
        verdict: resolve(&candidates),
        degraded,
    }
}
