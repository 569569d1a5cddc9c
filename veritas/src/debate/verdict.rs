//! Verdict resolution — a priority cascade of partial verdict sources.
//!
//! Candidates are ordered providers, highest priority first. Each verdict
//! field is resolved independently by walking the same list, so a
//! later-priority source may supply `recommendation` even when an earlier
//! one already supplied the score. Resolution fails softly into defaults.

use serde::{Deserialize, Serialize};

use crate::service::{DebateResponse, DeferredDebatePayload, VerdictObject};
use crate::trust::TrustLevel;

/// Score used when no source supplies one.
pub const DEFAULT_TRUST_SCORE: u8 = 55;

/// Reasoning used when no source supplies one.
pub const DEFAULT_REASONING: &str =
    "Debate completed; no detailed judgment was returned by the analysis service.";

/// Final resolved trust verdict for a debate run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Trust score percentage, 0..=100.
    pub trust_score_percent: u8,
    pub reasoning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl Verdict {
    /// Bucket for the resolved score.
    pub fn trust_level(&self) -> TrustLevel {
        TrustLevel::classify(f64::from(self.trust_score_percent) / 100.0)
    }
}

/// Partial verdict gathered from one source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerdictFields {
    pub trust_score_percent: Option<u8>,
    pub reasoning: Option<String>,
    pub recommendation: Option<String>,
}

impl VerdictFields {
    /// Fields carried by an explicit final-verdict object.
    pub fn from_verdict_object(object: &VerdictObject) -> Self {
        Self {
            trust_score_percent: object.trust_score.map(clamp_percent),
            reasoning: object.reasoning.clone(),
            recommendation: object.recommendation.clone(),
        }
    }

    /// Fields carried by a deferred supplementary payload.
    pub fn from_deferred(payload: &DeferredDebatePayload) -> Self {
        Self {
            trust_score_percent: payload.trust_score.map(clamp_percent),
            reasoning: payload.judgment.clone(),
            recommendation: payload.recommendation.clone(),
        }
    }

    /// Fields carried bare on the immediate response: a top-level trust
    /// score, with the service message standing in as reasoning.
    pub fn from_bare_response(response: &DebateResponse) -> Self {
        Self {
            trust_score_percent: response.trust_score.map(clamp_percent),
            reasoning: response.message.clone(),
            recommendation: None,
        }
    }

    /// Reasoning-only candidate from judge remarks withheld from the
    /// structured display sequence.
    pub fn from_judge_remarks(remarks: &[String]) -> Self {
        Self {
            trust_score_percent: None,
            reasoning: if remarks.is_empty() {
                None
            } else {
                Some(remarks.join("\n\n"))
            },
            recommendation: None,
        }
    }
}

fn clamp_percent(score: f64) -> u8 {
    score.round().clamp(0.0, 100.0) as u8
}

/// Resolve one verdict from an ordered candidate list, highest priority
/// first. The first candidate supplying a field wins for that field alone.
pub fn resolve(candidates: &[VerdictFields]) -> Verdict {
    let trust_score_percent = candidates
        .iter()
        .find_map(|c| c.trust_score_percent)
        .unwrap_or(DEFAULT_TRUST_SCORE);
    let reasoning = candidates
        .iter()
        .find_map(|c| c.reasoning.clone())
        .unwrap_or_else(|| DEFAULT_REASONING.to_string());
    let recommendation = candidates.iter().find_map(|c| c.recommendation.clone());

    Verdict {
        trust_score_percent,
        reasoning,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_response(score: Option<f64>) -> DebateResponse {
        serde_json::from_value(serde_json::json!({
            "status": "completed",
            "message": "Debate completed in demo mode",
            "trust_score": score,
        }))
        .unwrap()
    }

    #[test]
    fn test_bare_score_wins_when_alone() {
        let response = bare_response(Some(82.0));
        let verdict = resolve(&[VerdictFields::from_bare_response(&response)]);
        assert_eq!(verdict.trust_score_percent, 82);
        assert_eq!(verdict.reasoning, "Debate completed in demo mode");
        assert!(verdict.recommendation.is_none());
    }

    #[test]
    fn test_deferred_outranks_bare_score() {
        let response = bare_response(Some(82.0));
        let deferred: DeferredDebatePayload = serde_json::from_str(
            r#"{"trust_score": 90, "judgment": "Strong sourcing on both sides."}"#,
        )
        .unwrap();
        let verdict = resolve(&[
            VerdictFields::from_deferred(&deferred),
            VerdictFields::from_bare_response(&response),
        ]);
        assert_eq!(verdict.trust_score_percent, 90);
        assert_eq!(verdict.reasoning, "Strong sourcing on both sides.");
    }

    #[test]
    fn test_no_source_falls_back_to_default() {
        let response = bare_response(None);
        let verdict = resolve(&[VerdictFields::from_bare_response(&response)]);
        assert_eq!(verdict.trust_score_percent, DEFAULT_TRUST_SCORE);
        // The service message still stands in as reasoning.
        assert_eq!(verdict.reasoning, "Debate completed in demo mode");

        let verdict = resolve(&[]);
        assert_eq!(verdict.trust_score_percent, DEFAULT_TRUST_SCORE);
        assert_eq!(verdict.reasoning, DEFAULT_REASONING);
        assert!(verdict.recommendation.is_none());
    }

    #[test]
    fn test_fields_resolve_independently() {
        // High-priority source supplies only the score; a lower one still
        // supplies the recommendation.
        let first = VerdictFields {
            trust_score_percent: Some(74),
            reasoning: None,
            recommendation: None,
        };
        let second = VerdictFields {
            trust_score_percent: Some(10),
            reasoning: Some("Lower-priority reasoning.".to_string()),
            recommendation: Some("Verify with primary sources.".to_string()),
        };
        let verdict = resolve(&[first, second]);
        assert_eq!(verdict.trust_score_percent, 74);
        assert_eq!(verdict.reasoning, "Lower-priority reasoning.");
        assert_eq!(
            verdict.recommendation.as_deref(),
            Some("Verify with primary sources.")
        );
    }

    #[test]
    fn test_explicit_object_outranks_everything() {
        let object: VerdictObject = serde_json::from_str(
            r#"{"trust_score": 61, "reasoning": "Inline verdict.", "recommendation": "Read widely."}"#,
        )
        .unwrap();
        let deferred: DeferredDebatePayload =
            serde_json::from_str(r#"{"trust_score": 90}"#).unwrap();
        let verdict = resolve(&[
            VerdictFields::from_verdict_object(&object),
            VerdictFields::from_deferred(&deferred),
        ]);
        assert_eq!(verdict.trust_score_percent, 61);
        assert_eq!(verdict.recommendation.as_deref(), Some("Read widely."));
    }

    #[test]
    fn test_judge_remarks_feed_reasoning_only() {
        let remarks = vec!["The sourcing is mixed.".to_string()];
        let fields = VerdictFields::from_judge_remarks(&remarks);
        assert!(fields.trust_score_percent.is_none());
        let verdict = resolve(&[fields]);
        assert_eq!(verdict.trust_score_percent, DEFAULT_TRUST_SCORE);
        assert_eq!(verdict.reasoning, "The sourcing is mixed.");

        let empty = VerdictFields::from_judge_remarks(&[]);
        assert!(empty.reasoning.is_none());
    }

    #[test]
    fn test_score_clamped_to_percent_range() {
        let object: VerdictObject = serde_json::from_str(r#"{"trust_score": 140}"#).unwrap();
        let fields = VerdictFields::from_verdict_object(&object);
        assert_eq!(fields.trust_score_percent, Some(100));
    }

    #[test]
    fn test_trust_level_of_verdict() {
        let verdict = Verdict {
            trust_score_percent: 82,
            reasoning: String::new(),
            recommendation: None,
        };
        assert_eq!(verdict.trust_level(), TrustLevel::High);
    }
}
