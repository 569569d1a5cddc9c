//! Trust score classification.

use serde::{Deserialize, Serialize};

/// Coarse trust bucket for a source's trust score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    /// Score at or above 0.8.
    High,
    /// Score in [0.5, 0.8).
    Medium,
    /// Score below 0.5.
    Low,
}

impl TrustLevel {
    /// Classify a trust score in [0, 1] into a bucket.
    ///
    /// Total over all inputs: the three ranges partition the domain with
    /// boundaries at 0.5 and 0.8 belonging to the higher bucket.
    pub fn classify(score: f64) -> Self {
        if score >= 0.8 {
            Self::High
        } else if score >= 0.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Whether a score falls into this bucket.
    pub fn matches(self, score: f64) -> bool {
        Self::classify(score) == self
    }
}

impl std::fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}
