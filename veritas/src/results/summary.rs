//! Summary statistics and filter predicates over a result set.

use serde::{Deserialize, Serialize};

use super::{AnalysisResult, Perspective};
use crate::trust::TrustLevel;

/// Results with relevance confidence at or above this are counted relevant.
pub const RELEVANCE_THRESHOLD: f64 = 0.6;

/// Aggregate statistics over a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    /// Total number of results.
    pub total: usize,
    /// Results whose relevance confidence clears [`RELEVANCE_THRESHOLD`].
    pub relevant: usize,
    /// Mean trust score as a rounded percentage; 0 for an empty set.
    pub average_trust_percent: u8,
}

impl ResultSummary {
    /// Compute the summary for an ordered list of results.
    pub fn compute(results: &[AnalysisResult]) -> Self {
        let total = results.len();
        let relevant = results
            .iter()
            .filter(|r| r.relevance_confidence >= RELEVANCE_THRESHOLD)
            .count();
        let average_trust_percent = if results.is_empty() {
            0
        } else {
            let mean = results.iter().map(|r| r.trust_score).sum::<f64>() / total as f64;
            (mean * 100.0).round() as u8
        };
        Self {
            total,
            relevant,
            average_trust_percent,
        }
    }
}

/// Perspective filter: an exact match or the `all` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerspectiveFilter {
    #[default]
    All,
    Only(Perspective),
}

impl PerspectiveFilter {
    pub fn accepts(self, result: &AnalysisResult) -> bool {
        match self {
            Self::All => true,
            Self::Only(p) => result.perspective == p,
        }
    }
}

/// Trust filter: a [`TrustLevel`] bucket or the `all` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustFilter {
    #[default]
    All,
    Bucket(TrustLevel),
}

impl TrustFilter {
    pub fn accepts(self, result: &AnalysisResult) -> bool {
        match self {
            Self::All => true,
            Self::Bucket(level) => level.matches(result.trust_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{sample, ResultSet};

    fn row(trust: f64, relevance: f64) -> AnalysisResult {
        AnalysisResult {
            title: "row".to_string(),
            url: "https://example.com".to_string(),
            snippet: String::new(),
            trust_score: trust,
            source_type: "News Media".to_string(),
            relevance_confidence: relevance,
            perspective: Perspective::Common,
        }
    }

    #[test]
    fn test_summary_canonical_scores() {
        let rows: Vec<_> = [0.75, 0.68, 0.71, 0.32]
            .iter()
            .map(|s| row(*s, *s))
            .collect();
        let summary = ResultSummary::compute(&rows);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.relevant, 3);
        assert_eq!(summary.average_trust_percent, 62);
    }

    #[test]
    fn test_summary_fallback_rows() {
        // Trust scores 0.75 / 0.68 / 0.71 / 0.32, relevance 0.95 / 0.87 /
        // 0.82 / 0.65 over the fixed fallback rows.
        let set = sample::fallback_results();
        let summary = set.summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.relevant, 4);
        assert_eq!(summary.average_trust_percent, 62);
    }

    #[test]
    fn test_summary_relevance_threshold() {
        let mut rows = sample::fallback_results().results().to_vec();
        rows[3].relevance_confidence = 0.59;
        let summary = ResultSummary::compute(&rows);
        assert_eq!(summary.relevant, 3);
    }

    #[test]
    fn test_summary_empty_set_is_zero() {
        let summary = ResultSummary::compute(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.relevant, 0);
        assert_eq!(summary.average_trust_percent, 0);
    }

    #[test]
    fn test_filter_all_all_is_identity() {
        let set = sample::fallback_results();
        let filtered = set.filtered(PerspectiveFilter::All, TrustFilter::All);
        assert_eq!(filtered.len(), set.len());
        for (a, b) in filtered.results().iter().zip(set.results()) {
            assert_eq!(a.title, b.title);
            assert_eq!(a.url, b.url);
        }
    }

    #[test]
    fn test_filter_by_perspective() {
        let set = sample::fallback_results();
        let filtered = set.filtered(
            PerspectiveFilter::Only(Perspective::Leftist),
            TrustFilter::All,
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.results()[0].perspective, Perspective::Leftist);
    }

    #[test]
    fn test_filters_compose_conjunctively() {
        let set = sample::fallback_results();
        // Three medium-trust rows, one low; the leftist row is medium.
        let filtered = set.filtered(
            PerspectiveFilter::Only(Perspective::Common),
            TrustFilter::Bucket(TrustLevel::Low),
        );
        assert_eq!(filtered.len(), 1);
        assert!(filtered.results()[0].trust_score < 0.5);
        assert_eq!(filtered.results()[0].perspective, Perspective::Common);
    }

    #[test]
    fn test_filter_preserves_order_and_source() {
        let set = sample::fallback_results();
        let filtered = set.filtered(
            PerspectiveFilter::Only(Perspective::Common),
            TrustFilter::All,
        );
        assert_eq!(filtered.len(), 2);
        // Source order: the common rows are first and last in the sample.
        assert!(filtered.results()[0].trust_score > filtered.results()[1].trust_score);
        // Source set untouched.
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_trust_filter_buckets() {
        let set = sample::fallback_results();
        let medium = set.filtered(PerspectiveFilter::All, TrustFilter::Bucket(TrustLevel::Medium));
        let low = set.filtered(PerspectiveFilter::All, TrustFilter::Bucket(TrustLevel::Low));
        let high = set.filtered(PerspectiveFilter::All, TrustFilter::Bucket(TrustLevel::High));
        assert_eq!(medium.len(), 3);
        assert_eq!(low.len(), 1);
        assert_eq!(high.len(), 0);
        let all = ResultSet::new(Vec::new()).filtered(PerspectiveFilter::All, TrustFilter::All);
        assert!(all.is_empty());
    }
}
