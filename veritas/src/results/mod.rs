//! Discovered source results — model, summary statistics, and filters.
//!
//! A run's results are replaced wholesale on each load or filter; nothing
//! here mutates a result set in place.

pub mod sample;
pub mod summary;

pub use summary::{PerspectiveFilter, ResultSummary, TrustFilter};

use serde::{Deserialize, Serialize};

/// Editorial-leaning tag on a discovered source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    Leftist,
    Rightist,
    Common,
}

impl std::fmt::Display for Perspective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leftist => write!(f, "leftist"),
            Self::Rightist => write!(f, "rightist"),
            Self::Common => write!(f, "common"),
        }
    }
}

/// One discovered source excerpt with its scores.
///
/// Immutable once received from the service or the fallback data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Source title.
    pub title: String,
    /// Source URL.
    pub url: String,
    /// Excerpt shown to the operator.
    pub snippet: String,
    /// Trust score in [0, 1].
    pub trust_score: f64,
    /// Source category (e.g. "Encyclopedia", "News Media").
    pub source_type: String,
    /// Relevance confidence in [0, 1].
    pub relevance_confidence: f64,
    /// Editorial perspective of the source.
    pub perspective: Perspective,
}

/// Ordered collection of analysis results for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    results: Vec<AnalysisResult>,
}

impl ResultSet {
    /// Wrap an ordered list of results.
    pub fn new(results: Vec<AnalysisResult>) -> Self {
        Self { results }
    }

    /// All results, in ingestion order.
    pub fn results(&self) -> &[AnalysisResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Derived summary statistics for this set.
    pub fn summary(&self) -> ResultSummary {
        ResultSummary::compute(&self.results)
    }

    /// A new set holding the results that pass both filters, in the same
    /// order. The source set is untouched.
    pub fn filtered(&self, perspective: PerspectiveFilter, trust: TrustFilter) -> ResultSet {
        ResultSet::new(
            self.results
                .iter()
                .filter(|r| perspective.accepts(r) && trust.accepts(r))
                .cloned()
                .collect(),
        )
    }
}
