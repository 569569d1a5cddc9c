//! Fixed fallback result set.
//!
//! Served when the analysis service is unreachable or its results payload
//! cannot be used, so a degraded run still ends with displayable data. The
//! rows are stable: the progress schedule and summary figures derived from
//! them must not drift between runs.

use super::{AnalysisResult, Perspective, ResultSet};

/// The four canonical fallback results.
pub fn fallback_results() -> ResultSet {
    ResultSet::new(vec![
        AnalysisResult {
            title: "Encyclopedia Entry - Topic Overview".to_string(),
            url: "https://en.wikipedia.org/wiki/Example_Topic".to_string(),
            snippet: "Reference entry summarizing the documented facts, timeline, and \
                      principal figures of the analyzed topic..."
                .to_string(),
            trust_score: 0.75,
            source_type: "Encyclopedia".to_string(),
            relevance_confidence: 0.95,
            perspective: Perspective::Common,
        },
        AnalysisResult {
            title: "Breaking Coverage: Wider Implications".to_string(),
            url: "https://example-progressive-news.com/topic-coverage".to_string(),
            snippet: "Coverage framing the event within broader systemic concerns and \
                      calling for institutional responses..."
                .to_string(),
            trust_score: 0.68,
            source_type: "News Media".to_string(),
            relevance_confidence: 0.87,
            perspective: Perspective::Leftist,
        },
        AnalysisResult {
            title: "Commentary: Setting the Record Straight".to_string(),
            url: "https://example-conservative-outlet.com/topic-commentary".to_string(),
            snippet: "Opinion piece emphasizing established sources and cautioning \
                      against speculative narratives..."
                .to_string(),
            trust_score: 0.71,
            source_type: "Opinion Blog".to_string(),
            relevance_confidence: 0.82,
            perspective: Perspective::Rightist,
        },
        AnalysisResult {
            title: "Community Reactions and Discussion".to_string(),
            url: "https://social.example.com/groups/topic-discussion".to_string(),
            snippet: "Unverified community posts sharing reactions, claims, and \
                      secondhand accounts..."
                .to_string(),
            trust_score: 0.32,
            source_type: "Social Media".to_string(),
            relevance_confidence: 0.65,
            perspective: Perspective::Common,
        },
    ])
}
