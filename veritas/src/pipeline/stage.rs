//! Pipeline stages — nine fixed ordinals and their display state.

use serde::{Deserialize, Serialize};

/// Number of stages in a run.
pub const STAGE_COUNT: usize = 9;

/// The nine named stages of an analysis run, in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    DataInput,
    QueryEnhancement,
    Search,
    ContentExtraction,
    RelevanceAnalysis,
    TrustEvaluation,
    ResultsProcessing,
    Debate,
    Verdict,
}

impl StageId {
    /// All stages in pipeline order.
    pub const ALL: [StageId; STAGE_COUNT] = [
        Self::DataInput,
        Self::QueryEnhancement,
        Self::Search,
        Self::ContentExtraction,
        Self::RelevanceAnalysis,
        Self::TrustEvaluation,
        Self::ResultsProcessing,
        Self::Debate,
        Self::Verdict,
    ];

    /// 1-based ordinal of this stage.
    pub fn ordinal(self) -> u8 {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0) as u8 + 1
    }

    /// Stage by 1-based ordinal.
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal.checked_sub(1)? as usize).copied()
    }

    /// Operator-facing stage title.
    pub fn title(self) -> &'static str {
        match self {
            Self::DataInput => "Data Input & Configuration",
            Self::QueryEnhancement => "Query Enhancement",
            Self::Search => "Search",
            Self::ContentExtraction => "Content Extraction",
            Self::RelevanceAnalysis => "Relevance Analysis",
            Self::TrustEvaluation => "Trust Score Evaluation",
            Self::ResultsProcessing => "Results Processing",
            Self::Debate => "Debate",
            Self::Verdict => "Verdict",
        }
    }
}

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Display state of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageState {
    Waiting,
    Processing,
    Completed,
    Error,
}

impl StageState {
    /// Whether the stage has finished, successfully or not.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

impl std::fmt::Display for StageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One stage of the pipeline with its state and status message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    pub id: StageId,
    pub state: StageState,
    pub message: String,
}

impl Stage {
    /// Fresh waiting stage.
    pub fn waiting(id: StageId) -> Self {
        Self {
            id,
            state: StageState::Waiting,
            message: "Waiting".to_string(),
        }
    }
}
