//! Debate — transcript normalization, verdict resolution, and session
//! sequencing.
//!
//! # Flow
//!
//! ```text
//! run_debate
//!   ├─ collaborator ok ──→ ingest (one of three shapes)
//!   │      ├─ structured ─→ normalize (judge → resolver)   ┐
//!   │      ├─ delimited ──→ normalize                      ├─→ verdict cascade
//!   │      └─ deferred ───→ supplementary fetch, normalize ┘
//!   └─ any failure ──────→ scripted debate + default verdict
//! ```

pub mod script;
pub mod session;
pub mod transcript;
pub mod verdict;

pub use script::{scripted_debate, DebateScriptConfig};
pub use session::{
    run_debate, scripted_outcome, DebateConfig, DebateOutcome, DebateSession, UtteranceFeed,
    FALLBACK_REASONING,
};
pub use transcript::{
    normalize_delimited, normalize_prefixed, normalize_structured, DebatePayload,
    NormalizedTranscript, NormalizerConfig, Speaker, Utterance,
};
pub use verdict::{resolve, Verdict, VerdictFields, DEFAULT_REASONING, DEFAULT_TRUST_SCORE};
