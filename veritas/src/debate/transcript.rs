//! Transcript normalization — three service shapes, one utterance sequence.
//!
//! The debate collaborator returns its transcript in one of three shapes:
//! an ordered `{agent, message}` list, a single delimited text blob, or a
//! deferred reference whose supplementary payload holds role-prefixed
//! strings. Ingestion resolves the shape exactly once into a
//! [`DebatePayload`]; normalization then yields a fresh, finite sequence of
//! [`Utterance`]s with strictly increasing sequence numbers preserving
//! source order. Nothing downstream branches on the shape again.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::service::{AgentMessage, DebateResponse, ServiceError, TranscriptPayload};

/// Speaker role attributed to an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Leftist,
    Rightist,
    Judge,
    System,
}

impl Speaker {
    /// Map a structured-shape agent name onto a role. Unknown names fall
    /// back to `System`.
    pub fn from_agent(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "leftist" => Self::Leftist,
            "rightist" => Self::Rightist,
            "judge" => Self::Judge,
            "system" => Self::System,
            _ => Self::System,
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leftist => write!(f, "leftist"),
            Self::Rightist => write!(f, "rightist"),
            Self::Judge => write!(f, "judge"),
            Self::System => write!(f, "system"),
        }
    }
}

/// One attributed statement within a debate transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    /// Strictly increasing index preserving source order.
    pub sequence: u32,
    pub speaker: Speaker,
    pub content: String,
}

/// Transcript payload with its shape resolved once at ingestion.
#[derive(Debug, Clone)]
pub enum DebatePayload {
    /// Ordered `{agent, message}` entries.
    Structured(Vec<AgentMessage>),
    /// Single text blob split on separator lines.
    Delimited(String),
    /// Reference token; the transcript arrives via a supplementary fetch.
    Deferred { token: String },
}

impl DebatePayload {
    /// Resolve the shape of an immediate debate response.
    ///
    /// A response with no transcript and no reference token has nothing to
    /// normalize and is reported malformed so the caller can fall back.
    pub fn ingest(response: &DebateResponse) -> Result<Self, ServiceError> {
        match (&response.transcript, &response.deferred_token) {
            (Some(TranscriptPayload::Entries(entries)), _) => {
                Ok(Self::Structured(entries.clone()))
            }
            (Some(TranscriptPayload::Blob(blob)), _) => Ok(Self::Delimited(blob.clone())),
            (None, Some(token)) => Ok(Self::Deferred {
                token: token.clone(),
            }),
            (None, None) => Err(ServiceError::Malformed(
                "debate response carries neither transcript nor reference token".to_string(),
            )),
        }
    }
}

/// Normalization policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Whether judge entries of the STRUCTURED shape appear in the display
    /// sequence. Historically they do not: structured judge entries are
    /// routed to the verdict resolver only, while the delimited and
    /// deferred shapes keep judge sections in the sequence. This switch
    /// documents the asymmetry instead of unifying it.
    pub structured_includes_judge: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            structured_includes_judge: false,
        }
    }
}

/// A normalized transcript: the display sequence plus any judge content
/// that was excluded from it.
#[derive(Debug, Clone, Default)]
pub struct NormalizedTranscript {
    pub utterances: Vec<Utterance>,
    /// Judge messages withheld from the display sequence (structured shape
    /// under the default policy). Consumed by the verdict resolver.
    pub judge_remarks: Vec<String>,
}

/// Normalize an ordered `{agent, message}` list.
pub fn normalize_structured(
    entries: &[AgentMessage],
    config: &NormalizerConfig,
) -> NormalizedTranscript {
    let mut out = NormalizedTranscript::default();
    let mut sequence = 0u32;

    for entry in entries {
        let speaker = Speaker::from_agent(&entry.agent);
        if speaker == Speaker::Judge && !config.structured_includes_judge {
            out.judge_remarks.push(entry.message.clone());
            continue;
        }
        out.utterances.push(Utterance {
            sequence,
            speaker,
            content: entry.message.clone(),
        });
        sequence += 1;
    }

    out
}

/// Lines of repeated `=` act as section separators in the blob shape (the
/// service emits rows of 70).
fn is_separator_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 5 && trimmed.chars().all(|c| c == '=')
}

/// Section header at the start of a section: a bracketed tag line or a
/// short role/verdict label ending in a colon.
static SECTION_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:\[[^\]\n]*\]|(?:leftist|rightist|judge)[^:\n]{0,40}:|final verdict\s*:|round \d+[^:\n]{0,40}:)\s*",
    )
    .expect("section header regex should compile")
});

/// Classify a delimited section by keyword inspection.
///
/// The precedence mirrors the service's section framing and is
/// load-bearing: a side name anywhere in the section wins outright, so the
/// nested rebuttal check only decides sections that mention a round
/// without naming a side.
fn classify_section(section: &str) -> Speaker {
    let lower = section.to_lowercase();
    if lower.contains("leftist") {
        Speaker::Leftist
    } else if lower.contains("rightist") {
        Speaker::Rightist
    } else if lower.contains("judge") || lower.contains("final verdict") {
        Speaker::Judge
    } else if lower.contains("round") || lower.contains("rebuttal") {
        if lower.contains("leftist rebuttal") {
            Speaker::Leftist
        } else if lower.contains("rightist rebuttal") {
            Speaker::Rightist
        } else {
            Speaker::System
        }
    } else if lower.contains("checking if debate")
        || lower.contains("ready:")
        || lower.contains("maximum rounds")
    {
        Speaker::System
    } else {
        Speaker::System
    }
}

/// Normalize a delimited text blob. Judge sections stay in the sequence.
pub fn normalize_delimited(blob: &str) -> NormalizedTranscript {
    let mut sections: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in blob.lines() {
        if is_separator_line(line) {
            sections.push(std::mem::take(&mut current));
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    sections.push(current);

    let mut out = NormalizedTranscript::default();
    let mut sequence = 0u32;

    for section in &sections {
        let trimmed = section.trim();
        if trimmed.is_empty() {
            continue;
        }
        let speaker = classify_section(trimmed);
        let content = SECTION_HEADER_RE.replace(trimmed, "").trim().to_string();
        if content.is_empty() {
            continue;
        }
        out.utterances.push(Utterance {
            sequence,
            speaker,
            content,
        });
        sequence += 1;
    }

    out
}

/// Normalize role-prefixed entries from a deferred payload
/// (`LEFTIST OPENING:\n...`). Judge entries stay in the sequence.
pub fn normalize_prefixed(entries: &[String]) -> NormalizedTranscript {
    let mut out = NormalizedTranscript::default();
    let mut sequence = 0u32;

    for entry in entries {
        let trimmed = entry.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (speaker, content) = split_role_prefix(trimmed);
        if content.is_empty() {
            continue;
        }
        out.utterances.push(Utterance {
            sequence,
            speaker,
            content,
        });
        sequence += 1;
    }

    out
}

/// Split a `ROLE ...:` prefix off an entry, choosing the speaker from the
/// prefix. Entries without a recognizable prefix are attributed to the
/// system with their full text.
fn split_role_prefix(entry: &str) -> (Speaker, String) {
    let first_line_end = entry.find('\n').unwrap_or(entry.len());
    let first_line = &entry[..first_line_end];

    if let Some(colon) = first_line.find(':') {
        let prefix = first_line[..colon].to_lowercase();
        let speaker = if prefix.contains("leftist") {
            Some(Speaker::Leftist)
        } else if prefix.contains("rightist") {
            Some(Speaker::Rightist)
        } else if prefix.contains("judge") || prefix.contains("final verdict") {
            Some(Speaker::Judge)
        } else {
            None
        };
        if let Some(speaker) = speaker {
            let content = entry[colon + 1..].trim().to_string();
            return (speaker, content);
        }
    }

    (Speaker::System, entry.to_string())
}
