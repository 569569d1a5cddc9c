//! Scripted local debate — the fallback when the collaborator is down.
//!
//! The script is fixed so a degraded run reveals the same transcript every
//! time. Arguments reference the fallback result set (encyclopedia entry at
//! trust 0.75, social media at 0.32) so the transcript stays coherent with
//! the data a degraded run displays.

use serde::{Deserialize, Serialize};

use super::transcript::{Speaker, Utterance};

/// Which canned script a fallback debate uses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DebateScriptConfig {
    /// Use the seven-utterance extended exchange instead of the four-part
    /// opening/rebuttal script.
    pub extended: bool,
    /// Append the judge's closing line to the sequence.
    pub closing_judge: bool,
}

impl Default for DebateScriptConfig {
    fn default() -> Self {
        Self {
            extended: false,
            closing_judge: false,
        }
    }
}

const OPENING_EXCHANGE: [(Speaker, &str); 4] = [
    (
        Speaker::Leftist,
        "The core reporting appears credible based on the encyclopedia entry \
         (trust score 0.75), but we cannot ignore the systemic issues the wider \
         coverage points to. The low-trust social posts still gesture at real \
         societal problems that deserve attention.",
    ),
    (
        Speaker::Rightist,
        "The established facts are trustworthy precisely because they rest on \
         established sources. We should weigh the encyclopedia entry over \
         speculative claims, and resist building narratives on social media \
         posts scoring 0.32 on trust.",
    ),
    (
        Speaker::Leftist,
        "Dismissing the broader pattern is not rigor. A low trust score on one \
         post does not invalidate concerns corroborated by mid-trust news \
         coverage; we can acknowledge those concerns without endorsing every \
         claim attached to them.",
    ),
    (
        Speaker::Rightist,
        "Speculation without evidence stays speculation. The verifiable record \
         comes from credible sources; everything beyond it needs verification \
         before it informs any conclusion, however sympathetic the framing.",
    ),
];

const EXTENDED_EXCHANGE: [(Speaker, &str); 3] = [
    (
        Speaker::Leftist,
        "Note that the mid-trust news analysis (0.68) independently corroborates \
         the pattern I raised. Two imperfect sources pointing the same way carry \
         more weight than either alone.",
    ),
    (
        Speaker::Rightist,
        "Corroboration between two outlets sharing an editorial lean is weaker \
         than it looks. The opinion commentary at 0.71 reads the same record and \
         reaches the opposite emphasis.",
    ),
    (
        Speaker::Leftist,
        "Then we agree on the record itself and differ on emphasis. That shared \
         factual core is exactly what the trust assessment should rest on.",
    ),
];

const JUDGE_CLOSING: &str =
    "Both sides ground their arguments in the same verified core while diverging \
     on the weight given to lower-trust material. The information merits a mixed \
     trust assessment pending further verification of the speculative elements.";

/// Produce the fixed scripted debate as a normalized utterance sequence.
pub fn scripted_debate(config: DebateScriptConfig) -> Vec<Utterance> {
    let mut lines: Vec<(Speaker, &str)> = OPENING_EXCHANGE.to_vec();
    if config.extended {
        lines.extend_from_slice(&EXTENDED_EXCHANGE);
    }
    if config.closing_judge {
        lines.push((Speaker::Judge, JUDGE_CLOSING));
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(i, (speaker, content))| Utterance {
            sequence: i as u32,
            speaker,
            content: content.to_string(),
        })
        .collect()
}
