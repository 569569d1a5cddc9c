//! Engine configuration.

use std::time::Duration;

use crate::debate::DebateConfig;

/// Pacing for visible progress and utterance reveal.
///
/// All waits route through these values so tests can run a whole pipeline
/// instantly with [`TimingConfig::instant`].
#[derive(Debug, Clone)]
pub struct TimingConfig {
    /// Pause before the stage-1 submission goes out.
    pub submit_delay: Duration,
    /// Base pacing between remote-driven stages.
    pub remote_stage_base: Duration,
    /// Additional jitter on top of the base pacing.
    pub remote_stage_jitter: Duration,
    /// Gap between revealed utterances.
    pub reveal_interval: Duration,
    /// Pause between the debate completing and the judge starting.
    pub pre_verdict_delay: Duration,
    /// Judge deliberation pause before the verdict lands.
    pub verdict_delay: Duration,
    /// Multiplier over the fixed simulated stage durations.
    pub simulation_scale: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            submit_delay: Duration::from_millis(1000),
            remote_stage_base: Duration::from_millis(2000),
            remote_stage_jitter: Duration::from_millis(3000),
            reveal_interval: Duration::from_millis(1500),
            pre_verdict_delay: Duration::from_millis(2000),
            verdict_delay: Duration::from_millis(3000),
            simulation_scale: 1.0,
        }
    }
}

impl TimingConfig {
    /// Zero every wait. Transitions and checkpoints are unaffected.
    pub fn instant() -> Self {
        Self {
            submit_delay: Duration::ZERO,
            remote_stage_base: Duration::ZERO,
            remote_stage_jitter: Duration::ZERO,
            reveal_interval: Duration::ZERO,
            pre_verdict_delay: Duration::ZERO,
            verdict_delay: Duration::ZERO,
            simulation_scale: 0.0,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub timing: TimingConfig,
    pub debate: DebateConfig,
}
