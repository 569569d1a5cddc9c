//! Local simulation of the analysis stages.
//!
//! When the service is unreachable the run must look the same: identical
//! transitions, identical messages, fixed per-stage durations. The remote
//! path shares the message set and uses jittered pacing instead of the
//! fixed table.

use std::time::Duration;

use super::stage::StageId;

/// Fixed simulated durations for stages 2–7, in milliseconds.
const SIMULATED_STAGE_MILLIS: [(StageId, u64); 6] = [
    (StageId::QueryEnhancement, 2000),
    (StageId::Search, 3000),
    (StageId::ContentExtraction, 4000),
    (StageId::RelevanceAnalysis, 3000),
    (StageId::TrustEvaluation, 2000),
    (StageId::ResultsProcessing, 1500),
];

/// Simulated duration for a stage; zero for stages driven elsewhere.
pub fn simulated_duration(stage: StageId) -> Duration {
    SIMULATED_STAGE_MILLIS
        .iter()
        .find(|(id, _)| *id == stage)
        .map(|(_, millis)| Duration::from_millis(*millis))
        .unwrap_or(Duration::ZERO)
}

/// Jittered pacing delay for remote-driven stage advancement.
pub fn jittered_pacing(base: Duration, jitter: Duration) -> Duration {
    base + jitter.mul_f64(fastrand::f64())
}

/// Status message while a stage is running.
pub fn processing_message(stage: StageId) -> String {
    format!("{} in progress...", stage.title())
}

/// Status message once a stage has completed.
pub fn completed_message(stage: StageId) -> String {
    format!("{} completed", stage.title())
}
