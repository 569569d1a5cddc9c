//! The orchestrator — drives one nine-stage run end to end.
//!
//! # Run flow
//!
//! ```text
//! start(input)
//!   ├─ validate topic ──────────────→ ValidationError (nothing touched)
//!   ├─ running? ────────────────────→ AlreadyRunningError (nothing touched)
//!   ├─ stage 1: submit to service
//!   │     ├─ ok ──→ stages 2–7 paced remotely ──→ fetch results
//!   │     └─ err ─→ stage 1 Error, stages 2–7 simulated ─→ fallback results
//!   ├─ stage 8: debate (collaborator or scripted), timed reveal
//!   └─ stage 9: verdict, progress 100, running = false
//! ```
//!
//! The same transitions, checkpoints, and fallback content apply whether
//! the service is present, absent, or partially responsive. Every mutation
//! after a suspension point presents the run token; stale completions are
//! discarded.

use std::sync::Arc;

use thiserror::Error;
use tokio::time::sleep;

use super::progress::{
    stage_entry_progress, CHECKPOINT_DEBATE_COMPLETE, CHECKPOINT_FINAL,
    CHECKPOINT_RESULTS_LOADED, CHECKPOINT_RESULTS_PROCESSED,
};
use super::simulation::{
    completed_message, jittered_pacing, processing_message, simulated_duration,
};
use super::stage::StageId;
use super::state::StageFlowError;
use crate::config::EngineConfig;
use crate::context::{AnalysisContext, RunToken, SharedContext};
use crate::debate::{run_debate, scripted_outcome, Speaker, UtteranceFeed, Verdict};
use crate::results::{sample, ResultSet, ResultSummary};
use crate::service::{self, AnalysisInput, AnalysisService};

/// Error from starting or driving a run.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Input rejected before any state mutation.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// A run is active; the in-progress pipeline is left untouched.
    #[error("an analysis run is already in progress")]
    AlreadyRunning,

    /// The context was cleared or restarted under this run; its remaining
    /// work was discarded as stale.
    #[error("run superseded by clear or restart")]
    Superseded,

    /// Stage bookkeeping violation.
    #[error(transparent)]
    StageFlow(#[from] StageFlowError),
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

/// Caller-facing summary of a finished run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub token: RunToken,
    /// Whether any fallback path (simulated stages, fallback results, or
    /// scripted debate) served part of the run.
    pub degraded: bool,
    pub summary: ResultSummary,
    pub verdict: Verdict,
}

/// Drives the pipeline, results, debate, and verdict for a context.
pub struct Orchestrator {
    service: Arc<dyn AnalysisService>,
    config: EngineConfig,
    ctx: SharedContext,
}

impl Orchestrator {
    pub fn new(service: Arc<dyn AnalysisService>, config: EngineConfig, ctx: SharedContext) -> Self {
        Self {
            service,
            config,
            ctx,
        }
    }

    /// Handle for display-layer reads.
    pub fn context(&self) -> SharedContext {
        Arc::clone(&self.ctx)
    }

    /// Coarse cancel: discard session and pipeline state. A run in flight
    /// sees its remaining completions discarded as stale.
    pub async fn clear_session(&self) {
        let mut ctx = self.ctx.lock().await;
        ctx.clear();
    }

    /// Run one full analysis, stage 1 through stage 9.
    pub async fn start(&self, input: AnalysisInput) -> OrchestratorResult<RunReport> {
        if input.topic.trim().is_empty() {
            return Err(OrchestratorError::Validation {
                message: "topic must not be empty".to_string(),
            });
        }

        let run = {
            let mut ctx = self.ctx.lock().await;
            if ctx.pipeline.is_running() {
                return Err(OrchestratorError::AlreadyRunning);
            }
            let run = ctx.begin_run();
            ctx.log.info("Starting information trust analysis...");
            ctx.log.info(format!("Topic: {}", input.topic));
            ctx.pipeline
                .begin_stage(StageId::DataInput, "Sending data to analysis system...")?;
            run
        };

        sleep(self.config.timing.submit_delay).await;

        let remote = match self.service.submit_analysis(&input).await {
            Ok(()) => {
                self.guarded(run, |ctx| {
                    ctx.pipeline
                        .complete_stage(StageId::DataInput, "Data sent successfully")?;
                    ctx.log.success("Analysis request sent to analysis service");
                    Ok(())
                })
                .await?;
                true
            }
            Err(err) => {
                service::log_failure("analysis submission", &err);
                self.guarded(run, |ctx| {
                    ctx.pipeline
                        .fail_stage(StageId::DataInput, "Failed to start analysis")?;
                    ctx.log.error(format!("Error: {}", err));
                    ctx.log.info("Simulating analysis process locally...");
                    Ok(())
                })
                .await?;
                false
            }
        };

        self.advance_analysis_stages(run, remote).await?;

        let (results, results_degraded) = self.load_results(remote).await;
        let summary = results.summary();
        self.guarded(run, |ctx| {
            ctx.set_results(results);
            ctx.pipeline.advance_progress(CHECKPOINT_RESULTS_LOADED);
            if results_degraded {
                ctx.log.success("Analysis complete! Fallback results loaded.");
            } else {
                ctx.log.success("Analysis complete! Results processed.");
            }
            ctx.log
                .info(format!("Displaying {} analysis results", summary.total));
            Ok(())
        })
        .await?;

        let (verdict, scripted) = self
            .run_debate_stages(run, remote && !results_degraded)
            .await?;

        Ok(RunReport {
            token: run,
            degraded: !remote || results_degraded || scripted,
            summary,
            verdict,
        })
    }

    /// Stages 2–7: identical transitions and messages on both paths; only
    /// the pacing source differs.
    async fn advance_analysis_stages(&self, run: RunToken, remote: bool) -> OrchestratorResult<()> {
        for ordinal in 2..=7u8 {
            let stage = StageId::ALL[(ordinal - 1) as usize];

            self.guarded(run, |ctx| {
                ctx.pipeline.begin_stage(stage, processing_message(stage))?;
                ctx.pipeline.advance_progress(stage_entry_progress(ordinal));
                Ok(())
            })
            .await?;

            let delay = if remote {
                jittered_pacing(
                    self.config.timing.remote_stage_base,
                    self.config.timing.remote_stage_jitter,
                )
            } else {
                simulated_duration(stage).mul_f64(self.config.timing.simulation_scale)
            };
            sleep(delay).await;

            self.guarded(run, |ctx| {
                ctx.pipeline.complete_stage(stage, completed_message(stage))?;
                ctx.log
                    .success(format!("Step {}: {} completed", ordinal, stage.title()));
                if ordinal == 7 {
                    ctx.pipeline.advance_progress(CHECKPOINT_RESULTS_PROCESSED);
                }
                Ok(())
            })
            .await?;
        }
        Ok(())
    }

    /// Load the result set, falling back to the fixed sample rows when the
    /// run is simulated or the fetch fails.
    async fn load_results(&self, remote: bool) -> (ResultSet, bool) {
        if !remote {
            return (sample::fallback_results(), true);
        }
        match self.service.fetch_results().await {
            Ok(rows) => (ResultSet::new(rows), false),
            Err(err) => {
                service::log_failure("results fetch", &err);
                (sample::fallback_results(), true)
            }
        }
    }

    /// Stages 8–9: debate with timed utterance reveal, then the verdict.
    /// Returns the verdict and whether the scripted fallback served it.
    async fn run_debate_stages(
        &self,
        run: RunToken,
        use_service: bool,
    ) -> OrchestratorResult<(Verdict, bool)> {
        self.guarded(run, |ctx| {
            ctx.pipeline
                .begin_stage(StageId::Debate, "AI agents preparing arguments...")?;
            ctx.log.info("Initiating AI debate...");
            Ok(())
        })
        .await?;

        // A pipeline that already degraded finishes locally; only an
        // intact remote run consults the debate collaborator.
        let outcome = if use_service {
            run_debate(self.service.as_ref(), &self.config.debate).await
        } else {
            scripted_outcome(&self.config.debate)
        };

        let mut feed = UtteranceFeed::new(outcome.utterances);
        while let Some(utterance) = feed.next_utterance() {
            sleep(self.config.timing.reveal_interval).await;
            self.guarded(run, |ctx| {
                ctx.log
                    .info(format!("{} presented argument", agent_label(utterance.speaker)));
                ctx.session_mut().reveal(utterance);
                Ok(())
            })
            .await?;
        }

        self.guarded(run, |ctx| {
            ctx.pipeline
                .complete_stage(StageId::Debate, "AI debate completed")?;
            ctx.pipeline.advance_progress(CHECKPOINT_DEBATE_COMPLETE);
            Ok(())
        })
        .await?;

        sleep(self.config.timing.pre_verdict_delay).await;
        self.guarded(run, |ctx| {
            ctx.pipeline
                .begin_stage(StageId::Verdict, "Judge AI analyzing debate...")?;
            Ok(())
        })
        .await?;
        sleep(self.config.timing.verdict_delay).await;

        let verdict = outcome.verdict;
        self.guarded(run, |ctx| {
            ctx.session_mut().set_verdict(verdict.clone());
            ctx.pipeline
                .complete_stage(StageId::Verdict, "Final verdict delivered")?;
            ctx.pipeline.advance_progress(CHECKPOINT_FINAL);
            ctx.pipeline.finish_run();
            ctx.log
                .success(format!("Final trust score: {}%", verdict.trust_score_percent));
            Ok(())
        })
        .await?;

        Ok((verdict, outcome.degraded))
    }

    /// Apply a mutation if `run` still owns the context; otherwise discard
    /// it as stale.
    async fn guarded<R>(
        &self,
        run: RunToken,
        mutate: impl FnOnce(&mut AnalysisContext) -> Result<R, StageFlowError>,
    ) -> OrchestratorResult<R> {
        let mut ctx = self.ctx.lock().await;
        if !ctx.is_current(run) {
            tracing::debug!(%run, "stale completion discarded");
            return Err(OrchestratorError::Superseded);
        }
        Ok(mutate(&mut ctx)?)
    }
}

fn agent_label(speaker: Speaker) -> &'static str {
    match speaker {
        Speaker::Leftist => "Leftist Agent",
        Speaker::Rightist => "Rightist Agent",
        Speaker::Judge => "Judge",
        Speaker::System => "System",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::shared_context;
    use crate::service::{
        DebateResponse, DeferredDebatePayload, ServiceError,
    };
    use async_trait::async_trait;

    /// Service that refuses everything, forcing the full fallback path.
    struct OfflineService;

    #[async_trait]
    impl AnalysisService for OfflineService {
        async fn submit_analysis(&self, _input: &AnalysisInput) -> Result<(), ServiceError> {
            Err(ServiceError::Network("connection refused".to_string()))
        }

        async fn fetch_results(&self) -> Result<Vec<crate::results::AnalysisResult>, ServiceError> {
            Err(ServiceError::Network("connection refused".to_string()))
        }

        async fn run_debate(&self) -> Result<DebateResponse, ServiceError> {
            Err(ServiceError::Network("connection refused".to_string()))
        }

        async fn fetch_deferred_debate(
            &self,
            _token: &str,
        ) -> Result<DeferredDebatePayload, ServiceError> {
            Err(ServiceError::Network("connection refused".to_string()))
        }
    }

    fn instant_orchestrator() -> Orchestrator {
        let mut config = EngineConfig::default();
        config.timing = crate::config::TimingConfig::instant();
        Orchestrator::new(Arc::new(OfflineService), config, shared_context())
    }

    #[tokio::test]
    async fn test_empty_topic_rejected_before_mutation() {
        let orch = instant_orchestrator();
        let err = orch
            .start(AnalysisInput::new("   ", "context", 0.8))
            .await
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::Validation { .. }));

        let ctx = orch.context();
        let ctx = ctx.lock().await;
        assert!(!ctx.pipeline.is_running());
        assert_eq!(ctx.pipeline.progress(), 0);
        assert!(ctx.log.entries().is_empty());
    }

    #[tokio::test]
    async fn test_offline_run_completes_degraded() {
        let orch = instant_orchestrator();
        let report = orch
            .start(AnalysisInput::new("Some topic", "context", 0.9))
            .await
            .unwrap();
        assert!(report.degraded);
        assert_eq!(report.summary.total, 4);
        assert_eq!(report.verdict.trust_score_percent, 55);

        let ctx = orch.context();
        let ctx = ctx.lock().await;
        assert!(!ctx.pipeline.is_running());
        assert_eq!(ctx.pipeline.progress(), 100);
        assert!(ctx.pipeline.is_terminal());
    }

    #[test]
    fn test_agent_labels() {
        assert_eq!(agent_label(Speaker::Leftist), "Leftist Agent");
        assert_eq!(agent_label(Speaker::Judge), "Judge");
    }
}
