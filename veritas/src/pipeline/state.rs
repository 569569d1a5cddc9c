//! Pipeline state — nine stages, a monotonic progress value, and the run
//! lock.
//!
//! Stage flow invariants enforced here:
//! - at most one stage is `Processing` at a time;
//! - a stage reaches `Completed`/`Error` only from `Processing`;
//! - ordinals are visited in increasing order, never skipped, never
//!   revisited within a run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::progress::{Progress, CHECKPOINT_FINAL};
use super::stage::{Stage, StageId, StageState, STAGE_COUNT};

/// Invalid stage flow operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageFlowError {
    #[error("stage {stage} begun out of order (expected ordinal {expected})")]
    OutOfOrder { stage: StageId, expected: u8 },

    #[error("stage {stage} cannot begin while {processing} is processing")]
    AlreadyProcessing { stage: StageId, processing: StageId },

    #[error("stage {stage} is not processing")]
    NotProcessing { stage: StageId },
}

/// The live pipeline for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    stages: Vec<Stage>,
    progress: Progress,
    running: bool,
    /// Highest ordinal that has begun this run.
    highest_started: u8,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Fresh pipeline: all stages waiting, progress 0, not running.
    pub fn new() -> Self {
        Self {
            stages: StageId::ALL.iter().map(|id| Stage::waiting(*id)).collect(),
            progress: Progress::default(),
            running: false,
            highest_started: 0,
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stage(&self, id: StageId) -> &Stage {
        &self.stages[id.ordinal() as usize - 1]
    }

    pub fn progress(&self) -> u8 {
        self.progress.value()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub(crate) fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Reset to the initial state for a new run (or a cancel).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whether every stage has finished, successfully or not.
    pub fn all_terminal(&self) -> bool {
        self.stages.len() == STAGE_COUNT && self.stages.iter().all(|s| s.state.is_terminal())
    }

    /// Run termination: stage 9 completed and nothing left unset.
    pub fn is_terminal(&self) -> bool {
        self.stage(StageId::Verdict).state.is_terminal() && self.all_terminal()
    }

    /// Advance progress; lower values are ignored.
    pub fn advance_progress(&mut self, value: u8) {
        self.progress.advance_to(value);
    }

    /// Put a stage into `Processing`.
    pub fn begin_stage(
        &mut self,
        id: StageId,
        message: impl Into<String>,
    ) -> Result<(), StageFlowError> {
        if let Some(processing) = self
            .stages
            .iter()
            .find(|s| s.state == StageState::Processing)
        {
            return Err(StageFlowError::AlreadyProcessing {
                stage: id,
                processing: processing.id,
            });
        }
        let expected = self.highest_started + 1;
        if id.ordinal() != expected {
            return Err(StageFlowError::OutOfOrder {
                stage: id,
                expected,
            });
        }

        self.highest_started = id.ordinal();
        let stage = &mut self.stages[id.ordinal() as usize - 1];
        stage.state = StageState::Processing;
        stage.message = message.into();
        Ok(())
    }

    /// Finish a processing stage as `Completed`.
    pub fn complete_stage(
        &mut self,
        id: StageId,
        message: impl Into<String>,
    ) -> Result<(), StageFlowError> {
        self.finish_stage(id, StageState::Completed, message.into())
    }

    /// Finish a processing stage as `Error` (non-fatal).
    pub fn fail_stage(
        &mut self,
        id: StageId,
        message: impl Into<String>,
    ) -> Result<(), StageFlowError> {
        self.finish_stage(id, StageState::Error, message.into())
    }

    fn finish_stage(
        &mut self,
        id: StageId,
        state: StageState,
        message: String,
    ) -> Result<(), StageFlowError> {
        let stage = &mut self.stages[id.ordinal() as usize - 1];
        if stage.state != StageState::Processing {
            return Err(StageFlowError::NotProcessing { stage: id });
        }
        stage.state = state;
        stage.message = message;
        Ok(())
    }

    /// Mark the run finished once the final checkpoint is reached.
    pub(crate) fn finish_run(&mut self) {
        debug_assert!(self.progress.value() == CHECKPOINT_FINAL || !self.is_terminal());
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pipeline_initial_state() {
        let pipeline = Pipeline::new();
        assert_eq!(pipeline.stages().len(), STAGE_COUNT);
        assert!(pipeline
            .stages()
            .iter()
            .all(|s| s.state == StageState::Waiting));
        assert_eq!(pipeline.progress(), 0);
        assert!(!pipeline.is_running());
    }

    #[test]
    fn test_stage_lifecycle_in_order() {
        let mut pipeline = Pipeline::new();
        pipeline.begin_stage(StageId::DataInput, "submitting").unwrap();
        assert_eq!(
            pipeline.stage(StageId::DataInput).state,
            StageState::Processing
        );
        pipeline.complete_stage(StageId::DataInput, "sent").unwrap();
        assert_eq!(
            pipeline.stage(StageId::DataInput).state,
            StageState::Completed
        );
        assert_eq!(pipeline.stage(StageId::DataInput).message, "sent");

        pipeline
            .begin_stage(StageId::QueryEnhancement, "enhancing")
            .unwrap();
        pipeline
            .fail_stage(StageId::QueryEnhancement, "went wrong")
            .unwrap();
        assert_eq!(
            pipeline.stage(StageId::QueryEnhancement).state,
            StageState::Error
        );
    }

    #[test]
    fn test_begin_out_of_order_rejected() {
        let mut pipeline = Pipeline::new();
        let err = pipeline.begin_stage(StageId::Search, "skip ahead").unwrap_err();
        assert_eq!(
            err,
            StageFlowError::OutOfOrder {
                stage: StageId::Search,
                expected: 1
            }
        );
    }

    #[test]
    fn test_no_stage_revisited() {
        let mut pipeline = Pipeline::new();
        pipeline.begin_stage(StageId::DataInput, "go").unwrap();
        pipeline.complete_stage(StageId::DataInput, "done").unwrap();
        let err = pipeline.begin_stage(StageId::DataInput, "again").unwrap_err();
        assert!(matches!(err, StageFlowError::OutOfOrder { .. }));
    }

    #[test]
    fn test_single_processing_stage() {
        let mut pipeline = Pipeline::new();
        pipeline.begin_stage(StageId::DataInput, "go").unwrap();
        let err = pipeline
            .begin_stage(StageId::QueryEnhancement, "too soon")
            .unwrap_err();
        assert!(matches!(err, StageFlowError::AlreadyProcessing { .. }));
    }

    #[test]
    fn test_error_stage_does_not_block_successor() {
        let mut pipeline = Pipeline::new();
        pipeline.begin_stage(StageId::DataInput, "go").unwrap();
        pipeline.fail_stage(StageId::DataInput, "offline").unwrap();
        pipeline
            .begin_stage(StageId::QueryEnhancement, "continue")
            .unwrap();
        assert_eq!(
            pipeline.stage(StageId::QueryEnhancement).state,
            StageState::Processing
        );
    }

    #[test]
    fn test_complete_without_processing_rejected() {
        let mut pipeline = Pipeline::new();
        let err = pipeline
            .complete_stage(StageId::DataInput, "never started")
            .unwrap_err();
        assert_eq!(
            err,
            StageFlowError::NotProcessing {
                stage: StageId::DataInput
            }
        );
    }

    #[test]
    fn test_full_run_reaches_terminal() {
        let mut pipeline = Pipeline::new();
        pipeline.set_running(true);
        for id in StageId::ALL {
            pipeline.begin_stage(id, "go").unwrap();
            pipeline.complete_stage(id, "done").unwrap();
        }
        pipeline.advance_progress(100);
        assert!(pipeline.is_terminal());
        pipeline.finish_run();
        assert!(!pipeline.is_running());
    }

    #[test]
    fn test_reset_returns_to_initial() {
        let mut pipeline = Pipeline::new();
        pipeline.set_running(true);
        pipeline.begin_stage(StageId::DataInput, "go").unwrap();
        pipeline.advance_progress(44);
        pipeline.reset();
        assert!(!pipeline.is_running());
        assert_eq!(pipeline.progress(), 0);
        assert_eq!(pipeline.stage(StageId::DataInput).state, StageState::Waiting);
    }
}
