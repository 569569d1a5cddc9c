//! Analysis pipeline — nine stages, checkpointed progress, and the
//! orchestrator that drives them with or without the remote service.

pub mod controller;
pub mod progress;
pub mod simulation;
pub mod stage;
pub mod state;

pub use controller::{Orchestrator, OrchestratorError, OrchestratorResult, RunReport};
pub use progress::{
    stage_entry_progress, Progress, CHECKPOINT_DEBATE_COMPLETE, CHECKPOINT_FINAL,
    CHECKPOINT_RESULTS_LOADED, CHECKPOINT_RESULTS_PROCESSED,
};
pub use stage::{Stage, StageId, StageState, STAGE_COUNT};
pub use state::{Pipeline, StageFlowError};
