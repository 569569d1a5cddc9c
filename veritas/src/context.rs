//! Explicit run context — the single mutable home of orchestration state.
//!
//! One `AnalysisContext` owns the pipeline, the current result set, the
//! debate session, and the activity log. It is created by the caller and
//! passed to the orchestrator; there are no process-wide singletons. Only
//! the orchestrator mutates it; the display layer takes read snapshots.
//!
//! Every run carries a [`RunToken`]. Mutations re-check the token after
//! each suspension point, so a completion that lands after `clear()` or a
//! restart is discarded instead of mutating state it no longer owns.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::debate::DebateSession;
use crate::events::RunLog;
use crate::pipeline::Pipeline;
use crate::results::ResultSet;

/// Identifier tying mutations to the run that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunToken(Uuid);

impl RunToken {
    fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RunToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// All mutable state for one operator-visible analysis run.
#[derive(Debug)]
pub struct AnalysisContext {
    token: RunToken,
    pub pipeline: Pipeline,
    results: ResultSet,
    session: DebateSession,
    pub log: RunLog,
}

impl Default for AnalysisContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisContext {
    pub fn new() -> Self {
        let token = RunToken::fresh();
        Self {
            token,
            pipeline: Pipeline::new(),
            results: ResultSet::default(),
            session: DebateSession::new(token.to_string()),
            log: RunLog::new(),
        }
    }

    /// Token of the run currently owning this context.
    pub fn token(&self) -> RunToken {
        self.token
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn session(&self) -> &DebateSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut DebateSession {
        &mut self.session
    }

    /// Replace the result set wholesale.
    pub fn set_results(&mut self, results: ResultSet) {
        self.results = results;
    }

    /// Start a new run: rotate the token and reset pipeline, session, and
    /// log. Returns the token the run must present on every mutation.
    pub(crate) fn begin_run(&mut self) -> RunToken {
        self.token = RunToken::fresh();
        self.pipeline.reset();
        self.pipeline.set_running(true);
        self.session = DebateSession::new(self.token.to_string());
        self.log.clear();
        self.token
    }

    /// Coarse cancel: discard session and pipeline state and rotate the
    /// token so in-flight completions of the old run become stale.
    pub fn clear(&mut self) {
        self.token = RunToken::fresh();
        self.session.clear();
        self.pipeline.reset();
        self.log.info("Debate cleared");
    }

    /// Whether `token` still owns this context.
    pub fn is_current(&self, token: RunToken) -> bool {
        self.token == token
    }
}

/// Shared handle the orchestrator and display layer both hold.
pub type SharedContext = Arc<Mutex<AnalysisContext>>;

/// Fresh shared context.
pub fn shared_context() -> SharedContext {
    Arc::new(Mutex::new(AnalysisContext::new()))
}
