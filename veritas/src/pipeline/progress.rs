//! Progress schedule — fixed checkpoints, never a pure linear function.
//!
//! Stages 2–7 take `round((ordinal - 1) / 9 * 100)` when they begin; the
//! remainder of the run snaps to fixed checkpoints. Progress within a run
//! only moves forward.

use serde::{Deserialize, Serialize};

/// After stage 7 (results processing) completes.
pub const CHECKPOINT_RESULTS_PROCESSED: u8 = 77;
/// After the result set is loaded.
pub const CHECKPOINT_RESULTS_LOADED: u8 = 85;
/// After the debate stage completes.
pub const CHECKPOINT_DEBATE_COMPLETE: u8 = 90;
/// After the verdict stage completes.
pub const CHECKPOINT_FINAL: u8 = 100;

/// Progress a stage ordinal maps to when the stage begins (stages 2–7).
pub fn stage_entry_progress(ordinal: u8) -> u8 {
    ((f64::from(ordinal) - 1.0) / 9.0 * 100.0).round() as u8
}

/// Monotonic progress value for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress(u8);

impl Progress {
    pub fn value(self) -> u8 {
        self.0
    }

    /// Advance to `target`; values below the current reading are ignored so
    /// progress never decreases within a run.
    pub fn advance_to(&mut self, target: u8) {
        self.0 = self.0.max(target.min(CHECKPOINT_FINAL));
    }

    /// Reset for a new run.
    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_entry_values() {
        assert_eq!(stage_entry_progress(2), 11);
        assert_eq!(stage_entry_progress(3), 22);
        assert_eq!(stage_entry_progress(4), 33);
        assert_eq!(stage_entry_progress(5), 44);
        assert_eq!(stage_entry_progress(6), 56);
        assert_eq!(stage_entry_progress(7), 67);
    }

    #[test]
    fn test_checkpoints_ascend() {
        let mut last = stage_entry_progress(7);
        for checkpoint in [
            CHECKPOINT_RESULTS_PROCESSED,
            CHECKPOINT_RESULTS_LOADED,
            CHECKPOINT_DEBATE_COMPLETE,
            CHECKPOINT_FINAL,
        ] {
            assert!(checkpoint > last);
            last = checkpoint;
        }
    }

    #[test]
    fn test_progress_is_monotonic() {
        let mut progress = Progress::default();
        progress.advance_to(44);
        progress.advance_to(11);
        assert_eq!(progress.value(), 44);
        progress.advance_to(77);
        assert_eq!(progress.value(), 77);
    }

    #[test]
    fn test_progress_caps_at_final() {
        let mut progress = Progress::default();
        progress.advance_to(250);
        assert_eq!(progress.value(), CHECKPOINT_FINAL);
    }

    #[test]
    fn test_reset() {
        let mut progress = Progress::default();
        progress.advance_to(90);
        progress.reset();
        assert_eq!(progress.value(), 0);
    }
}
