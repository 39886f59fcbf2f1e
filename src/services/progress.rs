//! Goal progress calculator
//!
//! Presentational only: the contribution validator makes its own funded
//! check instead of reading `reached`.

use crate::models::{Goal, Money};

/// Percent complete, clamped to `[0, 100]`, and whether the target is met
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalProgress {
    pub percent: f64,
    pub reached: bool,
}

/// Progress of `current_saved` toward `target_amount`
///
/// Targets of zero or less are rejected when a goal is created or edited;
/// should one arrive anyway the percent reads as zero.
pub fn goal_progress(current_saved: Money, target_amount: Money) -> GoalProgress {
    let percent = current_saved
        .percent_of(target_amount)
        .map(|p| p.clamp(0.0, 100.0))
        .unwrap_or(0.0);

    GoalProgress {
        percent,
        reached: current_saved >= target_amount,
    }
}

impl Goal {
    pub fn progress(&self) -> GoalProgress {
        goal_progress(self.current_saved, self.target_amount)
    }
}
