//! Goal contribution validator
//!
//! Decides whether a deposit into a goal may go to the store. The checks run
//! in a fixed order against the goal as currently loaded:
//!
//! 1. the amount must be a positive, finite number (`InvalidAmount`)
//! 2. the goal must not already be funded (`GoalAlreadyFunded`)
//! 3. the amount must not exceed what remains (`ExceedsRemaining`)
//!
//! Amounts are never clamped to the remainder; the user resubmits. A deadline
//! advisory is computed for accepted contributions but never changes the
//! outcome.

use chrono::NaiveDate;

use super::status::{deadline_advisory, DeadlineAdvisory};
use crate::config::Thresholds;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Goal, GoalId, GoalStatus, Money};

/// A contribution that passed validation and may be sent to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionApproval {
    pub goal_id: GoalId,
    pub amount: Money,
    pub advisory: DeadlineAdvisory,
}

/// What the session reports after the store accepted a contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionReceipt {
    pub goal_id: GoalId,
    pub amount: Money,
    pub advisory: DeadlineAdvisory,
    pub status: GoalStatus,
}

/// Validate a contribution with the default imminent window
pub fn validate_contribution(
    goal: &Goal,
    amount: f64,
    today: NaiveDate,
) -> TrackerResult<ContributionApproval> {
    validate_contribution_with(goal, amount, today, &Thresholds::default())
}

/// Validate a contribution against the goal's current amounts
///
/// The funded check reads `current_saved` and `target_amount` directly; the
/// goal's status label is not consulted.
pub fn validate_contribution_with(
    goal: &Goal,
    amount: f64,
    today: NaiveDate,
    thresholds: &Thresholds,
) -> TrackerResult<ContributionApproval> {
    if !(amount.is_finite() && amount > 0.0) {
        return Err(TrackerError::InvalidAmount);
    }
    let amount = match Money::from_decimal(amount) {
        Some(m) if m.is_positive() => m,
        _ => return Err(TrackerError::InvalidAmount),
    };

    if goal.current_saved >= goal.target_amount {
        return Err(TrackerError::GoalAlreadyFunded);
    }

    let remaining = goal.target_amount - goal.current_saved;
    if amount > remaining {
        return Err(TrackerError::ExceedsRemaining {
            excess: amount - remaining,
            remaining,
        });
    }

    Ok(ContributionApproval {
        goal_id: goal.id,
        amount,
        advisory: deadline_advisory(goal.deadline, today, thresholds),
    })
}

/// The pending "add funds" entry: which goal, and the amount as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionDraft {
    pub goal_id: Option<GoalId>,
    pub amount_input: String,
}

impl ContributionDraft {
    /// Start a contribution to `goal`
    ///
    /// Completed goals have no entry point, so opening one is refused.
    pub fn open(&mut self, goal: &Goal) -> TrackerResult<()> {
        if !goal.can_accept_contributions() {
            return Err(TrackerError::GoalAlreadyFunded);
        }
        if self.goal_id != Some(goal.id) {
            self.amount_input.clear();
        }
        self.goal_id = Some(goal.id);
        Ok(())
    }

    pub fn set_amount(&mut self, input: impl Into<String>) {
        self.amount_input = input.into();
    }

    pub fn is_open(&self) -> bool {
        self.goal_id.is_some()
    }

    /// The typed amount as a number; unparseable text is `InvalidAmount`
    pub fn amount(&self) -> TrackerResult<f64> {
        self.amount_input
            .trim()
            .parse::<f64>()
            .map_err(|_| TrackerError::InvalidAmount)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
