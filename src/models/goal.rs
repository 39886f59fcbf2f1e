//! Savings goal model
//!
//! A goal tracks progress toward a target amount, optionally tied to a
//! category and a deadline. The `status` label comes from the store and is
//! for display only: whether a goal is funded is always re-derived from the
//! amounts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, GoalId};
use super::money::Money;

/// Display status of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GoalStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl GoalStatus {
    /// The label the store derives from the saved and target amounts
    pub fn derive(current_saved: Money, target_amount: Money) -> Self {
        if current_saved >= target_amount {
            Self::Completed
        } else if current_saved.is_positive() {
            Self::InProgress
        } else {
            Self::Pending
        }
    }

    /// Parse a free-form status label; unknown labels read as pending
    pub fn parse_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "completed" => Self::Completed,
            "in progress" => Self::InProgress,
            _ => Self::Pending,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A savings goal as returned by the goal store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub goal_name: String,
    pub target_amount: Money,
    #[serde(default)]
    pub current_saved: Money,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub notify_enabled: bool,
    #[serde(default)]
    pub status: GoalStatus,
}

impl Goal {
    /// Whether the saved amount has reached the target
    pub fn is_funded(&self) -> bool {
        self.current_saved >= self.target_amount
    }

    /// Amount still needed to reach the target (never negative)
    pub fn remaining(&self) -> Money {
        if self.is_funded() {
            Money::zero()
        } else {
            self.target_amount - self.current_saved
        }
    }

    /// Whether the "add funds" entry point should be offered
    ///
    /// Disabled when the amounts say the goal is funded or the store
    /// explicitly labels it completed.
    pub fn can_accept_contributions(&self) -> bool {
        !self.is_funded() && self.status != GoalStatus::Completed
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {}",
            self.goal_name, self.current_saved, self.target_amount
        )
    }
}

/// The writable fields of a goal, sent on create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalFields {
    pub goal_name: String,
    pub target_amount: Money,
    pub category_id: Option<CategoryId>,
    pub deadline: Option<NaiveDate>,
    pub notify_enabled: bool,
}

impl GoalFields {
    /// Validate fields for a new goal; a deadline is mandatory on create
    pub fn validate_new(&self) -> Result<(), GoalValidationError> {
        self.validate()?;
        if self.deadline.is_none() {
            return Err(GoalValidationError::MissingDeadline);
        }
        Ok(())
    }

    /// Validate fields for an edit; the deadline may be cleared
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.goal_name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }
        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget);
        }
        Ok(())
    }
}

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NonPositiveTarget,
    MissingDeadline,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "goal_name is required"),
            Self::NonPositiveTarget => write!(f, "target_amount must be > 0"),
            Self::MissingDeadline => write!(f, "deadline is required"),
        }
    }
}

impl std::error::Error for GoalValidationError {}
