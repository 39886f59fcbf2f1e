//! Status thresholds
//!
//! Pure classifiers for a budget's spend against its limit and for how close
//! a goal's deadline is. Both are re-derived on every render and never
//! cached, since the store may report new totals after any reload.

use chrono::NaiveDate;
use std::fmt;

use crate::config::Thresholds;
use crate::models::{Budget, Money};

/// Spend-vs-limit classification of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BudgetStatus {
    Ok,
    Warning,
    Danger,
}

impl BudgetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classification plus the display ratio, a percentage clamped to `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetStatusReport {
    pub status: BudgetStatus,
    pub ratio: f64,
}

/// Classify spend against a limit using the default 80% warning line
pub fn classify_budget(amount_limit: Money, spent_total: Money) -> BudgetStatusReport {
    classify_budget_with(amount_limit, spent_total, &Thresholds::default())
}

/// Classify spend against a limit
///
/// A limit of zero or less means no limit is set: the budget is `Ok` with a
/// ratio of zero whatever has been spent.
pub fn classify_budget_with(
    amount_limit: Money,
    spent_total: Money,
    thresholds: &Thresholds,
) -> BudgetStatusReport {
    let percent = match spent_total.percent_of(amount_limit) {
        Some(percent) => percent,
        None => {
            return BudgetStatusReport {
                status: BudgetStatus::Ok,
                ratio: 0.0,
            }
        }
    };

    let status = if spent_total >= amount_limit {
        BudgetStatus::Danger
    } else if spent_total.cents() as f64 / amount_limit.cents() as f64 >= thresholds.warning_ratio
    {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Ok
    };

    BudgetStatusReport {
        status,
        ratio: percent.clamp(0.0, 100.0),
    }
}

impl Budget {
    /// Current status of this budget
    pub fn status(&self, thresholds: &Thresholds) -> BudgetStatusReport {
        classify_budget_with(self.amount_limit, self.spent_total, thresholds)
    }
}

/// Non-blocking signal about a goal's deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeadlineAdvisory {
    /// No deadline, or the deadline is comfortably far away
    Clear,
    /// The deadline is today or within the imminent window
    Imminent { days_left: i64 },
    /// The deadline has passed
    Overdue,
}

impl DeadlineAdvisory {
    /// Text shown next to an accepted contribution, if any
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Clear => None,
            Self::Imminent { days_left } => Some(format!(
                "Heads up: this goal's deadline is in {} day(s).",
                days_left
            )),
            Self::Overdue => Some("Note: this goal's deadline has already passed.".to_string()),
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, Self::Clear)
    }
}

/// Whole calendar days from `today` until `deadline` (negative once passed)
pub fn days_until(deadline: NaiveDate, today: NaiveDate) -> i64 {
    (deadline - today).num_days()
}

/// Classify a deadline relative to `today`
pub fn deadline_advisory(
    deadline: Option<NaiveDate>,
    today: NaiveDate,
    thresholds: &Thresholds,
) -> DeadlineAdvisory {
    let Some(deadline) = deadline else {
        return DeadlineAdvisory::Clear;
    };

    let diff_days = days_until(deadline, today);
    if diff_days < 0 {
        DeadlineAdvisory::Overdue
    } else if diff_days <= thresholds.imminent_days {
        DeadlineAdvisory::Imminent {
            days_left: diff_days,
        }
    } else {
        DeadlineAdvisory::Clear
    }
}
