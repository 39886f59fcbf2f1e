//! Budget model
//!
//! A budget caps spending for one category (or all spending, when no category
//! is set) in one calendar month. `spent_total` is aggregated by the store
//! from transactions; this crate never recomputes it.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;

/// Earliest year a budget may be created for
pub const MIN_BUDGET_YEAR: i32 = 2000;

/// The calendar month a budget applies to (e.g., "2025-01")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BudgetMonth {
    pub year: i32,
    pub month: u32,
}

impl BudgetMonth {
    /// Create a validated budget month
    pub fn new(year: i32, month: u32) -> Result<Self, BudgetValidationError> {
        if !(1..=12).contains(&month) {
            return Err(BudgetValidationError::MonthOutOfRange(month));
        }
        if year < MIN_BUDGET_YEAR {
            return Err(BudgetValidationError::YearTooEarly(year));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for BudgetMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A budget as returned by the budget store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    /// `None` means the budget covers every expense in the month
    pub category_id: Option<CategoryId>,

    /// Human-readable category name joined in by the store
    #[serde(default)]
    pub category_name: Option<String>,

    pub amount_limit: Money,

    pub period: BudgetMonth,

    /// Sum of expenses in the period, supplied by the store
    #[serde(default)]
    pub spent_total: Money,
}

impl Budget {
    /// Display name for the budget's category
    pub fn category_label(&self) -> &str {
        match (&self.category_id, &self.category_name) {
            (_, Some(name)) => name,
            (None, None) => "All spending",
            (Some(_), None) => "Uncategorized",
        }
    }
}

/// The writable fields of a budget, sent on create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetFields {
    pub category_id: Option<CategoryId>,
    pub amount_limit: Money,
    pub period: BudgetMonth,
}

impl BudgetFields {
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount_limit.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit);
        }
        BudgetMonth::new(self.period.year, self.period.month)?;
        Ok(())
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveLimit,
    MonthOutOfRange(u32),
    YearTooEarly(i32),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveLimit => write!(f, "amount_limit must be > 0"),
            Self::MonthOutOfRange(m) => write!(f, "month must be between 1 and 12 (got {})", m),
            Self::YearTooEarly(y) => {
                write!(f, "year must be >= {} (got {})", MIN_BUDGET_YEAR, y)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_month_validation() {
        assert!(BudgetMonth::new(2025, 1).is_ok());
        assert!(BudgetMonth::new(2025, 12).is_ok());
        assert_eq!(
            BudgetMonth::new(2025, 13),
            Err(BudgetValidationError::MonthOutOfRange(13))
        );
        assert_eq!(
            BudgetMonth::new(2025, 0),
            Err(BudgetValidationError::MonthOutOfRange(0))
        );
        assert_eq!(
            BudgetMonth::new(1999, 5),
            Err(BudgetValidationError::YearTooEarly(1999))
        );
    }

    #[test]
    fn test_budget_month_contains() {
        let month = BudgetMonth::new(2025, 2).unwrap();
        assert!(month.contains(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
        assert_eq!(month.to_string(), "2025-02");
    }

    #[test]
    fn test_fields_validation() {
        let mut fields = BudgetFields {
            category_id: None,
            amount_limit: Money::from_units(1000),
            period: BudgetMonth::new(2025, 6).unwrap(),
        };
        assert!(fields.validate().is_ok());

        fields.amount_limit = Money::zero();
        assert_eq!(
            fields.validate(),
            Err(BudgetValidationError::NonPositiveLimit)
        );
    }

    #[test]
    fn test_category_label() {
        let mut budget = Budget {
            id: BudgetId::new(),
            category_id: None,
            category_name: None,
            amount_limit: Money::from_units(100),
            period: BudgetMonth::new(2025, 1).unwrap(),
            spent_total: Money::zero(),
        };
        assert_eq!(budget.category_label(), "All spending");

        budget.category_id = Some(CategoryId::new());
        budget.category_name = Some("Groceries".into());
        assert_eq!(budget.category_label(), "Groceries");
    }
}
