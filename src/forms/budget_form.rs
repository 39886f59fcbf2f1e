//! Budget form state

use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Budget, BudgetFields, BudgetId, BudgetMonth, CategoryId, Money};
use crate::services::category_resolution::CategoryBinding;

/// State for the create/edit budget form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetForm {
    /// Selected category, `None` for an all-spending budget
    pub category_id: Option<CategoryId>,

    /// Monthly limit as typed
    pub amount_limit_input: String,

    /// The budget being edited and the period it keeps
    editing: Option<(BudgetId, BudgetMonth)>,
}

impl BudgetForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an existing budget for editing
    pub fn start_edit(budget: &Budget) -> Self {
        Self {
            category_id: budget.category_id,
            amount_limit_input: format!(
                "{}.{:02}",
                budget.amount_limit.dollars(),
                budget.amount_limit.cents_part()
            ),
            editing: Some((budget.id, budget.period)),
        }
    }

    /// Id of the budget being edited, if any
    pub fn editing(&self) -> Option<BudgetId> {
        self.editing.map(|(id, _)| id)
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate and build the fields to send
    ///
    /// A new budget applies to the month containing `today`; an edited one
    /// keeps its original month.
    pub fn to_fields(&self, today: NaiveDate) -> TrackerResult<BudgetFields> {
        let amount_limit = Money::parse(&self.amount_limit_input)
            .map_err(|_| TrackerError::Validation("Enter a valid budget amount".into()))?;

        let period = match self.editing {
            Some((_, period)) => period,
            None => BudgetMonth::containing(today),
        };

        let fields = BudgetFields {
            category_id: self.category_id,
            amount_limit,
            period,
        };
        fields
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;
        Ok(fields)
    }
}

impl CategoryBinding for BudgetForm {
    fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    fn bind_category(&mut self, id: Option<CategoryId>) {
        self.category_id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 19).unwrap()
    }

    #[test]
    fn test_new_budget_uses_current_month() {
        let form = BudgetForm {
            amount_limit_input: "1000".into(),
            ..BudgetForm::default()
        };
        let fields = form.to_fields(today()).unwrap();
        assert_eq!(fields.period, BudgetMonth::new(2025, 7).unwrap());
        assert_eq!(fields.amount_limit, Money::from_units(1000));
        assert_eq!(fields.category_id, None);
    }

    #[test]
    fn test_edit_keeps_period() {
        let budget = Budget {
            id: BudgetId::new(),
            category_id: Some(CategoryId::new()),
            category_name: Some("Rent".into()),
            amount_limit: Money::from_cents(120_050),
            period: BudgetMonth::new(2024, 11).unwrap(),
            spent_total: Money::zero(),
        };
        let mut form = BudgetForm::start_edit(&budget);
        assert_eq!(form.amount_limit_input, "1200.50");
        assert_eq!(form.editing(), Some(budget.id));

        form.amount_limit_input = "1500".into();
        let fields = form.to_fields(today()).unwrap();
        assert_eq!(fields.period, budget.period);
        assert_eq!(fields.category_id, budget.category_id);
        assert_eq!(fields.amount_limit, Money::from_units(1500));
    }

    #[test]
    fn test_rejects_bad_amounts() {
        for input in ["", "abc", "0", "-20"] {
            let form = BudgetForm {
                amount_limit_input: input.into(),
                ..BudgetForm::default()
            };
            assert!(form.to_fields(today()).unwrap_err().is_validation(), "{}", input);
        }
    }

    #[test]
    fn test_rejects_amount_too_large_to_represent() {
        for input in ["99999999999999999", "184467440737095518"] {
            let form = BudgetForm {
                amount_limit_input: input.into(),
                ..BudgetForm::default()
            };
            assert!(form.to_fields(today()).unwrap_err().is_validation(), "{}", input);
        }
    }

    #[test]
    fn test_reset_clears_edit() {
        let budget = Budget {
            id: BudgetId::new(),
            category_id: None,
            category_name: None,
            amount_limit: Money::from_units(10),
            period: BudgetMonth::new(2025, 1).unwrap(),
            spent_total: Money::zero(),
        };
        let mut form = BudgetForm::start_edit(&budget);
        form.reset();
        assert!(!form.is_editing());
        assert!(form.amount_limit_input.is_empty());
    }
}
