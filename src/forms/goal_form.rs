//! Goal form state, shared by the create and edit forms

use chrono::NaiveDate;

use super::DATE_INPUT_FORMAT;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{CategoryId, Goal, GoalFields, Money};
use crate::services::category_resolution::CategoryBinding;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalForm {
    pub goal_name: String,
    pub target_amount_input: String,
    pub category_id: Option<CategoryId>,
    /// `YYYY-MM-DD`; a trailing time part is ignored
    pub deadline_input: String,
    pub notify_enabled: bool,
}

impl GoalForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill from an existing goal
    pub fn from_goal(goal: &Goal) -> Self {
        Self {
            goal_name: goal.goal_name.clone(),
            target_amount_input: format!(
                "{}.{:02}",
                goal.target_amount.dollars(),
                goal.target_amount.cents_part()
            ),
            category_id: goal.category_id,
            deadline_input: goal
                .deadline
                .map(|d| d.format(DATE_INPUT_FORMAT).to_string())
                .unwrap_or_default(),
            notify_enabled: goal.notify_enabled,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fields for a new goal; the deadline is required
    pub fn to_new_fields(&self) -> TrackerResult<GoalFields> {
        let fields = self.to_fields()?;
        fields
            .validate_new()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;
        Ok(fields)
    }

    /// Fields for an edit; an empty deadline clears it
    pub fn to_edit_fields(&self) -> TrackerResult<GoalFields> {
        let fields = self.to_fields()?;
        fields
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;
        Ok(fields)
    }

    fn to_fields(&self) -> TrackerResult<GoalFields> {
        let target_amount = Money::parse(&self.target_amount_input)
            .map_err(|_| TrackerError::Validation("Enter a valid target amount".into()))?;

        Ok(GoalFields {
            goal_name: self.goal_name.trim().to_string(),
            target_amount,
            category_id: self.category_id,
            deadline: parse_deadline(&self.deadline_input)?,
            notify_enabled: self.notify_enabled,
        })
    }
}

fn parse_deadline(input: &str) -> TrackerResult<Option<NaiveDate>> {
    let date_part = input.trim().split('T').next().unwrap_or_default();
    if date_part.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(date_part, DATE_INPUT_FORMAT)
        .map(Some)
        .map_err(|_| TrackerError::Validation("Invalid date format. Use YYYY-MM-DD".into()))
}

impl CategoryBinding for GoalForm {
    fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    fn bind_category(&mut self, id: Option<CategoryId>) {
        self.category_id = id;
    }
}
