//! Form state for budgets and goals
//!
//! Forms hold what the user has typed so far. They never talk to a store;
//! the session turns a validated form into the fields a store call expects.

pub mod budget_form;
pub mod goal_form;

pub use budget_form::BudgetForm;
pub use goal_form::GoalForm;

/// Date format accepted in deadline inputs
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
