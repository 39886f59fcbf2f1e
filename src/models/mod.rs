//! Core data models for MoneyPal
//!
//! This module contains the data structures the budget and goal core works
//! on: categories, monthly budgets, savings goals, strongly-typed ids and
//! the money type.

pub mod budget;
pub mod category;
pub mod goal;
pub mod ids;
pub mod money;

pub use budget::{Budget, BudgetFields, BudgetMonth, BudgetValidationError};
pub use category::{Category, CategoryKind, CategoryValidationError, NewCategory};
pub use goal::{Goal, GoalFields, GoalStatus, GoalValidationError};
pub use ids::{BudgetId, CategoryId, GoalId, UserId};
pub use money::{Money, MoneyParseError};
