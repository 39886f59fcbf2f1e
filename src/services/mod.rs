//! Service layer for MoneyPal
//!
//! Pure classifiers and calculators for budgets and goals, plus the async
//! pieces that talk to the stores: the aggregate loader, the category
//! coordinator and the session that ties the screen together.

pub mod alerts;
pub mod category_resolution;
pub mod contribution;
pub mod loader;
pub mod progress;
pub mod session;
pub mod status;

pub use alerts::{budget_alerts, goal_reminders, unsent_alerts, Alert, BudgetAlert, GoalReminder};
pub use category_resolution::{
    CategoryBinding, CategoryCoordinator, CategorySelection, CREATE_NEW_SENTINEL,
};
pub use contribution::{
    validate_contribution, validate_contribution_with, ContributionApproval, ContributionDraft,
    ContributionReceipt,
};
pub use loader::{Aggregate, AggregateLoader, AggregateView};
pub use progress::{goal_progress, GoalProgress};
pub use session::{BudgetGoalSession, FormTarget};
pub use status::{
    classify_budget, classify_budget_with, deadline_advisory, BudgetStatus, BudgetStatusReport,
    DeadlineAdvisory,
};
