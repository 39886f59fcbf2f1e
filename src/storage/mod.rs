//! Store collaborators for MoneyPal
//!
//! The core never persists anything itself. Categories, budgets, goals and
//! the record of raised notifications live behind these async traits; the
//! host wires them to its transport. [`MemoryStore`] provides an in-process
//! implementation and [`NotificationLedger`] a JSON-lines file one for
//! notifications.

pub mod memory;
pub mod notifications;

pub use memory::{MemoryStore, StoreCall};
pub use notifications::{LedgerEntry, NotificationLedger};

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::TrackerResult;
use crate::models::{
    Budget, BudgetFields, BudgetId, Category, Goal, GoalFields, GoalId, GoalStatus, Money,
    NewCategory,
};

/// Category collection owned by the store
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list_categories(&self) -> TrackerResult<Vec<Category>>;

    /// Create a category and return it with its store-assigned id
    async fn create_category(&self, request: NewCategory) -> TrackerResult<Category>;
}

/// Budget collection owned by the store
///
/// Listed budgets carry `spent_total` and `category_name` as aggregated by the
/// store.
#[async_trait]
pub trait BudgetStore: Send + Sync {
    async fn list_budgets(&self) -> TrackerResult<Vec<Budget>>;

    async fn create_budget(&self, fields: BudgetFields) -> TrackerResult<BudgetId>;

    async fn update_budget(&self, id: BudgetId, fields: BudgetFields) -> TrackerResult<()>;

    async fn delete_budget(&self, id: BudgetId) -> TrackerResult<()>;
}

/// Goal collection owned by the store
///
/// `list_goals` reports transport failures as errors like every other list
/// call; the combined refresh decides what to show.
#[async_trait]
pub trait GoalStore: Send + Sync {
    async fn list_goals(&self) -> TrackerResult<Vec<Goal>>;

    async fn create_goal(&self, fields: GoalFields) -> TrackerResult<GoalId>;

    async fn update_goal(&self, id: GoalId, fields: GoalFields) -> TrackerResult<()>;

    async fn delete_goal(&self, id: GoalId) -> TrackerResult<()>;

    /// Apply a validated deposit and return the goal's new status label
    async fn contribute(&self, id: GoalId, amount: Money) -> TrackerResult<GoalStatus>;
}

/// Record of alerts already raised, keyed by signature and day
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Signatures recorded for `date`
    async fn sent_on(&self, date: NaiveDate) -> TrackerResult<HashSet<String>>;

    async fn record(&self, signature: &str, date: NaiveDate) -> TrackerResult<()>;
}

/// Handles to the three stores, cheap to clone
#[derive(Clone)]
pub struct Stores {
    pub categories: Arc<dyn CategoryStore>,
    pub budgets: Arc<dyn BudgetStore>,
    pub goals: Arc<dyn GoalStore>,
}

impl Stores {
    pub fn new(
        categories: Arc<dyn CategoryStore>,
        budgets: Arc<dyn BudgetStore>,
        goals: Arc<dyn GoalStore>,
    ) -> Self {
        Self {
            categories,
            budgets,
            goals,
        }
    }

    /// Use one backend for all three collections
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: CategoryStore + BudgetStore + GoalStore + 'static,
    {
        Self {
            categories: store.clone(),
            budgets: store.clone(),
            goals: store,
        }
    }
}
