//! In-memory store
//!
//! Implements the category, budget, goal and notification stores in process.
//! It mirrors the server rules the core relies on: default categories on
//! first listing, `spent_total` aggregated from recorded expenses, and
//! contributions re-validated against the stored goal.

use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use super::{BudgetStore, CategoryStore, GoalStore, NotificationStore};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    Budget, BudgetFields, BudgetId, Category, CategoryId, CategoryKind, Goal, GoalFields, GoalId,
    GoalStatus, Money, NewCategory,
};

/// Categories every user starts with
pub const DEFAULT_CATEGORIES: &[(&str, CategoryKind)] = &[
    ("Salary", CategoryKind::Income),
    ("Rent", CategoryKind::Expense),
    ("Groceries", CategoryKind::Expense),
    ("Education", CategoryKind::Expense),
    ("Travel", CategoryKind::Expense),
    ("Shopping", CategoryKind::Expense),
    ("Investments", CategoryKind::Income),
];

/// Store calls that can be made to fail on purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreCall {
    ListCategories,
    CreateCategory,
    ListBudgets,
    CreateBudget,
    UpdateBudget,
    DeleteBudget,
    ListGoals,
    CreateGoal,
    UpdateGoal,
    DeleteGoal,
    Contribute,
    RecordNotification,
}

#[derive(Debug, Clone)]
struct StoredBudget {
    id: BudgetId,
    fields: BudgetFields,
}

#[derive(Debug, Clone)]
struct Expense {
    category_id: Option<CategoryId>,
    date: NaiveDate,
    amount: Money,
}

/// In-process implementation of every store trait
#[derive(Default)]
pub struct MemoryStore {
    seeded: RwLock<bool>,
    categories: RwLock<Vec<Category>>,
    budgets: RwLock<Vec<StoredBudget>>,
    goals: RwLock<Vec<Goal>>,
    expenses: RwLock<Vec<Expense>>,
    notifications: RwLock<Vec<(String, NaiveDate)>>,
    failing: RwLock<HashSet<StoreCall>>,
}

fn read<T>(lock: &RwLock<T>) -> TrackerResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| TrackerError::Store(format!("Failed to acquire read lock: {}", e)))
}

fn write<T>(lock: &RwLock<T>) -> TrackerResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| TrackerError::Store(format!("Failed to acquire write lock: {}", e)))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later `call` fail until [`MemoryStore::restore`] is called
    pub fn inject_failure(&self, call: StoreCall) -> TrackerResult<()> {
        write(&self.failing)?.insert(call);
        Ok(())
    }

    /// Undo [`MemoryStore::inject_failure`] for one call
    pub fn restore(&self, call: StoreCall) -> TrackerResult<()> {
        write(&self.failing)?.remove(&call);
        Ok(())
    }

    /// Record an expense transaction that budgets aggregate over
    pub fn record_expense(
        &self,
        category_id: Option<CategoryId>,
        date: NaiveDate,
        amount: Money,
    ) -> TrackerResult<()> {
        write(&self.expenses)?.push(Expense {
            category_id,
            date,
            amount,
        });
        Ok(())
    }

    /// Insert a goal as-is, bypassing create-time validation
    pub fn insert_goal(&self, goal: Goal) -> TrackerResult<()> {
        write(&self.goals)?.insert(0, goal);
        Ok(())
    }

    fn check(&self, call: StoreCall) -> TrackerResult<()> {
        if read(&self.failing)?.contains(&call) {
            return Err(TrackerError::Store(format!("{:?} unavailable", call)));
        }
        Ok(())
    }

    fn ensure_default_categories(&self) -> TrackerResult<()> {
        let mut seeded = write(&self.seeded)?;
        if *seeded {
            return Ok(());
        }
        let mut categories = write(&self.categories)?;
        for (name, kind) in DEFAULT_CATEGORIES {
            categories.push(Category::new(CategoryId::new(), *name, *kind));
        }
        *seeded = true;
        Ok(())
    }

    fn spent_for(&self, fields: &BudgetFields) -> TrackerResult<Money> {
        let expenses = read(&self.expenses)?;
        Ok(expenses
            .iter()
            .filter(|e| fields.period.contains(e.date))
            .filter(|e| fields.category_id.is_none() || e.category_id == fields.category_id)
            .map(|e| e.amount)
            .sum())
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn list_categories(&self) -> TrackerResult<Vec<Category>> {
        self.check(StoreCall::ListCategories)?;
        self.ensure_default_categories()?;

        let mut list = read(&self.categories)?.clone();
        list.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(list)
    }

    async fn create_category(&self, request: NewCategory) -> TrackerResult<Category> {
        self.check(StoreCall::CreateCategory)?;
        self.ensure_default_categories()?;
        request
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let category = Category::new(CategoryId::new(), request.name, request.kind);
        write(&self.categories)?.push(category.clone());
        debug!(category_id = %category.id, "stored category");
        Ok(category)
    }
}

#[async_trait]
impl BudgetStore for MemoryStore {
    async fn list_budgets(&self) -> TrackerResult<Vec<Budget>> {
        self.check(StoreCall::ListBudgets)?;

        let stored = read(&self.budgets)?.clone();
        let categories = read(&self.categories)?.clone();

        // Newest first within a month, latest month first
        let mut list = Vec::with_capacity(stored.len());
        for entry in stored.iter().rev() {
            let category_name = entry.fields.category_id.and_then(|id| {
                categories
                    .iter()
                    .find(|c| c.id == id)
                    .map(|c| c.name.clone())
            });
            list.push(Budget {
                id: entry.id,
                category_id: entry.fields.category_id,
                category_name,
                amount_limit: entry.fields.amount_limit,
                period: entry.fields.period,
                spent_total: self.spent_for(&entry.fields)?,
            });
        }
        list.sort_by(|a, b| b.period.cmp(&a.period));
        Ok(list)
    }

    async fn create_budget(&self, fields: BudgetFields) -> TrackerResult<BudgetId> {
        self.check(StoreCall::CreateBudget)?;
        fields
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let id = BudgetId::new();
        write(&self.budgets)?.push(StoredBudget { id, fields });
        Ok(id)
    }

    async fn update_budget(&self, id: BudgetId, fields: BudgetFields) -> TrackerResult<()> {
        self.check(StoreCall::UpdateBudget)?;
        fields
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let mut budgets = write(&self.budgets)?;
        let entry = budgets
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| TrackerError::budget_not_found(id.to_string()))?;
        entry.fields = fields;
        Ok(())
    }

    async fn delete_budget(&self, id: BudgetId) -> TrackerResult<()> {
        self.check(StoreCall::DeleteBudget)?;

        let mut budgets = write(&self.budgets)?;
        let before = budgets.len();
        budgets.retain(|b| b.id != id);
        if budgets.len() == before {
            return Err(TrackerError::budget_not_found(id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl GoalStore for MemoryStore {
    async fn list_goals(&self) -> TrackerResult<Vec<Goal>> {
        self.check(StoreCall::ListGoals)?;
        Ok(read(&self.goals)?.clone())
    }

    async fn create_goal(&self, fields: GoalFields) -> TrackerResult<GoalId> {
        self.check(StoreCall::CreateGoal)?;
        fields
            .validate_new()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let id = GoalId::new();
        let goal = Goal {
            id,
            goal_name: fields.goal_name,
            target_amount: fields.target_amount,
            current_saved: Money::zero(),
            category_id: fields.category_id,
            deadline: fields.deadline,
            notify_enabled: fields.notify_enabled,
            status: GoalStatus::Pending,
        };
        write(&self.goals)?.insert(0, goal);
        Ok(id)
    }

    async fn update_goal(&self, id: GoalId, fields: GoalFields) -> TrackerResult<()> {
        self.check(StoreCall::UpdateGoal)?;
        fields
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let mut goals = write(&self.goals)?;
        let goal = goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| TrackerError::goal_not_found(id.to_string()))?;
        goal.goal_name = fields.goal_name;
        goal.target_amount = fields.target_amount;
        goal.category_id = fields.category_id;
        goal.deadline = fields.deadline;
        goal.notify_enabled = fields.notify_enabled;
        goal.status = GoalStatus::derive(goal.current_saved, goal.target_amount);
        Ok(())
    }

    async fn delete_goal(&self, id: GoalId) -> TrackerResult<()> {
        self.check(StoreCall::DeleteGoal)?;

        let mut goals = write(&self.goals)?;
        let before = goals.len();
        goals.retain(|g| g.id != id);
        if goals.len() == before {
            return Err(TrackerError::goal_not_found(id.to_string()));
        }
        Ok(())
    }

    async fn contribute(&self, id: GoalId, amount: Money) -> TrackerResult<GoalStatus> {
        self.check(StoreCall::Contribute)?;
        if !amount.is_positive() {
            return Err(TrackerError::Validation("amount must be > 0".into()));
        }

        let mut goals = write(&self.goals)?;
        let goal = goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| TrackerError::goal_not_found(id.to_string()))?;

        if goal.is_funded() {
            return Err(TrackerError::Validation(
                "This goal is already fully funded.".into(),
            ));
        }
        let remaining = goal.remaining();
        if amount > remaining {
            return Err(TrackerError::Validation(format!(
                "Amount exceeds remaining goal by {}. Max allowed: {}",
                amount - remaining,
                remaining
            )));
        }

        goal.current_saved += amount;
        goal.status = GoalStatus::derive(goal.current_saved, goal.target_amount);
        Ok(goal.status)
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn sent_on(&self, date: NaiveDate) -> TrackerResult<HashSet<String>> {
        Ok(read(&self.notifications)?
            .iter()
            .filter(|(_, day)| *day == date)
            .map(|(signature, _)| signature.clone())
            .collect())
    }

    async fn record(&self, signature: &str, date: NaiveDate) -> TrackerResult<()> {
        self.check(StoreCall::RecordNotification)?;
        write(&self.notifications)?.push((signature.to_string(), date));
        Ok(())
    }
}
