//! Aggregate loader
//!
//! Fetches categories, budgets and goals together and replaces the local
//! view in one step. A failure in any of the three calls leaves the view
//! empty rather than half-updated.

use tracing::{debug, error, info};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Budget, BudgetId, Category, CategoryId, Goal, GoalId};
use crate::storage::Stores;

/// One consistent snapshot of the three collections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    pub categories: Vec<Category>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<Goal>,
}

/// The collections currently shown, plus the last load error
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateView {
    pub categories: Vec<Category>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<Goal>,
    pub error: Option<TrackerError>,
}

impl AggregateView {
    pub fn find_goal(&self, id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn find_budget(&self, id: BudgetId) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id == id)
    }

    pub fn find_category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Name of a category, or "Uncategorized" when unset or unknown
    pub fn category_name(&self, id: Option<CategoryId>) -> &str {
        id.and_then(|id| self.find_category(id))
            .map(|c| c.name.as_str())
            .unwrap_or("Uncategorized")
    }

    fn apply(&mut self, aggregate: Aggregate) {
        self.categories = aggregate.categories;
        self.budgets = aggregate.budgets;
        self.goals = aggregate.goals;
        self.error = None;
    }

    fn clear_with(&mut self, err: TrackerError) {
        self.categories.clear();
        self.budgets.clear();
        self.goals.clear();
        self.error = Some(err);
    }
}

/// Runs the combined refresh against the injected stores
#[derive(Clone)]
pub struct AggregateLoader {
    stores: Stores,
}

impl AggregateLoader {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    /// Fetch all three collections concurrently
    ///
    /// The first failure wins and is reported as `AggregateLoadFailed`.
    pub async fn fetch(&self) -> TrackerResult<Aggregate> {
        let (categories, budgets, goals) = tokio::try_join!(
            self.stores.categories.list_categories(),
            self.stores.budgets.list_budgets(),
            self.stores.goals.list_goals(),
        )
        .map_err(|e| TrackerError::AggregateLoadFailed(e.reason()))?;

        debug!(
            categories = categories.len(),
            budgets = budgets.len(),
            goals = goals.len(),
            "fetched aggregate"
        );

        Ok(Aggregate {
            categories,
            budgets,
            goals,
        })
    }

    /// Refresh `view` in place
    ///
    /// On success all three collections are replaced and the error cleared.
    /// On failure all three are emptied and the error recorded.
    pub async fn refresh(&self, view: &mut AggregateView) -> TrackerResult<()> {
        match self.fetch().await {
            Ok(aggregate) => {
                info!(
                    budgets = aggregate.budgets.len(),
                    goals = aggregate.goals.len(),
                    "refreshed budgets and goals"
                );
                view.apply(aggregate);
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "aggregate refresh failed");
                view.clear_with(err.clone());
                Err(err)
            }
        }
    }
}
