//! Budget and goal session
//!
//! Owns everything the budgets & goals screen works with: the loaded
//! collections, the budget form, the goal create and edit forms (each with
//! its own category coordinator) and the pending contribution. Every
//! operation that reaches a store takes `&mut self`, so at most one is in
//! flight at a time, and every successful mutation is followed by a full
//! reload.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use super::alerts::{budget_alerts, goal_reminders, unsent_alerts, Alert};
use super::category_resolution::{CategoryCoordinator, CategorySelection};
use super::contribution::{validate_contribution_with, ContributionDraft, ContributionReceipt};
use super::loader::{AggregateLoader, AggregateView};
use super::status::BudgetStatusReport;
use crate::auth::AuthSession;
use crate::config::Thresholds;
use crate::error::{EntityKind, MutationOp, TrackerError, TrackerResult};
use crate::forms::{BudgetForm, GoalForm};
use crate::models::{BudgetId, CategoryId, GoalId};
use crate::storage::{NotificationStore, Stores};

/// Wrap a store error as `MutationFailed`, logging it
fn mutation_failed(
    entity: EntityKind,
    op: MutationOp,
) -> impl FnOnce(TrackerError) -> TrackerError {
    move |source| {
        let err = TrackerError::mutation_failed(entity, op, source);
        warn!(error = %err, "store mutation failed");
        err
    }
}

/// Which form a category picker belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    Budget,
    NewGoal,
    EditGoal,
}

pub struct BudgetGoalSession {
    loader: AggregateLoader,
    auth: Arc<dyn AuthSession>,
    thresholds: Thresholds,
    view: AggregateView,
    budget: CategoryCoordinator<BudgetForm>,
    new_goal: CategoryCoordinator<GoalForm>,
    edit_goal: CategoryCoordinator<GoalForm>,
    editing_goal: Option<GoalId>,
    contribution: ContributionDraft,
}

impl BudgetGoalSession {
    pub fn new(stores: Stores, auth: Arc<dyn AuthSession>, thresholds: Thresholds) -> Self {
        Self {
            loader: AggregateLoader::new(stores),
            auth,
            thresholds,
            view: AggregateView::default(),
            budget: CategoryCoordinator::default(),
            new_goal: CategoryCoordinator::default(),
            edit_goal: CategoryCoordinator::default(),
            editing_goal: None,
            contribution: ContributionDraft::default(),
        }
    }

    pub fn view(&self) -> &AggregateView {
        &self.view
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn budget_form(&self) -> &BudgetForm {
        self.budget.form()
    }

    pub fn budget_form_mut(&mut self) -> &mut BudgetForm {
        self.budget.form_mut()
    }

    pub fn new_goal_form(&self) -> &GoalForm {
        self.new_goal.form()
    }

    pub fn new_goal_form_mut(&mut self) -> &mut GoalForm {
        self.new_goal.form_mut()
    }

    pub fn edit_goal_form(&self) -> &GoalForm {
        self.edit_goal.form()
    }

    pub fn edit_goal_form_mut(&mut self) -> &mut GoalForm {
        self.edit_goal.form_mut()
    }

    /// Goal currently loaded into the edit form
    pub fn editing_goal(&self) -> Option<GoalId> {
        self.editing_goal
    }

    pub fn contribution(&self) -> &ContributionDraft {
        &self.contribution
    }

    fn require_auth(&self) -> TrackerResult<()> {
        if self.auth.is_authenticated() {
            Ok(())
        } else {
            warn!("store operation refused without a logged-in user");
            Err(TrackerError::Unauthenticated)
        }
    }

    /// Refresh categories, budgets and goals together
    pub async fn reload(&mut self) -> TrackerResult<()> {
        self.require_auth()?;
        self.loader.refresh(&mut self.view).await
    }

    // Category pickers

    pub fn select_category(&mut self, target: FormTarget, selection: CategorySelection) {
        match target {
            FormTarget::Budget => self.budget.select(selection),
            FormTarget::NewGoal => self.new_goal.select(selection),
            FormTarget::EditGoal => self.edit_goal.select(selection),
        }
    }

    pub fn set_pending_category_name(&mut self, target: FormTarget, name: &str) {
        match target {
            FormTarget::Budget => self.budget.set_pending_name(name),
            FormTarget::NewGoal => self.new_goal.set_pending_name(name),
            FormTarget::EditGoal => self.edit_goal.set_pending_name(name),
        }
    }

    pub fn pending_category_name(&self, target: FormTarget) -> Option<&str> {
        match target {
            FormTarget::Budget => self.budget.pending_name(),
            FormTarget::NewGoal => self.new_goal.pending_name(),
            FormTarget::EditGoal => self.edit_goal.pending_name(),
        }
    }

    pub fn cancel_new_category(&mut self, target: FormTarget) {
        match target {
            FormTarget::Budget => self.budget.cancel_new_category(),
            FormTarget::NewGoal => self.new_goal.cancel_new_category(),
            FormTarget::EditGoal => self.edit_goal.cancel_new_category(),
        }
    }

    /// Create the category typed into `target`'s picker and bind it there
    pub async fn confirm_new_category(
        &mut self,
        target: FormTarget,
    ) -> TrackerResult<Option<CategoryId>> {
        self.require_auth()?;
        let loader = &self.loader;
        let view = &mut self.view;
        match target {
            FormTarget::Budget => self.budget.confirm_new_category(loader, view).await,
            FormTarget::NewGoal => self.new_goal.confirm_new_category(loader, view).await,
            FormTarget::EditGoal => self.edit_goal.confirm_new_category(loader, view).await,
        }
    }

    // Budgets

    /// Load a listed budget into the budget form
    pub fn start_edit_budget(&mut self, id: BudgetId) -> TrackerResult<()> {
        let budget = self
            .view
            .find_budget(id)
            .ok_or_else(|| TrackerError::budget_not_found(id.to_string()))?;
        self.budget.replace_form(BudgetForm::start_edit(budget));
        Ok(())
    }

    pub fn cancel_edit_budget(&mut self) {
        self.budget.reset();
    }

    /// Create or update the budget in the form, then reload
    pub async fn submit_budget(&mut self, today: NaiveDate) -> TrackerResult<()> {
        self.require_auth()?;
        let fields = self.budget.form().to_fields(today)?;
        let budgets = &self.loader.stores().budgets;

        match self.budget.form().editing() {
            Some(id) => {
                budgets
                    .update_budget(id, fields)
                    .await
                    .map_err(mutation_failed(EntityKind::Budget, MutationOp::Update))?;
                info!(budget_id = %id, "updated budget");
            }
            None => {
                let id = budgets
                    .create_budget(fields)
                    .await
                    .map_err(mutation_failed(EntityKind::Budget, MutationOp::Create))?;
                info!(budget_id = %id, "created budget");
            }
        }

        self.budget.reset();
        self.loader.refresh(&mut self.view).await
    }

    pub async fn delete_budget(&mut self, id: BudgetId) -> TrackerResult<()> {
        self.require_auth()?;
        self.loader
            .stores()
            .budgets
            .delete_budget(id)
            .await
            .map_err(mutation_failed(EntityKind::Budget, MutationOp::Delete))?;
        info!(budget_id = %id, "deleted budget");

        if self.budget.form().editing() == Some(id) {
            self.budget.reset();
        }
        self.loader.refresh(&mut self.view).await
    }

    /// Status of every loaded budget, in list order
    pub fn budget_statuses(&self) -> Vec<(BudgetId, BudgetStatusReport)> {
        self.view
            .budgets
            .iter()
            .map(|b| (b.id, b.status(&self.thresholds)))
            .collect()
    }

    // Goals

    /// Create the goal in the new-goal form, then reload
    pub async fn submit_goal(&mut self) -> TrackerResult<GoalId> {
        self.require_auth()?;
        let fields = self.new_goal.form().to_new_fields()?;
        let id = self
            .loader
            .stores()
            .goals
            .create_goal(fields)
            .await
            .map_err(mutation_failed(EntityKind::Goal, MutationOp::Create))?;
        info!(goal_id = %id, "created goal");

        self.new_goal.reset();
        self.loader.refresh(&mut self.view).await?;
        Ok(id)
    }

    /// Load a listed goal into the edit form
    pub fn start_edit_goal(&mut self, id: GoalId) -> TrackerResult<()> {
        let goal = self
            .view
            .find_goal(id)
            .ok_or_else(|| TrackerError::goal_not_found(id.to_string()))?;
        self.edit_goal.replace_form(GoalForm::from_goal(goal));
        self.editing_goal = Some(id);
        Ok(())
    }

    pub fn cancel_edit_goal(&mut self) {
        self.edit_goal.reset();
        self.editing_goal = None;
    }

    pub async fn submit_goal_edit(&mut self) -> TrackerResult<()> {
        self.require_auth()?;
        let id = self
            .editing_goal
            .ok_or_else(|| TrackerError::Validation("No goal selected for editing".into()))?;
        let fields = self.edit_goal.form().to_edit_fields()?;
        self.loader
            .stores()
            .goals
            .update_goal(id, fields)
            .await
            .map_err(mutation_failed(EntityKind::Goal, MutationOp::Update))?;
        info!(goal_id = %id, "updated goal");

        self.cancel_edit_goal();
        self.loader.refresh(&mut self.view).await
    }

    /// Delete a goal; an edit or contribution aimed at it is dropped
    pub async fn delete_goal(&mut self, id: GoalId) -> TrackerResult<()> {
        self.require_auth()?;
        self.loader
            .stores()
            .goals
            .delete_goal(id)
            .await
            .map_err(mutation_failed(EntityKind::Goal, MutationOp::Delete))?;
        info!(goal_id = %id, "deleted goal");

        if self.editing_goal == Some(id) {
            self.cancel_edit_goal();
        }
        if self.contribution.goal_id == Some(id) {
            self.contribution.reset();
        }
        self.loader.refresh(&mut self.view).await
    }

    // Contributions

    pub fn open_contribution(&mut self, goal_id: GoalId) -> TrackerResult<()> {
        let goal = self
            .view
            .find_goal(goal_id)
            .ok_or_else(|| TrackerError::goal_not_found(goal_id.to_string()))?;
        self.contribution.open(goal)
    }

    pub fn set_contribution_amount(&mut self, input: &str) {
        self.contribution.set_amount(input);
    }

    pub fn cancel_contribution(&mut self) {
        self.contribution.reset();
    }

    /// Validate the pending contribution, send it, then reload
    ///
    /// Validation runs against the goal as last loaded. Any failure leaves
    /// the draft in place so the user can correct the amount.
    pub async fn submit_contribution(
        &mut self,
        today: NaiveDate,
    ) -> TrackerResult<ContributionReceipt> {
        self.require_auth()?;
        let goal_id = self
            .contribution
            .goal_id
            .ok_or_else(|| TrackerError::Validation("No goal selected for contribution".into()))?;
        let goal = self
            .view
            .find_goal(goal_id)
            .ok_or_else(|| TrackerError::goal_not_found(goal_id.to_string()))?;

        let amount = self.contribution.amount()?;
        let approval = validate_contribution_with(goal, amount, today, &self.thresholds)
            .map_err(|e| {
                warn!(goal_id = %goal_id, error = %e, "contribution rejected");
                e
            })?;

        let status = self
            .loader
            .stores()
            .goals
            .contribute(approval.goal_id, approval.amount)
            .await
            .map_err(mutation_failed(EntityKind::Goal, MutationOp::Contribute))?;
        info!(goal_id = %goal_id, amount = %approval.amount, status = %status, "contribution applied");

        self.contribution.reset();
        self.loader.refresh(&mut self.view).await?;

        Ok(ContributionReceipt {
            goal_id: approval.goal_id,
            amount: approval.amount,
            advisory: approval.advisory,
            status,
        })
    }

    // Alerts

    /// Budget alerts followed by goal reminders for the loaded data
    pub fn alerts(&self, today: NaiveDate) -> Vec<Alert> {
        budget_alerts(&self.view.budgets, &self.thresholds)
            .into_iter()
            .map(Alert::Budget)
            .chain(
                goal_reminders(&self.view.goals, today, &self.thresholds)
                    .into_iter()
                    .map(Alert::Goal),
            )
            .collect()
    }

    /// Alerts not yet raised today, recorded in `ledger` as they are returned
    pub async fn pending_alerts(
        &self,
        ledger: &dyn NotificationStore,
        today: NaiveDate,
    ) -> TrackerResult<Vec<Alert>> {
        unsent_alerts(ledger, self.alerts(today), today).await
    }
}
