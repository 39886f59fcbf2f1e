//! Budget alerts and goal deadline reminders
//!
//! Scans the loaded budgets and goals for ones worth telling the user about.
//! Delivery is the host's concern; this module decides what to raise and,
//! with a [`NotificationStore`], raises each item at most once a day.

use std::fmt;

use chrono::{Duration, NaiveDate};
use tracing::debug;

use super::status::days_until;
use crate::config::Thresholds;
use crate::error::TrackerResult;
use crate::models::{Budget, BudgetId, Goal, GoalId, Money};
use crate::storage::NotificationStore;

/// A budget at or past the warning line
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetAlert {
    pub budget_id: BudgetId,
    pub category: String,
    pub spent: Money,
    pub limit: Money,
    /// Share of the limit used, as a percentage (may exceed 100)
    pub usage_percent: f64,
}

/// An unfunded goal whose deadline is close
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalReminder {
    pub goal_id: GoalId,
    pub goal_name: String,
    pub deadline: NaiveDate,
    pub remaining: Money,
    pub days_left: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Budget(BudgetAlert),
    Goal(GoalReminder),
}

impl Alert {
    /// Key used to de-duplicate within a day
    pub fn signature(&self) -> String {
        match self {
            Self::Budget(a) => format!("[BUDGET_ALERT][budget_id={}]", a.budget_id.as_uuid()),
            Self::Goal(r) => format!("[GOAL_REMINDER][goal_id={}]", r.goal_id.as_uuid()),
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Budget(a) => write!(
                f,
                "Budget alert: {} spent {} of {} ({:.1}% used)",
                a.category, a.spent, a.limit, a.usage_percent
            ),
            Self::Goal(r) => write!(
                f,
                "Savings goal '{}' is due on {}: {} remaining, {} day(s) left",
                r.goal_name, r.deadline, r.remaining, r.days_left
            ),
        }
    }
}

/// Budgets with spending at or above the warning ratio
///
/// Budgets without a limit or with nothing spent are skipped.
pub fn budget_alerts(budgets: &[Budget], thresholds: &Thresholds) -> Vec<BudgetAlert> {
    budgets
        .iter()
        .filter(|b| b.amount_limit.is_positive() && b.spent_total.is_positive())
        .filter_map(|b| {
            let usage_percent = b.spent_total.percent_of(b.amount_limit)?;
            if usage_percent / 100.0 < thresholds.warning_ratio {
                return None;
            }
            Some(BudgetAlert {
                budget_id: b.id,
                category: b.category_label().to_string(),
                spent: b.spent_total,
                limit: b.amount_limit,
                usage_percent,
            })
        })
        .collect()
}

/// Goals opted in to reminders whose deadline falls within the imminent window
///
/// Only goals with `notify_enabled` are reminded about; the flag is the
/// user's opt-in for deadline reminders. A window reaching past the last
/// representable date is treated as open-ended.
pub fn goal_reminders(goals: &[Goal], today: NaiveDate, thresholds: &Thresholds) -> Vec<GoalReminder> {
    let window_end = Duration::try_days(thresholds.imminent_days)
        .and_then(|window| today.checked_add_signed(window));
    goals
        .iter()
        .filter(|g| g.notify_enabled)
        .filter_map(|g| {
            let deadline = g.deadline?;
            if deadline < today || window_end.is_some_and(|end| deadline > end) {
                return None;
            }
            let remaining = g.remaining();
            if !remaining.is_positive() {
                return None;
            }
            Some(GoalReminder {
                goal_id: g.id,
                goal_name: g.goal_name.clone(),
                deadline,
                remaining,
                days_left: days_until(deadline, today),
            })
        })
        .collect()
}

/// Keep only alerts not yet raised today, recording the ones kept
pub async fn unsent_alerts(
    ledger: &dyn NotificationStore,
    alerts: Vec<Alert>,
    today: NaiveDate,
) -> TrackerResult<Vec<Alert>> {
    let mut sent = ledger.sent_on(today).await?;
    let mut fresh = Vec::new();

    for alert in alerts {
        let signature = alert.signature();
        if sent.contains(&signature) {
            debug!(signature = %signature, "already raised today");
            continue;
        }
        ledger.record(&signature, today).await?;
        sent.insert(signature);
        fresh.push(alert);
    }

    Ok(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_IMMINENT_DAYS;
    use crate::error::TrackerError;
    use crate::models::{BudgetMonth, GoalStatus};
    use crate::storage::{MemoryStore, NotificationLedger, StoreCall};
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
    }

    fn budget(limit: i64, spent: i64) -> Budget {
        Budget {
            id: BudgetId::new(),
            category_id: None,
            category_name: Some("Groceries".into()),
            amount_limit: Money::from_units(limit),
            period: BudgetMonth::new(2025, 4).unwrap(),
            spent_total: Money::from_units(spent),
        }
    }

    fn goal(days_out: i64, saved: i64, notify: bool) -> Goal {
        Goal {
            id: GoalId::new(),
            goal_name: "Camera".into(),
            target_amount: Money::from_units(300),
            current_saved: Money::from_units(saved),
            category_id: None,
            deadline: Some(today() + Duration::days(days_out)),
            notify_enabled: notify,
            status: GoalStatus::derive(Money::from_units(saved), Money::from_units(300)),
        }
    }

    #[test]
    fn test_budget_alerts_threshold() {
        let budgets = vec![
            budget(1000, 850),
            budget(1000, 799),
            budget(1000, 1200),
            budget(0, 50),
            budget(500, 0),
        ];
        let alerts = budget_alerts(&budgets, &Thresholds::default());

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].usage_percent, 85.0);
        assert_eq!(alerts[0].category, "Groceries");
        assert_eq!(alerts[1].usage_percent, 120.0);
    }

    #[test]
    fn test_goal_reminders_window() {
        let goals = vec![
            goal(0, 0, true),
            goal(3, 100, true),
            goal(4, 100, true),
            goal(-1, 100, true),
            goal(2, 300, true),
            goal(1, 100, false),
        ];
        let reminders = goal_reminders(&goals, today(), &Thresholds::default());

        let days: Vec<i64> = reminders.iter().map(|r| r.days_left).collect();
        assert_eq!(days, vec![0, 3]);
        assert_eq!(reminders[1].remaining, Money::from_units(200));
    }

    #[test]
    fn test_goal_without_deadline_is_skipped() {
        let mut g = goal(1, 0, true);
        g.deadline = None;
        assert!(goal_reminders(&[g], today(), &Thresholds::default()).is_empty());
    }

    #[test]
    fn test_window_past_last_date_is_open_ended() {
        let mut far = goal(0, 0, true);
        far.deadline = Some(NaiveDate::MAX);
        let goals = vec![goal(200, 0, true), far, goal(-1, 0, true)];

        let huge = Thresholds {
            imminent_days: 1_000_000_000,
            ..Thresholds::default()
        };
        let reminders = goal_reminders(&goals, today(), &huge);
        assert_eq!(reminders.len(), 2);
        assert_eq!(reminders[1].deadline, NaiveDate::MAX);

        let overflow = Thresholds {
            imminent_days: i64::MAX,
            ..Thresholds::default()
        };
        assert_eq!(goal_reminders(&goals, today(), &overflow).len(), 2);

        let year = Thresholds {
            imminent_days: MAX_IMMINENT_DAYS,
            ..Thresholds::default()
        };
        let days: Vec<i64> = goal_reminders(&goals, today(), &year)
            .iter()
            .map(|r| r.days_left)
            .collect();
        assert_eq!(days, vec![200]);
    }

    #[tokio::test]
    async fn test_unsent_alerts_dedup_per_day() {
        let temp_dir = TempDir::new().unwrap();
        let ledger = NotificationLedger::new(temp_dir.path().join("notifications.jsonl"));
        let alerts = vec![
            Alert::Budget(budget_alerts(&[budget(100, 90)], &Thresholds::default()).remove(0)),
            Alert::Goal(goal_reminders(&[goal(1, 0, true)], today(), &Thresholds::default()).remove(0)),
        ];

        let first = unsent_alerts(&ledger, alerts.clone(), today()).await.unwrap();
        assert_eq!(first.len(), 2);

        let again = unsent_alerts(&ledger, alerts.clone(), today()).await.unwrap();
        assert!(again.is_empty());

        let tomorrow = today() + Duration::days(1);
        let next_day = unsent_alerts(&ledger, alerts, tomorrow).await.unwrap();
        assert_eq!(next_day.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_in_same_batch_raised_once() {
        let store = MemoryStore::new();
        let alert = Alert::Budget(budget_alerts(&[budget(100, 95)], &Thresholds::default()).remove(0));

        let fresh = unsent_alerts(&store, vec![alert.clone(), alert.clone()], today())
            .await
            .unwrap();
        assert_eq!(fresh.len(), 1);
        assert!(store.sent_on(today()).await.unwrap().contains(&alert.signature()));
    }

    #[tokio::test]
    async fn test_record_failure_is_reported() {
        let store = MemoryStore::new();
        store.inject_failure(StoreCall::RecordNotification).unwrap();
        let alert = Alert::Budget(budget_alerts(&[budget(100, 95)], &Thresholds::default()).remove(0));

        let err = unsent_alerts(&store, vec![alert.clone()], today())
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::Store(_)));

        store.restore(StoreCall::RecordNotification).unwrap();
        let fresh = unsent_alerts(&store, vec![alert], today()).await.unwrap();
        assert_eq!(fresh.len(), 1);
    }

    #[test]
    fn test_signature_and_display() {
        let reminder = goal_reminders(&[goal(2, 50, true)], today(), &Thresholds::default()).remove(0);
        let alert = Alert::Goal(reminder.clone());
        assert!(alert.signature().starts_with("[GOAL_REMINDER][goal_id="));
        assert!(alert.to_string().contains("$250.00 remaining"));
    }
}
