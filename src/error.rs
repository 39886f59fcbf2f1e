//! Custom error types for MoneyPal
//!
//! This module defines the error hierarchy for the budget and goal core using
//! thiserror. Validation kinds are raised locally before any store call; store
//! kinds wrap a collaborator failure together with what was being attempted.

use std::fmt;

use thiserror::Error;

use crate::models::Money;

/// The entity a failed store mutation was acting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Category,
    Budget,
    Goal,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::Budget => write!(f, "budget"),
            Self::Goal => write!(f, "goal"),
        }
    }
}

/// The store operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOp {
    Create,
    Update,
    Delete,
    Contribute,
}

impl fmt::Display for MutationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::Contribute => write!(f, "contribute to"),
        }
    }
}

/// The main error type for MoneyPal operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// Contribution amount is not a positive, finite number
    #[error("Please enter a valid amount greater than 0")]
    InvalidAmount,

    /// The goal has already reached its target
    #[error("This goal is already fully funded")]
    GoalAlreadyFunded,

    /// The contribution would push the goal past its target
    #[error("Amount exceeds remaining goal by {excess}. Max allowed: {remaining}")]
    ExceedsRemaining { excess: Money, remaining: Money },

    /// The inline category creation request was rejected
    #[error("Failed to add custom category: {0}")]
    CategoryCreationFailed(String),

    /// The combined categories/budgets/goals refresh failed
    #[error("Failed to load budgets/goals: {0}")]
    AggregateLoadFailed(String),

    /// A create/update/delete/contribute call was rejected by the store
    #[error("Failed to {op} {entity}: {reason}")]
    MutationFailed {
        entity: EntityKind,
        op: MutationOp,
        reason: String,
    },

    /// Form field validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// No authenticated user in the injected session
    #[error("Not logged in")]
    Unauthenticated,

    /// Raw failure reported by a collaborator store
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl TrackerError {
    /// Wrap a store failure as a failed mutation
    pub fn mutation_failed(entity: EntityKind, op: MutationOp, source: TrackerError) -> Self {
        Self::MutationFailed {
            entity,
            op,
            reason: source.reason(),
        }
    }

    /// Create a "not found" error for goals
    pub fn goal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Goal",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// The message without the outer wrapper, for nesting inside another error
    pub fn reason(&self) -> String {
        match self {
            Self::Store(msg) | Self::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// Check if this error was raised before any store call
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount
                | Self::GoalAlreadyFunded
                | Self::ExceedsRemaining { .. }
                | Self::Validation(_)
        )
    }

    /// Check if this error came back from a collaborator store
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            Self::CategoryCreationFailed(_)
                | Self::AggregateLoadFailed(_)
                | Self::MutationFailed { .. }
                | Self::Store(_)
        )
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for MoneyPal operations
pub type TrackerResult<T> = Result<T, TrackerError>;
