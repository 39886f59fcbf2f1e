//! MoneyPal - budgets and savings goals client core
//!
//! This library holds the logic behind a personal-finance budgets & goals
//! screen: classifying budget spend, computing goal progress, validating
//! contributions, creating categories inline from a form, and reloading
//! categories, budgets and goals as one unit. Persistence is delegated to
//! injected stores.
//!
//! # Architecture
//!
//! - `config`: Configuration, paths and thresholds
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `auth`: Injected authentication collaborator
//! - `models`: Categories, budgets, goals, ids and money
//! - `storage`: Store traits, the in-memory store and the notification ledger
//! - `forms`: Budget and goal form state
//! - `services`: Classifiers, validator, loader, coordinator and session
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use moneypal::auth::StaticSession;
//! use moneypal::config::{MoneyPalPaths, Settings};
//! use moneypal::services::BudgetGoalSession;
//! use moneypal::storage::{MemoryStore, Stores};
//!
//! let paths = MoneyPalPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! moneypal::logging::init_tracing(&settings)?;
//!
//! let stores = Stores::shared(Arc::new(MemoryStore::new()));
//! let auth = Arc::new(StaticSession::logged_in(user_id));
//! let mut session = BudgetGoalSession::new(stores, auth, settings.thresholds);
//! session.reload().await?;
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod forms;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
