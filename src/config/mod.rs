//! Configuration module for MoneyPal
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Status and reminder thresholds

pub mod paths;
pub mod settings;

pub use paths::MoneyPalPaths;
pub use settings::{Settings, Thresholds, MAX_IMMINENT_DAYS};
