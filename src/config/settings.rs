//! User settings for MoneyPal
//!
//! Holds the log filter and the numeric thresholds used by the budget
//! status classifier, the deadline advisory and the reminder digest.

use serde::{Deserialize, Serialize};

use super::paths::MoneyPalPaths;
use crate::error::TrackerError;

/// Longest deadline window a settings file may ask for
pub const MAX_IMMINENT_DAYS: i64 = 365;

/// Thresholds shared by the status classifier and the alert digest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Fraction of the limit at which a budget turns to "warning"
    #[serde(default = "default_warning_ratio")]
    pub warning_ratio: f64,

    /// A deadline this many days away or fewer is "imminent"
    #[serde(default = "default_imminent_days")]
    pub imminent_days: i64,
}

fn default_warning_ratio() -> f64 {
    0.8
}

fn default_imminent_days() -> i64 {
    3
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning_ratio: default_warning_ratio(),
            imminent_days: default_imminent_days(),
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), TrackerError> {
        if !(self.warning_ratio > 0.0 && self.warning_ratio <= 1.0) {
            return Err(TrackerError::Config(format!(
                "warning_ratio must be in (0, 1], got {}",
                self.warning_ratio
            )));
        }
        if !(0..=MAX_IMMINENT_DAYS).contains(&self.imminent_days) {
            return Err(TrackerError::Config(format!(
                "imminent_days must be between 0 and {}, got {}",
                MAX_IMMINENT_DAYS, self.imminent_days
            )));
        }
        Ok(())
    }
}

/// User settings for MoneyPal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub thresholds: Thresholds,

    /// `tracing` filter directive used when `MONEYPAL_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            thresholds: Thresholds::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &MoneyPalPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TrackerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| TrackerError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.thresholds.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MoneyPalPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TrackerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TrackerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
