//! Path management for MoneyPal
//!
//! Provides XDG-compliant path resolution for the settings file and the
//! notification ledger.
//!
//! ## Path Resolution Order
//!
//! 1. `MONEYPAL_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/moneypal` or `~/.config/moneypal`
//! 3. Windows: `%APPDATA%\moneypal`

use std::path::PathBuf;

use crate::error::TrackerError;

/// Manages all paths used by MoneyPal
#[derive(Debug, Clone)]
pub struct MoneyPalPaths {
    base_dir: PathBuf,
}

impl MoneyPalPaths {
    /// Create a new MoneyPalPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or APPDATA) directory cannot be determined.
    pub fn new() -> Result<Self, TrackerError> {
        let base_dir = if let Ok(custom) = std::env::var("MONEYPAL_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create MoneyPalPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the sent-notification ledger (JSON lines)
    pub fn notifications_file(&self) -> PathBuf {
        self.base_dir.join("notifications.jsonl")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), TrackerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TrackerError::Io(format!("Failed to create base directory: {}", e)))
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, TrackerError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                TrackerError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("moneypal"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, TrackerError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| TrackerError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("moneypal"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyPalPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.notifications_file(),
            temp_dir.path().join("notifications.jsonl")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyPalPaths::with_base_dir(temp_dir.path().join("nested").join("moneypal"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
    }
}
