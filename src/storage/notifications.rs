//! Sent-notification ledger
//!
//! Remembers which budget alerts and goal reminders were already raised on a
//! given day so a digest run more than once a day does not repeat itself.
//! Each entry is written as a single JSON line and flushed immediately.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::NotificationStore;
use crate::error::{TrackerError, TrackerResult};

/// One raised notification
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub signature: String,
    pub date: NaiveDate,
}

/// Append-only JSONL ledger of raised notifications
pub struct NotificationLedger {
    log_path: PathBuf,
}

impl NotificationLedger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry
    pub fn append(&self, signature: &str, date: NaiveDate) -> TrackerResult<()> {
        let entry = LedgerEntry {
            signature: signature.to_string(),
            date,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| TrackerError::Io(format!("Failed to open notification ledger: {}", e)))?;

        let json = serde_json::to_string(&entry)
            .map_err(|e| TrackerError::Json(format!("Failed to serialize ledger entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| TrackerError::Io(format!("Failed to write ledger entry: {}", e)))?;

        file.flush()
            .map_err(|e| TrackerError::Io(format!("Failed to flush notification ledger: {}", e)))?;

        Ok(())
    }

    /// Read every entry, oldest first
    pub fn read_all(&self) -> TrackerResult<Vec<LedgerEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| TrackerError::Io(format!("Failed to open notification ledger: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                TrackerError::Io(format!("Failed to read ledger line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LedgerEntry = serde_json::from_str(&line).map_err(|e| {
                TrackerError::Json(format!(
                    "Failed to parse ledger entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }
}

#[async_trait]
impl NotificationStore for NotificationLedger {
    async fn sent_on(&self, date: NaiveDate) -> TrackerResult<HashSet<String>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|e| e.date == date)
            .map(|e| e.signature)
            .collect())
    }

    async fn record(&self, signature: &str, date: NaiveDate) -> TrackerResult<()> {
        self.append(signature, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_record_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let ledger = NotificationLedger::new(temp_dir.path().join("notifications.jsonl"));
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();

        assert!(ledger.read_all().unwrap().is_empty());

        ledger.record("[BUDGET_ALERT][budget_id=a]", monday).await.unwrap();
        ledger.append("[GOAL_REMINDER][goal_id=b]", tuesday).unwrap();

        assert_eq!(ledger.read_all().unwrap().len(), 2);
        let sent = ledger.sent_on(monday).await.unwrap();
        assert!(sent.contains("[BUDGET_ALERT][budget_id=a]"));
        assert!(!sent.contains("[GOAL_REMINDER][goal_id=b]"));
    }

    #[test]
    fn test_corrupt_line_reports_line_number() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notifications.jsonl");
        std::fs::write(&path, "\nnot json\n").unwrap();

        let err = NotificationLedger::new(path).read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
