//! Append-only activity log writer
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{HubError, HubResult};

use super::entry::ActivityEntry;

/// Handles writing activity entries to the log file (JSONL)
pub struct ActivityLogger {
    log_path: PathBuf,
}

impl ActivityLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry and flush
    pub fn log(&self, entry: &ActivityEntry) -> HubResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| HubError::Io(format!("Failed to open activity log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| HubError::Json(format!("Failed to serialize activity entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| HubError::Io(format!("Failed to write activity entry: {}", e)))?;

        file.flush()
            .map_err(|e| HubError::Io(format!("Failed to flush activity log: {}", e)))?;

        Ok(())
    }

    /// Read all entries, oldest first
    ///
    /// Lines that fail to parse are skipped with a warning so one bad write
    /// never hides the rest of the feed.
    pub fn read_all(&self) -> HubResult<Vec<ActivityEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| HubError::Io(format!("Failed to open activity log: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                HubError::Io(format!(
                    "Failed to read activity log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<ActivityEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!(line = line_num + 1, error = %e, "skipping activity entry"),
            }
        }

        Ok(entries)
    }

    /// The most recent `count` entries, newest first
    pub fn read_recent(&self, count: usize) -> HubResult<Vec<ActivityEntry>> {
        let mut entries = self.read_all()?;
        entries.reverse();
        entries.truncate(count);
        Ok(entries)
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityKind;
    use tempfile::TempDir;

    fn create_test_logger() -> (ActivityLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = ActivityLogger::new(temp_dir.path().join("activity.log"));
        (logger, temp_dir)
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let (logger, _temp) = create_test_logger();
        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_recent_is_newest_first() {
        let (logger, _temp) = create_test_logger();
        for i in 0..5 {
            logger
                .log(&ActivityEntry::new(
                    ActivityKind::BookingCreated,
                    format!("bkg-0000000{}", i),
                ))
                .unwrap();
        }

        let recent = logger.read_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].subject_id, "bkg-00000004");
        assert_eq!(recent[1].subject_id, "bkg-00000003");
        assert_eq!(logger.read_all().unwrap().len(), 5);
    }

    #[test]
    fn test_corrupt_line_is_skipped() {
        let (logger, _temp) = create_test_logger();
        logger
            .log(&ActivityEntry::new(ActivityKind::UserSuspended, "usr-1"))
            .unwrap();
        std::fs::OpenOptions::new()
            .append(true)
            .open(logger.path())
            .unwrap()
            .write_all(b"{broken\n")
            .unwrap();
        logger
            .log(&ActivityEntry::new(ActivityKind::UserReinstated, "usr-1"))
            .unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].kind, ActivityKind::UserReinstated);
    }
}
