//! Append-only record store.
//!
//! Analysis records are appended to a JSONL (JSON Lines) file with file
//! locking so several processes can submit at once. Records are written
//! once and never rewritten.

use crate::{AnalysisRecord, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Sink trait for persisting analysis records
pub trait AnalysisSink {
    fn append(&mut self, record: &AnalysisRecord) -> Result<()>;
}

/// JSONL-based record store with file locking
pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    /// Create a new JSONL store for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl AnalysisSink for JsonlStore {
    fn append(&mut self, record: &AnalysisRecord) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        // Serialize the whole line first so a single write lands under the lock
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        let mut writer = std::io::BufWriter::new(&file);
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended analysis {} for user {}", record.id, record.user);
        Ok(())
    }
}

/// Read all records from a store file
///
/// A missing file yields no records. Lines that fail to parse are skipped.
pub fn read_records(path: &Path) -> Result<Vec<AnalysisRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut records = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<AnalysisRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Failed to parse record at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{analyze, get_default_catalog, ActivityLevel, Gender, Measurement};
    use chrono::{Duration, Utc};

    pub(crate) fn create_test_record(user: &str, minutes_ago: i64) -> AnalysisRecord {
        let measurement = Measurement {
            age: 31,
            weight: 61.0,
            height: 163.0,
            gender: Gender::Female,
            activity_level: ActivityLevel::ModeratelyActive,
            bust: 88.0,
            waist: 72.0,
            hip: 98.0,
        };
        let result = analyze(&measurement, get_default_catalog()).unwrap();
        let mut record = AnalysisRecord::new(user, measurement, result);
        record.created_at = Utc::now() - Duration::minutes(minutes_ago);
        record
    }

    #[test]
    fn test_append_and_read_single_record() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("analyses.jsonl");

        let record = create_test_record("somchai", 0);

        let mut store = JsonlStore::new(&path);
        store.append(&record).unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], record);
    }

    #[test]
    fn test_append_creates_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("analyses.jsonl");

        let mut store = JsonlStore::new(&path);
        store.append(&create_test_record("a", 0)).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_corrupt_lines_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("analyses.jsonl");

        let mut store = JsonlStore::new(&path);
        store.append(&create_test_record("a", 2)).unwrap();
        {
            let mut file = OpenOptions::new().append(true).open(&path).unwrap();
            file.write_all(b"{ not json\n\n").unwrap();
        }
        store.append(&create_test_record("b", 1)).unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_read_missing_store() {
        let temp_dir = tempfile::tempdir().unwrap();
        let records = read_records(&temp_dir.path().join("nonexistent.jsonl")).unwrap();
        assert!(records.is_empty());
    }
}
