//! Durable, bounded leaderboard of best streaks.
//!
//! Records are kept sorted by duration descending and truncated to the top N
//! (default 10). The on-disk format is a versioned JSON document:
//!
//! ```json
//! { "version": 1, "records": [ ... ] }
//! ```
//!
//! A missing or corrupt file, or a file written by a newer schema, degrades
//! to an empty store with a warning. Persistence must never take the host
//! down with it.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CoreError, StoreError};
use crate::profile::NicotineType;
use crate::storage::data_dir;

/// Current on-disk schema version.
const RECORDS_VERSION: u32 = 1;

/// Default leaderboard capacity.
pub const DEFAULT_CAPACITY: usize = 10;

fn default_user_name() -> String {
    "User".to_string()
}

/// A finished streak. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    /// Instant the streak ended.
    pub ended_at: DateTime<Utc>,
    pub duration_seconds: u64,
    #[serde(default = "default_user_name")]
    pub user_name: String,
    #[serde(default)]
    pub nicotine_type: NicotineType,
}

#[derive(Debug, Serialize, Deserialize)]
struct RecordsFile {
    version: u32,
    records: Vec<StreakRecord>,
}

/// Ordered, capacity-bounded collection of streak records.
///
/// Invariants: always sorted descending by `duration_seconds` (stable, so
/// equal durations keep insertion order) and never longer than `capacity`.
pub struct RecordStore {
    path: PathBuf,
    capacity: usize,
    records: Vec<StreakRecord>,
}

impl RecordStore {
    /// Open the store at `<data_dir>/records.json`.
    ///
    /// # Errors
    /// Returns an error only if the data directory cannot be resolved; a
    /// missing or unreadable records file just yields an empty store.
    pub fn open_default() -> Result<Self, CoreError> {
        Ok(Self::open(data_dir()?.join("records.json")))
    }

    /// Open the store at an explicit path with the default capacity.
    pub fn open(path: PathBuf) -> Self {
        Self::with_capacity(path, DEFAULT_CAPACITY)
    }

    /// Open the store with a custom capacity bound.
    pub fn with_capacity(path: PathBuf, capacity: usize) -> Self {
        let records = match Self::load(&path) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = ?path, error = %e, "failed to load records, starting empty");
                Vec::new()
            }
        };
        let mut store = Self {
            path,
            capacity,
            records,
        };
        // Re-establish the invariants in case the file was edited by hand.
        store.records
            .sort_by(|a, b| b.duration_seconds.cmp(&a.duration_seconds));
        store.records.truncate(store.capacity);
        store
    }

    fn load(path: &Path) -> Result<Vec<StreakRecord>, StoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::ReadFailed {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let file: RecordsFile =
            serde_json::from_str(&content).map_err(|e| StoreError::ParseFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        if file.version != RECORDS_VERSION {
            return Err(StoreError::UnsupportedVersion {
                path: path.to_path_buf(),
                found: file.version,
            });
        }
        Ok(file.records)
    }

    /// Insert a record, keeping the list sorted and bounded, and persist.
    ///
    /// A failed save is logged and the in-memory update kept; the previous
    /// on-disk state stays intact until the next successful save.
    pub fn add(&mut self, record: StreakRecord) {
        self.records.push(record);
        self.records
            .sort_by(|a, b| b.duration_seconds.cmp(&a.duration_seconds));
        self.records.truncate(self.capacity);
        if let Err(e) = self.save() {
            warn!(path = ?self.path, error = %e, "failed to persist records");
        }
    }

    /// Write the store to disk.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self) -> Result<(), StoreError> {
        let file = RecordsFile {
            version: RECORDS_VERSION,
            records: self.records.clone(),
        };
        let content = serde_json::to_string_pretty(&file).map_err(|e| StoreError::ParseFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&self.path, content).map_err(|source| StoreError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }

    /// Best recorded streak in seconds, or 0 if there are no records.
    pub fn personal_best(&self) -> u64 {
        self.records
            .first()
            .map(|r| r.duration_seconds)
            .unwrap_or(0)
    }

    /// Records ordered best-first.
    pub fn records(&self) -> &[StreakRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all records and persist the empty store.
    pub fn clear(&mut self) {
        self.records.clear();
        if let Err(e) = self.save() {
            warn!(path = ?self.path, error = %e, "failed to persist cleared records");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(duration: u64, name: &str) -> StreakRecord {
        StreakRecord {
            ended_at: Utc::now(),
            duration_seconds: duration,
            user_name: name.to_string(),
            nicotine_type: NicotineType::Cigarettes,
        }
    }

    fn temp_store() -> (tempfile::TempDir, RecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path().join("records.json"));
        (dir, store)
    }

    #[test]
    fn empty_store_has_zero_best() {
        let (_dir, store) = temp_store();
        assert!(store.is_empty());
        assert_eq!(store.personal_best(), 0);
    }

    #[test]
    fn add_sets_personal_best() {
        let (_dir, mut store) = temp_store();
        store.add(record(45, "Alice"));
        assert_eq!(store.personal_best(), 45);
    }

    #[test]
    fn capacity_drops_lowest_duration() {
        let (_dir, mut store) = temp_store();
        store.add(record(45, "Alice"));
        for d in 1..=11 {
            store.add(record(d, "Alice"));
        }
        assert_eq!(store.len(), 10);
        assert_eq!(store.personal_best(), 45);
        // duration=1 was dropped first, then duration=2.
        assert!(store.records().iter().all(|r| r.duration_seconds >= 3));
    }

    #[test]
    fn equal_durations_keep_insertion_order() {
        let (_dir, mut store) = temp_store();
        store.add(record(10, "first"));
        store.add(record(10, "second"));
        store.add(record(10, "third"));
        let names: Vec<&str> = store.records().iter().map(|r| r.user_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn save_load_roundtrip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let mut store = RecordStore::open(path.clone());
        store.add(record(30, "a"));
        store.add(record(99, "b"));
        store.add(record(7, "c"));

        let reloaded = RecordStore::open(path);
        let durations: Vec<u64> = reloaded
            .records()
            .iter()
            .map(|r| r.duration_seconds)
            .collect();
        assert_eq!(durations, vec![99, 30, 7]);
    }

    #[test]
    fn corrupt_file_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, "not json {{").unwrap();
        let store = RecordStore::open(path);
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_schema_version_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, r#"{"version": 99, "records": []}"#).unwrap();
        let store = RecordStore::open(path);
        assert!(store.is_empty());
    }

    #[test]
    fn missing_record_fields_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(
            &path,
            r#"{"version": 1, "records": [
                {"ended_at": "2025-01-02T03:04:05Z", "duration_seconds": 120}
            ]}"#,
        )
        .unwrap();
        let store = RecordStore::open(path);
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].user_name, "User");
        assert_eq!(store.records()[0].nicotine_type, NicotineType::Cigarettes);
    }

    #[test]
    fn clear_empties_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let mut store = RecordStore::open(path.clone());
        store.add(record(10, "a"));
        store.clear();
        assert!(store.is_empty());
        assert!(RecordStore::open(path).is_empty());
    }

    proptest! {
        #[test]
        fn stays_sorted_and_bounded(durations in proptest::collection::vec(0u64..100_000, 0..40)) {
            let (_dir, mut store) = temp_store();
            for d in durations {
                store.add(record(d, "p"));
                prop_assert!(store.len() <= DEFAULT_CAPACITY);
                prop_assert!(store
                    .records()
                    .windows(2)
                    .all(|w| w[0].duration_seconds >= w[1].duration_seconds));
            }
        }
    }
}
