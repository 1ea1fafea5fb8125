use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("history file is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub command: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Timestamp in local time, for display.
    pub fn local_timestamp(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

/// Recently issued commands, newest first, bounded.
pub trait HistoryStore: Send {
    fn record(&mut self, command: &str, at: DateTime<Utc>) -> Result<(), HistoryError>;
    fn entries(&self) -> Vec<HistoryEntry>;
    fn clear(&mut self) -> Result<(), HistoryError>;
}

#[derive(Debug, Clone)]
struct Ring {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Ring {
    fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }
}

/// Volatile store, used by tests and when persistence is disabled.
#[derive(Debug, Clone)]
pub struct InMemoryHistoryStore {
    ring: Ring,
}

impl InMemoryHistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self { ring: Ring::new(capacity) }
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn record(&mut self, command: &str, at: DateTime<Utc>) -> Result<(), HistoryError> {
        self.ring.push(HistoryEntry { command: command.to_string(), timestamp: at });
        Ok(())
    }

    fn entries(&self) -> Vec<HistoryEntry> {
        self.ring.entries.iter().cloned().collect()
    }

    fn clear(&mut self) -> Result<(), HistoryError> {
        self.ring.entries.clear();
        Ok(())
    }
}

/// JSON file store. The whole ring is rewritten after every change.
pub struct FileHistoryStore {
    path: PathBuf,
    ring: Ring,
}

impl FileHistoryStore {
    /// Opens the store, loading any entries already on disk.
    pub fn open(path: PathBuf, capacity: usize) -> Result<Self, HistoryError> {
        let mut store = Self { path, ring: Ring::new(capacity) };
        store.load()?;
        Ok(store)
    }

    fn load(&mut self) -> Result<(), HistoryError> {
        if !self.path.exists() {
            return Ok(());
        }
        let content = fs::read_to_string(&self.path)?;
        let entries: Vec<HistoryEntry> = serde_json::from_str(&content)?;
        self.ring.entries = entries.into_iter().take(self.ring.capacity).collect();
        Ok(())
    }

    fn save(&self) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.ring.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl HistoryStore for FileHistoryStore {
    fn record(&mut self, command: &str, at: DateTime<Utc>) -> Result<(), HistoryError> {
        self.ring.push(HistoryEntry { command: command.to_string(), timestamp: at });
        self.save()
    }

    fn entries(&self) -> Vec<HistoryEntry> {
        self.ring.entries.iter().cloned().collect()
    }

    fn clear(&mut self) -> Result<(), HistoryError> {
        self.ring.entries.clear();
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, minute, 0).unwrap()
    }

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("golu-history-{}", Uuid::new_v4()))
            .join("history.json")
    }

    #[test]
    fn newest_first_and_capped() {
        let mut store = InMemoryHistoryStore::default();
        for i in 0..12 {
            store.record(&format!("command {}", i), at(i)).unwrap();
        }
        let entries = store.entries();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].command, "command 11");
        assert_eq!(entries[9].command, "command 2");
    }

    #[test]
    fn file_store_survives_reopen() {
        let path = temp_path();
        {
            let mut store = FileHistoryStore::open(path.clone(), 10).unwrap();
            store.record("open youtube", at(1)).unwrap();
            store.record("what is 5 plus 7", at(2)).unwrap();
        }

        let store = FileHistoryStore::open(path.clone(), 10).unwrap();
        let entries = store.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].command, "what is 5 plus 7");
        assert_eq!(entries[1].timestamp, at(1));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn clear_persists() {
        let path = temp_path();
        let mut store = FileHistoryStore::open(path.clone(), 10).unwrap();
        store.record("hello", at(0)).unwrap();
        store.clear().unwrap();

        let reopened = FileHistoryStore::open(path.clone(), 10).unwrap();
        assert!(reopened.entries().is_empty());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let path = temp_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let result = FileHistoryStore::open(path.clone(), 10);
        assert!(matches!(result, Err(HistoryError::Serialization(_))));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
