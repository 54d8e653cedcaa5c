//! Single-integer high score persistence
//!
//! The simulation only ever reads one stored integer at startup and writes
//! one when the run's score exceeds it. Storage failures belong to the
//! external layer; an unavailable value is treated as "no high score yet".

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Storage seam for the single high score value
pub trait ScoreStore {
    /// Read the stored high score, `None` if unavailable
    fn get(&self) -> Option<u32>;
    /// Persist a new high score (errors are swallowed by the implementation)
    fn set(&mut self, score: u32);
}

/// In-memory store for tests and the headless demo
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    value: Option<u32>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self { value: Some(value) }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn get(&self) -> Option<u32> {
        self.value
    }

    fn set(&mut self, score: u32) {
        self.value = Some(score);
    }
}

/// On-disk storage format
#[derive(Debug, Serialize, Deserialize)]
struct StoredScore {
    high_score: u32,
}

/// File-backed store using a tiny JSON document
#[derive(Debug)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for FileScoreStore {
    fn get(&self) -> Option<u32> {
        let json = fs::read_to_string(&self.path).ok()?;
        let stored: StoredScore = serde_json::from_str(&json).ok()?;
        Some(stored.high_score)
    }

    fn set(&mut self, score: u32) {
        let stored = StoredScore { high_score: score };
        match serde_json::to_string(&stored) {
            Ok(json) => {
                if let Err(err) = fs::write(&self.path, json) {
                    log::warn!("Failed to write high score: {}", err);
                }
            }
            Err(err) => log::warn!("Failed to encode high score: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryScoreStore::new();
        assert_eq!(store.get(), None);
        store.set(1200);
        assert_eq!(store.get(), Some(1200));
    }

    #[test]
    fn test_file_store_missing_file_is_none() {
        let store = FileScoreStore::new("/nonexistent/cloudhop_scores.json");
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let path = std::env::temp_dir().join("cloudhop_test_scores.json");
        let mut store = FileScoreStore::new(&path);
        store.set(777);
        assert_eq!(store.get(), Some(777));
        let _ = fs::remove_file(&path);
    }
}
