use serde::{Deserialize, Serialize};

use crate::models::error::CaptureError;
use crate::models::prediction::Prediction;
use crate::traits::key_value_store::KeyValueStore;

pub const SCAN_LOG_KEY: &str = "ecoscan_logs";
pub const SCAN_LOG_CAPACITY: usize = 200;

/// One confirmed scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanLogEntry {
    /// Unix milliseconds.
    pub when: i64,
    pub label: String,
    pub category: String,
    pub confidence: f32,
    pub artifact_name: String,
}

impl ScanLogEntry {
    pub fn from_prediction(prediction: &Prediction, artifact_name: &str, when: i64) -> Self {
        Self {
            when,
            label: prediction.label.clone(),
            category: prediction.category.clone(),
            confidence: prediction.confidence,
            artifact_name: artifact_name.to_string(),
        }
    }
}

/// Capped, newest-first log of confirmed scans kept in a `KeyValueStore`
/// as a JSON array.
pub struct ScanLog<S: KeyValueStore> {
    store: S,
    capacity: usize,
}

impl<S: KeyValueStore> ScanLog<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            capacity: SCAN_LOG_CAPACITY,
        }
    }

    pub fn with_capacity(store: S, capacity: usize) -> Self {
        Self { store, capacity }
    }

    /// Prepend `entry`, dropping the oldest entries beyond capacity.
    pub fn record(&self, entry: ScanLogEntry) -> Result<(), CaptureError> {
        let mut entries = self.entries();
        entries.insert(0, entry);
        entries.truncate(self.capacity);

        let json = serde_json::to_string(&entries)
            .map_err(|e| CaptureError::StorageError(format!("failed to serialize scan log: {}", e)))?;
        self.store.set(SCAN_LOG_KEY, json)
    }

    /// All entries, newest first. Unreadable stored data counts as empty.
    pub fn entries(&self) -> Vec<ScanLogEntry> {
        let Some(json) = self.store.get(SCAN_LOG_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&json) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Discarding unreadable scan log: {}", e);
                Vec::new()
            }
        }
    }

    pub fn clear(&self) -> Result<(), CaptureError> {
        self.store.clear(SCAN_LOG_KEY)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
