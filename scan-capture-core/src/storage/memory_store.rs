use std::collections::HashMap;

use parking_lot::Mutex;

use crate::models::error::CaptureError;
use crate::traits::key_value_store::KeyValueStore;

/// In-process `KeyValueStore`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) -> Result<(), CaptureError> {
        self.entries.lock().insert(key.to_string(), value);
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), CaptureError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}
