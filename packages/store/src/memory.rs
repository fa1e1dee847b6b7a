use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::tier::KeyValueTier;

/// In-memory tier for tests and native targets.
///
/// Clones share the same map, matching how every handle to `localStorage`
/// sees the same data.
#[derive(Clone, Debug, Default)]
pub struct MemoryTier {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryTier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueTier for MemoryTier {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}
