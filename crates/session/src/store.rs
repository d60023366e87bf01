//! Key/value storage behind the session store.
//!
//! Two namespaces back the session heuristics: a session-scoped one
//! (cleared when the browser session ends) and a persistent one (survives
//! across sessions). The trait keeps storage injectable so the store runs
//! against an in-memory fake in tests.

use std::collections::HashMap;
use std::sync::Mutex;

/// Fixed storage keys.
pub const PAGES_VIEWED_KEY: &str = "analytics_pages_viewed";
pub const SESSION_START_KEY: &str = "analytics_session_start";
pub const LAST_VISIT_KEY: &str = "analytics_last_visit";

/// Synchronous key/value access; reads and writes are effectively
/// instantaneous (local storage).
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage, also the stand-in for browser storage in tests.
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
        }
    }

    /// Drop everything, simulating the end of a browser session.
    pub fn clear(&self) {
        self.values.lock().expect("storage mutex poisoned").clear();
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("storage mutex poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .expect("storage mutex poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.lock().expect("storage mutex poisoned").remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(PAGES_VIEWED_KEY), None);

        storage.set(PAGES_VIEWED_KEY, "3");
        assert_eq!(storage.get(PAGES_VIEWED_KEY), Some("3".to_string()));

        storage.remove(PAGES_VIEWED_KEY);
        assert_eq!(storage.get(PAGES_VIEWED_KEY), None);
    }

    #[test]
    fn test_clear_simulates_session_end() {
        let storage = MemoryStorage::new();
        storage.set(SESSION_START_KEY, "1700000000000");
        storage.set(PAGES_VIEWED_KEY, "5");

        storage.clear();

        assert_eq!(storage.get(SESSION_START_KEY), None);
        assert_eq!(storage.get(PAGES_VIEWED_KEY), None);
    }
}
