use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::store::{CacheStore, Namespace};

/// Unbounded in-memory store.
///
/// Callers run one pipeline at a time, so a plain mutex around the map is
/// all the coordination needed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<(Namespace, String), String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<(Namespace, String), String>> {
        // a panic while holding the lock cannot leave a half-written entry
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, namespace: Namespace, key: &str) -> Option<String> {
        let value = self.entries().get(&(namespace, key.to_string())).cloned();
        tracing::debug!(%namespace, hit = value.is_some(), "Cache lookup");
        value
    }

    fn insert(&self, namespace: Namespace, key: String, value: String) {
        self.entries().insert((namespace, key), value);
    }

    fn len(&self) -> usize {
        self.entries().len()
    }

    fn clear(&self) {
        let mut entries = self.entries();
        tracing::info!(count = entries.len(), "Clearing cache");
        entries.clear();
    }
}
