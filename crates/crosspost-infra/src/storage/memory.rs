//! In-memory key-value store - used as fallback when no data directory is
//! configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crosspost_core::StorageError;
use crosspost_core::ports::KeyValueStore;

/// In-memory store using a simple HashMap with async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = InMemoryStore::new();
        store.set("key1", "value1").await.unwrap();
        assert_eq!(store.get("key1").await, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_overwrite() {
        let store = InMemoryStore::new();
        store.set("key1", "value1").await.unwrap();
        store.set("key1", "value2").await.unwrap();
        assert_eq!(store.get("key1").await, Some("value2".to_string()));
    }

    #[tokio::test]
    async fn test_remove() {
        let store = InMemoryStore::new();
        store.set("key1", "value1").await.unwrap();
        store.remove("key1").await.unwrap();
        assert_eq!(store.get("key1").await, None);

        // absent keys remove cleanly
        store.remove("key1").await.unwrap();
    }
}
