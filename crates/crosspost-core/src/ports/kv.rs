use async_trait::async_trait;

use crate::error::StorageError;

/// Key-value store trait - abstraction over local persistence backends
/// (in-memory, file-backed).
///
/// Values are opaque strings; callers layer their own encoding on top.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under a key.
    async fn get(&self, key: &str) -> Option<String>;

    /// Store a value under a key, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
