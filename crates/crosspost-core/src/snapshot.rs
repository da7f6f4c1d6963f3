//! Persistence adapter: encodes the post collection to and from a single
//! key in the local key-value store.
//!
//! Dates travel as ISO-8601 strings under the `scheduledAt`/`publishedAt`
//! keys and come back as timestamps, so `load(save(posts)) == posts`.

use std::sync::Arc;

use crate::domain::Post;
use crate::error::StorageError;
use crate::ports::KeyValueStore;

/// Reads and writes the full post-collection snapshot.
///
/// The store is the single owner of the collection; this adapter holds no
/// copy of its own.
pub struct PostSnapshots {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl PostSnapshots {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Load the last-saved snapshot. Missing, corrupt, or unparsable data
    /// all come back as an empty collection; decode failures never reach
    /// the caller.
    pub async fn load(&self) -> Vec<Post> {
        match self.store.get(&self.key).await {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            None => Vec::new(),
        }
    }

    /// Serialize and write the full snapshot, overwriting prior contents.
    pub async fn save(&self, posts: &[Post]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(posts)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(&self.key, &raw).await
    }

    /// Drop the persisted snapshot entirely.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(&self.key).await
    }
}
