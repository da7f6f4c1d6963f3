//! The post store - owns the post collection for the active session.
//!
//! All mutation goes through this type; readers get cloned snapshots and
//! route writes back through its operations. Every mutation is mirrored to
//! the persistence adapter before the write lock is released, so snapshot
//! writes land in mutation order.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crosspost_core::domain::{NewPost, NotificationKind, Post, PostStatus};
use crosspost_core::ports::Notifier;
use crosspost_core::snapshot::PostSnapshots;

/// Session-scoped store of posts, newest-created-first.
pub struct PostStore {
    posts: RwLock<Vec<Post>>,
    snapshots: PostSnapshots,
    notifier: Arc<dyn Notifier>,
}

impl PostStore {
    /// Open the store, restoring the last persisted snapshot. A missing or
    /// corrupt snapshot starts the session with an empty collection.
    pub async fn open(snapshots: PostSnapshots, notifier: Arc<dyn Notifier>) -> Self {
        let posts = snapshots.load().await;
        if !posts.is_empty() {
            tracing::info!(count = posts.len(), "Restored posts from snapshot");
        }
        Self {
            posts: RwLock::new(posts),
            snapshots,
            notifier,
        }
    }

    /// Create a post from a composer draft. A draft with a delivery time
    /// becomes Scheduled; without one it is Published on the spot. The new
    /// post is prepended, keeping the collection newest-first by insertion.
    ///
    /// Content and platforms are stored as supplied; validation stays with
    /// the composer.
    pub async fn create(&self, draft: NewPost) -> Post {
        let post = Post::compose(draft, Utc::now());

        {
            let mut posts = self.posts.write().await;
            posts.insert(0, post.clone());
            self.persist(&posts).await;
        }

        match post.status {
            PostStatus::Scheduled => {
                if let Some(at) = post.scheduled_at {
                    self.notifier.notify(
                        NotificationKind::Info,
                        "Post Scheduled",
                        &format!("Your post is scheduled for {}.", at.to_rfc3339()),
                    );
                }
            }
            _ => {
                self.notifier.notify(
                    NotificationKind::Success,
                    "Post Published!",
                    "Your post has been successfully published.",
                );
            }
        }

        tracing::debug!(post_id = %post.id, status = ?post.status, "Post created");
        post
    }

    /// Replace the stored post with the same id. Unknown ids are ignored.
    /// Emits no notification; callers decide what an edit means to the user.
    pub async fn update(&self, updated: Post) {
        let mut posts = self.posts.write().await;
        let Some(slot) = posts.iter_mut().find(|p| p.id == updated.id) else {
            return;
        };
        *slot = updated;
        self.persist(&posts).await;
    }

    /// Remove the post with the given id, if present.
    pub async fn delete(&self, id: Uuid) {
        {
            let mut posts = self.posts.write().await;
            posts.retain(|p| p.id != id);
            self.persist(&posts).await;
        }

        // The removal notice fires whether or not anything matched the id.
        self.notifier.notify(
            NotificationKind::Info,
            "Post Deleted",
            "The post has been removed.",
        );
    }

    /// Look up a post by id.
    pub async fn get(&self, id: Uuid) -> Option<Post> {
        let posts = self.posts.read().await;
        posts.iter().find(|p| p.id == id).cloned()
    }

    /// Snapshot of the collection, newest-created-first.
    pub async fn posts(&self) -> Vec<Post> {
        self.posts.read().await.clone()
    }

    /// Publish every Scheduled post whose delivery time has arrived.
    ///
    /// Runs from a recurring timer, so a due post is published at most one
    /// sweep interval after its delivery time. Re-running with nothing due
    /// is a no-op, and a Published post is never promoted again.
    pub async fn promotion_sweep(&self) {
        let now = Utc::now();
        let mut promoted = Vec::new();

        {
            let mut posts = self.posts.write().await;
            for post in posts.iter_mut() {
                if post.is_due(now) {
                    post.status = PostStatus::Published;
                    post.published_at = Some(now);
                    promoted.push(post.clone());
                }
            }
            if !promoted.is_empty() {
                self.persist(&posts).await;
            }
        }

        for post in &promoted {
            self.notifier.notify(
                NotificationKind::Success,
                "Post Published!",
                &format!("Your post to {} has been published.", post.platform_list()),
            );
        }

        if !promoted.is_empty() {
            tracing::info!(count = promoted.len(), "Scheduled posts published");
        }
    }

    /// Drop every post and the persisted snapshot. Reached only through the
    /// session boundary, never from post-editing surfaces.
    pub async fn clear_all(&self) {
        let mut posts = self.posts.write().await;
        posts.clear();
        if let Err(e) = self.snapshots.clear().await {
            tracing::warn!(error = %e, "Failed to clear persisted posts");
        }
        tracing::info!("Post store cleared");
    }

    /// Persistence failures are logged and absorbed; the in-memory state
    /// stays authoritative for the rest of the session.
    async fn persist(&self, posts: &[Post]) {
        if let Err(e) = self.snapshots.save(posts).await {
            tracing::warn!(error = %e, "Failed to persist posts snapshot");
        }
    }
}
