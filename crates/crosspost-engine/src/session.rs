//! Session boundary signaling.
//!
//! The account service announces the end of a session on an explicit
//! broadcast channel; the listener reacts by clearing the post store. The
//! store never inspects user identity itself, it only answers this signal.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::store::PostStore;

/// Zero-payload session lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The active user logged out; session-scoped state must be discarded.
    Ended,
}

/// Broadcast channel for session events. Cloning shares the channel.
#[derive(Clone)]
pub struct SessionBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionBus {
    pub fn new(buffer_size: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer_size);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Announce an event. Nobody listening is fine.
    pub fn publish(&self, event: SessionEvent) {
        if self.sender.send(event).is_err() {
            tracing::debug!(?event, "No session subscribers");
        }
    }
}

impl Default for SessionBus {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Task that clears the post store on every session end.
///
/// Shut it down when the owning runtime tears down, so no clear runs
/// against a store that is already gone.
pub struct SessionListener {
    handle: JoinHandle<()>,
}

impl SessionListener {
    pub fn spawn(store: Arc<PostStore>, mut events: broadcast::Receiver<SessionEvent>) -> Self {
        let handle = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(SessionEvent::Ended) => {
                        tracing::info!("Session ended, clearing posts");
                        store.clear_all().await;
                    }
                    Err(broadcast::error::RecvError::Lagged(count)) => {
                        tracing::warn!(lagged = count, "Session listener lagged behind");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Session bus closed");
                        break;
                    }
                }
            }
        });

        Self { handle }
    }

    /// Stop listening. The store is left as-is.
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crosspost_core::domain::{NewPost, NotificationKind, PlatformName};
    use crosspost_core::ports::{KeyValueStore, Notifier};
    use crosspost_core::snapshot::PostSnapshots;
    use crosspost_infra::InMemoryStore;

    use super::*;

    struct SilentNotifier;

    impl Notifier for SilentNotifier {
        fn notify(&self, _kind: NotificationKind, _title: &str, _message: &str) {}
    }

    #[tokio::test]
    async fn session_end_clears_store_and_snapshot() {
        let kv = Arc::new(InMemoryStore::new());
        let store = Arc::new(
            PostStore::open(
                PostSnapshots::new(kv.clone(), "posts"),
                Arc::new(SilentNotifier),
            )
            .await,
        );
        store
            .create(NewPost {
                content: "session post".to_owned(),
                platforms: vec![PlatformName::X],
                media: None,
                scheduled_at: None,
            })
            .await;

        let bus = SessionBus::default();
        let listener = SessionListener::spawn(store.clone(), bus.subscribe());

        bus.publish(SessionEvent::Ended);
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(store.posts().await.is_empty());
        assert_eq!(kv.get("posts").await, None);

        listener.shutdown();
    }

    #[tokio::test]
    async fn publish_without_listeners_is_harmless() {
        SessionBus::default().publish(SessionEvent::Ended);
    }
}
