//! Broadcast-channel notifier.
//!
//! Fans notification events out to any number of subscribers (a toast
//! container, a log sink). Works within a single process only.

use tokio::sync::broadcast;

use crosspost_core::domain::{Notification, NotificationKind};
use crosspost_core::ports::Notifier;

/// Notifier backed by a tokio broadcast channel.
pub struct ChannelNotifier {
    sender: broadcast::Sender<Notification>,
}

impl ChannelNotifier {
    pub fn new(buffer_size: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer_size);
        Self { sender }
    }

    /// Subscribe to notification events. A subscriber that falls behind the
    /// buffer loses the oldest events, never blocks the emitter.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for ChannelNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, kind: NotificationKind, title: &str, message: &str) {
        let notification = Notification::new(kind, title, message);

        // Ignore send errors (no subscribers)
        if self.sender.send(notification).is_err() {
            tracing::debug!(title = %title, "No notification subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_events() {
        let notifier = ChannelNotifier::default();
        let mut events = notifier.subscribe();

        notifier.notify(NotificationKind::Success, "Post Published!", "done");

        let event = events.recv().await.unwrap();
        assert_eq!(event.kind, NotificationKind::Success);
        assert_eq!(event.title, "Post Published!");
        assert_eq!(event.message, "done");
    }

    #[tokio::test]
    async fn test_emit_without_subscribers_is_harmless() {
        let notifier = ChannelNotifier::default();
        notifier.notify(NotificationKind::Info, "Post Deleted", "gone");
    }
}
