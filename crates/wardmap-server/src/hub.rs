//! Subscriber registry for the realtime status channel.
//!
//! [`ChannelHub`] owns the registry outright: a subscriber is an audience
//! tag plus the sending half of an unbounded channel, keyed by a
//! process-unique id. The hub is transport-agnostic -- the `WebSocket`
//! layer and the test harness drive it through the same API.
//!
//! Delivery is fire-and-forget per subscriber: a send to a dropped
//! receiver evicts that subscriber and never affects delivery to the
//! rest, nor the mutation that triggered the publish.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, mpsc};
use tracing::debug;
use wardmap_types::{Audience, ChannelMessage};

/// Process-unique identifier for one subscriber connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One registered connection: its audience and its outbound queue.
#[derive(Debug)]
struct Subscriber {
    audience: Audience,
    tx: mpsc::UnboundedSender<ChannelMessage>,
}

/// Registry of live subscribers, keyed by audience membership.
#[derive(Debug, Default)]
pub struct ChannelHub {
    next_id: AtomicU64,
    subscribers: Mutex<HashMap<SubscriberId, Subscriber>>,
}

impl ChannelHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection under the given audience.
    ///
    /// Returns the subscriber id and the receiving half of its message
    /// queue. Messages arrive on the queue in the order they were
    /// published.
    pub async fn register(
        &self,
        audience: Audience,
    ) -> (SubscriberId, mpsc::UnboundedReceiver<ChannelMessage>) {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .await
            .insert(id, Subscriber { audience, tx });
        (id, rx)
    }

    /// Remove a connection from whichever audience it belonged to.
    ///
    /// Idempotent: removing an already-removed subscriber is a no-op.
    pub async fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers.lock().await.remove(&id);
    }

    /// Deliver a message to a single subscriber.
    ///
    /// Used for the join-time snapshot. A failed send evicts the
    /// subscriber, same as during a publish.
    pub async fn send_to(&self, id: SubscriberId, message: ChannelMessage) {
        let mut subscribers = self.subscribers.lock().await;
        let failed = subscribers
            .get(&id)
            .is_some_and(|sub| sub.tx.send(message).is_err());
        if failed {
            debug!(subscriber = %id, "subscriber gone before targeted send, evicting");
            subscribers.remove(&id);
        }
    }

    /// Deliver a message to every viewer subscriber.
    ///
    /// Operators are skipped. Returns the number of viewers the message
    /// was queued for. Subscribers whose receiving half is gone are
    /// evicted; their failure never blocks the others.
    pub async fn publish_update(&self, message: &ChannelMessage) -> usize {
        let mut subscribers = self.subscribers.lock().await;

        let mut delivered: usize = 0;
        let mut dead = Vec::new();
        for (id, sub) in subscribers.iter() {
            if sub.audience != Audience::Viewer {
                continue;
            }
            if sub.tx.send(message.clone()).is_ok() {
                delivered = delivered.saturating_add(1);
            } else {
                dead.push(*id);
            }
        }

        for id in dead {
            debug!(subscriber = %id, "subscriber gone during publish, evicting");
            subscribers.remove(&id);
        }

        delivered
    }

    /// Number of registered subscribers in the given audience.
    pub async fn audience_count(&self, audience: Audience) -> usize {
        self.subscribers
            .lock()
            .await
            .values()
            .filter(|sub| sub.audience == audience)
            .count()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use wardmap_types::{DistrictId, Status};

    use super::*;

    fn update(district: &str) -> ChannelMessage {
        ChannelMessage::StatusUpdate {
            district: DistrictId::from(district),
            status: Status::Warning,
            color: Status::Warning.color().to_owned(),
        }
    }

    #[tokio::test]
    async fn publishes_to_viewers_only() {
        let hub = ChannelHub::new();
        let (_viewer, mut viewer_rx) = hub.register(Audience::Viewer).await;
        let (_operator, mut operator_rx) = hub.register(Audience::Operator).await;

        let delivered = hub.publish_update(&update("ward-a")).await;
        assert_eq!(delivered, 1);

        assert_eq!(viewer_rx.recv().await, Some(update("ward-a")));
        assert!(operator_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn dead_subscriber_does_not_block_the_rest() {
        let hub = ChannelHub::new();
        let (_gone, gone_rx) = hub.register(Audience::Viewer).await;
        let (_live, mut live_rx) = hub.register(Audience::Viewer).await;

        drop(gone_rx);

        let delivered = hub.publish_update(&update("ward-a")).await;
        assert_eq!(delivered, 1);
        assert_eq!(live_rx.recv().await, Some(update("ward-a")));

        // The dead subscriber was evicted.
        assert_eq!(hub.audience_count(Audience::Viewer).await, 1);
    }

    #[tokio::test]
    async fn messages_arrive_in_publish_order() {
        let hub = ChannelHub::new();
        let (_id, mut rx) = hub.register(Audience::Viewer).await;

        hub.publish_update(&update("ward-a")).await;
        hub.publish_update(&update("ward-b")).await;
        hub.publish_update(&update("ward-c")).await;

        assert_eq!(rx.recv().await, Some(update("ward-a")));
        assert_eq!(rx.recv().await, Some(update("ward-b")));
        assert_eq!(rx.recv().await, Some(update("ward-c")));
    }

    #[tokio::test]
    async fn unsubscribe_is_idempotent() {
        let hub = ChannelHub::new();
        let (id, _rx) = hub.register(Audience::Viewer).await;

        hub.unsubscribe(id).await;
        hub.unsubscribe(id).await;

        assert_eq!(hub.audience_count(Audience::Viewer).await, 0);
    }
}
