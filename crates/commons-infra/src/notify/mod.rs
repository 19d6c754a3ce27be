//! Broadcast queue implementation of the membership notifier.
//!
//! Built on `tokio::sync::broadcast`, the queue supports multiple concurrent
//! subscribers (newsletter sync, search reindex). Publishing with no active
//! subscribers is a no-op; the commit path never waits on delivery.

use commons_core::notify::MembershipNotifier;
use commons_types::event::MembershipEvent;
use commons_types::user::UserId;
use tokio::sync::broadcast;

/// Multi-consumer queue for membership change events.
///
/// Cloning the queue clones the sender, allowing multiple producers and
/// consumers over the same channel.
pub struct MembershipQueue {
    sender: broadcast::Sender<MembershipEvent>,
}

impl MembershipQueue {
    /// Create a new queue with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a new subscriber that will receive all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<MembershipEvent> {
        self.sender.subscribe()
    }
}

impl MembershipNotifier for MembershipQueue {
    fn membership_changed(&self, user: &UserId) {
        // If there are no subscribers, the event is silently dropped.
        let _ = self.sender.send(MembershipEvent { user: user.clone() });
        tracing::debug!(user = %user, "membership change dispatched");
    }
}

impl Clone for MembershipQueue {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl std::fmt::Debug for MembershipQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MembershipQueue")
            .field("receiver_count", &self.sender.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dispatch_delivers_to_subscriber() {
        let queue = MembershipQueue::new(16);
        let mut rx = queue.subscribe();

        let user = UserId::new();
        queue.membership_changed(&user);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.user, user);
    }

    #[tokio::test]
    async fn multiple_subscribers_each_receive_event() {
        let queue = MembershipQueue::new(16);
        let mut rx1 = queue.subscribe();
        let mut rx2 = queue.subscribe();

        let user = UserId::new();
        queue.membership_changed(&user);

        assert_eq!(rx1.recv().await.unwrap().user, user);
        assert_eq!(rx2.recv().await.unwrap().user, user);
    }

    #[tokio::test]
    async fn dispatch_with_no_subscribers_does_not_panic() {
        let queue = MembershipQueue::new(16);
        queue.membership_changed(&UserId::new());
        queue.membership_changed(&UserId::new());
    }

    #[test]
    fn clone_shares_channel() {
        let queue = MembershipQueue::new(16);
        let queue2 = queue.clone();
        let mut rx = queue.subscribe();

        queue2.membership_changed(&UserId::new());

        assert!(rx.try_recv().is_ok());
    }
}
