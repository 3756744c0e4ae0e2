// Subscriber registry tests: fan-out, per-subscriber failure isolation, idempotent disconnect

use agentwatch::models::{ChartSet, DashboardUpdate};
use agentwatch::registry::SubscriberRegistry;
use agentwatch::store::MetricsStore;
use agentwatch::summary::summarize;

fn update() -> DashboardUpdate {
    let store = MetricsStore::new(4);
    DashboardUpdate::metrics(summarize(&store), ChartSet::default())
}

#[tokio::test]
async fn broadcast_reaches_every_subscriber() {
    let registry = SubscriberRegistry::new(4);
    let (_id1, mut rx1) = registry.connect();
    let (_id2, mut rx2) = registry.connect();
    assert_eq!(registry.active_count(), 2);

    let delivered = registry.broadcast(update());
    assert_eq!(delivered, 2);
    assert!(rx1.try_recv().is_ok());
    assert!(rx2.try_recv().is_ok());
}

#[tokio::test]
async fn failed_subscriber_is_pruned_without_aborting_broadcast() {
    let registry = SubscriberRegistry::new(4);
    let (_id1, mut rx1) = registry.connect();
    let (_id2, rx2) = registry.connect();
    let (_id3, mut rx3) = registry.connect();

    // Subscriber #2's receiving half is gone; its send fails mid-broadcast
    drop(rx2);

    let delivered = registry.broadcast(update());
    assert_eq!(delivered, 2);
    assert_eq!(registry.active_count(), 2);
    assert!(rx1.try_recv().is_ok());
    assert!(rx3.try_recv().is_ok());

    // Subsequent broadcast reaches only the survivors
    let delivered = registry.broadcast(update());
    assert_eq!(delivered, 2);
    assert!(rx1.try_recv().is_ok());
    assert!(rx3.try_recv().is_ok());
}

#[tokio::test]
async fn slow_subscriber_with_full_buffer_is_dropped() {
    let registry = SubscriberRegistry::new(1);
    let (_id, mut rx) = registry.connect();

    assert_eq!(registry.broadcast(update()), 1);
    // Buffer of 1 is now full and the client has not drained it
    assert_eq!(registry.broadcast(update()), 0);
    assert_eq!(registry.active_count(), 0);

    // The queued message is still readable before the channel reports closed
    assert!(rx.recv().await.is_some());
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn disconnect_is_idempotent() {
    let registry = SubscriberRegistry::new(4);
    let (id, _rx) = registry.connect();
    registry.disconnect(id);
    assert_eq!(registry.active_count(), 0);
    // Absent id: no-op, not an error
    registry.disconnect(id);
    registry.disconnect(9999);
    assert_eq!(registry.active_count(), 0);
}

#[tokio::test]
async fn disconnected_subscriber_sees_channel_close() {
    let registry = SubscriberRegistry::new(4);
    let (id, mut rx) = registry.connect();
    registry.disconnect(id);
    assert!(rx.recv().await.is_none());
}
