// Subscriber registry: channel-per-subscriber fan-out. Each real-time client
// gets its own bounded mpsc channel; broadcast walks the map and prunes any
// subscriber whose channel is closed or full, without aborting delivery to
// the rest. This avoids iterating live sockets under a lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::models::DashboardUpdate;

pub type SubscriberId = u64;

pub struct SubscriberRegistry {
    next_id: AtomicU64,
    subscribers: Mutex<HashMap<SubscriberId, mpsc::Sender<Arc<DashboardUpdate>>>>,
    /// Per-subscriber channel capacity; a client this far behind is dropped.
    buffer: usize,
}

impl SubscriberRegistry {
    pub fn new(buffer: usize) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            subscribers: Mutex::new(HashMap::new()),
            buffer,
        }
    }

    /// Registers a new subscriber and hands back its update stream.
    pub fn connect(&self) -> (SubscriberId, mpsc::Receiver<Arc<DashboardUpdate>>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(self.buffer);
        let total = {
            let mut subs = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
            subs.insert(id, tx);
            subs.len()
        };
        tracing::info!(subscriber_id = id, total, "dashboard subscriber connected");
        (id, rx)
    }

    /// Removes a subscriber. Removing an already-absent id is a no-op.
    pub fn disconnect(&self, id: SubscriberId) {
        let removed = {
            let mut subs = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
            subs.remove(&id).is_some().then(|| subs.len())
        };
        if let Some(total) = removed {
            tracing::info!(subscriber_id = id, total, "dashboard subscriber disconnected");
        }
    }

    pub fn active_count(&self) -> usize {
        let subs = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        subs.len()
    }

    /// Sends `update` to every active subscriber. Failed sends disconnect the
    /// failing subscriber within this call; the rest still receive. Returns
    /// the number of subscribers the update was delivered to.
    pub fn broadcast(&self, update: DashboardUpdate) -> usize {
        let update = Arc::new(update);
        let mut subs = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());

        let mut failed: Vec<SubscriberId> = Vec::new();
        let mut delivered = 0;
        for (&id, tx) in subs.iter() {
            match tx.try_send(update.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(subscriber_id = id, "subscriber channel full, dropping it");
                    failed.push(id);
                }
                Err(TrySendError::Closed(_)) => {
                    failed.push(id);
                }
            }
        }
        for id in failed {
            subs.remove(&id);
            tracing::info!(
                subscriber_id = id,
                total = subs.len(),
                "dashboard subscriber pruned during broadcast"
            );
        }
        delivered
    }
}
