// Broadcast service: Idle until started, then one periodic loop that builds
// an update envelope (summary + charts) and fans it out to the registry.
// Any failure inside a tick logs and waits for the next tick.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tracing::instrument;

use crate::charts;
use crate::models::DashboardUpdate;
use crate::registry::SubscriberRegistry;
use crate::store::MetricsStore;
use crate::summary;

#[derive(Debug, Clone)]
pub struct BroadcasterConfig {
    pub refresh_interval_secs: u64,
    pub chart_history_points: usize,
}

pub struct Broadcaster {
    store: Arc<MetricsStore>,
    registry: Arc<SubscriberRegistry>,
    config: BroadcasterConfig,
    running: AtomicBool,
}

impl Broadcaster {
    pub fn new(
        store: Arc<MetricsStore>,
        registry: Arc<SubscriberRegistry>,
        config: BroadcasterConfig,
    ) -> Self {
        Self {
            store,
            registry,
            config,
            running: AtomicBool::new(false),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Transitions Idle -> Running and spawns the broadcast loop. Returns None
    /// if already running; the loop exits when the shutdown watch flips.
    pub fn start(
        self: &Arc<Self>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Option<tokio::task::JoinHandle<()>> {
        if self.running.swap(true, Ordering::SeqCst) {
            tracing::warn!("broadcaster already running, ignoring start");
            return None;
        }
        let this = self.clone();
        Some(tokio::spawn(async move {
            this.run(shutdown_rx).await;
        }))
    }

    #[instrument(skip(self, shutdown_rx), fields(interval_secs = self.config.refresh_interval_secs))]
    async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        let mut tick =
            tokio::time::interval(Duration::from_secs(self.config.refresh_interval_secs));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    let update = self.build_update();
                    let delivered = self.registry.broadcast(update);
                    tracing::debug!(delivered, operation = "broadcast_update", "dashboard update sent");
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        tracing::debug!("broadcaster shutting down");
                        break;
                    }
                }
            }
        }
        self.running.store(false, Ordering::SeqCst);
    }

    /// One tick's envelope: fresh summary plus charts over the recent window.
    pub fn build_update(&self) -> DashboardUpdate {
        let summary = summary::summarize(&self.store);
        let charts = charts::render_charts(&self.store, self.config.chart_history_points);
        DashboardUpdate::metrics(summary, charts)
    }
}
