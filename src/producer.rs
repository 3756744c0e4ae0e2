// Periodic sample producer: one task per metric kind, each on its own cadence.
// A failed or slow collect logs and skips that tick; the loop only exits on
// shutdown. Appends are single atomic store calls, so cancellation never
// leaves a partial write behind.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval, timeout};

use crate::collectors::SampleSource;
use crate::store::MetricsStore;

#[derive(Debug, Clone)]
pub struct ProducerConfig {
    pub interval: Duration,
    /// Bound on one collect call; a gather slower than this is dropped.
    pub collect_timeout: Duration,
}

pub fn spawn_producer<T, S>(
    kind: &'static str,
    source: Arc<S>,
    store: Arc<MetricsStore>,
    record: fn(&MetricsStore, T),
    config: ProducerConfig,
    mut shutdown_rx: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()>
where
    T: Send + 'static,
    S: SampleSource<T> + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut tick = interval(config.interval);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    match timeout(config.collect_timeout, source.collect()).await {
                        Ok(Ok(sample)) => {
                            record(&store, sample);
                            tracing::debug!(kind, operation = "collect", "sample recorded");
                        }
                        Ok(Err(e)) => {
                            tracing::warn!(
                                error = %e,
                                kind,
                                operation = "collect",
                                "sample collection failed, skipping tick"
                            );
                        }
                        Err(_) => {
                            tracing::warn!(
                                kind,
                                operation = "collect",
                                timeout_secs = config.collect_timeout.as_secs(),
                                "sample collection timed out, skipping tick"
                            );
                        }
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        tracing::debug!(kind, "producer shutting down");
                        break;
                    }
                }
            }
        }
    })
}
