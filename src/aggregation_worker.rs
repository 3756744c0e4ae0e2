// Background rollup worker: samples -> hourly buckets, completed days ->
// daily buckets, then retention prune. Buckets are computed once; an hour
// whose rollup fails stays absent and is retried on the next tick.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Days, Timelike, Utc};
use tokio::sync::watch;
use tracing::{instrument, warn};

use crate::models::{
    ApplicationDailyAggregate, ApplicationHourlyAggregate, DailyAggregate, HourlyAggregate,
    SystemDailyAggregate, SystemHourlyAggregate,
};
use crate::store::MetricsStore;

#[derive(Debug, Clone)]
pub struct AggregationWorkerConfig {
    pub interval_secs: u64,
    pub retention_days: u32,
}

/// Hour bucket key, e.g. "2026-08-23-14".
pub fn hour_key(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d-%H").to_string()
}

/// Day bucket key, e.g. "2026-08-23".
pub fn day_key(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

pub fn spawn(
    store: Arc<MetricsStore>,
    config: AggregationWorkerConfig,
    shutdown_rx: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        run(store, config, shutdown_rx).await;
    })
}

#[instrument(skip(store, shutdown_rx), fields(interval_secs = config.interval_secs))]
async fn run(
    store: Arc<MetricsStore>,
    config: AggregationWorkerConfig,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut tick = tokio::time::interval(Duration::from_secs(config.interval_secs));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = tick.tick() => {
                if let Err(e) = run_one_tick(&store, Utc::now(), config.retention_days) {
                    warn!(error = %e, "aggregation tick failed");
                }
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    tracing::debug!("aggregation worker shutting down");
                    break;
                }
            }
        }
    }
}

/// Runs one aggregation pass for the given wall-clock time. Used by the
/// worker loop and directly by tests.
pub fn run_one_tick(store: &MetricsStore, now: DateTime<Utc>, retention_days: u32) -> anyhow::Result<()> {
    let hour = hour_key(now);
    if !store.has_hourly(&hour) {
        let agg = build_hourly_aggregate(store, now);
        store.insert_hourly_aggregate(agg);
        tracing::debug!(bucket = %hour, "hourly aggregate created");
    }

    // Roll up the just-completed day at the first tick past midnight
    if now.hour() == 0 {
        let prev_day = now
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| anyhow::anyhow!("date underflow computing previous day"))?;
        let day = day_key(prev_day);
        if !store.has_daily(&day)
            && let Some(agg) = build_daily_aggregate(store, &day)
        {
            store.insert_daily_aggregate(agg);
            tracing::debug!(bucket = %day, "daily aggregate created");
        }
    }

    let cutoff = now
        .checked_sub_days(Days::new(retention_days as u64))
        .ok_or_else(|| anyhow::anyhow!("date underflow computing retention cutoff"))?;
    let removed = store.prune_aggregates_before(&day_key(cutoff));
    if removed > 0 {
        tracing::debug!(removed, retention_days, "old aggregates pruned");
    }

    Ok(())
}

/// Rolls the trailing one-hour window of samples into the bucket for `now`.
/// Sections for kinds with no samples in the window stay None; the bucket
/// itself is still created so it is not recomputed every tick.
pub fn build_hourly_aggregate(store: &MetricsStore, now: DateTime<Utc>) -> HourlyAggregate {
    let since = now - chrono::Duration::hours(1);

    let system_window = store.system_window(since);
    let system = (!system_window.is_empty()).then(|| {
        let n = system_window.len() as f64;
        SystemHourlyAggregate {
            avg_cpu: system_window.iter().map(|s| s.cpu_percent).sum::<f64>() / n,
            avg_memory: system_window.iter().map(|s| s.memory_percent).sum::<f64>() / n,
            avg_disk: system_window
                .iter()
                .map(|s| s.disk_usage_percent)
                .sum::<f64>()
                / n,
            max_cpu: system_window
                .iter()
                .map(|s| s.cpu_percent)
                .fold(f64::MIN, f64::max),
            max_memory: system_window
                .iter()
                .map(|s| s.memory_percent)
                .fold(f64::MIN, f64::max),
        }
    });

    let app_window = store.application_window(since);
    let application = (!app_window.is_empty()).then(|| {
        let n = app_window.len() as f64;
        ApplicationHourlyAggregate {
            avg_sessions: app_window
                .iter()
                .map(|s| s.active_sessions as f64)
                .sum::<f64>()
                / n,
            avg_response_time: app_window
                .iter()
                .map(|s| s.response_time_avg)
                .sum::<f64>()
                / n,
            avg_error_rate: app_window.iter().map(|s| s.error_rate).sum::<f64>() / n,
            total_requests: app_window.iter().map(|s| s.total_requests).sum(),
        }
    });

    HourlyAggregate {
        bucket: hour_key(now),
        system,
        application,
    }
}

/// Rolls a day's hourly buckets into one daily bucket. Returns None when the
/// day has no hourly entries at all, so no zero-valued entry is created.
pub fn build_daily_aggregate(store: &MetricsStore, day: &str) -> Option<DailyAggregate> {
    let hours: Vec<HourlyAggregate> = (0..24)
        .filter_map(|h| store.hourly_aggregate(&format!("{day}-{h:02}")))
        .collect();
    if hours.is_empty() {
        return None;
    }

    let system_sections: Vec<&SystemHourlyAggregate> =
        hours.iter().filter_map(|h| h.system.as_ref()).collect();
    let system = (!system_sections.is_empty()).then(|| {
        let n = system_sections.len() as f64;
        SystemDailyAggregate {
            avg_cpu: system_sections.iter().map(|s| s.avg_cpu).sum::<f64>() / n,
            max_cpu: system_sections
                .iter()
                .map(|s| s.max_cpu)
                .fold(f64::MIN, f64::max),
            avg_memory: system_sections.iter().map(|s| s.avg_memory).sum::<f64>() / n,
            max_memory: system_sections
                .iter()
                .map(|s| s.max_memory)
                .fold(f64::MIN, f64::max),
        }
    });

    let app_sections: Vec<&ApplicationHourlyAggregate> =
        hours.iter().filter_map(|h| h.application.as_ref()).collect();
    let application = (!app_sections.is_empty()).then(|| {
        let n = app_sections.len() as f64;
        ApplicationDailyAggregate {
            avg_sessions: app_sections.iter().map(|a| a.avg_sessions).sum::<f64>() / n,
            total_requests: app_sections.iter().map(|a| a.total_requests).sum(),
            avg_response_time: app_sections
                .iter()
                .map(|a| a.avg_response_time)
                .sum::<f64>()
                / n,
        }
    });

    Some(DailyAggregate {
        bucket: day.to_string(),
        system,
        application,
    })
}
