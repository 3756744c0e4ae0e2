// In-memory metrics store: one bounded FIFO buffer per sample kind plus the
// hourly/daily aggregate maps. Single writer per buffer (its producer), many
// readers (summary engine, charts, aggregator). Guards are never held across
// an await point.
//
// Reads across kinds are independently current: `latest_*` for two kinds may
// reflect different real capture times. There is no joint-capture barrier.

use std::collections::{BTreeMap, VecDeque};
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::models::{
    AiModelSample, ApplicationSample, BusinessSample, DailyAggregate, HourlyAggregate,
    SystemSample,
};

/// Access to the capture timestamp, for window queries.
pub trait Timestamped {
    fn captured_at(&self) -> DateTime<Utc>;
}

impl Timestamped for SystemSample {
    fn captured_at(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Timestamped for ApplicationSample {
    fn captured_at(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Timestamped for AiModelSample {
    fn captured_at(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Timestamped for BusinessSample {
    fn captured_at(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Bounded FIFO ring of samples, oldest first. Push past capacity evicts the
/// oldest entry, so the length never exceeds capacity.
struct SampleBuffer<T> {
    inner: RwLock<VecDeque<T>>,
    capacity: usize,
}

impl<T: Clone + Timestamped> SampleBuffer<T> {
    fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    fn push(&self, sample: T) {
        let mut buf = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if buf.len() == self.capacity {
            buf.pop_front();
        }
        buf.push_back(sample);
    }

    fn latest(&self) -> Option<T> {
        let buf = self.inner.read().unwrap_or_else(|e| e.into_inner());
        buf.back().cloned()
    }

    fn len(&self) -> usize {
        let buf = self.inner.read().unwrap_or_else(|e| e.into_inner());
        buf.len()
    }

    /// Samples with timestamp >= `since`, insertion order.
    fn window(&self, since: DateTime<Utc>) -> Vec<T> {
        let buf = self.inner.read().unwrap_or_else(|e| e.into_inner());
        buf.iter()
            .filter(|s| s.captured_at() >= since)
            .cloned()
            .collect()
    }

    /// The most recent `n` samples, insertion order.
    fn recent(&self, n: usize) -> Vec<T> {
        let buf = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let skip = buf.len().saturating_sub(n);
        buf.iter().skip(skip).cloned().collect()
    }
}

pub struct MetricsStore {
    system: SampleBuffer<SystemSample>,
    application: SampleBuffer<ApplicationSample>,
    ai_model: SampleBuffer<AiModelSample>,
    business: SampleBuffer<BusinessSample>,
    hourly: RwLock<BTreeMap<String, HourlyAggregate>>,
    daily: RwLock<BTreeMap<String, DailyAggregate>>,
}

impl MetricsStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            system: SampleBuffer::new(capacity),
            application: SampleBuffer::new(capacity),
            ai_model: SampleBuffer::new(capacity),
            business: SampleBuffer::new(capacity),
            hourly: RwLock::new(BTreeMap::new()),
            daily: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn record_system(&self, sample: SystemSample) {
        self.system.push(sample);
    }

    pub fn record_application(&self, sample: ApplicationSample) {
        self.application.push(sample);
    }

    pub fn record_ai(&self, sample: AiModelSample) {
        self.ai_model.push(sample);
    }

    pub fn record_business(&self, sample: BusinessSample) {
        self.business.push(sample);
    }

    pub fn latest_system(&self) -> Option<SystemSample> {
        self.system.latest()
    }

    pub fn latest_application(&self) -> Option<ApplicationSample> {
        self.application.latest()
    }

    pub fn latest_ai(&self) -> Option<AiModelSample> {
        self.ai_model.latest()
    }

    pub fn latest_business(&self) -> Option<BusinessSample> {
        self.business.latest()
    }

    pub fn system_len(&self) -> usize {
        self.system.len()
    }

    pub fn application_len(&self) -> usize {
        self.application.len()
    }

    pub fn ai_len(&self) -> usize {
        self.ai_model.len()
    }

    pub fn business_len(&self) -> usize {
        self.business.len()
    }

    pub fn system_window(&self, since: DateTime<Utc>) -> Vec<SystemSample> {
        self.system.window(since)
    }

    pub fn application_window(&self, since: DateTime<Utc>) -> Vec<ApplicationSample> {
        self.application.window(since)
    }

    pub fn recent_system(&self, n: usize) -> Vec<SystemSample> {
        self.system.recent(n)
    }

    pub fn recent_application(&self, n: usize) -> Vec<ApplicationSample> {
        self.application.recent(n)
    }

    pub fn recent_ai(&self, n: usize) -> Vec<AiModelSample> {
        self.ai_model.recent(n)
    }

    pub fn recent_business(&self, n: usize) -> Vec<BusinessSample> {
        self.business.recent(n)
    }

    /// Idempotent: a later write for the same bucket key replaces the entry.
    /// The aggregation worker checks `has_hourly` first, so buckets are in
    /// practice computed once, first-writer-wins.
    pub fn insert_hourly_aggregate(&self, agg: HourlyAggregate) {
        let mut map = self.hourly.write().unwrap_or_else(|e| e.into_inner());
        map.insert(agg.bucket.clone(), agg);
    }

    pub fn insert_daily_aggregate(&self, agg: DailyAggregate) {
        let mut map = self.daily.write().unwrap_or_else(|e| e.into_inner());
        map.insert(agg.bucket.clone(), agg);
    }

    pub fn has_hourly(&self, bucket: &str) -> bool {
        let map = self.hourly.read().unwrap_or_else(|e| e.into_inner());
        map.contains_key(bucket)
    }

    pub fn has_daily(&self, bucket: &str) -> bool {
        let map = self.daily.read().unwrap_or_else(|e| e.into_inner());
        map.contains_key(bucket)
    }

    pub fn hourly_aggregate(&self, bucket: &str) -> Option<HourlyAggregate> {
        let map = self.hourly.read().unwrap_or_else(|e| e.into_inner());
        map.get(bucket).cloned()
    }

    pub fn daily_aggregate(&self, bucket: &str) -> Option<DailyAggregate> {
        let map = self.daily.read().unwrap_or_else(|e| e.into_inner());
        map.get(bucket).cloned()
    }

    pub fn hourly_count(&self) -> usize {
        let map = self.hourly.read().unwrap_or_else(|e| e.into_inner());
        map.len()
    }

    pub fn daily_count(&self) -> usize {
        let map = self.daily.read().unwrap_or_else(|e| e.into_inner());
        map.len()
    }

    /// Deletes daily aggregates keyed strictly before `cutoff_day` and hourly
    /// aggregates from days before it. Hour keys extend day keys
    /// ("YYYY-MM-DD-HH"), so plain string comparison against a day cutoff
    /// orders both correctly.
    pub fn prune_aggregates_before(&self, cutoff_day: &str) -> usize {
        let mut removed = 0;
        {
            let mut daily = self.daily.write().unwrap_or_else(|e| e.into_inner());
            let keep = daily.split_off(cutoff_day);
            removed += daily.len();
            *daily = keep;
        }
        {
            let mut hourly = self.hourly.write().unwrap_or_else(|e| e.into_inner());
            let keep = hourly.split_off(cutoff_day);
            removed += hourly.len();
            *hourly = keep;
        }
        removed
    }
}
