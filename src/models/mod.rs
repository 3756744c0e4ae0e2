// Wire and domain models

mod aggregate;
mod chart;
mod envelope;
mod sample;
mod summary;

pub use aggregate::{
    ApplicationDailyAggregate, ApplicationHourlyAggregate, DailyAggregate, HourlyAggregate,
    SystemDailyAggregate, SystemHourlyAggregate,
};
pub use chart::{ChartPayload, ChartPoint, ChartSet, DistributionSlice, TimeSeries};
pub use envelope::{DashboardUpdate, UPDATE_TYPE_METRICS};
pub use sample::{AiModelSample, ApplicationSample, BusinessSample, NetworkIoBytes, SystemSample};
pub use summary::{Alert, AlertSeverity, AlertSource, HealthStatus, MetricsSummary};
