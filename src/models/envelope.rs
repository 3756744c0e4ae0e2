// Update envelope pushed to every dashboard subscriber each broadcast tick.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChartSet, MetricsSummary};

pub const UPDATE_TYPE_METRICS: &str = "metrics_update";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUpdate {
    #[serde(rename = "type")]
    pub message_type: String,
    pub timestamp: DateTime<Utc>,
    pub summary: MetricsSummary,
    pub charts: ChartSet,
}

impl DashboardUpdate {
    pub fn metrics(summary: MetricsSummary, charts: ChartSet) -> Self {
        Self {
            message_type: UPDATE_TYPE_METRICS.into(),
            timestamp: Utc::now(),
            summary,
            charts,
        }
    }
}
