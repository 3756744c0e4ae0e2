// Portable chart payloads: plain series-of-points, no rendering-library coupling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// One named line on a time-series chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSlice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChartPayload {
    #[serde(rename_all = "camelCase")]
    TimeSeries {
        title: String,
        series: Vec<TimeSeries>,
    },
    #[serde(rename_all = "camelCase")]
    Distribution {
        title: String,
        slices: Vec<DistributionSlice>,
    },
}

/// All dashboard charts for one tick. A kind with no samples yields no chart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_metrics: Option<ChartPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<ChartPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_performance: Option<ChartPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_metrics: Option<ChartPayload>,
}

impl ChartSet {
    pub fn is_empty(&self) -> bool {
        self.system_metrics.is_none()
            && self.response_time.is_none()
            && self.ai_performance.is_none()
            && self.business_metrics.is_none()
    }
}
