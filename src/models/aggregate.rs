// Hourly and daily rollups, keyed by calendar bucket ("YYYY-MM-DD-HH" / "YYYY-MM-DD").
// A section is None when its kind had no samples in the bucket window.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHourlyAggregate {
    pub avg_cpu: f64,
    pub avg_memory: f64,
    pub avg_disk: f64,
    pub max_cpu: f64,
    pub max_memory: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationHourlyAggregate {
    pub avg_sessions: f64,
    pub avg_response_time: f64,
    pub avg_error_rate: f64,
    pub total_requests: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyAggregate {
    /// Bucket key this aggregate was computed for.
    pub bucket: String,
    pub system: Option<SystemHourlyAggregate>,
    pub application: Option<ApplicationHourlyAggregate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemDailyAggregate {
    pub avg_cpu: f64,
    pub max_cpu: f64,
    pub avg_memory: f64,
    pub max_memory: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDailyAggregate {
    pub avg_sessions: f64,
    pub total_requests: u64,
    pub avg_response_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAggregate {
    pub bucket: String,
    pub system: Option<SystemDailyAggregate>,
    pub application: Option<ApplicationDailyAggregate>,
}
