// The four metric sample kinds. Immutable once recorded; each stamped at capture time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cumulative network byte counters at capture time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkIoBytes {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

/// Host-level resource usage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSample {
    pub timestamp: DateTime<Utc>,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_usage_percent: f64,
    pub network_io_bytes: NetworkIoBytes,
    pub process_count: u32,
    /// 1, 5 and 15 minute load averages.
    pub load_average: [f64; 3],
}

/// Request-path statistics for the backend itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSample {
    pub timestamp: DateTime<Utc>,
    pub active_sessions: u32,
    pub total_requests: u64,
    /// Percent of requests that errored, 0-100.
    pub error_rate: f64,
    pub response_time_avg: f64,
    pub response_time_p95: f64,
    pub response_time_p99: f64,
    pub cache_hit_rate: f64,
    pub database_connections: u32,
}

/// Model-serving counters and throughput.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiModelSample {
    pub timestamp: DateTime<Utc>,
    pub model_name: String,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub avg_response_time: f64,
    pub avg_tokens_per_second: f64,
    pub memory_usage_mb: f64,
    pub gpu_utilization: f64,
}

/// Product usage counters and KPIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSample {
    pub timestamp: DateTime<Utc>,
    pub daily_active_users: u32,
    pub code_generations: u32,
    pub chat_interactions: u32,
    pub file_operations: u32,
    pub deployment_count: u32,
    /// 1-5 scale.
    pub user_satisfaction_score: f64,
}
