// Shared test helpers

#![allow(dead_code)]

use agentwatch::models::*;
use chrono::{DateTime, TimeZone, Utc};

pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

pub fn system_sample(timestamp: DateTime<Utc>, cpu_percent: f64, memory_percent: f64) -> SystemSample {
    SystemSample {
        timestamp,
        cpu_percent,
        memory_percent,
        disk_usage_percent: 40.0,
        network_io_bytes: NetworkIoBytes {
            bytes_sent: 1_000,
            bytes_recv: 2_000,
        },
        process_count: 120,
        load_average: [0.5, 0.4, 0.3],
    }
}

pub fn application_sample(
    timestamp: DateTime<Utc>,
    error_rate: f64,
    response_time_avg: f64,
) -> ApplicationSample {
    ApplicationSample {
        timestamp,
        active_sessions: 10,
        total_requests: 1_000,
        error_rate,
        response_time_avg,
        response_time_p95: response_time_avg * 2.0,
        response_time_p99: response_time_avg * 3.0,
        cache_hit_rate: 85.5,
        database_connections: 8,
    }
}

pub fn ai_sample(timestamp: DateTime<Utc>) -> AiModelSample {
    AiModelSample {
        timestamp,
        model_name: "test-model".into(),
        total_requests: 100,
        successful_requests: 98,
        failed_requests: 2,
        avg_response_time: 1.0,
        avg_tokens_per_second: 55.0,
        memory_usage_mb: 3_000.0,
        gpu_utilization: 70.0,
    }
}

pub fn business_sample(timestamp: DateTime<Utc>) -> BusinessSample {
    BusinessSample {
        timestamp,
        daily_active_users: 200,
        code_generations: 800,
        chat_interactions: 1_200,
        file_operations: 500,
        deployment_count: 30,
        user_satisfaction_score: 4.5,
    }
}
