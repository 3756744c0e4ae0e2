// Synthetic sources for the kinds with no real backing yet. The application
// source drifts its session/request counters between ticks; AI and business
// values are drawn fresh each tick. Real collectors slot in behind the same
// `SampleSource` trait without touching store, summary, or broadcast code.

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;

use super::SampleSource;
use crate::models::{AiModelSample, ApplicationSample, BusinessSample};

struct AppCounters {
    active_sessions: f64,
    total_requests: u64,
    error_count: u64,
}

pub struct SimulatedApplicationSource {
    counters: std::sync::Mutex<AppCounters>,
}

impl Default for SimulatedApplicationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedApplicationSource {
    pub fn new() -> Self {
        Self {
            counters: std::sync::Mutex::new(AppCounters {
                active_sessions: 15.0,
                total_requests: 1250,
                error_count: 12,
            }),
        }
    }
}

#[async_trait]
impl SampleSource<ApplicationSample> for SimulatedApplicationSource {
    async fn collect(&self) -> anyhow::Result<ApplicationSample> {
        let mut rng = rand::thread_rng();

        let (active_sessions, total_requests, error_rate) = {
            let mut c = self
                .counters
                .lock()
                .map_err(|e| anyhow::anyhow!("counters lock poisoned: {}", e))?;
            c.active_sessions += rng.gen_range(-2.0..3.0);
            c.total_requests += 5;
            if rng.gen_bool(0.1) {
                c.error_count += 1;
            }
            let sessions = c.active_sessions.max(1.0) as u32;
            let rate = if c.total_requests > 0 {
                (c.error_count as f64 / c.total_requests as f64) * 100.0
            } else {
                0.0
            };
            (sessions, c.total_requests, rate)
        };

        // Percentiles from a fresh batch of simulated request latencies
        let mut response_times: Vec<f64> = (0..100).map(|_| rng.gen_range(0.1..2.0)).collect();
        response_times.sort_by(|a, b| a.total_cmp(b));
        let response_time_avg = response_times.iter().sum::<f64>() / response_times.len() as f64;
        let response_time_p95 = response_times[95];
        let response_time_p99 = response_times[99];

        Ok(ApplicationSample {
            timestamp: Utc::now(),
            active_sessions,
            total_requests,
            error_rate,
            response_time_avg,
            response_time_p95,
            response_time_p99,
            cache_hit_rate: 85.5,
            database_connections: 8,
        })
    }
}

pub struct SimulatedAiSource {
    model_name: String,
}

impl SimulatedAiSource {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
        }
    }
}

#[async_trait]
impl SampleSource<AiModelSample> for SimulatedAiSource {
    async fn collect(&self) -> anyhow::Result<AiModelSample> {
        let mut rng = rand::thread_rng();
        let total_requests: u64 = rng.gen_range(50..=200);
        let successful_requests = (total_requests as f64 * 0.98) as u64;
        Ok(AiModelSample {
            timestamp: Utc::now(),
            model_name: self.model_name.clone(),
            total_requests,
            successful_requests,
            failed_requests: total_requests - successful_requests,
            avg_response_time: rng.gen_range(0.8..1.2),
            avg_tokens_per_second: rng.gen_range(45.0..65.0),
            memory_usage_mb: rng.gen_range(2000.0..4000.0),
            gpu_utilization: rng.gen_range(60.0..85.0),
        })
    }
}

#[derive(Default)]
pub struct SimulatedBusinessSource;

#[async_trait]
impl SampleSource<BusinessSample> for SimulatedBusinessSource {
    async fn collect(&self) -> anyhow::Result<BusinessSample> {
        let mut rng = rand::thread_rng();
        Ok(BusinessSample {
            timestamp: Utc::now(),
            daily_active_users: rng.gen_range(150..=300),
            code_generations: rng.gen_range(500..=1200),
            chat_interactions: rng.gen_range(800..=2000),
            file_operations: rng.gen_range(300..=800),
            deployment_count: rng.gen_range(20..=50),
            user_satisfaction_score: rng.gen_range(4.2..4.8),
        })
    }
}
