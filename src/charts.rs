// Chart rendering: the most recent N samples per kind reduced to portable
// series-of-points payloads. A kind with an empty buffer yields no chart.

use crate::models::{
    AiModelSample, ApplicationSample, BusinessSample, ChartPayload, ChartPoint, ChartSet,
    DistributionSlice, SystemSample, TimeSeries,
};
use crate::store::MetricsStore;

/// All charts for one dashboard tick, each over at most `history_points` samples.
pub fn render_charts(store: &MetricsStore, history_points: usize) -> ChartSet {
    ChartSet {
        system_metrics: system_resources_chart(&store.recent_system(history_points)),
        response_time: response_time_chart(&store.recent_application(history_points)),
        ai_performance: ai_performance_chart(&store.recent_ai(history_points)),
        business_metrics: business_activity_chart(&store.recent_business(history_points)),
    }
}

fn series<T>(name: &str, samples: &[T], f: impl Fn(&T) -> ChartPoint) -> TimeSeries {
    TimeSeries {
        name: name.into(),
        points: samples.iter().map(f).collect(),
    }
}

/// CPU% and memory% over time.
pub fn system_resources_chart(samples: &[SystemSample]) -> Option<ChartPayload> {
    if samples.is_empty() {
        return None;
    }
    Some(ChartPayload::TimeSeries {
        title: "System Resource Usage".into(),
        series: vec![
            series("CPU Usage (%)", samples, |s| ChartPoint {
                timestamp: s.timestamp,
                value: s.cpu_percent,
            }),
            series("Memory Usage (%)", samples, |s| ChartPoint {
                timestamp: s.timestamp,
                value: s.memory_percent,
            }),
        ],
    })
}

/// Average, p95 and p99 response times.
pub fn response_time_chart(samples: &[ApplicationSample]) -> Option<ChartPayload> {
    if samples.is_empty() {
        return None;
    }
    Some(ChartPayload::TimeSeries {
        title: "Response Time Metrics".into(),
        series: vec![
            series("Average", samples, |s| ChartPoint {
                timestamp: s.timestamp,
                value: s.response_time_avg,
            }),
            series("95th Percentile", samples, |s| ChartPoint {
                timestamp: s.timestamp,
                value: s.response_time_p95,
            }),
            series("99th Percentile", samples, |s| ChartPoint {
                timestamp: s.timestamp,
                value: s.response_time_p99,
            }),
        ],
    })
}

/// Dual series: model response time and token throughput.
pub fn ai_performance_chart(samples: &[AiModelSample]) -> Option<ChartPayload> {
    if samples.is_empty() {
        return None;
    }
    Some(ChartPayload::TimeSeries {
        title: "AI Model Performance".into(),
        series: vec![
            series("Response Time (s)", samples, |s| ChartPoint {
                timestamp: s.timestamp,
                value: s.avg_response_time,
            }),
            series("Tokens/Second", samples, |s| ChartPoint {
                timestamp: s.timestamp,
                value: s.avg_tokens_per_second,
            }),
        ],
    })
}

/// Activity distribution from the latest business sample.
pub fn business_activity_chart(samples: &[BusinessSample]) -> Option<ChartPayload> {
    let latest = samples.last()?;
    Some(ChartPayload::Distribution {
        title: "Daily Activity Distribution".into(),
        slices: vec![
            DistributionSlice {
                label: "Code Generations".into(),
                value: latest.code_generations as f64,
            },
            DistributionSlice {
                label: "Chat Interactions".into(),
                value: latest.chat_interactions as f64,
            },
            DistributionSlice {
                label: "File Operations".into(),
                value: latest.file_operations as f64,
            },
            DistributionSlice {
                label: "Deployments".into(),
                value: latest.deployment_count as f64,
            },
        ],
    })
}
