// Chart rendering tests: empty-kind omission, history window, payload shapes

mod common;

use agentwatch::charts::{business_activity_chart, render_charts, system_resources_chart};
use agentwatch::models::ChartPayload;
use agentwatch::store::MetricsStore;
use common::*;

#[test]
fn empty_store_renders_no_charts() {
    let store = MetricsStore::new(10);
    let charts = render_charts(&store, 100);
    assert!(charts.is_empty());
}

#[test]
fn kinds_without_samples_are_omitted_not_errors() {
    let store = MetricsStore::new(10);
    store.record_system(system_sample(ts(1), 10.0, 20.0));
    let charts = render_charts(&store, 100);
    assert!(charts.system_metrics.is_some());
    assert!(charts.response_time.is_none());
    assert!(charts.ai_performance.is_none());
    assert!(charts.business_metrics.is_none());
}

#[test]
fn system_chart_has_cpu_and_memory_series() {
    let samples = vec![
        system_sample(ts(1), 10.0, 40.0),
        system_sample(ts(2), 20.0, 50.0),
    ];
    let chart = system_resources_chart(&samples).unwrap();
    let ChartPayload::TimeSeries { title, series } = chart else {
        panic!("expected time series");
    };
    assert_eq!(title, "System Resource Usage");
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].name, "CPU Usage (%)");
    assert_eq!(series[0].points.len(), 2);
    assert_eq!(series[0].points[1].value, 20.0);
    assert_eq!(series[1].name, "Memory Usage (%)");
    assert_eq!(series[1].points[0].value, 40.0);
}

#[test]
fn charts_only_read_most_recent_history_points() {
    let store = MetricsStore::new(100);
    for i in 0..50 {
        store.record_system(system_sample(ts(i), i as f64, 0.0));
    }
    let charts = render_charts(&store, 10);
    let Some(ChartPayload::TimeSeries { series, .. }) = charts.system_metrics else {
        panic!("expected system chart");
    };
    assert_eq!(series[0].points.len(), 10);
    assert_eq!(series[0].points[0].value, 40.0);
    assert_eq!(series[0].points[9].value, 49.0);
}

#[test]
fn response_time_chart_has_three_percentile_series() {
    let store = MetricsStore::new(10);
    store.record_application(application_sample(ts(1), 1.0, 0.5));
    let charts = render_charts(&store, 100);
    let Some(ChartPayload::TimeSeries { series, .. }) = charts.response_time else {
        panic!("expected response time chart");
    };
    let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Average", "95th Percentile", "99th Percentile"]);
}

#[test]
fn ai_chart_has_latency_and_throughput_series() {
    let store = MetricsStore::new(10);
    store.record_ai(ai_sample(ts(1)));
    let charts = render_charts(&store, 100);
    let Some(ChartPayload::TimeSeries { series, .. }) = charts.ai_performance else {
        panic!("expected AI chart");
    };
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].name, "Response Time (s)");
    assert_eq!(series[1].name, "Tokens/Second");
    assert_eq!(series[1].points[0].value, 55.0);
}

#[test]
fn business_chart_is_distribution_of_latest_sample() {
    let samples = vec![business_sample(ts(1)), business_sample(ts(2))];
    let chart = business_activity_chart(&samples).unwrap();
    let ChartPayload::Distribution { title, slices } = chart else {
        panic!("expected distribution");
    };
    assert_eq!(title, "Daily Activity Distribution");
    let labels: Vec<&str> = slices.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Code Generations",
            "Chat Interactions",
            "File Operations",
            "Deployments"
        ]
    );
    assert_eq!(slices[0].value, 800.0);
    assert_eq!(slices[3].value, 30.0);
}
