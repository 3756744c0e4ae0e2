// Aggregation tests: hourly rollup math, compute-once buckets, daily rollup, retention

mod common;

use agentwatch::aggregation_worker::{
    build_daily_aggregate, build_hourly_aggregate, day_key, hour_key, run_one_tick,
};
use agentwatch::models::{
    ApplicationHourlyAggregate, HourlyAggregate, SystemHourlyAggregate,
};
use agentwatch::store::MetricsStore;
use chrono::{TimeZone, Utc};
use common::*;

#[test]
fn bucket_keys_are_calendar_aligned() {
    let t = Utc.with_ymd_and_hms(2026, 8, 23, 14, 35, 12).unwrap();
    assert_eq!(hour_key(t), "2026-08-23-14");
    assert_eq!(day_key(t), "2026-08-23");
}

#[test]
fn hourly_aggregate_averages_and_maxes_over_trailing_hour() {
    let store = MetricsStore::new(100);
    let now = Utc.with_ymd_and_hms(2026, 8, 23, 14, 0, 0).unwrap();

    // Outside the window: ignored
    store.record_system(system_sample(now - chrono::Duration::hours(2), 99.0, 99.0));
    store.record_system(system_sample(now - chrono::Duration::minutes(30), 10.0, 40.0));
    store.record_system(system_sample(now - chrono::Duration::minutes(10), 30.0, 60.0));

    store.record_application(application_sample(now - chrono::Duration::minutes(20), 2.0, 0.4));
    store.record_application(application_sample(now - chrono::Duration::minutes(5), 4.0, 0.8));

    let agg = build_hourly_aggregate(&store, now);
    assert_eq!(agg.bucket, "2026-08-23-14");

    let sys = agg.system.unwrap();
    assert_eq!(sys.avg_cpu, 20.0);
    assert_eq!(sys.max_cpu, 30.0);
    assert_eq!(sys.avg_memory, 50.0);
    assert_eq!(sys.max_memory, 60.0);

    let app = agg.application.unwrap();
    assert_eq!(app.avg_error_rate, 3.0);
    assert!((app.avg_response_time - 0.6).abs() < 1e-9);
    assert_eq!(app.total_requests, 2_000);
}

#[test]
fn hourly_sections_absent_for_kinds_with_no_samples() {
    let store = MetricsStore::new(10);
    let now = Utc.with_ymd_and_hms(2026, 8, 23, 14, 0, 0).unwrap();
    store.record_system(system_sample(now, 10.0, 20.0));
    let agg = build_hourly_aggregate(&store, now);
    assert!(agg.system.is_some());
    assert!(agg.application.is_none());
}

#[test]
fn run_one_tick_computes_each_hour_bucket_once() {
    let store = MetricsStore::new(100);
    let now = Utc.with_ymd_and_hms(2026, 8, 23, 14, 10, 0).unwrap();
    store.record_system(system_sample(now - chrono::Duration::minutes(5), 10.0, 10.0));

    run_one_tick(&store, now, 30).unwrap();
    let first = store.hourly_aggregate("2026-08-23-14").unwrap();

    // New samples arrive; a later tick in the same hour must not recompute
    store.record_system(system_sample(now, 90.0, 90.0));
    run_one_tick(&store, now + chrono::Duration::minutes(20), 30).unwrap();
    let second = store.hourly_aggregate("2026-08-23-14").unwrap();
    assert_eq!(first, second);
    assert_eq!(second.system.as_ref().unwrap().avg_cpu, 10.0);
}

#[test]
fn daily_aggregate_rolls_up_hourly_entries() {
    let store = MetricsStore::new(10);
    store.insert_hourly_aggregate(HourlyAggregate {
        bucket: "2026-08-22-03".into(),
        system: Some(SystemHourlyAggregate {
            avg_cpu: 20.0,
            avg_memory: 30.0,
            avg_disk: 40.0,
            max_cpu: 50.0,
            max_memory: 60.0,
        }),
        application: Some(ApplicationHourlyAggregate {
            avg_sessions: 10.0,
            avg_response_time: 0.4,
            avg_error_rate: 1.0,
            total_requests: 100,
        }),
    });
    store.insert_hourly_aggregate(HourlyAggregate {
        bucket: "2026-08-22-17".into(),
        system: Some(SystemHourlyAggregate {
            avg_cpu: 40.0,
            avg_memory: 50.0,
            avg_disk: 40.0,
            max_cpu: 80.0,
            max_memory: 55.0,
        }),
        application: Some(ApplicationHourlyAggregate {
            avg_sessions: 20.0,
            avg_response_time: 0.8,
            avg_error_rate: 3.0,
            total_requests: 300,
        }),
    });

    let daily = build_daily_aggregate(&store, "2026-08-22").unwrap();
    let sys = daily.system.unwrap();
    assert_eq!(sys.avg_cpu, 30.0);
    assert_eq!(sys.max_cpu, 80.0);
    assert_eq!(sys.avg_memory, 40.0);
    assert_eq!(sys.max_memory, 60.0);

    let app = daily.application.unwrap();
    assert_eq!(app.avg_sessions, 15.0);
    assert_eq!(app.total_requests, 400);
    assert!((app.avg_response_time - 0.6).abs() < 1e-9);
}

#[test]
fn daily_aggregate_absent_when_day_has_no_hourly_entries() {
    let store = MetricsStore::new(10);
    assert!(build_daily_aggregate(&store, "2026-08-22").is_none());

    // A midnight tick over an empty day creates no zero-valued daily entry
    let midnight = Utc.with_ymd_and_hms(2026, 8, 23, 0, 5, 0).unwrap();
    run_one_tick(&store, midnight, 30).unwrap();
    assert!(store.daily_aggregate("2026-08-22").is_none());
    assert_eq!(store.daily_count(), 0);
}

#[test]
fn midnight_tick_rolls_up_previous_day() {
    let store = MetricsStore::new(10);
    store.insert_hourly_aggregate(HourlyAggregate {
        bucket: "2026-08-22-23".into(),
        system: Some(SystemHourlyAggregate {
            avg_cpu: 25.0,
            avg_memory: 35.0,
            avg_disk: 45.0,
            max_cpu: 55.0,
            max_memory: 65.0,
        }),
        application: None,
    });

    let midnight = Utc.with_ymd_and_hms(2026, 8, 23, 0, 5, 0).unwrap();
    run_one_tick(&store, midnight, 30).unwrap();

    let daily = store.daily_aggregate("2026-08-22").unwrap();
    assert_eq!(daily.system.unwrap().avg_cpu, 25.0);
    assert!(daily.application.is_none());
}

#[test]
fn retention_prunes_aggregates_older_than_window() {
    let store = MetricsStore::new(10);
    let now = Utc.with_ymd_and_hms(2026, 8, 23, 14, 0, 0).unwrap();

    store.insert_hourly_aggregate(HourlyAggregate {
        bucket: "2026-06-01-10".into(),
        system: None,
        application: None,
    });
    store.insert_daily_aggregate(agentwatch::models::DailyAggregate {
        bucket: "2026-06-01".into(),
        system: None,
        application: None,
    });
    store.insert_daily_aggregate(agentwatch::models::DailyAggregate {
        bucket: "2026-08-20".into(),
        system: None,
        application: None,
    });

    run_one_tick(&store, now, 30).unwrap();

    assert!(store.daily_aggregate("2026-06-01").is_none());
    assert!(store.hourly_aggregate("2026-06-01-10").is_none());
    assert!(store.daily_aggregate("2026-08-20").is_some());
}
