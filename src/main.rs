use agentwatch::*;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;

    let store = Arc::new(store::MetricsStore::new(
        app_config.collection.history_capacity,
    ));
    let registry = Arc::new(registry::SubscriberRegistry::new(
        app_config.dashboard.subscriber_buffer,
    ));

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let collect_timeout = Duration::from_secs(app_config.collection.collect_timeout_secs);

    let mut handles = vec![
        producer::spawn_producer(
            "system",
            Arc::new(collectors::SysinfoSystemSource::new()),
            store.clone(),
            |s, sample| s.record_system(sample),
            producer::ProducerConfig {
                interval: Duration::from_secs(app_config.collection.system_interval_secs),
                collect_timeout,
            },
            shutdown_rx.clone(),
        ),
        producer::spawn_producer(
            "application",
            Arc::new(collectors::SimulatedApplicationSource::new()),
            store.clone(),
            |s, sample| s.record_application(sample),
            producer::ProducerConfig {
                interval: Duration::from_secs(app_config.collection.application_interval_secs),
                collect_timeout,
            },
            shutdown_rx.clone(),
        ),
        producer::spawn_producer(
            "ai_model",
            Arc::new(collectors::SimulatedAiSource::new("deepseek-r1-0528")),
            store.clone(),
            |s, sample| s.record_ai(sample),
            producer::ProducerConfig {
                interval: Duration::from_secs(app_config.collection.ai_interval_secs),
                collect_timeout,
            },
            shutdown_rx.clone(),
        ),
        producer::spawn_producer(
            "business",
            Arc::new(collectors::SimulatedBusinessSource),
            store.clone(),
            |s, sample| s.record_business(sample),
            producer::ProducerConfig {
                interval: Duration::from_secs(app_config.collection.business_interval_secs),
                collect_timeout,
            },
            shutdown_rx.clone(),
        ),
        aggregation_worker::spawn(
            store.clone(),
            aggregation_worker::AggregationWorkerConfig {
                interval_secs: app_config.aggregation.interval_secs,
                retention_days: app_config.aggregation.retention_days,
            },
            shutdown_rx.clone(),
        ),
    ];

    let broadcaster = Arc::new(broadcaster::Broadcaster::new(
        store.clone(),
        registry.clone(),
        broadcaster::BroadcasterConfig {
            refresh_interval_secs: app_config.dashboard.refresh_interval_secs,
            chart_history_points: app_config.dashboard.chart_history_points,
        },
    ));
    if let Some(handle) = broadcaster.start(shutdown_rx.clone()) {
        handles.push(handle);
    }

    let app = routes::app(store, registry, app_config.clone());
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    let in_container = std::path::Path::new("/.dockerenv").exists()
        || std::env::var("CONTAINER").as_deref() == Ok("1");

    if in_container {
        // In Docker: run server until error or SIGTERM (no signal handler; avoids immediate exit)
        axum::serve(listener, app).await?;
    } else {
        tokio::select! {
            result = axum::serve(listener, app) => {
                result?;
            }
            _ = async {
                #[cfg(unix)]
                {
                    let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                        Ok(s) => s,
                        Err(_) => {
                            let _ = tokio::signal::ctrl_c().await;
                            return;
                        }
                    };
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => {}
                        _ = sigterm.recv() => {}
                    }
                }
                #[cfg(not(unix))]
                {
                    tokio::signal::ctrl_c().await
                }
            } => {
                tracing::info!("Received shutdown signal");
                let _ = shutdown_tx.send(true);
                for handle in handles {
                    let _ = handle.await;
                }
            }
        }
    }

    Ok(())
}
